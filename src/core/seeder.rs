use sqlx::PgPool;
use uuid::Uuid;

/// Owner recorded on seeded components
pub const SEED_OWNER_ID: Uuid = Uuid::from_u128(1);

const SEED_CATEGORIES: &[(&str, &str)] = &[
    ("UI Kit", "ui-kit"),
    ("Dashboard", "dashboard"),
    ("Authentication", "authentication"),
];

const SEED_TAGS: &[(&str, &str)] = &[
    ("React", "react"),
    ("Tailwind", "tailwind"),
    ("Bootstrap", "bootstrap"),
];

struct SeedComponent {
    name: &'static str,
    slug: &'static str,
    description: &'static str,
    code_jsx: &'static str,
    code_css: &'static str,
    category_slug: &'static str,
}

const SEED_COMPONENTS: &[SeedComponent] = &[
    SeedComponent {
        name: "Button",
        slug: "button",
        description: "Reusable button component",
        code_jsx: "<button className='btn'>Click me</button>",
        code_css: ".btn { padding: 8px; background-color: blue; }",
        category_slug: "ui-kit",
    },
    SeedComponent {
        name: "Card",
        slug: "card",
        description: "Card component with shadow",
        code_jsx: "<div className='card'>Card Content</div>",
        code_css: ".card { background: white; border-radius: 4px; }",
        category_slug: "ui-kit",
    },
];

/// What happened to a single seed row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SeedOutcome {
    Inserted,
    AlreadyPresent,
    /// The component's category has no live row
    MissingCategory,
}

impl SeedOutcome {
    fn from_rows_affected(rows: u64) -> Self {
        if rows == 0 {
            SeedOutcome::AlreadyPresent
        } else {
            SeedOutcome::Inserted
        }
    }
}

/// Outcome counts of one seeding run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub inserted: u64,
    pub skipped: u64,
    pub missing_category: u64,
    pub failed: u64,
}

impl SeedSummary {
    fn record(&mut self, entity: &str, slug: &str, result: Result<SeedOutcome, sqlx::Error>) {
        match result {
            Ok(SeedOutcome::Inserted) => self.inserted += 1,
            Ok(SeedOutcome::AlreadyPresent) => self.skipped += 1,
            Ok(SeedOutcome::MissingCategory) => self.missing_category += 1,
            Err(e) => {
                tracing::warn!("Failed to seed {} '{}': {}", entity, slug, e);
                self.failed += 1;
            }
        }
    }
}

/// Insert the starter catalog. Rows whose slug is already live are left alone,
/// so running this on every startup is safe.
pub async fn seed(pool: &PgPool) -> SeedSummary {
    let mut summary = SeedSummary::default();

    for (name, slug) in SEED_CATEGORIES {
        let result = sqlx::query(
            r#"
            INSERT INTO categories (name, slug)
            VALUES ($1, $2)
            ON CONFLICT (slug) WHERE deleted_at IS NULL DO NOTHING
            "#,
        )
        .bind(*name)
        .bind(*slug)
        .execute(pool)
        .await
        .map(|r| SeedOutcome::from_rows_affected(r.rows_affected()));
        summary.record("category", slug, result);
    }

    for (name, slug) in SEED_TAGS {
        let result = sqlx::query(
            r#"
            INSERT INTO tags (name, slug)
            VALUES ($1, $2)
            ON CONFLICT (slug) WHERE deleted_at IS NULL DO NOTHING
            "#,
        )
        .bind(*name)
        .bind(*slug)
        .execute(pool)
        .await
        .map(|r| SeedOutcome::from_rows_affected(r.rows_affected()));
        summary.record("tag", slug, result);
    }

    for component in SEED_COMPONENTS {
        let result = seed_component(pool, component).await;
        summary.record("component", component.slug, result);
    }

    tracing::info!(
        "Seeding finished: {} inserted, {} already present, {} missing a category, {} failed",
        summary.inserted,
        summary.skipped,
        summary.missing_category,
        summary.failed
    );
    summary
}

async fn seed_component(
    pool: &PgPool,
    component: &SeedComponent,
) -> Result<SeedOutcome, sqlx::Error> {
    let category_id: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM categories WHERE slug = $1 AND deleted_at IS NULL")
            .bind(component.category_slug)
            .fetch_optional(pool)
            .await?;

    let Some(category_id) = category_id else {
        tracing::warn!(
            "Skipping seed component '{}': category '{}' not found",
            component.slug,
            component.category_slug
        );
        return Ok(SeedOutcome::MissingCategory);
    };

    let result = sqlx::query(
        r#"
        INSERT INTO components (
            name, slug, description, code_jsx, code_css, category_id, user_id
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (slug) WHERE deleted_at IS NULL DO NOTHING
        "#,
    )
    .bind(component.name)
    .bind(component.slug)
    .bind(component.description)
    .bind(component.code_jsx)
    .bind(component.code_css)
    .bind(category_id)
    .bind(SEED_OWNER_ID)
    .execute(pool)
    .await?;

    Ok(SeedOutcome::from_rows_affected(result.rows_affected()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::slug::slugify;

    #[test]
    fn test_fixture_slugs_match_names() {
        for (name, slug) in SEED_CATEGORIES.iter().chain(SEED_TAGS) {
            assert_eq!(slugify(name), *slug);
        }
        for component in SEED_COMPONENTS {
            assert_eq!(slugify(component.name), component.slug);
            assert!(SEED_CATEGORIES
                .iter()
                .any(|(_, slug)| *slug == component.category_slug));
        }
    }

    #[test]
    fn test_owner_id() {
        assert_eq!(
            SEED_OWNER_ID.to_string(),
            "00000000-0000-0000-0000-000000000001"
        );
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = SeedSummary::default();
        summary.record("tag", "react", Ok(SeedOutcome::from_rows_affected(1)));
        summary.record("tag", "react", Ok(SeedOutcome::from_rows_affected(0)));
        summary.record("component", "grid", Ok(SeedOutcome::MissingCategory));
        summary.record("tag", "vue", Err(sqlx::Error::RowNotFound));
        assert_eq!(
            summary,
            SeedSummary {
                inserted: 1,
                skipped: 1,
                missing_category: 1,
                failed: 1
            }
        );
    }

    #[sqlx::test(migrator = "crate::core::database::MIGRATOR")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn seeding_twice_inserts_once(pool: PgPool) {
        let first = seed(&pool).await;
        assert_eq!(first.inserted, 8);
        assert_eq!(first.missing_category, 0);
        assert_eq!(first.failed, 0);

        let second = seed(&pool).await;
        assert_eq!(second.inserted, 0);
        assert_eq!(second.skipped, 8);

        let owners: Vec<(String, Uuid, String)> = sqlx::query_as(
            r#"
            SELECT c.slug, c.user_id, cat.slug
            FROM components c JOIN categories cat ON cat.id = c.category_id
            ORDER BY c.slug
            "#,
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        assert_eq!(
            owners,
            vec![
                ("button".to_string(), SEED_OWNER_ID, "ui-kit".to_string()),
                ("card".to_string(), SEED_OWNER_ID, "ui-kit".to_string()),
            ]
        );
    }

    #[sqlx::test(migrator = "crate::core::database::MIGRATOR")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn component_without_category_is_reported_not_skipped(pool: PgPool) {
        let orphan = SeedComponent {
            name: "Grid",
            slug: "grid",
            description: "Layout grid",
            code_jsx: "<div className='grid' />",
            code_css: ".grid { display: grid; }",
            category_slug: "layout",
        };

        let outcome = seed_component(&pool, &orphan).await.unwrap();
        assert_eq!(outcome, SeedOutcome::MissingCategory);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM components")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
