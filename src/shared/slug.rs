/// Derive a slug from a display name: trimmed, lowercased, spaces become hyphens.
///
/// No collision handling happens here; uniqueness is enforced by the store.
pub fn slugify(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "-")
}
