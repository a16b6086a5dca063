use serde::{Deserialize, Serialize};
use sqlx::Type;
use utoipa::ToSchema;

/// Publication status of a component, stored as the `component_status` enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "component_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl ComponentStatus {
    /// Whether moving from `self` to `next` is allowed. Staying put is always allowed.
    pub fn can_transition_to(self, next: ComponentStatus) -> bool {
        use ComponentStatus::*;

        self == next
            || matches!(
                (self, next),
                (Draft, Published)
                    | (Draft, Archived)
                    | (Published, Draft)
                    | (Published, Archived)
                    | (Archived, Draft)
            )
    }
}

impl std::fmt::Display for ComponentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComponentStatus::Draft => write!(f, "draft"),
            ComponentStatus::Published => write!(f, "published"),
            ComponentStatus::Archived => write!(f, "archived"),
        }
    }
}

/// Review outcome of a component, stored as the `approval_status` enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "approval_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    /// Whether moving from `self` to `next` is allowed. Staying put is always allowed.
    pub fn can_transition_to(self, next: ApprovalStatus) -> bool {
        use ApprovalStatus::*;

        self == next
            || matches!(
                (self, next),
                (Pending, Approved) | (Pending, Rejected) | (Approved, Pending) | (Rejected, Pending)
            )
    }

    /// A decided state carries a reviewer; pending never does
    pub fn requires_reviewer(self) -> bool {
        !matches!(self, ApprovalStatus::Pending)
    }
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApprovalStatus::Pending => write!(f, "pending"),
            ApprovalStatus::Approved => write!(f, "approved"),
            ApprovalStatus::Rejected => write!(f, "rejected"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        use ComponentStatus::*;

        assert!(Draft.can_transition_to(Published));
        assert!(Draft.can_transition_to(Archived));
        assert!(Published.can_transition_to(Draft));
        assert!(Published.can_transition_to(Archived));
        assert!(Archived.can_transition_to(Draft));
        assert!(!Archived.can_transition_to(Published));

        for s in [Draft, Published, Archived] {
            assert!(s.can_transition_to(s), "{s} -> {s} should be a no-op");
        }
    }

    #[test]
    fn test_approval_transitions() {
        use ApprovalStatus::*;

        for (from, to) in [
            (Pending, Approved),
            (Pending, Rejected),
            (Approved, Pending),
            (Rejected, Pending),
        ] {
            assert!(from.can_transition_to(to), "{from} -> {to}");
        }

        // A decision must be reopened before it can be reversed
        assert!(!Approved.can_transition_to(Rejected));
        assert!(!Rejected.can_transition_to(Approved));
    }

    #[test]
    fn test_reviewer_requirement() {
        assert!(!ApprovalStatus::Pending.requires_reviewer());
        assert!(ApprovalStatus::Approved.requires_reviewer());
        assert!(ApprovalStatus::Rejected.requires_reviewer());
    }

    #[test]
    fn test_wire_format_matches_display() {
        for s in [
            ComponentStatus::Draft,
            ComponentStatus::Published,
            ComponentStatus::Archived,
        ] {
            assert_eq!(serde_json::to_value(s).unwrap(), s.to_string());
        }
        let parsed: ApprovalStatus = serde_json::from_str("\"approved\"").unwrap();
        assert_eq!(parsed, ApprovalStatus::Approved);
        assert!(serde_json::from_str::<ApprovalStatus>("\"maybe\"").is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(ComponentStatus::default(), ComponentStatus::Draft);
        assert_eq!(ApprovalStatus::default(), ApprovalStatus::Pending);
    }
}
