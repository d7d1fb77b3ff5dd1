//! Status name to status id resolution.

use std::collections::HashMap;

use crate::domain::foundation::StatusId;

/// Snapshot of the status catalog taken once per import run.
///
/// Lookups are exact and case-sensitive. Tokens with no match resolve to
/// the default status. The snapshot is never refreshed, so statuses added
/// while an import runs are not seen until the next run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMapping {
    by_name: HashMap<String, StatusId>,
    default_status: StatusId,
}

impl StatusMapping {
    /// Builds the mapping. When two statuses share a name the later one wins.
    pub fn new(
        statuses: impl IntoIterator<Item = (String, StatusId)>,
        default_status: StatusId,
    ) -> Self {
        Self {
            by_name: statuses.into_iter().collect(),
            default_status,
        }
    }

    /// Resolves a `TopicStatus` token to a status id.
    pub fn resolve(&self, token: &str) -> StatusId {
        self.by_name
            .get(token)
            .copied()
            .unwrap_or(self.default_status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn mapping() -> StatusMapping {
        StatusMapping::new(
            vec![
                ("New".to_string(), StatusId::new(1)),
                ("Open".to_string(), StatusId::new(2)),
                ("Closed".to_string(), StatusId::new(3)),
            ],
            StatusId::new(1),
        )
    }

    #[test]
    fn resolves_exact_match() {
        assert_eq!(mapping().resolve("Open"), StatusId::new(2));
        assert_eq!(mapping().resolve("Closed"), StatusId::new(3));
    }

    #[test]
    fn unknown_token_resolves_to_default() {
        assert_eq!(mapping().resolve("Active"), StatusId::new(1));
    }

    #[test]
    fn empty_token_resolves_to_default() {
        assert_eq!(mapping().resolve(""), StatusId::new(1));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(mapping().resolve("open"), StatusId::new(1));
        assert_eq!(mapping().resolve("CLOSED"), StatusId::new(1));
    }

    #[test]
    fn status_named_default_is_an_ordinary_entry() {
        let mapping = StatusMapping::new(
            vec![("default".to_string(), StatusId::new(9))],
            StatusId::new(4),
        );

        assert_eq!(mapping.resolve("default"), StatusId::new(9));
        assert_eq!(mapping.resolve("Open"), StatusId::new(4));
    }

    #[test]
    fn later_duplicate_name_wins() {
        let mapping = StatusMapping::new(
            vec![
                ("Open".to_string(), StatusId::new(2)),
                ("Open".to_string(), StatusId::new(7)),
            ],
            StatusId::new(1),
        );

        assert_eq!(mapping.resolve("Open"), StatusId::new(7));
    }

    proptest! {
        #[test]
        fn tokens_outside_catalog_always_resolve_to_default(token in "[a-z ]{0,12}") {
            // catalog names are capitalized, generated tokens never are
            prop_assert_eq!(mapping().resolve(&token), StatusId::new(1));
        }
    }
}
