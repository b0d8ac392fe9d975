//! Conflict detection between configured filters and issue-type selection.
//!
//! A conflict arises when a configured filter references a field that some
//! selected issue type does not carry. Conflicts are advisory: they block
//! saving but never mutate the user's in-progress selection, and the caller
//! re-runs detection after every change, so only the first conflict is
//! reported and the user resolves them incrementally.

use crate::catalog::FilterableField;
use crate::filters::FilterValue;
use crate::metadata::IssueType;
use tracing::debug;

/// Validate an existing selection against the configured filters.
///
/// Every selected issue type must appear in each configured field's
/// `valid_issue_types`. Fields are checked in catalog order; the first one
/// with a non-empty conflicting set produces
/// `"<field name> does not exist for issue type(s): <names>."`.
/// Returns `None` when every configured field covers the whole selection.
///
/// Filters whose key no longer resolves in the catalog are skipped here;
/// schema drift is reported separately by the validation module.
pub fn filter_conflicts(
    catalog: &[FilterableField],
    issue_types: &[&IssueType],
    selected_ids: &[String],
    filters: &[FilterValue],
) -> Option<String> {
    for field in configured_fields(catalog, filters) {
        let conflicting: Vec<String> = selected_ids
            .iter()
            .filter(|id| !field.supports_issue_type(id))
            .map(|id| resolve_name(issue_types, id))
            .collect();

        if !conflicting.is_empty() {
            debug!(field = %field.key, count = conflicting.len(), "filter conflict");
            return Some(format!(
                "{} does not exist for issue type(s): {}.",
                field.name,
                conflicting.join(", ")
            ));
        }
    }

    None
}

/// Validate newly added issue types against the configured filters.
///
/// Only ids present in `selected_ids` but not in `previous_ids` are
/// checked. The first added issue type missing any configured field
/// produces a message naming that issue type and the fields it lacks.
pub fn added_issue_type_conflicts(
    catalog: &[FilterableField],
    issue_types: &[&IssueType],
    previous_ids: &[String],
    selected_ids: &[String],
    filters: &[FilterValue],
) -> Option<String> {
    let added = selected_ids
        .iter()
        .filter(|id| !previous_ids.contains(*id));

    for id in added {
        let missing: Vec<String> = configured_fields(catalog, filters)
            .filter(|field| !field.supports_issue_type(id))
            .map(|field| field.name.clone())
            .collect();

        if !missing.is_empty() {
            let name = resolve_name(issue_types, id);
            debug!(issue_type = %id, fields = missing.len(), "added issue type conflict");
            return Some(format!(
                "Issue Type(s) \"{}\" does not have filter field(s): \"{}\".  \
                 Please update the conflicting fields or create a separate subscription.",
                name,
                missing.join(", ")
            ));
        }
    }

    None
}

/// Catalog fields referenced by at least one configured filter, in catalog
/// order.
fn configured_fields<'a>(
    catalog: &'a [FilterableField],
    filters: &'a [FilterValue],
) -> impl Iterator<Item = &'a FilterableField> {
    catalog
        .iter()
        .filter(|field| filters.iter().any(|f| f.key == field.key))
}

fn resolve_name(issue_types: &[&IssueType], id: &str) -> String {
    issue_types
        .iter()
        .find(|t| t.id == id)
        .map(|t| t.name.clone())
        .unwrap_or_else(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::Inclusion;
    use crate::metadata::IssueMetadata;

    fn sample_metadata() -> IssueMetadata {
        IssueMetadata::from_json(
            r#"{
            "projects": [
                {
                    "key": "KT",
                    "issuetypes": [
                        {
                            "id": "10001",
                            "name": "Bug",
                            "fields": {
                                "priority": {
                                    "key": "priority",
                                    "name": "Priority",
                                    "schema": {"type": "priority"},
                                    "allowedValues": [
                                        {"id": "1", "name": "Highest"},
                                        {"id": "2", "name": "High"}
                                    ]
                                },
                                "labels": {
                                    "key": "labels",
                                    "name": "Labels",
                                    "schema": {"type": "array", "items": "string"}
                                }
                            }
                        },
                        {
                            "id": "10002",
                            "name": "Task",
                            "fields": {
                                "labels": {
                                    "key": "labels",
                                    "name": "Labels",
                                    "schema": {"type": "array", "items": "string"}
                                }
                            }
                        },
                        {
                            "id": "10003",
                            "name": "Story",
                            "fields": {}
                        }
                    ]
                }
            ]
        }"#,
        )
        .unwrap()
    }

    fn priority_filter() -> FilterValue {
        FilterValue {
            key: "priority".to_string(),
            inclusion: Inclusion::IncludeAny,
            values: vec!["1".to_string()],
        }
    }

    #[test]
    fn test_no_conflict_when_selection_covered() {
        let meta = sample_metadata();
        let keys = vec!["KT".to_string()];
        let catalog = crate::catalog::build_catalog(&meta, &keys);
        let issue_types = meta.issue_types_for(&keys);

        let result = filter_conflicts(
            &catalog,
            &issue_types,
            &["10001".to_string()],
            &[priority_filter()],
        );
        assert_eq!(result, None);
    }

    #[test]
    fn test_conflict_names_field_and_issue_type() {
        let meta = sample_metadata();
        let keys = vec!["KT".to_string()];
        let catalog = crate::catalog::build_catalog(&meta, &keys);
        let issue_types = meta.issue_types_for(&keys);

        let result = filter_conflicts(
            &catalog,
            &issue_types,
            &["10001".to_string(), "10002".to_string()],
            &[priority_filter()],
        );
        assert_eq!(
            result,
            Some("Priority does not exist for issue type(s): Task.".to_string())
        );
    }

    #[test]
    fn test_only_first_conflicting_field_reported() {
        let meta = sample_metadata();
        let keys = vec!["KT".to_string()];
        let catalog = crate::catalog::build_catalog(&meta, &keys);
        let issue_types = meta.issue_types_for(&keys);

        // Story carries neither field, so both configured filters conflict;
        // only the first field in catalog order (Labels) is reported.
        let filters = vec![
            priority_filter(),
            FilterValue {
                key: "labels".to_string(),
                inclusion: Inclusion::IncludeAny,
                values: vec!["infra".to_string()],
            },
        ];

        let result = filter_conflicts(
            &catalog,
            &issue_types,
            &["10003".to_string()],
            &filters,
        );
        assert_eq!(
            result,
            Some("Labels does not exist for issue type(s): Story.".to_string())
        );
    }

    #[test]
    fn test_stale_filter_key_skipped() {
        let meta = sample_metadata();
        let keys = vec!["KT".to_string()];
        let catalog = crate::catalog::build_catalog(&meta, &keys);
        let issue_types = meta.issue_types_for(&keys);

        let stale = FilterValue {
            key: "vanished".to_string(),
            inclusion: Inclusion::IncludeAny,
            values: vec!["x".to_string()],
        };
        let result = filter_conflicts(&catalog, &issue_types, &["10001".to_string()], &[stale]);
        assert_eq!(result, None);
    }

    #[test]
    fn test_unknown_issue_type_id_reported_verbatim() {
        let meta = sample_metadata();
        let keys = vec!["KT".to_string()];
        let catalog = crate::catalog::build_catalog(&meta, &keys);
        let issue_types = meta.issue_types_for(&keys);

        let result = filter_conflicts(
            &catalog,
            &issue_types,
            &["99999".to_string()],
            &[priority_filter()],
        );
        assert_eq!(
            result,
            Some("Priority does not exist for issue type(s): 99999.".to_string())
        );
    }

    #[test]
    fn test_added_variant_restricts_to_new_ids() {
        let meta = sample_metadata();
        let keys = vec!["KT".to_string()];
        let catalog = crate::catalog::build_catalog(&meta, &keys);
        let issue_types = meta.issue_types_for(&keys);

        // 10002 was already selected; adding nothing new means no report
        // even though 10002 conflicts with the priority filter.
        let result = added_issue_type_conflicts(
            &catalog,
            &issue_types,
            &["10001".to_string(), "10002".to_string()],
            &["10001".to_string(), "10002".to_string()],
            &[priority_filter()],
        );
        assert_eq!(result, None);
    }

    #[test]
    fn test_added_variant_message_format() {
        let meta = sample_metadata();
        let keys = vec!["KT".to_string()];
        let catalog = crate::catalog::build_catalog(&meta, &keys);
        let issue_types = meta.issue_types_for(&keys);

        let result = added_issue_type_conflicts(
            &catalog,
            &issue_types,
            &["10001".to_string()],
            &["10001".to_string(), "10002".to_string()],
            &[priority_filter()],
        );
        assert_eq!(
            result,
            Some(
                "Issue Type(s) \"Task\" does not have filter field(s): \"Priority\".  \
                 Please update the conflicting fields or create a separate subscription."
                    .to_string()
            )
        );
    }

    #[test]
    fn test_no_filters_means_no_conflict() {
        let meta = sample_metadata();
        let keys = vec!["KT".to_string()];
        let catalog = crate::catalog::build_catalog(&meta, &keys);
        let issue_types = meta.issue_types_for(&keys);

        let result = filter_conflicts(
            &catalog,
            &issue_types,
            &["10001".to_string(), "10002".to_string()],
            &[],
        );
        assert_eq!(result, None);

        let result = added_issue_type_conflicts(
            &catalog,
            &issue_types,
            &[],
            &["10002".to_string()],
            &[],
        );
        assert_eq!(result, None);
    }
}
