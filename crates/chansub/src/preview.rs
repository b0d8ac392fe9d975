//! Approximate query synthesis for subscription previews.
//!
//! Renders the chosen project, issue types, and field filters into the
//! query text the server-side subscription will approximately run. The
//! string is a human preview, not an executable guarantee.

use crate::catalog::{find_field, FilterableField};
use crate::filters::{FilterValue, Inclusion, SubscriptionFilters};
use crate::metadata::SchemaType;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Advisory shown when the empty-security policy is in force and the user
/// has not configured a security-level filter.
const SECURITY_LEVEL_NOTE: &str =
    "Only issues without a security level will match this subscription.";

/// A synthesized preview: the query text plus an optional advisory note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QueryPreview {
    /// Approximate query text
    pub query: String,
    /// Policy advisory, communicated separately so the visible query text
    /// is never silently altered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Render the subscription selection into a preview.
///
/// Clauses are emitted in fixed order: project, issue types, then one
/// clause per configured filter in list order, joined with ` AND ` and
/// suffixed with ` ORDER BY updated DESC`.
///
/// When `require_empty_security` is set and no configured filter references
/// a security-level field, the preview behaves as though an implicit
/// `security is EMPTY` clause were present; that is reported through
/// [`QueryPreview::note`] rather than injected into the query text.
pub fn synthesize_preview(
    filters: &SubscriptionFilters,
    catalog: &[FilterableField],
    require_empty_security: bool,
) -> QueryPreview {
    let mut clauses = Vec::new();

    if let Some(project) = filters.projects.first() {
        clauses.push(format!("project = {}", project));
    }

    if !filters.issue_types.is_empty() {
        clauses.push(format!(
            "issuetype IN ({})",
            filters.issue_types.join(", ")
        ));
    }

    for filter in &filters.fields {
        let clause = render_filter(filter);
        // IncludeAll over zero values renders nothing to conjoin.
        if !clause.is_empty() {
            clauses.push(clause);
        }
    }

    let query = if clauses.is_empty() {
        "ORDER BY updated DESC".to_string()
    } else {
        format!("{} ORDER BY updated DESC", clauses.join(" AND "))
    };

    let note = if require_empty_security && !has_security_filter(filters, catalog) {
        Some(SECURITY_LEVEL_NOTE.to_string())
    } else {
        None
    };

    QueryPreview { query, note }
}

fn render_filter(filter: &FilterValue) -> String {
    match filter.inclusion {
        Inclusion::IncludeAny => format!("{} in ({})", filter.key, quoted_list(&filter.values)),
        Inclusion::IncludeAll => filter
            .values
            .iter()
            .map(|v| format!("{} = {}", filter.key, v))
            .collect::<Vec<_>>()
            .join(" AND "),
        Inclusion::ExcludeAny => {
            format!("{} not in ({})", filter.key, quoted_list(&filter.values))
        }
        // Residual values are ignored, never an error: the caller clears
        // them, but the synthesizer must still render stale state.
        Inclusion::Empty => format!("{} is EMPTY", filter.key),
    }
}

fn quoted_list(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("\"{}\"", v))
        .collect::<Vec<_>>()
        .join(",")
}

fn has_security_filter(filters: &SubscriptionFilters, catalog: &[FilterableField]) -> bool {
    filters.fields.iter().any(|filter| {
        find_field(catalog, &filter.key)
            .map(|field| field.schema.kind == SchemaType::SecurityLevel)
            .unwrap_or(false)
    })
}
