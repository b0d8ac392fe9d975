//! Field classification: deciding whether a field may become a subscription
//! filter, and how its values are chosen.
//!
//! The tracker describes fields through an open-ended schema vocabulary; the
//! classifier reduces that to an explicit [`FieldKind`] tag, computed once,
//! so downstream components switch on the tag instead of re-inspecting raw
//! schema strings.

use crate::metadata::{FieldDescriptor, SchemaType};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Custom field types whose values are time-boxed iteration identifiers.
///
/// Their allowed-value set is not project-scoped and would be misleading as
/// a filter, so they are rejected before any acceptance rule runs.
const DENIED_CUSTOM_TYPES: &[&str] = &[
    "com.pyxis.greenhopper.jira:gh-sprint",
    "com.pyxis.greenhopper.jira:gh-lexo-rank",
];

/// Cross-issue linking custom types surfaced as the epic link pseudo-field.
const EPIC_LINK_CUSTOM_TYPES: &[&str] = &["com.pyxis.greenhopper.jira:gh-epic-link"];

/// How a filterable field's values are chosen, or why it is not filterable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Values come from a closed set of choices
    Enumerated,
    /// The user types arbitrary text; no enumerable values
    FreeText,
    /// Cross-issue link whose legal values are resolved dynamically
    EpicLink,
    /// Not eligible as a subscription filter
    Unsupported,
}

impl FieldKind {
    /// Whether this kind may appear in a filter catalog.
    pub fn is_filterable(&self) -> bool {
        !matches!(self, FieldKind::Unsupported)
    }
}

/// Classify a field descriptor.
///
/// Rules run in order and short-circuit on the first match; the deny-list
/// check must run first because a field can match both an acceptance shape
/// and a denied custom type (an array-of-option sprint field, for example).
pub fn classify_field(descriptor: &FieldDescriptor) -> FieldKind {
    let schema = &descriptor.schema;

    if let Some(custom) = schema.custom.as_deref() {
        if DENIED_CUSTOM_TYPES.contains(&custom) {
            return FieldKind::Unsupported;
        }
    }

    if matches!(schema.kind, SchemaType::Priority | SchemaType::SecurityLevel) {
        return FieldKind::Enumerated;
    }

    if let Some(custom) = schema.custom.as_deref() {
        if EPIC_LINK_CUSTOM_TYPES.contains(&custom) {
            return FieldKind::EpicLink;
        }
    }

    if schema.kind == SchemaType::Option {
        return FieldKind::Enumerated;
    }

    if schema.kind == SchemaType::Array {
        return match schema.items {
            Some(SchemaType::Option) | Some(SchemaType::Version) => FieldKind::Enumerated,
            Some(SchemaType::String) => {
                if descriptor.allowed_values.is_some() {
                    FieldKind::Enumerated
                } else {
                    FieldKind::FreeText
                }
            }
            _ => FieldKind::Unsupported,
        };
    }

    FieldKind::Unsupported
}
