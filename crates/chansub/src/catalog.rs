//! Filter catalog construction.
//!
//! Turns normalized, classified fields into the sorted list of filterable
//! fields the selection UI consumes. The catalog is recomputed from scratch
//! whenever the metadata or the chosen project set changes; it is never
//! mutated in place.

use crate::classify::{classify_field, FieldKind};
use crate::filters::Inclusion;
use crate::metadata::{FieldSchema, IssueMetadata, IssueTypeRef};
use crate::normalize::{collect_occurrences, group_by_key, GroupedField};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One selectable value for an enumerated field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldOption {
    /// Stable identifier, used in filter values and queries
    pub value: String,
    /// Display text
    pub label: String,
}

/// A field exposed as a selectable subscription filter criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FilterableField {
    /// Field key, unique within one catalog
    pub key: String,
    /// Display name
    pub name: String,
    /// How values are chosen for this field
    pub kind: FieldKind,
    /// Schema copied from the representative descriptor
    pub schema: FieldSchema,
    /// Selectable values; empty for free-text and epic link fields
    pub values: Vec<FieldOption>,
    /// True when values are not enumerable and the user types arbitrary text
    pub user_defined: bool,
    /// Every issue type across every chosen project that carries this field
    pub valid_issue_types: Vec<IssueTypeRef>,
}

impl FilterableField {
    /// Whether the underlying field holds multiple values.
    pub fn is_multi_valued(&self) -> bool {
        self.schema.is_multi_valued()
    }

    /// Inclusion operators legal for this field.
    ///
    /// `IncludeAll` ("must contain all of") only makes sense for
    /// multi-valued fields and is never offered otherwise.
    pub fn valid_inclusions(&self) -> Vec<Inclusion> {
        if self.is_multi_valued() {
            vec![
                Inclusion::IncludeAny,
                Inclusion::IncludeAll,
                Inclusion::ExcludeAny,
                Inclusion::Empty,
            ]
        } else {
            vec![
                Inclusion::IncludeAny,
                Inclusion::ExcludeAny,
                Inclusion::Empty,
            ]
        }
    }

    /// Whether this field carries an issue type with the given id.
    pub fn supports_issue_type(&self, issue_type_id: &str) -> bool {
        self.valid_issue_types.iter().any(|t| t.id == issue_type_id)
    }
}

/// Build the filter catalog for the given metadata and project selection.
///
/// Epic link, when present, is surfaced first; the remaining fields follow
/// sorted lexicographically by display name (case-sensitive, ascending).
/// That ordering is a contract the consuming UI depends on. Empty metadata
/// or an empty project list yields an empty catalog, not an error.
pub fn build_catalog(metadata: &IssueMetadata, project_keys: &[String]) -> Vec<FilterableField> {
    let groups = group_by_key(collect_occurrences(metadata, project_keys));

    let mut epic_link = None;
    let mut fields = Vec::new();

    for group in groups {
        match classify_field(&group.descriptor) {
            FieldKind::Unsupported => continue,
            FieldKind::EpicLink => {
                // Legal values resolve dynamically elsewhere; allowed
                // values from static metadata are discarded.
                if epic_link.is_none() {
                    epic_link = Some(assemble(group, FieldKind::EpicLink, Vec::new(), false));
                }
            }
            FieldKind::Enumerated => {
                let values = enumerated_options(&group);
                fields.push(assemble(group, FieldKind::Enumerated, values, false));
            }
            FieldKind::FreeText => {
                fields.push(assemble(group, FieldKind::FreeText, Vec::new(), true));
            }
        }
    }

    fields.sort_by(|a, b| a.name.cmp(&b.name));

    let mut catalog = Vec::with_capacity(fields.len() + 1);
    if let Some(epic) = epic_link {
        catalog.push(epic);
    }
    catalog.extend(fields);

    debug!(
        fields = catalog.len(),
        projects = project_keys.len(),
        "built filter catalog"
    );
    catalog
}

/// Look up a catalog field by key.
///
/// A `None` here for a configured filter key means the field vanished from
/// freshly fetched metadata; the caller drops the stale filter before
/// saving.
pub fn find_field<'a>(catalog: &'a [FilterableField], key: &str) -> Option<&'a FilterableField> {
    catalog.iter().find(|f| f.key == key)
}

fn enumerated_options(group: &GroupedField) -> Vec<FieldOption> {
    group
        .descriptor
        .allowed_values
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|allowed| FieldOption {
            value: allowed.id.clone(),
            label: allowed.label().to_string(),
        })
        .collect()
}

fn assemble(
    group: GroupedField,
    kind: FieldKind,
    values: Vec<FieldOption>,
    user_defined: bool,
) -> FilterableField {
    FilterableField {
        key: group.key,
        name: group.descriptor.name,
        kind,
        schema: group.descriptor.schema,
        values,
        user_defined,
        valid_issue_types: group.valid_issue_types,
    }
}
