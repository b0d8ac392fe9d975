//! Wire data model for tracker issue metadata.
//!
//! This module defines the serde shapes for the per-project create-meta
//! payload fetched from the tracker: projects, their issue types, and the
//! field descriptors each issue type carries. The engine only reads these
//! structures; it never mutates them.

use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field schema kind as reported by the tracker.
///
/// The tracker's schema vocabulary is open-ended; kinds the engine does not
/// dispatch on deserialize as [`SchemaType::Unknown`] rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    /// Free-form text
    String,
    /// Multi-valued field; element kind is in `FieldSchema::items`
    Array,
    /// Single-choice select
    Option,
    /// Built-in priority field
    Priority,
    /// Built-in security level field
    SecurityLevel,
    /// Project version reference
    Version,
    /// User reference
    User,
    /// Date value
    Date,
    /// Issue type reference
    #[serde(rename = "issuetype")]
    IssueTypeKind,
    /// Numeric value
    Number,
    /// Any kind the engine does not recognize
    #[serde(other)]
    Unknown,
}

/// Schema descriptor attached to a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldSchema {
    /// Value kind of the field
    #[serde(rename = "type")]
    pub kind: SchemaType,
    /// Fully-qualified custom-field-type identifier, if the field is custom
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<String>,
    /// Element kind for array-typed fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<SchemaType>,
    /// System field name for built-in fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}

impl FieldSchema {
    /// Whether the field holds multiple values.
    pub fn is_multi_valued(&self) -> bool {
        self.kind == SchemaType::Array
    }
}

/// One legal choice for an enumerated field.
///
/// Display text lives in `name` for most fields and in `value` for a few
/// built-ins; [`AllowedValue::label`] resolves the precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AllowedValue {
    /// Stable identifier used in queries
    pub id: String,
    /// Display name, when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Raw value, used as display text when `name` is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl AllowedValue {
    /// Display text: name, falling back to the raw value, then the id.
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.value.as_deref())
            .unwrap_or(&self.id)
    }
}

/// Descriptor for a single field on an issue type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldDescriptor {
    /// Field key; webhook-sourced payloads omit this, in which case the map
    /// key under `fields` is authoritative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Display name
    pub name: String,
    /// Whether the tracker requires this field on issue creation
    #[serde(default)]
    pub required: bool,
    /// Value schema
    pub schema: FieldSchema,
    /// Legal choices, when the field is enumerable
    #[serde(
        rename = "allowedValues",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub allowed_values: Option<Vec<AllowedValue>>,
}

/// An issue type within a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IssueType {
    /// Issue type id, unique within a project
    pub id: String,
    /// Display name
    pub name: String,
    /// Subtask types are excluded from subscription filtering
    #[serde(default)]
    pub subtask: bool,
    /// Field key to descriptor map for this issue type
    #[serde(default)]
    pub fields: BTreeMap<String, FieldDescriptor>,
}

impl IssueType {
    /// Identity tag carried through normalization.
    pub fn as_ref_tag(&self) -> IssueTypeRef {
        IssueTypeRef {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

/// Issue-type identity: id plus display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IssueTypeRef {
    /// Issue type id
    pub id: String,
    /// Display name
    pub name: String,
}

/// A project and its issue types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Project {
    /// Project key, unique within the metadata
    pub key: String,
    /// Issue types defined for this project
    #[serde(rename = "issuetypes", default)]
    pub issue_types: Vec<IssueType>,
}

/// Root of the tracker metadata payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IssueMetadata {
    /// Projects in tracker order
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl IssueMetadata {
    /// Parse a raw metadata payload.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("failed to parse issue metadata payload")
    }

    /// Look up a project by key.
    pub fn project(&self, key: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.key == key)
    }

    /// All issue types across the given projects, in traversal order.
    ///
    /// Used by the conflict detector to resolve issue-type ids to display
    /// names; subtask types are included because a name lookup must cover
    /// every id the caller might hold.
    pub fn issue_types_for(&self, project_keys: &[String]) -> Vec<&IssueType> {
        project_keys
            .iter()
            .filter_map(|key| self.project(key))
            .flat_map(|p| p.issue_types.iter())
            .collect()
    }
}
