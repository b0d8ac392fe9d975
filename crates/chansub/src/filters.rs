//! Subscription-side model: chosen events, projects, issue types, and
//! per-field filter values.
//!
//! These structures are created and edited by the caller in response to user
//! actions; the engine only inspects and validates them.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Operator applied to a filter's chosen values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Inclusion {
    /// Match issues carrying any of the chosen values
    IncludeAny,
    /// Match issues carrying every chosen value (multi-valued fields only)
    IncludeAll,
    /// Match issues carrying none of the chosen values
    ExcludeAny,
    /// Match issues where the field is unset
    Empty,
}

/// One configured filter: a field key, an operator, and chosen values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FilterValue {
    /// References a `FilterableField::key` in the current catalog
    pub key: String,
    /// Operator applied to `values`
    pub inclusion: Inclusion,
    /// Chosen values; empty for free-text fields awaiting input and for
    /// the `Empty` inclusion
    #[serde(default)]
    pub values: Vec<String>,
}

/// Everything the user has selected for one channel subscription.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SubscriptionFilters {
    /// Tracker event names the channel subscribes to
    #[serde(default)]
    pub events: Vec<String>,
    /// Selected project keys; the engine treats this as single-valued
    #[serde(default)]
    pub projects: Vec<String>,
    /// Selected issue-type ids
    #[serde(default)]
    pub issue_types: Vec<String>,
    /// Configured field filters, in user order
    #[serde(default)]
    pub fields: Vec<FilterValue>,
}
