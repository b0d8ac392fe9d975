//! Filter metadata engine for issue-tracker channel subscriptions.
//!
//! Given the raw per-project metadata a tracker reports, this crate builds
//! the catalog of fields a channel subscription may filter on, validates
//! configured filters when the issue-type selection changes, and renders a
//! human-readable preview of the query the subscription will approximately
//! run.
//!
//! Every function is pure and synchronous: immutable inputs in, new values
//! out, no I/O and no shared state. The surrounding application fetches
//! metadata, drives the selection UI, and persists subscriptions; this
//! crate only computes.
//!
//! # Pipeline
//!
//! ```text
//! IssueMetadata x project selection
//!     -> normalize (flatten + dedupe fields across issue types)
//!     -> classify  (which fields are legal filters, and of what kind)
//!     -> catalog   (sorted FilterableField list with value options)
//! ```
//!
//! The caller then re-runs [`filter_conflicts`] after every issue-type or
//! filter mutation, and [`synthesize_preview`] after every filter change.
//!
//! # Example
//!
//! ```
//! use chansub::{build_catalog, IssueMetadata};
//!
//! # fn example() -> anyhow::Result<()> {
//! let metadata = IssueMetadata::from_json(r#"{"projects": []}"#)?;
//! let catalog = build_catalog(&metadata, &["KT".to_string()]);
//! assert!(catalog.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod classify;
pub mod conflict;
pub mod errors;
pub mod filters;
pub mod metadata;
pub mod normalize;
pub mod preview;
pub mod validation;

// Re-export commonly used types
pub use catalog::{build_catalog, find_field, FieldOption, FilterableField};
pub use classify::{classify_field, FieldKind};
pub use conflict::{added_issue_type_conflicts, filter_conflicts};
pub use errors::FilterError;
pub use filters::{FilterValue, Inclusion, SubscriptionFilters};
pub use metadata::{
    AllowedValue, FieldDescriptor, FieldSchema, IssueMetadata, IssueType, IssueTypeRef, Project,
    SchemaType,
};
pub use preview::{synthesize_preview, QueryPreview};
pub use validation::{stale_filter_keys, validate_filters};
