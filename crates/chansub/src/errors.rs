//! Error types for filter validation.
//!
//! Nothing in the engine is fatal: malformed metadata degrades to an empty
//! catalog and conflicts are advisory strings. The errors here cover the
//! remaining case, a configured filter that violates its field's contract.

use thiserror::Error;

/// All possible errors raised while validating configured filters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("unknown filter field: '{0}'\n  hint: the field no longer exists in the project metadata; remove the stale filter before saving")]
    UnknownField(String),

    #[error("invalid inclusion for '{key}': include_all requires a multi-valued field")]
    InclusionNotApplicable { key: String },

    #[error("filter '{key}' requires the field to be empty but carries {count} value(s)")]
    ValuesWithEmpty { key: String, count: usize },
}

/// A specialized Result type for filter validation.
pub type Result<T> = std::result::Result<T, FilterError>;
