//! Filter invariant checks and schema-drift detection.
//!
//! The conflict detector answers "does this field exist on the selected
//! issue types"; this module answers the remaining questions before a save:
//! does every configured filter still resolve in the fresh catalog, and
//! does each one use an operator its field supports.

use crate::catalog::{find_field, FilterableField};
use crate::errors::{FilterError, Result};
use crate::filters::{FilterValue, Inclusion};

/// Validate configured filters against the current catalog.
///
/// Checks, per filter: the referenced field still exists, `include_all` is
/// only used against multi-valued fields, and the `empty` inclusion carries
/// no values. The first violation is returned.
pub fn validate_filters(catalog: &[FilterableField], filters: &[FilterValue]) -> Result<()> {
    for filter in filters {
        let field = find_field(catalog, &filter.key)
            .ok_or_else(|| FilterError::UnknownField(filter.key.clone()))?;

        if filter.inclusion == Inclusion::IncludeAll && !field.is_multi_valued() {
            return Err(FilterError::InclusionNotApplicable {
                key: filter.key.clone(),
            });
        }

        if filter.inclusion == Inclusion::Empty && !filter.values.is_empty() {
            return Err(FilterError::ValuesWithEmpty {
                key: filter.key.clone(),
                count: filter.values.len(),
            });
        }
    }

    Ok(())
}

/// Keys of configured filters that no longer resolve in the catalog.
///
/// A non-empty result means the metadata drifted since the subscription was
/// configured; the caller drops the stale filters before saving and warns
/// the user that the subscription was repaired.
pub fn stale_filter_keys(catalog: &[FilterableField], filters: &[FilterValue]) -> Vec<String> {
    filters
        .iter()
        .filter(|filter| find_field(catalog, &filter.key).is_none())
        .map(|filter| filter.key.clone())
        .collect()
}
