//! Metadata normalization: flattening the project / issue-type / field tree
//! into a deduplicated set of field groups.
//!
//! Each field key is reduced to one representative descriptor plus the set of
//! issue types that legally carry it. Grouping order follows first-seen order
//! across the traversal: projects in input order, issue types in metadata
//! order, fields in map iteration order.

use crate::metadata::{FieldDescriptor, IssueMetadata, IssueTypeRef};
use tracing::trace;

/// One raw `(issue type, field)` pair emitted by the traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOccurrence {
    /// Effective field key: the descriptor's own key, else the map key
    pub key: String,
    /// Descriptor as this issue type reported it
    pub descriptor: FieldDescriptor,
    /// Issue type that carries the field
    pub issue_type: IssueTypeRef,
}

/// A field key with its representative descriptor and carrying issue types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedField {
    /// Effective field key, unique across the group list
    pub key: String,
    /// First-seen descriptor, kept as representative
    pub descriptor: FieldDescriptor,
    /// Every issue type in which this key appeared, first-seen order
    pub valid_issue_types: Vec<IssueTypeRef>,
}

/// Flatten the metadata tree into field occurrences.
///
/// Only the listed projects are considered, in list order; subtask issue
/// types are skipped. Missing project keys and empty metadata produce an
/// empty vector, which callers must treat as a valid empty state.
pub fn collect_occurrences(
    metadata: &IssueMetadata,
    project_keys: &[String],
) -> Vec<FieldOccurrence> {
    let mut occurrences = Vec::new();

    for key in project_keys {
        let project = match metadata.project(key) {
            Some(p) => p,
            None => continue,
        };
        for issue_type in project.issue_types.iter().filter(|t| !t.subtask) {
            let tag = issue_type.as_ref_tag();
            for (map_key, descriptor) in &issue_type.fields {
                let effective_key = descriptor.key.clone().unwrap_or_else(|| map_key.clone());
                occurrences.push(FieldOccurrence {
                    key: effective_key,
                    descriptor: descriptor.clone(),
                    issue_type: tag.clone(),
                });
            }
        }
    }

    trace!(
        occurrences = occurrences.len(),
        projects = project_keys.len(),
        "collected field occurrences"
    );
    occurrences
}

/// Group occurrences by field key, first-seen order.
///
/// The first occurrence's descriptor becomes the representative; every
/// occurrence's issue-type tag is accumulated into `valid_issue_types`,
/// deduplicated by id.
pub fn group_by_key(occurrences: Vec<FieldOccurrence>) -> Vec<GroupedField> {
    let mut groups: Vec<GroupedField> = Vec::new();

    for occurrence in occurrences {
        match groups.iter_mut().find(|g| g.key == occurrence.key) {
            Some(group) => {
                if !group
                    .valid_issue_types
                    .iter()
                    .any(|t| t.id == occurrence.issue_type.id)
                {
                    group.valid_issue_types.push(occurrence.issue_type);
                }
            }
            None => groups.push(GroupedField {
                key: occurrence.key,
                descriptor: occurrence.descriptor,
                valid_issue_types: vec![occurrence.issue_type],
            }),
        }
    }

    groups
}
