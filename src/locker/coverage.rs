//! Translation coverage per locale.

use indexmap::IndexMap;
use serde::Serialize;

use super::error::LockerError;
use super::submission::Submission;
use crate::tree::{
    KeyStyle,
    ValueTree,
    join_key,
};
use crate::types::LocaleCode;

/// How many translatable leaves a locale actually supplies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coverage {
    /// Leaves a locale could override.
    pub total: usize,
    /// Leaves with a non-empty override.
    pub translated: usize,
    /// Paths of leaves that fall back to the base locale.
    pub missing: Vec<String>,
}

/// Reports, for every posted locale, which leaves it leaves to the base locale.
///
/// Follows the same walk as [`merge_leaves`](super::merge_leaves): only leaves
/// the merge could substitute are counted, subtrees that pass through are not.
/// Paths use `items[0].title` notation with `separator` between names.
///
/// # Errors
/// - [`LockerError::MissingBaseOverrides`] when overrides were posted but not
///   for the base locale.
pub fn translation_coverage(
    submission: &Submission,
    separator: &str,
) -> Result<IndexMap<LocaleCode, Coverage>, LockerError> {
    let Some(overrides) = submission.overrides() else {
        return Ok(IndexMap::new());
    };
    let base = submission.base_overrides().ok_or_else(|| LockerError::MissingBaseOverrides {
        base: submission.base_locale().clone(),
    })?;

    let report = overrides
        .iter()
        .map(|(locale, target)| {
            let mut coverage = Coverage::default();
            collect(
                submission.candidate(),
                base,
                target,
                None,
                KeyStyle::Dotted(separator),
                &mut coverage,
            );
            tracing::debug!(
                locale = %locale,
                translated = coverage.translated,
                total = coverage.total,
                "Computed translation coverage"
            );
            (locale.clone(), coverage)
        })
        .collect();

    Ok(report)
}

/// Recursive worker for [`translation_coverage`].
fn collect(
    candidate: &ValueTree,
    base: &ValueTree,
    target: &ValueTree,
    prefix: Option<&str>,
    style: KeyStyle<'_>,
    coverage: &mut Coverage,
) {
    let ValueTree::Node(children) = candidate else {
        return;
    };
    let empty = ValueTree::empty();

    for (key, value) in children {
        let path = join_key(prefix, key, style);
        match (value, base.as_node().and_then(|children| children.get(key))) {
            (ValueTree::Node(_), Some(base_child @ ValueTree::Node(_))) => {
                let target_child = match target.as_node().and_then(|children| children.get(key)) {
                    Some(child @ ValueTree::Node(_)) => child,
                    _ => &empty,
                };
                collect(value, base_child, target_child, Some(&path), style, coverage);
            }
            (ValueTree::Node(_), _) => {}
            (ValueTree::Leaf(_), _) => {
                coverage.total += 1;
                match target.as_node().and_then(|children| children.get(key)) {
                    Some(ValueTree::Leaf(leaf)) if !leaf.is_empty() => coverage.translated += 1,
                    _ => coverage.missing.push(path),
                }
            }
        }
    }
}
