//! Trim a line diff down to its changes and their surrounding context

use crate::change::{LineChange, LineDiff};

/// Keep every entry within `context_lines` entries of a change.
///
/// Overlapping windows merge. Nothing marks the gap between two windows
/// that do not touch, so neighbouring entries in the result are not
/// necessarily neighbours in the input.
pub fn window_context(diff: &[LineChange], context_lines: usize) -> LineDiff {
    let Some(last) = diff.len().checked_sub(1) else {
        return Vec::new();
    };

    let mut keep = vec![false; diff.len()];
    for (idx, _) in diff.iter().enumerate().filter(|(_, c)| c.is_change()) {
        let start = idx.saturating_sub(context_lines);
        let end = idx.saturating_add(context_lines).min(last);
        keep[start..=end].iter_mut().for_each(|k| *k = true);
    }

    diff.iter()
        .zip(keep)
        .filter_map(|(change, kept)| kept.then(|| change.clone()))
        .collect()
}
