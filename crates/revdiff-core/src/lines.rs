//! Line pairing and inline enrichment

use crate::change::{InlineSpan, LineChange, LineDiff};
use crate::chars::{diff_units, units, Granularity};

/// Pairs of differing lines scoring strictly above this are treated as edits
/// of one another rather than an unrelated removal and addition
pub const SIMILARITY_THRESHOLD: f64 = 0.3;

/// Fraction of positions at which two lines hold the same character.
///
/// Positions are compared at the same index only, so a single inserted
/// character near the start of a line drops the score sharply.
pub fn line_similarity(x: &str, y: &str) -> f64 {
    line_similarity_by(x, y, Granularity::Char)
}

/// [`line_similarity`] comparing in the given unit
pub fn line_similarity_by(x: &str, y: &str, granularity: Granularity) -> f64 {
    match (x.is_empty(), y.is_empty()) {
        (true, true) => return 1.0,
        (true, false) | (false, true) => return 0.0,
        (false, false) => {}
    }

    let units_x = units(x, granularity);
    let units_y = units(y, granularity);
    let matching = units_x
        .iter()
        .zip(&units_y)
        .filter(|(a, b)| a == b)
        .count();

    matching as f64 / units_x.len().max(units_y.len()) as f64
}

/// Walk two line lists in lockstep and classify each pairing step
pub fn diff_lines(lines_a: &[&str], lines_b: &[&str]) -> LineDiff {
    pair_lines(lines_a, lines_b, Granularity::Char, SIMILARITY_THRESHOLD)
}

pub(crate) fn pair_lines(
    lines_a: &[&str],
    lines_b: &[&str],
    granularity: Granularity,
    threshold: f64,
) -> LineDiff {
    let mut changes = Vec::with_capacity(lines_a.len().max(lines_b.len()));
    let (mut i, mut j) = (0, 0);
    let mut line_number = 1;

    while i < lines_a.len() || j < lines_b.len() {
        match (lines_a.get(i).copied(), lines_b.get(j).copied()) {
            (Some(a), Some(b)) if a == b => {
                changes.push(LineChange::context(line_number, a));
                i += 1;
                j += 1;
            }
            (Some(a), Some(b)) => {
                if line_similarity_by(a, b, granularity) > threshold {
                    changes.push(LineChange::modify(line_number, b, a));
                } else {
                    changes.push(LineChange::remove(line_number, a));
                    changes.push(LineChange::add(line_number, b));
                }
                i += 1;
                j += 1;
            }
            (Some(a), None) => {
                changes.push(LineChange::remove(line_number, a));
                i += 1;
            }
            (None, Some(b)) => {
                changes.push(LineChange::add(line_number, b));
                j += 1;
            }
            (None, None) => break,
        }
        line_number += 1;
    }

    changes
}

/// Attach character-level spans to every `Modify` entry
pub fn enrich_inline(diff: LineDiff) -> LineDiff {
    enrich_inline_by(diff, Granularity::Char)
}

pub(crate) fn enrich_inline_by(diff: LineDiff, granularity: Granularity) -> LineDiff {
    diff.into_iter()
        .map(|change| match change {
            LineChange::Modify {
                line_number,
                content,
                old_content,
                ..
            } => {
                let inline_changes = diff_units(&old_content, &content, granularity)
                    .into_iter()
                    .map(InlineSpan::from)
                    .collect();
                LineChange::Modify {
                    line_number,
                    content,
                    old_content,
                    inline_changes,
                }
            }
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::InlineKind;

    #[test]
    fn test_similarity_edges() {
        assert_eq!(line_similarity("", ""), 1.0);
        assert_eq!(line_similarity("", "a"), 0.0);
        assert_eq!(line_similarity("a", ""), 0.0);
        assert_eq!(line_similarity("same", "same"), 1.0);
    }

    #[test]
    fn test_similarity_is_position_anchored() {
        assert_eq!(line_similarity("abcdefghij", "abcdeXXXXX"), 0.5);
        assert_eq!(line_similarity("abcdefghij", "abXXXXXXXX"), 0.2);
        // One leading insertion shifts every position
        assert_eq!(line_similarity("abcd", "xabcd"), 0.0);
        // Divided by the longer line
        assert_eq!(line_similarity("ab", "abcd"), 0.5);
    }

    #[test]
    fn test_similar_lines_are_modified() {
        let diff = diff_lines(&["abcdefghij"], &["abcdeXXXXX"]);
        assert_eq!(diff, vec![LineChange::modify(1, "abcdeXXXXX", "abcdefghij")]);
    }

    #[test]
    fn test_dissimilar_lines_are_removed_then_added() {
        let diff = diff_lines(&["abcdefghij"], &["XXXcdXXXXX"]);
        assert_eq!(
            diff,
            vec![
                LineChange::remove(1, "abcdefghij"),
                LineChange::add(1, "XXXcdXXXXX"),
            ]
        );

        let diff = diff_lines(&["abcdefghij"], &["abXXXXXXXX"]);
        assert!(matches!(diff[0], LineChange::Remove { .. }));
        assert!(matches!(diff[1], LineChange::Add { .. }));
    }

    #[test]
    fn test_uneven_lengths() {
        let diff = diff_lines(&["a", "b", "c"], &["a"]);
        assert_eq!(
            diff,
            vec![
                LineChange::context(1, "a"),
                LineChange::remove(2, "b"),
                LineChange::remove(3, "c"),
            ]
        );

        let diff = diff_lines(&[], &["x", "y"]);
        assert_eq!(diff, vec![LineChange::add(1, "x"), LineChange::add(2, "y")]);
    }

    #[test]
    fn test_line_numbers_count_steps() {
        // The Remove+Add step shares one number, so later entries are
        // numbered by step rather than by position in either input
        let diff = diff_lines(&["one", "zzzz", "three"], &["one", "qqqq", "three", "four"]);
        let numbers: Vec<_> = diff.iter().map(|c| c.line_number()).collect();
        assert_eq!(numbers, vec![1, 2, 2, 3, 4]);
    }

    #[test]
    fn test_empty_lines_pair_as_context() {
        let diff = diff_lines(&["", "a"], &["", "b"]);
        assert_eq!(diff[0], LineChange::context(1, ""));
    }

    #[test]
    fn test_enrich_inline() {
        let raw = vec![
            LineChange::context(1, "line1"),
            LineChange::modify(2, "lineTwo", "line2"),
            LineChange::add(3, "line3"),
        ];

        let enriched = enrich_inline(raw.clone());
        assert_eq!(enriched[0], raw[0]);
        assert_eq!(enriched[2], raw[2]);

        match &enriched[1] {
            LineChange::Modify {
                line_number,
                content,
                old_content,
                inline_changes,
            } => {
                assert_eq!(*line_number, 2);
                assert_eq!(content, "lineTwo");
                assert_eq!(old_content, "line2");
                let kinds: Vec<_> = inline_changes
                    .iter()
                    .map(|s| (s.kind, s.text.as_str()))
                    .collect();
                assert_eq!(
                    kinds,
                    vec![
                        (InlineKind::Unchanged, "line"),
                        (InlineKind::Removed, "2"),
                        (InlineKind::Added, "Two"),
                    ]
                );
            }
            other => panic!("expected a modified line, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_threshold() {
        let diff = pair_lines(&["abcdefghij"], &["abXXXXXXXX"], Granularity::Char, 0.1);
        assert!(matches!(diff[0], LineChange::Modify { .. }));
    }
}
