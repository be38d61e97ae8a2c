//! Character-level diffing by common prefix and suffix trimming
//!
//! The differ does not align the middle of the two strings: everything
//! between the shared prefix and the shared suffix becomes one `Delete`
//! and one `Insert`, even when the middles share substrings. Line
//! similarity in [`crate::lines`] is calibrated against this output shape.

use crate::change::{CharacterDiff, Edit};
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// The unit strings are compared in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Unicode scalar values
    #[default]
    Char,
    /// Extended grapheme clusters
    Grapheme,
}

/// Split `s` into comparison units. Every unit is a non-empty slice of `s`
/// and the units concatenate back to `s`.
pub(crate) fn units(s: &str, granularity: Granularity) -> Vec<&str> {
    match granularity {
        Granularity::Char => s
            .char_indices()
            .map(|(i, c)| &s[i..i + c.len_utf8()])
            .collect(),
        Granularity::Grapheme => s.graphemes(true).collect(),
    }
}

/// Compute a character diff between `a` and `b`, comparing by `char`
pub fn diff_chars(a: &str, b: &str) -> CharacterDiff {
    diff_units(a, b, Granularity::Char)
}

/// Compute a character diff between `a` and `b` at the given granularity
pub fn diff_units(a: &str, b: &str, granularity: Granularity) -> CharacterDiff {
    if a == b {
        return equal_or_empty(a);
    }

    let units_a = units(a, granularity);
    let units_b = units(b, granularity);
    let shorter = units_a.len().min(units_b.len());

    let prefix = units_a
        .iter()
        .zip(&units_b)
        .take_while(|(x, y)| x == y)
        .count();

    if prefix == units_a.len() && prefix == units_b.len() {
        return equal_or_empty(a);
    }

    let suffix = units_a
        .iter()
        .rev()
        .zip(units_b.iter().rev())
        .take(shorter - prefix)
        .take_while(|(x, y)| x == y)
        .count();

    // Matching units have equal byte lengths, so the offsets agree on both sides
    let prefix_bytes: usize = units_a[..prefix].iter().map(|u| u.len()).sum();
    let suffix_bytes: usize = units_a[units_a.len() - suffix..]
        .iter()
        .map(|u| u.len())
        .sum();

    let removed = &a[prefix_bytes..a.len() - suffix_bytes];
    let inserted = &b[prefix_bytes..b.len() - suffix_bytes];

    let mut edits = Vec::with_capacity(4);
    if prefix_bytes > 0 {
        edits.push(Edit::equal(&a[..prefix_bytes]));
    }
    if !removed.is_empty() {
        edits.push(Edit::delete(removed));
    }
    if !inserted.is_empty() {
        edits.push(Edit::insert(inserted));
    }
    if suffix_bytes > 0 {
        edits.push(Edit::equal(&a[a.len() - suffix_bytes..]));
    }
    edits
}

fn equal_or_empty(s: &str) -> CharacterDiff {
    if s.is_empty() {
        Vec::new()
    } else {
        vec![Edit::equal(s)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::{source_text, target_text, Operation};
    use proptest::prelude::*;

    fn ops(edits: &[Edit]) -> Vec<(Operation, &str)> {
        edits.iter().map(|e| (e.op, e.text.as_str())).collect()
    }

    #[test]
    fn test_identity() {
        assert_eq!(diff_chars("hello", "hello"), vec![Edit::equal("hello")]);
        assert!(diff_chars("", "").is_empty());
    }

    #[test]
    fn test_prefix_and_suffix() {
        let edits = diff_chars("line2", "lineTwo");
        assert_eq!(
            ops(&edits),
            vec![
                (Operation::Equal, "line"),
                (Operation::Delete, "2"),
                (Operation::Insert, "Two"),
            ]
        );

        let edits = diff_chars("the cat sat", "the dog sat");
        assert_eq!(
            ops(&edits),
            vec![
                (Operation::Equal, "the "),
                (Operation::Delete, "cat"),
                (Operation::Insert, "dog"),
                (Operation::Equal, " sat"),
            ]
        );
    }

    #[test]
    fn test_middle_is_not_aligned() {
        // "bcd" is shared inside the middle but still lands in Delete/Insert
        let edits = diff_chars("XbcdY", "ZbcdW");
        assert_eq!(
            ops(&edits),
            vec![(Operation::Delete, "XbcdY"), (Operation::Insert, "ZbcdW")]
        );
    }

    #[test]
    fn test_empty_sides() {
        assert_eq!(diff_chars("", "abc"), vec![Edit::insert("abc")]);
        assert_eq!(diff_chars("abc", ""), vec![Edit::delete("abc")]);
    }

    #[test]
    fn test_substring() {
        assert_eq!(
            diff_chars("abc", "abcdef"),
            vec![Edit::equal("abc"), Edit::insert("def")]
        );
        assert_eq!(
            diff_chars("abcdef", "def"),
            vec![Edit::delete("abc"), Edit::equal("def")]
        );
    }

    #[test]
    fn test_suffix_bounded_by_prefix() {
        // Without the bound the suffix would reuse the prefix "a"
        assert_eq!(
            diff_chars("a", "aa"),
            vec![Edit::equal("a"), Edit::insert("a")]
        );
        assert_eq!(
            diff_chars("abab", "ab"),
            vec![Edit::equal("ab"), Edit::delete("ab")]
        );
    }

    #[test]
    fn test_multibyte_chars_are_not_split() {
        let edits = diff_chars("naïve café", "naïve cafés");
        assert_eq!(edits, vec![Edit::equal("naïve café"), Edit::insert("s")]);

        // Same leading byte, different scalar values
        let edits = diff_chars("é", "è");
        assert_eq!(edits, vec![Edit::delete("é"), Edit::insert("è")]);
    }

    #[test]
    fn test_grapheme_granularity_keeps_clusters() {
        // "e" + combining acute accent vs "e" + combining grave accent
        let a = "cafe\u{301}";
        let b = "cafe\u{300}";

        let by_char = diff_units(a, b, Granularity::Char);
        assert_eq!(by_char[0], Edit::equal("cafe"));

        let by_grapheme = diff_units(a, b, Granularity::Grapheme);
        assert_eq!(
            by_grapheme,
            vec![
                Edit::equal("caf"),
                Edit::delete("e\u{301}"),
                Edit::insert("e\u{300}"),
            ]
        );
    }

    #[test]
    fn test_grapheme_emoji_sequence() {
        let a = "hi 👩‍💻!";
        let b = "hi 👩‍🔬!";
        let edits = diff_units(a, b, Granularity::Grapheme);
        assert_eq!(
            edits,
            vec![
                Edit::equal("hi "),
                Edit::delete("👩‍💻"),
                Edit::insert("👩‍🔬"),
                Edit::equal("!"),
            ]
        );
    }

    proptest! {
        #[test]
        fn prop_reconstructs_both_sides(a in "\\PC{0,24}", b in "\\PC{0,24}") {
            for granularity in [Granularity::Char, Granularity::Grapheme] {
                let edits = diff_units(&a, &b, granularity);
                prop_assert_eq!(source_text(&edits), a.clone());
                prop_assert_eq!(target_text(&edits), b.clone());
                prop_assert!(edits.iter().all(|e| !e.text.is_empty()));
                prop_assert!(edits.len() <= 4);
            }
        }

        #[test]
        fn prop_identity(s in "\\PC{1,24}") {
            prop_assert_eq!(diff_chars(&s, &s), vec![Edit::equal(s.clone())]);
        }
    }
}
