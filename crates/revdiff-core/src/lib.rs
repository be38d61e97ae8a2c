//! Revdiff Core - Fast heuristic text diffing
//!
//! This library computes character-level edits between two strings and
//! line-level diffs between two documents. Modified lines carry inline
//! character spans, and line diffs are trimmed to a context window around
//! each change.

pub mod change;
pub mod chars;
pub mod diff;
pub mod lines;
pub mod window;

pub use change::{
    source_text, target_text, CharacterDiff, DiffStats, Edit, InlineKind, InlineSpan,
    LineChange, LineDiff, Operation,
};
pub use chars::{diff_chars, diff_units, Granularity};
pub use diff::{compute_line_diff, DiffEngine, DiffError, FileDiff, DEFAULT_CONTEXT_LINES};
pub use lines::{
    diff_lines, enrich_inline, line_similarity, line_similarity_by, SIMILARITY_THRESHOLD,
};
pub use window::window_context;
