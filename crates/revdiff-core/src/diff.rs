//! Diff computation engine

use crate::change::{CharacterDiff, DiffStats, LineDiff};
use crate::chars::{diff_units, Granularity};
use crate::lines::{enrich_inline_by, pair_lines, SIMILARITY_THRESHOLD};
use crate::window::window_context;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

/// Context lines kept on each side of a change unless configured otherwise
pub const DEFAULT_CONTEXT_LINES: usize = 3;

#[derive(Error, Debug)]
pub enum DiffError {
    #[error("Failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A line diff of two files
#[derive(Debug, Clone)]
pub struct FileDiff {
    pub old_path: PathBuf,
    pub new_path: PathBuf,
    pub changes: LineDiff,
    pub stats: DiffStats,
}

impl FileDiff {
    pub fn has_changes(&self) -> bool {
        self.stats.has_changes()
    }
}

/// The main diff engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffEngine {
    /// Number of context lines to include around each change
    context_lines: usize,
    /// Unit used for similarity scoring and inline spans
    granularity: Granularity,
    /// Similarity a differing line pair must exceed to count as a modification
    similarity_threshold: f64,
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self {
            context_lines: DEFAULT_CONTEXT_LINES,
            granularity: Granularity::Char,
            similarity_threshold: SIMILARITY_THRESHOLD,
        }
    }
}

impl DiffEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(mut self, lines: usize) -> Self {
        self.context_lines = lines;
        self
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Override the modification threshold. The line differ's output shape is
    /// tuned for the default, so lower values pair up unrelated lines quickly.
    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    pub fn context_lines(&self) -> usize {
        self.context_lines
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Compute a character diff between two strings
    pub fn diff_chars(&self, a: &str, b: &str) -> CharacterDiff {
        diff_units(a, b, self.granularity)
    }

    /// Compute a windowed line diff between two strings.
    ///
    /// Returns an empty diff when the texts have no differing lines.
    pub fn diff_strings(&self, old: &str, new: &str) -> LineDiff {
        let old_lines = split_lines(old);
        let new_lines = split_lines(new);
        trace!(
            old_lines = old_lines.len(),
            new_lines = new_lines.len(),
            "pairing lines"
        );

        let raw = pair_lines(
            &old_lines,
            &new_lines,
            self.granularity,
            self.similarity_threshold,
        );
        let enriched = enrich_inline_by(raw, self.granularity);

        if !enriched.iter().any(|c| c.is_change()) {
            debug!(lines = enriched.len(), "no line differences");
            return Vec::new();
        }

        let windowed = window_context(&enriched, self.context_lines);
        debug!(
            total = enriched.len(),
            kept = windowed.len(),
            context = self.context_lines,
            "computed line diff"
        );
        windowed
    }

    /// Compute a line diff between two files
    pub fn diff_files(&self, old_path: &Path, new_path: &Path) -> Result<FileDiff, DiffError> {
        let old_content = read_text(old_path)?;
        let new_content = read_text(new_path)?;

        let changes = self.diff_strings(&old_content, &new_content);
        let stats = DiffStats::from_changes(&changes);

        Ok(FileDiff {
            old_path: old_path.to_path_buf(),
            new_path: new_path.to_path_buf(),
            changes,
            stats,
        })
    }
}

/// Compute a line diff of `text1` against `text2`, keeping `context_lines`
/// unchanged lines around each change
pub fn compute_line_diff(text1: &str, text2: &str, context_lines: usize) -> LineDiff {
    DiffEngine::new()
        .with_context(context_lines)
        .diff_strings(text1, text2)
}

/// Split on `\n` without dropping a trailing empty segment. The empty text
/// has no lines at all.
fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        Vec::new()
    } else {
        text.split('\n').collect()
    }
}

fn read_text(path: &Path) -> Result<String, DiffError> {
    std::fs::read_to_string(path).map_err(|source| DiffError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}
