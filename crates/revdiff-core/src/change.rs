//! Change representation for character and line diffs

use serde::{Deserialize, Serialize};

/// The operation an [`Edit`] performs on the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Text present only in the source
    Delete,
    /// Text shared by source and target
    Equal,
    /// Text present only in the target
    Insert,
}

/// A span of text tagged with the operation that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    pub op: Operation,
    pub text: String,
}

impl Edit {
    pub fn new(op: Operation, text: impl Into<String>) -> Self {
        Self {
            op,
            text: text.into(),
        }
    }

    pub fn delete(text: impl Into<String>) -> Self {
        Self::new(Operation::Delete, text)
    }

    pub fn equal(text: impl Into<String>) -> Self {
        Self::new(Operation::Equal, text)
    }

    pub fn insert(text: impl Into<String>) -> Self {
        Self::new(Operation::Insert, text)
    }

    /// Check if this is an actual change (not shared text)
    pub fn is_change(&self) -> bool {
        self.op != Operation::Equal
    }
}

/// An ordered list of edits turning one string into another
pub type CharacterDiff = Vec<Edit>;

/// Rebuild the source string from a character diff
pub fn source_text(edits: &[Edit]) -> String {
    edits
        .iter()
        .filter(|e| e.op != Operation::Insert)
        .map(|e| e.text.as_str())
        .collect()
}

/// Rebuild the target string from a character diff
pub fn target_text(edits: &[Edit]) -> String {
    edits
        .iter()
        .filter(|e| e.op != Operation::Delete)
        .map(|e| e.text.as_str())
        .collect()
}

/// The kind of a sub-line span inside a modified line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InlineKind {
    Added,
    Removed,
    Unchanged,
}

impl From<Operation> for InlineKind {
    fn from(op: Operation) -> Self {
        match op {
            Operation::Delete => InlineKind::Removed,
            Operation::Insert => InlineKind::Added,
            Operation::Equal => InlineKind::Unchanged,
        }
    }
}

/// Character-level detail attached to a modified line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineSpan {
    pub kind: InlineKind,
    pub text: String,
}

impl From<Edit> for InlineSpan {
    fn from(edit: Edit) -> Self {
        Self {
            kind: edit.op.into(),
            text: edit.text,
        }
    }
}

/// The classification of a single line pairing step.
///
/// `line_number` is a step index: it advances once per pairing step of the
/// line walk, so after an insertion or deletion it no longer matches the
/// position of the line in either input. A `Remove` immediately followed by
/// an `Add` with the same number came from one step that consumed a line on
/// each side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LineChange {
    /// Identical in both texts
    Context { line_number: usize, content: String },
    /// An edited line: `content` is the new text, `old_content` the old one
    Modify {
        line_number: usize,
        content: String,
        old_content: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        inline_changes: Vec<InlineSpan>,
    },
    /// Present only in the source
    Remove { line_number: usize, content: String },
    /// Present only in the target
    Add { line_number: usize, content: String },
}

impl LineChange {
    pub fn context(line_number: usize, content: impl Into<String>) -> Self {
        Self::Context {
            line_number,
            content: content.into(),
        }
    }

    pub fn modify(
        line_number: usize,
        content: impl Into<String>,
        old_content: impl Into<String>,
    ) -> Self {
        Self::Modify {
            line_number,
            content: content.into(),
            old_content: old_content.into(),
            inline_changes: Vec::new(),
        }
    }

    pub fn remove(line_number: usize, content: impl Into<String>) -> Self {
        Self::Remove {
            line_number,
            content: content.into(),
        }
    }

    pub fn add(line_number: usize, content: impl Into<String>) -> Self {
        Self::Add {
            line_number,
            content: content.into(),
        }
    }

    pub fn line_number(&self) -> usize {
        match self {
            Self::Context { line_number, .. }
            | Self::Modify { line_number, .. }
            | Self::Remove { line_number, .. }
            | Self::Add { line_number, .. } => *line_number,
        }
    }

    /// The line text; for `Modify` this is the new text
    pub fn content(&self) -> &str {
        match self {
            Self::Context { content, .. }
            | Self::Modify { content, .. }
            | Self::Remove { content, .. }
            | Self::Add { content, .. } => content,
        }
    }

    /// Inline spans of a modified line, empty for every other variant
    pub fn inline_changes(&self) -> &[InlineSpan] {
        match self {
            Self::Modify { inline_changes, .. } => inline_changes,
            _ => &[],
        }
    }

    /// Check if this is an actual change (not just context)
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Context { .. })
    }
}

/// An ordered list of line classifications
pub type LineDiff = Vec<LineChange>;

/// Per-kind entry counts over a [`LineDiff`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub unchanged: usize,
    pub modified: usize,
    pub added: usize,
    pub removed: usize,
}

impl DiffStats {
    pub fn from_changes(changes: &[LineChange]) -> Self {
        changes.iter().fold(Self::default(), |mut stats, change| {
            match change {
                LineChange::Context { .. } => stats.unchanged += 1,
                LineChange::Modify { .. } => stats.modified += 1,
                LineChange::Add { .. } => stats.added += 1,
                LineChange::Remove { .. } => stats.removed += 1,
            }
            stats
        })
    }

    pub fn has_changes(&self) -> bool {
        self.modified + self.added + self.removed > 0
    }

    pub fn total(&self) -> usize {
        self.unchanged + self.modified + self.added + self.removed
    }
}
