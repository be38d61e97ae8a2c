//! Text rendering of diffs for the terminal

use crossterm::style::{style, Color, Stylize};
use revdiff_core::{DiffStats, Edit, InlineKind, InlineSpan, LineChange, Operation};

/// Which side of a modified line a row shows
#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    Old,
    New,
}

pub fn render_line_diff(changes: &[LineChange], color: bool) -> String {
    let width = changes
        .iter()
        .map(|c| c.line_number().to_string().len())
        .max()
        .unwrap_or(1);
    let tint = |c: Color| color.then_some(c);
    let mut out = String::new();

    for change in changes {
        match change {
            LineChange::Context {
                line_number,
                content,
            } => push_row(&mut out, "  ", *line_number, width, content, None),
            LineChange::Remove {
                line_number,
                content,
            } => push_row(&mut out, "- ", *line_number, width, content, tint(Color::Red)),
            LineChange::Add {
                line_number,
                content,
            } => push_row(&mut out, "+ ", *line_number, width, content, tint(Color::Green)),
            LineChange::Modify {
                line_number,
                inline_changes,
                ..
            } => {
                let old = render_inline(inline_changes, Side::Old, color);
                let new = render_inline(inline_changes, Side::New, color);
                push_row(&mut out, "~-", *line_number, width, &old, tint(Color::Yellow));
                push_row(&mut out, "~+", *line_number, width, &new, tint(Color::Yellow));
            }
        }
    }

    out
}

pub fn render_char_diff(edits: &[Edit], color: bool) -> String {
    edits
        .iter()
        .map(|edit| match edit.op {
            Operation::Equal => edit.text.clone(),
            Operation::Delete => removed(&edit.text, color),
            Operation::Insert => added(&edit.text, color),
        })
        .collect()
}

pub fn render_summary(stats: &DiffStats) -> String {
    if !stats.has_changes() {
        return "No differences.".to_string();
    }
    format!(
        "{} modified, {} added, {} removed",
        stats.modified, stats.added, stats.removed
    )
}

fn render_inline(spans: &[InlineSpan], side: Side, color: bool) -> String {
    spans
        .iter()
        .filter_map(|span| match (span.kind, side) {
            (InlineKind::Unchanged, _) => Some(span.text.clone()),
            (InlineKind::Removed, Side::Old) => Some(removed(&span.text, color)),
            (InlineKind::Added, Side::New) => Some(added(&span.text, color)),
            _ => None,
        })
        .collect()
}

fn removed(text: &str, color: bool) -> String {
    if color {
        style(text).red().underlined().to_string()
    } else {
        format!("[-{}-]", text)
    }
}

fn added(text: &str, color: bool) -> String {
    if color {
        style(text).green().underlined().to_string()
    } else {
        format!("{{+{}+}}", text)
    }
}

/// Append one row. A tint colors the whole row; modified rows carry
/// their own inline styling and only get a colored marker.
fn push_row(
    out: &mut String,
    marker: &str,
    line_number: usize,
    width: usize,
    text: &str,
    tint: Option<Color>,
) {
    let row = format!("{} {:>width$} {}", marker, line_number, text, width = width);
    match tint {
        Some(color) if marker.starts_with('~') => {
            let rest = &row[marker.len()..];
            out.push_str(&format!("{}{}", style(marker).with(color).bold(), rest));
        }
        Some(color) => out.push_str(&style(row).with(color).to_string()),
        None => out.push_str(&row),
    }
    out.push('\n');
}
