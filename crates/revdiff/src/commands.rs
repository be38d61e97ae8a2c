use crate::cli::*;
use crate::config::Config;
use crate::render::{render_char_diff, render_line_diff, render_summary};
use anyhow::Context;
use revdiff_core::{DiffStats, Edit, LineChange};
use serde::Serialize;
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Outcome of a diff command, mapped to the process exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Same,
    Different,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Same => ExitCode::SUCCESS,
            Outcome::Different => ExitCode::from(1),
        }
    }
}

#[derive(Serialize)]
struct LineReport<'a> {
    changes: &'a [LineChange],
    stats: DiffStats,
}

#[derive(Serialize)]
struct CharReport<'a> {
    edits: &'a [Edit],
}

pub fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    let Cli {
        command,
        format,
        no_color,
        config: config_path,
        ..
    } = cli;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    // --init must work even when the existing file no longer parses
    if let Command::Config(ConfigArgs { init: true, force }) = command {
        cmd_config_init(force, config_path.as_deref(), &mut out)?;
        return Ok(ExitCode::SUCCESS);
    }

    let config = Config::load(config_path.as_deref())?
        .with_format(format)
        .without_color(no_color || !stdout.is_terminal());

    let outcome = match command {
        Command::Lines(args) => cmd_lines(args, config, &mut out)?,
        Command::Chars(args) => cmd_chars(args, config, &mut out)?,
        Command::Config(_) => {
            cmd_config_show(config_path.as_deref(), &config, &mut out)?;
            Outcome::Same
        }
    };
    Ok(outcome.into())
}

fn cmd_lines(args: LinesArgs, config: Config, out: &mut impl Write) -> anyhow::Result<Outcome> {
    let config = config
        .with_context_lines(args.context)
        .with_granularity(args.granularity.map(Into::into));
    let file_diff = config.engine().diff_files(&args.old, &args.new)?;
    tracing::debug!(
        old = %file_diff.old_path.display(),
        new = %file_diff.new_path.display(),
        entries = file_diff.changes.len(),
        "diffed files"
    );

    match config.format {
        OutputFormat::Json => {
            let report = LineReport {
                changes: &file_diff.changes,
                stats: file_diff.stats,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
        OutputFormat::Text => {
            write!(out, "{}", render_line_diff(&file_diff.changes, config.color))?;
            writeln!(out, "{}", render_summary(&file_diff.stats))?;
        }
    }

    Ok(if file_diff.has_changes() {
        Outcome::Different
    } else {
        Outcome::Same
    })
}

fn cmd_chars(args: CharsArgs, config: Config, out: &mut impl Write) -> anyhow::Result<Outcome> {
    let config = config.with_granularity(args.granularity.map(Into::into));
    let (old, new) = if args.literal {
        (args.old, args.new)
    } else {
        (read_file(Path::new(&args.old))?, read_file(Path::new(&args.new))?)
    };

    let edits = config.engine().diff_chars(&old, &new);

    match config.format {
        OutputFormat::Json => {
            let report = CharReport { edits: &edits };
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
        OutputFormat::Text => writeln!(out, "{}", render_char_diff(&edits, config.color))?,
    }

    Ok(if edits.iter().any(Edit::is_change) {
        Outcome::Different
    } else {
        Outcome::Same
    })
}

fn resolve_config_path(path: Option<&Path>) -> anyhow::Result<PathBuf> {
    match path {
        Some(path) => Ok(path.to_path_buf()),
        None => Config::config_path(),
    }
}

fn cmd_config_init(force: bool, path: Option<&Path>, out: &mut impl Write) -> anyhow::Result<()> {
    let path = resolve_config_path(path)?;
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    Config::default().save(&path)?;
    writeln!(out, "Wrote default config to {}", path.display())?;
    Ok(())
}

fn cmd_config_show(path: Option<&Path>, config: &Config, out: &mut impl Write) -> anyhow::Result<()> {
    let path = resolve_config_path(path)?;
    writeln!(out, "# {}", path.display())?;
    write!(out, "{}", toml::to_string_pretty(config)?)?;
    Ok(())
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
