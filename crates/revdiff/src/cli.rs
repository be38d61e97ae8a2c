use clap::{Args, Parser, Subcommand, ValueEnum};
use revdiff_core::Granularity;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "revdiff",
    about = "Compare two text revisions line by line or character by character",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log diff internals to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (overrides the config file)
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Read settings from this file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum GranularityArg {
    Char,
    Grapheme,
}

impl From<GranularityArg> for Granularity {
    fn from(arg: GranularityArg) -> Self {
        match arg {
            GranularityArg::Char => Granularity::Char,
            GranularityArg::Grapheme => Granularity::Grapheme,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Line diff of two files, trimmed to context around each change
    Lines(LinesArgs),
    /// Character diff of two files or two literal strings
    Chars(CharsArgs),
    /// Show or initialize the config file
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct LinesArgs {
    pub old: PathBuf,
    pub new: PathBuf,
    /// Unchanged lines to keep on each side of a change
    #[arg(short = 'U', long)]
    pub context: Option<usize>,
    /// Unit for similarity scoring and inline spans
    #[arg(long)]
    pub granularity: Option<GranularityArg>,
}

#[derive(Args, Debug)]
pub struct CharsArgs {
    pub old: String,
    pub new: String,
    /// Treat OLD and NEW as the texts themselves rather than file paths
    #[arg(long)]
    pub literal: bool,
    #[arg(long)]
    pub granularity: Option<GranularityArg>,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Write the default settings to the config path
    #[arg(long)]
    pub init: bool,
    /// Overwrite an existing config file with --init
    #[arg(long, requires = "init")]
    pub force: bool,
}
