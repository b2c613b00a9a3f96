// crates/cli/src/args.rs
use crate::options::OutputFormat;
use crate::parsers::{self, SizeArg};
use clap::{Args as ClapArgs, Parser, ValueHint};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "line_census",
    version,
    about = "Count code, comment and blank lines per file and per language"
)]
pub struct Args {
    #[command(flatten)]
    pub output: OutputOptions,

    #[command(flatten)]
    pub scan: ScanOptions,

    #[command(flatten)]
    pub walk: WalkArgs,

    #[command(flatten)]
    pub behavior: BehaviorOptions,

    /// Files or directories to scan
    #[arg(value_hint = ValueHint::AnyPath, default_value = ".", help_heading = "Input")]
    pub paths: Vec<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct OutputOptions {
    /// Output format
    #[arg(long, value_enum, default_value = "table", help_heading = "Output")]
    pub format: OutputFormat,

    /// Add one row per file to the table output
    #[arg(long, help_heading = "Output")]
    pub by_file: bool,

    /// Include per-category line numbers in JSON output
    #[arg(long, help_heading = "Output")]
    pub line_numbers: bool,
}

#[derive(ClapArgs, Debug)]
pub struct ScanOptions {
    /// Only scan files listed (one path per line) in this file
    #[arg(long, value_hint = ValueHint::FilePath, help_heading = "Scan")]
    pub whitelist: Option<PathBuf>,

    /// Route an extension to a language, e.g. `tpl=HTML` (repeatable)
    #[arg(long, value_parser = parsers::parse_key_val, help_heading = "Scan")]
    pub map_ext: Vec<(String, String)>,

    /// Longest accepted line (e.g. 512K, 4M)
    #[arg(long, default_value = "1M", help_heading = "Scan")]
    pub max_line_len: SizeArg,

    /// Worker threads (default: one per CPU)
    #[arg(long, value_parser = parsers::parse_positive_usize, help_heading = "Scan")]
    pub threads: Option<usize>,
}

#[derive(ClapArgs, Debug)]
pub struct WalkArgs {
    /// Include hidden files and directories
    #[arg(long, help_heading = "Walk")]
    pub hidden: bool,

    /// Do not honour .gitignore and .ignore files
    #[arg(long, help_heading = "Walk")]
    pub no_gitignore: bool,

    /// Maximum directory depth
    #[arg(long, help_heading = "Walk")]
    pub max_depth: Option<usize>,

    /// Follow symbolic links
    #[arg(long, help_heading = "Walk")]
    pub follow: bool,
}

#[derive(ClapArgs, Debug)]
pub struct BehaviorOptions {
    /// Print the per-line classification trace to stderr
    #[arg(long, help_heading = "Behavior")]
    pub debug: bool,

    /// Exit non-zero when a file could only be partly classified or the walk failed
    #[arg(long, help_heading = "Behavior")]
    pub strict: bool,
}
