// crates/cli/src/config.rs
use crate::args::Args;
use crate::error::AppError;
use crate::options::OutputFormat;
pub use line_census_engine::config::{Config, ConfigBuilder, WalkOptions, WalkOptionsBuilder};

/// How results are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub by_file: bool,
    pub line_numbers: bool,
}

/// Everything one invocation needs: the engine run plus presentation.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub engine: Config,
    pub output: OutputConfig,
    pub debug: bool,
}

impl TryFrom<Args> for AppConfig {
    type Error = AppError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let threads = args.scan.threads.unwrap_or_else(num_cpus::get);
        let requested = args.scan.max_line_len.0;
        let max_line_len = usize::try_from(requested)
            .map_err(|_| AppError::Config(format!("--max-line-len too large: {requested}")))?;
        if max_line_len == 0 {
            return Err(AppError::Config("--max-line-len must be positive".to_string()));
        }

        let walk = walk_options_from_args(&args, threads)?;
        let map_ext: hashbrown::HashMap<String, String> = args.scan.map_ext.into_iter().collect();

        let engine = ConfigBuilder::default()
            .walk(walk)
            .threads(threads)
            .whitelist(args.scan.whitelist)
            .map_ext(map_ext)
            .max_line_len(max_line_len)
            .trace(args.behavior.debug)
            .strict(args.behavior.strict)
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        Ok(Self {
            engine,
            output: OutputConfig {
                format: args.output.format,
                by_file: args.output.by_file,
                line_numbers: args.output.line_numbers,
            },
            debug: args.behavior.debug,
        })
    }
}

fn walk_options_from_args(args: &Args, threads: usize) -> Result<WalkOptions, AppError> {
    WalkOptionsBuilder::default()
        .roots(args.paths.clone())
        .threads(threads)
        .hidden(args.walk.hidden)
        .git_ignore(!args.walk.no_gitignore)
        .max_depth(args.walk.max_depth)
        .follow_links(args.walk.follow)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(argv: &[&str]) -> AppConfig {
        AppConfig::try_from(Args::parse_from(argv)).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["line_census"]);
        assert_eq!(config.engine.walk.roots, [std::path::PathBuf::from(".")]);
        assert_eq!(config.engine.max_line_len, 1024 * 1024);
        assert!(config.engine.walk.git_ignore);
        assert_eq!(config.output.format, OutputFormat::Table);
        assert!(!config.debug);
    }

    #[test]
    fn test_flags_map_to_engine() {
        let config = parse(&[
            "line_census",
            "--format",
            "json",
            "--threads",
            "3",
            "--max-line-len",
            "64K",
            "--map-ext",
            "tpl=HTML",
            "--map-ext",
            "inc=C",
            "--no-gitignore",
            "--debug",
            "--strict",
            "src",
            "lib",
        ]);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.engine.threads, 3);
        assert_eq!(config.engine.walk.threads, 3);
        assert_eq!(config.engine.max_line_len, 64 * 1024);
        assert_eq!(config.engine.map_ext.get("tpl").map(String::as_str), Some("HTML"));
        assert_eq!(config.engine.map_ext.len(), 2);
        assert!(!config.engine.walk.git_ignore);
        assert!(config.engine.trace);
        assert!(config.engine.strict);
        assert_eq!(config.engine.walk.roots.len(), 2);
    }

    #[test]
    fn test_zero_line_len_rejected() {
        let args = Args::parse_from(["line_census", "--max-line-len", "0"]);
        assert!(matches!(AppConfig::try_from(args), Err(AppError::Config(_))));
    }
}
