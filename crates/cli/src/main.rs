use clap::Parser;
use line_census_cli::args::Args;
use line_census_cli::config::AppConfig;
use line_census_cli::presentation;
use line_census_core::TRACE_TARGET;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_logging(debug: bool) {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if debug && let Ok(directive) = format!("{TRACE_TARGET}=debug").parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = match AppConfig::try_from(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration Error: {e}");
            return ExitCode::from(2);
        }
    };
    init_logging(config.debug);

    let result = match line_census_engine::run(&config.engine) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Application Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    for (path, err) in &result.incomplete {
        eprintln!("Incomplete {}: {err}", path.display());
    }
    for err in &result.errors {
        eprintln!("Error: {err}");
    }

    if let Err(e) = presentation::print_results(&result, &config.output) {
        eprintln!("Output Error: {e}");
        return ExitCode::FAILURE;
    }

    if config.engine.strict && !result.is_clean() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
