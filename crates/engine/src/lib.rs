// crates/engine/src/lib.rs
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::atomic::Ordering;

pub mod buffer_pool;
pub mod config;
pub mod error;
pub mod filesystem;
pub mod languages;
pub mod processor;
pub mod stats;
pub mod whitelist;

use crate::buffer_pool::BufferPool;
use crate::config::Config;
use crate::error::Result;
use crate::languages::LanguageRegistry;
use crate::stats::RunResult;
use crate::whitelist::Whitelist;
use line_census_core::FileScan;

enum Outcome {
    Scanned(PathBuf, FileScan),
    Skipped(PathBuf),
    Cancelled,
}

/// Built-in languages plus the configured extension routes.
///
/// # Errors
///
/// Fails if a `map_ext` entry names an unknown language.
pub fn build_registry(config: &Config) -> Result<LanguageRegistry> {
    let mut registry = LanguageRegistry::builtin()?;
    for (ext, language) in &config.map_ext {
        registry.map_extension(ext, language)?;
    }
    Ok(registry)
}

/// Walk the configured roots and classify every recognised file.
///
/// Files are scanned in parallel; the collected results are sorted into
/// report order only after every scan has finished.
///
/// # Errors
///
/// Returns an error for setup failures (unreadable whitelist, bad
/// extension mapping, thread pool) and, in strict mode, for walk errors.
pub fn run(config: &Config) -> Result<RunResult> {
    let registry = build_registry(config)?;
    let whitelist = config
        .whitelist
        .as_deref()
        .map(Whitelist::load)
        .transpose()?;

    let threads = config.worker_threads();
    let pool = BufferPool::new(threads, config.buffer_capacity);
    let workers = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()?;

    let (tx, rx) = crossbeam_channel::bounded(1024);

    let walk_cfg = config.walk.clone();
    let walker = std::thread::spawn(move || crate::filesystem::walk_parallel(&walk_cfg, &tx));

    let outcomes: Vec<Outcome> = workers.install(|| {
        rx.into_iter()
            .par_bridge()
            .filter(|path| whitelist.as_ref().is_none_or(|list| list.allows(path)))
            .map(|path| {
                if config
                    .cancel
                    .as_ref()
                    .is_some_and(|flag| flag.load(Ordering::Relaxed))
                {
                    return Outcome::Cancelled;
                }
                match registry.resolve(&path) {
                    Some(language) => {
                        let scan = processor::process_file(&path, language, &pool, config);
                        Outcome::Scanned(path, scan)
                    }
                    None => Outcome::Skipped(path),
                }
            })
            .collect()
    });

    let walk_errors = walker.join().unwrap_or_else(|_| {
        log::error!("directory walker panicked");
        Vec::new()
    });

    let mut result = RunResult::default();
    for outcome in outcomes {
        match outcome {
            Outcome::Scanned(path, scan) => {
                if let Some(err) = scan.incomplete {
                    result.incomplete.push((path, err));
                }
                result.files.push(scan.result);
            }
            Outcome::Skipped(path) => {
                log::debug!("no language for {}", path.display());
                result.skipped.push(path);
            }
            Outcome::Cancelled => result.cancelled = true,
        }
    }
    result.files.sort();
    result.skipped.sort();
    result.incomplete.sort_by(|a, b| a.0.cmp(&b.0));

    for walk_err in walk_errors {
        if config.strict {
            return Err(walk_err);
        }
        log::warn!("{walk_err}");
        result.errors.push(walk_err);
    }

    log::info!(
        "scanned {} files, skipped {}, incomplete {}",
        result.files.len(),
        result.skipped.len(),
        result.incomplete.len()
    );
    Ok(result)
}
