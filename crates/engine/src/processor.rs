use crate::buffer_pool::BufferPool;
use crate::config::Config;
use line_census_core::{FileResult, FileScan, Language, ScanOptions, analyze_reader};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Scan one file as `language`.
///
/// A file that cannot be opened yields an empty result carrying only its
/// name; the failure is logged, not returned.
pub fn process_file(
    path: &Path,
    language: &Language,
    pool: &BufferPool,
    config: &Config,
) -> FileScan {
    let name = path.to_string_lossy().into_owned();
    let mut buf = pool.acquire();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            log::warn!("cannot open {}: {e}", path.display());
            return FileScan {
                result: FileResult::unavailable(name),
                incomplete: None,
            };
        }
    };

    let options = ScanOptions::default()
        .with_trace(config.trace)
        .with_max_line_len(config.max_line_len);
    let scan = analyze_reader(name, language, BufReader::new(file), &mut buf, options);

    if let Some(err) = &scan.incomplete {
        log::warn!("{}: scan stopped early: {err}", path.display());
    }
    scan
}
