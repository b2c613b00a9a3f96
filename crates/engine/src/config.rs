use derive_builder::Builder;
use line_census_core::DEFAULT_MAX_LINE_LEN;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// Initial and retained capacity of pooled read buffers.
pub const DEFAULT_BUFFER_CAPACITY: usize = 64 * 1024;

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct WalkOptions {
    #[builder(default)]
    pub roots: Vec<PathBuf>,
    #[builder(default = "1")]
    pub threads: usize,
    #[builder(default)]
    pub hidden: bool,
    #[builder(default = "true")]
    pub git_ignore: bool,
    #[builder(default)]
    pub max_depth: Option<usize>,
    #[builder(default)]
    pub follow_links: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            roots: vec![],
            threads: 1,
            hidden: false,
            git_ignore: true,
            max_depth: None,
            follow_links: false,
        }
    }
}

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct Config {
    #[builder(default)]
    pub walk: WalkOptions,

    /// Worker threads for scanning. `0` means one per logical CPU.
    #[builder(default = "0")]
    pub threads: usize,

    /// Only files named in this list are scanned.
    #[builder(default)]
    pub whitelist: Option<PathBuf>,
    /// Extra `extension -> language name` routes.
    #[builder(default)]
    pub map_ext: hashbrown::HashMap<String, String>,

    #[builder(default = "DEFAULT_MAX_LINE_LEN")]
    pub max_line_len: usize,
    #[builder(default = "DEFAULT_BUFFER_CAPACITY")]
    pub buffer_capacity: usize,

    /// Per-line decision trace at `debug` level.
    #[builder(default)]
    pub trace: bool,
    /// Treat walk errors as fatal.
    #[builder(default)]
    pub strict: bool,

    /// Checked before each file; once set no further files are started.
    #[builder(default)]
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            walk: WalkOptions::default(),
            threads: 0,
            whitelist: None,
            map_ext: hashbrown::HashMap::new(),
            max_line_len: DEFAULT_MAX_LINE_LEN,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            trace: false,
            strict: false,
            cancel: None,
        }
    }
}

impl Config {
    /// Effective worker count.
    pub fn worker_threads(&self) -> usize {
        if self.threads == 0 {
            num_cpus::get()
        } else {
            self.threads
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_match_default() {
        let built = ConfigBuilder::default().build().unwrap();
        let default = Config::default();
        assert_eq!(built.max_line_len, default.max_line_len);
        assert_eq!(built.threads, default.threads);
        assert!(built.walk.git_ignore);
        assert!(built.cancel.is_none());
    }

    #[test]
    fn test_worker_threads() {
        let config = ConfigBuilder::default().threads(3usize).build().unwrap();
        assert_eq!(config.worker_threads(), 3);
        assert!(Config::default().worker_threads() >= 1);
    }
}
