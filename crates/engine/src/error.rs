use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to read whitelist '{}': {source}", path.display())]
    Whitelist {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid extension mapping: {0}")]
    InvalidExtMapping(String),

    #[error("Invalid comment syntax for '{language}': {source}")]
    Syntax {
        language: String,
        #[source]
        source: line_census_core::SyntaxError,
    },

    #[error("Thread pool creation failed: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
