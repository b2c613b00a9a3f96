// crates/core/src/error.rs
use thiserror::Error;

/// Rejected comment syntax definitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("line comment markers must not be empty")]
    EmptyLineMarker,

    #[error("the empty block pair is only valid as the sole block pair")]
    MisplacedSentinel,

    #[error("block pair ('{start}', '{end}') has an empty delimiter")]
    EmptyDelimiter { start: String, end: String },
}

/// Reasons a scan stopped before the end of its stream.
///
/// Lines classified before the failure remain valid; everything after it is
/// left unclassified.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("line {line} exceeds the {limit} byte line limit")]
    LineTooLong { line: u64, limit: usize },

    #[error("failed to read line {line}: {source}")]
    Read {
        line: u64,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// 1-based number of the line that could not be classified.
    pub fn line(&self) -> u64 {
        match self {
            Self::LineTooLong { line, .. } | Self::Read { line, .. } => *line,
        }
    }
}

pub type SyntaxResult<T> = std::result::Result<T, SyntaxError>;
