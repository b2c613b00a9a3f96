// crates/core/src/lib.rs
//! Line classification core.
//!
//! Classifies every physical line of a source file as code, comment or blank
//! from nothing but the language's comment syntax, and orders per-file
//! results for reporting. No filesystem access happens here.
#![allow(clippy::multiple_crate_versions)]

pub mod classifier;
pub mod collection;
pub mod error;
mod reader;
pub mod result;
pub mod scan;
pub mod syntax;

pub use classifier::{BlockStack, ClassifiedLine, LineClassifier, LineKind, classify_line};
pub use collection::{ResultCollection, Totals, compare_results};
pub use error::{ScanError, SyntaxError, SyntaxResult};
pub use result::{FileResult, LineNumbers, Observers};
pub use scan::{
    DEFAULT_MAX_LINE_LEN, FileScan, ScanOptions, TRACE_TARGET, analyze_reader, analyze_str,
};
pub use syntax::{BlockPair, CommentSyntax, Language};
