// crates/core/src/result.rs
//! Per-file line counts and line-number lists.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classifier::{ClassifiedLine, LineKind};

type Callback<'a> = Box<dyn FnMut(&str) + 'a>;

/// Optional per-category callbacks, invoked synchronously with the trimmed
/// content of every line recorded in that category.
#[derive(Default)]
pub struct Observers<'a> {
    on_code: Option<Callback<'a>>,
    on_comment: Option<Callback<'a>>,
    on_blank: Option<Callback<'a>>,
}

impl<'a> Observers<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_code(mut self, f: impl FnMut(&str) + 'a) -> Self {
        self.on_code = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_comment(mut self, f: impl FnMut(&str) + 'a) -> Self {
        self.on_comment = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_blank(mut self, f: impl FnMut(&str) + 'a) -> Self {
        self.on_blank = Some(Box::new(f));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.on_code.is_none() && self.on_comment.is_none() && self.on_blank.is_none()
    }

    fn notify(&mut self, kind: LineKind, content: &str) {
        let slot = match kind {
            LineKind::Code => &mut self.on_code,
            LineKind::Comment => &mut self.on_comment,
            LineKind::Blank => &mut self.on_blank,
        };
        if let Some(callback) = slot {
            callback(content);
        }
    }
}

impl fmt::Debug for Observers<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("on_code", &self.on_code.is_some())
            .field("on_comment", &self.on_comment.is_some())
            .field("on_blank", &self.on_blank.is_some())
            .finish()
    }
}

/// 1-based line numbers per category, each in increasing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineNumbers {
    pub code: Vec<u64>,
    pub comment: Vec<u64>,
    pub blank: Vec<u64>,
}

impl LineNumbers {
    pub fn of(&self, kind: LineKind) -> &[u64] {
        match kind {
            LineKind::Code => &self.code,
            LineKind::Comment => &self.comment,
            LineKind::Blank => &self.blank,
        }
    }

    fn of_mut(&mut self, kind: LineKind) -> &mut Vec<u64> {
        match kind {
            LineKind::Code => &mut self.code,
            LineKind::Comment => &mut self.comment,
            LineKind::Blank => &mut self.blank,
        }
    }
}

/// Classification outcome for one file.
///
/// Counters are `u64`, so no realistic file can make them wrap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileResult {
    name: String,
    language: String,
    code: u64,
    comment: u64,
    blank: u64,
    lines: LineNumbers,
}

impl FileResult {
    pub fn new(name: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            language: language.into(),
            ..Self::default()
        }
    }

    /// Result for a file that could not be opened: only the name is set.
    pub fn unavailable(name: impl Into<String>) -> Self {
        Self::new(name, String::new())
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[inline]
    pub fn code(&self) -> u64 {
        self.code
    }

    #[inline]
    pub fn comment(&self) -> u64 {
        self.comment
    }

    #[inline]
    pub fn blank(&self) -> u64 {
        self.blank
    }

    pub fn count(&self, kind: LineKind) -> u64 {
        match kind {
            LineKind::Code => self.code,
            LineKind::Comment => self.comment,
            LineKind::Blank => self.blank,
        }
    }

    #[inline]
    pub fn line_numbers(&self) -> &LineNumbers {
        &self.lines
    }

    pub fn total(&self) -> u64 {
        self.code + self.comment + self.blank
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn record_code(&mut self, number: u64, content: &str, observers: &mut Observers<'_>) {
        self.record_kind(LineKind::Code, number, content, observers);
    }

    pub fn record_comment(&mut self, number: u64, content: &str, observers: &mut Observers<'_>) {
        self.record_kind(LineKind::Comment, number, content, observers);
    }

    pub fn record_blank(&mut self, number: u64, content: &str, observers: &mut Observers<'_>) {
        self.record_kind(LineKind::Blank, number, content, observers);
    }

    /// Record an already classified line.
    pub fn record(&mut self, line: &ClassifiedLine<'_>, observers: &mut Observers<'_>) {
        self.record_kind(line.kind, line.number, line.content, observers);
    }

    fn record_kind(
        &mut self,
        kind: LineKind,
        number: u64,
        content: &str,
        observers: &mut Observers<'_>,
    ) {
        debug_assert_eq!(number, self.total() + 1, "lines must be recorded in order");

        let counter = match kind {
            LineKind::Code => &mut self.code,
            LineKind::Comment => &mut self.comment,
            LineKind::Blank => &mut self.blank,
        };
        *counter += 1;
        self.lines.of_mut(kind).push(number);

        observers.notify(kind, content);
    }
}
