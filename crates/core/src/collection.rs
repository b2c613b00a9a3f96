// crates/core/src/collection.rs
//! Report ordering over per-file results.

use std::cmp::Ordering;

use serde::Serialize;

use crate::result::FileResult;

/// Report order: code lines descending, then name ascending.
///
/// Two results compare equal only when both keys are equal, so any sort
/// produces the same sequence of keys regardless of input order.
#[inline]
pub fn compare_results(a: &FileResult, b: &FileResult) -> Ordering {
    b.code()
        .cmp(&a.code())
        .then_with(|| a.name().cmp(b.name()))
}

/// Summed counters across a collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub files: u64,
    pub code: u64,
    pub comment: u64,
    pub blank: u64,
}

impl Totals {
    pub fn add(&mut self, result: &FileResult) {
        self.files += 1;
        self.code += result.code();
        self.comment += result.comment();
        self.blank += result.blank();
    }

    pub fn lines(&self) -> u64 {
        self.code + self.comment + self.blank
    }
}

/// Finished per-file results awaiting presentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultCollection {
    files: Vec<FileResult>,
}

impl ResultCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: FileResult) {
        self.files.push(result);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileResult> {
        self.files.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[FileResult] {
        &self.files
    }

    /// Sort into report order. Call only once every scan has finished.
    pub fn sort(&mut self) {
        self.files.sort_by(compare_results);
    }

    #[must_use]
    pub fn into_sorted(mut self) -> Self {
        self.sort();
        self
    }

    pub fn totals(&self) -> Totals {
        let mut totals = Totals::default();
        for result in &self.files {
            totals.add(result);
        }
        totals
    }

    pub fn into_vec(self) -> Vec<FileResult> {
        self.files
    }
}

impl Extend<FileResult> for ResultCollection {
    fn extend<T: IntoIterator<Item = FileResult>>(&mut self, iter: T) {
        self.files.extend(iter);
    }
}

impl FromIterator<FileResult> for ResultCollection {
    fn from_iter<T: IntoIterator<Item = FileResult>>(iter: T) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ResultCollection {
    type Item = FileResult;
    type IntoIter = std::vec::IntoIter<FileResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultCollection {
    type Item = &'a FileResult;
    type IntoIter = std::slice::Iter<'a, FileResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}
