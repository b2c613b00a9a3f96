// crates/core/src/scan.rs
//! Whole-stream scan: read, classify, record.

use std::io::BufRead;

use crate::{
    classifier::LineClassifier,
    error::ScanError,
    reader::{self, LineError},
    result::{FileResult, Observers},
    syntax::Language,
};

/// `log` target for the per-line decision trace.
pub const TRACE_TARGET: &str = "line_census::trace";

/// Longest accepted line, in bytes, unless configured otherwise.
pub const DEFAULT_MAX_LINE_LEN: usize = 1024 * 1024;

/// Per-scan settings.
#[derive(Debug)]
pub struct ScanOptions<'a> {
    pub observers: Observers<'a>,
    /// Emit one `debug` record per line under [`TRACE_TARGET`].
    pub trace: bool,
    pub max_line_len: usize,
}

impl Default for ScanOptions<'_> {
    fn default() -> Self {
        Self {
            observers: Observers::default(),
            trace: false,
            max_line_len: DEFAULT_MAX_LINE_LEN,
        }
    }
}

impl<'a> ScanOptions<'a> {
    #[must_use]
    pub fn with_observers(mut self, observers: Observers<'a>) -> Self {
        self.observers = observers;
        self
    }

    #[must_use]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    #[must_use]
    pub fn with_max_line_len(mut self, max_line_len: usize) -> Self {
        self.max_line_len = max_line_len;
        self
    }
}

/// Outcome of one file scan.
///
/// `incomplete` is set when the stream could not be read to the end; the
/// result then covers only the lines before the failing one.
#[derive(Debug)]
pub struct FileScan {
    pub result: FileResult,
    pub incomplete: Option<ScanError>,
}

impl FileScan {
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.incomplete.is_none()
    }
}

/// Classify every line of `reader` as `language`.
///
/// `buf` is the caller's reusable read buffer; it is cleared before use and
/// left allocated afterwards.
pub fn analyze_reader<R: BufRead>(
    name: impl Into<String>,
    language: &Language,
    mut reader: R,
    buf: &mut Vec<u8>,
    options: ScanOptions<'_>,
) -> FileScan {
    let ScanOptions {
        mut observers,
        trace,
        max_line_len,
    } = options;

    let mut result = FileResult::new(name, language.name());
    let mut classifier = LineClassifier::new(language.syntax());

    if trace {
        log::debug!(target: TRACE_TARGET, "filename={}", result.name());
    }

    let incomplete = loop {
        let next = classifier.line_number() + 1;
        match reader::read_line(&mut reader, buf, max_line_len) {
            Ok(true) => {}
            Ok(false) => break None,
            Err(LineError::TooLong) => {
                break Some(ScanError::LineTooLong {
                    line: next,
                    limit: max_line_len,
                });
            }
            Err(LineError::Io(source)) => break Some(ScanError::Read { line: next, source }),
        }

        let raw = String::from_utf8_lossy(buf.as_slice());
        let line = classifier.classify(&raw);
        result.record(&line, &mut observers);

        if trace {
            log::debug!(
                target: TRACE_TARGET,
                "[{}, cd:{}, cm:{}, bk:{}, iscm:{}, line_num:{}] {}",
                line.kind.tag(),
                result.code(),
                result.comment(),
                result.blank(),
                classifier.is_in_block_comment(),
                line.number,
                raw,
            );
        }
    };

    if trace {
        let numbers = result.line_numbers();
        log::debug!(target: TRACE_TARGET, "code_line={:?}", numbers.code);
        log::debug!(target: TRACE_TARGET, "blanks_line={:?}", numbers.blank);
        log::debug!(target: TRACE_TARGET, "comments_line={:?}", numbers.comment);
    }

    FileScan { result, incomplete }
}

/// Convenience wrapper for in-memory text.
pub fn analyze_str(name: impl Into<String>, language: &Language, text: &str) -> FileResult {
    let mut buf = Vec::new();
    analyze_reader(name, language, text.as_bytes(), &mut buf, ScanOptions::default()).result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::LineKind;
    use crate::syntax::CommentSyntax;

    fn go() -> Language {
        Language::new("Go", CommentSyntax::new(["//"], [("/*", "*/")]).unwrap())
    }

    #[test]
    fn test_empty_input() {
        let result = analyze_str("empty.go", &go(), "");
        assert!(result.is_empty());
        assert!(result.line_numbers().blank.is_empty());
    }

    #[test]
    fn test_shebang_only_file() {
        let result = analyze_str("run", &go(), "#!/bin/sh\n");
        assert_eq!(result.code(), 1);
        assert_eq!(result.comment(), 0);
    }

    #[test]
    fn test_mixed_file() {
        let text = "package main\n\n// doc\n/*\n block\n*/\nfunc main() {} // trailing\n";
        let result = analyze_str("main.go", &go(), text);
        assert_eq!(result.line_numbers().code, [1, 7]);
        assert_eq!(result.line_numbers().blank, [2]);
        assert_eq!(result.line_numbers().comment, [3, 4, 5, 6]);
        assert_eq!(result.language(), "Go");
    }

    #[test]
    fn test_line_too_long_is_reported() {
        let text = "a := 1\nb := \"0123456789\"\nc := 3\n";
        let mut buf = Vec::new();
        let options = ScanOptions::default().with_max_line_len(8);
        let scan = analyze_reader("long.go", &go(), text.as_bytes(), &mut buf, options);

        assert!(!scan.is_complete());
        let err = scan.incomplete.unwrap();
        assert!(matches!(err, ScanError::LineTooLong { line: 2, limit: 8 }));
        assert_eq!(scan.result.code(), 1);
        assert_eq!(scan.result.total(), 1);
    }

    #[test]
    fn test_observers_see_lines_in_order() {
        let mut seen: Vec<(LineKind, String)> = Vec::new();
        let mut buf = Vec::new();
        {
            let seen = std::cell::RefCell::new(&mut seen);
            let observers = Observers::new()
                .on_code(|l| seen.borrow_mut().push((LineKind::Code, l.to_string())))
                .on_comment(|l| seen.borrow_mut().push((LineKind::Comment, l.to_string())))
                .on_blank(|l| seen.borrow_mut().push((LineKind::Blank, l.to_string())));
            let options = ScanOptions::default().with_observers(observers);
            analyze_reader("o.go", &go(), "  x := 1  \n\n// c\n".as_bytes(), &mut buf, options);
        }
        assert_eq!(
            seen,
            [
                (LineKind::Code, "x := 1".to_string()),
                (LineKind::Blank, String::new()),
                (LineKind::Comment, "// c".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_utf8_is_classified() {
        let bytes: &[u8] = b"\xff\xfe code\n// \xc3\x28\n";
        let mut buf = Vec::new();
        let scan = analyze_reader("bad.go", &go(), bytes, &mut buf, ScanOptions::default());
        assert!(scan.is_complete());
        assert_eq!(scan.result.code(), 1);
        assert_eq!(scan.result.comment(), 1);
    }

    #[test]
    fn test_buffer_is_reused() {
        let mut buf = Vec::with_capacity(64);
        let _ = analyze_reader("a.go", &go(), "x\n".as_bytes(), &mut buf, ScanOptions::default());
        let capacity = buf.capacity();
        let _ = analyze_reader("b.go", &go(), "y\n".as_bytes(), &mut buf, ScanOptions::default());
        assert_eq!(buf.capacity(), capacity);
    }
}
