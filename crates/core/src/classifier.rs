// crates/core/src/classifier.rs
//! Per-line classification automaton.
//!
//! Every physical line maps to exactly one [`LineKind`]. The only state kept
//! between lines is the [`BlockStack`] of unclosed block comments, owned by
//! one [`LineClassifier`] and therefore by one file scan.

use serde::{Deserialize, Serialize};

use crate::syntax::{BlockPair, CommentSyntax};

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Category of one physical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Code,
    Comment,
    Blank,
}

impl LineKind {
    /// Four letter tag used by the trace output.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Code => "CODE",
            Self::Comment => "COMM",
            Self::Blank => "BLNK",
        }
    }
}

/// One classified line. `content` is trimmed, and on line 1 also stripped of
/// a leading byte-order mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedLine<'a> {
    pub number: u64,
    pub kind: LineKind,
    pub content: &'a str,
}

/// Open block comments, innermost last.
#[derive(Debug, Default, Clone)]
pub struct BlockStack<'s> {
    open: Vec<&'s BlockPair>,
}

impl<'s> BlockStack<'s> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    #[inline]
    pub fn top(&self) -> Option<&'s BlockPair> {
        self.open.last().copied()
    }

    /// A context for exactly this pair is open somewhere on the stack.
    pub fn is_open(&self, pair: &BlockPair) -> bool {
        self.open.iter().any(|p| *p == pair)
    }

    fn push(&mut self, pair: &'s BlockPair) {
        self.open.push(pair);
    }

    fn pop(&mut self) -> Option<&'s BlockPair> {
        self.open.pop()
    }
}

/// Streaming classifier for one file.
#[derive(Debug)]
pub struct LineClassifier<'s> {
    syntax: &'s CommentSyntax,
    stack: BlockStack<'s>,
    line_number: u64,
}

impl<'s> LineClassifier<'s> {
    pub fn new(syntax: &'s CommentSyntax) -> Self {
        Self {
            syntax,
            stack: BlockStack::new(),
            line_number: 0,
        }
    }

    /// Number of lines classified so far.
    #[inline]
    pub fn line_number(&self) -> u64 {
        self.line_number
    }

    #[inline]
    pub fn is_in_block_comment(&self) -> bool {
        !self.stack.is_empty()
    }

    #[inline]
    pub fn stack(&self) -> &BlockStack<'s> {
        &self.stack
    }

    /// Classify the next physical line (without its line terminator).
    pub fn classify<'a>(&mut self, raw: &'a str) -> ClassifiedLine<'a> {
        self.line_number += 1;
        let first_line = self.line_number == 1;

        let trimmed = raw.trim();
        let kind = classify_line(self.syntax, &mut self.stack, trimmed, first_line);
        let content = if first_line {
            strip_byte_order_mark(trimmed)
        } else {
            trimmed
        };
        ClassifiedLine {
            number: self.line_number,
            kind,
            content,
        }
    }
}

/// Classify one trimmed line, updating `stack` in place.
pub fn classify_line<'s>(
    syntax: &'s CommentSyntax,
    stack: &mut BlockStack<'s>,
    line: &str,
    first_line: bool,
) -> LineKind {
    if line.is_empty() {
        return LineKind::Blank;
    }

    if first_line && line.starts_with("#!") {
        return LineKind::Code;
    }

    let line = if first_line && stack.is_empty() {
        strip_byte_order_mark(line)
    } else {
        line
    };

    if stack.is_empty() {
        if starts_with_line_comment(syntax, line) {
            return LineKind::Comment;
        }
        if !syntax.has_block_pairs() || !syntax.contains_block_start(line) {
            return LineKind::Code;
        }
    }

    if syntax.is_block_sentinel() {
        return LineKind::Code;
    }

    scan_block_comments(syntax, stack, line)
}

#[inline]
fn strip_byte_order_mark(line: &str) -> &str {
    line.strip_prefix(BYTE_ORDER_MARK).unwrap_or(line)
}

/// A line marker matches at the start, and no block start shadows it there.
fn starts_with_line_comment(syntax: &CommentSyntax, line: &str) -> bool {
    syntax
        .line_markers()
        .iter()
        .any(|marker| line.starts_with(marker.as_str()))
        && syntax.block_start_at(line).is_none()
}

fn scan_block_comments<'s>(
    syntax: &'s CommentSyntax,
    stack: &mut BlockStack<'s>,
    line: &str,
) -> LineKind {
    let mut saw_code = false;
    let mut pos = 0;

    while pos < line.len() {
        let rest = &line[pos..];

        if let Some(open) = stack.top()
            && rest.starts_with(open.end())
        {
            stack.pop();
            pos += open.end().len();
            continue;
        }

        let opening = syntax
            .real_block_pairs()
            .find(|p| rest.starts_with(p.start()) && (!p.is_symmetric() || !stack.is_open(p)));
        if let Some(pair) = opening {
            stack.push(pair);
            pos += pair.start().len();
            continue;
        }

        let Some(ch) = rest.chars().next() else {
            break;
        };
        if stack.is_empty() && !ch.is_whitespace() {
            saw_code = true;
        }
        pos += ch.len_utf8();
    }

    if saw_code {
        LineKind::Code
    } else {
        LineKind::Comment
    }
}
