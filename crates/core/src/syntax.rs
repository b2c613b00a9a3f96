// crates/core/src/syntax.rs
//! Comment syntax of one language.
//!
//! A syntax is plain data: an ordered list of line comment markers and an
//! ordered list of block comment pairs. Every language is classified by the
//! same algorithm, parameterised by one of these values.

use serde::{Deserialize, Serialize};

use crate::error::{SyntaxError, SyntaxResult};

/// A `(start, end)` block comment delimiter pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPair {
    start: String,
    end: String,
}

impl BlockPair {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// The reserved `("", "")` pair meaning "no block comments".
    pub fn sentinel() -> Self {
        Self::new("", "")
    }

    #[inline]
    pub fn start(&self) -> &str {
        &self.start
    }

    #[inline]
    pub fn end(&self) -> &str {
        &self.end
    }

    #[inline]
    pub fn is_sentinel(&self) -> bool {
        self.start.is_empty() && self.end.is_empty()
    }

    /// Same token opens and closes the comment, e.g. `"""`.
    #[inline]
    pub fn is_symmetric(&self) -> bool {
        self.start == self.end
    }
}

impl<S: Into<String>, E: Into<String>> From<(S, E)> for BlockPair {
    fn from((start, end): (S, E)) -> Self {
        Self::new(start, end)
    }
}

/// Immutable comment syntax description.
///
/// Deserialization goes through [`CommentSyntax::new`], so a decoded value
/// is as valid as a constructed one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCommentSyntax")]
pub struct CommentSyntax {
    line_markers: Vec<String>,
    block_pairs: Vec<BlockPair>,
}

impl CommentSyntax {
    /// Build a validated syntax.
    ///
    /// # Errors
    ///
    /// Fails on an empty line marker, on a sentinel pair mixed with other
    /// pairs, and on a pair with exactly one empty delimiter.
    pub fn new<M, P>(line_markers: M, block_pairs: P) -> SyntaxResult<Self>
    where
        M: IntoIterator,
        M::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<BlockPair>,
    {
        let line_markers: Vec<String> = line_markers.into_iter().map(Into::into).collect();
        let block_pairs: Vec<BlockPair> = block_pairs.into_iter().map(Into::into).collect();

        if line_markers.iter().any(String::is_empty) {
            return Err(SyntaxError::EmptyLineMarker);
        }

        let has_sentinel = block_pairs.iter().any(BlockPair::is_sentinel);
        if has_sentinel && block_pairs.len() > 1 {
            return Err(SyntaxError::MisplacedSentinel);
        }

        if let Some(pair) = block_pairs
            .iter()
            .find(|p| !p.is_sentinel() && (p.start.is_empty() || p.end.is_empty()))
        {
            return Err(SyntaxError::EmptyDelimiter {
                start: pair.start.clone(),
                end: pair.end.clone(),
            });
        }

        Ok(Self {
            line_markers,
            block_pairs,
        })
    }

    /// A language without any comment syntax.
    pub fn none() -> Self {
        Self::default()
    }

    /// Line comments only, declared with the explicit sentinel pair.
    ///
    /// # Errors
    ///
    /// Fails if a marker is empty.
    pub fn line_only<M>(line_markers: M) -> SyntaxResult<Self>
    where
        M: IntoIterator,
        M::Item: Into<String>,
    {
        Self::new(line_markers, [BlockPair::sentinel()])
    }

    #[inline]
    pub fn line_markers(&self) -> &[String] {
        &self.line_markers
    }

    #[inline]
    pub fn block_pairs(&self) -> &[BlockPair] {
        &self.block_pairs
    }

    /// `false` only when no pair at all is configured; the sentinel counts.
    #[inline]
    pub fn has_block_pairs(&self) -> bool {
        !self.block_pairs.is_empty()
    }

    /// The sole configured pair is the "no block comments" sentinel.
    pub fn is_block_sentinel(&self) -> bool {
        matches!(self.block_pairs.as_slice(), [only] if only.is_sentinel())
    }

    /// Real (non-sentinel) block pairs, in configured order.
    pub fn real_block_pairs(&self) -> impl Iterator<Item = &BlockPair> {
        self.block_pairs.iter().filter(|p| !p.is_sentinel())
    }

    /// First block pair whose start delimiter is a prefix of `text`.
    pub fn block_start_at(&self, text: &str) -> Option<&BlockPair> {
        self.real_block_pairs().find(|p| text.starts_with(p.start()))
    }

    /// Any block start delimiter occurs somewhere in `line`.
    pub fn contains_block_start(&self, line: &str) -> bool {
        self.real_block_pairs().any(|p| line.contains(p.start()))
    }
}

#[derive(Deserialize)]
struct RawCommentSyntax {
    #[serde(default)]
    line_markers: Vec<String>,
    #[serde(default)]
    block_pairs: Vec<BlockPair>,
}

impl TryFrom<RawCommentSyntax> for CommentSyntax {
    type Error = SyntaxError;

    fn try_from(raw: RawCommentSyntax) -> SyntaxResult<Self> {
        Self::new(raw.line_markers, raw.block_pairs)
    }
}

/// A named comment syntax, as resolved for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    name: String,
    syntax: CommentSyntax,
}

impl Language {
    pub fn new(name: impl Into<String>, syntax: CommentSyntax) -> Self {
        Self {
            name: name.into(),
            syntax,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn syntax(&self) -> &CommentSyntax {
        &self.syntax
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c_like_syntax() {
        let syntax = CommentSyntax::new(["//"], [("/*", "*/")]).unwrap();
        assert_eq!(syntax.line_markers(), ["//"]);
        assert!(syntax.has_block_pairs());
        assert!(!syntax.is_block_sentinel());
        assert!(syntax.contains_block_start("x = 1; /* y */"));
        assert!(!syntax.contains_block_start("x = 1; // y"));
    }

    #[test]
    fn test_line_only_uses_sentinel() {
        let syntax = CommentSyntax::line_only(["#"]).unwrap();
        assert!(syntax.has_block_pairs());
        assert!(syntax.is_block_sentinel());
        assert_eq!(syntax.real_block_pairs().count(), 0);
        assert!(!syntax.contains_block_start("anything"));
    }

    #[test]
    fn test_none_has_nothing() {
        let syntax = CommentSyntax::none();
        assert!(syntax.line_markers().is_empty());
        assert!(!syntax.has_block_pairs());
        assert!(!syntax.is_block_sentinel());
    }

    #[test]
    fn test_sentinel_must_be_alone() {
        let err = CommentSyntax::new(["--"], [("", ""), ("{-", "-}")]).unwrap_err();
        assert_eq!(err, SyntaxError::MisplacedSentinel);
    }

    #[test]
    fn test_half_empty_pair_rejected() {
        let err = CommentSyntax::new(Vec::<String>::new(), [("/*", "")]).unwrap_err();
        assert!(matches!(err, SyntaxError::EmptyDelimiter { .. }));
    }

    #[test]
    fn test_empty_marker_rejected() {
        let err = CommentSyntax::new([""], Vec::<BlockPair>::new()).unwrap_err();
        assert_eq!(err, SyntaxError::EmptyLineMarker);
    }

    #[test]
    fn test_deserialize_validates() {
        let err = serde_json::from_str::<CommentSyntax>(
            r#"{"line_markers":[],"block_pairs":[{"start":"","end":"*/"}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("*/"));

        assert!(serde_json::from_str::<CommentSyntax>(r#"{"line_markers":[""]}"#).is_err());
    }

    #[test]
    fn test_deserialize_round_trips_valid_syntax() {
        let syntax = CommentSyntax::new(["--"], [("{-", "-}")]).unwrap();
        let json = serde_json::to_string(&syntax).unwrap();
        let decoded: CommentSyntax = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, syntax);

        let language: Language = serde_json::from_str(
            r##"{
                "name": "Shell",
                "syntax": {"line_markers": ["#"], "block_pairs": [{"start": "", "end": ""}]}
            }"##,
        )
        .unwrap();
        assert!(language.syntax().is_block_sentinel());
    }

    #[test]
    fn test_block_start_at_prefers_configured_order() {
        let syntax = CommentSyntax::new(["--"], [("--[[", "]]"), ("--[=[", "]=]")]).unwrap();
        let pair = syntax.block_start_at("--[[ doc").unwrap();
        assert_eq!(pair.end(), "]]");
        assert!(syntax.block_start_at("-- plain").is_none());
    }
}
