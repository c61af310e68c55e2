//! Matched spans
//!
//! A `MatchResult` is one styled range of the buffer produced while
//! evaluating rules. Spans are values: overlap resolution builds new
//! spans rather than editing old ones.

use std::fmt;

/// A styled range of the buffer
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchResult {
    offset: usize,
    length: usize,
    style_key: String,
    bold: Option<bool>,
}

impl MatchResult {
    /// Create a new span
    ///
    /// `bold` overrides the weight of the style when set; `None` keeps
    /// whatever the theme says.
    ///
    /// # Panics
    ///
    /// Panics if `style_key` is empty.
    pub fn new(offset: usize, length: usize, style_key: impl Into<String>, bold: Option<bool>) -> Self {
        let style_key = style_key.into();
        assert!(!style_key.is_empty(), "style key of a span cannot be empty");
        Self {
            offset,
            length,
            style_key,
            bold,
        }
    }

    /// Byte offset where this span starts (inclusive)
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length of this span in bytes
    pub fn length(&self) -> usize {
        self.length
    }

    /// Byte offset where this span ends (exclusive)
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    pub fn style_key(&self) -> &str {
        &self.style_key
    }

    /// Bold override for the style, if any
    pub fn bold(&self) -> Option<bool> {
        self.bold
    }

    /// Check if this span contains a byte position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.offset && pos < self.end()
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Same style and bold override over another range
    pub(crate) fn with_range(&self, offset: usize, length: usize) -> Self {
        Self {
            offset,
            length,
            style_key: self.style_key.clone(),
            bold: self.bold,
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}, ", self.offset, self.length, self.style_key)?;
        match self.bold {
            Some(bold) => write!(f, "{}]", bold),
            None => write!(f, "null]"),
        }
    }
}
