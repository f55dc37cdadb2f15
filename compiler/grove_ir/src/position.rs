//! Source positions for diagnostics.
//!
//! Positions are never used for evaluation decisions; they only travel with
//! tokens and faults so hosts can point at the offending source.

use std::fmt;
use std::sync::Arc;

/// Source name used when no better position is known.
pub const UNKNOWN_SOURCE: &str = "UNK";

/// A `(source, line, column)` triple.
///
/// Lines and columns are 1-based. The source name is shared, so cloning a
/// position never copies the name.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Position {
    source: Arc<str>,
    line: u32,
    column: u32,
}

impl Position {
    /// Create a new position.
    pub fn new(source: impl Into<Arc<str>>, line: u32, column: u32) -> Self {
        Position {
            source: source.into(),
            line,
            column,
        }
    }

    /// The `(UNK, 1, 1)` sentinel used when a fault has no better location.
    pub fn unknown() -> Self {
        Position::new(UNKNOWN_SOURCE, 1, 1)
    }

    /// Whether this is the unknown sentinel.
    pub fn is_unknown(&self) -> bool {
        &*self.source == UNKNOWN_SOURCE && self.line == 1 && self.column == 1
    }

    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Same source, another line/column. Shares the source name.
    #[must_use]
    pub fn at(&self, line: u32, column: u32) -> Self {
        Position {
            source: Arc::clone(&self.source),
            line,
            column,
        }
    }

    /// The `(source, line, column)` tuple form.
    pub fn as_tuple(&self) -> (&str, u32, u32) {
        (&self.source, self.line, self.column)
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::unknown()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.source, self.line, self.column)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.source, self.line, self.column)
    }
}

#[cfg(test)]
mod tests;
