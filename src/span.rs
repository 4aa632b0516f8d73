//! Byte-range positions into the source buffer.
//!
//! Every position and range the core hands back to a caller is a [`Span`]:
//! a half-open `[start, end)` byte range. Spans never own data; callers
//! slice the original source buffer themselves.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A `[start, end)` byte range into the source buffer.
///
/// Bounded to 32 bits: sources are capped at `u32::MAX` bytes (see
/// [`crate::ast::Ast::parse`]), so every offset fits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Span {
    /// Start position (inclusive).
    pub start: u32,
    /// End position (exclusive).
    pub end: u32,
}

impl Span {
    /// The empty span at the origin. Used for nodes with no close tag.
    pub const ZERO: Span = Span { start: 0, end: 0 };

    /// Build a span, asserting well-formedness (`start <= end`).
    #[must_use]
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "span start must not exceed end");
        Span { start, end }
    }

    /// Number of bytes covered.
    #[must_use]
    pub fn len(self) -> u32 {
        self.end - self.start
    }

    /// True for a zero-width span, which is how an unset/void close span is
    /// represented.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Slice the given source buffer by this span.
    ///
    /// Panics if the span is out of bounds for `source`; every span this
    /// crate emits is constructed from offsets into that same `source`, so
    /// this should never happen for spans obtained from [`crate::ast::Ast`].
    #[must_use]
    pub fn slice<'s>(self, source: &'s [u8]) -> &'s [u8] {
        &source[self.start as usize..self.end as usize]
    }

    /// True if `offset` lies within `[start, end)`.
    #[must_use]
    pub fn contains(self, offset: u32) -> bool {
        offset >= self.start && offset < self.end
    }

    /// 1-based row and column (in bytes, not characters) of this span's
    /// start, per spec.md §6 ("Rows and columns are 1-based, columns
    /// measured in bytes").
    #[must_use]
    pub fn start_row_col(self, source: &[u8]) -> RowCol {
        row_col_at(source, self.start)
    }
}

/// A 1-based `(row, column)` pair, columns measured in bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowCol {
    /// 1-based line number.
    pub row: u32,
    /// 1-based byte column within the line.
    pub col: u32,
}

/// Project a byte offset onto `(row, col)`. Pure function of the source and
/// the offset, as required by spec.md §3.
#[must_use]
pub fn row_col_at(source: &[u8], offset: u32) -> RowCol {
    let offset = offset.min(source.len() as u32) as usize;
    let mut row = 1u32;
    let mut line_start = 0usize;
    for (i, &b) in source[..offset].iter().enumerate() {
        if b == b'\n' {
            row += 1;
            line_start = i + 1;
        }
    }
    RowCol {
        row,
        col: (offset - line_start) as u32 + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_line_first_col() {
        let rc = row_col_at(b"hello", 0);
        assert_eq!(rc, RowCol { row: 1, col: 1 });
    }

    #[test]
    fn after_newline_resets_column() {
        let rc = row_col_at(b"ab\ncd", 4);
        assert_eq!(rc, RowCol { row: 2, col: 2 });
    }

    #[test]
    fn span_slice_roundtrip() {
        let src = b"<div>hi</div>";
        let span = Span::new(5, 7);
        assert_eq!(span.slice(src), b"hi");
    }
}
