//! Source locations.
//!
//! Follows the [unist](https://github.com/syntax-tree/unist#position) model:
//! lines and columns are 1-based, offsets are 0-based. Columns and offsets
//! count UTF-16 code units, so a character outside the Basic Multilingual
//! Plane advances both by two.

use core::fmt;

use serde::Serialize;

/// A single place in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Point {
    /// Line in the source (1-indexed).
    pub line: usize,
    /// Column in the source (1-indexed).
    pub column: usize,
    /// Offset into the source (0-indexed).
    pub offset: usize,
}

impl Point {
    /// The first place of every document.
    pub const START: Self = Self {
        line: 1,
        column: 1,
        offset: 0,
    };

    /// Create a point from 1-based line and column and a 0-based offset.
    #[must_use]
    pub const fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The span a node occupies in the source.
///
/// `start` is the place of the first character, `end` the place right after
/// the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    /// Place of the first character.
    pub start: Point,
    /// Place of the first character after the node.
    pub end: Point,
}

impl Position {
    /// Create a position from its two points.
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_displays_line_and_column() {
        assert_eq!(Point::new(3, 14, 40).to_string(), "3:14");
    }

    #[test]
    fn position_displays_both_ends() {
        let position = Position::new(Point::START, Point::new(2, 1, 9));
        assert_eq!(position.to_string(), "1:1-2:1");
    }
}
