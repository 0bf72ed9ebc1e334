//! The position clock.
//!
//! Tokenizer events arrive stamped with a 0-based [`Cursor`]. The clock turns
//! those into 1-based [`Point`]s and remembers the last reading, the
//! baseline, which is where the next node starts.

use xast_common::Point;

use crate::tokenizer::Cursor;

/// Tracks where the next node starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    baseline: Point,
}

impl Clock {
    /// A clock at the start of the document, 1:1 offset 0.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            baseline: Point::START,
        }
    }

    /// The point the tokenizer was at when it stamped `cursor`.
    #[must_use]
    pub fn now(cursor: Cursor) -> Point {
        Point::from(cursor)
    }

    /// The last reading: the end of the previous node or markup.
    #[must_use]
    pub const fn baseline(&self) -> Point {
        self.baseline
    }

    /// Take a reading from `cursor` and make it the baseline.
    pub fn advance(&mut self, cursor: Cursor) -> Point {
        self.baseline = Self::now(cursor);
        self.baseline
    }

    /// Move the baseline to a point computed elsewhere.
    pub const fn rebase(&mut self, point: Point) {
        self.baseline = point;
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readings_are_one_based() {
        let cursor = Cursor {
            line: 2,
            column: 4,
            offset: 17,
        };
        assert_eq!(Clock::now(cursor), Point::new(3, 5, 17));
    }

    #[test]
    fn advance_moves_the_baseline() {
        let mut clock = Clock::new();
        assert_eq!(clock.baseline(), Point::START);

        let reading = clock.advance(Cursor {
            line: 0,
            column: 3,
            offset: 3,
        });
        assert_eq!(reading, Point::new(1, 4, 3));
        assert_eq!(clock.baseline(), reading);

        clock.rebase(Point::new(2, 1, 10));
        assert_eq!(clock.baseline(), Point::new(2, 1, 10));
    }
}
