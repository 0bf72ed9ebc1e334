//! Corrections for nodes whose end the tokenizer reports at the wrong place.
//!
//! Comments are reported one character early, before their final `>`.
//! Text is reported late, once the tokenizer is already inside the markup
//! that ended it, so its end is computed from its own content instead.

use xast_common::Point;

/// The true end of a comment reported at `reading`.
#[must_use]
pub const fn comment_end(reading: Point) -> Point {
    Point::new(reading.line, reading.column + 1, reading.offset + 1)
}

/// The point right after `value` when it starts at `start`.
///
/// `\r\n`, `\n` and `\r` each count as one line break.
#[must_use]
pub fn text_end(start: Point, value: &str) -> Point {
    let mut end = start;
    let mut rest = value;

    while let Some(index) = rest.find(['\r', '\n']) {
        end.line += 1;
        end.column = 1;
        let width = if rest[index..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[index + width..];
    }

    end.column += utf16_len(rest);
    end.offset += utf16_len(value);
    end
}

fn utf16_len(value: &str) -> usize {
    value.chars().map(char::len_utf16).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_end_moves_past_the_closing_bracket() {
        assert_eq!(comment_end(Point::new(2, 7, 12)), Point::new(2, 8, 13));
    }

    #[test]
    fn text_on_one_line() {
        let start = Point::new(1, 4, 3);
        assert_eq!(text_end(start, "alpha"), Point::new(1, 9, 8));
        assert_eq!(text_end(start, ""), start);
    }

    #[test]
    fn text_across_line_breaks() {
        let start = Point::new(1, 6, 5);
        assert_eq!(text_end(start, "a\nbc"), Point::new(2, 3, 9));
        assert_eq!(text_end(start, "a\r\nbc"), Point::new(2, 3, 10));
        assert_eq!(text_end(start, "\r\r\n\n"), Point::new(4, 1, 9));
        assert_eq!(text_end(start, "x\n"), Point::new(2, 1, 7));
    }

    #[test]
    fn text_counts_utf16_units() {
        assert_eq!(
            text_end(Point::START, "🤔é"),
            Point::new(1, 4, 3)
        );
    }
}
