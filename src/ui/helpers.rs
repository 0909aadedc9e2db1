//! Shared rendering utilities.

use crate::ui::theme::Theme;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Positions the cursor at a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Terminal columns `text` occupies. Wide characters (CJK, most emoji)
/// count two, combining marks zero.
#[must_use]
pub fn text_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Longest prefix of `text` that fits in `width` columns.
///
/// A wide character that would straddle the edge is left out.
#[must_use]
pub fn take_width(text: &str, width: usize) -> &str {
    let mut used = 0;
    for (at, c) in text.char_indices() {
        used += c.width().unwrap_or(0);
        if used > width {
            return &text[..at];
        }
    }
    text
}

/// Longest suffix of `text` that fits in `width` columns.
#[must_use]
pub fn take_width_end(text: &str, width: usize) -> &str {
    let mut used = 0;
    for (at, c) in text.char_indices().rev() {
        used += c.width().unwrap_or(0);
        if used > width {
            return &text[at + c.len_utf8()..];
        }
    }
    text
}

/// Prints `text` and pads it with spaces to `width` columns.
///
/// Text wider than `width` is cut.
pub fn print_padded(text: &str, width: usize) {
    let shown = take_width(text, width);
    print!("{shown}");
    print!("{}", " ".repeat(width.saturating_sub(text_width(shown))));
}

/// Prints a line centered in `cols` columns with the given styling prefix.
pub fn print_centered(row: usize, text: &str, style: &str, cols: usize) {
    let len = text_width(text).min(cols);
    let padding = cols.saturating_sub(len) / 2;

    position_cursor(row, 1);
    print!("{style}");
    print!("{}", " ".repeat(padding));
    print_padded(text, cols.saturating_sub(padding));
    print!("{}", Theme::reset());
}

/// Blanks a full line.
pub fn clear_line(row: usize, cols: usize) {
    position_cursor(row, 1);
    print!("{}", " ".repeat(cols));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_counts_columns_not_bytes() {
        assert_eq!(text_width("By Ann • now"), 12);
        assert_eq!(text_width("…"), 1);
        assert_eq!(text_width("日本"), 4);
        assert_eq!(text_width("e\u{301}"), 1);
    }

    #[test]
    fn wide_characters_are_never_split_at_the_edge() {
        assert_eq!(take_width("日本語", 5), "日本");
        assert_eq!(take_width("日本語", 6), "日本語");
        assert_eq!(take_width("abc", 0), "");
        assert_eq!(take_width_end("日本語", 5), "本語");
        assert_eq!(take_width_end("photo.png", 3), "png");
    }
}
