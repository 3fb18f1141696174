//! The host buffer interface and an in-memory implementation.
//!
//! Rows are 1-indexed everywhere in this module; columns count chars.

use crate::cursor::CursorPosition;
use crate::text::normalize_line_endings;
use ropey::Rope;
use std::ops::RangeInclusive;

/// What the engine needs from a host text buffer.
///
/// Row arguments are 1-indexed. Implementations may ignore rows that do not exist.
pub trait BufferAdapter {
    /// Number of lines in the buffer.
    fn line_count(&self) -> usize;

    /// Text of `row` without its line terminator, or `None` past the end.
    fn line(&self, row: usize) -> Option<String>;

    /// Replace the text of `row`.
    fn set_line(&mut self, row: usize, text: &str);

    /// Delete `rows`.
    fn delete_lines(&mut self, rows: RangeInclusive<usize>);

    /// Insert `lines` before `row`; `row == line_count() + 1` appends.
    fn insert_lines(&mut self, row: usize, lines: &[String]);

    /// Replace `rows` with `lines` in one step.
    ///
    /// Hosts with a native range replace should override this.
    fn replace_lines(&mut self, rows: RangeInclusive<usize>, lines: &[String]) {
        let start = *rows.start();
        self.delete_lines(rows);
        self.insert_lines(start, lines);
    }

    /// Current cursor position.
    fn cursor(&self) -> CursorPosition;

    /// Move the cursor.
    fn set_cursor(&mut self, cursor: CursorPosition);

    /// Language (filetype) identifier of the buffer.
    fn language_id(&self) -> String;

    /// Let the user start typing right away (e.g. switch a modal editor to insert mode).
    fn enter_text_input_mode(&mut self);
}

/// A [`Rope`]-backed in-memory buffer.
///
/// Line endings are normalized to `\n` on load; a trailing newline is remembered and restored
/// by [`RopeBuffer::text`].
#[derive(Debug, Clone)]
pub struct RopeBuffer {
    rope: Rope,
    trailing_newline: bool,
    cursor: CursorPosition,
    language: String,
    text_input_mode: bool,
}

impl RopeBuffer {
    /// Create a buffer from file contents.
    pub fn new(text: &str, language: impl Into<String>) -> Self {
        let mut text = normalize_line_endings(text);
        let trailing_newline = text.ends_with('\n');
        if trailing_newline {
            text.pop();
        }
        Self {
            rope: Rope::from_str(&text),
            trailing_newline,
            cursor: CursorPosition::new(1, 0),
            language: language.into(),
            text_input_mode: false,
        }
    }

    /// Create a buffer from lines.
    pub fn from_lines<S: AsRef<str>>(lines: &[S], language: impl Into<String>) -> Self {
        let joined: Vec<&str> = lines.iter().map(AsRef::as_ref).collect();
        Self::new(&joined.join("\n"), language)
    }

    /// Set the cursor (builder style).
    pub fn with_cursor(mut self, row: usize, column: usize) -> Self {
        self.cursor = CursorPosition::new(row, column);
        self
    }

    /// All lines, without terminators.
    pub fn lines(&self) -> Vec<String> {
        (0..self.rope.len_lines()).map(|i| self.line_at(i)).collect()
    }

    /// Full text, with the trailing newline restored if the input had one.
    pub fn text(&self) -> String {
        let mut text = self.rope.to_string();
        if self.trailing_newline {
            text.push('\n');
        }
        text
    }

    /// Returns `true` once [`BufferAdapter::enter_text_input_mode`] has been called.
    pub fn in_text_input_mode(&self) -> bool {
        self.text_input_mode
    }

    fn line_at(&self, index: usize) -> String {
        let mut line = self.rope.line(index).to_string();
        if line.ends_with('\n') {
            line.pop();
        }
        line
    }
}

impl BufferAdapter for RopeBuffer {
    fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    fn line(&self, row: usize) -> Option<String> {
        let index = row.checked_sub(1)?;
        (index < self.rope.len_lines()).then(|| self.line_at(index))
    }

    fn set_line(&mut self, row: usize, text: &str) {
        self.replace_lines(row..=row, &[text.to_string()]);
    }

    fn delete_lines(&mut self, rows: RangeInclusive<usize>) {
        self.replace_lines(rows, &[]);
    }

    fn insert_lines(&mut self, row: usize, lines: &[String]) {
        if lines.is_empty() || row == 0 {
            return;
        }
        let count = self.rope.len_lines();
        let joined = lines.join("\n");
        if row <= count {
            let at = self.rope.line_to_char(row - 1);
            self.rope.insert(at, &format!("{joined}\n"));
        } else {
            let at = self.rope.len_chars();
            self.rope.insert(at, &format!("\n{joined}"));
        }
    }

    fn replace_lines(&mut self, rows: RangeInclusive<usize>, lines: &[String]) {
        let count = self.rope.len_lines();
        let (start, end) = (*rows.start(), (*rows.end()).min(count));
        if start == 0 || start > end {
            return;
        }

        let first = start - 1;
        let last = end - 1;
        let mut from = self.rope.line_to_char(first);
        let to = if last + 1 < count {
            self.rope.line_to_char(last + 1)
        } else {
            self.rope.len_chars()
        };

        let mut replacement = lines.join("\n");
        if last + 1 < count {
            if !lines.is_empty() {
                replacement.push('\n');
            }
        } else if lines.is_empty() && first > 0 {
            // Dropping the last lines: also drop the newline that ended the line before them.
            from -= 1;
        }

        self.rope.remove(from..to);
        self.rope.insert(from, &replacement);
    }

    fn cursor(&self) -> CursorPosition {
        self.cursor
    }

    fn set_cursor(&mut self, cursor: CursorPosition) {
        self.cursor = cursor;
    }

    fn language_id(&self) -> String {
        self.language.clone()
    }

    fn enter_text_input_mode(&mut self) {
        self.text_input_mode = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_and_trailing_newline() {
        let buffer = RopeBuffer::new("a\r\nb\n", "python");
        assert_eq!(buffer.lines(), vec!["a", "b"]);
        assert_eq!(buffer.line(2).as_deref(), Some("b"));
        assert_eq!(buffer.line(3), None);
        assert_eq!(buffer.line(0), None);
        assert_eq!(buffer.text(), "a\nb\n");
    }

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buffer = RopeBuffer::new("", "c");
        assert_eq!(buffer.line_count(), 1);
        assert_eq!(buffer.line(1).as_deref(), Some(""));
    }

    #[test]
    fn test_replace_lines_in_middle() {
        let mut buffer = RopeBuffer::from_lines(&["a", "b", "c", "d"], "c");
        buffer.replace_lines(2..=3, &["x".into(), "y".into(), "z".into()]);
        assert_eq!(buffer.lines(), vec!["a", "x", "y", "z", "d"]);
    }

    #[test]
    fn test_replace_lines_at_end() {
        let mut buffer = RopeBuffer::from_lines(&["a", "b", "c"], "c");
        buffer.replace_lines(2..=3, &["x".into()]);
        assert_eq!(buffer.lines(), vec!["a", "x"]);
    }

    #[test]
    fn test_delete_lines() {
        let mut buffer = RopeBuffer::from_lines(&["a", "b", "c"], "c");
        buffer.delete_lines(3..=3);
        assert_eq!(buffer.lines(), vec!["a", "b"]);
        buffer.delete_lines(1..=1);
        assert_eq!(buffer.lines(), vec!["b"]);
    }

    #[test]
    fn test_insert_and_set_line() {
        let mut buffer = RopeBuffer::from_lines(&["a", "b"], "c");
        buffer.insert_lines(1, &["0".into()]);
        buffer.insert_lines(4, &["c".into()]);
        buffer.set_line(2, "A");
        assert_eq!(buffer.lines(), vec!["0", "A", "b", "c"]);
    }

    #[test]
    fn test_input_mode_flag() {
        let mut buffer = RopeBuffer::new("", "c").with_cursor(1, 0);
        assert!(!buffer.in_text_input_mode());
        buffer.enter_text_input_mode();
        assert!(buffer.in_text_input_mode());
        assert_eq!(buffer.language_id(), "c");
    }
}
