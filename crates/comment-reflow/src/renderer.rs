//! Rendering text lines back into comment syntax.

use crate::text::pad_to_width;
use comment_reflow_lang::CommentStyle;

/// Geometry of a comment block being rendered: its style, indentation and target width.
#[derive(Debug, Clone, Copy)]
pub struct BlockFrame<'a> {
    /// Comment style of the block.
    pub style: &'a CommentStyle,
    /// Indentation of the block, in columns.
    pub indent: usize,
    /// Maximum rendered line width.
    pub line_width: usize,
}

impl<'a> BlockFrame<'a> {
    /// Create a frame.
    pub fn new(style: &'a CommentStyle, indent: usize, line_width: usize) -> Self {
        Self {
            style,
            indent,
            line_width,
        }
    }

    /// Width of the text area: what is left after the indent, both delimiters and the two
    /// separator spaces. `0` means the block cannot hold any text.
    pub fn inner_width(&self) -> usize {
        self.line_width
            .saturating_sub(self.indent + self.style.start_len() + self.style.end_len() + 2)
    }

    /// Columns taken by the indent and the start delimiter.
    pub fn prefix_width(&self) -> usize {
        self.indent + self.style.start_len()
    }

    /// Column where text begins on a rendered line (after the separator space).
    pub fn text_offset(&self) -> usize {
        self.prefix_width() + 1
    }

    /// Render one text line.
    ///
    /// Block comments are padded so the end delimiters line up; line comments are not padded.
    pub fn render_line(&self, text: &str) -> String {
        let mut out = String::with_capacity(self.line_width);
        out.push_str(&" ".repeat(self.indent));
        out.push_str(&self.style.start);
        out.push(' ');
        if self.style.has_end() {
            out.push_str(&pad_to_width(text, self.inner_width()));
            out.push(' ');
            out.push_str(&self.style.end);
        } else {
            out.push_str(text);
        }
        out
    }

    /// Render a top/bottom border, or `None` if the style has no border glyph.
    pub fn render_border(&self) -> Option<String> {
        let fill = self.style.fill_char()?;
        let count = self
            .line_width
            .saturating_sub(self.indent + self.style.start_len() + self.style.end_len());
        let mut out = String::with_capacity(self.line_width);
        out.push_str(&" ".repeat(self.indent));
        out.push_str(&self.style.start);
        out.extend(std::iter::repeat_n(fill, count));
        out.push_str(&self.style.end);
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_line_is_padded() {
        let style = CommentStyle::block("/*", "*", "*/");
        let frame = BlockFrame::new(&style, 0, 20);
        assert_eq!(frame.inner_width(), 14);
        assert_eq!(frame.render_line("hi"), "/* hi             */");
        assert_eq!(frame.render_line("hi").len(), 20);
        assert_eq!(frame.render_border().as_deref(), Some("/******************/"));
    }

    #[test]
    fn test_line_comment_is_not_padded() {
        let style = CommentStyle::line("#", "-");
        let frame = BlockFrame::new(&style, 4, 79);
        assert_eq!(frame.inner_width(), 72);
        assert_eq!(frame.text_offset(), 6);
        assert_eq!(frame.render_line(""), "    # ");
        assert_eq!(frame.render_line("text"), "    # text");

        let border = frame.render_border().unwrap_or_default();
        assert_eq!(border.len(), 79);
        assert_eq!(border.matches('-').count(), 74);
        assert!(border.starts_with("    #-"));
    }

    #[test]
    fn test_no_border_without_fill() {
        let style = CommentStyle::line("#", " ");
        assert_eq!(BlockFrame::new(&style, 0, 79).render_border(), None);
    }

    #[test]
    fn test_too_narrow() {
        let style = CommentStyle::block("/*", "*", "*/");
        assert_eq!(BlockFrame::new(&style, 10, 14).inner_width(), 0);
    }
}
