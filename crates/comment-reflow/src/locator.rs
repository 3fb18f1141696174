//! Comment block location.

use crate::buffer::BufferAdapter;
use crate::engine::SkipReason;
use crate::text::leading_spaces;
use crate::tokenizer::{is_comment_line, strip_line};
use comment_reflow_lang::CommentStyle;

/// A maximal run of consecutive comment lines (1-indexed, inclusive rows).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// First row of the block.
    pub start_row: usize,
    /// Last row of the block.
    pub end_row: usize,
    /// Leading spaces on the first row.
    pub indent: usize,
}

impl Block {
    /// Number of rows in the block.
    pub fn len(&self) -> usize {
        self.end_row - self.start_row + 1
    }

    /// Always `false`: a block holds at least one row.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns `true` if `row` lies in the block.
    pub fn contains(&self, row: usize) -> bool {
        (self.start_row..=self.end_row).contains(&row)
    }
}

/// Find the comment block containing `row`.
///
/// Returns `None` if `row` is not a comment line or if the block's first text line starts with
/// one of `ignore_headers`.
pub fn locate<B: BufferAdapter + ?Sized>(
    buffer: &B,
    row: usize,
    style: &CommentStyle,
    ignore_headers: &[String],
) -> Option<Block> {
    find_block(buffer, row, style, ignore_headers).ok()
}

pub(crate) fn find_block<B: BufferAdapter + ?Sized>(
    buffer: &B,
    row: usize,
    style: &CommentStyle,
    ignore_headers: &[String],
) -> Result<Block, SkipReason> {
    let is_comment = |row: usize| {
        buffer
            .line(row)
            .is_some_and(|line| is_comment_line(&line, style) && !is_shebang(row, &line))
    };
    if row == 0 || !is_comment(row) {
        return Err(SkipReason::NotAComment);
    }

    let mut start_row = row;
    while start_row > 1 && is_comment(start_row - 1) {
        start_row -= 1;
    }
    let mut end_row = row;
    while is_comment(end_row + 1) {
        end_row += 1;
    }

    let first = buffer.line(start_row).unwrap_or_default();
    let block = Block {
        start_row,
        end_row,
        indent: leading_spaces(&first),
    };

    // Headers are read from the first line that is not a border.
    let header_text = (start_row..=end_row)
        .filter_map(|row| buffer.line(row))
        .map(|line| strip_line(&line, style))
        .find(|stripped| !stripped.border)
        .map(|stripped| stripped.text);
    if let Some(text) = header_text {
        let text = text.trim_start();
        if let Some(header) = ignore_headers.iter().find(|h| text.starts_with(h.as_str())) {
            return Err(SkipReason::ExcludedHeader(header.clone()));
        }
    }

    Ok(block)
}

/// A `#!` interpreter line on the first row is never part of a comment block.
fn is_shebang(row: usize, line: &str) -> bool {
    row == 1 && line.starts_with("#!")
}
