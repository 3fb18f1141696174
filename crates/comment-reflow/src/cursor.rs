//! Cursor placement after a reflow.
//!
//! Placement is a pure step: it takes the pre-reflow cursor and the wrap metadata of the
//! paragraph the cursor sat in, and returns where the cursor goes in the rewritten block.

use crate::text::char_len;
use crate::wrapper::WrapResult;
use serde::Serialize;

/// A cursor position: 1-indexed row, 0-indexed char column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CursorPosition {
    /// Row (1-indexed).
    pub row: usize,
    /// Column in chars (0-indexed).
    pub column: usize,
}

impl CursorPosition {
    /// Create a new cursor position.
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Where a wrapped paragraph came from and where it is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorAnchor {
    /// Buffer row of the paragraph's first source line.
    pub source_row: usize,
    /// Buffer row the paragraph's first wrapped line is written to.
    pub target_row: usize,
    /// Column where text begins on a rendered line.
    pub text_offset: usize,
    /// Columns at or right of this are past the text area.
    pub threshold: usize,
}

/// Compute the post-reflow position of `original`, which sat in the paragraph described by
/// `anchor` and `wrap`.
///
/// A cursor tracked through the wrap follows its character. Otherwise it keeps its column on
/// its (shifted) row, unless the cursor sat past the text area of the first source line and
/// `wrap.carried_chars` is set. Then it goes to column `carried_chars + 1`: on the line below
/// when the paragraph wrapped, on the same line when it did not.
pub fn place(original: CursorPosition, anchor: &CursorAnchor, wrap: &WrapResult) -> CursorPosition {
    if let Some(tracked) = wrap.cursor {
        return CursorPosition::new(
            anchor.target_row + tracked.line,
            anchor.text_offset + tracked.column,
        );
    }

    let line = original.row.saturating_sub(anchor.source_row);
    let shifted = anchor.target_row + line;
    if wrap.carried_chars == 0 || original.column < anchor.threshold || line != 0 {
        CursorPosition::new(shifted, original.column)
    } else {
        let below = usize::from(wrap.lines.len() > 1);
        CursorPosition::new(shifted + below, wrap.carried_chars + 1)
    }
}

/// Clamp `position` into `lines`, which are written starting at buffer row `first_row`.
pub fn clamp(position: CursorPosition, lines: &[String], first_row: usize) -> CursorPosition {
    let Some(last_index) = lines.len().checked_sub(1) else {
        return position;
    };
    let index = position.row.saturating_sub(first_row).min(last_index);
    CursorPosition::new(
        first_row + index,
        position.column.min(char_len(&lines[index])),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wrapper::TextCursor;

    fn anchor() -> CursorAnchor {
        CursorAnchor {
            source_row: 3,
            target_row: 4,
            text_offset: 3,
            threshold: 17,
        }
    }

    #[test]
    fn test_tracked_cursor_follows_text() {
        let wrap = WrapResult {
            cursor: Some(TextCursor::new(1, 2)),
            ..WrapResult::default()
        };
        assert_eq!(
            place(CursorPosition::new(3, 40), &anchor(), &wrap),
            CursorPosition::new(5, 5)
        );
    }

    #[test]
    fn test_untracked_cursor_stays_without_carry() {
        let wrap = WrapResult::default();
        assert_eq!(
            place(CursorPosition::new(3, 18), &anchor(), &wrap),
            CursorPosition::new(4, 18)
        );
    }

    #[test]
    fn test_untracked_cursor_moves_below_carry() {
        let wrap = WrapResult {
            lines: vec!["aaa bbb".into(), "ccc".into()],
            carried_chars: 7,
            ..WrapResult::default()
        };
        assert_eq!(
            place(CursorPosition::new(3, 18), &anchor(), &wrap),
            CursorPosition::new(5, 8)
        );
        // In the prefix: stays.
        assert_eq!(
            place(CursorPosition::new(3, 1), &anchor(), &wrap),
            CursorPosition::new(4, 1)
        );
        // Not on the first source line: stays.
        assert_eq!(
            place(CursorPosition::new(4, 18), &anchor(), &wrap),
            CursorPosition::new(5, 18)
        );
    }

    #[test]
    fn test_untracked_cursor_on_single_line_goes_to_text_end() {
        let wrap = WrapResult {
            lines: vec!["aaaa".into()],
            carried_chars: 5,
            ..WrapResult::default()
        };
        assert_eq!(
            place(CursorPosition::new(3, 18), &anchor(), &wrap),
            CursorPosition::new(4, 6)
        );
    }

    #[test]
    fn test_clamp() {
        let lines = vec!["/* a */".to_string(), "/* */".to_string()];
        assert_eq!(
            clamp(CursorPosition::new(9, 9), &lines, 2),
            CursorPosition::new(3, 5)
        );
        assert_eq!(
            clamp(CursorPosition::new(1, 3), &lines, 2),
            CursorPosition::new(2, 3)
        );
        assert_eq!(
            clamp(CursorPosition::new(1, 3), &[], 2),
            CursorPosition::new(1, 3)
        );
    }
}
