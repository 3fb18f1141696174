//! Paragraph wrapping.
//!
//! [`wrap`] is a pure function from a paragraph (one token list per source line) to wrapped
//! text lines plus the metadata cursor placement needs. Wrapping is greedy and push-down only:
//! overflow from a line is carried to the start of the following line (or to a new line), and
//! words are never pulled up from a following line. An already wrapped paragraph is therefore
//! left as it is.
//!
//! Rules, in order of precedence:
//! - space-runs always attach to the line under construction;
//! - a word is always placed on a line that holds no word yet, so a word wider than the text
//!   area gets a line of its own instead of stalling the loop;
//! - any other word is placed only if the line stays within the text area.
//!
//! A line starting with a space-run, or with a word ending in `:`, aligns its continuation
//! lines under the label body. A carried word ending a sentence is followed by two spaces.

use crate::text::{char_len, str_width};
use crate::tokenizer::{Token, is_blank};
use std::collections::VecDeque;
use std::ops::Range;

const SENTENCE_ENDERS: [char; 3] = ['?', '.', '!'];

/// A cursor location relative to the text area of a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextCursor {
    /// Line index within the paragraph.
    pub line: usize,
    /// Char column within the line's text.
    pub column: usize,
}

impl TextCursor {
    /// Create a new text cursor.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Inputs to [`wrap`] besides the paragraph itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapOptions {
    /// Width of the text area in cells.
    pub inner_width: usize,
    /// Columns before the separator space in a rendered line (indent + start delimiter).
    pub prefix_width: usize,
    /// Cursor position on a source line, if the cursor sits in this paragraph's text.
    pub cursor: Option<TextCursor>,
    /// The paragraph comes from a single-line block that is growing into a framed block.
    pub new_block: bool,
}

impl WrapOptions {
    /// Options for a text area of `inner_width` cells.
    pub fn new(inner_width: usize) -> Self {
        Self {
            inner_width,
            prefix_width: 0,
            cursor: None,
            new_block: false,
        }
    }

    /// Set the rendered prefix width.
    pub fn with_prefix_width(mut self, prefix_width: usize) -> Self {
        self.prefix_width = prefix_width;
        self
    }

    /// Track a cursor through the wrap.
    pub fn with_cursor(mut self, cursor: Option<TextCursor>) -> Self {
        self.cursor = cursor;
        self
    }

    /// Mark the paragraph as coming from a brand-new block.
    pub fn with_new_block(mut self, new_block: bool) -> Self {
        self.new_block = new_block;
        self
    }
}

/// Output of [`wrap`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WrapResult {
    /// Wrapped text lines, without comment delimiters.
    pub lines: Vec<String>,
    /// Rendered column right before where the text carried off the first source line ends on
    /// its new line; `0` if nothing was carried off the first line.
    pub carried_chars: usize,
    /// The last produced line reached the width of the text area.
    pub used_full_width: bool,
    /// Where the tracked cursor ended up.
    pub cursor: Option<TextCursor>,
}

#[derive(Debug, Clone)]
struct Piece {
    token: Token,
    /// Cursor offset (in chars) within this token.
    cursor: Option<usize>,
}

impl Piece {
    fn new(token: Token) -> Self {
        Self {
            token,
            cursor: None,
        }
    }

    fn spaces(count: usize) -> Self {
        Self::new(Token::spaces(count))
    }

    /// An empty space-run holding the cursor, left where whitespace moved off a line.
    fn cursor_mark() -> Self {
        Self {
            token: Token::Space(String::new()),
            cursor: Some(0),
        }
    }

    fn is_space(&self) -> bool {
        self.token.is_space()
    }

    fn is_cursor_mark(&self) -> bool {
        self.is_space() && self.token.char_len() == 0 && self.cursor.is_some()
    }
}

/// Split a block's text lines into paragraphs.
///
/// Consecutive non-blank lines form one paragraph; every blank line is a paragraph of its own.
pub fn paragraphs(lines: &[Vec<Token>]) -> Vec<Range<usize>> {
    let mut out = Vec::new();
    let mut start = 0;
    for (index, line) in lines.iter().enumerate() {
        if is_blank(line) {
            if start < index {
                out.push(start..index);
            }
            out.push(index..index + 1);
            start = index + 1;
        }
    }
    if start < lines.len() {
        out.push(start..lines.len());
    }
    out
}

/// Wrap one paragraph to `options.inner_width` cells.
pub fn wrap(paragraph: &[Vec<Token>], options: &WrapOptions) -> WrapResult {
    let inner_width = options.inner_width.max(1);
    let mut queue: VecDeque<Vec<Piece>> = paragraph
        .iter()
        .enumerate()
        .map(|(index, tokens)| {
            let column = options
                .cursor
                .filter(|cursor| cursor.line == index)
                .map(|cursor| cursor.column);
            into_pieces(tokens, column)
        })
        .collect();

    let mut result = WrapResult::default();
    let mut first = true;
    while let Some(line) = queue.pop_front() {
        if !line.iter().any(|piece| piece.token.is_word()) {
            let (text, cursor) = flush(&line, inner_width);
            push_line(&mut result, text, cursor);
            first = false;
            continue;
        }

        let indent = label_indent(&line, inner_width);
        let (kept, leftover) = fill_line(line, inner_width);
        let (text, cursor) = flush(&kept, inner_width);
        push_line(&mut result, text, cursor);

        if !leftover.is_empty() {
            let landed = carry(leftover, &mut queue, indent);
            if first {
                result.carried_chars = options.prefix_width + landed;
            }
        }
        first = false;
    }

    if result.carried_chars == 0
        && options.new_block
        && let Some(first_line) = result.lines.first()
    {
        result.carried_chars = options.prefix_width + str_width(first_line);
    }
    result.used_full_width = result
        .lines
        .last()
        .is_some_and(|line| str_width(line) >= inner_width);
    result
}

fn into_pieces(tokens: &[Token], cursor: Option<usize>) -> Vec<Piece> {
    let mut pieces: Vec<Piece> = tokens.iter().cloned().map(Piece::new).collect();
    let Some(column) = cursor else {
        return pieces;
    };

    let mut start = 0;
    for piece in pieces.iter_mut() {
        let len = piece.token.char_len();
        if column < start + len {
            piece.cursor = Some(column - start);
            return pieces;
        }
        start += len;
    }
    match pieces.last_mut() {
        Some(last) => last.cursor = Some(last.token.char_len()),
        None => pieces.push(Piece::cursor_mark()),
    }
    pieces
}

/// Width of the label a line's continuation lines align under, or `0`.
fn label_indent(line: &[Piece], inner_width: usize) -> usize {
    let width = match line {
        [first, ..] if first.is_space() => first.token.width(),
        [first, rest @ ..] if first.token.as_str().ends_with(':') => {
            first.token.width()
                + rest
                    .first()
                    .filter(|piece| piece.is_space())
                    .map_or(0, |piece| piece.token.width())
        }
        _ => 0,
    };
    // A label that fills the text area on its own gets no alignment.
    if width >= inner_width { 0 } else { width }
}

/// Take pieces off the front of `line` while they fit; returns `(kept, leftover)`.
fn fill_line(line: Vec<Piece>, width: usize) -> (Vec<Piece>, Vec<Piece>) {
    let mut pending: VecDeque<Piece> = line.into();
    let mut kept: Vec<Piece> = Vec::new();
    let mut used = 0;
    let mut has_word = false;

    while let Some(mut piece) = pending.pop_front() {
        let piece_width = piece.token.width();
        if piece.token.is_word() {
            if !has_word {
                if used + piece_width > width && !kept.is_empty() {
                    // Only alignment padding so far: drop it and start the word at the margin.
                    if piece.cursor.is_none() && kept.iter().any(|p| p.cursor.is_some()) {
                        piece.cursor = Some(0);
                    }
                    kept.clear();
                    used = 0;
                }
                has_word = true;
            } else if used + piece_width > width {
                pending.push_front(piece);
                break;
            }
        }
        used += piece_width;
        kept.push(piece);
    }

    // Whitespace typed past the text area goes down with the cursor instead of being cut.
    if let Some(start) = overflowing_cursor_space(&kept, width) {
        kept.truncate(start);
        pending.push_front(Piece::cursor_mark());
    }

    (kept, pending.into())
}

/// Index of the whitespace after the last word of `kept` if the cursor sits in it and the
/// whitespace before the cursor does not fit in `width`.
fn overflowing_cursor_space(kept: &[Piece], width: usize) -> Option<usize> {
    let start = kept.iter().rposition(|piece| piece.token.is_word())? + 1;
    let text: usize = kept[..start].iter().map(|piece| piece.token.width()).sum();

    let mut held = 0;
    for piece in &kept[start..] {
        if let Some(offset) = piece.cursor {
            held += offset;
            return (held > 0 && text + held > width).then_some(start);
        }
        held += piece.token.char_len();
    }
    None
}

/// Concatenate pieces into a line, dropping trailing whitespace except what lies before the
/// cursor and still fits in `width`.
fn flush(pieces: &[Piece], width: usize) -> (String, Option<usize>) {
    let mut text = String::new();
    let mut cursor = None;
    let mut column = 0;
    for piece in pieces {
        if let Some(offset) = piece.cursor {
            cursor = Some(column + offset);
        }
        text.push_str(piece.token.as_str());
        column += piece.token.char_len();
    }

    let trimmed = text.trim_end();
    let room = width.saturating_sub(str_width(trimmed));
    let trimmed = char_len(trimmed);
    let keep = match cursor {
        Some(at) if at > trimmed => trimmed + (at - trimmed).min(room),
        _ => trimmed,
    };
    (text.chars().take(keep).collect(), cursor)
}

fn push_line(result: &mut WrapResult, text: String, cursor: Option<usize>) {
    if let Some(column) = cursor {
        result.cursor = Some(TextCursor::new(result.lines.len(), column));
    }
    result.lines.push(text);
}

/// Drop trailing space-runs, keeping the whitespace that lies before the cursor.
fn trim_trailing_space(pieces: &mut Vec<Piece>) {
    let start = pieces
        .iter()
        .rposition(|piece| piece.token.is_word())
        .map_or(0, |index| index + 1);

    let mut region = String::new();
    let mut held = None;
    for piece in &pieces[start..] {
        if let Some(offset) = piece.cursor {
            held = Some(char_len(&region) + offset);
        }
        region.push_str(piece.token.as_str());
    }
    pieces.truncate(start);

    match held {
        Some(0) => match pieces.last_mut() {
            Some(last) => last.cursor = Some(last.token.char_len()),
            None => pieces.push(Piece::cursor_mark()),
        },
        Some(count) => pieces.push(Piece {
            token: Token::Space(region.chars().take(count).collect()),
            cursor: Some(count),
        }),
        None => {}
    }
}

/// Move `leftover` onto the next line in `queue`, or onto a new line aligned to
/// `label_indent` when there is no next line or the next line is blank.
///
/// Returns the width the carried text occupies on its new line, alignment included.
fn carry(mut leftover: Vec<Piece>, queue: &mut VecDeque<Vec<Piece>>, label_indent: usize) -> usize {
    trim_trailing_space(&mut leftover);

    let ends_sentence = leftover
        .iter()
        .rev()
        .find(|piece| piece.token.is_word())
        .is_some_and(|piece| piece.token.as_str().ends_with(SENTENCE_ENDERS));
    let gap = if ends_sentence { 2 } else { 1 };

    // Whitespace held by the cursor is widened to the sentence gap; the cursor follows.
    if let Some(last) = leftover
        .last_mut()
        .filter(|piece| piece.is_space() && !piece.is_cursor_mark())
        && last.token.char_len() < gap
    {
        last.token = Token::spaces(gap);
        last.cursor = Some(gap);
    }
    let carried_width: usize = leftover.iter().map(|piece| piece.token.width()).sum();

    match queue.front_mut() {
        Some(next) if next.iter().any(|piece| piece.token.is_word()) => {
            if !leftover
                .last()
                .is_some_and(|piece| piece.is_space() && !piece.is_cursor_mark())
            {
                leftover.push(Piece::spaces(gap));
            }
            let lead = next
                .first()
                .filter(|piece| piece.is_space())
                .map_or(0, |piece| piece.token.width());
            let tail = next.split_off(usize::from(lead > 0));
            next.extend(leftover);
            next.extend(tail);
            lead + carried_width
        }
        _ => {
            let mut line = Vec::with_capacity(leftover.len() + 1);
            if label_indent > 0 {
                line.push(Piece::spaces(label_indent));
            }
            line.extend(leftover);
            queue.push_front(line);
            label_indent + carried_width
        }
    }
}
