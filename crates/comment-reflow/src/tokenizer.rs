//! Comment syntax stripping and tokenization.
//!
//! A comment line is turned into the text between its delimiters, and that text is split into
//! alternating word / whitespace-run tokens. Whitespace runs are kept verbatim: their width is
//! significant for label alignment and for text being typed at the end of a line.

use crate::text::{char_len, str_width};
use comment_reflow_lang::CommentStyle;
use regex::Regex;
use std::sync::LazyLock;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+|\s+").expect("token pattern should compile"));

/// A run of non-whitespace (word) or whitespace (space-run) characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Maximal run of non-whitespace characters.
    Word(String),
    /// Maximal run of whitespace characters.
    Space(String),
}

impl Token {
    /// A space-run of `count` spaces.
    pub fn spaces(count: usize) -> Self {
        Token::Space(" ".repeat(count))
    }

    /// Token text.
    pub fn as_str(&self) -> &str {
        match self {
            Token::Word(s) | Token::Space(s) => s,
        }
    }

    /// Returns `true` for a space-run.
    pub fn is_space(&self) -> bool {
        matches!(self, Token::Space(_))
    }

    /// Returns `true` for a word.
    pub fn is_word(&self) -> bool {
        matches!(self, Token::Word(_))
    }

    /// Display width in cells.
    pub fn width(&self) -> usize {
        str_width(self.as_str())
    }

    /// Length in chars.
    pub fn char_len(&self) -> usize {
        char_len(self.as_str())
    }
}

/// A comment line with its delimiters removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrippedLine {
    /// Text between the delimiters.
    pub text: String,
    /// Char column in the raw line where `text` begins.
    pub offset: usize,
    /// The line is a decorative border (only fill glyphs between the delimiters).
    pub border: bool,
}

impl StrippedLine {
    /// Returns `true` if the text holds no word.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Map a raw-line cursor column to a column in `text`.
    ///
    /// Returns `None` when the column sits in the indentation, the start delimiter or past
    /// the end of the text (e.g. on a closing delimiter).
    pub fn text_column(&self, column: usize) -> Option<usize> {
        let relative = column.checked_sub(self.offset)?;
        (relative <= char_len(&self.text)).then_some(relative)
    }
}

/// Returns `true` if `raw` is a comment line: after leading whitespace it begins with
/// `style.start`.
pub fn is_comment_line(raw: &str, style: &CommentStyle) -> bool {
    !style.start.is_empty() && raw.trim_start().starts_with(style.start.as_str())
}

/// Strip comment syntax from `raw`, keeping track of where the text begins.
///
/// Removes leading indentation, one start delimiter, one trailing end delimiter (when the
/// style has one), the run of fill glyphs right after the start delimiter and at most one
/// separator space. All other whitespace is preserved, trailing whitespace included.
pub fn strip_line(raw: &str, style: &CommentStyle) -> StrippedLine {
    let body = raw.trim_start();
    let mut offset = char_len(&raw[..raw.len() - body.len()]);
    let mut rest = body;

    if let Some(after) = rest.strip_prefix(style.start.as_str()) {
        rest = after;
        offset += style.start_len();
    }
    if style.has_end()
        && let Some(before) = rest.trim_end().strip_suffix(style.end.as_str())
    {
        rest = before;
    }

    let mut border = false;
    if let Some(fill) = style.fill_char() {
        let run = rest.chars().take_while(|&ch| ch == fill).count();
        if run > 0 {
            rest = &rest[run * fill.len_utf8()..];
            offset += run;
            border = rest.trim().is_empty();
        }
    }

    if let Some(after) = rest.strip_prefix(' ') {
        rest = after;
        offset += 1;
    }

    StrippedLine {
        text: rest.to_string(),
        offset,
        border,
    }
}

/// Strip comment syntax from `raw`, returning only the text.
pub fn strip_delimiters(raw: &str, style: &CommentStyle) -> String {
    strip_line(raw, style).text
}

/// Split text into alternating word and space-run tokens.
///
/// Concatenating the tokens reproduces `text` exactly.
pub fn tokenize(text: &str) -> Vec<Token> {
    TOKEN_RE
        .find_iter(text)
        .map(|m| {
            let s = m.as_str().to_string();
            if s.starts_with(char::is_whitespace) {
                Token::Space(s)
            } else {
                Token::Word(s)
            }
        })
        .collect()
}

/// Returns `true` if the token list holds no word.
pub fn is_blank(tokens: &[Token]) -> bool {
    !tokens.iter().any(Token::is_word)
}
