use unicode_width::UnicodeWidthChar;

/// Display width of a single char (UAX #11); control chars count as one cell.
pub(crate) fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(1)
}

/// Display width of a string in cells.
pub(crate) fn str_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Length of a string in chars (the unit cursor columns are counted in).
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Number of leading `' '` characters.
pub(crate) fn leading_spaces(s: &str) -> usize {
    s.chars().take_while(|&ch| ch == ' ').count()
}

/// Right-pad `text` with spaces up to `width` cells. Wider text is returned unchanged.
pub(crate) fn pad_to_width(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(width.max(text.len()));
    out.push_str(text);
    for _ in str_width(text)..width {
        out.push(' ');
    }
    out
}

/// Normalize `\r\n` line endings to `\n`.
pub(crate) fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_str_width() {
        assert_eq!(str_width("hello"), 5);
        assert_eq!(str_width("你好"), 4);
        assert_eq!(char_len("你好"), 2);
    }

    #[test]
    fn test_pad_to_width() {
        assert_eq!(pad_to_width("ab", 5), "ab   ");
        assert_eq!(pad_to_width("abcdef", 3), "abcdef");
        assert_eq!(pad_to_width("", 0), "");
    }

    #[test]
    fn test_leading_spaces() {
        assert_eq!(leading_spaces("    # x"), 4);
        assert_eq!(leading_spaces("\t# x"), 0);
        assert_eq!(leading_spaces(""), 0);
    }
}
