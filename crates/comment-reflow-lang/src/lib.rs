#![warn(missing_docs)]
//! `comment-reflow-lang` - comment style table for `comment-reflow`.
//!
//! This crate stays lightweight and knows nothing about buffers or wrapping. It maps a
//! language identifier (the host's filetype, e.g. `python` or `c`) to the [`CommentStyle`]
//! used to frame comment blocks in that language.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Delimiters used to frame a comment block in a given language.
///
/// - `start` opens every comment line (`#`, `/*`, `;;`).
/// - `fill` is the single glyph repeated to draw the top/bottom border of a block.
/// - `end` closes every comment line; empty for line comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentStyle {
    /// Start delimiter (never empty).
    pub start: String,
    /// Border glyph.
    pub fill: String,
    /// End delimiter (empty for line comments).
    #[serde(default)]
    pub end: String,
}

impl CommentStyle {
    /// Create a style from its three delimiters.
    pub fn new(start: impl Into<String>, fill: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            fill: fill.into(),
            end: end.into(),
        }
    }

    /// Create a line-comment style (no end delimiter).
    pub fn line(start: impl Into<String>, fill: impl Into<String>) -> Self {
        Self::new(start, fill, "")
    }

    /// Create a block-comment style.
    pub fn block(
        start: impl Into<String>,
        fill: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self::new(start, fill, end)
    }

    /// Returns `true` if every comment line must be closed with an end delimiter.
    pub fn has_end(&self) -> bool {
        !self.end.is_empty()
    }

    /// The border glyph, if the style defines a visible one.
    pub fn fill_char(&self) -> Option<char> {
        let mut chars = self.fill.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) if !ch.is_whitespace() => Some(ch),
            _ => None,
        }
    }

    /// Returns `true` if blocks in this style get decorative top/bottom borders.
    pub fn has_border(&self) -> bool {
        self.fill_char().is_some()
    }

    /// Length of the start delimiter in chars.
    pub fn start_len(&self) -> usize {
        self.start.chars().count()
    }

    /// Length of the end delimiter in chars.
    pub fn end_len(&self) -> usize {
        self.end.chars().count()
    }
}

/// Language id -> [`CommentStyle`] table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRegistry {
    styles: BTreeMap<String, CommentStyle>,
}

impl StyleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            styles: BTreeMap::new(),
        }
    }

    /// Create a registry holding the built-in styles.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.insert("python", CommentStyle::line("#", "-"));
        registry.insert("sh", CommentStyle::line("#", "#"));
        registry.insert("toml", CommentStyle::line("#", "-"));
        registry.insert("c", CommentStyle::block("/*", "*", "*/"));
        registry.insert("cpp", CommentStyle::block("/*", "*", "*/"));
        registry.insert("scheme", CommentStyle::block(";;", "-", ";;"));
        registry.insert("vim", CommentStyle::line("\"", "-"));
        registry.insert("rust", CommentStyle::line("//", "-"));
        registry
    }

    /// Register (or replace) the style for `language`, returning the previous one.
    pub fn insert(
        &mut self,
        language: impl Into<String>,
        style: CommentStyle,
    ) -> Option<CommentStyle> {
        self.styles.insert(language.into(), style)
    }

    /// Look up the style for `language`.
    ///
    /// `None` means the language is unknown; callers treat that as "do nothing".
    pub fn lookup(&self, language: &str) -> Option<&CommentStyle> {
        self.styles.get(language)
    }

    /// Iterate over `(language, style)` pairs in language order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CommentStyle)> {
        self.styles.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of registered languages.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Returns `true` if no language is registered.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let registry = StyleRegistry::builtin();
        assert_eq!(
            registry.lookup("c"),
            Some(&CommentStyle::block("/*", "*", "*/"))
        );
        assert_eq!(registry.lookup("python"), Some(&CommentStyle::line("#", "-")));
        assert_eq!(registry.lookup("cobol"), None);
    }

    #[test]
    fn test_insert_replaces() {
        let mut registry = StyleRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.insert("x", CommentStyle::line("#", "-")), None);
        let previous = registry.insert("x", CommentStyle::line("#", "="));
        assert_eq!(previous, Some(CommentStyle::line("#", "-")));
        assert_eq!(registry.lookup("x").map(|s| s.fill.as_str()), Some("="));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_fill_char() {
        assert_eq!(CommentStyle::line("#", "-").fill_char(), Some('-'));
        assert_eq!(CommentStyle::line("#", " ").fill_char(), None);
        assert_eq!(CommentStyle::line("#", "").fill_char(), None);
        assert_eq!(CommentStyle::line("#", "-=").fill_char(), None);
        assert!(CommentStyle::block("/*", "*", "*/").has_end());
        assert!(!CommentStyle::line("#", "-").has_end());
    }

    #[test]
    fn test_deserialize_without_end() {
        let style: CommentStyle = toml::from_str("start = \"--\"\nfill = \"=\"\n").unwrap();
        assert_eq!(style, CommentStyle::line("--", "="));
        assert_eq!(style.start_len(), 2);
        assert_eq!(style.end_len(), 0);
    }
}
