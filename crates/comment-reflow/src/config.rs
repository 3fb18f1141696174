//! Engine configuration.
//!
//! Loaded from TOML:
//!
//! ```toml
//! line-width = 79
//! ignore-headers = ["PROC", "STRUCT", "MOD"]
//!
//! [styles.lua]
//! start = "--"
//! fill = "-"
//! ```
//!
//! Entries under `styles` are merged over the built-in style table.

use comment_reflow_lang::{CommentStyle, StyleRegistry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Default maximum rendered line width.
pub const DEFAULT_LINE_WIDTH: usize = 79;

/// Header words that mark structured documentation blocks left untouched by default.
pub const DEFAULT_IGNORE_HEADERS: [&str; 3] = ["PROC", "STRUCT", "MOD"];

/// Errors produced while loading or validating a [`ReflowConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file at {path}: {source}")]
    /// The config file could not be read.
    Io {
        /// Path of the config file.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    /// The config file is not valid TOML for [`ReflowConfig`].
    Parse(#[from] toml::de::Error),

    #[error(
        "line width {line_width} is too small for '{language}' comments (needs at least {required})"
    )]
    /// The line width leaves no room for text between a style's delimiters.
    DegenerateWidth {
        /// Language whose style does not fit.
        language: String,
        /// Configured line width.
        line_width: usize,
        /// Smallest width that fits one character of text.
        required: usize,
    },

    #[error("style for '{language}' has an empty start delimiter")]
    /// A style has no start delimiter.
    EmptyStart {
        /// Language of the offending style.
        language: String,
    },

    #[error("style for '{language}' has fill '{fill}'; expected a single character")]
    /// A style's fill is not a single glyph.
    InvalidFill {
        /// Language of the offending style.
        language: String,
        /// The configured fill.
        fill: String,
    },

    #[error("ignore-headers contains an empty entry")]
    /// An empty header would exclude every block.
    EmptyHeader,
}

/// Engine configuration: line width, excluded headers and style overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ReflowConfig {
    /// Maximum rendered line width.
    pub line_width: usize,
    /// Blocks whose first text line starts with one of these are never reflowed.
    pub ignore_headers: Vec<String>,
    /// Per-language style overrides, merged over the built-in table.
    pub styles: BTreeMap<String, CommentStyle>,
}

impl Default for ReflowConfig {
    fn default() -> Self {
        Self {
            line_width: DEFAULT_LINE_WIDTH,
            ignore_headers: DEFAULT_IGNORE_HEADERS.iter().map(|s| s.to_string()).collect(),
            styles: BTreeMap::new(),
        }
    }
}

impl ReflowConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Set the line width (builder style).
    pub fn with_line_width(mut self, line_width: usize) -> Self {
        self.line_width = line_width;
        self
    }

    /// Set the excluded headers (builder style).
    pub fn with_ignore_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_headers = headers.into_iter().map(Into::into).collect();
        self
    }

    /// Add a style override (builder style).
    pub fn with_style(mut self, language: impl Into<String>, style: CommentStyle) -> Self {
        self.styles.insert(language.into(), style);
        self
    }

    /// The built-in styles with this config's overrides applied.
    pub fn registry(&self) -> StyleRegistry {
        let mut registry = StyleRegistry::builtin();
        for (language, style) in &self.styles {
            if registry.insert(language.clone(), style.clone()).is_some() {
                log::warn!("style override replaces built-in style for '{language}'");
            }
        }
        registry
    }

    /// Check that every style can render at least one character of text at the configured
    /// width.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ignore_headers.iter().any(String::is_empty) {
            return Err(ConfigError::EmptyHeader);
        }
        for (language, style) in self.registry().iter() {
            validate_style(language, style, self.line_width)?;
        }
        Ok(())
    }
}

fn validate_style(
    language: &str,
    style: &CommentStyle,
    line_width: usize,
) -> Result<(), ConfigError> {
    if style.start.is_empty() {
        return Err(ConfigError::EmptyStart {
            language: language.to_string(),
        });
    }
    if style.fill.chars().count() != 1 {
        return Err(ConfigError::InvalidFill {
            language: language.to_string(),
            fill: style.fill.clone(),
        });
    }
    let required = style.start_len() + style.end_len() + 3;
    if line_width < required {
        return Err(ConfigError::DegenerateWidth {
            language: language.to_string(),
            line_width,
            required,
        });
    }
    Ok(())
}
