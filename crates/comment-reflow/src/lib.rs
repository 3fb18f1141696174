#![warn(missing_docs)]
//! Comment Reflow - Headless Comment-Block Reflow Engine
//!
//! # Overview
//!
//! `comment-reflow` rewraps a block of comment lines in a host buffer to a fixed column width,
//! redraws its top/bottom borders and keeps the cursor where the user expects it, so typing
//! at the end of a comment line feels like ordinary word-wrap. It does no rendering and no
//! key handling: the host implements [`BufferAdapter`] and decides when to call the engine.
//!
//! # Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  ReflowEngine (create / block / paragraph)  │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Block Locator (block range, headers)       │  ← Which rows
//! ├─────────────────────────────────────────────┤
//! │  Tokenizer (strip delimiters, tokens)       │  ← Text
//! ├─────────────────────────────────────────────┤
//! │  Paragraph Wrapper (greedy, push-down)      │  ← Layout
//! ├─────────────────────────────────────────────┤
//! │  Block Renderer + Cursor Tracker            │  ← Output
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use comment_reflow::{BufferAdapter, CursorPosition, ReflowConfig, ReflowEngine, RopeBuffer};
//!
//! let engine = ReflowEngine::new(ReflowConfig::default().with_line_width(20)).unwrap();
//! let mut buffer = RopeBuffer::from_lines(&["/* one two three four five */"], "c");
//!
//! let outcome = engine.reflow_whole_block(&mut buffer);
//! assert!(outcome.is_changed());
//! assert_eq!(
//!     buffer.lines(),
//!     vec![
//!         "/******************/",
//!         "/* one two three  */",
//!         "/* four five      */",
//!         "/******************/",
//!     ]
//! );
//! assert_eq!(buffer.cursor(), CursorPosition::new(2, 0));
//! ```
//!
//! # Module Description
//!
//! - [`tokenizer`] - delimiter stripping and word / space-run tokens
//! - [`locator`] - comment block boundaries and header exclusion
//! - [`wrapper`] - the paragraph wrapping algorithm (pure)
//! - [`renderer`] - comment lines and borders
//! - [`cursor`] - post-reflow cursor placement (pure)
//! - [`engine`] - the three public operations
//! - [`buffer`] - the host buffer interface and a rope-backed implementation
//! - [`config`] - TOML configuration
//!
//! Comment styles live in the `comment-reflow-lang` crate and are re-exported here.

pub mod buffer;
pub mod config;
pub mod cursor;
pub mod engine;
pub mod locator;
pub mod renderer;
mod text;
pub mod tokenizer;
pub mod wrapper;

pub use buffer::{BufferAdapter, RopeBuffer};
pub use comment_reflow_lang::{CommentStyle, StyleRegistry};
pub use config::{ConfigError, DEFAULT_IGNORE_HEADERS, DEFAULT_LINE_WIDTH, ReflowConfig};
pub use cursor::CursorPosition;
pub use engine::{ReflowEngine, ReflowOutcome, SkipReason};
pub use locator::{Block, locate};
pub use renderer::BlockFrame;
pub use tokenizer::{Token, is_comment_line, strip_delimiters, tokenize};
pub use wrapper::{TextCursor, WrapOptions, WrapResult, paragraphs, wrap};
