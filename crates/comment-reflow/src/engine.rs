//! The reflow engine: the three public operations on a host buffer.
//!
//! Every operation either applies a complete rewrite of one line range in a single
//! [`BufferAdapter::replace_lines`] call, or skips and leaves the buffer untouched. Skips are
//! expected outcomes (unknown language, cursor outside a comment, protected header) and are
//! reported as [`ReflowOutcome::Skipped`], never as errors.

use crate::buffer::BufferAdapter;
use crate::config::{ConfigError, ReflowConfig};
use crate::cursor::{CursorAnchor, CursorPosition, clamp, place};
use crate::locator::find_block;
use crate::renderer::BlockFrame;
use crate::tokenizer::{StrippedLine, Token, strip_line, tokenize};
use crate::wrapper::{TextCursor, WrapOptions, paragraphs, wrap};
use comment_reflow_lang::{CommentStyle, StyleRegistry};

/// Why an operation left the buffer untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No comment style is registered for the buffer's language.
    StyleNotFound(String),
    /// The cursor row is not a comment line.
    NotAComment,
    /// The block starts with a protected header.
    ExcludedHeader(String),
    /// The block holds only border lines.
    EmptyBlock,
    /// The cursor row holds no text to reflow.
    NothingToReflow,
    /// The indentation leaves no room for text at the configured width.
    TooNarrow,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::StyleNotFound(language) => {
                write!(f, "no comment style for language '{}'", language)
            }
            SkipReason::NotAComment => write!(f, "cursor is not on a comment line"),
            SkipReason::ExcludedHeader(header) => {
                write!(f, "block starts with protected header '{}'", header)
            }
            SkipReason::EmptyBlock => write!(f, "block has no text lines"),
            SkipReason::NothingToReflow => write!(f, "no text at the cursor row"),
            SkipReason::TooNarrow => write!(f, "no room for text at this indentation"),
        }
    }
}

/// Result of an engine operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReflowOutcome {
    /// The operation ran; the cursor has been moved to `cursor`.
    Applied {
        /// Cursor position after the operation.
        cursor: CursorPosition,
        /// `false` if the rewritten lines were identical to the old ones (buffer untouched).
        changed: bool,
        /// The last wrapped line reached the width of the text area.
        used_full_width: bool,
    },
    /// The operation did nothing.
    Skipped(SkipReason),
}

impl ReflowOutcome {
    /// Returns `true` if the operation ran.
    pub fn is_applied(&self) -> bool {
        matches!(self, ReflowOutcome::Applied { .. })
    }

    /// Returns `true` if the operation rewrote buffer lines.
    pub fn is_changed(&self) -> bool {
        matches!(self, ReflowOutcome::Applied { changed: true, .. })
    }

    /// The cursor position after an applied operation.
    pub fn cursor(&self) -> Option<CursorPosition> {
        match self {
            ReflowOutcome::Applied { cursor, .. } => Some(*cursor),
            ReflowOutcome::Skipped(_) => None,
        }
    }

    /// The reason a skipped operation did nothing.
    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            ReflowOutcome::Skipped(reason) => Some(reason),
            ReflowOutcome::Applied { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    WholeBlock,
    FromCursor,
}

/// Comment-block reflow engine.
///
/// Holds the validated configuration; all per-invocation state lives on the stack, so one
/// engine can serve any number of buffers.
#[derive(Debug, Clone)]
pub struct ReflowEngine {
    config: ReflowConfig,
    registry: StyleRegistry,
}

impl Default for ReflowEngine {
    fn default() -> Self {
        let config = ReflowConfig::default();
        Self {
            registry: config.registry(),
            config,
        }
    }
}

impl ReflowEngine {
    /// Create an engine, failing fast on a configuration no style can render with.
    pub fn new(config: ReflowConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            registry: config.registry(),
            config,
        })
    }

    /// The engine configuration.
    pub fn config(&self) -> &ReflowConfig {
        &self.config
    }

    /// The style table in use.
    pub fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    /// Insert an empty bordered block at the cursor, indented to the cursor column.
    ///
    /// A blank cursor row is replaced; otherwise the block goes above it. The cursor is put on
    /// the block's text line and the host is asked to enter text-input mode.
    pub fn create_block<B: BufferAdapter + ?Sized>(&self, buffer: &mut B) -> ReflowOutcome {
        self.try_create_block(buffer).unwrap_or_else(skipped)
    }

    /// Re-wrap every paragraph of the block under the cursor.
    pub fn reflow_whole_block<B: BufferAdapter + ?Sized>(&self, buffer: &mut B) -> ReflowOutcome {
        self.try_reflow(buffer, Scope::WholeBlock)
            .unwrap_or_else(skipped)
    }

    /// Re-wrap the block from the cursor row through the next blank line (or the block end).
    ///
    /// Paragraphs above the cursor row are left untouched.
    pub fn reflow_from_cursor<B: BufferAdapter + ?Sized>(&self, buffer: &mut B) -> ReflowOutcome {
        self.try_reflow(buffer, Scope::FromCursor)
            .unwrap_or_else(skipped)
    }

    fn style_for<B: BufferAdapter + ?Sized>(
        &self,
        buffer: &B,
    ) -> Result<&CommentStyle, SkipReason> {
        let language = buffer.language_id();
        self.registry
            .lookup(&language)
            .ok_or(SkipReason::StyleNotFound(language))
    }

    fn try_create_block<B: BufferAdapter + ?Sized>(
        &self,
        buffer: &mut B,
    ) -> Result<ReflowOutcome, SkipReason> {
        let style = self.style_for(&*buffer)?;
        let cursor = buffer.cursor();
        let frame = BlockFrame::new(style, cursor.column, self.config.line_width);
        if frame.inner_width() == 0 {
            return Err(SkipReason::TooNarrow);
        }

        let border = frame.render_border();
        let mut lines = Vec::with_capacity(3);
        lines.extend(border.clone());
        lines.push(frame.render_line(""));
        lines.extend(border.clone());

        let row = cursor.row.clamp(1, buffer.line_count() + 1);
        let blank = buffer
            .line(row)
            .is_some_and(|line| line.trim().is_empty());
        if blank {
            buffer.replace_lines(row..=row, &lines);
        } else {
            buffer.insert_lines(row, &lines);
        }
        log::debug!(
            "created {}-line block at row {} (replaced blank row: {})",
            lines.len(),
            row,
            blank
        );

        let cursor = CursorPosition::new(row + usize::from(border.is_some()), frame.text_offset());
        buffer.set_cursor(cursor);
        buffer.enter_text_input_mode();
        Ok(ReflowOutcome::Applied {
            cursor,
            changed: true,
            used_full_width: false,
        })
    }

    fn try_reflow<B: BufferAdapter + ?Sized>(
        &self,
        buffer: &mut B,
        scope: Scope,
    ) -> Result<ReflowOutcome, SkipReason> {
        let style = self.style_for(&*buffer)?;
        let cursor = buffer.cursor();
        let block = find_block(&*buffer, cursor.row, style, &self.config.ignore_headers)?;
        let frame = BlockFrame::new(style, block.indent, self.config.line_width);
        let inner_width = frame.inner_width();
        if inner_width == 0 {
            return Err(SkipReason::TooNarrow);
        }

        let rows: Vec<String> = (block.start_row..=block.end_row)
            .map(|row| buffer.line(row).unwrap_or_default())
            .collect();
        let stripped: Vec<StrippedLine> = rows.iter().map(|line| strip_line(line, style)).collect();
        let at = |row: usize| &stripped[row - block.start_row];

        let top_border = stripped.first().is_some_and(|line| line.border);
        let bottom_border = block.len() > 1 && stripped.last().is_some_and(|line| line.border);
        let text_start = block.start_row + usize::from(top_border);
        let text_end = block.end_row - usize::from(bottom_border);
        if text_start > text_end {
            return Err(SkipReason::EmptyBlock);
        }

        let (from, to) = match scope {
            Scope::WholeBlock => (text_start, text_end),
            Scope::FromCursor => {
                let from = cursor.row.max(text_start);
                if from > text_end || at(from).is_blank() {
                    return Err(SkipReason::NothingToReflow);
                }
                let to = (from..=text_end)
                    .find(|&row| at(row).is_blank())
                    .map_or(text_end, |row| row - 1);
                (from, to)
            }
        };

        let touches_top = from == text_start;
        let touches_bottom = to == text_end;
        let rewrite_start = if touches_top { block.start_row } else { from };
        let rewrite_end = if touches_bottom { block.end_row } else { to };
        let border = frame.render_border();
        let top = if touches_top { border.clone() } else { None };
        let body_row = rewrite_start + usize::from(top.is_some());

        let source = &stripped[from - block.start_row..=to - block.start_row];
        let tokens: Vec<Vec<Token>> = source.iter().map(|line| tokenize(&line.text)).collect();
        let cursor_line = (from..=to).contains(&cursor.row).then(|| cursor.row - from);
        let text_cursor = cursor_line.and_then(|line| {
            source[line]
                .text_column(cursor.column)
                .map(|column| TextCursor::new(line, column))
        });

        let new_block = block.start_row == block.end_row;
        let mut body = Vec::with_capacity(tokens.len() + 1);
        let mut placed = None;
        let mut used_full_width = false;
        for range in paragraphs(&tokens) {
            let options = WrapOptions::new(inner_width)
                .with_prefix_width(frame.prefix_width())
                .with_new_block(new_block)
                .with_cursor(
                    text_cursor
                        .filter(|tracked| range.contains(&tracked.line))
                        .map(|tracked| TextCursor::new(tracked.line - range.start, tracked.column)),
                );
            let wrapped = wrap(&tokens[range.clone()], &options);
            log::trace!(
                "paragraph rows {}..{} -> {} lines, carried_chars={}",
                from + range.start,
                from + range.end,
                wrapped.lines.len(),
                wrapped.carried_chars
            );

            if cursor_line.is_some_and(|line| range.contains(&line)) {
                let anchor = CursorAnchor {
                    source_row: from + range.start,
                    target_row: body_row + body.len(),
                    text_offset: frame.text_offset(),
                    threshold: frame.text_offset() + inner_width,
                };
                placed = Some(place(cursor, &anchor, &wrapped));
            }

            let border_row = range.len() == 1 && source[range.start].border;
            for line in &wrapped.lines {
                match (&border, border_row) {
                    (Some(border), true) => body.push(border.clone()),
                    _ => body.push(frame.render_line(line)),
                }
            }
            used_full_width = wrapped.used_full_width;
        }

        let mut lines = Vec::with_capacity(body.len() + 2);
        lines.extend(top);
        lines.append(&mut body);
        if touches_bottom {
            lines.extend(border);
        }

        // Cursors on a border (or otherwise outside the wrapped text) stick to the block edge.
        let position = placed.unwrap_or(if cursor.row < from {
            CursorPosition::new(rewrite_start, cursor.column)
        } else {
            CursorPosition::new(rewrite_start + lines.len() - 1, cursor.column)
        });
        let position = clamp(position, &lines, rewrite_start);

        let old = &rows[rewrite_start - block.start_row..=rewrite_end - block.start_row];
        let changed = old != lines.as_slice();
        if changed {
            log::debug!(
                "rewriting rows {}..={} as {} lines",
                rewrite_start,
                rewrite_end,
                lines.len()
            );
            buffer.replace_lines(rewrite_start..=rewrite_end, &lines);
        } else {
            log::debug!("rows {}..={} already wrapped", rewrite_start, rewrite_end);
        }
        buffer.set_cursor(position);

        Ok(ReflowOutcome::Applied {
            cursor: position,
            changed,
            used_full_width,
        })
    }
}

fn skipped(reason: SkipReason) -> ReflowOutcome {
    log::debug!("skipped: {}", reason);
    ReflowOutcome::Skipped(reason)
}
