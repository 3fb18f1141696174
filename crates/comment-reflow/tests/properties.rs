use comment_reflow::{
    BufferAdapter, CommentStyle, ReflowConfig, ReflowEngine, RopeBuffer, strip_delimiters,
};
use proptest::prelude::*;

/// One comment line per entry; an empty entry is a blank comment line.
fn block_strategy() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(prop::collection::vec("[a-z]{1,8}[.:]?", 0..7), 1..8)
}

fn render_source(block: &[Vec<String>], block_style: bool) -> Vec<String> {
    block
        .iter()
        .map(|words| match (block_style, words.is_empty()) {
            (true, true) => "/* */".to_string(),
            (true, false) => format!("/* {} */", words.join(" ")),
            (false, true) => "#".to_string(),
            (false, false) => format!("# {}", words.join(" ")),
        })
        .collect()
}

fn language(block_style: bool) -> &'static str {
    if block_style { "c" } else { "python" }
}

fn style(block_style: bool) -> CommentStyle {
    if block_style {
        CommentStyle::block("/*", "*", "*/")
    } else {
        CommentStyle::line("#", "-")
    }
}

/// Words of each paragraph, skipping the border lines at both ends.
fn paragraph_words(lines: &[String], style: &CommentStyle, bordered: bool) -> Vec<Vec<String>> {
    let body = if bordered {
        &lines[1..lines.len() - 1]
    } else {
        lines
    };
    let mut paragraphs = vec![Vec::new()];
    for line in body {
        let text = strip_delimiters(line, style);
        if text.trim().is_empty() {
            paragraphs.push(Vec::new());
        } else if let Some(current) = paragraphs.last_mut() {
            current.extend(text.split_whitespace().map(str::to_string));
        }
    }
    paragraphs
}

fn engine(line_width: usize) -> ReflowEngine {
    ReflowEngine::new(ReflowConfig::default().with_line_width(line_width)).unwrap()
}

proptest! {
    #[test]
    fn prop_words_and_paragraphs_are_preserved(
        block in block_strategy(),
        line_width in 30usize..90,
        block_style in any::<bool>(),
    ) {
        let source = render_source(&block, block_style);
        let mut buffer = RopeBuffer::from_lines(&source, language(block_style));

        let outcome = engine(line_width).reflow_whole_block(&mut buffer);
        prop_assert!(outcome.is_applied());

        let style = style(block_style);
        let before = paragraph_words(&source, &style, false);
        let after = paragraph_words(&buffer.lines(), &style, true);
        prop_assert_eq!(before, after);
    }

    #[test]
    fn prop_lines_respect_width(
        block in block_strategy(),
        line_width in 30usize..90,
        block_style in any::<bool>(),
    ) {
        let source = render_source(&block, block_style);
        let mut buffer = RopeBuffer::from_lines(&source, language(block_style));

        engine(line_width).reflow_whole_block(&mut buffer);

        for line in buffer.lines() {
            let width = line.chars().count();
            if block_style {
                prop_assert_eq!(width, line_width);
            } else {
                prop_assert!(width <= line_width);
            }
        }
    }

    #[test]
    fn prop_reflow_is_idempotent(
        block in block_strategy(),
        line_width in 30usize..90,
        block_style in any::<bool>(),
    ) {
        let source = render_source(&block, block_style);
        let mut buffer = RopeBuffer::from_lines(&source, language(block_style));
        let engine = engine(line_width);

        engine.reflow_whole_block(&mut buffer);
        let once = buffer.lines();
        let outcome = engine.reflow_whole_block(&mut buffer);

        prop_assert!(!outcome.is_changed());
        prop_assert_eq!(once, buffer.lines());
    }

    #[test]
    fn prop_cursor_stays_valid(
        block in block_strategy(),
        line_width in 30usize..90,
        block_style in any::<bool>(),
        row_seed in any::<prop::sample::Index>(),
        column in 0usize..100,
        from_cursor in any::<bool>(),
    ) {
        let source = render_source(&block, block_style);
        let row = row_seed.index(source.len()) + 1;
        let mut buffer = RopeBuffer::from_lines(&source, language(block_style))
            .with_cursor(row, column);

        let engine = engine(line_width);
        let outcome = if from_cursor {
            engine.reflow_from_cursor(&mut buffer)
        } else {
            engine.reflow_whole_block(&mut buffer)
        };

        if let Some(cursor) = outcome.cursor() {
            prop_assert!(cursor.row >= 1 && cursor.row <= buffer.line_count());
            let line = buffer.line(cursor.row).unwrap_or_default();
            prop_assert!(cursor.column <= line.chars().count());
        }
    }
}
