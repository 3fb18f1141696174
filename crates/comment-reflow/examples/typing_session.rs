use comment_reflow::{BufferAdapter, ReflowConfig, ReflowEngine, RopeBuffer};

/// Insert `ch` at the cursor and advance it, the way a host editor would.
fn type_char(buffer: &mut RopeBuffer, ch: char) {
    let cursor = buffer.cursor();
    let line = buffer.line(cursor.row).unwrap_or_default();
    let mut chars: Vec<char> = line.chars().collect();
    let column = cursor.column.min(chars.len());
    chars.insert(column, ch);
    buffer.set_line(cursor.row, &chars.into_iter().collect::<String>());
    let mut cursor = cursor;
    cursor.column = column + 1;
    buffer.set_cursor(cursor);
}

fn main() {
    let engine = ReflowEngine::new(ReflowConfig::default().with_line_width(30)).unwrap();
    let mut buffer = RopeBuffer::new("", "python");

    engine.create_block(&mut buffer);
    for ch in "the quick brown fox jumps over the lazy dog".chars() {
        type_char(&mut buffer, ch);
        engine.reflow_from_cursor(&mut buffer);
    }

    for line in buffer.lines() {
        println!("{line}");
    }
    let border = format!("#{}", "-".repeat(29));
    assert_eq!(
        buffer.lines(),
        vec![
            border.clone(),
            "# the quick brown fox jumps".to_string(),
            "# over the lazy dog".to_string(),
            border,
        ]
    );
}
