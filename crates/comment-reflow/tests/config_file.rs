use comment_reflow::{
    CommentStyle, ConfigError, ReflowConfig, ReflowEngine, RopeBuffer, SkipReason,
};
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_config_with_style_override() {
    let file = write_config(
        r#"
line-width = 24
ignore-headers = ["@brief"]

[styles.lua]
start = "--"
fill = "="
"#,
    );

    let config = ReflowConfig::load(file.path()).unwrap();
    assert_eq!(config.line_width, 24);
    assert_eq!(
        config.styles.get("lua"),
        Some(&CommentStyle::line("--", "="))
    );

    let engine = ReflowEngine::new(config).unwrap();
    let mut buffer = RopeBuffer::from_lines(&["-- one two three four five six"], "lua");
    engine.reflow_whole_block(&mut buffer);

    assert_eq!(
        buffer.lines(),
        vec![
            format!("--{}", "=".repeat(22)),
            "-- one two three four".to_string(),
            "-- five six".to_string(),
            format!("--{}", "=".repeat(22)),
        ]
    );

    let mut buffer = RopeBuffer::from_lines(&["-- @brief does things"], "lua");
    assert_eq!(
        engine.reflow_whole_block(&mut buffer).skip_reason(),
        Some(&SkipReason::ExcludedHeader("@brief".to_string()))
    );
}

#[test]
fn test_degenerate_width_fails_fast() {
    let file = write_config("line-width = 5\n");
    let config = ReflowConfig::load(file.path()).unwrap();
    let err = ReflowEngine::new(config).unwrap_err();
    assert!(matches!(err, ConfigError::DegenerateWidth { .. }));
}

#[test]
fn test_wrong_value_type_is_a_parse_error() {
    let file = write_config("line-width = [1, 2]\n");
    assert!(matches!(
        ReflowConfig::load(file.path()),
        Err(ConfigError::Parse(_))
    ));
}
