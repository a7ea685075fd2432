//! Tests for CLI output formatting helpers

use linkweave::cli::output::{colors, format_duration};

#[test]
fn test_format_duration_ranges() {
    assert_eq!(format_duration(0.25), "250ms");
    assert_eq!(format_duration(1.0), "1.00s");
    assert_eq!(format_duration(59.994), "59.99s");
    assert_eq!(format_duration(60.0), "1m 0.0s");
    assert_eq!(format_duration(125.5), "2m 5.5s");
}

#[test]
fn test_colors_preserve_text() {
    colored::control::set_override(false);
    assert_eq!(colors::backend("glossary").to_string(), "glossary");
    assert_eq!(colors::number("42").to_string(), "42");
    assert_eq!(colors::file_path("/tmp/a.md").to_string(), "/tmp/a.md");
    colored::control::unset_override();
}
