//! Loading styles from TOML files on disk.

use std::io::Write;

use cmk_render::Color;
use cmk_style::{Error, Style, StyleContext};

const DARK: &str = r##"
name = "dark"
padding = 10.0
bevel-radius = 3.0

[colors]
primary = "#3B80AE"
background = "#333333"
foreground = "#FFFFFF"
"##;

#[test]
fn test_style_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(DARK.as_bytes()).unwrap();

    let style = Style::from_file(file.path()).unwrap();
    assert_eq!(style.name(), "dark");
    assert_eq!(style.bevel_radius(), 3.0);
    assert_eq!(style.color("primary"), Color::from_hex("#3B80AE").unwrap());
}

#[test]
fn test_context_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dark.toml");
    std::fs::write(&path, DARK).unwrap();

    let ctx = StyleContext::from_file(&path).unwrap();
    assert_eq!(ctx.default_style().name(), "dark");
    assert_eq!(ctx.default_style().foreground_for("background"), Color::WHITE);
}

#[test]
fn test_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.toml");

    match Style::from_file(&path) {
        Err(Error::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected an I/O error, got {other:?}"),
    }
}

#[test]
fn test_malformed_file_is_a_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"name = ").unwrap();
    assert!(matches!(Style::from_file(file.path()), Err(Error::Parse(_))));
}
