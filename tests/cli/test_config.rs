//! Tests for the show-config command and config loading

use crate::common::create_test_services;
use linkweave::cli::commands::config::{execute, ConfigArgs};
use linkweave::cli::OutputFormat;
use linkweave::core::config::{Config, Intensity};
use linkweave::core::xdg::XdgDirs;
use serial_test::serial;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_show_config_formats() {
    let dir = TempDir::new().unwrap();
    let services = Arc::new(create_test_services(dir.path()));

    execute(ConfigArgs { toml: false }, &services, OutputFormat::Human)
        .await
        .unwrap();
    execute(ConfigArgs { toml: false }, &services, OutputFormat::Json)
        .await
        .unwrap();
    execute(ConfigArgs { toml: true }, &services, OutputFormat::Human)
        .await
        .unwrap();
}

#[test]
#[serial]
fn test_load_from_xdg_config_file() {
    let dir = TempDir::new().unwrap();
    let config_dir = dir.path().join("config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        r#"
[chunking]
max_tokens = 800

[backend]
provider = "glossary"
intensity = "thorough"
glossary = ["tokio"]

[output]
output_dir = "/tmp/linkweave-test-out"
dedupe_backlinks = true
"#,
    )
    .unwrap();

    let xdg = XdgDirs {
        config_dir,
        data_dir: dir.path().join("data"),
    };
    std::env::remove_var("LINKWEAVE_CONFIG");
    std::env::remove_var("LINKWEAVE_CONFIG_FILE");
    std::env::remove_var("LINKWEAVE_OUTPUT_DIR");
    std::env::remove_var("LINKWEAVE_BACKEND");
    std::env::remove_var("LINKWEAVE_MAX_TOKENS");
    std::env::remove_var("LINKWEAVE_INTENSITY");

    let config = Config::load_with_xdg(&xdg).unwrap();

    assert_eq!(config.chunking.max_tokens, 800);
    assert_eq!(config.backend.provider, "glossary");
    assert_eq!(config.backend.intensity, Intensity::Thorough);
    assert!(config.output.dedupe_backlinks);
    assert_eq!(
        config.output.output_dir,
        std::path::PathBuf::from("/tmp/linkweave-test-out")
    );
    // Unset sections keep defaults
    assert_eq!(config.limits.chunk_timeout_sec, 120);
}

#[test]
#[serial]
fn test_env_overrides_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("linkweave.toml");
    fs::write(&file, "[chunking]\nmax_tokens = 800\n").unwrap();

    std::env::remove_var("LINKWEAVE_OUTPUT_DIR");
    std::env::set_var("LINKWEAVE_CONFIG", &file);
    std::env::set_var("LINKWEAVE_MAX_TOKENS", "300");
    let xdg = XdgDirs {
        config_dir: dir.path().join("config"),
        data_dir: dir.path().join("data"),
    };
    let config = Config::load_with_xdg(&xdg);
    std::env::remove_var("LINKWEAVE_CONFIG");
    std::env::remove_var("LINKWEAVE_MAX_TOKENS");

    let config = config.unwrap();
    assert_eq!(config.chunking.max_tokens, 300);
    // No explicit output dir: falls back under the data dir
    assert_eq!(config.output.output_dir, dir.path().join("data").join("annotated"));
}

#[test]
#[serial]
fn test_invalid_timeouts_rejected() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("bad.toml");
    fs::write(
        &file,
        "[limits]\nchunk_timeout_sec = 600\ndocument_timeout_sec = 60\n",
    )
    .unwrap();

    std::env::set_var("LINKWEAVE_CONFIG", &file);
    let result = Config::load_with_xdg(&XdgDirs {
        config_dir: dir.path().to_path_buf(),
        data_dir: dir.path().to_path_buf(),
    });
    std::env::remove_var("LINKWEAVE_CONFIG");

    assert!(result.unwrap_err().is_config_error());
}
