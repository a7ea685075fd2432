//! Configuration management for linkweave.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::backend::BackendKind;
use crate::core::error::{LinkweaveError, Result};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Chunking configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChunkingConfig {
    /// Whitespace-delimited tokens per chunk
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Send whole documents to the backend when false
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Processing intensity, mapped onto the backend sampling temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Light,
    #[default]
    Standard,
    Thorough,
}

impl Intensity {
    pub fn temperature(self) -> f32 {
        match self {
            Intensity::Light => 0.2,
            Intensity::Standard => 0.5,
            Intensity::Thorough => 0.8,
        }
    }
}

impl FromStr for Intensity {
    type Err = LinkweaveError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Intensity::Light),
            "standard" => Ok(Intensity::Standard),
            "thorough" => Ok(Intensity::Thorough),
            other => Err(LinkweaveError::ConfigError(format!(
                "Unknown intensity '{other}' (expected light, standard or thorough)"
            ))),
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Intensity::Light => "light",
            Intensity::Standard => "standard",
            Intensity::Thorough => "thorough",
        };
        f.write_str(name)
    }
}

/// Annotation backend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Backend identifier (see `linkweave list-backends`)
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Base URL for HTTP backends
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Model name for HTTP backends
    #[serde(default)]
    pub model: Option<String>,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Processing intensity
    #[serde(default)]
    pub intensity: Intensity,

    /// Explicit temperature, overrides `intensity`
    #[serde(default)]
    pub temperature: Option<f32>,

    /// Maximum tokens the backend may produce per chunk
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Terms linked by the glossary backend
    #[serde(default)]
    pub glossary: Vec<String>,
}

impl BackendConfig {
    /// Effective sampling temperature
    pub fn effective_temperature(&self) -> f32 {
        self.temperature.unwrap_or(self.intensity.temperature())
    }
}

/// Deadlines
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LimitsConfig {
    /// Deadline for a single backend call
    #[serde(default = "default_chunk_timeout")]
    pub chunk_timeout_sec: u64,

    /// Deadline for a whole document (must be >= chunk timeout)
    #[serde(default = "default_document_timeout")]
    pub document_timeout_sec: u64,
}

impl LimitsConfig {
    pub fn chunk_timeout(&self) -> Duration {
        Duration::from_secs(self.chunk_timeout_sec)
    }

    pub fn document_timeout(&self) -> Duration {
        Duration::from_secs(self.document_timeout_sec)
    }
}

/// Post-processing rule toggles
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RulesConfig {
    #[serde(default = "default_true")]
    pub filter_names: bool,

    #[serde(default = "default_true")]
    pub filter_references: bool,

    #[serde(default = "default_true")]
    pub suppress_duplicates: bool,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Directory for annotated documents and their keyword lists
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Directory for backlink files (defaults to `{output_dir}/backlinks`)
    #[serde(default)]
    pub backlinks_dir: Option<PathBuf>,

    /// Skip a reference line when the backlink file already lists the title
    #[serde(default)]
    pub dedupe_backlinks: bool,

    /// Shortest normalized keyword kept in keyword lists
    #[serde(default = "default_min_keyword_len")]
    pub min_keyword_len: usize,

    /// Extra stop words excluded from keyword lists
    #[serde(default)]
    pub stop_words: Vec<String>,

    /// Remove duplicate output files after each document
    #[serde(default = "default_true")]
    pub reconcile: bool,

    /// Input file patterns for directory runs (glob syntax)
    #[serde(default = "default_include_patterns")]
    pub include_patterns: Vec<String>,

    /// Input patterns to skip for directory runs (glob syntax)
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,
}

impl OutputConfig {
    pub fn resolved_backlinks_dir(&self) -> PathBuf {
        self.backlinks_dir
            .clone()
            .unwrap_or_else(|| self.output_dir.join("backlinks"))
    }
}

// Default value functions
fn default_true() -> bool {
    true
}

fn default_max_tokens() -> usize {
    1500
}

fn default_provider() -> String {
    BackendKind::Passthrough.id().to_string()
}

fn default_api_key_env() -> String {
    "LINKWEAVE_API_KEY".to_string()
}

fn default_max_output_tokens() -> u32 {
    4096
}

fn default_chunk_timeout() -> u64 {
    120
}

fn default_document_timeout() -> u64 {
    900
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./annotated")
}

fn default_min_keyword_len() -> usize {
    3
}

fn default_include_patterns() -> Vec<String> {
    vec!["*.md".to_string(), "*.markdown".to_string()]
}

fn default_exclude_patterns() -> Vec<String> {
    vec![
        "**/.git/**".to_string(),
        "**/.obsidian/**".to_string(),
        "**/node_modules/**".to_string(),
        "**/.trash/**".to_string(),
    ]
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            enabled: true,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            endpoint: None,
            model: None,
            api_key_env: default_api_key_env(),
            intensity: Intensity::default(),
            temperature: None,
            max_output_tokens: default_max_output_tokens(),
            glossary: Vec::new(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            chunk_timeout_sec: default_chunk_timeout(),
            document_timeout_sec: default_document_timeout(),
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            filter_names: true,
            filter_references: true,
            suppress_duplicates: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            backlinks_dir: None,
            dedupe_backlinks: false,
            min_keyword_len: default_min_keyword_len(),
            stop_words: Vec::new(),
            reconcile: true,
            include_patterns: default_include_patterns(),
            exclude_patterns: default_exclude_patterns(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| LinkweaveError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. LINKWEAVE_CONFIG env var
    /// 2. XDG config file (~/.config/linkweave/config.toml)
    /// 3. ./linkweave.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("LINKWEAVE_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("linkweave.toml").exists() {
                Self::from_file("linkweave.toml")?
            } else {
                Self::default()
            }
        };

        // Use the XDG data directory unless an output dir was chosen explicitly
        if env::var("LINKWEAVE_OUTPUT_DIR").is_err()
            && config.output.output_dir == default_output_dir()
        {
            config.output.output_dir = xdg.output_dir();
        }

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        if let Ok(max_tokens) = env::var("LINKWEAVE_MAX_TOKENS") {
            if let Ok(n) = max_tokens.parse() {
                self.chunking.max_tokens = n;
            }
        }

        if let Ok(provider) = env::var("LINKWEAVE_BACKEND") {
            if !provider.is_empty() {
                self.backend.provider = provider;
            }
        }
        if let Ok(intensity) = env::var("LINKWEAVE_INTENSITY") {
            if let Ok(i) = intensity.parse() {
                self.backend.intensity = i;
            }
        }

        if let Ok(output_dir) = env::var("LINKWEAVE_OUTPUT_DIR") {
            self.output.output_dir = PathBuf::from(output_dir);
        }

        if let Ok(timeout) = env::var("LINKWEAVE_CHUNK_TIMEOUT_SEC") {
            if let Ok(t) = timeout.parse() {
                self.limits.chunk_timeout_sec = t;
            }
        }
        if let Ok(timeout) = env::var("LINKWEAVE_DOCUMENT_TIMEOUT_SEC") {
            if let Ok(t) = timeout.parse() {
                self.limits.document_timeout_sec = t;
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.chunking.max_tokens == 0 {
            return Err(LinkweaveError::ConfigError(
                "Chunk token bound must be non-zero".to_string(),
            ));
        }

        if self.backend.provider.parse::<BackendKind>().is_err() {
            return Err(LinkweaveError::UnknownBackend(self.backend.provider.clone()));
        }

        let temperature = self.backend.effective_temperature();
        if !(0.0..=2.0).contains(&temperature) {
            return Err(LinkweaveError::ConfigError(format!(
                "Temperature {temperature} must be within 0.0..=2.0"
            )));
        }

        if self.backend.max_output_tokens == 0 {
            return Err(LinkweaveError::ConfigError(
                "Max output tokens must be non-zero".to_string(),
            ));
        }

        if self.limits.chunk_timeout_sec == 0 || self.limits.document_timeout_sec == 0 {
            return Err(LinkweaveError::ConfigError(
                "Timeouts must be non-zero".to_string(),
            ));
        }

        if self.limits.document_timeout_sec < self.limits.chunk_timeout_sec {
            return Err(LinkweaveError::ConfigError(format!(
                "Document timeout ({}s) cannot be shorter than chunk timeout ({}s)",
                self.limits.document_timeout_sec, self.limits.chunk_timeout_sec
            )));
        }

        if self.output.min_keyword_len == 0 {
            return Err(LinkweaveError::ConfigError(
                "Minimum keyword length must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration (redacting sensitive values)
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!(
            "  Chunking: {} (max {} tokens)",
            if self.chunking.enabled { "on" } else { "off" },
            self.chunking.max_tokens
        );
        tracing::info!("  Backend: {}", self.backend.provider);
        if let Some(endpoint) = &self.backend.endpoint {
            tracing::info!("  Endpoint: {}", endpoint);
        }
        if let Some(model) = &self.backend.model {
            tracing::info!("  Model: {}", model);
        }
        tracing::info!(
            "  API key: ${} ({})",
            self.backend.api_key_env,
            if env::var(&self.backend.api_key_env).is_ok() {
                "set"
            } else {
                "unset"
            }
        );
        tracing::info!(
            "  Intensity: {} (temperature {:.2})",
            self.backend.intensity,
            self.backend.effective_temperature()
        );
        tracing::info!(
            "  Timeouts: {}s per chunk, {}s per document",
            self.limits.chunk_timeout_sec,
            self.limits.document_timeout_sec
        );
        tracing::info!("  Output dir: {:?}", self.output.output_dir);
        tracing::info!("  Backlinks dir: {:?}", self.output.resolved_backlinks_dir());
        tracing::info!("  Dedupe backlinks: {}", self.output.dedupe_backlinks);
    }
}
