//! Config: nested sections for corpus, model and harness, all defaulted.
//!
//! Credentials never live here. The binary reads them from the environment
//! and hands them to [`crate::client::ClientConfig`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ── Sections ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    #[serde(default = "default_corpus_root")]
    pub root: PathBuf,
    /// Application subdirectories to scan, in walk order. All must exist.
    #[serde(default = "default_apps")]
    pub apps: Vec<String>,
    /// Fixture file extension, without the dot.
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Substring a fixture file name must contain.
    #[serde(default = "default_marker")]
    pub marker: String,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            root: default_corpus_root(),
            apps: default_apps(),
            extension: default_extension(),
            marker: default_marker(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// "openai" or "ollama".
    #[serde(default = "default_backend")]
    pub backend: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Overrides the backend's default endpoint.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub temperature: f32,
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            model: default_model(),
            base_url: None,
            temperature: 0.0,
            seed: 0,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// What the harness does when a model call fails outright.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Record a service error for that record and keep going.
    #[default]
    Isolate,
    /// Stop the run and return the error.
    Abort,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Evaluate only the first `limit` records. `None` runs the whole set.
    #[serde(default = "default_limit")]
    pub limit: Option<usize>,
    #[serde(default)]
    pub on_service_error: FailurePolicy,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            on_service_error: FailurePolicy::default(),
        }
    }
}

// ── Top-level config ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub harness: HarnessConfig,
}

// ── Defaults ───────────────────────────────────────────────────────────────

/// The DroidTask application set.
pub const DROIDTASK_APPS: [&str; 13] = [
    "applauncher",
    "calendar",
    "camera",
    "clock",
    "contacts",
    "dialer",
    "filemanager",
    "firefox",
    "gallery",
    "messenger",
    "musicplayer",
    "notes",
    "voicerecorder",
];

fn default_corpus_root() -> PathBuf { PathBuf::from("../DroidTask") }
fn default_apps() -> Vec<String> { DROIDTASK_APPS.iter().map(|s| s.to_string()).collect() }
fn default_extension() -> String { "yaml".into() }
fn default_marker() -> String { "task".into() }
fn default_backend() -> String { "openai".into() }
fn default_model() -> String { "gpt-3.5-turbo".into() }
fn default_timeout_secs() -> u64 { 30 }
fn default_limit() -> Option<usize> { Some(10) }

// ── Load / save ────────────────────────────────────────────────────────────

/// Load config from `path`, or defaults if the file does not exist.
///
/// A file that exists but does not parse is an error: silently evaluating
/// with the wrong model or corpus would produce misleading numbers.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to read {}: {e}", path.display())),
    };

    serde_json::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse {}: {e}", path.display()))
}

pub fn save_config(cfg: &Config, path: &Path) -> anyhow::Result<()> {
    let contents = serde_json::to_string_pretty(cfg)?;
    std::fs::write(path, contents)?;
    Ok(())
}
