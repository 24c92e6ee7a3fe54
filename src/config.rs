//! Application-level configuration loading, including the hint ranking policy.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "WIKI_SPRINT_BACK_CONFIG_PATH";

/// Largest candidate batch accepted by the hint endpoint unless configured.
const DEFAULT_MAX_CANDIDATES: usize = 5;
/// Scores strictly above this default are bucketed as high closeness.
const DEFAULT_HIGH_THRESHOLD: f32 = 0.75;
/// Scores strictly above this default (and not high) are bucketed as medium.
const DEFAULT_MEDIUM_THRESHOLD: f32 = 0.5;

#[derive(Debug, Clone, Default)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    hint: HintPolicy,
}

/// Tunable policy constants for the hint ranking subsystem.
#[derive(Debug, Clone)]
pub struct HintPolicy {
    /// Largest accepted candidate batch per hint call.
    pub max_candidates: usize,
    /// Similarity above which a candidate counts as high closeness.
    pub high_threshold: f32,
    /// Similarity above which a candidate counts as medium closeness.
    pub medium_threshold: f32,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to the baked-in hint policy.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        max_candidates = app_config.hint.max_candidates,
                        "loaded hint policy from config"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Policy applied to hint ranking calls.
    pub fn hint(&self) -> &HintPolicy {
        &self.hint
    }
}

impl Default for HintPolicy {
    fn default() -> Self {
        Self {
            max_candidates: DEFAULT_MAX_CANDIDATES,
            high_threshold: DEFAULT_HIGH_THRESHOLD,
            medium_threshold: DEFAULT_MEDIUM_THRESHOLD,
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    hint: RawHintPolicy,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        Self {
            hint: value.hint.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
/// JSON representation of the hint policy inside the configuration file.
struct RawHintPolicy {
    max_candidates: Option<usize>,
    high_threshold: Option<f32>,
    medium_threshold: Option<f32>,
}

impl From<RawHintPolicy> for HintPolicy {
    fn from(value: RawHintPolicy) -> Self {
        let defaults = Self::default();
        Self {
            max_candidates: value.max_candidates.unwrap_or(defaults.max_candidates),
            high_threshold: value.high_threshold.unwrap_or(defaults.high_threshold),
            medium_threshold: value.medium_threshold.unwrap_or(defaults.medium_threshold),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
