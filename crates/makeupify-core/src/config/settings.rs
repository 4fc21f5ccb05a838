use crate::{Error, Result};
use makeupify_types::{Language, Theme};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variables checked for the generation credential, in order
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub ad_gate: AdGateConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub acquisition: AcquisitionConfig,
}

impl Config {
    /// Load config from file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        super::validation::warn_unknown_fields(&content, "config.json");
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that parse but cannot work.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.generation.model.trim().is_empty() {
            return Err(Error::Config("generation.model must not be empty".into()));
        }
        if self.generation.timeout_secs == 0 {
            return Err(Error::Config(
                "generation.timeoutSecs must be at least 1".into(),
            ));
        }
        let step = self.ui.slider_step;
        if !step.is_finite() || step <= 0.0 || step > 100.0 {
            return Err(Error::Config(format!(
                "ui.sliderStep must be within (0, 100], got {step}"
            )));
        }
        if self.output.filename.trim().is_empty() {
            return Err(Error::Config("output.filename must not be empty".into()));
        }
        if self.acquisition.max_bytes == 0 {
            return Err(Error::Config(
                "acquisition.maxBytes must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Save config to file, creating its directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolve the generation credential: config value first, then environment
    #[must_use]
    pub fn resolve_api_key(&self) -> Option<String> {
        self.generation
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .or_else(|| {
                API_KEY_ENV_VARS.iter().find_map(|var| {
                    std::env::var(var)
                        .ok()
                        .map(|v| v.trim().to_string())
                        .filter(|v| !v.is_empty())
                })
            })
    }
}

/// External image generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Prefer the `GEMINI_API_KEY` environment variable over storing this
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    "gemini-2.5-flash-image".to_string()
}
fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}
fn default_timeout_secs() -> u64 {
    120
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base: default_api_base(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Interstitial shown before generate and download
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdGateConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_dwell_ms")]
    pub dwell_ms: u64,
}

fn default_true() -> bool {
    true
}
fn default_dwell_ms() -> u64 {
    5000
}

impl Default for AdGateConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dwell_ms: default_dwell_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiConfig {
    #[serde(default)]
    pub language: Language,

    #[serde(default)]
    pub theme: Theme,

    /// Percentage moved per arrow key on the comparison slider
    #[serde(default = "default_slider_step")]
    pub slider_step: f64,
}

fn default_slider_step() -> f64 {
    5.0
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            theme: Theme::default(),
            slider_step: default_slider_step(),
        }
    }
}

/// Where downloads are written
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    /// Defaults to the current working directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,

    #[serde(default = "default_filename")]
    pub filename: String,
}

fn default_filename() -> String {
    "makeupify-makeover.jpg".to_string()
}

impl OutputConfig {
    /// Full path of the download target
    #[must_use]
    pub fn target_path(&self) -> PathBuf {
        self.directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(&self.filename)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: None,
            filename: default_filename(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcquisitionConfig {
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
}

fn default_max_bytes() -> u64 {
    20 * 1024 * 1024
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
        }
    }
}
