//! TOML Configuration File Support
//!
//! Centralized configuration for the panel, loaded from
//! `~/.config/docchat/panel.toml`.
//!
//! # Configuration Priority
//!
//! Values are loaded with the following priority (highest first):
//! 1. CLI arguments ([`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [backend]
//! endpoint = "http://localhost:5000/chat"
//! timeout_secs = 60
//!
//! [reveal]
//! speed_ms = 10
//! batch_size = 3
//! instant = false
//!
//! [viewer]
//! target = "/static/books/handbook.pdf"
//! title = "Customer Handbook"
//! rating = 4.5
//!
//! [layout]
//! min_width = 20
//! reserved_margin = 40
//! viewer_width = 50
//! input_max_lines = 6
//! sidebar_collapsed = false
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reveal::RevealOptions;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Backend section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendToml {
    /// Chat endpoint URL
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}

/// Reveal section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealToml {
    /// Milliseconds between batches
    pub speed_ms: Option<u64>,

    /// Characters per batch
    pub batch_size: Option<usize>,

    /// Skip the animation
    pub instant: Option<bool>,
}

/// Viewer section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerToml {
    /// Initial navigation target of the document viewer
    pub target: Option<String>,

    /// Document title shown in the sidebar
    pub title: Option<String>,

    /// Document rating (0-5) shown in the sidebar
    pub rating: Option<f64>,
}

/// Layout section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutToml {
    /// Minimum viewer pane width (exclusive)
    pub min_width: Option<i32>,

    /// Columns reserved for the rest of the screen when computing max width
    pub reserved_margin: Option<i32>,

    /// Initial viewer pane width
    pub viewer_width: Option<i32>,

    /// Maximum height the input box grows to
    pub input_max_lines: Option<u16>,

    /// Start with the sidebar hidden
    pub sidebar_collapsed: Option<bool>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelToml {
    /// Backend configuration section
    pub backend: BackendToml,

    /// Reveal configuration section
    pub reveal: RevealToml,

    /// Viewer configuration section
    pub viewer: ViewerToml,

    /// Layout configuration section
    pub layout: LayoutToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Resolved panel configuration
#[derive(Clone, Debug)]
pub struct PanelConfig {
    /// Chat endpoint URL
    pub endpoint: String,

    /// Request timeout
    pub timeout: Duration,

    /// How replies are revealed
    pub reveal: RevealOptions,

    /// Initial viewer target (`None` disables the viewer)
    pub viewer_target: Option<String>,

    /// Document title
    pub document_title: Option<String>,

    /// Document rating
    pub document_rating: Option<f64>,

    /// Minimum viewer pane width
    pub min_width: i32,

    /// Reserved margin for the max width
    pub reserved_margin: i32,

    /// Initial viewer pane width
    pub viewer_width: i32,

    /// Maximum input box height in lines
    pub input_max_lines: u16,

    /// Start with the sidebar hidden
    pub sidebar_collapsed: bool,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    source: ConfigSource,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:5000/chat".to_string(),
            timeout: Duration::from_secs(60),
            reveal: RevealOptions::default(),
            viewer_target: None,
            document_title: None,
            document_rating: None,
            min_width: 20,
            reserved_margin: 40,
            viewer_width: 30,
            input_max_lines: 6,
            sidebar_collapsed: false,
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl PanelConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Check values that would break the panel
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for an empty endpoint, a zero
    /// batch size, or a non-positive minimum width.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "backend endpoint must not be empty".to_string(),
            ));
        }
        if self.reveal.batch_size == 0 {
            return Err(ConfigError::ValidationError(
                "reveal batch_size must be greater than 0".to_string(),
            ));
        }
        if self.min_width <= 0 {
            return Err(ConfigError::ValidationError(format!(
                "layout min_width must be positive (got {})",
                self.min_width
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/docchat/panel.toml` or
/// `~/.config/docchat/panel.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("docchat").join("panel.toml"))
}

/// Load configuration from a file, the environment and CLI overrides
///
/// Validation runs once, after every layer is applied, so a higher layer can
/// fix a bad value from a lower one.
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed,
/// or if the result fails validation. A missing file is not an error.
pub fn load_config_from_path(
    path: Option<PathBuf>,
    overrides: &ConfigOverrides,
) -> Result<PanelConfig, ConfigError> {
    load_config_with_env(path, overrides, |key| std::env::var(key).ok())
}

/// Load configuration reading environment values through `env`
///
/// # Errors
///
/// Same as [`load_config_from_path`].
pub fn load_config_with_env<F>(
    path: Option<PathBuf>,
    overrides: &ConfigOverrides,
    env: F,
) -> Result<PanelConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = PanelConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: PanelToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config, env);
    overrides.apply(&mut config);
    config.validate()?;

    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut PanelConfig, toml: &PanelToml) {
    // Backend settings
    if let Some(ref endpoint) = toml.backend.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(secs) = toml.backend.timeout_secs {
        config.timeout = Duration::from_secs(secs);
    }

    // Reveal settings (batch_size is validated, not clamped)
    if let Some(ms) = toml.reveal.speed_ms {
        config.reveal.speed = Duration::from_millis(ms);
    }
    if let Some(batch) = toml.reveal.batch_size {
        config.reveal.batch_size = batch;
    }
    if let Some(instant) = toml.reveal.instant {
        config.reveal.instant = instant;
    }

    // Viewer settings
    if toml.viewer.target.is_some() {
        config.viewer_target = toml.viewer.target.clone();
    }
    if toml.viewer.title.is_some() {
        config.document_title = toml.viewer.title.clone();
    }
    if toml.viewer.rating.is_some() {
        config.document_rating = toml.viewer.rating;
    }

    // Layout settings
    if let Some(width) = toml.layout.min_width {
        config.min_width = width;
    }
    if let Some(margin) = toml.layout.reserved_margin {
        config.reserved_margin = margin;
    }
    if let Some(width) = toml.layout.viewer_width {
        config.viewer_width = width;
    }
    if let Some(lines) = toml.layout.input_max_lines {
        config.input_max_lines = lines;
    }
    if let Some(collapsed) = toml.layout.sidebar_collapsed {
        config.sidebar_collapsed = collapsed;
    }
}

/// Apply environment variable overrides to the config
fn apply_env_config<F>(config: &mut PanelConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(endpoint) = env("DOCCHAT_ENDPOINT") {
        config.endpoint = endpoint;
        config.source = ConfigSource::Env;
    }
    if let Some(target) = env("DOCCHAT_DOCUMENT") {
        config.viewer_target = Some(target);
        config.source = ConfigSource::Env;
    }
    if let Some(speed) = env("DOCCHAT_REVEAL_SPEED_MS") {
        if let Ok(ms) = speed.parse::<u64>() {
            config.reveal.speed = Duration::from_millis(ms);
            config.source = ConfigSource::Env;
        }
    }
    if let Some(batch) = env("DOCCHAT_REVEAL_BATCH") {
        if let Ok(n) = batch.parse::<usize>() {
            config.reveal.batch_size = n;
            config.source = ConfigSource::Env;
        }
    }
    if let Some(instant) = env("DOCCHAT_REVEAL_INSTANT") {
        config.reveal.instant = instant == "1" || instant.to_lowercase() == "true";
        config.source = ConfigSource::Env;
    }
}

// =============================================================================
// CLI Override Support
// =============================================================================

/// Builder for applying CLI overrides to configuration
///
/// Passed to [`load_config_from_path`], which applies it after the environment.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Endpoint override
    pub endpoint: Option<String>,

    /// Viewer target override
    pub viewer_target: Option<String>,

    /// Reveal speed override (milliseconds)
    pub speed_ms: Option<u64>,

    /// Batch size override
    pub batch_size: Option<usize>,

    /// Instant mode override
    pub instant: Option<bool>,
}

impl ConfigOverrides {
    /// Create a new empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set endpoint override
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Set viewer target override
    #[must_use]
    pub fn with_viewer_target(mut self, target: String) -> Self {
        self.viewer_target = Some(target);
        self
    }

    /// Set reveal speed override
    #[must_use]
    pub fn with_speed_ms(mut self, ms: u64) -> Self {
        self.speed_ms = Some(ms);
        self
    }

    /// Set batch size override
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    /// Set instant mode override
    #[must_use]
    pub fn with_instant(mut self, instant: bool) -> Self {
        self.instant = Some(instant);
        self
    }

    /// Whether any override is set
    pub fn is_empty(&self) -> bool {
        self.endpoint.is_none()
            && self.viewer_target.is_none()
            && self.speed_ms.is_none()
            && self.batch_size.is_none()
            && self.instant.is_none()
    }

    /// Apply overrides to a configuration
    ///
    /// Does not validate; the loader validates the final result.
    pub fn apply(&self, config: &mut PanelConfig) {
        if !self.is_empty() {
            config.source = ConfigSource::Cli;
        }

        if let Some(ref endpoint) = self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(ref target) = self.viewer_target {
            config.viewer_target = Some(target.clone());
        }
        if let Some(ms) = self.speed_ms {
            config.reveal.speed = Duration::from_millis(ms);
        }
        if let Some(batch) = self.batch_size {
            config.reveal.batch_size = batch;
        }
        if let Some(instant) = self.instant {
            config.reveal.instant = instant;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
