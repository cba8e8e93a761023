// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, read once at startup
//! from a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[sorting]` - Preview box of the sorting view
//! - `[lots]` - Lot counter behaviour
//! - `[export]` - Output file name, picture size, hidden images
//! - `[cache]` - Preview cache size
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass `--config-dir` on the command line
//! 3. Falls back to platform-specific config directory
//!
//! The application itself never writes the file; `save_to_path` exists for
//! tooling and tests.
//!
//! # Examples
//!
//! ```no_run
//! use auction_lots::config;
//!
//! // Load configuration (returns tuple with optional warning)
//! let (config, _warning) = config::load();
//! assert!(config.export.image_size_pt > 0);
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::lots::CounterPolicy;
use crate::media::Bounds;
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(
        default = "default_theme_mode",
        deserialize_with = "deserialize_theme_mode"
    )]
    pub theme_mode: ThemeMode,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: None,
            theme_mode: default_theme_mode(),
        }
    }
}

/// Sorting view settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SortingConfig {
    #[serde(default = "default_preview_width")]
    pub preview_width: u32,

    #[serde(default = "default_preview_height")]
    pub preview_height: u32,
}

impl Default for SortingConfig {
    fn default() -> Self {
        Self {
            preview_width: DEFAULT_PREVIEW_WIDTH,
            preview_height: DEFAULT_PREVIEW_HEIGHT,
        }
    }
}

/// Lot assignment settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LotsConfig {
    /// Raise the lot counter past manually typed lot numbers.
    #[serde(default)]
    pub advance_counter_on_manual: bool,
}

/// Document export settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportConfig {
    /// Output file name, relative to the working directory.
    #[serde(default = "default_export_file_name")]
    pub file_name: String,

    /// Side of each embedded picture, in points.
    #[serde(default = "default_image_size_pt")]
    pub image_size_pt: u32,

    /// Leave hidden images out of the document.
    #[serde(default)]
    pub skip_hidden: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: default_export_file_name(),
            image_size_pt: DEFAULT_IMAGE_SIZE_PT,
            skip_hidden: false,
        }
    }
}

/// Preview cache settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheConfig {
    #[serde(default = "default_preview_capacity")]
    pub preview_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            preview_capacity: DEFAULT_PREVIEW_CAPACITY,
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub sorting: SortingConfig,

    #[serde(default)]
    pub lots: LotsConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Sorting preview box, each side clamped to the accepted range.
    #[must_use]
    pub fn preview_bounds(&self) -> Bounds {
        Bounds::new(
            self.sorting
                .preview_width
                .clamp(MIN_PREVIEW_SIDE, MAX_PREVIEW_SIDE),
            self.sorting
                .preview_height
                .clamp(MIN_PREVIEW_SIDE, MAX_PREVIEW_SIDE),
        )
    }

    #[must_use]
    pub fn counter_policy(&self) -> CounterPolicy {
        if self.lots.advance_counter_on_manual {
            CounterPolicy::AdvancePastManual
        } else {
            CounterPolicy::Independent
        }
    }

    /// Export file name, falling back to the default when blank.
    #[must_use]
    pub fn export_file_name(&self) -> &str {
        let name = self.export.file_name.trim();
        if name.is_empty() {
            DEFAULT_EXPORT_FILE_NAME
        } else {
            name
        }
    }

    #[must_use]
    pub fn image_size_pt(&self) -> u32 {
        self.export
            .image_size_pt
            .clamp(MIN_IMAGE_SIZE_PT, MAX_IMAGE_SIZE_PT)
    }

    #[must_use]
    pub fn preview_capacity(&self) -> usize {
        self.cache
            .preview_capacity
            .clamp(MIN_PREVIEW_CAPACITY, MAX_PREVIEW_CAPACITY)
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_theme_mode() -> ThemeMode {
    ThemeMode::System
}

fn default_preview_width() -> u32 {
    DEFAULT_PREVIEW_WIDTH
}

fn default_preview_height() -> u32 {
    DEFAULT_PREVIEW_HEIGHT
}

fn default_export_file_name() -> String {
    DEFAULT_EXPORT_FILE_NAME.to_string()
}

fn default_image_size_pt() -> u32 {
    DEFAULT_IMAGE_SIZE_PT
}

fn default_preview_capacity() -> usize {
    DEFAULT_PREVIEW_CAPACITY
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {}", other))),
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load / Save
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with the i18n key of a warning to show the operator.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "falling back to default settings");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
