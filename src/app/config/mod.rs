// SPDX-License-Identifier: MPL-2.0
//! Loading and saving of the gallery's `settings.toml`.
//!
//! # Configuration Sections
//!
//! - `[visibility]` - Intersection observer margin and threshold
//! - `[layout]` - Narrow viewport breakpoint and when it is re-evaluated
//! - `[gallery]` - Card size, spacing and the poster asset root
//!
//! Out-of-range values are clamped when converted into runtime options, so a
//! hand-edited file can never produce a degenerate layout.
//!
//! # Examples
//!
//! ```no_run
//! use iced_reel::app::config;
//!
//! // First launch: write a default file to edit
//! config::write_defaults_if_missing().expect("Failed to write config");
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (config, _warning) = config::load();
//! assert!(config.card_width() > 0.0);
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::thumbnail::layout::{LayoutOptions, ViewportPolicy};
use crate::thumbnail::visibility::ObserverOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Intersection observer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VisibilityConfig {
    #[serde(default = "default_root_margin_px")]
    pub root_margin_px: f32,

    #[serde(default = "default_threshold")]
    pub threshold: f32,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            root_margin_px: DEFAULT_ROOT_MARGIN_PX,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Responsive layout settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutConfig {
    /// Viewports narrower than this hide hover-only chrome.
    #[serde(default = "default_mobile_breakpoint_px")]
    pub mobile_breakpoint_px: f32,

    /// `one-shot` samples the width once per thumbnail, `reactive` follows resizes.
    #[serde(default)]
    pub viewport_policy: ViewportPolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint_px: DEFAULT_MOBILE_BREAKPOINT_PX,
            viewport_policy: ViewportPolicy::default(),
        }
    }
}

/// Gallery grid settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryConfig {
    #[serde(default = "default_card_width")]
    pub card_width: f32,

    #[serde(default = "default_spacing")]
    pub spacing: f32,

    /// Directory that `/thumbnails/{index}.jpg` resolves against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_root: Option<PathBuf>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            card_width: DEFAULT_CARD_WIDTH,
            spacing: DEFAULT_SPACING,
            asset_root: None,
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub visibility: VisibilityConfig,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub gallery: GalleryConfig,
}

impl Config {
    /// Observer options with margin and threshold clamped.
    #[must_use]
    pub fn observer_options(&self) -> ObserverOptions {
        ObserverOptions {
            root_margin: clamp_or(
                self.visibility.root_margin_px,
                0.0,
                MAX_ROOT_MARGIN_PX,
                DEFAULT_ROOT_MARGIN_PX,
            ),
            threshold: clamp_or(self.visibility.threshold, 0.0, 1.0, DEFAULT_THRESHOLD),
        }
    }

    #[must_use]
    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            mobile_breakpoint: clamp_or(
                self.layout.mobile_breakpoint_px,
                0.0,
                MAX_MOBILE_BREAKPOINT_PX,
                DEFAULT_MOBILE_BREAKPOINT_PX,
            ),
            viewport_policy: self.layout.viewport_policy,
        }
    }

    #[must_use]
    pub fn card_width(&self) -> f32 {
        clamp_or(
            self.gallery.card_width,
            MIN_CARD_WIDTH,
            MAX_CARD_WIDTH,
            DEFAULT_CARD_WIDTH,
        )
    }

    #[must_use]
    pub fn spacing(&self) -> f32 {
        clamp_or(self.gallery.spacing, 0.0, MAX_SPACING, DEFAULT_SPACING)
    }

    /// Poster asset root, the current directory when unset.
    #[must_use]
    pub fn asset_root(&self) -> PathBuf {
        self.gallery
            .asset_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// NaN falls back to `default`, everything else is clamped.
fn clamp_or(value: f32, min: f32, max: f32, default: f32) -> f32 {
    if value.is_nan() {
        default
    } else {
        value.clamp(min, max)
    }
}

fn default_root_margin_px() -> f32 {
    DEFAULT_ROOT_MARGIN_PX
}

fn default_threshold() -> f32 {
    DEFAULT_THRESHOLD
}

fn default_mobile_breakpoint_px() -> f32 {
    DEFAULT_MOBILE_BREAKPOINT_PX
}

fn default_card_width() -> f32 {
    DEFAULT_CARD_WIDTH
}

fn default_spacing() -> f32 {
    DEFAULT_SPACING
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
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(e) => {
                    return (
                        Config::default(),
                        Some(format!("Ignoring {}: {e}", path.display())),
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

// =============================================================================
// Save Functions
// =============================================================================

/// Writes the default configuration unless a settings file already exists.
///
/// Returns the written path, or `None` when nothing was written.
pub fn write_defaults_if_missing() -> Result<Option<PathBuf>> {
    write_defaults_if_missing_with_override(None)
}

/// Same as [`write_defaults_if_missing`] for a custom directory.
pub fn write_defaults_if_missing_with_override(
    base_dir: Option<PathBuf>,
) -> Result<Option<PathBuf>> {
    match get_config_path_with_override(base_dir) {
        Some(path) if !path.exists() => {
            save_to_path(&Config::default(), &path)?;
            Ok(Some(path))
        }
        _ => Ok(None),
    }
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
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
