//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/otcirc/otcirc.toml`
//! 3. Local config: file passed with `--config`
//! 4. Environment variables: `OTCIRC__*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use kurbo::Circle;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::LabelStyle;

/// Canvas geometry: a square of `size` with the root disc inset by `margin`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CanvasConfig {
    pub size: f64,
    pub margin: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            size: 800.0,
            margin: 50.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LabelConfig {
    /// Upper bound of the label font size
    pub max_size: f64,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            max_size: LabelStyle::default().max_size,
        }
    }
}

/// Colours used by the SVG export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StyleConfig {
    pub stroke: String,
    pub background: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            stroke: "black".into(),
            background: "white".into(),
        }
    }
}

/// Raw settings for intermediate parsing.
///
/// Every field is optional so a layer only overrides what it names.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub canvas: RawCanvasConfig,
    pub label: RawLabelConfig,
    pub style: RawStyleConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawCanvasConfig {
    pub size: Option<f64>,
    pub margin: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawLabelConfig {
    pub max_size: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawStyleConfig {
    pub stroke: Option<String>,
    pub background: Option<String>,
}

/// Unified configuration for otcirc.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Settings {
    pub canvas: CanvasConfig,
    pub label: LabelConfig,
    pub style: StyleConfig,
}

/// Get the XDG config directory for otcirc.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "otcirc").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("otcirc.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// The root disc: centred on the canvas, inset by the margin.
    pub fn root_disc(&self) -> Result<Circle, ApplicationError> {
        let half = self.canvas.size / 2.0;
        let radius = half - self.canvas.margin;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ApplicationError::Config {
                message: format!(
                    "canvas.margin {} leaves no room for a disc on a canvas of size {}",
                    self.canvas.margin, self.canvas.size
                ),
            });
        }
        Ok(Circle::new((half, half), radius))
    }

    pub fn label_style(&self) -> LabelStyle {
        LabelStyle {
            max_size: self.label.max_size,
        }
    }

    /// Overlay wins for every value it specifies.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            canvas: CanvasConfig {
                size: overlay.canvas.size.unwrap_or(self.canvas.size),
                margin: overlay.canvas.margin.unwrap_or(self.canvas.margin),
            },
            label: LabelConfig {
                max_size: overlay.label.max_size.unwrap_or(self.label.max_size),
            },
            style: StyleConfig {
                stroke: overlay
                    .style
                    .stroke
                    .clone()
                    .unwrap_or_else(|| self.style.stroke.clone()),
                background: overlay
                    .style
                    .background
                    .clone()
                    .unwrap_or_else(|| self.style.background.clone()),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional explicit config file (`--config`); must exist if given
    pub fn load(local: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Explicit local config
        if let Some(path) = local {
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        // 4. Environment variables
        Self::apply_env_overrides(current)
    }

    /// Apply OTCIRC__* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("OTCIRC")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_float("canvas.size") {
            settings.canvas.size = val;
        }
        if let Ok(val) = config.get_float("canvas.margin") {
            settings.canvas.margin = val;
        }
        if let Ok(val) = config.get_float("label.max_size") {
            settings.label.max_size = val;
        }
        if let Ok(val) = config.get_string("style.stroke") {
            settings.style.stroke = val;
        }
        if let Ok(val) = config.get_string("style.background") {
            settings.style.background = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# otcirc configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/otcirc/otcirc.toml
#   Local:  file passed with --config
#   Env:    OTCIRC__* environment variables, e.g. OTCIRC__CANVAS__SIZE=600

[canvas]
# Side length of the square canvas
# size = 800.0

# Gap between the root disc and the canvas edge
# margin = 50.0

[label]
# Largest label font size; smaller discs use half their radius
# max_size = 16.0

[style]
# stroke = "black"
# background = "white"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_computing_root_disc_then_matches_canvas() {
        let disc = Settings::default().root_disc().expect("root disc");
        assert_eq!(disc, Circle::new((400.0, 400.0), 350.0));
    }

    #[test]
    fn given_margin_too_large_when_computing_root_disc_then_config_error() {
        let mut settings = Settings::default();
        settings.canvas.margin = 400.0;
        let err = settings.root_disc().unwrap_err();
        assert!(matches!(err, ApplicationError::Config { .. }));
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_values() {
        let raw: RawSettings = toml::from_str("[canvas]\nsize = 600.0\n").unwrap();
        let merged = Settings::default().merge_with(&raw);

        assert_eq!(merged.canvas.size, 600.0);
        assert_eq!(merged.canvas.margin, 50.0);
        assert_eq!(merged.style, StyleConfig::default());
    }

    #[test]
    fn given_settings_when_serialized_then_round_trips_through_toml() {
        let toml_text = Settings::default().to_toml().unwrap();
        let parsed: Settings = toml::from_str(&toml_text).unwrap();
        assert_eq!(parsed, Settings::default());
    }

    #[test]
    fn given_template_when_parsed_then_yields_defaults() {
        let parsed: Settings = toml::from_str(&Settings::template()).unwrap();
        assert_eq!(parsed, Settings::default());
    }
}
