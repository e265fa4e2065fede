//! Configuration management
//!
//! Settings are grouped into three sections and stored as JSON or TOML,
//! chosen by the file extension:
//!
//! ```toml
//! [field]
//! field_size = 144.0
//! unit = "in"
//! origin = "topLeft"
//! axes = "standard"
//! robot_length = 18.0
//! robot_width = 18.0
//!
//! [export]
//! format = "java-class"
//! library = "rr"
//! kind = "list"
//! class_name = "AutoPath"
//!
//! [editing]
//! rotate_step_deg = 5.0
//! rotate_step_coarse_deg = 15.0
//! snap_step_deg = 15.0
//! heading_wrap = "full"
//! ```

use crate::error::{Result, SettingsError};
use pathpick_core::angle::{ROTATE_STEP_COARSE_DEG, ROTATE_STEP_DEG, SNAP_STEP_DEG};
use pathpick_core::{FieldConfig, HeadingWrap};
use pathpick_editor::{EditSteps, ExportOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const APP_DIR: &str = "pathpick";
const CONFIG_FILE: &str = "config.toml";

/// Interactive editing preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditingSettings {
    /// Keyboard rotation step in degrees
    pub rotate_step_deg: f64,
    /// Keyboard rotation step with the coarse modifier
    pub rotate_step_coarse_deg: f64,
    /// Heading snap step while dragging
    pub snap_step_deg: f64,
    /// Heading display mode for new sessions
    pub heading_wrap: HeadingWrap,
    /// Directory exports are written into, if chosen
    pub output_directory: Option<PathBuf>,
}

impl Default for EditingSettings {
    fn default() -> Self {
        Self {
            rotate_step_deg: ROTATE_STEP_DEG,
            rotate_step_coarse_deg: ROTATE_STEP_COARSE_DEG,
            snap_step_deg: SNAP_STEP_DEG,
            heading_wrap: HeadingWrap::Full,
            output_directory: None,
        }
    }
}

impl EditingSettings {
    /// The increments handed to an editing session.
    pub fn edit_steps(&self) -> EditSteps {
        EditSteps {
            rotate_deg: self.rotate_step_deg,
            rotate_coarse_deg: self.rotate_step_coarse_deg,
            snap_deg: self.snap_step_deg,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub field: FieldConfig,
    pub export: ExportOptions,
    pub editing: EditingSettings,
}

impl Config {
    /// Create new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Default settings file, `<config dir>/pathpick/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
            .ok_or(SettingsError::NoConfigDirectory)
    }

    /// Load configuration from a `.json` or `.toml` file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let format = Format::of(path)?;
        let content = std::fs::read_to_string(path)?;
        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };
        config.validate()?;
        debug!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise return defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!(path = %path.display(), "No configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to a `.json` or `.toml` file, creating parent
    /// directories as needed
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        info!(path = %path.display(), "Configuration saved");
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.field.validate()?;

        if self.export.class_name.trim().is_empty() {
            return Err(SettingsError::InvalidSetting {
                key: "export.class_name",
                reason: "must not be empty".to_string(),
            });
        }

        let steps = [
            ("editing.rotate_step_deg", self.editing.rotate_step_deg),
            ("editing.rotate_step_coarse_deg", self.editing.rotate_step_coarse_deg),
            ("editing.snap_step_deg", self.editing.snap_step_deg),
        ];
        for (key, value) in steps {
            if !(value.is_finite() && value > 0.0 && value <= 180.0) {
                return Err(SettingsError::InvalidSetting {
                    key,
                    reason: format!("{value} is not in (0, 180]"),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            _ => Err(SettingsError::UnsupportedFormat(path.display().to_string())),
        }
    }
}
