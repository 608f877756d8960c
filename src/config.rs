//! Panel configuration: layout constants, palette and window settings.
//!
//! Every field has a default, so a config file only needs the keys it wants
//! to change:
//!
//! ```toml
//! [layout]
//! row_height = 36.0
//!
//! [palette]
//! background = "#1D1F21"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::PanelError;
use crate::geometry::Color;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub layout: Layout,
    pub palette: Palette,
    pub window: WindowConfig,
}

/// Row geometry in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Height of every row, separator included
    pub row_height: f64,
    /// Height of the bar drawn under each control row
    pub separator_height: f64,
    /// Width of the slider button on integer rows
    pub slider_button_width: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Self { row_height: 30.0, separator_height: 2.0, slider_button_width: 60.0 }
    }
}

/// Colors used by every row kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    /// Slider button while it is being dragged
    pub focused: Color,
    /// Captions of inactive or read-only controls
    pub inactive: Color,
    /// Captions of active controls and section labels
    pub caption: Color,
    /// The quit row caption
    pub alert: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::rgb(0x23, 0x2c, 0x31),
            foreground: Color::rgb(0xc5, 0xc8, 0xc6),
            focused: Color::rgb(0xa5, 0xa8, 0xa6),
            inactive: Color::rgb(0x69, 0x6a, 0x6b),
            caption: Color::WHITE,
            alert: Color::RED,
        }
    }
}

/// Settings for the window host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Initial window width; the height follows the row count
    pub width: u32,
    /// TrueType/OpenType font file. Common system fonts are tried when unset.
    pub font: Option<PathBuf>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { title: "v4l2-panel".to_string(), width: 480, font: None }
    }
}

impl PanelConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, PanelError> {
        let text = fs::read_to_string(path)
            .map_err(|source| PanelError::ConfigRead { path: path.to_path_buf(), source })?;
        let config: Self = toml::from_str(&text)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Resolve the configuration to use.
    ///
    /// An explicit path must load.  Otherwise the per-user file is used if
    /// it exists, and defaults if it does not.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, PanelError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// `$XDG_CONFIG_HOME/v4l2-panel/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("v4l2-panel").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_builtin_constants() {
        let config = PanelConfig::default();
        assert_eq!(config.layout.row_height, 30.0);
        assert_eq!(config.layout.separator_height, 2.0);
        assert_eq!(config.layout.slider_button_width, 60.0);
        assert_eq!(config.palette.background.to_string(), "#232C31");
        assert_eq!(config.palette.inactive.to_string(), "#696A6B");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[layout]\nrow_height = 40.0\n\n[palette]\nalert = \"#FF8800\"").unwrap();

        let config = PanelConfig::load(file.path()).unwrap();
        assert_eq!(config.layout.row_height, 40.0);
        assert_eq!(config.layout.slider_button_width, 60.0);
        assert_eq!(config.palette.alert, Color::rgb(0xff, 0x88, 0x00));
        assert_eq!(config.palette.foreground, Palette::default().foreground);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn invalid_color_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[palette]\nbackground = \"navy\"").unwrap();

        assert!(matches!(PanelConfig::load(file.path()), Err(PanelError::ConfigParse(_))));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        assert!(matches!(PanelConfig::discover(Some(&missing)), Err(PanelError::ConfigRead { .. })));
    }

    #[test]
    fn round_trips_through_toml() {
        let config = PanelConfig::default();
        let text = toml::to_string(&config).unwrap();
        assert_eq!(toml::from_str::<PanelConfig>(&text).unwrap(), config);
    }
}
