//! Custom error types for the v4l2-panel tool.
//!
//! Provides structured errors instead of `Box<dyn Error>`, so callers can
//! distinguish between a device that could not be opened, a single failed
//! ioctl, bad configuration, and invalid command-line values.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all v4l2-panel operations.
#[derive(Debug, Error)]
pub enum PanelError {
    /// The video device node could not be opened.
    #[error("Failed to open {}: {source}", path.display())]
    DeviceOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A V4L2 ioctl was rejected by the driver.
    #[error("{request} failed for control {id:#010x}: {source}")]
    Ioctl {
        request: &'static str,
        id: u32,
        #[source]
        source: nix::errno::Errno,
    },

    /// The configuration file exists but could not be read.
    #[error("Failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`PanelConfig`](crate::PanelConfig).
    #[error("Invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A palette entry is not a `#RRGGBB` or `#RRGGBBAA` string.
    #[error("Invalid color '{0}'. Expected #RRGGBB or #RRGGBBAA")]
    InvalidColor(String),

    /// A value argument given for a control is not an integer.
    #[error("Invalid value '{value}' for \"{name}\": not an integer")]
    InvalidValue { name: String, value: String },

    /// The window host failed to create or present its surface.
    #[error("Window error: {0}")]
    Window(String),

    /// No usable font could be loaded for the window host.
    #[error("Font error: {0}")]
    Font(String),
}
