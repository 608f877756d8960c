//! V4L2 control panel library.
//!
//! Enumerates the controls of a Video4Linux capture device and presents them
//! as an interactive panel of sliders, toggles and menus.  The panel engine
//! draws through the [`Surface`] trait and never touches a window system
//! directly; the optional `gui` feature provides a window host.
//!
//! # Quick Start
//!
//! ```no_run
//! use v4l2_panel::{ControlBackend, V4l2Device};
//!
//! let device = V4l2Device::open("/dev/video0")?;
//! for ctrl in device.enumerate() {
//!     println!("{} = {}", ctrl.label, ctrl.current);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod backend;
mod config;
mod control;
mod device;
mod error;
mod geometry;
mod host;
mod ioctl;
mod panel;
mod protocol;
mod row;
mod surface;
#[cfg(feature = "gui")]
mod window;

#[cfg(test)]
mod fake;

pub use backend::ControlBackend;
pub use config::{Layout, PanelConfig, Palette, WindowConfig};
pub use control::{Control, ControlDescriptor, ControlInfo, ControlKind, MenuEntry, ValueRange, describe_flags};
pub use device::V4l2Device;
pub use error::PanelError;
pub use geometry::{Align, Color, Point, Rect};
pub use host::{DeviceApplier, apply_assignments, load_rows, parse_assignments, write_listing};
pub use panel::{Applier, ButtonState, Flow, Panel, PanelState, PointerButton, button_center, value_at};
pub use row::{Row, controls_to_rows, is_well_formed};
pub use surface::Surface;
#[cfg(feature = "gui")]
pub use window::run_window;
