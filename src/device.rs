//! Video device opening and the V4L2 implementation of [`ControlBackend`].
//!
//! [`V4l2Device::open`] opens the device node read/write and returns a handle
//! ready for control ioctls.  The node is closed when the handle is dropped.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::backend::ControlBackend;
use crate::control::ControlInfo;
use crate::error::PanelError;
use crate::protocol::decode_name;

/// Handle to an opened V4L2 device node.
pub struct V4l2Device {
    pub(crate) file: File,
    pub(crate) path: PathBuf,
}

impl V4l2Device {
    /// Open a device node such as `/dev/video0`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PanelError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|source| PanelError::DeviceOpen { path: path.clone(), source })?;

        info!("Opened {}", path.display());
        Ok(Self { file, path })
    }

    /// The path this device was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ControlBackend for V4l2Device {
    fn query_control(&self, id: u32) -> Option<ControlInfo> {
        match self.query_ctrl_raw(id) {
            Ok(raw) => Some(ControlInfo::from(&raw)),
            Err(e) => {
                // EINVAL is how the driver says "no more controls".
                debug!("{}", e);
                None
            }
        }
    }

    fn query_menu(&self, id: u32, index: u32) -> Option<String> {
        let raw = self.query_menu_raw(id, index).ok()?;
        let name = raw.name;
        Some(decode_name(&name))
    }

    fn read(&self, id: u32) -> Result<i32, PanelError> {
        self.get_ctrl_raw(id)
    }

    fn write(&self, id: u32, value: i32) -> Result<(), PanelError> {
        debug!("Writing {} to control {:#010x}", value, id);
        self.set_ctrl_raw(id, value)
    }
}
