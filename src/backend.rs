//! Device control backend contract and the enumeration walk built on it.
//!
//! A backend answers four primitive requests (query a control, query one menu
//! index, read a value, write a value).  Enumeration itself is provided on
//! top of those primitives so every backend walks classes, skips disabled
//! controls and probes menus the same way.

use log::{debug, warn};

use crate::control::{ControlDescriptor, ControlInfo, ControlKind, MenuEntry};
use crate::error::PanelError;
use crate::protocol::*;

/// Enumeration and mutation of a device's controls.
pub trait ControlBackend {
    /// Query a control by id.  With [`CTRL_FLAG_NEXT_CTRL`] set, answers the
    /// first control whose id is greater than `id & !CTRL_FLAG_NEXT_CTRL`.
    fn query_control(&self, id: u32) -> Option<ControlInfo>;

    /// Query the label of one menu index.  `None` if the index is rejected.
    fn query_menu(&self, id: u32, index: u32) -> Option<String>;

    /// Read the current value of a control.
    fn read(&self, id: u32) -> Result<i32, PanelError>;

    /// Request a new value.  The device may clamp it.
    fn write(&self, id: u32, value: i32) -> Result<(), PanelError>;

    /// Enumerate every displayable control, class by class.
    fn enumerate(&self) -> Vec<ControlDescriptor> {
        let mut controls = Vec::new();
        for &class in CONTROL_CLASSES {
            enumerate_class(self, class, &mut controls);
        }
        if controls.is_empty() {
            warn!("No controls found; is this a V4L2 capture device?");
        } else {
            debug!("Enumerated {} controls", controls.len());
        }
        controls
    }

    /// Probe every menu index in `[min, max]`, keeping the accepted ones.
    fn enumerate_menu(&self, id: u32, min: i32, max: i32) -> Vec<MenuEntry> {
        if max < min {
            return Vec::new();
        }
        (min.max(0)..=max)
            .filter_map(|index| {
                let index = index as u32;
                self.query_menu(id, index).map(|label| MenuEntry { label, index })
            })
            .collect()
    }
}

fn enumerate_class<B: ControlBackend + ?Sized>(backend: &B, class: u32, out: &mut Vec<ControlDescriptor>) {
    let mut next = class | CTRL_FLAG_NEXT_CTRL;

    while let Some(info) = backend.query_control(next) {
        if id_to_class(info.id) != class {
            break;
        }
        next = info.id | CTRL_FLAG_NEXT_CTRL;

        if info.flags & CTRL_FLAG_DISABLED != 0 {
            continue;
        }
        let Some(kind) = ControlKind::from_raw(info.kind) else {
            debug!("Skipping \"{}\": unsupported type {}", info.name, info.kind);
            continue;
        };

        let current = match backend.read(info.id) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read \"{}\": {}", info.name, e);
                info.min
            }
        };
        let menu_entries = match kind {
            ControlKind::Menu => backend.enumerate_menu(info.id, info.min, info.max),
            _ => Vec::new(),
        };

        if let Some(ctrl) = ControlDescriptor::from_info(info, current, menu_entries) {
            out.push(ctrl);
        }
    }
}
