//! Scripted in-memory device used by the unit tests.
//!
//! Answers queries the way a V4L2 driver does, including `NEXT_CTRL`
//! walking, so enumeration runs the same code path as against hardware.

use std::cell::{Cell, RefCell};

use nix::errno::Errno;

use crate::backend::ControlBackend;
use crate::control::ControlInfo;
use crate::error::PanelError;
use crate::protocol::*;

#[derive(Debug, Clone)]
pub(crate) struct FakeControl {
    pub info: ControlInfo,
    pub value: i32,
    pub menu: Vec<(u32, &'static str)>,
    pub readable: bool,
    pub writable: bool,
    /// Ids flagged INACTIVE while this control's value differs from
    /// `activating_value`.
    pub deactivates: Vec<u32>,
    pub activating_value: i32,
}

impl FakeControl {
    fn new(id: u32, kind: u32, name: &str, min: i32, max: i32, step: i32, value: i32) -> Self {
        Self {
            info: ControlInfo { id, kind, name: name.to_string(), min, max, step, flags: 0 },
            value,
            menu: Vec::new(),
            readable: true,
            writable: true,
            deactivates: Vec::new(),
            activating_value: 0,
        }
    }

    pub fn integer(id: u32, name: &str, min: i32, max: i32, step: i32, value: i32) -> Self {
        Self::new(id, CTRL_TYPE_INTEGER, name, min, max, step, value)
    }

    pub fn boolean(id: u32, name: &str, value: bool) -> Self {
        Self::new(id, CTRL_TYPE_BOOLEAN, name, 0, 1, 1, i32::from(value))
    }

    pub fn menu(id: u32, name: &str, entries: &[(u32, &'static str)], min: i32, max: i32, value: i32) -> Self {
        let mut ctrl = Self::new(id, CTRL_TYPE_MENU, name, min, max, 1, value);
        ctrl.menu = entries.to_vec();
        ctrl
    }

    pub fn with_flags(mut self, flags: u32) -> Self {
        self.info.flags = flags;
        self
    }

    pub fn with_kind(mut self, kind: u32) -> Self {
        self.info.kind = kind;
        self
    }

    pub fn unreadable(mut self) -> Self {
        self.readable = false;
        self
    }

    pub fn rejecting_writes(mut self) -> Self {
        self.writable = false;
        self
    }

    pub fn deactivating(self, ids: &[u32]) -> Self {
        self.deactivating_unless(0, ids)
    }

    pub fn deactivating_unless(mut self, value: i32, ids: &[u32]) -> Self {
        self.deactivates = ids.to_vec();
        self.activating_value = value;
        self
    }
}

pub(crate) struct FakeDevice {
    controls: RefCell<Vec<FakeControl>>,
    pub writes: RefCell<Vec<(u32, i32)>>,
    pub queries: Cell<usize>,
}

impl FakeDevice {
    pub fn new(mut controls: Vec<FakeControl>) -> Self {
        controls.sort_by_key(|c| c.info.id);
        let device = Self {
            controls: RefCell::new(controls),
            writes: RefCell::new(Vec::new()),
            queries: Cell::new(0),
        };
        device.sync_inactive();
        device
    }

    pub fn value(&self, id: u32) -> Option<i32> {
        self.controls.borrow().iter().find(|c| c.info.id == id).map(|c| c.value)
    }

    fn sync_inactive(&self) {
        let mut controls = self.controls.borrow_mut();
        let links: Vec<(bool, Vec<u32>)> = controls
            .iter()
            .filter(|c| !c.deactivates.is_empty())
            .map(|c| (c.value != c.activating_value, c.deactivates.clone()))
            .collect();
        for (inactive, ids) in links {
            for ctrl in controls.iter_mut().filter(|c| ids.contains(&c.info.id)) {
                if inactive {
                    ctrl.info.flags |= CTRL_FLAG_INACTIVE;
                } else {
                    ctrl.info.flags &= !CTRL_FLAG_INACTIVE;
                }
            }
        }
    }
}

impl ControlBackend for FakeDevice {
    fn query_control(&self, id: u32) -> Option<ControlInfo> {
        self.queries.set(self.queries.get() + 1);
        let controls = self.controls.borrow();
        if id & CTRL_FLAG_NEXT_CTRL != 0 {
            let after = id & !CTRL_FLAG_NEXT_CTRL;
            controls.iter().find(|c| c.info.id > after).map(|c| c.info.clone())
        } else {
            controls.iter().find(|c| c.info.id == id).map(|c| c.info.clone())
        }
    }

    fn query_menu(&self, id: u32, index: u32) -> Option<String> {
        let controls = self.controls.borrow();
        let ctrl = controls.iter().find(|c| c.info.id == id)?;
        ctrl.menu.iter().find(|(i, _)| *i == index).map(|(_, label)| label.to_string())
    }

    fn read(&self, id: u32) -> Result<i32, PanelError> {
        let controls = self.controls.borrow();
        match controls.iter().find(|c| c.info.id == id) {
            Some(ctrl) if ctrl.readable => Ok(ctrl.value),
            Some(_) => Err(PanelError::Ioctl { request: "VIDIOC_G_CTRL", id, source: Errno::EIO }),
            None => Err(PanelError::Ioctl { request: "VIDIOC_G_CTRL", id, source: Errno::EINVAL }),
        }
    }

    fn write(&self, id: u32, value: i32) -> Result<(), PanelError> {
        self.writes.borrow_mut().push((id, value));
        {
            let mut controls = self.controls.borrow_mut();
            let Some(ctrl) = controls.iter_mut().find(|c| c.info.id == id) else {
                return Err(PanelError::Ioctl { request: "VIDIOC_S_CTRL", id, source: Errno::EINVAL });
            };
            if !ctrl.writable {
                return Err(PanelError::Ioctl { request: "VIDIOC_S_CTRL", id, source: Errno::EBUSY });
            }
            ctrl.value = value.clamp(ctrl.info.min, ctrl.info.max);
        }
        self.sync_inactive();
        Ok(())
    }
}
