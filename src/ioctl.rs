//! V4L2 ioctl transport.
//!
//! Every control request is a single `ioctl(2)` on the open device node.
//! Requests interrupted by a signal are retried; any other errno is handed
//! back to the caller untouched.

use std::os::fd::AsRawFd;
use std::os::raw::c_int;

use nix::errno::Errno;

use crate::device::V4l2Device;
use crate::error::PanelError;
use crate::protocol::*;

nix::ioctl_readwrite!(vidioc_g_ctrl, VIDIOC_MAGIC, VIDIOC_G_CTRL_NR, RawControl);
nix::ioctl_readwrite!(vidioc_s_ctrl, VIDIOC_MAGIC, VIDIOC_S_CTRL_NR, RawControl);
nix::ioctl_readwrite!(vidioc_queryctrl, VIDIOC_MAGIC, VIDIOC_QUERYCTRL_NR, RawQueryCtrl);
nix::ioctl_readwrite!(vidioc_querymenu, VIDIOC_MAGIC, VIDIOC_QUERYMENU_NR, RawQueryMenu);

type IoctlFn<T> = unsafe fn(c_int, *mut T) -> nix::Result<c_int>;

/// Issue an ioctl, retrying while it fails with `EINTR`.
fn xioctl<T>(request: IoctlFn<T>, fd: c_int, data: &mut T) -> Result<(), Errno> {
    loop {
        // SAFETY: `data` is a live, exclusively borrowed kernel ABI struct
        // whose size matches the one encoded in the request number.
        match unsafe { request(fd, data) } {
            Err(Errno::EINTR) => continue,
            Err(e) => return Err(e),
            Ok(_) => return Ok(()),
        }
    }
}

/// Low-level V4L2 control requests.
impl V4l2Device {
    /// VIDIOC_QUERYCTRL.  `id` may carry [`CTRL_FLAG_NEXT_CTRL`].
    pub(crate) fn query_ctrl_raw(&self, id: u32) -> Result<RawQueryCtrl, PanelError> {
        let mut query = RawQueryCtrl { id, ..Default::default() };
        xioctl(vidioc_queryctrl, self.file.as_raw_fd(), &mut query)
            .map_err(|source| PanelError::Ioctl { request: "VIDIOC_QUERYCTRL", id, source })?;
        Ok(query)
    }

    /// VIDIOC_QUERYMENU for a single index.
    pub(crate) fn query_menu_raw(&self, id: u32, index: u32) -> Result<RawQueryMenu, PanelError> {
        let mut query = RawQueryMenu { id, index, ..Default::default() };
        xioctl(vidioc_querymenu, self.file.as_raw_fd(), &mut query)
            .map_err(|source| PanelError::Ioctl { request: "VIDIOC_QUERYMENU", id, source })?;
        Ok(query)
    }

    /// VIDIOC_G_CTRL.
    pub(crate) fn get_ctrl_raw(&self, id: u32) -> Result<i32, PanelError> {
        let mut control = RawControl { id, value: 0 };
        xioctl(vidioc_g_ctrl, self.file.as_raw_fd(), &mut control)
            .map_err(|source| PanelError::Ioctl { request: "VIDIOC_G_CTRL", id, source })?;
        Ok(control.value)
    }

    /// VIDIOC_S_CTRL.
    pub(crate) fn set_ctrl_raw(&self, id: u32, value: i32) -> Result<(), PanelError> {
        let mut control = RawControl { id, value };
        xioctl(vidioc_s_ctrl, self.file.as_raw_fd(), &mut control)
            .map_err(|source| PanelError::Ioctl { request: "VIDIOC_S_CTRL", id, source })
    }
}
