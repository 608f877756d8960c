//! V4L2 control protocol constants and kernel ABI structures.
//!
//! All ioctl numbers, control classes, type codes, and flag bits are defined
//! here so the rest of the codebase references named constants instead of
//! raw hex.  Values mirror `<linux/videodev2.h>`.

// ---------------------------------------------------------------------------
// ioctl request numbers (type 'V')
// ---------------------------------------------------------------------------

/// ioctl magic for every VIDIOC_* request.
pub const VIDIOC_MAGIC: u8 = b'V';
/// VIDIOC_G_CTRL sequence number.
pub const VIDIOC_G_CTRL_NR: u8 = 27;
/// VIDIOC_S_CTRL sequence number.
pub const VIDIOC_S_CTRL_NR: u8 = 28;
/// VIDIOC_QUERYCTRL sequence number.
pub const VIDIOC_QUERYCTRL_NR: u8 = 36;
/// VIDIOC_QUERYMENU sequence number.
pub const VIDIOC_QUERYMENU_NR: u8 = 37;

// ---------------------------------------------------------------------------
// Control enumeration
// ---------------------------------------------------------------------------

/// OR-ed into a control id to ask QUERYCTRL for the next control after it.
pub const CTRL_FLAG_NEXT_CTRL: u32 = 0x8000_0000;

/// Mask extracting the class part of a control id (`V4L2_CTRL_ID2CLASS`).
pub const CTRL_CLASS_MASK: u32 = 0x0fff_0000;

/// Extract the class of a control id.
pub const fn id_to_class(id: u32) -> u32 {
    id & CTRL_CLASS_MASK
}

pub const CTRL_CLASS_USER: u32 = 0x0098_0000;
pub const CTRL_CLASS_CODEC: u32 = 0x0099_0000;
pub const CTRL_CLASS_CAMERA: u32 = 0x009a_0000;
pub const CTRL_CLASS_FM_TX: u32 = 0x009b_0000;
pub const CTRL_CLASS_FLASH: u32 = 0x009c_0000;
pub const CTRL_CLASS_JPEG: u32 = 0x009d_0000;
pub const CTRL_CLASS_IMAGE_SOURCE: u32 = 0x009e_0000;
pub const CTRL_CLASS_IMAGE_PROC: u32 = 0x009f_0000;
pub const CTRL_CLASS_DV: u32 = 0x00a0_0000;
pub const CTRL_CLASS_FM_RX: u32 = 0x00a1_0000;
pub const CTRL_CLASS_RF_TUNER: u32 = 0x00a2_0000;
pub const CTRL_CLASS_DETECT: u32 = 0x00a3_0000;
pub const CTRL_CLASS_CODEC_STATELESS: u32 = 0x00a4_0000;
pub const CTRL_CLASS_COLORIMETRY: u32 = 0x00a5_0000;

/// Control classes in the order they are enumerated.
pub const CONTROL_CLASSES: &[u32] = &[
    CTRL_CLASS_USER,
    CTRL_CLASS_CODEC,
    CTRL_CLASS_CAMERA,
    CTRL_CLASS_FM_TX,
    CTRL_CLASS_FLASH,
    CTRL_CLASS_JPEG,
    CTRL_CLASS_IMAGE_SOURCE,
    CTRL_CLASS_IMAGE_PROC,
    CTRL_CLASS_DV,
    CTRL_CLASS_FM_RX,
    CTRL_CLASS_RF_TUNER,
    CTRL_CLASS_DETECT,
    CTRL_CLASS_CODEC_STATELESS,
    CTRL_CLASS_COLORIMETRY,
];

// ---------------------------------------------------------------------------
// Control types (`enum v4l2_ctrl_type`)
// ---------------------------------------------------------------------------

pub const CTRL_TYPE_INTEGER: u32 = 1;
pub const CTRL_TYPE_BOOLEAN: u32 = 2;
pub const CTRL_TYPE_MENU: u32 = 3;

// ---------------------------------------------------------------------------
// Control flags
// ---------------------------------------------------------------------------

pub const CTRL_FLAG_DISABLED: u32 = 0x0001;
pub const CTRL_FLAG_GRABBED: u32 = 0x0002;
pub const CTRL_FLAG_READ_ONLY: u32 = 0x0004;
pub const CTRL_FLAG_UPDATE: u32 = 0x0008;
pub const CTRL_FLAG_INACTIVE: u32 = 0x0010;
pub const CTRL_FLAG_SLIDER: u32 = 0x0020;
pub const CTRL_FLAG_WRITE_ONLY: u32 = 0x0040;
pub const CTRL_FLAG_VOLATILE: u32 = 0x0080;
pub const CTRL_FLAG_HAS_PAYLOAD: u32 = 0x0100;
pub const CTRL_FLAG_EXECUTE_ON_WRITE: u32 = 0x0200;
pub const CTRL_FLAG_MODIFY_LAYOUT: u32 = 0x0400;
pub const CTRL_FLAG_DYNAMIC_ARRAY: u32 = 0x0800;

/// Flag bits paired with their kernel names, in header order.
pub const CTRL_FLAG_NAMES: &[(u32, &str)] = &[
    (CTRL_FLAG_DISABLED, "DISABLED"),
    (CTRL_FLAG_GRABBED, "GRABBED"),
    (CTRL_FLAG_READ_ONLY, "READ_ONLY"),
    (CTRL_FLAG_UPDATE, "UPDATE"),
    (CTRL_FLAG_INACTIVE, "INACTIVE"),
    (CTRL_FLAG_SLIDER, "SLIDER"),
    (CTRL_FLAG_WRITE_ONLY, "WRITE_ONLY"),
    (CTRL_FLAG_VOLATILE, "VOLATILE"),
    (CTRL_FLAG_HAS_PAYLOAD, "HAS_PAYLOAD"),
    (CTRL_FLAG_EXECUTE_ON_WRITE, "EXECUTE_ON_WRITE"),
    (CTRL_FLAG_MODIFY_LAYOUT, "MODIFY_LAYOUT"),
    (CTRL_FLAG_DYNAMIC_ARRAY, "DYNAMIC_ARRAY"),
];

/// Fixed size of the name fields in `v4l2_queryctrl` and `v4l2_querymenu`.
pub const NAME_LEN: usize = 32;

// ---------------------------------------------------------------------------
// Kernel ABI structures
// ---------------------------------------------------------------------------

/// `struct v4l2_queryctrl`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct RawQueryCtrl {
    pub id: u32,
    pub kind: u32,
    pub name: [u8; NAME_LEN],
    pub minimum: i32,
    pub maximum: i32,
    pub step: i32,
    pub default_value: i32,
    pub flags: u32,
    pub reserved: [u32; 2],
}

/// `struct v4l2_querymenu`
///
/// The kernel declares this packed; the name shares storage with an `i64`
/// value used only by integer menus, which are not supported here.
#[repr(C, packed)]
#[derive(Clone, Copy, Default)]
pub struct RawQueryMenu {
    pub id: u32,
    pub index: u32,
    pub name: [u8; NAME_LEN],
    pub reserved: u32,
}

/// `struct v4l2_control`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct RawControl {
    pub id: u32,
    pub value: i32,
}

/// Decode a NUL-padded fixed-size name field.
pub fn decode_name(raw: &[u8]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).into_owned()
}
