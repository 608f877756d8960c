//! Control descriptors and the capability interface the panel consumes.
//!
//! [`ControlDescriptor`] is what enumeration produces for one device control.
//! The panel never looks at it directly: it goes through the [`Control`]
//! trait, so any backend that can answer those questions can be displayed.

use crate::protocol::*;

/// The control kinds the panel knows how to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Integer,
    Boolean,
    Menu,
}

impl ControlKind {
    /// Map a V4L2 control type code, dropping kinds the panel cannot show.
    pub fn from_raw(kind: u32) -> Option<Self> {
        match kind {
            CTRL_TYPE_INTEGER => Some(Self::Integer),
            CTRL_TYPE_BOOLEAN => Some(Self::Boolean),
            CTRL_TYPE_MENU => Some(Self::Menu),
            _ => None,
        }
    }

    /// Whether changing a control of this kind can change which other
    /// controls are active, forcing a full reload.
    pub fn invalidates_rows(self) -> bool {
        matches!(self, Self::Boolean | Self::Menu)
    }
}

impl std::fmt::Display for ControlKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Self::Integer => "int",
            Self::Boolean => "bool",
            Self::Menu => "menu",
        })
    }
}

/// Inclusive numeric range of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueRange {
    pub min: i32,
    pub max: i32,
    pub step: i32,
}

/// One selectable state of a menu control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: String,
    pub index: u32,
}

/// What the panel needs to know about a control.
pub trait Control {
    fn is_active(&self) -> bool;
    fn kind(&self) -> ControlKind;
    fn label(&self) -> &str;
    fn range(&self) -> ValueRange;
    fn current(&self) -> i32;
    fn set_current(&mut self, value: i32);
    fn menu_entries(&self) -> &[MenuEntry];
}

/// Raw answer to a control query, before kind filtering and value reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlInfo {
    pub id: u32,
    pub kind: u32,
    pub name: String,
    pub min: i32,
    pub max: i32,
    pub step: i32,
    pub flags: u32,
}

impl From<&RawQueryCtrl> for ControlInfo {
    fn from(raw: &RawQueryCtrl) -> Self {
        Self {
            id: raw.id,
            kind: raw.kind,
            name: decode_name(&raw.name),
            min: raw.minimum,
            max: raw.maximum,
            step: raw.step,
            flags: raw.flags,
        }
    }
}

/// A device control as produced by one enumeration pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlDescriptor {
    pub id: u32,
    pub kind: ControlKind,
    pub label: String,
    pub min: i32,
    pub max: i32,
    pub step: i32,
    pub current: i32,
    pub menu_entries: Vec<MenuEntry>,
    pub read_only: bool,
    pub inactive: bool,
    pub flags: u32,
}

impl ControlDescriptor {
    /// Build a descriptor from a query answer. Returns `None` for kinds the
    /// panel does not display.
    pub fn from_info(info: ControlInfo, current: i32, menu_entries: Vec<MenuEntry>) -> Option<Self> {
        let kind = ControlKind::from_raw(info.kind)?;
        Some(Self {
            id: info.id,
            kind,
            label: info.name,
            min: info.min,
            max: info.max,
            step: info.step,
            current,
            menu_entries,
            read_only: info.flags & CTRL_FLAG_READ_ONLY != 0,
            inactive: info.flags & CTRL_FLAG_INACTIVE != 0,
            flags: info.flags,
        })
    }

    /// Label of the menu entry matching the current value, if any.
    pub fn current_entry(&self) -> Option<&MenuEntry> {
        self.menu_entries
            .iter()
            .find(|entry| i64::from(entry.index) == i64::from(self.current))
    }
}

impl Control for ControlDescriptor {
    fn is_active(&self) -> bool {
        !self.read_only && !self.inactive
    }

    fn kind(&self) -> ControlKind {
        self.kind
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn range(&self) -> ValueRange {
        ValueRange { min: self.min, max: self.max, step: self.step }
    }

    fn current(&self) -> i32 {
        self.current
    }

    fn set_current(&mut self, value: i32) {
        self.current = value;
    }

    fn menu_entries(&self) -> &[MenuEntry] {
        &self.menu_entries
    }
}

/// Comma-separated names of the flag bits set in `flags`.
pub fn describe_flags(flags: u32) -> String {
    CTRL_FLAG_NAMES
        .iter()
        .filter(|(bit, _)| flags & bit != 0)
        .map(|(_, name)| *name)
        .collect::<Vec<_>>()
        .join(",")
}
