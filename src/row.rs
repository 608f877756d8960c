//! The row document the panel draws and hit-tests.
//!
//! A panel is a `Vec<Row<C>>`: one row per control, a caption row in front
//! of every menu, and a single quit row at the end.  The sequence is never
//! patched in place; a reload builds a new one.

use crate::control::{Control, ControlKind};

/// One line of the panel.
#[derive(Debug, Clone, PartialEq)]
pub enum Row<C> {
    Control(C),
    Label(String),
    Quit,
}

impl<C: Control> Row<C> {
    pub fn as_control(&self) -> Option<&C> {
        match self {
            Row::Control(ctrl) => Some(ctrl),
            _ => None,
        }
    }

    pub fn as_control_mut(&mut self) -> Option<&mut C> {
        match self {
            Row::Control(ctrl) => Some(ctrl),
            _ => None,
        }
    }
}

/// Build the row sequence for a set of controls.
pub fn controls_to_rows<C: Control>(controls: impl IntoIterator<Item = C>) -> Vec<Row<C>> {
    let mut rows = Vec::new();
    for ctrl in controls {
        if ctrl.kind() == ControlKind::Menu {
            rows.push(Row::Label(ctrl.label().to_string()));
        }
        rows.push(Row::Control(ctrl));
    }
    rows.push(Row::Quit);
    rows
}

/// Check the structural invariants of a row sequence: exactly one quit row,
/// at the end, and a label row carrying the menu's name before every menu.
pub fn is_well_formed<C: Control>(rows: &[Row<C>]) -> bool {
    let quits = rows.iter().filter(|row| matches!(row, Row::Quit)).count();
    if quits != 1 || !matches!(rows.last(), Some(Row::Quit)) {
        return false;
    }
    rows.iter().enumerate().all(|(i, row)| match row {
        Row::Control(ctrl) if ctrl.kind() == ControlKind::Menu => {
            matches!(i.checked_sub(1).map(|p| &rows[p]), Some(Row::Label(text)) if text == ctrl.label())
        }
        _ => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{ControlDescriptor, MenuEntry};

    fn ctrl(kind: ControlKind, label: &str) -> ControlDescriptor {
        ControlDescriptor {
            id: 1,
            kind,
            label: label.to_string(),
            min: 0,
            max: 1,
            step: 1,
            current: 0,
            menu_entries: match kind {
                ControlKind::Menu => vec![MenuEntry { label: "A".to_string(), index: 0 }],
                _ => Vec::new(),
            },
            read_only: false,
            inactive: false,
            flags: 0,
        }
    }

    #[test]
    fn menu_rows_get_a_leading_label() {
        let rows = controls_to_rows(vec![
            ctrl(ControlKind::Integer, "Gain"),
            ctrl(ControlKind::Menu, "Power Line Frequency"),
            ctrl(ControlKind::Boolean, "Backlight"),
        ]);

        assert_eq!(rows.len(), 5);
        assert!(matches!(&rows[0], Row::Control(c) if c.label == "Gain"));
        assert!(matches!(&rows[1], Row::Label(t) if t == "Power Line Frequency"));
        assert!(matches!(&rows[2], Row::Control(c) if c.kind == ControlKind::Menu));
        assert!(matches!(&rows[3], Row::Control(c) if c.label == "Backlight"));
        assert!(matches!(rows[4], Row::Quit));
        assert!(is_well_formed(&rows));
    }

    #[test]
    fn no_controls_still_has_quit() {
        let rows = controls_to_rows(Vec::<ControlDescriptor>::new());
        assert_eq!(rows, vec![Row::Quit]);
        assert!(is_well_formed(&rows));
    }

    #[test]
    fn malformed_sequences_are_detected() {
        let menu = ctrl(ControlKind::Menu, "Mode");
        assert!(!is_well_formed(&[Row::Control(menu.clone()), Row::Quit]));
        assert!(!is_well_formed(&[Row::Label("Other".to_string()), Row::Control(menu.clone()), Row::Quit]));
        assert!(!is_well_formed::<ControlDescriptor>(&[Row::Quit, Row::Quit]));
        assert!(!is_well_formed::<ControlDescriptor>(&[Row::Quit, Row::Label("x".to_string())]));
        assert!(!is_well_formed::<ControlDescriptor>(&[]));
    }
}
