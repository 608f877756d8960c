//! Glue between a [`ControlBackend`] and the panel, plus the two
//! non-interactive modes: listing controls and assigning values by name.

use std::io::{self, Write};

use log::{debug, warn};

use crate::backend::ControlBackend;
use crate::control::{Control, ControlDescriptor, ControlKind, describe_flags};
use crate::error::PanelError;
use crate::panel::Applier;
use crate::row::{Row, controls_to_rows};

/// Enumerate `backend` and build the panel's row sequence from it.
pub fn load_rows<B: ControlBackend + ?Sized>(backend: &B) -> Vec<Row<ControlDescriptor>> {
    controls_to_rows(backend.enumerate())
}

/// Applies panel changes to a device.
///
/// A successful write updates the in-memory value; a failed one is logged
/// and leaves it alone.  Boolean and menu changes re-enumerate the device
/// so newly (in)active controls show up.
pub struct DeviceApplier<B> {
    backend: B,
}

impl<B: ControlBackend> DeviceApplier<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: ControlBackend> Applier<ControlDescriptor> for DeviceApplier<B> {
    fn apply(&mut self, control: &mut ControlDescriptor, value: i32) -> Option<Vec<Row<ControlDescriptor>>> {
        match self.backend.write(control.id, value) {
            Ok(()) => control.set_current(value),
            Err(e) => warn!("Failed to set \"{}\" to {}: {}", control.label, value, e),
        }

        if control.kind().invalidates_rows() {
            debug!("Reloading controls after change to \"{}\"", control.label);
            Some(load_rows(&self.backend))
        } else {
            None
        }
    }
}

/// Parse `NAME VALUE` argument pairs, rejecting non-integer values.
pub fn parse_assignments(args: &[String]) -> Vec<Result<(String, i32), PanelError>> {
    args.chunks(2)
        .map(|pair| {
            let name = pair[0].clone();
            let value = pair.get(1).cloned().unwrap_or_default();
            match value.trim().parse::<i32>() {
                Ok(v) => Ok((name, v)),
                Err(_) => Err(PanelError::InvalidValue { name, value }),
            }
        })
        .collect()
}

/// Assign values to controls by exact label match.
///
/// Each applied pair is echoed to `out` as `"NAME" = VALUE`.  Names that
/// match no control are skipped.  Invalid values and failed writes do not
/// stop the remaining pairs; they are returned to the caller.
pub fn apply_assignments<B, W>(backend: &B, args: &[String], out: &mut W) -> io::Result<Vec<PanelError>>
where
    B: ControlBackend + ?Sized,
    W: Write,
{
    let controls = backend.enumerate();
    let mut failures = Vec::new();

    for assignment in parse_assignments(args) {
        let (name, value) = match assignment {
            Ok(pair) => pair,
            Err(e) => {
                failures.push(e);
                continue;
            }
        };
        for ctrl in controls.iter().filter(|c| c.label == name) {
            match backend.write(ctrl.id, value) {
                Ok(()) => writeln!(out, "\"{}\" = {}", name, value)?,
                Err(e) => failures.push(e),
            }
        }
    }

    Ok(failures)
}

/// Print every control with its range, value, flags and menu entries.
pub fn write_listing<W: Write>(controls: &[ControlDescriptor], out: &mut W) -> io::Result<()> {
    let width = controls.iter().map(|c| c.label.len()).max().unwrap_or(0);

    for ctrl in controls {
        write!(out, "{:width$} : {:4} ", ctrl.label, ctrl.kind, width = width)?;
        match ctrl.kind {
            ControlKind::Integer => {
                write!(out, "[{}, {}] step {} = {}", ctrl.min, ctrl.max, ctrl.step, ctrl.current)?;
            }
            ControlKind::Boolean => write!(out, "= {}", ctrl.current != 0)?,
            ControlKind::Menu => match ctrl.current_entry() {
                Some(entry) => write!(out, "= {} ({})", ctrl.current, entry.label)?,
                None => write!(out, "= {}", ctrl.current)?,
            },
        }
        if ctrl.flags != 0 {
            write!(out, " flags={}", describe_flags(ctrl.flags))?;
        }
        writeln!(out)?;

        for entry in &ctrl.menu_entries {
            writeln!(out, "{:width$}     {}: {}", "", entry.index, entry.label, width = width)?;
        }
    }
    Ok(())
}
