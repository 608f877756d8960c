//! The interactive control panel.
//!
//! [`Panel`] owns the live row sequence, draws it onto a [`Surface`], turns
//! pointer events into value changes, and routes every change through an
//! [`Applier`].  Boolean and menu changes can flip other controls between
//! active and inactive, so the applier answers those with a freshly built
//! row sequence that replaces the current one wholesale.
//!
//! Rows are stacked top to bottom; row `i` covers the band
//! `[i * row_height, (i + 1) * row_height)`.

use log::debug;

use crate::config::{Layout, PanelConfig, Palette};
use crate::control::{Control, ControlKind, ValueRange};
use crate::geometry::{Align, Color, Point, Rect};
use crate::row::{Row, is_well_formed};
use crate::surface::Surface;

/// Receives every value change requested by the panel.
pub trait Applier<C> {
    /// Write `value` to `control`.
    ///
    /// Returns a replacement row sequence when the change may have altered
    /// other controls; the panel drops its current rows in favour of it.
    fn apply(&mut self, control: &mut C, value: i32) -> Option<Vec<Row<C>>>;
}

impl<C, F> Applier<C> for F
where
    F: FnMut(&mut C, i32) -> Option<Vec<Row<C>>>,
{
    fn apply(&mut self, control: &mut C, value: i32) -> Option<Vec<Row<C>>> {
        self(control, value)
    }
}

/// Pointer buttons as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Ready,
    /// The integer control at this row index follows the pointer.
    Dragging(usize),
}

/// What the host should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Horizontal center of the slider button for `current`.
pub fn button_center(range: ValueRange, current: i32, width: f64, button_width: f64) -> f64 {
    let span = f64::from(range.max) - f64::from(range.min);
    let fraction = if span > 0.0 { (f64::from(current) - f64::from(range.min)) / span } else { 0.0 };
    button_width / 2.0 + (width - button_width) * fraction
}

/// Value selected by a pointer at `x`; inverse of [`button_center`] up to
/// one step.
pub fn value_at(range: ValueRange, x: f64, width: f64, button_width: f64) -> i32 {
    let step = i64::from(range.step.max(1));
    let count = (i64::from(range.max) - i64::from(range.min) + 1) / step;
    if count <= 0 {
        return range.min;
    }
    let track = width - button_width;
    let fraction = if track > 0.0 { (x - button_width / 2.0) / track } else { 0.0 };
    let slot = ((fraction * count as f64).floor() as i64).clamp(0, count - 1);
    (i64::from(range.min) + slot * step) as i32
}

/// The control panel engine.
pub struct Panel<C, A> {
    rows: Vec<Row<C>>,
    applier: A,
    focus: Option<usize>,
    pointer: Point,
    layout: Layout,
    palette: Palette,
}

impl<C: Control, A: Applier<C>> Panel<C, A> {
    pub fn new(rows: Vec<Row<C>>, applier: A, config: &PanelConfig) -> Self {
        Self {
            rows,
            applier,
            focus: None,
            pointer: Point::new(-1.0, -1.0),
            layout: config.layout,
            palette: config.palette,
        }
    }

    pub fn rows(&self) -> &[Row<C>] {
        &self.rows
    }

    pub fn applier(&self) -> &A {
        &self.applier
    }

    pub fn state(&self) -> PanelState {
        self.focus.map_or(PanelState::Ready, PanelState::Dragging)
    }

    /// The control currently being dragged.
    pub fn focus(&self) -> Option<&C> {
        self.focus.and_then(|i| self.rows.get(i)).and_then(Row::as_control)
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Total height of all rows in pixels.
    pub fn content_height(&self) -> f64 {
        self.rows.len() as f64 * self.layout.row_height
    }

    // --- Drawing ---

    /// Draw every row.
    pub fn refresh<S: Surface>(&self, surface: &mut S) {
        let (width, height) = surface.size();
        surface.fill_rect(Rect::new(0.0, 0.0, f64::from(width), f64::from(height)), self.palette.background);

        for (i, row) in self.rows.iter().enumerate() {
            let y = i as f64 * self.layout.row_height;
            match row {
                Row::Control(ctrl) => self.draw_control(surface, ctrl, self.focus == Some(i), y),
                Row::Label(text) => self.draw_label(surface, text, self.palette.caption, y),
                Row::Quit => self.draw_label(surface, "Quit", self.palette.alert, y),
            }
        }
    }

    fn draw_control<S: Surface>(&self, surface: &mut S, ctrl: &C, focused: bool, y: f64) {
        let width = f64::from(surface.size().0);
        let Layout { row_height, separator_height, slider_button_width } = self.layout;
        let palette = &self.palette;
        let div = Rect::new(0.0, y, width, y + row_height - separator_height);
        let label_color = if ctrl.is_active() { palette.caption } else { palette.inactive };
        let large = (div.height() * 0.6) as u32;
        let small = (div.height() * 0.5) as u32;
        let current = ctrl.current();

        surface.fill_rect(div, palette.background);
        surface.fill_rect(Rect::new(0.0, div.b.y, width, y + row_height), palette.foreground);

        match ctrl.kind() {
            ControlKind::Integer => {
                let range = ctrl.range();
                surface.draw_text(div, label_color, ctrl.label(), large, Align::Center);
                surface.draw_text(div, label_color, &range.min.to_string(), small, Align::Left);
                surface.draw_text(div, label_color, &range.max.to_string(), small, Align::Right);

                let center = button_center(range, current, width, slider_button_width);
                let button = Rect::new(center - slider_button_width / 2.0, div.a.y, center + slider_button_width / 2.0, div.b.y);
                let fill = if focused { palette.focused } else { palette.foreground };
                surface.fill_rect(button, fill);
                surface.draw_text(button, label_color, &current.to_string(), large, Align::Center);
            }
            ControlKind::Boolean => {
                let half = div.b.x / 2.0;
                if current != 0 {
                    surface.fill_rect(Rect::new(div.a.x, div.a.y, half, div.b.y), palette.foreground);
                    surface.draw_text(div, label_color, "On", small, Align::Left);
                } else {
                    surface.fill_rect(Rect::new(half, div.a.y, div.b.x, div.b.y), palette.foreground);
                    surface.draw_text(div, label_color, "Off", small, Align::Right);
                }
                surface.draw_text(div, label_color, ctrl.label(), large, Align::Center);
            }
            ControlKind::Menu => {
                let entries = ctrl.menu_entries();
                if entries.is_empty() {
                    return;
                }
                let segment_width = div.width() / entries.len() as f64;
                for (i, entry) in entries.iter().enumerate() {
                    let x = i as f64 * segment_width;
                    let segment = Rect::new(x, y, x + segment_width, div.b.y);
                    if i64::from(current) == i64::from(entry.index) {
                        surface.fill_rect(segment, palette.foreground);
                    }
                    surface.draw_text(segment, label_color, &entry.label, small, Align::Center);
                    surface.fill_rect(Rect::new(x, y, x + 2.0, div.b.y), palette.foreground);
                }
            }
        }
    }

    fn draw_label<S: Surface>(&self, surface: &mut S, text: &str, color: Color, y: f64) {
        let width = f64::from(surface.size().0);
        let row_height = self.layout.row_height;
        let div = Rect::new(0.0, y, width, y + row_height);

        surface.fill_rect(div, self.palette.background);
        surface.draw_text(div, color, text, (row_height * 0.6) as u32, Align::Center);
    }

    // --- Interaction ---

    /// Pointer moved to `point`.  Drags the focused slider, if any.
    pub fn on_pointer<S: Surface>(&mut self, surface: &mut S, point: Point) {
        self.pointer = point;
        let Some(index) = self.focus else {
            return;
        };
        let Some(ctrl) = self.rows.get(index).and_then(Row::as_control) else {
            self.focus = None;
            return;
        };
        if ctrl.kind() != ControlKind::Integer {
            return;
        }

        let width = f64::from(surface.size().0);
        let value = value_at(ctrl.range(), point.x, width, self.layout.slider_button_width);
        self.apply(index, value);
        surface.request_repaint();
    }

    /// A pointer button changed state at the last known pointer position.
    pub fn on_button<S: Surface>(&mut self, surface: &mut S, button: PointerButton, state: ButtonState) -> Flow {
        if button != PointerButton::Primary {
            return Flow::Continue;
        }
        let y = self.pointer.y;
        if state != ButtonState::Pressed || y < 0.0 || y >= self.content_height() {
            if self.focus.take().is_some() {
                surface.request_repaint();
            }
            return Flow::Continue;
        }

        let index = (y / self.layout.row_height) as usize;
        match self.rows.get(index) {
            Some(Row::Control(_)) => {
                self.press_control(surface, index);
                Flow::Continue
            }
            Some(Row::Quit) => Flow::Quit,
            Some(Row::Label(_)) | None => Flow::Continue,
        }
    }

    /// The window was asked to close.
    pub fn on_close(&mut self) -> Flow {
        Flow::Quit
    }

    fn press_control<S: Surface>(&mut self, surface: &mut S, index: usize) {
        let Some(ctrl) = self.rows[index].as_control() else {
            return;
        };
        if !ctrl.is_active() {
            return;
        }
        let width = f64::from(surface.size().0);

        match ctrl.kind() {
            ControlKind::Integer => {
                let button_width = self.layout.slider_button_width;
                let center = button_center(ctrl.range(), ctrl.current(), width, button_width);
                let top = index as f64 * self.layout.row_height;
                let capture = Rect::new(center - button_width, top, center + button_width, top + self.layout.row_height);
                if capture.contains(self.pointer) {
                    self.focus = Some(index);
                    surface.request_repaint();
                }
            }
            ControlKind::Boolean => {
                let value = i32::from(ctrl.current() == 0);
                self.apply(index, value);
                surface.request_repaint();
            }
            ControlKind::Menu => {
                let entries = ctrl.menu_entries();
                if entries.is_empty() {
                    return;
                }
                let segment_width = width / entries.len() as f64;
                let segment = ((self.pointer.x / segment_width).max(0.0) as usize).min(entries.len() - 1);
                let value = entries[segment].index as i32;
                self.apply(index, value);
                surface.request_repaint();
            }
        }
    }

    /// Route a value change for the control at row `index` through the
    /// applier.  Returns `true` if the row sequence was replaced, in which
    /// case drag focus is dropped.
    pub fn apply(&mut self, index: usize, value: i32) -> bool {
        let Some(ctrl) = self.rows.get_mut(index).and_then(Row::as_control_mut) else {
            return false;
        };
        if !ctrl.is_active() {
            return false;
        }

        match self.applier.apply(ctrl, value) {
            Some(rows) => {
                debug_assert!(is_well_formed(&rows));
                debug!("Rows rebuilt: {} -> {}", self.rows.len(), rows.len());
                self.rows = rows;
                self.focus = None;
                true
            }
            None => false,
        }
    }
}
