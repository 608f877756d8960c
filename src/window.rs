//! Window host for the panel (feature `gui`).
//!
//! A `winit` window whose contents are rasterized on the CPU: rectangles go
//! through a `tiny-skia` pixmap, text through `fontdue`, and the finished
//! frame is handed to the compositor with `softbuffer`.

use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use fontdue::{Font, FontSettings};
use log::{debug, info};
use tiny_skia::{Paint, Pixmap, Transform};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::config::WindowConfig;
use crate::control::Control;
use crate::error::PanelError;
use crate::geometry::{Align, Color, Point, Rect};
use crate::panel::{Applier, ButtonState, Flow, Panel, PointerButton};
use crate::surface::Surface;

/// Fonts tried, in order, when the config does not name one.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
];

fn load_font(configured: Option<&Path>) -> Result<Font, PanelError> {
    let candidates: Vec<PathBuf> = match configured {
        Some(path) => vec![path.to_path_buf()],
        None => FONT_CANDIDATES.iter().map(PathBuf::from).collect(),
    };

    for path in &candidates {
        let Ok(bytes) = std::fs::read(path) else {
            continue;
        };
        match Font::from_bytes(bytes, FontSettings::default()) {
            Ok(font) => {
                info!("Using font {}", path.display());
                return Ok(font);
            }
            Err(e) => debug!("Skipping font {}: {}", path.display(), e),
        }
    }
    Err(PanelError::Font(match configured {
        Some(path) => format!("could not load {}", path.display()),
        None => "no system font found; set [window] font in the config".to_string(),
    }))
}

/// CPU raster target implementing [`Surface`].
struct Canvas {
    window: Rc<Window>,
    pixmap: Pixmap,
    font: Font,
}

impl Canvas {
    fn resize(&mut self, width: u32, height: u32) {
        if self.pixmap.width() == width && self.pixmap.height() == height {
            return;
        }
        if let Some(pixmap) = Pixmap::new(width, height) {
            self.pixmap = pixmap;
        }
    }

    fn text_width(&self, text: &str, px: f32) -> f32 {
        text.chars().map(|ch| self.font.metrics(ch, px).advance_width).sum()
    }

    /// Blend a coverage bitmap at (x, y) in `color`.
    fn blend_glyph(&mut self, x: i32, y: i32, width: usize, coverage: &[u8], color: Color) {
        let (pw, ph) = (self.pixmap.width() as i32, self.pixmap.height() as i32);
        let data = self.pixmap.data_mut();

        for (row, line) in coverage.chunks_exact(width.max(1)).enumerate() {
            let py = y + row as i32;
            if py < 0 || py >= ph {
                continue;
            }
            for (col, &cov) in line.iter().enumerate() {
                let px = x + col as i32;
                if px < 0 || px >= pw || cov == 0 {
                    continue;
                }
                let alpha = u32::from(cov) * u32::from(color.a) / 255;
                let offset = ((py * pw + px) * 4) as usize;
                for (channel, src) in [color.r, color.g, color.b].into_iter().enumerate() {
                    let dst = u32::from(data[offset + channel]);
                    data[offset + channel] = ((u32::from(src) * alpha + dst * (255 - alpha)) / 255) as u8;
                }
                let dst_a = u32::from(data[offset + 3]);
                data[offset + 3] = (alpha + dst_a * (255 - alpha) / 255) as u8;
            }
        }
    }
}

impl Surface for Canvas {
    fn size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(rect) = tiny_skia::Rect::from_ltrb(rect.a.x as f32, rect.a.y as f32, rect.b.x as f32, rect.b.y as f32)
        else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = false;
        self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    fn draw_text(&mut self, rect: Rect, color: Color, text: &str, size: u32, align: Align) {
        let available = rect.width() as f32;
        let mut px = size as f32;
        let natural = self.text_width(text, px);
        if natural > available && natural > 0.0 {
            px *= available / natural;
        }
        if px < 1.0 {
            return;
        }
        let width = self.text_width(text, px);

        let (ascent, descent) = self.font.horizontal_line_metrics(px).map_or((px * 0.8, -px * 0.2), |m| (m.ascent, m.descent));
        let baseline = rect.a.y as f32 + (rect.height() as f32 - (ascent - descent)) / 2.0 + ascent;
        let mut pen = match align {
            Align::Left => rect.a.x as f32,
            Align::Center => rect.a.x as f32 + (available - width) / 2.0,
            Align::Right => rect.b.x as f32 - width,
        };

        for ch in text.chars() {
            let (metrics, coverage) = self.font.rasterize(ch, px);
            let x = (pen + metrics.xmin as f32).round() as i32;
            let y = (baseline - metrics.height as f32 - metrics.ymin as f32).round() as i32;
            self.blend_glyph(x, y, metrics.width, &coverage, color);
            pen += metrics.advance_width;
        }
    }

    fn request_repaint(&mut self) {
        self.window.request_redraw();
    }
}

struct WindowState {
    window: Rc<Window>,
    surface: softbuffer::Surface<Rc<Window>, Rc<Window>>,
    canvas: Canvas,
}

impl WindowState {
    fn redraw<C: Control, A: Applier<C>>(&mut self, panel: &Panel<C, A>) -> Result<(), PanelError> {
        let size = self.window.inner_size();
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
            return Ok(());
        };

        self.canvas.resize(size.width, size.height);
        panel.refresh(&mut self.canvas);

        self.surface.resize(width, height).map_err(|e| PanelError::Window(e.to_string()))?;
        let mut buffer = self.surface.buffer_mut().map_err(|e| PanelError::Window(e.to_string()))?;
        for (dst, px) in buffer.iter_mut().zip(self.canvas.pixmap.data().chunks_exact(4)) {
            *dst = (u32::from(px[0]) << 16) | (u32::from(px[1]) << 8) | u32::from(px[2]);
        }
        buffer.present().map_err(|e| PanelError::Window(e.to_string()))
    }
}

struct App<C, A> {
    panel: Panel<C, A>,
    config: WindowConfig,
    font: Option<Font>,
    state: Option<WindowState>,
    error: Option<PanelError>,
}

impl<C: Control, A: Applier<C>> App<C, A> {
    fn open(&mut self, event_loop: &ActiveEventLoop) -> Result<(), PanelError> {
        let Some(font) = self.font.take() else {
            return Ok(());
        };
        let height = self.panel.content_height().ceil() as u32;
        let attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(self.config.width, height.max(1)));

        let window = Rc::new(event_loop.create_window(attributes).map_err(|e| PanelError::Window(e.to_string()))?);
        let context = softbuffer::Context::new(window.clone()).map_err(|e| PanelError::Window(e.to_string()))?;
        let surface = softbuffer::Surface::new(&context, window.clone()).map_err(|e| PanelError::Window(e.to_string()))?;
        let pixmap = Pixmap::new(self.config.width.max(1), height.max(1))
            .ok_or_else(|| PanelError::Window("invalid window size".to_string()))?;

        let canvas = Canvas { window: window.clone(), pixmap, font };
        window.request_redraw();
        self.state = Some(WindowState { window, surface, canvas });
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: PanelError) {
        self.error = Some(error);
        event_loop.exit();
    }
}

fn pointer_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        MouseButton::Middle => PointerButton::Middle,
        MouseButton::Back => PointerButton::Other(8),
        MouseButton::Forward => PointerButton::Other(9),
        MouseButton::Other(n) => PointerButton::Other(n),
    }
}

impl<C: Control, A: Applier<C>> ApplicationHandler for App<C, A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        if let Err(e) = self.open(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                if self.panel.on_close() == Flow::Quit {
                    event_loop.exit();
                }
            }
            WindowEvent::Resized(_) => state.window.request_redraw(),
            WindowEvent::CursorMoved { position, .. } => {
                self.panel.on_pointer(&mut state.canvas, Point::new(position.x, position.y));
            }
            WindowEvent::MouseInput { state: pressed, button, .. } => {
                let button_state = match pressed {
                    ElementState::Pressed => ButtonState::Pressed,
                    ElementState::Released => ButtonState::Released,
                };
                if self.panel.on_button(&mut state.canvas, pointer_button(button), button_state) == Flow::Quit {
                    event_loop.exit();
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = state.redraw(&self.panel) {
                    self.fail(event_loop, e);
                }
            }
            _ => {}
        }
    }
}

/// Open a window showing `panel` and run until the user quits.
pub fn run_window<C: Control, A: Applier<C>>(panel: Panel<C, A>, config: &WindowConfig) -> Result<(), PanelError> {
    let font = load_font(config.font.as_deref())?;
    let event_loop = EventLoop::new().map_err(|e| PanelError::Window(e.to_string()))?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App { panel, config: config.clone(), font: Some(font), state: None, error: None };
    event_loop.run_app(&mut app).map_err(|e| PanelError::Window(e.to_string()))?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
