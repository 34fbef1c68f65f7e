//! Terminal host for the particle field.
//!
//! Each terminal cell stands for an 8x16 block of virtual pixels so the
//! field's pixel-based options (density, proximity) behave as they would on a
//! page. Shapes are recorded during a frame and painted with a braille canvas.

use std::collections::HashSet;
use std::io::{self, Write};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use log::warn;
use pagefx_core::{Canvas2d, Color, Size, Vec2};
use pagefx_particles::{EventKind, FrameHandle, Host, Platform};
use ratatui::{
    Frame,
    layout::Rect,
    symbols::Marker,
    widgets::canvas::{Canvas, Context, Line, Points},
};

/// Virtual pixels per terminal column.
pub const PIXELS_PER_COLUMN: f32 = 8.0;

/// Virtual pixels per terminal row.
pub const PIXELS_PER_ROW: f32 = 16.0;

/// Segments used to approximate a quadratic curve.
const CURVE_SEGMENTS: usize = 8;

/// User agent reported by the terminal host. Classified as desktop.
const USER_AGENT: &str = concat!("pagefx-terminal/", env!("CARGO_PKG_VERSION"));

/// Convert a terminal cell to the virtual pixel at its center.
pub fn cell_center(column: u16, row: u16) -> Vec2 {
    Vec2::new(
        (column as f32 + 0.5) * PIXELS_PER_COLUMN,
        (row as f32 + 0.5) * PIXELS_PER_ROW,
    )
}

/// Virtual pixel size of a `columns` x `rows` terminal area.
pub fn area_size(columns: u16, rows: u16) -> Size {
    Size::new(
        columns as f32 * PIXELS_PER_COLUMN,
        rows as f32 * PIXELS_PER_ROW,
    )
}

#[derive(Debug, Clone, PartialEq)]
enum Shape {
    Dot(Vec2, Color),
    Line(Vec2, Vec2, Color),
}

/// A canvas that records shapes until the next paint.
#[derive(Debug, Default)]
pub struct TerminalCanvas {
    size: Size,
    shapes: Vec<Shape>,
}

impl TerminalCanvas {
    /// Paint the recorded shapes into `area`.
    pub fn paint(&self, frame: &mut Frame, area: Rect) {
        let width = self.size.width as f64;
        let height = self.size.height as f64;
        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| self.draw_shapes(ctx, height));
        frame.render_widget(canvas, area);
    }

    /// The canvas y axis points up; surface y points down.
    fn draw_shapes(&self, ctx: &mut Context, height: f64) {
        for shape in &self.shapes {
            match *shape {
                Shape::Dot(center, color) => ctx.draw(&Points {
                    coords: &[(center.x as f64, height - center.y as f64)],
                    color: color.into(),
                }),
                Shape::Line(from, to, color) => ctx.draw(&Line::new(
                    from.x as f64,
                    height - from.y as f64,
                    to.x as f64,
                    height - to.y as f64,
                    color.into(),
                )),
            }
        }
    }

    #[cfg(test)]
    fn shape_count(&self) -> usize {
        self.shapes.len()
    }
}

impl Canvas2d for TerminalCanvas {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.shapes.clear();
    }

    fn fill_circle(&mut self, center: Vec2, _radius: f32, color: Color) {
        // A dot is smaller than a braille cell at this scale
        self.shapes.push(Shape::Dot(center, color));
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, _width: f32, color: Color) {
        self.shapes.push(Shape::Line(from, to, color));
    }

    fn stroke_quadratic(&mut self, from: Vec2, control: Vec2, to: Vec2, _width: f32, color: Color) {
        let point = |t: f32| {
            let u = 1.0 - t;
            from * (u * u) + control * (2.0 * u * t) + to * (t * t)
        };
        let mut previous = from;
        for step in 1..=CURVE_SEGMENTS {
            let next = point(step as f32 / CURVE_SEGMENTS as f32);
            self.shapes.push(Shape::Line(previous, next, color));
            previous = next;
        }
    }
}

/// Keeps terminal mouse reporting on while alive.
pub struct MouseCapture<W: Write> {
    writer: W,
}

impl<W: Write> MouseCapture<W> {
    pub fn enable(mut writer: W) -> io::Result<Self> {
        execute!(writer, EnableMouseCapture)?;
        Ok(Self { writer })
    }
}

impl<W: Write> Drop for MouseCapture<W> {
    fn drop(&mut self) {
        if let Err(err) = execute!(self.writer, DisableMouseCapture) {
            warn!("failed to disable mouse capture: {err}");
        }
    }
}

/// Hosts a particle field in the terminal.
#[derive(Debug)]
pub struct TerminalHost {
    canvas: TerminalCanvas,
    columns: u16,
    rows: u16,
    platform: Platform,
    pending_frame: Option<FrameHandle>,
    next_frame: u64,
    listeners: HashSet<EventKind>,
}

impl TerminalHost {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            canvas: TerminalCanvas::default(),
            columns,
            rows,
            platform: Platform::new(USER_AGENT, false),
            pending_frame: None,
            next_frame: 0,
            listeners: HashSet::new(),
        }
    }

    /// Record a new terminal size.
    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.columns = columns;
        self.rows = rows;
    }

    /// Consume the pending frame request, if any.
    pub fn take_frame(&mut self) -> Option<FrameHandle> {
        self.pending_frame.take()
    }

    pub fn is_listening(&self, event: EventKind) -> bool {
        self.listeners.contains(&event)
    }

    pub fn canvas(&self) -> &TerminalCanvas {
        &self.canvas
    }
}

impl Host for TerminalHost {
    type Surface = TerminalCanvas;

    fn surface(&mut self) -> Option<&mut TerminalCanvas> {
        if self.columns == 0 || self.rows == 0 {
            return None;
        }
        Some(&mut self.canvas)
    }

    fn set_surface_size(&mut self, size: Size) {
        self.canvas.size = size;
        self.canvas.clear();
    }

    fn container_size(&self) -> Size {
        area_size(self.columns, self.rows)
    }

    fn viewport_size(&self) -> Size {
        self.container_size()
    }

    fn platform(&self) -> &Platform {
        &self.platform
    }

    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_frame);
        self.next_frame += 1;
        self.pending_frame = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending_frame == Some(handle) {
            self.pending_frame = None;
        }
    }

    fn add_listener(&mut self, event: EventKind) {
        self.listeners.insert(event);
    }

    fn remove_listener(&mut self, event: EventKind) {
        self.listeners.remove(&event);
    }
}

#[cfg(test)]
mod tests {
    use pagefx_particles::{ParticleField, ParticleFieldConfig};

    use super::*;

    #[test]
    fn test_cell_mapping() {
        assert_eq!(cell_center(0, 0), Vec2::new(4.0, 8.0));
        assert_eq!(area_size(100, 50), Size::new(800.0, 800.0));
    }

    #[test]
    fn test_terminal_is_desktop() {
        let host = TerminalHost::new(80, 24);
        assert!(host.platform().is_desktop());
    }

    #[test]
    fn test_curve_is_segmented() {
        let mut canvas = TerminalCanvas::default();
        canvas.stroke_quadratic(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(20.0, 0.0),
            1.0,
            Color::WHITE,
        );
        assert_eq!(canvas.shape_count(), CURVE_SEGMENTS);
        let Some(Shape::Line(from, to, _)) = canvas.shapes.last() else {
            panic!("expected a line segment");
        };
        assert!((from.x - 17.5).abs() < 1e-4);
        assert!((from.y - 2.1875).abs() < 1e-4);
        assert_eq!(*to, Vec2::new(20.0, 0.0));
    }

    #[test]
    fn test_field_runs_in_terminal() {
        let mut field =
            ParticleField::new(TerminalHost::new(100, 50), ParticleFieldConfig::default())
                .with_seed(5);
        field.mount();
        assert_eq!(field.particles().len(), 64);
        assert!(field.host().is_listening(EventKind::Resize));
        assert!(!field.host().is_listening(EventKind::DeviceOrientation));

        assert!(field.host_mut().take_frame().is_some());
        let stats = field.on_frame().unwrap();
        assert_eq!(stats.dots, 64);
        assert!(field.host().canvas().shape_count() >= 64);

        field.destroy();
        assert!(field.host_mut().take_frame().is_none());
        assert!(!field.host().is_listening(EventKind::PointerMove));
    }

    #[test]
    fn test_mouse_capture_released_on_early_return() {
        let mut out = Vec::new();
        let result: io::Result<()> = (|| {
            let _capture = MouseCapture::enable(&mut out)?;
            Err(io::Error::other("draw failed"))
        })();
        assert!(result.is_err());

        let written = String::from_utf8(out).unwrap();
        let enabled = written.find("\x1b[?1000h").unwrap();
        let disabled = written.find("\x1b[?1000l").unwrap();
        assert!(enabled < disabled);
    }

    #[test]
    fn test_empty_terminal_has_no_surface() {
        let mut field =
            ParticleField::new(TerminalHost::new(0, 0), ParticleFieldConfig::default());
        field.mount();
        assert_eq!(field.state(), pagefx_particles::FieldState::Uninitialized);
    }
}
