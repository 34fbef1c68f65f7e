//! Recording doubles for the drawing surface and the host.

use pagefx_core::{Canvas2d, Color, Size, Vec2};

use crate::host::{EventKind, FrameHandle, Host};
use crate::platform::Platform;

/// A canvas that remembers what was drawn since the last clear.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub size: Size,
    pub clears: usize,
    pub dots: Vec<(Vec2, f32)>,
    pub lines: Vec<(Vec2, Vec2)>,
    /// Control points of stroked curves.
    pub curves: Vec<Vec2>,
}

impl RecordingCanvas {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }
}

impl Canvas2d for RecordingCanvas {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.dots.clear();
        self.lines.clear();
        self.curves.clear();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, _color: Color) {
        self.dots.push((center, radius));
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, _width: f32, _color: Color) {
        self.lines.push((from, to));
    }

    fn stroke_quadratic(&mut self, _from: Vec2, control: Vec2, _to: Vec2, _width: f32, _color: Color) {
        self.curves.push(control);
    }
}

/// A host that records every call a field makes.
#[derive(Debug)]
pub struct MockHost {
    pub surface: Option<RecordingCanvas>,
    pub container: Size,
    pub viewport: Size,
    pub platform: Platform,
    pub next_frame: u64,
    pub pending: Vec<FrameHandle>,
    pub cancelled: Vec<FrameHandle>,
    pub listeners: Vec<EventKind>,
    pub removed: Vec<EventKind>,
}

impl MockHost {
    pub fn new(container: Size) -> Self {
        Self {
            surface: Some(RecordingCanvas::new(Size::default())),
            container,
            viewport: container,
            platform: Platform::new("Mozilla/5.0 (X11; Linux x86_64)", false),
            next_frame: 0,
            pending: Vec::new(),
            cancelled: Vec::new(),
            listeners: Vec::new(),
            removed: Vec::new(),
        }
    }

    pub fn without_surface(container: Size) -> Self {
        Self {
            surface: None,
            ..Self::new(container)
        }
    }

    pub fn mobile(container: Size) -> Self {
        Self {
            platform: Platform::new("Mozilla/5.0 (Linux; Android 14; Pixel 8)", true),
            ..Self::new(container)
        }
    }

    /// Fire the oldest pending frame request, as a display refresh would.
    pub fn take_frame(&mut self) -> Option<FrameHandle> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }

    pub fn canvas(&self) -> &RecordingCanvas {
        self.surface.as_ref().expect("mock host has no surface")
    }
}

impl Host for MockHost {
    type Surface = RecordingCanvas;

    fn surface(&mut self) -> Option<&mut RecordingCanvas> {
        self.surface.as_mut()
    }

    fn set_surface_size(&mut self, size: Size) {
        if let Some(surface) = self.surface.as_mut() {
            surface.size = size;
        }
    }

    fn container_size(&self) -> Size {
        self.container
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn platform(&self) -> &Platform {
        &self.platform
    }

    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_frame);
        self.next_frame += 1;
        self.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|h| *h != handle);
        self.cancelled.push(handle);
    }

    fn add_listener(&mut self, event: EventKind) {
        self.listeners.push(event);
    }

    fn remove_listener(&mut self, event: EventKind) {
        self.listeners.retain(|e| *e != event);
        self.removed.push(event);
    }
}
