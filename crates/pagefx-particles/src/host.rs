//! Capabilities a particle field needs from whatever displays it.

use pagefx_core::{Canvas2d, Size};

use crate::platform::Platform;

/// Identifies one pending frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Events a field subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Resize,
    PointerMove,
    DeviceOrientation,
}

/// The display a [`ParticleField`](crate::ParticleField) runs in.
///
/// The host delivers subscribed events by calling the field's `on_*` methods
/// and fires requested frames by calling
/// [`on_frame`](crate::ParticleField::on_frame).
pub trait Host {
    type Surface: Canvas2d;

    /// The field's drawing surface, if the platform can provide one.
    fn surface(&mut self) -> Option<&mut Self::Surface>;

    /// Resize the drawing surface.
    fn set_surface_size(&mut self, size: Size);

    /// Current layout box of the element containing the surface.
    fn container_size(&self) -> Size;

    /// Current size of the whole viewport, used as the pointer's frame of reference.
    fn viewport_size(&self) -> Size;

    fn platform(&self) -> &Platform;

    /// Ask for a call to `on_frame` at the next display refresh.
    fn request_frame(&mut self) -> FrameHandle;

    fn cancel_frame(&mut self, handle: FrameHandle);

    fn add_listener(&mut self, event: EventKind);

    fn remove_listener(&mut self, event: EventKind);
}
