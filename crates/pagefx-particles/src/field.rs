//! Particle field lifecycle and frame loop.

use log::{debug, warn};
use pagefx_core::{Size, Vec2};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::ParticleFieldConfig;
use crate::host::{EventKind, FrameHandle, Host};
use crate::particle::{self, DrawStats, FrameContext, Particle};
use crate::platform::Tilt;

/// Lifecycle of a [`ParticleField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    /// Not mounted yet, or mounting found no drawing surface.
    Uninitialized,
    Running,
    Paused,
    Destroyed,
}

type Hook = Box<dyn FnMut()>;

/// An animated particle background bound to one host.
pub struct ParticleField<H: Host> {
    host: H,
    config: ParticleFieldConfig,
    rng: StdRng,
    /// Particle set in creation order.
    particles: Vec<Particle>,
    /// Canvas size the particle set was seeded for.
    canvas: Size,
    /// Last pointer position in viewport coordinates.
    pointer: Option<Vec2>,
    /// Last device tilt, when orientation is being listened to.
    tilt: Option<Tilt>,
    state: FieldState,
    pending_frame: Option<FrameHandle>,
    /// Listeners attached on mount, detached on destroy.
    listeners: Vec<EventKind>,
    on_init: Option<Hook>,
    on_destroy: Option<Hook>,
}

impl<H: Host> ParticleField<H> {
    /// Create an unmounted field.
    pub fn new(host: H, config: ParticleFieldConfig) -> Self {
        Self {
            host,
            config,
            rng: StdRng::from_entropy(),
            particles: Vec::new(),
            canvas: Size::default(),
            pointer: None,
            tilt: None,
            state: FieldState::Uninitialized,
            pending_frame: None,
            listeners: Vec::new(),
            on_init: None,
            on_destroy: None,
        }
    }

    /// Seed particle placement for reproducible layouts.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Called once the field has seeded its particles and started animating.
    pub fn on_init(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_init = Some(Box::new(hook));
        self
    }

    /// Called when a mounted field is destroyed.
    pub fn on_destroy(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_destroy = Some(Box::new(hook));
        self
    }

    /// Seed the particle set, subscribe to events and start the frame loop.
    ///
    /// Without a drawing surface nothing happens and the field stays
    /// uninitialized.
    pub fn mount(&mut self) {
        if self.state != FieldState::Uninitialized {
            return;
        }
        if self.host.surface().is_none() {
            warn!("no drawing surface, particle field not started");
            return;
        }

        let mut events = vec![EventKind::Resize, EventKind::PointerMove];
        if self.host.platform().listens_for_orientation() {
            events.push(EventKind::DeviceOrientation);
        }
        for event in events {
            self.host.add_listener(event);
            self.listeners.push(event);
        }
        debug!("particle field listening for {:?}", self.listeners);

        self.reset();
        self.state = FieldState::Running;
        if let Some(hook) = self.on_init.as_mut() {
            hook();
        }
        self.start();
    }

    /// Advance and redraw one frame, then ask for the next one.
    pub fn on_frame(&mut self) -> Option<DrawStats> {
        self.pending_frame = None;
        if self.state != FieldState::Running {
            return None;
        }

        let ctx = FrameContext {
            canvas: self.canvas,
            viewport: self.host.viewport_size(),
            pointer: self.pointer_position(),
        };
        for particle in &mut self.particles {
            particle::update(particle, &self.config, &ctx);
        }
        let stats = self
            .host
            .surface()
            .map(|surface| particle::draw(&self.particles, &self.config, surface));

        self.start();
        stats
    }

    /// Re-seed for the container's new size.
    pub fn on_resize(&mut self) {
        if !self.is_mounted() {
            return;
        }
        self.reset();
        particle::retain_in_bounds(&mut self.particles, self.canvas);
    }

    /// Record the pointer position, in viewport coordinates.
    pub fn on_pointer_move(&mut self, position: Vec2) {
        self.pointer = Some(position);
    }

    /// Record a device orientation reading, in degrees.
    pub fn on_orientation(&mut self, beta: f32, gamma: f32) {
        if self.listens_for_orientation() {
            self.tilt = Some(Tilt::from_orientation(beta, gamma));
        }
    }

    /// Stop animating, keeping the current particles.
    pub fn pause(&mut self) {
        if self.state == FieldState::Running {
            self.state = FieldState::Paused;
            self.stop();
        }
    }

    pub fn resume(&mut self) {
        if self.state == FieldState::Paused {
            self.state = FieldState::Running;
            self.start();
        }
    }

    /// Replace the options. A mounted field re-seeds its particle set.
    pub fn set_config(&mut self, config: ParticleFieldConfig) {
        if config == self.config {
            return;
        }
        self.config = config;
        if self.is_mounted() {
            self.reset();
        }
    }

    /// Throw away the current particles and seed a fresh set.
    pub fn reseed(&mut self) {
        if self.is_mounted() {
            self.reset();
        }
    }

    /// Cancel the frame loop, run the destroy hook and detach every listener.
    pub fn destroy(&mut self) {
        if self.state == FieldState::Destroyed {
            return;
        }
        let was_mounted = self.is_mounted();
        self.state = FieldState::Destroyed;
        self.stop();

        if was_mounted {
            if let Some(hook) = self.on_destroy.as_mut() {
                hook();
            }
        }
        for event in self.listeners.drain(..) {
            self.host.remove_listener(event);
        }
        debug!("particle field destroyed");
    }

    pub fn state(&self) -> FieldState {
        self.state
    }

    pub fn config(&self) -> &ParticleFieldConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn canvas_size(&self) -> Size {
        self.canvas
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn is_mounted(&self) -> bool {
        matches!(self.state, FieldState::Running | FieldState::Paused)
    }

    fn listens_for_orientation(&self) -> bool {
        self.listeners.contains(&EventKind::DeviceOrientation)
    }

    /// Where parallax is aimed: the tilt mapped onto the viewport when a tilt
    /// reading exists, else the pointer, else the viewport center.
    fn pointer_position(&self) -> Vec2 {
        let viewport = self.host.viewport_size();
        match (self.tilt, self.pointer) {
            (Some(tilt), _) => tilt.to_pointer(viewport),
            (None, Some(pointer)) => pointer,
            (None, None) => viewport.center(),
        }
    }

    /// Size the surface to the container and seed a fresh particle set.
    fn reset(&mut self) {
        self.canvas = self.host.container_size();
        self.host.set_surface_size(self.canvas);
        self.particles = particle::spawn_all(self.canvas, &self.config, &mut self.rng);
        debug!(
            "seeded {} particles for {}x{} canvas",
            self.particles.len(),
            self.canvas.width,
            self.canvas.height
        );
    }

    /// Arm the next frame while running.
    fn start(&mut self) {
        if self.state == FieldState::Running && self.pending_frame.is_none() {
            self.pending_frame = Some(self.host.request_frame());
        }
    }

    /// Cancel the armed frame, if any.
    fn stop(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            self.host.cancel_frame(handle);
        }
    }
}

impl<H: Host> Drop for ParticleField<H> {
    fn drop(&mut self) {
        self.destroy();
    }
}
