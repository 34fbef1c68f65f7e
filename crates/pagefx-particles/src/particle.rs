//! Particle state and the per-frame update and draw steps.

use pagefx_core::{Canvas2d, Size, Vec2};
use rand::Rng;

use crate::config::ParticleFieldConfig;
use crate::speed::calculate_speed;

/// Fraction of the remaining distance the parallax offset closes each frame.
const PARALLAX_EASING: f32 = 0.1;

/// State for a single particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Position without the parallax offset.
    pub position: Vec2,
    /// Displacement per frame.
    pub speed: Vec2,
    /// Depth bucket (1-3). Higher layers shift less under parallax.
    pub layer: u8,
    pub parallax_offset: Vec2,
    pub parallax_target: Vec2,
    /// Creation order within the current particle set.
    pub stack_index: usize,
    pub active: bool,
}

impl Particle {
    /// Where the particle is drawn.
    pub fn visual_position(&self) -> Vec2 {
        self.position + self.parallax_offset
    }
}

/// Inputs shared by every particle during one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Pixel size of the drawing surface.
    pub canvas: Size,
    /// Viewport size, whose center is the parallax rest point.
    pub viewport: Size,
    /// Pointer position in viewport coordinates.
    pub pointer: Vec2,
}

/// What one draw pass put on the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub dots: usize,
    pub links: usize,
}

/// Number of particles for a canvas at `density` pixels per particle.
pub fn particle_count(canvas: Size, density: f32) -> usize {
    if density <= 0.0 || canvas.is_empty() {
        return 0;
    }
    (canvas.area() / density).floor() as usize
}

/// Create the particle at `stack_index` somewhere inside `canvas`.
pub fn spawn(
    stack_index: usize,
    canvas: Size,
    config: &ParticleFieldConfig,
    rng: &mut impl Rng,
) -> Particle {
    let position = Vec2::new(
        rng.gen_range(0.0..1.0) * canvas.width,
        rng.gen_range(0.0..1.0) * canvas.height,
    );
    let speed = Vec2::new(
        calculate_speed(config.direction_x, config.min_speed_x, config.max_speed_x, rng),
        calculate_speed(config.direction_y, config.min_speed_y, config.max_speed_y, rng),
    );
    Particle {
        position,
        speed,
        layer: rng.gen_range(1..=3),
        parallax_offset: Vec2::ZERO,
        parallax_target: Vec2::ZERO,
        stack_index,
        active: true,
    }
}

/// Create a full particle set for `canvas`.
pub fn spawn_all(canvas: Size, config: &ParticleFieldConfig, rng: &mut impl Rng) -> Vec<Particle> {
    (0..particle_count(canvas, config.density))
        .map(|i| spawn(i, canvas, config, rng))
        .collect()
}

/// Deactivate particles outside `bounds` and drop them from the set.
pub fn retain_in_bounds(particles: &mut Vec<Particle>, bounds: Size) {
    for particle in particles.iter_mut() {
        particle.active = bounds.contains(particle.position);
    }
    particles.retain(|p| p.active);
}

/// Advance one particle by a frame: ease its parallax offset toward the
/// pointer-derived target, then move it, wrapping at the canvas edges.
pub fn update(particle: &mut Particle, config: &ParticleFieldConfig, ctx: &FrameContext) {
    if config.parallax {
        let divisor = config.parallax_multiplier * particle.layer as f32;
        if divisor > 0.0 {
            particle.parallax_target = (ctx.pointer - ctx.viewport.center()) / divisor;
            particle.parallax_offset +=
                (particle.parallax_target - particle.parallax_offset) * PARALLAX_EASING;
        }
    }

    particle.position.x = wrap_axis(
        particle.position.x,
        particle.speed.x,
        particle.parallax_offset.x,
        ctx.canvas.width,
    );
    particle.position.y = wrap_axis(
        particle.position.y,
        particle.speed.y,
        particle.parallax_offset.y,
        ctx.canvas.height,
    );
}

/// Move along one axis. A particle whose drawn position would leave the canvas
/// reappears at the opposite edge, shifted back by its current offset.
fn wrap_axis(position: f32, speed: f32, offset: f32, extent: f32) -> f32 {
    let next = position + speed + offset;
    if next > extent {
        -offset
    } else if next < 0.0 {
        extent - offset
    } else {
        position + speed
    }
}

/// Draw every particle and the proximity lines between them.
///
/// Each particle only links to particles with a greater stack index, so every
/// unordered pair is considered once.
pub fn draw(
    particles: &[Particle],
    config: &ParticleFieldConfig,
    canvas: &mut impl Canvas2d,
) -> DrawStats {
    let mut stats = DrawStats::default();
    canvas.clear();

    let radius = config.particle_radius / 2.0;
    for particle in particles {
        canvas.fill_circle(particle.visual_position(), radius, config.dot_color);
        stats.dots += 1;

        for other in particles
            .iter()
            .filter(|other| other.stack_index > particle.stack_index)
        {
            if particle.position.distance(other.position) < config.proximity {
                draw_link(particle.visual_position(), other.visual_position(), config, canvas);
                stats.links += 1;
            }
        }
    }

    stats
}

fn draw_link(from: Vec2, to: Vec2, config: &ParticleFieldConfig, canvas: &mut impl Canvas2d) {
    if config.curved_lines {
        // Bend through the midpoint column toward the neighbor's row
        let control = Vec2::new(from.midpoint(to).x, to.y);
        canvas.stroke_quadratic(from, control, to, config.line_width, config.line_color);
    } else {
        canvas.stroke_line(from, to, config.line_width, config.line_color);
    }
}
