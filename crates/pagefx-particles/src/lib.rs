//! Animated particle background.
//!
//! A field of drifting dots joined by lines whenever two of them come within
//! a proximity threshold. Dots are split into three depth layers that shift
//! by different amounts as the pointer (or device tilt) moves, giving a
//! parallax effect. The field is host-agnostic: anything implementing [`Host`]
//! can display it.

mod config;
mod field;
mod host;
mod particle;
mod platform;
mod speed;

#[cfg(test)]
mod testing;

pub use config::{Bias, Direction, ParseDirectionError, ParticleFieldConfig};
pub use field::{FieldState, ParticleField};
pub use host::{EventKind, FrameHandle, Host};
pub use particle::{
    DrawStats, FrameContext, Particle, draw, particle_count, retain_in_bounds, spawn, spawn_all,
    update,
};
pub use platform::{MAX_TILT_DEGREES, Platform, Tilt};
pub use speed::calculate_speed;
