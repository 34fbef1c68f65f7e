//! Particle field options.

use std::fmt;
use std::str::FromStr;

use pagefx_core::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Drift direction of one velocity axis.
///
/// `Left`/`Right` are meant for the x axis and `Up`/`Down` for the y axis, but
/// only their bias matters: `Right` and `Down` move forward along the axis,
/// `Left` and `Up` move backward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
    #[default]
    Center,
}

/// Which way a [`Direction`] pushes along its axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
    Forward,
    Backward,
    Both,
}

/// Error returned for an unknown direction name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown direction `{0}`: expected left, right, up, down or center")]
pub struct ParseDirectionError(pub String);

impl Direction {
    pub fn bias(self) -> Bias {
        match self {
            Direction::Right | Direction::Down => Bias::Forward,
            Direction::Left | Direction::Up => Bias::Backward,
            Direction::Center => Bias::Both,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Center => "center",
        }
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "center" => Ok(Direction::Center),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options of one animation session. Changing any of them resets the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleFieldConfig {
    pub min_speed_x: f32,
    pub max_speed_x: f32,
    pub min_speed_y: f32,
    pub max_speed_y: f32,
    pub direction_x: Direction,
    pub direction_y: Direction,
    /// Canvas pixels per particle.
    pub density: f32,
    pub dot_color: Color,
    pub line_color: Color,
    /// Dot diameter in pixels.
    pub particle_radius: f32,
    pub line_width: f32,
    pub curved_lines: bool,
    /// Maximum distance between two particles for a connecting line.
    pub proximity: f32,
    pub parallax: bool,
    /// Larger values damp the parallax shift.
    pub parallax_multiplier: f32,
}

impl Default for ParticleFieldConfig {
    fn default() -> Self {
        Self {
            min_speed_x: 0.1,
            max_speed_x: 0.7,
            min_speed_y: 0.1,
            max_speed_y: 0.7,
            direction_x: Direction::Center,
            direction_y: Direction::Center,
            density: 10_000.0,
            dot_color: Color::rgb(0x66, 0x66, 0x66),
            line_color: Color::rgb(0x66, 0x66, 0x66),
            particle_radius: 7.0,
            line_width: 1.0,
            curved_lines: false,
            proximity: 100.0,
            parallax: true,
            parallax_multiplier: 5.0,
        }
    }
}
