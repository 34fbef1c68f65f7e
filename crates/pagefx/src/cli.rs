//! Command line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pagefx_core::Color;
use pagefx_favicon::{FaviconConfig, IconShape};
use pagefx_particles::{Direction, ParticleFieldConfig};

/// Favicon renderer and animated particle background.
#[derive(Debug, Parser)]
#[command(name = "pagefx", version, about)]
pub struct Cli {
    /// Read settings from this file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Animate the particle field in the terminal (default)
    Particles(ParticleArgs),
    /// Render a favicon and print its link tag
    Favicon(FaviconArgs),
    /// Print the effective settings as TOML
    Config {
        /// Also write them to the settings file
        #[arg(long)]
        write: bool,
    },
}

/// Frame rate used when none is given.
pub const DEFAULT_FPS: u32 = 60;

/// Overrides for the particle field settings.
#[derive(Debug, Args)]
pub struct ParticleArgs {
    /// Seed for a reproducible layout
    #[arg(long)]
    pub seed: Option<u64>,
    /// Canvas pixels per particle
    #[arg(long)]
    pub density: Option<f32>,
    /// Maximum distance for a connecting line
    #[arg(long)]
    pub proximity: Option<f32>,
    /// Horizontal drift: left, right or center
    #[arg(long)]
    pub direction_x: Option<Direction>,
    /// Vertical drift: up, down or center
    #[arg(long)]
    pub direction_y: Option<Direction>,
    #[arg(long)]
    pub dot_color: Option<Color>,
    #[arg(long)]
    pub line_color: Option<Color>,
    /// Draw curved connecting lines
    #[arg(long)]
    pub curved: bool,
    /// Disable the pointer parallax
    #[arg(long)]
    pub no_parallax: bool,
    /// Target frames per second
    #[arg(long, default_value_t = DEFAULT_FPS, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,
}

impl Default for ParticleArgs {
    fn default() -> Self {
        Self {
            seed: None,
            density: None,
            proximity: None,
            direction_x: None,
            direction_y: None,
            dot_color: None,
            line_color: None,
            curved: false,
            no_parallax: false,
            fps: DEFAULT_FPS,
        }
    }
}

impl ParticleArgs {
    /// Apply the flags that were given on top of `config`.
    pub fn apply(&self, config: &mut ParticleFieldConfig) {
        if let Some(density) = self.density {
            config.density = density;
        }
        if let Some(proximity) = self.proximity {
            config.proximity = proximity;
        }
        if let Some(direction) = self.direction_x {
            config.direction_x = direction;
        }
        if let Some(direction) = self.direction_y {
            config.direction_y = direction;
        }
        if let Some(color) = self.dot_color {
            config.dot_color = color;
        }
        if let Some(color) = self.line_color {
            config.line_color = color;
        }
        if self.curved {
            config.curved_lines = true;
        }
        if self.no_parallax {
            config.parallax = false;
        }
    }
}

/// Overrides for the favicon settings.
#[derive(Debug, Default, Args)]
pub struct FaviconArgs {
    /// Text drawn on the icon
    #[arg(long)]
    pub text: Option<String>,
    /// circle, square or rounded
    #[arg(long)]
    pub shape: Option<IconShape>,
    /// Background color
    #[arg(long)]
    pub bg: Option<Color>,
    /// Text color
    #[arg(long)]
    pub fg: Option<Color>,
    /// Font size in pixels on the 256px icon
    #[arg(long)]
    pub size: Option<f32>,
    /// CSS font weight, e.g. 700 or bold
    #[arg(long)]
    pub weight: Option<String>,
    #[arg(long)]
    pub font_family: Option<String>,
    /// Use this image as the favicon instead of drawing one
    #[arg(long, value_name = "URL")]
    pub image: Option<String>,
    /// Write the rendered PNG here
    #[arg(long, short, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

impl FaviconArgs {
    /// Apply the flags that were given on top of `config`.
    pub fn apply(&self, config: &mut FaviconConfig) {
        if let Some(text) = &self.text {
            config.text_content = text.clone();
        }
        if let Some(shape) = self.shape {
            config.icon_shape = shape;
        }
        if let Some(color) = self.bg {
            config.bg_color = color;
        }
        if let Some(color) = self.fg {
            config.text_color = color;
        }
        if let Some(size) = self.size {
            config.text_size = size;
        }
        if let Some(weight) = &self.weight {
            config.font_weight = weight.clone();
        }
        if let Some(family) = &self.font_family {
            config.font_family = family.clone();
        }
        if let Some(image) = &self.image {
            config.image_url = Some(image.clone());
        }
    }
}
