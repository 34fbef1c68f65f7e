//! Favicon display options.

use std::fmt;
use std::str::FromStr;

use pagefx_core::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Background silhouette painted behind the text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconShape {
    /// Full circle inscribed in the icon.
    #[default]
    Circle,
    /// Full-bleed square.
    Square,
    /// Square with 50px rounded corners.
    Rounded,
}

/// Error returned for an unknown icon shape name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown icon shape `{0}`: expected circle, square or rounded")]
pub struct ParseShapeError(pub String);

impl IconShape {
    pub fn as_str(self) -> &'static str {
        match self {
            IconShape::Circle => "circle",
            IconShape::Square => "square",
            IconShape::Rounded => "rounded",
        }
    }
}

impl FromStr for IconShape {
    type Err = ParseShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "circle" => Ok(IconShape::Circle),
            "square" => Ok(IconShape::Square),
            "rounded" => Ok(IconShape::Rounded),
            _ => Err(ParseShapeError(s.to_string())),
        }
    }
}

impl fmt::Display for IconShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for one favicon render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaviconConfig {
    pub font_family: String,
    pub text_color: Color,
    pub bg_color: Color,
    pub icon_shape: IconShape,
    /// CSS font weight: a number from 100 to 900, or a keyword.
    pub font_weight: String,
    /// Font size in pixels on the 256px surface.
    pub text_size: f32,
    pub text_content: String,
    /// When set, used verbatim as the favicon and nothing is drawn.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Default for FaviconConfig {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            text_color: Color::WHITE,
            bg_color: Color::BLACK,
            icon_shape: IconShape::Circle,
            font_weight: "400".to_string(),
            text_size: 200.0,
            text_content: "S".to_string(),
            image_url: None,
        }
    }
}

impl FaviconConfig {
    /// Numeric CSS weight for `font_weight`. Unrecognized values count as normal.
    pub fn weight_value(&self) -> u16 {
        match self.font_weight.trim().to_ascii_lowercase().as_str() {
            "normal" => 400,
            "bold" => 700,
            "bolder" => 900,
            "lighter" => 100,
            other => other
                .parse::<u16>()
                .map(|w| w.clamp(1, 1000))
                .unwrap_or(400),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FaviconConfig::default();
        assert_eq!(config.font_family, "Arial");
        assert_eq!(config.text_color, Color::parse("#FFF").unwrap());
        assert_eq!(config.bg_color, Color::parse("#000").unwrap());
        assert_eq!(config.icon_shape, IconShape::Circle);
        assert_eq!(config.font_weight, "400");
        assert_eq!(config.text_size, 200.0);
        assert_eq!(config.text_content, "S");
        assert!(config.image_url.is_none());
    }

    #[test]
    fn test_shape_parse() {
        assert_eq!("Rounded".parse(), Ok(IconShape::Rounded));
        assert_eq!("square".parse(), Ok(IconShape::Square));
        assert!("hexagon".parse::<IconShape>().is_err());
        assert_eq!(IconShape::Circle.to_string(), "circle");
    }

    #[test]
    fn test_weight_value() {
        let mut config = FaviconConfig::default();
        assert_eq!(config.weight_value(), 400);
        config.font_weight = "bold".into();
        assert_eq!(config.weight_value(), 700);
        config.font_weight = "250".into();
        assert_eq!(config.weight_value(), 250);
        config.font_weight = "heavy".into();
        assert_eq!(config.weight_value(), 400);
    }
}
