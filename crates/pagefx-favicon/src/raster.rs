//! Offscreen raster surface the favicon is painted on.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use pagefx_core::{Color, Size, Vec2};
use pagefx_fonts::TextBitmap;
use thiserror::Error;

use crate::config::{FaviconConfig, IconShape};

/// Edge length of the generated favicon in pixels.
pub const ICON_SIZE: u32 = 256;

/// Corner radius of the `rounded` shape in pixels.
pub const CORNER_RADIUS: f32 = 50.0;

/// Cap height as a fraction of the font size.
const CAP_HEIGHT_RATIO: f32 = 0.7;

/// Subsamples per pixel axis used for edge coverage.
const SUBSAMPLES: u32 = 4;

/// Failure to produce a raster favicon.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("drawing surface unavailable for a {width}x{height} icon")]
    NoSurface { width: u32, height: u32 },
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// An RGBA surface with simple anti-aliased fills.
#[derive(Debug, Clone)]
pub struct Raster {
    image: RgbaImage,
}

impl Raster {
    /// Allocate a transparent surface. Returns `None` for an empty size.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            image: RgbaImage::new(width, height),
        })
    }

    pub fn size(&self) -> Size {
        Size::new(self.image.width() as f32, self.image.height() as f32)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let Rgba([r, g, b, a]) = *self.image.get_pixel(x, y);
        Color::rgba(r, g, b, a)
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    /// Fill the whole surface.
    pub fn fill_rect(&mut self, color: Color) {
        let size = self.size();
        self.fill_area(Vec2::ZERO, size, color, |_| true);
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let origin = Vec2::new(center.x - radius, center.y - radius);
        let bounds = Size::new(radius * 2.0, radius * 2.0);
        self.fill_area(origin, bounds, color, |p| p.distance(center) <= radius);
    }

    /// Fill the whole surface as a rectangle whose corners are quadratic curves
    /// running from edge to edge with the surface corner as control point.
    pub fn fill_rounded_rect(&mut self, radius: f32, color: Color) {
        let size = self.size();
        let radius = radius.min(size.width / 2.0).min(size.height / 2.0);
        self.fill_area(Vec2::ZERO, size, color, |p| {
            inside_rounded_rect(p, size, radius)
        });
    }

    /// Fill an axis-aligned rectangle at an arbitrary position.
    pub fn fill_box(&mut self, origin: Vec2, bounds: Size, color: Color) {
        self.fill_area(origin, bounds, color, |p| {
            p.x >= origin.x
                && p.y >= origin.y
                && p.x < origin.x + bounds.width
                && p.y < origin.y + bounds.height
        });
    }

    /// Blend `color` into every pixel of the bounding box, weighted by how many
    /// subsamples `inside` accepts.
    fn fill_area(
        &mut self,
        origin: Vec2,
        bounds: Size,
        color: Color,
        inside: impl Fn(Vec2) -> bool,
    ) {
        let (width, height) = self.image.dimensions();
        let x0 = origin.x.floor().max(0.0) as u32;
        let y0 = origin.y.floor().max(0.0) as u32;
        let x1 = ((origin.x + bounds.width).ceil().max(0.0) as u32).min(width);
        let y1 = ((origin.y + bounds.height).ceil().max(0.0) as u32).min(height);
        let step = 1.0 / SUBSAMPLES as f32;

        for y in y0..y1 {
            for x in x0..x1 {
                let mut hits = 0;
                for sy in 0..SUBSAMPLES {
                    for sx in 0..SUBSAMPLES {
                        let p = Vec2::new(
                            x as f32 + (sx as f32 + 0.5) * step,
                            y as f32 + (sy as f32 + 0.5) * step,
                        );
                        if inside(p) {
                            hits += 1;
                        }
                    }
                }
                if hits > 0 {
                    let coverage = hits as f32 / (SUBSAMPLES * SUBSAMPLES) as f32;
                    let dst = self.image.get_pixel_mut(x, y);
                    *dst = blend(*dst, color, coverage);
                }
            }
        }
    }

    /// Encode as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>, RasterError> {
        let mut bytes = Vec::new();
        PngEncoder::new(&mut bytes).write_image(
            self.image.as_raw(),
            self.image.width(),
            self.image.height(),
            ExtendedColorType::Rgba8,
        )?;
        Ok(bytes)
    }

    /// Encode as a `data:image/png;base64,` URI.
    pub fn to_data_uri(&self) -> Result<String, RasterError> {
        let png = self.to_png()?;
        Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
    }
}

/// Source-over blend of `color` at `coverage` onto `dst`.
fn blend(dst: Rgba<u8>, color: Color, coverage: f32) -> Rgba<u8> {
    let sa = color.a as f32 / 255.0 * coverage;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let channel = |s: u8, d: u8| {
        let c = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        channel(color.r, dst[0]),
        channel(color.g, dst[1]),
        channel(color.b, dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}

/// Inside test for the rounded rectangle. A corner curve from `(r, 0)` to `(0, r)`
/// with control `(0, 0)` satisfies `sqrt(x) + sqrt(y) = sqrt(r)` in corner-local
/// coordinates.
fn inside_rounded_rect(p: Vec2, size: Size, radius: f32) -> bool {
    if p.x < 0.0 || p.y < 0.0 || p.x > size.width || p.y > size.height {
        return false;
    }
    // Distance into the nearest corner square, measured from the outer edges
    let dx = p.x.min(size.width - p.x);
    let dy = p.y.min(size.height - p.y);
    if dx >= radius || dy >= radius {
        return true;
    }
    dx.sqrt() + dy.sqrt() >= radius.sqrt()
}

/// Weights from here up draw thicker strokes.
const BOLD_WEIGHT: u16 = 600;

/// Stroke thickness relative to a normal weight. Only bold weights thicken.
fn stroke_scale(weight: u16) -> f32 {
    if weight < BOLD_WEIGHT {
        return 1.0;
    }
    (1.0 + (weight as f32 - 400.0) / 1000.0).min(1.5)
}

/// Paint the icon described by `config`: background shape, then centered text.
pub fn paint(config: &FaviconConfig) -> Result<Raster, RasterError> {
    let mut raster = Raster::new(ICON_SIZE, ICON_SIZE).ok_or(RasterError::NoSurface {
        width: ICON_SIZE,
        height: ICON_SIZE,
    })?;
    raster.clear();

    let size = raster.size();
    match config.icon_shape {
        IconShape::Circle => raster.fill_circle(size.center(), size.width / 2.0, config.bg_color),
        IconShape::Rounded => raster.fill_rounded_rect(CORNER_RADIUS, config.bg_color),
        IconShape::Square => raster.fill_rect(config.bg_color),
    }

    draw_text(&mut raster, config);
    Ok(raster)
}

/// Draw `text_content` with the block face, centered on both axes.
fn draw_text(raster: &mut Raster, config: &FaviconConfig) {
    let bitmap = TextBitmap::layout(&config.text_content);
    if bitmap.is_empty() || config.text_size <= 0.0 {
        return;
    }

    let cell = config.text_size * CAP_HEIGHT_RATIO / bitmap.height() as f32;
    let scale = stroke_scale(config.weight_value());
    let ink = cell * scale;
    let inset = (cell - ink) / 2.0;

    let center = raster.size().center();
    let left = center.x - bitmap.width() as f32 * cell / 2.0;
    let top = center.y - bitmap.height() as f32 * cell / 2.0;

    for row in 0..bitmap.height() {
        for col in 0..bitmap.width() {
            if bitmap.filled(col, row) {
                let origin = Vec2::new(
                    left + col as f32 * cell + inset,
                    top + row as f32 * cell + inset,
                );
                raster.fill_box(origin, Size::new(ink, ink), config.text_color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_text(shape: IconShape) -> FaviconConfig {
        FaviconConfig {
            icon_shape: shape,
            text_content: String::new(),
            bg_color: Color::rgb(200, 10, 10),
            ..FaviconConfig::default()
        }
    }

    #[test]
    fn test_zero_sized_surface_is_unavailable() {
        assert!(Raster::new(0, 16).is_none());
        assert!(Raster::new(16, 0).is_none());
    }

    #[test]
    fn test_circle_silhouette() {
        let raster = paint(&no_text(IconShape::Circle)).unwrap();
        let bg = Color::rgb(200, 10, 10);
        // Corners stay transparent, edges touch the circle
        assert_eq!(raster.pixel(0, 0).a, 0);
        assert_eq!(raster.pixel(255, 255).a, 0);
        assert_eq!(raster.pixel(20, 20).a, 0);
        assert_eq!(raster.pixel(128, 128), bg);
        assert_eq!(raster.pixel(128, 2), bg);
        assert_eq!(raster.pixel(2, 128), bg);
        assert_eq!(raster.pixel(253, 128), bg);
    }

    #[test]
    fn test_rounded_silhouette() {
        let raster = paint(&no_text(IconShape::Rounded)).unwrap();
        let bg = Color::rgb(200, 10, 10);
        assert_eq!(raster.pixel(0, 0).a, 0);
        assert_eq!(raster.pixel(255, 0).a, 0);
        assert_eq!(raster.pixel(0, 255).a, 0);
        assert_eq!(raster.pixel(255, 255).a, 0);
        // Straight edges between the corners are fully painted
        assert_eq!(raster.pixel(128, 0), bg);
        assert_eq!(raster.pixel(0, 128), bg);
        assert_eq!(raster.pixel(60, 1), bg);
        // Deep inside a corner square but past the curve
        assert_eq!(raster.pixel(30, 30), bg);
        // Near the corner, outside the curve
        assert_eq!(raster.pixel(5, 5).a, 0);
        // Corners are wider than a circle would leave them
        assert_eq!(raster.pixel(20, 20), bg);
    }

    #[test]
    fn test_square_silhouette() {
        let raster = paint(&no_text(IconShape::Square)).unwrap();
        let bg = Color::rgb(200, 10, 10);
        for (x, y) in [(0, 0), (255, 0), (0, 255), (255, 255), (128, 128)] {
            assert_eq!(raster.pixel(x, y), bg);
        }
    }

    #[test]
    fn test_text_is_centered() {
        let config = FaviconConfig {
            icon_shape: IconShape::Square,
            text_content: "-".to_string(),
            ..FaviconConfig::default()
        };
        let raster = paint(&config).unwrap();
        // The dash is the middle glyph row, so it crosses the center
        assert_eq!(raster.pixel(128, 128), Color::WHITE);
        assert_eq!(raster.pixel(128, 60), Color::BLACK);
        assert_eq!(raster.pixel(128, 196), Color::BLACK);
    }

    #[test]
    fn test_bold_draws_more_ink() {
        let ink = |weight: &str| {
            let config = FaviconConfig {
                icon_shape: IconShape::Square,
                font_weight: weight.to_string(),
                ..FaviconConfig::default()
            };
            let raster = paint(&config).unwrap();
            raster.image().pixels().filter(|p| p[0] > 128).count()
        };
        assert!(ink("700") > ink("400"));
        assert!(ink("bold") > ink("normal"));
        assert_eq!(ink("500"), ink("400"));
        assert_eq!(ink("100"), ink("400"));
    }

    #[test]
    fn test_stroke_scale_thickens_bold_only() {
        assert_eq!(stroke_scale(100), 1.0);
        assert_eq!(stroke_scale(400), 1.0);
        assert_eq!(stroke_scale(599), 1.0);
        assert!((stroke_scale(600) - 1.2).abs() < 1e-6);
        assert!((stroke_scale(700) - 1.3).abs() < 1e-6);
        assert_eq!(stroke_scale(1000), 1.5);
    }

    #[test]
    fn test_data_uri_is_png() {
        let raster = paint(&FaviconConfig::default()).unwrap();
        let uri = raster.to_data_uri().unwrap();
        assert!(uri.starts_with("data:image/png;base64,iVBORw0KGgo"));

        let png = raster.to_png().unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.width(), ICON_SIZE);
        assert_eq!(decoded.height(), ICON_SIZE);
    }
}
