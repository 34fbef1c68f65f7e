//! Dynamic favicons.
//!
//! Paints a colored shape with centered text onto a 256x256 raster (or passes an
//! image URL through untouched) and keeps exactly one `<link rel="icon">` in the
//! document head pointing at it.

mod config;
mod document;
mod raster;
mod renderer;

pub use config::{FaviconConfig, IconShape, ParseShapeError};
pub use document::{DocumentHead, ElementId, Head, LinkElement, PNG_MIME, SVG_MIME, icon_mime};
pub use raster::{CORNER_RADIUS, ICON_SIZE, Raster, RasterError, paint};
pub use renderer::{FaviconRenderer, FaviconSource, favicon_source};
