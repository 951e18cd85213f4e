//! Minimal 2D drawing interface the sphere renderer targets.
//!
//! Shaped after the browser canvas 2D context so a host adapter is a thin
//! translation layer. Shadow and clip state are scoped by `save`/`restore`.

use foundation::color::Rgba;
use foundation::math::Vec2;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The bitmap has not finished decoding, or decoding failed.
    ImageNotDecoded,
    Host(String),
}

impl std::fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceError::ImageNotDecoded => write!(f, "image not decoded"),
            SurfaceError::Host(msg) => write!(f, "surface error: {msg}"),
        }
    }
}

impl std::error::Error for SurfaceError {}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

impl ColorStop {
    pub const fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Paint {
    Solid {
        color: Rgba,
    },
    /// Two-circle radial gradient, as in `createRadialGradient`.
    Radial {
        inner: Vec2,
        inner_radius: f64,
        outer: Vec2,
        outer_radius: f64,
        stops: Vec<ColorStop>,
    },
    Linear {
        from: Vec2,
        to: Vec2,
        stops: Vec<ColorStop>,
    },
}

impl Paint {
    pub fn solid(color: Rgba) -> Self {
        Paint::Solid { color }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Shadow {
    pub color: Rgba,
    pub blur_px: f64,
    pub offset_px: Vec2,
}

pub trait Surface {
    /// Host bitmap type stored in the image cache.
    type Image;

    /// Drawable size in pixels.
    fn size(&self) -> Vec2;
    fn clear(&mut self);
    fn save(&mut self);
    fn restore(&mut self);
    /// Shadow for subsequent fills and strokes; `None` disables it.
    fn set_shadow(&mut self, shadow: Option<Shadow>);
    fn line(&mut self, from: Vec2, to: Vec2, width_px: f64, paint: &Paint);
    fn fill_circle(&mut self, center: Vec2, radius: f64, paint: &Paint);
    fn stroke_circle(&mut self, center: Vec2, radius: f64, width_px: f64, paint: &Paint);
    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, paint: &Paint);
    /// Intersect the clip region with a circle until the next `restore`.
    fn clip_circle(&mut self, center: Vec2, radius: f64);
    /// Stretch `image` over the rectangle at `origin` with `size`.
    fn draw_image(
        &mut self,
        image: &Self::Image,
        origin: Vec2,
        size: Vec2,
    ) -> Result<(), SurfaceError>;
    /// Text centered horizontally on `anchor`, hanging down from it.
    fn fill_text(&mut self, text: &str, anchor: Vec2, font: &str, color: Rgba);
}
