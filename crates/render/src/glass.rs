//! "Glass sphere" image path: shadowed disc, clipped bitmap, sheen, gloss, rim.

use foundation::color::Rgba;
use foundation::math::Vec2;

use crate::style::GlassStyle;
use crate::surface::{ColorStop, Paint, Shadow, Surface};

/// Outcome of drawing one image point.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GlassOutcome {
    Image,
    /// The bitmap could not be drawn; a flat fill took its place.
    Fallback,
}

/// Draw `image` as a glossy sphere of radius `r` at `center`.
///
/// `scale` is the point's projection scale and drives the shadow size, so
/// nearer spheres cast larger shadows.
pub fn draw_glass_sphere<S: Surface>(
    surface: &mut S,
    image: &S::Image,
    center: Vec2,
    r: f64,
    scale: f64,
    style: &GlassStyle,
    fallback: Rgba,
) -> GlassOutcome {
    // Shadow caster; the clipped bitmap below would clip its own shadow.
    surface.save();
    surface.set_shadow(Some(Shadow {
        color: style.shadow_color,
        blur_px: style.shadow_blur_px * scale,
        offset_px: Vec2::new(0.0, style.shadow_offset_px * scale),
    }));
    surface.fill_circle(center, r, &Paint::solid(fallback));
    surface.restore();

    surface.save();
    surface.clip_circle(center, r);

    let origin = Vec2::new(center.x - r, center.y - r);
    let outcome = match surface.draw_image(image, origin, Vec2::new(2.0 * r, 2.0 * r)) {
        Ok(()) => GlassOutcome::Image,
        Err(_) => {
            surface.fill_circle(center, r, &Paint::solid(fallback));
            GlassOutcome::Fallback
        }
    };

    // Soft sheen, lit from the upper left.
    let sheen = Paint::Radial {
        inner: Vec2::new(center.x - r * 0.3, center.y - r * 0.3),
        inner_radius: 0.0,
        outer: center,
        outer_radius: r,
        stops: vec![
            ColorStop::new(0.0, style.sheen_center),
            ColorStop::new(0.5, style.sheen_mid),
            ColorStop::new(1.0, style.sheen_edge),
        ],
    };
    surface.fill_circle(center, r, &sheen);

    // Sharper gloss cap across the top.
    let gloss_center = Vec2::new(center.x, center.y - r * 0.45);
    let gloss = Paint::Radial {
        inner: gloss_center,
        inner_radius: 0.0,
        outer: gloss_center,
        outer_radius: r * 0.6,
        stops: vec![
            ColorStop::new(0.0, style.gloss),
            ColorStop::new(1.0, style.gloss.with_alpha(0.0)),
        ],
    };
    surface.fill_ellipse(gloss_center, Vec2::new(r * 0.6, r * 0.35), &gloss);

    surface.restore();

    // Diagonal rim light, outside the clip so the full stroke shows.
    let rim = Paint::Linear {
        from: Vec2::new(center.x - r, center.y - r),
        to: Vec2::new(center.x + r, center.y + r),
        stops: vec![
            ColorStop::new(0.0, style.rim_bright),
            ColorStop::new(1.0, style.rim_dim),
        ],
    };
    surface.stroke_circle(center, r, style.rim_width_px * scale.max(0.5), &rim);

    outcome
}
