use foundation::color::Rgba;
use layers::{LabelPolicy, LinkStyle, Palette};
use scene::files::PointCategory;
use serde::{Deserialize, Serialize};

/// Glass-sphere effect for image points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlassStyle {
    pub shadow_color: Rgba,
    /// Shadow blur at projection scale 1.
    pub shadow_blur_px: f64,
    /// Vertical shadow offset at projection scale 1.
    pub shadow_offset_px: f64,
    pub sheen_center: Rgba,
    pub sheen_mid: Rgba,
    pub sheen_edge: Rgba,
    pub gloss: Rgba,
    pub rim_bright: Rgba,
    pub rim_dim: Rgba,
    pub rim_width_px: f64,
}

impl Default for GlassStyle {
    fn default() -> Self {
        Self {
            shadow_color: Rgba::new(0.0, 0.0, 0.0, 0.3),
            shadow_blur_px: 12.0,
            shadow_offset_px: 6.0,
            sheen_center: Rgba::new(1.0, 1.0, 1.0, 0.35),
            sheen_mid: Rgba::new(1.0, 1.0, 1.0, 0.05),
            sheen_edge: Rgba::new(0.0, 0.0, 0.0, 0.25),
            gloss: Rgba::new(1.0, 1.0, 1.0, 0.6),
            rim_bright: Rgba::new(1.0, 1.0, 1.0, 0.8),
            rim_dim: Rgba::new(1.0, 1.0, 1.0, 0.1),
            rim_width_px: 1.5,
        }
    }
}

/// Everything about how a frame looks, separate from sphere geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub palette: Palette,
    pub labels: LabelPolicy,
    pub links: LinkStyle,
    pub glass: GlassStyle,
    /// Point radii at projection scale 1.
    pub image_radius: f64,
    pub file_radius: f64,
    pub filler_radius: f64,
    pub min_radius_px: f64,
    /// Glow blur around non-image file dots at projection scale 1.
    pub glow_blur_px: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            labels: LabelPolicy::default(),
            links: LinkStyle::default(),
            glass: GlassStyle::default(),
            image_radius: 28.0,
            file_radius: 10.0,
            filler_radius: 2.0,
            min_radius_px: 0.5,
            glow_blur_px: 15.0,
        }
    }
}

impl RenderStyle {
    /// On-screen radius for a point, floored so nothing vanishes.
    pub fn point_radius(&self, category: PointCategory, is_file: bool, scale: f64) -> f64 {
        let base = if category == PointCategory::Image {
            self.image_radius
        } else if is_file {
            self.file_radius
        } else {
            self.filler_radius
        };
        (base * scale).max(self.min_radius_px)
    }
}

#[cfg(test)]
mod tests {
    use super::RenderStyle;
    use scene::files::{FillerShade, PointCategory};

    #[test]
    fn radius_by_kind_with_floor() {
        let s = RenderStyle::default();
        assert_eq!(s.point_radius(PointCategory::Image, true, 1.0), 28.0);
        assert_eq!(s.point_radius(PointCategory::Pdf, true, 2.0), 20.0);
        let filler = PointCategory::Filler(FillerShade::Light);
        assert_eq!(s.point_radius(filler, false, 0.5), 1.0);
        assert_eq!(s.point_radius(filler, false, 0.1), 0.5);
    }
}
