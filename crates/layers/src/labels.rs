use foundation::color::Rgba;
use foundation::math::Vec2;
use scene::projection::ProjectedPoint;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelStyle {
    pub color: Rgba,
    /// Font size at projection scale 1.
    pub font_size_px: f64,
    pub min_font_size_px: f64,
    /// Gap between the point's edge and the top of the text.
    pub offset_px: f64,
    pub font_family: String,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            color: Rgba::new(0.2, 0.25, 0.33, 1.0),
            font_size_px: 12.0,
            min_font_size_px: 8.0,
            offset_px: 4.0,
            font_family: "system-ui, -apple-system, Segoe UI, Roboto, sans-serif".to_string(),
        }
    }
}

/// Which file points get a name label, and how it looks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelPolicy {
    /// Labels are only drawn for rotated `z` strictly above this.
    pub min_z: f64,
    /// Names longer than this many characters are shortened.
    pub max_chars: usize,
    /// Characters kept before the ellipsis when shortening.
    pub keep_chars: usize,
    pub ellipsis: String,
    pub style: LabelStyle,
}

impl Default for LabelPolicy {
    fn default() -> Self {
        Self {
            min_z: -50.0,
            max_chars: 12,
            keep_chars: 10,
            ellipsis: "...".to_string(),
            style: LabelStyle::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedLabel {
    pub text: String,
    /// Top-center of the text box, in pixels.
    pub anchor_px: Vec2,
    pub font_size_px: f64,
    pub color: Rgba,
}

/// Shorten `name` to `keep` characters plus `ellipsis` if it exceeds `max`.
///
/// Counts Unicode scalar values, so multi-byte names are never split inside
/// a character.
pub fn truncate_label(name: &str, max: usize, keep: usize, ellipsis: &str) -> String {
    if name.chars().count() <= max {
        return name.to_string();
    }
    let mut out: String = name.chars().take(keep).collect();
    out.push_str(ellipsis);
    out
}

impl LabelPolicy {
    pub fn text(&self, name: &str) -> String {
        truncate_label(name, self.max_chars, self.keep_chars, &self.ellipsis)
    }

    pub fn is_visible(&self, z: f64) -> bool {
        z > self.min_z
    }

    /// Alpha ramps linearly from 0 at `min_z` to 1 at the sphere's front.
    pub fn alpha(&self, z: f64, sphere_radius: f64) -> f32 {
        let span = sphere_radius - self.min_z;
        if span <= 0.0 {
            return 1.0;
        }
        ((z - self.min_z) / span).clamp(0.0, 1.0) as f32
    }

    pub fn font_size_px(&self, scale: f64) -> f64 {
        (self.style.font_size_px * scale).max(self.style.min_font_size_px)
    }

    /// CSS font shorthand for a given size.
    pub fn font(&self, size_px: f64) -> String {
        format!("{size_px:.1}px {}", self.style.font_family)
    }

    /// Place the label for a file point drawn with radius `point_radius_px`.
    pub fn place(
        &self,
        point: &ProjectedPoint,
        name: &str,
        point_radius_px: f64,
        sphere_radius: f64,
    ) -> Option<PlacedLabel> {
        let z = point.rotated.z;
        if !self.is_visible(z) {
            return None;
        }
        let alpha = self.alpha(z, sphere_radius);
        Some(PlacedLabel {
            text: self.text(name),
            anchor_px: Vec2::new(
                point.screen.x,
                point.screen.y + point_radius_px + self.style.offset_px,
            ),
            font_size_px: self.font_size_px(point.scale),
            color: self.style.color.with_alpha(self.style.color.a * alpha),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{LabelPolicy, truncate_label};
    use foundation::math::{Vec2, Vec3};
    use pretty_assertions::assert_eq;
    use scene::projection::ProjectedPoint;

    fn projected(z: f64, scale: f64) -> ProjectedPoint {
        ProjectedPoint {
            index: 0,
            rotated: Vec3::new(0.0, 0.0, z),
            screen: Vec2::new(100.0, 80.0),
            scale,
        }
    }

    #[test]
    fn truncates_long_names_only() {
        assert_eq!(truncate_label("short.txt", 12, 10, "..."), "short.txt");
        assert_eq!(truncate_label("exactly12chr", 12, 10, "..."), "exactly12chr");
        assert_eq!(
            truncate_label("quarterly-report.pdf", 12, 10, "..."),
            "quarterly-..."
        );
        assert_eq!(
            truncate_label("ünïcödé-fïlé-nämé", 12, 10, "..."),
            "ünïcödé-fï..."
        );
    }

    #[test]
    fn hides_deep_back_labels() {
        let policy = LabelPolicy::default();
        assert!(policy.place(&projected(-50.0, 1.0), "a", 10.0, 220.0).is_none());
        assert!(policy.place(&projected(-49.0, 1.0), "a", 10.0, 220.0).is_some());
    }

    #[test]
    fn alpha_fades_with_depth() {
        let policy = LabelPolicy::default();
        assert_eq!(policy.alpha(-50.0, 220.0), 0.0);
        assert_eq!(policy.alpha(220.0, 220.0), 1.0);
        let mid = policy.alpha(85.0, 220.0);
        assert!((mid - 0.5).abs() < 1e-6);
        assert!(policy.alpha(-40.0, 220.0) < 0.05);
    }

    #[test]
    fn font_scales_with_floor() {
        let policy = LabelPolicy::default();
        assert_eq!(policy.font_size_px(2.0), 24.0);
        assert_eq!(policy.font_size_px(0.3), 8.0);
    }

    #[test]
    fn label_sits_below_the_point() {
        let policy = LabelPolicy::default();
        let label = policy
            .place(&projected(220.0, 1.0), "hero-image.png", 28.0, 220.0)
            .unwrap();
        assert_eq!(label.text, "hero-image...");
        assert_eq!(label.anchor_px, Vec2::new(100.0, 80.0 + 28.0 + 4.0));
        assert_eq!(label.font_size_px, 12.0);
        assert_eq!(label.color.a, 1.0);
    }
}
