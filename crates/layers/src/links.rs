use serde::{Deserialize, Serialize};

/// Faint line from the canvas center to each file point.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkStyle {
    /// Alpha at the far side of the sphere (`z = -radius`).
    pub min_alpha: f32,
    /// Alpha at the near side (`z = +radius`).
    pub max_alpha: f32,
    pub width_px: f64,
}

impl Default for LinkStyle {
    fn default() -> Self {
        Self {
            min_alpha: 0.05,
            max_alpha: 0.25,
            width_px: 1.0,
        }
    }
}

impl LinkStyle {
    /// Linear depth fade across the sphere's diameter.
    pub fn alpha(&self, z: f64, radius: f64) -> f32 {
        let t = if radius > 0.0 {
            ((z + radius) / (2.0 * radius)).clamp(0.0, 1.0) as f32
        } else {
            1.0
        };
        self.min_alpha + (self.max_alpha - self.min_alpha) * t
    }
}
