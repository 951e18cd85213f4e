use foundation::color::Rgba;
use scene::files::{FillerShade, PointCategory};
use serde::{Deserialize, Serialize};

/// Fill colors for each point category.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub image: Rgba,
    pub pdf: Rgba,
    pub text: Rgba,
    pub other: Rgba,
    pub filler_dark: Rgba,
    pub filler_light: Rgba,
    /// Flat fill used when an image cannot be drawn.
    pub image_fallback: Rgba,
}

impl Palette {
    pub const fn new() -> Self {
        Self {
            // #ec4899
            image: Rgba::rgb8(0xec, 0x48, 0x99),
            // #ef4444
            pdf: Rgba::rgb8(0xef, 0x44, 0x44),
            // #3b82f6
            text: Rgba::rgb8(0x3b, 0x82, 0xf6),
            // #10b981
            other: Rgba::rgb8(0x10, 0xb9, 0x81),
            // #cbd5e1
            filler_dark: Rgba::rgb8(0xcb, 0xd5, 0xe1),
            // #e2e8f0
            filler_light: Rgba::rgb8(0xe2, 0xe8, 0xf0),
            // #9ca3af
            image_fallback: Rgba::rgb8(0x9c, 0xa3, 0xaf),
        }
    }

    pub fn color(&self, category: PointCategory) -> Rgba {
        match category {
            PointCategory::Image => self.image,
            PointCategory::Pdf => self.pdf,
            PointCategory::Text => self.text,
            PointCategory::Other => self.other,
            PointCategory::Filler(FillerShade::Dark) => self.filler_dark,
            PointCategory::Filler(FillerShade::Light) => self.filler_light,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

/// Color for `category` under the default palette.
pub fn category_color(category: PointCategory) -> Rgba {
    Palette::new().color(category)
}
