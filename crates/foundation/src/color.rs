use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    InvalidHex(String),
}

impl std::fmt::Display for ColorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorError::InvalidHex(s) => write!(f, "invalid hex color: {s:?}"),
        }
    }
}

impl std::error::Error for ColorError {}

/// Straight (non-premultiplied) RGBA color, channels in `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ColorError::InvalidHex(hex.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ColorError::InvalidHex(hex.to_string()))
        };
        Ok(Self::rgb8(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn to_hex(self) -> String {
        let [r, g, b] = self.rgb_u8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// CSS `rgba(...)` form, accepted by canvas fill/stroke styles.
    pub fn to_css(self) -> String {
        let [r, g, b] = self.rgb_u8();
        let a = self.a.clamp(0.0, 1.0);
        format!("rgba({r},{g},{b},{a})")
    }

    fn rgb_u8(self) -> [u8; 3] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }
}

#[cfg(test)]
mod tests {
    use super::{ColorError, Rgba};

    #[test]
    fn parses_and_formats_hex() {
        let c = Rgba::from_hex("#ec4899").unwrap();
        assert_eq!(c.to_hex(), "#ec4899");
        assert_eq!(Rgba::from_hex("3b82f6").unwrap().to_hex(), "#3b82f6");
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(matches!(
            Rgba::from_hex("#12345"),
            Err(ColorError::InvalidHex(_))
        ));
        assert!(Rgba::from_hex("#zzzzzz").is_err());
    }

    #[test]
    fn css_output_clamps_alpha() {
        let c = Rgba::rgb8(255, 0, 0).with_alpha(1.7);
        assert_eq!(c.to_css(), "rgba(255,0,0,1)");
        assert_eq!(Rgba::BLACK.with_alpha(0.5).to_css(), "rgba(0,0,0,0.5)");
    }
}
