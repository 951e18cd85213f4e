use foundation::color::Rgba;
use foundation::math::Vec2;
use serde::Serialize;

use crate::surface::{Paint, Shadow, Surface, SurfaceError};

/// Stand-in bitmap for headless rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordedImage {
    pub source: String,
    /// Drawing this image fails, as an undecodable bitmap would.
    pub broken: bool,
}

impl RecordedImage {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            broken: false,
        }
    }

    pub fn broken(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            broken: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear,
    Save,
    Restore,
    SetShadow {
        shadow: Option<Shadow>,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width_px: f64,
        paint: Paint,
    },
    FillCircle {
        center: Vec2,
        radius: f64,
        paint: Paint,
    },
    StrokeCircle {
        center: Vec2,
        radius: f64,
        width_px: f64,
        paint: Paint,
    },
    FillEllipse {
        center: Vec2,
        radii: Vec2,
        paint: Paint,
    },
    ClipCircle {
        center: Vec2,
        radius: f64,
    },
    DrawImage {
        source: String,
        origin: Vec2,
        size: Vec2,
    },
    FillText {
        text: String,
        anchor: Vec2,
        font: String,
        color: Rgba,
    },
}

/// Surface that records every call instead of rasterizing.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Vec2,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Vec2::new(width.max(0.0), height.max(0.0)),
            commands: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.size = Vec2::new(width.max(0.0), height.max(0.0));
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Surface for RecordingSurface {
    type Image = RecordedImage;

    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn set_shadow(&mut self, shadow: Option<Shadow>) {
        self.commands.push(DrawCommand::SetShadow { shadow });
    }

    fn line(&mut self, from: Vec2, to: Vec2, width_px: f64, paint: &Paint) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width_px,
            paint: paint.clone(),
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f64, paint: &Paint) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            paint: paint.clone(),
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f64, width_px: f64, paint: &Paint) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            width_px,
            paint: paint.clone(),
        });
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, paint: &Paint) {
        self.commands.push(DrawCommand::FillEllipse {
            center,
            radii,
            paint: paint.clone(),
        });
    }

    fn clip_circle(&mut self, center: Vec2, radius: f64) {
        self.commands.push(DrawCommand::ClipCircle { center, radius });
    }

    fn draw_image(
        &mut self,
        image: &RecordedImage,
        origin: Vec2,
        size: Vec2,
    ) -> Result<(), SurfaceError> {
        if image.broken {
            return Err(SurfaceError::ImageNotDecoded);
        }
        self.commands.push(DrawCommand::DrawImage {
            source: image.source.clone(),
            origin,
            size,
        });
        Ok(())
    }

    fn fill_text(&mut self, text: &str, anchor: Vec2, font: &str, color: Rgba) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            anchor,
            font: font.to_string(),
            color,
        });
    }
}
