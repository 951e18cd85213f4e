use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonFinite(&'static str),
    NotPositive(&'static str),
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    ZoomBoundsInverted {
        min: f64,
        max: f64,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NonFinite(field) => write!(f, "{field} must be finite"),
            ConfigError::NotPositive(field) => write!(f, "{field} must be > 0"),
            ConfigError::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{field}={value} outside [{min}, {max}]"),
            ConfigError::ZoomBoundsInverted { min, max } => {
                write!(f, "zoom_min={min} is greater than zoom_max={max}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Point set shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Sphere radius in render-space units.
    pub radius: f64,
    /// Filler count for an empty file list.
    pub filler_base: usize,
    /// Filler count never drops below this.
    pub filler_min: usize,
    /// Filler points removed per file.
    pub filler_decay: usize,
    /// Chance that a filler point uses the darker shade.
    pub filler_dark_probability: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            radius: 220.0,
            filler_base: 150,
            filler_min: 50,
            filler_decay: 2,
            filler_dark_probability: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Perspective constant; the eye sits at `z = fov`.
    pub fov: f64,
    /// Points with rotated `z` above this are skipped.
    pub cull_z: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov: 400.0,
            cull_z: 350.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Radians per dragged pixel.
    pub rotate_speed: f64,
    /// Zoom units per wheel delta unit.
    pub zoom_speed: f64,
    pub zoom_min: f64,
    pub zoom_max: f64,
    /// Initial rotation about the X axis (radians).
    pub initial_tilt: f64,
    pub initial_zoom: f64,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            rotate_speed: 0.005,
            zoom_speed: 0.001,
            zoom_min: 0.5,
            zoom_max: 2.5,
            initial_tilt: 0.2,
            initial_zoom: 1.0,
        }
    }
}

/// Full tuning for the point-cloud sphere.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereConfig {
    pub generator: GeneratorConfig,
    pub projection: ProjectionConfig,
    pub controls: ControlsConfig,
}

impl SphereConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.generator;
        positive("generator.radius", g.radius)?;
        in_range(
            "generator.filler_dark_probability",
            g.filler_dark_probability,
            0.0,
            1.0,
        )?;

        let p = &self.projection;
        positive("projection.fov", p.fov)?;
        finite("projection.cull_z", p.cull_z)?;

        let c = &self.controls;
        finite("controls.rotate_speed", c.rotate_speed)?;
        finite("controls.zoom_speed", c.zoom_speed)?;
        finite("controls.initial_tilt", c.initial_tilt)?;
        positive("controls.zoom_min", c.zoom_min)?;
        positive("controls.zoom_max", c.zoom_max)?;
        if c.zoom_min > c.zoom_max {
            return Err(ConfigError::ZoomBoundsInverted {
                min: c.zoom_min,
                max: c.zoom_max,
            });
        }
        in_range("controls.initial_zoom", c.initial_zoom, c.zoom_min, c.zoom_max)?;
        Ok(())
    }
}

fn finite(field: &'static str, v: f64) -> Result<(), ConfigError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite(field))
    }
}

fn positive(field: &'static str, v: f64) -> Result<(), ConfigError> {
    finite(field, v)?;
    if v > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive(field))
    }
}

fn in_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}
