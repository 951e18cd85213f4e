use scene::config::{ConfigError, SphereConfig};
use serde::{Deserialize, Serialize};

use crate::renderer::SphereRenderer;
use crate::style::RenderStyle;

/// Everything a host needs to set up a visualizer, as loaded from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub sphere: SphereConfig,
    pub style: RenderStyle,
}

impl ViewerConfig {
    pub fn from_json(text: &str) -> Result<Self, String> {
        let config: Self = serde_json::from_str(text).map_err(|e| e.to_string())?;
        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sphere.validate()
    }

    pub fn renderer(&self) -> SphereRenderer {
        SphereRenderer::new(&self.sphere, self.style.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::ViewerConfig;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = ViewerConfig::from_json(
            r#"{
                "sphere": { "generator": { "radius": 180.0 } },
                "style": { "file_radius": 12.0 }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.sphere.generator.radius, 180.0);
        assert_eq!(cfg.sphere.projection.fov, 400.0);
        assert_eq!(cfg.style.file_radius, 12.0);
        assert_eq!(cfg.style.image_radius, 28.0);

        let renderer = cfg.renderer();
        assert_eq!(renderer.sphere_radius, 180.0);
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(ViewerConfig::from_json("{}").unwrap(), ViewerConfig::default());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = ViewerConfig::from_json(
            r#"{ "sphere": { "controls": { "zoom_min": 3.0, "zoom_max": 1.0 } } }"#,
        )
        .unwrap_err();
        assert!(err.contains("zoom"), "{err}");
        assert!(ViewerConfig::from_json("[").is_err());
    }
}
