//! Headless rendering helpers behind the `sphere` binary.

use std::fs;
use std::io::Read;
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use render::{DrawCommand, FrameStats, RecordedImage, RecordingSurface, ViewerConfig};
use scene::camera::CameraState;
use scene::cloud::PointCloud;
use scene::files::FileRef;
use scene::points::Point;
use serde::Serialize;
use streaming::ImageCache;
use tracing::debug;

/// Camera and viewport overrides for a single frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRequest {
    pub width: u32,
    pub height: u32,
    pub rotate_x: Option<f64>,
    pub rotate_y: Option<f64>,
    pub zoom: Option<f64>,
    pub seed: u64,
    pub include_commands: bool,
}

impl Default for FrameRequest {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            rotate_x: None,
            rotate_y: None,
            zoom: None,
            seed: 0,
            include_commands: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    pub fingerprint: String,
    pub camera: CameraState,
    pub stats: FrameStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<DrawCommand>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PointsReport {
    pub fingerprint: String,
    pub file_count: usize,
    pub points: Vec<Point>,
}

/// Read a file list from `path`, or stdin when `path` is `-`.
pub fn read_files(path: &Path) -> Result<Vec<FileRef>, String> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("read stdin: {e}"))?;
        buf
    } else {
        fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))?
    };
    parse_files(&text)
}

pub fn parse_files(text: &str) -> Result<Vec<FileRef>, String> {
    serde_json::from_str(text).map_err(|e| format!("parse file list: {e}"))
}

pub fn read_config(path: Option<&Path>) -> Result<ViewerConfig, String> {
    let Some(path) = path else {
        return Ok(ViewerConfig::default());
    };
    let text = fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))?;
    ViewerConfig::from_json(&text).map_err(|e| format!("config {path:?}: {e}"))
}

fn build_cloud(files: &[FileRef], config: &ViewerConfig, seed: u64) -> PointCloud {
    let mut cloud = PointCloud::new();
    let mut rng = SmallRng::seed_from_u64(seed);
    cloud.sync(files, &config.sphere.generator, &mut rng);
    cloud
}

fn fingerprint_hex(cloud: &PointCloud) -> String {
    cloud.fingerprint().map(|f| f.to_hex()).unwrap_or_default()
}

/// Camera at the configured rest pose with `req` overrides applied.
pub fn camera_for(config: &ViewerConfig, req: &FrameRequest) -> CameraState {
    let controls = &config.sphere.controls;
    let mut camera = CameraState::new(controls);
    if let Some(x) = req.rotate_x {
        camera.rotation.x = x;
    }
    if let Some(y) = req.rotate_y {
        camera.rotation.y = y;
    }
    if let Some(zoom) = req.zoom {
        camera.zoom = zoom.clamp(controls.zoom_min, controls.zoom_max);
    }
    camera
}

/// Render one frame into a recording surface.
///
/// Bitmaps are never decoded here, so image files take the dot path.
pub fn render_frame(files: &[FileRef], config: &ViewerConfig, req: &FrameRequest) -> FrameReport {
    let cloud = build_cloud(files, config, req.seed);
    let camera = camera_for(config, req);
    let renderer = config.renderer();
    let images: ImageCache<RecordedImage> = ImageCache::new();

    let mut surface = RecordingSurface::new(req.width as f64, req.height as f64);
    let stats = renderer.render(&mut surface, cloud.points(), files, &camera, &images);
    debug!(?stats, width = req.width, height = req.height, "frame rendered");

    FrameReport {
        fingerprint: fingerprint_hex(&cloud),
        camera,
        stats,
        commands: req.include_commands.then(|| surface.take_commands()),
    }
}

pub fn generate_points(files: &[FileRef], config: &ViewerConfig, seed: u64) -> PointsReport {
    let cloud = build_cloud(files, config, seed);
    PointsReport {
        fingerprint: fingerprint_hex(&cloud),
        file_count: cloud.file_count(),
        points: cloud.points().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::{FrameRequest, camera_for, generate_points, parse_files, render_frame};
    use pretty_assertions::assert_eq;
    use render::ViewerConfig;

    const FILES: &str = r#"[
        { "id": "1", "name": "notes.txt", "type": "text/plain", "size": 12,
          "content": "hello", "timestamp": 1700000000000 },
        { "id": "2", "name": "cover.png", "type": "image/png", "size": 4,
          "content": "data:image/png;base64,AAAA", "timestamp": 1700000000001 }
    ]"#;

    #[test]
    fn parses_external_file_records() {
        let files = parse_files(FILES).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[1].mime_type, "image/png");
        assert!(files[1].is_image());
        assert!(parse_files("{").is_err());
    }

    #[test]
    fn frame_without_commands_reports_stats_only() {
        let files = parse_files(FILES).unwrap();
        let report = render_frame(&files, &ViewerConfig::default(), &FrameRequest::default());
        assert_eq!(report.stats.points, 2 + 146);
        assert_eq!(report.stats.links, 2);
        assert_eq!(report.stats.images, 0);
        assert!(report.commands.is_none());
        assert_eq!(report.fingerprint.len(), 64);

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("commands").is_none());
    }

    #[test]
    fn frame_with_commands_starts_with_clear() {
        let req = FrameRequest {
            include_commands: true,
            ..FrameRequest::default()
        };
        let report = render_frame(&[], &ViewerConfig::default(), &req);
        let commands = report.commands.unwrap();
        let json = serde_json::to_value(&commands[0]).unwrap();
        assert_eq!(json["op"], "clear");
        assert_eq!(report.stats.drawn, 150);
    }

    #[test]
    fn camera_overrides_clamp_zoom() {
        let cfg = ViewerConfig::default();
        let req = FrameRequest {
            rotate_x: Some(-1.0),
            zoom: Some(10.0),
            ..FrameRequest::default()
        };
        let camera = camera_for(&cfg, &req);
        assert_eq!(camera.rotation.x, -1.0);
        assert_eq!(camera.rotation.y, 0.0);
        assert_eq!(camera.zoom, 2.5);

        let rest = camera_for(&cfg, &FrameRequest::default());
        assert_eq!(rest.rotation.x, 0.2);
        assert_eq!(rest.zoom, 1.0);
    }

    #[test]
    fn same_seed_same_points() {
        let files = parse_files(FILES).unwrap();
        let cfg = ViewerConfig::default();
        let a = serde_json::to_string(&generate_points(&files, &cfg, 9)).unwrap();
        let b = serde_json::to_string(&generate_points(&files, &cfg, 9)).unwrap();
        assert_eq!(a, b);
        assert_eq!(generate_points(&files, &cfg, 9).file_count, 2);
    }
}
