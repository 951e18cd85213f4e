//! Transform stage and depth sort.

use foundation::math::{Vec2, Vec3, stable_total_cmp_f64};
use serde::Serialize;

use crate::camera::CameraState;
use crate::config::ProjectionConfig;
use crate::points::Point;

/// A point after rotation and perspective projection.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct ProjectedPoint {
    /// Index into the generated point list.
    pub index: usize,
    /// Position after both rotations.
    pub rotated: Vec3,
    /// Projected screen position in pixels.
    pub screen: Vec2,
    /// Perspective scale factor (includes zoom).
    pub scale: f64,
}

impl ProjectedPoint {
    pub fn depth(&self) -> f64 {
        self.rotated.z
    }
}

/// Rotate about X, then about Y, then project.
///
/// Screen Y is taken from the X-rotated `y`. The Y-axis rotation leaves `y`
/// untouched, so this equals the fully rotated value.
pub fn project(
    index: usize,
    position: Vec3,
    camera: &CameraState,
    center: Vec2,
    config: &ProjectionConfig,
) -> ProjectedPoint {
    let tilted = position.rotate_x(camera.rotation.x);
    let rotated = tilted.rotate_y(camera.rotation.y);

    let scale = camera.zoom * config.fov / (config.fov - rotated.z);

    ProjectedPoint {
        index,
        rotated,
        screen: Vec2::new(center.x + rotated.x * scale, center.y + tilted.y * scale),
        scale,
    }
}

pub fn is_culled(p: &ProjectedPoint, config: &ProjectionConfig) -> bool {
    // At or behind the eye the perspective divide is meaningless.
    p.rotated.z > config.cull_z || !(p.scale.is_finite() && p.scale > 0.0)
}

/// Project every point, drop culled ones, and order back to front.
///
/// The sort is stable, so equal depths keep generator order.
pub fn project_and_sort(
    points: &[Point],
    camera: &CameraState,
    center: Vec2,
    config: &ProjectionConfig,
) -> Vec<ProjectedPoint> {
    let mut out: Vec<ProjectedPoint> = points
        .iter()
        .enumerate()
        .map(|(i, p)| project(i, p.position, camera, center, config))
        .filter(|p| !is_culled(p, config))
        .collect();
    out.sort_by(|a, b| stable_total_cmp_f64(a.rotated.z, b.rotated.z));
    out
}
