use foundation::math::{Vec3, fibonacci_sphere};
use rand::Rng;
use serde::Serialize;

use crate::config::GeneratorConfig;
use crate::files::{FileRef, FillerShade, PointCategory};

/// A fixed position on the sphere, optionally bound to a file.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Point {
    pub position: Vec3,
    pub category: PointCategory,
    /// Index into the file list the point set was generated from.
    pub file: Option<usize>,
}

impl Point {
    pub fn is_file(&self) -> bool {
        self.file.is_some()
    }
}

/// Number of decorative points added for `file_count` files.
pub fn filler_count(file_count: usize, config: &GeneratorConfig) -> usize {
    config
        .filler_base
        .saturating_sub(config.filler_decay.saturating_mul(file_count))
        .max(config.filler_min)
}

pub fn total_points(file_count: usize, config: &GeneratorConfig) -> usize {
    file_count + filler_count(file_count, config)
}

/// Build the sphere for `files`.
///
/// The first `files.len()` spiral indices are bound to the files in input
/// order; the rest are filler. Only filler shades draw from `rng`.
pub fn generate_points<R: Rng + ?Sized>(
    files: &[FileRef],
    config: &GeneratorConfig,
    rng: &mut R,
) -> Vec<Point> {
    let total = total_points(files.len(), config);
    let mut out = Vec::with_capacity(total);

    for i in 0..total {
        let position = fibonacci_sphere(i, total, config.radius);
        let point = match files.get(i) {
            Some(file) => Point {
                position,
                category: file.category(),
                file: Some(i),
            },
            None => Point {
                position,
                category: PointCategory::Filler(filler_shade(config, rng)),
                file: None,
            },
        };
        out.push(point);
    }

    out
}

fn filler_shade<R: Rng + ?Sized>(config: &GeneratorConfig, rng: &mut R) -> FillerShade {
    if rng.random::<f64>() < config.filler_dark_probability {
        FillerShade::Dark
    } else {
        FillerShade::Light
    }
}
