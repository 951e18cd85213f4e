use rand::Rng;
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::files::FileRef;
use crate::points::{Point, generate_points};

/// Content identity of a file list plus the generator settings used on it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub fn of(files: &[FileRef], config: &GeneratorConfig) -> Self {
        let mut h = blake3::Hasher::new();
        h.update(&(files.len() as u64).to_le_bytes());
        for f in files {
            for field in [&f.id, &f.name, &f.mime_type, &f.content] {
                h.update(&(field.len() as u64).to_le_bytes());
                h.update(field.as_bytes());
            }
        }
        h.update(&config.radius.to_le_bytes());
        h.update(&(config.filler_base as u64).to_le_bytes());
        h.update(&(config.filler_min as u64).to_le_bytes());
        h.update(&(config.filler_decay as u64).to_le_bytes());
        h.update(&config.filler_dark_probability.to_le_bytes());
        Self(*h.finalize().as_bytes())
    }

    pub fn to_hex(&self) -> String {
        blake3::Hash::from_bytes(self.0).to_hex().to_string()
    }
}

/// The generated sphere, regenerated whole whenever its inputs change.
#[derive(Debug, Default)]
pub struct PointCloud {
    points: Vec<Point>,
    fingerprint: Option<Fingerprint>,
    file_count: usize,
    generation: u64,
}

impl PointCloud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Regenerate if `files` or `config` differ from the last sync.
    ///
    /// Returns `true` when the point set was replaced; callers holding
    /// per-file state (such as decoded images) should reset it then.
    pub fn sync<R: Rng + ?Sized>(
        &mut self,
        files: &[FileRef],
        config: &GeneratorConfig,
        rng: &mut R,
    ) -> bool {
        let fingerprint = Fingerprint::of(files, config);
        if self.fingerprint == Some(fingerprint) {
            return false;
        }

        self.points = generate_points(files, config, rng);
        self.fingerprint = Some(fingerprint);
        self.file_count = files.len();
        self.generation += 1;
        debug!(
            files = self.file_count,
            points = self.points.len(),
            generation = self.generation,
            "regenerated point cloud"
        );
        true
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn file_count(&self) -> usize {
        self.file_count
    }

    /// Number of regenerations so far; 0 before the first sync.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn fingerprint(&self) -> Option<Fingerprint> {
        self.fingerprint
    }
}
