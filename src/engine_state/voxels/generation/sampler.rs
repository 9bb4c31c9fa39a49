//! Perlin sampling for terrain synthesis.

use noise::{NoiseFn, Perlin};

/// Deterministic smooth noise in two and three dimensions.
///
/// Both functions wrap the same Perlin permutation table and remap its output from
/// `[-1, 1]` to `[0, 1]`. The world seed is not baked into the table; the synthesizer
/// threads it through the sample coordinates instead.
#[derive(Clone, Debug)]
pub struct NoiseSampler {
    perlin: Perlin,
}

impl NoiseSampler {
    /// Seed of the permutation table shared by every world.
    pub const PERMUTATION_SEED: u32 = 0;

    /// Creates a sampler over the shared permutation table.
    pub fn new() -> Self {
        NoiseSampler {
            perlin: Perlin::new(Self::PERMUTATION_SEED),
        }
    }

    /// Samples 2D noise at already-scaled coordinates.
    pub fn sample_2d(&self, x: f32, y: f32) -> f32 {
        to_unit_range(self.perlin.get([x as f64, y as f64]))
    }

    /// Samples 3D noise at already-scaled coordinates.
    pub fn sample_3d(&self, x: f32, y: f32, z: f32) -> f32 {
        to_unit_range(self.perlin.get([x as f64, y as f64, z as f64]))
    }
}

impl Default for NoiseSampler {
    fn default() -> Self {
        Self::new()
    }
}

fn to_unit_range(value: f64) -> f32 {
    ((value + 1.0) * 0.5).clamp(0.0, 1.0) as f32
}
