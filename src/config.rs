//! # World Configuration
//!
//! Every tunable of the streaming pipeline lives in [`WorldConfig`]. It is plain data,
//! loaded once from JSON and validated before a world is created. Missing fields take
//! the defaults below.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    engine_state::voxels::{
        chunk::DEFAULT_CHUNK_DIMENSION,
        generation::{noise_layer::NoiseLayer, TerrainParams},
    },
    error::ConfigError,
};

/// How the world seed is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedPolicy {
    /// Pick a seed in `100..999` when the world is created.
    Random,
    /// Always use this seed.
    Fixed(i32),
}

impl SeedPolicy {
    /// Lowest seed the random policy can produce.
    pub const RANDOM_SEED_MIN: i32 = 100;
    /// Upper bound (exclusive) of the random policy.
    pub const RANDOM_SEED_MAX: i32 = 999;

    /// Produces the concrete seed for a new world.
    pub fn resolve(self) -> i32 {
        match self {
            SeedPolicy::Random => fastrand::i32(Self::RANDOM_SEED_MIN..Self::RANDOM_SEED_MAX),
            SeedPolicy::Fixed(seed) => seed,
        }
    }
}

/// Tunables of world generation and streaming.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Edge length of a chunk in blocks.
    pub chunk_size: i32,
    /// Edge length of the view volume, in chunks.
    pub view_distance_in_chunk: i32,
    /// Base height of the terrain surface in blocks.
    pub ground_level: i32,
    /// Vertical extent of the world. Carried for collaborators; synthesis does not read it.
    pub world_height: i32,
    /// Seed selection.
    pub seed: SeedPolicy,
    /// Height layers, summed in order.
    pub noise_layers: Vec<NoiseLayer>,
    /// Frequency multiplier of the 3D cave noise.
    pub cave_noise_scale: f32,
    /// Blended cave values below this threshold force a solid block.
    pub noise_threshold: f32,
    /// Offset applied on every axis of the 3D cave noise.
    pub noise_offset: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            chunk_size: DEFAULT_CHUNK_DIMENSION,
            view_distance_in_chunk: 6,
            ground_level: 50,
            world_height: 128,
            seed: SeedPolicy::Random,
            noise_layers: vec![
                NoiseLayer::new(0.02, 12.0, 0.0),
                NoiseLayer::new(0.08, 4.0, 0.3),
            ],
            cave_noise_scale: 0.3,
            noise_threshold: 0.35,
            noise_offset: 0,
        }
    }
}

impl WorldConfig {
    /// Parses and validates a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::info!("Loading world config from {}", path.display());
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Checks the invariants the pipeline relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size <= 0 {
            return Err(ConfigError::Invalid(format!(
                "chunk_size must be positive, got {}",
                self.chunk_size
            )));
        }
        if self.view_distance_in_chunk <= 0 {
            return Err(ConfigError::Invalid(format!(
                "view_distance_in_chunk must be positive, got {}",
                self.view_distance_in_chunk
            )));
        }
        for (index, layer) in self.noise_layers.iter().enumerate() {
            if !(layer.scale.is_finite() && layer.scale > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "noise layer {} has scale {}, expected a positive finite value",
                    index, layer.scale
                )));
            }
            if !(layer.intensity.is_finite() && layer.height_offset.is_finite()) {
                return Err(ConfigError::Invalid(format!(
                    "noise layer {} has a non-finite parameter",
                    index
                )));
            }
        }
        if !(self.cave_noise_scale.is_finite() && self.noise_threshold.is_finite()) {
            return Err(ConfigError::Invalid(
                "cave parameters must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Generation parameters for a world using the given resolved seed.
    pub fn terrain_params(&self, seed: i32) -> TerrainParams {
        TerrainParams {
            seed,
            noise_layers: self.noise_layers.clone(),
            cave_noise_scale: self.cave_noise_scale,
            noise_threshold: self.noise_threshold,
            noise_offset: self.noise_offset,
            ground_level: self.ground_level,
            world_height: self.world_height,
        }
    }
}
