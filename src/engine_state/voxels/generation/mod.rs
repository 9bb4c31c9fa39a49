//! # Voxel Synthesis
//!
//! Fills a chunk's block buffer from layered noise. Generation is a pure function of
//! the chunk anchor and the [`TerrainParams`]; the same inputs always produce the same
//! bytes.
//!
//! ## Algorithm
//!
//! For every column `(x, z)` of a chunk:
//! 1. The height layers are sampled in 2D at the seeded world position and summed.
//! 2. The sum plus `ground_level`, rounded half-to-even, gives the surface height.
//! 3. Each block is `DIRT` when the surface height is at or below the block's world
//!    height, otherwise `AIR`.
//! 4. Blocks below `ground_level - 1` sample 3D cave noise. The sample is blended
//!    towards `1` by depth (no influence at `ground_level - 2`, full influence at
//!    `ground_level - 20`); a blended value under `noise_threshold` forces `DIRT`.
//!    A blended value at or above the threshold keeps the block from step 3.

use cgmath::Point3;
use log::{debug, trace};
use web_time::Instant;

use super::{block::block_type::BlockType, chunk::ChunkData};

pub mod noise_layer;
pub mod sampler;

use noise_layer::NoiseLayer;
use sampler::NoiseSampler;

/// Depth below `ground_level` at which caves start to fade in.
pub const CAVE_BEGIN_DEPTH: i32 = 2;
/// Depth below `ground_level` at which caves reach full influence.
pub const CAVE_FULL_DEPTH: i32 = 20;

/// Everything synthesis depends on besides the chunk anchor.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainParams {
    /// Resolved world seed, added to the 2D sample coordinates.
    pub seed: i32,
    /// Height layers in summation order.
    pub noise_layers: Vec<NoiseLayer>,
    /// Frequency multiplier of the 3D cave noise.
    pub cave_noise_scale: f32,
    /// Blended cave values below this threshold force `DIRT`.
    pub noise_threshold: f32,
    /// Offset applied on every axis of the 3D cave noise.
    pub noise_offset: i32,
    /// Base surface height in blocks.
    pub ground_level: i32,
    /// Vertical extent of the world; not read by the block rule.
    pub world_height: i32,
}

/// How strongly cave noise applies at a world height.
///
/// Returns `0` at or above `ground_level - 2`, `1` at or below `ground_level - 20`,
/// and a linear ramp in between.
pub fn cave_blend_factor(ground_level: i32, world_y: i32) -> f32 {
    let cave_begin_height = ground_level - CAVE_BEGIN_DEPTH;
    let cave_full_height = ground_level - CAVE_FULL_DEPTH;
    inverse_lerp(cave_begin_height as f32, cave_full_height as f32, world_y as f32)
}

fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Deterministic terrain generator.
#[derive(Clone, Debug)]
pub struct VoxelSynthesizer {
    params: TerrainParams,
    sampler: NoiseSampler,
}

impl VoxelSynthesizer {
    /// Creates a synthesizer for one world.
    pub fn new(params: TerrainParams) -> Self {
        VoxelSynthesizer {
            params,
            sampler: NoiseSampler::new(),
        }
    }

    /// The parameters this synthesizer was built with.
    pub fn params(&self) -> &TerrainParams {
        &self.params
    }

    /// Summed height-layer signal for the world column `(world_x, world_z)`.
    pub fn height_signal(&self, world_x: i32, world_z: i32) -> f32 {
        let seed = self.params.seed;
        self.params
            .noise_layers
            .iter()
            .map(|layer| {
                let sample = self.sampler.sample_2d(
                    world_x.wrapping_add(seed) as f32 * layer.scale,
                    world_z.wrapping_add(seed) as f32 * layer.scale,
                );
                layer.contribution(sample)
            })
            .sum()
    }

    /// Absolute surface height of the world column `(world_x, world_z)`.
    pub fn ground_position(&self, world_x: i32, world_z: i32) -> i32 {
        let surface = self.height_signal(world_x, world_z) + self.params.ground_level as f32;
        surface.round_ties_even() as i32
    }

    /// Cave noise at a world block, blended towards solid by depth.
    pub fn blended_cave_value(&self, world: Point3<i32>) -> f32 {
        let scale = self.params.cave_noise_scale;
        let offset = self.params.noise_offset as f32;
        let cave_noise = self.sampler.sample_3d(
            world.x as f32 * scale + offset,
            world.y as f32 * scale + offset,
            world.z as f32 * scale + offset,
        );
        lerp(
            1.0,
            cave_noise,
            cave_blend_factor(self.params.ground_level, world.y),
        )
    }

    /// Block type at a world position given its column's surface height.
    pub fn block_at(&self, world: Point3<i32>, ground_position: i32) -> BlockType {
        let mut block_type = if ground_position <= world.y {
            BlockType::DIRT
        } else {
            BlockType::AIR
        };

        if world.y < self.params.ground_level - 1
            && self.blended_cave_value(world) < self.params.noise_threshold
        {
            block_type = BlockType::DIRT;
        }

        block_type
    }

    /// Fills every block of `chunk`.
    ///
    /// Chunks carrying player edits are left untouched.
    ///
    /// # Returns
    /// `true` if the buffer was written.
    pub fn synthesize(&self, chunk: &mut ChunkData) -> bool {
        let anchor = chunk.world_position();
        if chunk.modified_by_player() {
            debug!("Skipping synthesis of edited chunk {:?}", anchor);
            return false;
        }

        let started = Instant::now();
        let size = chunk.chunk_size();
        for x in 0..size {
            for z in 0..size {
                let ground_position = self.ground_position(anchor.x + x, anchor.z + z);
                for y in 0..size {
                    let world = Point3::new(anchor.x + x, anchor.y + y, anchor.z + z);
                    chunk.set_block(Point3::new(x, y, z), self.block_at(world, ground_position));
                }
            }
        }
        chunk.mark_generated();

        trace!(
            "Synthesized chunk {:?} in {:?}",
            anchor,
            started.elapsed()
        );
        true
    }
}
