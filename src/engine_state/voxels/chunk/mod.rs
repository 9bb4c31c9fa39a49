//! # Chunk Module
//!
//! This module provides the `ChunkData` struct, the unit of voxel storage and of
//! generation. A chunk covers a cube of `chunk_size³` blocks whose minimum corner
//! (the anchor) sits at a world position that is a multiple of `chunk_size` on
//! every axis.
//!
//! ## Storage
//!
//! Blocks are kept in a flat buffer indexed by `x + y * size + z * size²` for local
//! coordinates in `0..size`. The buffer is allocated once, at construction, and its
//! length never changes.

use cgmath::Point3;

use super::block::block_type::BlockType;

pub mod chunk_coordinates;

/// The default dimension (width, height, depth) of a chunk in blocks.
pub const DEFAULT_CHUNK_DIMENSION: i32 = 16;

/// Voxel data for one cubic region of the world.
#[derive(Clone, Debug)]
pub struct ChunkData {
    /// Edge length of the chunk in blocks.
    chunk_size: i32,
    /// World-space position of the chunk's minimum corner.
    world_position: Point3<i32>,
    /// Flat block buffer, always `chunk_size³` long.
    blocks: Vec<BlockType>,
    /// Set once a player edit touched this chunk; generation leaves such chunks alone.
    modified_by_player: bool,
    /// Set once the synthesizer filled the buffer.
    generated: bool,
}

impl ChunkData {
    /// Creates an ungenerated chunk filled with air.
    ///
    /// # Arguments
    /// * `chunk_size` - Edge length in blocks, must be positive
    /// * `world_position` - The anchor; a multiple of `chunk_size` on each axis
    pub fn new(chunk_size: i32, world_position: Point3<i32>) -> Self {
        debug_assert!(chunk_size > 0, "chunk size must be positive");
        debug_assert!(
            world_position.x.rem_euclid(chunk_size) == 0
                && world_position.y.rem_euclid(chunk_size) == 0
                && world_position.z.rem_euclid(chunk_size) == 0,
            "anchor {:?} is not aligned to chunk size {}",
            world_position,
            chunk_size
        );
        let edge = chunk_size.max(0) as usize;
        ChunkData {
            chunk_size,
            world_position,
            blocks: vec![BlockType::AIR; edge * edge * edge],
            modified_by_player: false,
            generated: false,
        }
    }

    /// Edge length of the chunk in blocks.
    pub fn chunk_size(&self) -> i32 {
        self.chunk_size
    }

    /// World-space anchor of the chunk.
    pub fn world_position(&self) -> Point3<i32> {
        self.world_position
    }

    /// The whole block buffer in index order.
    pub fn blocks(&self) -> &[BlockType] {
        &self.blocks
    }

    /// The block buffer as raw bytes, one byte per block.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.blocks)
    }

    /// Whether a player edit has touched this chunk.
    pub fn modified_by_player(&self) -> bool {
        self.modified_by_player
    }

    /// Whether the synthesizer has filled this chunk.
    pub fn is_generated(&self) -> bool {
        self.generated
    }

    pub(crate) fn mark_generated(&mut self) {
        self.generated = true;
    }

    /// Checks that a local coordinate lies inside the chunk.
    pub fn in_range(&self, local: Point3<i32>) -> bool {
        let range = 0..self.chunk_size;
        range.contains(&local.x) && range.contains(&local.y) && range.contains(&local.z)
    }

    /// Flat buffer index of an in-range local coordinate.
    fn index(&self, local: Point3<i32>) -> usize {
        (local.x + local.y * self.chunk_size + local.z * self.chunk_size * self.chunk_size) as usize
    }

    /// Gets the block at a local coordinate, or `BlockType::NONE` when out of range.
    pub fn get_block(&self, local: Point3<i32>) -> BlockType {
        if !self.in_range(local) {
            return BlockType::NONE;
        }
        self.blocks[self.index(local)]
    }

    /// Sets the block at a local coordinate. Out-of-range writes are ignored.
    pub fn set_block(&mut self, local: Point3<i32>, block_type: BlockType) {
        if !self.in_range(local) {
            log::trace!(
                "ignoring out-of-range write at {:?} in chunk {:?}",
                local,
                self.world_position
            );
            return;
        }
        let index = self.index(local);
        self.blocks[index] = block_type;
    }

    /// Applies a player edit and marks the chunk as modified.
    ///
    /// # Returns
    /// `true` if the coordinate was in range and the edit was applied.
    pub fn edit_block(&mut self, local: Point3<i32>, block_type: BlockType) -> bool {
        if !self.in_range(local) {
            return false;
        }
        self.set_block(local, block_type);
        self.modified_by_player = true;
        true
    }

    /// Converts a world block coordinate to this chunk's local frame.
    ///
    /// The result is only meaningful for coordinates the chunk contains; see
    /// [`in_range`](Self::in_range).
    pub fn local_position(&self, world: Point3<i32>) -> Point3<i32> {
        chunk_coordinates::block_in_chunk_coordinate(self.world_position, world)
    }
}
