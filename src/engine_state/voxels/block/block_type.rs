//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world.
//! It provides functionality for block type identification and conversion.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use super::BlockTypeSize;

/// Enumerates all possible block types in the voxel world.
///
/// The `FromPrimitive` derive allows conversion from the compact byte representation,
/// and `NoUninit` lets a block buffer be viewed as raw bytes.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, FromPrimitive, bytemuck::NoUninit)]
pub enum BlockType {
    /// No chunk holds this position, or the position is outside the chunk that was asked.
    ///
    /// Never written by generation. Callers treat it as "unknown" and, for rendering,
    /// as non-blocking.
    NONE = 0,

    /// An air block, which is non-solid and not rendered.
    #[default]
    AIR = 1,

    /// A basic dirt block, solid and rendered.
    DIRT = 2,
}

impl BlockType {
    /// Converts a `BlockTypeSize` to a `BlockType`.
    ///
    /// Unknown values decode to `BlockType::NONE`.
    pub fn get_block_type_from_int(btype: BlockTypeSize) -> Self {
        BlockType::from_u8(btype).unwrap_or(BlockType::NONE)
    }

    /// Whether the block occludes the faces of its neighbours.
    ///
    /// `NONE` is not solid, so a face next to a missing neighbour stays visible.
    pub fn is_solid(self) -> bool {
        self == BlockType::DIRT
    }
}
