//! # Block Module
//!
//! This module provides the block-related vocabulary of the voxel world:
//! block type definitions and block face handling.

use block_type::BlockType;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types in memory.
pub type BlockTypeSize = u8;

/// Maps each block type to its texture index in the atlas.
///
/// Indexed by `BlockType` as a `usize`. Only renderable types have a meaningful entry.
pub static BLOCK_TYPE_TO_TEXTURE_INDEX: [u32; 3] = [
    0, // NONE (never rendered)
    0, // AIR (never rendered)
    1, // DIRT
];

/// Gets the atlas texture index used for every face of `block_type`.
pub fn texture_index(block_type: BlockType) -> u32 {
    BLOCK_TYPE_TO_TEXTURE_INDEX[block_type as usize]
}
