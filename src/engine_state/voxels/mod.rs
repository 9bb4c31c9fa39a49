//! # Voxel World
//!
//! This module contains the voxel data side of the engine: what a block is, how
//! chunks store blocks, how chunk contents are synthesized from noise, and the
//! store that tracks which chunks exist.
//!
//! ## Architecture
//!
//! * **Block**: Block types and block faces
//! * **Chunk**: Fixed-size cubes of blocks and coordinate conversions
//! * **Generation**: Layered-noise terrain synthesis
//! * **World**: The `ChunkStore` ledger of chunk data and render handles
//!
//! ## Data Flow
//!
//! 1. The streaming scheduler asks the store to ensure chunks in view exist
//! 2. The nearest unbuilt chunk is filled by the synthesizer
//! 3. The mesh builder reads the chunk and peeks at neighbours through [`BlockLookup`]

use cgmath::Point3;

use crate::core::{StResource, WeakStResource};

pub mod block;
pub mod chunk;
pub mod generation;
pub mod world;

use block::block_type::BlockType;
use chunk::ChunkData;

/// Owning handle to a chunk, held by the store.
pub type SharedChunk = StResource<ChunkData>;

/// Non-owning handle to a chunk, held by render handles.
pub type WeakChunk = WeakStResource<ChunkData>;

/// Read access to blocks by world coordinate.
///
/// Implementors return `BlockType::NONE` for positions whose chunk is unknown.
pub trait BlockLookup {
    /// Block at a world block coordinate.
    fn block_at(&self, world: Point3<i32>) -> BlockType;
}
