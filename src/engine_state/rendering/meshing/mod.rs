//! Mesh generation for voxel chunks.
//!
//! The streaming pipeline treats mesh construction as a collaborator behind the
//! [`MeshBuilder`] trait: a pure function of a chunk's blocks and of the border blocks
//! of its neighbours. [`CulledMeshBuilder`] is the reference implementation.
//!
//! # Neighbour blocks
//! Border blocks are read through a [`BlockLookup`]. Blocks of chunks that do not exist
//! yet come back as `BlockType::NONE`, which counts as non-solid, so border faces
//! facing an unknown neighbour are emitted. When that neighbour is built later, the
//! streaming pipeline asks this chunk to rebuild and the hidden faces disappear.

use cgmath::Point3;
use log::trace;
use web_time::Instant;

use crate::engine_state::voxels::{
    block::block_side::BlockSide, chunk::ChunkData, BlockLookup,
};

pub mod mesh;

pub use mesh::{Face, MeshData, MeshSide};

/// Turns chunk contents into renderable geometry.
pub trait MeshBuilder {
    /// Builds the mesh of `chunk`, reading neighbour blocks from `world`.
    fn build_mesh(&self, chunk: &ChunkData, world: &dyn BlockLookup) -> MeshData;
}

/// Emits one quad for every solid block face that is not covered by a solid neighbour.
#[derive(Clone, Copy, Debug, Default)]
pub struct CulledMeshBuilder;

impl CulledMeshBuilder {
    /// Whether the block next to `local` in `side`'s direction is solid.
    fn is_neighbour_solid(
        chunk: &ChunkData,
        world: &dyn BlockLookup,
        local: Point3<i32>,
        side: BlockSide,
    ) -> bool {
        let neighbour = local + side.direction();
        if chunk.in_range(neighbour) {
            return chunk.get_block(neighbour).is_solid();
        }
        let anchor = chunk.world_position();
        world
            .block_at(Point3::new(
                anchor.x + neighbour.x,
                anchor.y + neighbour.y,
                anchor.z + neighbour.z,
            ))
            .is_solid()
    }
}

impl MeshBuilder for CulledMeshBuilder {
    fn build_mesh(&self, chunk: &ChunkData, world: &dyn BlockLookup) -> MeshData {
        let started = Instant::now();
        let anchor = chunk.world_position();
        let size = chunk.chunk_size();
        let mut mesh = MeshData::new();

        for z in 0..size {
            for y in 0..size {
                for x in 0..size {
                    let local = Point3::new(x, y, z);
                    let block_type = chunk.get_block(local);
                    if !block_type.is_solid() {
                        continue;
                    }
                    let world_position = Point3::new(anchor.x + x, anchor.y + y, anchor.z + z);
                    for side in BlockSide::all() {
                        if Self::is_neighbour_solid(chunk, world, local, side) {
                            continue;
                        }
                        mesh.add_face(&Face::new(world_position, block_type as u8, side));
                    }
                }
            }
        }

        trace!(
            "Meshed chunk {:?}: {} faces in {:?}",
            anchor,
            mesh.face_count(),
            started.elapsed()
        );
        mesh
    }
}
