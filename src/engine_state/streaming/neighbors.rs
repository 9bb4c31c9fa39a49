//! Neighbour invalidation.
//!
//! A chunk's border faces depend on the blocks of the six chunks it shares a face
//! with. When a chunk is built next to one that was built earlier, the earlier chunk
//! meshed its border against a missing neighbour and must be rebuilt.

use cgmath::Point3;
use log::trace;

use crate::engine_state::{
    rendering::{ChunkRenderer, MeshBuilder},
    voxels::{block::block_side::BlockSide, world::ChunkStore},
};

/// Anchors of the six chunks sharing a face with the chunk at `anchor`.
pub fn neighbor_anchors(anchor: Point3<i32>, chunk_size: i32) -> [Point3<i32>; 6] {
    BlockSide::all().map(|side| anchor + side.direction() * chunk_size)
}

/// Asks every built face neighbour of `anchor` to recompute its mesh.
///
/// # Returns
/// The number of neighbours that were refreshed.
pub fn notify_neighbors<R: ChunkRenderer>(
    store: &ChunkStore<R>,
    anchor: Point3<i32>,
    builder: &dyn MeshBuilder,
) -> usize {
    let mut refreshed = 0;
    for neighbor in neighbor_anchors(anchor, store.chunk_size()) {
        if let Some(renderer) = store.renderer(neighbor) {
            trace!("Refreshing {:?} after build of {:?}", neighbor, anchor);
            renderer.get_mut().refresh_chunk(builder, store);
            refreshed += 1;
        }
    }
    refreshed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbours_are_one_chunk_away_on_each_axis() {
        let anchors = neighbor_anchors(Point3::new(16, 0, -32), 16);
        let expected = [
            Point3::new(0, 0, -32),
            Point3::new(32, 0, -32),
            Point3::new(16, -16, -32),
            Point3::new(16, 16, -32),
            Point3::new(16, 0, -48),
            Point3::new(16, 0, -16),
        ];
        assert_eq!(anchors, expected);
    }
}
