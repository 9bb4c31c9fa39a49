//! # World Module
//!
//! This module provides the `ChunkStore`, the authoritative ledger of what exists in
//! the voxel world. It owns two mappings keyed by chunk anchor:
//!
//! - chunk data: every chunk that entered the view volume, generated or not
//! - render handles: every chunk that has been built and handed to the renderer
//!
//! Every anchor with a render handle also has chunk data; the converse need not hold.
//! Entries are only ever added.
//!
//! ## Ownership
//!
//! The store is the only owner of chunk data. Render handles receive a
//! [`WeakChunk`](super::WeakChunk) and never keep a chunk alive on their own.
//!
//! ## Thread Safety
//!
//! The store is single-threaded (`Rc` based) and is mutated only by the streaming
//! scheduler.

use std::collections::HashMap;

use cgmath::Point3;
use log::trace;

use crate::{core::StResource, error::StreamingError};

use super::{
    block::block_type::BlockType,
    chunk::{chunk_coordinates, ChunkData},
    BlockLookup, SharedChunk,
};

/// Chunk data and render handles of a world, keyed by anchor.
pub struct ChunkStore<R> {
    /// Edge length shared by every chunk in the store.
    chunk_size: i32,
    /// Generated-or-pending chunk data.
    chunk_data: HashMap<Point3<i32>, SharedChunk>,
    /// Anchors of `chunk_data` in the order they were inserted.
    insertion_order: Vec<Point3<i32>>,
    /// Built chunks.
    renderers: HashMap<Point3<i32>, StResource<R>>,
}

impl<R> ChunkStore<R> {
    /// Creates an empty store for chunks of the given edge length.
    pub fn new(chunk_size: i32) -> Self {
        ChunkStore {
            chunk_size,
            chunk_data: HashMap::new(),
            insertion_order: Vec::new(),
            renderers: HashMap::new(),
        }
    }

    /// Edge length shared by every chunk in the store.
    pub fn chunk_size(&self) -> i32 {
        self.chunk_size
    }

    /// Returns the chunk at `anchor`, creating an empty one if none exists.
    ///
    /// Never touches the render mapping.
    pub fn ensure_chunk(&mut self, anchor: Point3<i32>) -> SharedChunk {
        if let Some(chunk) = self.chunk_data.get(&anchor) {
            return chunk.clone();
        }

        trace!("Creating chunk data at {:?}", anchor);
        let chunk = StResource::new(ChunkData::new(self.chunk_size, anchor));
        self.chunk_data.insert(anchor, chunk.clone());
        self.insertion_order.push(anchor);
        chunk
    }

    /// Retrieves the chunk at `anchor`, if any.
    pub fn lookup_data(&self, anchor: Point3<i32>) -> Option<SharedChunk> {
        self.chunk_data.get(&anchor).cloned()
    }

    /// Whether a render handle exists for `anchor`.
    pub fn is_built(&self, anchor: Point3<i32>) -> bool {
        self.renderers.contains_key(&anchor)
    }

    /// Records the render handle of a built chunk.
    ///
    /// # Errors
    /// - [`StreamingError::MissingChunkData`] if `anchor` has no chunk data
    /// - [`StreamingError::AlreadyBuilt`] if `anchor` already has a render handle
    pub fn register_built(
        &mut self,
        anchor: Point3<i32>,
        renderer: R,
    ) -> Result<StResource<R>, StreamingError> {
        if !self.chunk_data.contains_key(&anchor) {
            return Err(StreamingError::MissingChunkData(anchor));
        }
        if self.renderers.contains_key(&anchor) {
            return Err(StreamingError::AlreadyBuilt(anchor));
        }

        let renderer = StResource::new(renderer);
        self.renderers.insert(anchor, renderer.clone());
        Ok(renderer)
    }

    /// Retrieves the render handle at `anchor`, if built.
    pub fn renderer(&self, anchor: Point3<i32>) -> Option<StResource<R>> {
        self.renderers.get(&anchor).cloned()
    }

    /// All chunk data in insertion order.
    pub fn chunks(&self) -> impl Iterator<Item = (Point3<i32>, &SharedChunk)> + '_ {
        self.insertion_order
            .iter()
            .filter_map(move |anchor| self.chunk_data.get(anchor).map(|chunk| (*anchor, chunk)))
    }

    /// Chunk data without a render handle, in insertion order.
    pub fn pending_chunks(&self) -> impl Iterator<Item = (Point3<i32>, &SharedChunk)> + '_ {
        self.chunks()
            .filter(move |(anchor, _)| !self.renderers.contains_key(anchor))
    }

    /// Number of chunks with data.
    pub fn len(&self) -> usize {
        self.chunk_data.len()
    }

    /// Whether the store holds no chunk data.
    pub fn is_empty(&self) -> bool {
        self.chunk_data.is_empty()
    }

    /// Number of built chunks.
    pub fn built_len(&self) -> usize {
        self.renderers.len()
    }

    /// Block at a world block coordinate.
    ///
    /// Returns `BlockType::NONE` when the owning chunk has never been created. Lookups
    /// never create chunks.
    pub fn get_block(&self, world: Point3<i32>) -> BlockType {
        let anchor = chunk_coordinates::chunk_anchor_from_block_coords(self.chunk_size, world);
        match self.chunk_data.get(&anchor) {
            Some(chunk) => {
                let chunk = chunk.get();
                chunk.get_block(chunk.local_position(world))
            }
            None => BlockType::NONE,
        }
    }

    /// Block at a coordinate relative to `from_chunk`'s anchor.
    ///
    /// The coordinate may fall outside `from_chunk`; the owning chunk is then looked up
    /// in the store.
    pub fn get_block_relative(&self, from_chunk: &ChunkData, local: Point3<i32>) -> BlockType {
        if from_chunk.in_range(local) {
            return from_chunk.get_block(local);
        }
        let anchor = from_chunk.world_position();
        self.get_block(Point3::new(
            anchor.x + local.x,
            anchor.y + local.y,
            anchor.z + local.z,
        ))
    }
}

impl<R> BlockLookup for ChunkStore<R> {
    fn block_at(&self, world: Point3<i32>) -> BlockType {
        self.get_block(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_chunk_is_idempotent() {
        let mut store: ChunkStore<()> = ChunkStore::new(16);
        let first = store.ensure_chunk(Point3::new(0, 16, 0));
        let second = store.ensure_chunk(Point3::new(0, 16, 0));
        assert!(first.ptr_eq(&second));
        assert_eq!(store.len(), 1);
        assert!(!store.is_built(Point3::new(0, 16, 0)));
        assert_eq!(first.get().blocks().len(), 16 * 16 * 16);
    }

    #[test]
    fn registering_without_data_fails() {
        let mut store: ChunkStore<u32> = ChunkStore::new(16);
        assert_eq!(
            store.register_built(Point3::new(16, 0, 0), 7).err(),
            Some(StreamingError::MissingChunkData(Point3::new(16, 0, 0)))
        );
        assert_eq!(store.built_len(), 0);
    }

    #[test]
    fn registering_twice_fails() {
        let mut store: ChunkStore<u32> = ChunkStore::new(16);
        let anchor = Point3::new(0, 0, 0);
        store.ensure_chunk(anchor);
        assert!(store.register_built(anchor, 1).is_ok());
        assert_eq!(
            store.register_built(anchor, 2).err(),
            Some(StreamingError::AlreadyBuilt(anchor))
        );
        assert_eq!(*store.renderer(anchor).unwrap().get(), 1);
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut store: ChunkStore<()> = ChunkStore::new(4);
        let anchors = [
            Point3::new(8, 0, 0),
            Point3::new(-4, 0, 0),
            Point3::new(0, 4, -8),
            Point3::new(0, 0, 0),
        ];
        for anchor in anchors {
            store.ensure_chunk(anchor);
        }
        store.ensure_chunk(anchors[1]);
        let seen: Vec<_> = store.chunks().map(|(anchor, _)| anchor).collect();
        assert_eq!(seen, anchors.to_vec());

        store.register_built(anchors[2], ()).unwrap();
        let pending: Vec<_> = store.pending_chunks().map(|(anchor, _)| anchor).collect();
        assert_eq!(pending, vec![anchors[0], anchors[1], anchors[3]]);
    }

    #[test]
    fn missing_chunk_reads_none() {
        let store: ChunkStore<()> = ChunkStore::new(16);
        assert_eq!(store.get_block(Point3::new(3, 4, 5)), BlockType::NONE);
        assert!(store.is_empty());
    }

    #[test]
    fn lookups_cross_chunk_borders() {
        let mut store: ChunkStore<()> = ChunkStore::new(4);
        let here = store.ensure_chunk(Point3::new(0, 0, 0));
        let west = store.ensure_chunk(Point3::new(-4, 0, 0));
        west.get_mut().set_block(Point3::new(3, 1, 2), BlockType::DIRT);

        assert_eq!(store.get_block(Point3::new(-1, 1, 2)), BlockType::DIRT);
        assert_eq!(store.get_block(Point3::new(0, 1, 2)), BlockType::AIR);
        assert_eq!(
            store.get_block_relative(&here.get(), Point3::new(-1, 1, 2)),
            BlockType::DIRT
        );
        assert_eq!(
            store.get_block_relative(&here.get(), Point3::new(0, 0, 4)),
            BlockType::NONE
        );
        assert_eq!(store.len(), 2);
    }
}
