//! A render handle that keeps geometry in memory instead of uploading it.
//!
//! Used by the headless driver and by tests that need to observe what the streaming
//! pipeline asked the renderer to do.

use cgmath::Point3;
use log::debug;

use crate::engine_state::voxels::{BlockLookup, SharedChunk, WeakChunk};

use super::{ChunkRenderer, MeshBuilder, MeshData, RendererFactory};

/// In-memory render handle.
pub struct HeadlessRenderer {
    /// World position the handle was spawned at.
    anchor: Point3<i32>,
    /// Non-owning binding to the displayed chunk.
    chunk: Option<WeakChunk>,
    /// Geometry applied most recently.
    mesh: Option<MeshData>,
    /// Number of `update_chunk` calls, refreshes included.
    mesh_updates: usize,
    /// Number of neighbour-triggered refreshes.
    refreshes: usize,
}

impl HeadlessRenderer {
    /// Creates an unbound handle at `anchor`.
    pub fn new(anchor: Point3<i32>) -> Self {
        HeadlessRenderer {
            anchor,
            chunk: None,
            mesh: None,
            mesh_updates: 0,
            refreshes: 0,
        }
    }

    /// World position the handle was spawned at.
    pub fn anchor(&self) -> Point3<i32> {
        self.anchor
    }

    /// Geometry applied most recently.
    pub fn mesh(&self) -> Option<&MeshData> {
        self.mesh.as_ref()
    }

    /// Number of times geometry was applied.
    pub fn mesh_updates(&self) -> usize {
        self.mesh_updates
    }

    /// Number of refreshes triggered by neighbours.
    pub fn refreshes(&self) -> usize {
        self.refreshes
    }
}

impl ChunkRenderer for HeadlessRenderer {
    fn initialize_chunk(&mut self, chunk: WeakChunk) {
        self.chunk = Some(chunk);
    }

    fn bound_chunk(&self) -> Option<SharedChunk> {
        self.chunk.as_ref().and_then(WeakChunk::upgrade)
    }

    fn update_chunk(&mut self, mesh: MeshData) {
        debug!(
            "Chunk {:?} received mesh with {} faces",
            self.anchor,
            mesh.face_count()
        );
        self.mesh = Some(mesh);
        self.mesh_updates += 1;
    }

    fn refresh_chunk(&mut self, builder: &dyn MeshBuilder, world: &dyn BlockLookup) {
        self.refreshes += 1;
        self.remesh(builder, world);
    }
}

/// Spawns [`HeadlessRenderer`]s and counts them.
#[derive(Default)]
pub struct HeadlessRendererFactory {
    spawned: usize,
}

impl HeadlessRendererFactory {
    /// Creates a factory that has spawned nothing yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of handles created so far.
    pub fn spawned(&self) -> usize {
        self.spawned
    }
}

impl RendererFactory for HeadlessRendererFactory {
    type Renderer = HeadlessRenderer;

    fn spawn(&mut self, anchor: Point3<i32>) -> HeadlessRenderer {
        self.spawned += 1;
        HeadlessRenderer::new(anchor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::StResource,
        engine_state::{
            rendering::CulledMeshBuilder,
            voxels::{block::block_type::BlockType, chunk::ChunkData, world::ChunkStore},
        },
    };

    #[test]
    fn binding_does_not_keep_the_chunk_alive() {
        let chunk = StResource::new(ChunkData::new(4, Point3::new(0, 0, 0)));
        let mut renderer = HeadlessRenderer::new(Point3::new(0, 0, 0));
        assert!(renderer.bound_chunk().is_none());
        renderer.initialize_chunk(chunk.downgrade());
        assert!(renderer.bound_chunk().is_some());
        drop(chunk);
        assert!(renderer.bound_chunk().is_none());
    }

    #[test]
    fn refresh_rebuilds_from_bound_chunk() {
        let store: ChunkStore<HeadlessRenderer> = ChunkStore::new(4);
        let chunk = StResource::new(ChunkData::new(4, Point3::new(0, 0, 0)));
        chunk.get_mut().set_block(Point3::new(0, 0, 0), BlockType::DIRT);

        let mut renderer = HeadlessRenderer::new(Point3::new(0, 0, 0));
        renderer.initialize_chunk(chunk.downgrade());
        renderer.refresh_chunk(&CulledMeshBuilder, &store);

        assert_eq!(renderer.refreshes(), 1);
        assert_eq!(renderer.mesh_updates(), 1);
        assert_eq!(renderer.mesh().map(MeshData::face_count), Some(6));
    }

    #[test]
    fn refresh_without_binding_is_counted_but_applies_nothing() {
        let store: ChunkStore<HeadlessRenderer> = ChunkStore::new(4);
        let mut renderer = HeadlessRenderer::new(Point3::new(4, 0, 0));
        renderer.refresh_chunk(&CulledMeshBuilder, &store);
        assert_eq!(renderer.refreshes(), 1);
        assert_eq!(renderer.mesh_updates(), 0);
        assert!(renderer.mesh().is_none());
    }

    #[test]
    fn remesh_reports_whether_a_chunk_was_bound() {
        let store: ChunkStore<HeadlessRenderer> = ChunkStore::new(4);
        let chunk = StResource::new(ChunkData::new(4, Point3::new(0, 0, 0)));
        let mut renderer = HeadlessRenderer::new(Point3::new(0, 0, 0));
        assert!(!renderer.remesh(&CulledMeshBuilder, &store));
        assert_eq!(renderer.mesh_updates(), 0);

        renderer.initialize_chunk(chunk.downgrade());
        assert!(renderer.remesh(&CulledMeshBuilder, &store));
        assert_eq!(renderer.mesh_updates(), 1);
        assert_eq!(renderer.refreshes(), 0);
        assert_eq!(renderer.mesh().map(MeshData::face_count), Some(0));
    }

    #[test]
    fn factory_counts_spawns() {
        let mut factory = HeadlessRendererFactory::new();
        let renderer = factory.spawn(Point3::new(16, 0, -16));
        assert_eq!(renderer.anchor(), Point3::new(16, 0, -16));
        assert_eq!(factory.spawned(), 1);
    }
}
