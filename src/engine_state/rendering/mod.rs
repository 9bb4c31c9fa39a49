//! Render-side collaborators of the streaming pipeline.
//!
//! The pipeline never draws anything itself. It hands every built chunk to a render
//! handle implementing [`ChunkRenderer`], created by a [`RendererFactory`]. A handle
//! supports three operations:
//!
//! - `initialize_chunk`: one-time binding to the chunk it displays
//! - `update_chunk`: apply freshly computed geometry
//! - `refresh_chunk`: recompute geometry from the bound chunk and apply it, through the
//!   shared `remesh`
//!
//! [`headless::HeadlessRenderer`] implements these without a GPU.

use cgmath::Point3;

use super::voxels::{BlockLookup, SharedChunk, WeakChunk};

pub mod headless;
pub mod meshing;
mod vertex;

pub use meshing::{CulledMeshBuilder, MeshBuilder, MeshData};
pub use vertex::Vertex;

/// Display object for one built chunk.
pub trait ChunkRenderer {
    /// Binds the handle to the chunk it displays. The handle does not own the chunk.
    fn initialize_chunk(&mut self, chunk: WeakChunk);

    /// The chunk this handle was bound to, if it still exists.
    fn bound_chunk(&self) -> Option<SharedChunk>;

    /// Applies newly computed geometry.
    fn update_chunk(&mut self, mesh: MeshData);

    /// Recomputes geometry from the bound chunk and applies it.
    ///
    /// Called when a neighbouring chunk was built, since border faces may have changed.
    /// Does nothing if the handle was never bound or its chunk is gone.
    fn refresh_chunk(&mut self, builder: &dyn MeshBuilder, world: &dyn BlockLookup) {
        self.remesh(builder, world);
    }

    /// Meshes the bound chunk and applies the result through `update_chunk`.
    ///
    /// # Returns
    /// `false` if the handle has no live chunk, in which case nothing is applied.
    fn remesh(&mut self, builder: &dyn MeshBuilder, world: &dyn BlockLookup) -> bool {
        let Some(chunk) = self.bound_chunk() else {
            log::warn!("Refresh requested for a render handle without chunk data");
            return false;
        };
        let mesh = builder.build_mesh(&chunk.get(), world);
        self.update_chunk(mesh);
        true
    }
}

/// Creates render handles, one per built chunk.
pub trait RendererFactory {
    /// The handle type this factory produces.
    type Renderer: ChunkRenderer;

    /// Instantiates a handle positioned at `anchor`.
    fn spawn(&mut self, anchor: Point3<i32>) -> Self::Renderer;
}
