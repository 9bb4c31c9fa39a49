//! Mesh data for voxel rendering.
//!
//! # Architecture
//! - [`MeshData`]: Per-side vertex and index buffers of one chunk
//! - [`Face`]: A single quad covering one side of one block

mod face;
mod mesh;

pub use face::Face;
pub use mesh::*;
