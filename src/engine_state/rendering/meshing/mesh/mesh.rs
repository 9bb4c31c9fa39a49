//! Mesh data structures for voxel rendering.
//!
//! This module holds the output of the mesh builder: vertex and index buffers grouped
//! by block side, ready to be handed to a render handle.

use crate::engine_state::{
    rendering::Vertex,
    voxels::block::{self, block_side::BlockSide, block_type::BlockType},
};

use super::face::Face;

/// Represents a single side of a mesh with its associated vertices and indices.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshSide {
    /// The vertex data for this mesh side
    pub vertices: Vec<Vertex>,
    /// The index data for this mesh side
    pub indices: Vec<u32>,
    /// Which block side this mesh represents
    pub side: BlockSide,
}

impl MeshSide {
    /// Creates a new, empty `MeshSide` for the specified block side.
    pub fn new(side: BlockSide) -> Self {
        MeshSide {
            vertices: Vec::new(),
            indices: Vec::new(),
            side,
        }
    }

    /// Number of quads on this side.
    pub fn face_count(&self) -> usize {
        self.vertices.len() / 4
    }
}

/// Geometry of one chunk, with separate buffers for each of the six block sides.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    /// Mesh sides, indexed by `BlockSide` discriminant.
    pub mesh: [MeshSide; 6],
}

impl MeshData {
    /// Creates a new, empty mesh with all sides initialized.
    pub fn new() -> Self {
        MeshData {
            mesh: BlockSide::all().map(MeshSide::new),
        }
    }

    /// Appends one quad to the side it faces.
    pub fn add_face(&mut self, face: &Face) {
        let side = &mut self.mesh[face.block_side as usize];
        let faces_generated = side.face_count() as u32;
        side.vertices.extend(Self::generate_face_vertices(face));
        side.indices
            .extend(Self::generate_face_indices(faces_generated));
    }

    /// Generates vertex data for a single face of a block.
    ///
    /// The vertices are ordered lower-left, lower-right, upper-left, upper-right, which
    /// forms two triangles with the indices from [`generate_face_indices`](Self::generate_face_indices).
    pub fn generate_face_vertices(face: &Face) -> [Vertex; 4] {
        let texture_index =
            block::texture_index(BlockType::get_block_type_from_int(face.block_type_int));
        [
            Vertex::new(face.ll, texture_index, 0, 1),
            Vertex::new(face.lr, texture_index, 1, 1),
            Vertex::new(face.ul, texture_index, 0, 0),
            Vertex::new(face.ur, texture_index, 1, 0),
        ]
    }

    /// Generates index data for a face, adjusted by the number of previously generated faces.
    pub fn generate_face_indices(num_faces_generated: u32) -> [u32; 6] {
        [
            num_faces_generated * 4,
            1 + num_faces_generated * 4,
            3 + num_faces_generated * 4,
            num_faces_generated * 4,
            3 + num_faces_generated * 4,
            2 + num_faces_generated * 4,
        ]
    }

    /// Total number of quads across all sides.
    pub fn face_count(&self) -> usize {
        self.mesh.iter().map(MeshSide::face_count).sum()
    }

    /// Whether the mesh holds no geometry.
    pub fn is_empty(&self) -> bool {
        self.face_count() == 0
    }

    /// Gets the number of vertices for each side of the mesh, in `BlockSide` order.
    pub fn get_vertex_lens(&self) -> [u64; 6] {
        self.mesh.each_ref().map(|side| side.vertices.len() as u64)
    }
}

impl Default for MeshData {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Point3;

    use super::*;

    #[test]
    fn faces_land_on_their_side_with_offset_indices() {
        let mut mesh = MeshData::new();
        mesh.add_face(&Face::new(Point3::new(0, 0, 0), BlockType::DIRT as u8, BlockSide::TOP));
        mesh.add_face(&Face::new(Point3::new(1, 0, 0), BlockType::DIRT as u8, BlockSide::TOP));
        mesh.add_face(&Face::new(Point3::new(0, 0, 0), BlockType::DIRT as u8, BlockSide::LEFT));

        let top = &mesh.mesh[BlockSide::TOP as usize];
        assert_eq!(top.side, BlockSide::TOP);
        assert_eq!(top.vertices.len(), 8);
        assert_eq!(top.indices, vec![0, 1, 3, 0, 3, 2, 4, 5, 7, 4, 7, 6]);
        assert_eq!(mesh.face_count(), 3);
        assert_eq!(mesh.get_vertex_lens(), [0, 0, 0, 8, 4, 0]);
    }

    #[test]
    fn new_mesh_is_empty() {
        assert!(MeshData::new().is_empty());
    }
}
