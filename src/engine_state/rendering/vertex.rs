//! Vertex data structures for voxel meshes.
//!
//! This module defines the vertex format produced by the mesh builder. The layout is
//! plain old data so a mesh side can be uploaded to a GPU buffer as-is.

use cgmath::Point3;

/// A vertex of a voxel mesh.
///
/// # Memory Layout
/// - Position: 3x i32 (12 bytes)
/// - Texture Index: u32 (4 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
///
/// Total size: 24 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// X coordinate in world space
    x: i32,
    /// Y coordinate in world space
    y: i32,
    /// Z coordinate in world space
    z: i32,
    /// Index of the texture in the texture array
    texture_index: u32,
    /// UV texture coordinates, in blocks
    tex_coords: [f32; 2],
}

impl Vertex {
    /// Creates a new vertex.
    ///
    /// # Arguments
    /// * `pos` - The 3D position of the vertex in world space
    /// * `texture_index` - Index of the texture in the texture array
    /// * `u` - U texture coordinate
    /// * `v` - V texture coordinate
    pub fn new(pos: Point3<i32>, texture_index: u32, u: u8, v: u8) -> Self {
        Vertex {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            texture_index,
            tex_coords: [u as f32, v as f32],
        }
    }

    /// World-space position of the vertex.
    pub fn position(&self) -> Point3<i32> {
        Point3::new(self.x, self.y, self.z)
    }
}
