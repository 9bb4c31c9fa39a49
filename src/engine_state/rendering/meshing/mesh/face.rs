use cgmath::Point3;

use crate::engine_state::voxels::block::block_side::BlockSide;

/// Corner offsets from a block's minimum corner, as `[ll, lr, ul, ur]`, per `BlockSide`.
///
/// Each quad is wound so that it faces away from the block.
const CORNER_OFFSETS: [[[i32; 3]; 4]; 6] = [
    // FRONT (-X)
    [[0, 0, 0], [0, 0, 1], [0, 1, 0], [0, 1, 1]],
    // BACK (+X)
    [[1, 0, 1], [1, 0, 0], [1, 1, 1], [1, 1, 0]],
    // BOTTOM (-Y)
    [[0, 0, 1], [0, 0, 0], [1, 0, 1], [1, 0, 0]],
    // TOP (+Y)
    [[0, 1, 0], [0, 1, 1], [1, 1, 0], [1, 1, 1]],
    // LEFT (-Z)
    [[1, 0, 0], [0, 0, 0], [1, 1, 0], [0, 1, 0]],
    // RIGHT (+Z)
    [[0, 0, 1], [1, 0, 1], [0, 1, 1], [1, 1, 1]],
];

/// One quad of a block's surface.
///
/// Corners are in world block coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Lower-left corner
    pub ll: Point3<i32>,
    /// Lower-right corner
    pub lr: Point3<i32>,
    /// Upper-left corner
    pub ul: Point3<i32>,
    /// Upper-right corner
    pub ur: Point3<i32>,
    /// The block type as an integer, used for texture mapping
    pub block_type_int: u8,
    /// Which side of the block this face covers
    pub block_side: BlockSide,
}

impl Face {
    /// Creates the `block_side` face of the unit block whose minimum corner is `block`.
    pub fn new(block: Point3<i32>, block_type_int: u8, block_side: BlockSide) -> Self {
        let [ll, lr, ul, ur] = CORNER_OFFSETS[block_side as usize]
            .map(|[dx, dy, dz]| Point3::new(block.x + dx, block.y + dy, block.z + dz));
        Face {
            ll,
            lr,
            ul,
            ur,
            block_type_int,
            block_side,
        }
    }
}
