//! # Chunk Coordinates
//!
//! Conversions between the three coordinate frames of the world:
//! - world block coordinates (`Point3<i32>`, one unit per block)
//! - chunk anchors (world block coordinates that are multiples of the chunk size)
//! - local block coordinates (`0..chunk_size` inside one chunk)
//!
//! Negative coordinates round towards negative infinity, so block `-1` belongs to the
//! chunk anchored at `-chunk_size`.

use cgmath::Point3;

/// Anchor of the chunk that owns the given world block coordinate.
pub fn chunk_anchor_from_block_coords(chunk_size: i32, world: Point3<i32>) -> Point3<i32> {
    Point3::new(
        world.x.div_euclid(chunk_size) * chunk_size,
        world.y.div_euclid(chunk_size) * chunk_size,
        world.z.div_euclid(chunk_size) * chunk_size,
    )
}

/// Position of a world block coordinate relative to a chunk anchor.
pub fn block_in_chunk_coordinate(anchor: Point3<i32>, world: Point3<i32>) -> Point3<i32> {
    Point3::new(world.x - anchor.x, world.y - anchor.y, world.z - anchor.z)
}
