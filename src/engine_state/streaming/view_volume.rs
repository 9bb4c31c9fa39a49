//! The cube of chunks kept around the observer.

use cgmath::Point3;

/// Chunk coordinate of an observer: each position axis divided by the chunk size and
/// rounded to the nearest integer, halves going to the even neighbour.
///
/// Positions beyond the `i32` range saturate; `NaN` maps to `0`.
pub fn observer_chunk_coordinate(position: Point3<f32>, chunk_size: i32) -> Point3<i32> {
    let size = chunk_size as f32;
    Point3::new(
        (position.x / size).round_ties_even() as i32,
        (position.y / size).round_ties_even() as i32,
        (position.z / size).round_ties_even() as i32,
    )
}

/// The cube of chunk coordinates considered in range of the observer this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewVolume {
    /// Minimum chunk coordinate of the cube.
    corner: Point3<i32>,
    /// Edge length of the cube in chunks.
    view_distance: i32,
}

impl ViewVolume {
    /// The volume of `view_distance³` chunks centred on the observer's chunk.
    ///
    /// The centre is clamped to [`max_center`](Self::max_center) so that every anchor of
    /// the volume, and every face neighbour of those anchors, fits in `i32`.
    pub fn around(position: Point3<f32>, chunk_size: i32, view_distance: i32) -> Self {
        let limit = Self::max_center(chunk_size, view_distance);
        let center = observer_chunk_coordinate(position, chunk_size)
            .map(|coordinate| coordinate.clamp(-limit, limit));
        let half = view_distance / 2;
        ViewVolume {
            corner: Point3::new(center.x - half, center.y - half, center.z - half),
            view_distance,
        }
    }

    /// Largest chunk coordinate a volume can be centred on along any axis.
    pub fn max_center(chunk_size: i32, view_distance: i32) -> i32 {
        (i32::MAX / chunk_size.max(1))
            .saturating_sub(view_distance.max(0))
            .saturating_sub(1)
            .max(0)
    }

    /// Minimum chunk coordinate of the volume.
    pub fn corner(&self) -> Point3<i32> {
        self.corner
    }

    /// Number of chunks in the volume.
    pub fn len(&self) -> usize {
        let edge = self.view_distance.max(0) as usize;
        edge * edge * edge
    }

    /// Whether the volume is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a chunk coordinate (not an anchor) lies inside the volume.
    pub fn contains_chunk(&self, chunk: Point3<i32>) -> bool {
        let inside = |value: i32, low: i32| {
            (low..low.saturating_add(self.view_distance)).contains(&value)
        };
        inside(chunk.x, self.corner.x)
            && inside(chunk.y, self.corner.y)
            && inside(chunk.z, self.corner.z)
    }

    /// Anchors of every chunk in the volume, x outermost and z innermost.
    ///
    /// Chunks whose anchor does not fit in `i32` are skipped.
    pub fn anchors(&self, chunk_size: i32) -> impl Iterator<Item = Point3<i32>> {
        let corner = self.corner;
        let edge = self.view_distance.max(0);
        let anchor =
            move |low: i32, offset: i32| low.checked_add(offset)?.checked_mul(chunk_size);
        (0..edge).flat_map(move |x| {
            (0..edge).flat_map(move |y| {
                (0..edge).filter_map(move |z| {
                    Some(Point3::new(
                        anchor(corner.x, x)?,
                        anchor(corner.y, y)?,
                        anchor(corner.z, z)?,
                    ))
                })
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observer_coordinate_rounds_to_nearest() {
        assert_eq!(
            observer_chunk_coordinate(Point3::new(7.9, -8.1, 24.0), 16),
            Point3::new(0, -1, 2)
        );
        assert_eq!(
            observer_chunk_coordinate(Point3::new(8.0, 40.0, -8.0), 16),
            Point3::new(0, 2, 0)
        );
    }

    #[test]
    fn volume_is_offset_by_half_the_view_distance() {
        let volume = ViewVolume::around(Point3::new(32.0, 0.0, -16.0), 16, 6);
        assert_eq!(volume.corner(), Point3::new(-1, -3, -4));
        assert_eq!(volume.len(), 216);
        assert!(volume.contains_chunk(Point3::new(2, 0, -1)));
        assert!(volume.contains_chunk(Point3::new(4, 2, 1)));
        assert!(!volume.contains_chunk(Point3::new(5, 0, 0)));
    }

    #[test]
    fn anchors_cover_the_cube_once() {
        let volume = ViewVolume::around(Point3::new(0.0, 0.0, 0.0), 4, 3);
        let anchors: Vec<_> = volume.anchors(4).collect();
        assert_eq!(anchors.len(), 27);
        assert_eq!(anchors[0], Point3::new(-4, -4, -4));
        assert_eq!(anchors[1], Point3::new(-4, -4, 0));
        assert_eq!(anchors[26], Point3::new(4, 4, 4));
        let unique: std::collections::HashSet<_> =
            anchors.iter().map(|a| (a.x, a.y, a.z)).collect();
        assert_eq!(unique.len(), 27);
    }

    #[test]
    fn far_positions_are_clamped_to_representable_anchors() {
        let limit = ViewVolume::max_center(16, 2);
        let volume = ViewVolume::around(Point3::new(3.0e10, -3.0e10, f32::NAN), 16, 2);
        assert_eq!(volume.corner(), Point3::new(limit - 1, -limit - 1, -1));

        let anchors: Vec<_> = volume.anchors(16).collect();
        assert_eq!(anchors.len(), 8);
        assert!(anchors.iter().all(|a| a.x.checked_add(16).is_some()));
        assert!(anchors.iter().all(|a| a.y.checked_sub(16).is_some()));
    }

    #[test]
    fn unrepresentable_anchors_are_skipped() {
        let volume = ViewVolume {
            corner: Point3::new(i32::MAX - 1, 0, 0),
            view_distance: 2,
        };
        assert_eq!(volume.anchors(1).count(), 8);
        assert_eq!(volume.anchors(2).count(), 0);
    }
}
