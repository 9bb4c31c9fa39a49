//! Height layer parameters.

use serde::{Deserialize, Serialize};

/// One additive contribution to the 2D terrain height signal.
///
/// Layers are summed in list order; each one samples the 2D noise at its own `scale`,
/// shifts the sample down by `height_offset`, clamps it to `[0, 1]` and weights it
/// by `intensity`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseLayer {
    /// Frequency multiplier applied to world coordinates; must be positive.
    pub scale: f32,
    /// Weight of the clamped sample in blocks.
    pub intensity: f32,
    /// Amount subtracted from the raw sample before clamping.
    pub height_offset: f32,
}

impl NoiseLayer {
    /// Creates a layer from its three parameters.
    pub const fn new(scale: f32, intensity: f32, height_offset: f32) -> Self {
        NoiseLayer {
            scale,
            intensity,
            height_offset,
        }
    }

    /// Contribution of this layer for a raw noise sample in `[0, 1]`.
    pub fn contribution(&self, sample: f32) -> f32 {
        (sample - self.height_offset).clamp(0.0, 1.0) * self.intensity
    }
}
