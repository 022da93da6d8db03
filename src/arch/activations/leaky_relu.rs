/// Rectified linear unit that lets a small slope through for negative inputs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LeakyRelu;

impl LeakyRelu {
    /// Slope applied to non positive inputs.
    pub const SLOPE: f64 = 0.01;

    pub fn f(&self, z: f64) -> f64 {
        if z > 0. { z } else { Self::SLOPE * z }
    }

    pub fn df(&self, z: f64) -> f64 {
        if z > 0. { 1. } else { Self::SLOPE }
    }
}
