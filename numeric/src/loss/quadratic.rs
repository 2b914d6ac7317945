use super::LossFn;

/// The bowl `L(w) = Σ wᵢ²`, minimised at the origin.
#[derive(Default, Clone, Copy, Debug)]
pub struct Quadratic;

impl Quadratic {
    /// Returns a new `Quadratic`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for Quadratic {
    fn loss(&self, params: &[f32]) -> f32 {
        params.iter().map(|w| w * w).sum()
    }

    fn gradient(&self, params: &[f32]) -> Vec<f32> {
        params.iter().map(|w| 2. * w).collect()
    }
}
