use crate::Result;

pub trait Optimizer {
    /// Updates `params` in place using `grad`.
    ///
    /// # Errors
    /// Returns an error if `params` and `grad` have different lengths.
    fn update_params(&mut self, params: &mut [f32], grad: &[f32]) -> Result<()>;
}
