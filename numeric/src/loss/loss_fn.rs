pub trait LossFn {
    fn loss(&self, params: &[f32]) -> f32;
    fn gradient(&self, params: &[f32]) -> Vec<f32>;
}
