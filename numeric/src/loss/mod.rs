mod loss_fn;
mod quadratic;

pub use loss_fn::LossFn;
pub use quadratic::Quadratic;
