mod act_fn;
mod relu;
mod sigmoid;
mod tanh;

pub use act_fn::{ActFn, relu, sigmoid, tanh};
pub use relu::Relu;
pub use sigmoid::Sigmoid;
pub use tanh::Tanh;
