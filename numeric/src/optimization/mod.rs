mod gradient_descent;
mod optimizer;

pub use gradient_descent::{GradientDescent, gradient_descent_step};
pub use optimizer::Optimizer;
