use numeric::{
    loss::{LossFn, Quadratic},
    optimization::{GradientDescent, Optimizer},
};

use crate::{ChangeEffect, Dynamics, Reconfigure, Result, SimErr, snapshot::Values};

pub const DEFAULT_LEARNING_RATE: f32 = 0.1;

/// Gradient descent on the bowl `L(w) = Σ wᵢ²`.
#[derive(Debug, Clone)]
pub struct Descent {
    initial: Vec<f32>,
    weights: Vec<f32>,
    optimizer: GradientDescent,
    loss: Quadratic,
}

impl Descent {
    pub fn new(weights: Vec<f32>, learning_rate: f32) -> Self {
        Self {
            initial: weights.clone(),
            weights,
            optimizer: GradientDescent::new(learning_rate),
            loss: Quadratic::new(),
        }
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    pub fn learning_rate(&self) -> f32 {
        self.optimizer.learning_rate()
    }

    /// Sum of the squares of the current weights.
    pub fn error(&self) -> f32 {
        self.loss.loss(&self.weights)
    }

    /// One descent step applied to every weight independently.
    pub fn perform_backpropagation(&mut self) -> Result<()> {
        let grad = self.loss.gradient(&self.weights);
        self.optimizer.update_params(&mut self.weights, &grad)?;
        Ok(())
    }
}

impl Dynamics for Descent {
    fn name(&self) -> &'static str {
        "gradient descent"
    }

    fn horizon(&self) -> Option<usize> {
        None
    }

    fn advance(&mut self, _step: usize) -> Result<()> {
        self.perform_backpropagation()
    }

    fn reset(&mut self) {
        self.weights.clone_from(&self.initial);
    }

    fn reconfigure(&mut self, change: Reconfigure) -> Result<ChangeEffect> {
        match change {
            Reconfigure::LearningRate(lr) => {
                self.optimizer = GradientDescent::new(lr);
                Ok(ChangeEffect::Tuning)
            }
            Reconfigure::Weights(weights) => {
                self.weights.clone_from(&weights);
                self.initial = weights;
                Ok(ChangeEffect::Structural)
            }
            other => Err(SimErr::Unsupported {
                what: other.name(),
                kind: self.name(),
            }),
        }
    }

    fn values(&self) -> Values {
        Values::GradientDescent {
            weights: self.weights.clone(),
            gradients: self.loss.gradient(&self.weights),
            learning_rate: self.learning_rate(),
            error: self.error(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_is_reported_before_any_step() {
        let descent = Descent::new(vec![0.5, 0.3], DEFAULT_LEARNING_RATE);
        assert!((descent.error() - 0.34).abs() < 1e-6);
    }

    #[test]
    fn step_shrinks_every_weight() {
        let mut descent = Descent::new(vec![0.5, 0.3], DEFAULT_LEARNING_RATE);
        descent.perform_backpropagation().unwrap();

        assert!((descent.weights()[0] - 0.4).abs() < 1e-6);
        assert!((descent.weights()[1] - 0.24).abs() < 1e-6);
        assert!((descent.error() - (0.16 + 0.0576)).abs() < 1e-6);
    }

    #[test]
    fn learning_rate_change_keeps_the_weights() {
        let mut descent = Descent::new(vec![0.5, 0.3], DEFAULT_LEARNING_RATE);
        descent.perform_backpropagation().unwrap();

        let effect = descent.reconfigure(Reconfigure::LearningRate(0.5)).unwrap();
        assert_eq!(effect, ChangeEffect::Tuning);
        assert!((descent.weights()[0] - 0.4).abs() < 1e-6);

        // With η = 0.5 one step lands on the minimum.
        descent.perform_backpropagation().unwrap();
        assert_eq!(descent.weights(), &[0., 0.]);
    }

    #[test]
    fn reset_restores_the_starting_weights() {
        let mut descent = Descent::new(vec![0.5, 0.3], DEFAULT_LEARNING_RATE);
        descent.perform_backpropagation().unwrap();
        descent.perform_backpropagation().unwrap();
        descent.reset();

        assert_eq!(descent.weights(), &[0.5, 0.3]);
    }
}
