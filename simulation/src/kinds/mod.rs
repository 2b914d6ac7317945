mod convolution;
mod descent;
mod feedforward;
mod pooling;
mod recurrent;

pub use convolution::Convolution;
pub use descent::{DEFAULT_LEARNING_RATE, Descent};
pub use feedforward::FeedForward;
pub use pooling::Pooling;
pub use recurrent::{Gated, Recurrent};

use numeric::{ConvolutionConfig, LayerSpec, PoolingConfig, Sequence};

use crate::{ChangeEffect, Dynamics, Reconfigure, Result, snapshot::Values};

/// The visualization a [`crate::SimulationState`] drives.
#[derive(Debug, Clone)]
pub enum SimulationKind {
    FeedForward(FeedForward),
    GradientDescent(Descent),
    Convolution(Convolution),
    Pooling(Pooling),
    Recurrent(Recurrent),
    Gated(Gated),
}

impl SimulationKind {
    pub fn feed_forward(spec: LayerSpec, inputs: Vec<f32>) -> Result<Self> {
        Ok(Self::FeedForward(FeedForward::new(spec, inputs)?))
    }

    pub fn gradient_descent(weights: Vec<f32>, learning_rate: f32) -> Self {
        Self::GradientDescent(Descent::new(weights, learning_rate))
    }

    pub fn convolution(config: ConvolutionConfig) -> Result<Self> {
        Ok(Self::Convolution(Convolution::new(config)?))
    }

    pub fn pooling(config: PoolingConfig) -> Result<Self> {
        Ok(Self::Pooling(Pooling::new(config)?))
    }

    pub fn recurrent(sequence: Sequence) -> Self {
        Self::Recurrent(Recurrent::new(sequence))
    }

    pub fn gated(sequence: Sequence) -> Self {
        Self::Gated(Gated::new(sequence))
    }

    fn dynamics(&self) -> &dyn Dynamics {
        match self {
            Self::FeedForward(d) => d,
            Self::GradientDescent(d) => d,
            Self::Convolution(d) => d,
            Self::Pooling(d) => d,
            Self::Recurrent(d) => d,
            Self::Gated(d) => d,
        }
    }

    fn dynamics_mut(&mut self) -> &mut dyn Dynamics {
        match self {
            Self::FeedForward(d) => d,
            Self::GradientDescent(d) => d,
            Self::Convolution(d) => d,
            Self::Pooling(d) => d,
            Self::Recurrent(d) => d,
            Self::Gated(d) => d,
        }
    }
}

impl Dynamics for SimulationKind {
    fn name(&self) -> &'static str {
        self.dynamics().name()
    }

    fn horizon(&self) -> Option<usize> {
        self.dynamics().horizon()
    }

    fn advance(&mut self, step: usize) -> Result<()> {
        self.dynamics_mut().advance(step)
    }

    fn reset(&mut self) {
        self.dynamics_mut().reset()
    }

    fn reconfigure(&mut self, change: Reconfigure) -> Result<ChangeEffect> {
        self.dynamics_mut().reconfigure(change)
    }

    fn values(&self) -> Values {
        self.dynamics().values()
    }
}
