use numeric::Grid;
use serde::Deserialize;

/// A parameter change requested by the page hosting a simulation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reconfigure {
    /// New input-layer values of a feed-forward network.
    Inputs(Vec<f32>),
    /// New starting weights for gradient descent.
    Weights(Vec<f32>),
    LearningRate(f32),
    /// New image for convolution or feature map for pooling.
    Input(Grid),
    Kernel(Grid),
    Padding(usize),
    Stride(usize),
    WindowSize(usize),
    /// New sequence text, made of `0` and `1` only.
    Sequence(String),
}

impl Reconfigure {
    pub fn name(&self) -> &'static str {
        match self {
            Reconfigure::Inputs(_) => "inputs",
            Reconfigure::Weights(_) => "weights",
            Reconfigure::LearningRate(_) => "learning rate",
            Reconfigure::Input(_) => "input grid",
            Reconfigure::Kernel(_) => "kernel",
            Reconfigure::Padding(_) => "padding",
            Reconfigure::Stride(_) => "stride",
            Reconfigure::WindowSize(_) => "window size",
            Reconfigure::Sequence(_) => "sequence",
        }
    }
}

/// What a successful reconfiguration means for the step counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEffect {
    /// The topology or data changed, the simulation starts over.
    Structural,
    /// Only a tuning knob changed, progress is kept.
    Tuning,
}
