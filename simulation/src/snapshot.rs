use numeric::Grid;
use serde::Serialize;

/// Plain-data picture of a simulation, handed to whatever draws it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub step: usize,
    /// The terminal step of sequence-driven simulations.
    pub terminal: Option<usize>,
    #[serde(flatten)]
    pub values: Values,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Values {
    FeedForward {
        /// Activations per layer, input layer first.
        layers: Vec<Vec<f32>>,
        weight: f32,
    },
    GradientDescent {
        weights: Vec<f32>,
        gradients: Vec<f32>,
        learning_rate: f32,
        error: f32,
    },
    Convolution {
        padded_input: Grid,
        kernel: Grid,
        padding: usize,
        stride: usize,
        feature_map: Option<Grid>,
    },
    Pooling {
        input: Grid,
        window_size: usize,
        stride: usize,
        output: Grid,
    },
    Recurrent {
        sequence: String,
        hidden: f32,
    },
    Gated {
        sequence: String,
        cell: f32,
        hidden: f32,
    },
}

/// Step counter and memory of a sequence-driven simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecurrentState {
    pub step: usize,
    pub hidden: f32,
    /// Only gated (LSTM) simulations carry a cell state.
    pub cell: Option<f32>,
}
