pub mod activations;
pub mod convolution;
pub mod error;
pub mod feedforward;
pub mod grid;
pub mod loss;
pub mod optimization;
pub mod pooling;
pub mod recurrent;
mod testing;

pub use convolution::{ConvolutionConfig, convolve2d};
pub use error::{NumericErr, Result};
pub use feedforward::{LayerSpec, forward_layer, neuron_output};
pub use grid::{Grid, pad};
pub use pooling::{PoolingConfig, max_pool2d};
pub use recurrent::{Bit, LstmGates, LstmState, RnnWeights, Sequence, lstm_step, rnn_step};
