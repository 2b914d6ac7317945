use ndarray::{Array2, s};
use serde::{Deserialize, Serialize};

use crate::{Grid, NumericErr, Result, convolution::output_dim};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolingConfig {
    pub input: Grid,
    pub window_size: usize,
    pub stride: usize,
}

impl PoolingConfig {
    pub fn new(input: Grid, window_size: usize, stride: usize) -> Self {
        Self {
            input,
            window_size,
            stride,
        }
    }

    /// The `(rows, cols)` of the pooled output.
    ///
    /// # Errors
    /// Returns `NumericErr::DimensionMismatch` if the window doesn't fit inside the input.
    pub fn output_dim(&self) -> Result<(usize, usize)> {
        if self.window_size == 0 {
            return Err(NumericErr::InvalidParameter {
                name: "window size",
                value: 0.,
            });
        }

        output_dim(
            "pooling window",
            (self.input.rows(), self.input.cols()),
            (self.window_size, self.window_size),
            self.stride,
        )
    }
}

/// Max pooling: every output cell is the largest value inside its `window_size × window_size`
/// window, windows starting every `stride` cells. No padding is applied.
///
/// # Errors
/// Returns `NumericErr::DimensionMismatch` if the window is larger than the input and
/// `NumericErr::InvalidParameter` for a zero window size or stride.
pub fn max_pool2d(cfg: &PoolingConfig) -> Result<Grid> {
    let (out_rows, out_cols) = cfg.output_dim()?;
    let input = cfg.input.view();
    let (size, stride) = (cfg.window_size, cfg.stride);

    let pooled = Array2::from_shape_fn((out_rows, out_cols), |(i, j)| {
        let (r, c) = (i * stride, j * stride);

        input
            .slice(s![r..r + size, c..c + size])
            .fold(f32::NEG_INFINITY, |max, &x| max.max(x))
    });

    Ok(Grid::from_array(pooled))
}
