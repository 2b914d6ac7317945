use ndarray::{Array2, s};
use serde::{Deserialize, Serialize};

use crate::{Grid, NumericErr, Result, grid::pad};

/// A 2-D convolution: `kernel` slides over `input` after zero-padding it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvolutionConfig {
    pub input: Grid,
    pub kernel: Grid,
    #[serde(default)]
    pub padding: usize,
    #[serde(default = "default_stride")]
    pub stride: usize,
}

fn default_stride() -> usize {
    1
}

impl ConvolutionConfig {
    pub fn new(input: Grid, kernel: Grid, padding: usize, stride: usize) -> Self {
        Self {
            input,
            kernel,
            padding,
            stride,
        }
    }

    pub fn padded_dim(&self) -> (usize, usize) {
        (
            self.input.rows() + 2 * self.padding,
            self.input.cols() + 2 * self.padding,
        )
    }

    /// The `(rows, cols)` of the feature map this configuration produces.
    ///
    /// # Errors
    /// Returns `NumericErr::DimensionMismatch` if the kernel doesn't fit inside the padded input.
    pub fn output_dim(&self) -> Result<(usize, usize)> {
        if self.kernel.is_empty() {
            return Err(NumericErr::InvalidParameter {
                name: "kernel size",
                value: 0.,
            });
        }

        let (rows, cols) = self.padded_dim();
        output_dim(
            "kernel",
            (rows, cols),
            (self.kernel.rows(), self.kernel.cols()),
            self.stride,
        )
    }
}

/// Output size of a sliding window over an input, `floor((n - k) / stride) + 1` per axis.
pub(crate) fn output_dim(
    what: &'static str,
    input: (usize, usize),
    window: (usize, usize),
    stride: usize,
) -> Result<(usize, usize)> {
    if stride == 0 {
        return Err(NumericErr::InvalidParameter {
            name: "stride",
            value: 0.,
        });
    }

    if input.0 < window.0 {
        return Err(NumericErr::DimensionMismatch {
            what,
            needed: window.0,
            available: input.0,
        });
    }

    if input.1 < window.1 {
        return Err(NumericErr::DimensionMismatch {
            what,
            needed: window.1,
            available: input.1,
        });
    }

    Ok((
        (input.0 - window.0) / stride + 1,
        (input.1 - window.1) / stride + 1,
    ))
}

/// Convolves `cfg.kernel` over the zero-padded `cfg.input`.
///
/// Each output cell is the sum of the element-wise product between the kernel and the
/// input window whose top-left corner is at `(i · stride, j · stride)`. The kernel is not
/// flipped.
///
/// # Errors
/// Returns `NumericErr::DimensionMismatch` if the kernel is larger than the padded input and
/// `NumericErr::InvalidParameter` for a zero stride or an empty kernel.
pub fn convolve2d(cfg: &ConvolutionConfig) -> Result<Grid> {
    let (out_rows, out_cols) = cfg.output_dim()?;
    let padded = pad(&cfg.input, cfg.padding);
    let padded = padded.view();
    let kernel = cfg.kernel.view();
    let (k_rows, k_cols) = kernel.dim();
    let stride = cfg.stride;

    let feature_map = Array2::from_shape_fn((out_rows, out_cols), |(i, j)| {
        let (r, c) = (i * stride, j * stride);
        let window = padded.slice(s![r..r + k_rows, c..c + k_cols]);

        window
            .iter()
            .zip(kernel.iter())
            .fold(0., |acc, (x, k)| acc + x * k)
    });

    Ok(Grid::from_array(feature_map))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkerboard() -> Grid {
        Grid::from_rows(vec![
            vec![1., 0., 1., 0.],
            vec![0., 1., 0., 1.],
            vec![1., 0., 1., 0.],
            vec![0., 1., 0., 1.],
        ])
        .unwrap()
    }

    fn diagonal_kernel() -> Grid {
        Grid::from_rows(vec![vec![1., -1.], vec![-1., 1.]]).unwrap()
    }

    #[test]
    fn checkerboard_without_padding() {
        let cfg = ConvolutionConfig::new(checkerboard(), diagonal_kernel(), 0, 1);
        let out = convolve2d(&cfg).unwrap();

        assert_eq!((out.rows(), out.cols()), (3, 3));
        assert_eq!(
            out.to_rows(),
            vec![
                vec![2., -2., 2.],
                vec![-2., 2., -2.],
                vec![2., -2., 2.],
            ]
        );
    }

    #[test]
    fn padding_grows_the_feature_map() {
        let cfg = ConvolutionConfig::new(checkerboard(), diagonal_kernel(), 1, 1);
        let out = convolve2d(&cfg).unwrap();

        assert_eq!((out.rows(), out.cols()), (5, 5));
        // Only the input's top-left cell falls under the kernel, on its bottom-right weight.
        assert_eq!(out.get(0, 0), Some(1.));
    }

    #[test]
    fn stride_skips_positions() {
        let cfg = ConvolutionConfig::new(checkerboard(), diagonal_kernel(), 0, 2);
        let out = convolve2d(&cfg).unwrap();

        assert_eq!(out.to_rows(), vec![vec![2., 2.], vec![2., 2.]]);
    }

    #[test]
    fn padding_and_stride_combined() {
        let cfg = ConvolutionConfig::new(checkerboard(), diagonal_kernel(), 2, 2);
        assert_eq!(cfg.output_dim().unwrap(), (4, 4));
        assert_eq!(convolve2d(&cfg).unwrap().rows(), 4);
    }

    #[test]
    fn kernel_larger_than_input_is_rejected() {
        let input = Grid::from_rows(vec![vec![1.]]).unwrap();
        let cfg = ConvolutionConfig::new(input, diagonal_kernel(), 0, 1);

        assert_eq!(
            convolve2d(&cfg),
            Err(NumericErr::DimensionMismatch {
                what: "kernel",
                needed: 2,
                available: 1
            })
        );
    }

    #[test]
    fn padding_can_make_a_large_kernel_fit() {
        let input = Grid::from_rows(vec![vec![3.]]).unwrap();
        let cfg = ConvolutionConfig::new(input, diagonal_kernel(), 1, 1);
        let out = convolve2d(&cfg).unwrap();

        assert_eq!(out.to_rows(), vec![vec![3., -3.], vec![-3., 3.]]);
    }

    #[test]
    fn zero_stride_is_rejected() {
        let cfg = ConvolutionConfig::new(checkerboard(), diagonal_kernel(), 0, 0);
        assert!(matches!(
            convolve2d(&cfg),
            Err(NumericErr::InvalidParameter { name: "stride", .. })
        ));
    }

    #[test]
    fn empty_kernel_is_rejected() {
        let cfg = ConvolutionConfig::new(checkerboard(), Grid::zeros(0, 0), 0, 1);
        assert!(convolve2d(&cfg).is_err());
    }
}
