use numeric::{ConvolutionConfig, Grid, convolve2d, pad};

use crate::{ChangeEffect, Dynamics, Reconfigure, Result, SimErr, snapshot::Values};

/// A kernel sliding over a padded image.
///
/// Advancing once applies the convolution and caches the feature map for the current
/// configuration; after that the machine is terminal until reset. Any configuration change
/// drops the cache, and a feature map that was already on display is recomputed right away.
#[derive(Debug, Clone)]
pub struct Convolution {
    config: ConvolutionConfig,
    feature_map: Option<Grid>,
    applied: bool,
}

impl Convolution {
    /// # Errors
    /// Returns the numeric error if the kernel can't be placed on the padded input.
    pub fn new(config: ConvolutionConfig) -> Result<Self> {
        config.output_dim()?;

        Ok(Self {
            config,
            feature_map: None,
            applied: false,
        })
    }

    pub fn config(&self) -> &ConvolutionConfig {
        &self.config
    }

    pub fn feature_map(&self) -> Option<&Grid> {
        self.feature_map.as_ref()
    }

    pub fn apply_convolution(&mut self) -> Result<&Grid> {
        let feature_map = convolve2d(&self.config)?;
        self.applied = true;
        Ok(&*self.feature_map.insert(feature_map))
    }

    fn swap_config(&mut self, config: ConvolutionConfig) -> Result<()> {
        config.output_dim()?;

        self.config = config;
        self.feature_map = None;
        if self.applied {
            self.apply_convolution()?;
        }

        Ok(())
    }
}

impl Dynamics for Convolution {
    fn name(&self) -> &'static str {
        "convolution"
    }

    fn horizon(&self) -> Option<usize> {
        Some(1)
    }

    fn advance(&mut self, _step: usize) -> Result<()> {
        self.apply_convolution().map(|_| ())
    }

    fn reset(&mut self) {
        self.feature_map = None;
        self.applied = false;
    }

    fn reconfigure(&mut self, change: Reconfigure) -> Result<ChangeEffect> {
        let mut config = self.config.clone();

        let effect = match change {
            Reconfigure::Padding(padding) => {
                config.padding = padding;
                ChangeEffect::Tuning
            }
            Reconfigure::Stride(stride) => {
                config.stride = stride;
                ChangeEffect::Tuning
            }
            Reconfigure::Input(input) => {
                config.input = input;
                ChangeEffect::Structural
            }
            Reconfigure::Kernel(kernel) => {
                config.kernel = kernel;
                ChangeEffect::Structural
            }
            other => {
                return Err(SimErr::Unsupported {
                    what: other.name(),
                    kind: self.name(),
                });
            }
        };

        self.swap_config(config)?;
        Ok(effect)
    }

    fn values(&self) -> Values {
        Values::Convolution {
            padded_input: pad(&self.config.input, self.config.padding),
            kernel: self.config.kernel.clone(),
            padding: self.config.padding,
            stride: self.config.stride,
            feature_map: self.feature_map.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use numeric::NumericErr;

    use super::*;

    fn convolution() -> Convolution {
        let input = Grid::from_rows(vec![
            vec![1., 0., 1., 0.],
            vec![0., 1., 0., 1.],
            vec![1., 0., 1., 0.],
            vec![0., 1., 0., 1.],
        ])
        .unwrap();
        let kernel = Grid::from_rows(vec![vec![1., -1.], vec![-1., 1.]]).unwrap();

        Convolution::new(ConvolutionConfig::new(input, kernel, 0, 1)).unwrap()
    }

    #[test]
    fn nothing_is_computed_until_applied() {
        let mut conv = convolution();
        assert!(conv.feature_map().is_none());

        conv.apply_convolution().unwrap();
        assert_eq!(conv.feature_map().unwrap().get(0, 0), Some(2.));
    }

    #[test]
    fn padding_change_recomputes_a_shown_feature_map() {
        let mut conv = convolution();
        conv.apply_convolution().unwrap();

        let effect = conv.reconfigure(Reconfigure::Padding(1)).unwrap();

        assert_eq!(effect, ChangeEffect::Tuning);
        assert_eq!(conv.feature_map().unwrap().rows(), 5);
    }

    #[test]
    fn stride_change_before_applying_computes_nothing() {
        let mut conv = convolution();
        conv.reconfigure(Reconfigure::Stride(2)).unwrap();

        assert!(conv.feature_map().is_none());
        assert_eq!(conv.config().stride, 2);
    }

    #[test]
    fn invalid_kernel_is_rejected_and_nothing_changes() {
        let mut conv = convolution();
        conv.apply_convolution().unwrap();

        let huge = Grid::zeros(5, 5);
        let err = conv.reconfigure(Reconfigure::Kernel(huge)).unwrap_err();

        assert!(matches!(
            err,
            SimErr::Numeric(NumericErr::DimensionMismatch { needed: 5, available: 4, .. })
        ));
        assert_eq!(conv.config().kernel.rows(), 2);
        assert!(conv.feature_map().is_some());
    }

    #[test]
    fn applying_once_is_the_whole_horizon() {
        assert_eq!(convolution().horizon(), Some(1));
    }

    #[test]
    fn reset_hides_the_feature_map() {
        let mut conv = convolution();
        conv.apply_convolution().unwrap();
        conv.reset();

        assert!(conv.feature_map().is_none());
        conv.reconfigure(Reconfigure::Padding(2)).unwrap();
        assert!(conv.feature_map().is_none());
    }
}
