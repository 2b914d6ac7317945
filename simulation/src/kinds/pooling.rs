use numeric::{Grid, PoolingConfig, max_pool2d};

use crate::{ChangeEffect, Dynamics, Reconfigure, Result, SimErr, snapshot::Values};

/// Max pooling over a feature map. The output is always on display, so it is computed as
/// soon as the configuration is known and recomputed on every change.
#[derive(Debug, Clone)]
pub struct Pooling {
    config: PoolingConfig,
    output: Grid,
}

impl Pooling {
    /// # Errors
    /// Returns the numeric error if the window doesn't fit inside the input.
    pub fn new(config: PoolingConfig) -> Result<Self> {
        let output = max_pool2d(&config)?;
        Ok(Self { config, output })
    }

    pub fn config(&self) -> &PoolingConfig {
        &self.config
    }

    pub fn output(&self) -> &Grid {
        &self.output
    }
}

impl Dynamics for Pooling {
    fn name(&self) -> &'static str {
        "pooling"
    }

    fn horizon(&self) -> Option<usize> {
        None
    }

    fn advance(&mut self, _step: usize) -> Result<()> {
        self.output = max_pool2d(&self.config)?;
        Ok(())
    }

    fn reset(&mut self) {}

    fn reconfigure(&mut self, change: Reconfigure) -> Result<ChangeEffect> {
        let mut config = self.config.clone();

        let effect = match change {
            Reconfigure::WindowSize(size) => {
                config.window_size = size;
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
            other => {
                return Err(SimErr::Unsupported {
                    what: other.name(),
                    kind: self.name(),
                });
            }
        };

        self.output = max_pool2d(&config)?;
        self.config = config;
        Ok(effect)
    }

    fn values(&self) -> Values {
        Values::Pooling {
            input: self.config.input.clone(),
            window_size: self.config.window_size,
            stride: self.config.stride,
            output: self.output.clone(),
        }
    }
}
