use std::{fmt::Display, fs, path::Path};

use anyhow::{Context, Result};
use layout::{Canvas, plot::Fundamentals};
use log::warn;
use numeric::{
    ConvolutionConfig, Grid, LayerSpec, PoolingConfig, Sequence, feedforward::SHARED_WEIGHT,
    neuron_output,
};
use serde::Deserialize;
use simulation::{
    Reconfigure, SimulationKind, SimulationState,
    kinds::{DEFAULT_LEARNING_RATE, FeedForward},
};

pub const LEARNING_RATE_RANGE: (f32, f32) = (0.01, 0.5);
pub const PADDING_RANGE: (usize, usize) = (0, 2);
pub const STRIDE_RANGE: (usize, usize) = (1, 2);
pub const NEURON_RANGE: (f32, f32) = (-2., 2.);

const DEFAULT_PRECISION: usize = 2;
const DEFAULT_SEQUENCE: &str = "1010";

/// Pulls a slider value back into its range, warning when it had to.
fn clamp_slider<T: PartialOrd + Copy + Display>(name: &str, value: T, (low, high): (T, T)) -> T {
    let clamped = if value < low {
        low
    } else if value > high {
        high
    } else {
        value
    };

    if clamped != value {
        warn!("{name} {value} is outside [{low}, {high}], using {clamped}");
    }

    clamped
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct NeuronConfig {
    pub input: f32,
    pub weight: f32,
    pub bias: f32,
}

impl Default for NeuronConfig {
    fn default() -> Self {
        Self {
            input: 0.5,
            weight: 1.,
            bias: 0.,
        }
    }
}

impl NeuronConfig {
    pub fn output(&self) -> f32 {
        neuron_output(self.input, self.weight, self.bias)
    }

    pub fn clamped(self) -> Self {
        Self {
            input: clamp_slider("input", self.input, NEURON_RANGE),
            weight: clamp_slider("weight", self.weight, NEURON_RANGE),
            bias: clamp_slider("bias", self.bias, NEURON_RANGE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FeedForwardConfig {
    pub layers: Vec<usize>,
    pub inputs: Vec<f32>,
    pub weight: f32,
}

impl Default for FeedForwardConfig {
    fn default() -> Self {
        Self {
            layers: vec![2, 3, 1],
            inputs: vec![0.5, 0.3],
            weight: SHARED_WEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DescentConfig {
    pub weights: Vec<f32>,
    pub learning_rate: f32,
}

impl Default for DescentConfig {
    fn default() -> Self {
        Self {
            weights: vec![0.5, 0.3],
            learning_rate: DEFAULT_LEARNING_RATE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConvolutionSettings {
    pub input: Grid,
    pub kernel: Grid,
    pub padding: usize,
    pub stride: usize,
}

impl Default for ConvolutionSettings {
    fn default() -> Self {
        Self {
            input: Grid::from([
                [1., 0., 1., 0.],
                [0., 1., 0., 1.],
                [1., 0., 1., 0.],
                [0., 1., 0., 1.],
            ]),
            kernel: Grid::from([[1., -1.], [-1., 1.]]),
            padding: 0,
            stride: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PoolingSettings {
    pub input: Grid,
    pub window_size: usize,
    pub stride: usize,
}

impl Default for PoolingSettings {
    fn default() -> Self {
        Self {
            input: Grid::from([
                [1., 3., 2., 4.],
                [5., 6., 7., 8.],
                [9., 11., 10., 12.],
                [13., 15., 14., 16.],
            ]),
            window_size: 2,
            stride: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    pub sequence: String,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            sequence: DEFAULT_SEQUENCE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FundamentalsConfig {
    pub page: Fundamentals,
}

impl Default for FundamentalsConfig {
    fn default() -> Self {
        Self {
            page: Fundamentals::LinearAlgebra,
        }
    }
}

/// Which diagram to show and its starting parameters. Every field is optional and
/// defaults to what the page shows on first load.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VisualizationConfig {
    Neuron(NeuronConfig),
    FeedForward(FeedForwardConfig),
    GradientDescent(DescentConfig),
    Convolution(ConvolutionSettings),
    Pooling(PoolingSettings),
    Recurrent(SequenceConfig),
    Gated(SequenceConfig),
    Fundamentals(FundamentalsConfig),
}

/// A built visualization: either a simulation that steps, or a page drawn straight from
/// its parameters.
#[derive(Debug, Clone)]
pub enum Visualization {
    Neuron(NeuronConfig),
    Fundamentals(Fundamentals),
    Simulation(SimulationState),
}

impl VisualizationConfig {
    /// Clamps the slider-driven parameters and builds the visualization at step 0.
    ///
    /// # Errors
    /// The simulation error describing the invalid topology, grid or sequence.
    pub fn build(self) -> simulation::Result<Visualization> {
        let kind = match self {
            Self::Neuron(neuron) => return Ok(Visualization::Neuron(neuron.clamped())),
            Self::Fundamentals(cfg) => return Ok(Visualization::Fundamentals(cfg.page)),
            Self::FeedForward(cfg) => {
                let spec = LayerSpec::new(cfg.layers)?;
                SimulationKind::FeedForward(FeedForward::with_weight(spec, cfg.inputs, cfg.weight)?)
            }
            Self::GradientDescent(cfg) => {
                let lr = clamp_slider("learning rate", cfg.learning_rate, LEARNING_RATE_RANGE);
                SimulationKind::gradient_descent(cfg.weights, lr)
            }
            Self::Convolution(cfg) => SimulationKind::convolution(ConvolutionConfig::new(
                cfg.input,
                cfg.kernel,
                clamp_slider("padding", cfg.padding, PADDING_RANGE),
                clamp_slider("stride", cfg.stride, STRIDE_RANGE),
            ))?,
            Self::Pooling(cfg) => SimulationKind::pooling(PoolingConfig::new(
                cfg.input,
                cfg.window_size,
                clamp_slider("stride", cfg.stride, STRIDE_RANGE),
            ))?,
            Self::Recurrent(cfg) => SimulationKind::recurrent(Sequence::filtered(&cfg.sequence)),
            Self::Gated(cfg) => SimulationKind::gated(Sequence::filtered(&cfg.sequence)),
        };

        Ok(Visualization::Simulation(SimulationState::new(kind)))
    }
}

/// Applies the same limits as the page widgets to a requested change.
pub fn clamp_change(change: Reconfigure) -> Reconfigure {
    match change {
        Reconfigure::LearningRate(lr) => {
            Reconfigure::LearningRate(clamp_slider("learning rate", lr, LEARNING_RATE_RANGE))
        }
        Reconfigure::Padding(p) => Reconfigure::Padding(clamp_slider("padding", p, PADDING_RANGE)),
        Reconfigure::Stride(s) => Reconfigure::Stride(clamp_slider("stride", s, STRIDE_RANGE)),
        Reconfigure::Sequence(text) => {
            Reconfigure::Sequence(Sequence::filtered(&text).to_string())
        }
        other => other,
    }
}

/// One user interaction replayed by the driver.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Step,
    Reset,
    ForwardPropagate,
    PerformBackpropagation,
    ApplyConvolution,
    /// New slider values for the neuron page.
    Neuron(NeuronConfig),
    #[serde(untagged)]
    Change(Reconfigure),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Step => "step",
            Action::Reset => "reset",
            Action::ForwardPropagate => "forward propagation",
            Action::PerformBackpropagation => "backpropagation",
            Action::ApplyConvolution => "apply convolution",
            Action::Neuron(_) => "neuron",
            Action::Change(change) => change.name(),
        }
    }
}

fn default_precision() -> usize {
    DEFAULT_PRECISION
}

/// Everything the command-line driver needs: the visualization, how to draw it and the
/// actions to replay on it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DriverConfig {
    pub visualization: VisualizationConfig,
    /// Overrides the visualization's own canvas size.
    #[serde(default)]
    pub canvas: Option<Canvas>,
    /// Decimal places of every value label.
    #[serde(default = "default_precision")]
    pub precision: usize,
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl DriverConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid driver configuration")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read '{}'", path.display()))?;

        Self::from_json(&text).with_context(|| format!("while loading '{}'", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use simulation::{SimErr, Values};

    use super::*;

    fn simulation(cfg: VisualizationConfig) -> SimulationState {
        match cfg.build().unwrap() {
            Visualization::Simulation(state) => state,
            other => panic!("expected a simulation, got {other:?}"),
        }
    }

    #[test]
    fn bare_kind_uses_page_defaults() {
        let cfg: VisualizationConfig = serde_json::from_str(r#"{"kind": "pooling"}"#).unwrap();
        assert_eq!(cfg, VisualizationConfig::Pooling(PoolingSettings::default()));

        let Values::Pooling { output, .. } = simulation(cfg).snapshot().values else {
            panic!("expected pooling values");
        };
        assert_eq!(output, Grid::from([[6., 8.], [15., 16.]]));
    }

    #[test]
    fn descent_defaults_report_their_error() {
        let state = simulation(VisualizationConfig::GradientDescent(DescentConfig::default()));

        let Values::GradientDescent { error, .. } = state.snapshot().values else {
            panic!("expected gradient descent values");
        };
        assert!((error - 0.34).abs() < 1e-6);
    }

    #[test]
    fn sliders_are_clamped() {
        let cfg: VisualizationConfig =
            serde_json::from_str(r#"{"kind": "gradient_descent", "learning_rate": 3.0}"#).unwrap();

        let Values::GradientDescent { learning_rate, .. } = simulation(cfg).snapshot().values
        else {
            panic!("expected gradient descent values");
        };
        assert_eq!(learning_rate, 0.5);

        assert_eq!(clamp_change(Reconfigure::Padding(7)), Reconfigure::Padding(2));
        assert_eq!(clamp_change(Reconfigure::Stride(0)), Reconfigure::Stride(1));
        assert_eq!(
            clamp_change(Reconfigure::LearningRate(0.2)),
            Reconfigure::LearningRate(0.2)
        );

        let neuron = NeuronConfig {
            input: -5.,
            weight: 1.,
            bias: 2.5,
        }
        .clamped();
        assert_eq!((neuron.input, neuron.bias), (-2., 2.));
    }

    #[test]
    fn sequence_text_is_filtered() {
        let cfg = VisualizationConfig::Recurrent(SequenceConfig {
            sequence: "1a0 1".into(),
        });
        assert_eq!(simulation(cfg).terminal(), Some(3));

        assert_eq!(
            clamp_change(Reconfigure::Sequence("x01".into())),
            Reconfigure::Sequence("01".into())
        );
    }

    #[test]
    fn empty_topology_is_rejected() {
        let cfg = VisualizationConfig::FeedForward(FeedForwardConfig {
            layers: vec![],
            ..Default::default()
        });

        assert!(matches!(cfg.build(), Err(SimErr::Numeric(_))));
    }

    #[test]
    fn driver_reads_actions() {
        let cfg = DriverConfig::from_json(
            r#"{
                "visualization": {"kind": "convolution", "padding": 1},
                "actions": ["apply_convolution", {"stride": 2}, "reset"]
            }"#,
        )
        .unwrap();

        assert_eq!(cfg.precision, 2);
        assert_eq!(cfg.canvas, None);
        assert_eq!(
            cfg.actions,
            vec![
                Action::ApplyConvolution,
                Action::Change(Reconfigure::Stride(2)),
                Action::Reset
            ]
        );
    }

    #[test]
    fn unknown_kind_is_an_error() {
        assert!(DriverConfig::from_json(r#"{"visualization": {"kind": "gan"}}"#).is_err());
    }
}
