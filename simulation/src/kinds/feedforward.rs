use numeric::{LayerSpec, NumericErr, feedforward::SHARED_WEIGHT, forward_layer};

use crate::{ChangeEffect, Dynamics, Reconfigure, Result, SimErr, snapshot::Values};

/// A fully connected network where every connection carries the same weight.
///
/// Holds one activation vector per layer; the input layer is only ever written by a
/// reconfiguration, forward passes overwrite the rest.
#[derive(Debug, Clone)]
pub struct FeedForward {
    spec: LayerSpec,
    weight: f32,
    activations: Vec<Vec<f32>>,
}

impl FeedForward {
    /// # Errors
    /// Returns `NumericErr::SizeMismatch` if `inputs` doesn't match the input layer's size.
    pub fn new(spec: LayerSpec, inputs: Vec<f32>) -> Result<Self> {
        Self::with_weight(spec, inputs, SHARED_WEIGHT)
    }

    pub fn with_weight(spec: LayerSpec, inputs: Vec<f32>, weight: f32) -> Result<Self> {
        check_inputs(&spec, &inputs)?;

        let activations = initial_activations(&spec, inputs);
        Ok(Self {
            spec,
            weight,
            activations,
        })
    }

    pub fn spec(&self) -> &LayerSpec {
        &self.spec
    }

    pub fn activations(&self) -> &[Vec<f32>] {
        &self.activations
    }

    /// Recomputes every layer past the input from the one before it.
    pub fn forward_propagate(&mut self) {
        for l in 1..self.activations.len() {
            let value = forward_layer(&self.activations[l - 1], self.weight);
            self.activations[l].fill(value);
        }
    }
}

fn check_inputs(spec: &LayerSpec, inputs: &[f32]) -> Result<()> {
    if inputs.len() != spec.input_size() {
        return Err(SimErr::Numeric(NumericErr::SizeMismatch {
            a: "inputs",
            b: "input layer",
            got: inputs.len(),
            expected: spec.input_size(),
        }));
    }

    Ok(())
}

fn initial_activations(spec: &LayerSpec, inputs: Vec<f32>) -> Vec<Vec<f32>> {
    let mut activations = Vec::with_capacity(spec.len());
    activations.push(inputs);
    activations.extend(spec.sizes()[1..].iter().map(|&n| vec![0.; n]));
    activations
}

impl Dynamics for FeedForward {
    fn name(&self) -> &'static str {
        "feed forward"
    }

    fn horizon(&self) -> Option<usize> {
        None
    }

    fn advance(&mut self, _step: usize) -> Result<()> {
        self.forward_propagate();
        Ok(())
    }

    fn reset(&mut self) {
        for layer in &mut self.activations[1..] {
            layer.fill(0.);
        }
    }

    fn reconfigure(&mut self, change: Reconfigure) -> Result<ChangeEffect> {
        match change {
            Reconfigure::Inputs(inputs) => {
                check_inputs(&self.spec, &inputs)?;
                self.activations[0] = inputs;
                Ok(ChangeEffect::Structural)
            }
            other => Err(SimErr::Unsupported {
                what: other.name(),
                kind: self.name(),
            }),
        }
    }

    fn values(&self) -> Values {
        Values::FeedForward {
            layers: self.activations.clone(),
            weight: self.weight,
        }
    }
}
