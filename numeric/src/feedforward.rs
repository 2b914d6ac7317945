use serde::{Deserialize, Serialize};

use crate::{NumericErr, Result, activations::sigmoid};

/// The weight every connection shares unless configured otherwise.
pub const SHARED_WEIGHT: f32 = 0.5;

/// The sizes of a feed-forward network's layers, input layer first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct LayerSpec {
    sizes: Vec<usize>,
}

impl LayerSpec {
    /// # Errors
    /// Returns `NumericErr::EmptyTopology` if `sizes` is empty or has a zero-sized layer.
    pub fn new(sizes: Vec<usize>) -> Result<Self> {
        if sizes.is_empty() || sizes.contains(&0) {
            return Err(NumericErr::EmptyTopology);
        }

        Ok(Self { sizes })
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn input_size(&self) -> usize {
        self.sizes[0]
    }

    /// Number of connections between consecutive layers when every node
    /// feeds every node of the next layer.
    pub fn num_edges(&self) -> usize {
        self.sizes.windows(2).map(|w| w[0] * w[1]).sum()
    }
}

impl TryFrom<Vec<usize>> for LayerSpec {
    type Error = NumericErr;

    fn try_from(sizes: Vec<usize>) -> Result<Self> {
        Self::new(sizes)
    }
}

impl From<LayerSpec> for Vec<usize> {
    fn from(spec: LayerSpec) -> Self {
        spec.sizes
    }
}

/// Activation of one node of a fully connected layer where every
/// connection carries the same `weight`: `sigmoid(Σ inputᵢ · weight)`.
///
/// Every node of such a layer gets the same value.
pub fn forward_layer(inputs: &[f32], weight: f32) -> f32 {
    let z = inputs.iter().fold(0., |acc, x| acc + x * weight);
    sigmoid(z)
}

/// Output of a single neuron, `sigmoid(input · weight + bias)`.
pub fn neuron_output(input: f32, weight: f32, bias: f32) -> f32 {
    sigmoid(input * weight + bias)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{EPS, assert_close};

    #[test]
    fn forward_layer_shares_the_weight() {
        // 0.5 * 0.5 + 0.3 * 0.5 = 0.4
        assert_close(forward_layer(&[0.5, 0.3], SHARED_WEIGHT), sigmoid(0.4), EPS);
    }

    #[test]
    fn forward_layer_of_nothing_is_one_half() {
        assert_close(forward_layer(&[], SHARED_WEIGHT), 0.5, EPS);
    }

    #[test]
    fn neuron_with_unit_weight_and_no_bias() {
        assert_close(neuron_output(0.5, 1., 0.), sigmoid(0.5), EPS);
        assert_close(neuron_output(-2., 2., 1.), sigmoid(-3.), EPS);
    }

    #[test]
    fn layer_spec_counts_edges() {
        let spec = LayerSpec::new(vec![2, 3, 1]).unwrap();

        assert_eq!(spec.len(), 3);
        assert_eq!(spec.input_size(), 2);
        assert_eq!(spec.num_edges(), 9);
    }

    #[test]
    fn layer_spec_rejects_empty_layers() {
        assert_eq!(LayerSpec::new(vec![]), Err(NumericErr::EmptyTopology));
        assert_eq!(LayerSpec::new(vec![2, 0, 1]), Err(NumericErr::EmptyTopology));
    }
}
