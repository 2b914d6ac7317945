use numeric::{LstmGates, RnnWeights, Sequence};

use crate::{
    ChangeEffect, Dynamics, Reconfigure, Result, SimErr,
    snapshot::{RecurrentState, Values},
};

/// A plain RNN cell unrolled over a binary sequence, one digit per step.
#[derive(Debug, Clone)]
pub struct Recurrent {
    sequence: Sequence,
    weights: RnnWeights,
    hidden: f32,
}

impl Recurrent {
    pub fn new(sequence: Sequence) -> Self {
        Self::with_weights(sequence, RnnWeights::default())
    }

    pub fn with_weights(sequence: Sequence, weights: RnnWeights) -> Self {
        Self {
            sequence,
            weights,
            hidden: 0.,
        }
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn hidden(&self) -> f32 {
        self.hidden
    }

    pub fn state(&self, step: usize) -> RecurrentState {
        RecurrentState {
            step,
            hidden: self.hidden,
            cell: None,
        }
    }
}

impl Dynamics for Recurrent {
    fn name(&self) -> &'static str {
        "recurrent"
    }

    fn horizon(&self) -> Option<usize> {
        Some(self.sequence.len())
    }

    fn advance(&mut self, step: usize) -> Result<()> {
        let input = self.sequence.get(step).ok_or(SimErr::InvalidStepTransition {
            step,
            terminal: self.sequence.len(),
        })?;

        self.hidden = self.weights.step(self.hidden, input);
        Ok(())
    }

    fn reset(&mut self) {
        self.hidden = 0.;
    }

    fn reconfigure(&mut self, change: Reconfigure) -> Result<ChangeEffect> {
        match change {
            Reconfigure::Sequence(text) => {
                self.sequence = Sequence::parse(&text)?;
                Ok(ChangeEffect::Structural)
            }
            other => Err(SimErr::Unsupported {
                what: other.name(),
                kind: self.name(),
            }),
        }
    }

    fn values(&self) -> Values {
        Values::Recurrent {
            sequence: self.sequence.to_string(),
            hidden: self.hidden,
        }
    }
}

/// An LSTM cell with fixed gate activations unrolled over a binary sequence.
#[derive(Debug, Clone)]
pub struct Gated {
    sequence: Sequence,
    gates: LstmGates,
    cell: f32,
    hidden: f32,
}

impl Gated {
    pub fn new(sequence: Sequence) -> Self {
        Self::with_gates(sequence, LstmGates::default())
    }

    pub fn with_gates(sequence: Sequence, gates: LstmGates) -> Self {
        Self {
            sequence,
            gates,
            cell: 0.,
            hidden: 0.,
        }
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn state(&self, step: usize) -> RecurrentState {
        RecurrentState {
            step,
            hidden: self.hidden,
            cell: Some(self.cell),
        }
    }
}

impl Dynamics for Gated {
    fn name(&self) -> &'static str {
        "gated"
    }

    fn horizon(&self) -> Option<usize> {
        Some(self.sequence.len())
    }

    fn advance(&mut self, step: usize) -> Result<()> {
        let input = self.sequence.get(step).ok_or(SimErr::InvalidStepTransition {
            step,
            terminal: self.sequence.len(),
        })?;

        let next = self.gates.step(self.cell, input);
        self.cell = next.cell;
        self.hidden = next.hidden;
        Ok(())
    }

    fn reset(&mut self) {
        self.cell = 0.;
        self.hidden = 0.;
    }

    fn reconfigure(&mut self, change: Reconfigure) -> Result<ChangeEffect> {
        match change {
            Reconfigure::Sequence(text) => {
                self.sequence = Sequence::parse(&text)?;
                Ok(ChangeEffect::Structural)
            }
            other => Err(SimErr::Unsupported {
                what: other.name(),
                kind: self.name(),
            }),
        }
    }

    fn values(&self) -> Values {
        Values::Gated {
            sequence: self.sequence.to_string(),
            cell: self.cell,
            hidden: self.hidden,
        }
    }
}
