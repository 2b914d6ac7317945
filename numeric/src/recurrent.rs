use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    NumericErr, Result,
    activations::tanh,
};

/// A binary digit of an input sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    pub fn value(self) -> f32 {
        match self {
            Bit::Zero => 0.,
            Bit::One => 1.,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }
}

impl TryFrom<char> for Bit {
    type Error = char;

    fn try_from(c: char) -> std::result::Result<Self, char> {
        match c {
            '0' => Ok(Bit::Zero),
            '1' => Ok(Bit::One),
            other => Err(other),
        }
    }
}

/// An ordered list of binary digits fed one per step to a recurrent cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Sequence {
    bits: Vec<Bit>,
}

impl Sequence {
    /// Parses a string made only of `0` and `1`.
    ///
    /// # Errors
    /// Returns `NumericErr::InvalidSequenceCharacter` on the first other character.
    pub fn parse(text: &str) -> Result<Self> {
        let bits = text
            .chars()
            .enumerate()
            .map(|(position, c)| {
                Bit::try_from(c)
                    .map_err(|found| NumericErr::InvalidSequenceCharacter { position, found })
            })
            .collect::<Result<_>>()?;

        Ok(Self { bits })
    }

    /// Keeps only the `0` and `1` characters of `text`, the way the sequence text field does.
    pub fn filtered(text: &str) -> Self {
        let bits = text.chars().filter_map(|c| Bit::try_from(c).ok()).collect();
        Self { bits }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<Bit> {
        self.bits.get(idx).copied()
    }

    pub fn bits(&self) -> &[Bit] {
        &self.bits
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.bits.iter().try_for_each(|b| write!(f, "{}", b.as_char()))
    }
}

impl TryFrom<String> for Sequence {
    type Error = NumericErr;

    fn try_from(text: String) -> Result<Self> {
        Self::parse(&text)
    }
}

impl From<Sequence> for String {
    fn from(seq: Sequence) -> Self {
        seq.to_string()
    }
}

/// Weights of the illustrative RNN cell `h' = tanh(recurrent·h + input·x + bias)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RnnWeights {
    pub recurrent: f32,
    pub input: f32,
    pub bias: f32,
}

impl Default for RnnWeights {
    fn default() -> Self {
        Self {
            recurrent: 0.5,
            input: 0.3,
            bias: 0.1,
        }
    }
}

impl RnnWeights {
    pub fn step(&self, hidden_prev: f32, input: Bit) -> f32 {
        tanh(self.recurrent * hidden_prev + self.input * input.value() + self.bias)
    }
}

/// Fixed gate activations of the illustrative LSTM cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LstmGates {
    pub forget: f32,
    pub input: f32,
    pub candidate: f32,
    pub output: f32,
}

impl Default for LstmGates {
    fn default() -> Self {
        Self {
            forget: 0.5,
            input: 0.3,
            candidate: 0.2,
            output: 0.4,
        }
    }
}

/// Cell and hidden state after one LSTM step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LstmState {
    pub cell: f32,
    pub hidden: f32,
}

impl LstmGates {
    /// `cell = f·cell_prev + i·g·x`, `hidden = o·tanh(cell)`.
    pub fn step(&self, cell_prev: f32, input: Bit) -> LstmState {
        let cell = self.forget * cell_prev + self.input * self.candidate * input.value();
        let hidden = self.output * tanh(cell);
        LstmState { cell, hidden }
    }
}

/// One step of the RNN cell with the default weights.
pub fn rnn_step(hidden_prev: f32, input: Bit) -> f32 {
    RnnWeights::default().step(hidden_prev, input)
}

/// One step of the LSTM cell with the default gates.
pub fn lstm_step(cell_prev: f32, input: Bit) -> LstmState {
    LstmGates::default().step(cell_prev, input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::assert_close;

    #[test]
    fn rnn_from_rest() {
        assert_close(rnn_step(0., Bit::One), 0.4_f32.tanh(), 1e-7);
        assert_close(rnn_step(0., Bit::One), 0.3799, 1e-4);
        assert_close(rnn_step(0., Bit::Zero), 0.1_f32.tanh(), 1e-7);
    }

    #[test]
    fn rnn_carries_the_hidden_state() {
        let h1 = rnn_step(0., Bit::One);
        let h2 = rnn_step(h1, Bit::Zero);
        assert_close(h2, (0.5 * h1 + 0.1).tanh(), 1e-7);
    }

    #[test]
    fn lstm_from_rest() {
        let state = lstm_step(0., Bit::One);

        assert_close(state.cell, 0.06, 1e-7);
        assert_close(state.hidden, 0.4 * 0.06_f32.tanh(), 1e-7);
        assert_close(state.hidden, 0.02397, 1e-5);
    }

    #[test]
    fn lstm_forgets_half_on_zero_input() {
        let state = lstm_step(0.06, Bit::Zero);
        assert_close(state.cell, 0.03, 1e-7);
    }

    #[test]
    fn custom_weights() {
        let weights = RnnWeights {
            recurrent: 1.,
            input: 0.,
            bias: 0.,
        };
        assert_close(weights.step(0.2, Bit::One), 0.2_f32.tanh(), 1e-7);
    }

    #[test]
    fn parse_sequence() {
        let seq = Sequence::parse("1010").unwrap();

        assert_eq!(seq.len(), 4);
        assert_eq!(seq.get(0), Some(Bit::One));
        assert_eq!(seq.get(1), Some(Bit::Zero));
        assert_eq!(seq.to_string(), "1010");
    }

    #[test]
    fn parse_rejects_other_characters() {
        assert_eq!(
            Sequence::parse("10a1"),
            Err(NumericErr::InvalidSequenceCharacter {
                position: 2,
                found: 'a'
            })
        );
    }

    #[test]
    fn filtered_drops_other_characters() {
        assert_eq!(Sequence::filtered("1 0x2 1").to_string(), "101");
        assert!(Sequence::filtered("abc").is_empty());
    }

    #[test]
    fn empty_sequence_is_valid() {
        assert!(Sequence::parse("").unwrap().is_empty());
    }
}
