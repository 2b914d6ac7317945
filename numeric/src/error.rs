use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used in the entire numeric module.
pub type Result<T> = std::result::Result<T, NumericErr>;

/// The numeric module's error type.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericErr {
    /// A kernel or window does not fit inside the (padded) input.
    DimensionMismatch {
        what: &'static str,
        needed: usize,
        available: usize,
    },
    RaggedGrid {
        row: usize,
        got: usize,
        expected: usize,
    },
    SizeMismatch {
        a: &'static str,
        b: &'static str,
        got: usize,
        expected: usize,
    },
    InvalidParameter {
        name: &'static str,
        value: f32,
    },
    InvalidSequenceCharacter {
        position: usize,
        found: char,
    },
    EmptyTopology,
}

impl Display for NumericErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericErr::DimensionMismatch {
                what,
                needed,
                available,
            } => write!(
                f,
                "The {what} needs {needed} cells but the input only provides {available}"
            ),
            NumericErr::RaggedGrid { row, got, expected } => write!(
                f,
                "Row {row} of the grid has {got} columns, expected {expected}"
            ),
            NumericErr::SizeMismatch {
                a,
                b,
                got,
                expected,
            } => write!(
                f,
                "There's a size mismatch between {a} and {b}, got {got} and expected {expected}"
            ),
            NumericErr::InvalidParameter { name, value } => {
                write!(f, "The parameter {name} can't take the value {value}")
            }
            NumericErr::InvalidSequenceCharacter { position, found } => write!(
                f,
                "The sequence contains {found:?} at position {position}, only 0 and 1 are allowed"
            ),
            NumericErr::EmptyTopology => {
                write!(f, "A network needs at least one layer and no empty layers")
            }
        }
    }
}

impl Error for NumericErr {}
