use std::{error::Error, fmt};

use numeric::NumericErr;

/// The simulation module's result type.
pub type Result<T> = std::result::Result<T, SimErr>;

/// Failures reported back to whoever drives a simulation. None of them is fatal: the
/// simulation keeps the state it had before the failing call.
#[derive(Debug, Clone, PartialEq)]
pub enum SimErr {
    Numeric(NumericErr),
    InvalidStepTransition {
        step: usize,
        terminal: usize,
    },
    Unsupported {
        what: &'static str,
        kind: &'static str,
    },
}

impl fmt::Display for SimErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimErr::Numeric(e) => write!(f, "numeric error: {e}"),
            SimErr::InvalidStepTransition { step, terminal } => write!(
                f,
                "can't step past the end: at step {step} of {terminal}"
            ),
            SimErr::Unsupported { what, kind } => {
                write!(f, "{what} is not supported by the {kind} simulation")
            }
        }
    }
}

impl Error for SimErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SimErr::Numeric(e) => Some(e),
            _ => None,
        }
    }
}

impl From<NumericErr> for SimErr {
    fn from(value: NumericErr) -> Self {
        Self::Numeric(value)
    }
}
