mod dynamics;
pub mod error;
pub mod kinds;
mod reconfigure;
pub mod snapshot;
mod state;

pub use dynamics::Dynamics;
pub use error::{Result, SimErr};
pub use kinds::SimulationKind;
pub use reconfigure::{ChangeEffect, Reconfigure};
pub use snapshot::{RecurrentState, Snapshot, Values};
pub use state::SimulationState;
