use crate::{ChangeEffect, Reconfigure, Result, snapshot::Values};

/// The per-visualization half of a simulation: the values that change and the rule that
/// changes them. The step counter itself lives in [`crate::SimulationState`].
pub trait Dynamics {
    /// A short, stable name used in logs and errors.
    fn name(&self) -> &'static str;

    /// The terminal step, or `None` if the simulation can be advanced forever.
    fn horizon(&self) -> Option<usize>;

    /// Performs the transition out of `step`.
    ///
    /// Implementations must leave their values untouched when they fail.
    fn advance(&mut self, step: usize) -> Result<()>;

    /// Restores the values the simulation was created (or last reconfigured) with.
    fn reset(&mut self);

    /// Applies a parameter change. A `ChangeEffect::Structural` outcome is followed by a
    /// reset of the whole simulation.
    ///
    /// # Errors
    /// `SimErr::Unsupported` if the change makes no sense for this simulation, or the
    /// numeric error that made the new configuration invalid. On error nothing changes.
    fn reconfigure(&mut self, change: Reconfigure) -> Result<ChangeEffect>;

    fn values(&self) -> Values;
}
