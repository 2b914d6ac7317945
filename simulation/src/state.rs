use log::{debug, warn};

use crate::{
    ChangeEffect, Dynamics, Reconfigure, Result, SimErr,
    kinds::SimulationKind,
    snapshot::{RecurrentState, Snapshot},
};

/// One visualization's simulation: a step counter on top of the values a
/// [`SimulationKind`] evolves.
///
/// Sequence-driven kinds and the convolution stop at their terminal step; the others can
/// be advanced any number of times, each call being one full transition.
#[derive(Debug, Clone)]
pub struct SimulationState {
    step: usize,
    kind: SimulationKind,
}

impl SimulationState {
    pub fn new(kind: SimulationKind) -> Self {
        Self { step: 0, kind }
    }

    pub fn current_step(&self) -> usize {
        self.step
    }

    pub fn terminal(&self) -> Option<usize> {
        self.kind.horizon()
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal().is_some_and(|t| self.step >= t)
    }

    pub fn kind(&self) -> &SimulationKind {
        &self.kind
    }

    /// Advances the simulation by one transition.
    ///
    /// # Returns
    /// The step index reached.
    ///
    /// # Errors
    /// `SimErr::InvalidStepTransition` if the simulation already reached its terminal
    /// step, or whatever the transition itself failed with. The state is unchanged
    /// on error.
    pub fn step(&mut self) -> Result<usize> {
        if let Some(terminal) = self.terminal().filter(|&t| self.step >= t) {
            warn!(
                kind = self.kind.name(),
                step = self.step;
                "step requested past the terminal state"
            );
            return Err(SimErr::InvalidStepTransition {
                step: self.step,
                terminal,
            });
        }

        self.kind.advance(self.step)?;
        self.step += 1;

        debug!(kind = self.kind.name(), step = self.step; "advanced");
        Ok(self.step)
    }

    /// Brings the simulation back to step 0 and its initial values. Idempotent.
    pub fn reset(&mut self) {
        self.step = 0;
        self.kind.reset();

        debug!(kind = self.kind.name(); "reset");
    }

    /// Applies a parameter change, starting over when the change is structural.
    ///
    /// # Errors
    /// `SimErr::Unsupported` if this kind of simulation has no such parameter, or the
    /// numeric error describing why the new configuration is invalid. Nothing changes on
    /// error.
    pub fn reconfigure(&mut self, change: Reconfigure) -> Result<()> {
        let what = change.name();
        let structural = self.kind.reconfigure(change)? == ChangeEffect::Structural;

        debug!(kind = self.kind.name(), change = what, structural = structural; "reconfigured");

        if structural {
            self.reset();
        }

        Ok(())
    }

    /// Runs a forward pass of a feed-forward network.
    pub fn forward_propagate(&mut self) -> Result<usize> {
        self.expect_kind("forward propagation", |k| {
            matches!(k, SimulationKind::FeedForward(_))
        })?;
        self.step()
    }

    /// Takes one gradient-descent step on every weight.
    pub fn perform_backpropagation(&mut self) -> Result<usize> {
        self.expect_kind("backpropagation", |k| {
            matches!(k, SimulationKind::GradientDescent(_))
        })?;
        self.step()
    }

    /// Computes and caches the feature map for the current convolution configuration.
    pub fn apply_convolution(&mut self) -> Result<usize> {
        self.expect_kind("applying a convolution", |k| {
            matches!(k, SimulationKind::Convolution(_))
        })?;
        self.step()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            step: self.step,
            terminal: self.terminal(),
            values: self.kind.values(),
        }
    }

    /// The memory of a recurrent or gated simulation, `None` for other kinds.
    pub fn recurrent_state(&self) -> Option<RecurrentState> {
        match &self.kind {
            SimulationKind::Recurrent(rnn) => Some(rnn.state(self.step)),
            SimulationKind::Gated(lstm) => Some(lstm.state(self.step)),
            _ => None,
        }
    }

    fn expect_kind(
        &self,
        what: &'static str,
        is_expected: impl Fn(&SimulationKind) -> bool,
    ) -> Result<()> {
        if is_expected(&self.kind) {
            return Ok(());
        }

        Err(SimErr::Unsupported {
            what,
            kind: self.kind.name(),
        })
    }
}
