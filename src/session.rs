use anyhow::{Result, bail};
use layout::Canvas;
use log::debug;
use simulation::{Dynamics, SimErr, SimulationState};

use crate::{
    config::{Action, Visualization, VisualizationConfig, clamp_change},
    scene::Scene,
};

/// One open visualization page: its state plus how it is drawn.
#[derive(Debug, Clone)]
pub struct Session {
    visualization: Visualization,
    canvas: Option<Canvas>,
    precision: usize,
}

impl Session {
    pub fn new(cfg: VisualizationConfig, canvas: Option<Canvas>, precision: usize) -> Result<Self> {
        Ok(Self {
            visualization: cfg.build()?,
            canvas,
            precision,
        })
    }

    pub fn visualization(&self) -> &Visualization {
        &self.visualization
    }

    pub fn scene(&self) -> Scene {
        Scene::build(&self.visualization, self.canvas, self.precision)
    }

    /// Replays one user action.
    ///
    /// # Errors
    /// If the page has no such action or the simulation refused it. The session stays
    /// usable either way.
    pub fn apply(&mut self, action: Action) -> Result<()> {
        debug!(action = action.name(); "applying");

        match &mut self.visualization {
            Visualization::Simulation(state) => Ok(apply_to(state, action)?),
            Visualization::Neuron(neuron) => match action {
                Action::Neuron(next) => {
                    *neuron = next.clamped();
                    Ok(())
                }
                Action::Reset => {
                    *neuron = Default::default();
                    Ok(())
                }
                other => bail!("the neuron page has no {} action", other.name()),
            },
            Visualization::Fundamentals(_) => {
                bail!("the fundamentals page has no {} action", action.name())
            }
        }
    }
}

fn apply_to(state: &mut SimulationState, action: Action) -> simulation::Result<()> {
    match action {
        Action::Step => state.step().map(drop),
        Action::Reset => {
            state.reset();
            Ok(())
        }
        Action::ForwardPropagate => state.forward_propagate().map(drop),
        Action::PerformBackpropagation => state.perform_backpropagation().map(drop),
        Action::ApplyConvolution => state.apply_convolution().map(drop),
        Action::Change(change) => state.reconfigure(clamp_change(change)),
        Action::Neuron(_) => Err(SimErr::Unsupported {
            what: "neuron sliders",
            kind: state.kind().name(),
        }),
    }
}
