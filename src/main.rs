use std::{
    env,
    io::{self, Write},
};

use anyhow::{Context, Result, bail};
use log::{info, warn};
use neural_network_visualization::{config::DriverConfig, scene::Scene, session::Session};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(path) = env::args().nth(1) else {
        bail!("usage: neural-network-visualization <driver.json>");
    };

    let driver = DriverConfig::load(&path)?;
    info!("loaded {path} with {} actions", driver.actions.len());

    let mut session = Session::new(driver.visualization, driver.canvas, driver.precision)
        .context("cannot build the visualization")?;

    let mut out = io::stdout().lock();
    emit(&mut out, &session.scene())?;

    for action in driver.actions {
        let name = action.name();

        match session.apply(action) {
            Ok(()) => emit(&mut out, &session.scene())?,
            Err(e) => {
                warn!(action = name; "{e:#}");
                serde_json::to_writer(&mut out, &serde_json::json!({ "error": format!("{e:#}") }))?;
                writeln!(out)?;
            }
        }
    }

    info!("session finished");
    Ok(())
}

/// Writes one scene as a single JSON line.
fn emit(out: &mut impl Write, scene: &Scene) -> Result<()> {
    serde_json::to_writer(&mut *out, scene)?;
    writeln!(out)?;
    Ok(())
}
