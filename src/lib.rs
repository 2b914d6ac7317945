//! Interactive deep-learning diagrams: loads a visualization, replays the user's actions
//! on it and turns every state into a plain-data [`scene::Scene`].

pub mod config;
pub mod scene;
pub mod session;
