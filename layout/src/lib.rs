//! Pure geometry for the diagrams: every function maps a topology and a canvas box to
//! absolute coordinates and keeps no state between calls.

mod geometry;
pub mod grid;
mod label;
pub mod network;
pub mod plot;
pub mod timeline;

pub use geometry::{Canvas, Edge, Margin, Point};
pub use grid::{GridLayout, layout_grid};
pub use label::format_value;
pub use network::{NetworkLayout, layout_layered_network};
pub use plot::{LinearScale, sample_range};
pub use timeline::layout_sequence_timeline;
