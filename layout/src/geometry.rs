use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Edge {
    pub from: Point,
    pub to: Point,
}

impl Edge {
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }
}

/// The drawing surface, in screen units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
}

impl Canvas {
    pub const NETWORK: Self = Self::new(800., 500.);
    pub const RECURRENT: Self = Self::new(800., 400.);
    pub const GATED: Self = Self::new(800., 600.);
    pub const CONVOLUTION: Self = Self::new(800., 600.);
    pub const LOSS: Self = Self::new(800., 600.);
    pub const POOLING: Self = Self::new(600., 400.);
    pub const NEURON: Self = Self::new(600., 400.);
    pub const FUNDAMENTALS: Self = Self::new(800., 400.);

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::NETWORK
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margin {
    /// The tighter box around the single-neuron activation plot.
    pub const NEURON: Self = Self {
        top: 20.,
        right: 20.,
        bottom: 30.,
        left: 40.,
    };

    pub const fn uniform(side: f32) -> Self {
        Self {
            top: side,
            right: side,
            bottom: side,
            left: side,
        }
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::uniform(50.)
    }
}

/// Horizontal distance between consecutive columns when `columns` of them are spread
/// across the canvas, leaving `margin.left` on both sides.
pub(crate) fn column_spacing(columns: usize, canvas: Canvas, margin: Margin) -> f32 {
    let gaps = columns.saturating_sub(1).max(1);
    (canvas.width - 2. * margin.left) / gaps as f32
}
