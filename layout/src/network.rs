use serde::Serialize;

use crate::geometry::{Canvas, Edge, Margin, Point, column_spacing};

/// Node positions per layer plus the fully-connected edges between adjacent layers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkLayout {
    pub layers: Vec<Vec<Point>>,
    pub edges: Vec<Edge>,
}

impl NetworkLayout {
    pub fn node_count(&self) -> usize {
        self.layers.iter().map(Vec::len).sum()
    }

    /// Points above each layer where its heading goes.
    pub fn heading_anchors(&self, margin: Margin) -> Vec<Point> {
        self.layers
            .iter()
            .filter_map(|layer| layer.first())
            .map(|node| Point::new(node.x, margin.top - 20.))
            .collect()
    }
}

/// Spreads the layers evenly across the canvas and each layer's nodes evenly down it.
///
/// Node `k` of a layer with `n` nodes sits at `(k + 1) / (n + 1)` of the usable height,
/// so no node ever touches the margins.
pub fn layout_layered_network(sizes: &[usize], canvas: Canvas, margin: Margin) -> NetworkLayout {
    let spacing = column_spacing(sizes.len(), canvas, margin);
    let usable_height = canvas.height - 2. * margin.top;

    let layers: Vec<Vec<Point>> = sizes
        .iter()
        .enumerate()
        .map(|(l, &n)| {
            let x = margin.left + l as f32 * spacing;
            (0..n)
                .map(|k| {
                    let y = margin.top + usable_height * (k + 1) as f32 / (n + 1) as f32;
                    Point::new(x, y)
                })
                .collect()
        })
        .collect();

    let edges = layers
        .windows(2)
        .flat_map(|pair| {
            let (from, to) = (&pair[0], &pair[1]);
            from.iter()
                .flat_map(move |&a| to.iter().map(move |&b| Edge::new(a, b)))
        })
        .collect();

    NetworkLayout { layers, edges }
}
