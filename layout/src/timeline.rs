use serde::Serialize;

use crate::geometry::{Canvas, Edge, Margin, Point, column_spacing};

pub const NODE_RADIUS: f32 = 30.;
pub const GATE_RADIUS: f32 = 15.;
pub const CELL_WIDTH: f32 = 120.;
pub const CELL_HEIGHT: f32 = 160.;

const HIDDEN_ROW_OFFSET: f32 = 150.;
const CELL_ROW_OFFSET: f32 = 100.;
const CELLS_LABEL_OFFSET: f32 = 200.;

/// One position per time step along the top margin, evenly spaced across the canvas.
///
/// A sequence of length 0 or 1 collapses to the single column at `margin.left`.
pub fn layout_sequence_timeline(length: usize, canvas: Canvas, margin: Margin) -> Vec<Point> {
    let step_width = column_spacing(length, canvas, margin);

    (0..length)
        .map(|i| Point::new(margin.left + i as f32 * step_width, margin.top))
        .collect()
}

/// A node that lights up once the simulation has reached its time step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepNode {
    pub centre: Point,
    pub active: bool,
}

/// An RNN unrolled in time: inputs on top, hidden states below them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecurrentDiagram {
    pub inputs: Vec<Point>,
    pub hidden: Vec<StepNode>,
    /// Input to hidden, trimmed so they start and end on the circles.
    pub input_edges: Vec<Edge>,
    /// Hidden state carried from one step to the next.
    pub recurrent_edges: Vec<Edge>,
    pub input_label: Point,
    pub hidden_label: Point,
}

/// Lays out the recurrent diagram. A node counts as active when its index is at most
/// `step`.
pub fn layout_recurrent(
    length: usize,
    step: usize,
    canvas: Canvas,
    margin: Margin,
) -> RecurrentDiagram {
    let columns = layout_sequence_timeline(length, canvas, margin);

    let inputs: Vec<Point> = columns.iter().map(|p| p.offset(0., 50.)).collect();
    let hidden: Vec<StepNode> = inputs
        .iter()
        .enumerate()
        .map(|(i, p)| StepNode {
            centre: p.offset(0., HIDDEN_ROW_OFFSET),
            active: i <= step,
        })
        .collect();

    let input_edges = inputs
        .iter()
        .zip(&hidden)
        .map(|(i, h)| Edge::new(i.offset(0., NODE_RADIUS), h.centre.offset(0., -NODE_RADIUS)))
        .collect();

    let recurrent_edges = hidden
        .windows(2)
        .map(|w| Edge::new(w[0].centre, w[1].centre))
        .collect();

    RecurrentDiagram {
        inputs,
        hidden,
        input_edges,
        recurrent_edges,
        input_label: Point::new(margin.left, margin.top + 20.),
        hidden_label: Point::new(margin.left, margin.top + 170.),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Gate {
    pub name: char,
    pub centre: Point,
}

/// One LSTM cell box with its four gates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellBox {
    pub top_left: Point,
    pub width: f32,
    pub height: f32,
    pub active: bool,
    pub gates: [Gate; 4],
    pub cell_label: Point,
    pub hidden_label: Point,
}

impl CellBox {
    fn around(centre: Point, active: bool) -> Self {
        let top_left = centre.offset(-CELL_WIDTH / 2., -CELL_HEIGHT / 2.);
        let gate = |name, dx, dy| Gate {
            name,
            centre: top_left.offset(dx, dy),
        };

        Self {
            top_left,
            width: CELL_WIDTH,
            height: CELL_HEIGHT,
            active,
            gates: [
                gate('f', 30., 40.),
                gate('i', 90., 40.),
                gate('g', 30., 100.),
                gate('o', 90., 100.),
            ],
            cell_label: Point::new(centre.x, top_left.y + CELL_HEIGHT + 20.),
            hidden_label: Point::new(centre.x, top_left.y + CELL_HEIGHT + 40.),
        }
    }
}

/// An LSTM unrolled in time: inputs along the top margin, a cell box under each.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GatedDiagram {
    pub inputs: Vec<Point>,
    pub cells: Vec<CellBox>,
    pub input_edges: Vec<Edge>,
    /// Centre to centre between consecutive cells.
    pub cell_edges: Vec<Edge>,
    pub input_label: Point,
    pub cells_label: Point,
}

pub fn layout_gated(length: usize, step: usize, canvas: Canvas, margin: Margin) -> GatedDiagram {
    let inputs = layout_sequence_timeline(length, canvas, margin);
    let centres: Vec<Point> = inputs.iter().map(|p| p.offset(0., CELL_ROW_OFFSET)).collect();

    let cells: Vec<CellBox> = centres
        .iter()
        .enumerate()
        .map(|(i, &c)| CellBox::around(c, i <= step))
        .collect();

    let input_edges = inputs
        .iter()
        .zip(&cells)
        .map(|(p, cell)| Edge::new(p.offset(0., NODE_RADIUS), Point::new(p.x, cell.top_left.y)))
        .collect();

    let cell_edges = centres.windows(2).map(|w| Edge::new(w[0], w[1])).collect();

    GatedDiagram {
        inputs,
        cells,
        input_edges,
        cell_edges,
        input_label: Point::new(margin.left, margin.top),
        cells_label: Point::new(margin.left, margin.top + CELLS_LABEL_OFFSET),
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn timeline_is_evenly_spaced() {
        let mut rng = rand::rng();

        for _ in 0..20 {
            let length = rng.random_range(2..30);
            let points = layout_sequence_timeline(length, Canvas::RECURRENT, Margin::default());
            assert_eq!(points.len(), length);

            let gaps: Vec<f32> = points.windows(2).map(|w| w[1].x - w[0].x).collect();
            assert!(gaps.iter().all(|g| (g - gaps[0]).abs() < 1e-3));
            assert!((points[length - 1].x - 750.).abs() < 1e-3);
        }
    }

    #[test]
    fn short_sequences_collapse_to_one_column() {
        let margin = Margin::default();

        assert!(layout_sequence_timeline(0, Canvas::RECURRENT, margin).is_empty());
        assert_eq!(
            layout_sequence_timeline(1, Canvas::RECURRENT, margin),
            vec![Point::new(50., 50.)]
        );
    }

    #[test]
    fn recurrent_rows_and_activity() {
        let diagram = layout_recurrent(4, 1, Canvas::RECURRENT, Margin::default());

        assert!(diagram.inputs.iter().all(|p| p.y == 100.));
        assert!(diagram.hidden.iter().all(|n| n.centre.y == 250.));

        let active: Vec<bool> = diagram.hidden.iter().map(|n| n.active).collect();
        assert_eq!(active, vec![true, true, false, false]);

        assert_eq!(diagram.input_edges[0].from.y, 130.);
        assert_eq!(diagram.input_edges[0].to.y, 220.);
        assert_eq!(diagram.recurrent_edges.len(), 3);
    }

    #[test]
    fn gated_cells_carry_their_gates() {
        let diagram = layout_gated(2, 0, Canvas::GATED, Margin::default());
        let cell = &diagram.cells[0];

        assert_eq!(cell.top_left, Point::new(-10., 70.));
        let names: Vec<char> = cell.gates.iter().map(|g| g.name).collect();
        assert_eq!(names, vec!['f', 'i', 'g', 'o']);
        assert_eq!(cell.gates[3].centre, Point::new(80., 170.));

        assert_eq!(cell.cell_label.y, 250.);
        assert_eq!(cell.hidden_label.y, 270.);
        assert!(cell.active);
        assert!(!diagram.cells[1].active);

        assert_eq!(diagram.input_edges[0].to.y, 70.);
        assert_eq!(diagram.cell_edges.len(), 1);

        assert_eq!(diagram.input_label, Point::new(50., 50.));
        assert_eq!(diagram.cells_label, Point::new(50., 250.));
    }
}
