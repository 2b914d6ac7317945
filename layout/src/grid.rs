use serde::Serialize;

use crate::geometry::{Margin, Point};

pub const CONVOLUTION_CELL: f32 = 40.;
pub const POOLING_CELL: f32 = 50.;

const SIDE_GUTTER: f32 = 100.;
const BELOW_GUTTER: f32 = 50.;
const TITLE_LIFT: f32 = 10.;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cell {
    pub top_left: Point,
    /// Where the cell's value label goes.
    pub centre: Point,
}

/// Square cells of one grid panel, row-major.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridLayout {
    pub origin: Point,
    pub cell_size: f32,
    pub cells: Vec<Vec<Cell>>,
}

impl GridLayout {
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub fn width(&self) -> f32 {
        self.cols() as f32 * self.cell_size
    }

    pub fn height(&self) -> f32 {
        self.rows() as f32 * self.cell_size
    }

    /// Centred above the panel.
    pub fn title_anchor(&self) -> Point {
        self.origin.offset(self.width() / 2., -TITLE_LIFT)
    }
}

pub fn layout_grid(rows: usize, cols: usize, cell_size: f32, origin: Point) -> GridLayout {
    let cells = (0..rows)
        .map(|i| {
            (0..cols)
                .map(|j| {
                    let top_left = origin.offset(j as f32 * cell_size, i as f32 * cell_size);
                    Cell {
                        top_left,
                        centre: top_left.offset(cell_size / 2., cell_size / 2.),
                    }
                })
                .collect()
        })
        .collect();

    GridLayout {
        origin,
        cell_size,
        cells,
    }
}

/// Dimensions of a grid to place, as `(rows, cols)`.
pub type Dims = (usize, usize);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvolutionPanels {
    pub input: GridLayout,
    pub kernel: GridLayout,
    pub feature_map: Option<GridLayout>,
}

/// Padded input at the margin corner, the kernel to its right and the feature map, once
/// there is one, under the input.
pub fn layout_convolution(
    padded_input: Dims,
    kernel: Dims,
    feature_map: Option<Dims>,
    margin: Margin,
) -> ConvolutionPanels {
    let origin = Point::new(margin.left, margin.top);
    let input = layout_grid(padded_input.0, padded_input.1, CONVOLUTION_CELL, origin);

    let kernel_origin = origin.offset(input.width() + SIDE_GUTTER, 0.);
    let kernel = layout_grid(kernel.0, kernel.1, CONVOLUTION_CELL, kernel_origin);

    let below = origin.offset(0., input.height() + BELOW_GUTTER);
    let feature_map =
        feature_map.map(|(rows, cols)| layout_grid(rows, cols, CONVOLUTION_CELL, below));

    ConvolutionPanels {
        input,
        kernel,
        feature_map,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolingPanels {
    pub input: GridLayout,
    pub output: GridLayout,
}

pub fn layout_pooling(input: Dims, output: Dims, margin: Margin) -> PoolingPanels {
    let origin = Point::new(margin.left, margin.top);
    let input = layout_grid(input.0, input.1, POOLING_CELL, origin);

    let output_origin = origin.offset(input.width() + SIDE_GUTTER, 0.);
    let output = layout_grid(output.0, output.1, POOLING_CELL, output_origin);

    PoolingPanels { input, output }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    fn overlaps(a: &GridLayout, b: &GridLayout) -> bool {
        let apart_x = a.origin.x + a.width() <= b.origin.x || b.origin.x + b.width() <= a.origin.x;
        let apart_y =
            a.origin.y + a.height() <= b.origin.y || b.origin.y + b.height() <= a.origin.y;
        !(apart_x || apart_y)
    }

    #[test]
    fn cells_step_by_their_size() {
        let grid = layout_grid(2, 3, 40., Point::new(50., 50.));

        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.cells[1][2].top_left, Point::new(130., 90.));
        assert_eq!(grid.cells[1][2].centre, Point::new(150., 110.));
        assert_eq!(grid.title_anchor(), Point::new(110., 40.));
    }

    #[test]
    fn empty_grid_has_no_extent() {
        let grid = layout_grid(0, 0, 40., Point::default());

        assert_eq!(grid.width(), 0.);
        assert_eq!(grid.height(), 0.);
    }

    #[test]
    fn convolution_default_positions() {
        let panels = layout_convolution((4, 4), (2, 2), Some((3, 3)), Margin::default());

        assert_eq!(panels.kernel.origin, Point::new(310., 50.));
        assert_eq!(panels.feature_map.unwrap().origin, Point::new(50., 260.));
    }

    #[test]
    fn convolution_panels_never_overlap() {
        let mut rng = rand::rng();

        for _ in 0..50 {
            let side = rng.random_range(1..10);
            let k = rng.random_range(1..=side);
            let out = side - k + 1;

            let panels =
                layout_convolution((side, side), (k, k), Some((out, out)), Margin::default());
            let feature_map = panels.feature_map.unwrap();

            assert!(!overlaps(&panels.input, &panels.kernel));
            assert!(!overlaps(&panels.input, &feature_map));
            assert!(!overlaps(&panels.kernel, &feature_map));
        }
    }

    #[test]
    fn pooling_output_sits_right_of_the_input() {
        let panels = layout_pooling((4, 4), (2, 2), Margin::default());

        assert_eq!(panels.output.origin, Point::new(350., 50.));
        assert!(!overlaps(&panels.input, &panels.output));
        assert_eq!(panels.output.title_anchor(), Point::new(400., 40.));
    }
}
