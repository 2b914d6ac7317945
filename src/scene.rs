use layout::{
    Canvas, Edge, Margin, Point, format_value,
    grid::{GridLayout, layout_convolution, layout_pooling},
    layout_layered_network,
    plot::{Fundamentals, Plot, activation_plot, fundamentals_plot, loss_plot},
    timeline::{GATE_RADIUS, NODE_RADIUS, layout_gated, layout_recurrent},
};
use numeric::Grid;
use serde::Serialize;
use simulation::{SimulationState, Snapshot, Values};

use crate::config::{NeuronConfig, Visualization};

const NETWORK_NODE_RADIUS: f32 = 20.;
const MARKER_RADIUS: f32 = 6.;

/// What a shape stands for. The renderer picks the colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Neutral,
    Active,
    Inactive,
    Positive,
    Negative,
    Accent,
}

impl Tone {
    fn of_sign(value: f32) -> Self {
        if value > 0. {
            Tone::Positive
        } else if value < 0. {
            Tone::Negative
        } else {
            Tone::Neutral
        }
    }

    fn of_activity(active: bool) -> Self {
        if active { Tone::Active } else { Tone::Inactive }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circle {
    pub centre: Point,
    pub radius: f32,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub from: Point,
    pub to: Point,
    /// Drawn with an arrow head at `to`.
    pub arrow: bool,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rect {
    pub top_left: Point,
    pub width: f32,
    pub height: f32,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    pub at: Point,
    pub text: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub tone: Tone,
}

/// A whole diagram as plain shapes, ready for any drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub title: String,
    pub canvas: Canvas,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<Snapshot>,
    pub circles: Vec<Circle>,
    pub lines: Vec<Line>,
    pub rects: Vec<Rect>,
    pub texts: Vec<Text>,
    pub polylines: Vec<Polyline>,
}

impl Scene {
    fn new(title: impl Into<String>, canvas: Canvas) -> Self {
        Self {
            title: title.into(),
            canvas,
            snapshot: None,
            circles: Vec::new(),
            lines: Vec::new(),
            rects: Vec::new(),
            texts: Vec::new(),
            polylines: Vec::new(),
        }
    }

    /// Draws any visualization, on `canvas` if given or on its own default canvas.
    pub fn build(visualization: &Visualization, canvas: Option<Canvas>, precision: usize) -> Self {
        match visualization {
            Visualization::Neuron(neuron) => Self::neuron(neuron, canvas, precision),
            Visualization::Fundamentals(page) => Self::fundamentals(*page, canvas),
            Visualization::Simulation(state) => Self::simulation(state, canvas, precision),
        }
    }

    pub fn neuron(neuron: &NeuronConfig, canvas: Option<Canvas>, precision: usize) -> Self {
        let canvas = canvas.unwrap_or(Canvas::NEURON);
        let output = neuron.output();
        let mut scene = Self::new(
            format!("Neuron output {}", format_value(output, precision)),
            canvas,
        );

        let plot = activation_plot(neuron.input, output, canvas, Margin::NEURON);
        scene.plot(&plot, Tone::Active);
        scene
    }

    pub fn fundamentals(page: Fundamentals, canvas: Option<Canvas>) -> Self {
        let canvas = canvas.unwrap_or(Canvas::FUNDAMENTALS);
        let title = match page {
            Fundamentals::LinearAlgebra => "Vectors",
            Fundamentals::Calculus => "sin(x) and its derivative cos(x)",
            Fundamentals::Probability => "Standard normal density",
        };
        let mut scene = Self::new(title, canvas);

        let plot = fundamentals_plot(page, canvas, Margin::default());
        scene.plot(&plot, Tone::Active);
        // the derivative and the second vector stand out from the first
        if let Some(second) = scene.polylines.get_mut(1) {
            second.tone = Tone::Accent;
        }
        if let Some(second) = scene.lines.iter_mut().filter(|l| l.arrow).nth(1) {
            second.tone = Tone::Accent;
        }
        scene
    }

    pub fn simulation(state: &SimulationState, canvas: Option<Canvas>, precision: usize) -> Self {
        let snapshot = state.snapshot();
        let margin = Margin::default();
        let label = |v: f32| format_value(v, precision);

        let mut scene = match &snapshot.values {
            Values::FeedForward { layers, weight } => {
                let canvas = canvas.unwrap_or(Canvas::NETWORK);
                let mut scene = Self::new(
                    format!("Feed-forward network, shared weight {}", label(*weight)),
                    canvas,
                );
                scene.network(layers, canvas, margin, &label);
                scene
            }
            Values::GradientDescent {
                weights,
                learning_rate,
                error,
                ..
            } => {
                let canvas = canvas.unwrap_or(Canvas::LOSS);
                let mut scene = Self::new(
                    format!(
                        "Loss L(w) = Σ wᵢ², error {}, learning rate {}",
                        label(*error),
                        label(*learning_rate)
                    ),
                    canvas,
                );

                let plot = loss_plot(weights, snapshot.step, canvas, margin);
                scene.plot(&plot, Tone::Active);
                for (i, (marker, w)) in plot.markers.iter().zip(weights).enumerate() {
                    scene.text(
                        marker.offset(0., -10.),
                        format!("w{}: {}", i + 1, label(*w)),
                        Tone::Neutral,
                    );
                }
                scene.text(
                    Point::new(canvas.width / 2., canvas.height - margin.bottom + 30.),
                    "Weight Value",
                    Tone::Neutral,
                );
                scene
            }
            Values::Convolution {
                padded_input,
                kernel,
                padding,
                stride,
                feature_map,
            } => {
                let canvas = canvas.unwrap_or(Canvas::CONVOLUTION);
                let mut scene = Self::new(
                    format!("Convolution, padding {padding}, stride {stride}"),
                    canvas,
                );

                let panels = layout_convolution(
                    dims(padded_input),
                    dims(kernel),
                    feature_map.as_ref().map(dims),
                    margin,
                );

                scene.panel("Input Image", &panels.input, padded_input, |v| {
                    let tone = if v == 0. {
                        Tone::Inactive
                    } else if v == 1. {
                        Tone::Active
                    } else {
                        Tone::Accent
                    };
                    // empty cells, padding included, carry no label
                    let text = if v == 0. { String::new() } else { label(v) };
                    (tone, text)
                });
                scene.panel("Kernel", &panels.kernel, kernel, |v| (Tone::of_sign(v), label(v)));

                if let (Some(layout), Some(grid)) = (&panels.feature_map, feature_map) {
                    scene.panel("Feature Map", layout, grid, |v| (Tone::Accent, label(v)));
                }
                scene
            }
            Values::Pooling {
                input,
                window_size,
                stride,
                output,
            } => {
                let canvas = canvas.unwrap_or(Canvas::POOLING);
                let mut scene = Self::new(
                    format!("Max pooling, window {window_size}, stride {stride}"),
                    canvas,
                );

                let panels = layout_pooling(dims(input), dims(output), margin);
                scene.panel("Input", &panels.input, input, |v| (Tone::Active, label(v)));
                scene.panel("Output", &panels.output, output, |v| (Tone::Accent, label(v)));
                scene
            }
            Values::Recurrent { sequence, hidden } => {
                let canvas = canvas.unwrap_or(Canvas::RECURRENT);
                let mut scene = Self::new("Recurrent network unrolled in time", canvas);
                let diagram = layout_recurrent(sequence.len(), snapshot.step, canvas, margin);

                for (centre, digit) in diagram.inputs.iter().zip(sequence.chars()) {
                    scene.node(*centre, NODE_RADIUS, Tone::Active, digit.to_string());
                }
                for node in &diagram.hidden {
                    let text = if node.active { label(*hidden) } else { String::new() };
                    scene.node(node.centre, NODE_RADIUS, Tone::of_activity(node.active), text);
                }
                for edge in diagram.input_edges.iter().chain(&diagram.recurrent_edges) {
                    scene.line(*edge, true, Tone::Neutral);
                }

                scene.text(diagram.input_label, "Input Sequence", Tone::Neutral);
                scene.text(diagram.hidden_label, "Hidden States", Tone::Neutral);
                scene
            }
            Values::Gated {
                sequence,
                cell,
                hidden,
            } => {
                let canvas = canvas.unwrap_or(Canvas::GATED);
                let mut scene = Self::new("LSTM unrolled in time", canvas);
                let diagram = layout_gated(sequence.len(), snapshot.step, canvas, margin);

                for (centre, digit) in diagram.inputs.iter().zip(sequence.chars()) {
                    scene.node(*centre, NODE_RADIUS, Tone::Active, digit.to_string());
                }
                for cell_box in &diagram.cells {
                    let tone = Tone::of_activity(cell_box.active);
                    scene.rects.push(Rect {
                        top_left: cell_box.top_left,
                        width: cell_box.width,
                        height: cell_box.height,
                        tone,
                    });
                    for gate in &cell_box.gates {
                        scene.node(gate.centre, GATE_RADIUS, tone, gate.name.to_string());
                    }
                    if cell_box.active {
                        scene.text(
                            cell_box.cell_label,
                            format!("c: {}", label(*cell)),
                            Tone::Neutral,
                        );
                        scene.text(
                            cell_box.hidden_label,
                            format!("h: {}", label(*hidden)),
                            Tone::Neutral,
                        );
                    }
                }
                for edge in diagram.cell_edges.iter().chain(&diagram.input_edges) {
                    scene.line(*edge, true, Tone::Neutral);
                }
                scene.text(diagram.input_label, "Input Sequence", Tone::Neutral);
                scene.text(diagram.cells_label, "LSTM Cells", Tone::Neutral);
                scene
            }
        };

        scene.snapshot = Some(snapshot);
        scene
    }

    fn network(
        &mut self,
        layers: &[Vec<f32>],
        canvas: Canvas,
        margin: Margin,
        label: &dyn Fn(f32) -> String,
    ) {
        let sizes: Vec<usize> = layers.iter().map(Vec::len).collect();
        let layout = layout_layered_network(&sizes, canvas, margin);

        for edge in &layout.edges {
            self.line(*edge, false, Tone::Neutral);
        }

        for (nodes, values) in layout.layers.iter().zip(layers) {
            for (centre, &v) in nodes.iter().zip(values) {
                let tone = Tone::of_activity(v != 0.);
                self.node(*centre, NETWORK_NODE_RADIUS, tone, label(v));
            }
        }

        let last = layers.len().saturating_sub(1);
        for (l, anchor) in layout.heading_anchors(margin).into_iter().enumerate() {
            let heading = match l {
                0 => "Input Layer",
                l if l == last => "Output Layer",
                _ => "Hidden Layer",
            };
            self.text(anchor, heading, Tone::Neutral);
        }
    }

    /// Axes, curves, markers and arrows of a plot. The first curve gets `tone`.
    fn plot(&mut self, plot: &Plot, tone: Tone) {
        for axis in &plot.axes {
            self.line(*axis, false, Tone::Neutral);
        }
        for curve in &plot.curves {
            self.polylines.push(Polyline {
                points: curve.clone(),
                tone,
            });
        }
        for marker in &plot.markers {
            self.circles.push(Circle {
                centre: *marker,
                radius: MARKER_RADIUS,
                tone: Tone::Accent,
            });
        }
        for arrow in &plot.arrows {
            self.line(*arrow, true, tone);
        }
    }

    fn panel(
        &mut self,
        title: &str,
        layout: &GridLayout,
        grid: &Grid,
        style: impl Fn(f32) -> (Tone, String),
    ) {
        for (cells, values) in layout.cells.iter().zip(grid.iter_rows()) {
            for (cell, v) in cells.iter().zip(values) {
                let (tone, text) = style(v);
                self.rects.push(Rect {
                    top_left: cell.top_left,
                    width: layout.cell_size,
                    height: layout.cell_size,
                    tone,
                });
                if !text.is_empty() {
                    self.text(cell.centre, text, Tone::Neutral);
                }
            }
        }

        self.text(layout.title_anchor(), title, Tone::Neutral);
    }

    fn node(&mut self, centre: Point, radius: f32, tone: Tone, text: String) {
        self.circles.push(Circle {
            centre,
            radius,
            tone,
        });
        if !text.is_empty() {
            self.text(centre, text, Tone::Neutral);
        }
    }

    fn line(&mut self, edge: Edge, arrow: bool, tone: Tone) {
        self.lines.push(Line {
            from: edge.from,
            to: edge.to,
            arrow,
            tone,
        });
    }

    fn text(&mut self, at: Point, text: impl Into<String>, tone: Tone) {
        self.texts.push(Text {
            at,
            text: text.into(),
            tone,
        });
    }
}

fn dims(grid: &Grid) -> (usize, usize) {
    (grid.rows(), grid.cols())
}
