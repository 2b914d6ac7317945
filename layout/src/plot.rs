use serde::{Deserialize, Serialize};

use crate::geometry::{Canvas, Edge, Margin, Point};

const ARROW_LENGTH: f32 = 50.;
const PLOT_DOMAIN: (f32, f32) = (-2., 2.);
const SAMPLE_STEP: f32 = 0.1;

/// Affine map from a data interval onto a screen interval. The screen interval may be
/// reversed, which is how the y axis points up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f32, f32),
    pub range: (f32, f32),
}

impl LinearScale {
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Self {
        Self { domain, range }
    }

    /// Left to right across the canvas between the margins.
    pub fn horizontal(domain: (f32, f32), canvas: Canvas, margin: Margin) -> Self {
        Self::new(domain, (margin.left, canvas.width - margin.right))
    }

    /// Bottom to top, so larger values are drawn higher.
    pub fn vertical(domain: (f32, f32), canvas: Canvas, margin: Margin) -> Self {
        Self::new(domain, (canvas.height - margin.bottom, margin.top))
    }

    pub fn apply(&self, value: f32) -> f32 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;

        if d0 == d1 {
            return r0;
        }

        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }
}

/// `start, start + step, ...` up to but excluding `stop`. Empty for a non-positive step.
pub fn sample_range(start: f32, stop: f32, step: f32) -> Vec<f32> {
    if step <= 0. || start >= stop {
        return Vec::new();
    }

    let count = ((stop - start) / step).ceil() as usize;
    (0..count).map(|i| start + i as f32 * step).collect()
}

/// The two scales of a plot sharing one canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axes {
    pub x: LinearScale,
    pub y: LinearScale,
}

impl Axes {
    pub fn new(canvas: Canvas, margin: Margin) -> Self {
        Self {
            x: LinearScale::horizontal(PLOT_DOMAIN, canvas, margin),
            y: LinearScale::vertical(PLOT_DOMAIN, canvas, margin),
        }
    }

    pub fn project(&self, x: f32, y: f32) -> Point {
        Point::new(self.x.apply(x), self.y.apply(y))
    }

    /// Horizontal axis through data `y = 0` and vertical axis through data `x = 0`.
    pub fn axis_lines(&self) -> [Edge; 2] {
        let (left, right) = self.x.range;
        let (bottom, top) = self.y.range;
        let (x0, y0) = (self.x.apply(0.), self.y.apply(0.));

        [
            Edge::new(Point::new(left, y0), Point::new(right, y0)),
            Edge::new(Point::new(x0, bottom), Point::new(x0, top)),
        ]
    }

    pub fn curve(&self, samples: &[f32], f: impl Fn(f32) -> f32) -> Vec<Point> {
        samples.iter().map(|&x| self.project(x, f(x))).collect()
    }
}

/// A polyline plot with its axes and the markers placed on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plot {
    pub axes: [Edge; 2],
    pub curves: Vec<Vec<Point>>,
    pub markers: Vec<Point>,
    pub arrows: Vec<Edge>,
}

impl Plot {
    fn new(axes: &Axes) -> Self {
        Self {
            axes: axes.axis_lines(),
            curves: Vec::new(),
            markers: Vec::new(),
            arrows: Vec::new(),
        }
    }
}

/// The sigmoid traced over `[-10, 10)` with the neuron's current operating point.
pub fn activation_plot(input: f32, output: f32, canvas: Canvas, margin: Margin) -> Plot {
    let axes = Axes::new(canvas, margin);
    let mut plot = Plot::new(&axes);

    let samples = sample_range(-10., 10., SAMPLE_STEP);
    plot.curves.push(axes.curve(&samples, |x| 1. / (1. + (-x).exp())));
    plot.markers.push(axes.project(input, output));
    plot
}

/// The loss `w²` with one marker per weight. Once descent has started, each weight also
/// gets a fixed-length arrow pointing along the negative gradient.
pub fn loss_plot(weights: &[f32], step: usize, canvas: Canvas, margin: Margin) -> Plot {
    let axes = Axes::new(canvas, margin);
    let mut plot = Plot::new(&axes);

    let samples = sample_range(PLOT_DOMAIN.0, PLOT_DOMAIN.1, SAMPLE_STEP);
    plot.curves.push(axes.curve(&samples, |w| w * w));

    for &w in weights {
        let at = axes.project(w, w * w);
        plot.markers.push(at);

        if step > 0 {
            let angle = (-2. * w).atan2(1.);
            let tip = at.offset(ARROW_LENGTH * angle.cos(), ARROW_LENGTH * angle.sin());
            plot.arrows.push(Edge::new(at, tip));
        }
    }

    plot
}

/// The three pages of the fundamentals diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fundamentals {
    LinearAlgebra,
    Calculus,
    Probability,
}

pub fn fundamentals_plot(page: Fundamentals, canvas: Canvas, margin: Margin) -> Plot {
    let axes = Axes::new(canvas, margin);
    let mut plot = Plot::new(&axes);
    let samples = sample_range(PLOT_DOMAIN.0, PLOT_DOMAIN.1, SAMPLE_STEP);

    match page {
        Fundamentals::LinearAlgebra => {
            let origin = axes.project(0., 0.);
            plot.arrows = [(1., 0.5), (0.5, 1.)]
                .into_iter()
                .map(|(dx, dy)| Edge::new(origin, axes.project(dx, dy)))
                .collect();
        }
        Fundamentals::Calculus => {
            plot.curves.push(axes.curve(&samples, f32::sin));
            plot.curves.push(axes.curve(&samples, f32::cos));
        }
        Fundamentals::Probability => {
            let norm = (2. * std::f32::consts::PI).sqrt();
            plot.curves.push(axes.curve(&samples, |x| (-x * x / 2.).exp() / norm));
        }
    }

    plot
}
