// SPDX-License-Identifier: MPL-2.0
//! Canvas programs that draw the trend charts.
//!
//! The backend ships plain label/value series; these programs render them as
//! bar or line charts. Axis handling is deliberately simple: a zero
//! baseline, the series maximum as the top, and thinned x labels when the
//! series is dense (24 hourly points).

use iced::widget::canvas::{self, Frame, Path, Stroke, Text};
use iced::{mouse, Color, Point, Rectangle, Theme};

/// Left/bottom gutter reserved for labels.
const MARGIN: f32 = 28.0;
/// Vertical gap above the tallest bar/point.
const HEADROOM: f32 = 0.08;
const LABEL_SIZE: f32 = 11.0;

/// Shared scaling math for both chart kinds.
struct Plot {
    origin: Point,
    width: f32,
    height: f32,
    max_value: f32,
}

impl Plot {
    fn new(bounds: Rectangle, values: &[f64]) -> Self {
        let max_value = values.iter().copied().fold(0.0f64, f64::max) as f32;
        Self {
            origin: Point::new(MARGIN, bounds.height - MARGIN),
            width: (bounds.width - MARGIN * 1.5).max(1.0),
            height: (bounds.height - MARGIN * 1.5).max(1.0),
            max_value: if max_value <= 0.0 { 1.0 } else { max_value },
        }
    }

    /// Y coordinate for a value, with headroom above the maximum.
    fn y(&self, value: f64) -> f32 {
        let scaled = (value as f32 / self.max_value).clamp(0.0, 1.0);
        self.origin.y - scaled * self.height * (1.0 - HEADROOM)
    }

    /// Center X of slot `i` out of `n`.
    fn slot_center(&self, i: usize, n: usize) -> f32 {
        let slot = self.width / n.max(1) as f32;
        self.origin.x + slot * (i as f32 + 0.5)
    }
}

/// Label step so dense series stay readable.
fn label_step(n: usize) -> usize {
    match n {
        0..=8 => 1,
        9..=16 => 2,
        _ => 4,
    }
}

fn draw_axes(frame: &mut Frame, plot: &Plot, theme: &Theme) {
    let axis_color = theme.extended_palette().background.strong.color;
    let x_axis = Path::line(
        plot.origin,
        Point::new(plot.origin.x + plot.width, plot.origin.y),
    );
    let y_axis = Path::line(
        plot.origin,
        Point::new(plot.origin.x, plot.origin.y - plot.height),
    );
    let stroke = Stroke::default().with_width(1.0).with_color(axis_color);
    frame.stroke(&x_axis, stroke.clone());
    frame.stroke(&y_axis, stroke);

    // Top-of-scale figure on the y axis.
    frame.fill_text(Text {
        content: format!("{}", plot.max_value.round() as i64),
        position: Point::new(2.0, plot.origin.y - plot.height),
        color: axis_color,
        size: LABEL_SIZE.into(),
        ..Text::default()
    });
}

fn draw_labels(frame: &mut Frame, plot: &Plot, labels: &[String], theme: &Theme) {
    let color = theme.extended_palette().background.strong.color;
    let step = label_step(labels.len());
    for (i, label) in labels.iter().enumerate() {
        if i % step != 0 {
            continue;
        }
        frame.fill_text(Text {
            content: label.clone(),
            position: Point::new(
                plot.slot_center(i, labels.len()) - LABEL_SIZE / 2.0,
                plot.origin.y + 6.0,
            ),
            color,
            size: LABEL_SIZE.into(),
            ..Text::default()
        });
    }
}

/// Vertical bars, one per label. Owns its series so views can derive labels
/// on the fly without tying the canvas to a temporary.
pub struct BarChart {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub color: Color,
}

impl<Message> canvas::Program<Message> for BarChart {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        if self.values.is_empty() {
            return vec![frame.into_geometry()];
        }

        let plot = Plot::new(bounds, &self.values);
        draw_axes(&mut frame, &plot, theme);

        let n = self.values.len();
        let slot = plot.width / n as f32;
        let bar_width = (slot * 0.7).max(1.0);

        for (i, value) in self.values.iter().enumerate() {
            let top = plot.y(*value);
            let x = plot.slot_center(i, n) - bar_width / 2.0;
            let bar = Path::rectangle(
                Point::new(x, top),
                iced::Size::new(bar_width, plot.origin.y - top),
            );
            frame.fill(&bar, self.color);
        }

        draw_labels(&mut frame, &plot, &self.labels, theme);
        vec![frame.into_geometry()]
    }
}

/// Connected points, one per label.
pub struct LineChart {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub color: Color,
}

impl<Message> canvas::Program<Message> for LineChart {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        if self.values.is_empty() {
            return vec![frame.into_geometry()];
        }

        let plot = Plot::new(bounds, &self.values);
        draw_axes(&mut frame, &plot, theme);

        let n = self.values.len();
        let points: Vec<Point> = self
            .values
            .iter()
            .enumerate()
            .map(|(i, value)| Point::new(plot.slot_center(i, n), plot.y(*value)))
            .collect();

        if points.len() > 1 {
            let line = Path::new(|builder| {
                builder.move_to(points[0]);
                for point in &points[1..] {
                    builder.line_to(*point);
                }
            });
            frame.stroke(
                &line,
                Stroke::default().with_width(2.0).with_color(self.color),
            );
        }

        for point in &points {
            let dot = Path::circle(*point, 3.0);
            frame.fill(&dot, self.color);
        }

        draw_labels(&mut frame, &plot, &self.labels, theme);
        vec![frame.into_geometry()]
    }
}
