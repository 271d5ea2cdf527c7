use iced::{
    mouse,
    widget::canvas::{self, Frame, Path, Stroke},
    Point, Rectangle, Renderer,
};
use tele_core::SeriesSnapshot;
use tele_theme::{ChartStyle, Color};

/// Horizontal grid divisions drawn behind the line.
const GRID_DIVISIONS: u32 = 4;

/// Canvas program drawing one series as a line with point markers.
///
/// The y axis starts at zero and ends at `y_max`; x labels are not drawn,
/// points are spread evenly over the full width.
pub struct LineChart<'a> {
    pub series: &'a SeriesSnapshot,
    pub y_max:  f64,
    pub color:  Color,
    pub style:  ChartStyle,
}

impl<Message> canvas::Program<Message> for LineChart<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let (width, height) = (bounds.width, bounds.height);

        for i in 0..=GRID_DIVISIONS {
            let y = height * i as f32 / GRID_DIVISIONS as f32;
            let line = Path::line(Point::new(0.0, y), Point::new(width, y));
            frame.stroke(
                &line,
                Stroke::default()
                    .with_color(self.style.grid.to_iced())
                    .with_width(1.0),
            );
        }

        let points = plot_points(&self.series.values, self.y_max, width, height);

        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            let area = Path::new(|b| {
                b.move_to(Point::new(first.x, height));
                for p in &points {
                    b.line_to(*p);
                }
                b.line_to(Point::new(last.x, height));
                b.close();
            });
            frame.fill(&area, self.color.with_alpha(0.08).to_iced());
        }

        if points.len() > 1 {
            let line = Path::new(|b| {
                b.move_to(points[0]);
                for p in &points[1..] {
                    b.line_to(*p);
                }
            });
            frame.stroke(
                &line,
                Stroke::default()
                    .with_color(self.color.to_iced())
                    .with_width(self.style.line_width),
            );
        }

        if self.style.point_radius > 0.0 {
            for p in &points {
                frame.fill(
                    &Path::circle(*p, self.style.point_radius),
                    self.color.with_alpha(0.8).to_iced(),
                );
            }
        }

        vec![frame.into_geometry()]
    }
}

/// Map values onto a `width × height` plot: first value at the left edge,
/// last at the right, `0` at the bottom and `y_max` at the top.
///
/// Values outside `[0, y_max]` are clamped to the plot edges.  A single
/// value is drawn in the horizontal centre.
pub fn plot_points(values: &[f64], y_max: f64, width: f32, height: f32) -> Vec<Point> {
    let n = values.len();
    let step = if n > 1 { width / (n - 1) as f32 } else { 0.0 };

    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = if n > 1 { step * i as f32 } else { width / 2.0 };
            let frac = if y_max > 0.0 { (v / y_max).clamp(0.0, 1.0) } else { 0.0 };
            Point::new(x, height - frac as f32 * height)
        })
        .collect()
}
