use crate::core::scale::{LinearScale, xy_scales};
use crate::core::types::{PlotArea, XyPoint};

/// Pixel-space polyline for one line series.
#[derive(Debug, Clone, PartialEq)]
pub struct LineGeometry {
    pub points: Vec<(f64, f64)>,
    pub x_scale: LinearScale,
    pub y_scale: LinearScale,
    /// Bottom edge of the plot, where the optional area fill closes.
    pub baseline_y: f64,
}

impl LineGeometry {
    /// Closed outline of the filled area under the line.
    ///
    /// Starts at the baseline below the first point, follows the line and
    /// drops back to the baseline below the last point.
    #[must_use]
    pub fn area_outline(&self) -> Vec<(f64, f64)> {
        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            return Vec::new();
        };
        let mut outline = Vec::with_capacity(self.points.len() + 2);
        outline.push((first.0, self.baseline_y));
        outline.extend(self.points.iter().copied());
        outline.push((last.0, self.baseline_y));
        outline
    }

    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.x_scale.is_degenerate() || self.y_scale.is_degenerate()
    }
}

/// Maps samples point-to-point into `plot` using min/max fitted scales.
///
/// No smoothing is applied. Returns `None` for an empty series.
#[must_use]
pub fn project_line(points: &[XyPoint], plot: PlotArea) -> Option<LineGeometry> {
    let (x_scale, y_scale) = xy_scales(points, plot)?;
    let mapped = points
        .iter()
        .map(|point| (x_scale.map(point.x), y_scale.map(point.y)))
        .collect();
    Some(LineGeometry {
        points: mapped,
        x_scale,
        y_scale,
        baseline_y: plot.bottom(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Margin, Viewport};

    #[test]
    fn extreme_samples_land_on_plot_corners() {
        let plot = PlotArea::inset(Viewport::new(600, 400), Margin::PLOT);
        let series = vec![
            XyPoint::new(1.0, 10.0),
            XyPoint::new(2.0, 20.0),
            XyPoint::new(3.0, 15.0),
        ];
        let line = project_line(&series, plot).expect("non-empty series");

        assert_eq!(line.points[0], (60.0, 340.0));
        assert_eq!(line.points[1], (310.0, 40.0));
        assert_eq!(line.points[2], (560.0, 190.0));
    }

    #[test]
    fn area_outline_closes_on_baseline() {
        let plot = PlotArea::inset(Viewport::new(600, 400), Margin::PLOT);
        let series = vec![XyPoint::new(0.0, 1.0), XyPoint::new(1.0, 2.0)];
        let line = project_line(&series, plot).expect("non-empty series");
        let outline = line.area_outline();

        assert_eq!(outline.first(), Some(&(60.0, 340.0)));
        assert_eq!(outline.last(), Some(&(560.0, 340.0)));
        assert_eq!(outline.len(), 4);
    }
}
