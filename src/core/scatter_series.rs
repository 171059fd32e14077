use serde::{Deserialize, Serialize};

use crate::core::scale::{LinearScale, xy_scales};
use crate::core::types::{PlotArea, XyPoint};

/// Ordinary-least-squares best-fit line `y = slope·x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendLine {
    /// Fits `points` with
    /// `slope = (nΣxy − ΣxΣy) / (nΣx² − (Σx)²)` and
    /// `intercept = (Σy − slope·Σx) / n`.
    ///
    /// Returns `None` below two points. When every `x` is equal the
    /// denominator is zero and the coefficients come out non-finite.
    #[must_use]
    pub fn fit(points: &[XyPoint]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let n = points.len() as f64;
        let (sum_x, sum_y, sum_xy, sum_x2) =
            points
                .iter()
                .fold((0.0, 0.0, 0.0, 0.0), |(sx, sy, sxy, sx2), point| {
                    (
                        sx + point.x,
                        sy + point.y,
                        sxy + point.x * point.y,
                        sx2 + point.x * point.x,
                    )
                });
        let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_x2 - sum_x * sum_x);
        let intercept = (sum_y - slope * sum_x) / n;
        Some(Self { slope, intercept })
    }

    #[must_use]
    pub fn y_at(self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.slope.is_finite() && self.intercept.is_finite()
    }
}

/// Pixel-space scatter markers plus the scales that placed them.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterGeometry {
    pub points: Vec<(f64, f64)>,
    pub x_scale: LinearScale,
    pub y_scale: LinearScale,
}

impl ScatterGeometry {
    /// Endpoints of `trend` across the data's x extent, in pixels.
    #[must_use]
    pub fn trend_segment(&self, trend: TrendLine) -> ((f64, f64), (f64, f64)) {
        let (x_min, x_max) = self.x_scale.domain();
        (
            (self.x_scale.map(x_min), self.y_scale.map(trend.y_at(x_min))),
            (self.x_scale.map(x_max), self.y_scale.map(trend.y_at(x_max))),
        )
    }
}

#[must_use]
pub fn project_scatter(points: &[XyPoint], plot: PlotArea) -> Option<ScatterGeometry> {
    let (x_scale, y_scale) = xy_scales(points, plot)?;
    Some(ScatterGeometry {
        points: points
            .iter()
            .map(|point| (x_scale.map(point.x), y_scale.map(point.y)))
            .collect(),
        x_scale,
        y_scale,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_line_is_recovered() {
        let points: Vec<XyPoint> = (0..5)
            .map(|i| XyPoint::new(f64::from(i), 2.0 * f64::from(i) + 1.0))
            .collect();
        let trend = TrendLine::fit(&points).expect("fit");
        assert!((trend.slope - 2.0).abs() < 1e-12);
        assert!((trend.intercept - 1.0).abs() < 1e-12);
    }

    #[test]
    fn single_point_has_no_trend() {
        assert_eq!(TrendLine::fit(&[XyPoint::new(1.0, 1.0)]), None);
    }

    #[test]
    fn vertical_data_yields_non_finite_trend() {
        let points = vec![XyPoint::new(2.0, 1.0), XyPoint::new(2.0, 5.0)];
        let trend = TrendLine::fit(&points).expect("fit");
        assert!(!trend.is_finite());
    }
}
