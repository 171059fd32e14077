use crate::core::types::{PlotArea, XyPoint};

/// Affine mapping from a data domain onto a pixel range.
///
/// The mapping is intentionally unguarded: a zero-width domain yields
/// non-finite pixels, which callers can detect through `is_degenerate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        }
    }

    /// Builds a scale spanning the min/max of `values`; `None` when empty.
    pub fn from_values(values: impl IntoIterator<Item = f64>, range: (f64, f64)) -> Option<Self> {
        extent(values).map(|domain| Self::new(domain, range))
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        let span = self.domain_end - self.domain_start;
        span == 0.0 || !span.is_finite()
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let normalized = (pixel - self.range_start) / (self.range_end - self.range_start);
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }
}

/// Minimum and maximum of `values`; `None` for an empty input.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |acc, value| match acc {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    })
}

/// Horizontal and vertical scales fitting `points` into `plot`.
///
/// The vertical range is flipped so larger values sit higher on screen.
#[must_use]
pub fn xy_scales(points: &[XyPoint], plot: PlotArea) -> Option<(LinearScale, LinearScale)> {
    let x_scale = LinearScale::from_values(points.iter().map(|p| p.x), (plot.left, plot.right()))?;
    let y_scale = LinearScale::from_values(points.iter().map(|p| p.y), (plot.bottom(), plot.top))?;
    Some((x_scale, y_scale))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_and_invert_round_trip() {
        let scale = LinearScale::new((10.0, 110.0), (60.0, 560.0));
        let px = scale.map(42.5);
        assert!((scale.invert(px) - 42.5).abs() <= 1e-9);
        assert_eq!(scale.map(10.0), 60.0);
        assert_eq!(scale.map(110.0), 560.0);
    }

    #[test]
    fn zero_width_domain_is_degenerate_and_non_finite() {
        let scale = LinearScale::new((3.0, 3.0), (0.0, 100.0));
        assert!(scale.is_degenerate());
        assert!(!scale.map(3.0).is_finite());
    }

    #[test]
    fn extent_of_empty_input_is_none() {
        assert_eq!(extent(std::iter::empty()), None);
        assert_eq!(extent([4.0, -1.0, 9.0]), Some((-1.0, 9.0)));
    }
}
