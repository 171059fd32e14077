use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::core::types::CategoryPoint;

/// Radius ratio at which slice labels are anchored.
pub const LABEL_RADIUS_RATIO: f64 = 0.7;
/// Radius ratio at which percentage captions are anchored.
pub const PERCENTAGE_RADIUS_RATIO: f64 = 0.5;

/// Angular geometry of one pie slice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliceGeometry {
    pub start_angle: f64,
    pub end_angle: f64,
    /// Share of the total in `0..=1` for non-negative inputs.
    pub fraction: f64,
    pub label_anchor: (f64, f64),
    pub percentage_anchor: (f64, f64),
}

impl SliceGeometry {
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    #[must_use]
    pub fn large_arc(&self) -> bool {
        self.sweep() > PI
    }

    #[must_use]
    pub fn percentage_text(&self) -> String {
        format!("{:.1}%", self.fraction * 100.0)
    }
}

/// Sum of all slice values.
#[must_use]
pub fn total_value(points: &[CategoryPoint]) -> f64 {
    points.iter().map(|point| point.value).sum()
}

/// Lays slices out sequentially from angle `0`, each sweeping
/// `2π × value / total`.
///
/// Values are not validated; negative entries produce negative sweeps.
#[must_use]
pub fn project_slices(
    points: &[CategoryPoint],
    center: (f64, f64),
    outer_radius: f64,
) -> Vec<SliceGeometry> {
    let total = total_value(points);
    let anchor = |angle: f64, radius: f64| {
        (
            center.0 + angle.cos() * radius,
            center.1 + angle.sin() * radius,
        )
    };

    let mut current_angle = 0.0;
    points
        .iter()
        .map(|point| {
            let fraction = point.value / total;
            let sweep = fraction * TAU;
            let start_angle = current_angle;
            let end_angle = current_angle + sweep;
            let mid = start_angle + sweep / 2.0;
            current_angle = end_angle;
            SliceGeometry {
                start_angle,
                end_angle,
                fraction,
                label_anchor: anchor(mid, outer_radius * LABEL_RADIUS_RATIO),
                percentage_anchor: anchor(mid, outer_radius * PERCENTAGE_RADIUS_RATIO),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_cover_the_full_circle() {
        let points = vec![
            CategoryPoint::new("Red", 30.0),
            CategoryPoint::new("Blue", 25.0),
            CategoryPoint::new("Green", 45.0),
        ];
        let slices = project_slices(&points, (300.0, 200.0), 150.0);
        let degrees: Vec<f64> = slices.iter().map(|s| s.sweep().to_degrees()).collect();

        assert!((degrees[0] - 108.0).abs() < 1e-9);
        assert!((degrees[1] - 90.0).abs() < 1e-9);
        assert!((degrees[2] - 162.0).abs() < 1e-9);
        assert!((slices[2].end_angle - TAU).abs() < 1e-12);
        assert!(!slices[0].large_arc());
        assert_eq!(slices[2].percentage_text(), "45.0%");
    }

    #[test]
    fn dominant_slice_uses_large_arc() {
        let points = vec![CategoryPoint::new("a", 3.0), CategoryPoint::new("b", 1.0)];
        let slices = project_slices(&points, (0.0, 0.0), 10.0);
        assert!(slices[0].large_arc());
        assert!(!slices[1].large_arc());
    }
}
