use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::types::{CategoryPoint, PlotArea};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarOrientation {
    #[default]
    Vertical,
    Horizontal,
}

/// Deterministic bar rectangle plus the anchor of its value label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label_x: f64,
    pub label_y: f64,
}

/// Largest value in `points`; `None` for an empty slice.
#[must_use]
pub fn max_value(points: &[CategoryPoint]) -> Option<f64> {
    points
        .iter()
        .map(|point| OrderedFloat(point.value))
        .max()
        .map(OrderedFloat::into_inner)
}

/// Projects categories into evenly slotted bars.
///
/// Each category owns `extent / n` pixels along the category axis; the bar
/// fills that slot minus `bar_padding` of it on each side. Bar length is
/// proportional to `value / max(value)`.
#[must_use]
pub fn project_bars(
    points: &[CategoryPoint],
    plot: PlotArea,
    orientation: BarOrientation,
    bar_padding: f64,
) -> Vec<BarGeometry> {
    let Some(max) = max_value(points) else {
        return Vec::new();
    };

    let count = points.len() as f64;
    let fill_ratio = 1.0 - 2.0 * bar_padding;
    points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let index = index as f64;
            let ratio = point.value / max;
            match orientation {
                BarOrientation::Vertical => {
                    let slot = plot.width / count;
                    let height = ratio * plot.height;
                    let y = plot.top + plot.height - height;
                    BarGeometry {
                        x: plot.left + slot * index + slot * bar_padding,
                        y,
                        width: slot * fill_ratio,
                        height,
                        label_x: plot.left + slot * index + slot * 0.5,
                        label_y: y - 5.0,
                    }
                }
                BarOrientation::Horizontal => {
                    let slot = plot.height / count;
                    let width = ratio * plot.width;
                    BarGeometry {
                        x: plot.left,
                        y: plot.top + slot * index + slot * bar_padding,
                        width,
                        height: slot * fill_ratio,
                        label_x: plot.left + width + 5.0,
                        label_y: plot.top + slot * index + slot * 0.5,
                    }
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Margin, Viewport};

    fn sample() -> Vec<CategoryPoint> {
        vec![
            CategoryPoint::new("Jan", 100.0),
            CategoryPoint::new("Feb", 200.0),
        ]
    }

    #[test]
    fn vertical_bars_fill_eighty_percent_of_each_slot() {
        let plot = PlotArea::inset(Viewport::new(600, 400), Margin::PLOT);
        let bars = project_bars(&sample(), plot, BarOrientation::Vertical, 0.1);

        assert_eq!(bars.len(), 2);
        assert!((bars[0].x - 85.0).abs() < 1e-9);
        assert!((bars[0].width - 200.0).abs() < 1e-9);
        assert_eq!(bars[0].height, 150.0);
        assert_eq!(bars[0].y, 190.0);
        assert_eq!(bars[1].height, 300.0);
        assert_eq!(bars[1].y, 40.0);
        assert_eq!(bars[1].label_x, 60.0 + 250.0 + 125.0);
    }

    #[test]
    fn horizontal_bars_grow_from_left_margin() {
        let plot = PlotArea::inset(Viewport::new(600, 400), Margin::PLOT);
        let bars = project_bars(&sample(), plot, BarOrientation::Horizontal, 0.1);

        assert!(bars.iter().all(|bar| bar.x == 60.0));
        assert_eq!(bars[1].width, 500.0);
        assert_eq!(bars[0].width, 250.0);
        assert_eq!(bars[0].label_x, 60.0 + 250.0 + 5.0);
        assert!((bars[0].height - 120.0).abs() < 1e-9);
    }

    #[test]
    fn empty_input_projects_nothing() {
        let plot = PlotArea::inset(Viewport::new(600, 400), Margin::PLOT);
        assert!(project_bars(&[], plot, BarOrientation::Vertical, 0.1).is_empty());
    }
}
