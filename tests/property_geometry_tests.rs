use std::f64::consts::TAU;

use proptest::prelude::*;
use svg_charts::core::{
    BarOrientation, CategoryPoint, Margin, PlotArea, Viewport, XyPoint, project_bars,
    project_line, project_scatter, project_slices,
};
use svg_charts::flow::layout::{FlowLayout, NODE_HEIGHT, NODE_WIDTH};
use svg_charts::flow::{FlowDiagramConfig, FlowNode, NodeKind, calculate_flow_width};
use svg_charts::render::Color;

const EPSILON: f64 = 1e-6;

fn plot() -> PlotArea {
    PlotArea::inset(Viewport::new(600, 400), Margin::PLOT)
}

fn inside(plot: PlotArea, (x, y): (f64, f64)) -> bool {
    x >= plot.left - EPSILON
        && x <= plot.right() + EPSILON
        && y >= plot.top - EPSILON
        && y <= plot.bottom() + EPSILON
}

proptest! {
    #[test]
    fn vertical_bars_stay_inside_plot(values in prop::collection::vec(0.1f64..10_000.0, 1..32)) {
        let plot = plot();
        let points: Vec<_> = values
            .iter()
            .enumerate()
            .map(|(index, value)| CategoryPoint::new(format!("c{index}"), *value))
            .collect();

        let bars = project_bars(&points, plot, BarOrientation::Vertical, 0.1);
        prop_assert_eq!(bars.len(), points.len());
        for bar in &bars {
            prop_assert!(inside(plot, (bar.x, bar.y)));
            prop_assert!(inside(plot, (bar.x + bar.width, bar.y + bar.height)));
            prop_assert!((bar.y + bar.height - plot.bottom()).abs() <= EPSILON);
        }
        let tallest = bars.iter().map(|bar| bar.height).fold(0.0, f64::max);
        prop_assert!((tallest - plot.height).abs() <= EPSILON);
    }

    #[test]
    fn horizontal_bars_start_on_left_edge(values in prop::collection::vec(0.1f64..10_000.0, 1..32)) {
        let plot = plot();
        let points: Vec<_> = values.iter().map(|value| CategoryPoint::new("c", *value)).collect();

        for bar in project_bars(&points, plot, BarOrientation::Horizontal, 0.1) {
            prop_assert_eq!(bar.x, plot.left);
            prop_assert!(bar.x + bar.width <= plot.right() + EPSILON);
            prop_assert!(inside(plot, (bar.x, bar.y + bar.height)));
        }
    }

    #[test]
    fn non_degenerate_line_and_scatter_stay_inside_plot(
        samples in prop::collection::vec((-1_000.0f64..1_000.0, -1_000.0f64..1_000.0), 2..48)
    ) {
        let xs_spread = samples.iter().any(|(x, _)| (x - samples[0].0).abs() > 1e-3);
        let ys_spread = samples.iter().any(|(_, y)| (y - samples[0].1).abs() > 1e-3);
        prop_assume!(xs_spread && ys_spread);

        let plot = plot();
        let points: Vec<_> = samples.iter().map(|(x, y)| XyPoint::new(*x, *y)).collect();

        let line = project_line(&points, plot).expect("non-empty series");
        for point in &line.points {
            prop_assert!(inside(plot, *point));
        }
        let scatter = project_scatter(&points, plot).expect("non-empty series");
        for point in &scatter.points {
            prop_assert!(inside(plot, *point));
        }
    }

    #[test]
    fn pie_sweeps_cover_full_circle(values in prop::collection::vec(0.01f64..1_000.0, 1..24)) {
        let points: Vec<_> = values.iter().map(|value| CategoryPoint::new("s", *value)).collect();
        let slices = project_slices(&points, (300.0, 200.0), 150.0);

        let total: f64 = slices.iter().map(|slice| slice.end_angle - slice.start_angle).sum();
        prop_assert!((total - TAU).abs() <= 1e-9);
        prop_assert_eq!(slices[0].start_angle, 0.0);
        for pair in slices.windows(2) {
            prop_assert_eq!(pair[0].end_angle, pair[1].start_angle);
        }
    }

    #[test]
    fn flow_width_stays_within_configured_range(
        value in 0.0f64..1_000_000.0,
        extra in 0.0f64..1_000_000.0
    ) {
        let settings = FlowDiagramConfig::default().flow_width_settings();
        let width = calculate_flow_width(value, value + extra + 1.0, settings);
        prop_assert!(width >= settings.min - EPSILON);
        prop_assert!(width <= settings.min + settings.max + EPSILON);
    }

    #[test]
    fn column_stacks_are_centered(count in 1usize..8) {
        let layout = FlowLayout::new(Viewport::new(1200, 600), Margin::new(80.0, 50.0, 50.0, 50.0));
        let mut nodes: Vec<_> = (0..count)
            .map(|index| FlowNode::new(format!("n{index}"), "n", 1.0, NodeKind::Middle, Color::WHITE))
            .collect();
        layout.arrange(&mut nodes);

        let top = nodes[0].y;
        let bottom = nodes[count - 1].y + NODE_HEIGHT;
        prop_assert!(((top + bottom) / 2.0 - layout.inner_height / 2.0).abs() <= EPSILON);
        for node in &nodes {
            prop_assert!((node.x + NODE_WIDTH / 2.0 - layout.inner_width / 2.0).abs() <= EPSILON);
        }
    }
}
