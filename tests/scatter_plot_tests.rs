use approx::assert_relative_eq;
use svg_charts::api::{ChartOptions, ScatterKind, ScatterOptions, ScatterPlot};
use svg_charts::core::{TrendLine, XyPoint};
use svg_charts::render::{
    Color, Document, PathCommand, Primitive, RenderSurface, SurfaceElement, SurfaceLayer,
};

fn growth() -> Vec<XyPoint> {
    [(1.0, 5.0), (2.0, 8.0), (3.0, 12.0), (4.0, 15.0), (5.0, 18.0), (6.0, 22.0)]
        .into_iter()
        .map(|(x, y)| XyPoint::new(x, y))
        .collect()
}

fn plot_elements(data: Vec<XyPoint>, options: ChartOptions<ScatterKind>) -> Vec<SurfaceElement> {
    let mut document = Document::new();
    document.create_container("chart");
    let chart = ScatterPlot::mount(&mut document, "#chart", data, options).expect("mount");
    chart
        .surface()
        .snapshot()
        .layer(SurfaceLayer::Plot)
        .elements
        .iter()
        .map(|(_, element)| element.clone())
        .collect()
}

#[test]
fn trend_line_follows_least_squares_fit() {
    let trend = TrendLine::fit(&growth()).expect("fit");
    assert_relative_eq!(trend.slope, 3.371_428_571, epsilon = 1e-6);
    assert_relative_eq!(trend.intercept, 1.533_333_333, epsilon = 1e-6);
}

#[test]
fn trend_line_is_dashed_across_x_extent() {
    let options = ChartOptions::default()
        .with_kind(ScatterOptions::default().with_trend_line(Color::rgb8(0xff, 0x6b, 0x6b)));
    let elements = plot_elements(growth(), options);
    let trend = elements
        .iter()
        .find(|element| element.class.as_deref() == Some("trend-line"))
        .expect("trend line");

    let Primitive::Path(path) = &trend.primitive else {
        panic!("trend line must be a path");
    };
    let stroke = path.stroke.as_ref().expect("stroke");
    assert_eq!(stroke.dash.as_slice(), &[5.0, 5.0]);
    assert_eq!(stroke.width, 2.0);

    let PathCommand::MoveTo(x0, _) = path.commands[0] else {
        panic!("path starts with a move");
    };
    let PathCommand::LineTo(x1, _) = path.commands[1] else {
        panic!("path continues with a line");
    };
    assert_eq!((x0, x1), (60.0, 560.0));
}

#[test]
fn trend_line_needs_two_points() {
    let options = ChartOptions::default().with_kind(ScatterOptions::default().with_trend_line(Color::BLACK));
    let elements = plot_elements(vec![XyPoint::new(1.0, 1.0)], options);
    assert!(
        elements
            .iter()
            .all(|element| element.class.as_deref() != Some("trend-line"))
    );
}

#[test]
fn points_use_configured_size_and_stay_in_plot() {
    let options = ChartOptions::default().with_kind(ScatterOptions::default().with_point_size(9.0));
    let elements = plot_elements(growth(), options);
    let circles: Vec<_> = elements
        .iter()
        .filter_map(|element| match &element.primitive {
            Primitive::Circle(circle) => Some(circle.clone()),
            _ => None,
        })
        .collect();

    assert_eq!(circles.len(), 6);
    for circle in circles {
        assert_eq!(circle.radius, 9.0);
        assert!((60.0..=560.0).contains(&circle.cx));
        assert!((40.0..=340.0).contains(&circle.cy));
    }
}
