use svg_charts::api::{ChartOptions, LineChart, LineKind, LineOptions};
use svg_charts::core::XyPoint;
use svg_charts::render::{
    CirclePrimitive, Document, PathCommand, PathPrimitive, Primitive, RenderSurface,
    SurfaceElement, SurfaceLayer,
};

fn plot_elements(data: Vec<XyPoint>, options: ChartOptions<LineKind>) -> Vec<SurfaceElement> {
    let mut document = Document::new();
    document.create_container("chart");
    let chart = LineChart::mount(&mut document, "#chart", data, options).expect("mount");
    chart
        .surface()
        .snapshot()
        .layer(SurfaceLayer::Plot)
        .elements
        .iter()
        .map(|(_, element)| element.clone())
        .collect()
}

fn path(elements: &[SurfaceElement], class: &str) -> Option<PathPrimitive> {
    elements.iter().find_map(|element| match &element.primitive {
        Primitive::Path(path) if element.class.as_deref() == Some(class) => Some(path.clone()),
        _ => None,
    })
}

fn points(elements: &[SurfaceElement]) -> Vec<CirclePrimitive> {
    elements
        .iter()
        .filter_map(|element| match &element.primitive {
            Primitive::Circle(circle) => Some(circle.clone()),
            _ => None,
        })
        .collect()
}

fn diagonal() -> Vec<XyPoint> {
    vec![
        XyPoint::new(0.0, 0.0),
        XyPoint::new(5.0, 2.5),
        XyPoint::new(10.0, 10.0),
    ]
}

#[test]
fn line_maps_extremes_to_plot_corners() {
    let elements = plot_elements(diagonal(), ChartOptions::default());
    let line = path(&elements, "line").expect("line path");

    assert_eq!(line.commands[0], PathCommand::MoveTo(60.0, 340.0));
    assert_eq!(line.commands[1], PathCommand::LineTo(310.0, 265.0));
    assert_eq!(line.commands[2], PathCommand::LineTo(560.0, 40.0));
    assert_eq!(line.stroke.expect("stroke").width, 2.0);
}

#[test]
fn markers_are_drawn_by_default() {
    let elements = plot_elements(diagonal(), ChartOptions::default());
    let markers = points(&elements);

    assert_eq!(markers.len(), 3);
    assert!(markers.iter().all(|marker| marker.radius == 4.0));

    let hidden = ChartOptions::default().with_kind(LineOptions::default().with_show_points(false));
    assert!(points(&plot_elements(diagonal(), hidden)).is_empty());
}

#[test]
fn area_closes_to_plot_bottom() {
    let options = ChartOptions::default().with_kind(LineOptions::default().with_show_area(true));
    let elements = plot_elements(diagonal(), options);
    let area = path(&elements, "area").expect("area path");

    assert_eq!(area.fill_opacity, 0.3);
    assert_eq!(area.commands.last(), Some(&PathCommand::Close));
    assert!(area.commands.contains(&PathCommand::LineTo(560.0, 340.0)));
    // Area is painted beneath the line.
    let area_index = elements
        .iter()
        .position(|element| element.class.as_deref() == Some("area"));
    let line_index = elements
        .iter()
        .position(|element| element.class.as_deref() == Some("line"));
    assert!(area_index < line_index);
}

#[test]
fn single_point_yields_non_finite_coordinates() {
    let elements = plot_elements(vec![XyPoint::new(3.0, 3.0)], ChartOptions::default());
    let markers = points(&elements);

    assert_eq!(markers.len(), 1);
    assert!(!markers[0].cx.is_finite());
}

#[test]
fn empty_series_draws_nothing() {
    let elements = plot_elements(Vec::new(), ChartOptions::default().with_title("Empty"));
    assert!(elements.is_empty());
}
