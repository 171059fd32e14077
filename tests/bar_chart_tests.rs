use approx::assert_relative_eq;
use svg_charts::api::{BarChart, BarOptions, ChartOptions};
use svg_charts::core::{BarOrientation, CategoryPoint};
use svg_charts::render::{
    Color, Document, FontWeight, Paint, Primitive, RectPrimitive, RenderSurface, SurfaceElement,
    SurfaceLayer, TextPrimitive,
};

fn sales() -> Vec<CategoryPoint> {
    vec![
        CategoryPoint::new("Jan", 30.0),
        CategoryPoint::new("Feb", 25.0),
        CategoryPoint::new("Mar", 45.0),
    ]
}

fn mounted(options: ChartOptions<svg_charts::api::BarKind>) -> Vec<SurfaceElement> {
    let mut document = Document::new();
    document.create_container("chart");
    let chart = BarChart::mount(&mut document, "#chart", sales(), options).expect("mount");
    chart
        .surface()
        .snapshot()
        .layer(SurfaceLayer::Plot)
        .elements
        .iter()
        .map(|(_, element)| element.clone())
        .collect()
}

fn rects(elements: &[SurfaceElement]) -> Vec<RectPrimitive> {
    elements
        .iter()
        .filter(|element| element.class.as_deref() == Some("bar"))
        .filter_map(|element| match &element.primitive {
            Primitive::Rect(rect) => Some(rect.clone()),
            _ => None,
        })
        .collect()
}

fn texts(elements: &[SurfaceElement], class: &str) -> Vec<TextPrimitive> {
    elements
        .iter()
        .filter(|element| element.class.as_deref() == Some(class))
        .filter_map(|element| match &element.primitive {
            Primitive::Text(text) => Some(text.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn vertical_bars_fill_padded_slots() {
    let bars = rects(&mounted(ChartOptions::default()));
    assert_eq!(bars.len(), 3);

    let slot = 500.0 / 3.0;
    assert_relative_eq!(bars[0].x, 60.0 + slot * 0.1, epsilon = 1e-9);
    assert_relative_eq!(bars[0].width, slot * 0.8, epsilon = 1e-9);
    assert_relative_eq!(bars[1].x, 60.0 + slot * 1.1, epsilon = 1e-9);

    // Tallest value spans the whole plot height.
    assert_relative_eq!(bars[2].height, 300.0, epsilon = 1e-9);
    assert_relative_eq!(bars[2].y, 40.0, epsilon = 1e-9);
    assert_relative_eq!(bars[0].height, 200.0, epsilon = 1e-9);
    assert_relative_eq!(bars[0].y, 140.0, epsilon = 1e-9);
}

#[test]
fn horizontal_bars_grow_from_left_edge() {
    let options = ChartOptions::default()
        .with_kind(BarOptions::default().with_orientation(BarOrientation::Horizontal));
    let bars = rects(&mounted(options));

    assert!(bars.iter().all(|bar| bar.x == 60.0));
    assert_relative_eq!(bars[2].width, 500.0, epsilon = 1e-9);
    assert_relative_eq!(bars[1].width, 500.0 * 25.0 / 45.0, epsilon = 1e-9);
    assert_relative_eq!(bars[0].height, 100.0 * 0.8, epsilon = 1e-9);
}

#[test]
fn bars_take_palette_colors_in_order() {
    let bars = rects(&mounted(ChartOptions::default()));
    assert_eq!(bars[0].fill, Some(Paint::Solid(Color::rgb8(0xff, 0x6b, 0x6b))));
    assert_eq!(bars[1].fill, Some(Paint::Solid(Color::rgb8(0x4e, 0xcd, 0xc4))));

    let explicit = ChartOptions::default().with_colors(vec![Color::BLACK]);
    let bars = rects(&mounted(explicit));
    assert!(bars.iter().all(|bar| bar.fill == Some(Paint::Solid(Color::BLACK))));
}

#[test]
fn value_labels_sit_above_bar_tips() {
    let options = ChartOptions::default().with_kind(BarOptions::default().with_show_values(true));
    let elements = mounted(options);
    let bars = rects(&elements);
    let labels = texts(&elements, "value-label");

    let values: Vec<&str> = labels.iter().map(|label| label.text.as_str()).collect();
    assert_eq!(values, vec!["30", "25", "45"]);
    for (label, bar) in labels.iter().zip(&bars) {
        assert_relative_eq!(label.y, bar.y - 5.0, epsilon = 1e-9);
        assert_relative_eq!(label.x, bar.x + bar.width / 2.0, epsilon = 1e-9);
    }
}

#[test]
fn title_is_centered_above_plot() {
    let elements = mounted(ChartOptions::default().with_title("Quarterly"));
    let titles = texts(&elements, "chart-title");

    assert_eq!(titles.len(), 1);
    assert_eq!(titles[0].text, "Quarterly");
    assert_eq!((titles[0].x, titles[0].y), (310.0, 30.0));
    assert_eq!(titles[0].font_size_px, 16.0);
    assert_eq!(titles[0].font_weight, FontWeight::Bold);
}

#[test]
fn all_zero_values_render_without_error() {
    let mut document = Document::new();
    document.create_container("chart");
    let chart = BarChart::mount(
        &mut document,
        "#chart",
        vec![CategoryPoint::new("a", 0.0), CategoryPoint::new("b", 0.0)],
        ChartOptions::default(),
    )
    .expect("mount");

    let markup = chart.svg_markup().expect("markup");
    assert!(markup.contains("NaN"));
}
