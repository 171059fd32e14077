use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use svg_charts::ChartError;
use svg_charts::flow::layout::{NODE_HEIGHT, NODE_WIDTH};
use svg_charts::flow::{
    FlowData, FlowDiagram, FlowDiagramConfig, FlowLink, FlowNode, FlowStatistics, NodeKind,
};
use svg_charts::interaction::{InteractionMode, MAX_ZOOM, MIN_ZOOM};
use svg_charts::render::{
    Color, Document, HitRole, PathCommand, Primitive, RenderSurface, SurfaceLayer, Transform,
};

fn shop_flow() -> FlowData {
    FlowData::new(
        vec![
            FlowNode::new("ads", "Ads", 600_000.0, NodeKind::Source, Color::rgb8(0x63, 0x66, 0xf1)),
            FlowNode::new("social", "Social", 400_000.0, NodeKind::Source, Color::rgb8(0x8b, 0x5c, 0xf6)),
            FlowNode::new("store", "Store", 1_000_000.0, NodeKind::Middle, Color::rgb8(0xa8, 0x55, 0xf7)),
            FlowNode::new("orders", "Orders", 400_000.0, NodeKind::Target, Color::rgb8(0x22, 0xc5, 0x5e)),
        ],
        vec![
            FlowLink::new("ads", "store", 200_000.0),
            FlowLink::new("social", "store", 400_000.0),
            FlowLink::new("store", "orders", 400_000.0),
            FlowLink::new("ads", "ghost", 1.0),
        ],
    )
}

fn mount(config: FlowDiagramConfig) -> (Document, FlowDiagram) {
    let mut document = Document::new();
    document.create_container("flow");
    let diagram = FlowDiagram::mount(&mut document, "#flow", shop_flow(), config).expect("mount");
    (document, diagram)
}

fn link_stroke_opacity(diagram: &FlowDiagram, index: usize) -> f64 {
    let id = diagram.link_element(index).expect("link drawn");
    let element = diagram.surface().element(id).expect("link element");
    let Primitive::Path(path) = element.primitive else {
        panic!("link must be a path");
    };
    path.stroke.expect("link stroke").opacity
}

#[test]
fn nodes_are_laid_out_in_centered_columns() {
    let (_, diagram) = mount(FlowDiagramConfig::default());
    let nodes = &diagram.data().nodes;

    // Inner box is 1100×470; its vertical mid-line is y = 235.
    assert_eq!((nodes[0].x, nodes[0].y), (80.0, 135.0));
    assert_eq!((nodes[1].x, nodes[1].y), (80.0, 255.0));
    assert_eq!((nodes[2].x, nodes[2].y), (460.0, 195.0));
    assert_eq!((nodes[3].x, nodes[3].y), (840.0, 195.0));
}

#[test]
fn dangling_link_is_skipped_and_reported() {
    let (_, diagram) = mount(FlowDiagramConfig::default());
    let report = diagram.link_report();

    assert_eq!(report.drawn, 3);
    assert_eq!(report.skipped, vec![3]);
    assert!(diagram.link_element(3).is_none());
    assert!(diagram.link_element(2).is_some());
}

#[test]
fn link_widths_scale_with_value() {
    let (_, diagram) = mount(FlowDiagramConfig::default());
    assert_eq!(diagram.link_width(0), Some(14.0));
    assert_eq!(diagram.link_width(1), Some(24.0));

    let (_, custom) = mount(FlowDiagramConfig::default().with_custom_flow_width(10.0));
    assert_eq!(custom.link_width(0), Some(10.0));
    assert_eq!(custom.link_width(1), Some(10.0));
}

#[test]
fn links_run_from_source_outlet_to_target_inlet() {
    let (_, diagram) = mount(FlowDiagramConfig::default());
    let id = diagram.link_element(0).expect("link");
    let Primitive::Path(path) = diagram.surface().element(id).expect("element").primitive else {
        panic!("link must be a path");
    };

    // Margins shift layout coordinates by (50, 80).
    assert_eq!(path.commands[0], PathCommand::MoveTo(310.0, 255.0));
    assert_eq!(
        path.commands[1],
        PathCommand::CubicTo {
            c1: (410.0, 255.0),
            c2: (410.0, 315.0),
            to: (510.0, 315.0),
        }
    );
    assert_eq!(link_stroke_opacity(&diagram, 0), 0.7);

    let markup = diagram.svg_markup().expect("markup");
    assert!(markup.contains(r#"id="gradient-0""#));
    assert!(markup.contains(r#"stroke="url(#gradient-0)""#));
}

#[test]
fn node_labels_show_name_and_grouped_value() {
    let (_, diagram) = mount(FlowDiagramConfig::default());
    let markup = diagram.svg_markup().expect("markup");

    assert!(markup.contains(">Store</text>"));
    assert!(markup.contains(">$1,000,000</text>"));
    assert!(markup.contains(r#"id="node-gradient-2""#));
}

#[test]
fn dragging_a_node_moves_it_and_its_links() {
    let (_, mut diagram) = mount(FlowDiagramConfig::default());

    // Node 0 is drawn at canvas (130, 215).
    let role = diagram.pointer_down(140.0, 225.0).expect("pointer down");
    assert_eq!(role, Some(HitRole::Node(0)));
    assert_eq!(diagram.interaction().mode(), InteractionMode::DraggingNode(0));

    diagram.pointer_move(240.0, 325.0).expect("drag");
    diagram.pointer_up();

    let node = &diagram.data().nodes[0];
    assert_eq!((node.x, node.y), (180.0, 235.0));
    assert_eq!(diagram.interaction().mode(), InteractionMode::Idle);

    let id = diagram.link_element(0).expect("link");
    let Primitive::Path(path) = diagram.surface().element(id).expect("element").primitive else {
        panic!("link must be a path");
    };
    assert_eq!(
        path.commands[0],
        PathCommand::MoveTo(180.0 + NODE_WIDTH + 50.0, 235.0 + NODE_HEIGHT / 2.0 + 80.0)
    );

    // Element ids are stable across incremental updates.
    assert_eq!(diagram.link_element(0), Some(id));
}

#[test]
fn drag_under_zoom_uses_local_coordinates() {
    let (_, mut diagram) = mount(FlowDiagramConfig::default());
    assert!(diagram.zoom_in().expect("zoom in"));

    // Node 0 origin (130, 215) maps to (36, 198) at scale 1.2 around (600, 300).
    let role = diagram.pointer_down(48.0, 210.0).expect("pointer down");
    assert_eq!(role, Some(HitRole::Node(0)));
    diagram.pointer_move(60.0, 210.0).expect("drag");

    let node = &diagram.data().nodes[0];
    assert_relative_eq!(node.x, 90.0, epsilon = 1e-9);
    assert_relative_eq!(node.y, 135.0, epsilon = 1e-9);
}

#[test]
fn move_node_rejects_unknown_ids() {
    let (_, mut diagram) = mount(FlowDiagramConfig::default());
    diagram.move_node("store", 500.0, 100.0).expect("move");
    assert_eq!((diagram.data().nodes[2].x, diagram.data().nodes[2].y), (500.0, 100.0));

    let err = diagram.move_node("nowhere", 0.0, 0.0).expect_err("unknown node");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn panning_on_empty_canvas_translates_plot_layer() {
    let (_, mut diagram) = mount(FlowDiagramConfig::default());
    assert_eq!(diagram.pointer_down(600.0, 20.0).expect("pointer down"), None);
    assert_eq!(diagram.interaction().mode(), InteractionMode::Panning);

    diagram.pointer_move(620.0, 30.0).expect("pan");
    diagram.pointer_up();

    let transform = diagram.surface().snapshot().layer(SurfaceLayer::Plot).transform;
    assert_eq!((transform.translate_x, transform.translate_y), (20.0, 10.0));
    assert_eq!(diagram.data().nodes[0].x, 80.0);
}

#[test]
fn zoom_is_clamped_and_resettable() {
    let (_, mut diagram) = mount(FlowDiagramConfig::default());
    for _ in 0..10 {
        diagram.zoom_in().expect("zoom in");
    }
    assert_eq!(diagram.zoom().scale(), MAX_ZOOM);
    assert!(!diagram.zoom_in().expect("clamped"));

    for _ in 0..20 {
        diagram.zoom_out().expect("zoom out");
    }
    assert_eq!(diagram.zoom().scale(), MIN_ZOOM);

    diagram.reset_zoom().expect("reset");
    let plot = diagram.surface().snapshot().layer(SurfaceLayer::Plot).transform;
    assert_eq!(plot, Transform::IDENTITY);
    assert!(!diagram.svg_markup().expect("markup").contains("scale("));
}

#[test]
fn zoom_leaves_overlay_fixed() {
    let (_, mut diagram) = mount(FlowDiagramConfig::default());
    diagram.zoom_at(2.0, 100.0, 100.0).expect("zoom");

    let scene = diagram.surface().snapshot();
    assert_eq!(scene.layer(SurfaceLayer::Overlay).transform, Transform::IDENTITY);
    assert_eq!(scene.layer(SurfaceLayer::Plot).transform.scale, 2.0);
}

#[test]
fn hovering_a_link_shows_one_tooltip() {
    let (_, mut diagram) = mount(FlowDiagramConfig::default());
    let baseline = diagram.surface().element_count();

    assert!(diagram.hover_link(0, 300.0, 200.0).expect("hover"));
    assert!(diagram.is_tooltip_visible());
    assert_eq!(link_stroke_opacity(&diagram, 0), 1.0);
    let markup = diagram.svg_markup().expect("markup");
    assert!(markup.contains("Flow: 200000"));
    assert!(markup.contains("Width: 14.0px"));

    // Moving to another link reuses the overlay and restores the first link.
    assert!(diagram.hover_link(1, 320.0, 260.0).expect("hover"));
    assert_eq!(diagram.surface().element_count(), baseline + 3);
    assert_eq!(link_stroke_opacity(&diagram, 0), 0.7);
    assert!(diagram.svg_markup().expect("markup").contains("Width: 24.0px"));

    diagram.hover_end().expect("hover end");
    assert!(!diagram.is_tooltip_visible());
    assert_eq!(link_stroke_opacity(&diagram, 1), 0.7);
    assert_eq!(diagram.surface().element_count(), baseline);

    assert!(!diagram.hover_link(3, 0.0, 0.0).expect("skipped link"));
}

#[test]
fn statistics_panel_is_optional() {
    let (_, diagram) = mount(FlowDiagramConfig::default());
    let markup = diagram.svg_markup().expect("markup");
    assert!(markup.contains("class=\"stats-panel\""));
    assert!(markup.contains(">65,540</text>"));
    assert!(markup.contains(">SHOPPING VIEWS</text>"));

    let custom = FlowStatistics {
        trend_goods: 1_500.0,
        ..FlowStatistics::default()
    };
    let (_, diagram) = mount(FlowDiagramConfig::default().with_statistics(Some(custom)));
    assert!(diagram.svg_markup().expect("markup").contains(">1,500</text>"));

    let (_, hidden) = mount(FlowDiagramConfig::default().with_statistics(None));
    assert!(!hidden.svg_markup().expect("markup").contains("stats-panel"));
}

#[test]
fn filter_buttons_select_and_notify() {
    let selected = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&selected);
    let config = FlowDiagramConfig::default()
        .with_filter_change(move |filter| sink.borrow_mut().push(filter.label().to_owned()));
    let (_, mut diagram) = mount(config);
    assert_eq!(diagram.active_filter().label(), "3M");

    // First button spans x 864..920, y 24..54.
    let role = diagram.pointer_down(870.0, 30.0).expect("click filter");
    assert_eq!(role, Some(HitRole::Control(0)));
    assert_eq!(diagram.interaction().mode(), InteractionMode::Idle);
    assert_eq!(diagram.active_filter().label(), "1W");

    diagram.select_filter("ALL").expect("select");
    assert_eq!(*selected.borrow(), vec!["1W".to_owned(), "ALL".to_owned()]);

    let markup = diagram.svg_markup().expect("markup");
    assert_eq!(markup.matches("class=\"time-filter active\"").count(), 1);
    assert!(markup.contains(">ALL</text>"));
}

#[test]
fn time_filter_can_be_hidden() {
    let (_, diagram) = mount(FlowDiagramConfig::default().with_time_filter(false));
    assert!(!diagram.svg_markup().expect("markup").contains("time-filter"));
}

#[test]
fn click_element_reports_nodes_and_links() {
    let (_, diagram) = mount(FlowDiagramConfig::default());
    let node = diagram.node_element(2).expect("node");
    let link = diagram.link_element(1).expect("link");

    assert_eq!(diagram.click_element(node), Some(HitRole::Node(2)));
    assert_eq!(diagram.click_element(link), Some(HitRole::Link(1)));
}

#[test]
fn updates_rebuild_and_keep_zoom() {
    let (_, mut diagram) = mount(FlowDiagramConfig::default());
    diagram.zoom_in().expect("zoom");
    diagram.hover_link(0, 10.0, 10.0).expect("hover");

    let mut data = shop_flow();
    data.links.pop();
    diagram.update_data(data).expect("update data");
    assert!(diagram.link_report().skipped.is_empty());
    assert!(!diagram.is_tooltip_visible());
    assert_relative_eq!(diagram.zoom().scale(), 1.2, epsilon = 1e-12);
    assert_relative_eq!(
        diagram.surface().snapshot().layer(SurfaceLayer::Plot).transform.scale,
        1.2,
        epsilon = 1e-12
    );

    diagram
        .update_config(FlowDiagramConfig::default().with_size(1400, 700))
        .expect("update config");
    assert_eq!(diagram.surface().viewport().width, 1400);
    assert_eq!(diagram.data().nodes[3].x, 1400.0 - 100.0 - 180.0 - 80.0);
    assert_relative_eq!(diagram.zoom().scale(), 1.2, epsilon = 1e-12);
}

#[test]
fn gradient_background_is_exported() {
    let (_, diagram) = mount(FlowDiagramConfig::default());
    let markup = diagram.svg_markup().expect("markup");
    assert!(markup.contains(r##"<stop offset="0" stop-color="#0f0f23" />"##));
    assert!(markup.contains(r##"<stop offset="1" stop-color="#1a1a3e" />"##));
}

#[test]
fn destroy_detaches_surface_and_tooltip() {
    let mut document = Document::new();
    let container = document.create_container("flow");
    let mut diagram = FlowDiagram::mount(
        &mut document,
        "#flow",
        shop_flow(),
        FlowDiagramConfig::default(),
    )
    .expect("mount");
    diagram.hover_link(0, 100.0, 100.0).expect("hover");

    diagram.destroy();
    assert_eq!(document.surface_count(container), 0);
}

#[test]
fn flow_data_round_trips_through_json() {
    let json = serde_json::to_string(&shop_flow()).expect("serialize");
    assert!(json.contains("\"type\":\"middle\""));
    let parsed = FlowData::from_json(&json).expect("parse");
    assert_eq!(parsed, shop_flow());
}
