use crate::core::{Margin, Viewport};
use crate::flow::format::format_grouped;
use crate::flow::layout::{NODE_CORNER_RADIUS, NODE_HEIGHT, NODE_WIDTH, inlet, outlet};
use crate::flow::{FlowNode, FlowStatistics, TimeFilter};
use crate::render::{
    Color, FontWeight, GradientStop, GradientUnits, HitRole, HitTarget, InstanceToken,
    LinearGradientPrimitive, Paint, PathCommand, PathPrimitive, RectPrimitive, Stroke,
    SurfaceElement, TextHAlign, TextPrimitive,
};

pub const LINK_OPACITY: f64 = 0.7;
pub const LINK_HOVER_OPACITY: f64 = 1.0;
const LINK_STOP_OPACITY: f64 = 0.8;

pub const STATS_PANEL_WIDTH: f64 = 800.0;
pub const STATS_PANEL_HEIGHT: f64 = 120.0;
const STATS_PANEL_BOTTOM_GAP: f64 = 20.0;

pub const FILTER_BUTTON_WIDTH: f64 = 56.0;
pub const FILTER_BUTTON_HEIGHT: f64 = 30.0;
const FILTER_BUTTON_GAP: f64 = 8.0;
const FILTER_INSET: f64 = 24.0;

const TOOLTIP_WIDTH: f64 = 140.0;
const TOOLTIP_HEIGHT: f64 = 48.0;

const WATERMARK_TEXT: &str = "Data visualisation";

const PANEL_FILL: Color = Color::rgb8(15, 15, 35);
const FAINT_WHITE: Color = Color::rgba8(255, 255, 255, 0.1);
const SOFT_WHITE: Color = Color::rgba8(255, 255, 255, 0.2);
const MUTED_WHITE: Color = Color::rgba8(255, 255, 255, 0.7);

/// Canvas-space endpoints of a link between two laid-out nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkGeometry {
    pub from: (f64, f64),
    pub to: (f64, f64),
}

impl LinkGeometry {
    #[must_use]
    pub fn between(source: &FlowNode, target: &FlowNode, margin: Margin) -> Self {
        let shift = |(x, y): (f64, f64)| (x + margin.left, y + margin.top);
        Self {
            from: shift(outlet(source)),
            to: shift(inlet(target)),
        }
    }

    /// Horizontal S-curve with both control points on the x midpoint.
    #[must_use]
    pub fn path_commands(self) -> Vec<PathCommand> {
        let (x1, y1) = self.from;
        let (x2, y2) = self.to;
        let mid_x = (x1 + x2) / 2.0;
        vec![
            PathCommand::MoveTo(x1, y1),
            PathCommand::CubicTo {
                c1: (mid_x, y1),
                c2: (mid_x, y2),
                to: (x2, y2),
            },
        ]
    }
}

pub fn link_gradient_id(index: usize) -> String {
    format!("gradient-{index}")
}

pub fn node_gradient_id(index: usize) -> String {
    format!("node-gradient-{index}")
}

pub fn link_gradient(
    index: usize,
    geometry: LinkGeometry,
    source: Color,
    target: Color,
) -> SurfaceElement {
    SurfaceElement::new(LinearGradientPrimitive::between(
        link_gradient_id(index),
        geometry.from,
        geometry.to,
        GradientUnits::UserSpace,
        GradientStop {
            offset: 0.0,
            color: source,
            opacity: LINK_STOP_OPACITY,
        },
        GradientStop {
            offset: 1.0,
            color: target,
            opacity: LINK_STOP_OPACITY,
        },
    ))
    .with_class("link-gradient")
}

pub fn link_path(
    index: usize,
    geometry: LinkGeometry,
    width: f64,
    opacity: f64,
    owner: InstanceToken,
) -> SurfaceElement {
    let stroke = Stroke::new(Paint::Gradient(link_gradient_id(index)), width).with_opacity(opacity);
    SurfaceElement::new(PathPrimitive::new(geometry.path_commands()).with_stroke(stroke))
        .with_class("sankey-link")
        .with_hit_target(HitTarget::new(owner, HitRole::Link(index)))
}

pub fn node_gradient(index: usize, node: &FlowNode) -> SurfaceElement {
    SurfaceElement::new(LinearGradientPrimitive::between(
        node_gradient_id(index),
        (0.0, 0.0),
        (1.0, 1.0),
        GradientUnits::ObjectBoundingBox,
        GradientStop {
            offset: 0.0,
            color: node.color,
            opacity: 1.0,
        },
        GradientStop {
            offset: 1.0,
            color: node.color.darker(0.5),
            opacity: 1.0,
        },
    ))
}

pub fn node_rect(
    index: usize,
    node: &FlowNode,
    margin: Margin,
    owner: InstanceToken,
) -> SurfaceElement {
    let rect = RectPrimitive::new(
        node.x + margin.left,
        node.y + margin.top,
        NODE_WIDTH,
        NODE_HEIGHT,
    )
    .with_fill(Paint::Gradient(node_gradient_id(index)))
    .with_stroke(Stroke::new(node.color.darker(0.5), 2.0))
    .with_corner_radius(NODE_CORNER_RADIUS);
    SurfaceElement::new(rect)
        .with_class("sankey-node")
        .with_hit_target(HitTarget::new(owner, HitRole::Node(index)))
}

pub fn node_name(node: &FlowNode, margin: Margin) -> SurfaceElement {
    let text = TextPrimitive::new(
        node.name.clone(),
        node.x + margin.left + 20.0,
        node.y + margin.top + 30.0,
        18.0,
        Color::WHITE,
        TextHAlign::Left,
    )
    .with_weight(FontWeight::SemiBold);
    SurfaceElement::new(text).with_class("node-name")
}

pub fn node_value(node: &FlowNode, margin: Margin) -> SurfaceElement {
    let text = TextPrimitive::new(
        format!("${}", format_grouped(node.value)),
        node.x + margin.left + 20.0,
        node.y + margin.top + 55.0,
        24.0,
        Color::WHITE,
        TextHAlign::Left,
    )
    .with_weight(FontWeight::Bold);
    SurfaceElement::new(text).with_class("node-value")
}

pub fn watermark(viewport: Viewport) -> SurfaceElement {
    let text = TextPrimitive::new(
        WATERMARK_TEXT,
        f64::from(viewport.width) / 2.0,
        40.0,
        48.0,
        FAINT_WHITE,
        TextHAlign::Center,
    )
    .with_weight(FontWeight::Bold);
    SurfaceElement::new(text).with_class("watermark")
}

/// Fixed panel with three metric tiles, centered above the bottom edge.
pub fn statistics_panel(viewport: Viewport, statistics: FlowStatistics) -> Vec<SurfaceElement> {
    let x = (f64::from(viewport.width) - STATS_PANEL_WIDTH) / 2.0;
    let y = f64::from(viewport.height) - STATS_PANEL_HEIGHT - STATS_PANEL_BOTTOM_GAP;

    let mut elements = vec![
        SurfaceElement::new(
            RectPrimitive::new(x, y, STATS_PANEL_WIDTH, STATS_PANEL_HEIGHT)
                .with_fill(PANEL_FILL)
                .with_stroke(Stroke::new(FAINT_WHITE, 1.0))
                .with_corner_radius(12.0),
        )
        .with_class("stats-panel"),
    ];

    let items = [
        ("\u{25b6}", "TREND GOODS", statistics.trend_goods, Color::rgb8(0x63, 0x66, 0xf1)),
        ("\u{1f441}", "SHOPPING VIEWS", statistics.shopping_views, Color::rgb8(0x8b, 0x5c, 0xf6)),
        ("\u{23f1}", "STORE DYNAMICS", statistics.store_dynamics, Color::rgb8(0xa8, 0x55, 0xf7)),
    ];
    let item_width = STATS_PANEL_WIDTH / items.len() as f64;

    for (slot, (icon, title, value, accent)) in items.into_iter().enumerate() {
        let cx = x + item_width * slot as f64 + item_width / 2.0;
        elements.push(
            SurfaceElement::new(
                RectPrimitive::new(cx - 25.0, y + 15.0, 50.0, 50.0)
                    .with_fill(FAINT_WHITE)
                    .with_stroke(Stroke::new(SOFT_WHITE, 1.0))
                    .with_corner_radius(8.0),
            )
            .with_class("stats-icon-box"),
        );
        elements.push(
            SurfaceElement::new(
                TextPrimitive::new(icon, cx, y + 45.0, 24.0, accent, TextHAlign::Center),
            )
            .with_class("stats-icon"),
        );
        elements.push(
            SurfaceElement::new(
                TextPrimitive::new(title, cx, y + 85.0, 12.0, MUTED_WHITE, TextHAlign::Center)
                    .with_weight(FontWeight::SemiBold)
                    .with_letter_spacing(1.0),
            )
            .with_class("stats-title"),
        );
        elements.push(
            SurfaceElement::new(
                TextPrimitive::new(
                    format_grouped(value),
                    cx,
                    y + 105.0,
                    28.0,
                    Color::WHITE,
                    TextHAlign::Center,
                )
                .with_weight(FontWeight::Bold),
            )
            .with_class("stats-value"),
        );
    }
    elements
}

/// Origin of the `slot`-th of `count` filter buttons, right-aligned in the
/// top-right corner.
#[must_use]
pub fn filter_button_origin(viewport: Viewport, slot: usize, count: usize) -> (f64, f64) {
    let row_width =
        count as f64 * FILTER_BUTTON_WIDTH + count.saturating_sub(1) as f64 * FILTER_BUTTON_GAP;
    let left = f64::from(viewport.width) - FILTER_INSET - row_width;
    (
        left + slot as f64 * (FILTER_BUTTON_WIDTH + FILTER_BUTTON_GAP),
        FILTER_INSET,
    )
}

pub fn filter_button(
    slot: usize,
    origin: (f64, f64),
    fill: Color,
    active: bool,
    owner: InstanceToken,
) -> SurfaceElement {
    let class = if active {
        "time-filter active"
    } else {
        "time-filter"
    };
    SurfaceElement::new(
        RectPrimitive::new(origin.0, origin.1, FILTER_BUTTON_WIDTH, FILTER_BUTTON_HEIGHT)
            .with_fill(fill)
            .with_corner_radius(FILTER_BUTTON_HEIGHT / 2.0),
    )
    .with_class(class)
    .with_hit_target(HitTarget::new(owner, HitRole::Control(slot)))
}

pub fn filter_label(filter: &TimeFilter, origin: (f64, f64)) -> SurfaceElement {
    SurfaceElement::new(
        TextPrimitive::new(
            filter.label(),
            origin.0 + FILTER_BUTTON_WIDTH / 2.0,
            origin.1 + FILTER_BUTTON_HEIGHT / 2.0,
            14.0,
            Color::WHITE,
            TextHAlign::Center,
        )
        .with_weight(FontWeight::SemiBold)
        .middle(),
    )
    .with_class("time-filter-label")
}

/// Tooltip box anchored up and to the right of the pointer.
pub fn tooltip(value: f64, width: f64, x: f64, y: f64) -> [SurfaceElement; 3] {
    let left = x + 10.0;
    let top = y - 28.0;
    [
        SurfaceElement::new(
            RectPrimitive::new(left, top, TOOLTIP_WIDTH, TOOLTIP_HEIGHT)
                .with_fill(Color::rgba8(0, 0, 0, 0.7))
                .with_corner_radius(4.0),
        )
        .with_class("tooltip"),
        SurfaceElement::new(TextPrimitive::new(
            format!("Flow: {value}"),
            left + 8.0,
            top + 20.0,
            12.0,
            Color::WHITE,
            TextHAlign::Left,
        ))
        .with_class("tooltip-text"),
        SurfaceElement::new(TextPrimitive::new(
            format!("Width: {width:.1}px"),
            left + 8.0,
            top + 38.0,
            12.0,
            Color::WHITE,
            TextHAlign::Left,
        ))
        .with_class("tooltip-text"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::NodeKind;
    use crate::render::Primitive;

    #[test]
    fn link_curve_bends_at_horizontal_midpoint() {
        let mut source = FlowNode::new("a", "A", 1.0, NodeKind::Source, Color::WHITE);
        let mut target = FlowNode::new("b", "B", 1.0, NodeKind::Target, Color::WHITE);
        source.x = 80.0;
        source.y = 100.0;
        target.x = 840.0;
        target.y = 300.0;

        let geometry = LinkGeometry::between(&source, &target, Margin::new(80.0, 50.0, 50.0, 50.0));
        assert_eq!(geometry.from, (310.0, 220.0));
        assert_eq!(geometry.to, (890.0, 420.0));
        assert_eq!(
            geometry.path_commands()[1],
            PathCommand::CubicTo {
                c1: (600.0, 220.0),
                c2: (600.0, 420.0),
                to: (890.0, 420.0),
            }
        );
    }

    #[test]
    fn filter_row_ends_at_right_inset() {
        let viewport = Viewport::new(1200, 600);
        let (last_x, top) = filter_button_origin(viewport, 4, 5);
        assert_eq!(last_x + FILTER_BUTTON_WIDTH, 1200.0 - 24.0);
        assert_eq!(top, 24.0);
    }

    #[test]
    fn statistics_values_are_grouped() {
        let elements = statistics_panel(Viewport::new(1200, 600), FlowStatistics::default());
        let values: Vec<&str> = elements
            .iter()
            .filter(|element| element.class.as_deref() == Some("stats-value"))
            .filter_map(|element| match &element.primitive {
                Primitive::Text(text) => Some(text.text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(values, vec!["204", "65,540", "325"]);
    }
}
