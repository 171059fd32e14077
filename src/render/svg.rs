//! SVG serialization of a `Scene`.
//!
//! Output is deterministic: the same scene always yields byte-identical
//! markup, which is what makes re-render idempotence observable.

use std::f64::consts::TAU;
use std::fmt::Write;

use crate::render::{
    Background, CirclePrimitive, ElementId, FontWeight, GradientUnits, LinearGradientPrimitive,
    Paint, PathCommand, PathPrimitive, Primitive, RectPrimitive, Scene, SectorPrimitive, Stroke,
    SurfaceElement, SurfaceLayer, TextHAlign, TextPrimitive, TextVAlign,
};

const BACKGROUND_GRADIENT_ID: &str = "surface-background";

/// Serializes `scene` into a standalone SVG document.
#[must_use]
pub fn write_scene(scene: &Scene) -> String {
    let mut output = String::new();
    let width = scene.viewport.width;
    let height = scene.viewport.height;
    let _ = writeln!(
        output,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );

    output.push_str("  <defs>\n");
    if let Background::LinearGradient { angle_deg, from, to } = scene.background {
        let ((x1, y1), (x2, y2)) = Background::gradient_vector(angle_deg);
        let _ = writeln!(
            output,
            r#"    <linearGradient id="{BACKGROUND_GRADIENT_ID}" x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}"><stop offset="0" stop-color="{from}" /><stop offset="1" stop-color="{to}" /></linearGradient>"#
        );
    }
    for (id, element) in &scene.layer(SurfaceLayer::Defs).elements {
        write_element(&mut output, "    ", *id, element);
    }
    output.push_str("  </defs>\n");

    let background_fill = match scene.background {
        Background::Solid { color } => color.to_css(),
        Background::LinearGradient { .. } => format!("url(#{BACKGROUND_GRADIENT_ID})"),
    };
    let _ = writeln!(
        output,
        r#"  <rect class="background" x="0" y="0" width="{width}" height="{height}" fill="{background_fill}" />"#
    );

    for layer in [SurfaceLayer::Plot, SurfaceLayer::Overlay] {
        let content = scene.layer(layer);
        let _ = write!(output, r#"  <g class="{}""#, layer.name());
        if !content.transform.is_identity() {
            let _ = write!(output, r#" transform="{}""#, content.transform.to_svg());
        }
        output.push_str(">\n");
        for (id, element) in &content.elements {
            write_element(&mut output, "    ", *id, element);
        }
        output.push_str("  </g>\n");
    }

    output.push_str("</svg>\n");
    output
}

/// Escapes the five XML special characters.
#[must_use]
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn write_element(output: &mut String, indent: &str, id: ElementId, element: &SurfaceElement) {
    let mut common = format!(r#"data-element-id="{}""#, id.raw());
    if let Some(class) = &element.class {
        let _ = write!(common, r#" class="{}""#, escape_xml(class));
    }

    let _ = match &element.primitive {
        Primitive::Rect(rect) => writeln!(output, "{indent}{}", rect_markup(&common, rect)),
        Primitive::Circle(circle) => writeln!(output, "{indent}{}", circle_markup(&common, circle)),
        Primitive::Sector(sector) => writeln!(output, "{indent}{}", sector_markup(&common, sector)),
        Primitive::Path(path) => writeln!(output, "{indent}{}", path_markup(&common, path)),
        Primitive::Text(text) => writeln!(output, "{indent}{}", text_markup(&common, text)),
        Primitive::LinearGradient(gradient) => {
            writeln!(output, "{indent}{}", gradient_markup(&common, gradient))
        }
    };
}

fn paint_value(paint: &Paint) -> String {
    match paint {
        Paint::Solid(color) => color.to_css(),
        Paint::Gradient(id) => format!("url(#{id})"),
    }
}

fn fill_attrs(fill: Option<&Paint>) -> String {
    match fill {
        Some(paint) => format!(r#" fill="{}""#, paint_value(paint)),
        None => r#" fill="none""#.to_owned(),
    }
}

fn stroke_attrs(stroke: Option<&Stroke>) -> String {
    let Some(stroke) = stroke else {
        return String::new();
    };
    let mut attrs = format!(
        r#" stroke="{}" stroke-width="{}""#,
        paint_value(&stroke.paint),
        stroke.width
    );
    if stroke.opacity != 1.0 {
        let _ = write!(attrs, r#" stroke-opacity="{}""#, stroke.opacity);
    }
    if !stroke.dash.is_empty() {
        let dash: Vec<String> = stroke.dash.iter().map(f64::to_string).collect();
        let _ = write!(attrs, r#" stroke-dasharray="{}""#, dash.join(","));
    }
    attrs
}

fn rect_markup(common: &str, rect: &RectPrimitive) -> String {
    let mut markup = format!(
        r#"<rect {common} x="{}" y="{}" width="{}" height="{}""#,
        rect.x, rect.y, rect.width, rect.height
    );
    if rect.corner_radius > 0.0 {
        let _ = write!(markup, r#" rx="{0}" ry="{0}""#, rect.corner_radius);
    }
    markup.push_str(&fill_attrs(rect.fill.as_ref()));
    markup.push_str(&stroke_attrs(rect.stroke.as_ref()));
    markup.push_str(" />");
    markup
}

fn circle_markup(common: &str, circle: &CirclePrimitive) -> String {
    format!(
        r#"<circle {common} cx="{}" cy="{}" r="{}"{}{} />"#,
        circle.cx,
        circle.cy,
        circle.radius,
        fill_attrs(circle.fill.as_ref()),
        stroke_attrs(circle.stroke.as_ref()),
    )
}

/// SVG path data for an annular sector.
///
/// A full turn is split into two half arcs because an arc whose endpoints
/// coincide draws nothing.
#[must_use]
pub fn sector_path_data(sector: &SectorPrimitive) -> String {
    let SectorPrimitive {
        cx,
        cy,
        outer_radius,
        inner_radius,
        start_angle,
        end_angle,
        ..
    } = *sector;
    let point = |angle: f64, radius: f64| (cx + angle.cos() * radius, cy + angle.sin() * radius);
    let large_arc = u8::from(sector.large_arc());

    if sector.sweep() >= TAU - 1e-9 {
        let mid = start_angle + sector.sweep() / 2.0;
        let (sx, sy) = point(start_angle, outer_radius);
        let (mx, my) = point(mid, outer_radius);
        let mut data = format!(
            "M{sx},{sy}A{outer_radius},{outer_radius},0,0,1,{mx},{my}A{outer_radius},{outer_radius},0,0,1,{sx},{sy}Z"
        );
        if inner_radius > 0.0 {
            let (ix, iy) = point(start_angle, inner_radius);
            let (jx, jy) = point(mid, inner_radius);
            let _ = write!(
                data,
                "M{ix},{iy}A{inner_radius},{inner_radius},0,0,0,{jx},{jy}A{inner_radius},{inner_radius},0,0,0,{ix},{iy}Z"
            );
        }
        return data;
    }

    let (sx, sy) = point(start_angle, outer_radius);
    let (ex, ey) = point(end_angle, outer_radius);
    let mut data =
        format!("M{sx},{sy}A{outer_radius},{outer_radius},0,{large_arc},1,{ex},{ey}");
    if inner_radius > 0.0 {
        let (ix, iy) = point(end_angle, inner_radius);
        let (jx, jy) = point(start_angle, inner_radius);
        let _ = write!(
            data,
            "L{ix},{iy}A{inner_radius},{inner_radius},0,{large_arc},0,{jx},{jy}Z"
        );
    } else {
        let _ = write!(data, "L{cx},{cy}Z");
    }
    data
}

fn sector_markup(common: &str, sector: &SectorPrimitive) -> String {
    format!(
        r#"<path {common} d="{}" fill="{}" fill-rule="evenodd" />"#,
        sector_path_data(sector),
        paint_value(&sector.fill)
    )
}

/// SVG path data for a command list.
#[must_use]
pub fn path_data(commands: &[PathCommand]) -> String {
    let mut data = String::new();
    for command in commands {
        let _ = match *command {
            PathCommand::MoveTo(x, y) => write!(data, "M{x},{y}"),
            PathCommand::LineTo(x, y) => write!(data, "L{x},{y}"),
            PathCommand::CubicTo { c1, c2, to } => write!(
                data,
                "C{},{},{},{},{},{}",
                c1.0, c1.1, c2.0, c2.1, to.0, to.1
            ),
            PathCommand::Close => write!(data, "Z"),
        };
    }
    data
}

fn path_markup(common: &str, path: &PathPrimitive) -> String {
    let mut markup = format!(
        r#"<path {common} d="{}"{}"#,
        path_data(&path.commands),
        fill_attrs(path.fill.as_ref())
    );
    if path.fill.is_some() && path.fill_opacity != 1.0 {
        let _ = write!(markup, r#" fill-opacity="{}""#, path.fill_opacity);
    }
    markup.push_str(&stroke_attrs(path.stroke.as_ref()));
    markup.push_str(" />");
    markup
}

fn text_markup(common: &str, text: &TextPrimitive) -> String {
    let anchor = match text.h_align {
        TextHAlign::Left => "start",
        TextHAlign::Center => "middle",
        TextHAlign::Right => "end",
    };
    let weight = match text.font_weight {
        FontWeight::Normal => "normal",
        FontWeight::SemiBold => "600",
        FontWeight::Bold => "bold",
    };
    let mut markup = format!(
        r#"<text {common} x="{}" y="{}" font-size="{}px" font-weight="{weight}" fill="{}" text-anchor="{anchor}""#,
        text.x,
        text.y,
        text.font_size_px,
        text.color.to_css()
    );
    if text.v_align == TextVAlign::Middle {
        markup.push_str(r#" dominant-baseline="middle""#);
    }
    if text.letter_spacing_px != 0.0 {
        let _ = write!(markup, r#" letter-spacing="{}px""#, text.letter_spacing_px);
    }
    let _ = write!(markup, ">{}</text>", escape_xml(&text.text));
    markup
}

fn gradient_markup(common: &str, gradient: &LinearGradientPrimitive) -> String {
    let units = match gradient.units {
        GradientUnits::ObjectBoundingBox => "objectBoundingBox",
        GradientUnits::UserSpace => "userSpaceOnUse",
    };
    let mut markup = format!(
        r#"<linearGradient {common} id="{}" gradientUnits="{units}" x1="{}" y1="{}" x2="{}" y2="{}">"#,
        escape_xml(&gradient.id),
        gradient.x1,
        gradient.y1,
        gradient.x2,
        gradient.y2
    );
    for stop in &gradient.stops {
        let _ = write!(
            markup,
            r#"<stop offset="{}" stop-color="{}" stop-opacity="{}" />"#,
            stop.offset,
            stop.color.to_css(),
            stop.opacity
        );
    }
    markup.push_str("</linearGradient>");
    markup
}
