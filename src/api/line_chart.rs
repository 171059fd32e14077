use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{XyPoint, project_line};
use crate::render::{
    CirclePrimitive, PathCommand, PathPrimitive, RenderFrame, Stroke, SurfaceElement,
};
use crate::style::resolve_palette;

use super::{Chart, ChartKind, FrameInput};

const AREA_OPACITY: f64 = 0.3;
const MARKER_STROKE_WIDTH: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineOptions {
    pub show_area: bool,
    pub show_points: bool,
    pub point_size: f64,
    pub line_width: f64,
    /// Accepted for compatibility; segments are always straight.
    pub smooth: bool,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self {
            show_area: false,
            show_points: true,
            point_size: 4.0,
            line_width: 2.0,
            smooth: true,
        }
    }
}

impl LineOptions {
    #[must_use]
    pub fn with_show_area(mut self, show_area: bool) -> Self {
        self.show_area = show_area;
        self
    }

    #[must_use]
    pub fn with_show_points(mut self, show_points: bool) -> Self {
        self.show_points = show_points;
        self
    }

    #[must_use]
    pub fn with_point_size(mut self, point_size: f64) -> Self {
        self.point_size = point_size;
        self
    }

    #[must_use]
    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = line_width;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineOptionsPatch {
    pub show_area: Option<bool>,
    pub show_points: Option<bool>,
    pub point_size: Option<f64>,
    pub line_width: Option<f64>,
    pub smooth: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineKind;

pub type LineChart<S = crate::render::SvgSurface> = Chart<LineKind, S>;

impl ChartKind for LineKind {
    type Datum = XyPoint;
    type Options = LineOptions;
    type OptionsPatch = LineOptionsPatch;

    const FILE_STEM: &'static str = "line-chart";

    fn merge_options(options: &mut LineOptions, patch: LineOptionsPatch) {
        if let Some(show_area) = patch.show_area {
            options.show_area = show_area;
        }
        if let Some(show_points) = patch.show_points {
            options.show_points = show_points;
        }
        if let Some(point_size) = patch.point_size {
            options.point_size = point_size;
        }
        if let Some(line_width) = patch.line_width {
            options.line_width = line_width;
        }
        if let Some(smooth) = patch.smooth {
            options.smooth = smooth;
        }
    }

    fn build_frame(input: &FrameInput<'_, Self>) -> RenderFrame {
        let mut frame = RenderFrame::new(input.viewport);
        let Some(geometry) = project_line(input.data, input.plot_area()) else {
            return frame;
        };
        if geometry.is_degenerate() {
            warn!(
                points = geometry.points.len(),
                x_domain = ?geometry.x_scale.domain(),
                y_domain = ?geometry.y_scale.domain(),
                "line scales are degenerate; coordinates are not finite"
            );
        }

        let options = input.options;
        let color = resolve_palette(input.palette, 1)
            .first()
            .copied()
            .unwrap_or(input.theme.primary);

        if options.show_area {
            let mut area = PathPrimitive::polyline(&geometry.area_outline());
            area.commands.push(PathCommand::Close);
            frame.plot(SurfaceElement::new(area.with_fill(color, AREA_OPACITY)).with_class("area"));
        }

        frame.plot(
            SurfaceElement::new(
                PathPrimitive::polyline(&geometry.points)
                    .with_stroke(Stroke::new(color, options.line_width)),
            )
            .with_class("line"),
        );

        if options.show_points {
            for (index, &(x, y)) in geometry.points.iter().enumerate() {
                frame.plot(
                    SurfaceElement::new(
                        CirclePrimitive::new(x, y, options.point_size)
                            .with_fill(color)
                            .with_stroke(Stroke::new(input.theme.background, MARKER_STROKE_WIDTH)),
                    )
                    .with_class("point")
                    .with_hit_target(input.datum_target(index)),
                );
            }
        }

        input.push_plot_title(&mut frame);
        frame
    }
}
