use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{TrendLine, XyPoint, project_scatter};
use crate::render::{CirclePrimitive, Color, PathPrimitive, RenderFrame, Stroke, SurfaceElement};
use crate::style::resolve_palette;

use super::{Chart, ChartKind, FrameInput};

const MARKER_STROKE_WIDTH: f64 = 2.0;
const TREND_LINE_WIDTH: f64 = 2.0;
const TREND_LINE_DASH: [f64; 2] = [5.0, 5.0];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterOptions {
    pub point_size: f64,
    pub show_trend_line: bool,
    pub trend_line_color: Color,
}

impl Default for ScatterOptions {
    fn default() -> Self {
        Self {
            point_size: 6.0,
            show_trend_line: false,
            trend_line_color: Color::rgb8(0xff, 0x6b, 0x6b),
        }
    }
}

impl ScatterOptions {
    #[must_use]
    pub fn with_point_size(mut self, point_size: f64) -> Self {
        self.point_size = point_size;
        self
    }

    #[must_use]
    pub fn with_trend_line(mut self, color: Color) -> Self {
        self.show_trend_line = true;
        self.trend_line_color = color;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterOptionsPatch {
    pub point_size: Option<f64>,
    pub show_trend_line: Option<bool>,
    pub trend_line_color: Option<Color>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScatterKind;

pub type ScatterPlot<S = crate::render::SvgSurface> = Chart<ScatterKind, S>;

impl ChartKind for ScatterKind {
    type Datum = XyPoint;
    type Options = ScatterOptions;
    type OptionsPatch = ScatterOptionsPatch;

    const FILE_STEM: &'static str = "scatter-plot";

    fn merge_options(options: &mut ScatterOptions, patch: ScatterOptionsPatch) {
        if let Some(point_size) = patch.point_size {
            options.point_size = point_size;
        }
        if let Some(show_trend_line) = patch.show_trend_line {
            options.show_trend_line = show_trend_line;
        }
        if let Some(trend_line_color) = patch.trend_line_color {
            options.trend_line_color = trend_line_color;
        }
    }

    fn build_frame(input: &FrameInput<'_, Self>) -> RenderFrame {
        let mut frame = RenderFrame::new(input.viewport);
        let Some(geometry) = project_scatter(input.data, input.plot_area()) else {
            return frame;
        };
        if geometry.x_scale.is_degenerate() || geometry.y_scale.is_degenerate() {
            warn!(
                points = geometry.points.len(),
                "scatter scales are degenerate; coordinates are not finite"
            );
        }

        let options = input.options;
        let color = resolve_palette(input.palette, 1)
            .first()
            .copied()
            .unwrap_or(input.theme.primary);

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

        if options.show_trend_line {
            if let Some(trend) = TrendLine::fit(input.data) {
                debug!(slope = trend.slope, intercept = trend.intercept, "fitted trend line");
                let (start, end) = geometry.trend_segment(trend);
                frame.plot(
                    SurfaceElement::new(
                        PathPrimitive::polyline(&[start, end]).with_stroke(
                            Stroke::new(options.trend_line_color, TREND_LINE_WIDTH)
                                .with_dash(&TREND_LINE_DASH),
                        ),
                    )
                    .with_class("trend-line"),
                );
            }
        }

        input.push_plot_title(&mut frame);
        frame
    }
}
