use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{BarOrientation, CategoryPoint, project_bars};
use crate::render::{RectPrimitive, RenderFrame, SurfaceElement, TextHAlign, TextPrimitive};
use crate::style::resolve_palette;

use super::{Chart, ChartKind, FrameInput};

const VALUE_LABEL_FONT_SIZE_PX: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarOptions {
    pub orientation: BarOrientation,
    pub show_values: bool,
    /// Fraction of each category slot left empty on either side of the bar.
    pub bar_padding: f64,
}

impl Default for BarOptions {
    fn default() -> Self {
        Self {
            orientation: BarOrientation::Vertical,
            show_values: false,
            bar_padding: 0.1,
        }
    }
}

impl BarOptions {
    #[must_use]
    pub fn with_orientation(mut self, orientation: BarOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    #[must_use]
    pub fn with_show_values(mut self, show_values: bool) -> Self {
        self.show_values = show_values;
        self
    }

    #[must_use]
    pub fn with_bar_padding(mut self, bar_padding: f64) -> Self {
        self.bar_padding = bar_padding;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarOptionsPatch {
    pub orientation: Option<BarOrientation>,
    pub show_values: Option<bool>,
    pub bar_padding: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BarKind;

pub type BarChart<S = crate::render::SvgSurface> = Chart<BarKind, S>;

impl ChartKind for BarKind {
    type Datum = CategoryPoint;
    type Options = BarOptions;
    type OptionsPatch = BarOptionsPatch;

    const FILE_STEM: &'static str = "bar-chart";

    fn merge_options(options: &mut BarOptions, patch: BarOptionsPatch) {
        if let Some(orientation) = patch.orientation {
            options.orientation = orientation;
        }
        if let Some(show_values) = patch.show_values {
            options.show_values = show_values;
        }
        if let Some(bar_padding) = patch.bar_padding {
            options.bar_padding = bar_padding;
        }
    }

    fn build_frame(input: &FrameInput<'_, Self>) -> RenderFrame {
        let mut frame = RenderFrame::new(input.viewport);
        if input.data.is_empty() {
            return frame;
        }

        let options = input.options;
        let plot = input.plot_area();
        let bars = project_bars(input.data, plot, options.orientation, options.bar_padding);
        if bars
            .iter()
            .any(|bar| !(bar.width.is_finite() && bar.height.is_finite()))
        {
            warn!(
                count = bars.len(),
                "bar geometry is not finite; maximum value is zero or invalid"
            );
        }

        let colors = resolve_palette(input.palette, input.data.len());
        for (index, (bar, color)) in bars.iter().zip(&colors).enumerate() {
            frame.plot(
                SurfaceElement::new(
                    RectPrimitive::new(bar.x, bar.y, bar.width, bar.height).with_fill(*color),
                )
                .with_class("bar")
                .with_hit_target(input.datum_target(index)),
            );
        }

        if options.show_values {
            for (point, bar) in input.data.iter().zip(&bars) {
                let label = match options.orientation {
                    BarOrientation::Vertical => TextPrimitive::new(
                        point.value.to_string(),
                        bar.label_x,
                        bar.label_y,
                        VALUE_LABEL_FONT_SIZE_PX,
                        input.theme.text,
                        TextHAlign::Center,
                    ),
                    BarOrientation::Horizontal => TextPrimitive::new(
                        point.value.to_string(),
                        bar.label_x,
                        bar.label_y,
                        VALUE_LABEL_FONT_SIZE_PX,
                        input.theme.text,
                        TextHAlign::Left,
                    )
                    .middle(),
                };
                frame.plot(SurfaceElement::new(label).with_class("value-label"));
            }
        }

        input.push_plot_title(&mut frame);
        frame
    }
}
