use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{CategoryPoint, project_slices};
use crate::render::{
    RenderFrame, SectorPrimitive, SurfaceElement, TextHAlign, TextPrimitive,
};
use crate::style::resolve_palette;

use super::{Chart, ChartKind, FrameInput};

const LABEL_FONT_SIZE_PX: f64 = 12.0;
const PERCENTAGE_FONT_SIZE_PX: f64 = 10.0;
const TITLE_OFFSET_PX: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieOptions {
    pub show_labels: bool,
    pub show_percentages: bool,
    pub donut: bool,
    /// Donut hole radius; half the outer radius when unset.
    pub inner_radius: Option<f64>,
    pub outer_radius: f64,
}

impl Default for PieOptions {
    fn default() -> Self {
        Self {
            show_labels: true,
            show_percentages: false,
            donut: false,
            inner_radius: None,
            outer_radius: 150.0,
        }
    }
}

impl PieOptions {
    #[must_use]
    pub fn with_show_labels(mut self, show_labels: bool) -> Self {
        self.show_labels = show_labels;
        self
    }

    #[must_use]
    pub fn with_show_percentages(mut self, show_percentages: bool) -> Self {
        self.show_percentages = show_percentages;
        self
    }

    #[must_use]
    pub fn with_donut(mut self, donut: bool) -> Self {
        self.donut = donut;
        self
    }

    #[must_use]
    pub fn with_inner_radius(mut self, inner_radius: f64) -> Self {
        self.inner_radius = Some(inner_radius);
        self
    }

    #[must_use]
    pub fn with_outer_radius(mut self, outer_radius: f64) -> Self {
        self.outer_radius = outer_radius;
        self
    }

    /// Hole radius actually drawn: zero unless `donut` is set.
    #[must_use]
    pub fn effective_inner_radius(&self) -> f64 {
        if self.donut {
            self.inner_radius.unwrap_or(self.outer_radius * 0.5)
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieOptionsPatch {
    pub show_labels: Option<bool>,
    pub show_percentages: Option<bool>,
    pub donut: Option<bool>,
    pub inner_radius: Option<Option<f64>>,
    pub outer_radius: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PieKind;

pub type PieChart<S = crate::render::SvgSurface> = Chart<PieKind, S>;

impl ChartKind for PieKind {
    type Datum = CategoryPoint;
    type Options = PieOptions;
    type OptionsPatch = PieOptionsPatch;

    const FILE_STEM: &'static str = "pie-chart";

    fn merge_options(options: &mut PieOptions, patch: PieOptionsPatch) {
        if let Some(show_labels) = patch.show_labels {
            options.show_labels = show_labels;
        }
        if let Some(show_percentages) = patch.show_percentages {
            options.show_percentages = show_percentages;
        }
        if let Some(donut) = patch.donut {
            options.donut = donut;
        }
        if let Some(inner_radius) = patch.inner_radius {
            options.inner_radius = inner_radius;
        }
        if let Some(outer_radius) = patch.outer_radius {
            options.outer_radius = outer_radius;
        }
    }

    fn build_frame(input: &FrameInput<'_, Self>) -> RenderFrame {
        let mut frame = RenderFrame::new(input.viewport);
        if input.data.is_empty() {
            return frame;
        }

        let options = input.options;
        let (cx, cy) = input.viewport.center();
        let slices = project_slices(input.data, (cx, cy), options.outer_radius);
        if slices.iter().any(|slice| !slice.fraction.is_finite()) {
            warn!(slices = slices.len(), "pie total is zero; slice angles are not finite");
        }

        let colors = resolve_palette(input.palette, input.data.len());
        let inner_radius = options.effective_inner_radius();
        for (index, ((point, slice), color)) in
            input.data.iter().zip(&slices).zip(&colors).enumerate()
        {
            frame.plot(
                SurfaceElement::new(SectorPrimitive {
                    cx,
                    cy,
                    outer_radius: options.outer_radius,
                    inner_radius,
                    start_angle: slice.start_angle,
                    end_angle: slice.end_angle,
                    fill: (*color).into(),
                })
                .with_class("pie-segment")
                .with_hit_target(input.datum_target(index)),
            );

            if options.show_labels {
                let (x, y) = slice.label_anchor;
                frame.plot(
                    SurfaceElement::new(
                        TextPrimitive::new(
                            point.label.clone(),
                            x,
                            y,
                            LABEL_FONT_SIZE_PX,
                            input.theme.text,
                            TextHAlign::Center,
                        )
                        .middle(),
                    )
                    .with_class("pie-label"),
                );
            }

            if options.show_percentages {
                let (x, y) = slice.percentage_anchor;
                frame.plot(
                    SurfaceElement::new(
                        TextPrimitive::new(
                            slice.percentage_text(),
                            x,
                            y,
                            PERCENTAGE_FONT_SIZE_PX,
                            input.theme.text,
                            TextHAlign::Center,
                        )
                        .middle(),
                    )
                    .with_class("pie-percentage"),
                );
            }
        }

        if let Some(title) =
            input.title_element(cx, cy - options.outer_radius - TITLE_OFFSET_PX)
        {
            frame.plot(title);
        }
        frame
    }
}
