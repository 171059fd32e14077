use std::fmt::Debug;

use crate::core::{Margin, PlotArea, Viewport};
use crate::render::{
    FontWeight, HitRole, HitTarget, InstanceToken, RenderFrame, SurfaceElement, TextHAlign,
    TextPrimitive,
};
use crate::style::{ChartTheme, PaletteSource};

/// Title font size shared by every chart kind.
pub const TITLE_FONT_SIZE_PX: f64 = 16.0;
/// Vertical gap between the title baseline and the plot top.
pub const TITLE_GAP_PX: f64 = 10.0;

/// Everything a chart kind needs to turn its data into a frame.
pub struct FrameInput<'a, K: ChartKind> {
    pub data: &'a [K::Datum],
    pub options: &'a K::Options,
    pub viewport: Viewport,
    pub title: Option<&'a str>,
    pub theme: &'a ChartTheme,
    pub palette: &'a PaletteSource,
    pub owner: InstanceToken,
}

impl<K: ChartKind> FrameInput<'_, K> {
    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        PlotArea::inset(self.viewport, Margin::PLOT)
    }

    /// Hit target for the datum at `index`.
    #[must_use]
    pub fn datum_target(&self, index: usize) -> HitTarget {
        HitTarget::new(self.owner, HitRole::Datum(index))
    }

    /// Bold title centered at `(x, y)` in the theme text color.
    #[must_use]
    pub fn title_element(&self, x: f64, y: f64) -> Option<SurfaceElement> {
        self.title.map(|title| {
            SurfaceElement::new(
                TextPrimitive::new(
                    title,
                    x,
                    y,
                    TITLE_FONT_SIZE_PX,
                    self.theme.text,
                    TextHAlign::Center,
                )
                .with_weight(FontWeight::Bold),
            )
            .with_class("chart-title")
        })
    }

    /// Title centered above the margin-inset plot area.
    pub fn push_plot_title(&self, frame: &mut RenderFrame) {
        let plot = self.plot_area();
        if let Some(title) = self.title_element(plot.center_x(), plot.top - TITLE_GAP_PX) {
            frame.plot(title);
        }
    }
}

/// Per-kind behavior plugged into the generic `Chart` lifecycle.
pub trait ChartKind: Sized + 'static {
    type Datum: Clone + Debug;
    type Options: Clone + Debug + Default + PartialEq;
    type OptionsPatch: Clone + Debug + Default;

    /// Base file name used by exports.
    const FILE_STEM: &'static str;

    fn merge_options(options: &mut Self::Options, patch: Self::OptionsPatch);

    /// Builds the complete frame; an empty data slice yields an empty frame.
    fn build_frame(input: &FrameInput<'_, Self>) -> RenderFrame;
}
