mod bar_chart;
mod chart_init;
mod chart_kind;
mod chart_options;
mod data_controller;
mod export;
mod interaction_controller;
mod line_chart;
mod options_controller;
mod pie_chart;
mod render_coordinator;
mod scatter_chart;

pub use bar_chart::{BarChart, BarKind, BarOptions, BarOptionsPatch};
pub use chart_kind::{ChartKind, FrameInput, TITLE_FONT_SIZE_PX, TITLE_GAP_PX};
pub use chart_options::{
    ChartOptions, DEFAULT_HEIGHT, DEFAULT_WIDTH, OptionsPatch, PointClickHandler,
};
pub use export::{
    DirectorySink, ExportFormat, ExportSink, ExportedFile, MemorySink, export_scene_svg,
};
#[cfg(feature = "cairo-backend")]
pub use export::export_scene_png;
pub use line_chart::{LineChart, LineKind, LineOptions, LineOptionsPatch};
pub use pie_chart::{PieChart, PieKind, PieOptions, PieOptionsPatch};
pub use scatter_chart::{ScatterKind, ScatterOptions, ScatterOptionsPatch, ScatterPlot};

use crate::render::{InstanceToken, RenderSurface, SvgSurface};
use crate::style::ChartTheme;

/// One mounted chart of kind `K` drawing into a surface `S`.
///
/// Created by `Chart::mount`, released by `Chart::destroy`.
pub struct Chart<K: ChartKind, S: RenderSurface = SvgSurface> {
    surface: S,
    data: Vec<K::Datum>,
    options: ChartOptions<K>,
    theme: ChartTheme,
    token: InstanceToken,
    render_count: u64,
}

impl<K: ChartKind, S: RenderSurface> Chart<K, S> {
    #[must_use]
    pub fn data(&self) -> &[K::Datum] {
        &self.data
    }

    #[must_use]
    pub fn options(&self) -> &ChartOptions<K> {
        &self.options
    }

    /// Theme tokens resolved from the current options.
    #[must_use]
    pub fn theme(&self) -> &ChartTheme {
        &self.theme
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn instance_token(&self) -> InstanceToken {
        self.token
    }

    /// Number of completed render passes, including the initial one.
    #[must_use]
    pub fn render_count(&self) -> u64 {
        self.render_count
    }
}

impl<K: ChartKind, S: RenderSurface> std::fmt::Debug for Chart<K, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chart")
            .field("kind", &K::FILE_STEM)
            .field("data_len", &self.data.len())
            .field("options", &self.options)
            .field("token", &self.token)
            .field("render_count", &self.render_count)
            .finish_non_exhaustive()
    }
}
