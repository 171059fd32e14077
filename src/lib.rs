//! svg-charts: bar, line, pie and scatter charts plus a Sankey-style flow
//! diagram, drawn into a pluggable retained-mode surface.
//!
//! Components mount into a `SurfaceHost` (the headless `Document` ships with
//! the crate), render a backend-agnostic scene and export it as SVG markup
//! or, with the `cairo-backend` feature, as PNG.

pub mod api;
pub mod core;
pub mod error;
pub mod flow;
pub mod interaction;
pub mod render;
pub mod style;
pub mod telemetry;

pub use api::{
    BarChart, Chart, ChartKind, ChartOptions, ExportSink, LineChart, OptionsPatch, PieChart,
    ScatterPlot,
};
pub use error::{ChartError, ChartResult};
pub use flow::{FlowData, FlowDiagram, FlowDiagramConfig};
pub use render::{Container, Document, RenderSurface, SvgSurface};
pub use style::{ChartTheme, PaletteSource, ThemeSource, resolve_palette, resolve_theme};
