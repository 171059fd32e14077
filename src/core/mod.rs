pub mod bar_series;
pub mod line_series;
pub mod pie_series;
pub mod scale;
pub mod scatter_series;
pub mod types;

pub use bar_series::{BarGeometry, BarOrientation, project_bars};
pub use line_series::{LineGeometry, project_line};
pub use pie_series::{SliceGeometry, project_slices};
pub use scale::{LinearScale, extent, xy_scales};
pub use scatter_series::{ScatterGeometry, TrendLine, project_scatter};
pub use types::{CategoryPoint, ExtraFields, Margin, PlotArea, Viewport, XyPoint};
