use tracing::debug;

use crate::error::ChartResult;
use crate::render::RenderSurface;

use super::{Chart, ChartKind};

impl<K: ChartKind, S: RenderSurface> Chart<K, S> {
    /// Replaces the data wholesale and redraws.
    ///
    /// Empty data clears the plot without error.
    pub fn update_data(&mut self, data: Vec<K::Datum>) -> ChartResult<()> {
        debug!(
            kind = K::FILE_STEM,
            previous = self.data.len(),
            next = data.len(),
            "replace chart data"
        );
        self.data = data;
        self.render()
    }
}
