use tracing::debug;

use crate::error::ChartResult;
use crate::interaction::{ZOOM_IN_STEP, ZOOM_OUT_STEP};
use crate::render::RenderSurface;

use super::FlowDiagram;

impl<S: RenderSurface> FlowDiagram<S> {
    /// Scales the plot layer by `factor` around canvas point `(x, y)`.
    ///
    /// Returns `false` when the zoom extent left the scale unchanged.
    pub fn zoom_at(&mut self, factor: f64, x: f64, y: f64) -> ChartResult<bool> {
        if !self.zoom.zoom_at(factor, x, y) {
            return Ok(false);
        }
        debug!(scale = self.zoom.scale(), "zoom");
        self.apply_zoom()?;
        Ok(true)
    }

    pub fn zoom_in(&mut self) -> ChartResult<bool> {
        let (cx, cy) = self.config.viewport().center();
        self.zoom_at(ZOOM_IN_STEP, cx, cy)
    }

    pub fn zoom_out(&mut self) -> ChartResult<bool> {
        let (cx, cy) = self.config.viewport().center();
        self.zoom_at(ZOOM_OUT_STEP, cx, cy)
    }

    /// Returns to the identity transform.
    pub fn reset_zoom(&mut self) -> ChartResult<()> {
        self.zoom.reset();
        debug!("zoom reset");
        self.apply_zoom()
    }
}
