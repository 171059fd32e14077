use tracing::trace;

use crate::error::ChartResult;
use crate::render::{RenderFrame, RenderSurface};

use super::{Chart, ChartKind, FrameInput};

impl<K: ChartKind, S: RenderSurface> Chart<K, S> {
    /// Builds the frame for the current data and options without drawing.
    #[must_use]
    pub fn build_frame(&self) -> RenderFrame {
        K::build_frame(&FrameInput {
            data: &self.data,
            options: &self.options.kind,
            viewport: self.options.viewport(),
            title: self.options.title.as_deref(),
            theme: &self.theme,
            palette: &self.options.colors,
            owner: self.token,
        })
    }

    /// Clears the surface and redraws everything from scratch.
    pub(super) fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_frame();
        self.surface.present(&frame)?;
        self.render_count += 1;
        trace!(
            kind = K::FILE_STEM,
            elements = frame.len(),
            render_count = self.render_count,
            "render pass"
        );
        Ok(())
    }

    /// Serialized SVG markup of the current surface content.
    pub fn svg_markup(&self) -> ChartResult<String> {
        self.surface.serialize()
    }
}
