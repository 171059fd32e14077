use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{SurfaceElement, SurfaceLayer};

/// Backend-agnostic content for one chart draw pass.
///
/// Chart kinds build a frame from data and options without touching the
/// surface; `RenderSurface::present` then replaces the surface content.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub entries: Vec<(SurfaceLayer, SurfaceElement)>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_element(mut self, layer: SurfaceLayer, element: SurfaceElement) -> Self {
        self.push(layer, element);
        self
    }

    pub fn push(&mut self, layer: SurfaceLayer, element: SurfaceElement) {
        self.entries.push((layer, element));
    }

    pub fn plot(&mut self, element: SurfaceElement) {
        self.push(SurfaceLayer::Plot, element);
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
