mod document;
mod frame;
mod host;
mod primitives;
mod scene;
pub mod svg;
mod svg_surface;

pub use document::Document;
pub use frame::RenderFrame;
pub use host::{Container, ElementRef, SurfaceHost};
pub use primitives::{
    CirclePrimitive, Color, FontWeight, GradientStop, GradientUnits, LinearGradientPrimitive,
    Paint, PathCommand, PathPrimitive, Primitive, RectPrimitive, SectorPrimitive, Stroke,
    TextHAlign, TextPrimitive, TextVAlign,
};
pub use scene::{
    Background, ElementId, HitRole, HitTarget, InstanceToken, Scene, SceneLayer, SurfaceElement,
    SurfaceLayer, Transform,
};
pub use svg_surface::SvgSurface;

use crate::core::Viewport;
use crate::error::ChartResult;

/// Retained drawing surface owned exclusively by one component.
///
/// Mutating calls fail with `ChartError::SurfaceDisposed` once `dispose` ran.
pub trait RenderSurface {
    fn viewport(&self) -> Viewport;

    /// Resizes the surface and repaints its background.
    fn configure(&mut self, viewport: Viewport, background: Background) -> ChartResult<()>;

    /// Drops every element on every layer.
    fn clear(&mut self) -> ChartResult<()>;

    fn append_element(&mut self, layer: SurfaceLayer, element: SurfaceElement)
    -> ChartResult<ElementId>;

    fn replace_element(&mut self, id: ElementId, element: SurfaceElement) -> ChartResult<()>;

    fn remove_element(&mut self, id: ElementId) -> ChartResult<()>;

    fn element(&self, id: ElementId) -> Option<SurfaceElement>;

    fn set_layer_transform(&mut self, layer: SurfaceLayer, transform: Transform) -> ChartResult<()>;

    fn hit_test(&self, x: f64, y: f64) -> Option<(ElementId, HitTarget)>;

    fn element_count(&self) -> usize;

    /// Copy of the current content, used by serializers and rasterizers.
    fn snapshot(&self) -> Scene;

    fn dispose(&mut self);

    fn is_disposed(&self) -> bool;

    /// Replaces the surface content with `frame`.
    fn present(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.clear()?;
        for (layer, element) in &frame.entries {
            self.append_element(*layer, element.clone())?;
        }
        Ok(())
    }

    /// Standalone SVG markup of the current content.
    fn serialize(&self) -> ChartResult<String> {
        if self.is_disposed() {
            return Err(crate::error::ChartError::SurfaceDisposed);
        }
        Ok(svg::write_scene(&self.snapshot()))
    }
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoRenderStats, CairoRenderer, rasterize_png};
