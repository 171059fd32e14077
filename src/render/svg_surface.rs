use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::document::{NodeSlot, TreeHandle};
use crate::render::{
    Background, ElementId, HitTarget, RenderSurface, Scene, SurfaceElement, SurfaceLayer, Transform,
};

/// Retained-mode SVG surface backed by a shared `Scene`.
///
/// When created by a `Document` the scene is also reachable from the
/// document node, so the host sees every change immediately.
#[derive(Debug)]
pub struct SvgSurface {
    scene: Rc<RefCell<Scene>>,
    owner: Option<(TreeHandle, NodeSlot)>,
    disposed: bool,
}

impl SvgSurface {
    /// Surface not attached to any host document.
    #[must_use]
    pub fn detached(viewport: Viewport, background: Background) -> Self {
        Self {
            scene: Rc::new(RefCell::new(Scene::new(viewport, background))),
            owner: None,
            disposed: false,
        }
    }

    pub(crate) fn attached(scene: Rc<RefCell<Scene>>, tree: TreeHandle, slot: NodeSlot) -> Self {
        Self {
            scene,
            owner: Some((tree, slot)),
            disposed: false,
        }
    }

    fn live(&self) -> ChartResult<()> {
        if self.disposed {
            return Err(ChartError::SurfaceDisposed);
        }
        Ok(())
    }
}

impl RenderSurface for SvgSurface {
    fn viewport(&self) -> Viewport {
        self.scene.borrow().viewport
    }

    fn configure(&mut self, viewport: Viewport, background: Background) -> ChartResult<()> {
        self.live()?;
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let mut scene = self.scene.borrow_mut();
        scene.viewport = viewport;
        scene.background = background;
        Ok(())
    }

    fn clear(&mut self) -> ChartResult<()> {
        self.live()?;
        self.scene.borrow_mut().clear();
        Ok(())
    }

    fn append_element(
        &mut self,
        layer: SurfaceLayer,
        element: SurfaceElement,
    ) -> ChartResult<ElementId> {
        self.live()?;
        Ok(self.scene.borrow_mut().append(layer, element))
    }

    fn replace_element(&mut self, id: ElementId, element: SurfaceElement) -> ChartResult<()> {
        self.live()?;
        self.scene.borrow_mut().replace(id, element)
    }

    fn remove_element(&mut self, id: ElementId) -> ChartResult<()> {
        self.live()?;
        self.scene.borrow_mut().remove(id).map(|_| ())
    }

    fn element(&self, id: ElementId) -> Option<SurfaceElement> {
        self.scene.borrow().element(id).cloned()
    }

    fn set_layer_transform(&mut self, layer: SurfaceLayer, transform: Transform) -> ChartResult<()> {
        self.live()?;
        self.scene.borrow_mut().set_transform(layer, transform);
        Ok(())
    }

    fn hit_test(&self, x: f64, y: f64) -> Option<(ElementId, HitTarget)> {
        if self.disposed {
            return None;
        }
        self.scene.borrow().hit_test(x, y)
    }

    fn element_count(&self) -> usize {
        self.scene.borrow().element_count()
    }

    fn snapshot(&self) -> Scene {
        self.scene.borrow().clone()
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.scene.borrow_mut().clear();
        if let Some((tree, slot)) = self.owner.take() {
            if let Some(tree) = tree.upgrade() {
                tree.borrow_mut().remove_node(slot);
            }
            trace!(node = slot.index, "detached svg surface");
        }
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}
