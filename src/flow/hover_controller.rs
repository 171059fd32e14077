use tracing::{debug, info};

use crate::error::ChartResult;
use crate::flow::elements::{self, LINK_HOVER_OPACITY, LINK_OPACITY, LinkGeometry};
use crate::render::{ElementId, HitRole, RenderSurface, SurfaceLayer};

use super::{FlowDiagram, TooltipHandle};

impl<S: RenderSurface> FlowDiagram<S> {
    /// Shows the tooltip for link `index` next to canvas point `(x, y)` and
    /// highlights the link.
    ///
    /// Returns `false` when no link is drawn at `index`.
    pub fn hover_link(&mut self, index: usize, x: f64, y: f64) -> ChartResult<bool> {
        let Some(handle) = self.handles.links.get(index).copied().flatten() else {
            return Ok(false);
        };
        if let Some(previous) = self.handles.hovered_link.filter(|&previous| previous != index) {
            self.restyle_link(previous, LINK_OPACITY)?;
        }
        self.restyle_link(index, LINK_HOVER_OPACITY)?;
        self.handles.hovered_link = Some(index);

        let value = self.data.links[index].value;
        let [background, flow, width] = elements::tooltip(value, handle.width, x, y);
        match self.handles.tooltip {
            Some(tooltip) => {
                self.surface.replace_element(tooltip.background, background)?;
                self.surface.replace_element(tooltip.flow, flow)?;
                self.surface.replace_element(tooltip.width, width)?;
            }
            None => {
                self.handles.tooltip = Some(TooltipHandle {
                    background: self.surface.append_element(SurfaceLayer::Overlay, background)?,
                    flow: self.surface.append_element(SurfaceLayer::Overlay, flow)?,
                    width: self.surface.append_element(SurfaceLayer::Overlay, width)?,
                });
            }
        }
        Ok(true)
    }

    /// Hides the tooltip and restores the hovered link's opacity.
    pub fn hover_end(&mut self) -> ChartResult<()> {
        if let Some(index) = self.handles.hovered_link.take() {
            self.restyle_link(index, LINK_OPACITY)?;
        }
        self.hide_tooltip()
    }

    pub(super) fn hide_tooltip(&mut self) -> ChartResult<()> {
        if let Some(tooltip) = self.handles.tooltip.take() {
            for id in [tooltip.background, tooltip.flow, tooltip.width] {
                self.surface.remove_element(id)?;
            }
        }
        Ok(())
    }

    /// Reports a click on a node or link element of this diagram.
    ///
    /// Returns what was clicked, or `None` for foreign or inert elements.
    pub fn click_element(&self, id: ElementId) -> Option<HitRole> {
        let target = self.surface.element(id)?.hit_target?;
        if target.owner != self.token {
            return None;
        }
        match target.role {
            HitRole::Node(index) => {
                let node = self.data.nodes.get(index)?;
                info!(id = %node.id, name = %node.name, value = node.value, "node clicked");
            }
            HitRole::Link(index) => {
                let link = self.data.links.get(index)?;
                info!(
                    source = %link.source,
                    target = %link.target,
                    value = link.value,
                    "link clicked"
                );
            }
            HitRole::Control(_) | HitRole::Datum(_) => return None,
        }
        Some(target.role)
    }

    /// Redraws gradient and path of link `index` from current node positions.
    pub(super) fn restyle_link(&mut self, index: usize, opacity: f64) -> ChartResult<()> {
        let Some(handle) = self.handles.links.get(index).copied().flatten() else {
            return Ok(());
        };
        let source = &self.data.nodes[handle.source];
        let target = &self.data.nodes[handle.target];
        let geometry = LinkGeometry::between(source, target, self.config.margin);
        self.surface.replace_element(
            handle.gradient,
            elements::link_gradient(index, geometry, source.color, target.color),
        )?;
        self.surface.replace_element(
            handle.path,
            elements::link_path(index, geometry, handle.width, opacity, self.token),
        )?;
        debug!(index, opacity, "link restyled");
        Ok(())
    }

    pub(super) fn link_opacity(&self, index: usize) -> f64 {
        if self.handles.hovered_link == Some(index) {
            LINK_HOVER_OPACITY
        } else {
            LINK_OPACITY
        }
    }
}
