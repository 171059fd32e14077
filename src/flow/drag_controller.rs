use tracing::{debug, trace};

use crate::error::{ChartError, ChartResult};
use crate::flow::elements;
use crate::interaction::InteractionMode;
use crate::render::{HitRole, RenderSurface, SurfaceLayer};

use super::FlowDiagram;

impl<S: RenderSurface> FlowDiagram<S> {
    /// Starts a gesture at canvas point `(x, y)`.
    ///
    /// A node starts dragging, a filter button is selected, anything else
    /// starts panning. Returns the role of the element under the pointer.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> ChartResult<Option<HitRole>> {
        let role = self
            .surface
            .hit_test(x, y)
            .filter(|(_, target)| target.owner == self.token)
            .map(|(_, target)| target.role);

        match role {
            Some(HitRole::Node(index)) => {
                let Some(node) = self.data.nodes.get(index) else {
                    return Ok(None);
                };
                let (local_x, local_y) = self.zoom.to_local(x, y);
                let grab = (
                    local_x - self.config.margin.left - node.x,
                    local_y - self.config.margin.top - node.y,
                );
                debug!(id = %node.id, "node drag started");
                self.pointer.on_drag_start(index, x, y, grab);
            }
            Some(HitRole::Control(slot)) => {
                self.select_filter_slot(slot)?;
            }
            _ => self.pointer.on_pan_start(x, y),
        }
        Ok(role)
    }

    /// Continues the active gesture.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<()> {
        let (dx, dy) = self.pointer.on_pointer_move(x, y);
        match self.pointer.mode() {
            InteractionMode::DraggingNode(index) => {
                let (local_x, local_y) = self.zoom.to_local(x, y);
                let (grab_x, grab_y) = self.pointer.grab_offset();
                let node_x = local_x - self.config.margin.left - grab_x;
                let node_y = local_y - self.config.margin.top - grab_y;
                self.place_node(index, node_x, node_y)
            }
            InteractionMode::Panning => {
                self.zoom.pan_by(dx, dy);
                trace!(dx, dy, "pan");
                self.apply_zoom()
            }
            InteractionMode::Idle => Ok(()),
        }
    }

    pub fn pointer_up(&mut self) {
        if let InteractionMode::DraggingNode(index) = self.pointer.mode() {
            if let Some(node) = self.data.nodes.get(index) {
                debug!(id = %node.id, x = node.x, y = node.y, "node drag ended");
            }
        }
        self.pointer.on_pointer_up();
    }

    /// Moves node `id` to layout position `(x, y)` and redraws its links.
    pub fn move_node(&mut self, id: &str, x: f64, y: f64) -> ChartResult<()> {
        let index = self
            .data
            .node_index(id)
            .ok_or_else(|| ChartError::InvalidData(format!("unknown node id: {id}")))?;
        self.place_node(index, x, y)
    }

    fn place_node(&mut self, index: usize, x: f64, y: f64) -> ChartResult<()> {
        let Some(node) = self.data.nodes.get_mut(index) else {
            return Ok(());
        };
        node.x = x;
        node.y = y;

        let node = &self.data.nodes[index];
        let margin = self.config.margin;
        if let Some(handle) = self.handles.nodes.get(index).copied() {
            self.surface
                .replace_element(handle.rect, elements::node_rect(index, node, margin, self.token))?;
            self.surface
                .replace_element(handle.name, elements::node_name(node, margin))?;
            self.surface
                .replace_element(handle.value, elements::node_value(node, margin))?;
        }

        let attached: Vec<usize> = self
            .handles
            .links
            .iter()
            .enumerate()
            .filter_map(|(link, handle)| {
                handle
                    .filter(|handle| handle.source == index || handle.target == index)
                    .map(|_| link)
            })
            .collect();
        for link in attached {
            let opacity = self.link_opacity(link);
            self.restyle_link(link, opacity)?;
        }
        Ok(())
    }

    pub(super) fn apply_zoom(&mut self) -> ChartResult<()> {
        self.surface
            .set_layer_transform(SurfaceLayer::Plot, self.zoom.transform())
    }
}
