use tracing::{debug, info, warn};

use crate::api::{ExportSink, export_scene_svg};
use crate::error::{ChartError, ChartResult};
use crate::flow::elements::{self, LINK_OPACITY, LinkGeometry};
use crate::interaction::{InteractionState, ZoomState};
use crate::render::{Container, InstanceToken, RenderSurface, SurfaceHost, SurfaceLayer};

use super::{
    FILE_STEM, FlowData, FlowDiagram, FlowDiagramConfig, FlowLayout, LinkHandle, LinkReport,
    NodeHandle, SceneHandles, calculate_flow_width,
};

impl<S: RenderSurface> FlowDiagram<S> {
    /// Resolves `container`, lays out the nodes and draws the diagram.
    pub fn mount<H>(
        host: &mut H,
        container: impl Into<Container>,
        mut data: FlowData,
        config: FlowDiagramConfig,
    ) -> ChartResult<Self>
    where
        H: SurfaceHost<Surface = S>,
    {
        let container = container.into();
        let element = host
            .resolve(&container)
            .ok_or_else(|| ChartError::ContainerNotFound(container.to_string()))?;

        let surface = host.mount_surface(element, config.viewport(), config.background)?;
        FlowLayout::new(config.viewport(), config.margin).arrange(&mut data.nodes);

        let mut diagram = Self {
            surface,
            data,
            config,
            token: InstanceToken::next(),
            zoom: ZoomState::default(),
            pointer: InteractionState::default(),
            handles: SceneHandles::default(),
            report: LinkReport::default(),
        };
        diagram.rebuild()?;
        info!(
            container = %container,
            nodes = diagram.data.nodes.len(),
            links = diagram.data.links.len(),
            skipped = diagram.report.skipped.len(),
            "mounted flow diagram"
        );
        Ok(diagram)
    }

    /// Replaces nodes and links, re-runs the layout and redraws.
    ///
    /// The current zoom is kept.
    pub fn update_data(&mut self, mut data: FlowData) -> ChartResult<()> {
        FlowLayout::new(self.config.viewport(), self.config.margin).arrange(&mut data.nodes);
        debug!(nodes = data.nodes.len(), links = data.links.len(), "flow data updated");
        self.data = data;
        self.pointer = InteractionState::default();
        self.rebuild()
    }

    /// Replaces the configuration and redraws.
    ///
    /// Nodes are laid out again only when the size or margins changed; the
    /// current zoom is kept.
    pub fn update_config(&mut self, config: FlowDiagramConfig) -> ChartResult<()> {
        let relayout =
            config.viewport() != self.config.viewport() || config.margin != self.config.margin;
        self.surface.configure(config.viewport(), config.background)?;
        if relayout {
            FlowLayout::new(config.viewport(), config.margin).arrange(&mut self.data.nodes);
        }
        debug!(relayout, "flow config updated");
        self.config = config;
        self.rebuild()
    }

    /// Clears the surface and draws every element, recording the handles
    /// used by incremental updates.
    pub(super) fn rebuild(&mut self) -> ChartResult<()> {
        self.surface.clear()?;
        self.handles = SceneHandles::default();
        self.report = LinkReport::default();

        let margin = self.config.margin;
        let settings = self.config.flow_width_settings();
        let max_link_value = self.data.max_link_value().unwrap_or(0.0);

        let mut planned = Vec::with_capacity(self.data.links.len());
        for (index, link) in self.data.links.iter().enumerate() {
            let endpoints = self
                .data
                .node_index(&link.source)
                .zip(self.data.node_index(&link.target));
            let Some((source, target)) = endpoints else {
                warn!(
                    index,
                    source = %link.source,
                    target = %link.target,
                    "skipping link with unknown endpoint"
                );
                self.report.skipped.push(index);
                planned.push(None);
                continue;
            };

            let source_node = &self.data.nodes[source];
            let target_node = &self.data.nodes[target];
            let geometry = LinkGeometry::between(source_node, target_node, margin);
            let width = calculate_flow_width(link.value, max_link_value, settings);
            let gradient = self.surface.append_element(
                SurfaceLayer::Defs,
                elements::link_gradient(index, geometry, source_node.color, target_node.color),
            )?;
            planned.push(Some((geometry, gradient, source, target, width)));
        }

        for (index, node) in self.data.nodes.iter().enumerate() {
            self.surface
                .append_element(SurfaceLayer::Defs, elements::node_gradient(index, node))?;
        }

        for (index, plan) in planned.into_iter().enumerate() {
            let Some((geometry, gradient, source, target, width)) = plan else {
                self.handles.links.push(None);
                continue;
            };
            let path = self.surface.append_element(
                SurfaceLayer::Plot,
                elements::link_path(index, geometry, width, LINK_OPACITY, self.token),
            )?;
            self.handles.links.push(Some(LinkHandle {
                gradient,
                path,
                source,
                target,
                width,
            }));
            self.report.drawn += 1;
        }

        for (index, node) in self.data.nodes.iter().enumerate() {
            let rect = self.surface.append_element(
                SurfaceLayer::Plot,
                elements::node_rect(index, node, margin, self.token),
            )?;
            let name = self
                .surface
                .append_element(SurfaceLayer::Plot, elements::node_name(node, margin))?;
            let value = self
                .surface
                .append_element(SurfaceLayer::Plot, elements::node_value(node, margin))?;
            self.handles.nodes.push(NodeHandle { rect, name, value });
        }

        let viewport = self.config.viewport();
        self.surface
            .append_element(SurfaceLayer::Overlay, elements::watermark(viewport))?;
        if self.config.show_statistics {
            for element in elements::statistics_panel(viewport, self.config.statistics) {
                self.surface.append_element(SurfaceLayer::Overlay, element)?;
            }
        }
        if self.config.show_time_filter {
            self.draw_filter_buttons()?;
        }

        self.surface
            .set_layer_transform(SurfaceLayer::Plot, self.zoom.transform())?;
        Ok(())
    }

    /// Markup of the current drawing.
    pub fn svg_markup(&self) -> ChartResult<String> {
        self.surface.serialize()
    }

    /// Delivers the current drawing as `flow-diagram.svg`.
    pub fn export_svg(&self, sink: &mut dyn ExportSink) -> ChartResult<()> {
        export_scene_svg(&self.surface, FILE_STEM, sink)
    }

    /// Delivers the current drawing rasterized as `flow-diagram.png`.
    #[cfg(feature = "cairo-backend")]
    pub fn export_png(&self, sink: &mut dyn ExportSink) -> ChartResult<()> {
        crate::api::export_scene_png(&self.surface, FILE_STEM, sink)
    }

    /// Removes the tooltip, disposes the surface and detaches it.
    pub fn destroy(mut self) {
        if let Err(err) = self.hide_tooltip() {
            debug!(error = %err, "tooltip already gone at destroy");
        }
        self.surface.dispose();
        info!(nodes = self.data.nodes.len(), "destroyed flow diagram");
    }
}
