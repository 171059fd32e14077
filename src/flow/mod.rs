//! Sankey-style flow diagram: three node columns joined by weighted links,
//! with drag, pan/zoom, a link tooltip and fixed overlay panels.

mod config;
mod diagram_init;
mod drag_controller;
pub mod elements;
mod filter_controller;
mod format;
mod hover_controller;
pub mod layout;
mod model;
mod width;
mod zoom_controller;

pub use config::{FilterChangeHandler, FlowDiagramConfig, TimeFilter};
pub use format::format_grouped;
pub use layout::FlowLayout;
pub use model::{FlowData, FlowLink, FlowNode, FlowStatistics, NodeKind};
pub use width::{FlowWidthSettings, calculate_flow_width};

use crate::interaction::{InteractionState, ZoomState};
use crate::render::{ElementId, InstanceToken, RenderSurface, SvgSurface};

/// File stem used by flow diagram exports.
pub const FILE_STEM: &str = "flow-diagram";

/// Outcome of the last link pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkReport {
    pub drawn: usize,
    /// Indices of links whose source or target id matched no node.
    pub skipped: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeHandle {
    rect: ElementId,
    name: ElementId,
    value: ElementId,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct LinkHandle {
    gradient: ElementId,
    path: ElementId,
    source: usize,
    target: usize,
    width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TooltipHandle {
    background: ElementId,
    flow: ElementId,
    width: ElementId,
}

/// Ids of every element the diagram may patch after a full draw.
#[derive(Debug, Clone, Default)]
struct SceneHandles {
    nodes: Vec<NodeHandle>,
    links: Vec<Option<LinkHandle>>,
    filters: Vec<ElementId>,
    tooltip: Option<TooltipHandle>,
    hovered_link: Option<usize>,
}

/// One mounted flow diagram drawing into a surface `S`.
pub struct FlowDiagram<S: RenderSurface = SvgSurface> {
    surface: S,
    data: FlowData,
    config: FlowDiagramConfig,
    token: InstanceToken,
    zoom: ZoomState,
    pointer: InteractionState,
    handles: SceneHandles,
    report: LinkReport,
}

impl<S: RenderSurface> FlowDiagram<S> {
    /// Nodes with their current layout positions.
    #[must_use]
    pub fn data(&self) -> &FlowData {
        &self.data
    }

    #[must_use]
    pub fn config(&self) -> &FlowDiagramConfig {
        &self.config
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn instance_token(&self) -> InstanceToken {
        self.token
    }

    #[must_use]
    pub fn zoom(&self) -> ZoomState {
        self.zoom
    }

    #[must_use]
    pub fn interaction(&self) -> InteractionState {
        self.pointer
    }

    #[must_use]
    pub fn link_report(&self) -> &LinkReport {
        &self.report
    }

    #[must_use]
    pub fn active_filter(&self) -> &TimeFilter {
        &self.config.active_filter
    }

    /// Element id of the rendered box of node `index`.
    #[must_use]
    pub fn node_element(&self, index: usize) -> Option<ElementId> {
        self.handles.nodes.get(index).map(|handle| handle.rect)
    }

    /// Element id of the rendered path of link `index`; `None` when skipped.
    #[must_use]
    pub fn link_element(&self, index: usize) -> Option<ElementId> {
        self.handles
            .links
            .get(index)
            .copied()
            .flatten()
            .map(|handle| handle.path)
    }

    /// Stroke width the link at `index` was drawn with.
    #[must_use]
    pub fn link_width(&self, index: usize) -> Option<f64> {
        self.handles
            .links
            .get(index)
            .copied()
            .flatten()
            .map(|handle| handle.width)
    }

    #[must_use]
    pub fn is_tooltip_visible(&self) -> bool {
        self.handles.tooltip.is_some()
    }
}

impl<S: RenderSurface> std::fmt::Debug for FlowDiagram<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowDiagram")
            .field("nodes", &self.data.nodes.len())
            .field("links", &self.data.links.len())
            .field("token", &self.token)
            .field("zoom", &self.zoom)
            .field("report", &self.report)
            .finish_non_exhaustive()
    }
}
