use crate::core::{Margin, Viewport};
use crate::flow::{FlowNode, NodeKind};

pub const NODE_WIDTH: f64 = 180.0;
pub const NODE_HEIGHT: f64 = 80.0;
pub const NODE_CORNER_RADIUS: f64 = 16.0;
/// Vertical distance between consecutive node origins in a column.
pub const NODE_SPACING: f64 = 120.0;
/// Distance of the outer columns from the inner edges.
pub const COLUMN_INSET: f64 = 80.0;

/// Inner drawing box of the diagram (viewport minus margins).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowLayout {
    pub inner_width: f64,
    pub inner_height: f64,
}

impl FlowLayout {
    #[must_use]
    pub fn new(viewport: Viewport, margin: Margin) -> Self {
        Self {
            inner_width: f64::from(viewport.width) - margin.left - margin.right,
            inner_height: f64::from(viewport.height) - margin.top - margin.bottom,
        }
    }

    #[must_use]
    pub fn column_x(self, kind: NodeKind) -> f64 {
        match kind {
            NodeKind::Source => COLUMN_INSET,
            NodeKind::Middle => self.inner_width / 2.0 - NODE_WIDTH / 2.0,
            NodeKind::Target => self.inner_width - NODE_WIDTH - COLUMN_INSET,
        }
    }

    /// Places every node: columns by kind, each stack centered on the
    /// vertical mid-line in input order.
    pub fn arrange(self, nodes: &mut [FlowNode]) {
        let center_y = self.inner_height / 2.0;
        for kind in [NodeKind::Source, NodeKind::Middle, NodeKind::Target] {
            let count = nodes.iter().filter(|node| node.kind == kind).count();
            if count == 0 {
                continue;
            }
            let stack_height = (count - 1) as f64 * NODE_SPACING;
            let start_y = center_y - stack_height / 2.0 - NODE_HEIGHT / 2.0;
            let x = self.column_x(kind);
            for (slot, node) in nodes
                .iter_mut()
                .filter(|node| node.kind == kind)
                .enumerate()
            {
                node.x = x;
                node.y = start_y + slot as f64 * NODE_SPACING;
            }
        }
    }
}

/// Right-edge midpoint of a node, where outgoing links start.
#[must_use]
pub fn outlet(node: &FlowNode) -> (f64, f64) {
    (node.x + NODE_WIDTH, node.y + NODE_HEIGHT / 2.0)
}

/// Left-edge midpoint of a node, where incoming links end.
#[must_use]
pub fn inlet(node: &FlowNode) -> (f64, f64) {
    (node.x, node.y + NODE_HEIGHT / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Color;

    #[test]
    fn columns_follow_default_canvas() {
        let layout = FlowLayout::new(Viewport::new(1200, 600), Margin::new(80.0, 50.0, 50.0, 50.0));
        assert_eq!(layout.inner_width, 1100.0);
        assert_eq!(layout.column_x(NodeKind::Source), 80.0);
        assert_eq!(layout.column_x(NodeKind::Middle), 460.0);
        assert_eq!(layout.column_x(NodeKind::Target), 840.0);
    }

    #[test]
    fn stacks_are_centered_on_mid_line() {
        let layout = FlowLayout::new(Viewport::new(1200, 600), Margin::new(80.0, 50.0, 50.0, 50.0));
        let mut nodes = vec![
            FlowNode::new("a", "A", 1.0, NodeKind::Middle, Color::WHITE),
            FlowNode::new("b", "B", 1.0, NodeKind::Middle, Color::WHITE),
            FlowNode::new("c", "C", 1.0, NodeKind::Middle, Color::WHITE),
        ];
        layout.arrange(&mut nodes);

        let mid_line = layout.inner_height / 2.0;
        let centers: Vec<f64> = nodes.iter().map(|n| n.y + NODE_HEIGHT / 2.0).collect();
        assert_eq!(centers, vec![mid_line - 120.0, mid_line, mid_line + 120.0]);
    }

    #[test]
    fn single_nodes_share_one_row_across_columns() {
        let layout = FlowLayout::new(Viewport::new(1200, 600), Margin::new(80.0, 50.0, 50.0, 50.0));
        let mut nodes = vec![
            FlowNode::new("s", "S", 1.0, NodeKind::Source, Color::WHITE),
            FlowNode::new("m", "M", 1.0, NodeKind::Middle, Color::WHITE),
            FlowNode::new("t", "T", 1.0, NodeKind::Target, Color::WHITE),
        ];
        layout.arrange(&mut nodes);

        let expected = layout.inner_height / 2.0 - NODE_HEIGHT / 2.0;
        for node in &nodes {
            assert_eq!(node.y, expected);
        }
    }
}
