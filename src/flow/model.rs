use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Column a node is laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Source,
    Middle,
    Target,
}

/// One box in the flow diagram.
///
/// `x` and `y` are layout state in plot coordinates; they are overwritten
/// by the auto-layout at mount and afterwards by dragging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: String,
    pub name: String,
    pub value: f64,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub color: Color,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

impl FlowNode {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        value: f64,
        kind: NodeKind,
        color: Color,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value,
            kind,
            color,
            x: 0.0,
            y: 0.0,
        }
    }
}

/// Directed flow between two nodes, referenced by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowLink {
    pub source: String,
    pub target: String,
    pub value: f64,
}

impl FlowLink {
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>, value: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowData {
    pub nodes: Vec<FlowNode>,
    #[serde(default)]
    pub links: Vec<FlowLink>,
}

impl FlowData {
    #[must_use]
    pub fn new(nodes: Vec<FlowNode>, links: Vec<FlowLink>) -> Self {
        Self { nodes, links }
    }

    pub fn from_json(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|err| ChartError::InvalidData(format!("invalid flow data: {err}")))
    }

    #[must_use]
    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|node| node.id == id)
    }

    /// Largest link value; `None` without links.
    #[must_use]
    pub fn max_link_value(&self) -> Option<f64> {
        self.links
            .iter()
            .map(|link| link.value)
            .reduce(f64::max)
    }
}

/// Summary metrics shown in the statistics panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowStatistics {
    pub trend_goods: f64,
    pub shopping_views: f64,
    pub store_dynamics: f64,
}

impl Default for FlowStatistics {
    fn default() -> Self {
        Self {
            trend_goods: 204.0,
            shopping_views: 65_540.0,
            store_dynamics: 325.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow_data_loads_from_json() {
        let data = FlowData::from_json(
            r##"{
                "nodes": [
                    {"id": "a", "name": "Ads", "value": 1200, "type": "source", "color": "#6366f1"},
                    {"id": "b", "name": "Shop", "value": 800, "type": "target", "color": "#a855f7"}
                ],
                "links": [{"source": "a", "target": "b", "value": 800}]
            }"##,
        )
        .expect("flow data");

        assert_eq!(data.nodes[0].kind, NodeKind::Source);
        assert_eq!(data.node_index("b"), Some(1));
        assert_eq!(data.max_link_value(), Some(800.0));
    }

    #[test]
    fn malformed_json_is_invalid_data() {
        let error = FlowData::from_json("{\"nodes\": 3}").expect_err("malformed");
        assert!(matches!(error, ChartError::InvalidData(_)));
    }
}
