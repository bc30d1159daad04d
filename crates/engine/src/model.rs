use derive_more::Constructor;
use nodegraph_layout::{Bounds, Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_NODE_WIDTH: f32 = 260.0;
pub const DEFAULT_NODE_HEIGHT: f32 = 120.0;
pub const DEFAULT_NODE_TYPE: &str = "default";

/// Opaque payload carried by a node, never read by the layout strategies
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeData {
    pub label: String,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub url: Option<String>,
    pub metadata: BTreeMap<String, String>,
    /// Ids of the nodes this one links to, see [`crate::edges_from_relations`]
    pub connections: Vec<String>,
}

impl NodeData {
    pub fn labelled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }
}

fn default_kind() -> String {
    DEFAULT_NODE_TYPE.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,

    /// Rendering type tag
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,

    /// Top-left corner, the only field a layout writes
    #[serde(default)]
    pub position: Point,

    /// Rendered size, when the renderer has reported one
    #[serde(default)]
    pub measured: Option<Vec2>,

    #[serde(default)]
    pub data: NodeData,
}

impl Node {
    pub fn new(id: impl Into<String>, data: NodeData) -> Self {
        Self {
            id: id.into(),
            kind: default_kind(),
            position: Point::origin(),
            measured: None,
            data,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_measured(mut self, width: f32, height: f32) -> Self {
        self.measured = Some(Vec2::new(width, height));
        self
    }

    /// Copy of this node moved to `position`
    pub fn with_position(&self, position: Point) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }

    /// Measured size, with the default size standing in for any dimension
    /// that is missing or zero
    pub fn size(&self) -> Vec2 {
        let measured = self.measured.unwrap_or_default();
        Vec2::new(
            non_zero_or(measured.x, DEFAULT_NODE_WIDTH),
            non_zero_or(measured.y, DEFAULT_NODE_HEIGHT),
        )
    }

    pub fn width(&self) -> f32 {
        self.size().x
    }

    pub fn height(&self) -> f32 {
        self.size().y
    }
}

pub(crate) fn non_zero_or(value: f32, default: f32) -> f32 {
    if value == 0.0 || value.is_nan() {
        default
    } else {
        value
    }
}

/// Directed link between two nodes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Constructor)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// Nodes with their computed positions, and the edges to draw between them
#[derive(Debug, Clone, PartialEq, Default, Constructor)]
pub struct LayoutResult {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl LayoutResult {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn position_of(&self, id: &str) -> Option<Point> {
        self.nodes.iter().find(|n| n.id == id).map(|n| n.position)
    }

    pub fn bounds(&self) -> Bounds {
        nodes_bounds(&self.nodes)
    }
}

/// Box around all nodes, using their measured or default sizes
pub fn nodes_bounds(nodes: &[Node]) -> Bounds {
    Bounds::from_rects(nodes.iter().map(|n| (n.position, n.size())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn unmeasured_nodes_use_default_size() {
        let node = Node::new("a", NodeData::default());
        assert_eq!(node.size(), Vec2::new(DEFAULT_NODE_WIDTH, DEFAULT_NODE_HEIGHT));

        let node = node.with_measured(0.0, 80.0);
        assert_eq!(node.size(), Vec2::new(DEFAULT_NODE_WIDTH, 80.0));
    }

    #[test]
    fn moving_a_node_leaves_the_original_alone() {
        let node = Node::new("a", NodeData::labelled("A")).with_kind("card");
        let moved = node.with_position(Point::new(3.0, 4.0));

        assert_eq!(node.position, Point::origin());
        assert_eq!(moved.position, Point::new(3.0, 4.0));
        assert_eq!(moved.id, node.id);
        assert_eq!(moved.data, node.data);
        assert_eq!(moved.kind, "card");
    }

    #[test]
    fn bounds_include_node_sizes() {
        let nodes = vec![
            Node::new("a", NodeData::default()).with_position(Point::new(-10.0, 0.0)),
            Node::new("b", NodeData::default())
                .with_measured(100.0, 50.0)
                .with_position(Point::new(400.0, 300.0)),
        ];
        let bounds = nodes_bounds(&nodes);

        assert_eq!(bounds.min, Point::new(-10.0, 0.0));
        assert_eq!(bounds.max, Point::new(500.0, 350.0));
        assert_eq!(bounds.width(), 510.0);
        assert_eq!(bounds.height(), 350.0);
    }

    #[test]
    fn empty_bounds_are_zero() {
        let bounds = nodes_bounds(&[]);
        assert_eq!(bounds.width(), 0.0);
        assert_eq!(bounds.height(), 0.0);
        assert_eq!(bounds.max, Point::origin());
    }
}
