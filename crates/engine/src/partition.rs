use crate::topology::Topology;
use crate::{apply_layout, nodes_bounds, Edge, GridConfig, LayoutConfig, LayoutResult, Node};
use nodegraph_layout::{Point, Vec2};
use tracing::debug;

/// Horizontal gap between the connected graph and the isolated nodes
pub const UNCONNECTED_MARGIN: f32 = 200.0;

/// Nodes split by whether any edge touches them, input order preserved
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Partition {
    pub connected: Vec<Node>,
    pub unconnected: Vec<Node>,
}

/// Split `nodes` into the ones that are the endpoint of an edge and the
/// isolated ones. Edges leading outside of `nodes` connect nothing.
pub fn connected_nodes(nodes: &[Node], edges: &[Edge]) -> Partition {
    let connected = Topology::new(nodes, edges).connected();

    let mut partition = Partition::default();
    for (node, is_connected) in nodes.iter().zip(connected) {
        if is_connected {
            partition.connected.push(node.clone());
        } else {
            partition.unconnected.push(node.clone());
        }
    }
    partition
}

/// Grid used for the isolated nodes
pub fn unconnected_grid() -> LayoutConfig {
    GridConfig {
        columns: 2,
        spacing: Vec2::new(40.0, 40.0),
    }
    .into()
}

impl Partition {
    /// Lay out both halves independently and put the isolated nodes to the
    /// right of the connected ones
    pub fn compose(&self, edges: &[Edge], config: &LayoutConfig) -> LayoutResult {
        let connected = apply_layout(&self.connected, edges, config);
        let unconnected = apply_layout(&self.unconnected, &[], &unconnected_grid());

        // The isolated grid never starts left of the origin
        let offset = nodes_bounds(&connected.nodes).max.x.max(0.0) + UNCONNECTED_MARGIN;
        debug!(
            "Composing {} connected and {} unconnected nodes, offset {offset}",
            connected.nodes.len(),
            unconnected.nodes.len()
        );

        let mut nodes = connected.nodes;
        nodes.extend(unconnected.nodes.iter().map(|node| {
            node.with_position(Point::new(node.position.x + offset, node.position.y))
        }));

        LayoutResult::new(nodes, edges.to_vec())
    }
}

/// Lay out the connected part of a graph with `config` and park the
/// isolated nodes in a small grid on its right
pub fn layout_with_unconnected(
    nodes: &[Node],
    edges: &[Edge],
    config: &LayoutConfig,
) -> LayoutResult {
    connected_nodes(nodes, edges).compose(edges, config)
}
