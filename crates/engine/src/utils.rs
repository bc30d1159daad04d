use crate::{Edge, Node, NodeData};
use std::collections::HashSet;

pub fn create_node(id: impl Into<String>, data: NodeData) -> Node {
    Node::new(id, data)
}

/// Edge whose id is `"{source}-{target}"`
pub fn create_edge(source: impl Into<String>, target: impl Into<String>) -> Edge {
    let (source, target) = (source.into(), target.into());
    Edge::new(format!("{source}-{target}"), source, target)
}

/// Wrap payloads into nodes of the given type, all at the origin
///
/// The id comes from the `id_key` metadata entry, or is `"node-{index}"`
/// when that entry is missing or empty.
pub fn nodes_from_data(
    items: impl IntoIterator<Item = NodeData>,
    id_key: &str,
    node_type: &str,
) -> Vec<Node> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, data)| {
            let id = data
                .metadata
                .get(id_key)
                .filter(|id| !id.is_empty())
                .cloned()
                .unwrap_or_else(|| format!("node-{index}"));
            Node::new(id, data).with_kind(node_type)
        })
        .collect()
}

/// One edge per entry of each node's `connections` that names an existing node
pub fn edges_from_relations(nodes: &[Node]) -> Vec<Edge> {
    let ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let ids = &ids;

    nodes
        .iter()
        .flat_map(|node| {
            node.data
                .connections
                .iter()
                .filter(move |target| ids.contains(target.as_str()))
                .map(move |target| create_edge(node.id.as_str(), target.as_str()))
        })
        .collect()
}
