use crate::{Edge, Node};
use petgraph::graphmap::{DiGraphMap, UnGraphMap};
use std::collections::HashMap;
use tracing::debug;

/// Edges of a layout run resolved to node indices
///
/// Edges whose source or target is not among the nodes are left out, so no
/// strategy ever accounts for them. When ids repeat, the first node wins.
#[derive(Debug, Clone)]
pub(crate) struct Topology {
    node_count: usize,
    edges: Vec<(usize, usize)>,
}

impl Topology {
    pub fn new(nodes: &[Node], edges: &[Edge]) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            index.entry(node.id.as_str()).or_insert(i);
        }

        let resolved: Vec<_> = edges
            .iter()
            .filter_map(|e| Some((*index.get(e.source.as_str())?, *index.get(e.target.as_str())?)))
            .collect();

        if resolved.len() != edges.len() {
            debug!(
                "Ignoring {} edges pointing outside of the node set",
                edges.len() - resolved.len()
            );
        }

        Self {
            node_count: nodes.len(),
            edges: resolved,
        }
    }

    pub fn has_edges(&self) -> bool {
        !self.edges.is_empty()
    }

    #[cfg(test)]
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// In-degree plus out-degree of every node, parallel edges counted
    pub fn degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.node_count];
        for &(source, target) in &self.edges {
            degrees[source] += 1;
            degrees[target] += 1;
        }
        degrees
    }

    /// Whether each node is the endpoint of at least one edge
    pub fn connected(&self) -> Vec<bool> {
        let mut connected = vec![false; self.node_count];
        for &(source, target) in &self.edges {
            connected[source] = true;
            connected[target] = true;
        }
        connected
    }

    pub fn directed(&self) -> DiGraphMap<usize, ()> {
        let mut graph = DiGraphMap::with_capacity(self.node_count, self.edges.len());
        for i in 0..self.node_count {
            graph.add_node(i);
        }
        for &(source, target) in &self.edges {
            graph.add_edge(source, target, ());
        }
        graph
    }

    pub fn undirected(&self) -> UnGraphMap<usize, ()> {
        let mut graph = UnGraphMap::with_capacity(self.node_count, self.edges.len());
        for i in 0..self.node_count {
            graph.add_node(i);
        }
        for &(source, target) in &self.edges {
            graph.add_edge(source, target, ());
        }
        graph
    }
}
