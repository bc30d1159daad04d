use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;
use std::collections::HashMap;
use std::hash::Hash;

/// Assign ranks to nodes of a DAG, given one of its topological orders
///
/// Uses a two-pass approach to minimize edge lengths:
/// - First pass: assign each node to the rank after its predecessors
/// - Second pass: move nodes closer to their successors when possible
///
/// Each rank lists its nodes in ascending order.
pub(crate) fn assign_layers<N>(graph: &DiGraphMap<N, ()>, topo_order: &[N]) -> Vec<Vec<N>>
where
    N: Copy + Ord + Hash,
{
    let mut layer_map: HashMap<N, usize> = HashMap::new();

    for &node in topo_order {
        let max_pred_layer = graph
            .neighbors_directed(node, Direction::Incoming)
            .map(|pred| layer_map.get(&pred).map_or(0, |l| l + 1))
            .max()
            .unwrap_or(0);
        layer_map.insert(node, max_pred_layer);
    }

    for &node in topo_order.iter().rev() {
        let layer = layer_map.get(&node).copied().unwrap_or(0);
        let min_succ_layer = graph
            .neighbors_directed(node, Direction::Outgoing)
            .filter_map(|succ| layer_map.get(&succ).copied())
            .min();

        if let Some(min_succ_layer) = min_succ_layer {
            if min_succ_layer > layer + 1 {
                layer_map.insert(node, min_succ_layer - 1);
            }
        }
    }

    let mut nodes: Vec<_> = layer_map.keys().copied().collect();
    nodes.sort();

    let max_layer = layer_map.values().copied().max().unwrap_or(0);
    let mut layers = vec![Vec::new(); max_layer + 1];
    for node in nodes {
        layers[layer_map[&node]].push(node);
    }

    if layer_map.is_empty() {
        layers.clear();
    }
    layers
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn longest_path_ranks() {
        let graph = DiGraphMap::<u32, ()>::from_edges([(1, 2), (2, 3), (1, 3)]);
        let layers = assign_layers(&graph, &[1, 2, 3]);
        assert_eq!(layers, vec![vec![1], vec![2], vec![3]]);
    }

    #[test]
    fn sources_are_pulled_towards_successors() {
        // 4 only feeds 3, it should sit right above it instead of in rank 0
        let graph = DiGraphMap::<u32, ()>::from_edges([(1, 2), (2, 3), (4, 3)]);
        let layers = assign_layers(&graph, &[1, 4, 2, 3]);
        assert_eq!(layers, vec![vec![1], vec![2, 4], vec![3]]);
    }

    #[test]
    fn empty_graph_has_no_ranks() {
        let graph = DiGraphMap::<u32, ()>::new();
        assert!(assign_layers(&graph, &[]).is_empty());
    }
}
