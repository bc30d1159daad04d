use petgraph::graphmap::DiGraphMap;
use petgraph::visit::{IntoNeighborsDirected, IntoNodeIdentifiers};
use petgraph::Direction;
use std::collections::HashMap;
use std::hash::Hash;

pub(crate) struct Acyclic<N: Copy + Ord + Hash> {
    pub graph: DiGraphMap<N, ()>,
    /// Reverse DFS finishing order, a valid topological order of `graph`
    pub topological_order: Vec<N>,
    pub reversed: usize,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    OnStack,
    Done,
}

/// Copy `graph` into a DAG by reversing its DFS back edges
///
/// Nodes and successors are visited in ascending order so the same input
/// always yields the same reversals. Self loops are dropped.
pub(crate) fn break_cycles<G>(graph: G) -> Acyclic<G::NodeId>
where
    G: IntoNodeIdentifiers + IntoNeighborsDirected,
    G::NodeId: Copy + Ord + Hash,
{
    let mut nodes: Vec<_> = graph.node_identifiers().collect();
    nodes.sort();

    let mut dag = DiGraphMap::new();
    for &node in &nodes {
        dag.add_node(node);
    }

    let successors = |node| {
        let mut succ: Vec<_> = graph
            .neighbors_directed(node, Direction::Outgoing)
            .filter(|&s| s != node)
            .collect();
        succ.sort();
        succ.dedup();
        succ
    };

    let mut visits = HashMap::new();
    let mut finished = Vec::with_capacity(nodes.len());
    let mut reversed = 0;

    for &root in &nodes {
        if visits.contains_key(&root) {
            continue;
        }

        visits.insert(root, Visit::OnStack);
        let mut stack = vec![(root, successors(root), 0)];

        while let Some((node, succ, next)) = stack.last_mut() {
            let node = *node;
            let Some(&target) = succ.get(*next) else {
                visits.insert(node, Visit::Done);
                finished.push(node);
                stack.pop();
                continue;
            };
            *next += 1;

            match visits.get(&target) {
                None => {
                    dag.add_edge(node, target, ());
                    visits.insert(target, Visit::OnStack);
                    stack.push((target, successors(target), 0));
                }
                Some(Visit::OnStack) => {
                    dag.add_edge(target, node, ());
                    reversed += 1;
                }
                Some(Visit::Done) => {
                    dag.add_edge(node, target, ());
                }
            }
        }
    }

    finished.reverse();

    Acyclic {
        graph: dag,
        topological_order: finished,
        reversed,
    }
}
