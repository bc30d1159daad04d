mod acyclic;
mod crossings;
mod layers;
mod positions;

use crate::sizes::Oriented;
use crate::{LayoutEngine, LayoutError, NodeSizes, Point, Vec2};
use petgraph::graphmap::DiGraphMap;
use petgraph::visit::{IntoNeighborsDirected, IntoNodeIdentifiers};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;
use tracing::debug;

use acyclic::break_cycles;
use crossings::minimize_crossings;
use layers::assign_layers;
use positions::assign_coordinates;

/// Flow direction of the ranks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "TB")]
    TopBottom,
    #[serde(rename = "BT")]
    BottomTop,
    #[serde(rename = "LR")]
    LeftRight,
    #[serde(rename = "RL")]
    RightLeft,
}

impl Direction {
    /// Whether ranks follow each other along the x axis
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::LeftRight | Direction::RightLeft)
    }

    /// Parse the two letter form (`TB`, `BT`, `LR`, `RL`)
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "TB" => Some(Direction::TopBottom),
            "BT" => Some(Direction::BottomTop),
            "LR" => Some(Direction::LeftRight),
            "RL" => Some(Direction::RightLeft),
            _ => None,
        }
    }
}

/// Configuration for the layered (Sugiyama-style) layout
#[derive(Debug, Clone)]
pub struct LayeredLayout {
    /// Direction in which ranks follow each other
    pub direction: Direction,

    /// Gap between two nodes of the same rank
    pub node_spacing: f32,

    /// Gap between two consecutive ranks
    pub rank_spacing: f32,

    /// Offset applied to the whole drawing
    pub margin: Vec2,

    /// Maximum iterations for crossing minimization
    pub max_crossing_iterations: usize,

    /// Maximum iterations for cross-axis position optimization
    pub max_position_iterations: usize,
}

impl Default for LayeredLayout {
    fn default() -> Self {
        Self {
            direction: Direction::TopBottom,
            node_spacing: 50.0,
            rank_spacing: 50.0,
            margin: Vec2::new(50.0, 50.0),
            max_crossing_iterations: 10,
            max_position_iterations: 50,
        }
    }
}

impl LayeredLayout {
    pub fn new(direction: Direction, node_spacing: f32, rank_spacing: f32) -> Self {
        Self {
            direction,
            node_spacing,
            rank_spacing,
            ..Default::default()
        }
    }
}

/// Layer structure that can be cached and reused
#[derive(Debug, Clone)]
pub struct Layers<N>
where
    N: Copy + Ord + Hash,
{
    /// Acyclic copy of the input graph, back edges reversed
    pub(crate) graph: DiGraphMap<N, ()>,

    /// Nodes organized into ranks
    pub nodes: Vec<Vec<N>>,

    /// Number of edge crossings (quality metric)
    pub crossings: usize,

    /// Number of edges that had to be reversed to break cycles
    pub reversed_edges: usize,
}

impl LayeredLayout {
    /// Compute layer structure (expensive, cache this)
    ///
    /// This phase breaks cycles, assigns nodes to ranks and minimizes edge
    /// crossings. It only depends on the graph structure, not on node sizes.
    pub fn compute_layers<G>(&self, graph: G) -> Layers<G::NodeId>
    where
        G: IntoNodeIdentifiers + IntoNeighborsDirected,
        G::NodeId: Copy + Ord + Hash,
    {
        let acyclic = break_cycles(graph);
        let layers = assign_layers(&acyclic.graph, &acyclic.topological_order);
        let (layers, crossings) =
            minimize_crossings(&acyclic.graph, layers, self.max_crossing_iterations);

        debug!(
            "Layered {} nodes into {} ranks, {crossings} crossings, {} reversed edges",
            acyclic.graph.node_count(),
            layers.len(),
            acyclic.reversed
        );

        Layers {
            graph: acyclic.graph,
            nodes: layers,
            crossings,
            reversed_edges: acyclic.reversed,
        }
    }

    /// Compute node centers from cached layers (cheap, rerun when sizes change)
    ///
    /// # Errors
    /// Fails when `layers.nodes` was edited so that it no longer holds each
    /// node of the graph exactly once
    pub fn compute_positions<N, S>(
        &self,
        layers: &Layers<N>,
        sizes: &S,
    ) -> Result<HashMap<N, Point>, LayoutError>
    where
        N: Copy + Ord + Hash + Debug,
        S: NodeSizes<N>,
    {
        validate(layers)?;

        // Positions are computed with ranks along x, then rotated into place
        let oriented = Oriented {
            sizes,
            horizontal: self.direction.is_horizontal(),
        };
        let gaps = Vec2::new(self.rank_spacing, self.node_spacing);
        let top_left = assign_coordinates(
            &layers.nodes,
            &layers.graph,
            &oriented,
            gaps,
            self.max_position_iterations,
        );

        let rank_extent = top_left
            .iter()
            .map(|(&node, pos)| pos.x + oriented.size(node).x)
            .fold(0.0, f32::max);

        Ok(top_left
            .into_iter()
            .map(|(node, pos)| {
                let size = oriented.size(node);
                let rank = pos.x + size.x / 2.0;
                let cross = pos.y + size.y / 2.0;
                let center = match self.direction {
                    Direction::LeftRight => Point::new(rank, cross),
                    Direction::RightLeft => Point::new(rank_extent - rank, cross),
                    Direction::TopBottom => Point::new(cross, rank),
                    Direction::BottomTop => Point::new(cross, rank_extent - rank),
                };
                (node, center + self.margin)
            })
            .collect())
    }
}

fn validate<N>(layers: &Layers<N>) -> Result<(), LayoutError>
where
    N: Copy + Ord + Hash + Debug,
{
    let mut seen = HashSet::new();
    for &node in layers.nodes.iter().flatten() {
        if !seen.insert(node) {
            return Err(LayoutError::DuplicateNode(format!("{node:?}")));
        }
    }

    let expected = layers.graph.node_count();
    if seen.len() != expected || seen.iter().any(|&n| !layers.graph.contains_node(n)) {
        return Err(LayoutError::LayerMismatch {
            layered: seen.len(),
            expected,
        });
    }

    Ok(())
}

impl<G> LayoutEngine<G> for LayeredLayout
where
    G: IntoNodeIdentifiers + IntoNeighborsDirected,
    G::NodeId: Copy + Ord + Hash + Debug,
{
    type NodeId = G::NodeId;

    fn layout<S>(&self, graph: G, sizes: &S) -> Result<HashMap<Self::NodeId, Point>, LayoutError>
    where
        S: NodeSizes<Self::NodeId>,
    {
        let layers = self.compute_layers(graph);
        self.compute_positions(&layers, sizes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    const SIZE: Vec2 = Vec2 { x: 100.0, y: 40.0 };

    fn chain() -> DiGraphMap<u32, ()> {
        DiGraphMap::from_edges([(1, 2), (2, 3)])
    }

    #[test]
    fn top_bottom_ranks_go_down() {
        let engine = LayeredLayout::new(Direction::TopBottom, 20.0, 30.0);
        let positions = engine.layout(&chain(), &|_: u32| SIZE).unwrap();

        assert_eq!(positions[&1].y, 50.0 + 20.0);
        assert_eq!(positions[&2].y, positions[&1].y + 40.0 + 30.0);
        assert_eq!(positions[&3].y, positions[&2].y + 40.0 + 30.0);
        assert_eq!(positions[&1].x, positions[&3].x);
    }

    #[test]
    fn left_right_ranks_go_right() {
        let engine = LayeredLayout::new(Direction::LeftRight, 20.0, 30.0);
        let positions = engine.layout(&chain(), &|_: u32| SIZE).unwrap();

        assert_eq!(positions[&1].x, 50.0 + 50.0);
        assert_eq!(positions[&2].x, positions[&1].x + 100.0 + 30.0);
        assert_eq!(positions[&1].y, positions[&2].y);
    }

    #[test]
    fn reversed_directions_mirror() {
        let down = LayeredLayout::new(Direction::TopBottom, 20.0, 30.0)
            .layout(&chain(), &|_: u32| SIZE)
            .unwrap();
        let up = LayeredLayout::new(Direction::BottomTop, 20.0, 30.0)
            .layout(&chain(), &|_: u32| SIZE)
            .unwrap();

        assert_eq!(up[&3].y, down[&1].y);
        assert_eq!(up[&1].y, down[&3].y);

        let left = LayeredLayout::new(Direction::RightLeft, 20.0, 30.0)
            .layout(&chain(), &|_: u32| SIZE)
            .unwrap();
        assert!(left[&1].x > left[&2].x);
        assert!(left[&2].x > left[&3].x);
    }

    #[test]
    fn wide_crossed_ranks_shed_crossings() {
        let n = 300_u32;
        let graph = DiGraphMap::<u32, ()>::from_edges((0..n).map(|i| (i, 2 * n - 1 - i)));
        let engine = LayeredLayout::new(Direction::TopBottom, 20.0, 30.0);

        let layers = engine.compute_layers(&graph);
        let initial = (n * (n - 1) / 2) as usize;
        assert!(layers.crossings < initial);
        assert_eq!(layers.crossings, crossings::count_crossings(&layers.graph, &layers.nodes));

        let positions = engine.compute_positions(&layers, &|_: u32| SIZE).unwrap();
        assert_eq!(positions.len(), 2 * n as usize);
    }

    #[test]
    fn siblings_are_separated_by_node_spacing() {
        let graph = DiGraphMap::<u32, ()>::from_edges([(1, 2), (1, 3)]);
        let engine = LayeredLayout::new(Direction::TopBottom, 25.0, 30.0);
        let positions = engine.layout(&graph, &|_: u32| SIZE).unwrap();

        assert_eq!(positions[&2].y, positions[&3].y);
        assert!((positions[&3].x - positions[&2].x).abs() >= SIZE.x + 25.0 - 1e-3);
    }

    #[test]
    fn cycles_are_laid_out() {
        let graph = DiGraphMap::<u32, ()>::from_edges([(1, 2), (2, 3), (3, 1), (2, 2)]);
        let engine = LayeredLayout::default();
        let layers = engine.compute_layers(&graph);

        assert_eq!(layers.reversed_edges, 1);
        assert_eq!(layers.nodes.len(), 3);

        let positions = engine.compute_positions(&layers, &|_: u32| SIZE).unwrap();
        assert_eq!(positions.len(), 3);
    }

    #[test]
    fn isolated_nodes_share_first_rank() {
        let mut graph = DiGraphMap::<u32, ()>::new();
        graph.add_node(1);
        graph.add_node(2);
        let layers = LayeredLayout::default().compute_layers(&graph);
        assert_eq!(layers.nodes, vec![vec![1, 2]]);
    }

    #[test]
    fn edited_layers_are_rejected() {
        let engine = LayeredLayout::default();
        let mut layers = engine.compute_layers(&chain());
        layers.nodes[0].push(2);

        assert_eq!(
            engine.compute_positions(&layers, &|_: u32| SIZE),
            Err(LayoutError::DuplicateNode("2".to_string()))
        );

        layers.nodes = vec![vec![1]];
        assert_eq!(
            engine.compute_positions(&layers, &|_: u32| SIZE),
            Err(LayoutError::LayerMismatch {
                layered: 1,
                expected: 3
            })
        );
    }

    #[test]
    fn direction_codes() {
        assert_eq!(Direction::from_code("RL"), Some(Direction::RightLeft));
        assert_eq!(Direction::from_code("XX"), None);
        assert!(Direction::LeftRight.is_horizontal());
        assert!(!Direction::BottomTop.is_horizontal());
    }
}
