use crate::topology::Topology;
use crate::{Edge, LayoutResult, Node, Strategy};
use nodegraph_layout::{Direction, LayeredLayout, LayoutEngine, Vec2};
use tracing::{debug, warn};

pub const DEFAULT_NODE_SPACING: f32 = 100.0;
pub const DEFAULT_RANK_SPACING: f32 = 150.0;

/// Ranked layout delegated to [`LayeredLayout`]
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchicalConfig {
    pub direction: Direction,
    /// Gap between nodes sharing a rank
    pub node_spacing: f32,
    /// Gap between consecutive ranks
    pub rank_spacing: f32,
}

impl Default for HierarchicalConfig {
    fn default() -> Self {
        Self {
            direction: Direction::TopBottom,
            node_spacing: DEFAULT_NODE_SPACING,
            rank_spacing: DEFAULT_RANK_SPACING,
        }
    }
}

impl HierarchicalConfig {
    fn engine(&self) -> LayeredLayout {
        LayeredLayout::new(self.direction, self.node_spacing, self.rank_spacing)
    }
}

impl Strategy for HierarchicalConfig {
    fn apply(&self, nodes: &[Node], edges: &[Edge]) -> LayoutResult {
        let graph = Topology::new(nodes, edges).directed();
        let sizes: Vec<Vec2> = nodes.iter().map(Node::size).collect();

        let centers = match self.engine().layout(&graph, &sizes) {
            Ok(centers) => centers,
            Err(e) => {
                warn!("Hierarchical layout failed, keeping positions: {e}");
                return LayoutResult::new(nodes.to_vec(), edges.to_vec());
            }
        };
        debug!("Hierarchical layout placed {} nodes", centers.len());

        // The engine returns centers, nodes are anchored on their top-left corner
        let nodes = nodes
            .iter()
            .enumerate()
            .map(|(index, node)| match centers.get(&index) {
                Some(&center) => node.with_position(center - node.size() * 0.5),
                None => node.clone(),
            })
            .collect();

        LayoutResult::new(nodes, edges.to_vec())
    }
}

/// Leaves every node where the caller put it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ManualConfig;

impl Strategy for ManualConfig {
    fn apply(&self, nodes: &[Node], edges: &[Edge]) -> LayoutResult {
        LayoutResult::new(nodes.to_vec(), edges.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_edge, create_node, NodeData};
    use nodegraph_layout::Point;
    use test_log::test;

    fn node(id: &str) -> Node {
        create_node(id, NodeData::labelled(id))
    }

    #[test]
    fn ranks_follow_edges_top_to_bottom() {
        let nodes = vec![node("c"), node("b"), node("a")];
        let edges = vec![create_edge("a", "b"), create_edge("b", "c")];
        let result = HierarchicalConfig::default().apply(&nodes, &edges);

        let a = result.position_of("a").unwrap();
        let b = result.position_of("b").unwrap();
        let c = result.position_of("c").unwrap();
        assert_eq!(b.y - a.y, 120.0 + DEFAULT_RANK_SPACING);
        assert_eq!(c.y - b.y, 120.0 + DEFAULT_RANK_SPACING);
        assert_eq!(a.x, b.x);
        // Top-left anchored inside the 50 unit margin
        assert_eq!(a, Point::new(50.0, 50.0));
    }

    #[test]
    fn left_to_right_spreads_ranks_horizontally() {
        let nodes = vec![node("a"), node("b"), node("c")];
        let edges = vec![create_edge("a", "b"), create_edge("a", "c")];
        let config = HierarchicalConfig {
            direction: Direction::LeftRight,
            node_spacing: 30.0,
            rank_spacing: 60.0,
        };
        let result = config.apply(&nodes, &edges);

        let a = result.position_of("a").unwrap();
        let b = result.position_of("b").unwrap();
        let c = result.position_of("c").unwrap();
        assert_eq!(b.x - a.x, 260.0 + 60.0);
        assert_eq!(b.x, c.x);
        assert_eq!(c.y - b.y, 120.0 + 30.0);
    }

    #[test]
    fn cycles_and_dangling_edges_are_tolerated() {
        let nodes = vec![node("a"), node("b")];
        let edges = vec![
            create_edge("a", "b"),
            create_edge("b", "a"),
            create_edge("b", "nowhere"),
        ];
        let result = HierarchicalConfig::default().apply(&nodes, &edges);

        assert_eq!(result.nodes.len(), 2);
        assert_eq!(result.edges.len(), 3);
        assert!(result.position_of("a").unwrap().y < result.position_of("b").unwrap().y);
    }

    #[test]
    fn manual_keeps_positions() {
        let nodes = vec![
            node("a").with_position(Point::new(12.0, -4.0)),
            node("b").with_position(Point::new(0.5, 99.0)),
        ];
        let result = ManualConfig.apply(&nodes, &[]);
        assert_eq!(result.nodes, nodes);
    }
}
