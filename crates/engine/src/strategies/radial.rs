use crate::topology::Topology;
use crate::{Edge, LayoutResult, Node, Strategy};
use nodegraph_layout::Point;
use std::collections::{BTreeMap, VecDeque};
use std::f32::consts::TAU;
use tracing::debug;

pub const DEFAULT_RADIUS: f32 = 200.0;

/// Most connected node in the center, everything else on one circle
///
/// Nodes are placed in descending degree order but returned in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialConfig {
    pub radius: f32,
    pub center: Point,
}

impl Default for RadialConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            center: Point::origin(),
        }
    }
}

impl Strategy for RadialConfig {
    fn apply(&self, nodes: &[Node], edges: &[Edge]) -> LayoutResult {
        match nodes {
            [] => return LayoutResult::new(Vec::new(), edges.to_vec()),
            [single] => {
                return LayoutResult::new(vec![single.with_position(self.center)], edges.to_vec())
            }
            _ => {}
        }

        let topology = Topology::new(nodes, edges);
        let degrees = topology.degrees();

        // Stable, so equally connected nodes keep their input order
        let mut order: Vec<usize> = (0..nodes.len()).collect();
        order.sort_by(|&a, &b| degrees[b].cmp(&degrees[a]));

        // Without edges there is no root and the circle shrinks by half
        let (ring, radius) = if topology.has_edges() {
            (&order[1..], self.radius)
        } else {
            (&order[..], self.radius * 0.5)
        };

        let mut positions = vec![self.center; nodes.len()];
        for (i, &node) in ring.iter().enumerate() {
            let angle = i as f32 / ring.len() as f32 * TAU;
            positions[node] = self.center.polar_offset(angle, radius);
        }

        let nodes = nodes
            .iter()
            .zip(positions)
            .map(|(node, position)| node.with_position(position))
            .collect();
        LayoutResult::new(nodes, edges.to_vec())
    }
}

/// Rings of nodes at equal breadth-first distance from the first node
///
/// Nodes the first node can't reach are treated as depth 0, like the root,
/// and so are stacked on the center. Route disconnected graphs through
/// [`crate::layout_with_unconnected`] to keep them apart.
/// Nodes are returned in input order, not grouped by ring.
#[derive(Debug, Clone, PartialEq)]
pub struct ConcentricConfig {
    /// Distance between two consecutive rings
    pub ring_spacing: f32,
    pub center: Point,
}

impl Default for ConcentricConfig {
    fn default() -> Self {
        Self {
            ring_spacing: DEFAULT_RADIUS,
            center: Point::origin(),
        }
    }
}

impl ConcentricConfig {
    /// Breadth-first depth of every node from the first one
    pub(crate) fn depths(nodes: &[Node], edges: &[Edge]) -> Vec<usize> {
        if nodes.is_empty() {
            return Vec::new();
        }

        let graph = Topology::new(nodes, edges).undirected();
        let mut depths: Vec<Option<usize>> = vec![None; nodes.len()];
        depths[0] = Some(0);
        let mut queue = VecDeque::from([0]);
        while let Some(current) = queue.pop_front() {
            let depth = depths[current].unwrap_or(0);
            for neighbor in graph.neighbors(current) {
                if depths[neighbor].is_none() {
                    depths[neighbor] = Some(depth + 1);
                    queue.push_back(neighbor);
                }
            }
        }

        depths.into_iter().map(|d| d.unwrap_or(0)).collect()
    }
}

impl Strategy for ConcentricConfig {
    fn apply(&self, nodes: &[Node], edges: &[Edge]) -> LayoutResult {
        let depths = Self::depths(nodes, edges);

        let mut rings: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (node, &depth) in depths.iter().enumerate() {
            rings.entry(depth).or_default().push(node);
        }
        debug!("Concentric layout with {} rings", rings.len());

        let mut positions = vec![self.center; nodes.len()];
        for (depth, members) in &rings {
            let radius = *depth as f32 * self.ring_spacing;
            let step = TAU / members.len() as f32;
            for (j, &node) in members.iter().enumerate() {
                positions[node] = self.center.polar_offset(j as f32 * step, radius);
            }
        }

        let nodes = nodes
            .iter()
            .zip(positions)
            .map(|(node, position)| node.with_position(position))
            .collect();
        LayoutResult::new(nodes, edges.to_vec())
    }
}

/// Stand-in for a force-directed layout, there is no simulation and the
/// radial layout is used instead
#[derive(Debug, Clone, PartialEq)]
pub struct ForceConfig {
    pub radius: f32,
    pub center: Point,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            center: Point::origin(),
        }
    }
}

impl Strategy for ForceConfig {
    fn apply(&self, nodes: &[Node], edges: &[Edge]) -> LayoutResult {
        debug!("Force layout requested, using radial placement");
        RadialConfig {
            radius: self.radius,
            center: self.center,
        }
        .apply(nodes, edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_edge, create_node, NodeData};
    use test_log::test;

    const EPSILON: f32 = 1e-3;

    fn node(id: &str) -> Node {
        create_node(id, NodeData::labelled(id))
    }

    fn assert_near(actual: Point, expected: Point) {
        assert!(
            (actual.x - expected.x).abs() < EPSILON && (actual.y - expected.y).abs() < EPSILON,
            "{actual:?} != {expected:?}"
        );
    }

    #[test]
    fn hub_sits_in_the_center() {
        let nodes = vec![node("root"), node("a"), node("b")];
        let edges = vec![create_edge("root", "a"), create_edge("root", "b")];
        let result = RadialConfig::default().apply(&nodes, &edges);

        assert_near(result.position_of("root").unwrap(), Point::origin());
        assert_near(result.position_of("a").unwrap(), Point::new(200.0, 0.0));
        assert_near(result.position_of("b").unwrap(), Point::new(-200.0, 0.0));
    }

    #[test]
    fn most_connected_node_wins_even_when_last() {
        let nodes = vec![node("a"), node("b"), node("c"), node("hub")];
        let edges = vec![
            create_edge("hub", "a"),
            create_edge("b", "hub"),
            create_edge("hub", "c"),
        ];
        let config = RadialConfig {
            radius: 100.0,
            center: Point::new(10.0, 20.0),
        };
        let result = config.apply(&nodes, &edges);

        assert_near(result.position_of("hub").unwrap(), Point::new(10.0, 20.0));
        assert_near(result.position_of("a").unwrap(), Point::new(110.0, 20.0));
        // Output keeps the input order
        let ids: Vec<_> = result.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c", "hub"]);
    }

    #[test]
    fn first_of_equally_connected_nodes_is_the_root() {
        let nodes = vec![node("a"), node("b"), node("y"), node("x"), node("c"), node("d")];
        let edges = vec![
            create_edge("x", "a"),
            create_edge("x", "b"),
            create_edge("y", "c"),
            create_edge("y", "d"),
        ];
        let result = RadialConfig::default().apply(&nodes, &edges);

        assert_near(result.position_of("y").unwrap(), Point::origin());
        // The other hub leads the ring
        assert_near(result.position_of("x").unwrap(), Point::new(200.0, 0.0));
    }

    #[test]
    fn without_edges_all_nodes_share_a_half_radius_circle() {
        let nodes = vec![node("a"), node("b"), node("c"), node("d")];
        let result = RadialConfig::default().apply(&nodes, &[]);

        assert_near(result.nodes[0].position, Point::new(100.0, 0.0));
        assert_near(result.nodes[1].position, Point::new(0.0, 100.0));
        assert_near(result.nodes[2].position, Point::new(-100.0, 0.0));
        assert_near(result.nodes[3].position, Point::new(0.0, -100.0));
    }

    #[test]
    fn dangling_edges_dont_make_a_root() {
        let nodes = vec![node("a"), node("b")];
        let edges = vec![create_edge("a", "ghost")];
        let result = RadialConfig::default().apply(&nodes, &edges);

        assert_near(result.nodes[0].position, Point::new(100.0, 0.0));
        assert_near(result.nodes[1].position, Point::new(-100.0, 0.0));
        assert_eq!(result.edges, edges);
    }

    #[test]
    fn single_node_is_centered() {
        let config = RadialConfig {
            radius: 50.0,
            center: Point::new(-5.0, 7.0),
        };
        let result = config.apply(&[node("only")], &[create_edge("only", "only")]);
        assert_eq!(result.nodes[0].position, Point::new(-5.0, 7.0));
    }

    #[test]
    fn radial_is_deterministic() {
        let nodes: Vec<_> = (0..12).map(|i| node(&format!("n{i}"))).collect();
        let edges: Vec<_> = (1..12)
            .map(|i| create_edge(&format!("n{}", i / 3), &format!("n{i}")))
            .collect();
        let config = RadialConfig::default();
        assert_eq!(config.apply(&nodes, &edges), config.apply(&nodes, &edges));
    }

    #[test]
    fn concentric_rings_follow_depth() {
        let nodes = vec![node("root"), node("a"), node("b"), node("c")];
        let edges = vec![
            create_edge("root", "a"),
            create_edge("b", "root"),
            create_edge("a", "c"),
        ];
        let config = ConcentricConfig {
            ring_spacing: 100.0,
            center: Point::origin(),
        };

        assert_eq!(ConcentricConfig::depths(&nodes, &edges), vec![0, 1, 1, 2]);

        let result = config.apply(&nodes, &edges);
        assert_near(result.position_of("root").unwrap(), Point::origin());
        assert_near(result.position_of("a").unwrap(), Point::new(100.0, 0.0));
        assert_near(result.position_of("b").unwrap(), Point::new(-100.0, 0.0));
        assert_near(result.position_of("c").unwrap(), Point::new(200.0, 0.0));
    }

    #[test]
    fn concentric_stacks_unreachable_nodes_on_the_center() {
        let nodes = vec![node("root"), node("a"), node("island")];
        let edges = vec![create_edge("root", "a")];
        let result = ConcentricConfig::default().apply(&nodes, &edges);

        assert_near(result.position_of("island").unwrap(), Point::origin());
        assert_near(result.position_of("root").unwrap(), Point::origin());
    }

    #[test]
    fn concentric_of_nothing_is_empty() {
        assert!(ConcentricConfig::default().apply(&[], &[]).is_empty());
    }

    #[test]
    fn force_falls_back_to_radial() {
        let nodes = vec![node("root"), node("a"), node("b")];
        let edges = vec![create_edge("root", "a"), create_edge("root", "b")];
        let force = ForceConfig::default().apply(&nodes, &edges);
        let radial = RadialConfig::default().apply(&nodes, &edges);
        assert_eq!(force, radial);
    }
}
