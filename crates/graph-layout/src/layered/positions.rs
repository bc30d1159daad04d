use crate::{NodeSizes, Point, Vec2};
use petgraph::graphmap::DiGraphMap;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

/// Assign top-left coordinates to nodes, ranks laid out along x
///
/// `sizes` must already be oriented (x along the rank axis) and `gaps.x`
/// separates ranks while `gaps.y` separates nodes of a rank.
pub(crate) fn assign_coordinates<N, S>(
    layers: &[Vec<N>],
    graph: &DiGraphMap<N, ()>,
    sizes: &S,
    gaps: Vec2,
    max_position_iterations: usize,
) -> HashMap<N, Point>
where
    N: Copy + Ord + Hash,
    S: NodeSizes<N>,
{
    let mut positions = HashMap::new();

    assign_rank_positions(layers, sizes, &mut positions, gaps);
    assign_cross_positions(
        layers,
        graph,
        &mut positions,
        sizes,
        gaps,
        max_position_iterations,
    );

    positions
}

/// Place each rank in a column as wide as its widest node
fn assign_rank_positions<N, S>(
    layers: &[Vec<N>],
    sizes: &S,
    positions: &mut HashMap<N, Point>,
    gaps: Vec2,
) where
    N: Copy + Ord + Hash,
    S: NodeSizes<N>,
{
    let mut x = 0.0;
    for layer in layers {
        let layer_size = layer
            .iter()
            .map(|&node| sizes.size(node))
            .fold(Vec2::zero(), Vec2::max);

        for &node in layer {
            let node_size = sizes.size(node);
            positions.insert(
                node,
                Point::new(x + (layer_size.x - node_size.x) / 2.0, 0.0),
            );
        }
        x += layer_size.x + gaps.x;
    }
}

/// Stack nodes of each rank, then pull them towards their successors
fn assign_cross_positions<N, S>(
    layers: &[Vec<N>],
    graph: &DiGraphMap<N, ()>,
    positions: &mut HashMap<N, Point>,
    sizes: &S,
    gaps: Vec2,
    max_iterations: usize,
) where
    N: Copy + Ord + Hash,
    S: NodeSizes<N>,
{
    initial_cross_positioning(layers, positions, sizes, gaps);

    // (rank, index within rank) of every node
    let slots: HashMap<N, (usize, usize)> = layers
        .iter()
        .enumerate()
        .flat_map(|(rank, layer)| layer.iter().enumerate().map(move |(i, &n)| (n, (rank, i))))
        .collect();

    for _ in 0..max_iterations {
        let mut changed = false;

        for layer_idx in (0..layers.len().saturating_sub(1)).rev() {
            let layer = &layers[layer_idx];
            for &node in layer {
                let Some(new_y) =
                    calculate_barycenter(node, layer_idx + 1, graph, &slots, positions, sizes)
                else {
                    continue;
                };

                let Some(pos) = positions.get_mut(&node) else {
                    continue;
                };

                if (new_y - pos.y).abs() > 0.1 {
                    pos.y = new_y;
                    changed = true;
                }
            }

            changed |= enforce_spacing(layer, positions, sizes, gaps.y);
        }

        if !changed {
            break;
        }
    }

    normalize_cross_positions(positions);
}

/// Push nodes of a rank apart until consecutive ones are `gap` apart
fn enforce_spacing<N, S>(
    layer: &[N],
    positions: &mut HashMap<N, Point>,
    sizes: &S,
    gap: f32,
) -> bool
where
    N: Copy + Ord + Hash,
    S: NodeSizes<N>,
{
    let cross = |node: &N, positions: &HashMap<N, Point>| positions.get(node).map_or(0.0, |p| p.y);

    let mut sorted_nodes = layer.to_vec();
    sorted_nodes.sort_by(|a, b| {
        cross(a, positions)
            .partial_cmp(&cross(b, positions))
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(b))
    });

    let mut changed = false;
    for pair in sorted_nodes.windows(2) {
        let prev_bottom = cross(&pair[0], positions) + sizes.size(pair[0]).y;
        let Some(curr) = positions.get_mut(&pair[1]) else {
            continue;
        };

        if curr.y < prev_bottom + gap {
            curr.y = prev_bottom + gap;
            changed = true;
        }
    }
    changed
}

/// Calculate the barycenter (average position) of the successors of a node
/// lying in rank `next_rank`
fn calculate_barycenter<N, S>(
    node: N,
    next_rank: usize,
    graph: &DiGraphMap<N, ()>,
    slots: &HashMap<N, (usize, usize)>,
    positions: &HashMap<N, Point>,
    sizes: &S,
) -> Option<f32>
where
    N: Copy + Ord + Hash,
    S: NodeSizes<N>,
{
    let mut successors: Vec<(usize, N)> = graph
        .neighbors(node)
        .filter_map(|next| match slots.get(&next) {
            Some(&(rank, index)) if rank == next_rank => Some((index, next)),
            _ => None,
        })
        .collect();
    // Sum in rank order
    successors.sort_unstable_by_key(|&(index, _)| index);

    let mut sum_y = 0.0;
    let mut count = 0;
    for (_, next_node) in successors {
        if let Some(pos) = positions.get(&next_node) {
            sum_y += pos.y + sizes.size(next_node).y / 2.0;
            count += 1;
        }
    }

    (count > 0).then(|| sum_y / count as f32 - sizes.size(node).y / 2.0)
}

/// Initial cross-axis positioning with uniform spacing
fn initial_cross_positioning<N, S>(
    layers: &[Vec<N>],
    positions: &mut HashMap<N, Point>,
    sizes: &S,
    gaps: Vec2,
) where
    N: Copy + Ord + Hash,
    S: NodeSizes<N>,
{
    for layer in layers {
        let mut y = 0.0;
        for &node in layer {
            if let Some(pos) = positions.get_mut(&node) {
                pos.y = y;
                y += gaps.y + sizes.size(node).y;
            }
        }
    }
}

/// Shift cross-axis positions so the smallest one is zero
fn normalize_cross_positions<N>(positions: &mut HashMap<N, Point>)
where
    N: Copy + Ord + Hash,
{
    let min_y = positions.values().map(|pos| pos.y).fold(f32::INFINITY, f32::min);
    if !min_y.is_finite() {
        return;
    }

    for pos in positions.values_mut() {
        pos.y -= min_y;
    }
}
