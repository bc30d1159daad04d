use petgraph::graphmap::DiGraphMap;
use petgraph::Direction::{Incoming, Outgoing};
use std::collections::HashMap;
use std::hash::Hash;

/// Minimize edge crossings by swapping adjacent nodes in layers
///
/// Uses a greedy local search approach with multiple iterations. Only the
/// edges of the two nodes being swapped are recounted, the rest of the
/// drawing can't change. Ties keep the ascending node order so the result is
/// deterministic.
pub(crate) fn minimize_crossings<N>(
    graph: &DiGraphMap<N, ()>,
    mut layers: Vec<Vec<N>>,
    max_iterations: usize,
) -> (Vec<Vec<N>>, usize)
where
    N: Copy + Ord + Hash,
{
    for _ in 0..max_iterations {
        let mut improved = false;

        for layer_index in 0..layers.len() {
            // Neighboring ranks don't move while this one is swept
            let above = layer_index
                .checked_sub(1)
                .map(|i| slots(&layers[i]))
                .unwrap_or_default();
            let below = layers.get(layer_index + 1).map(|l| slots(l)).unwrap_or_default();
            let ports = |node| Ports::new(graph, node, &above, &below);

            let layer = &mut layers[layer_index];
            for i in 0..layer.len().saturating_sub(1) {
                let (left, right) = (ports(layer[i]), ports(layer[i + 1]));
                let crossings_before = left.crossings_with(&right);
                let crossings_after = right.crossings_with(&left);

                if crossings_after < crossings_before {
                    layer.swap(i, i + 1);
                    improved = true;
                } else if crossings_after == crossings_before && layer[i] > layer[i + 1] {
                    layer.swap(i, i + 1);
                }
            }
        }

        if !improved {
            break;
        }
    }

    let crossings = count_crossings(graph, &layers);
    (layers, crossings)
}

/// Count the number of edge crossings between consecutive layers
pub(crate) fn count_crossings<N>(graph: &DiGraphMap<N, ()>, layers: &[Vec<N>]) -> usize
where
    N: Copy + Ord + Hash,
{
    layers
        .windows(2)
        .map(|pair| count_pair_crossings(graph, &pair[0], &pair[1]))
        .sum()
}

/// Crossings between two consecutive layers, in `O(E log V)`
///
/// Segments are visited by upper then lower slot, and a Fenwick tree over
/// the lower slots tells how many earlier segments end further right.
fn count_pair_crossings<N>(graph: &DiGraphMap<N, ()>, upper: &[N], lower: &[N]) -> usize
where
    N: Copy + Ord + Hash,
{
    let lower_index = slots(lower);

    // (upper index, lower index) for every edge spanning this pair
    let mut segments: Vec<(usize, usize)> = upper
        .iter()
        .enumerate()
        .flat_map(|(i, &node)| {
            graph
                .neighbors_directed(node, Outgoing)
                .filter_map(|target| lower_index.get(&target).map(|&j| (i, j)))
                .collect::<Vec<_>>()
        })
        .collect();
    segments.sort_unstable();

    let mut tree = vec![0_usize; lower.len() + 1];
    let mut crossings = 0;
    for (inserted, &(_, lower_slot)) in segments.iter().enumerate() {
        let mut at_or_left = 0;
        let mut i = lower_slot + 1;
        while i > 0 {
            at_or_left += tree[i];
            i -= i & i.wrapping_neg();
        }
        crossings += inserted - at_or_left;

        let mut i = lower_slot + 1;
        while i < tree.len() {
            tree[i] += 1;
            i += i & i.wrapping_neg();
        }
    }
    crossings
}

fn slots<N: Copy + Hash + Eq>(layer: &[N]) -> HashMap<N, usize> {
    layer.iter().enumerate().map(|(i, &n)| (n, i)).collect()
}

/// Sorted slots of a node's neighbors in the ranks around it
struct Ports {
    above: Vec<usize>,
    below: Vec<usize>,
}

impl Ports {
    fn new<N>(
        graph: &DiGraphMap<N, ()>,
        node: N,
        above: &HashMap<N, usize>,
        below: &HashMap<N, usize>,
    ) -> Self
    where
        N: Copy + Ord + Hash,
    {
        let collect = |direction, slots: &HashMap<N, usize>| {
            let mut ports: Vec<usize> = graph
                .neighbors_directed(node, direction)
                .filter_map(|n| slots.get(&n).copied())
                .collect();
            ports.sort_unstable();
            ports
        };
        Self {
            above: collect(Incoming, above),
            below: collect(Outgoing, below),
        }
    }

    /// Crossings between the edges of `self` and `right` when `self` sits
    /// directly left of `right`
    fn crossings_with(&self, right: &Ports) -> usize {
        inversions(&self.above, &right.above) + inversions(&self.below, &right.below)
    }
}

/// Number of pairs `(l, r)` with `l > r`, both slices sorted
fn inversions(left: &[usize], right: &[usize]) -> usize {
    let mut smaller = 0;
    let mut count = 0;
    for &l in left {
        while smaller < right.len() && right[smaller] < l {
            smaller += 1;
        }
        count += smaller;
    }
    count
}
