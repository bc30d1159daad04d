use crate::{LayoutError, NodeSizes, Point};
use std::collections::HashMap;
use std::hash::Hash;

/// Computes node centers for graphs of type `G`
///
/// Engines pick the graph capabilities they need through `G`, the layered
/// engine only asks for directed neighbor iteration.
pub trait LayoutEngine<G> {
    type NodeId: Copy + Ord + Hash;

    /// Place every node of `graph`, cycles included
    ///
    /// # Errors
    /// Fails when the intermediate layers don't describe `graph`
    fn layout<S>(&self, graph: G, sizes: &S) -> Result<HashMap<Self::NodeId, Point>, LayoutError>
    where
        S: NodeSizes<Self::NodeId>;
}
