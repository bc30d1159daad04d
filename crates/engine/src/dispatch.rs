use crate::strategies::*;
use crate::{Edge, LayoutResult, Node};
use enum_dispatch::enum_dispatch;
use tracing::debug;

/// A position assignment algorithm
///
/// Implementations never modify their inputs, every placed node is a fresh
/// copy, and edges come back unchanged so the renderer still gets them.
#[enum_dispatch]
pub trait Strategy {
    fn apply(&self, nodes: &[Node], edges: &[Edge]) -> LayoutResult;
}

/// Which strategy to run, along with the parameters it cares about
#[enum_dispatch(Strategy)]
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutConfig {
    Hierarchical(HierarchicalConfig),
    Grid(GridConfig),
    Masonry(MasonryConfig),
    Radial(RadialConfig),
    Concentric(ConcentricConfig),
    Force(ForceConfig),
    Manual(ManualConfig),
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig::Hierarchical(HierarchicalConfig::default())
    }
}

impl LayoutConfig {
    pub fn name(&self) -> &'static str {
        match self {
            LayoutConfig::Hierarchical(_) => "hierarchical",
            LayoutConfig::Grid(_) => "grid",
            LayoutConfig::Masonry(_) => "masonry",
            LayoutConfig::Radial(_) => "radial",
            LayoutConfig::Concentric(_) => "concentric",
            LayoutConfig::Force(_) => "force",
            LayoutConfig::Manual(_) => "manual",
        }
    }
}

/// Position `nodes` with the strategy selected by `config`
pub fn apply_layout(nodes: &[Node], edges: &[Edge], config: &LayoutConfig) -> LayoutResult {
    if nodes.is_empty() {
        return LayoutResult::new(Vec::new(), edges.to_vec());
    }

    debug!(
        "Applying {} layout to {} nodes and {} edges",
        config.name(),
        nodes.len(),
        edges.len()
    );
    config.apply(nodes, edges)
}
