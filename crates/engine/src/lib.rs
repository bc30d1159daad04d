//! Node graph layout
//!
//! Computes positions for the nodes of a graph with one of several
//! strategies, selected by a [`LayoutConfig`]. Every strategy is a pure
//! function of its inputs: only node positions change, everything else is
//! passed through untouched.
//!
//! # Strategies
//!
//! - [`HierarchicalConfig`]: layered layout along a [`Direction`]
//! - [`GridConfig`]: row-major grid
//! - [`MasonryConfig`]: columns of variable height, shortest first
//! - [`RadialConfig`]: most connected node in the center, others on a circle
//! - [`ConcentricConfig`]: rings by distance from the first node
//! - [`ForceConfig`]: currently the radial layout
//! - [`ManualConfig`]: keeps positions as they are
//!
//! [`LayoutScheduler`] reruns the selected strategy whenever its inputs
//! change, and [`layout_with_unconnected`] keeps isolated nodes out of the
//! way of the connected ones.
//!
//! # Example
//!
//! ```
//! use nodegraph_engine::*;
//!
//! let nodes = vec![
//!     create_node("root", NodeData::labelled("Root")),
//!     create_node("leaf", NodeData::labelled("Leaf")),
//! ];
//! let edges = vec![create_edge("root", "leaf")];
//!
//! let result = apply_layout(&nodes, &edges, &LayoutConfig::default());
//! let root = result.position_of("root").unwrap();
//! let leaf = result.position_of("leaf").unwrap();
//! assert!(root.y < leaf.y);
//! ```

mod config;
mod dispatch;
mod file;
mod ids;
mod model;
mod partition;
mod scheduler;
mod strategies;
mod topology;
mod utils;

pub use config::{preset, LayoutSettings, PRESET_NAMES};
pub use dispatch::{apply_layout, LayoutConfig, Strategy};
pub use file::{GraphFile, GraphFileError};
pub use ids::IdGenerator;
pub use model::{
    nodes_bounds, Edge, LayoutResult, Node, NodeData, DEFAULT_NODE_HEIGHT, DEFAULT_NODE_TYPE,
    DEFAULT_NODE_WIDTH,
};
pub use partition::{
    connected_nodes, layout_with_unconnected, unconnected_grid, Partition, UNCONNECTED_MARGIN,
};
pub use scheduler::{Composition, LayoutScheduler, LayoutSnapshot, SchedulerState};
pub use strategies::*;
pub use utils::{create_edge, create_node, edges_from_relations, nodes_from_data};

pub use nodegraph_layout::{Bounds, Direction, Point, Vec2};
