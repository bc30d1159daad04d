//! Generic graph layout algorithms
//!
//! This crate provides the layered layout used for hierarchical diagrams.
//! It works with any graph implementing petgraph's visitor traits, and
//! returns node centers so callers can anchor them however they like.
//!
//! # Layout Engines
//!
//! - [`LayeredLayout`]: Sugiyama-style layered layout, cycles are broken
//!   before ranking
//!
//! # Example
//!
//! ```
//! use nodegraph_layout::{Direction, LayeredLayout, LayoutEngine, Vec2};
//! use petgraph::graphmap::DiGraphMap;
//!
//! let mut graph = DiGraphMap::new();
//! graph.add_edge(1, 2, ());
//! graph.add_edge(2, 3, ());
//!
//! let engine = LayeredLayout::new(Direction::TopBottom, 100.0, 150.0);
//! let sizes = |_node: i32| Vec2::new(100.0, 50.0);
//!
//! // Simple, single-phase:
//! let positions = engine.layout(&graph, &sizes).unwrap();
//! assert!(positions[&1].y < positions[&2].y);
//!
//! // Or run each step for better control
//! let layers = engine.compute_layers(&graph);
//! let positions = engine.compute_positions(&layers, &sizes).unwrap();
//! ```

mod engine;
mod error;
mod geometry;
mod sizes;

pub mod layered;

pub use engine::LayoutEngine;
pub use error::LayoutError;
pub use geometry::{Bounds, Point, Vec2};
pub use sizes::NodeSizes;

// Re-export petgraph visitor traits for graph abstraction
pub use petgraph::visit::{GraphBase, IntoNeighborsDirected, IntoNodeIdentifiers};

pub use layered::{Direction, LayeredLayout, Layers};
