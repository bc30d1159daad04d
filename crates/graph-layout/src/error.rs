use thiserror::Error;

/// Errors that can occur during layered layout computation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// A node shows up in more than one layer
    #[error("node {0} is assigned to several layers")]
    DuplicateNode(String),

    /// The layers don't cover the graph they were computed for
    #[error("layers hold {layered} nodes but the graph has {expected}")]
    LayerMismatch { layered: usize, expected: usize },
}
