use crate::{Edge, LayoutResult, Node, Strategy, DEFAULT_NODE_WIDTH};
use nodegraph_layout::{Point, Vec2};

pub const DEFAULT_GRID_COLUMNS: usize = 3;
pub const DEFAULT_GRID_SPACING: Vec2 = Vec2 { x: 40.0, y: 40.0 };

/// Row-major grid, connectivity is ignored
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    pub columns: usize,
    /// Horizontal and vertical gaps between cells
    pub spacing: Vec2,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_GRID_COLUMNS,
            spacing: DEFAULT_GRID_SPACING,
        }
    }
}

impl Strategy for GridConfig {
    fn apply(&self, nodes: &[Node], edges: &[Edge]) -> LayoutResult {
        // Zero columns is not validated upstream, treat it as a single column
        let columns = self.columns.max(1);

        let nodes = nodes
            .iter()
            .enumerate()
            .map(|(index, node)| {
                let col = (index % columns) as f32;
                let row = (index / columns) as f32;
                let size = node.size();
                node.with_position(Point::new(
                    col * (size.x + self.spacing.x),
                    row * (size.y + self.spacing.y),
                ))
            })
            .collect();

        LayoutResult::new(nodes, edges.to_vec())
    }
}

/// Grid whose nodes drop into the shortest column
///
/// Column width is fixed to the default node width, only heights are
/// measured.
#[derive(Debug, Clone, PartialEq)]
pub struct MasonryConfig {
    pub columns: usize,
    pub spacing: Vec2,
}

impl Default for MasonryConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_GRID_COLUMNS,
            spacing: DEFAULT_GRID_SPACING,
        }
    }
}

impl MasonryConfig {
    /// Place `nodes` and return them along with the final column heights
    pub(crate) fn place(&self, nodes: &[Node]) -> (Vec<Node>, Vec<f32>) {
        let mut column_heights = vec![0.0_f32; self.columns.max(1)];
        let column_width = DEFAULT_NODE_WIDTH + self.spacing.x;

        let nodes = nodes
            .iter()
            .map(|node| {
                // First shortest column wins ties
                let (col, &top) = column_heights
                    .iter()
                    .enumerate()
                    .fold((0, &f32::INFINITY), |best, candidate| {
                        if candidate.1 < best.1 {
                            candidate
                        } else {
                            best
                        }
                    });

                let placed = node.with_position(Point::new(col as f32 * column_width, top));
                column_heights[col] += node.height() + self.spacing.y;
                placed
            })
            .collect();

        (nodes, column_heights)
    }
}

impl Strategy for MasonryConfig {
    fn apply(&self, nodes: &[Node], edges: &[Edge]) -> LayoutResult {
        let (nodes, _) = self.place(nodes);
        LayoutResult::new(nodes, edges.to_vec())
    }
}
