use crate::Vec2;

/// Extent of each node, queried while positioning
pub trait NodeSizes<N> {
    fn size(&self, node: N) -> Vec2;
}

impl<N, F> NodeSizes<N> for F
where
    F: Fn(N) -> Vec2,
{
    fn size(&self, node: N) -> Vec2 {
        self(node)
    }
}

/// Sizes of index-identified nodes, unknown indices have no extent
impl NodeSizes<usize> for Vec<Vec2> {
    fn size(&self, node: usize) -> Vec2 {
        self.get(node).copied().unwrap_or_default()
    }
}

/// Sizes seen through a flow direction: `x` is the extent along the rank
/// axis and `y` the extent across it
pub(crate) struct Oriented<'a, S> {
    pub sizes: &'a S,
    pub horizontal: bool,
}

impl<N, S: NodeSizes<N>> NodeSizes<N> for Oriented<'_, S> {
    fn size(&self, node: N) -> Vec2 {
        let size = self.sizes.size(node);
        if self.horizontal {
            size
        } else {
            size.transpose()
        }
    }
}
