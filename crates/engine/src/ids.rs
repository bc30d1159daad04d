/// Sequential ids for nodes and edges created at runtime
///
/// Each generator owns its counters, so independent graphs (and tests)
/// don't observe each other's ids.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    nodes: u64,
    edges: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// `"{prefix}-{n}"`, `n` starting at 1
    pub fn next_node_id(&mut self, prefix: &str) -> String {
        self.nodes += 1;
        format!("{prefix}-{}", self.nodes)
    }

    pub fn next_edge_id(&mut self, prefix: &str) -> String {
        self.edges += 1;
        format!("{prefix}-{}", self.edges)
    }

    pub fn node_id(&mut self) -> String {
        self.next_node_id("node")
    }

    pub fn edge_id(&mut self) -> String {
        self.next_edge_id("edge")
    }

    pub fn reset(&mut self) {
        self.nodes = 0;
        self.edges = 0;
    }
}
