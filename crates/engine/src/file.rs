//! Graph files: nodes, edges and optional layout settings stored as RON

use crate::{Edge, LayoutConfig, LayoutResult, LayoutSettings, Node};
use ron::{extensions::Extensions, ser::PrettyConfig, Options};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum GraphFileError {
    #[error("Failed to access graph file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid graph file: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Failed to write graph: {0}")]
    Serialize(#[from] ron::Error),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphFile {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub layout: Option<LayoutSettings>,
}

fn options() -> Options {
    Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
}

impl GraphFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GraphFileError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let file = Self::from_ron(&text)?;
        debug!(
            "Loaded {} nodes and {} edges from {}",
            file.nodes.len(),
            file.edges.len(),
            path.display()
        );
        Ok(file)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), GraphFileError> {
        fs::write(path, self.to_ron()?)?;
        Ok(())
    }

    pub fn from_ron(text: &str) -> Result<Self, GraphFileError> {
        Ok(options().from_str(text)?)
    }

    pub fn to_ron(&self) -> Result<String, GraphFileError> {
        let pretty = PrettyConfig::default().extensions(Extensions::IMPLICIT_SOME);
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    /// Layout selected by the file itself, hierarchical when it has none
    pub fn layout_config(&self) -> LayoutConfig {
        self.layout.as_ref().map(LayoutConfig::from).unwrap_or_default()
    }

    /// Replace nodes and edges with a computed layout
    pub fn with_result(self, result: LayoutResult) -> Self {
        Self {
            nodes: result.nodes,
            edges: result.edges,
            layout: self.layout,
        }
    }
}
