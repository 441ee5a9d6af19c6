//! Output encodings for a control tree.
//!
//! Both encodings walk the tree in the same pre-order: a parent, then its
//! whole subtree, then its next sibling.

pub mod document;
pub mod nested;
pub mod notion;

use serde::{Deserialize, Serialize};

use crate::{domain::Config, ControlTree};

/// The two supported output encodings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Structured document with a metadata header and one record per node.
    #[default]
    Yaml,
    /// Nested `{id, title, children}` objects.
    Json,
}

impl OutputFormat {
    /// Renders `tree` in this encoding.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render(self, tree: &ControlTree, config: &Config) -> Result<String, serde_json::Error> {
        match self {
            Self::Yaml => Ok(document::render(tree, config)),
            Self::Json => nested::to_json(tree),
        }
    }
}
