//! Plain nested-object encoding.
//!
//! ```json
//! [{"id": "1", "title": "...", "children": [{"id": "1.1", ...}]}]
//! ```
//!
//! The root itself is not emitted, only its children.

use serde::{Deserialize, Serialize};

use crate::{
    domain::{title::collapse_whitespace, BuildReport, ControlTree, Identifier, Node, TreeBuilder},
    NodeId,
};

/// One node in the nested-object encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// The identifier, or `null` when absent.
    pub id: Option<String>,
    /// The cleaned title.
    pub title: String,
    /// Child records in insertion order.
    #[serde(default)]
    pub children: Vec<NodeRecord>,
}

impl NodeRecord {
    fn from_node(tree: &ControlTree, node: &Node) -> Self {
        Self {
            id: node.identifier().map(ToString::to_string),
            title: node.title().to_string(),
            children: children(tree, node.children()),
        }
    }
}

fn children(tree: &ControlTree, ids: &[NodeId]) -> Vec<NodeRecord> {
    ids.iter()
        .map(|&id| NodeRecord::from_node(tree, &tree[id]))
        .collect()
}

/// Converts the tree below the root into records.
#[must_use]
pub fn to_records(tree: &ControlTree) -> Vec<NodeRecord> {
    children(tree, tree.top_level())
}

/// Renders the tree as pretty-printed JSON with two-space indentation.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(tree: &ControlTree) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&to_records(tree))
}

/// Parses records previously written by [`to_json`].
///
/// # Errors
///
/// Returns an error if `json` is not a list of node records.
pub fn from_json(json: &str) -> Result<Vec<NodeRecord>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Rebuilds a tree by feeding each record's identifier and title, in
/// depth-first order, back through the [`TreeBuilder`].
///
/// Titles have their whitespace collapsed the same way extracted titles do.
/// Records whose `id` is missing or not a valid identifier contribute no node
/// and are listed in the report; their children are still fed.
#[must_use]
pub fn rebuild(records: &[NodeRecord]) -> (ControlTree, BuildReport) {
    fn feed(builder: &mut TreeBuilder, records: &[NodeRecord]) {
        for record in records {
            let title = collapse_whitespace(&record.title);
            match record.id.as_deref().map(Identifier::try_from) {
                Some(Ok(identifier)) => {
                    builder.add(identifier, title);
                }
                _ => builder.skip(&title),
            }
            feed(builder, &record.children);
        }
    }

    let mut builder = TreeBuilder::new();
    feed(&mut builder, records);
    builder.finish()
}
