use std::fmt;

use super::{
    identifier::Identifier,
    title::{extract, Extracted},
};

/// Index of a node within a [`ControlTree`](super::ControlTree).
///
/// Parent links are stored as indices so that the tree alone owns its nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The synthetic root of every tree.
    pub const ROOT: Self = Self(0);

    /// Position of the node in the tree's arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One requirement in the control tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    identifier: Option<Identifier>,
    title: String,
    depth: usize,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    /// Title given to the synthetic root.
    pub const ROOT_TITLE: &'static str = "ROOT";

    pub(crate) fn root() -> Self {
        Self {
            identifier: None,
            title: Self::ROOT_TITLE.to_string(),
            depth: 0,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Creates a detached node.
    ///
    /// Its depth is the number of identifier segments.
    #[must_use]
    pub fn new(identifier: Identifier, title: String) -> Self {
        Self {
            depth: identifier.depth(),
            identifier: Some(identifier),
            title,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Parses a detached node out of a raw blob.
    ///
    /// Returns `None` if the blob does not start with an identifier token.
    #[must_use]
    pub fn from_blob(blob: &str) -> Option<Self> {
        let Extracted { identifier, title } = extract(blob);
        identifier.map(|identifier| Self::new(identifier, title))
    }

    /// The requirement identifier. `None` only for the root.
    #[must_use]
    pub const fn identifier(&self) -> Option<&Identifier> {
        self.identifier.as_ref()
    }

    /// The cleaned, single-line title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Number of identifier segments; `0` for the root.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// The owning node. `None` only for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child indices in insertion order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether this node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
