//! In-memory control tree.
//!
//! Nodes live in an arena owned by the [`ControlTree`]; children and parents
//! are referred to by [`NodeId`]. Index `0` is always the synthetic root.

use std::ops::Index;

use super::{
    builder::{BuildReport, TreeBuilder},
    identifier::Identifier,
    node::{Node, NodeId},
};

/// A forest of requirements hanging off a single synthetic root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlTree {
    nodes: Vec<Node>,
}

impl Default for ControlTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlTree {
    /// Creates a tree holding only the root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::root()],
        }
    }

    /// Builds a tree from blobs in assembly order.
    ///
    /// Blobs without a leading identifier are skipped and listed in the
    /// returned report.
    pub fn from_blobs<I, S>(blobs: I) -> (Self, BuildReport)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = TreeBuilder::new();
        for blob in blobs {
            builder.add_blob(blob.as_ref());
        }
        builder.finish()
    }

    /// The synthetic root.
    #[must_use]
    pub fn root(&self) -> &Node {
        &self.nodes[NodeId::ROOT.0]
    }

    /// Looks up a node by index.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// The top-level requirements, in insertion order.
    #[must_use]
    pub fn top_level(&self) -> &[NodeId] {
        self.root().children()
    }

    /// Number of requirement nodes, not counting the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Whether the tree holds no requirements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pre-order traversal of every node below the root.
    ///
    /// Each parent is followed by its whole subtree, children in insertion
    /// order, before its next sibling.
    #[must_use]
    pub fn depth_first(&self) -> DepthFirst<'_> {
        let stack = self.top_level().iter().rev().map(|&id| (id, 1)).collect();
        DepthFirst { tree: self, stack }
    }

    /// All nodes carrying `identifier`, in insertion order.
    pub fn find<'a>(&'a self, identifier: &'a Identifier) -> impl Iterator<Item = NodeId> + 'a {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, node)| node.identifier() == Some(identifier))
            .map(|(index, _)| NodeId(index))
    }

    /// Attaches `node` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not a node of this tree.
    pub(crate) fn attach(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        assert!(parent.0 < self.nodes.len(), "parent {parent} not found in tree");

        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }
}

impl Index<NodeId> for ControlTree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.0]
    }
}

/// A node visited during a [`ControlTree::depth_first`] traversal.
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    /// Index of the visited node.
    pub id: NodeId,
    /// Nesting level below the root; top-level nodes are at level 1.
    pub level: usize,
    /// The visited node.
    pub node: &'a Node,
}

/// Pre-order iterator over a [`ControlTree`].
#[derive(Debug)]
pub struct DepthFirst<'a> {
    tree: &'a ControlTree,
    stack: Vec<(NodeId, usize)>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (id, level) = self.stack.pop()?;
        let node = &self.tree[id];
        self.stack
            .extend(node.children().iter().rev().map(|&child| (child, level + 1)));
        Some(Visit { id, level, node })
    }
}
