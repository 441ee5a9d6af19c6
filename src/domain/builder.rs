//! Tree construction by identifier depth.
//!
//! The source tables carry no parent pointers. Each node's parent is the node
//! most recently attached one level up (the "rightmost spine"), falling back
//! to the root when no such node has been seen yet.

use std::collections::HashMap;

use tracing::{debug, trace};

use super::{
    identifier::Identifier,
    node::{Node, NodeId},
    tree::ControlTree,
};

/// A blob dropped because it does not start with an identifier token.
///
/// This is an expected outcome of best-effort extraction, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnparseableBlob {
    /// Position of the blob in the input stream, starting at zero.
    pub position: usize,
    /// The blob text.
    pub text: String,
}

/// An identifier that was attached more than once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duplicate {
    /// The repeated identifier.
    pub identifier: Identifier,
    /// How many nodes carry it.
    pub occurrences: usize,
}

/// Diagnostics gathered while building a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    blobs: usize,
    attached: usize,
    unparseable: Vec<UnparseableBlob>,
    duplicates: Vec<Duplicate>,
}

impl BuildReport {
    /// Number of blobs fed to the builder.
    #[must_use]
    pub const fn blobs(&self) -> usize {
        self.blobs
    }

    /// Number of nodes attached to the tree.
    #[must_use]
    pub const fn attached(&self) -> usize {
        self.attached
    }

    /// Blobs skipped for lack of an identifier, in input order.
    #[must_use]
    pub fn unparseable(&self) -> &[UnparseableBlob] {
        &self.unparseable
    }

    /// Identifiers attached more than once, in order of first appearance.
    ///
    /// Every occurrence is kept in the tree; nothing is merged.
    #[must_use]
    pub fn duplicates(&self) -> &[Duplicate] {
        &self.duplicates
    }
}

/// Result of feeding one blob to the [`TreeBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attachment {
    /// The blob became this node.
    Attached(NodeId),
    /// The blob had no identifier and contributed no node.
    Skipped,
}

/// Incrementally builds a [`ControlTree`].
#[derive(Debug)]
pub struct TreeBuilder {
    tree: ControlTree,
    /// Most recently attached node at each depth. Sparse: depths can be
    /// skipped or revisited on malformed input.
    rightmost: HashMap<usize, NodeId>,
    /// Occurrence count per identifier, with first-appearance order.
    occurrences: Vec<(Identifier, usize)>,
    seen: HashMap<Identifier, usize>,
    report: BuildReport,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    /// Starts a new tree holding only the root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: ControlTree::new(),
            rightmost: HashMap::from([(0, NodeId::ROOT)]),
            occurrences: Vec::new(),
            seen: HashMap::new(),
            report: BuildReport::default(),
        }
    }

    /// Parses `blob` and attaches the resulting node.
    ///
    /// Blobs without a leading identifier are recorded in the report and
    /// otherwise ignored.
    pub fn add_blob(&mut self, blob: &str) -> Attachment {
        let position = self.report.blobs;
        self.report.blobs += 1;

        if let Some(node) = Node::from_blob(blob) {
            Attachment::Attached(self.attach(node))
        } else {
            debug!(position, "skipping blob without identifier");
            self.report.unparseable.push(UnparseableBlob {
                position,
                text: blob.to_string(),
            });
            Attachment::Skipped
        }
    }

    /// Records `text` as an unparseable entry without trying to parse it.
    pub fn skip(&mut self, text: &str) {
        let position = self.report.blobs;
        self.report.blobs += 1;
        self.report.unparseable.push(UnparseableBlob {
            position,
            text: text.to_string(),
        });
    }

    /// Attaches a node with an already-parsed identifier and title.
    pub fn add(&mut self, identifier: Identifier, title: String) -> NodeId {
        self.attach(Node::new(identifier, title))
    }

    fn attach(&mut self, node: Node) -> NodeId {
        let depth = node.depth();
        let parent = self
            .rightmost
            .get(&(depth - 1))
            .copied()
            .unwrap_or(NodeId::ROOT);

        if let Some(identifier) = node.identifier() {
            self.count(identifier);
        }

        let id = self.tree.attach(parent, node);
        self.rightmost.insert(depth, id);
        self.report.attached += 1;

        trace!(%id, %parent, depth, "attached node");
        id
    }

    fn count(&mut self, identifier: &Identifier) {
        if let Some(&slot) = self.seen.get(identifier) {
            self.occurrences[slot].1 += 1;
        } else {
            self.seen.insert(identifier.clone(), self.occurrences.len());
            self.occurrences.push((identifier.clone(), 1));
        }
    }

    /// The tree built so far.
    #[must_use]
    pub const fn tree(&self) -> &ControlTree {
        &self.tree
    }

    /// Finishes construction, discarding the spine index.
    #[must_use]
    pub fn finish(self) -> (ControlTree, BuildReport) {
        let mut report = self.report;
        report.duplicates = self
            .occurrences
            .into_iter()
            .filter(|(_, occurrences)| *occurrences > 1)
            .map(|(identifier, occurrences)| Duplicate {
                identifier,
                occurrences,
            })
            .collect();

        (self.tree, report)
    }
}
