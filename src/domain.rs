//! Domain models for control tree reconstruction.
//!
//! This module contains the core types: hierarchical identifiers, title
//! extraction, blob assembly, nodes, and the tree with its builder.

/// Blob reassembly from table cells.
pub mod blob;
pub use blob::{Blob, BlobAssembler, CellOutcome};

/// Depth-based tree construction.
pub mod builder;
pub use builder::{Attachment, BuildReport, Duplicate, TreeBuilder, UnparseableBlob};

mod config;
pub use config::{Config, Header};

/// Hierarchical identifier types and matching.
pub mod identifier;
pub use identifier::{Error as IdentifierError, Identifier};

mod node;
pub use node::{Node, NodeId};

pub mod title;

mod tree;
pub use tree::{ControlTree, DepthFirst, Visit};
