//! Requirement Control Trees
//!
//! Rebuilds the hierarchy of a compliance standard's requirements from the
//! tables extracted out of its source document, and renders it as nested
//! JSON or as a structured YAML control document.

pub mod domain;
pub use domain::{
    BuildReport, Config, ControlTree, Identifier, Node, NodeId, TreeBuilder, UnparseableBlob,
};

mod error;
pub use error::Error;

/// The extraction pipeline from tables to a control tree.
pub mod parser;
pub use parser::{parse_tables, Parsed};

/// Output encodings.
pub mod render;
pub use render::OutputFormat;

/// Reading table dumps and writing rendered output.
pub mod storage;
pub use storage::{write_output, Table, TableDump};
