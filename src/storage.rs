/// Writing rendered output to a file or standard output.
pub mod output;
mod tables;

pub use output::write_output;
pub use tables::{Row, Table, TableDump};
