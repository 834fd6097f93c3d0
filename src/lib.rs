pub mod key;
mod macros;
mod probing_table;
pub mod util;

pub use probing_table::{Iter, ProbingTable, TableConfig};

use thiserror::Error;

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// The key does not look like `D-DD-DDDDDD-D`
    #[error("Invalid key: {key:?}, expected the pattern D-DD-DDDDDD-D")]
    InvalidKey { key: String },

    /// The key is well formed, but there is no live entry for it
    #[error("No such key: {key}")]
    NoSuchKey { key: String },

    /// Probed every slot without finding an empty one
    #[error("Table is full, probed all {capacity} slots without finding an empty one")]
    TableFull { capacity: usize },

    #[error("Couldnt create a table with zero capacity")]
    ZeroCapacity,
}
