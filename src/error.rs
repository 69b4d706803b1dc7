use std::path::PathBuf;

use thiserror::Error;

/// Problems with the shape of an input file, as opposed to its contents.
/// Bad field values never end up here; they only make a record invalid.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("{}: no header row", path.display())]
    MissingHeader { path: PathBuf },

    #[error("{}: header column {index} is empty after cleaning", path.display())]
    EmptyHeaderName { path: PathBuf, index: usize },
}
