use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors reported by the comparison pipeline
#[derive(Debug, Error)]
pub enum CompareError {
    /// A document's text could not be obtained.
    /// Only that document is excluded from ranking.
    #[error("cannot read source `{name}`: {source}")]
    UnreadableSource {
        name: String,
        #[source]
        source: io::Error,
    },
    /// The similarity score of a document was read before it was computed
    #[error("cosine similarity of `{name}` is unset")]
    InvalidState { name: String },
    /// A global argument is out of range, e.g. `k == 0`
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("`{}` is not a directory", .0.display())]
    NotADirectory(PathBuf),
}

pub type Result<T> = std::result::Result<T, CompareError>;
