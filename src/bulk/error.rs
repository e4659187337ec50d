use thiserror::Error;

use crate::{executor::ExecutionError, parser::ParseError};

/// One failure inside a bulk run.
#[derive(Debug, Error)]
pub enum BulkError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("{method} {path}: {source}")]
    Execution {
        method: String,
        path: String,
        #[source]
        source: ExecutionError,
    },
}
