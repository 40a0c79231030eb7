use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("site table has {found} columns, expected {expected}")]
    MissingColumn { expected: usize, found: usize },
    #[error("row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },
    #[error(transparent)]
    Polars(#[from] PolarsError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
