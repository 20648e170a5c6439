//! Error types for czm-io

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IoError>;

#[derive(Error, Debug)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("line {line}: cannot parse `{token}` as a number")]
    Parse { line: usize, token: String },

    #[error("block `{keyword}` at line {start} holds {found} values, expected {rows}x{cols}")]
    ShapeMismatch {
        keyword: String,
        start: usize,
        rows: usize,
        cols: usize,
        found: usize,
    },

    #[error("block `{keyword}` must span at least one line")]
    EmptyBlock { keyword: String },

    #[error("block `{keyword}` (lines {start}..={stop}) truncated after {lines} lines")]
    Truncated {
        keyword: String,
        start: usize,
        stop: usize,
        lines: usize,
    },

    #[error("history table: {0}")]
    History(String),

    #[error("design of experiments: {0}")]
    Design(String),

    #[error(transparent)]
    Model(#[from] czm_analytical::ModelError),
}
