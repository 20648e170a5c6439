//! Error types for czm-analytical

use thiserror::Error;

use crate::specimen::MaterialKind;

pub type Result<T> = std::result::Result<T, ModelError>;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("malformed parameter record: {0}")]
    Record(#[from] serde_json::Error),

    #[error("{kind:?} material needs at least {expected} elastic constants (received {received})")]
    ElasticConstants {
        kind: MaterialKind,
        expected: usize,
        received: usize,
    },

    #[error("record field `{0}` must be an array of numbers")]
    InvalidSeries(&'static str),

    #[error("displacement and reaction force differ in length ({displacement} vs {force})")]
    LengthMismatch { displacement: usize, force: usize },

    #[error("an R-curve needs at least 3 samples (received {0})")]
    TooFewSamples(usize),

    #[error("unknown specimen type: {0}")]
    UnknownSpecimen(String),
}
