use thiserror::Error;

/// An input line that cannot become a rating observation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedRecord {
    #[error("line {line} has {fields} fields, expected 4")]
    FieldCount { line: usize, fields: usize },

    #[error("line {line}: {field} field {value:?} is not an integer")]
    IntField {
        line: usize,
        field: &'static str,
        value: String,
    },
}

/// Why a pair of rating vectors could not be scored.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimilarityError {
    #[error("rating vectors have mismatched dimensions ({left} vs {right})")]
    DimensionMismatch { left: usize, right: usize },

    #[error("similarity is undefined for a zero magnitude vector")]
    Undefined,
}

/// Raised when two rating groups share no keys to compare.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("the rating groups have no overlapping keys")]
pub struct NoOverlap;

/// Failures surfaced through the collaborative filter interface.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error(transparent)]
    Malformed(#[from] MalformedRecord),

    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    #[error("no training data has been loaded")]
    NoTrainingData,

    #[error("unknown filter {0:?}")]
    UnknownFilter(String),
}
