//! Core data structures for LabelOxide
//!
//! This module provides the labeled one-dimensional containers: a positional
//! [`Array`] of [`Scalar`]s, an ordered duplicate-aware [`Index`] of labels, and
//! the [`Series`] that composes both with label-aligned operators.

mod array;
mod builder;
mod index;
mod key;
mod ops;
mod scalar;
mod series;
mod stats;
mod traits;
mod utils;
mod view;


// Re-exports
pub use array::Array;
pub use builder::SeriesBuilder;
pub use index::Index;
pub use key::{Key, Positions, Selection, Slice};
pub use ops::{BinaryOp, UnaryOp};
pub use scalar::Scalar;
pub use series::Series;
pub use stats::{QuantileConfig, QuantileMethod};
pub use traits::{Elementwise, Operand};
pub use utils::{CopyMode, is_array_like, is_boolean_mask, is_index_like, is_scalar};
pub use view::{IlocSeriesIndexer, LocSeriesIndexer};

// Type aliases for common use cases
pub type FloatArray = ndarray::Array1<f64>;
pub type LabelMap = indexmap::IndexMap<Scalar, Scalar>;

/// Error types specific to data operations
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("Cannot index with: key={key}")]
    InvalidKey { key: String },

    #[error("Label {0} not found in index")]
    LabelNotFound(String),

    #[error("Index out of bounds: index {index}, length {len}")]
    IndexOutOfBounds { index: i64, len: usize },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    #[error("Index doesn't match: labels {0} are not present in both operands")]
    IndexMismatch(String),

    #[error("Cannot append with duplicate labels: {0}")]
    DuplicateLabels(String),

    #[error("Cannot set {target} with {actual}, only Scalars")]
    InvalidAssignment { target: String, actual: &'static str },

    #[error("Unsupported operand type(s) for {op}: '{lhs}' and '{rhs}'")]
    UnsupportedOperand {
        op: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },

    #[error("Bad operand type for {op}: '{operand}'")]
    UnsupportedUnary {
        op: &'static str,
        operand: &'static str,
    },

    #[error("Cannot get {0} of an empty sequence")]
    EmptySequence(&'static str),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Division by zero")]
    ZeroDivision,

    #[error("Integer overflow in {0}")]
    Overflow(&'static str),

    #[error("Operation requires numeric data, got {0}")]
    NonNumericData(&'static str),

    #[error("Statistics error: {0}")]
    Statistics(String),
}

/// Broad failure category of a [`DataError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unresolvable key shape, absent label or out-of-range position
    Lookup,
    /// Length or label-set mismatch between operands, keys and values
    Shape,
    /// Labels shared by both sides of an append
    DuplicateLabel,
    /// Operation or assignment with a value of the wrong kind
    Type,
    /// Empty input or invalid parameter
    Value,
    /// Division by zero or integer overflow
    Arithmetic,
    /// Degenerate input handed to the statistics primitives
    Statistics,
}

impl DataError {
    /// The category this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            DataError::InvalidKey { .. }
            | DataError::LabelNotFound(_)
            | DataError::IndexOutOfBounds { .. } => ErrorKind::Lookup,
            DataError::DimensionMismatch { .. } | DataError::IndexMismatch(_) => ErrorKind::Shape,
            DataError::DuplicateLabels(_) => ErrorKind::DuplicateLabel,
            DataError::InvalidAssignment { .. }
            | DataError::UnsupportedOperand { .. }
            | DataError::UnsupportedUnary { .. }
            | DataError::NonNumericData(_) => ErrorKind::Type,
            DataError::EmptySequence(_) | DataError::InvalidParameter(_) => ErrorKind::Value,
            DataError::ZeroDivision | DataError::Overflow(_) => ErrorKind::Arithmetic,
            DataError::Statistics(_) => ErrorKind::Statistics,
        }
    }
}

/// Result type for data operations
pub type Result<T> = std::result::Result<T, DataError>;
