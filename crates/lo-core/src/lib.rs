//! LabelOxide core
//!
//! Labeled one-dimensional arrays with vectorized elementwise operators,
//! label-based alignment and dual positional/label-based indexing.

pub mod data;

pub use data::{Array, DataError, Elementwise, ErrorKind, Index, Scalar, Series};

/// Common imports for working with arrays and series
pub mod prelude {
    pub use crate::data::{
        Array, CopyMode, DataError, Elementwise, ErrorKind, Index, Key, LabelMap, Operand,
        Positions, QuantileConfig, QuantileMethod, Scalar, Selection, Series, SeriesBuilder,
        Slice,
    };
}
