//! Key shapes accepted by the positional and label-based accessors

use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

use super::utils::format_labels;
use super::*;

/// A slice over positions with optional, possibly negative bounds and a stride
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Slice {
    pub start: Option<i64>,
    pub stop: Option<i64>,
    pub step: Option<i64>,
}

impl Slice {
    /// Create a new slice
    pub fn new(start: Option<i64>, stop: Option<i64>, step: Option<i64>) -> Self {
        Self { start, stop, step }
    }

    /// Slice covering everything
    pub fn full() -> Self {
        Self::default()
    }

    /// Set the stride
    pub fn step_by(mut self, step: i64) -> Self {
        self.step = Some(step);
        self
    }

    /// Resolve the slice against a sequence of `len` elements
    ///
    /// Bounds are clamped the way ordered sequences clamp them, so the result
    /// never contains an out-of-range position.
    pub fn indices(&self, len: usize) -> Result<Vec<usize>> {
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(DataError::InvalidParameter(
                "slice step cannot be zero".to_string(),
            ));
        }

        let len = len as i64;
        let (lower, upper) = if step > 0 { (0, len) } else { (-1, len - 1) };
        let clamp = |bound: i64| {
            if bound < 0 {
                bound.saturating_add(len).max(lower)
            } else {
                bound.min(upper)
            }
        };
        let start = self
            .start
            .map_or(if step > 0 { lower } else { upper }, clamp);
        let stop = self.stop.map_or(if step > 0 { upper } else { lower }, clamp);

        let mut positions = Vec::new();
        let mut next = Some(start);
        while let Some(i) = next.filter(|&i| (step > 0 && i < stop) || (step < 0 && i > stop)) {
            positions.push(i as usize);
            next = i.checked_add(step);
        }
        Ok(positions)
    }
}

impl From<Range<i64>> for Slice {
    fn from(range: Range<i64>) -> Self {
        Slice::new(Some(range.start), Some(range.end), None)
    }
}

impl From<RangeFrom<i64>> for Slice {
    fn from(range: RangeFrom<i64>) -> Self {
        Slice::new(Some(range.start), None, None)
    }
}

impl From<RangeTo<i64>> for Slice {
    fn from(range: RangeTo<i64>) -> Self {
        Slice::new(None, Some(range.end), None)
    }
}

impl From<RangeFull> for Slice {
    fn from(_: RangeFull) -> Self {
        Slice::full()
    }
}

/// Every key shape the accessors understand
///
/// Arrays, Series and Indexes used as keys are materialized into
/// [`Key::Many`]. Whether a collection is a boolean mask or a list of
/// positions/labels is decided by [`is_boolean_mask`] and nowhere else.
#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    /// A single position or label
    One(Scalar),
    /// A positional slice
    Slice(Slice),
    /// A collection of positions, labels, or a boolean mask
    Many(Vec<Scalar>),
}

impl Key {
    /// Whether this key selects by boolean mask
    pub fn is_mask(&self) -> bool {
        matches!(self, Key::Many(items) if is_boolean_mask(items))
    }

    fn describe(&self) -> String {
        match self {
            Key::One(s) => s.repr(),
            Key::Slice(s) => format!("{s:?}"),
            Key::Many(items) => format_labels(items),
        }
    }

    pub(crate) fn invalid(&self) -> DataError {
        DataError::InvalidKey {
            key: self.describe(),
        }
    }
}

macro_rules! key_from_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Key {
                fn from(value: $ty) -> Self {
                    Key::One(value.into())
                }
            }
        )*
    };
}

key_from_scalar!(Scalar, &Scalar, i64, i32, u32, f64, bool, &str, String);

impl From<Slice> for Key {
    fn from(slice: Slice) -> Self {
        Key::Slice(slice)
    }
}

macro_rules! key_from_range {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Key {
                fn from(range: $ty) -> Self {
                    Key::Slice(range.into())
                }
            }
        )*
    };
}

key_from_range!(Range<i64>, RangeFrom<i64>, RangeTo<i64>, RangeFull);

impl<T: Into<Scalar>> From<Vec<T>> for Key {
    fn from(items: Vec<T>) -> Self {
        Key::Many(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<Scalar>> From<&[T]> for Key {
    fn from(items: &[T]) -> Self {
        Key::Many(items.iter().cloned().map(Into::into).collect())
    }
}

impl From<&Array> for Key {
    fn from(array: &Array) -> Self {
        Key::Many(array.to_vec())
    }
}

impl From<&Series> for Key {
    fn from(series: &Series) -> Self {
        Key::Many(series.to_vec())
    }
}

impl From<&Index> for Key {
    fn from(index: &Index) -> Self {
        Key::Many(index.values().to_vec())
    }
}

/// Positions a key resolved to
///
/// A single label that occurs once (or a single integer position) resolves to
/// a bare position; everything else resolves to an ordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Positions {
    One(usize),
    Many(Vec<usize>),
}

impl Positions {
    pub fn len(&self) -> usize {
        match self {
            Positions::One(_) => 1,
            Positions::Many(positions) => positions.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_slice(&self) -> &[usize] {
        match self {
            Positions::One(position) => std::slice::from_ref(position),
            Positions::Many(positions) => positions,
        }
    }

    pub fn into_vec(self) -> Vec<usize> {
        match self {
            Positions::One(position) => vec![position],
            Positions::Many(positions) => positions,
        }
    }
}

impl PartialEq<usize> for Positions {
    fn eq(&self, other: &usize) -> bool {
        matches!(self, Positions::One(p) if p == other)
    }
}

impl PartialEq<Vec<usize>> for Positions {
    fn eq(&self, other: &Vec<usize>) -> bool {
        matches!(self, Positions::Many(ps) if ps == other)
    }
}

/// Result of a read: a single value or a new container
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<T> {
    One(Scalar),
    Many(T),
}

impl<T> Selection<T> {
    pub fn is_one(&self) -> bool {
        matches!(self, Selection::One(_))
    }

    pub fn one(self) -> Option<Scalar> {
        match self {
            Selection::One(value) => Some(value),
            Selection::Many(_) => None,
        }
    }

    pub fn many(self) -> Option<T> {
        match self {
            Selection::One(_) => None,
            Selection::Many(container) => Some(container),
        }
    }
}

/// Normalize a possibly negative position against `len`
pub(crate) fn normalize_position(position: i64, len: usize) -> Result<usize> {
    let resolved = if position < 0 {
        position + len as i64
    } else {
        position
    };
    if resolved < 0 || resolved >= len as i64 {
        return Err(DataError::IndexOutOfBounds {
            index: position,
            len,
        });
    }
    Ok(resolved as usize)
}

/// Positions selected by a boolean mask; an empty collection selects nothing
pub(crate) fn mask_positions(mask: &[Scalar], len: usize) -> Result<Vec<usize>> {
    if mask.is_empty() {
        return Ok(Vec::new());
    }
    if mask.len() != len {
        return Err(DataError::DimensionMismatch {
            expected: format!("mask length {}", len),
            actual: format!("mask length {}", mask.len()),
        });
    }
    Ok(mask
        .iter()
        .enumerate()
        .filter(|(_, keep)| keep.is_truthy())
        .map(|(i, _)| i)
        .collect())
}

/// Resolve a positional key against a sequence of `len` elements
///
/// Booleans count as the positions 0 and 1 unless the whole collection is a
/// mask.
pub(crate) fn resolve_positions(key: &Key, len: usize) -> Result<Positions> {
    match key {
        Key::One(item) => match item.as_int() {
            Some(position) => Ok(Positions::One(normalize_position(position, len)?)),
            None => Err(key.invalid()),
        },
        Key::Slice(slice) => Ok(Positions::Many(slice.indices(len)?)),
        Key::Many(items) if is_boolean_mask(items) => {
            Ok(Positions::Many(mask_positions(items, len)?))
        }
        Key::Many(items) => items
            .iter()
            .map(|item| match item.as_int() {
                Some(position) => normalize_position(position, len),
                None => Err(key.invalid()),
            })
            .collect::<Result<Vec<_>>>()
            .map(Positions::Many),
    }
}
