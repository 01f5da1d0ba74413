//! Positional array of scalars
//!
//! An [`Array`] is an ordered, mutable sequence of [`Scalar`]s addressed by
//! position. Storage is reference counted so that a shallow copy aliases the
//! original: a write through either handle is visible through both.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::key::{normalize_position, resolve_positions};
use super::ops::{combine, dot_product};
use super::utils::check_length;
use super::*;

/// An ordered, mutable sequence of scalars
#[derive(Default, Serialize, Deserialize)]
#[serde(from = "Vec<Scalar>", into = "Vec<Scalar>")]
pub struct Array {
    values: Rc<RefCell<Vec<Scalar>>>,
}

impl Array {
    /// Create a new array from scalars
    pub fn new(values: Vec<Scalar>) -> Self {
        Self {
            values: Rc::new(RefCell::new(values)),
        }
    }

    /// Create an array of `size` copies of `fill`
    pub fn full(size: usize, fill: impl Into<Scalar>) -> Self {
        Self::new(vec![fill.into(); size])
    }

    /// Create an array of integer zeros
    pub fn zeros(size: usize) -> Self {
        Self::full(size, 0)
    }

    /// Create an array of integer ones
    pub fn ones(size: usize) -> Self {
        Self::full(size, 1)
    }

    /// Get the length of the array
    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    /// Check if the array is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the value at a position; negative positions count from the end
    pub fn get(&self, position: i64) -> Result<Scalar> {
        let values = self.values.borrow();
        let position = normalize_position(position, values.len())?;
        Ok(values[position].clone())
    }

    /// Positional read
    ///
    /// A single integer returns the value at that position. A slice, a list of
    /// positions or a boolean mask returns a new array.
    ///
    /// ```
    /// use lo_core::data::{Array, Selection};
    ///
    /// let a = Array::from(vec![10, 20, 30]);
    /// assert_eq!(a.get_item(vec![true, false, true]).unwrap(), Selection::Many(Array::from(vec![10, 30])));
    /// assert_eq!(a.get_item(-1).unwrap(), Selection::One(30.into()));
    /// ```
    pub fn get_item(&self, key: impl Into<Key>) -> Result<Selection<Array>> {
        let positions = resolve_positions(&key.into(), self.len())?;
        Ok(self.select(&positions))
    }

    /// Positional write
    ///
    /// Accepts the same keys as [`Array::get_item`]. A scalar value is written
    /// to every selected position; a collection is written position by
    /// position and must match the number of selected positions. Nothing is
    /// written unless the whole assignment is valid.
    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<Operand>) -> Result<()> {
        let positions = resolve_positions(&key.into(), self.len())?;
        self.assign(&positions, value.into())
    }

    pub(crate) fn select(&self, positions: &Positions) -> Selection<Array> {
        match positions {
            Positions::One(position) => Selection::One(self.at(*position)),
            Positions::Many(positions) => Selection::Many(self.take(positions)),
        }
    }

    /// Value at an already resolved position
    pub(crate) fn at(&self, position: usize) -> Scalar {
        self.values.borrow()[position].clone()
    }

    /// Gather the values at `positions`, which must be in range
    pub(crate) fn take(&self, positions: &[usize]) -> Array {
        let values = self.values.borrow();
        positions.iter().map(|&p| values[p].clone()).collect()
    }

    /// Write `value` to already resolved positions
    pub(crate) fn assign(&mut self, positions: &Positions, value: Operand) -> Result<()> {
        let updates = match (positions, value) {
            (_, Operand::Scalar(value)) => vec![value; positions.len()],
            (Positions::One(position), other) => {
                return Err(DataError::InvalidAssignment {
                    target: format!("position {}", position),
                    actual: other.kind_name(),
                });
            }
            (Positions::Many(selected), other) => {
                let values = other.into_values();
                if values.len() != selected.len() {
                    return Err(DataError::DimensionMismatch {
                        expected: format!("{} values", selected.len()),
                        actual: format!("{} values", values.len()),
                    });
                }
                values
            }
        };

        let mut storage = self.values.borrow_mut();
        for (&position, value) in positions.as_slice().iter().zip(updates) {
            storage[position] = value;
        }
        Ok(())
    }

    /// Overwrite every value, keeping the storage shared with shallow copies
    pub(crate) fn replace(&mut self, values: Vec<Scalar>) {
        *self.values.borrow_mut() = values;
    }

    /// Append one value to the end of the array
    pub fn push(&mut self, value: impl Into<Scalar>) -> &mut Self {
        self.values.borrow_mut().push(value.into());
        self
    }

    /// Apply a function to each value
    pub fn map(&self, func: impl FnMut(&Scalar) -> Scalar) -> Array {
        self.values.borrow().iter().map(func).collect()
    }

    /// Fold the values from `initial`; an empty array returns `initial`
    pub fn reduce<T>(&self, func: impl FnMut(T, &Scalar) -> T, initial: T) -> T {
        self.values.borrow().iter().fold(initial, func)
    }

    /// Sum of the values, starting from integer zero
    pub fn sum(&self) -> Result<Scalar> {
        self.values
            .borrow()
            .iter()
            .try_fold(Scalar::Int(0), |acc, v| BinaryOp::Add.apply(&acc, v))
    }

    /// Largest value; the first one wins on ties
    pub fn max(&self) -> Result<Scalar> {
        if self.is_empty() {
            return Err(DataError::EmptySequence("max"));
        }
        let position = self.extreme(BinaryOp::Gt)?;
        self.get(position as i64)
    }

    /// Smallest value; the first one wins on ties
    pub fn min(&self) -> Result<Scalar> {
        if self.is_empty() {
            return Err(DataError::EmptySequence("min"));
        }
        let position = self.extreme(BinaryOp::Lt)?;
        self.get(position as i64)
    }

    /// Whether every value is truthy; true when empty
    pub fn all(&self) -> bool {
        self.values.borrow().iter().all(Scalar::is_truthy)
    }

    /// Whether any value is truthy; false when empty
    pub fn any(&self) -> bool {
        self.values.borrow().iter().any(Scalar::is_truthy)
    }

    /// Position of the first largest value
    pub fn argmax(&self) -> Result<usize> {
        if self.is_empty() {
            return Err(DataError::EmptySequence("argmax"));
        }
        self.extreme(BinaryOp::Gt)
    }

    /// Position of the first smallest value
    pub fn argmin(&self) -> Result<usize> {
        if self.is_empty() {
            return Err(DataError::EmptySequence("argmin"));
        }
        self.extreme(BinaryOp::Lt)
    }

    /// Position of the first value that beats every earlier one under `op`
    fn extreme(&self, op: BinaryOp) -> Result<usize> {
        let values = self.values.borrow();
        let mut best = 0;
        for (position, value) in values.iter().enumerate().skip(1) {
            if op.apply(value, &values[best])?.is_truthy() {
                best = position;
            }
        }
        Ok(best)
    }

    /// Copy the values into a plain vector
    pub fn to_vec(&self) -> Vec<Scalar> {
        self.values.borrow().clone()
    }

    /// Iterate over a snapshot of the values
    pub fn iter(&self) -> std::vec::IntoIter<Scalar> {
        self.to_vec().into_iter()
    }

    /// Copy the array; a shallow copy shares storage with `self`
    pub fn copy(&self, mode: CopyMode) -> Array {
        match mode {
            CopyMode::Deep => Array::new(self.to_vec()),
            CopyMode::Shallow => Array {
                values: Rc::clone(&self.values),
            },
        }
    }

    /// Whether both handles refer to the same storage
    pub fn shares_storage(&self, other: &Array) -> bool {
        Rc::ptr_eq(&self.values, &other.values)
    }

    /// Materialize `other` as a sequence of `self.len()` values
    pub(crate) fn canonicalize(&self, other: Operand) -> Result<Vec<Scalar>> {
        let len = self.len();
        match other {
            Operand::Scalar(value) => {
                trace!(len, "broadcasting scalar operand");
                Ok(vec![value; len])
            }
            other => {
                let values = other.into_values();
                check_length("Array", len, values.len())?;
                Ok(values)
            }
        }
    }
}

impl Elementwise for Array {
    fn apply_binary(&self, op: BinaryOp, other: Operand, reflected: bool) -> Result<Self> {
        let rhs = self.canonicalize(other)?;
        let values = combine(op, &self.to_vec(), &rhs, reflected)?;
        Ok(Array::new(values))
    }

    fn apply_binary_in_place(&mut self, op: BinaryOp, other: Operand) -> Result<()> {
        let rhs = self.canonicalize(other)?;
        let values = combine(op, &self.to_vec(), &rhs, false)?;
        self.replace(values);
        Ok(())
    }

    fn apply_unary(&self, op: UnaryOp) -> Result<Self> {
        self.values
            .borrow()
            .iter()
            .map(|v| op.apply(v))
            .collect::<Result<Vec<_>>>()
            .map(Array::new)
    }

    fn apply_dot(&self, other: Operand, reflected: bool) -> Result<Scalar> {
        let rhs = self.canonicalize(other)?;
        dot_product(&self.to_vec(), &rhs, reflected)
    }
}

// Clone is a deep copy; use `copy(CopyMode::Shallow)` to alias.
impl Clone for Array {
    fn clone(&self) -> Self {
        self.copy(CopyMode::Deep)
    }
}

impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.shares_storage(other) || *self.values.borrow() == *other.values.borrow()
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Array").field(&*self.values.borrow()).finish()
    }
}

impl fmt::Display for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = self.values.borrow();
        let rendered: Vec<String> = values.iter().map(Scalar::repr).collect();
        write!(f, "Array([{}])", rendered.join(", "))
    }
}

impl<T: Into<Scalar>> From<Vec<T>> for Array {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T: Into<Scalar>> FromIterator<T> for Array {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Array::new(iter.into_iter().map(Into::into).collect())
    }
}

impl From<Array> for Vec<Scalar> {
    fn from(array: Array) -> Self {
        array.to_vec()
    }
}
