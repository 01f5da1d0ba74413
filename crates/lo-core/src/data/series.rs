//! Series data structure
//!
//! A Series composes an [`Array`] of values with an [`Index`] of labels of
//! the same length, plus an optional name. Reads and writes default to label
//! addressing; binary operators align the right operand by label.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::key::Slice;
use super::ops::{combine, dot_product};
use super::utils::{check_length, format_labels};
use super::*;

/// A labeled, one-dimensional array
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "SeriesRepr", into = "SeriesRepr")]
pub struct Series {
    values: Array,
    index: Index,
    name: Option<Scalar>,
}

#[derive(Serialize, Deserialize)]
struct SeriesRepr {
    values: Array,
    index: Index,
    name: Option<Scalar>,
}

impl TryFrom<SeriesRepr> for Series {
    type Error = DataError;

    fn try_from(repr: SeriesRepr) -> Result<Self> {
        Ok(Series::new(repr.values, repr.index)?.with_optional_name(repr.name))
    }
}

impl From<Series> for SeriesRepr {
    fn from(series: Series) -> Self {
        SeriesRepr {
            values: series.values,
            index: series.index,
            name: series.name,
        }
    }
}

impl Series {
    /// Create a series from values and an index of the same length
    pub fn new(values: impl Into<Array>, index: impl Into<Index>) -> Result<Self> {
        let values = values.into();
        let index = index.into();
        if values.len() != index.len() {
            return Err(DataError::DimensionMismatch {
                expected: format!("length of values ({})", values.len()),
                actual: format!("length of index ({})", index.len()),
            });
        }
        Ok(Self {
            values,
            index,
            name: None,
        })
    }

    /// Create a series labeled `0..n`
    pub fn from_values(values: impl Into<Array>) -> Self {
        let values = values.into();
        let index = Index::range(values.len());
        Self {
            values,
            index,
            name: None,
        }
    }

    /// Create a series from a label to value mapping, in key order
    pub fn from_map(map: LabelMap) -> Self {
        let (labels, values): (Vec<Scalar>, Vec<Scalar>) = map.into_iter().unzip();
        Self {
            values: Array::new(values),
            index: Index::new(labels),
            name: None,
        }
    }

    /// Create a single-element series labeled `0`
    pub fn from_scalar(value: impl Into<Scalar>) -> Self {
        Self::from_values(Array::new(vec![value.into()]))
    }

    /// Start building a series
    pub fn builder() -> SeriesBuilder {
        SeriesBuilder::new()
    }

    /// Set the name of the series
    pub fn with_name(mut self, name: impl Into<Scalar>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub(crate) fn with_optional_name(mut self, name: Option<Scalar>) -> Self {
        self.name = name;
        self
    }

    pub fn name(&self) -> Option<&Scalar> {
        self.name.as_ref()
    }

    /// Deep copy carrying a new name
    pub fn rename(&self, name: impl Into<Scalar>) -> Series {
        self.copy(CopyMode::Deep).with_name(name)
    }

    pub fn values(&self) -> &Array {
        &self.values
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Replace the index wholesale; the length must match
    pub fn set_index(&mut self, index: impl Into<Index>) -> Result<()> {
        let index = index.into();
        check_length("index", self.len(), index.len())?;
        debug!(len = index.len(), "replacing series index");
        self.index = index;
        Ok(())
    }

    /// Deep copy with a replaced index
    pub fn reindex(&self, index: impl Into<Index>) -> Result<Series> {
        let mut clone = self.copy(CopyMode::Deep);
        clone.set_index(index)?;
        Ok(clone)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn shape(&self) -> (usize,) {
        (self.len(),)
    }

    /// Copy the series; a shallow copy shares value storage with `self`
    pub fn copy(&self, mode: CopyMode) -> Series {
        Series {
            values: self.values.copy(mode),
            index: self.index.copy(mode),
            name: self.name.clone(),
        }
    }

    /// Label-based accessor
    pub fn loc(&self) -> LocSeriesIndexer<&Series> {
        LocSeriesIndexer::new(self)
    }

    pub fn loc_mut(&mut self) -> LocSeriesIndexer<&mut Series> {
        LocSeriesIndexer::new(self)
    }

    /// Position-based accessor
    pub fn iloc(&self) -> IlocSeriesIndexer<&Series> {
        IlocSeriesIndexer::new(self)
    }

    pub fn iloc_mut(&mut self) -> IlocSeriesIndexer<&mut Series> {
        IlocSeriesIndexer::new(self)
    }

    /// Label-based read, same as `self.loc().get(key)`
    pub fn get(&self, key: impl Into<Key>) -> Result<Selection<Series>> {
        self.loc().get(key)
    }

    /// Label-based write, same as `self.loc_mut().set(key, value)`
    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<Operand>) -> Result<()> {
        self.loc_mut().set(key, value)
    }

    pub(crate) fn select_positions(&self, positions: &Positions) -> Selection<Series> {
        match positions {
            Positions::One(position) => Selection::One(self.values.at(*position)),
            Positions::Many(positions) => Selection::Many(Series {
                values: self.values.take(positions),
                index: self.index.take(positions),
                name: self.name.clone(),
            }),
        }
    }

    pub(crate) fn assign_positions(&mut self, positions: &Positions, value: Operand) -> Result<()> {
        self.values.assign(positions, value)
    }

    /// First `n` rows
    pub fn head(&self, n: usize) -> Series {
        let n = i64::try_from(n).unwrap_or(i64::MAX);
        self.slice(Slice::new(None, Some(n), None))
    }

    /// Last `n` rows
    ///
    /// The window starts at `-n`, so `tail(0)` returns every row.
    pub fn tail(&self, n: usize) -> Series {
        let n = i64::try_from(n).unwrap_or(i64::MAX);
        self.slice(Slice::new(Some(n.saturating_neg()), None, None))
    }

    fn slice(&self, slice: Slice) -> Series {
        let positions = slice.indices(self.len()).unwrap_or_default();
        Series {
            values: self.values.take(&positions),
            index: self.index.take(&positions),
            name: self.name.clone(),
        }
    }

    /// Position of the first value equal to `value`
    pub fn ifind(&self, value: impl Into<Scalar>) -> Option<usize> {
        let value = value.into();
        self.values.iter().position(|v| v.loose_eq(&value))
    }

    /// Label of the first value equal to `value`
    pub fn find(&self, value: impl Into<Scalar>) -> Option<Scalar> {
        self.ifind(value).map(|position| self.index.values()[position].clone())
    }

    /// Iterate over `(label, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (Scalar, Scalar)> + '_ {
        self.index.iter().cloned().zip(self.values.iter())
    }

    /// Union with a label-disjoint series or mapping
    ///
    /// The result is unnamed and its labels are unique.
    pub fn append(&self, other: impl Into<Operand>) -> Result<Series> {
        let other = match other.into() {
            Operand::Series(series) => series.to_map(),
            Operand::Mapping(map) => map,
            other => {
                return Err(DataError::InvalidParameter(format!(
                    "cannot append {} to a Series",
                    other.kind_name()
                )));
            }
        };

        let shared: Vec<&Scalar> = other.keys().filter(|label| self.index.contains(label)).collect();
        if !shared.is_empty() {
            return Err(DataError::DuplicateLabels(format_labels(shared)));
        }

        let mut merged = self.to_map();
        debug!(lhs = merged.len(), rhs = other.len(), "appending series");
        merged.extend(other);
        Ok(Series::from_map(merged))
    }

    /// Apply a function to each value, keeping the index and name
    pub fn map(&self, func: impl FnMut(&Scalar) -> Scalar) -> Series {
        Series {
            values: self.values.map(func),
            index: self.index.clone(),
            name: self.name.clone(),
        }
    }

    /// Fold the `(label, value)` pairs from `initial`
    pub fn reduce<T>(&self, func: impl FnMut(T, (Scalar, Scalar)) -> T, initial: T) -> T {
        self.iter().fold(initial, func)
    }

    /// Apply an aggregation function to the values
    pub fn agg<T>(&self, func: impl FnOnce(&Array) -> T) -> T {
        func(&self.values)
    }

    pub fn max(&self) -> Result<Scalar> {
        self.values.max()
    }

    pub fn min(&self) -> Result<Scalar> {
        self.values.min()
    }

    pub fn sum(&self) -> Result<Scalar> {
        self.values.sum()
    }

    pub fn all(&self) -> bool {
        self.values.all()
    }

    pub fn any(&self) -> bool {
        self.values.any()
    }

    pub fn argmax(&self) -> Result<usize> {
        self.values.argmax()
    }

    pub fn argmin(&self) -> Result<usize> {
        self.values.argmin()
    }

    /// Label of the first largest value
    pub fn idxmax(&self) -> Result<Scalar> {
        let position = self.argmax()?;
        Ok(self.index.values()[position].clone())
    }

    /// Label of the first smallest value
    pub fn idxmin(&self) -> Result<Scalar> {
        let position = self.argmin()?;
        Ok(self.index.values()[position].clone())
    }

    pub fn to_vec(&self) -> Vec<Scalar> {
        self.values.to_vec()
    }

    /// Label to value mapping; a repeated label keeps its first slot and last value
    pub fn to_map(&self) -> LabelMap {
        self.iter().collect()
    }

    /// Values of `other` ordered to pair with `self`'s labels
    ///
    /// Only a Series operand is matched by label; any other collection is
    /// read position by position.
    fn align(&self, other: Operand) -> Result<Vec<Scalar>> {
        let len = self.len();
        match other {
            Operand::Scalar(value) => {
                trace!(len, "broadcasting scalar over series index");
                Ok(vec![value; len])
            }
            Operand::Series(other) => self.align_series(&other),
            // mappings and plain collections take self's labels in order
            other => {
                let values = other.into_values();
                check_length("Series", len, values.len())?;
                Ok(values)
            }
        }
    }

    /// Pair values by label; the k-th occurrence of a label in `self` takes
    /// the k-th occurrence of that label in `other`
    fn align_series(&self, other: &Series) -> Result<Vec<Scalar>> {
        check_length("Series", self.len(), other.len())?;

        let mine: HashSet<&Scalar> = self.index.iter().collect();
        let theirs: HashSet<&Scalar> = other.index.iter().collect();
        if mine != theirs {
            return Err(DataError::IndexMismatch(format_labels(
                mine.symmetric_difference(&theirs).copied(),
            )));
        }
        trace!(len = self.len(), "aligning series by label");

        let other_values = other.values.to_vec();
        let mut seen: HashMap<&Scalar, usize> = HashMap::new();
        self.index
            .iter()
            .map(|label| -> Result<Scalar> {
                let occurrence = seen.entry(label).or_insert(0);
                let position = other
                    .index
                    .positions_of(label)
                    .and_then(|positions| positions.get(*occurrence))
                    .ok_or_else(|| DataError::IndexMismatch(format_labels([label])))?;
                *occurrence += 1;
                Ok(other_values[*position].clone())
            })
            .collect()
    }

    fn with_values(&self, values: Vec<Scalar>) -> Series {
        Series {
            values: Array::new(values),
            index: self.index.clone(),
            name: self.name.clone(),
        }
    }
}

impl Elementwise for Series {
    fn apply_binary(&self, op: BinaryOp, other: Operand, reflected: bool) -> Result<Self> {
        let rhs = self.align(other)?;
        let values = combine(op, &self.to_vec(), &rhs, reflected)?;
        Ok(self.with_values(values))
    }

    fn apply_binary_in_place(&mut self, op: BinaryOp, other: Operand) -> Result<()> {
        let rhs = self.align(other)?;
        let values = combine(op, &self.to_vec(), &rhs, false)?;
        self.values.replace(values);
        Ok(())
    }

    fn apply_unary(&self, op: UnaryOp) -> Result<Self> {
        let values = self.values.apply_unary(op)?;
        Ok(self.with_values(values.to_vec()))
    }

    fn apply_dot(&self, other: Operand, reflected: bool) -> Result<Scalar> {
        let rhs = self.align(other)?;
        dot_product(&self.to_vec(), &rhs, reflected)
    }
}

impl PartialEq for Series {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values && self.index == other.index && self.name == other.name
    }
}

impl fmt::Debug for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Series")
            .field("values", &self.values)
            .field("index", &self.index)
            .field("name", &self.name)
            .finish()
    }
}

fn render_name(name: Option<&Scalar>) -> String {
    name.map_or_else(|| "None".to_string(), Scalar::to_string)
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return match &self.name {
                None => write!(f, "Series([])"),
                Some(name) => write!(f, "Series([], name=\"{}\")", name),
            };
        }

        let labels: Vec<String> = self.index.iter().map(Scalar::to_string).collect();
        let values: Vec<String> = self.values.iter().map(|v| v.to_string()).collect();
        let label_width = labels.iter().map(String::len).max().unwrap_or(0);
        let value_width = values.iter().map(String::len).max().unwrap_or(0);

        for (label, value) in labels.iter().zip(&values) {
            writeln!(f, "{:>lw$}  {:>vw$}", label, value, lw = label_width, vw = value_width)?;
        }
        write!(f, "name: {}", render_name(self.name()))
    }
}

impl<T: Into<Scalar>> From<Vec<T>> for Series {
    fn from(values: Vec<T>) -> Self {
        Series::from_values(Array::from(values))
    }
}

impl From<Array> for Series {
    fn from(values: Array) -> Self {
        Series::from_values(values)
    }
}

impl From<LabelMap> for Series {
    fn from(map: LabelMap) -> Self {
        Series::from_map(map)
    }
}
