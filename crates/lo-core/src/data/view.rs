//! Label- and position-based accessors for Series
//!
//! The indexers hold no state of their own: they borrow a Series, resolve a
//! key into positions and hand the positions to the Series' values.

use std::ops::{Deref, DerefMut};

use super::key::resolve_positions;
use super::*;

/// Label-based accessor bound to one Series
///
/// Obtained through [`Series::loc`] for reads and [`Series::loc_mut`] for
/// writes. Keys are resolved with [`Index::get_ilocs`].
#[derive(Debug)]
pub struct LocSeriesIndexer<S> {
    series: S,
}

impl<S: Deref<Target = Series>> LocSeriesIndexer<S> {
    pub(crate) fn new(series: S) -> Self {
        Self { series }
    }

    /// Read by label
    ///
    /// A label occurring once yields its value; every other key yields a
    /// Series.
    pub fn get(&self, key: impl Into<Key>) -> Result<Selection<Series>> {
        let positions = self.series.index().get_ilocs(key)?;
        Ok(self.series.select_positions(&positions))
    }
}

impl<S: DerefMut<Target = Series>> LocSeriesIndexer<S> {
    /// Write by label
    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<Operand>) -> Result<()> {
        let positions = self.series.index().get_ilocs(key)?;
        self.series.assign_positions(&positions, value.into())
    }
}

/// Position-based accessor bound to one Series
///
/// Accepts integer positions (negative ones count from the end), lists of
/// positions, slices and boolean masks.
#[derive(Debug)]
pub struct IlocSeriesIndexer<S> {
    series: S,
}

impl<S: Deref<Target = Series>> IlocSeriesIndexer<S> {
    pub(crate) fn new(series: S) -> Self {
        Self { series }
    }

    /// Read by position
    pub fn get(&self, key: impl Into<Key>) -> Result<Selection<Series>> {
        let positions = resolve_positions(&key.into(), self.series.len())?;
        Ok(self.series.select_positions(&positions))
    }
}

impl<S: DerefMut<Target = Series>> IlocSeriesIndexer<S> {
    /// Write by position
    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<Operand>) -> Result<()> {
        let positions = resolve_positions(&key.into(), self.series.len())?;
        self.series.assign_positions(&positions, value.into())
    }
}
