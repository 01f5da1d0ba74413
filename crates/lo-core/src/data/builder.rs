//! Builder pattern for constructing Series

use tracing::debug;

use super::*;

/// Data a Series is built from
#[derive(Debug, Clone)]
enum SeriesData {
    Values(Array),
    Mapping(LabelMap),
    Scalar(Scalar),
}

/// Builder for creating Series
///
/// ```
/// use lo_core::data::Series;
///
/// let s = Series::builder()
///     .values(vec![1, 2, 3])
///     .index(vec!["a", "b", "c"])
///     .name("counts")
///     .build()
///     .unwrap();
/// assert_eq!(s.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SeriesBuilder {
    data: Option<SeriesData>,
    index: Option<Index>,
    name: Option<Scalar>,
}

impl SeriesBuilder {
    /// Create a new SeriesBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the data as an ordered collection, labeled `0..n` by default
    pub fn values(mut self, values: impl Into<Array>) -> Self {
        self.data = Some(SeriesData::Values(values.into()));
        self
    }

    /// Set the data as a label to value mapping
    pub fn mapping(mut self, mapping: LabelMap) -> Self {
        self.data = Some(SeriesData::Mapping(mapping));
        self
    }

    /// Set the data as a single value, labeled `0` by default
    pub fn scalar(mut self, value: impl Into<Scalar>) -> Self {
        self.data = Some(SeriesData::Scalar(value.into()));
        self
    }

    /// Set an explicit index, replacing the derived labels
    pub fn index(mut self, index: impl Into<Index>) -> Self {
        self.index = Some(index.into());
        self
    }

    /// Set the name of the series
    pub fn name(mut self, name: impl Into<Scalar>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Build the Series
    ///
    /// Without data the series is empty. An explicit index must have as many
    /// labels as there are values.
    pub fn build(self) -> Result<Series> {
        let series = match self.data {
            None => Series::default(),
            Some(SeriesData::Values(values)) => Series::from_values(values),
            Some(SeriesData::Mapping(mapping)) => Series::from_map(mapping),
            Some(SeriesData::Scalar(value)) => Series::from_scalar(value),
        };

        let series = match self.index {
            Some(index) => {
                debug!(len = index.len(), "building series with explicit index");
                Series::new(series.values().copy(CopyMode::Shallow), index)?
            }
            None => series,
        };
        Ok(series.with_optional_name(self.name))
    }
}
