//! Descriptive statistics over materialized values
//!
//! The values are converted to a [`FloatArray`] and handed to `ndarray` and
//! `statrs`; degenerate inputs fail with [`DataError::Statistics`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Median};

use super::*;

/// Interpolation used by [`Array::quantiles`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QuantileMethod {
    /// Cut points over `n + 1` slots; the data is a sample of a wider population
    #[default]
    Exclusive,
    /// Cut points over `n - 1` slots; the data spans the population minimum and maximum
    Inclusive,
}

/// Configuration for quantile cut points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantileConfig {
    /// Number of equal-probability intervals; yields `n - 1` cut points
    pub n: usize,
    pub method: QuantileMethod,
}

impl Default for QuantileConfig {
    fn default() -> Self {
        Self {
            n: 4,
            method: QuantileMethod::Exclusive,
        }
    }
}

impl QuantileConfig {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            ..Self::default()
        }
    }

    pub fn with_method(mut self, method: QuantileMethod) -> Self {
        self.method = method;
        self
    }
}

/// Convert values to floats; complex, text and bytes are rejected
pub(crate) fn to_float_array(values: &[Scalar]) -> Result<FloatArray> {
    values
        .iter()
        .map(|v| match v {
            Scalar::Complex(_) | Scalar::Str(_) | Scalar::Bytes(_) => {
                Err(DataError::NonNumericData(v.kind_name()))
            }
            other => other.as_f64().ok_or(DataError::NonNumericData(other.kind_name())),
        })
        .collect::<Result<Vec<f64>>>()
        .map(FloatArray::from)
}

fn require(values: &FloatArray, at_least: usize, message: &str) -> Result<()> {
    if values.len() < at_least {
        return Err(DataError::Statistics(message.to_string()));
    }
    Ok(())
}

fn sorted(values: &FloatArray) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

fn variance(values: &FloatArray, xbar: Option<f64>) -> Result<f64> {
    require(values, 2, "variance requires at least two data points")?;
    match xbar {
        None => Ok(values.var(1.0)),
        Some(xbar) => {
            let ss: f64 = values.iter().map(|x| (x - xbar).powi(2)).sum();
            Ok(ss / (values.len() - 1) as f64)
        }
    }
}

fn quantiles(values: &FloatArray, config: &QuantileConfig) -> Result<Vec<f64>> {
    let n = config.n;
    if n < 1 {
        return Err(DataError::Statistics("n must be at least 1".to_string()));
    }
    require(values, 2, "must have at least two data points")?;

    let data = sorted(values);
    let ld = data.len();
    let nf = n as f64;
    let cuts = match config.method {
        QuantileMethod::Exclusive => {
            let m = ld + 1;
            (1..n)
                .map(|i| {
                    let j = (i * m / n).clamp(1, ld - 1);
                    let delta = (i * m) as f64 - (j * n) as f64;
                    (data[j - 1] * (nf - delta) + data[j] * delta) / nf
                })
                .collect()
        }
        QuantileMethod::Inclusive => {
            let m = ld - 1;
            (1..n)
                .map(|i| {
                    let j = i * m / n;
                    let delta = (i * m - j * n) as f64;
                    (data[j] * (nf - delta) + data[j + 1] * delta) / nf
                })
                .collect()
        }
    };
    Ok(cuts)
}

impl Array {
    /// Arithmetic mean
    pub fn mean(&self) -> Result<f64> {
        let values = to_float_array(&self.to_vec())?;
        values
            .mean()
            .ok_or_else(|| DataError::Statistics("mean requires at least one data point".to_string()))
    }

    /// Middle value, averaging the two middle values of an even-length array
    pub fn median(&self) -> Result<f64> {
        let values = to_float_array(&self.to_vec())?;
        require(&values, 1, "no median for empty data")?;
        Ok(Data::new(values.to_vec()).median())
    }

    /// Most common value; the first one encountered wins on ties
    pub fn mode(&self) -> Result<Scalar> {
        let mut counts: IndexMap<Scalar, usize> = IndexMap::new();
        for value in self.iter() {
            *counts.entry(value).or_insert(0) += 1;
        }
        let mut best: Option<(Scalar, usize)> = None;
        for (value, count) in counts {
            if best.as_ref().is_none_or(|(_, top)| count > *top) {
                best = Some((value, count));
            }
        }
        best.map(|(value, _)| value)
            .ok_or_else(|| DataError::Statistics("no mode for empty data".to_string()))
    }

    /// `n - 1` cut points dividing the values into `n` equal-probability intervals
    pub fn quantiles(&self, config: &QuantileConfig) -> Result<Vec<f64>> {
        quantiles(&to_float_array(&self.to_vec())?, config)
    }

    /// Sample variance; `xbar` replaces the computed mean when given
    pub fn var(&self, xbar: Option<f64>) -> Result<f64> {
        variance(&to_float_array(&self.to_vec())?, xbar)
    }

    /// Sample standard deviation
    pub fn std(&self, xbar: Option<f64>) -> Result<f64> {
        self.var(xbar).map(f64::sqrt)
    }
}

impl Series {
    pub fn mean(&self) -> Result<f64> {
        self.values().mean()
    }

    pub fn median(&self) -> Result<f64> {
        self.values().median()
    }

    pub fn mode(&self) -> Result<Scalar> {
        self.values().mode()
    }

    pub fn quantiles(&self, config: &QuantileConfig) -> Result<Vec<f64>> {
        self.values().quantiles(config)
    }

    pub fn var(&self, xbar: Option<f64>) -> Result<f64> {
        self.values().var(xbar)
    }

    pub fn std(&self, xbar: Option<f64>) -> Result<f64> {
        self.values().std(xbar)
    }
}
