//! Index structures for Series
//!
//! An [`Index`] is an ordered sequence of labels. Labels may repeat; the
//! reverse map keeps, for every distinct label, the positions where it occurs
//! from first to last.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::key::{mask_positions, normalize_position};
use super::utils::format_labels;
use super::*;

#[derive(Debug)]
struct IndexInner {
    labels: Vec<Scalar>,
    positions: IndexMap<Scalar, Vec<usize>>,
}

impl IndexInner {
    fn new(labels: Vec<Scalar>) -> Self {
        let mut positions: IndexMap<Scalar, Vec<usize>> = IndexMap::with_capacity(labels.len());
        for (position, label) in labels.iter().enumerate() {
            positions.entry(label.clone()).or_default().push(position);
        }
        Self { labels, positions }
    }
}

/// Ordered, duplicate-aware sequence of labels
///
/// An index is never patched in place; replace it wholesale instead.
#[derive(Serialize, Deserialize)]
#[serde(from = "IndexRepr", into = "IndexRepr")]
pub struct Index {
    inner: Rc<IndexInner>,
    name: Option<Scalar>,
}

#[derive(Serialize, Deserialize)]
struct IndexRepr {
    labels: Vec<Scalar>,
    name: Option<Scalar>,
}

impl From<IndexRepr> for Index {
    fn from(repr: IndexRepr) -> Self {
        Index {
            inner: Rc::new(IndexInner::new(repr.labels)),
            name: repr.name,
        }
    }
}

impl From<Index> for IndexRepr {
    fn from(index: Index) -> Self {
        IndexRepr {
            labels: index.values().to_vec(),
            name: index.name,
        }
    }
}

impl Index {
    /// Create a new index from labels
    pub fn new(labels: Vec<Scalar>) -> Self {
        Self {
            inner: Rc::new(IndexInner::new(labels)),
            name: None,
        }
    }

    /// Create the default index `0..n`
    pub fn range(n: usize) -> Self {
        (0..n as i64).collect()
    }

    /// Create an index with the labels of `other`
    ///
    /// The name is inherited unless `name` overrides it.
    pub fn from_index(other: &Index, name: Option<Scalar>) -> Self {
        Self {
            inner: Rc::clone(&other.inner),
            name: name.or_else(|| other.name.clone()),
        }
    }

    /// Set the name of the index
    pub fn with_name(mut self, name: impl Into<Scalar>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&Scalar> {
        self.name.as_ref()
    }

    pub fn len(&self) -> usize {
        self.inner.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Labels in order
    pub fn values(&self) -> &[Scalar] {
        &self.inner.labels
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Scalar> {
        self.inner.labels.iter()
    }

    /// Label at a position; negative positions count from the end
    pub fn get(&self, position: i64) -> Result<&Scalar> {
        let position = normalize_position(position, self.len())?;
        Ok(&self.inner.labels[position])
    }

    pub fn contains(&self, label: &Scalar) -> bool {
        self.inner.positions.contains_key(label)
    }

    /// Every position where `label` occurs, first to last
    pub fn positions_of(&self, label: &Scalar) -> Option<&[usize]> {
        self.inner.positions.get(label).map(Vec::as_slice)
    }

    /// Whether no label repeats
    pub fn is_unique(&self) -> bool {
        self.inner.positions.len() == self.len()
    }

    /// Resolve a label-space key into positions
    ///
    /// A single label occurring once resolves to a bare position; a label
    /// occurring several times resolves to all of its positions. A boolean
    /// collection is a mask. Any other collection is a list of labels whose
    /// positions are concatenated in key order, so repeated labels multiply.
    /// Slices are positional.
    ///
    /// ```
    /// use lo_core::data::{Index, Positions};
    ///
    /// let index = Index::from(vec!["a", "b", "a"]);
    /// assert_eq!(index.get_ilocs("a").unwrap(), Positions::Many(vec![0, 2]));
    /// assert_eq!(index.get_ilocs("b").unwrap(), Positions::One(1));
    /// ```
    pub fn get_ilocs(&self, key: impl Into<Key>) -> Result<Positions> {
        match key.into() {
            Key::One(label) => match self.positions_of(&label) {
                Some([position]) => Ok(Positions::One(*position)),
                Some(positions) => Ok(Positions::Many(positions.to_vec())),
                None => Err(DataError::LabelNotFound(label.repr())),
            },
            Key::Slice(slice) => Ok(Positions::Many(slice.indices(self.len())?)),
            Key::Many(items) if is_boolean_mask(&items) => {
                Ok(Positions::Many(mask_positions(&items, self.len())?))
            }
            Key::Many(labels) => {
                let mut positions = Vec::with_capacity(labels.len());
                for label in &labels {
                    let found = self
                        .positions_of(label)
                        .ok_or_else(|| DataError::LabelNotFound(label.repr()))?;
                    positions.extend_from_slice(found);
                }
                Ok(Positions::Many(positions))
            }
        }
    }

    /// Labels at `positions`, keeping the name
    pub fn take(&self, positions: &[usize]) -> Index {
        let labels = positions.iter().map(|&p| self.inner.labels[p].clone()).collect();
        Index {
            inner: Rc::new(IndexInner::new(labels)),
            name: self.name.clone(),
        }
    }

    /// Copy the index; a shallow copy shares the label storage
    pub fn copy(&self, mode: CopyMode) -> Index {
        match mode {
            CopyMode::Shallow => Index {
                inner: Rc::clone(&self.inner),
                name: self.name.clone(),
            },
            CopyMode::Deep => Index {
                inner: Rc::new(IndexInner::new(self.inner.labels.clone())),
                name: self.name.clone(),
            },
        }
    }
}

impl Clone for Index {
    fn clone(&self) -> Self {
        self.copy(CopyMode::Shallow)
    }
}

impl Default for Index {
    fn default() -> Self {
        Index::new(Vec::new())
    }
}

// Equality is positional over the labels; names are ignored.
impl PartialEq for Index {
    fn eq(&self, other: &Self) -> bool {
        self.inner.labels == other.inner.labels
    }
}

impl<T: Clone + Into<Scalar>> PartialEq<Vec<T>> for Index {
    fn eq(&self, other: &Vec<T>) -> bool {
        self.len() == other.len()
            && self
                .inner
                .labels
                .iter()
                .zip(other.iter().cloned().map(Into::into))
                .all(|(a, b)| *a == b)
    }
}

impl fmt::Debug for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Index")
            .field("labels", &self.inner.labels)
            .field("name", &self.name)
            .finish()
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = format_labels(self.iter());
        match &self.name {
            None => write!(f, "Index({})", labels),
            Some(name) => write!(f, "Index({}, name=\"{}\")", labels, name),
        }
    }
}

impl<T: Into<Scalar>> From<Vec<T>> for Index {
    fn from(labels: Vec<T>) -> Self {
        labels.into_iter().collect()
    }
}

impl<T: Into<Scalar>> FromIterator<T> for Index {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Index::new(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a Index {
    type Item = &'a Scalar;
    type IntoIter = std::slice::Iter<'a, Scalar>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
