//! Classification predicates and small shared helpers

use serde::{Deserialize, Serialize};

use super::*;

/// How a container is duplicated
///
/// A shallow copy shares value storage with the original: writes through one
/// are visible through the other. A deep copy shares nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CopyMode {
    #[default]
    Deep,
    Shallow,
}

/// Whether the operand is a single value
pub fn is_scalar(operand: &Operand) -> bool {
    matches!(operand, Operand::Scalar(_))
}

/// Whether the operand is any collection, ordered or keyed
pub fn is_array_like(operand: &Operand) -> bool {
    !is_scalar(operand)
}

/// Whether the operand is an ordered sequence of labels (mappings are not)
pub fn is_index_like(operand: &Operand) -> bool {
    matches!(
        operand,
        Operand::Values(_) | Operand::Array(_) | Operand::Series(_)
    )
}

/// Whether every item is a boolean
///
/// A collection that passes is always treated as a mask, never as positions
/// or labels, even though booleans compare equal to 0 and 1.
pub fn is_boolean_mask(items: &[Scalar]) -> bool {
    items.iter().all(Scalar::is_bool)
}

/// Check that an operand has the expected length
pub(crate) fn check_length(kind: &str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(DataError::DimensionMismatch {
            expected: format!("{} of length {}", kind, expected),
            actual: format!("length {}", actual),
        });
    }
    Ok(())
}

/// Render labels for error messages
pub(crate) fn format_labels<'a>(labels: impl IntoIterator<Item = &'a Scalar>) -> String {
    let rendered: Vec<String> = labels.into_iter().map(Scalar::repr).collect();
    format!("[{}]", rendered.join(", "))
}
