//! Scalar values held by arrays and used as index labels

use std::fmt;
use std::hash::{Hash, Hasher};

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// A single primitive value
///
/// Equality and hashing are structural so that scalars can serve as index
/// labels: `Int(1)` and `Float(1.0)` are distinct labels. Elementwise
/// comparisons go through [`Scalar::loose_eq`] instead, which compares numbers
/// across kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Complex(Complex64),
    Str(String),
    Bytes(Vec<u8>),
    Bool(bool),
}

impl Scalar {
    /// Name of the scalar kind, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Scalar::Int(_) => "int",
            Scalar::Float(_) => "float",
            Scalar::Complex(_) => "complex",
            Scalar::Str(_) => "str",
            Scalar::Bytes(_) => "bytes",
            Scalar::Bool(_) => "bool",
        }
    }

    /// Truthiness: zero, empty text/bytes and `false` are falsy
    pub fn is_truthy(&self) -> bool {
        match self {
            Scalar::Int(v) => *v != 0,
            Scalar::Float(v) => *v != 0.0,
            Scalar::Complex(v) => v.re != 0.0 || v.im != 0.0,
            Scalar::Str(v) => !v.is_empty(),
            Scalar::Bytes(v) => !v.is_empty(),
            Scalar::Bool(v) => *v,
        }
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Scalar::Bool(_))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Scalar::Int(_) | Scalar::Float(_) | Scalar::Complex(_) | Scalar::Bool(_)
        )
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Integer value of an `Int` or `Bool`
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Scalar::Int(v) => Some(*v),
            Scalar::Bool(v) => Some(i64::from(*v)),
            _ => None,
        }
    }

    /// Real value of any non-complex numeric scalar
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int(v) => Some(*v as f64),
            Scalar::Float(v) => Some(*v),
            Scalar::Bool(v) => Some(if *v { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Rendering inside a container listing: text is quoted
    pub fn repr(&self) -> String {
        match self {
            Scalar::Str(v) => format!("'{}'", v),
            other => other.to_string(),
        }
    }

    /// Value equality across numeric kinds (`1 == 1.0 == true`)
    pub fn loose_eq(&self, other: &Scalar) -> bool {
        match (self, other) {
            (Scalar::Str(a), Scalar::Str(b)) => a == b,
            (Scalar::Bytes(a), Scalar::Bytes(b)) => a == b,
            (Scalar::Complex(a), b) | (b, Scalar::Complex(a)) => match b {
                Scalar::Complex(b) => a == b,
                b => b.as_f64().is_some_and(|b| a.im == 0.0 && a.re == b),
            },
            (Scalar::Float(_), _) | (_, Scalar::Float(_)) => {
                match (self.as_f64(), other.as_f64()) {
                    (Some(a), Some(b)) => a == b,
                    _ => false,
                }
            }
            (a, b) => match (a.as_int(), b.as_int()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

fn float_eq(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

fn float_bits(v: f64) -> u64 {
    if v == 0.0 {
        0
    } else if v.is_nan() {
        f64::NAN.to_bits()
    } else {
        v.to_bits()
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Int(a), Scalar::Int(b)) => a == b,
            (Scalar::Float(a), Scalar::Float(b)) => float_eq(*a, *b),
            (Scalar::Complex(a), Scalar::Complex(b)) => {
                float_eq(a.re, b.re) && float_eq(a.im, b.im)
            }
            (Scalar::Str(a), Scalar::Str(b)) => a == b,
            (Scalar::Bytes(a), Scalar::Bytes(b)) => a == b,
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            _ => false,
        }
    }
}

// NaN equals NaN structurally, which keeps labels reflexive.
impl Eq for Scalar {}

impl Hash for Scalar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Scalar::Int(v) => v.hash(state),
            Scalar::Float(v) => float_bits(*v).hash(state),
            Scalar::Complex(v) => {
                float_bits(v.re).hash(state);
                float_bits(v.im).hash(state);
            }
            Scalar::Str(v) => v.hash(state),
            Scalar::Bytes(v) => v.hash(state),
            Scalar::Bool(v) => v.hash(state),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(v) => write!(f, "{}", v),
            Scalar::Float(v) => write!(f, "{:?}", v),
            Scalar::Complex(v) => write!(f, "({}{:+}j)", v.re, v.im),
            Scalar::Str(v) => write!(f, "{}", v),
            Scalar::Bytes(v) => write!(f, "b'{}'", v.escape_ascii()),
            Scalar::Bool(v) => write!(f, "{}", v),
        }
    }
}

macro_rules! scalar_from {
    ($($ty:ty => $variant:ident $(as $cast:ty)?),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Scalar::$variant(value $(as $cast)?)
                }
            }
        )*
    };
}

scalar_from! {
    i64 => Int,
    i32 => Int as i64,
    u32 => Int as i64,
    f64 => Float,
    f32 => Float as f64,
    bool => Bool,
    Complex64 => Complex,
    String => Str,
    Vec<u8> => Bytes,
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Str(value.to_string())
    }
}

impl From<&[u8]> for Scalar {
    fn from(value: &[u8]) -> Self {
        Scalar::Bytes(value.to_vec())
    }
}

impl From<&Scalar> for Scalar {
    fn from(value: &Scalar) -> Self {
        value.clone()
    }
}
