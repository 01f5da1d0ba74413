//! Traits for elementwise operations

use super::*;

/// Right-hand side of an elementwise operation or the value of an assignment
#[derive(Debug, Clone)]
pub enum Operand {
    /// Broadcast to every position
    Scalar(Scalar),
    /// A plain ordered collection, combined position by position
    Values(Vec<Scalar>),
    Array(Array),
    Series(Series),
    /// Label-keyed values
    Mapping(LabelMap),
}

impl Operand {
    /// Materialize the operand's values in order
    pub fn into_values(self) -> Vec<Scalar> {
        match self {
            Operand::Scalar(value) => vec![value],
            Operand::Values(values) => values,
            Operand::Array(array) => array.to_vec(),
            Operand::Series(series) => series.to_vec(),
            Operand::Mapping(mapping) => mapping.into_values().collect(),
        }
    }

    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Operand::Scalar(value) => value.kind_name(),
            Operand::Values(_) => "list",
            Operand::Array(_) => "Array",
            Operand::Series(_) => "Series",
            Operand::Mapping(_) => "mapping",
        }
    }
}

macro_rules! operand_from_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Operand {
                fn from(value: $ty) -> Self {
                    Operand::Scalar(value.into())
                }
            }
        )*
    };
}

operand_from_scalar!(
    Scalar,
    &Scalar,
    i64,
    i32,
    u32,
    f64,
    f32,
    bool,
    &str,
    String,
    num_complex::Complex64
);

impl<T: Into<Scalar>> From<Vec<T>> for Operand {
    fn from(values: Vec<T>) -> Self {
        Operand::Values(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<Scalar>> From<&[T]> for Operand {
    fn from(values: &[T]) -> Self {
        Operand::Values(values.iter().cloned().map(Into::into).collect())
    }
}

impl From<Array> for Operand {
    fn from(array: Array) -> Self {
        Operand::Array(array)
    }
}

impl From<&Array> for Operand {
    fn from(array: &Array) -> Self {
        Operand::Array(array.copy(CopyMode::Shallow))
    }
}

impl From<Series> for Operand {
    fn from(series: Series) -> Self {
        Operand::Series(series)
    }
}

impl From<&Series> for Operand {
    fn from(series: &Series) -> Self {
        Operand::Series(series.copy(CopyMode::Shallow))
    }
}

impl From<LabelMap> for Operand {
    fn from(mapping: LabelMap) -> Self {
        Operand::Mapping(mapping)
    }
}

macro_rules! comparison_methods {
    ($($(#[$doc:meta])* $op:ident => $name:ident;)*) => {
        $(
            $(#[$doc])*
            fn $name(&self, other: impl Into<Operand>) -> Result<Self> {
                self.apply_binary(BinaryOp::$op, other.into(), false)
            }
        )*
    };
}

macro_rules! arithmetic_methods {
    ($($(#[$doc:meta])* $op:ident => $name:ident, $reflected:ident, $in_place:ident;)*) => {
        $(
            $(#[$doc])*
            fn $name(&self, other: impl Into<Operand>) -> Result<Self> {
                self.apply_binary(BinaryOp::$op, other.into(), false)
            }

            /// Reflected form: the operand is on the left-hand side
            fn $reflected(&self, other: impl Into<Operand>) -> Result<Self> {
                self.apply_binary(BinaryOp::$op, other.into(), true)
            }

            /// In-place form: overwrites the receiver's values
            fn $in_place(&mut self, other: impl Into<Operand>) -> Result<()> {
                self.apply_binary_in_place(BinaryOp::$op, other.into())
            }
        )*
    };
}

macro_rules! unary_methods {
    ($($op:ident => $name:ident;)*) => {
        $(
            fn $name(&self) -> Result<Self> {
                self.apply_unary(UnaryOp::$op)
            }
        )*
    };
}

/// Elementwise operator algebra shared by [`Array`] and [`Series`]
///
/// Implementors supply operand canonicalization and combination through the
/// four `apply_*` methods; every named operator is derived from them.
pub trait Elementwise: Sized {
    /// Canonicalize `other`, then combine it with `self` element by element
    fn apply_binary(&self, op: BinaryOp, other: Operand, reflected: bool) -> Result<Self>;

    /// Like [`Elementwise::apply_binary`], writing the result into `self`
    ///
    /// Either every position is updated or, on error, none is.
    fn apply_binary_in_place(&mut self, op: BinaryOp, other: Operand) -> Result<()>;

    fn apply_unary(&self, op: UnaryOp) -> Result<Self>;

    /// Multiply element by element and sum
    fn apply_dot(&self, other: Operand, reflected: bool) -> Result<Scalar>;

    comparison_methods! {
        /// Elementwise `<`
        Lt => less;
        /// Elementwise `<=`
        Le => less_equal;
        /// Elementwise `==`
        Eq => equal;
        /// Elementwise `!=`
        Ne => not_equal;
        /// Elementwise `>`
        Gt => greater;
        /// Elementwise `>=`
        Ge => greater_equal;
    }

    arithmetic_methods! {
        /// Elementwise addition (concatenation for text and bytes)
        Add => add, radd, add_assign;
        Sub => sub, rsub, sub_assign;
        /// Elementwise multiplication (repetition for text times integer)
        Mul => mul, rmul, mul_assign;
        /// Elementwise true division; integers divide to floats
        TrueDiv => truediv, rtruediv, truediv_assign;
        /// Elementwise floor division
        FloorDiv => floordiv, rfloordiv, floordiv_assign;
        /// Elementwise modulo; the result takes the sign of the divisor
        Mod => modulo, rmodulo, modulo_assign;
        Pow => pow, rpow, pow_assign;
        LShift => lshift, rlshift, lshift_assign;
        RShift => rshift, rrshift, rshift_assign;
        BitAnd => bitand, rbitand, bitand_assign;
        BitXor => bitxor, rbitxor, bitxor_assign;
        BitOr => bitor, rbitor, bitor_assign;
    }

    unary_methods! {
        Neg => neg;
        Pos => pos;
        Abs => abs;
        Invert => invert;
    }

    /// Floor quotient and remainder
    fn divmod(&self, other: impl Into<Operand>) -> Result<(Self, Self)> {
        let other = other.into();
        Ok((self.floordiv(other.clone())?, self.modulo(other)?))
    }

    fn rdivmod(&self, other: impl Into<Operand>) -> Result<(Self, Self)> {
        let other = other.into();
        Ok((self.rfloordiv(other.clone())?, self.rmodulo(other)?))
    }

    fn dot(&self, other: impl Into<Operand>) -> Result<Scalar> {
        self.apply_dot(other.into(), false)
    }

    fn matmul(&self, other: impl Into<Operand>) -> Result<Scalar> {
        self.apply_dot(other.into(), false)
    }

    fn rmatmul(&self, other: impl Into<Operand>) -> Result<Scalar> {
        self.apply_dot(other.into(), true)
    }
}
