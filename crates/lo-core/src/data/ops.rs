//! Scalar operator table
//!
//! Every container operator bottoms out here: [`BinaryOp::apply`] and
//! [`UnaryOp::apply`] implement the primitive semantics for one pair of
//! scalars, and [`combine`] lifts them over equal-length sequences.

use std::cmp::Ordering;

use num_complex::Complex64;

use super::*;

/// Binary elementwise operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Lt,
    Le,
    Eq,
    Ne,
    Gt,
    Ge,
    Add,
    Sub,
    Mul,
    TrueDiv,
    FloorDiv,
    Mod,
    Pow,
    LShift,
    RShift,
    BitAnd,
    BitXor,
    BitOr,
}

/// Unary elementwise operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Pos,
    Abs,
    Invert,
}

/// Numeric view of a scalar after promotion (`bool` counts as an integer)
#[derive(Debug, Clone, Copy)]
enum Num {
    Int(i64),
    Float(f64),
    Complex(Complex64),
}

impl Num {
    fn of(value: &Scalar) -> Option<Num> {
        match value {
            Scalar::Int(v) => Some(Num::Int(*v)),
            Scalar::Bool(v) => Some(Num::Int(i64::from(*v))),
            Scalar::Float(v) => Some(Num::Float(*v)),
            Scalar::Complex(v) => Some(Num::Complex(*v)),
            _ => None,
        }
    }

    fn to_f64(self) -> f64 {
        match self {
            Num::Int(v) => v as f64,
            Num::Float(v) => v,
            Num::Complex(v) => v.re,
        }
    }

    fn to_complex(self) -> Complex64 {
        match self {
            Num::Complex(v) => v,
            other => Complex64::new(other.to_f64(), 0.0),
        }
    }
}

/// A pair of numbers promoted to their common kind
enum Promoted {
    Ints(i64, i64),
    Floats(f64, f64),
    Complexes(Complex64, Complex64),
}

fn promote(a: Num, b: Num) -> Promoted {
    match (a, b) {
        (Num::Int(a), Num::Int(b)) => Promoted::Ints(a, b),
        (Num::Complex(_), _) | (_, Num::Complex(_)) => {
            Promoted::Complexes(a.to_complex(), b.to_complex())
        }
        _ => Promoted::Floats(a.to_f64(), b.to_f64()),
    }
}

impl BinaryOp {
    /// Operator symbol used in error messages
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::TrueDiv => "/",
            BinaryOp::FloorDiv => "//",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "**",
            BinaryOp::LShift => "<<",
            BinaryOp::RShift => ">>",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitXor => "^",
            BinaryOp::BitOr => "|",
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Lt
                | BinaryOp::Le
                | BinaryOp::Eq
                | BinaryOp::Ne
                | BinaryOp::Gt
                | BinaryOp::Ge
        )
    }

    /// Apply the operator to one pair of scalars
    pub fn apply(self, lhs: &Scalar, rhs: &Scalar) -> Result<Scalar> {
        let unsupported = || DataError::UnsupportedOperand {
            op: self.symbol(),
            lhs: lhs.kind_name(),
            rhs: rhs.kind_name(),
        };

        match self {
            BinaryOp::Eq => return Ok(Scalar::Bool(lhs.loose_eq(rhs))),
            BinaryOp::Ne => return Ok(Scalar::Bool(!lhs.loose_eq(rhs))),
            BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
                let ordering = compare(lhs, rhs).ok_or_else(unsupported)?;
                let result = match (self, ordering) {
                    // unordered (NaN) compares false everywhere
                    (_, None) => false,
                    (BinaryOp::Lt, Some(o)) => o == Ordering::Less,
                    (BinaryOp::Le, Some(o)) => o != Ordering::Greater,
                    (BinaryOp::Gt, Some(o)) => o == Ordering::Greater,
                    (_, Some(o)) => o != Ordering::Less,
                };
                return Ok(Scalar::Bool(result));
            }
            _ => {}
        }

        match (self, lhs, rhs) {
            (BinaryOp::Add, Scalar::Str(a), Scalar::Str(b)) => {
                return Ok(Scalar::Str(format!("{a}{b}")));
            }
            (BinaryOp::Add, Scalar::Bytes(a), Scalar::Bytes(b)) => {
                return Ok(Scalar::Bytes([a.as_slice(), b.as_slice()].concat()));
            }
            (BinaryOp::Mul, Scalar::Str(s), n) | (BinaryOp::Mul, n, Scalar::Str(s)) => {
                let count = n.as_int().ok_or_else(unsupported)?;
                return Ok(Scalar::Str(s.repeat(usize::try_from(count).unwrap_or(0))));
            }
            (BinaryOp::Mul, Scalar::Bytes(s), n) | (BinaryOp::Mul, n, Scalar::Bytes(s)) => {
                let count = n.as_int().ok_or_else(unsupported)?;
                return Ok(Scalar::Bytes(s.repeat(usize::try_from(count).unwrap_or(0))));
            }
            (BinaryOp::BitAnd, Scalar::Bool(a), Scalar::Bool(b)) => {
                return Ok(Scalar::Bool(a & b));
            }
            (BinaryOp::BitXor, Scalar::Bool(a), Scalar::Bool(b)) => {
                return Ok(Scalar::Bool(a ^ b));
            }
            (BinaryOp::BitOr, Scalar::Bool(a), Scalar::Bool(b)) => {
                return Ok(Scalar::Bool(a | b));
            }
            _ => {}
        }

        let (a, b) = match (Num::of(lhs), Num::of(rhs)) {
            (Some(a), Some(b)) => (a, b),
            _ => return Err(unsupported()),
        };

        match self {
            BinaryOp::Add => arithmetic(promote(a, b), i64::checked_add, |a, b| a + b, |a, b| a + b, "+"),
            BinaryOp::Sub => arithmetic(promote(a, b), i64::checked_sub, |a, b| a - b, |a, b| a - b, "-"),
            BinaryOp::Mul => arithmetic(promote(a, b), i64::checked_mul, |a, b| a * b, |a, b| a * b, "*"),
            BinaryOp::TrueDiv => true_div(promote(a, b)),
            BinaryOp::FloorDiv => match promote(a, b) {
                Promoted::Ints(a, b) => int_divmod(a, b).map(|(q, _)| Scalar::Int(q)),
                Promoted::Floats(a, b) => float_divmod(a, b).map(|(q, _)| Scalar::Float(q)),
                Promoted::Complexes(..) => Err(unsupported()),
            },
            BinaryOp::Mod => match promote(a, b) {
                Promoted::Ints(a, b) => int_divmod(a, b).map(|(_, r)| Scalar::Int(r)),
                Promoted::Floats(a, b) => float_divmod(a, b).map(|(_, r)| Scalar::Float(r)),
                Promoted::Complexes(..) => Err(unsupported()),
            },
            BinaryOp::Pow => power(promote(a, b)),
            BinaryOp::LShift | BinaryOp::RShift | BinaryOp::BitAnd | BinaryOp::BitXor | BinaryOp::BitOr => {
                match (a, b) {
                    (Num::Int(a), Num::Int(b)) => bitwise(self, a, b),
                    _ => Err(unsupported()),
                }
            }
            _ => Err(unsupported()),
        }
    }
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "unary -",
            UnaryOp::Pos => "unary +",
            UnaryOp::Abs => "abs()",
            UnaryOp::Invert => "unary ~",
        }
    }

    /// Apply the operator to one scalar
    pub fn apply(self, value: &Scalar) -> Result<Scalar> {
        let unsupported = || DataError::UnsupportedUnary {
            op: self.symbol(),
            operand: value.kind_name(),
        };

        match (self, value) {
            // boolean inversion is logical, as in numeric libraries
            (UnaryOp::Invert, Scalar::Bool(v)) => Ok(Scalar::Bool(!v)),
            (UnaryOp::Invert, Scalar::Int(v)) => Ok(Scalar::Int(!v)),
            (UnaryOp::Invert, _) => Err(unsupported()),
            (op, value) => match Num::of(value).ok_or_else(unsupported)? {
                Num::Int(v) => match op {
                    UnaryOp::Neg => v.checked_neg().map(Scalar::Int).ok_or(DataError::Overflow("unary -")),
                    UnaryOp::Abs => v.checked_abs().map(Scalar::Int).ok_or(DataError::Overflow("abs()")),
                    _ => Ok(Scalar::Int(v)),
                },
                Num::Float(v) => match op {
                    UnaryOp::Neg => Ok(Scalar::Float(-v)),
                    UnaryOp::Abs => Ok(Scalar::Float(v.abs())),
                    _ => Ok(Scalar::Float(v)),
                },
                Num::Complex(v) => match op {
                    UnaryOp::Neg => Ok(Scalar::Complex(-v)),
                    UnaryOp::Abs => Ok(Scalar::Float(v.norm())),
                    _ => Ok(Scalar::Complex(v)),
                },
            },
        }
    }
}

/// Ordering between two scalars; `None` for kinds that cannot be ordered,
/// `Some(None)` for unordered floats
fn compare(lhs: &Scalar, rhs: &Scalar) -> Option<Option<Ordering>> {
    match (lhs, rhs) {
        (Scalar::Str(a), Scalar::Str(b)) => Some(Some(a.cmp(b))),
        (Scalar::Bytes(a), Scalar::Bytes(b)) => Some(Some(a.cmp(b))),
        (Scalar::Complex(_), _) | (_, Scalar::Complex(_)) => None,
        _ => match (Num::of(lhs)?, Num::of(rhs)?) {
            (Num::Int(a), Num::Int(b)) => Some(Some(a.cmp(&b))),
            (a, b) => Some(a.to_f64().partial_cmp(&b.to_f64())),
        },
    }
}

fn arithmetic(
    pair: Promoted,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
    complex_op: fn(Complex64, Complex64) -> Complex64,
    symbol: &'static str,
) -> Result<Scalar> {
    match pair {
        Promoted::Ints(a, b) => int_op(a, b).map(Scalar::Int).ok_or(DataError::Overflow(symbol)),
        Promoted::Floats(a, b) => Ok(Scalar::Float(float_op(a, b))),
        Promoted::Complexes(a, b) => Ok(Scalar::Complex(complex_op(a, b))),
    }
}

fn true_div(pair: Promoted) -> Result<Scalar> {
    match pair {
        Promoted::Ints(_, 0) => Err(DataError::ZeroDivision),
        Promoted::Ints(a, b) => Ok(Scalar::Float(a as f64 / b as f64)),
        Promoted::Floats(_, b) if b == 0.0 => Err(DataError::ZeroDivision),
        Promoted::Floats(a, b) => Ok(Scalar::Float(a / b)),
        Promoted::Complexes(_, b) if b.re == 0.0 && b.im == 0.0 => Err(DataError::ZeroDivision),
        Promoted::Complexes(a, b) => Ok(Scalar::Complex(a / b)),
    }
}

/// Floor division and modulo; the remainder takes the sign of the divisor
pub(crate) fn int_divmod(a: i64, b: i64) -> Result<(i64, i64)> {
    if b == 0 {
        return Err(DataError::ZeroDivision);
    }
    let quotient = a.checked_div(b).ok_or(DataError::Overflow("//"))?;
    let remainder = a.wrapping_rem(b);
    if remainder != 0 && ((remainder < 0) != (b < 0)) {
        Ok((quotient - 1, remainder + b))
    } else {
        Ok((quotient, remainder))
    }
}

pub(crate) fn float_divmod(a: f64, b: f64) -> Result<(f64, f64)> {
    if b == 0.0 {
        return Err(DataError::ZeroDivision);
    }
    let mut remainder = a % b;
    let mut div = (a - remainder) / b;
    if remainder != 0.0 {
        if (b < 0.0) != (remainder < 0.0) {
            remainder += b;
            div -= 1.0;
        }
    } else {
        remainder = 0.0_f64.copysign(b);
    }
    let quotient = if div != 0.0 {
        let floor = div.floor();
        if div - floor > 0.5 { floor + 1.0 } else { floor }
    } else {
        0.0_f64.copysign(a / b)
    };
    Ok((quotient, remainder))
}

fn power(pair: Promoted) -> Result<Scalar> {
    match pair {
        Promoted::Ints(a, b) if b >= 0 => {
            let exponent = u32::try_from(b).map_err(|_| DataError::Overflow("**"))?;
            a.checked_pow(exponent).map(Scalar::Int).ok_or(DataError::Overflow("**"))
        }
        Promoted::Ints(0, _) => Err(DataError::ZeroDivision),
        Promoted::Ints(a, b) => Ok(Scalar::Float((a as f64).powf(b as f64))),
        Promoted::Floats(a, b) if a == 0.0 && b < 0.0 => Err(DataError::ZeroDivision),
        Promoted::Floats(a, b) if a < 0.0 && b.fract() != 0.0 => Ok(Scalar::Complex(
            Complex64::new(a, 0.0).powc(Complex64::new(b, 0.0)),
        )),
        Promoted::Floats(a, b) => Ok(Scalar::Float(a.powf(b))),
        Promoted::Complexes(a, b) if a.re == 0.0 && a.im == 0.0 => {
            if b.re < 0.0 || b.im != 0.0 {
                Err(DataError::ZeroDivision)
            } else if b.re == 0.0 {
                Ok(Scalar::Complex(Complex64::new(1.0, 0.0)))
            } else {
                Ok(Scalar::Complex(Complex64::new(0.0, 0.0)))
            }
        }
        Promoted::Complexes(a, b) => Ok(Scalar::Complex(a.powc(b))),
    }
}

/// Integer bit operations; `op` is one of the shift or bitwise operators
fn bitwise(op: BinaryOp, a: i64, b: i64) -> Result<Scalar> {
    let shift = |b: i64| {
        u32::try_from(b).map_err(|_| DataError::InvalidParameter("negative shift count".to_string()))
    };
    let value = match op {
        BinaryOp::BitAnd => a & b,
        BinaryOp::BitXor => a ^ b,
        BinaryOp::LShift => {
            let s = shift(b)?;
            if a == 0 {
                0
            } else if s >= i64::BITS {
                return Err(DataError::Overflow("<<"));
            } else {
                let shifted = a << s;
                if shifted >> s != a {
                    return Err(DataError::Overflow("<<"));
                }
                shifted
            }
        }
        BinaryOp::RShift => {
            let s = shift(b)?;
            if s >= i64::BITS {
                if a < 0 { -1 } else { 0 }
            } else {
                a >> s
            }
        }
        _ => a | b,
    };
    Ok(Scalar::Int(value))
}

/// Combine two equal-length sequences position by position
///
/// With `reflected` the operands are swapped, so the result holds
/// `op(rhs[i], lhs[i])`.
pub(crate) fn combine(
    op: BinaryOp,
    lhs: &[Scalar],
    rhs: &[Scalar],
    reflected: bool,
) -> Result<Vec<Scalar>> {
    debug_assert_eq!(lhs.len(), rhs.len());
    lhs.iter()
        .zip(rhs)
        .map(|(l, r)| if reflected { op.apply(r, l) } else { op.apply(l, r) })
        .collect()
}

/// Multiply position by position and sum, folding from integer zero
pub(crate) fn dot_product(lhs: &[Scalar], rhs: &[Scalar], reflected: bool) -> Result<Scalar> {
    combine(BinaryOp::Mul, lhs, rhs, reflected)?
        .iter()
        .try_fold(Scalar::Int(0), |acc, v| BinaryOp::Add.apply(&acc, v))
}
