//! Runtime values.

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use crate::token::Span;

/// Numeric scalar. Integer arithmetic promotes to float on overflow,
/// division always produces a float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub const fn as_f64(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::Float(v) => v,
        }
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        match self {
            Self::Int(v) => v == 0,
            Self::Float(v) => v == 0.0,
        }
    }

    #[must_use]
    pub fn pow(self, other: Self) -> Self {
        if let (Self::Int(base), Self::Int(exp)) = (self, other) {
            if let Some(v) = u32::try_from(exp).ok().and_then(|e| base.checked_pow(e)) {
                return Self::Int(v);
            }
        }
        Self::Float(self.as_f64().powf(other.as_f64()))
    }

    fn int_or_float(
        self,
        other: Self,
        int_op: fn(i64, i64) -> Option<i64>,
        float_op: fn(f64, f64) -> f64,
    ) -> Self {
        if let (Self::Int(a), Self::Int(b)) = (self, other) {
            if let Some(v) = int_op(a, b) {
                return Self::Int(v);
            }
        }
        Self::Float(float_op(self.as_f64(), other.as_f64()))
    }
}

impl Add for Number {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.int_or_float(other, i64::checked_add, |a, b| a + b)
    }
}

impl Sub for Number {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.int_or_float(other, i64::checked_sub, |a, b| a - b)
    }
}

impl Mul for Number {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        self.int_or_float(other, i64::checked_mul, |a, b| a * b)
    }
}

/// True division. The interpreter rejects a zero divisor before
/// getting here.
impl Div for Number {
    type Output = Self;

    fn div(self, other: Self) -> Self {
        Self::Float(self.as_f64() / other.as_f64())
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            // plain decimal, always with a point, so it lexes back as a float
            Self::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v}.0"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

/// A number stamped with the span of the expression that produced it.
/// It holds no reference to the context it was computed in; runtime
/// diagnostics take their traceback from the evaluating context.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    pub number: Number,
    pub span: Option<Span>,
}

impl Value {
    #[must_use]
    pub const fn new(number: Number) -> Self {
        Self { number, span: None }
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

impl From<Number> for Value {
    fn from(number: Number) -> Self {
        Self::new(number)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.number.fmt(f)
    }
}
