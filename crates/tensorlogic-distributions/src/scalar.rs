//! Floating-point element types for distribution parameters.
//!
//! Parameters (`logits`, `probs`, `complement`) and every real-valued result are
//! stored in one precision, chosen by the `Scalar` type parameter of the distribution.

use std::fmt;

/// Numerical precision of a parameter tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Precision {
    /// 32-bit floating point
    F32,

    /// 64-bit floating point
    #[default]
    F64,
}

impl Precision {
    /// Returns the size in bytes of this precision.
    pub fn size_bytes(&self) -> usize {
        match self {
            Precision::F32 => 4,
            Precision::F64 => 8,
        }
    }

    /// Returns a human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Precision::F32 => "32-bit floating point",
            Precision::F64 => "64-bit floating point",
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precision::F32 => write!(f, "FP32"),
            Precision::F64 => write!(f, "FP64"),
        }
    }
}

/// Trait for scalar types that can parameterize a distribution.
///
/// This trait abstracts over f32 and f64 for generic tensor operations.
pub trait Scalar:
    Copy
    + Clone
    + PartialEq
    + PartialOrd
    + std::fmt::Debug
    + std::fmt::Display
    + std::ops::Add<Output = Self>
    + std::ops::Sub<Output = Self>
    + std::ops::Mul<Output = Self>
    + std::ops::Div<Output = Self>
    + std::ops::Neg<Output = Self>
    + Send
    + Sync
    + 'static
{
    /// Zero value
    fn zero() -> Self;

    /// One value
    fn one() -> Self;

    /// Positive infinity
    fn infinity() -> Self;

    /// Negative infinity
    fn neg_infinity() -> Self;

    /// Not a number
    fn nan() -> Self;

    /// Check if value is NaN
    fn is_nan(self) -> bool;

    /// Check if value is infinite
    fn is_infinite(self) -> bool;

    /// Absolute value
    fn abs(self) -> Self;

    /// Square root
    fn sqrt(self) -> Self;

    /// Exponential
    fn exp(self) -> Self;

    /// Natural logarithm
    fn ln(self) -> Self;

    /// `ln(1 + self)`, accurate for small values
    fn ln_1p(self) -> Self;

    /// Maximum of two values
    fn max(self, other: Self) -> Self;

    /// Convert from f64
    fn from_f64(value: f64) -> Self;

    /// Convert to f64
    fn to_f64(self) -> f64;

    /// The precision type
    fn precision() -> Precision;
}

macro_rules! impl_scalar {
    ($t:ident, $precision:expr) => {
        impl Scalar for $t {
            fn zero() -> Self {
                0.0
            }

            fn one() -> Self {
                1.0
            }

            fn infinity() -> Self {
                $t::INFINITY
            }

            fn neg_infinity() -> Self {
                $t::NEG_INFINITY
            }

            fn nan() -> Self {
                $t::NAN
            }

            fn is_nan(self) -> bool {
                $t::is_nan(self)
            }

            fn is_infinite(self) -> bool {
                $t::is_infinite(self)
            }

            fn abs(self) -> Self {
                $t::abs(self)
            }

            fn sqrt(self) -> Self {
                $t::sqrt(self)
            }

            fn exp(self) -> Self {
                $t::exp(self)
            }

            fn ln(self) -> Self {
                $t::ln(self)
            }

            fn ln_1p(self) -> Self {
                $t::ln_1p(self)
            }

            fn max(self, other: Self) -> Self {
                $t::max(self, other)
            }

            fn from_f64(value: f64) -> Self {
                value as $t
            }

            fn to_f64(self) -> f64 {
                self as f64
            }

            fn precision() -> Precision {
                $precision
            }
        }
    };
}

impl_scalar!(f32, Precision::F32);
impl_scalar!(f64, Precision::F64);
