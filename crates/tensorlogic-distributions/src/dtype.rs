//! Element types for discrete outputs and observed events.
//!
//! Samples and modes are binary outcomes; `SampleDtype` selects the element type they
//! are cast to, and `SampleTensor` holds the result. `EventElement` is implemented by
//! every element type accepted as an observed event.

use scirs2_core::ndarray::ArrayD;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Element type that binary outcomes are cast to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleDtype {
    /// `bool` outcomes
    Bool,
    /// 8-bit unsigned integers
    #[serde(rename = "uint8")]
    UInt8,
    /// 32-bit signed integers
    #[default]
    Int32,
    /// 64-bit signed integers
    Int64,
    /// 32-bit floating point
    Float32,
    /// 64-bit floating point
    Float64,
}

impl SampleDtype {
    /// Returns the size in bytes of one element.
    pub fn size_bytes(&self) -> usize {
        match self {
            SampleDtype::Bool | SampleDtype::UInt8 => 1,
            SampleDtype::Int32 | SampleDtype::Float32 => 4,
            SampleDtype::Int64 | SampleDtype::Float64 => 8,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            SampleDtype::UInt8 | SampleDtype::Int32 | SampleDtype::Int64
        )
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, SampleDtype::Float32 | SampleDtype::Float64)
    }
}

impl fmt::Display for SampleDtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SampleDtype::Bool => "bool",
            SampleDtype::UInt8 => "uint8",
            SampleDtype::Int32 => "int32",
            SampleDtype::Int64 => "int64",
            SampleDtype::Float32 => "float32",
            SampleDtype::Float64 => "float64",
        };
        write!(f, "{}", name)
    }
}

/// Binary outcomes stored in the element type requested by a `SampleDtype`.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleTensor {
    Bool(ArrayD<bool>),
    UInt8(ArrayD<u8>),
    Int32(ArrayD<i32>),
    Int64(ArrayD<i64>),
    Float32(ArrayD<f32>),
    Float64(ArrayD<f64>),
}

macro_rules! dispatch {
    ($tensor:expr, $arr:ident => $body:expr) => {
        match $tensor {
            $crate::dtype::SampleTensor::Bool($arr) => $body,
            $crate::dtype::SampleTensor::UInt8($arr) => $body,
            $crate::dtype::SampleTensor::Int32($arr) => $body,
            $crate::dtype::SampleTensor::Int64($arr) => $body,
            $crate::dtype::SampleTensor::Float32($arr) => $body,
            $crate::dtype::SampleTensor::Float64($arr) => $body,
        }
    };
}

pub(crate) use dispatch;

impl SampleTensor {
    /// Cast a tensor of boolean outcomes to `dtype` (`true` becomes 1).
    pub fn from_outcomes(outcomes: ArrayD<bool>, dtype: SampleDtype) -> Self {
        match dtype {
            SampleDtype::Bool => SampleTensor::Bool(outcomes),
            SampleDtype::UInt8 => SampleTensor::UInt8(outcomes.mapv(u8::from)),
            SampleDtype::Int32 => SampleTensor::Int32(outcomes.mapv(i32::from)),
            SampleDtype::Int64 => SampleTensor::Int64(outcomes.mapv(i64::from)),
            SampleDtype::Float32 => {
                SampleTensor::Float32(outcomes.mapv(|b| if b { 1.0 } else { 0.0 }))
            }
            SampleDtype::Float64 => {
                SampleTensor::Float64(outcomes.mapv(|b| if b { 1.0 } else { 0.0 }))
            }
        }
    }

    pub fn dtype(&self) -> SampleDtype {
        match self {
            SampleTensor::Bool(_) => SampleDtype::Bool,
            SampleTensor::UInt8(_) => SampleDtype::UInt8,
            SampleTensor::Int32(_) => SampleDtype::Int32,
            SampleTensor::Int64(_) => SampleDtype::Int64,
            SampleTensor::Float32(_) => SampleDtype::Float32,
            SampleTensor::Float64(_) => SampleDtype::Float64,
        }
    }

    pub fn shape(&self) -> &[usize] {
        dispatch!(self, arr => arr.shape())
    }

    pub fn len(&self) -> usize {
        dispatch!(self, arr => arr.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Widen every element to f64.
    pub fn to_f64(&self) -> ArrayD<f64> {
        dispatch!(self, arr => arr.mapv(EventElement::to_f64))
    }

    /// Fraction of positive outcomes, `None` for an empty tensor.
    pub fn mean(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        let total: f64 = dispatch!(self, arr => arr.iter().map(|&v| v.to_f64()).sum());
        Some(total / self.len() as f64)
    }

    pub fn as_bool(&self) -> Option<&ArrayD<bool>> {
        match self {
            SampleTensor::Bool(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_u8(&self) -> Option<&ArrayD<u8>> {
        match self {
            SampleTensor::UInt8(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<&ArrayD<i32>> {
        match self {
            SampleTensor::Int32(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<&ArrayD<i64>> {
        match self {
            SampleTensor::Int64(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<&ArrayD<f32>> {
        match self {
            SampleTensor::Float32(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<&ArrayD<f64>> {
        match self {
            SampleTensor::Float64(arr) => Some(arr),
            _ => None,
        }
    }
}

/// Element types accepted as observed events.
///
/// Events are cast to the distribution's parameter precision through f64.
pub trait EventElement: Copy + Send + Sync + 'static {
    fn to_f64(self) -> f64;
}

impl EventElement for bool {
    fn to_f64(self) -> f64 {
        if self {
            1.0
        } else {
            0.0
        }
    }
}

impl EventElement for u8 {
    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

impl EventElement for i32 {
    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

impl EventElement for i64 {
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl EventElement for f32 {
    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

impl EventElement for f64 {
    fn to_f64(self) -> f64 {
        self
    }
}
