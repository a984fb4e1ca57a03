//! Static shape representation and broadcasting rules.
//!
//! Runtime shapes are plain `Vec<usize>` taken from the arrays themselves.
//! `TensorShape` carries the shape information known before any value is computed,
//! where a dimension may be unknown (`DimSize::Dynamic`).

use std::fmt;

use crate::error::{DistResult, DistributionError, ShapeMismatchError};

/// Shape information for a tensor dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DimSize {
    /// Static known size
    Static(usize),
    /// Size only known once the tensor exists
    Dynamic,
}

impl DimSize {
    pub fn is_static(&self) -> bool {
        matches!(self, DimSize::Static(_))
    }

    pub fn as_static(&self) -> Option<usize> {
        match self {
            DimSize::Static(size) => Some(*size),
            DimSize::Dynamic => None,
        }
    }
}

impl fmt::Display for DimSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimSize::Static(size) => write!(f, "{}", size),
            DimSize::Dynamic => write!(f, "?"),
        }
    }
}

/// Partially known tensor shape
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TensorShape {
    pub dims: Vec<DimSize>,
}

impl TensorShape {
    pub fn new(dims: Vec<DimSize>) -> Self {
        TensorShape { dims }
    }

    /// The rank-0 shape of a single scalar
    pub fn scalar() -> Self {
        TensorShape { dims: Vec::new() }
    }

    pub fn static_shape(sizes: impl IntoIterator<Item = usize>) -> Self {
        TensorShape {
            dims: sizes.into_iter().map(DimSize::Static).collect(),
        }
    }

    pub fn dynamic(rank: usize) -> Self {
        TensorShape {
            dims: vec![DimSize::Dynamic; rank],
        }
    }

    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    pub fn is_scalar(&self) -> bool {
        self.dims.is_empty()
    }

    pub fn is_static(&self) -> bool {
        self.dims.iter().all(|d| d.is_static())
    }

    pub fn as_static(&self) -> Option<Vec<usize>> {
        self.dims.iter().map(|d| d.as_static()).collect()
    }

    /// Append the dimensions of `other` after this shape's dimensions
    pub fn concatenate(&self, other: &TensorShape) -> TensorShape {
        let mut dims = self.dims.clone();
        dims.extend(other.dims.iter().copied());
        TensorShape { dims }
    }

    /// Check if two shapes can broadcast against each other.
    ///
    /// Dimensions are aligned from the right; missing leading dims behave as 1.
    pub fn compatible_with(&self, other: &TensorShape) -> bool {
        for (a, b) in self.dims.iter().rev().zip(other.dims.iter().rev()) {
            if let (DimSize::Static(size_a), DimSize::Static(size_b)) = (a, b) {
                if size_a != size_b && *size_a != 1 && *size_b != 1 {
                    return false;
                }
            }
        }

        true
    }
}

impl fmt::Display for TensorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, dim) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", dim)?;
        }
        write!(f, "]")
    }
}

impl From<&[usize]> for TensorShape {
    fn from(sizes: &[usize]) -> Self {
        TensorShape::static_shape(sizes.iter().copied())
    }
}

/// Compute the shape two operands broadcast to.
///
/// Follows NumPy rules: shapes are right-aligned and each dimension pair must be
/// equal or contain a 1.
pub fn broadcast_shapes(lhs: &[usize], rhs: &[usize]) -> DistResult<Vec<usize>> {
    let rank = lhs.len().max(rhs.len());
    let mut out = vec![0; rank];

    for (i, slot) in out.iter_mut().enumerate() {
        let a = dim_from_right(lhs, rank - 1 - i);
        let b = dim_from_right(rhs, rank - 1 - i);
        *slot = match (a, b) {
            (a, b) if a == b => a,
            (1, b) => b,
            (a, 1) => a,
            _ => {
                let err =
                    ShapeMismatchError::new("broadcast", vec![lhs.to_vec()], vec![rhs.to_vec()])
                        .with_context(format!("dimension {} differs: {} vs {}", i, a, b));
                return Err(DistributionError::ShapeMismatch(err));
            }
        };
    }

    Ok(out)
}

fn dim_from_right(shape: &[usize], offset: usize) -> usize {
    if offset < shape.len() {
        shape[shape.len() - 1 - offset]
    } else {
        1
    }
}
