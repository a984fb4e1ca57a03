//! Batched probability distributions over SciRS2 tensors.
//!
//! Every parameter and every result is an N-D array (`ArrayD`), with one independent
//! distribution per batch position.
//!
//! ## Core Features
//!
//! ### Bernoulli
//! - **Two parameterizations**: probabilities or log-odds, with the other derived
//! - **Stable log-mass**: negated sigmoid cross-entropy, finite across the whole
//!   logit range and exact limits at `±∞`
//! - **Broadcasting**: events broadcast against the batch shape (NumPy rules)
//! - **Sampling**: seeded, reproducible threshold sampling against uniform noise
//! - **Statistics**: mean, mode, variance, standard deviation, entropy
//!
//! ### Reliability
//! - **Validation**: strict range checks on probabilities at construction
//! - **Error handling**: `DistributionError` with shape and parameter context
//!
//! ## Module Organization
//!
//! - `bernoulli`: The `Bernoulli` distribution
//! - `distribution`: The `Distribution` contract shared by batched distributions
//! - `config`: Construction options (`BernoulliConfig`)
//! - `dtype`: Sample element types and observed-event element types
//! - `ops`: Numerically stable elementwise kernels (sigmoid, softplus, cross-entropy)
//! - `shape`: Static shapes and broadcasting
//! - `scalar`: f32/f64 parameter precision
//! - `error`: Error types

pub mod bernoulli;
pub mod config;
pub mod distribution;
pub mod dtype;
pub mod error;
pub mod ops;
pub mod scalar;
pub mod shape;

pub use bernoulli::Bernoulli;
pub use config::BernoulliConfig;
pub use distribution::Distribution;
pub use dtype::{EventElement, SampleDtype, SampleTensor};
pub use error::{ConstructionError, DistResult, DistributionError, ShapeMismatchError};
pub use ops::{
    binary_entropy_from_logits, logit, sigmoid, sigmoid_cross_entropy_with_logits, softplus,
};
pub use scalar::{Precision, Scalar};
pub use shape::{broadcast_shapes, DimSize, TensorShape};
