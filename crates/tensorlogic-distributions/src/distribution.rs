//! The contract shared by batched distributions.
//!
//! A distribution holds one independent instance per batch position. Every
//! real-valued result has element type `T`; discrete outputs (samples, modes) are
//! returned as a `SampleTensor` in the distribution's sample dtype.

use crate::dtype::{EventElement, SampleTensor};
use crate::error::DistResult;
use crate::scalar::Scalar;
use crate::shape::TensorShape;
use scirs2_core::ndarray::ArrayD;

/// Batched probability distribution with parameters of element type `T`.
pub trait Distribution<T: Scalar> {
    /// Display name of this distribution instance
    fn name(&self) -> &str;

    /// Runtime shape of the batch dimensions
    fn batch_shape(&self) -> Vec<usize>;

    /// Batch shape known without evaluating anything
    fn static_batch_shape(&self) -> TensorShape;

    /// Runtime shape of a single event
    fn event_shape(&self) -> Vec<usize>;

    /// Event shape known without evaluating anything
    fn static_event_shape(&self) -> TensorShape;

    /// Whether samples are differentiable functions of the parameters
    fn is_reparameterized(&self) -> bool;

    fn is_continuous(&self) -> bool;

    /// Whether undefined statistics raise instead of yielding NaN
    fn strict_statistics(&self) -> bool;

    /// Log of the probability (mass or density) of `event`.
    fn log_prob<E: EventElement>(&self, event: &ArrayD<E>) -> DistResult<ArrayD<T>>;

    /// Probability (mass or density) of `event`, `exp(log_prob(event))`.
    fn prob<E: EventElement>(&self, event: &ArrayD<E>) -> DistResult<ArrayD<T>> {
        Ok(self.log_prob(event)?.mapv(|v| v.exp()))
    }

    /// Draw `n` samples per batch member; the result has shape `[n] + batch_shape`.
    fn sample(&self, n: usize, seed: Option<u64>) -> DistResult<SampleTensor>;

    fn entropy(&self) -> DistResult<ArrayD<T>>;

    fn mean(&self) -> DistResult<ArrayD<T>>;

    fn mode(&self) -> DistResult<SampleTensor>;

    fn variance(&self) -> DistResult<ArrayD<T>>;

    /// Standard deviation, `sqrt(variance())`.
    fn std(&self) -> DistResult<ArrayD<T>> {
        Ok(self.variance()?.mapv(|v| v.sqrt()))
    }
}
