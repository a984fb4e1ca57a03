//! Numerically stable elementwise kernels in log-odds space.
//!
//! Each kernel is defined for every finite input without overflow, and takes its
//! mathematical limit at `±∞`.

use crate::scalar::Scalar;
use scirs2_core::ndarray::{ArrayD, ArrayViewD, Zip};

/// Logistic sigmoid `1 / (1 + exp(-x))`.
///
/// Evaluated on the branch whose exponential cannot overflow.
pub fn sigmoid<T: Scalar>(x: T) -> T {
    if x >= T::zero() {
        T::one() / (T::one() + (-x).exp())
    } else {
        let e = x.exp();
        e / (T::one() + e)
    }
}

/// Log-odds `ln(p) - ln(1 - p)`.
///
/// Returns `-∞` at `p = 0`, `+∞` at `p = 1` and NaN outside `[0, 1]`.
pub fn logit<T: Scalar>(p: T) -> T {
    p.ln() - (T::one() - p).ln()
}

/// Softplus `ln(1 + exp(x))` as `max(x, 0) + ln(1 + exp(-|x|))`.
pub fn softplus<T: Scalar>(x: T) -> T {
    x.max(T::zero()) + (-x.abs()).exp().ln_1p()
}

/// Sigmoid cross-entropy of `logits` against `target`:
/// `-(z·ln σ(x) + (1 - z)·ln(1 - σ(x)))`.
///
/// Computed as `max(x, 0) - x·z + ln(1 + exp(-|x|))`. For infinite logits the finite
/// formula degenerates to `∞ - ∞`, so the limit is taken directly: the loss is 0 when
/// the target agrees with the saturated side and `+∞` otherwise.
pub fn sigmoid_cross_entropy_with_logits<T: Scalar>(x: T, z: T) -> T {
    if x.is_infinite() {
        let miss = if x > T::zero() { T::one() - z } else { z };
        return if miss == T::zero() {
            T::zero()
        } else {
            miss * T::infinity()
        };
    }
    x.max(T::zero()) - x * z + (-x.abs()).exp().ln_1p()
}

/// Entropy of a Bernoulli with log-odds `x`, in nats.
///
/// `-x·(σ(x) - 1) + ln(exp(-x) + 1)`, evaluated on `|x|` (the entropy is symmetric)
/// so neither term overflows. Zero at `x = ±∞`.
pub fn binary_entropy_from_logits<T: Scalar>(x: T) -> T {
    if x.is_infinite() {
        return T::zero();
    }
    let a = x.abs();
    let e = (-a).exp();
    e.ln_1p() + a * e / (T::one() + e)
}

/// Apply `sigmoid` elementwise.
pub fn sigmoid_tensor<T: Scalar>(logits: &ArrayD<T>) -> ArrayD<T> {
    logits.mapv(sigmoid)
}

/// Apply `logit` elementwise.
pub fn logit_tensor<T: Scalar>(probs: &ArrayD<T>) -> ArrayD<T> {
    probs.mapv(logit)
}

/// Elementwise sigmoid cross-entropy of two tensors of identical shape.
///
/// Callers broadcast both operands first; see `shape::broadcast_shapes`.
pub(crate) fn sigmoid_cross_entropy_tensor<T: Scalar>(
    logits: ArrayViewD<'_, T>,
    targets: ArrayViewD<'_, T>,
) -> ArrayD<T> {
    Zip::from(logits)
        .and(targets)
        .map_collect(|&x, &z| sigmoid_cross_entropy_with_logits(x, z))
}
