//! Batched Bernoulli distribution.
//!
//! Each batch position holds an independent binary variable with `P(X = 1) = p`.
//! The distribution can be parameterized by probabilities or by log-odds; both forms
//! are derived at construction and kept alongside `1 - p`, so every operation is a
//! pure function of the stored arrays.
//!
//! ## Example
//!
//! ```
//! use scirs2_core::ndarray::array;
//! use tensorlogic_distributions::{Bernoulli, BernoulliConfig, Distribution};
//!
//! let coin = Bernoulli::from_probs(array![0.0, 0.5, 1.0].into_dyn(), BernoulliConfig::default())?;
//! assert_eq!(coin.batch_shape(), vec![3]);
//! assert_eq!(coin.variance()?, array![0.0, 0.25, 0.0].into_dyn());
//!
//! let samples = coin.sample(4, Some(42))?;
//! assert_eq!(samples.shape(), &[4, 3]);
//! # Ok::<(), tensorlogic_distributions::DistributionError>(())
//! ```

use crate::config::BernoulliConfig;
use crate::distribution::Distribution;
use crate::dtype::{dispatch, EventElement, SampleDtype, SampleTensor};
use crate::error::{ConstructionError, DistResult, DistributionError, ShapeMismatchError};
use crate::ops::{
    binary_entropy_from_logits, logit_tensor, sigmoid_cross_entropy_tensor, sigmoid_tensor,
};
use crate::scalar::{Precision, Scalar};
use crate::shape::{broadcast_shapes, DimSize, TensorShape};
use scirs2_core::ndarray::{ArrayD, IxDyn, Zip};
use scirs2_core::random::{thread_rng, Rng, SeedableRng, StdRng};
use std::fmt;

/// Bernoulli distributions over a batch of independent binary variables.
#[derive(Debug, Clone)]
pub struct Bernoulli<T: Scalar = f64> {
    logits: ArrayD<T>,
    probs: ArrayD<T>,
    /// `1 - probs`
    complement: ArrayD<T>,
    config: BernoulliConfig,
}

impl<T: Scalar> Bernoulli<T> {
    /// Build from exactly one of `probs` or `logits`.
    ///
    /// Passing both or neither is a `ConstructionError`.
    pub fn new(
        probs: Option<ArrayD<T>>,
        logits: Option<ArrayD<T>>,
        config: BernoulliConfig,
    ) -> DistResult<Self> {
        match (probs, logits) {
            (Some(_), Some(_)) => Err(ConstructionError::BothParameters.into()),
            (None, None) => Err(ConstructionError::MissingParameter.into()),
            (Some(probs), None) => Self::from_probs(probs, config),
            (None, Some(logits)) => Self::from_logits(logits, config),
        }
    }

    /// Build from log-odds. `probs = sigmoid(logits)` always lies in `[0, 1]`, so no
    /// validation happens.
    pub fn from_logits(logits: ArrayD<T>, config: BernoulliConfig) -> DistResult<Self> {
        let probs = sigmoid_tensor(&logits);
        Ok(Self::assemble(logits, probs, config, "logits"))
    }

    /// Build from probabilities.
    ///
    /// With `config.strict` every element must lie in `[0, 1]` (NaN is rejected too).
    /// Without it the probabilities are stored as given and out-of-range values turn
    /// into NaN log-odds.
    pub fn from_probs(probs: ArrayD<T>, config: BernoulliConfig) -> DistResult<Self> {
        if config.strict {
            validate_probs(&probs)?;
        }
        let logits = logit_tensor(&probs);
        Ok(Self::assemble(logits, probs, config, "probs"))
    }

    /// Build from row-major log-odds data of the given batch shape.
    pub fn from_logits_vec(
        data: Vec<T>,
        shape: &[usize],
        config: BernoulliConfig,
    ) -> DistResult<Self> {
        Self::from_logits(array_from_vec(data, shape, "from_logits_vec")?, config)
    }

    /// Build from row-major probability data of the given batch shape.
    pub fn from_probs_vec(
        data: Vec<T>,
        shape: &[usize],
        config: BernoulliConfig,
    ) -> DistResult<Self> {
        Self::from_probs(array_from_vec(data, shape, "from_probs_vec")?, config)
    }

    fn assemble(
        logits: ArrayD<T>,
        probs: ArrayD<T>,
        config: BernoulliConfig,
        parameterization: &str,
    ) -> Self {
        let complement = probs.mapv(|p| T::one() - p);
        log::debug!(
            "{}: built from {} with batch shape {:?} ({}, strict={})",
            config.name,
            parameterization,
            logits.shape(),
            T::precision(),
            config.strict
        );
        Self {
            logits,
            probs,
            complement,
            config,
        }
    }

    /// Log-odds of a positive outcome
    pub fn logits(&self) -> &ArrayD<T> {
        &self.logits
    }

    /// Probability of a positive outcome
    pub fn probs(&self) -> &ArrayD<T> {
        &self.probs
    }

    /// `1 - probs`
    pub fn complement(&self) -> &ArrayD<T> {
        &self.complement
    }

    /// Whether probabilities were range-checked at construction
    pub fn strict(&self) -> bool {
        self.config.strict
    }

    /// Element type of samples and of the mode
    pub fn dtype(&self) -> SampleDtype {
        self.config.sample_dtype
    }

    pub fn config(&self) -> &BernoulliConfig {
        &self.config
    }

    /// Precision of the parameter arrays
    pub fn precision(&self) -> Precision {
        T::precision()
    }

    /// Static shape of `sample(n)`: `[n] + static_batch_shape`, with an unknown
    /// leading dimension when `n` is not known yet.
    pub fn static_sample_shape(&self, n: Option<usize>) -> TensorShape {
        let lead = match n {
            Some(n) => DimSize::Static(n),
            None => DimSize::Dynamic,
        };
        TensorShape::new(vec![lead]).concatenate(&self.static_batch_shape())
    }

    /// Draw `n` samples per batch member using the caller's RNG.
    ///
    /// One uniform value in `[0, 1)` is drawn per output element in row-major order;
    /// the outcome is 1 where it falls below the member's probability. A NaN
    /// probability never compares true, so it always yields 0.
    ///
    /// Fails with `InvalidArgument` when `[n] + batch_shape` has more elements than an
    /// array can address.
    pub fn sample_with_rng(&self, n: usize, rng: &mut impl Rng) -> DistResult<SampleTensor> {
        let total = n
            .checked_mul(self.probs.len())
            .filter(|&total| total <= isize::MAX as usize)
            .ok_or_else(|| {
                DistributionError::invalid_argument(format!(
                    "sample: {} draws over a batch of {} elements overflows the address space",
                    n,
                    self.probs.len()
                ))
            })?;

        let mut shape = Vec::with_capacity(self.probs.ndim() + 1);
        shape.push(n);
        shape.extend_from_slice(self.probs.shape());

        let outcomes: Vec<bool> = self
            .probs
            .iter()
            .cycle()
            .take(total)
            .map(|&p| {
                let u: f64 = rng.random();
                u < p.to_f64()
            })
            .collect();

        let outcomes = ArrayD::from_shape_vec(IxDyn(&shape), outcomes)
            .map_err(|e| DistributionError::invalid_argument(format!("sample: {}", e)))?;
        log::trace!(
            "{}: drew {} samples with shape {:?}",
            self.config.name,
            n,
            shape
        );
        Ok(SampleTensor::from_outcomes(outcomes, self.config.sample_dtype))
    }

    /// Log-mass of samples produced by `sample`, whatever their dtype.
    pub fn log_prob_samples(&self, samples: &SampleTensor) -> DistResult<ArrayD<T>> {
        dispatch!(samples, arr => self.log_prob(arr))
    }

    /// Mass of samples produced by `sample`, whatever their dtype.
    pub fn prob_samples(&self, samples: &SampleTensor) -> DistResult<ArrayD<T>> {
        dispatch!(samples, arr => self.prob(arr))
    }
}

impl<T: Scalar> Distribution<T> for Bernoulli<T> {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn batch_shape(&self) -> Vec<usize> {
        self.logits.shape().to_vec()
    }

    fn static_batch_shape(&self) -> TensorShape {
        TensorShape::from(self.logits.shape())
    }

    fn event_shape(&self) -> Vec<usize> {
        Vec::new()
    }

    fn static_event_shape(&self) -> TensorShape {
        TensorShape::scalar()
    }

    fn is_reparameterized(&self) -> bool {
        false
    }

    fn is_continuous(&self) -> bool {
        false
    }

    fn strict_statistics(&self) -> bool {
        self.config.strict_statistics
    }

    /// Log-mass of a 0/1 `event`, broadcast against the batch shape.
    ///
    /// Evaluated as the negated sigmoid cross-entropy of the logits against the event,
    /// which never forms `ln(p)` directly. Saturated logits take the limiting value:
    /// 0 for the certain outcome and `-∞` for the impossible one.
    fn log_prob<E: EventElement>(&self, event: &ArrayD<E>) -> DistResult<ArrayD<T>> {
        let event = event.mapv(|e| T::from_f64(e.to_f64()));
        let shape = broadcast_shapes(self.logits.shape(), event.shape()).map_err(|_| {
            DistributionError::ShapeMismatch(
                ShapeMismatchError::new(
                    "log_prob",
                    vec![self.batch_shape()],
                    vec![event.shape().to_vec()],
                )
                .with_context("event is not broadcastable against the batch shape"),
            )
        })?;

        if shape != self.logits.shape() || shape != event.shape() {
            log::trace!(
                "{}: log_prob broadcasts batch {:?} and event {:?} to {:?}",
                self.config.name,
                self.logits.shape(),
                event.shape(),
                shape
            );
        }

        let dim = IxDyn(&shape);
        let logits = self.logits.broadcast(dim.clone()).ok_or_else(|| {
            DistributionError::shape_mismatch(
                "log_prob",
                vec![shape.clone()],
                vec![self.batch_shape()],
            )
        })?;
        let targets = event.broadcast(dim).ok_or_else(|| {
            DistributionError::shape_mismatch(
                "log_prob",
                vec![shape.clone()],
                vec![event.shape().to_vec()],
            )
        })?;

        Ok(sigmoid_cross_entropy_tensor(logits, targets).mapv(|v| -v))
    }

    fn sample(&self, n: usize, seed: Option<u64>) -> DistResult<SampleTensor> {
        let mut rng = if let Some(seed) = seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_rng(&mut thread_rng())
        };
        self.sample_with_rng(n, &mut rng)
    }

    /// Binary entropy in nats, computed from the logits; 0 where `p` is exactly 0 or 1.
    fn entropy(&self) -> DistResult<ArrayD<T>> {
        Ok(self.logits.mapv(binary_entropy_from_logits))
    }

    fn mean(&self) -> DistResult<ArrayD<T>> {
        Ok(self.probs.clone())
    }

    /// 1 where `p > 1 - p`, else 0. A tie at `p = 0.5` yields 0.
    fn mode(&self) -> DistResult<SampleTensor> {
        let outcomes = Zip::from(&self.probs)
            .and(&self.complement)
            .map_collect(|&p, &q| p > q);
        Ok(SampleTensor::from_outcomes(outcomes, self.config.sample_dtype))
    }

    fn variance(&self) -> DistResult<ArrayD<T>> {
        Ok(Zip::from(&self.probs)
            .and(&self.complement)
            .map_collect(|&p, &q| p * q))
    }
}

impl<T: Scalar> fmt::Display for Bernoulli<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(batch_shape={}, dtype={}, precision={})",
            self.config.name,
            self.static_batch_shape(),
            self.config.sample_dtype,
            T::precision()
        )
    }
}

fn validate_probs<T: Scalar>(probs: &ArrayD<T>) -> DistResult<()> {
    for (index, &p) in probs.iter().enumerate() {
        // NaN fails both comparisons
        let in_range = p >= T::zero() && p <= T::one();
        if !in_range {
            return Err(ConstructionError::ProbabilityOutOfRange {
                index,
                value: p.to_f64(),
            }
            .into());
        }
    }
    Ok(())
}

fn array_from_vec<T>(data: Vec<T>, shape: &[usize], operation: &str) -> DistResult<ArrayD<T>> {
    let len = data.len();
    ArrayD::from_shape_vec(IxDyn(shape), data).map_err(|e| {
        DistributionError::ShapeMismatch(
            ShapeMismatchError::new(operation, vec![shape.to_vec()], vec![vec![len]])
                .with_context(e.to_string()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use scirs2_core::ndarray::array;

    #[test]
    fn test_both_parameters_rejected() {
        let result = Bernoulli::new(
            Some(array![0.5].into_dyn()),
            Some(array![0.0].into_dyn()),
            BernoulliConfig::default(),
        );
        assert!(matches!(
            result,
            Err(DistributionError::Construction(
                ConstructionError::BothParameters
            ))
        ));
    }

    #[test]
    fn test_missing_parameter_rejected() {
        let result = Bernoulli::<f64>::new(None, None, BernoulliConfig::default());
        assert!(matches!(
            result,
            Err(DistributionError::Construction(
                ConstructionError::MissingParameter
            ))
        ));
    }

    #[test]
    fn test_new_dispatches_to_parameterization() {
        let from_logits =
            Bernoulli::new(None, Some(array![0.0].into_dyn()), BernoulliConfig::default())
                .unwrap();
        assert_eq!(from_logits.probs(), &array![0.5].into_dyn());

        let from_probs =
            Bernoulli::new(Some(array![0.5].into_dyn()), None, BernoulliConfig::default())
                .unwrap();
        assert_eq!(from_probs.logits(), &array![0.0].into_dyn());
    }

    #[test]
    fn test_strict_reports_first_offending_index() {
        let result = Bernoulli::from_probs(
            array![0.2, 0.9, -0.1, 1.5].into_dyn(),
            BernoulliConfig::default(),
        );
        match result {
            Err(DistributionError::Construction(ConstructionError::ProbabilityOutOfRange {
                index,
                value,
            })) => {
                assert_eq!(index, 2);
                assert_eq!(value, -0.1);
            }
            other => panic!("expected out-of-range error, got {:?}", other),
        }
    }

    #[test]
    fn test_strict_rejects_nan() {
        let result = Bernoulli::from_probs(array![f64::NAN].into_dyn(), BernoulliConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_complement_is_stored() {
        let dist = Bernoulli::from_probs(array![0.25, 0.75].into_dyn(), BernoulliConfig::default())
            .unwrap();
        assert_eq!(dist.complement(), &array![0.75, 0.25].into_dyn());
    }

    #[test]
    fn test_from_vec_constructors() {
        let dist = Bernoulli::from_probs_vec(
            vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6],
            &[2, 3],
            BernoulliConfig::default(),
        )
        .unwrap();
        assert_eq!(dist.batch_shape(), vec![2, 3]);

        let result = Bernoulli::from_logits_vec(vec![0.0; 5], &[2, 3], BernoulliConfig::default());
        assert!(matches!(result, Err(DistributionError::ShapeMismatch(_))));
    }

    #[test]
    fn test_static_sample_shape() {
        let dist =
            Bernoulli::from_logits(ArrayD::<f64>::zeros(vec![2, 3]), BernoulliConfig::default())
                .unwrap();
        assert_eq!(
            dist.static_sample_shape(Some(5)).as_static(),
            Some(vec![5, 2, 3])
        );
        let unknown = dist.static_sample_shape(None);
        assert_eq!(unknown.rank(), 3);
        assert!(!unknown.is_static());
    }

    #[test]
    fn test_log_prob_broadcasts_event_over_batch() {
        let dist = Bernoulli::from_probs(
            array![[0.2, 0.7], [0.5, 0.9]].into_dyn(),
            BernoulliConfig::default(),
        )
        .unwrap();
        let log_p = dist.log_prob(&array![1, 0].into_dyn()).unwrap();
        assert_eq!(log_p.shape(), &[2, 2]);
        assert_abs_diff_eq!(log_p[[0, 0]], 0.2_f64.ln(), epsilon = 1e-12);
        assert_abs_diff_eq!(log_p[[0, 1]], 0.3_f64.ln(), epsilon = 1e-12);
        assert_abs_diff_eq!(log_p[[1, 0]], 0.5_f64.ln(), epsilon = 1e-12);
        assert_abs_diff_eq!(log_p[[1, 1]], 0.1_f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_log_prob_broadcasts_batch_over_event() {
        let dist =
            Bernoulli::from_probs(array![0.3].into_dyn(), BernoulliConfig::default()).unwrap();
        let events = array![[1_i64], [0], [1]].into_dyn();
        let log_p = dist.log_prob(&events).unwrap();
        assert_eq!(log_p.shape(), &[3, 1]);
        assert_abs_diff_eq!(log_p[[1, 0]], 0.7_f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_log_prob_shape_mismatch() {
        let dist =
            Bernoulli::from_probs(array![0.1, 0.2, 0.3].into_dyn(), BernoulliConfig::default())
                .unwrap();
        let result = dist.log_prob(&array![1, 0].into_dyn());
        assert!(matches!(result, Err(DistributionError::ShapeMismatch(_))));
    }

    #[test]
    fn test_sample_size_overflow_is_rejected() {
        let dist = Bernoulli::from_probs(array![0.5, 0.5].into_dyn(), BernoulliConfig::default())
            .unwrap();
        let result = dist.sample(usize::MAX / 2 + 1, Some(1));
        assert!(matches!(result, Err(DistributionError::InvalidArgument(_))));

        let result = dist.sample(usize::MAX / 4 + 1, Some(1));
        assert!(matches!(result, Err(DistributionError::InvalidArgument(_))));
    }

    #[test]
    fn test_sample_from_empty_batch() {
        let dist =
            Bernoulli::from_probs(ArrayD::<f64>::zeros(vec![0]), BernoulliConfig::default())
                .unwrap();
        let samples = dist.sample(1000, Some(1)).unwrap();
        assert_eq!(samples.shape(), &[1000, 0]);
        assert!(samples.is_empty());
    }

    #[test]
    fn test_nan_probability_samples_zero() {
        let dist = Bernoulli::from_probs(
            array![f64::NAN, 1.0].into_dyn(),
            BernoulliConfig::permissive(),
        )
        .unwrap();
        let samples = dist.sample(50, Some(17)).unwrap();
        let draws = samples.as_i32().unwrap();
        for (i, &draw) in draws.iter().enumerate() {
            assert_eq!(draw, if i % 2 == 0 { 0 } else { 1 });
        }
    }

    #[test]
    fn test_sample_dtype_follows_config() {
        let dist = Bernoulli::from_probs(
            array![0.5, 0.5].into_dyn(),
            BernoulliConfig::default().with_sample_dtype(SampleDtype::Float64),
        )
        .unwrap();
        let samples = dist.sample(3, Some(7)).unwrap();
        assert_eq!(samples.dtype(), SampleDtype::Float64);
        assert!(samples
            .as_f64()
            .unwrap()
            .iter()
            .all(|&v| v == 0.0 || v == 1.0));
    }

    #[test]
    fn test_log_prob_samples_scores_each_draw() {
        let dist = Bernoulli::from_probs(array![0.25, 0.75].into_dyn(), BernoulliConfig::default())
            .unwrap();
        let samples = dist.sample(10, Some(3)).unwrap();
        let log_p = dist.log_prob_samples(&samples).unwrap();
        assert_eq!(log_p.shape(), &[10, 2]);

        let draws = samples.as_i32().unwrap();
        let probs = dist.prob_samples(&samples).unwrap();
        let scored = draws.iter().zip(log_p.iter()).zip(probs.iter());
        for (i, ((&draw, &lp), &mass)) in scored.enumerate() {
            let p = dist.probs()[[i % 2]];
            let expected = if draw == 1 { p } else { 1.0 - p };
            assert_abs_diff_eq!(lp, expected.ln(), epsilon = 1e-12);
            assert_abs_diff_eq!(mass, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_display() {
        let dist = Bernoulli::from_logits(
            ArrayD::<f32>::zeros(vec![4]),
            BernoulliConfig::default().with_name("coin"),
        )
        .unwrap();
        assert_eq!(
            dist.to_string(),
            "coin(batch_shape=[4], dtype=int32, precision=FP32)"
        );
        assert_eq!(dist.precision(), Precision::F32);
    }
}
