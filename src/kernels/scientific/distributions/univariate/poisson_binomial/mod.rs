// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Poisson-Binomial Distribution Module** - *Sums of Heterogeneous Bernoulli Trials*
//!
//! The number of successes among `n` independent Bernoulli trials with individual
//! success probabilities `p₁ … pₙ`.
//!
//! ## Mathematical Definition
//! - **PMF**: coefficients of `∏ᵢ ((1 − pᵢ) + pᵢ·z)`
//! - **CDF**: prefix sums of the PMF
//! - **Support**: k ∈ {0, 1, …, n}
//! - **Mean**: Σpᵢ, **Variance**: Σpᵢ(1 − pᵢ)
//!
//! ## Computation
//! The PMF is computed once at construction by an FFT multi-convolution of the per-trial
//! polynomials in `O(n log² n)`, then cached together with its prefix sums. Moments are
//! closed-form sums over the parameters and do not read the PMF.
//!
//! ## Use Cases
//! - Number of wins across events with different win probabilities
//! - Reliability: count of working components with heterogeneous failure rates
//! - Ensemble voting with per-voter accuracy

mod std;

use minarrow::{Bitmask, FloatArray, Vec64};
use rand::Rng;

pub use self::std::poisson_binomial_pmf_fft;
use self::std::{
    cdf_lookup, cumulative, pmf_lookup, poisson_binomial_cdf_std, poisson_binomial_pmf_std,
};
use crate::errors::KernelError;
use crate::kernels::scientific::distributions::shared::sampler::sample_index_from_cdf;
use crate::traits::distribution::UnivariateDistribution;

/// Poisson-binomial distribution over a fixed set of trial probabilities.
///
/// Immutable once constructed; safe to share across threads for reads.
#[derive(Debug, Clone, PartialEq)]
pub struct PoissonBinomial {
    p: Vec64<f64>,
    pmf: Vec64<f64>,
    cdf: Vec64<f64>,
}

impl PoissonBinomial {
    /// Builds the distribution and caches its PMF and CDF.
    ///
    /// ## Errors
    /// `InvalidArguments` when `p` is empty or any entry lies outside `[0, 1]` (NaN included).
    pub fn new(p: &[f64]) -> Result<Self, KernelError> {
        if p.is_empty() {
            return Err(KernelError::InvalidArguments(
                "poisson_binomial: zero dimensional input".into(),
            ));
        }
        if let Some((i, &v)) = p.iter().enumerate().find(|&(_, &v)| !(0.0..=1.0).contains(&v)) {
            return Err(KernelError::InvalidArguments(format!(
                "poisson_binomial: p[{}] = {} outside [0, 1]",
                i, v
            )));
        }

        let pmf = poisson_binomial_pmf_fft(p)?;
        let cdf = cumulative(&pmf);
        Ok(Self {
            p: Vec64::from_slice(p),
            pmf,
            cdf,
        })
    }

    /// Number of trials.
    #[inline]
    pub fn trials(&self) -> usize {
        self.p.len()
    }

    #[inline]
    pub fn probabilities(&self) -> &[f64] {
        &self.p
    }

    /// `pmf()[k]` = P(X = k) for k in 0..=n.
    #[inline]
    pub fn pmf(&self) -> &[f64] {
        &self.pmf
    }

    /// `cdf_table()[k]` = P(X ≤ k) for k in 0..=n.
    #[inline]
    pub fn cdf_table(&self) -> &[f64] {
        &self.cdf
    }
}

impl UnivariateDistribution for PoissonBinomial {
    #[inline]
    fn prob(&self, x: f64) -> f64 {
        pmf_lookup(&self.pmf, x)
    }

    fn log_prob(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        let n = self.trials() as f64;
        if !(x >= 0.0 && x <= n) || x.floor() != x {
            return f64::NEG_INFINITY;
        }
        self.pmf[x as usize].max(0.0).ln()
    }

    #[inline]
    fn cdf(&self, x: f64) -> f64 {
        cdf_lookup(&self.cdf, x)
    }

    fn mean(&self) -> f64 {
        self.p.iter().sum()
    }

    fn variance(&self) -> f64 {
        self.p.iter().map(|&p| (1.0 - p) * p).sum()
    }

    fn skewness(&self) -> f64 {
        let s: f64 = self.p.iter().map(|&p| (1.0 - 2.0 * p) * (1.0 - p) * p).sum();
        s / self.std_dev().powi(3)
    }

    fn ex_kurtosis(&self) -> f64 {
        let s: f64 = self
            .p
            .iter()
            .map(|&p| (1.0 - 6.0 * (1.0 - p) * p) * (1.0 - p) * p)
            .sum();
        s / self.variance().powi(2)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        sample_index_from_cdf(rng, &self.cdf) as f64
    }

    #[inline]
    fn num_parameters(&self) -> usize {
        self.p.len()
    }
}

/// Computes the probability mass function of the Poisson-binomial distribution.
///
/// ## Parameters
/// - `k`: Points to evaluate; non-integral or out-of-range points yield `0.0`, `NaN` stays `NaN`
/// - `p`: Per-trial success probabilities, each in `[0, 1]`
/// - `null_mask`: Optional validity mask (Arrow-style: 1=valid, 0=null)
/// - `null_count`: Optional count of null values for optimisation
///
/// ## Errors
/// `InvalidArguments` for an empty or out-of-range `p`, or a mask shorter than `k`.
///
/// ## Example
/// ```rust,ignore
/// use stat_kernels::kernels::scientific::distributions::univariate::poisson_binomial::poisson_binomial_pmf;
///
/// let out = poisson_binomial_pmf(&[0.0, 1.0, 2.0], &[0.2, 0.3], None, None).unwrap();
/// // [0.56, 0.38, 0.06]
/// ```
#[inline(always)]
pub fn poisson_binomial_pmf(
    k: &[f64],
    p: &[f64],
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    let dist = PoissonBinomial::new(p)?;
    poisson_binomial_pmf_std(k, dist.pmf(), null_mask, null_count)
}

/// Computes the cumulative distribution function of the Poisson-binomial distribution.
///
/// `0` below zero, `P(X ≤ floor(k))` inside the support, `1` above `n`.
///
/// ## Errors
/// As [`poisson_binomial_pmf`].
#[inline(always)]
pub fn poisson_binomial_cdf(
    k: &[f64],
    p: &[f64],
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    let dist = PoissonBinomial::new(p)?;
    poisson_binomial_cdf_std(k, dist.cdf_table(), null_mask, null_count)
}
