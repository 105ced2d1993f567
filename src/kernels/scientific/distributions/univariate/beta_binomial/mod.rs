// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Beta-Binomial Distribution Module** - *Binomial Counts with Beta-Distributed Success Rate*
//!
//! Successes out of `n` Bernoulli trials whose common success probability is itself drawn
//! from Beta(α, β). Over-dispersed relative to the binomial with the same mean.
//!
//! ## Mathematical Definition
//! - **PMF**: P(X = k) = C(n, k) · B(k + α, n − k + β) / B(α, β)
//! - **CDF**: Σᵢ₌₀ᵏ P(X = i)
//! - **Support**: k ∈ {0, 1, …, n}
//! - **Parameters**: n ≥ 1 trials, α > 0, β > 0
//!
//! The PMF is evaluated in log space through `ln_gamma` for stability at large `n`.

use minarrow::{Bitmask, FloatArray, Vec64};
use rand::Rng;

use crate::errors::KernelError;
use crate::kernels::scientific::distributions::shared::scalar::{ln_beta, ln_choose_real};
use crate::kernels::scientific::distributions::univariate::common::std::univariate_kernel_f64_std;
use crate::traits::distribution::UnivariateDistribution;

/// Beta-binomial distribution BetaBinomial(n, α, β).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BetaBinomial {
    n: u64,
    alpha: f64,
    beta: f64,
    ln_beta_ab: f64,
}

impl BetaBinomial {
    /// ## Errors
    /// `InvalidArguments` for `n == 0` or a non-finite or non-positive shape.
    pub fn new(n: u64, alpha: f64, beta: f64) -> Result<Self, KernelError> {
        if n == 0 {
            return Err(KernelError::InvalidArguments(
                "beta_binomial: n must be ≥ 1".into(),
            ));
        }
        if !(alpha.is_finite() && beta.is_finite() && alpha > 0.0 && beta > 0.0) {
            return Err(KernelError::InvalidArguments(format!(
                "beta_binomial: invalid shape (alpha={}, beta={})",
                alpha, beta
            )));
        }
        Ok(Self {
            n,
            alpha,
            beta,
            ln_beta_ab: ln_beta(alpha, beta),
        })
    }

    #[inline]
    pub fn n(&self) -> u64 {
        self.n
    }

    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    #[inline]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    #[inline(always)]
    fn ln_pmf_at(&self, k: f64) -> f64 {
        let n = self.n as f64;
        ln_choose_real(n, k) + ln_beta(k + self.alpha, n - k + self.beta) - self.ln_beta_ab
    }

    /// `table[k]` = P(X ≤ k) for `k` in `0..=upto`, `upto` clamped to `n`.
    fn cdf_table(&self, upto: u64) -> Vec64<f64> {
        let upto = upto.min(self.n);
        let mut table = Vec64::with_capacity(upto as usize + 1);
        let mut acc = 0.0;
        for k in 0..=upto {
            acc += self.ln_pmf_at(k as f64).exp();
            table.push(acc.min(1.0));
        }
        table
    }
}

impl UnivariateDistribution for BetaBinomial {
    #[inline]
    fn prob(&self, x: f64) -> f64 {
        self.log_prob(x).exp()
    }

    fn log_prob(&self, x: f64) -> f64 {
        if !(x >= 0.0 && x <= self.n as f64) || x.floor() != x {
            return f64::NEG_INFINITY;
        }
        self.ln_pmf_at(x)
    }

    fn cdf(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        if x < 0.0 {
            return 0.0;
        }
        if x >= self.n as f64 {
            return 1.0;
        }
        let table = self.cdf_table(x.floor() as u64);
        table[table.len() - 1]
    }

    fn mean(&self) -> f64 {
        self.n as f64 * self.alpha / (self.alpha + self.beta)
    }

    fn variance(&self) -> f64 {
        let n = self.n as f64;
        let v = self.alpha + self.beta;
        n * self.alpha * self.beta * (v + n) / (v * v * (v + 1.0))
    }

    fn skewness(&self) -> f64 {
        let n = self.n as f64;
        let (a, b) = (self.alpha, self.beta);
        let v = a + b;
        (v + 2.0 * n) * (b - a) / (v + 2.0) * ((v + 1.0) / (n * a * b * (v + n))).sqrt()
    }

    fn ex_kurtosis(&self) -> f64 {
        let n = self.n as f64;
        let v = self.alpha + self.beta;
        let ab = self.alpha * self.beta;
        let front = v * v * (v + 1.0) / (n * ab * (v + 2.0) * (v + 3.0) * (v + n));
        let body = v * (v - 1.0 + 6.0 * n) + 3.0 * ab * (n - 2.0) + 6.0 * n * n
            - 3.0 * ab * n * (6.0 - n) / v
            - 18.0 * ab * n * n / (v * v);
        front * body - 3.0
    }

    /// Inverse-CDF walk over the support.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let mut r = rng.random::<f64>();
        for k in 0..=self.n {
            r -= self.ln_pmf_at(k as f64).exp();
            if r < 0.0 {
                return k as f64;
            }
        }
        // Leftover rounding mass belongs to the upper tail.
        self.n as f64
    }

    #[inline]
    fn num_parameters(&self) -> usize {
        3
    }
}

/// Computes the probability mass function of the beta-binomial distribution.
///
/// ## Parameters
/// - `k`: Points to evaluate; non-integral or out-of-range points yield `0.0`
/// - `n`, `alpha`, `beta`: Distribution parameters
/// - `null_mask`: Optional validity mask (Arrow-style: 1=valid, 0=null)
/// - `null_count`: Optional count of null values for optimisation
///
/// ## Errors
/// `InvalidArguments` for invalid parameters or a mask shorter than `k`.
#[inline(always)]
pub fn beta_binomial_pmf(
    k: &[f64],
    n: u64,
    alpha: f64,
    beta: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    let dist = BetaBinomial::new(n, alpha, beta)?;
    univariate_kernel_f64_std(k, null_mask, null_count, |ki| dist.prob(ki))
}

/// Computes the cumulative distribution function of the beta-binomial distribution.
///
/// One prefix table up to the largest in-range `k` serves the whole batch.
///
/// ## Errors
/// As [`beta_binomial_pmf`].
#[inline(always)]
pub fn beta_binomial_cdf(
    k: &[f64],
    n: u64,
    alpha: f64,
    beta: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    let dist = BetaBinomial::new(n, alpha, beta)?;
    let upto = k
        .iter()
        .filter(|v| v.is_finite() && **v >= 0.0)
        .fold(0.0_f64, |m, &v| m.max(v.floor()))
        .min(n as f64) as u64;
    let table = dist.cdf_table(upto);
    univariate_kernel_f64_std(k, null_mask, null_count, |ki| {
        if ki.is_nan() {
            f64::NAN
        } else if ki < 0.0 {
            0.0
        } else if ki >= n as f64 {
            1.0
        } else {
            table[ki.floor() as usize]
        }
    })
}

#[cfg(test)]
mod beta_binomial_tests {
    use super::*;
    use crate::kernels::scientific::distributions::univariate::common::test_helpers::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    // mpmath, exact rational arithmetic over the PMF
    const REF_PMF_3: f64 = 0.14385614385614386;
    const REF_CDF_3: f64 = 0.45454545454545455;

    #[test]
    fn pmf_cdf_reference() {
        let d = BetaBinomial::new(10, 2.0, 3.0).unwrap();
        assert_close(d.prob(3.0), REF_PMF_3, 1e-13);
        assert_close(d.cdf(3.0), REF_CDF_3, 1e-13);
        assert_close(d.cdf(3.9), REF_CDF_3, 1e-13);
        let total: f64 = (0..=10).map(|k| d.prob(k as f64)).sum();
        assert_close(total, 1.0, 1e-12);
    }

    #[test]
    fn moments_reference() {
        let d = BetaBinomial::new(10, 2.0, 3.0).unwrap();
        assert_close(d.mean(), 4.0, 1e-14);
        assert_close(d.variance(), 6.0, 1e-13);
        assert_close(d.skewness(), 0.29160592175990218, 1e-13);
        assert_close(d.ex_kurtosis(), -0.69047619047619048, 1e-13);

        let d = BetaBinomial::new(25, 0.5, 4.5).unwrap();
        assert_close(d.skewness(), 1.8740379239998237, 1e-12);
        assert_close(d.ex_kurtosis(), 3.8317460317460317, 1e-12);
        assert_eq!(d.num_parameters(), 3);
    }

    #[test]
    fn outside_support() {
        let d = BetaBinomial::new(4, 1.0, 1.0).unwrap();
        assert_eq!(d.prob(-1.0), 0.0);
        assert_eq!(d.prob(5.0), 0.0);
        assert_eq!(d.prob(1.5), 0.0);
        assert_eq!(d.log_prob(1.5), f64::NEG_INFINITY);
        assert_eq!(d.cdf(-0.5), 0.0);
        assert_eq!(d.cdf(4.0), 1.0);
        // uniform over {0..4} when α = β = 1
        assert_close(d.prob(2.0), 0.2, 1e-13);
    }

    #[test]
    fn sample_mean_matches() {
        let d = BetaBinomial::new(12, 16.0, 20.0).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let n = 50_000;
        let mean = (0..n).map(|_| d.sample(&mut rng)).sum::<f64>() / n as f64;
        assert!((mean - d.mean()).abs() < 0.05, "{mean} vs {}", d.mean());
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(BetaBinomial::new(0, 1.0, 1.0).is_err());
        assert!(BetaBinomial::new(3, 0.0, 1.0).is_err());
        assert!(BetaBinomial::new(3, 1.0, f64::NAN).is_err());
        assert!(beta_binomial_pmf(&[1.0], 3, -1.0, 1.0, None, None).is_err());
    }

    #[test]
    fn bulk_matches_scalar() {
        let d = BetaBinomial::new(10, 2.0, 3.0).unwrap();
        let k = [0.0, 3.0, 7.5, 10.0, 11.0, -2.0];
        let pmf = dense_data(beta_binomial_pmf(&k, 10, 2.0, 3.0, None, None).unwrap());
        let cdf = dense_data(beta_binomial_cdf(&k, 10, 2.0, 3.0, None, None).unwrap());
        for (i, &ki) in k.iter().enumerate() {
            assert_close(pmf[i], d.prob(ki), 1e-15);
            assert_close(cdf[i], d.cdf(ki), 1e-14);
        }
    }

    #[test]
    fn bulk_mask_propagation() {
        let mask = single_null_mask(3, 0);
        let arr = beta_binomial_cdf(&[1.0, 2.0, 3.0], 10, 2.0, 3.0, Some(&mask), Some(1)).unwrap();
        assert!(!arr.null_mask.as_ref().unwrap().get(0));
        assert!(arr.data[0].is_nan());
        assert_close(arr.data[2], REF_CDF_3, 1e-13);
    }
}
