// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Beta-Prime Distribution Module** - *Beta Distribution of the Second Kind*
//!
//! If `Y ~ Beta(α, β)` then `X = Y / (1 − Y)` is beta-prime. Heavy right tail:
//! the k-th moment exists only for β > k.
//!
//! ## Mathematical Definition
//! - **PDF**: f(x) = x^(α−1) (1 + x)^(−α−β) / B(α, β)
//! - **CDF**: F(x) = I_{x/(1+x)}(α, β)
//! - **Quantile**: y / (1 − y) with y = I⁻¹(α, β, p)
//! - **Support**: x ∈ [0, ∞)
//! - **Parameters**: α > 0, β > 0

use minarrow::{Bitmask, FloatArray};
use rand::Rng;

use crate::errors::KernelError;
use crate::kernels::scientific::distributions::shared::scalar::{
    incomplete_beta, incomplete_beta_inv, ln_beta,
};
use crate::kernels::scientific::distributions::univariate::common::std::univariate_kernel_f64_std;
use crate::traits::distribution::UnivariateDistribution;

/// Beta-prime distribution BetaPrime(α, β).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BetaPrime {
    alpha: f64,
    beta: f64,
    ln_beta_ab: f64,
}

impl BetaPrime {
    /// ## Errors
    /// `InvalidArguments` for a non-finite or non-positive shape.
    pub fn new(alpha: f64, beta: f64) -> Result<Self, KernelError> {
        if !(alpha.is_finite() && beta.is_finite() && alpha > 0.0 && beta > 0.0) {
            return Err(KernelError::InvalidArguments(format!(
                "beta_prime: invalid shape (alpha={}, beta={})",
                alpha, beta
            )));
        }
        Ok(Self {
            alpha,
            beta,
            ln_beta_ab: ln_beta(alpha, beta),
        })
    }

    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    #[inline]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Inverse CDF. `NaN` for `p` outside `[0, 1]`; `+inf` at `p = 1`.
    pub fn quantile(&self, p: f64) -> f64 {
        if !(0.0..=1.0).contains(&p) {
            return f64::NAN;
        }
        let y = incomplete_beta_inv(self.alpha, self.beta, p);
        if y >= 1.0 {
            return f64::INFINITY;
        }
        y / (1.0 - y)
    }

    /// (α − 1)/(β + 1) for α ≥ 1, else 0 (the density is unbounded at the origin).
    pub fn mode(&self) -> f64 {
        if self.alpha < 1.0 {
            return 0.0;
        }
        (self.alpha - 1.0) / (self.beta + 1.0)
    }
}

impl UnivariateDistribution for BetaPrime {
    #[inline]
    fn prob(&self, x: f64) -> f64 {
        self.log_prob(x).exp()
    }

    fn log_prob(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        if x < 0.0 || x.is_infinite() {
            return f64::NEG_INFINITY;
        }
        if x == 0.0 {
            return match self.alpha {
                a if a < 1.0 => f64::INFINITY,
                a if a == 1.0 => -self.ln_beta_ab,
                _ => f64::NEG_INFINITY,
            };
        }
        (self.alpha - 1.0) * x.ln() - (self.alpha + self.beta) * x.ln_1p() - self.ln_beta_ab
    }

    fn cdf(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        if x <= 0.0 {
            return 0.0;
        }
        if x.is_infinite() {
            return 1.0;
        }
        incomplete_beta(self.alpha, self.beta, x / (1.0 + x))
    }

    fn mean(&self) -> f64 {
        if self.beta <= 1.0 {
            return f64::NAN;
        }
        self.alpha / (self.beta - 1.0)
    }

    fn variance(&self) -> f64 {
        let (a, b) = (self.alpha, self.beta);
        if b <= 2.0 {
            return f64::NAN;
        }
        a * (a + b - 1.0) / ((b - 2.0) * (b - 1.0) * (b - 1.0))
    }

    fn skewness(&self) -> f64 {
        let (a, b) = (self.alpha, self.beta);
        if b <= 3.0 {
            return f64::NAN;
        }
        2.0 * (2.0 * a + b - 1.0) / (b - 3.0) * ((b - 2.0) / (a * (a + b - 1.0))).sqrt()
    }

    fn ex_kurtosis(&self) -> f64 {
        let (a, b) = (self.alpha, self.beta);
        if b <= 4.0 {
            return f64::NAN;
        }
        6.0 * (a * (a + b - 1.0) * (5.0 * b - 11.0) + (b - 1.0) * (b - 1.0) * (b - 2.0))
            / (a * (a + b - 1.0) * (b - 3.0) * (b - 4.0))
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.quantile(rng.random::<f64>())
    }

    #[inline]
    fn num_parameters(&self) -> usize {
        2
    }
}

/// Computes the probability density function of the beta-prime distribution.
///
/// ## Parameters
/// - `x`: Points to evaluate; negative points yield `0.0`
/// - `alpha`, `beta`: Shape parameters, both finite and > 0
/// - `null_mask`: Optional validity mask (Arrow-style: 1=valid, 0=null)
/// - `null_count`: Optional count of null values for optimisation
///
/// ## Errors
/// `InvalidArguments` for invalid shapes or a mask shorter than `x`.
#[inline(always)]
pub fn beta_prime_pdf(
    x: &[f64],
    alpha: f64,
    beta: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    let dist = BetaPrime::new(alpha, beta)?;
    univariate_kernel_f64_std(x, null_mask, null_count, |xi| dist.prob(xi))
}

/// Computes the cumulative distribution function of the beta-prime distribution.
#[inline(always)]
pub fn beta_prime_cdf(
    x: &[f64],
    alpha: f64,
    beta: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    let dist = BetaPrime::new(alpha, beta)?;
    univariate_kernel_f64_std(x, null_mask, null_count, |xi| dist.cdf(xi))
}

/// Computes the quantile (inverse CDF) of the beta-prime distribution.
///
/// Probabilities outside `[0, 1]` yield `NaN`.
#[inline(always)]
pub fn beta_prime_quantile(
    p: &[f64],
    alpha: f64,
    beta: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    let dist = BetaPrime::new(alpha, beta)?;
    univariate_kernel_f64_std(p, null_mask, null_count, |pi| dist.quantile(pi))
}
