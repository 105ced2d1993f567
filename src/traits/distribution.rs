// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **UnivariateDistribution Trait** - *Scalar Distribution Surface*
//!
//! Point-wise evaluation, moments and sampling for a constructed, immutable
//! distribution value. Bulk evaluation over arrays lives in the per-distribution
//! kernel functions.
//!
//! Evaluation outside the support never errors: it returns the boundary value
//! (`0` mass, `-inf` log mass, `0`/`1` CDF). Moments that do not exist return `NaN`.

use rand::Rng;

/// Scalar distribution surface shared by every univariate distribution in the crate.
pub trait UnivariateDistribution {
    /// Probability mass (discrete) or density (continuous) at `x`.
    fn prob(&self, x: f64) -> f64;

    /// Natural log of [`prob`](Self::prob).
    fn log_prob(&self, x: f64) -> f64;

    /// P(X ≤ x).
    fn cdf(&self, x: f64) -> f64;

    /// P(X > x).
    #[inline]
    fn survival(&self, x: f64) -> f64 {
        1.0 - self.cdf(x)
    }

    fn mean(&self) -> f64;

    fn variance(&self) -> f64;

    #[inline]
    fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    fn skewness(&self) -> f64;

    /// Excess kurtosis (kurtosis − 3).
    fn ex_kurtosis(&self) -> f64;

    /// Draws one value using the caller's random source.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64;

    /// Number of scalar parameters defining the distribution.
    fn num_parameters(&self) -> usize;
}
