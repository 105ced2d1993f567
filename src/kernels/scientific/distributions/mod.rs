// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Statistical Distributions Module** - *Discrete Sums, Closed Forms and Dirichlet Winners*
//!
//! Probability distribution kernels with a scalar distribution surface
//! ([`UnivariateDistribution`](crate::traits::distribution::UnivariateDistribution)) and
//! null-aware bulk kernels over Arrow-style arrays.
//!
//! ## Distribution Categories
//! - **Poisson-binomial**: exact PMF by FFT multi-convolution of per-trial polynomials
//! - **Beta-binomial** and **beta-prime**: closed forms over the special functions in `shared`
//! - **Dirichlet winner**: per-category probability of holding the maximum, by adaptive quadrature
//!
//! ## Arrow Integration and Null Handling
//! Bulk kernels take `(values, params…, null_mask, null_count)` and return `FloatArray<f64>`.
//! Null lanes come back as `NaN` with the validity bit cleared.
//!
//! ### Null Value Philosophy
//! Rather than assume, we choose to recognise inf and NaN as valid float values
//! (consistent with Apache Arrow semantics), leaving it to the user to subsequently
//! treat them as nulls if they wish, given that there are numerical scenarios where
//! they represent information gain.
//!
//! ## Numerical Precision
//! See `./tests` for the tolerance each function is held to against reference values.
//! Platform specific differences may impact results in the last few digits.
//!
//! ## Disclaimer
//! This implementation is provided on a best-effort basis and is intended for
//! general scientific and engineering use. We make no guarantees as to correctness,
//! fitness for any particular purpose, or suitability for uses such as in life-critical,
//! safety-critical, or financial applications.

/// # **Shared Distribution Utilities** - *Special Functions and Samplers*
///
/// ## Modules
/// - **`constants`**: Mathematical constants
/// - **`sampler`**: Random number generation and sampling utilities
/// - **`scalar`**: Special functions (log-gamma, incomplete beta and gamma)
pub mod shared {
    pub mod constants;
    pub mod sampler;
    pub mod scalar;
}

/// # **Univariate Distributions** - *Single-Variable Probability Distributions*
///
/// - **Discrete**: beta_binomial, poisson_binomial
/// - **Continuous**: beta_prime
/// - **Common utilities**: dense / masked kernel loops
pub mod univariate {
    // common kernel patterns
    pub mod common;

    // distributions
    pub mod beta_binomial;
    pub mod beta_prime;
    pub mod poisson_binomial;
}

pub mod multivariate;
