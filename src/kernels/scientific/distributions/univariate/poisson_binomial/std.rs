// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Poisson-Binomial Scalar Implementation**
//!
//! FFT multi-convolution of the per-trial polynomials `[1-p, p]`, plus the scalar
//! bodies of the bulk PMF / CDF kernels.

use minarrow::{Bitmask, FloatArray, Vec64};
use num_complex::Complex64;

use crate::config::POISSON_BINOMIAL_BLOCK;
use crate::errors::KernelError;
use crate::kernels::scientific::distributions::univariate::common::std::univariate_kernel_f64_std;
use crate::kernels::scientific::fft::multi_convolve;
use crate::utils::next_pow2;

/// Exact PMF of the number of successes among independent Bernoulli(pᵢ) trials.
///
/// Each trial occupies one block `[1-pᵢ, pᵢ, 0, 0]`; the array count is padded to the
/// next power of two of `n + 1` with identity blocks `[1, 0, 0, 0]`, the blocks are
/// multi-convolved, and the real parts of the first `n + 1` coefficients are returned.
///
/// Entries may carry rounding residue of order 1e-16, including tiny negatives.
///
/// Parameters are not validated here; see [`super::PoissonBinomial::new`].
///
/// ## Errors
/// `OutOfBounds` when the padded working size is not representable.
pub fn poisson_binomial_pmf_fft(p: &[f64]) -> Result<Vec64<f64>, KernelError> {
    let m = POISSON_BINOMIAL_BLOCK;
    let support = p.len() + 1;
    let count = next_pow2("poisson_binomial_pmf_fft", support)?;
    let len = count.checked_mul(m).ok_or_else(|| {
        KernelError::OutOfBounds(format!(
            "poisson_binomial_pmf_fft: {} blocks of {} overflow usize",
            count, m
        ))
    })?;

    let mut data = vec![Complex64::new(0.0, 0.0); len];
    for (block, &pi) in data.chunks_exact_mut(m).zip(p) {
        block[0] = Complex64::new(1.0 - pi, 0.0);
        block[1] = Complex64::new(pi, 0.0);
    }
    // identity padding
    for block in data.chunks_exact_mut(m).skip(p.len()) {
        block[0] = Complex64::new(1.0, 0.0);
    }

    multi_convolve(&mut data, m)?;

    let mut pmf = Vec64::with_capacity(support);
    for z in &data[..support] {
        pmf.push(z.re);
    }
    Ok(pmf)
}

/// Prefix sums of `pmf`.
#[inline]
pub fn cumulative(pmf: &[f64]) -> Vec64<f64> {
    let mut cdf = Vec64::with_capacity(pmf.len());
    let mut acc = 0.0;
    for &v in pmf {
        acc += v;
        cdf.push(acc);
    }
    cdf
}

/// Mass at `x` from a PMF table over `0..=n`: zero off the integers and outside the support.
#[inline(always)]
pub fn pmf_lookup(pmf: &[f64], x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    let n = (pmf.len() - 1) as f64;
    if !(x >= 0.0 && x <= n) || x.floor() != x {
        return 0.0;
    }
    pmf[x as usize]
}

/// CDF at `x` from a prefix-sum table: `0` below zero, `cdf[floor(x)]` inside, exactly `1` from `n` on.
#[inline(always)]
pub fn cdf_lookup(cdf: &[f64], x: f64) -> f64 {
    let n = (cdf.len() - 1) as f64;
    if x.is_nan() {
        return f64::NAN;
    }
    if x < 0.0 {
        return 0.0;
    }
    if x < n {
        return cdf[x.floor() as usize];
    }
    1.0
}

/// Bulk PMF over `k` for a fixed parameter set.
#[inline(always)]
pub fn poisson_binomial_pmf_std(
    k: &[f64],
    pmf: &[f64],
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    univariate_kernel_f64_std(k, null_mask, null_count, |ki| pmf_lookup(pmf, ki))
}

/// Bulk CDF over `k` for a fixed parameter set.
#[inline(always)]
pub fn poisson_binomial_cdf_std(
    k: &[f64],
    cdf: &[f64],
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    univariate_kernel_f64_std(k, null_mask, null_count, |ki| cdf_lookup(cdf, ki))
}
