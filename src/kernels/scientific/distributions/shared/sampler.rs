// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # Statistical Sampling Module - Pseudorandom Draws for the Distribution Kernels
//!
//! Generic samplers over any caller-supplied [`rand::Rng`]: standard normal (Box–Muller),
//! gamma (Marsaglia–Tsang), Dirichlet vectors (normalised gammas) and categorical draws
//! from a cumulative table.

use rand::Rng;
use std::f64::consts::PI;

// Box–Muller to get one N(0,1)
/// Generates a single sample from the standard normal distribution N(0,1).
#[inline]
pub fn sample_standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // U1 ∈ (0,1], U2 ∈ [0,1)
    let u1: f64 = rng.random::<f64>().max(f64::MIN_POSITIVE); // avoid log(0)
    let u2: f64 = rng.random::<f64>();
    let r = (-2.0 * u1.ln()).sqrt();
    r * (2.0 * PI * u2).cos()
}

/// Generates a single sample from Γ(shape, 1) using the Marsaglia–Tsang algorithm.
///
/// Preconditions (checked by callers): shape finite and > 0.
#[inline]
pub fn sample_gamma<R: Rng + ?Sized>(rng: &mut R, shape: f64) -> f64 {
    debug_assert!(shape.is_finite() && shape > 0.0);

    // 0 < shape < 1: boost to shape+1, then apply the power-law correction.
    if shape < 1.0 {
        let u: f64 = rng.random::<f64>();
        return sample_gamma(rng, shape + 1.0) * u.powf(1.0 / shape);
    }

    let d = shape - 1.0 / 3.0;
    let c = 1.0 / (9.0 * d).sqrt();

    loop {
        let x = sample_standard_normal(rng);
        let one_plus_cx = 1.0 + c * x;
        if one_plus_cx <= 0.0 {
            continue;
        }
        let v = one_plus_cx * one_plus_cx * one_plus_cx;
        let u: f64 = rng.random::<f64>();

        // Squeeze step
        if u < 1.0 - 0.0331 * (x * x) * (x * x) {
            return d * v;
        }
        // Log acceptance step
        if u.ln() < 0.5 * x * x + d * (1.0 - v + v.ln()) {
            return d * v;
        }
    }
}

/// Writes one Dirichlet(alpha) draw into `out` via normalised gamma samples.
///
/// Preconditions (checked by callers): `out.len() == alpha.len()`, every alpha finite and > 0.
#[inline]
pub fn sample_dirichlet_into<R: Rng + ?Sized>(rng: &mut R, alpha: &[f64], out: &mut [f64]) {
    debug_assert_eq!(alpha.len(), out.len());
    let mut sum = 0.0;
    for (o, &a) in out.iter_mut().zip(alpha) {
        *o = sample_gamma(rng, a);
        sum += *o;
    }
    // Every gamma draw underflowed; only reachable for vanishing shapes.
    if sum == 0.0 {
        let w = 1.0 / out.len() as f64;
        out.iter_mut().for_each(|o| *o = w);
        return;
    }
    out.iter_mut().for_each(|o| *o /= sum);
}

/// Categorical draw: the first index whose cumulative weight exceeds a uniform `u ∈ [0, total)`.
///
/// `cumulative` must be non-decreasing; its last entry is taken as the total mass, so
/// small normalisation drift in a precomputed CDF table is tolerated.
#[inline]
pub fn sample_index_from_cdf<R: Rng + ?Sized>(rng: &mut R, cumulative: &[f64]) -> usize {
    debug_assert!(!cumulative.is_empty());
    let total = cumulative[cumulative.len() - 1];
    let u = rng.random::<f64>() * total;
    let idx = cumulative.partition_point(|c| c.total_cmp(&u).is_le());
    idx.min(cumulative.len() - 1)
}
