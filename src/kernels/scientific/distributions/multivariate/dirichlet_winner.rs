// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Dirichlet Winner Probabilities** - *P(coordinate i is the maximum) for X ~ Dir(α)*
//!
//! Writing a Dirichlet vector as normalised independent gammas `Gᵢ ~ Γ(αᵢ, 1)`, category `i`
//! wins exactly when `Gᵢ` is the largest gamma:
//!
//! `P(i wins) = ∫₀^∞ fᵢ(x) ∏_{j≠i} Fⱼ(x) dx = ∫₀^∞ fᵢ(x)/Fᵢ(x) · ∏ⱼ Fⱼ(x) dx`
//!
//! with `fⱼ`, `Fⱼ` the gamma density and regularised lower incomplete gamma. The substitution
//! `x = ᾱ·y/(1 − y)` (ᾱ the mean alpha) maps the half line onto `[0, 1)` and centres the
//! mass; all `n` components are integrated in one adaptive Simpson pass.
//!
//! ## Cases
//! - `n = 1`: `[1]`
//! - `n = 2`: closed form `[1 − I_½(α₁, α₂), I_½(α₁, α₂)]`
//! - `n ≥ 3`: quadrature, re-run with an increasing minimum depth until
//!   `|Σ − 1| ≤ 2n·tolerance`, the depth ceiling is reached, or the next pass would overrun
//!   `QUADRATURE_MAX_EVALUATIONS`. A result that never meets the bound is still returned;
//!   [`dirichlet_winner_report`] exposes `converged`.
//!
//! When `Σα < 1` the integrand is unbounded at `y = 0` and the normalisation error only
//! shrinks like `h^(1 − Σα)`, so small tolerances typically end on the evaluation budget.

use minarrow::Vec64;
use rand::Rng;
use tracing::{debug, warn};

use crate::config::{QUADRATURE_MAX_DEPTH, QUADRATURE_MAX_EVALUATIONS, QUADRATURE_MIN_DEPTH};
use crate::errors::KernelError;
use crate::kernels::scientific::distributions::shared::sampler::sample_dirichlet_into;
use crate::kernels::scientific::distributions::shared::scalar::{
    incomplete_beta, ln_gamma, reg_lower_gamma,
};
use crate::kernels::scientific::quadrature::{
    AdaptiveSimpson, QuadratureOptions, QuadratureStats, VectorIntegrand,
};

/// Winner probabilities together with how the quadrature got there.
#[derive(Debug, Clone)]
pub struct DirichletWinnerReport {
    /// `probabilities[i]` = P(category `i` holds the maximum), input order.
    pub probabilities: Vec64<f64>,
    /// Whether `|Σ − 1| ≤ 2n·tolerance` held for the returned vector.
    pub converged: bool,
    /// Minimum depth of the returned attempt; `0` on the closed-form paths.
    pub min_depth: usize,
    /// Quadrature passes run; `0` on the closed-form paths.
    pub attempts: usize,
    /// Counters of the returned pass.
    pub stats: QuadratureStats,
}

/// Integrand over `y ∈ [0, 1]`, one component per category.
struct WinnerIntegrand<'a> {
    alphas: &'a [f64],
    ln_gammas: Vec64<f64>,
    avg_alpha: f64,
}

impl<'a> WinnerIntegrand<'a> {
    fn new(alphas: &'a [f64]) -> Self {
        let mut ln_gammas = Vec64::with_capacity(alphas.len());
        let mut avg_alpha = 0.0;
        for &a in alphas {
            ln_gammas.push(ln_gamma(a));
            avg_alpha += a;
        }
        avg_alpha /= alphas.len() as f64;
        Self {
            alphas,
            ln_gammas,
            avg_alpha,
        }
    }
}

impl VectorIntegrand for WinnerIntegrand<'_> {
    #[inline]
    fn dim(&self) -> usize {
        self.alphas.len()
    }

    fn eval(&self, y: f64, out: &mut [f64]) {
        // removable singularities of the substitution
        if y <= 0.0 || y >= 1.0 {
            out.fill(0.0);
            return;
        }
        let x = self.avg_alpha * y / (1.0 - y);
        let ln_x = x.ln();
        let mut cdfs = 1.0;
        for ((o, &a), &lg) in out.iter_mut().zip(self.alphas).zip(self.ln_gammas.iter()) {
            let pdf = (ln_x * (a - 1.0) - x - lg).exp();
            let cdf = reg_lower_gamma(a, x);
            if cdf == 0.0 {
                *o = 0.0;
                cdfs = 0.0;
                continue;
            }
            *o = pdf / cdf;
            cdfs *= cdf;
        }
        let scale = self.avg_alpha * cdfs / ((1.0 - y) * (1.0 - y));
        out.iter_mut().for_each(|o| *o *= scale);
    }
}

fn validate_alphas(label: &str, alphas: &[f64]) -> Result<(), KernelError> {
    if alphas.is_empty() {
        return Err(KernelError::InvalidArguments(format!(
            "{}: alphas must be non-empty",
            label
        )));
    }
    if let Some((i, &a)) = alphas
        .iter()
        .enumerate()
        .find(|&(_, &a)| !(a.is_finite() && a > 0.0))
    {
        return Err(KernelError::InvalidArguments(format!(
            "{}: alphas[{}] = {} must be finite and > 0",
            label, i, a
        )));
    }
    Ok(())
}

fn validate(alphas: &[f64], tolerance: f64) -> Result<(), KernelError> {
    validate_alphas("dirichlet_winner", alphas)?;
    if !(tolerance.is_finite() && tolerance > 0.0) {
        return Err(KernelError::InvalidArguments(format!(
            "dirichlet_winner: tolerance must be finite and > 0, got {}",
            tolerance
        )));
    }
    Ok(())
}

fn closed_form(probabilities: Vec64<f64>) -> DirichletWinnerReport {
    DirichletWinnerReport {
        probabilities,
        converged: true,
        min_depth: 0,
        attempts: 0,
        stats: QuadratureStats::default(),
    }
}

/// Winner probabilities plus convergence diagnostics.
///
/// ## Errors
/// `InvalidArguments` for empty `alphas`, any alpha non-finite or ≤ 0, or a tolerance
/// that is non-finite or ≤ 0.
pub fn dirichlet_winner_report(
    alphas: &[f64],
    tolerance: f64,
) -> Result<DirichletWinnerReport, KernelError> {
    validate(alphas, tolerance)?;
    let n = alphas.len();

    match n {
        1 => return Ok(closed_form(Vec64::from_slice(&[1.0]))),
        2 => {
            let (a1, a2) = (alphas[0], alphas[1]);
            let b = if a1 == a2 {
                0.5
            } else {
                incomplete_beta(a1, a2, 0.5)
            };
            return Ok(closed_form(Vec64::from_slice(&[1.0 - b, b])));
        }
        _ => {}
    }

    let integrand = WinnerIntegrand::new(alphas);
    let mut fs = Vec64::with_capacity(n);
    fs.resize(n, 0.0);
    let mut fe = fs.clone();
    let mut result = fs.clone();
    integrand.eval(0.0, &mut fs[..]);
    integrand.eval(1.0, &mut fe[..]);

    let mut quad = AdaptiveSimpson::new(
        n,
        QuadratureOptions {
            tolerance,
            min_depth: QUADRATURE_MIN_DEPTH,
            max_depth: QUADRATURE_MAX_DEPTH,
        },
    )?;
    let bound = 2.0 * n as f64 * tolerance;

    let mut attempts = 0;
    let mut spent = 0usize;
    let mut last_depth = QUADRATURE_MIN_DEPTH;
    let mut stats = QuadratureStats::default();
    let mut sum = f64::NAN;
    for min_depth in QUADRATURE_MIN_DEPTH..=QUADRATURE_MAX_DEPTH {
        // a pass visits every node above `min_depth`
        let floor_cost = 1usize
            .checked_shl(min_depth as u32)
            .unwrap_or(usize::MAX)
            .saturating_sub(1);
        if attempts > 0 && spent.saturating_add(floor_cost) > QUADRATURE_MAX_EVALUATIONS {
            break;
        }

        result.fill(0.0);
        quad.set_min_depth(min_depth);
        stats = quad.integrate(&integrand, &fs[..], &fe[..], 0.0, 1.0, &mut result[..])?;
        attempts += 1;
        spent = spent.saturating_add(stats.evaluations);
        last_depth = min_depth;

        sum = result.iter().sum();
        if (sum - 1.0).abs() <= bound {
            return Ok(DirichletWinnerReport {
                probabilities: result,
                converged: true,
                min_depth,
                attempts,
                stats,
            });
        }
        debug!(
            min_depth,
            sum,
            evaluations = stats.evaluations,
            "dirichlet_winner: normalisation not met, raising min_depth"
        );
    }

    warn!(
        n,
        tolerance,
        sum,
        min_depth = last_depth,
        evaluations = spent,
        ceiling_hits = stats.ceiling_hits,
        "dirichlet_winner: escalation exhausted without normalisation, returning best effort"
    );
    Ok(DirichletWinnerReport {
        probabilities: result,
        converged: false,
        min_depth: last_depth,
        attempts,
        stats,
    })
}

/// Probability that each coordinate of X ~ Dir(`alphas`) is the largest.
///
/// Same order as `alphas`; sums to 1 within `2n·tolerance` when the quadrature converges.
/// See [`dirichlet_winner_report`] to detect a best-effort result.
///
/// ## Example
/// ```rust,ignore
/// use stat_kernels::kernels::scientific::distributions::multivariate::dirichlet_winner::dirichlet_winner;
///
/// let p = dirichlet_winner(&[5.5, 10.5, 15.5], 1e-8).unwrap();
/// // ≈ [0.00673, 0.15691, 0.83636]
/// ```
#[inline]
pub fn dirichlet_winner(alphas: &[f64], tolerance: f64) -> Result<Vec64<f64>, KernelError> {
    dirichlet_winner_report(alphas, tolerance).map(|r| r.probabilities)
}

/// Monte Carlo estimate of the winner probabilities from `draws` Dirichlet samples.
///
/// Ties go to the lowest index.
///
/// ## Errors
/// `InvalidArguments` for invalid `alphas` or `draws == 0`.
pub fn dirichlet_winner_monte_carlo<R: Rng + ?Sized>(
    alphas: &[f64],
    draws: usize,
    rng: &mut R,
) -> Result<Vec64<f64>, KernelError> {
    validate_alphas("dirichlet_winner_monte_carlo", alphas)?;
    if draws == 0 {
        return Err(KernelError::InvalidArguments(
            "dirichlet_winner_monte_carlo: draws must be > 0".into(),
        ));
    }
    let n = alphas.len();
    let mut wins = vec![0usize; n];
    let mut x = vec![0.0; n];
    for _ in 0..draws {
        sample_dirichlet_into(rng, alphas, &mut x);
        let mut best = 0;
        for i in 1..n {
            if x[i] > x[best] {
                best = i;
            }
        }
        wins[best] += 1;
    }
    let mut out = Vec64::with_capacity(n);
    for w in wins {
        out.push(w as f64 / draws as f64);
    }
    Ok(out)
}
