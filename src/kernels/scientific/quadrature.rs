// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Adaptive Quadrature Module** - *Vector-Valued Adaptive Simpson Integration*
//!
//! Recursive adaptive Simpson's rule for integrands `f: [s, e] → ℝⁿ`, where all `n`
//! components share one evaluation per node. Intended for bounded reparametrisations of
//! improper integrals, e.g. `x = c·y/(1-y)` mapping `[0, ∞)` onto `[0, 1)`.
//!
//! ## Algorithm
//! At each node `[s, e]` with cached endpoint values `fs`, `fe`:
//! - evaluate the midpoint once, `fm = f((s+e)/2)`
//! - per component, trapezoid `Q = (fs+fe)(e-s)/2` and Simpson `Q2 = (fs+4fm+fe)(e-s)/6`
//! - bisect when `|Q - Q2| ≥ tolerance` for **any** component, or the node is shallower than
//!   `min_depth`; the midpoint becomes the shared, read-only endpoint of both children
//! - otherwise add `Q2` to the result for every component
//!
//! Nodes at `max_depth` are not subdivided: the trapezoid estimate is accepted and the
//! event is counted in [`QuadratureStats::ceiling_hits`]. This is degraded precision, not an error.
//!
//! ## Memory
//! Midpoint values live in a [`ScratchArena`] holding one slot per depth, allocated once.
//! Siblings run one after the other, so a slot is only ever live for one node at a time
//! and never aliases a value still needed by an ancestor.

use minarrow::Vec64;

use crate::config::{DEFAULT_QUADRATURE_TOLERANCE, QUADRATURE_MAX_DEPTH, QUADRATURE_MIN_DEPTH};
use crate::errors::{KernelError, log_length_mismatch};

/// Vector-valued integrand evaluated at a single abscissa.
pub trait VectorIntegrand {
    /// Number of output components.
    fn dim(&self) -> usize;

    /// Writes `f(y)` into `out` (`out.len() == self.dim()`).
    fn eval(&self, y: f64, out: &mut [f64]);
}

/// Tolerance and depth bounds for [`AdaptiveSimpson`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureOptions {
    /// Absolute per-component bound on `|trapezoid - Simpson|` for accepting a node.
    pub tolerance: f64,
    /// Nodes shallower than this are always subdivided.
    pub min_depth: usize,
    /// Nodes at this depth accept the trapezoid estimate unconditionally.
    pub max_depth: usize,
}

impl Default for QuadratureOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_QUADRATURE_TOLERANCE,
            min_depth: QUADRATURE_MIN_DEPTH,
            max_depth: QUADRATURE_MAX_DEPTH,
        }
    }
}

impl QuadratureOptions {
    fn validate(&self) -> Result<(), KernelError> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(KernelError::InvalidArguments(format!(
                "quadrature: tolerance must be finite and > 0, got {}",
                self.tolerance
            )));
        }
        if self.min_depth > self.max_depth {
            return Err(KernelError::InvalidArguments(format!(
                "quadrature: min_depth {} exceeds max_depth {}",
                self.min_depth, self.max_depth
            )));
        }
        Ok(())
    }
}

/// Counters for a single integration pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuadratureStats {
    /// Integrand evaluations (midpoints only; endpoints are supplied by the caller).
    pub evaluations: usize,
    /// Nodes that reached `max_depth` and fell back to the trapezoid estimate.
    pub ceiling_hits: usize,
    /// Deepest node visited.
    pub deepest: usize,
}

/// Depth-indexed scratch space: slot `d` holds the midpoint values of the live node at depth `d`.
#[derive(Debug, Clone)]
pub struct ScratchArena {
    dim: usize,
    slots: Vec64<f64>,
}

impl ScratchArena {
    /// Allocates `depths` slots of `dim` values each.
    pub fn new(dim: usize, depths: usize) -> Self {
        let mut slots = Vec64::with_capacity(dim * depths);
        slots.resize(dim * depths, 0.0);
        Self { dim, slots }
    }

    /// Number of depth slots.
    #[inline]
    pub fn depths(&self) -> usize {
        if self.dim == 0 { 0 } else { self.slots.len() / self.dim }
    }
}

/// Recursive adaptive Simpson integrator over a [`VectorIntegrand`].
///
/// One instance can be reused for repeated passes over the same integrand dimension,
/// e.g. with an escalating `min_depth`; the scratch arena is allocated once.
#[derive(Debug, Clone)]
pub struct AdaptiveSimpson {
    options: QuadratureOptions,
    arena: ScratchArena,
    stats: QuadratureStats,
}

impl AdaptiveSimpson {
    /// Builds an integrator for `dim`-component integrands.
    ///
    /// ## Errors
    /// `InvalidArguments` for a non-positive or non-finite tolerance, or `min_depth > max_depth`.
    pub fn new(dim: usize, options: QuadratureOptions) -> Result<Self, KernelError> {
        options.validate()?;
        Ok(Self {
            options,
            arena: ScratchArena::new(dim, options.max_depth),
            stats: QuadratureStats::default(),
        })
    }

    #[inline]
    pub fn options(&self) -> QuadratureOptions {
        self.options
    }

    /// Sets the minimum depth for subsequent passes, clamped to `max_depth`.
    #[inline]
    pub fn set_min_depth(&mut self, min_depth: usize) {
        self.options.min_depth = min_depth.min(self.options.max_depth);
    }

    /// Counters of the most recent pass.
    #[inline]
    pub fn stats(&self) -> QuadratureStats {
        self.stats
    }

    /// Integrates `f` over `[s, e]` and **adds** the per-component integral into `result`.
    ///
    /// `fs` and `fe` are `f(s)` and `f(e)`, computed by the caller so that singular
    /// endpoints can be special-cased.
    ///
    /// ## Errors
    /// `LengthMismatch` when `fs`, `fe` or `result` differ from `f.dim()` or the arena width.
    pub fn integrate<F>(
        &mut self,
        f: &F,
        fs: &[f64],
        fe: &[f64],
        s: f64,
        e: f64,
        result: &mut [f64],
    ) -> Result<QuadratureStats, KernelError>
    where
        F: VectorIntegrand + ?Sized,
    {
        let n = self.arena.dim;
        for (label, len) in [
            ("fs", fs.len()),
            ("fe", fe.len()),
            ("result", result.len()),
            ("integrand", f.dim()),
        ] {
            if len != n {
                return Err(KernelError::LengthMismatch(log_length_mismatch(
                    format!("quadrature::integrate ({})", label),
                    len,
                    n,
                )));
            }
        }

        self.stats = QuadratureStats::default();
        let Self {
            options,
            arena,
            stats,
        } = &mut *self;
        recurse(
            f,
            options,
            stats,
            s,
            e,
            fs,
            fe,
            &mut arena.slots[..],
            0,
            result,
        );
        Ok(self.stats)
    }
}

#[allow(clippy::too_many_arguments)]
fn recurse<F>(
    f: &F,
    options: &QuadratureOptions,
    stats: &mut QuadratureStats,
    s: f64,
    e: f64,
    fs: &[f64],
    fe: &[f64],
    arena: &mut [f64],
    depth: usize,
    result: &mut [f64],
) where
    F: VectorIntegrand + ?Sized,
{
    let n = result.len();
    let h = e - s;
    stats.deepest = stats.deepest.max(depth);

    if depth >= options.max_depth {
        stats.ceiling_hits += 1;
        for i in 0..n {
            result[i] += (fs[i] + fe[i]) * h / 2.0;
        }
        return;
    }

    let mid = 0.5 * (s + e);
    let (fm, deeper) = arena.split_at_mut(n);
    f.eval(mid, fm);
    stats.evaluations += 1;

    let split = depth < options.min_depth
        || (0..n).any(|i| {
            let q = (fs[i] + fe[i]) * h / 2.0;
            let q2 = (fs[i] + 4.0 * fm[i] + fe[i]) * h / 6.0;
            (q - q2).abs() >= options.tolerance
        });

    if split {
        let fm: &[f64] = fm;
        recurse(f, options, stats, s, mid, fs, fm, deeper, depth + 1, result);
        recurse(f, options, stats, mid, e, fm, fe, deeper, depth + 1, result);
        return;
    }

    for i in 0..n {
        result[i] += (fs[i] + 4.0 * fm[i] + fe[i]) * h / 6.0;
    }
}

/// Integrates `f` over `[0, 1]` with endpoint values from `f` itself.
///
/// Convenience wrapper for integrands that are regular at both ends.
pub fn integrate_unit_interval<F>(
    f: &F,
    options: QuadratureOptions,
) -> Result<(Vec64<f64>, QuadratureStats), KernelError>
where
    F: VectorIntegrand + ?Sized,
{
    let n = f.dim();
    let mut fs = Vec64::with_capacity(n);
    fs.resize(n, 0.0);
    let mut fe = fs.clone();
    let mut result = fs.clone();
    f.eval(0.0, &mut fs[..]);
    f.eval(1.0, &mut fe[..]);

    let mut quad = AdaptiveSimpson::new(n, options)?;
    let stats = quad.integrate(f, &fs[..], &fe[..], 0.0, 1.0, &mut result[..])?;
    Ok((result, stats))
}
