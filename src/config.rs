// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

// These parameters should rarely need adjustment.

//! # **Configuration Constants** - *Runtime Behaviour Parameters*
//!
//! Compile-time constants controlling numerical work bounds.
//! Per-call overrides are available through `QuadratureOptions`.

/// Hard recursion ceiling for the adaptive quadrature integrator.
///
/// Once a node reaches this depth it is no longer subdivided and the trapezoid
/// estimate is accepted. Well-posed integrands never reach it. Also the upper bound
/// for the minimum-depth escalation in the Dirichlet winner solver.
pub const QUADRATURE_MAX_DEPTH: usize = 50;

/// Integrand evaluations the Dirichlet winner solver may spend across all of its
/// escalation passes.
///
/// A pass at minimum depth `d` costs at least `2^d - 1` evaluations; escalation stops
/// before the pass that would overrun this total.
pub const QUADRATURE_MAX_EVALUATIONS: usize = 1 << 18;

/// Floor for the minimum recursion depth of the adaptive quadrature integrator.
///
/// Forces at least `2^QUADRATURE_MIN_DEPTH` leaf intervals before the error test
/// may accept an interval.
pub const QUADRATURE_MIN_DEPTH: usize = 2;

/// Default absolute per-component tolerance for the adaptive quadrature integrator.
pub const DEFAULT_QUADRATURE_TOLERANCE: f64 = 1e-8;

/// Slots per trial polynomial in the Poisson-binomial multi-convolution.
///
/// A length-2 polynomial `[1-p, p]` padded to 4 so that the product of two blocks
/// still fits inside the first half of the doubled block at the next stage.
pub const POISSON_BINOMIAL_BLOCK: usize = 4;
