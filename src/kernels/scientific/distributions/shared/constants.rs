// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Mathematical Constants Module** - *Constants for the Special Functions*
//!
//! Hard-coded constants backing the log-gamma evaluation shared by every
//! distribution in the crate.

/// Lanczos coefficients for g = 7, n = 9.
pub(crate) const COF: [f64; 9] = [
    0.999_999_999_999_809_93,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_13,
    -176.615_029_162_140_59,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_571_6e-6,
    1.505_632_735_149_311_6e-7,
];

/// Natural logarithm of π, used by the gamma reflection formula.
pub const LN_PI: f64 = 1.1447298858494002;

/// Half of the natural logarithm of 2π: ½ln(2π) ≈ 0.918938533204673.
pub const HALF_LOG_TWO_PI: f64 = 0.918_938_533_204_672_741_780_329_736_406;
