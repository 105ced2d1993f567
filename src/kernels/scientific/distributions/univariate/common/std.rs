// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

use minarrow::{Bitmask, FloatArray, Vec64};

use crate::errors::KernelError;
use crate::utils::{confirm_mask_capacity, has_nulls};

/// Dense kernel helper
///
/// ### Null handling
/// - Null mask appearing in the dense path means a mask was supplied
/// to the kernel function, with a null_count of `0`. The returned mask
/// is then all-valid.
/// - Any `NaN` or `inf` values generated in the kernel function
/// are kept verbatim, without `nulling` them in the (optional)
/// mask.
#[inline(always)]
pub fn dense_univariate_kernel_f64_std<FScalar>(
    x: &[f64],
    has_mask: bool,
    scalar_body: FScalar,
) -> (Vec64<f64>, Option<Bitmask>)
where
    FScalar: Fn(f64) -> f64,
{
    let len = x.len();
    let mut out = Vec64::with_capacity(len);

    for &xi in x {
        out.push(scalar_body(xi));
    }

    let out_mask = if has_mask {
        Some(Bitmask::new_set_all(len, true))
    } else {
        None
    };
    (out, out_mask)
}

/// Null-aware masked kernel helper.
///
/// ### Null handling
/// - Input mask is required and propagates nulls accordingly.
/// - Null lanes are written as `NaN` and stay null in the output mask.
/// - Computed `NaN` or `inf` values on valid lanes are kept verbatim.
///
/// The caller must have checked `mask.len >= x.len()`.
#[inline(always)]
pub fn masked_univariate_kernel_f64_std<FScalar>(
    x: &[f64],
    mask: &Bitmask,
    scalar_body: FScalar,
) -> (Vec64<f64>, Bitmask)
where
    FScalar: Fn(f64) -> f64,
{
    let len = x.len();
    let mut out = Vec64::with_capacity(len);
    let mut out_mask = mask.clone();

    for idx in 0..len {
        if !unsafe { mask.get_unchecked(idx) } {
            out.push(f64::NAN);
            unsafe { out_mask.set_unchecked(idx, false) };
        } else {
            let xi = unsafe { *x.get_unchecked(idx) };
            out.push(scalar_body(xi));
            unsafe { out_mask.set_unchecked(idx, true) };
        }
    }

    (out, out_mask)
}

/// Runs `scalar_body` over `x`, taking the dense path unless nulls are present.
///
/// Shared tail of every bulk distribution kernel in this crate.
///
/// ## Errors
/// `InvalidArguments` when a supplied mask is shorter than `x`.
#[inline(always)]
pub fn univariate_kernel_f64_std<FScalar>(
    x: &[f64],
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
    scalar_body: FScalar,
) -> Result<FloatArray<f64>, KernelError>
where
    FScalar: Fn(f64) -> f64,
{
    if x.is_empty() {
        return Ok(FloatArray::from_slice(&[]));
    }
    confirm_mask_capacity(x.len(), null_mask)?;

    match null_mask {
        // Null-aware masked path
        Some(mask) if has_nulls(null_count, null_mask) => {
            let (out, out_mask) = masked_univariate_kernel_f64_std(x, mask, scalar_body);
            Ok(FloatArray {
                data: out.into(),
                null_mask: Some(out_mask),
            })
        }
        // Dense fast path
        _ => {
            let (out, out_mask) =
                dense_univariate_kernel_f64_std(x, null_mask.is_some(), scalar_body);
            Ok(FloatArray {
                data: out.into(),
                null_mask: out_mask,
            })
        }
    }
}
