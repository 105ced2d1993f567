// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Utility Functions** - *Null-Mask and Sizing Helpers*
//!
//! Small helpers shared by the kernels: null-mask detection and validation
//! and bounds-checked power-of-two sizing for transform buffers.

use minarrow::Bitmask;

use crate::errors::KernelError;

/// Determines whether nulls are present given an optional null count and mask reference.
/// Avoids computing mask cardinality to preserve performance guarantees.
#[inline(always)]
pub fn has_nulls(null_count: Option<usize>, mask: Option<&Bitmask>) -> bool {
    match null_count {
        Some(n) => n > 0,
        None => mask.is_some(),
    }
}

/// Checks the mask covers at least `cmp_len` lanes.
/// Used so we can avoid bounds checks in the hot loop
#[inline(always)]
pub fn confirm_mask_capacity(cmp_len: usize, mask: Option<&Bitmask>) -> Result<(), KernelError> {
    if let Some(m) = mask {
        if m.len < cmp_len {
            return Err(KernelError::InvalidArguments(format!(
                "mask (Bitmask): capacity mismatch (expected at least {}, got {})",
                cmp_len, m.len
            )));
        }
    }
    Ok(())
}

/// Smallest power of two `>= n`, or `OutOfBounds` if it does not fit in `usize`.
///
/// `next_pow2(0) == 1`.
#[inline]
pub fn next_pow2(label: &str, n: usize) -> Result<usize, KernelError> {
    n.max(1).checked_next_power_of_two().ok_or_else(|| {
        KernelError::OutOfBounds(format!(
            "{}: {} has no representable next power of two",
            label, n
        ))
    })
}

/// True when `n` is a non-zero power of two.
#[inline(always)]
pub fn is_pow2(n: usize) -> bool {
    n != 0 && (n & (n - 1)) == 0
}
