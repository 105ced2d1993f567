// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Common Distribution Utilities** - *Shared Kernel and Testing Helpers*
//!
//! Dense and null-masked evaluation loops shared by every bulk univariate kernel,
//! plus small helpers used by their unit tests.
//!
//! ## Null handling
//! Bulk kernels follow Arrow validity semantics (1 = valid, 0 = null). A kernel takes the
//! dense path when `null_count == Some(0)` or no mask is supplied; otherwise null lanes come
//! back as `NaN` with the validity bit cleared.

/// Scalar implementations of the kernel loops.
pub mod std;

#[cfg(test)]
pub(crate) mod test_helpers {
    use minarrow::{Bitmask, Buffer, FloatArray};

    /// Unwrap `FloatArray`, assert *no* null mask, return data.
    pub fn dense_data(arr: FloatArray<f64>) -> Buffer<f64> {
        assert!(arr.null_mask.is_none(), "unexpected mask on dense path");
        arr.data
    }

    /// Mask of `len` lanes with exactly lane `idx` null.
    pub fn single_null_mask(len: usize, idx: usize) -> Bitmask {
        let mut m = Bitmask::new_set_all(len, true);
        unsafe { m.set_unchecked(idx, false) };
        m
    }

    /// Assert absolute difference ≤ `tol`.
    pub fn assert_close(a: f64, b: f64, tol: f64) {
        assert!(
            (a - b).abs() <= tol,
            "assert_close failed: {} vs {} (tol={})",
            a,
            b,
            tol
        );
    }
}
