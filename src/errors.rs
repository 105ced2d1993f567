// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Error Types** - *Kernel Operation Error Handling*
//!
//! Error types for distribution construction and numerical kernels.
//!
//! ## Error Categories
//! - **Argument Errors**: Malformed parameters, e.g. an empty probability vector,
//!   a probability outside [0, 1], a non-positive shape or tolerance
//! - **Dimension Errors**: Buffer lengths that do not match the requested layout
//! - **Boundary Errors**: Sizes that overflow the transform domain
//!
//! Out-of-support evaluation (e.g. a PMF at a non-integer point) is *not* an error;
//! those return the mathematically correct boundary value.

use core::fmt;
use std::error::Error;

/// Error type for all kernel and distribution operations.
///
/// Each variant carries a message prefixed with the originating function name.
#[derive(Debug, Clone, PartialEq)]
pub enum KernelError {
    /// Array length mismatch between operands, or a buffer that does not fit its layout.
    LengthMismatch(String),

    /// Invalid arguments provided to a kernel function or constructor.
    InvalidArguments(String),

    /// Size or index out of the supported range.
    OutOfBounds(String),
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::LengthMismatch(msg) => write!(f, "Length mismatch: {}", msg),
            KernelError::InvalidArguments(msg) => write!(f, "Invalid arguments: {}", msg),
            KernelError::OutOfBounds(msg) => write!(f, "Out of bounds: {}", msg),
        }
    }
}

impl Error for KernelError {}

/// Creates a formatted error message for length mismatches between left-hand side (LHS) and right-hand side (RHS) arrays.
///
/// # Arguments
/// * `fname` - Function name where the mismatch occurred
/// * `lhs` - Length of the left-hand side array
/// * `rhs` - Length of the right-hand side array
pub fn log_length_mismatch(fname: String, lhs: usize, rhs: usize) -> String {
    format!("{} => Length mismatch: LHS {} RHS {}", fname, lhs, rhs)
}
