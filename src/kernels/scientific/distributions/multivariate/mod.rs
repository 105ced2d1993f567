// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Multivariate Distributions** - *Vector-Valued Distribution Kernels*
//!
//! - **`dirichlet_winner`**: probability that each coordinate of a Dirichlet vector is the maximum.

pub mod dirichlet_winner;
