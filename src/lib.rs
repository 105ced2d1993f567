// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under the Mozilla Public License (MPL) 2.0.
// See LICENSE for details.

//! # **stat-kernels** - *Statistical Distribution and Numerical Kernels*
//!
//! - **FFT multi-convolution** for exact PMFs of sums of independent discrete trials
//! - **Adaptive vector quadrature** for integrals with no closed form
//! - **Distributions**: Poisson-binomial, beta-binomial, beta-prime and Dirichlet
//!   winner probabilities, with null-aware bulk kernels over `minarrow` arrays
//!
//! The library only emits `tracing` events; installing a subscriber is up to the caller.

pub mod errors;

pub mod kernels {
    pub mod scientific {
        #[cfg(feature = "probability_distributions")]
        pub mod distributions;
        #[cfg(feature = "fourier_transforms")]
        pub mod fft;
        #[cfg(feature = "numerical_integration")]
        pub mod quadrature;
    }
}

pub mod traits {
    #[cfg(feature = "probability_distributions")]
    pub mod distribution;
}

pub mod config;

pub mod utils;
