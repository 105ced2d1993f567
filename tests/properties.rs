// Property tests over randomly generated parameter sets.

mod util;

#[cfg(feature = "probability_distributions")]
mod property_tests {
    use proptest::prelude::*;
    use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence, RngAlgorithm};
    use stat_kernels::kernels::scientific::distributions::multivariate::dirichlet_winner::dirichlet_winner_report;
    use stat_kernels::kernels::scientific::distributions::univariate::beta_binomial::BetaBinomial;
    use stat_kernels::kernels::scientific::distributions::univariate::poisson_binomial::PoissonBinomial;
    use stat_kernels::traits::distribution::UnivariateDistribution;

    fn dist_proptest_config(cases: u32) -> ProptestConfig {
        ProptestConfig {
            cases,
            source_file: Some(file!()),
            failure_persistence: Some(Box::new(FileFailurePersistence::WithSource(
                "proptest-regressions",
            ))),
            rng_algorithm: RngAlgorithm::ChaCha,
            ..ProptestConfig::default()
        }
    }

    /// Trial probabilities with exact 0 and 1 mixed in.
    fn probability_strategy() -> impl Strategy<Value = f64> {
        prop_oneof![
            1 => Just(0.0),
            1 => Just(1.0),
            8 => 0.0f64..=1.0,
        ]
    }

    proptest! {
        #![proptest_config(dist_proptest_config(64))]

        /// PMF is non-negative up to rounding and sums to one.
        #[test]
        fn poisson_binomial_pmf_normalised(p in prop::collection::vec(probability_strategy(), 1..200)) {
            let d = PoissonBinomial::new(&p).unwrap();
            prop_assert_eq!(d.pmf().len(), p.len() + 1);
            let mut s = 0.0;
            for &v in d.pmf() {
                prop_assert!(v >= -1e-14, "negative mass {}", v);
                s += v;
            }
            prop_assert!((s - 1.0).abs() <= 1e-12, "sum {}", s);
        }

        /// CDF is non-decreasing, 0 below the support and 1 at its top.
        #[test]
        fn poisson_binomial_cdf_monotone(p in prop::collection::vec(0.0f64..=1.0, 1..64)) {
            let d = PoissonBinomial::new(&p).unwrap();
            let n = p.len() as f64;
            prop_assert_eq!(d.cdf(-0.5), 0.0);
            prop_assert!((d.cdf(n) - 1.0).abs() <= 1e-12);
            let mut prev = 0.0;
            for k in 0..=p.len() {
                let c = d.cdf(k as f64);
                prop_assert!(c >= prev - 1e-14, "cdf({}) = {} < {}", k, c, prev);
                prev = c;
            }
        }

        /// Closed-form mean agrees with the PMF.
        #[test]
        fn poisson_binomial_mean_matches_pmf(p in prop::collection::vec(0.0f64..=1.0, 1..100)) {
            let d = PoissonBinomial::new(&p).unwrap();
            let m: f64 = d.pmf().iter().enumerate().map(|(k, v)| k as f64 * v).sum();
            prop_assert!((m - d.mean()).abs() <= 1e-10 * (1.0 + d.mean()));
        }

        /// Beta-binomial CDF reaches one at n and never decreases.
        #[test]
        fn beta_binomial_cdf_monotone(n in 1u64..80, a in 0.2f64..40.0, b in 0.2f64..40.0) {
            let d = BetaBinomial::new(n, a, b).unwrap();
            let mut prev = 0.0;
            for k in 0..n {
                let c = d.cdf(k as f64);
                prop_assert!(c >= prev - 1e-14);
                prev = c;
            }
            prop_assert!((prev + d.prob(n as f64) - 1.0).abs() <= 1e-10);
        }
    }

    proptest! {
        #![proptest_config(dist_proptest_config(24))]

        /// Winner probabilities are non-negative and sum to one within 2n·tol when converged.
        #[test]
        fn dirichlet_winner_normalised(
            alphas in prop::collection::vec(0.05f64..60.0, 1..7),
            tol_exp in 3i32..=8,
        ) {
            let tol = 10f64.powi(-tol_exp);
            let bound = 2.0 * alphas.len() as f64 * tol;
            let r = dirichlet_winner_report(&alphas, tol).unwrap();
            prop_assert_eq!(r.probabilities.len(), alphas.len());
            prop_assert!(r.probabilities.iter().all(|&v| v >= 0.0));
            let s: f64 = r.probabilities.iter().sum();
            if r.converged {
                prop_assert!((s - 1.0).abs() <= bound, "sum {}", s);
            } else {
                prop_assert!(s <= 1.0 + bound, "sum {}", s);
            }
            if alphas.iter().sum::<f64>() >= 3.0 {
                prop_assert!(r.converged, "alphas {:?} did not converge", alphas);
            }
        }
    }

    proptest! {
        #![proptest_config(dist_proptest_config(8))]

        /// Alpha sums below one return a bounded best effort instead of escalating forever.
        #[test]
        fn dirichlet_winner_small_alpha_sum_terminates(
            alphas in prop::collection::vec(0.02f64..0.3, 3..5),
            tol_exp in 4i32..=9,
        ) {
            let tol = 10f64.powi(-tol_exp);
            let r = dirichlet_winner_report(&alphas, tol).unwrap();
            prop_assert!(r.attempts >= 1);
            prop_assert!(r.probabilities.iter().all(|&v| v >= 0.0 && v.is_finite()));
            let s: f64 = r.probabilities.iter().sum();
            prop_assert!(s <= 1.0 + 2.0 * alphas.len() as f64 * tol, "sum {}", s);
        }
    }
}
