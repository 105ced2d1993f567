// Dirichlet winner probabilities: reference vectors, normalisation over random
// alpha vectors, and agreement with a Monte Carlo estimate.

mod util;

#[cfg(feature = "probability_distributions")]
mod dirichlet_winner_tests {
    use super::util::assert_close;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use stat_kernels::errors::KernelError;
    use stat_kernels::kernels::scientific::distributions::multivariate::dirichlet_winner::{
        dirichlet_winner, dirichlet_winner_monte_carlo, dirichlet_winner_report,
    };

    fn check_reference(alphas: &[f64], expect: &[f64]) {
        for tol in [1e-3, 1e-8] {
            let r = dirichlet_winner(alphas, tol).unwrap();
            for i in 0..alphas.len() {
                assert!(
                    (expect[i] - r[i]).abs() <= tol,
                    "error {} target {} result {} tol {}",
                    expect[i] - r[i],
                    expect[i],
                    r[i],
                    tol
                );
            }
        }
    }

    fn check_sum(alphas: &[f64], tol: f64) {
        let r = dirichlet_winner(alphas, tol).unwrap();
        assert_eq!(r.len(), alphas.len());
        assert!(r.iter().all(|&v| v >= 0.0), "negative entry in {:?}", &r[..]);
        let s: f64 = r.iter().sum();
        assert!(
            (1.0 - s).abs() <= 2.0 * alphas.len() as f64 * tol,
            "sum error {} for {:?} at tol {}",
            1.0 - s,
            alphas,
            tol
        );
    }

    /// Exp(1) draw by inversion.
    fn exp1(rng: &mut StdRng) -> f64 {
        -(1.0 - rng.random::<f64>()).ln()
    }

    #[test]
    fn three_categories_reference() {
        check_reference(
            &[5.5, 10.5, 15.5],
            &[0.006730827936742794, 0.15691248315301745, 0.83635668891024],
        );
    }

    #[test]
    fn large_alphas_reference() {
        check_reference(
            &[50.5, 100.5, 150.5],
            &[
                1.2913384498578148e-13,
                0.0007572193068734463,
                0.9992427806931501,
            ],
        );
    }

    #[test]
    fn two_categories_uniform_is_exact() {
        let r = dirichlet_winner(&[1.0, 1.0], 1e-8).unwrap();
        assert_eq!(r[0], 0.5);
        assert_eq!(r[1], 0.5);
    }

    #[test]
    fn two_categories_closed_form() {
        // I_½(1, 2) = 3/4
        let r = dirichlet_winner(&[1.0, 2.0], 1e-8).unwrap();
        assert_close(r[1], 0.75, 1e-14);
        assert_close(r[0], 0.25, 1e-14);
    }

    #[test]
    fn random_clustered_alphas_sum_to_one() {
        let mut rng = StdRng::seed_from_u64(17);
        for i in 0..40 {
            let n = rng.random_range(1..=10);
            let ta = exp1(&mut rng) * 1.1_f64.powi(i) + 0.5;
            let alphas: Vec<f64> = (0..n).map(|_| ta + exp1(&mut rng) * ta.sqrt()).collect();
            for tol in [1e-3, 1e-8] {
                check_sum(&alphas, tol);
            }
        }
    }

    #[test]
    fn random_spread_alphas_sum_to_one() {
        let mut rng = StdRng::seed_from_u64(23);
        for i in 0..40 {
            let n = rng.random_range(1..=10);
            let alphas: Vec<f64> = (0..n)
                .map(|_| exp1(&mut rng) * 1.1_f64.powi(i) + 0.5)
                .collect();
            check_sum(&alphas, 1e-8);
        }
    }

    #[test]
    fn report_flags_convergence() {
        let r = dirichlet_winner_report(&[2.0, 4.0, 6.0, 8.0], 1e-7).unwrap();
        assert!(r.converged);
        assert!(r.attempts >= 1);
        assert_eq!(r.stats.ceiling_hits, 0);
    }

    #[test]
    fn monte_carlo_cross_check() {
        let alphas = [1.5, 2.5, 3.5, 4.5];
        let exact = dirichlet_winner(&alphas, 1e-8).unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        let mc = dirichlet_winner_monte_carlo(&alphas, 200_000, &mut rng).unwrap();
        for i in 0..alphas.len() {
            assert!(
                (mc[i] - exact[i]).abs() < 0.006,
                "category {i}: monte carlo {} vs quadrature {}",
                mc[i],
                exact[i]
            );
        }
    }

    #[test]
    fn non_positive_tolerance_rejected() {
        for tol in [0.0, -1e-6, f64::INFINITY] {
            assert!(matches!(
                dirichlet_winner(&[1.0, 2.0, 3.0], tol),
                Err(KernelError::InvalidArguments(_))
            ));
        }
    }
}
