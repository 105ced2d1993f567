// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Fast Fourier Transform Module** - *Transforms and Multi-Array Convolution*
//!
//! Power-of-two radix-2 transforms and a batched multi-array convolution engine.
//!
//! ## Use cases
//! - **Polynomial products**: the coefficient sequence of a product of many short
//!   polynomials, e.g. the PMF of a sum of independent discrete variables
//! - **Spectral analysis**: forward transforms with split real / imaginary outputs
//!
//! ## Multi-array convolution
//! [`multi_convolve`] multiplies `count` polynomials that share one buffer. Each lives in
//! a block of `block` slots with its coefficients in the first half. Every stage transforms
//! all blocks, multiplies neighbours pointwise, inverse transforms the products and merges
//! each pair into one block of twice the size. With `count` a power of two this finishes in
//! `log2(count)` stages and costs `O(N log² N)` for `N = count · block`, against `O(N²)` for
//! sequential pairwise convolution.

use minarrow::{FloatArray, Vec64};
use num_complex::Complex64;

use crate::errors::{KernelError, log_length_mismatch};
use crate::utils::is_pow2;

/// Power-of-two, in-place FFT (radix-2 DIT with bit-reversal).
///
/// `inverse` selects the conjugate transform, scaled by `1/N`, so that a forward
/// then inverse pass is the identity up to rounding.
///
/// Twiddles are evaluated per column index, not by recurrence.
#[inline]
pub fn fft_in_place(data: &mut [Complex64], inverse: bool) -> Result<(), KernelError> {
    let n = data.len();
    if !is_pow2(n) {
        return Err(KernelError::InvalidArguments(format!(
            "fft_in_place: N must be a power of two, got {}",
            n
        )));
    }
    if n == 1 {
        return Ok(());
    }

    // bit-reversal permutation
    let bits = n.trailing_zeros();
    for i in 0..n {
        let rev = i.reverse_bits() >> (usize::BITS - bits);
        if i < rev {
            data.swap(i, rev);
        }
    }

    let sign = if inverse { 1.0 } else { -1.0 };

    // iterative radix-2 DIT
    let mut m = 2;
    while m <= n {
        let half = m / 2;
        let theta = sign * 2.0 * std::f64::consts::PI / (m as f64);
        for j in 0..half {
            let w = Complex64::from_polar(1.0, theta * j as f64);
            for k in (0..n).step_by(m) {
                let t = w * data[k + j + half];
                let u = data[k + j];
                data[k + j] = u + t;
                data[k + j + half] = u - t;
            }
        }
        m <<= 1;
    }

    if inverse {
        let scale = 1.0 / n as f64;
        for z in data.iter_mut() {
            *z *= scale;
        }
    }
    Ok(())
}

/// Power-of-two forward FFT (≥2), returning the spectrum as split real / imaginary arrays.
///
/// `data` holds the spectrum on return as well.
#[inline]
pub fn block_fft(
    data: &mut [Complex64],
) -> Result<(FloatArray<f64>, FloatArray<f64>), KernelError> {
    let n = data.len();
    if n < 2 || !is_pow2(n) {
        return Err(KernelError::InvalidArguments(
            "block_fft: N must be power-of-two and ≥2".into(),
        ));
    }
    fft_in_place(data, false)?;

    let mut real = Vec64::with_capacity(n);
    let mut imag = Vec64::with_capacity(n);
    for &z in data.iter() {
        real.push(z.re);
        imag.push(z.im);
    }
    Ok((FloatArray::new(real, None), FloatArray::new(imag, None)))
}

/// Convolves `data.len() / block` polynomials packed in `data`, in place.
///
/// ## Layout
/// - `data` is split into `count` consecutive blocks of `block` coefficients.
/// - Each polynomial's non-zero coefficients must sit in the first `block / 2` slots
///   of its block, so that the product of two neighbours fits without wrap-around.
/// - `block` and `count` must both be powers of two.
///
/// On return `data` holds the coefficients of the product of all polynomials,
/// lowest degree first. Values are complex; the imaginary residue of a real-valued
/// product is rounding noise.
///
/// ## Errors
/// `InvalidArguments` for a non power-of-two `block` or `count`, `LengthMismatch`
/// when `data.len()` is not a multiple of `block`.
pub fn multi_convolve(data: &mut [Complex64], block: usize) -> Result<(), KernelError> {
    if block < 2 || !is_pow2(block) {
        return Err(KernelError::InvalidArguments(format!(
            "multi_convolve: block must be a power of two ≥2, got {}",
            block
        )));
    }
    if data.len() % block != 0 {
        return Err(KernelError::LengthMismatch(log_length_mismatch(
            "multi_convolve".into(),
            data.len(),
            (data.len() / block + 1) * block,
        )));
    }
    let mut count = data.len() / block;
    if !is_pow2(count) {
        return Err(KernelError::InvalidArguments(format!(
            "multi_convolve: array count must be a power of two, got {}",
            count
        )));
    }

    let mut m = block;
    while count > 1 {
        for chunk in data.chunks_exact_mut(m) {
            fft_in_place(chunk, false)?;
        }
        for pair in data.chunks_exact_mut(2 * m) {
            let (lhs, rhs) = pair.split_at_mut(m);
            for (l, r) in lhs.iter_mut().zip(rhs.iter()) {
                *l *= *r;
            }
            fft_in_place(lhs, true)?;
            // The merged block of size 2m keeps the product in its first half.
            rhs.fill(Complex64::new(0.0, 0.0));
        }
        m *= 2;
        count /= 2;
    }
    debug_assert_eq!(m, data.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;
    use rand::Rng;

    // ---- SciPy/NumPy FFT references ----

    fn scipy_fft_ref_8_seq_0_7() -> [Complex64; 8] {
        [
            Complex64::new(28.0, 0.0),
            Complex64::new(-4.0, 9.6568542494923797),
            Complex64::new(-4.0, 4.0),
            Complex64::new(-4.0, 1.6568542494923806),
            Complex64::new(-4.0, 0.0),
            Complex64::new(-4.0, -1.6568542494923806),
            Complex64::new(-4.0, -4.0),
            Complex64::new(-4.0, -9.6568542494923797),
        ]
    }

    // Basic DFT for validation
    fn dft_naive(x: &[Complex64]) -> Vec<Complex64> {
        let n = x.len() as f64;
        (0..x.len())
            .map(|k| {
                let mut sum = Complex64::new(0.0, 0.0);
                for (n_idx, &val) in x.iter().enumerate() {
                    let angle = -2.0 * std::f64::consts::PI * (k as f64) * (n_idx as f64) / n;
                    sum += val * Complex64::from_polar(1.0, angle);
                }
                sum
            })
            .collect()
    }

    fn assert_vec_close(a: &[Complex64], b: &[Complex64], eps: f64) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).norm() < eps, "mismatch: x={:?}, y={:?}", x, y);
        }
    }

    fn naive_poly_mul(a: &[f64], b: &[f64]) -> Vec<f64> {
        let mut out = vec![0.0; a.len() + b.len() - 1];
        for (i, &x) in a.iter().enumerate() {
            for (j, &y) in b.iter().enumerate() {
                out[i + j] += x * y;
            }
        }
        out
    }

    #[test]
    fn block_fft_matches_scipy_seq0_7() {
        let mut data = (0..8)
            .map(|v| Complex64::new(v as f64, 0.0))
            .collect::<Vec<_>>();
        let (re, im) = block_fft(&mut data).unwrap();
        let ref_out = scipy_fft_ref_8_seq_0_7();
        assert_vec_close(&data, &ref_out, 1e-12);
        assert!((re.data[0] - 28.0).abs() < 1e-12);
        assert!((im.data[1] - 9.6568542494923797).abs() < 1e-12);
    }

    #[test]
    fn block_fft_random_lengths() {
        let mut rng = rand::rng();
        for &n in &[2, 4, 8, 16, 32, 64, 128, 256, 512, 1024] {
            let mut data: Vec<Complex64> = (0..n)
                .map(|_| Complex64::new(rng.random(), rng.random()))
                .collect();
            let ref_data = data.clone();
            let (_, _) = block_fft(&mut data).unwrap();
            let ref_out = dft_naive(&ref_data);
            assert_vec_close(&data, &ref_out, 1e-9); // generous for large n
        }
    }

    #[test]
    fn inverse_round_trips() {
        let mut rng = rand::rng();
        let orig: Vec<Complex64> = (0..256)
            .map(|_| Complex64::new(rng.random(), rng.random()))
            .collect();
        let mut data = orig.clone();
        fft_in_place(&mut data, false).unwrap();
        fft_in_place(&mut data, true).unwrap();
        assert_vec_close(&data, &orig, 1e-12);
    }

    #[test]
    fn length_one_is_identity() {
        let mut data = [Complex64::new(3.5, -1.0)];
        fft_in_place(&mut data, false).unwrap();
        assert_eq!(data[0], Complex64::new(3.5, -1.0));
    }

    #[test]
    fn block_fft_power_of_two_check() {
        let mut bad = vec![Complex64::new(0.0, 0.0); 12]; // not power of two
        assert!(block_fft(&mut bad).is_err());
        let mut one = vec![Complex64::new(1.0, 0.0); 1];
        assert!(block_fft(&mut one).is_err());
    }

    #[test]
    fn multi_convolve_two_linear_factors() {
        // (1 + 2x)(3 + 4x) = 3 + 10x + 8x²
        let mut data = vec![
            Complex64::new(1.0, 0.0),
            Complex64::new(2.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(3.0, 0.0),
            Complex64::new(4.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
        ];
        multi_convolve(&mut data, 4).unwrap();
        let expect = [3.0, 10.0, 8.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        for (z, e) in data.iter().zip(expect) {
            assert!((z.re - e).abs() < 1e-12, "got {:?}, want {}", z, e);
            assert!(z.im.abs() < 1e-12);
        }
    }

    #[test]
    fn multi_convolve_matches_sequential_product() {
        let mut rng = rand::rng();
        let count = 16;
        let block = 4;
        let polys: Vec<[f64; 2]> = (0..count)
            .map(|_| [rng.random::<f64>(), rng.random::<f64>()])
            .collect();

        let mut data = vec![Complex64::new(0.0, 0.0); count * block];
        for (i, p) in polys.iter().enumerate() {
            data[i * block] = Complex64::new(p[0], 0.0);
            data[i * block + 1] = Complex64::new(p[1], 0.0);
        }
        multi_convolve(&mut data, block).unwrap();

        let mut expect = vec![1.0];
        for p in &polys {
            expect = naive_poly_mul(&expect, p);
        }
        for (k, &e) in expect.iter().enumerate() {
            assert!((data[k].re - e).abs() < 1e-12, "coef {}: {} vs {}", k, data[k].re, e);
        }
        for z in &data[expect.len()..] {
            assert!(z.norm() < 1e-12);
        }
    }

    #[test]
    fn multi_convolve_single_array_is_untouched() {
        let mut data = vec![
            Complex64::new(0.25, 0.0),
            Complex64::new(0.75, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
        ];
        let orig = data.clone();
        multi_convolve(&mut data, 4).unwrap();
        assert_eq!(data, orig);
    }

    #[test]
    fn multi_convolve_rejects_bad_layouts() {
        let mut data = vec![Complex64::new(0.0, 0.0); 12];
        // 3 blocks of 4
        assert!(matches!(
            multi_convolve(&mut data, 4),
            Err(KernelError::InvalidArguments(_))
        ));
        // not a multiple of the block
        assert!(matches!(
            multi_convolve(&mut data, 8),
            Err(KernelError::LengthMismatch(_))
        ));
        // block not a power of two
        assert!(multi_convolve(&mut data, 3).is_err());
    }
}
