/*
 * // Copyright (c) Radzivon Bartoshyk 10/2026. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use crate::Domain;

/// `dst += scale * (a * b)` over interleaved `(re, im)` pairs.
pub(crate) fn mul_accumulate_interleaved(a: &[f32], b: &[f32], dst: &mut [f32], scale: f32) {
    for ((dst, a), b) in dst
        .chunks_exact_mut(2)
        .zip(a.chunks_exact(2))
        .zip(b.chunks_exact(2))
    {
        let (re, im) = c_mul(a[0], a[1], b[0], b[1]);
        dst[0] += re * scale;
        dst[1] += im * scale;
    }
}

/// `dst += scale * (a * b)` over blocks of `lanes` real parts followed by `lanes`
/// imaginary parts.
pub(crate) fn mul_accumulate_split(
    a: &[f32],
    b: &[f32],
    dst: &mut [f32],
    scale: f32,
    lanes: usize,
) {
    let block = lanes * 2;
    for ((dst, a), b) in dst
        .chunks_exact_mut(block)
        .zip(a.chunks_exact(block))
        .zip(b.chunks_exact(block))
    {
        let (a_re, a_im) = a.split_at(lanes);
        let (b_re, b_im) = b.split_at(lanes);
        let (dst_re, dst_im) = dst.split_at_mut(lanes);
        for i in 0..lanes {
            let (re, im) = c_mul(a_re[i], a_im[i], b_re[i], b_im[i]);
            dst_re[i] += re * scale;
            dst_im[i] += im * scale;
        }
    }
}

/// `dst += scale * (a * b)` for a coefficient known to be purely real.
#[inline]
pub(crate) fn mul_accumulate_real(a: f32, b: f32, dst: &mut f32, scale: f32) {
    *dst += a * b * scale;
}

/// Multiply-accumulate on canonical spectra, `[DC, Nyquist, re1, im1, ..]` for real ones.
pub(crate) fn mul_accumulate_canonical(
    a: &[f32],
    b: &[f32],
    dst: &mut [f32],
    scale: f32,
    domain: Domain,
) {
    match domain {
        Domain::Complex => mul_accumulate_interleaved(a, b, dst, scale),
        Domain::Real => {
            if dst.len() < 2 {
                return;
            }
            mul_accumulate_real(a[0], b[0], &mut dst[0], scale);
            mul_accumulate_real(a[1], b[1], &mut dst[1], scale);
            mul_accumulate_interleaved(&a[2..], &b[2..], &mut dst[2..], scale);
        }
    }
}

/// Multiply-accumulate on FFTPACK ordered spectra, `[DC, re1, im1, .., Nyquist]` for
/// real ones.
pub(crate) fn mul_accumulate_fftpack(
    a: &[f32],
    b: &[f32],
    dst: &mut [f32],
    scale: f32,
    domain: Domain,
) {
    match domain {
        Domain::Complex => mul_accumulate_interleaved(a, b, dst, scale),
        Domain::Real => {
            let n = dst.len();
            if n < 2 {
                return;
            }
            mul_accumulate_real(a[0], b[0], &mut dst[0], scale);
            mul_accumulate_real(a[n - 1], b[n - 1], &mut dst[n - 1], scale);
            mul_accumulate_interleaved(&a[1..n - 1], &b[1..n - 1], &mut dst[1..n - 1], scale);
        }
    }
}

#[inline]
fn c_mul(ar: f32, ai: f32, br: f32, bi: f32) -> (f32, f32) {
    let tmp = ar * bi;
    (ar * br - ai * bi, ai * br + tmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;
    use rand::Rng;

    #[test]
    fn test_interleaved_matches_complex_product() {
        let n = 64;
        let mut rng = rand::rng();
        let a: Vec<f32> = (0..n * 2).map(|_| rng.random_range(-1f32..1f32)).collect();
        let b: Vec<f32> = (0..n * 2).map(|_| rng.random_range(-1f32..1f32)).collect();
        let mut dst = vec![1f32; n * 2];
        mul_accumulate_interleaved(&a, &b, &mut dst, 0.5);
        for i in 0..n {
            let expected = Complex::new(1f32, 1.)
                + Complex::new(a[2 * i], a[2 * i + 1]) * Complex::new(b[2 * i], b[2 * i + 1]) * 0.5;
            assert!(
                (dst[2 * i] - expected.re).abs() < 1e-6,
                "re {} != {} at {i}",
                dst[2 * i],
                expected.re
            );
            assert!(
                (dst[2 * i + 1] - expected.im).abs() < 1e-6,
                "im {} != {} at {i}",
                dst[2 * i + 1],
                expected.im
            );
        }
    }

    #[test]
    fn test_split_agrees_with_interleaved() {
        let lanes = 4;
        let n = 32;
        let mut rng = rand::rng();
        let a: Vec<f32> = (0..n * 2).map(|_| rng.random_range(-1f32..1f32)).collect();
        let b: Vec<f32> = (0..n * 2).map(|_| rng.random_range(-1f32..1f32)).collect();
        let split = |v: &[f32]| {
            let mut out = vec![0f32; v.len()];
            for (dst, src) in out.chunks_exact_mut(lanes * 2).zip(v.chunks_exact(lanes * 2)) {
                for l in 0..lanes {
                    dst[l] = src[2 * l];
                    dst[lanes + l] = src[2 * l + 1];
                }
            }
            out
        };
        let mut interleaved = vec![0f32; n * 2];
        mul_accumulate_interleaved(&a, &b, &mut interleaved, 1.);
        let mut blocked = vec![0f32; n * 2];
        mul_accumulate_split(&split(&a), &split(&b), &mut blocked, 1., lanes);
        assert_eq!(split(&interleaved), blocked);
    }

    #[test]
    fn test_real_layouts_agree_after_rotation() {
        let a = [2f32, 1., 3., 4., 5., 6., 7., 8.];
        let b = [1f32, 2., 1., 0.5, 2., 1., 1., -1.];
        let rotate = |v: &[f32]| {
            let mut out = vec![0f32; v.len()];
            out[0] = v[0];
            out[1] = v[v.len() - 1];
            out[2..].copy_from_slice(&v[1..v.len() - 1]);
            out
        };
        let mut fftpack = vec![0f32; 8];
        mul_accumulate_fftpack(&a, &b, &mut fftpack, 1., Domain::Real);
        let mut canonical = vec![0f32; 8];
        mul_accumulate_canonical(&rotate(&a), &rotate(&b), &mut canonical, 1., Domain::Real);
        assert_eq!(rotate(&fftpack), canonical);
        assert_eq!(canonical[0], 2.);
        assert_eq!(canonical[1], -8.);
    }

    #[test]
    fn test_real_coefficient() {
        let mut dst = 1f32;
        mul_accumulate_real(3., -2., &mut dst, 0.5);
        assert_eq!(dst, -2.);
    }
}
