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
//! Conversions between coefficient layouts.
//!
//! Everything here is data movement only, so converting back and forth is bit exact.
use crate::err::{GaugeError, check_length};
use crate::{Domain, FftDirection};
use num_complex::Complex;

/// Canonical pairs into lane blocks: every `2 * lanes` floats become
/// `[re_0 .. re_lanes, im_0 .. im_lanes]`.
pub(crate) fn interleaved_to_blocks(src: &[f32], dst: &mut [f32], lanes: usize) {
    let block = lanes * 2;
    for (dst, src) in dst.chunks_exact_mut(block).zip(src.chunks_exact(block)) {
        let (re, im) = dst.split_at_mut(lanes);
        for ((re, im), pair) in re.iter_mut().zip(im.iter_mut()).zip(src.chunks_exact(2)) {
            *re = pair[0];
            *im = pair[1];
        }
    }
}

/// Inverse of [`interleaved_to_blocks`].
pub(crate) fn blocks_to_interleaved(src: &[f32], dst: &mut [f32], lanes: usize) {
    let block = lanes * 2;
    for (dst, src) in dst.chunks_exact_mut(block).zip(src.chunks_exact(block)) {
        let (re, im) = src.split_at(lanes);
        for ((pair, &re), &im) in dst.chunks_exact_mut(2).zip(re.iter()).zip(im.iter()) {
            pair[0] = re;
            pair[1] = im;
        }
    }
}

/// FFTPACK half complex order `[DC, re1, im1, .., Nyquist]` into canonical
/// `[DC, Nyquist, re1, im1, ..]`: the last coefficient moves to index 1.
pub(crate) fn nyquist_to_front(src: &[f32], dst: &mut [f32]) {
    let n = src.len();
    if n < 2 {
        dst.copy_from_slice(src);
        return;
    }
    dst[0] = src[0];
    dst[1] = src[n - 1];
    dst[2..].copy_from_slice(&src[1..n - 1]);
}

/// Inverse of [`nyquist_to_front`].
pub(crate) fn nyquist_to_back(src: &[f32], dst: &mut [f32]) {
    let n = src.len();
    if n < 2 {
        dst.copy_from_slice(src);
        return;
    }
    dst[0] = src[0];
    dst[1..n - 1].copy_from_slice(&src[2..]);
    dst[n - 1] = src[1];
}

/// In place variant of [`nyquist_to_front`].
pub(crate) fn nyquist_to_front_in_place(buffer: &mut [f32]) {
    if buffer.len() > 2 {
        buffer[1..].rotate_right(1);
    }
}

/// Dispatches a reorder through a pair of permutations, after validating lengths.
pub(crate) fn reorder_with(
    expected: usize,
    input: &[f32],
    output: &mut [f32],
    direction: FftDirection,
    to_canonical: impl Fn(&[f32], &mut [f32]),
    to_packed: impl Fn(&[f32], &mut [f32]),
) -> Result<(), GaugeError> {
    check_length(expected, input.len())?;
    check_length(expected, output.len())?;
    match direction {
        FftDirection::Forward => to_canonical(input, output),
        FftDirection::Inverse => to_packed(input, output),
    }
    Ok(())
}

/// Writes `N/2 + 1` bins of a real spectrum as canonical floats.
pub(crate) fn half_spectrum_to_canonical(spectrum: &[Complex<f32>], dst: &mut [f32]) {
    let half = dst.len() / 2;
    dst[0] = spectrum[0].re;
    dst[1] = spectrum[half].re;
    for (pair, bin) in dst[2..].chunks_exact_mut(2).zip(spectrum[1..half].iter()) {
        pair[0] = bin.re;
        pair[1] = bin.im;
    }
}

/// Reads canonical floats into `N/2 + 1` bins, DC and Nyquist get a zero imaginary part.
pub(crate) fn canonical_to_half_spectrum(src: &[f32], spectrum: &mut [Complex<f32>]) {
    let half = src.len() / 2;
    spectrum[0] = Complex::new(src[0], 0.);
    spectrum[half] = Complex::new(src[1], 0.);
    for (bin, pair) in spectrum[1..half].iter_mut().zip(src[2..].chunks_exact(2)) {
        *bin = Complex::new(pair[0], pair[1]);
    }
}

pub(crate) fn interleaved_to_complex(src: &[f32], dst: &mut [Complex<f32>]) {
    for (dst, pair) in dst.iter_mut().zip(src.chunks_exact(2)) {
        *dst = Complex::new(pair[0], pair[1]);
    }
}

pub(crate) fn complex_to_interleaved(src: &[Complex<f32>], dst: &mut [f32]) {
    for (pair, src) in dst.chunks_exact_mut(2).zip(src.iter()) {
        pair[0] = src.re;
        pair[1] = src.im;
    }
}

/// Pointwise `a * a` of a canonical spectrum. For a real transform the `(DC, Nyquist)`
/// pair holds two real coefficients and each is squared on its own.
pub(crate) fn canonical_square(spectrum: &mut [f32], domain: Domain) {
    for (k, pair) in spectrum.chunks_exact_mut(2).enumerate() {
        let ar = pair[0];
        let ai = pair[1];
        if k != 0 || domain == Domain::Complex {
            pair[0] = ar * ar - ai * ai;
            pair[1] = 2. * ar * ai;
        } else {
            pair[0] = ar * ar;
            pair[1] = ai * ai;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nyquist_rotation() {
        let fftpack = [0f32, 1., 2., 3., 4., 5.];
        let mut canonical = [0f32; 6];
        nyquist_to_front(&fftpack, &mut canonical);
        assert_eq!(canonical, [0., 5., 1., 2., 3., 4.]);
        let mut back = [0f32; 6];
        nyquist_to_back(&canonical, &mut back);
        assert_eq!(back, fftpack);
        let mut in_place = fftpack;
        nyquist_to_front_in_place(&mut in_place);
        assert_eq!(in_place, canonical);
    }

    #[test]
    fn test_lane_blocks() {
        let canonical: Vec<f32> = (0..16).map(|x| x as f32).collect();
        let mut packed = vec![0f32; 16];
        interleaved_to_blocks(&canonical, &mut packed, 4);
        assert_eq!(
            packed,
            vec![0., 2., 4., 6., 1., 3., 5., 7., 8., 10., 12., 14., 9., 11., 13., 15.]
        );
        let mut back = vec![0f32; 16];
        blocks_to_interleaved(&packed, &mut back, 4);
        assert_eq!(back, canonical);
    }

    #[test]
    fn test_half_spectrum_round_trip() {
        let canonical = [1f32, 9., 2., 3., 4., 5., 6., 7.];
        let mut spectrum = vec![Complex::new(f32::NAN, f32::NAN); 5];
        canonical_to_half_spectrum(&canonical, &mut spectrum);
        assert_eq!(spectrum[0], Complex::new(1., 0.));
        assert_eq!(spectrum[4], Complex::new(9., 0.));
        assert_eq!(spectrum[2], Complex::new(4., 5.));
        let mut back = [0f32; 8];
        half_spectrum_to_canonical(&spectrum, &mut back);
        assert_eq!(back, canonical);
    }

    #[test]
    fn test_canonical_square_special_cases_real_pair() {
        let mut real = [2f32, 3., 1., 2.];
        canonical_square(&mut real, Domain::Real);
        assert_eq!(real, [4., 9., -3., 4.]);
        let mut complex = [2f32, 3., 1., 2.];
        canonical_square(&mut complex, Domain::Complex);
        assert_eq!(complex, [-5., 12., -3., 4.]);
    }

    #[test]
    fn test_reorder_with_checks_lengths() {
        let input = [0f32; 8];
        let mut output = [0f32; 6];
        let result = reorder_with(
            8,
            &input,
            &mut output,
            FftDirection::Forward,
            nyquist_to_front,
            nyquist_to_back,
        );
        assert!(matches!(result, Err(GaugeError::InvalidBufferLength(8, 6))));
    }
}
