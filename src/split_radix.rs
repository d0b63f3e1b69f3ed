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
use crate::backend::{FftBackend, FftPlan};
use crate::err::{GaugeError, check_length, try_vec};
use crate::ordering::reorder_with;
use crate::spectrum_arithmetic::mul_accumulate_canonical;
use crate::util::compute_twiddle;
use crate::{Domain, FftDirection, Layout};
use num_complex::Complex;
use num_traits::Zero;

/// Conjugate pair split radix over powers of two, in double precision.
///
/// `x` is transformed in place. `scratch` must be as long as `x`, it receives the even,
/// `1 mod 4` and `3 mod 4` subsequences while `x` serves as scratch for the sub transforms.
fn split_radix_fft(x: &mut [Complex<f64>], scratch: &mut [Complex<f64>], w: &[Complex<f64>]) {
    let n = x.len();
    if n == 1 {
        return;
    }

    if n == 2 {
        let a = x[0];
        let b = x[1];
        x[0] = a + b;
        x[1] = a - b;
        return;
    }

    let n2 = n / 2;
    let n4 = n / 4;

    let (even, odd) = scratch.split_at_mut(n2);
    let (odd1, odd3) = odd.split_at_mut(n4);
    for (dst, src) in even.iter_mut().zip(x.iter().step_by(2)) {
        *dst = *src;
    }
    for (dst, src) in odd1.iter_mut().zip(x.iter().skip(1).step_by(4)) {
        *dst = *src;
    }
    for (dst, src) in odd3.iter_mut().zip(x.iter().skip(3).step_by(4)) {
        *dst = *src;
    }

    {
        let (even_scratch, odd_scratch) = x.split_at_mut(n2);
        let (odd1_scratch, odd3_scratch) = odd_scratch.split_at_mut(n4);
        split_radix_fft(even, even_scratch, w);
        split_radix_fft(odd1, odd1_scratch, w);
        split_radix_fft(odd3, odd3_scratch, w);
    }

    let stride = w.len() / n;
    for k in 0..n4 {
        let e0 = even[k];
        let e1 = even[k + n4];

        let (o1, o3) = if k == 0 {
            (odd1[0], odd3[0])
        } else {
            (odd1[k] * w[k * stride], odd3[k] * w[k * 3 * stride])
        };

        let t0 = o1 + o3;
        // -i * (o1 - o3)
        let t1 = Complex {
            re: o1.im - o3.im,
            im: o3.re - o1.re,
        };

        x[k] = e0 + t0;
        x[k + n4] = e1 + t1;
        x[k + n2] = e0 - t0;
        x[k + n2 + n4] = e1 - t1;
    }
}

/// Power of two comparator. Real transforms go through the full complex transform and
/// their packed layout is the canonical one.
#[derive(Debug, Copy, Clone, Default)]
pub struct SplitRadix {}

impl SplitRadix {
    pub fn new() -> SplitRadix {
        SplitRadix {}
    }
}

impl FftBackend for SplitRadix {
    fn name(&self) -> &'static str {
        "SplitRadix"
    }

    fn supports(&self, n: usize, domain: Domain) -> bool {
        match domain {
            Domain::Complex => n.is_power_of_two(),
            Domain::Real => n.is_power_of_two() && n >= 2,
        }
    }

    fn make_plan(&self, n: usize, domain: Domain) -> Result<Box<dyn FftPlan>, GaugeError> {
        if !self.supports(n, domain) {
            return Err(GaugeError::UnsupportedSize {
                backend: self.name(),
                n,
                domain,
            });
        }
        tracing::debug!("planning SplitRadix {} N={n}", domain.label());
        let mut twiddles = try_vec![Complex::<f64>::zero(); n];
        for (k, twiddle) in twiddles.iter_mut().enumerate() {
            *twiddle = compute_twiddle::<f64>(k, n, FftDirection::Forward);
        }
        Ok(Box::new(SplitRadixPlan {
            domain,
            twiddles,
            buffer: try_vec![Complex::<f64>::zero(); n],
            scratch: try_vec![Complex::<f64>::zero(); n],
        }))
    }
}

struct SplitRadixPlan {
    domain: Domain,
    twiddles: Vec<Complex<f64>>,
    buffer: Vec<Complex<f64>>,
    scratch: Vec<Complex<f64>>,
}

impl SplitRadixPlan {
    fn run(&mut self, direction: FftDirection) {
        match direction {
            FftDirection::Forward => {
                split_radix_fft(&mut self.buffer, &mut self.scratch, &self.twiddles);
            }
            FftDirection::Inverse => {
                // ifft(x) = conj(fft(conj(x)))
                self.buffer.iter_mut().for_each(|x| *x = x.conj());
                split_radix_fft(&mut self.buffer, &mut self.scratch, &self.twiddles);
                self.buffer.iter_mut().for_each(|x| *x = x.conj());
            }
        }
    }

    fn load(&mut self, src: &[f32], direction: FftDirection) {
        let n = self.buffer.len();
        match (self.domain, direction) {
            (Domain::Complex, _) => {
                for (dst, pair) in self.buffer.iter_mut().zip(src.chunks_exact(2)) {
                    *dst = Complex::new(pair[0] as f64, pair[1] as f64);
                }
            }
            (Domain::Real, FftDirection::Forward) => {
                for (dst, &re) in self.buffer.iter_mut().zip(src.iter()) {
                    *dst = Complex::new(re as f64, 0.);
                }
            }
            (Domain::Real, FftDirection::Inverse) => {
                let half = n / 2;
                self.buffer[0] = Complex::new(src[0] as f64, 0.);
                self.buffer[half] = Complex::new(src[1] as f64, 0.);
                for (k, pair) in src[2..].chunks_exact(2).enumerate() {
                    let bin = Complex::new(pair[0] as f64, pair[1] as f64);
                    self.buffer[k + 1] = bin;
                    self.buffer[n - k - 1] = bin.conj();
                }
            }
        }
    }

    fn store(&self, dst: &mut [f32], direction: FftDirection) {
        match (self.domain, direction) {
            (Domain::Complex, _) => {
                for (pair, src) in dst.chunks_exact_mut(2).zip(self.buffer.iter()) {
                    pair[0] = src.re as f32;
                    pair[1] = src.im as f32;
                }
            }
            (Domain::Real, FftDirection::Forward) => {
                let half = self.buffer.len() / 2;
                dst[0] = self.buffer[0].re as f32;
                dst[1] = self.buffer[half].re as f32;
                for (pair, src) in dst[2..].chunks_exact_mut(2).zip(self.buffer[1..].iter()) {
                    pair[0] = src.re as f32;
                    pair[1] = src.im as f32;
                }
            }
            (Domain::Real, FftDirection::Inverse) => {
                for (dst, src) in dst.iter_mut().zip(self.buffer.iter()) {
                    *dst = src.re as f32;
                }
            }
        }
    }
}

impl FftPlan for SplitRadixPlan {
    fn length(&self) -> usize {
        self.buffer.len()
    }

    fn domain(&self) -> Domain {
        self.domain
    }

    fn transform(
        &mut self,
        input: &[f32],
        output: &mut [f32],
        direction: FftDirection,
        _: Layout,
    ) -> Result<(), GaugeError> {
        check_length(self.float_count(), input.len())?;
        check_length(self.float_count(), output.len())?;
        self.load(input, direction);
        self.run(direction);
        self.store(output, direction);
        Ok(())
    }

    fn transform_in_place(
        &mut self,
        buffer: &mut [f32],
        direction: FftDirection,
        _: Layout,
    ) -> Result<(), GaugeError> {
        check_length(self.float_count(), buffer.len())?;
        self.load(buffer, direction);
        self.run(direction);
        self.store(buffer, direction);
        Ok(())
    }

    fn reorder(
        &self,
        input: &[f32],
        output: &mut [f32],
        direction: FftDirection,
    ) -> Result<(), GaugeError> {
        reorder_with(
            self.float_count(),
            input,
            output,
            direction,
            |src, dst| dst.copy_from_slice(src),
            |src, dst| dst.copy_from_slice(src),
        )
    }

    fn convolve_accumulate(
        &self,
        a: &[f32],
        b: &[f32],
        accumulator: &mut [f32],
        scale: f32,
    ) -> Result<(), GaugeError> {
        check_length(self.float_count(), a.len())?;
        check_length(self.float_count(), b.len())?;
        check_length(self.float_count(), accumulator.len())?;
        mul_accumulate_canonical(a, b, accumulator, scale, self.domain);
        Ok(())
    }
}
