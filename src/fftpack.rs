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
//! Scalar double precision reference backend using FFTPACK coefficient order.
//!
//! Real spectra are stored half complex, `[DC, re1, im1, .., re(N/2-1), im(N/2-1), Nyquist]`.
//! The validator runs this backend once per size to obtain the expected spectrum.
use crate::backend::{FftBackend, FftPlan, IterationScaling};
use crate::err::{GaugeError, check_length, try_vec};
use crate::ordering::{nyquist_to_back, nyquist_to_front, nyquist_to_front_in_place, reorder_with};
use crate::spectrum_arithmetic::mul_accumulate_fftpack;
use crate::util::{compute_twiddle, prime_factors};
use crate::{Domain, FftDirection, Layout};
use num_complex::Complex;
use num_traits::Zero;

/// Recursive decimation in time over the prime factorization of `N`.
pub(crate) struct MixedRadix {
    factors: Vec<usize>,
    twiddles: Vec<Complex<f64>>,
    scratch: Vec<Complex<f64>>,
}

impl MixedRadix {
    pub(crate) fn new(length: usize) -> Result<MixedRadix, GaugeError> {
        if length == 0 {
            return Err(GaugeError::ZeroSizedFft);
        }
        let factors = prime_factors(length);
        let largest = factors.iter().copied().max().unwrap_or(1);
        let mut twiddles = try_vec![Complex::<f64>::zero(); length];
        for (k, twiddle) in twiddles.iter_mut().enumerate() {
            *twiddle = compute_twiddle::<f64>(k, length, FftDirection::Forward);
        }
        let scratch = try_vec![Complex::<f64>::zero(); largest];
        Ok(MixedRadix {
            factors,
            twiddles,
            scratch,
        })
    }

    pub(crate) fn length(&self) -> usize {
        self.twiddles.len()
    }

    pub(crate) fn process(
        &mut self,
        input: &[Complex<f64>],
        output: &mut [Complex<f64>],
        direction: FftDirection,
    ) {
        decimate(
            input,
            1,
            output,
            &self.factors,
            &self.twiddles,
            direction,
            &mut self.scratch,
        );
    }
}

fn decimate(
    input: &[Complex<f64>],
    stride: usize,
    output: &mut [Complex<f64>],
    factors: &[usize],
    twiddles: &[Complex<f64>],
    direction: FftDirection,
    scratch: &mut [Complex<f64>],
) {
    let Some((&radix, rest)) = factors.split_first() else {
        output[0] = input[0];
        return;
    };
    let m = output.len();
    let sub = m / radix;
    for (q, chunk) in output.chunks_exact_mut(sub).enumerate() {
        decimate(
            &input[q * stride..],
            stride * radix,
            chunk,
            rest,
            twiddles,
            direction,
            scratch,
        );
    }

    let n = twiddles.len();
    let step = n / m;
    for k in 0..sub {
        for (q, dst) in scratch[..radix].iter_mut().enumerate() {
            *dst = output[q * sub + k];
        }
        for r in 0..radix {
            let j = k + r * sub;
            let mut acc = Complex::<f64>::zero();
            for (q, &y) in scratch[..radix].iter().enumerate() {
                let w = twiddles[(q * j * step) % n];
                let w = match direction {
                    FftDirection::Forward => w,
                    FftDirection::Inverse => w.conj(),
                };
                acc += y * w;
            }
            output[j] = acc;
        }
    }
}

/// The scalar FFTPACK comparator. It supports any size, real transforms need an even one.
#[derive(Debug, Copy, Clone, Default)]
pub struct Fftpack {}

impl Fftpack {
    pub fn new() -> Fftpack {
        Fftpack {}
    }
}

impl FftBackend for Fftpack {
    fn name(&self) -> &'static str {
        "FFTPACK"
    }

    fn supports(&self, n: usize, domain: Domain) -> bool {
        match domain {
            Domain::Complex => n > 0,
            Domain::Real => n > 0 && n.is_multiple_of(2),
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
        tracing::debug!("planning FFTPACK {} N={n}", domain.label());
        Ok(Box::new(FftpackPlan::new(n, domain)?))
    }

    fn iteration_scaling(&self) -> IterationScaling {
        IterationScaling::PerVectorLane
    }
}

struct FftpackPlan {
    domain: Domain,
    kernel: MixedRadix,
    time: Vec<Complex<f64>>,
    frequency: Vec<Complex<f64>>,
    // FFTPACK ordered copy used by the canonical entry points
    staging: Vec<f32>,
}

impl FftpackPlan {
    fn new(length: usize, domain: Domain) -> Result<FftpackPlan, GaugeError> {
        let kernel = MixedRadix::new(length)?;
        Ok(FftpackPlan {
            domain,
            kernel,
            time: try_vec![Complex::<f64>::zero(); length],
            frequency: try_vec![Complex::<f64>::zero(); length],
            staging: try_vec![0f32; domain.float_count(length)],
        })
    }

    fn load_time(&mut self, src: &[f32]) {
        match self.domain {
            Domain::Complex => {
                for (dst, pair) in self.time.iter_mut().zip(src.chunks_exact(2)) {
                    *dst = Complex::new(pair[0] as f64, pair[1] as f64);
                }
            }
            Domain::Real => {
                for (dst, &re) in self.time.iter_mut().zip(src.iter()) {
                    *dst = Complex::new(re as f64, 0.);
                }
            }
        }
    }

    fn store_time(&self, dst: &mut [f32]) {
        match self.domain {
            Domain::Complex => {
                for (pair, src) in dst.chunks_exact_mut(2).zip(self.time.iter()) {
                    pair[0] = src.re as f32;
                    pair[1] = src.im as f32;
                }
            }
            Domain::Real => {
                for (dst, src) in dst.iter_mut().zip(self.time.iter()) {
                    *dst = src.re as f32;
                }
            }
        }
    }

    /// Expands a half complex spectrum into the full Hermitian one.
    fn load_frequency(&mut self, src: &[f32]) {
        match self.domain {
            Domain::Complex => {
                for (dst, pair) in self.frequency.iter_mut().zip(src.chunks_exact(2)) {
                    *dst = Complex::new(pair[0] as f64, pair[1] as f64);
                }
            }
            Domain::Real => {
                let n = src.len();
                let half = n / 2;
                self.frequency[0] = Complex::new(src[0] as f64, 0.);
                self.frequency[half] = Complex::new(src[n - 1] as f64, 0.);
                for (k, pair) in src[1..n - 1].chunks_exact(2).enumerate() {
                    let bin = Complex::new(pair[0] as f64, pair[1] as f64);
                    self.frequency[k + 1] = bin;
                    self.frequency[n - k - 1] = bin.conj();
                }
            }
        }
    }

    fn store_frequency(&self, dst: &mut [f32]) {
        match self.domain {
            Domain::Complex => {
                for (pair, src) in dst.chunks_exact_mut(2).zip(self.frequency.iter()) {
                    pair[0] = src.re as f32;
                    pair[1] = src.im as f32;
                }
            }
            Domain::Real => {
                let n = dst.len();
                dst[0] = self.frequency[0].re as f32;
                dst[n - 1] = self.frequency[n / 2].re as f32;
                for (pair, src) in dst[1..n - 1]
                    .chunks_exact_mut(2)
                    .zip(self.frequency[1..].iter())
                {
                    pair[0] = src.re as f32;
                    pair[1] = src.im as f32;
                }
            }
        }
    }

    /// FFTPACK ordered transform, `dst` may not alias `src`.
    fn execute(&mut self, src: &[f32], dst: &mut [f32], direction: FftDirection) {
        match direction {
            FftDirection::Forward => {
                self.load_time(src);
                self.kernel
                    .process(&self.time, &mut self.frequency, FftDirection::Forward);
                self.store_frequency(dst);
            }
            FftDirection::Inverse => {
                self.load_frequency(src);
                self.kernel
                    .process(&self.frequency, &mut self.time, FftDirection::Inverse);
                self.store_time(dst);
            }
        }
    }

    fn execute_in_place(&mut self, buffer: &mut [f32], direction: FftDirection) {
        // input is fully loaded into the f64 buffers before anything is stored
        match direction {
            FftDirection::Forward => {
                self.load_time(buffer);
                self.kernel
                    .process(&self.time, &mut self.frequency, FftDirection::Forward);
                self.store_frequency(buffer);
            }
            FftDirection::Inverse => {
                self.load_frequency(buffer);
                self.kernel
                    .process(&self.frequency, &mut self.time, FftDirection::Inverse);
                self.store_time(buffer);
            }
        }
    }
}

impl FftPlan for FftpackPlan {
    fn length(&self) -> usize {
        self.kernel.length()
    }

    fn domain(&self) -> Domain {
        self.domain
    }

    fn transform(
        &mut self,
        input: &[f32],
        output: &mut [f32],
        direction: FftDirection,
        layout: Layout,
    ) -> Result<(), GaugeError> {
        check_length(self.float_count(), input.len())?;
        check_length(self.float_count(), output.len())?;
        if layout == Layout::Packed || self.domain == Domain::Complex {
            self.execute(input, output, direction);
            return Ok(());
        }
        let mut staging = std::mem::take(&mut self.staging);
        match direction {
            FftDirection::Forward => {
                self.execute(input, &mut staging, direction);
                nyquist_to_front(&staging, output);
            }
            FftDirection::Inverse => {
                nyquist_to_back(input, &mut staging);
                self.execute(&staging, output, direction);
            }
        }
        self.staging = staging;
        Ok(())
    }

    fn transform_in_place(
        &mut self,
        buffer: &mut [f32],
        direction: FftDirection,
        layout: Layout,
    ) -> Result<(), GaugeError> {
        check_length(self.float_count(), buffer.len())?;
        if layout == Layout::Packed || self.domain == Domain::Complex {
            self.execute_in_place(buffer, direction);
            return Ok(());
        }
        match direction {
            FftDirection::Forward => {
                self.execute_in_place(buffer, direction);
                nyquist_to_front_in_place(buffer);
            }
            FftDirection::Inverse => {
                if buffer.len() > 2 {
                    buffer[1..].rotate_left(1);
                }
                self.execute_in_place(buffer, direction);
            }
        }
        Ok(())
    }

    fn reorder(
        &self,
        input: &[f32],
        output: &mut [f32],
        direction: FftDirection,
    ) -> Result<(), GaugeError> {
        match self.domain {
            Domain::Complex => reorder_with(
                self.float_count(),
                input,
                output,
                direction,
                |src, dst| dst.copy_from_slice(src),
                |src, dst| dst.copy_from_slice(src),
            ),
            Domain::Real => reorder_with(
                self.float_count(),
                input,
                output,
                direction,
                nyquist_to_front,
                nyquist_to_back,
            ),
        }
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
        mul_accumulate_fftpack(a, b, accumulator, scale, self.domain);
        Ok(())
    }
}

/// Expected spectrum of a validation run, in canonical layout.
///
/// Computes the FFTPACK forward transform and, for real input, moves the Nyquist
/// coefficient from the end to index 1.
pub struct ReferenceTransform {
    plan: FftpackPlan,
}

impl ReferenceTransform {
    pub fn new(n: usize, domain: Domain) -> Result<ReferenceTransform, GaugeError> {
        let backend = Fftpack::new();
        if !backend.supports(n, domain) {
            return Err(GaugeError::UnsupportedSize {
                backend: backend.name(),
                n,
                domain,
            });
        }
        Ok(ReferenceTransform {
            plan: FftpackPlan::new(n, domain)?,
        })
    }

    /// Replaces the time domain `buffer` with its canonical spectrum.
    pub fn forward_in_place(&mut self, buffer: &mut [f32]) -> Result<(), GaugeError> {
        self.plan
            .transform_in_place(buffer, FftDirection::Forward, Layout::Canonical)
    }
}
