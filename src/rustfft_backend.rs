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
use crate::ordering::{
    canonical_to_half_spectrum, complex_to_interleaved, half_spectrum_to_canonical,
    interleaved_to_complex, reorder_with,
};
use crate::spectrum_arithmetic::mul_accumulate_canonical;
use crate::{Domain, FftDirection, Layout};
use num_complex::Complex;
use num_traits::Zero;
use realfft::{ComplexToReal, RealFftPlanner, RealToComplex};
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

enum Kernel {
    Complex {
        forward: Arc<dyn Fft<f32>>,
        inverse: Arc<dyn Fft<f32>>,
    },
    Real {
        forward: Arc<dyn RealToComplex<f32>>,
        inverse: Arc<dyn ComplexToReal<f32>>,
    },
}

/// rustfft / realfft kernels moving data between plain time signals and canonical spectra.
///
/// Both entry points go through the same load, run and store steps on plan owned
/// buffers, which is what makes the in-place and out-of-place results identical.
pub(crate) struct KernelPlan {
    length: usize,
    domain: Domain,
    kernel: Kernel,
    spectrum: Vec<Complex<f32>>,
    samples: Vec<f32>,
    scratch: Vec<Complex<f32>>,
}

impl KernelPlan {
    pub(crate) fn new(length: usize, domain: Domain) -> Result<KernelPlan, GaugeError> {
        if length == 0 {
            return Err(GaugeError::ZeroSizedFft);
        }
        match domain {
            Domain::Complex => {
                let mut planner = FftPlanner::<f32>::new();
                let forward = planner.plan_fft_forward(length);
                let inverse = planner.plan_fft_inverse(length);
                let scratch_length = forward
                    .get_inplace_scratch_len()
                    .max(inverse.get_inplace_scratch_len());
                Ok(KernelPlan {
                    length,
                    domain,
                    kernel: Kernel::Complex { forward, inverse },
                    spectrum: try_vec![Complex::zero(); length],
                    samples: Vec::new(),
                    scratch: try_vec![Complex::zero(); scratch_length],
                })
            }
            Domain::Real => {
                if !length.is_multiple_of(2) {
                    return Err(GaugeError::Kernel(format!(
                        "real kernels need an even length, got {length}"
                    )));
                }
                let mut planner = RealFftPlanner::<f32>::new();
                let forward = planner.plan_fft_forward(length);
                let inverse = planner.plan_fft_inverse(length);
                let scratch_length = forward.get_scratch_len().max(inverse.get_scratch_len());
                Ok(KernelPlan {
                    length,
                    domain,
                    kernel: Kernel::Real { forward, inverse },
                    spectrum: try_vec![Complex::zero(); length / 2 + 1],
                    samples: try_vec![0f32; length],
                    scratch: try_vec![Complex::zero(); scratch_length],
                })
            }
        }
    }

    pub(crate) fn length(&self) -> usize {
        self.length
    }

    pub(crate) fn domain(&self) -> Domain {
        self.domain
    }

    pub(crate) fn float_count(&self) -> usize {
        self.domain.float_count(self.length)
    }

    /// Forward: time signal into canonical spectrum. Inverse: the other way around.
    pub(crate) fn execute(
        &mut self,
        src: &[f32],
        dst: &mut [f32],
        direction: FftDirection,
    ) -> Result<(), GaugeError> {
        check_length(self.float_count(), src.len())?;
        check_length(self.float_count(), dst.len())?;
        self.load(src, direction);
        self.run(direction)?;
        self.store(dst, direction);
        Ok(())
    }

    pub(crate) fn execute_in_place(
        &mut self,
        buffer: &mut [f32],
        direction: FftDirection,
    ) -> Result<(), GaugeError> {
        check_length(self.float_count(), buffer.len())?;
        self.load(buffer, direction);
        self.run(direction)?;
        self.store(buffer, direction);
        Ok(())
    }

    fn load(&mut self, src: &[f32], direction: FftDirection) {
        match (self.domain, direction) {
            (Domain::Complex, _) => interleaved_to_complex(src, &mut self.spectrum),
            (Domain::Real, FftDirection::Forward) => self.samples.copy_from_slice(src),
            (Domain::Real, FftDirection::Inverse) => {
                canonical_to_half_spectrum(src, &mut self.spectrum)
            }
        }
    }

    fn run(&mut self, direction: FftDirection) -> Result<(), GaugeError> {
        match (&self.kernel, direction) {
            (Kernel::Complex { forward, .. }, FftDirection::Forward) => {
                forward.process_with_scratch(&mut self.spectrum, &mut self.scratch);
            }
            (Kernel::Complex { inverse, .. }, FftDirection::Inverse) => {
                inverse.process_with_scratch(&mut self.spectrum, &mut self.scratch);
            }
            (Kernel::Real { forward, .. }, FftDirection::Forward) => {
                forward
                    .process_with_scratch(&mut self.samples, &mut self.spectrum, &mut self.scratch)
                    .map_err(|x| GaugeError::Kernel(x.to_string()))?;
            }
            (Kernel::Real { inverse, .. }, FftDirection::Inverse) => {
                inverse
                    .process_with_scratch(&mut self.spectrum, &mut self.samples, &mut self.scratch)
                    .map_err(|x| GaugeError::Kernel(x.to_string()))?;
            }
        }
        Ok(())
    }

    fn store(&self, dst: &mut [f32], direction: FftDirection) {
        match (self.domain, direction) {
            (Domain::Complex, _) => complex_to_interleaved(&self.spectrum, dst),
            (Domain::Real, FftDirection::Forward) => half_spectrum_to_canonical(&self.spectrum, dst),
            (Domain::Real, FftDirection::Inverse) => dst.copy_from_slice(&self.samples),
        }
    }
}

/// Plain rustfft (complex) and realfft (real) kernels, packed layout is the canonical one.
#[derive(Debug, Copy, Clone, Default)]
pub struct RustFft {}

impl RustFft {
    pub fn new() -> RustFft {
        RustFft {}
    }
}

impl FftBackend for RustFft {
    fn name(&self) -> &'static str {
        "RustFFT"
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
        tracing::debug!("planning RustFFT {} N={n}", domain.label());
        Ok(Box::new(RustFftPlan {
            kernel: KernelPlan::new(n, domain)?,
        }))
    }
}

struct RustFftPlan {
    kernel: KernelPlan,
}

impl FftPlan for RustFftPlan {
    fn length(&self) -> usize {
        self.kernel.length()
    }

    fn domain(&self) -> Domain {
        self.kernel.domain()
    }

    fn transform(
        &mut self,
        input: &[f32],
        output: &mut [f32],
        direction: FftDirection,
        _: Layout,
    ) -> Result<(), GaugeError> {
        self.kernel.execute(input, output, direction)
    }

    fn transform_in_place(
        &mut self,
        buffer: &mut [f32],
        direction: FftDirection,
        _: Layout,
    ) -> Result<(), GaugeError> {
        self.kernel.execute_in_place(buffer, direction)
    }

    fn reorder(
        &self,
        input: &[f32],
        output: &mut [f32],
        direction: FftDirection,
    ) -> Result<(), GaugeError> {
        let copy = |src: &[f32], dst: &mut [f32]| dst.copy_from_slice(src);
        reorder_with(self.float_count(), input, output, direction, copy, copy)
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
        mul_accumulate_canonical(a, b, accumulator, scale, self.domain());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_real_forward_of_impulse_is_flat() {
        let n = 32;
        let mut plan = RustFft::new().make_plan(n, Domain::Real).unwrap();
        let mut input = vec![0f32; n];
        input[0] = 1.;
        let mut output = vec![0f32; n];
        plan.forward(&input, &mut output).unwrap();
        assert_eq!(output[0], 1.);
        assert_eq!(output[1], 1.);
        for pair in output[2..].chunks_exact(2) {
            assert!((pair[0] - 1.).abs() < 1e-6);
            assert!(pair[1].abs() < 1e-6);
        }
    }

    #[test]
    fn test_complex_round_trip_scales_by_n() {
        for n in [1usize, 7, 16, 96, 1000] {
            let mut rng = rand::rng();
            let input: Vec<f32> = (0..n * 2).map(|_| rng.random()).collect();
            let mut plan = RustFft::new().make_plan(n, Domain::Complex).unwrap();
            let mut spectrum = vec![0f32; n * 2];
            let mut output = vec![0f32; n * 2];
            plan.forward(&input, &mut spectrum).unwrap();
            plan.inverse(&spectrum, &mut output).unwrap();
            for (i, (&a, &b)) in output.iter().zip(input.iter()).enumerate() {
                let recovered = a / n as f32;
                assert!(
                    (recovered - b).abs() < 1e-4,
                    "recovered {recovered} != {b} at {i} for size {n}"
                );
            }
        }
    }

    #[test]
    fn test_in_place_matches_out_of_place() {
        let n = 288;
        let mut rng = rand::rng();
        let input: Vec<f32> = (0..n).map(|_| rng.random()).collect();
        let mut plan = RustFft::new().make_plan(n, Domain::Real).unwrap();
        let mut out_of_place = vec![0f32; n];
        plan.forward(&input, &mut out_of_place).unwrap();
        let mut in_place = input.clone();
        plan.transform_in_place(&mut in_place, FftDirection::Forward, Layout::Packed)
            .unwrap();
        assert!(
            out_of_place
                .iter()
                .zip(in_place.iter())
                .all(|(a, b)| a.to_bits() == b.to_bits())
        );
    }

    #[test]
    fn test_rejects_odd_real_size() {
        assert!(!RustFft::new().supports(15, Domain::Real));
        assert!(RustFft::new().make_plan(15, Domain::Real).is_err());
    }

    #[test]
    fn test_rejects_wrong_buffer_length() {
        let mut plan = RustFft::new().make_plan(64, Domain::Complex).unwrap();
        let input = vec![0f32; 64];
        let mut output = vec![0f32; 128];
        match plan.forward(&input, &mut output) {
            Err(GaugeError::InvalidBufferLength(expected, actual)) => {
                assert_eq!(expected, 128);
                assert_eq!(actual, 64);
            }
            other => panic!("expected a length error, got {other:?}"),
        }
    }
}
