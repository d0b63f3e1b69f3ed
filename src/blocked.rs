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
//! Lane blocked backend.
//!
//! The packed layout stores the spectrum the way a 4-wide SIMD kernel wants to read it:
//! canonical pseudo-complex pairs are grouped by [`LANES`] and each group is written as
//! `[re_0, re_1, re_2, re_3, im_0, im_1, im_2, im_3]`. For a real transform pair 0 is
//! `(DC, Nyquist)`, so the two purely real coefficients live at packed offsets `0` and
//! `LANES`, and that is where [`FftPlan::convolve_accumulate`] special-cases them.
use crate::backend::{FftBackend, FftPlan};
use crate::err::{GaugeError, check_length, try_vec};
use crate::ordering::{blocks_to_interleaved, interleaved_to_blocks, reorder_with};
use crate::rustfft_backend::KernelPlan;
use crate::spectrum_arithmetic::{mul_accumulate_real, mul_accumulate_split};
use crate::{Domain, FftDirection, Layout};

/// Number of lanes in one packed block.
pub const LANES: usize = 4;

/// Backend whose packed spectra are lane blocked, named `PFFFT` in reports.
///
/// Sizes must fill whole `LANES * LANES` groups of complex values: complex transforms
/// need `N % 16 == 0`, real transforms `N % 32 == 0`.
#[derive(Debug, Copy, Clone, Default)]
pub struct BlockedFft {}

impl BlockedFft {
    pub fn new() -> BlockedFft {
        BlockedFft {}
    }
}

impl FftBackend for BlockedFft {
    fn name(&self) -> &'static str {
        "PFFFT"
    }

    fn supports(&self, n: usize, domain: Domain) -> bool {
        let group = LANES * LANES;
        match domain {
            Domain::Complex => n > 0 && n.is_multiple_of(group),
            Domain::Real => n > 0 && n.is_multiple_of(2 * group),
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
        tracing::debug!("planning PFFFT {} N={n}", domain.label());
        let kernel = KernelPlan::new(n, domain)?;
        let staging = try_vec![0f32; kernel.float_count()];
        Ok(Box::new(BlockedPlan { kernel, staging }))
    }

    fn native_vector_width(&self) -> usize {
        LANES
    }
}

struct BlockedPlan {
    kernel: KernelPlan,
    // canonical copy of a packed spectrum on its way in or out
    staging: Vec<f32>,
}

impl BlockedPlan {
    fn forward_packed(&mut self, input: &[f32], output: &mut [f32]) -> Result<(), GaugeError> {
        self.kernel
            .execute(input, &mut self.staging, FftDirection::Forward)?;
        interleaved_to_blocks(&self.staging, output, LANES);
        Ok(())
    }

    fn inverse_packed(&mut self, input: &[f32], output: &mut [f32]) -> Result<(), GaugeError> {
        blocks_to_interleaved(input, &mut self.staging, LANES);
        self.kernel
            .execute(&self.staging, output, FftDirection::Inverse)
    }
}

impl FftPlan for BlockedPlan {
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
        layout: Layout,
    ) -> Result<(), GaugeError> {
        check_length(self.float_count(), input.len())?;
        check_length(self.float_count(), output.len())?;
        match (layout, direction) {
            (Layout::Canonical, _) => self.kernel.execute(input, output, direction),
            (Layout::Packed, FftDirection::Forward) => self.forward_packed(input, output),
            (Layout::Packed, FftDirection::Inverse) => self.inverse_packed(input, output),
        }
    }

    fn transform_in_place(
        &mut self,
        buffer: &mut [f32],
        direction: FftDirection,
        layout: Layout,
    ) -> Result<(), GaugeError> {
        check_length(self.float_count(), buffer.len())?;
        match (layout, direction) {
            (Layout::Canonical, _) => self.kernel.execute_in_place(buffer, direction),
            (Layout::Packed, FftDirection::Forward) => {
                self.kernel
                    .execute(buffer, &mut self.staging, FftDirection::Forward)?;
                interleaved_to_blocks(&self.staging, buffer, LANES);
                Ok(())
            }
            (Layout::Packed, FftDirection::Inverse) => {
                blocks_to_interleaved(buffer, &mut self.staging, LANES);
                self.kernel
                    .execute(&self.staging, buffer, FftDirection::Inverse)
            }
        }
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
            |src, dst| blocks_to_interleaved(src, dst, LANES),
            |src, dst| interleaved_to_blocks(src, dst, LANES),
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
        match self.domain() {
            Domain::Complex => mul_accumulate_split(a, b, accumulator, scale, LANES),
            Domain::Real => {
                let block = LANES * 2;
                let (first_acc, rest_acc) = accumulator.split_at_mut(block);
                let (first_a, rest_a) = a.split_at(block);
                let (first_b, rest_b) = b.split_at(block);
                // DC at lane 0 of the real half, Nyquist at lane 0 of the imaginary half
                let dc = first_acc[0];
                let nyquist = first_acc[LANES];
                mul_accumulate_split(first_a, first_b, first_acc, scale, LANES);
                first_acc[0] = dc;
                first_acc[LANES] = nyquist;
                mul_accumulate_real(first_a[0], first_b[0], &mut first_acc[0], scale);
                mul_accumulate_real(
                    first_a[LANES],
                    first_b[LANES],
                    &mut first_acc[LANES],
                    scale,
                );
                mul_accumulate_split(rest_a, rest_b, rest_acc, scale, LANES);
            }
        }
        Ok(())
    }
}
