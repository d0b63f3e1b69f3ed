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
//! Lane blocked backend with exactly one broken plan invariant, used by the failure path
//! tests of the validator and the suite.
use crate::backend::{FftBackend, FftPlan};
use crate::blocked::{BlockedFft, LANES};
use crate::err::GaugeError;
use crate::spectrum_arithmetic::mul_accumulate_split;
use crate::{Domain, FftDirection, Layout};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Fault {
    /// Adds 1000 to packed coefficient 3 of every forward transform.
    ForwardOffset,
    /// Only the in-place forward transform touches coefficient 0.
    InPlaceForward,
    /// Canonical to packed reordering is off by one at index 1.
    ReorderBack,
    /// Only the in-place inverse transform touches sample 0.
    InPlaceInverse,
    /// Both inverse entry points scale by an extra factor of 2.
    InverseScale,
    /// Convolution multiplies the real DC/Nyquist pair as if it were complex.
    PlainConvolution,
}

pub(crate) struct Faulty {
    name: &'static str,
    fault: Fault,
    inner: BlockedFft,
}

impl Faulty {
    pub(crate) fn new(fault: Fault) -> Faulty {
        Faulty::named("PFFFT", fault)
    }

    pub(crate) fn named(name: &'static str, fault: Fault) -> Faulty {
        Faulty {
            name,
            fault,
            inner: BlockedFft::new(),
        }
    }
}

impl FftBackend for Faulty {
    fn name(&self) -> &'static str {
        self.name
    }

    fn supports(&self, n: usize, domain: Domain) -> bool {
        self.inner.supports(n, domain)
    }

    fn make_plan(&self, n: usize, domain: Domain) -> Result<Box<dyn FftPlan>, GaugeError> {
        Ok(Box::new(FaultyPlan {
            fault: self.fault,
            inner: self.inner.make_plan(n, domain)?,
        }))
    }
}

struct FaultyPlan {
    fault: Fault,
    inner: Box<dyn FftPlan>,
}

impl FftPlan for FaultyPlan {
    fn length(&self) -> usize {
        self.inner.length()
    }

    fn domain(&self) -> Domain {
        self.inner.domain()
    }

    fn transform(
        &mut self,
        input: &[f32],
        output: &mut [f32],
        direction: FftDirection,
        layout: Layout,
    ) -> Result<(), GaugeError> {
        self.inner.transform(input, output, direction, layout)?;
        match (self.fault, direction) {
            (Fault::ForwardOffset, FftDirection::Forward) => output[3] += 1000.,
            (Fault::InverseScale, FftDirection::Inverse) => {
                output.iter_mut().for_each(|x| *x *= 2.)
            }
            _ => {}
        }
        Ok(())
    }

    fn transform_in_place(
        &mut self,
        buffer: &mut [f32],
        direction: FftDirection,
        layout: Layout,
    ) -> Result<(), GaugeError> {
        self.inner.transform_in_place(buffer, direction, layout)?;
        match (self.fault, direction) {
            (Fault::ForwardOffset, FftDirection::Forward) => buffer[3] += 1000.,
            (Fault::InPlaceForward, FftDirection::Forward) => buffer[0] += 1.,
            (Fault::InPlaceInverse, FftDirection::Inverse) => buffer[0] += 1.,
            (Fault::InverseScale, FftDirection::Inverse) => {
                buffer.iter_mut().for_each(|x| *x *= 2.)
            }
            _ => {}
        }
        Ok(())
    }

    fn reorder(
        &self,
        input: &[f32],
        output: &mut [f32],
        direction: FftDirection,
    ) -> Result<(), GaugeError> {
        self.inner.reorder(input, output, direction)?;
        if self.fault == Fault::ReorderBack && direction == FftDirection::Inverse {
            output[1] += 1.;
        }
        Ok(())
    }

    fn convolve_accumulate(
        &self,
        a: &[f32],
        b: &[f32],
        accumulator: &mut [f32],
        scale: f32,
    ) -> Result<(), GaugeError> {
        if self.fault == Fault::PlainConvolution {
            mul_accumulate_split(a, b, accumulator, scale, LANES);
            return Ok(());
        }
        self.inner.convolve_accumulate(a, b, accumulator, scale)
    }
}
