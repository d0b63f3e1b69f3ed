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
use crate::err::{GaugeError, try_vec};
use crate::fftpack::ReferenceTransform;
use crate::ordering::canonical_square;
use crate::signal::SignalSource;
use crate::util::{first_bit_difference, max_magnitude};
use crate::{Domain, FftDirection, Layout};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Absolute error bound derived from the largest reference coefficient.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tolerance {
    bound: f64,
}

impl Tolerance {
    /// Fraction of `max |reference|` a coefficient may be off by.
    pub const RELATIVE: f64 = 1e-3;

    pub fn from_reference(reference: &[f32]) -> Tolerance {
        Tolerance {
            bound: Self::RELATIVE * max_magnitude(reference) as f64,
        }
    }

    pub fn bound(&self) -> f64 {
        self.bound
    }

    /// Strict comparison, a NaN difference is never accepted.
    pub fn accepts(&self, expected: f32, actual: f32) -> bool {
        ((expected - actual).abs() as f64) < self.bound
    }

    /// Index of the first coefficient outside the bound.
    pub fn first_violation(&self, expected: &[f32], actual: &[f32]) -> Option<usize> {
        expected
            .iter()
            .zip(actual.iter())
            .position(|(&e, &a)| !self.accepts(e, a))
    }
}

/// One step of a validation run.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Check {
    /// In place forward transform differs from the out of place one.
    ForwardAliasing,
    /// Packed to canonical and back is not the identity.
    ReorderInvolution,
    /// Forward output disagrees with the reference spectrum.
    ForwardAccuracy,
    /// In place inverse transform differs from the out of place one.
    InverseAliasing,
    /// `inverse(forward(x)) / N` does not recover `x`.
    InverseRecovery,
    /// Spectral multiply-accumulate disagrees with the canonical pointwise product.
    Convolution,
}

impl Display for Check {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Check::ForwardAliasing => "in-place forward",
            Check::ReorderInvolution => "reorder",
            Check::ForwardAccuracy => "forward",
            Check::InverseAliasing => "in-place inverse",
            Check::InverseRecovery => "inverse",
            Check::Convolution => "convolution",
        })
    }
}

#[derive(Clone, Debug)]
pub enum ValidationError {
    Mismatch {
        check: Check,
        backend: &'static str,
        domain: Domain,
        n: usize,
        layout: Layout,
        index: usize,
    },
    /// The backend failed to plan, allocate or execute.
    Backend {
        backend: &'static str,
        domain: Domain,
        n: usize,
        source: GaugeError,
    },
}

impl ValidationError {
    /// The failed check, `None` when the backend itself errored.
    pub fn check(&self) -> Option<Check> {
        match self {
            ValidationError::Mismatch { check, .. } => Some(*check),
            ValidationError::Backend { .. } => None,
        }
    }
}

impl Error for ValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ValidationError::Mismatch { .. } => None,
            ValidationError::Backend { source, .. } => Some(source),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Mismatch {
                check,
                backend,
                domain,
                n,
                layout,
                index,
            } => f.write_fmt(format_args!(
                "{domain} {check} {backend} mismatch found for N={n} ({layout} layout, index {index})"
            )),
            ValidationError::Backend {
                backend,
                domain,
                n,
                source,
            } => f.write_fmt(format_args!(
                "{domain} {backend} failed for N={n}: {source}"
            )),
        }
    }
}

/// Successful validation of one backend at one size.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Validated {
    pub backend: &'static str,
    pub domain: Domain,
    pub n: usize,
}

impl Display for Validated {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "{} {} is OK for N={}",
            self.domain, self.backend, self.n
        ))
    }
}

/// Checks a backend against the double precision reference, in packed then canonical
/// layout, including aliasing, reorder and convolution invariants.
pub struct RoundTripValidator<S: SignalSource> {
    signal: S,
}

struct Buffers {
    input: Vec<f32>,
    reference: Vec<f32>,
    out: Vec<f32>,
    tmp: Vec<f32>,
    tmp2: Vec<f32>,
}

impl<S: SignalSource> RoundTripValidator<S> {
    pub fn new(signal: S) -> RoundTripValidator<S> {
        RoundTripValidator { signal }
    }

    pub fn validate(
        &mut self,
        backend: &dyn FftBackend,
        n: usize,
        domain: Domain,
    ) -> Result<Validated, ValidationError> {
        let backend_error = |source: GaugeError| ValidationError::Backend {
            backend: backend.name(),
            domain,
            n,
            source,
        };
        if !backend.supports(n, domain) {
            return Err(backend_error(GaugeError::UnsupportedSize {
                backend: backend.name(),
                n,
                domain,
            }));
        }
        let (mut plan, mut buffers) = self.prepare(backend, n, domain).map_err(backend_error)?;
        let tolerance = Tolerance::from_reference(&buffers.reference);

        for layout in [Layout::Packed, Layout::Canonical] {
            run_layout(plan.as_mut(), &mut buffers, layout, tolerance, n).map_err(|failure| {
                match failure {
                    Failure::At(check, index) => ValidationError::Mismatch {
                        check,
                        backend: backend.name(),
                        domain,
                        n,
                        layout,
                        index,
                    },
                    Failure::Backend(source) => backend_error(source),
                }
            })?;
        }

        let verdict = Validated {
            backend: backend.name(),
            domain,
            n,
        };
        tracing::info!("{verdict}");
        Ok(verdict)
    }

    /// Plan, input signal, reference spectrum and work buffers of one run.
    fn prepare(
        &mut self,
        backend: &dyn FftBackend,
        n: usize,
        domain: Domain,
    ) -> Result<(Box<dyn FftPlan>, Buffers), GaugeError> {
        let plan = backend.make_plan(n, domain)?;
        let float_count = domain.float_count(n);

        let mut input = try_vec![0f32; float_count];
        self.signal.fill(&mut input);
        let mut reference = try_vec![0f32; float_count];
        reference.copy_from_slice(&input);
        ReferenceTransform::new(n, domain)?.forward_in_place(&mut reference)?;

        let buffers = Buffers {
            input,
            reference,
            out: try_vec![1e30f32; float_count],
            tmp: try_vec![0f32; float_count],
            tmp2: try_vec![0f32; float_count],
        };
        Ok((plan, buffers))
    }
}

enum Failure {
    At(Check, usize),
    Backend(GaugeError),
}

impl From<GaugeError> for Failure {
    fn from(value: GaugeError) -> Self {
        Failure::Backend(value)
    }
}

fn bit_exact(check: Check, expected: &[f32], actual: &[f32]) -> Result<(), Failure> {
    match first_bit_difference(expected, actual) {
        Some(index) => Err(Failure::At(check, index)),
        None => Ok(()),
    }
}

fn within(
    check: Check,
    tolerance: Tolerance,
    expected: &[f32],
    actual: &[f32],
) -> Result<(), Failure> {
    match tolerance.first_violation(expected, actual) {
        Some(index) => Err(Failure::At(check, index)),
        None => Ok(()),
    }
}

fn run_layout(
    plan: &mut dyn FftPlan,
    buffers: &mut Buffers,
    layout: Layout,
    tolerance: Tolerance,
    n: usize,
) -> Result<(), Failure> {
    let Buffers {
        input,
        reference,
        out,
        tmp,
        tmp2,
    } = buffers;

    plan.transform(input, tmp, FftDirection::Forward, layout)?;
    tmp2.copy_from_slice(tmp);
    tmp.copy_from_slice(input);
    plan.transform_in_place(tmp, FftDirection::Forward, layout)?;
    bit_exact(Check::ForwardAliasing, tmp2, tmp)?;

    match layout {
        Layout::Packed => {
            plan.reorder(tmp, out, FftDirection::Forward)?;
            plan.reorder(out, tmp, FftDirection::Inverse)?;
            bit_exact(Check::ReorderInvolution, tmp2, tmp)?;
            plan.reorder(tmp, out, FftDirection::Forward)?;
        }
        Layout::Canonical => out.copy_from_slice(tmp),
    }
    within(Check::ForwardAccuracy, tolerance, reference, out)?;

    plan.transform(tmp, out, FftDirection::Inverse, layout)?;
    tmp2.copy_from_slice(out);
    out.copy_from_slice(tmp);
    plan.transform_in_place(out, FftDirection::Inverse, layout)?;
    bit_exact(Check::InverseAliasing, tmp2, out)?;
    let scale = 1f32 / n as f32;
    out.iter_mut().for_each(|x| *x *= scale);
    within(Check::InverseRecovery, tolerance, input, out)?;

    // reference spectrum read as if it were packed
    plan.reorder(reference, tmp, FftDirection::Forward)?;
    out.fill(0.);
    plan.convolve_accumulate(reference, reference, out, 1.)?;
    plan.reorder(out, tmp2, FftDirection::Forward)?;
    canonical_square(tmp, plan.domain());
    within(Check::Convolution, tolerance, tmp, tmp2)
}
