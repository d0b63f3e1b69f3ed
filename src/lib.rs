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
//! Correctness gate and throughput benchmark for single precision FFT backends.
//!
//! A backend is anything implementing [`FftBackend`]: it hands out [`FftPlan`]s bound to a
//! fixed size and [`Domain`]. The [`RoundTripValidator`] checks a plan against the scalar
//! FFTPACK-ordered reference in both coefficient layouts, and the [`BenchmarkRunner`] times
//! forward + inverse cycles across every backend of a [`BackendRegistry`].
//!
//! ```no_run
//! use fftgauge::{BackendRegistry, Domain, RoundTripValidator, SeededSignal};
//!
//! let registry = BackendRegistry::with_defaults();
//! let mut validator = RoundTripValidator::new(SeededSignal::new(1));
//! if let Some(backend) = registry.primary() {
//!     match validator.validate(backend, 64, Domain::Real) {
//!         Ok(verdict) => println!("{verdict}"),
//!         Err(err) => eprintln!("{err}"),
//!     }
//! }
//! ```
#![forbid(unsafe_code)]
mod backend;
mod bench;
mod blocked;
mod clock;
mod err;
#[cfg(test)]
mod faulty;
mod fftpack;
mod ordering;
mod rustfft_backend;
mod signal;
mod spectrum_arithmetic;
mod split_radix;
mod suite;
mod util;
mod validate;

pub use backend::{BackendRegistry, FftBackend, FftPlan, IterationScaling};
pub use bench::{BenchOutcome, BenchResult, BenchmarkConfig, BenchmarkRunner};
pub use blocked::{BlockedFft, LANES};
pub use clock::{Clock, MonotonicClock};
pub use err::GaugeError;
pub use fftpack::{Fftpack, ReferenceTransform};
pub use rustfft_backend::RustFft;
pub use signal::{DEFAULT_SEED, SeededSignal, SignalSource};
pub use split_radix::SplitRadix;
pub use suite::{
    FailurePolicy, Suite, SuiteReport, VALIDATION_SIZES, benchmark_sizes, validation_sizes,
};
pub use validate::{Check, RoundTripValidator, Tolerance, Validated, ValidationError};

use std::fmt::{Display, Formatter};

/// Kind of signal a plan transforms.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum Domain {
    /// `N` real samples in, `N/2 + 1` bins packed into `N` floats out.
    Real,
    /// `N` interleaved complex samples, `2N` floats.
    Complex,
}

impl Domain {
    /// Label used by every report line.
    pub fn label(self) -> &'static str {
        match self {
            Domain::Real => "REAL",
            Domain::Complex => "CPLX",
        }
    }

    /// Number of floats a buffer of `n` samples occupies.
    pub fn float_count(self, n: usize) -> usize {
        match self {
            Domain::Real => n,
            Domain::Complex => n * 2,
        }
    }

    /// Operation count factor of the usual `c * N * log2(N)` FFT estimate.
    pub(crate) fn flop_factor(self) -> f64 {
        match self {
            Domain::Real => 2.5,
            Domain::Complex => 5.,
        }
    }
}

impl Display for Domain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum FftDirection {
    Forward,
    Inverse,
}

/// Coefficient ordering of a spectrum buffer.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum Layout {
    /// Backend chosen ordering, the one its kernels and convolution work in.
    Packed,
    /// `[DC, Nyquist, re1, im1, ...]` for real transforms,
    /// `[re0, im0, re1, im1, ...]` for complex ones.
    Canonical,
}

impl Display for Layout {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Layout::Packed => f.write_str("packed"),
            Layout::Canonical => f.write_str("canonical"),
        }
    }
}
