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
use crate::blocked::BlockedFft;
use crate::err::GaugeError;
use crate::fftpack::Fftpack;
use crate::rustfft_backend::RustFft;
use crate::split_radix::SplitRadix;
use crate::{Domain, FftDirection, Layout};

/// How a backend's share of the benchmark iteration budget is computed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum IterationScaling {
    /// Runs the full budget.
    Full,
    /// Scalar backend, runs the budget divided by the lane count of the primary backend.
    PerVectorLane,
}

/// A family of FFT implementations able to hand out size bound plans.
pub trait FftBackend {
    fn name(&self) -> &'static str;

    /// Whether [`FftBackend::make_plan`] accepts this size and domain.
    fn supports(&self, n: usize, domain: Domain) -> bool;

    /// Builds a plan owning every table and scratch buffer the transform needs.
    /// Dropping the plan releases them.
    fn make_plan(&self, n: usize, domain: Domain) -> Result<Box<dyn FftPlan>, GaugeError>;

    /// Lanes the backend processes per vector instruction.
    fn native_vector_width(&self) -> usize {
        1
    }

    fn iteration_scaling(&self) -> IterationScaling {
        IterationScaling::Full
    }
}

/// Transform bound to one `(N, Domain)` pair.
///
/// Time domain buffers are always plain (`N` reals or `N` interleaved complex values).
/// Spectrum buffers use the requested [`Layout`]. Inverse transforms are not normalized:
/// `inverse(forward(x)) == N * x`.
pub trait FftPlan {
    fn length(&self) -> usize;

    fn domain(&self) -> Domain;

    fn float_count(&self) -> usize {
        self.domain().float_count(self.length())
    }

    /// Out of place transform, `input` is left untouched.
    fn transform(
        &mut self,
        input: &[f32],
        output: &mut [f32],
        direction: FftDirection,
        layout: Layout,
    ) -> Result<(), GaugeError>;

    /// Same transform with input and output sharing storage.
    /// Must give bit identical results to [`FftPlan::transform`].
    fn transform_in_place(
        &mut self,
        buffer: &mut [f32],
        direction: FftDirection,
        layout: Layout,
    ) -> Result<(), GaugeError>;

    /// Pure permutation between layouts. [`FftDirection::Forward`] goes packed to canonical.
    fn reorder(
        &self,
        input: &[f32],
        output: &mut [f32],
        direction: FftDirection,
    ) -> Result<(), GaugeError>;

    /// `accumulator += scale * (a * b)` on packed spectra.
    ///
    /// For real transforms the DC and Nyquist coefficients are real and are multiplied
    /// as independent reals rather than as a complex pair.
    fn convolve_accumulate(
        &self,
        a: &[f32],
        b: &[f32],
        accumulator: &mut [f32],
        scale: f32,
    ) -> Result<(), GaugeError>;

    fn forward(&mut self, input: &[f32], output: &mut [f32]) -> Result<(), GaugeError> {
        self.transform(input, output, FftDirection::Forward, Layout::Packed)
    }

    fn inverse(&mut self, input: &[f32], output: &mut [f32]) -> Result<(), GaugeError> {
        self.transform(input, output, FftDirection::Inverse, Layout::Packed)
    }

    fn forward_ordered(&mut self, input: &[f32], output: &mut [f32]) -> Result<(), GaugeError> {
        self.transform(input, output, FftDirection::Forward, Layout::Canonical)
    }

    fn inverse_ordered(&mut self, input: &[f32], output: &mut [f32]) -> Result<(), GaugeError> {
        self.transform(input, output, FftDirection::Inverse, Layout::Canonical)
    }

    fn forward_in_place(&mut self, buffer: &mut [f32]) -> Result<(), GaugeError> {
        self.transform_in_place(buffer, FftDirection::Forward, Layout::Packed)
    }

    fn inverse_in_place(&mut self, buffer: &mut [f32]) -> Result<(), GaugeError> {
        self.transform_in_place(buffer, FftDirection::Inverse, Layout::Packed)
    }

    fn forward_ordered_in_place(&mut self, buffer: &mut [f32]) -> Result<(), GaugeError> {
        self.transform_in_place(buffer, FftDirection::Forward, Layout::Canonical)
    }

    fn inverse_ordered_in_place(&mut self, buffer: &mut [f32]) -> Result<(), GaugeError> {
        self.transform_in_place(buffer, FftDirection::Inverse, Layout::Canonical)
    }
}

/// Set of backends assembled at startup. The first one is the primary backend, the
/// one under test and the one whose lane count scales scalar benchmark budgets.
pub struct BackendRegistry {
    backends: Vec<Box<dyn FftBackend>>,
}

impl BackendRegistry {
    pub fn new() -> BackendRegistry {
        BackendRegistry {
            backends: Vec::new(),
        }
    }

    /// Every backend built into the crate, the lane blocked one first.
    pub fn with_defaults() -> BackendRegistry {
        let mut registry = BackendRegistry::new();
        registry.register(Box::new(BlockedFft::new()));
        registry.register(Box::new(Fftpack::new()));
        registry.register(Box::new(RustFft::new()));
        registry.register(Box::new(SplitRadix::new()));
        registry
    }

    pub fn register(&mut self, backend: Box<dyn FftBackend>) {
        tracing::debug!("registered FFT backend {}", backend.name());
        self.backends.push(backend);
    }

    /// Keeps only the named backends, in the requested order. Names are case insensitive.
    pub fn select<S: AsRef<str>>(mut self, names: &[S]) -> Result<BackendRegistry, GaugeError> {
        let mut selected = BackendRegistry::new();
        for name in names {
            let name = name.as_ref();
            let position = self
                .backends
                .iter()
                .position(|x| x.name().eq_ignore_ascii_case(name))
                .ok_or_else(|| GaugeError::UnknownBackend(name.to_string()))?;
            selected.register(self.backends.remove(position));
        }
        Ok(selected)
    }

    pub fn get(&self, name: &str) -> Option<&dyn FftBackend> {
        self.backends
            .iter()
            .find(|x| x.name().eq_ignore_ascii_case(name))
            .map(|x| x.as_ref())
    }

    pub fn primary(&self) -> Option<&dyn FftBackend> {
        self.backends.first().map(|x| x.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn FftBackend> {
        self.backends.iter().map(|x| x.as_ref())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.backends.iter().map(|x| x.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        BackendRegistry::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_default_registry_order() {
        let registry = BackendRegistry::with_defaults();
        assert_eq!(
            registry.names(),
            vec!["PFFFT", "FFTPACK", "RustFFT", "SplitRadix"]
        );
        assert_eq!(registry.primary().map(|x| x.name()), Some("PFFFT"));
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_select_is_case_insensitive_and_ordered() {
        let registry = BackendRegistry::with_defaults()
            .select(&["rustfft", "pffft"])
            .unwrap();
        assert_eq!(registry.names(), vec!["RustFFT", "PFFFT"]);
        assert_eq!(registry.primary().map(|x| x.name()), Some("RustFFT"));
    }

    #[test]
    fn test_select_unknown_backend() {
        match BackendRegistry::with_defaults().select(&["fftw"]) {
            Err(GaugeError::UnknownBackend(name)) => assert_eq!(name, "fftw"),
            Err(err) => panic!("unexpected error {err}"),
            Ok(_) => panic!("fftw must not be registered"),
        }
    }

    #[test]
    fn test_plans_report_their_shape() {
        let registry = BackendRegistry::with_defaults();
        for backend in registry.iter() {
            for (n, domain) in [(64, Domain::Real), (128, Domain::Complex)] {
                assert!(backend.supports(n, domain), "{} {domain} {n}", backend.name());
                let plan = backend.make_plan(n, domain).unwrap();
                assert_eq!(plan.length(), n);
                assert_eq!(plan.domain(), domain);
                assert_eq!(plan.float_count(), domain.float_count(n));
            }
        }
    }

    #[test]
    fn test_size_restrictions() {
        let registry = BackendRegistry::with_defaults();
        let pffft = registry.get("PFFFT").unwrap();
        assert!(pffft.supports(16, Domain::Complex));
        assert!(!pffft.supports(16, Domain::Real));
        assert!(pffft.supports(96, Domain::Real));
        assert!(!pffft.supports(40, Domain::Complex));
        let split = registry.get("SplitRadix").unwrap();
        assert!(split.supports(4096, Domain::Real));
        assert!(!split.supports(96, Domain::Complex));
        assert!(split.make_plan(96, Domain::Complex).is_err());
    }

    #[test]
    fn test_shorthands_match_explicit_transforms() {
        let registry = BackendRegistry::with_defaults();
        let mut rng = rand::rng();
        for backend in registry.iter() {
            for domain in [Domain::Real, Domain::Complex] {
                let mut plan = backend.make_plan(64, domain).unwrap();
                let input: Vec<f32> = (0..plan.float_count())
                    .map(|_| rng.random_range(-1f32..1f32))
                    .collect();
                for layout in [Layout::Packed, Layout::Canonical] {
                    for direction in [FftDirection::Forward, FftDirection::Inverse] {
                        let mut expected = vec![0f32; input.len()];
                        plan.transform(&input, &mut expected, direction, layout)
                            .unwrap();

                        let mut output = vec![0f32; input.len()];
                        let mut buffer = input.clone();
                        match (layout, direction) {
                            (Layout::Packed, FftDirection::Forward) => {
                                plan.forward(&input, &mut output).unwrap();
                                plan.forward_in_place(&mut buffer).unwrap();
                            }
                            (Layout::Packed, FftDirection::Inverse) => {
                                plan.inverse(&input, &mut output).unwrap();
                                plan.inverse_in_place(&mut buffer).unwrap();
                            }
                            (Layout::Canonical, FftDirection::Forward) => {
                                plan.forward_ordered(&input, &mut output).unwrap();
                                plan.forward_ordered_in_place(&mut buffer).unwrap();
                            }
                            (Layout::Canonical, FftDirection::Inverse) => {
                                plan.inverse_ordered(&input, &mut output).unwrap();
                                plan.inverse_ordered_in_place(&mut buffer).unwrap();
                            }
                        }
                        let tag = format!("{} {domain} {layout:?} {direction:?}", backend.name());
                        assert!(
                            expected.iter().zip(&output).all(|(a, b)| a.to_bits() == b.to_bits()),
                            "{tag} out of place"
                        );
                        assert!(
                            expected.iter().zip(&buffer).all(|(a, b)| a.to_bits() == b.to_bits()),
                            "{tag} in place"
                        );
                    }
                }
            }
        }
    }
}
