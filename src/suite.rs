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
//! Orchestration of validation and benchmark passes over size lists.
use crate::Domain;
use crate::backend::BackendRegistry;
use crate::bench::{BenchOutcome, BenchmarkConfig, BenchmarkRunner};
use crate::clock::Clock;
use crate::err::GaugeError;
use crate::signal::SignalSource;
use crate::validate::{RoundTripValidator, ValidationError};
use std::io::Write;

/// Sizes every backend is validated at. Real transforms skip the first one.
pub const VALIDATION_SIZES: [usize; 17] = [
    16, 32, 64, 96, 128, 192, 256, 288, 384, 512, 576, 864, 1024, 2048, 2592, 4096, 36864,
];

pub fn validation_sizes(domain: Domain) -> &'static [usize] {
    match domain {
        Domain::Real => &VALIDATION_SIZES[1..],
        Domain::Complex => &VALIDATION_SIZES,
    }
}

/// `64, 128, .., 8192` then `65536, 524288, 4194304`.
pub fn benchmark_sizes() -> Vec<usize> {
    let mut sizes = Vec::new();
    let mut n = 64usize;
    while n < 8192 * 256 {
        if n >= 16384 {
            n *= 4;
        }
        sizes.push(n);
        n *= 2;
    }
    sizes
}

/// What happens after a validation failure.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum FailurePolicy {
    /// Stop at the first failure.
    #[default]
    Halt,
    /// Record the failure and keep validating.
    Continue,
}

#[derive(Debug, Clone, Default)]
pub struct SuiteReport {
    pub validated: usize,
    pub failures: Vec<ValidationError>,
    pub measured: usize,
    pub skipped: usize,
}

impl SuiteReport {
    pub fn is_failure(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Process exit status for this report: 1 after any failure, 0 otherwise.
    pub fn exit_status(&self) -> u8 {
        if self.is_failure() { 1 } else { 0 }
    }

    pub fn merge(&mut self, other: SuiteReport) {
        self.validated += other.validated;
        self.failures.extend(other.failures);
        self.measured += other.measured;
        self.skipped += other.skipped;
    }
}

/// Validation and benchmark driver writing the result lines to `W`.
pub struct Suite<S: SignalSource, C: Clock> {
    registry: BackendRegistry,
    validator: RoundTripValidator<S>,
    runner: BenchmarkRunner<C>,
    policy: FailurePolicy,
}

impl<S: SignalSource, C: Clock> Suite<S, C> {
    pub fn new(registry: BackendRegistry, signal: S, clock: C) -> Suite<S, C> {
        Suite {
            registry,
            validator: RoundTripValidator::new(signal),
            runner: BenchmarkRunner::new(clock, BenchmarkConfig::default()),
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Suite<S, C> {
        self.policy = policy;
        self
    }

    pub fn with_config(mut self, config: BenchmarkConfig) -> Suite<S, C> {
        self.runner = self.runner.with_config(config);
        self
    }

    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    /// Validates every backend supporting each size, domains in the given order.
    ///
    /// `sizes` overrides the built in [`validation_sizes`]. Under [`FailurePolicy::Halt`]
    /// the first failure ends the pass.
    pub fn validate<W: Write>(
        &mut self,
        domains: &[Domain],
        sizes: Option<&[usize]>,
        out: &mut W,
    ) -> Result<SuiteReport, GaugeError> {
        let mut report = SuiteReport::default();
        for &domain in domains {
            let sizes = sizes.unwrap_or_else(|| validation_sizes(domain));
            for &n in sizes {
                for backend in self.registry.iter() {
                    if !backend.supports(n, domain) {
                        tracing::debug!(
                            "{} does not handle {} N={n}, not validated",
                            backend.name(),
                            domain.label()
                        );
                        report.skipped += 1;
                        continue;
                    }
                    match self.validator.validate(backend, n, domain) {
                        Ok(verdict) => {
                            writeln!(out, "{verdict}")?;
                            report.validated += 1;
                        }
                        Err(err) => {
                            writeln!(out, "{err}")?;
                            report.failures.push(err);
                            if self.policy == FailurePolicy::Halt {
                                return Ok(report);
                            }
                            tracing::warn!(
                                "{} {} N={n} failed, continuing",
                                domain.label(),
                                backend.name()
                            );
                        }
                    }
                }
            }
        }
        Ok(report)
    }

    /// Benchmarks every backend at each size, writing `--` after each size.
    pub fn benchmark<W: Write>(
        &self,
        domains: &[Domain],
        sizes: &[usize],
        out: &mut W,
    ) -> Result<SuiteReport, GaugeError> {
        let mut report = SuiteReport::default();
        for &domain in domains {
            for &n in sizes {
                for outcome in self.runner.run_size(&self.registry, n, domain)? {
                    match outcome {
                        BenchOutcome::Measured(result) => {
                            writeln!(out, "{result}")?;
                            report.measured += 1;
                        }
                        BenchOutcome::Skipped { .. } => report.skipped += 1,
                    }
                }
                writeln!(out, "--")?;
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocked::BlockedFft;
    use crate::clock::MonotonicClock;
    use crate::faulty::{Fault, Faulty};
    use crate::signal::SeededSignal;
    use crate::validate::Check;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing::span::{Attributes, Id, Record};
    use tracing::{Event, Level, Metadata, Subscriber};

    fn suite(names: &[&str]) -> Suite<SeededSignal, MonotonicClock> {
        let registry = BackendRegistry::with_defaults().select(names).unwrap();
        Suite::new(registry, SeededSignal::default(), MonotonicClock::new())
    }

    /// Broken backend registered ahead of the working one.
    fn broken_first(policy: FailurePolicy) -> Suite<SeededSignal, MonotonicClock> {
        let mut registry = BackendRegistry::new();
        registry.register(Box::new(Faulty::named("Broken", Fault::ForwardOffset)));
        registry.register(Box::new(BlockedFft::new()));
        Suite::new(registry, SeededSignal::default(), MonotonicClock::new()).with_policy(policy)
    }

    /// Counts warnings emitted while installed.
    struct WarnCounter(Arc<AtomicUsize>);

    impl Subscriber for WarnCounter {
        fn enabled(&self, _: &Metadata<'_>) -> bool {
            true
        }

        fn new_span(&self, _: &Attributes<'_>) -> Id {
            Id::from_u64(1)
        }

        fn record(&self, _: &Id, _: &Record<'_>) {}

        fn record_follows_from(&self, _: &Id, _: &Id) {}

        fn event(&self, event: &Event<'_>) {
            if *event.metadata().level() == Level::WARN {
                self.0.fetch_add(1, Ordering::Relaxed);
            }
        }

        fn enter(&self, _: &Id) {}

        fn exit(&self, _: &Id) {}
    }

    #[test]
    fn test_benchmark_sizes() {
        assert_eq!(
            benchmark_sizes(),
            vec![
                64, 128, 256, 512, 1024, 2048, 4096, 8192, 65536, 524288, 4194304
            ]
        );
    }

    #[test]
    fn test_real_validation_skips_16() {
        assert_eq!(validation_sizes(Domain::Real).first(), Some(&32));
        assert_eq!(validation_sizes(Domain::Complex).first(), Some(&16));
        assert_eq!(validation_sizes(Domain::Complex).len(), 17);
    }

    #[test]
    fn test_validation_lines() {
        let mut suite = suite(&["pffft"]);
        let mut out = Vec::new();
        let report = suite
            .validate(&[Domain::Real], Some(&[64, 96][..]), &mut out)
            .unwrap();
        assert!(!report.is_failure());
        assert_eq!(report.validated, 2);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "REAL PFFFT is OK for N=64\nREAL PFFFT is OK for N=96\n"
        );
    }

    #[test]
    fn test_unsupported_backends_are_skipped_in_validation() {
        let mut suite = suite(&["PFFFT", "SplitRadix"]);
        let mut out = Vec::new();
        let report = suite
            .validate(&[Domain::Complex], Some(&[96][..]), &mut out)
            .unwrap();
        assert_eq!(report.validated, 1);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn test_benchmark_separator_after_each_size() {
        let suite = suite(&["PFFFT", "SplitRadix"]).with_config(BenchmarkConfig {
            budget: 1024,
            multiplier: 1,
            low_power_divisor: 1,
        });
        let mut out = Vec::new();
        let report = suite
            .benchmark(&[Domain::Complex], &[64, 96], &mut out)
            .unwrap();
        assert_eq!(report.measured, 3);
        assert_eq!(report.skipped, 1);
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("N=   64, CPLX PFFFT"));
        assert!(lines[1].starts_with("N=   64, CPLX SplitRadix"));
        assert_eq!(lines[2], "--");
        assert!(lines[3].starts_with("N=   96, CPLX PFFFT"));
        assert_eq!(lines[4], "--");
    }

    #[test]
    fn test_report_merge() {
        let mut report = SuiteReport {
            validated: 2,
            ..SuiteReport::default()
        };
        report.merge(SuiteReport {
            measured: 3,
            skipped: 1,
            ..SuiteReport::default()
        });
        assert_eq!(report.validated, 2);
        assert_eq!(report.measured, 3);
        assert_eq!(report.skipped, 1);
        assert!(!report.is_failure());
    }

    #[test]
    fn test_halt_stops_at_first_failure() {
        let mut suite = broken_first(FailurePolicy::Halt);
        let mut out = Vec::new();
        let report = suite
            .validate(&[Domain::Complex], Some(&[64, 128][..]), &mut out)
            .unwrap();
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].check(), Some(Check::ForwardAccuracy));
        assert_eq!(report.validated, 0);
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1, "{text}");
        assert!(
            lines[0].starts_with("CPLX forward Broken mismatch found for N=64"),
            "{text}"
        );
        assert!(report.is_failure());
        assert_eq!(report.exit_status(), 1);
    }

    #[test]
    fn test_continue_records_failures_and_keeps_going() {
        let warnings = Arc::new(AtomicUsize::new(0));
        let counter = WarnCounter(warnings.clone());
        let mut suite = broken_first(FailurePolicy::Continue);
        let mut out = Vec::new();
        let report = tracing::subscriber::with_default(counter, || {
            suite.validate(&[Domain::Complex], Some(&[64, 128][..]), &mut out)
        })
        .unwrap();
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.validated, 2);
        assert_eq!(warnings.load(Ordering::Relaxed), 2);
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4, "{text}");
        assert!(lines[0].starts_with("CPLX forward Broken mismatch found for N=64"));
        assert_eq!(lines[1], "CPLX PFFFT is OK for N=64");
        assert!(lines[2].starts_with("CPLX forward Broken mismatch found for N=128"));
        assert_eq!(lines[3], "CPLX PFFFT is OK for N=128");
        assert_eq!(report.exit_status(), 1);
    }

    #[test]
    fn test_clean_report_exits_zero() {
        let mut suite = suite(&["PFFFT"]);
        let mut out = Vec::new();
        let report = suite
            .validate(&[Domain::Complex], Some(&[64][..]), &mut out)
            .unwrap();
        assert_eq!(report.exit_status(), 0);
    }
}
