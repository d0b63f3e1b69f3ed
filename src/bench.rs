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
use crate::backend::{BackendRegistry, FftBackend, IterationScaling};
use crate::clock::Clock;
use crate::err::{GaugeError, try_vec};
use crate::Domain;
use std::fmt::{Display, Formatter};
use std::hint::black_box;

/// Iteration budget of a benchmark run.
///
/// A run at size `N` performs `max(1, budget / N * multiplier / low_power_divisor)`
/// forward + inverse cycles, so the total work stays roughly constant across sizes.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BenchmarkConfig {
    pub budget: usize,
    pub multiplier: usize,
    pub low_power_divisor: usize,
}

impl BenchmarkConfig {
    pub const BUDGET: usize = 5_120_000;
    pub const MULTIPLIER: usize = 16;

    pub fn max_iterations(&self, n: usize) -> usize {
        let n = n.max(1);
        let divisor = self.low_power_divisor.max(1);
        (self.budget / n * self.multiplier / divisor).max(1)
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        BenchmarkConfig {
            budget: Self::BUDGET,
            multiplier: Self::MULTIPLIER,
            low_power_divisor: if cfg!(target_arch = "arm") { 8 } else { 1 },
        }
    }
}

/// Timing of one backend at one size.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BenchResult {
    pub backend: &'static str,
    pub domain: Domain,
    pub n: usize,
    pub iterations: usize,
    /// Wall time of all iterations, in seconds.
    pub elapsed: f64,
}

impl BenchResult {
    /// Throughput using the `c * N * log2(N)` operation estimate, `c` being 5 for complex
    /// and 2.5 for real transforms.
    pub fn mflops(&self) -> f64 {
        let n = self.n as f64;
        let flops = (self.iterations * 2) as f64 * (self.domain.flop_factor() * n * n.log2());
        flops / 1e6 / (self.elapsed + 1e-16)
    }

    /// Average duration of a single transform.
    pub fn nanoseconds(&self) -> f64 {
        self.elapsed / 2. / self.iterations as f64 * 1e9
    }
}

impl Display for BenchResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "N={:5}, {} {:<13}: {:6.0} MFlops [t={:6.0} ns, {} runs]",
            self.n,
            self.domain,
            self.backend,
            self.mflops(),
            self.nanoseconds(),
            self.iterations
        ))
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum BenchOutcome {
    Measured(BenchResult),
    /// The backend does not handle this size.
    Skipped {
        backend: &'static str,
        domain: Domain,
        n: usize,
    },
}

/// Times forward + inverse cycles of every backend in a registry.
pub struct BenchmarkRunner<C: Clock> {
    clock: C,
    config: BenchmarkConfig,
}

impl<C: Clock> BenchmarkRunner<C> {
    pub fn new(clock: C, config: BenchmarkConfig) -> BenchmarkRunner<C> {
        BenchmarkRunner { clock, config }
    }

    pub fn with_config(mut self, config: BenchmarkConfig) -> BenchmarkRunner<C> {
        self.config = config;
        self
    }

    pub fn config(&self) -> BenchmarkConfig {
        self.config
    }

    /// Iterations given to `backend`, `lane_width` being the primary backend's vector width.
    pub fn iterations_for(&self, backend: &dyn FftBackend, lane_width: usize, n: usize) -> usize {
        let iterations = self.config.max_iterations(n);
        match backend.iteration_scaling() {
            IterationScaling::Full => iterations,
            IterationScaling::PerVectorLane => (iterations / lane_width.max(1)).max(1),
        }
    }

    pub fn run_backend(
        &self,
        backend: &dyn FftBackend,
        lane_width: usize,
        n: usize,
        domain: Domain,
    ) -> Result<BenchOutcome, GaugeError> {
        if !backend.supports(n, domain) {
            tracing::debug!(
                "skipping {} {} N={n}: size not supported",
                domain.label(),
                backend.name()
            );
            return Ok(BenchOutcome::Skipped {
                backend: backend.name(),
                domain,
                n,
            });
        }
        let iterations = self.iterations_for(backend, lane_width, n);
        let mut plan = backend.make_plan(n, domain)?;
        let x = try_vec![0f32; domain.float_count(n)];
        let mut z = try_vec![0f32; domain.float_count(n)];

        let start = self.clock.now();
        for _ in 0..iterations {
            plan.forward(black_box(&x), black_box(&mut z))?;
            plan.inverse(black_box(&x), black_box(&mut z))?;
        }
        let elapsed = self.clock.now() - start;

        Ok(BenchOutcome::Measured(BenchResult {
            backend: backend.name(),
            domain,
            n,
            iterations,
            elapsed,
        }))
    }

    /// Runs every registered backend in registration order.
    pub fn run_size(
        &self,
        registry: &BackendRegistry,
        n: usize,
        domain: Domain,
    ) -> Result<Vec<BenchOutcome>, GaugeError> {
        let lane_width = registry
            .primary()
            .map(|x| x.native_vector_width())
            .unwrap_or(1);
        registry
            .iter()
            .map(|backend| self.run_backend(backend, lane_width, n, domain))
            .collect()
    }
}
