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
use clap::{ArgAction, Parser, Subcommand};
use fftgauge::{
    BackendRegistry, DEFAULT_SEED, Domain, FailurePolicy, GaugeError, MonotonicClock,
    SeededSignal, Suite, SuiteReport, benchmark_sizes,
};
use std::process::ExitCode;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "fftgauge")]
#[command(
    about = "Validate FFT backends against a double precision reference and benchmark them",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    /// Backend to run, repeatable. The first one is the primary backend.
    #[arg(long = "backend", value_name = "NAME", global = true)]
    backends: Vec<String>,
    /// Size to run instead of the built in lists, repeatable.
    #[arg(long = "size", value_name = "N", global = true)]
    sizes: Vec<usize>,
    /// Keep validating after a failure, the exit status still reports it.
    #[arg(long, global = true)]
    keep_going: bool,
    #[arg(long, value_name = "SEED", default_value_t = DEFAULT_SEED, global = true)]
    seed: u64,
    #[arg(long, conflicts_with = "complex_only", global = true)]
    real_only: bool,
    #[arg(long, global = true)]
    complex_only: bool,
    /// More log output, repeat for more detail.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug, Copy, Clone, Default, Eq, PartialEq)]
enum Command {
    /// Correctness checks only.
    Validate,
    /// Throughput measurements only.
    Bench,
    /// Validation followed by benchmarks.
    #[default]
    All,
}

impl Cli {
    /// Keeps the domains allowed by `--real-only`/`--complex-only`, in the given order.
    fn domains(&self, order: [Domain; 2]) -> Vec<Domain> {
        order
            .into_iter()
            .filter(|&domain| match domain {
                Domain::Real => !self.complex_only,
                Domain::Complex => !self.real_only,
            })
            .collect()
    }

    fn policy(&self) -> FailurePolicy {
        if self.keep_going {
            FailurePolicy::Continue
        } else {
            FailurePolicy::Halt
        }
    }
}

fn run(cli: &Cli) -> Result<SuiteReport, GaugeError> {
    let mut registry = BackendRegistry::with_defaults();
    if !cli.backends.is_empty() {
        registry = registry.select(cli.backends.as_slice())?;
    }
    tracing::info!("backends: {}", registry.names().join(", "));

    let policy = cli.policy();
    let mut suite = Suite::new(
        registry,
        SeededSignal::new(cli.seed),
        MonotonicClock::new(),
    )
    .with_policy(policy);

    let command = cli.command.unwrap_or_default();
    let sizes = (!cli.sizes.is_empty()).then_some(cli.sizes.as_slice());
    let mut out = std::io::stdout().lock();
    let mut report = SuiteReport::default();

    if matches!(command, Command::Validate | Command::All) {
        let domains = cli.domains([Domain::Complex, Domain::Real]);
        report.merge(suite.validate(&domains, sizes, &mut out)?);
        if report.is_failure() && policy == FailurePolicy::Halt {
            return Ok(report);
        }
    }

    if matches!(command, Command::Bench | Command::All) {
        let domains = cli.domains([Domain::Real, Domain::Complex]);
        let sizes = sizes.map(|x| x.to_vec()).unwrap_or_else(benchmark_sizes);
        report.merge(suite.benchmark(&domains, &sizes, &mut out)?);
    }

    Ok(report)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(report) => {
            if report.is_failure() {
                tracing::warn!("{} validation failure(s)", report.failures.len());
            }
            ExitCode::from(report.exit_status())
        }
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}
