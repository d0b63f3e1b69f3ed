/*
 * // Copyright 2026 (c) the Radzivon Bartoshyk. All rights reserved.
 * //
 * // Use of this source code is governed by a BSD-style
 * // license that can be found in the LICENSE file.
 */
use criterion::{Criterion, criterion_group, criterion_main};
use fftgauge::{BackendRegistry, Domain, FftDirection};
use rand::Rng;

fn random_input(len: usize) -> Vec<f32> {
    let mut rng = rand::rng();
    (0..len).map(|_| rng.random()).collect()
}

fn bench_round_trip(c: &mut Criterion, n: usize, domain: Domain) {
    let registry = BackendRegistry::with_defaults();
    let input = random_input(domain.float_count(n));
    for backend in registry.iter() {
        if !backend.supports(n, domain) {
            continue;
        }
        let mut plan = backend.make_plan(n, domain).unwrap();
        let mut spectrum = vec![0f32; input.len()];
        let mut output = vec![0f32; input.len()];
        c.bench_function(format!("{} {domain} {n}", backend.name()).as_str(), |b| {
            b.iter(|| {
                plan.forward(&input, &mut spectrum).unwrap();
                plan.inverse(&spectrum, &mut output).unwrap();
            })
        });
    }
}

fn bench_reorder(c: &mut Criterion, n: usize, domain: Domain) {
    let registry = BackendRegistry::with_defaults();
    let Some(backend) = registry.primary() else {
        return;
    };
    let plan = backend.make_plan(n, domain).unwrap();
    let packed = random_input(domain.float_count(n));
    let mut canonical = vec![0f32; packed.len()];
    c.bench_function(
        format!("{} reorder {domain} {n}", backend.name()).as_str(),
        |b| {
            b.iter(|| {
                plan.reorder(&packed, &mut canonical, FftDirection::Forward)
                    .unwrap();
            })
        },
    );
}

pub fn criterion_benchmark(c: &mut Criterion) {
    for n in [256, 1024, 4096] {
        bench_round_trip(c, n, Domain::Real);
        bench_round_trip(c, n, Domain::Complex);
    }
    // skips the power of two only backend
    bench_round_trip(c, 2592, Domain::Complex);
    bench_reorder(c, 4096, Domain::Real);
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
