#![no_main]

use fftgauge::{BackendRegistry, Domain, FftDirection};
use libfuzzer_sys::fuzz_target;

#[derive(arbitrary::Arbitrary, Debug)]
struct Target {
    blocks: u8,
    complex: bool,
    backend: u8,
    seed: f32,
}

fuzz_target!(|data: Target| {
    if data.blocks == 0 || !data.seed.is_finite() {
        return;
    }
    let domain = if data.complex {
        Domain::Complex
    } else {
        Domain::Real
    };
    let n = data.blocks as usize * 32;
    let registry = BackendRegistry::with_defaults();
    let names = registry.names();
    let name = names[data.backend as usize % names.len()];
    let Some(backend) = registry.get(name) else {
        return;
    };
    if !backend.supports(n, domain) {
        return;
    }
    let plan = backend.make_plan(n, domain).unwrap();
    let len = domain.float_count(n);
    let packed: Vec<f32> = (0..len).map(|i| data.seed + i as f32).collect();

    let mut canonical = vec![0f32; len];
    let mut back = vec![0f32; len];
    plan.reorder(&packed, &mut canonical, FftDirection::Forward)
        .unwrap();
    plan.reorder(&canonical, &mut back, FftDirection::Inverse)
        .unwrap();
    for (a, b) in packed.iter().zip(back.iter()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }

    // a spectrum whose only nonzero entries are DC and Nyquist stays real under squaring
    let mut lone = vec![0f32; len];
    lone[0] = data.seed;
    if domain == Domain::Real {
        lone[1] = data.seed * 0.5;
    }
    let mut lone_packed = vec![0f32; len];
    plan.reorder(&lone, &mut lone_packed, FftDirection::Inverse)
        .unwrap();
    let mut accumulator = vec![0f32; len];
    plan.convolve_accumulate(&lone_packed, &lone_packed, &mut accumulator, 1.)
        .unwrap();
    let mut product = vec![0f32; len];
    plan.reorder(&accumulator, &mut product, FftDirection::Forward)
        .unwrap();
    assert_eq!(product[0].to_bits(), (data.seed * data.seed).to_bits());
    if domain == Domain::Real {
        let nyquist = data.seed * 0.5;
        assert_eq!(product[1].to_bits(), (nyquist * nyquist).to_bits());
    }
    assert!(product[2..].iter().all(|&x| x == 0.));
});
