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
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seed used when the caller does not pick one.
pub const DEFAULT_SEED: u64 = 1;

/// Source of test samples.
///
/// Samples only need to be non-degenerate so that ordering or sign mistakes show up in
/// the spectrum; nothing here is meant to be statistically strong.
pub trait SignalSource {
    /// Next sample, uniform in `[0, 1)`.
    fn next_sample(&mut self) -> f32;

    fn fill(&mut self, dst: &mut [f32]) {
        for sample in dst.iter_mut() {
            *sample = self.next_sample();
        }
    }
}

/// Deterministic [`SignalSource`] backed by a seeded [`StdRng`].
pub struct SeededSignal {
    rng: StdRng,
}

impl SeededSignal {
    pub fn new(seed: u64) -> SeededSignal {
        SeededSignal {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SeededSignal {
    fn default() -> Self {
        SeededSignal::new(DEFAULT_SEED)
    }
}

impl SignalSource for SeededSignal {
    fn next_sample(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_are_in_unit_interval() {
        let mut signal = SeededSignal::new(7);
        for _ in 0..10_000 {
            let v = signal.next_sample();
            assert!((0. ..1.).contains(&v), "sample {v} is out of [0, 1)");
        }
    }

    #[test]
    fn test_same_seed_regenerates_identical_sequence() {
        let mut a = vec![0f32; 288];
        let mut b = vec![0f32; 288];
        SeededSignal::new(42).fill(&mut a);
        SeededSignal::new(42).fill(&mut b);
        assert!(a.iter().zip(b.iter()).all(|(x, y)| x.to_bits() == y.to_bits()));
    }

    #[test]
    fn test_signal_is_not_constant() {
        let mut a = vec![0f32; 64];
        SeededSignal::default().fill(&mut a);
        assert!(a.iter().any(|&x| x != a[0]));
    }
}
