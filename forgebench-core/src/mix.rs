//! The Mixing Workload
//!
//! A deterministic bit-mixing transform is the unit of measured work. It is
//! not a cryptographic hash; it only has to be cheap to call, impossible to
//! constant-fold across rounds, and identical in cost on every platform.
//! Callers that only care about throughput must consume the result with
//! `std::hint::black_box` so the loop cannot be dead-code-eliminated.

/// Fixed odd 64-bit multiplier used by both the mixing rounds and the
/// workload generator (Knuth's MMIX LCG constant).
pub const MIX_MULTIPLIER: u64 = 6364136223846793005;

/// Apply `rounds` mixing rounds to `x`.
///
/// Each round is multiply-add, xor-shift, rotate, all with wraparound
/// arithmetic. `mix(x, 0) == x` for every `x`.
#[inline]
pub fn mix(mut x: u64, rounds: u32) -> u64 {
    for _ in 0..rounds {
        x = x.wrapping_mul(MIX_MULTIPLIER).wrapping_add(1);
        x ^= x >> 13;
        x = x.rotate_left(7);
    }
    x
}

/// Generate one workload batch with the default multiplier.
pub fn generate(count: usize) -> Vec<u64> {
    generate_with_multiplier(count, MIX_MULTIPLIER)
}

/// Generate `count` sample values, element `i` being `i * k` modulo 2^64.
///
/// Deterministic by construction; there is no randomness anywhere on the
/// measured path.
pub fn generate_with_multiplier(count: usize, k: u64) -> Vec<u64> {
    (0..count as u64).map(|i| i.wrapping_mul(k)).collect()
}
