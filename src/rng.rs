use rand::SeedableRng;
use rand_pcg::Pcg64;

/// Deterministic RNG for the `instance`-th puzzle generated from `seed`.
///
/// Derives a per-instance 64-bit seed as `seed ^ instance.rotate_left(32)` and feeds
/// it to PCG so benches and scrambles are reproducible across runs.
#[inline]
pub fn rng_for_instance(seed: u64, instance: u64) -> Pcg64 {
    let derived: u64 = seed ^ instance.rotate_left(32);
    Pcg64::seed_from_u64(derived)
}
