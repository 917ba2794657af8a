use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Uniform integer generator used to sample offsets inside a range.
pub trait RandomSource {
    /// Returns a value uniformly distributed in `[0, bound)`.
    ///
    /// `bound` must be positive; callers check this before drawing.
    fn below(&mut self, bound: i64) -> i64;
}

/// Adapts any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R>(R);

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        RngSource(rng)
    }
}

impl RngSource<ThreadRng> {
    /// Thread-local generator seeded by the OS. Not suitable for secrets.
    pub fn thread() -> Self {
        RngSource(rand::thread_rng())
    }
}

impl RngSource<StdRng> {
    /// Deterministic generator for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        RngSource(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn below(&mut self, bound: i64) -> i64 {
        self.0.gen_range(0..bound)
    }
}
