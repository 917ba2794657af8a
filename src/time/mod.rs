//! Time and randomness capabilities.
//!
//! The timestamp functions never read the wall clock or a global RNG
//! themselves; callers pass a [`TimeProvider`] and a [`RandomSource`].

pub mod clock;
pub mod random;

pub use clock::{FixedTimeProvider, SystemTimeProvider, TimeProvider};
pub use random::{RandomSource, RngSource};

#[cfg(test)]
pub use clock::MockTimeProvider;
