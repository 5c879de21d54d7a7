//! Test helpers.
//!
//! Systems that use `Commands` enqueue structural changes. We call `world.flush()` after running
//! so queued commands are applied before assertions.

use std::time::Duration;

use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// A `Time<Fixed>` whose last delta is `dt` seconds.
pub fn fixed_time_with_delta(dt: f32) -> Time<Fixed> {
    let mut t = Time::<Fixed>::default();
    t.advance_by(Duration::from_secs_f32(dt));
    t
}

/// Tiny deterministic PRNG for property-style tests (xorshift64*).
#[derive(Clone, Copy)]
pub struct TestRng(u64);

impl TestRng {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.0 = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Uniform in `0..n` (n > 0).
    #[inline]
    pub fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    #[inline]
    pub fn chance(&mut self, percent: u64) -> bool {
        self.next_u64() % 100 < percent
    }
}
