//! Monotonic time sources for timed state machines.
//!
//! Simulation code never reads the wall clock itself. Hosts pass a
//! [`Timestamp`] into each tick, usually obtained from a [`Clock`]; tests and
//! replays use [`ManualClock`] to feed synthetic sequences.

use std::cell::Cell;
use std::time::Instant;

/// Milliseconds on a monotonic timeline with an arbitrary origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Creates a timestamp from milliseconds.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Returns the raw millisecond count.
    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`, saturating at zero.
    ///
    /// # Examples
    /// ```
    /// use skylift::Timestamp;
    /// let start = Timestamp::from_millis(1_000);
    /// assert_eq!(Timestamp::from_millis(1_250).since(start), 250);
    /// assert_eq!(start.since(Timestamp::from_millis(2_000)), 0);
    /// ```
    #[must_use]
    pub const fn since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Returns the timestamp `millis` later.
    #[must_use]
    pub const fn plus_millis(self, millis: u64) -> Self {
        Self(self.0.saturating_add(millis))
    }
}

/// Source of monotonic timestamps.
#[cfg_attr(test, mockall::automock)]
pub trait Clock {
    /// Returns the current time.
    fn now(&self) -> Timestamp;
}

/// Clock backed by [`Instant`], measuring from its construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Starts a clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Timestamp {
        let elapsed = self.origin.elapsed().as_millis();
        Timestamp(u64::try_from(elapsed).unwrap_or(u64::MAX))
    }
}

/// Hand-advanced clock for deterministic runs.
///
/// # Examples
/// ```
/// use skylift::{Clock, ManualClock};
/// let clock = ManualClock::default();
/// clock.advance(16);
/// assert_eq!(clock.now().as_millis(), 16);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    /// Creates a clock reading `start`.
    #[must_use]
    pub const fn starting_at(start: Timestamp) -> Self {
        Self {
            now: Cell::new(start.0),
        }
    }

    /// Moves the clock forward by `millis`.
    pub fn advance(&self, millis: u64) {
        self.now.set(self.now.get().saturating_add(millis));
    }

    /// Jumps the clock to `at`. Earlier values are ignored to keep it monotonic.
    pub fn set(&self, at: Timestamp) {
        if at.0 > self.now.get() {
            self.now.set(at.0);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.now.get())
    }
}
