//! # Marquee Testing
//!
//! Testing utilities and helpers for the Marquee architecture.
//!
//! This crate provides:
//! - Clocks for deterministic time (fixed, manually advanced, tokio-driven)
//! - A Given-When-Then harness for reducers
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use marquee_testing::{ManualClock, test_clock};
//!
//! let clock = ManualClock::new(test_clock().now());
//! let env = CarouselEnvironment::new(clock.clone(), CarouselConfig::default());
//!
//! reducer.reduce(&mut state, CarouselAction::Mount, &env);
//! clock.advance(Duration::from_millis(8000));
//! ```

use chrono::{DateTime, Utc};
use marquee_core::environment::Clock;


pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use std::sync::{Arc, Mutex, PoisonError};
    use std::time::Duration;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use marquee_testing::mocks::FixedClock;
    /// use marquee_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Convert a std duration, saturating at zero for unrepresentable values
    fn signed(duration: Duration) -> chrono::Duration {
        chrono::Duration::from_std(duration).unwrap_or_else(|_| chrono::Duration::zero())
    }

    /// Clock that only moves when told to
    ///
    /// Clones share the same time, so a test can keep one handle and give
    /// another to the environment under test.
    ///
    /// ```
    /// use marquee_testing::mocks::{ManualClock, test_clock};
    /// use marquee_core::environment::Clock;
    /// use std::time::Duration;
    ///
    /// let clock = ManualClock::new(test_clock().now());
    /// let shared = clock.clone();
    /// let before = shared.now();
    ///
    /// clock.advance(Duration::from_millis(8000));
    /// assert_eq!((shared.now() - before).num_milliseconds(), 8000);
    /// ```
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        time: Arc<Mutex<DateTime<Utc>>>,
    }

    impl ManualClock {
        /// Create a clock frozen at `start`
        #[must_use]
        pub fn new(start: DateTime<Utc>) -> Self {
            Self {
                time: Arc::new(Mutex::new(start)),
            }
        }

        /// Move the clock forward
        pub fn advance(&self, by: Duration) {
            let mut time = self.time.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(next) = time.checked_add_signed(signed(by)) {
                *time = next;
            }
        }

        /// Jump to an absolute time
        pub fn set(&self, to: DateTime<Utc>) {
            *self.time.lock().unwrap_or_else(PoisonError::into_inner) = to;
        }
    }

    impl Default for ManualClock {
        fn default() -> Self {
            Self::new(test_clock().now())
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.time.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    /// Clock that follows tokio's timer
    ///
    /// Under `#[tokio::test(start_paused = true)]` the tokio clock jumps
    /// straight to the next timer, so an engine driven by a real `Store`
    /// sees exactly the elapsed time its delays asked for.
    #[derive(Debug, Clone)]
    pub struct TokioClock {
        origin: DateTime<Utc>,
        started: tokio::time::Instant,
    }

    impl TokioClock {
        /// Start counting from `origin` at the current tokio instant
        #[must_use]
        pub fn new(origin: DateTime<Utc>) -> Self {
            Self {
                origin,
                started: tokio::time::Instant::now(),
            }
        }
    }

    impl Default for TokioClock {
        fn default() -> Self {
            Self::new(test_clock().now())
        }
    }

    impl Clock for TokioClock {
        fn now(&self) -> DateTime<Utc> {
            self.origin
                .checked_add_signed(signed(self.started.elapsed()))
                .unwrap_or(self.origin)
        }
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, ManualClock, TokioClock, test_clock};

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now().to_rfc3339(), "2025-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_manual_clock_shares_time() {
        let clock = ManualClock::default();
        let shared = clock.clone();
        let start = clock.now();

        clock.advance(Duration::from_millis(16));
        assert_eq!((shared.now() - start).num_milliseconds(), 16);

        shared.set(start);
        assert_eq!(clock.now(), start);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_clock_follows_paused_time() {
        let clock = TokioClock::default();
        let start = clock.now();

        tokio::time::sleep(Duration::from_millis(8000)).await;

        assert_eq!((clock.now() - start).num_milliseconds(), 8000);
    }
}
