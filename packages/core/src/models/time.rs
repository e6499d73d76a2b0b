//! Time Provider Abstraction
//!
//! Trait-based clock so `created_at` / `updated_at` handling can be tested
//! deterministically. The service refreshes `updated_at` along the whole
//! ancestor spine on every mutation; asserting that propagation needs a clock
//! that moves only when the test says so.
//!
//! # Examples
//!
//! ```rust
//! use catalog_core::models::time::{SystemTimeProvider, TimeProvider};
//! use chrono::Utc;
//!
//! let clock = SystemTimeProvider;
//! assert!(clock.now() <= Utc::now());
//! ```

use chrono::{DateTime, Utc};
use std::sync::Mutex;

/// Trait for providing current time
pub trait TimeProvider: Send + Sync {
    /// Get the current UTC time
    fn now(&self) -> DateTime<Utc>;
}

/// System clock; the default for production use
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually-advanced clock for deterministic tests
///
/// The service holds its clock behind `Arc<dyn TimeProvider>`, so the mock
/// uses interior mutability: tests keep a second `Arc` and advance time from
/// outside while the service reads it.
///
/// # Examples
///
/// ```rust
/// use catalog_core::models::time::{MockTimeProvider, TimeProvider};
/// use chrono::{Duration, Utc};
///
/// let clock = MockTimeProvider::with_time(Utc::now());
/// let before = clock.now();
/// clock.advance(Duration::minutes(5));
/// assert_eq!(clock.now() - before, Duration::minutes(5));
/// ```
#[derive(Debug)]
pub struct MockTimeProvider {
    current_time: Mutex<DateTime<Utc>>,
}

impl MockTimeProvider {
    /// Create a mock clock starting at the current system time
    pub fn new() -> Self {
        Self::with_time(Utc::now())
    }

    /// Create a mock clock with a specific starting time
    pub fn with_time(time: DateTime<Utc>) -> Self {
        Self {
            current_time: Mutex::new(time),
        }
    }

    /// Pin the clock to a specific value
    pub fn set_time(&self, time: DateTime<Utc>) {
        *self.current_time.lock().unwrap() = time;
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: chrono::Duration) {
        *self.current_time.lock().unwrap() += duration;
    }
}

impl TimeProvider for MockTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        *self.current_time.lock().unwrap()
    }
}

impl Default for MockTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_system_clock_tracks_utc_now() {
        let clock = SystemTimeProvider;
        let delta = Utc::now() - clock.now();
        assert!(delta.num_milliseconds().abs() < 1000);
    }

    #[test]
    fn test_mock_clock_is_frozen_until_advanced() {
        let clock = MockTimeProvider::new();
        let t1 = clock.now();
        let t2 = clock.now();
        assert_eq!(t1, t2);

        clock.advance(Duration::hours(2));
        assert_eq!(clock.now() - t1, Duration::hours(2));
    }

    #[test]
    fn test_mock_clock_shared_across_handles() {
        use std::sync::Arc;

        let clock = Arc::new(MockTimeProvider::with_time(Utc::now()));
        let service_view: Arc<dyn TimeProvider> = clock.clone();

        let before = service_view.now();
        clock.advance(Duration::seconds(30));
        assert_eq!(service_view.now() - before, Duration::seconds(30));
    }
}
