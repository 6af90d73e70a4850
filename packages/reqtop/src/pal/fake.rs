//! Fake platform implementation for testing.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::pal::abstractions::{CpuTimes, Platform};

/// Internal state for the fake platform that can be shared between clones.
#[derive(Debug)]
struct FakePlatformState {
    wall_clock: Duration,
    cpu_times: CpuTimes,
    peak_rss_bytes: u64,
}

/// Fake implementation of the platform abstraction for testing.
///
/// This implementation allows tests to control the counter values instead of
/// relying on actual system calls. Multiple clones of the same `FakePlatform`
/// share the same underlying state, allowing tests to modify counter values
/// after platform creation to simulate resource consumption.
#[derive(Clone, Debug)]
pub(crate) struct FakePlatform {
    state: Arc<Mutex<FakePlatformState>>,
}

impl FakePlatform {
    /// Creates a new fake platform with zero counter values.
    pub(crate) fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakePlatformState {
                wall_clock: Duration::ZERO,
                cpu_times: CpuTimes::default(),
                peak_rss_bytes: 0,
            })),
        }
    }

    /// Sets the wall-clock reading.
    ///
    /// This affects all clones of this platform, allowing tests to simulate
    /// time progression during measurement.
    pub(crate) fn set_wall_clock(&self, wall_clock: Duration) {
        self.state
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
            .wall_clock = wall_clock;
    }

    /// Sets the user and kernel mode processor time readings.
    pub(crate) fn set_cpu_times(&self, user: Duration, system: Duration) {
        self.state
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
            .cpu_times = CpuTimes { user, system };
    }

    /// Sets the peak resident set size reading, in bytes.
    pub(crate) fn set_peak_rss_bytes(&self, peak_rss_bytes: u64) {
        self.state
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
            .peak_rss_bytes = peak_rss_bytes;
    }
}

impl Platform for FakePlatform {
    fn wall_clock(&self) -> Duration {
        self.state
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
            .wall_clock
    }

    fn cpu_times(&self) -> CpuTimes {
        self.state
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
            .cpu_times
    }

    fn peak_rss_bytes(&self) -> u64 {
        self.state
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
            .peak_rss_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initializes_with_zero_counters() {
        let platform = FakePlatform::new();

        assert_eq!(platform.wall_clock(), Duration::ZERO);
        assert_eq!(platform.cpu_times(), CpuTimes::default());
        assert_eq!(platform.peak_rss_bytes(), 0);
    }

    #[test]
    fn sets_wall_clock() {
        let platform = FakePlatform::new();
        platform.set_wall_clock(Duration::from_millis(150));

        assert_eq!(platform.wall_clock(), Duration::from_millis(150));
    }

    #[test]
    fn sets_cpu_times() {
        let platform = FakePlatform::new();
        platform.set_cpu_times(Duration::from_millis(250), Duration::from_millis(50));

        let times = platform.cpu_times();
        assert_eq!(times.user, Duration::from_millis(250));
        assert_eq!(times.system, Duration::from_millis(50));
    }

    #[test]
    fn sets_peak_rss() {
        let platform = FakePlatform::new();
        platform.set_peak_rss_bytes(3_145_728);

        assert_eq!(platform.peak_rss_bytes(), 3_145_728);
    }

    #[test]
    fn shared_state_between_clones() {
        let platform1 = FakePlatform::new();
        let platform2 = platform1.clone();

        // Setting counters on one clone affects the other.
        platform1.set_wall_clock(Duration::from_millis(100));
        assert_eq!(platform2.wall_clock(), Duration::from_millis(100));

        platform2.set_peak_rss_bytes(1024);
        assert_eq!(platform1.peak_rss_bytes(), 1024);
    }
}
