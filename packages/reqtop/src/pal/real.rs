//! Real platform implementation using operating system counters.

use std::sync::OnceLock;
use std::time::{Duration, Instant};

use crate::pal::abstractions::{CpuTimes, Platform};

/// Anchor for wall-clock readings.
///
/// Readings are only ever compared against each other, so any fixed anchor
/// works; the first reading taken in the process establishes it.
static WALL_ANCHOR: OnceLock<Instant> = OnceLock::new();

/// Real implementation of the platform abstraction using system calls.
#[derive(Clone, Debug)]
pub(crate) struct RealPlatform;

impl Platform for RealPlatform {
    fn wall_clock(&self) -> Duration {
        WALL_ANCHOR.get_or_init(Instant::now).elapsed()
    }

    fn cpu_times(&self) -> CpuTimes {
        rusage::cpu_times()
    }

    fn peak_rss_bytes(&self) -> u64 {
        rusage::peak_rss_bytes()
    }
}

#[cfg(unix)]
mod rusage {
    use std::mem::MaybeUninit;
    use std::time::Duration;

    use crate::pal::abstractions::CpuTimes;

    fn query() -> Option<libc::rusage> {
        let mut usage = MaybeUninit::<libc::rusage>::uninit();

        // SAFETY: getrusage() fills the buffer when it returns 0; we only
        // assume it initialized after checking the return value.
        let result = unsafe { libc::getrusage(libc::RUSAGE_SELF, usage.as_mut_ptr()) };

        if result != 0 {
            return None;
        }

        // SAFETY: a zero return value means the buffer was filled in.
        Some(unsafe { usage.assume_init() })
    }

    fn timeval_to_duration(tv: libc::timeval) -> Duration {
        // Negative values have no meaning for consumed time; treat as zero.
        let secs = u64::try_from(tv.tv_sec).unwrap_or(0);
        let micros = u32::try_from(tv.tv_usec).unwrap_or(0);

        Duration::new(secs, micros.saturating_mul(1_000))
    }

    pub(super) fn cpu_times() -> CpuTimes {
        query().map_or_else(CpuTimes::default, |ru| CpuTimes {
            user: timeval_to_duration(ru.ru_utime),
            system: timeval_to_duration(ru.ru_stime),
        })
    }

    pub(super) fn peak_rss_bytes() -> u64 {
        query().map_or(0, |ru| {
            let max_rss = u64::try_from(ru.ru_maxrss).unwrap_or(0);

            // ru_maxrss is reported in kilobytes on Linux but in bytes on macOS.
            if cfg!(target_os = "macos") {
                max_rss
            } else {
                max_rss.saturating_mul(1024)
            }
        })
    }
}

#[cfg(not(unix))]
mod rusage {
    use crate::pal::abstractions::CpuTimes;

    // No resource usage counters on this platform; zero-fill so that
    // reporting degrades instead of breaking the workload.

    pub(super) fn cpu_times() -> CpuTimes {
        CpuTimes::default()
    }

    pub(super) fn peak_rss_bytes() -> u64 {
        0
    }
}
