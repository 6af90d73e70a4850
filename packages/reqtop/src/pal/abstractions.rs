//! Platform abstraction trait definitions.

use std::fmt::Debug;
use std::time::Duration;

/// Processor time consumed by the current process, split by execution mode.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct CpuTimes {
    /// Time spent in user mode.
    pub(crate) user: Duration,

    /// Time spent in kernel mode.
    pub(crate) system: Duration,
}

/// Provides access to the operating system resource counters of the
/// current process.
///
/// This trait abstracts the underlying platform-specific counters, allowing
/// for both real implementations (using system calls) and fake
/// implementations (for testing).
///
/// Reporting is best-effort instrumentation layered on top of the real
/// workload, so implementations degrade to zero values instead of failing
/// when a counter is unavailable.
pub(crate) trait Platform: Debug + Send + Sync + 'static {
    /// Gets the current wall-clock reading, relative to an arbitrary fixed
    /// anchor.
    fn wall_clock(&self) -> Duration;

    /// Gets the processor time consumed by the current process, split
    /// between user and kernel mode.
    ///
    /// Returns zero values when the counters cannot be queried.
    fn cpu_times(&self) -> CpuTimes;

    /// Gets the peak resident set size of the current process, in bytes.
    ///
    /// This is the process-lifetime peak; the operating system does not
    /// reset it between units of work. Returns zero when the counter cannot
    /// be queried.
    fn peak_rss_bytes(&self) -> u64;
}
