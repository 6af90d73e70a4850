//! Resource usage snapshots and deltas.

use std::time::Duration;

use crate::pal::{Platform, PlatformFacade};

/// A point-in-time reading of the resources consumed by the current process.
///
/// Two snapshots bound one measurement window: one captured when the unit of
/// work starts (the baseline) and one when it ends. A snapshot is immutable
/// once captured.
///
/// Wall-clock readings are relative to an arbitrary process-lifetime anchor,
/// so only differences between two snapshots are meaningful.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ResourceSnapshot {
    /// Wall-clock reading.
    pub wall: Duration,

    /// Processor time the process has spent in user mode.
    pub user: Duration,

    /// Processor time the process has spent in kernel mode.
    pub system: Duration,
}

/// Resources consumed between a baseline snapshot and a final snapshot.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ResourceDelta {
    /// Elapsed wall-clock time.
    pub wall: Duration,

    /// Elapsed user-mode processor time.
    pub user: Duration,

    /// Elapsed kernel-mode processor time.
    pub system: Duration,
}

impl ResourceSnapshot {
    /// Captures a snapshot from the platform's resource counters.
    pub(crate) fn capture(platform: &PlatformFacade) -> Self {
        let cpu = platform.cpu_times();

        Self {
            wall: platform.wall_clock(),
            user: cpu.user,
            system: cpu.system,
        }
    }

    /// Calculates the resources consumed since `baseline`.
    ///
    /// Every field clamps at zero, so a non-monotonic clock source can never
    /// produce a negative reading.
    #[must_use]
    pub fn since(&self, baseline: &Self) -> ResourceDelta {
        ResourceDelta {
            wall: self.wall.saturating_sub(baseline.wall),
            user: self.user.saturating_sub(baseline.user),
            system: self.system.saturating_sub(baseline.system),
        }
    }
}
