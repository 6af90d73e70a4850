//! Platform facade for switching between real and fake implementations.

use std::time::Duration;

use crate::pal::abstractions::{CpuTimes, Platform};
#[cfg(test)]
use crate::pal::fake::FakePlatform;
use crate::pal::real::RealPlatform;

/// Facade that allows switching between real and fake platform
/// implementations.
///
/// This enum provides a unified interface to either the real platform
/// (using actual system calls) or a fake platform (for testing).
#[derive(Clone, Debug)]
pub(crate) enum PlatformFacade {
    /// Real platform implementation using system calls.
    Real(RealPlatform),

    /// Fake platform implementation for testing.
    #[cfg(test)]
    Fake(FakePlatform),
}

impl PlatformFacade {
    /// Creates a new platform facade using the real implementation.
    pub(crate) fn real() -> Self {
        Self::Real(RealPlatform)
    }

    /// Creates a new platform facade using the fake implementation.
    #[cfg(test)]
    pub(crate) fn fake(fake_platform: FakePlatform) -> Self {
        Self::Fake(fake_platform)
    }
}

impl Platform for PlatformFacade {
    fn wall_clock(&self) -> Duration {
        match self {
            Self::Real(platform) => platform.wall_clock(),
            #[cfg(test)]
            Self::Fake(platform) => platform.wall_clock(),
        }
    }

    fn cpu_times(&self) -> CpuTimes {
        match self {
            Self::Real(platform) => platform.cpu_times(),
            #[cfg(test)]
            Self::Fake(platform) => platform.cpu_times(),
        }
    }

    fn peak_rss_bytes(&self) -> u64 {
        match self {
            Self::Real(platform) => platform.peak_rss_bytes(),
            #[cfg(test)]
            Self::Fake(platform) => platform.peak_rss_bytes(),
        }
    }
}
