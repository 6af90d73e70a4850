//! Platform abstraction layer for resource usage counters.
//!
//! This module provides a platform abstraction that allows switching between
//! real resource counters (wall clock, processor times, peak resident memory)
//! and fake implementations for testing purposes.

mod abstractions;
mod facade;
#[cfg(test)]
mod fake;
mod real;

pub(crate) use abstractions::Platform;
pub(crate) use facade::PlatformFacade;
#[cfg(test)]
pub(crate) use fake::FakePlatform;
