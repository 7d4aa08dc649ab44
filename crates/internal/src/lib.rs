//! Internal utilities for switchcrypt
//!
//! Helpers shared by the implementation crates that are not part of the
//! public API surface: constant-time comparison and CPU capability probing.

pub mod constant_time;
pub mod cpu;

pub use cpu::{CapabilityProbe, CpuExtension, CpuExtensions, HostProbe, StaticProbe};
