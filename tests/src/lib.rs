//! Shared fixtures for the switchcrypt conformance tests

pub mod backends;
pub mod vectors;
