//! Constants for hash-based signature algorithms

pub mod wots;
