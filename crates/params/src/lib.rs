//! Constant values for switchcrypt
//!
//! Sizes of the hash and XOF primitives and the parameter sets of the bundled
//! signature schemes. Kept dependency free so every other crate can use it.

#![no_std]

pub mod pqc;
pub mod utils;
