//! Validation utilities for cryptographic primitives

use super::{Error, Result};

/// Validate a length
#[inline(always)]
pub fn length(context: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::Length {
            context,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Validate that a buffer holds a whole number of blocks
#[inline(always)]
pub fn whole_blocks(context: &'static str, actual: usize, block_size: usize) -> Result<()> {
    if actual % block_size != 0 {
        return Err(Error::Length {
            context,
            expected: actual - actual % block_size,
            actual,
        });
    }
    Ok(())
}

/// Validate that every lane buffer has the length of the first one
#[inline(always)]
pub fn equal_lengths(context: &'static str, lengths: &[usize]) -> Result<()> {
    if let Some((&first, rest)) = lengths.split_first() {
        if let Some(&bad) = rest.iter().find(|&&len| len != first) {
            return Err(Error::Length {
                context,
                expected: first,
                actual: bad,
            });
        }
    }
    Ok(())
}
