//! Constants shared by the primitive implementations

pub mod hash;
