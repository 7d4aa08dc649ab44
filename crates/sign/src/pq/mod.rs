//! Post-quantum signature schemes

pub mod wots;

pub use wots::Wots;
#[cfg(feature = "sig-wots-128")]
pub use wots::WotsShake128;
#[cfg(feature = "sig-wots-256")]
pub use wots::WotsShake256;
