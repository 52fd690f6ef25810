//! macOS bundle post-processing, signing and disk image packaging.

pub mod cleanup;
pub mod dmg;
pub mod sign;
