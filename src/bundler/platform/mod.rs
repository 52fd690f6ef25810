//! Platform-specific pipeline stages.

pub mod macos;
