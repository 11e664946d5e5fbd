//! Platform-specific request targets.

#[cfg(target_os = "android")]
pub mod android;

pub mod desktop;
