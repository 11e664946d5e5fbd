#[cfg(feature = "native")]
mod desktop;
#[cfg(feature = "native")]
pub use desktop::NativePrompter;
