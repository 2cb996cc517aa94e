//! OS font table backends.

#[cfg(target_os = "macos")]
mod macos;
#[cfg(all(unix, not(target_os = "macos")))]
mod unix;
#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "macos")]
pub use macos::SystemFontLoader;
#[cfg(all(unix, not(target_os = "macos")))]
pub use unix::SystemFontLoader;
#[cfg(target_os = "windows")]
pub use windows::SystemFontLoader;
