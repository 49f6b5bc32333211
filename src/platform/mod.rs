//! Platform-specific implementations.

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
pub use linux::*;

#[cfg(not(target_os = "linux"))]
mod stub {
    use crate::error::{Error, Result};
    use crate::source::EventSource;

    pub fn open_source() -> Result<Box<dyn EventSource>> {
        Err(Error::NotSupported(
            "XInput2 hierarchy monitoring is only implemented for Linux".into(),
        ))
    }
}

#[cfg(not(target_os = "linux"))]
pub use stub::*;
