//! Linux platform implementation.
//!
//! Hierarchy notifications come from the X server's XInput2 extension.
//!
//! ## Feature Flags
//!
//! - `x11` (default): Use X11/XInput2 for hierarchy notifications
//!
//! Building the X11 backend needs the Xlib and Xi development libraries
//! (`libx11-dev` and `libxi-dev` on Debian-based systems).

#[cfg(feature = "x11")]
mod x11;

#[cfg(feature = "x11")]
pub use x11::*;

#[cfg(not(feature = "x11"))]
mod stub {
    use crate::error::{Error, Result};
    use crate::source::EventSource;

    pub fn open_source() -> Result<Box<dyn EventSource>> {
        Err(Error::NotSupported(
            "No Linux backend enabled. Enable the 'x11' feature.".into(),
        ))
    }
}

#[cfg(not(feature = "x11"))]
pub use stub::*;
