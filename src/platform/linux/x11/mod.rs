//! X11 implementation using XInput2 hierarchy events.

mod connection;
mod listen;

pub use connection::XInputSource;

use crate::error::Result;
use crate::source::EventSource;

/// Open the XInput2 hierarchy source.
pub fn open_source() -> Result<Box<dyn EventSource>> {
    Ok(Box::new(XInputSource::open()?))
}
