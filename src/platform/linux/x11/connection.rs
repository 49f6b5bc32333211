//! XInput2 connection setup and teardown.

use crate::error::{Error, Result};
use crate::report;
use std::ffi::CStr;
use std::os::raw::{c_int, c_uchar};
use std::ptr::null;
use x11::xinput2;
use x11::xlib;

const XINPUT_EXTENSION: &CStr = c"XInputExtension";

/// Minimum XInput version providing hierarchy events.
const XI_MAJOR: c_int = 2;
const XI_MINOR: c_int = 0;

/// An open X display subscribed to XInput2 hierarchy changes.
///
/// The display is closed when this is dropped.
pub struct XInputSource {
    pub(super) display: *mut xlib::Display,
    /// Major opcode of the XInput extension.
    pub(super) opcode: c_int,
    /// File descriptor of the display connection.
    pub(super) fd: c_int,
}

impl XInputSource {
    /// Connect to the display named by `DISPLAY` and subscribe to hierarchy
    /// changes on the root window for all devices.
    pub fn open() -> Result<Self> {
        let display = unsafe { xlib::XOpenDisplay(null()) };
        if display.is_null() {
            return Err(Error::ConnectionFailure(
                "Unable to connect to X display. Is DISPLAY set?".into(),
            ));
        }
        install_io_error_handler();

        let fd = unsafe { xlib::XConnectionNumber(display) };
        // From here on, Drop closes the display on every error path.
        let mut source = Self {
            display,
            opcode: 0,
            fd,
        };
        source.opcode = source.check_xinput()?;
        log::debug!(
            "XInput {}.{} available, opcode {}, fd {}",
            XI_MAJOR,
            XI_MINOR,
            source.opcode,
            source.fd
        );

        source.subscribe_hierarchy_changes();
        Ok(source)
    }

    fn check_xinput(&self) -> Result<c_int> {
        let mut opcode: c_int = 0;
        let mut event: c_int = 0;
        let mut error: c_int = 0;
        let found = unsafe {
            xlib::XQueryExtension(
                self.display,
                XINPUT_EXTENSION.as_ptr(),
                &mut opcode,
                &mut event,
                &mut error,
            )
        };
        if found == 0 {
            return Err(Error::ConnectionFailure(
                "X Input extension not available.".into(),
            ));
        }

        let mut major = XI_MAJOR;
        let mut minor = XI_MINOR;
        let status = unsafe { xinput2::XIQueryVersion(self.display, &mut major, &mut minor) };
        if status == xlib::BadRequest as c_int {
            return Err(Error::ConnectionFailure(format!(
                "XInputExtension: requested version {}.{}, but only {}.{} is available.",
                XI_MAJOR, XI_MINOR, major, minor
            )));
        }

        Ok(opcode)
    }

    /// Select `XI_HierarchyChanged` for all devices on the root window.
    pub fn subscribe_hierarchy_changes(&mut self) {
        let mut mask: [c_uchar; 2] = [0; 2];
        set_mask_bit(&mut mask, xinput2::XI_HierarchyChanged);

        let mut event_mask = xinput2::XIEventMask {
            deviceid: xinput2::XIAllDevices,
            mask_len: mask.len() as c_int,
            mask: mask.as_mut_ptr(),
        };

        unsafe {
            let root = xlib::XDefaultRootWindow(self.display);
            xinput2::XISelectEvents(self.display, root, &mut event_mask, 1);
            xlib::XFlush(self.display);
        }
        log::debug!("subscribed to hierarchy changes");
    }
}

impl Drop for XInputSource {
    fn drop(&mut self) {
        unsafe {
            xlib::XCloseDisplay(self.display);
        }
        log::debug!("X display closed");
    }
}

fn set_mask_bit(mask: &mut [c_uchar], event: c_int) {
    mask[(event >> 3) as usize] |= 1 << (event & 7);
}

/// Xlib terminates the process once this returns, so exit here instead
/// with the status of a normal end of session.
unsafe extern "C" fn on_io_error(_display: *mut xlib::Display) -> c_int {
    log::info!("X connection lost, exiting");
    let _ = report::terminate_open_line(&mut std::io::stdout());
    std::process::exit(0)
}

fn install_io_error_handler() {
    unsafe {
        xlib::XSetIOErrorHandler(Some(on_io_error));
    }
}
