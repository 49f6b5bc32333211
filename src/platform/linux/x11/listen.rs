//! Reading hierarchy notifications from the X connection.

use super::connection::XInputSource;
use crate::error::{Error, Result};
use crate::hierarchy::{DeviceHierarchyInfo, DeviceUse, HierarchyNotification};
use crate::source::EventSource;
use std::io;
use std::mem;
use std::os::raw::{c_int, c_void};
use std::slice;
use std::time::{Duration, Instant};
use x11::xinput2;
use x11::xlib;

/// `QueuedAlready` from `X11/Xlib.h`; not exported by the `x11` crate.
const QUEUED_ALREADY: c_int = 0;

/// Extension payload of a generic event, released when dropped.
struct CookieData<'a> {
    display: *mut xlib::Display,
    cookie: &'a mut xlib::XGenericEventCookie,
}

impl<'a> CookieData<'a> {
    fn acquire(
        display: *mut xlib::Display,
        cookie: &'a mut xlib::XGenericEventCookie,
    ) -> Result<Self> {
        // XGetEventData does not hit the server, so failure here is never a
        // terminated session.
        if unsafe { xlib::XGetEventData(display, &mut *cookie) } == 0 {
            return Err(Error::UnexpectedFailure("XGetEventData failed".into()));
        }
        Ok(Self { display, cookie })
    }

    fn data(&self) -> *const c_void {
        self.cookie.data
    }
}

impl Drop for CookieData<'_> {
    fn drop(&mut self) {
        let cookie: *mut xlib::XGenericEventCookie = &mut *self.cookie;
        unsafe {
            xlib::XFreeEventData(self.display, cookie);
        }
    }
}

impl XInputSource {
    fn decode(&self, event: &mut xlib::XEvent) -> Result<Option<HierarchyNotification>> {
        if event.get_type() != xlib::GenericEvent {
            return Ok(None);
        }
        let cookie = unsafe { &mut event.generic_event_cookie };
        if cookie.extension != self.opcode || cookie.evtype != xinput2::XI_HierarchyChanged {
            return Ok(None);
        }

        let data = CookieData::acquire(self.display, cookie)?;
        #[allow(clippy::cast_ptr_alignment)]
        let hierarchy = match unsafe { (data.data() as *const xinput2::XIHierarchyEvent).as_ref() }
        {
            Some(h) => h,
            None => {
                return Err(Error::UnexpectedFailure(
                    "hierarchy event without data".into(),
                ));
            }
        };

        let entries: &[xinput2::XIHierarchyInfo] =
            if hierarchy.info.is_null() || hierarchy.num_info <= 0 {
                &[]
            } else {
                unsafe { slice::from_raw_parts(hierarchy.info, hierarchy.num_info as usize) }
            };
        let info = entries
            .iter()
            .map(|hi| {
                DeviceHierarchyInfo::new(hi.deviceid, hi.flags, DeviceUse::from_raw(hi._use))
            })
            .collect();

        Ok(Some(HierarchyNotification::new(info)))
    }

    /// Wait until the connection has input, or until `timeout` elapses.
    fn wait_for_input(&self, timeout: Option<Duration>) -> Result<bool> {
        unsafe {
            xlib::XFlush(self.display);
        }
        wait_readable(self.fd, timeout.map(|t| Instant::now() + t))
    }
}

/// Poll `fd` for input until `deadline` (forever if `None`).
///
/// Returns whether input is available. Bytes still buffered after the peer
/// hung up count as input; only a drained hung-up socket is reported as
/// `SourceClosed`, before Xlib gets to read from it.
fn wait_readable(fd: c_int, deadline: Option<Instant>) -> Result<bool> {
    loop {
        let timeout_ms: c_int = match deadline {
            None => -1,
            Some(deadline) => {
                let left = deadline.saturating_duration_since(Instant::now());
                // Round up so a sub-millisecond remainder still waits.
                left.as_micros().div_ceil(1000).min(c_int::MAX as u128) as c_int
            }
        };

        let mut pfd = libc::pollfd {
            fd,
            events: libc::POLLIN,
            revents: 0,
        };
        let ret = unsafe { libc::poll(&mut pfd, 1, timeout_ms) };

        if ret < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                continue;
            }
            return Err(Error::UnexpectedFailure(format!("poll error: {}", err)));
        }

        if ret == 0 {
            return Ok(false);
        }

        if pfd.revents & libc::POLLIN != 0 {
            // Readable with nothing to read means the server hung up.
            if peek(fd) == 0 {
                return Err(Error::SourceClosed);
            }
            return Ok(true);
        }
        if pfd.revents & (libc::POLLHUP | libc::POLLERR | libc::POLLNVAL) != 0 {
            return Err(Error::SourceClosed);
        }
        return Ok(true);
    }
}

/// Non-blocking one-byte peek: 0 at end of stream, -1 if nothing is ready.
fn peek(fd: c_int) -> isize {
    let mut byte: u8 = 0;
    unsafe {
        libc::recv(
            fd,
            &mut byte as *mut u8 as *mut c_void,
            1,
            libc::MSG_PEEK | libc::MSG_DONTWAIT,
        )
    }
}

impl EventSource for XInputSource {
    fn next_notification(&mut self) -> Result<Option<HierarchyNotification>> {
        if unsafe { xlib::XEventsQueued(self.display, QUEUED_ALREADY) } == 0 {
            self.wait_for_input(None)?;
        }

        let mut event: xlib::XEvent = unsafe { mem::zeroed() };
        unsafe {
            xlib::XNextEvent(self.display, &mut event);
        }
        self.decode(&mut event)
    }

    fn pending_count(&mut self) -> Result<usize> {
        let pending = unsafe { xlib::XPending(self.display) };
        Ok(pending.max(0) as usize)
    }

    fn wait_readable_or_timeout(&mut self, remaining: &mut Duration) -> Result<()> {
        let started = Instant::now();
        let result = self.wait_for_input(Some(*remaining));
        *remaining = remaining.saturating_sub(started.elapsed());
        result.map(|_| ())
    }
}
