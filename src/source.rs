//! The notification source seam between a backend and the monitor loop.

use crate::error::Result;
use crate::hierarchy::HierarchyNotification;
use std::time::Duration;

/// A connection delivering device hierarchy notifications.
///
/// Implementations own the connection and its receive buffer. Closing the
/// connection is tied to `Drop`.
pub trait EventSource {
    /// Block until one event is available and decode it.
    ///
    /// Returns `Ok(None)` for events that are not hierarchy changes from the
    /// subscribed extension, and `Err(Error::SourceClosed)` once the
    /// connection has gone away.
    fn next_notification(&mut self) -> Result<Option<HierarchyNotification>>;

    /// Number of complete events already buffered, without blocking.
    fn pending_count(&mut self) -> Result<usize>;

    /// Block until the connection is readable or `remaining` has elapsed.
    ///
    /// The elapsed time is subtracted from `remaining`, saturating at zero.
    fn wait_readable_or_timeout(&mut self, remaining: &mut Duration) -> Result<()>;
}

impl<S: EventSource + ?Sized> EventSource for Box<S> {
    fn next_notification(&mut self) -> Result<Option<HierarchyNotification>> {
        (**self).next_notification()
    }

    fn pending_count(&mut self) -> Result<usize> {
        (**self).pending_count()
    }

    fn wait_readable_or_timeout(&mut self, remaining: &mut Duration) -> Result<()> {
        (**self).wait_readable_or_timeout(remaining)
    }
}
