//! The coalescing monitor loop.
//!
//! The loop alternates between two states. While idle it blocks on the
//! source for the next notification. A notification that yields at least
//! one record opens a burst and arms a [`Timer`] to the configured window.
//! While the burst is open the loop waits for the source to become readable
//! (or for the timer to run out), then drains everything already buffered
//! onto the current line. When the timer expires the line is terminated and
//! flushed, and the loop goes back to idle.
//!
//! The timer is armed once per burst and never re-armed while draining, so
//! the window bounds the whole burst rather than the gap between events. A
//! steady trickle of events is therefore split into lines at most one
//! window long.

use crate::classify::classify;
use crate::config::MonitorConfig;
use crate::error::{Error, Result};
use crate::hierarchy::HierarchyNotification;
use crate::report::Reporter;
use crate::source::EventSource;
use std::io::Write;
use std::time::{Duration, Instant};

/// Countdown bounding one burst.
///
/// The countdown is charged by the source's waits; the wall-clock deadline
/// taken when the timer is armed also charges time spent draining and
/// writing, so a slow reader cannot stretch a burst past the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    remaining: Duration,
    deadline: Instant,
}

impl Timer {
    /// Arm a timer for the full window.
    pub fn arm(window: Duration) -> Self {
        Self {
            remaining: window,
            deadline: Instant::now() + window,
        }
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.remaining().is_zero()
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
            .min(self.deadline.saturating_duration_since(Instant::now()))
    }

    /// Time left, clamped to the deadline, for a wait to count down.
    pub fn remaining_mut(&mut self) -> &mut Duration {
        self.remaining = self.remaining();
        &mut self.remaining
    }
}

/// Coalesces notifications from a source into report lines.
pub struct Monitor<S: EventSource, W: Write> {
    source: S,
    reporter: Reporter<W>,
    config: MonitorConfig,
}

impl<S: EventSource, W: Write> Monitor<S, W> {
    pub fn new(source: S, out: W, config: MonitorConfig) -> Self {
        Self::with_reporter(source, Reporter::new(out), config)
    }

    /// Create a monitor around an already configured reporter.
    pub fn with_reporter(source: S, reporter: Reporter<W>, config: MonitorConfig) -> Self {
        Self {
            source,
            reporter,
            config,
        }
    }

    /// Run until the source closes or a fatal error occurs.
    ///
    /// This never returns `Ok`; a closed source surfaces as
    /// `Err(Error::SourceClosed)`, which callers treat as a clean exit.
    pub fn run(&mut self) -> Result<()> {
        loop {
            if let Err(e) = self.step() {
                return Err(self.finish(e));
            }
        }
    }

    /// Process one idle wait and, if it opens one, the burst that follows.
    ///
    /// Returns whether a line was written.
    pub fn step(&mut self) -> Result<bool> {
        let Some(notification) = self.source.next_notification()? else {
            return Ok(false);
        };
        if self.absorb(&notification)? == 0 {
            return Ok(false);
        }

        log::debug!("burst opened, window {:?}", self.config.window);
        let mut timer = Timer::arm(self.config.window);
        while !timer.is_expired() {
            self.source.wait_readable_or_timeout(timer.remaining_mut())?;
            while self.source.pending_count()? > 0 {
                if let Some(notification) = self.source.next_notification()? {
                    self.absorb(&notification)?;
                }
            }
        }

        self.reporter.end_line()?;
        log::debug!("burst flushed");
        Ok(true)
    }

    /// Append the records of one notification to the current line.
    fn absorb(&mut self, notification: &HierarchyNotification) -> Result<usize> {
        let records = classify(notification);
        for record in &records {
            self.reporter.append(record)?;
        }
        Ok(records.len())
    }

    fn finish(&mut self, error: Error) -> Error {
        if error.is_clean_shutdown() {
            log::info!("notification source closed, stopping");
            if self.reporter.is_line_open()
                && let Err(e) = self.reporter.end_line()
            {
                return e;
            }
        }
        error
    }

    pub fn into_output(self) -> W {
        self.reporter.into_inner()
    }
}
