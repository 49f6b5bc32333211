//! Runtime configuration.

use std::time::Duration;

/// Default coalescing window.
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(250);

/// Environment variable overriding the coalescing window, in milliseconds.
pub const WINDOW_ENV: &str = "XIDMON_WINDOW_MS";

/// Settings for the monitor loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Upper bound on the time a burst stays open.
    pub window: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
        }
    }
}

impl MonitorConfig {
    /// Load settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_window_var(std::env::var(WINDOW_ENV).ok().as_deref())
    }

    fn from_window_var(value: Option<&str>) -> Self {
        let window = match value.map(str::trim) {
            None | Some("") => DEFAULT_WINDOW,
            Some(raw) => match raw.parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    log::warn!(
                        "ignoring {}={:?}: expected a positive number of milliseconds",
                        WINDOW_ENV,
                        raw
                    );
                    DEFAULT_WINDOW
                }
            },
        };
        Self { window }
    }

    /// Set the coalescing window.
    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window() {
        assert_eq!(MonitorConfig::default().window, Duration::from_millis(250));
    }

    #[test]
    fn test_window_from_var() {
        assert_eq!(
            MonitorConfig::from_window_var(Some("100")).window,
            Duration::from_millis(100)
        );
        assert_eq!(MonitorConfig::from_window_var(None).window, DEFAULT_WINDOW);
        assert_eq!(MonitorConfig::from_window_var(Some(" ")).window, DEFAULT_WINDOW);
        assert_eq!(MonitorConfig::from_window_var(Some("0")).window, DEFAULT_WINDOW);
        assert_eq!(MonitorConfig::from_window_var(Some("fast")).window, DEFAULT_WINDOW);
    }
}
