//! Error types for the hierarchy monitor.

use thiserror::Error;

/// Result type alias for xidmon operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while monitoring the device hierarchy.
#[derive(Debug, Error)]
pub enum Error {
    /// The notification service could not be reached or negotiated with.
    #[error("{0}")]
    ConnectionFailure(String),

    /// A locally detected inconsistency while decoding a received notification.
    #[error("unexpected failure: {0}")]
    UnexpectedFailure(String),

    /// The notification service went away (e.g. the session ended).
    #[error("notification source closed")]
    SourceClosed,

    /// Writing the report failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// An argument other than `-h` or `-V` was given.
    #[error("Unknown option {0}")]
    UnknownOption(String),

    /// More than one argument was given.
    #[error("Invalid number of arguments")]
    InvalidArgumentCount(usize),

    /// No backend is available on this platform.
    #[error("not supported: {0}")]
    NotSupported(String),
}

impl Error {
    /// Whether this error is a normal end of session rather than a failure.
    pub fn is_clean_shutdown(&self) -> bool {
        matches!(self, Error::SourceClosed)
    }

    /// Process exit status for this outcome.
    pub fn exit_code(&self) -> u8 {
        if self.is_clean_shutdown() { 0 } else { 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::SourceClosed.exit_code(), 0);
        assert_eq!(Error::ConnectionFailure("no display".into()).exit_code(), 1);
        assert_eq!(Error::UnexpectedFailure("cookie".into()).exit_code(), 1);
        assert_eq!(Error::UnknownOption("-x".into()).exit_code(), 1);
        assert_eq!(Error::InvalidArgumentCount(2).exit_code(), 1);
    }

    #[test]
    fn test_cli_messages() {
        assert_eq!(Error::UnknownOption("-x".into()).to_string(), "Unknown option -x");
        assert_eq!(
            Error::InvalidArgumentCount(3).to_string(),
            "Invalid number of arguments"
        );
    }
}
