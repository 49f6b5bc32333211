//! Command line parsing, help and version text.

use crate::error::{Error, Result};

/// Help text printed for `-h`.
pub const HELP: &str = "\
xidmon: wait for device add/remove over XInput2 and print notifications on
stdout. Each notification is composed of two tab-delimited fields:
\t<XInput2 hierarchy flag> <XInput2 device type>

Consecutive events are coalesced onto a single line.

Usage: xidmon [-h] [-V]

Sample output:

\tDeviceDisabled\tSlaveKeyboard\tDeviceDisabled\tSlavePointer
\tDeviceEnabled\tSlaveKeyboard\tDeviceEnabled\tSlavePointer

";

/// Version text printed for `-V`.
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_NAME"),
    " ",
    env!("CARGO_PKG_VERSION"),
    "\nLicense ",
    env!("CARGO_PKG_LICENSE"),
    "\n"
);

/// What the process was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Monitor the device hierarchy until the session ends.
    Run,
    /// Print usage and exit.
    Help,
    /// Print name, version and license and exit.
    Version,
}

/// Parse the arguments following the program name.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<Command> {
    match args {
        [] => Ok(Command::Run),
        [arg] => match arg.as_ref() {
            "-h" => Ok(Command::Help),
            "-V" => Ok(Command::Version),
            other => Err(Error::UnknownOption(other.to_string())),
        },
        _ => Err(Error::InvalidArgumentCount(args.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_runs() {
        let args: [&str; 0] = [];
        assert_eq!(parse_args(&args).unwrap(), Command::Run);
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse_args(&["-h"]).unwrap(), Command::Help);
        assert_eq!(parse_args(&["-V"]).unwrap(), Command::Version);
    }

    #[test]
    fn test_unknown_option() {
        match parse_args(&["--help"]) {
            Err(Error::UnknownOption(opt)) => assert_eq!(opt, "--help"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_too_many_arguments() {
        assert!(matches!(
            parse_args(&["-h", "-V"]),
            Err(Error::InvalidArgumentCount(2))
        ));
    }

    #[test]
    fn test_texts() {
        assert!(HELP.contains("Usage: xidmon [-h] [-V]"));
        assert!(VERSION.starts_with(concat!("xidmon ", env!("CARGO_PKG_VERSION"), "\n")));
        assert!(VERSION.ends_with("License Apache-2.0\n"));
    }
}
