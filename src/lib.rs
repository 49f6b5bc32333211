//! # xidmon
//!
//! Watch the X input device hierarchy and report devices being enabled or
//! disabled, one line per burst of related changes.
//!
//! ## Output
//!
//! Every reported change is two tab-terminated fields, the hierarchy flag
//! and the device use:
//!
//! ```text
//! DeviceDisabled\tSlaveKeyboard\tDeviceDisabled\tSlavePointer\t
//! ```
//!
//! Changes that arrive within one coalescing window (250 ms by default)
//! share a line. The line is flushed as soon as the window closes.
//!
//! ## Quick Start
//!
//! ```no_run
//! use xidmon::{Monitor, MonitorConfig, open_source};
//!
//! let source = open_source().expect("failed to connect");
//! let mut monitor = Monitor::new(source, std::io::stdout().lock(), MonitorConfig::from_env());
//! if let Err(e) = monitor.run() {
//!     if !e.is_clean_shutdown() {
//!         eprintln!("{}", e);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! A backend implements [`EventSource`] (see the `platform` module for the
//! XInput2 one). [`classify`] keeps the enable/disable entries of each
//! notification, [`Monitor`] groups them into bursts, and [`Reporter`]
//! writes the lines.

pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod monitor;
pub mod report;
pub mod source;

mod platform;

// Re-exports
pub use classify::classify;
pub use config::MonitorConfig;
pub use error::{Error, Result};
pub use hierarchy::{ClassifiedRecord, DeviceHierarchyInfo, DeviceUse, HierarchyNotification};
pub use monitor::{Monitor, Timer};
pub use report::Reporter;
pub use source::EventSource;

pub use platform::open_source;
#[cfg(all(target_os = "linux", feature = "x11"))]
pub use platform::XInputSource;
