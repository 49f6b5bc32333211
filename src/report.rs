//! Line-oriented report writer.
//!
//! Each record becomes two tab-terminated fields. Records of one burst share
//! a line; the line is terminated and flushed only when the burst ends.

use crate::error::Result;
use crate::hierarchy::ClassifiedRecord;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

/// Whether the process-wide report on stdout has an unterminated line.
///
/// Read from contexts that cannot reach the `Reporter`, such as the X I/O
/// error handler that exits the process.
static STDOUT_LINE_OPEN: AtomicBool = AtomicBool::new(false);

/// Check if the stdout report currently has an unterminated line.
#[inline]
pub fn stdout_line_open() -> bool {
    STDOUT_LINE_OPEN.load(Ordering::SeqCst)
}

/// End the stdout report's open line, if any, and flush `out`.
///
/// For exit paths that bypass the `Reporter`; `out` must be stdout.
pub fn terminate_open_line<W: Write>(out: &mut W) -> std::io::Result<()> {
    if STDOUT_LINE_OPEN.swap(false, Ordering::SeqCst) {
        out.write_all(b"\n")?;
    }
    out.flush()
}

/// Writes classified records to an output stream.
pub struct Reporter<W: Write> {
    out: W,
    line_open: bool,
    publish: bool,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            line_open: false,
            publish: false,
        }
    }

    /// Mirror the line state into [`stdout_line_open`].
    ///
    /// Only the reporter writing the process's stdout should do this.
    pub fn publish_line_state(mut self) -> Self {
        self.publish = true;
        self
    }

    fn set_line_open(&mut self, open: bool) {
        self.line_open = open;
        if self.publish {
            STDOUT_LINE_OPEN.store(open, Ordering::SeqCst);
        }
    }

    /// Append one record to the current line.
    pub fn append(&mut self, record: &ClassifiedRecord) -> Result<()> {
        write!(
            self.out,
            "{}\t{}\t",
            record.flag_name, record.device_use_name
        )?;
        self.set_line_open(true);
        Ok(())
    }

    /// Terminate the current line and flush it to the stream.
    pub fn end_line(&mut self) -> Result<()> {
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        self.set_line_open(false);
        Ok(())
    }

    /// Check if records have been written since the last `end_line`.
    pub fn is_line_open(&self) -> bool {
        self.line_open
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENABLED_KBD: ClassifiedRecord = ClassifiedRecord {
        flag_name: "DeviceEnabled",
        device_use_name: "SlaveKeyboard",
    };

    #[test]
    fn test_single_record_line() {
        let mut reporter = Reporter::new(Vec::new());
        assert!(!reporter.is_line_open());

        reporter.append(&ENABLED_KBD).unwrap();
        assert!(reporter.is_line_open());
        reporter.end_line().unwrap();
        assert!(!reporter.is_line_open());

        assert_eq!(reporter.into_inner(), b"DeviceEnabled\tSlaveKeyboard\t\n");
    }

    #[test]
    fn test_same_record_twice() {
        let mut reporter = Reporter::new(Vec::new());
        reporter.append(&ENABLED_KBD).unwrap();
        reporter.append(&ENABLED_KBD).unwrap();
        reporter.end_line().unwrap();

        assert_eq!(
            String::from_utf8(reporter.into_inner()).unwrap(),
            "DeviceEnabled\tSlaveKeyboard\tDeviceEnabled\tSlaveKeyboard\t\n"
        );
    }

    #[test]
    fn test_published_line_state() {
        // The only test that publishes, so nothing else touches the flag.
        let mut reporter = Reporter::new(Vec::new()).publish_line_state();
        assert!(!stdout_line_open());
        reporter.append(&ENABLED_KBD).unwrap();
        assert!(stdout_line_open());
        reporter.end_line().unwrap();
        assert!(!stdout_line_open());

        // A line cut short at exit still gets its terminator, exactly once.
        reporter.append(&ENABLED_KBD).unwrap();
        let mut exit_out = Vec::new();
        terminate_open_line(&mut exit_out).unwrap();
        assert_eq!(exit_out, b"\n");
        assert!(!stdout_line_open());
        terminate_open_line(&mut exit_out).unwrap();
        assert_eq!(exit_out, b"\n");
    }

    #[test]
    fn test_no_terminator_before_end_line() {
        let mut reporter = Reporter::new(Vec::new());
        reporter.append(&ENABLED_KBD).unwrap();
        assert!(!reporter.get_ref().contains(&b'\n'));
    }
}
