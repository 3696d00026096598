//! Console and file logging with colored severity labels.
//!
//! A [`LoggerRegistry`] hands out named [`LoggerHandle`]s. Each handle writes
//! `<timestamp> - <LEVEL> - <process> - <module>: <message>` lines to the console
//! (colored when stdout is a terminal) and, optionally, to a plain log file that is
//! rotated to `<file>.old` on setup.

pub mod color;
pub mod formatter;
pub mod handle;
pub mod record;
pub mod registry;
pub mod rotation;
pub mod severity;

pub use color::{colorize, pad_label, stdout_is_tty};
pub use formatter::Formatter;
pub use handle::LoggerHandle;
pub use record::LogRecord;
pub use registry::LoggerRegistry;
pub use severity::{ParseSeverityError, Severity};

/// Logs at `CRITICAL` through the `log` facade.
///
/// Expands to `log::error!` with a `severity` key-value the formatter picks up.
#[macro_export]
macro_rules! critical {
    ($($arg:tt)+) => {
        $crate::__log::error!(severity = "CRITICAL"; $($arg)+)
    };
}
