//! Turns a [`LogRecord`] into one output line:
//! `<timestamp> - <level> - <process> - <module>: <message>`

use super::color::{colorize, pad_label};
use super::record::LogRecord;

/// UTC timestamp layout used on every line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Formatter {
    color: bool,
}

impl Formatter {
    /// Formatter for a sink that may be a terminal; `color` is the TTY answer.
    pub const fn colored(color: bool) -> Self {
        Self { color }
    }

    /// Formatter for files and other non-terminal sinks.
    pub const fn plain() -> Self {
        Self { color: false }
    }

    pub const fn uses_color(&self) -> bool {
        self.color
    }

    /// Formats `record`. The record is only borrowed; nothing about it changes.
    pub fn format(&self, record: &LogRecord) -> String {
        let label = colorize(record.severity, &pad_label(record.severity), self.color);
        format!(
            "{} - {} - {} - {}: {}",
            record.timestamp.format(TIMESTAMP_FORMAT),
            label,
            record.process,
            record.module,
            record.message
        )
    }
}
