use std::io::IsTerminal;
use std::sync::OnceLock;

use super::severity::Severity;

/// Width every severity label is padded to, so columns line up once escapes are added.
pub const LABEL_WIDTH: usize = 8;

const RESET_SEQ: &str = "\x1b[0m";

/// ANSI colors used for labels, valued by their offset from 30.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Color {
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
}

impl Color {
    /// Bold foreground escape for this color.
    pub fn escape(self) -> String {
        format!("\x1b[1;{}m", 30 + self as u8)
    }
}

impl Severity {
    pub const fn color(self) -> Color {
        match self {
            Self::Debug => Color::Blue,
            Self::Info => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Error | Self::Critical => Color::Red,
        }
    }
}

/// Whether stdout is an interactive terminal.
///
/// Checked once per process; later calls return the cached answer.
pub fn stdout_is_tty() -> bool {
    static IS_TTY: OnceLock<bool> = OnceLock::new();
    *IS_TTY.get_or_init(|| std::io::stdout().is_terminal())
}

/// Wraps `text` in the escape sequence for `severity`, or returns it as-is when `enabled` is false.
pub fn colorize(severity: Severity, text: &str, enabled: bool) -> String {
    if enabled {
        format!("{}{text}{RESET_SEQ}", severity.color().escape())
    } else {
        text.to_string()
    }
}

/// Severity name padded with trailing spaces to [`LABEL_WIDTH`].
pub fn pad_label(severity: Severity) -> String {
    format!("{severity:<LABEL_WIDTH$}")
}
