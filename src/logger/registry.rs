use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use eyre::{Result, WrapErr};
use fern::Dispatch;

use super::color::stdout_is_tty;
use super::formatter::Formatter;
use super::handle::{LoggerHandle, Sinks};
use super::record::{process_name, LogRecord};
use super::rotation::rotate;
use super::severity::Severity;

/// Owns every named logger of the application.
///
/// Create one at startup and pass it to whoever needs to set up or look up a logger.
/// The TTY answer and the process name are fixed when the registry is built.
pub struct LoggerRegistry {
    color: bool,
    process: String,
    loggers: Mutex<HashMap<String, Arc<LoggerHandle>>>,
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerRegistry {
    /// Registry that colors console output when stdout is a terminal.
    pub fn new() -> Self {
        Self::with_color(stdout_is_tty())
    }

    pub fn with_color(color: bool) -> Self {
        Self {
            color,
            process: process_name().to_string(),
            loggers: Mutex::default(),
        }
    }

    /// Overrides the process name printed on every line.
    #[must_use]
    pub fn with_process_name(mut self, process: impl Into<String>) -> Self {
        self.process = process.into();
        self
    }

    pub const fn color(&self) -> bool {
        self.color
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<LoggerHandle>>> {
        self.loggers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sets up logger `name` with a stdout console sink and an optional file sink.
    ///
    /// # Errors
    /// * If an existing log file cannot be rotated
    /// * If the log file cannot be opened
    pub fn setup(
        &self,
        name: &str,
        min_level: Severity,
        file: Option<&Path>,
    ) -> Result<Arc<LoggerHandle>> {
        self.setup_with_console(name, min_level, file, std::io::stdout())
    }

    /// Like [`setup`](Self::setup), writing console lines to `console` instead of stdout.
    ///
    /// Setting up a name that already exists replaces its sinks and returns the same handle.
    ///
    /// # Errors
    /// * If an existing log file cannot be rotated
    /// * If the log file cannot be opened
    pub fn setup_with_console(
        &self,
        name: &str,
        min_level: Severity,
        file: Option<&Path>,
        console: impl Into<fern::Output>,
    ) -> Result<Arc<LoggerHandle>> {
        // Held across rotation so two setups in this process never race on the same file.
        let mut loggers = self.lock();
        let sinks = self.build_sinks(min_level, file, console.into())?;

        let handle = if let Some(handle) = loggers.get(name) {
            handle.replace(sinks);
            Arc::clone(handle)
        } else {
            let handle = Arc::new(LoggerHandle::new(name, sinks));
            loggers.insert(name.to_string(), Arc::clone(&handle));
            handle
        };
        Ok(handle)
    }

    pub fn get(&self, name: &str) -> Option<Arc<LoggerHandle>> {
        self.lock().get(name).cloned()
    }

    /// Names of all loggers set up so far, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().keys().cloned().collect();
        names.sort();
        names
    }

    fn build_sinks(
        &self,
        min_level: Severity,
        file: Option<&Path>,
        console: fern::Output,
    ) -> Result<Sinks> {
        let mut dispatch = Dispatch::new()
            .level(min_level.as_level_filter())
            .chain(
                sink(Formatter::colored(self.color), self.process.clone()).chain(console),
            );

        if let Some(path) = file {
            rotate(path)?;
            let log_file = fern::log_file(path)
                .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;
            dispatch = dispatch.chain(sink(Formatter::plain(), self.process.clone()).chain(log_file));
        }

        let (_, log) = dispatch.into_log();
        Ok(Sinks {
            min_level,
            file: file.map(Path::to_path_buf),
            log,
        })
    }
}

/// A dispatch that formats every record with `formatter`.
fn sink(formatter: Formatter, process: String) -> Dispatch {
    Dispatch::new().format(move |out, message, record| {
        let line = formatter.format(&LogRecord::capture(record, message, &process));
        out.finish(format_args!("{line}"));
    })
}
