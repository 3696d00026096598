use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use eyre::{Result, WrapErr};

use super::record::Stamped;
use super::severity::{Severity, SEVERITY_KEY};

/// The sink tree currently attached to a handle.
pub(crate) struct Sinks {
    pub min_level: Severity,
    pub file: Option<PathBuf>,
    pub log: Box<dyn log::Log>,
}

/// A named logger.
///
/// Handles are handed out by [`LoggerRegistry`](super::LoggerRegistry) and live as long as
/// anyone holds them. Setting a name up again swaps the sinks in place, so every holder
/// writes to the new sinks from then on.
pub struct LoggerHandle {
    name: String,
    sinks: RwLock<Sinks>,
}

impl fmt::Debug for LoggerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sinks = self.read();
        f.debug_struct("LoggerHandle")
            .field("name", &self.name)
            .field("min_level", &sinks.min_level)
            .field("file", &sinks.file)
            .finish_non_exhaustive()
    }
}

impl LoggerHandle {
    pub(crate) fn new(name: &str, sinks: Sinks) -> Self {
        Self {
            name: name.to_string(),
            sinks: RwLock::new(sinks),
        }
    }

    /// Installs a new sink tree, flushing the old one first.
    pub(crate) fn replace(&self, sinks: Sinks) {
        let mut current = self.sinks.write().unwrap_or_else(PoisonError::into_inner);
        current.log.flush();
        *current = sinks;
    }

    fn read(&self) -> RwLockReadGuard<'_, Sinks> {
        self.sinks.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min_level(&self) -> Severity {
        self.read().min_level
    }

    /// Path of the file sink, if one is attached.
    pub fn file_path(&self) -> Option<PathBuf> {
        self.read().file.clone()
    }

    pub fn enabled(&self, severity: Severity) -> bool {
        severity >= self.min_level()
    }

    /// Emits `args` at `severity` as if logged from `module`.
    pub fn log(&self, severity: Severity, module: &str, args: fmt::Arguments<'_>) {
        let kvs: &[(&str, &str)] = &[(SEVERITY_KEY, severity.name())];
        self.log_record(
            &log::Record::builder()
                .level(severity.as_level())
                .target(module)
                .module_path(Some(module))
                .args(args)
                .key_values(&kvs)
                .build(),
        );
    }

    /// Routes an already built `log` record through this handle's sinks.
    pub fn log_record(&self, record: &log::Record<'_>) {
        let sinks = self.read();
        if Severity::of(record) >= sinks.min_level {
            let stamped = Stamped::now(record.key_values());
            sinks
                .log
                .log(&record.to_builder().key_values(&stamped).build());
        }
    }

    pub fn flush(&self) {
        self.read().log.flush();
    }

    /// Makes this handle the target of the `log` macros for the rest of the process.
    ///
    /// # Errors
    /// * If a global logger was already installed
    pub fn install(self: &Arc<Self>) -> Result<()> {
        log::set_boxed_logger(Box::new(Facade(Arc::clone(self))))
            .wrap_err_with(|| format!("cannot install logger {}", self.name))?;
        // Filtering happens per handle; let everything down to debug through.
        log::set_max_level(Severity::Debug.as_level_filter());
        Ok(())
    }
}

/// Bridges the `log` facade to a handle.
struct Facade(Arc<LoggerHandle>);

impl log::Log for Facade {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= self.0.min_level().as_level_filter()
    }

    fn log(&self, record: &log::Record<'_>) {
        self.0.log_record(record);
    }

    fn flush(&self) {
        self.0.flush();
    }
}
