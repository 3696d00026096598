use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use log::kv::{self, Key, Source, Value, VisitSource};

use super::severity::Severity;

/// Key under which a record carries its emission time, in microseconds since the epoch.
pub const TIMESTAMP_KEY: &str = "timestamp";

/// A record's key-values plus the moment it was emitted.
///
/// Every sink of a handle formats the same stamped record, so console and file
/// agree on the time of a line.
pub(crate) struct Stamped<'a> {
    inner: &'a dyn Source,
    micros: i64,
}

impl<'a> Stamped<'a> {
    pub(crate) fn now(inner: &'a dyn Source) -> Self {
        Self {
            inner,
            micros: Utc::now().timestamp_micros(),
        }
    }
}

impl Source for Stamped<'_> {
    fn visit<'kvs>(&'kvs self, visitor: &mut dyn VisitSource<'kvs>) -> Result<(), kv::Error> {
        self.inner.visit(visitor)?;
        // Visited last so it wins over a caller-supplied `timestamp`.
        visitor.visit_pair(Key::from_str(TIMESTAMP_KEY), Value::from(self.micros))
    }
}

/// Emission time carried by `record`, or now when it has none.
fn timestamp_of(record: &log::Record<'_>) -> DateTime<Utc> {
    record
        .key_values()
        .get(Key::from_str(TIMESTAMP_KEY))
        .and_then(|value| value.to_i64())
        .and_then(DateTime::from_timestamp_micros)
        .unwrap_or_else(Utc::now)
}

/// A single emitted log line, before formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    pub process: String,
    pub module: String,
    pub message: String,
}

impl LogRecord {
    pub fn new(
        severity: Severity,
        process: impl Into<String>,
        module: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            severity,
            process: process.into(),
            module: module.into(),
            message: message.into(),
        }
    }

    /// Builds a record from what `fern` hands a format callback.
    pub fn capture(record: &log::Record<'_>, message: &fmt::Arguments<'_>, process: &str) -> Self {
        let path = record.module_path().unwrap_or_else(|| record.target());
        Self {
            timestamp: timestamp_of(record),
            severity: Severity::of(record),
            process: process.to_string(),
            module: module_name(path).to_string(),
            message: message.to_string(),
        }
    }
}

/// Last segment of a module path: `fly::sync::usd` -> `usd`.
pub fn module_name(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

/// Name of the running executable, resolved once.
pub fn process_name() -> &'static str {
    static NAME: OnceLock<String> = OnceLock::new();
    NAME.get_or_init(|| {
        std::env::current_exe()
            .ok()
            .and_then(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "main".to_string())
    })
}
