//! Severity is the ordered importance of a log line.
//! `log` only knows five levels and none of them is "critical", so this type
//! carries its own ladder and maps onto `log::Level` at the edges.

use std::fmt::{self, Display};
use std::str::FromStr;

use derive_more::Display as DeriveDisplay;
use log::kv::Key;

/// Key under which a record carries its severity name through the `log` facade.
pub const SEVERITY_KEY: &str = "severity";

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    pub const ALL: [Self; 5] = [
        Self::Debug,
        Self::Info,
        Self::Warning,
        Self::Error,
        Self::Critical,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }

    /// The `log` level a record of this severity is emitted at.
    pub const fn as_level(self) -> log::Level {
        match self {
            Self::Debug => log::Level::Debug,
            Self::Info => log::Level::Info,
            Self::Warning => log::Level::Warn,
            Self::Error | Self::Critical => log::Level::Error,
        }
    }

    pub fn as_level_filter(self) -> log::LevelFilter {
        self.as_level().to_level_filter()
    }

    /// Resolves the severity of a `log` record.
    ///
    /// A `severity` key-value wins over the record level, which is how
    /// `CRITICAL` survives the trip through `log::Level::Error`.
    pub fn of(record: &log::Record<'_>) -> Self {
        record
            .key_values()
            .get(Key::from_str(SEVERITY_KEY))
            .and_then(|value| value.to_string().parse().ok())
            .unwrap_or_else(|| Self::from(record.level()))
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Self::Error,
            log::Level::Warn => Self::Warning,
            log::Level::Info => Self::Info,
            log::Level::Debug | log::Level::Trace => Self::Debug,
        }
    }
}

impl Display for Severity {
    // `pad` so that `{:<8}` lines labels up
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, DeriveDisplay)]
#[display("unknown severity: {_0}")]
pub struct ParseSeverityError(String);

impl std::error::Error for ParseSeverityError {}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" | "TRACE" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARNING" | "WARN" => Ok(Self::Warning),
            "ERROR" => Ok(Self::Error),
            "CRITICAL" | "FATAL" => Ok(Self::Critical),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        assert!(Severity::Error < Severity::Critical);
    }

    #[test]
    fn test_parse_names_and_aliases() {
        assert_eq!("info".parse::<Severity>(), Ok(Severity::Info));
        assert_eq!("Warn".parse::<Severity>(), Ok(Severity::Warning));
        assert_eq!(" CRITICAL ".parse::<Severity>(), Ok(Severity::Critical));
        assert_eq!("fatal".parse::<Severity>(), Ok(Severity::Critical));

        let err = "loud".parse::<Severity>().unwrap_err();
        assert_eq!(err.to_string(), "unknown severity: loud");
    }

    #[test]
    fn test_display_respects_width() {
        assert_eq!(format!("{:<8}|", Severity::Info), "INFO    |");
        assert_eq!(format!("{}", Severity::Critical), "CRITICAL");
    }

    #[test]
    fn test_critical_rides_error_level() {
        assert_eq!(Severity::Critical.as_level(), log::Level::Error);
        assert_eq!(Severity::from(log::Level::Trace), Severity::Debug);
    }

    #[test]
    fn test_level_filter() {
        assert_eq!(Severity::Debug.as_level_filter(), log::LevelFilter::Debug);
        assert_eq!(Severity::Warning.as_level_filter(), log::LevelFilter::Warn);
        assert_eq!(Severity::Critical.as_level_filter(), log::LevelFilter::Error);
    }

    #[test]
    fn test_of_prefers_key_value() {
        let kvs: &[(&str, &str)] = &[(SEVERITY_KEY, "CRITICAL")];
        let record = log::Record::builder()
            .level(log::Level::Error)
            .args(format_args!("disk full"))
            .key_values(&kvs)
            .build();
        assert_eq!(Severity::of(&record), Severity::Critical);

        let record = log::Record::builder()
            .level(log::Level::Warn)
            .args(format_args!("slow"))
            .build();
        assert_eq!(Severity::of(&record), Severity::Warning);
    }

    #[test]
    fn test_of_ignores_unknown_key_value() {
        let kvs: &[(&str, &str)] = &[(SEVERITY_KEY, "LOUD")];
        let record = log::Record::builder()
            .level(log::Level::Info)
            .args(format_args!("hi"))
            .key_values(&kvs)
            .build();
        assert_eq!(Severity::of(&record), Severity::Info);
    }
}
