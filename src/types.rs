//! Core data structures for the error feed

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One workflow execution error entry from the feed.
///
/// Records are immutable once fetched. Required text fields fall back to an
/// empty string instead of rejecting the whole batch, and optional fields treat
/// `null` and `""` as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Unique within one fetched batch
    #[serde(default)]
    pub id: String,

    /// Owning workflow name
    #[serde(default)]
    pub workflow: String,

    /// Node where the error occurred
    #[serde(default)]
    pub node: String,

    /// Last node executed before the failure
    #[serde(default)]
    pub last_execution_node: Option<String>,

    /// ISO-8601 timestamp, kept raw and parsed on demand
    #[serde(default)]
    pub error_timestamp: String,

    #[serde(default)]
    pub error_message: String,

    #[serde(default)]
    pub error_type: Option<String>,

    #[serde(default)]
    pub execution_id: Option<String>,

    #[serde(default)]
    pub execution_mode: Option<String>,

    #[serde(default)]
    pub severity: Option<String>,

    #[serde(default)]
    pub stack_trace: Option<String>,

    #[serde(default)]
    pub suggested_fix: Option<String>,

    /// Arbitrary payload shown in the detail view
    #[serde(default)]
    pub full_error_data: Option<serde_json::Value>,
}

impl ErrorRecord {
    /// Create a record with only the required fields set
    pub fn new(
        id: impl Into<String>,
        workflow: impl Into<String>,
        node: impl Into<String>,
        error_timestamp: impl Into<String>,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            workflow: workflow.into(),
            node: node.into(),
            last_execution_node: None,
            error_timestamp: error_timestamp.into(),
            error_message: error_message.into(),
            error_type: None,
            execution_id: None,
            execution_mode: None,
            severity: None,
            stack_trace: None,
            suggested_fix: None,
            full_error_data: None,
        }
    }

    /// Set severity (builder style, mostly for fixtures)
    pub fn with_severity(mut self, severity: impl Into<String>) -> Self {
        self.severity = Some(severity.into());
        self
    }

    /// Severity string as given, or `default` when the record has none
    pub fn effective_severity<'a>(&'a self, default: &'a str) -> &'a str {
        present(&self.severity).unwrap_or(default)
    }

    /// Parse `error_timestamp` into an instant.
    ///
    /// RFC 3339 with an explicit offset is preferred; a bare
    /// `YYYY-MM-DDTHH:MM:SS[.fff]` is read as UTC.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let raw = self.error_timestamp.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }

        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| naive.and_utc())
    }
}

/// Treat `None` and blank strings the same way
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Typed classification of a severity string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLevel {
    Critical,
    Error,
    Warning,
    Info,
    /// Any label the dashboard does not know, lower-cased
    Other(String),
}

impl SeverityLevel {
    /// Classify a severity string (case-insensitive)
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "critical" | "crit" | "fatal" => Self::Critical,
            "error" | "err" | "high" => Self::Error,
            "warning" | "warn" | "medium" => Self::Warning,
            "info" | "information" | "low" => Self::Info,
            _ => Self::Other(normalized),
        }
    }

    /// Sort rank: most urgent first
    pub fn rank(&self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::Error => 1,
            Self::Warning => 2,
            Self::Info => 3,
            Self::Other(_) => 4,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Critical => "critical",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Other(label) => label,
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
