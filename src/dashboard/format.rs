//! Presentation formatter: one record in, display-ready strings out
//!
//! Nothing here fails. Absent or unparseable values become [`FALLBACK`].

use crate::types::{present, ErrorRecord, SeverityLevel};
use chrono::{DateTime, FixedOffset, Local, Utc};
use serde::Serialize;

/// Shown wherever a value is missing
pub const FALLBACK: &str = "-";

/// Appended to the first stack line in card summaries
pub const CONTINUATION: &str = " ...";

/// Short regional date/time style, e.g. `22/07/2025, 14:19`
const SHORT_DATETIME: &str = "%d/%m/%Y, %H:%M";

/// Zone used for the absolute timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayZone {
    /// Host's local zone
    #[default]
    Local,
    /// Fixed offset from UTC
    Fixed(FixedOffset),
}

impl From<Option<FixedOffset>> for DisplayZone {
    fn from(offset: Option<FixedOffset>) -> Self {
        offset.map(Self::Fixed).unwrap_or(Self::Local)
    }
}

/// Card fields for one record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedRecord {
    pub id: String,
    pub workflow: String,
    pub node: String,
    /// `None` hides the "last node" hint entirely
    pub last_execution_node: Option<String>,
    pub timestamp: String,
    pub relative_time: String,
    pub severity_label: String,
    pub severity: SeverityLevel,
    pub error_message: String,
    pub error_type: String,
    pub execution_id: String,
    pub execution_mode: String,
    /// First stack line plus continuation marker
    pub stack_summary: String,
    /// `None` hides the suggestion line entirely
    pub suggested_fix: Option<String>,
}

/// Everything about one record, untruncated
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordDetail {
    pub card: FormattedRecord,
    pub raw_timestamp: String,
    pub stack_trace: String,
    pub suggested_fix: String,
    /// Pretty-printed `full_error_data`
    pub full_error_data: String,
}

/// Converts records into display fields
#[derive(Debug, Clone)]
pub struct PresentationFormatter {
    default_severity: String,
    zone: DisplayZone,
}

impl PresentationFormatter {
    pub fn new(default_severity: impl Into<String>, zone: DisplayZone) -> Self {
        Self {
            default_severity: default_severity.into(),
            zone,
        }
    }

    pub fn default_severity(&self) -> &str {
        &self.default_severity
    }

    /// Format a record for a summary card, relative to `now`
    pub fn format(&self, record: &ErrorRecord, now: DateTime<Utc>) -> FormattedRecord {
        let parsed = record.timestamp();
        let severity = record.effective_severity(&self.default_severity);

        FormattedRecord {
            id: record.id.clone(),
            workflow: text_or_fallback(&record.workflow),
            node: text_or_fallback(&record.node),
            last_execution_node: present(&record.last_execution_node).map(str::to_string),
            timestamp: parsed
                .map(|ts| self.local_timestamp(ts))
                .unwrap_or_else(|| FALLBACK.to_string()),
            relative_time: parsed
                .map(|ts| relative_time(ts, now))
                .unwrap_or_else(|| FALLBACK.to_string()),
            severity_label: severity_label(record, &self.default_severity),
            severity: SeverityLevel::parse(severity),
            error_message: text_or_fallback(&record.error_message),
            error_type: optional_or_fallback(&record.error_type),
            execution_id: optional_or_fallback(&record.execution_id),
            execution_mode: optional_or_fallback(&record.execution_mode),
            stack_summary: stack_summary(record.stack_trace.as_deref()),
            suggested_fix: present(&record.suggested_fix).map(str::to_string),
        }
    }

    /// Format a record for the detail view
    pub fn detail(&self, record: &ErrorRecord, now: DateTime<Utc>) -> RecordDetail {
        let full_error_data = match &record.full_error_data {
            None | Some(serde_json::Value::Null) => FALLBACK.to_string(),
            Some(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
        };

        RecordDetail {
            card: self.format(record, now),
            raw_timestamp: text_or_fallback(&record.error_timestamp),
            stack_trace: optional_or_fallback(&record.stack_trace),
            suggested_fix: optional_or_fallback(&record.suggested_fix),
            full_error_data,
        }
    }

    /// Absolute timestamp in the configured zone
    pub fn local_timestamp(&self, ts: DateTime<Utc>) -> String {
        match self.zone {
            DisplayZone::Local => ts.with_timezone(&Local).format(SHORT_DATETIME).to_string(),
            DisplayZone::Fixed(offset) => {
                ts.with_timezone(&offset).format(SHORT_DATETIME).to_string()
            }
        }
    }
}

/// Elapsed time label: "just now", "N min ago", "Nh ago" or "Nd ago".
///
/// Whole units, rounded down. Timestamps in the future count as "just now".
pub fn relative_time(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = now.signed_duration_since(ts).num_seconds().div_euclid(60);
    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return format!("{} min ago", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h ago", hours);
    }

    format!("{}d ago", hours / 24)
}

/// Upper-cased severity, falling back to the default
pub fn severity_label(record: &ErrorRecord, default_severity: &str) -> String {
    record
        .effective_severity(default_severity)
        .trim()
        .to_uppercase()
}

/// First line of a stack trace with a continuation marker
pub fn stack_summary(stack_trace: Option<&str>) -> String {
    match stack_trace.map(str::trim_start).filter(|s| !s.trim().is_empty()) {
        Some(trace) => {
            let first = trace.lines().next().unwrap_or_default().trim_end();
            format!("{}{}", first, CONTINUATION)
        }
        None => FALLBACK.to_string(),
    }
}

fn text_or_fallback(value: &str) -> String {
    if value.trim().is_empty() {
        FALLBACK.to_string()
    } else {
        value.to_string()
    }
}

fn optional_or_fallback(value: &Option<String>) -> String {
    present(value).unwrap_or(FALLBACK).to_string()
}
