//! Filter engine for the error list
//!
//! Criteria are conjunctive: every non-empty criterion must match, empty ones
//! impose nothing. Filtering never reorders records.

use crate::types::{present, ErrorRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Current filter selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Exact workflow name
    #[serde(default)]
    pub workflow: Option<String>,
    /// Exact node name
    #[serde(default)]
    pub node: Option<String>,
    /// Effective severity (case-insensitive)
    #[serde(default)]
    pub severity: Option<String>,
}

impl FilterCriteria {
    /// Criteria that let every record through
    pub fn all() -> Self {
        Self::default()
    }

    pub fn workflow(mut self, workflow: impl Into<String>) -> Self {
        self.workflow = Some(workflow.into());
        self
    }

    pub fn node(mut self, node: impl Into<String>) -> Self {
        self.node = Some(node.into());
        self
    }

    pub fn severity(mut self, severity: impl Into<String>) -> Self {
        self.severity = Some(severity.into());
        self
    }

    /// True when no criterion constrains anything
    pub fn is_empty(&self) -> bool {
        present(&self.workflow).is_none()
            && present(&self.node).is_none()
            && present(&self.severity).is_none()
    }

    /// Check if a record passes these criteria
    pub fn matches(&self, record: &ErrorRecord, default_severity: &str) -> bool {
        if let Some(workflow) = present(&self.workflow) {
            if record.workflow != workflow {
                return false;
            }
        }

        if let Some(node) = present(&self.node) {
            if record.node != node {
                return false;
            }
        }

        if let Some(severity) = present(&self.severity) {
            if !record
                .effective_severity(default_severity)
                .eq_ignore_ascii_case(severity.trim())
            {
                return false;
            }
        }

        true
    }

    /// Records passing the criteria, in input order
    pub fn apply<'a>(
        &self,
        records: &'a [ErrorRecord],
        default_severity: &str,
    ) -> Vec<&'a ErrorRecord> {
        records
            .iter()
            .filter(|record| self.matches(record, default_severity))
            .collect()
    }
}

/// Distinct values observed in the full record set, for filter controls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub workflows: Vec<String>,
    pub nodes: Vec<String>,
    /// Effective severities, lower-cased
    pub severities: Vec<String>,
}

impl FilterOptions {
    /// Collect sorted distinct values from a record set
    pub fn from_records(records: &[ErrorRecord], default_severity: &str) -> Self {
        let mut workflows = BTreeSet::new();
        let mut nodes = BTreeSet::new();
        let mut severities = BTreeSet::new();

        for record in records {
            if !record.workflow.is_empty() {
                workflows.insert(record.workflow.clone());
            }
            if !record.node.is_empty() {
                nodes.insert(record.node.clone());
            }
            severities.insert(
                record
                    .effective_severity(default_severity)
                    .trim()
                    .to_ascii_lowercase(),
            );
        }

        Self {
            workflows: workflows.into_iter().collect(),
            nodes: nodes.into_iter().collect(),
            severities: severities.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(id: &str, workflow: &str, node: &str, severity: Option<&str>) -> ErrorRecord {
        let mut record = ErrorRecord::new(id, workflow, node, "2025-07-22T14:19:00Z", "boom");
        record.severity = severity.map(str::to_string);
        record
    }

    fn sample() -> Vec<ErrorRecord> {
        vec![
            record("1", "Billing", "HTTP Request", Some("warning")),
            record("2", "Billing", "Postgres", None),
            record("3", "Onboarding", "HTTP Request", Some("CRITICAL")),
            record("4", "Reports", "Spreadsheet", Some("info")),
        ]
    }

    #[test]
    fn test_empty_criteria_is_identity() {
        let records = sample();
        let filtered = FilterCriteria::all().apply(&records, "critical");
        assert_eq!(filtered.len(), records.len());
        assert!(filtered.iter().zip(&records).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_blank_criteria_impose_nothing() {
        let records = sample();
        let criteria = FilterCriteria::all().workflow("").node("  ");
        assert!(criteria.is_empty());
        assert_eq!(criteria.apply(&records, "critical").len(), 4);
    }

    #[test]
    fn test_workflow_filter_is_exact() {
        let records = sample();
        let filtered = FilterCriteria::all().workflow("Billing").apply(&records, "critical");
        let ids: Vec<&str> = filtered.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);

        assert!(FilterCriteria::all()
            .workflow("billing")
            .apply(&records, "critical")
            .is_empty());
    }

    #[test]
    fn test_compound_criteria() {
        let records = sample();
        let filtered = FilterCriteria::all()
            .workflow("Billing")
            .node("HTTP Request")
            .apply(&records, "critical");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "1");
    }

    #[test]
    fn test_severity_uses_default_and_ignores_case() {
        let records = sample();
        let filtered = FilterCriteria::all().severity("critical").apply(&records, "critical");
        let ids: Vec<&str> = filtered.iter().map(|r| r.id.as_str()).collect();
        // Record 2 has no severity and falls back to the default
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let records = sample();
        assert!(FilterCriteria::all()
            .workflow("Missing")
            .apply(&records, "critical")
            .is_empty());
    }

    #[test]
    fn test_filter_options() {
        let options = FilterOptions::from_records(&sample(), "critical");
        assert_eq!(options.workflows, vec!["Billing", "Onboarding", "Reports"]);
        assert_eq!(options.nodes, vec!["HTTP Request", "Postgres", "Spreadsheet"]);
        assert_eq!(options.severities, vec!["critical", "info", "warning"]);
    }

    fn arb_records() -> impl Strategy<Value = Vec<ErrorRecord>> {
        prop::collection::vec(
            (
                "[A-C]",
                "[x-z]",
                prop::option::of(prop_oneof!["critical", "warning", "info"]),
            ),
            0..30,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (wf, node, sev))| {
                    let mut r = ErrorRecord::new(i.to_string(), wf, node, "", "m");
                    r.severity = sev;
                    r
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_filter_is_idempotent(
            records in arb_records(),
            workflow in prop::option::of("[A-C]"),
            severity in prop::option::of(prop_oneof!["critical", "warning", "info"]),
        ) {
            let criteria = FilterCriteria { workflow, node: None, severity };
            let once: Vec<ErrorRecord> = criteria
                .apply(&records, "critical")
                .into_iter()
                .cloned()
                .collect();
            let twice: Vec<ErrorRecord> = criteria
                .apply(&once, "critical")
                .into_iter()
                .cloned()
                .collect();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_empty_criteria_identity(records in arb_records()) {
            let filtered = FilterCriteria::all().apply(&records, "critical");
            prop_assert_eq!(filtered.len(), records.len());
        }
    }
}
