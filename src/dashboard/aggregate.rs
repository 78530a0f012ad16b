//! Summary indicators computed over a record set
//!
//! Always recomputed from scratch; feeds are small enough that incremental
//! bookkeeping is not worth the invalidation rules.

use crate::types::{ErrorRecord, SeverityLevel};
use serde::Serialize;
use std::collections::HashMap;

/// Number of workflows shown in the top list
pub const TOP_WORKFLOWS: usize = 3;

/// Occurrence count for one workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowCount {
    pub workflow: String,
    pub count: usize,
}

/// Occurrence count for one severity level
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeverityCount {
    pub severity: SeverityLevel,
    pub count: usize,
}

/// Indicator values shown above the list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Indicators {
    /// Number of records
    pub total: usize,
    /// Number of unique workflow names
    pub distinct_workflows: usize,
    /// Busiest workflows, count descending, ties in first-seen order
    pub top_workflows: Vec<WorkflowCount>,
    /// Breakdown by effective severity, most urgent first
    pub by_severity: Vec<SeverityCount>,
    /// Computed from a set kept after a failed refresh
    pub stale: bool,
}

/// Compute indicators with the default top-N size
pub fn aggregate<'a, I>(records: I, default_severity: &str) -> Indicators
where
    I: IntoIterator<Item = &'a ErrorRecord>,
{
    aggregate_top(records, default_severity, TOP_WORKFLOWS)
}

/// Compute indicators keeping the `n` busiest workflows
pub fn aggregate_top<'a, I>(records: I, default_severity: &str, n: usize) -> Indicators
where
    I: IntoIterator<Item = &'a ErrorRecord>,
{
    let mut total = 0;

    // Vec keeps first-seen order, the map points into it
    let mut workflows: Vec<WorkflowCount> = Vec::new();
    let mut workflow_index: HashMap<&str, usize> = HashMap::new();

    let mut severities: Vec<SeverityCount> = Vec::new();

    for record in records {
        total += 1;

        match workflow_index.get(record.workflow.as_str()) {
            Some(&idx) => workflows[idx].count += 1,
            None => {
                workflow_index.insert(record.workflow.as_str(), workflows.len());
                workflows.push(WorkflowCount {
                    workflow: record.workflow.clone(),
                    count: 1,
                });
            }
        }

        let level = SeverityLevel::parse(record.effective_severity(default_severity));
        match severities.iter_mut().find(|s| s.severity == level) {
            Some(entry) => entry.count += 1,
            None => severities.push(SeverityCount {
                severity: level,
                count: 1,
            }),
        }
    }

    let distinct_workflows = workflows.len();

    // sort_by is stable, so equal counts stay in first-seen order
    workflows.sort_by(|a, b| b.count.cmp(&a.count));
    workflows.truncate(n);

    severities.sort_by_key(|s| s.severity.rank());

    Indicators {
        total,
        distinct_workflows,
        top_workflows: workflows,
        by_severity: severities,
        stale: false,
    }
}
