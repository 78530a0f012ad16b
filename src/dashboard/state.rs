//! Dashboard application state and its refresh state machine
//!
//! ```text
//! Idle ──begin_refresh──▶ Loading ──complete_refresh(Ok)──▶ Rendered
//!                            ▲    └─complete_refresh(Err)─▶ LoadFailed
//!                            └──────── begin_refresh ◀──────────┘
//! ```
//!
//! Every refresh gets a generation number. Only the newest generation may
//! complete a refresh; older responses are dropped.

use super::aggregate::{aggregate, Indicators};
use super::filter::{FilterCriteria, FilterOptions};
use super::format::{PresentationFormatter, RecordDetail};
use super::view::{DashboardView, ListView};
use crate::error::FetchError;
use crate::types::ErrorRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Refresh state machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelinePhase {
    /// Nothing requested yet
    Idle,
    /// A fetch is in flight
    Loading,
    /// Latest fetch succeeded
    Rendered,
    /// Latest fetch failed
    LoadFailed,
}

/// Proof that a refresh was started; carries its generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefreshTicket {
    generation: u64,
}

impl RefreshTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What `complete_refresh` did with a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Record set replaced
    Applied { records: usize },
    /// Failure recorded, previous records kept
    Failed { message: String },
    /// A newer refresh was started; response dropped
    Stale,
}

/// Everything the dashboard knows, owned by the render pipeline
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// `None` until the first successful fetch
    records: Option<Vec<ErrorRecord>>,
    criteria: FilterCriteria,
    /// 0 means unlimited
    display_limit: usize,
    options: FilterOptions,
    phase: PipelinePhase,
    /// Message of the most recent completed refresh, if it failed
    last_error: Option<String>,
    /// Newest generation handed out
    generation: u64,
    loaded_at: Option<DateTime<Utc>>,
    formatter: PresentationFormatter,
}

impl DashboardState {
    pub fn new(formatter: PresentationFormatter, display_limit: usize) -> Self {
        Self {
            records: None,
            criteria: FilterCriteria::default(),
            display_limit,
            options: FilterOptions::default(),
            phase: PipelinePhase::Idle,
            last_error: None,
            generation: 0,
            loaded_at: None,
            formatter,
        }
    }

    pub fn phase(&self) -> PipelinePhase {
        self.phase
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn display_limit(&self) -> usize {
        self.display_limit
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Full record set of the last successful fetch
    pub fn records(&self) -> Option<&[ErrorRecord]> {
        self.records.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Start a refresh cycle
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.generation += 1;
        self.phase = PipelinePhase::Loading;
        debug!("Refresh generation {} started", self.generation);
        RefreshTicket {
            generation: self.generation,
        }
    }

    /// Finish a refresh cycle with the fetch result
    pub fn complete_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<Vec<ErrorRecord>, FetchError>,
    ) -> RefreshOutcome {
        if ticket.generation != self.generation {
            warn!(
                "Dropping response of generation {} (newest is {})",
                ticket.generation, self.generation
            );
            return RefreshOutcome::Stale;
        }

        match result {
            Ok(records) => {
                let count = records.len();
                self.options =
                    FilterOptions::from_records(&records, self.formatter.default_severity());
                self.records = Some(records);
                self.last_error = None;
                self.loaded_at = Some(Utc::now());
                self.phase = PipelinePhase::Rendered;
                info!("Loaded {} error records (generation {})", count, ticket.generation);
                RefreshOutcome::Applied { records: count }
            }
            Err(err) => {
                let message = err.to_string();
                warn!("Refresh generation {} failed: {}", ticket.generation, message);
                self.last_error = Some(message.clone());
                self.phase = PipelinePhase::LoadFailed;
                RefreshOutcome::Failed { message }
            }
        }
    }

    /// Replace the filter criteria; re-filters loaded data, no fetch
    pub fn apply_filters(&mut self, criteria: FilterCriteria) {
        debug!("Filters changed: {:?}", criteria);
        self.criteria = criteria;
    }

    /// Cap the number of displayed cards (0 = unlimited)
    pub fn set_display_limit(&mut self, limit: usize) {
        self.display_limit = limit;
    }

    /// Look up a record of the current set by id
    pub fn record_by_id(&self, id: &str) -> Option<&ErrorRecord> {
        self.records.as_ref()?.iter().find(|record| record.id == id)
    }

    /// Detail view for a record; unknown ids yield `None`
    pub fn detail(&self, id: &str, now: DateTime<Utc>) -> Option<RecordDetail> {
        self.record_by_id(id)
            .map(|record| self.formatter.detail(record, now))
    }

    /// Records passing the current criteria, uncapped
    pub fn filtered(&self) -> Vec<&ErrorRecord> {
        match &self.records {
            Some(records) => self
                .criteria
                .apply(records, self.formatter.default_severity()),
            None => Vec::new(),
        }
    }

    /// Indicators over the full filtered set, never the capped slice
    pub fn indicators(&self) -> Indicators {
        self.indicators_of(&self.filtered())
    }

    fn indicators_of(&self, filtered: &[&ErrorRecord]) -> Indicators {
        let mut indicators = aggregate(filtered.iter().copied(), self.formatter.default_severity());
        indicators.stale = self.last_error.is_some() && self.records.is_some();
        indicators
    }

    /// Build the view model for the current state
    pub fn view(&self, now: DateTime<Utc>) -> DashboardView {
        let filtered = self.filtered();
        let indicators = self.indicators_of(&filtered);

        let list = match (&self.phase, &self.last_error, &self.records) {
            (PipelinePhase::Idle, _, _) => ListView::NotLoaded,
            // A failure stays on screen until a later refresh succeeds
            (PipelinePhase::LoadFailed, Some(message), _)
            | (PipelinePhase::Loading, Some(message), _) => ListView::Failed {
                message: message.clone(),
            },
            (_, _, None) => ListView::Loading,
            (_, _, Some(_)) if filtered.is_empty() => ListView::Empty,
            (_, _, Some(_)) => {
                let matched = filtered.len();
                let cards: Vec<_> = filtered
                    .iter()
                    .take(self.effective_limit(matched))
                    .map(|record| self.formatter.format(record, now))
                    .collect();
                ListView::Cards {
                    shown: cards.len(),
                    matched,
                    cards,
                }
            }
        };

        DashboardView {
            phase: self.phase,
            criteria: self.criteria.clone(),
            display_limit: self.display_limit,
            options: self.options.clone(),
            indicators,
            list,
            last_loaded_at: self.loaded_at,
            generated_at: now,
        }
    }

    fn effective_limit(&self, matched: usize) -> usize {
        if self.display_limit == 0 {
            matched
        } else {
            self.display_limit.min(matched)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::format::DisplayZone;
    use chrono::FixedOffset;

    fn state() -> DashboardState {
        let formatter = PresentationFormatter::new(
            "critical",
            DisplayZone::Fixed(FixedOffset::east_opt(0).unwrap()),
        );
        DashboardState::new(formatter, 10)
    }

    fn record(id: &str, workflow: &str) -> ErrorRecord {
        ErrorRecord::new(id, workflow, "node", "2025-07-22T14:19:00Z", "failed")
    }

    fn load(state: &mut DashboardState, records: Vec<ErrorRecord>) {
        let ticket = state.begin_refresh();
        state.complete_refresh(ticket, Ok(records));
    }

    fn network_error() -> FetchError {
        FetchError::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ))
    }

    #[test]
    fn test_initial_state_is_not_loaded() {
        let state = state();
        assert_eq!(state.phase(), PipelinePhase::Idle);
        assert_eq!(state.view(Utc::now()).list, ListView::NotLoaded);
    }

    #[test]
    fn test_loading_before_first_response() {
        let mut state = state();
        state.begin_refresh();
        assert_eq!(state.phase(), PipelinePhase::Loading);
        assert_eq!(state.view(Utc::now()).list, ListView::Loading);
    }

    #[test]
    fn test_empty_feed_renders_no_records_state() {
        let mut state = state();
        load(&mut state, Vec::new());

        let view = state.view(Utc::now());
        assert_eq!(view.phase, PipelinePhase::Rendered);
        assert_eq!(view.list, ListView::Empty);
        assert_eq!(view.indicators.total, 0);
        assert_eq!(view.indicators.distinct_workflows, 0);
        assert!(view.indicators.top_workflows.is_empty());
    }

    #[test]
    fn test_failure_then_recovery() {
        let mut state = state();
        let ticket = state.begin_refresh();
        let outcome = state.complete_refresh(ticket, Err(network_error()));
        assert!(matches!(outcome, RefreshOutcome::Failed { .. }));
        assert_eq!(state.phase(), PipelinePhase::LoadFailed);
        assert!(matches!(state.view(Utc::now()).list, ListView::Failed { .. }));

        load(&mut state, vec![record("1", "A")]);
        assert_eq!(state.phase(), PipelinePhase::Rendered);
        assert!(state.last_error().is_none());
        assert!(matches!(state.view(Utc::now()).list, ListView::Cards { .. }));
    }

    #[test]
    fn test_failure_keeps_previous_records_as_stale() {
        let mut state = state();
        load(&mut state, vec![record("1", "A"), record("2", "B")]);

        let ticket = state.begin_refresh();
        state.complete_refresh(ticket, Err(FetchError::Status(500)));

        assert_eq!(state.records().map(|r| r.len()), Some(2));
        let view = state.view(Utc::now());
        assert_eq!(
            view.list,
            ListView::Failed {
                message: "Error feed answered with HTTP 500".to_string()
            }
        );
        assert_eq!(view.indicators.total, 2);
        assert!(view.indicators.stale);
    }

    #[test]
    fn test_failure_message_persists_while_retrying() {
        let mut state = state();
        let ticket = state.begin_refresh();
        state.complete_refresh(ticket, Err(FetchError::Status(502)));

        state.begin_refresh();
        assert!(matches!(state.view(Utc::now()).list, ListView::Failed { .. }));
    }

    #[test]
    fn test_stale_generation_is_discarded() {
        let mut state = state();
        let first = state.begin_refresh();
        let second = state.begin_refresh();
        assert!(second > first);

        let outcome = state.complete_refresh(first, Ok(vec![record("old", "A")]));
        assert_eq!(outcome, RefreshOutcome::Stale);
        assert!(state.records().is_none());
        assert_eq!(state.phase(), PipelinePhase::Loading);

        let outcome = state.complete_refresh(second, Ok(vec![record("new", "B")]));
        assert_eq!(outcome, RefreshOutcome::Applied { records: 1 });
        assert!(state.record_by_id("new").is_some());
        assert!(state.record_by_id("old").is_none());

        // Late arrival after the newest completed
        assert_eq!(
            state.complete_refresh(first, Err(FetchError::Status(500))),
            RefreshOutcome::Stale
        );
        assert_eq!(state.phase(), PipelinePhase::Rendered);
    }

    #[test]
    fn test_reload_replaces_set_wholesale() {
        let mut state = state();
        load(&mut state, vec![record("1", "A"), record("2", "A")]);
        load(&mut state, vec![record("3", "C")]);

        assert_eq!(state.records().map(|r| r.len()), Some(1));
        assert_eq!(state.options().workflows, vec!["C"]);
    }

    #[test]
    fn test_filters_apply_without_fetch() {
        let mut state = state();
        load(&mut state, vec![record("1", "A"), record("2", "B"), record("3", "A")]);

        state.apply_filters(FilterCriteria::all().workflow("A"));
        let view = state.view(Utc::now());
        assert_eq!(view.indicators.total, 2);
        match view.list {
            ListView::Cards { cards, matched, shown } => {
                assert_eq!(matched, 2);
                assert_eq!(shown, 2);
                assert_eq!(cards[0].id, "1");
                assert_eq!(cards[1].id, "3");
            }
            other => panic!("expected cards, got {:?}", other),
        }

        state.apply_filters(FilterCriteria::all().workflow("Z"));
        assert_eq!(state.view(Utc::now()).list, ListView::Empty);
        // Options come from the full set, not the filtered one
        assert_eq!(state.options().workflows, vec!["A", "B"]);
    }

    #[test]
    fn test_display_limit_does_not_affect_indicators() {
        let mut state = state();
        let records: Vec<ErrorRecord> = (0..25)
            .map(|i| record(&i.to_string(), if i % 2 == 0 { "Even" } else { "Odd" }))
            .collect();
        load(&mut state, records);

        state.set_display_limit(5);
        let view = state.view(Utc::now());
        assert_eq!(view.indicators.total, 25);
        assert_eq!(view.indicators.top_workflows[0].workflow, "Even");
        assert_eq!(view.indicators.top_workflows[0].count, 13);
        assert_eq!(state.indicators(), view.indicators);
        match view.list {
            ListView::Cards { matched, shown, .. } => {
                assert_eq!(matched, 25);
                assert_eq!(shown, 5);
            }
            other => panic!("expected cards, got {:?}", other),
        }

        state.set_display_limit(0);
        match state.view(Utc::now()).list {
            ListView::Cards { shown, .. } => assert_eq!(shown, 25),
            other => panic!("expected cards, got {:?}", other),
        }
    }

    #[test]
    fn test_record_lookup() {
        let mut state = state();
        assert!(state.record_by_id("1").is_none());

        load(&mut state, vec![record("1", "A")]);
        assert_eq!(state.record_by_id("1").map(|r| r.workflow.as_str()), Some("A"));
        assert!(state.record_by_id("missing").is_none());
        assert!(state.detail("missing", Utc::now()).is_none());
        assert_eq!(
            state.detail("1", Utc::now()).map(|d| d.card.workflow),
            Some("A".to_string())
        );
    }
}
