//! Render pipeline: fetch → filter → aggregate → format → view
//!
//! [`Dashboard`] drives one refresh cycle at a time (used by one-shot mode and
//! tests). Interactive front-ends use [`spawn_refresh`] so fetches run in the
//! background while the UI loop keeps sole ownership of [`DashboardState`].

use super::filter::FilterCriteria;
use super::format::{PresentationFormatter, RecordDetail};
use super::state::{DashboardState, RefreshOutcome, RefreshTicket};
use super::view::DashboardView;
use crate::config::DashboardConfig;
use crate::error::FetchError;
use crate::source::ErrorSource;
use crate::types::ErrorRecord;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error};

/// Result of a background fetch, tagged with the refresh it belongs to
#[derive(Debug)]
pub struct FetchCompletion {
    pub ticket: RefreshTicket,
    pub result: Result<Vec<ErrorRecord>, FetchError>,
}

/// Run a fetch on the runtime and report the result over `tx`
pub fn spawn_refresh(
    source: Arc<dyn ErrorSource>,
    ticket: RefreshTicket,
    tx: mpsc::UnboundedSender<FetchCompletion>,
) {
    tokio::spawn(async move {
        debug!(
            "Fetching {} for generation {}",
            source.describe(),
            ticket.generation()
        );
        let result = source.fetch().await;
        if tx.send(FetchCompletion { ticket, result }).is_err() {
            error!("Refresh channel closed, dropping generation {}", ticket.generation());
        }
    });
}

/// Source plus state, refreshed in place
pub struct Dashboard {
    source: Arc<dyn ErrorSource>,
    state: DashboardState,
}

impl Dashboard {
    pub fn new(source: Arc<dyn ErrorSource>, state: DashboardState) -> Self {
        Self { source, state }
    }

    /// Build source and state from configuration
    pub fn from_config(config: &DashboardConfig) -> crate::Result<Self> {
        config.validate()?;
        let source = crate::source::from_config(config)?;
        let formatter =
            PresentationFormatter::new(config.default_severity.clone(), config.display_offset().into());
        Ok(Self::new(source, DashboardState::new(formatter, config.display_limit)))
    }

    pub fn source(&self) -> Arc<dyn ErrorSource> {
        Arc::clone(&self.source)
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut DashboardState {
        &mut self.state
    }

    /// Split into source and state for callers that drive refreshes themselves
    pub fn into_parts(self) -> (Arc<dyn ErrorSource>, DashboardState) {
        (self.source, self.state)
    }

    /// Run one full refresh cycle
    pub async fn refresh(&mut self) -> RefreshOutcome {
        let ticket = self.state.begin_refresh();
        let result = self.source.fetch().await;
        self.state.complete_refresh(ticket, result)
    }

    pub fn apply_filters(&mut self, criteria: FilterCriteria) {
        self.state.apply_filters(criteria);
    }

    pub fn set_display_limit(&mut self, limit: usize) {
        self.state.set_display_limit(limit);
    }

    pub fn record_by_id(&self, id: &str) -> Option<&ErrorRecord> {
        self.state.record_by_id(id)
    }

    pub fn detail(&self, id: &str) -> Option<RecordDetail> {
        self.state.detail(id, Utc::now())
    }

    /// View model as of now
    pub fn view(&self) -> DashboardView {
        self.state.view(Utc::now())
    }
}
