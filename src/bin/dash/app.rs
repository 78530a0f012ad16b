//! Application state for the terminal dashboard
//!
//! Wraps the core [`DashboardState`] with UI-only state: selection, detail
//! dialog, fullscreen. Key handling maps to [`Action`]s the run loop executes.

use crate::panels::DetailDialog;
use chrono::Utc;
use crossterm::event::KeyCode;
use flowwatch_core::dashboard::{spawn_refresh, FetchCompletion};
use flowwatch_core::{DashboardState, ErrorSource, FilterCriteria, RefreshOutcome};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// Display limits cycled with `l` (0 = all)
const LIMIT_STEPS: [usize; 4] = [10, 25, 50, 0];

/// What the run loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Refresh,
    Quit,
}

/// Application state
pub struct App {
    /// Core dashboard state (records, filters, refresh state machine)
    pub state: DashboardState,
    /// Feed location shown in the header
    pub source_name: String,
    /// Selected card index
    pub selected: usize,
    /// Open detail dialog
    pub detail: Option<DetailDialog>,
    /// Hide header and indicators (wall-display mode)
    pub fullscreen: bool,
}

impl App {
    pub fn new(state: DashboardState, source_name: String) -> Self {
        Self {
            state,
            source_name,
            selected: 0,
            detail: None,
            fullscreen: false,
        }
    }

    /// Begin a refresh and fetch in the background
    pub fn start_refresh(
        &mut self,
        source: &Arc<dyn ErrorSource>,
        tx: &mpsc::UnboundedSender<FetchCompletion>,
    ) {
        let ticket = self.state.begin_refresh();
        spawn_refresh(Arc::clone(source), ticket, tx.clone());
    }

    /// Apply a finished fetch
    pub fn finish_refresh(&mut self, completion: FetchCompletion) -> RefreshOutcome {
        let outcome = self.state.complete_refresh(completion.ticket, completion.result);
        self.clamp_selection();
        if let RefreshOutcome::Applied { .. } = outcome {
            // The record behind an open dialog may be gone now
            if let Some(dialog) = &self.detail {
                if self.state.record_by_id(dialog.record_id()).is_none() {
                    self.detail = None;
                }
            }
        }
        outcome
    }

    /// Number of cards on screen; zero while the list shows a status line
    fn visible_count(&self) -> usize {
        self.state.view(Utc::now()).list.cards().len()
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_count();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
    }

    fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.state.apply_filters(criteria);
        self.selected = 0;
    }

    fn open_detail(&mut self) {
        let now = Utc::now();
        let view = self.state.view(now);
        // Only a card that is on screen can be opened
        let id = view.list.cards().get(self.selected).map(|card| card.id.clone());

        if let Some(detail) = id.and_then(|id| self.state.detail(&id, now)) {
            debug!("Opening detail for {}", detail.card.id);
            self.detail = Some(DetailDialog::new(detail));
        }
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyCode) -> Action {
        if let Some(dialog) = self.detail.as_mut() {
            if dialog.handle_key(key) {
                self.detail = None;
            }
            return Action::None;
        }

        match key {
            KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
            KeyCode::Char('r') => return Action::Refresh,
            KeyCode::Char('f') => self.fullscreen = !self.fullscreen,
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.visible_count() {
                    self.selected += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Enter => self.open_detail(),
            KeyCode::Char('w') => {
                let mut criteria = self.state.criteria().clone();
                criteria.workflow = next_option(&criteria.workflow, &self.state.options().workflows);
                self.set_criteria(criteria);
            }
            KeyCode::Char('n') => {
                let mut criteria = self.state.criteria().clone();
                criteria.node = next_option(&criteria.node, &self.state.options().nodes);
                self.set_criteria(criteria);
            }
            KeyCode::Char('s') => {
                let mut criteria = self.state.criteria().clone();
                criteria.severity = next_option(&criteria.severity, &self.state.options().severities);
                self.set_criteria(criteria);
            }
            KeyCode::Char('c') => self.set_criteria(FilterCriteria::all()),
            KeyCode::Char('l') => {
                let limit = next_limit(self.state.display_limit());
                self.state.set_display_limit(limit);
                self.clamp_selection();
            }
            _ => {}
        }
        Action::None
    }
}

/// Cycle "all" → first option → ... → last option → "all"
pub fn next_option(current: &Option<String>, options: &[String]) -> Option<String> {
    match current {
        None => options.first().cloned(),
        Some(value) => match options.iter().position(|option| option == value) {
            Some(idx) => options.get(idx + 1).cloned(),
            None => options.first().cloned(),
        },
    }
}

/// Next display limit in the cycle
pub fn next_limit(current: usize) -> usize {
    match LIMIT_STEPS.iter().position(|&step| step == current) {
        Some(idx) => LIMIT_STEPS[(idx + 1) % LIMIT_STEPS.len()],
        None => LIMIT_STEPS[0],
    }
}
