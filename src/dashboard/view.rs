//! View model handed to renderers
//!
//! Renderers never look at records or state directly; everything they draw is
//! in [`DashboardView`].

use super::aggregate::Indicators;
use super::filter::{FilterCriteria, FilterOptions};
use super::format::FormattedRecord;
use super::state::PipelinePhase;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Snapshot of everything a renderer needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub phase: PipelinePhase,
    pub criteria: FilterCriteria,
    /// 0 means unlimited
    pub display_limit: usize,
    pub options: FilterOptions,
    pub indicators: Indicators,
    pub list: ListView,
    /// Completion time of the last successful fetch
    pub last_loaded_at: Option<DateTime<Utc>>,
    /// Instant relative times were computed against
    pub generated_at: DateTime<Utc>,
}

/// What the record list area shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ListView {
    /// No refresh requested yet
    NotLoaded,
    /// First fetch in flight
    Loading,
    /// Loaded, but nothing matches the filters
    Empty,
    /// Latest fetch failed
    Failed { message: String },
    /// Cards for the first `shown` of `matched` records
    Cards {
        cards: Vec<FormattedRecord>,
        matched: usize,
        shown: usize,
    },
}

impl ListView {
    /// Cards currently displayed (empty for every non-card state)
    pub fn cards(&self) -> &[FormattedRecord] {
        match self {
            Self::Cards { cards, .. } => cards,
            _ => &[],
        }
    }

    /// One-line status text for non-card states
    pub fn status_message(&self) -> Option<String> {
        match self {
            Self::NotLoaded => Some("Waiting for first refresh...".to_string()),
            Self::Loading => Some("Loading errors...".to_string()),
            Self::Empty => Some("No errors found.".to_string()),
            Self::Failed { message } => Some(format!("Failed to load data: {}", message)),
            Self::Cards { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_messages() {
        assert_eq!(ListView::Empty.status_message().as_deref(), Some("No errors found."));
        assert_eq!(
            ListView::Failed {
                message: "boom".to_string()
            }
            .status_message()
            .as_deref(),
            Some("Failed to load data: boom")
        );
        let cards = ListView::Cards {
            cards: Vec::new(),
            matched: 0,
            shown: 0,
        };
        assert!(cards.status_message().is_none());
        assert!(ListView::Loading.cards().is_empty());
    }

    #[test]
    fn test_list_view_serializes_with_state_tag() {
        let json = serde_json::to_value(ListView::Failed {
            message: "HTTP 500".to_string(),
        })
        .unwrap();
        assert_eq!(json["state"], "failed");
        assert_eq!(json["message"], "HTTP 500");

        let json = serde_json::to_value(ListView::Empty).unwrap();
        assert_eq!(json["state"], "empty");
    }
}
