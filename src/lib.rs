//! Flowwatch - Workflow Error Dashboard
//!
//! Periodically fetches a JSON feed of workflow execution errors and turns it
//! into a filterable, auto-refreshing list with summary indicators:
//! - Filter engine (workflow / node / severity)
//! - Aggregation engine (totals, distinct workflows, top workflows)
//! - Presentation formatter (localized time, relative time, severity labels)
//! - Render pipeline producing a renderer-agnostic view model
//!
//! # Architecture
//!
//! - **Types**: the error record as delivered by the feed
//! - **Source**: where records come from (HTTP, local file)
//! - **Dashboard**: state, refresh state machine, engines and view model
//! - **Render**: text and JSON renderers (the TUI lives in `flowwatch-dash`)
//!
//! # Example
//!
//! ```ignore
//! use flowwatch_core::{Dashboard, DashboardConfig, FilterCriteria};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut dashboard = Dashboard::from_config(&DashboardConfig::default())?;
//!     dashboard.refresh().await;
//!     dashboard.apply_filters(FilterCriteria::all().workflow("Billing"));
//!
//!     let view = dashboard.view();
//!     println!("{} errors", view.indicators.total);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dashboard;
pub mod error;
pub mod render;
pub mod source;
pub mod types;

// Re-export commonly used types
pub use config::DashboardConfig;
pub use dashboard::{
    Dashboard, DashboardState, DashboardView, FilterCriteria, Indicators, ListView,
    PipelinePhase, PresentationFormatter, RefreshOutcome,
};
pub use error::{FetchError, FlowwatchError, Result};
pub use source::{ErrorSource, FileErrorSource, HttpErrorSource};
pub use types::{ErrorRecord, SeverityLevel};
