//! Dashboard core: the filter / aggregation / formatting / render pipeline
//!
//! - [`filter`]: criteria and the filter engine
//! - [`aggregate`]: summary indicators (totals, top workflows)
//! - [`format`]: per-record display fields
//! - [`state`]: application state and the refresh state machine
//! - [`view`]: the view model renderers consume
//! - [`schedule`]: periodic refresh timing
//! - [`pipeline`]: wiring a source to the state

pub mod aggregate;
pub mod filter;
pub mod format;
pub mod pipeline;
pub mod schedule;
pub mod state;
pub mod view;

pub use aggregate::{aggregate, Indicators, WorkflowCount, TOP_WORKFLOWS};
pub use filter::{FilterCriteria, FilterOptions};
pub use format::{DisplayZone, FormattedRecord, PresentationFormatter, RecordDetail};
pub use pipeline::{spawn_refresh, Dashboard, FetchCompletion};
pub use schedule::RefreshSchedule;
pub use state::{DashboardState, PipelinePhase, RefreshOutcome, RefreshTicket};
pub use view::{DashboardView, ListView};
