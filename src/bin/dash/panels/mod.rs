//! Dashboard panels
//!
//! Each panel renders one area of the screen from the view model:
//! - Indicators: totals, workflow count, top workflows, severity breakdown
//! - Filter bar: current selection and display limit
//! - Error list: one card per error
//! - Detail: modal with a full record

pub mod detail;
pub mod error_list;
pub mod filter_bar;
pub mod indicators;

pub use detail::DetailDialog;
pub use error_list::ErrorListPanel;
pub use filter_bar::FilterBar;
pub use indicators::IndicatorsPanel;
