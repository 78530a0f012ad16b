//! Reusable dashboard widgets

pub mod severity_badge;

pub use severity_badge::SeverityBadge;
