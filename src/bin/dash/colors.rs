//! Consistent color palette for the dashboard
//!
//! All panels should use these constants for visual consistency.

use flowwatch_core::SeverityLevel;
use ratatui::style::Color;

/// Color palette for dashboard elements
pub struct DashboardColors;

impl DashboardColors {
    // === Status Colors ===

    /// Feed reachable, data fresh
    pub const SUCCESS: Color = Color::Green;

    /// Loading, stale data
    pub const WARNING: Color = Color::Yellow;

    /// Fetch failed
    pub const ERROR: Color = Color::Red;

    /// Nothing loaded yet
    pub const IDLE: Color = Color::Gray;

    // === Severity Colors ===

    pub const SEVERITY_CRITICAL: Color = Color::Red;
    pub const SEVERITY_ERROR: Color = Color::LightRed;
    pub const SEVERITY_WARNING: Color = Color::Yellow;
    pub const SEVERITY_INFO: Color = Color::Cyan;
    pub const SEVERITY_OTHER: Color = Color::Gray;

    // === UI Elements ===

    /// Panel borders (Cyan)
    pub const BORDER: Color = Color::Cyan;

    /// Headers and labels (Yellow)
    pub const HEADER: Color = Color::Yellow;

    /// Secondary text (DarkGray)
    pub const SECONDARY: Color = Color::DarkGray;

    /// Primary text (White)
    pub const TEXT: Color = Color::White;

    /// Highlighted text (Cyan)
    pub const HIGHLIGHT: Color = Color::Cyan;

    /// Suggested fixes (LightGreen)
    pub const FIX: Color = Color::LightGreen;

    /// Color for a severity level
    pub fn severity(level: &SeverityLevel) -> Color {
        match level {
            SeverityLevel::Critical => Self::SEVERITY_CRITICAL,
            SeverityLevel::Error => Self::SEVERITY_ERROR,
            SeverityLevel::Warning => Self::SEVERITY_WARNING,
            SeverityLevel::Info => Self::SEVERITY_INFO,
            SeverityLevel::Other(_) => Self::SEVERITY_OTHER,
        }
    }
}
