//! Severity badge widget - Color-coded severity labels

use crate::colors::DashboardColors;
use flowwatch_core::SeverityLevel;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

/// Severity badge widget
pub struct SeverityBadge {
    level: SeverityLevel,
    label: String,
    show_icon: bool,
}

impl SeverityBadge {
    /// Create new badge with the label to display
    pub fn new(level: SeverityLevel, label: impl Into<String>) -> Self {
        Self {
            level,
            label: label.into(),
            show_icon: true,
        }
    }

    /// Set whether to show icon
    pub fn show_icon(mut self, show: bool) -> Self {
        self.show_icon = show;
        self
    }

    fn color(&self) -> Color {
        DashboardColors::severity(&self.level)
    }

    fn icon(&self) -> &'static str {
        match self.level {
            SeverityLevel::Critical => "✗",
            SeverityLevel::Error => "●",
            SeverityLevel::Warning => "⚠",
            SeverityLevel::Info => "ℹ",
            SeverityLevel::Other(_) => "○",
        }
    }

    /// Render as a styled span
    pub fn render(&self) -> Span<'static> {
        let content = if self.show_icon {
            format!("{} {}", self.icon(), self.label)
        } else {
            self.label.clone()
        };

        Span::styled(
            content,
            Style::default()
                .fg(self.color())
                .add_modifier(Modifier::BOLD),
        )
    }
}
