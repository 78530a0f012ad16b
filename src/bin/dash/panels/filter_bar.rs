//! Filter bar - Current filter selection and display limit

use crate::colors::DashboardColors;
use flowwatch_core::DashboardView;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Filter bar widget
pub struct FilterBar;

impl FilterBar {
    fn value(value: &Option<String>) -> String {
        value.clone().unwrap_or_else(|| "all".to_string())
    }

    fn line(view: &DashboardView) -> Line<'static> {
        let label = Style::default().fg(DashboardColors::SECONDARY);
        let value = Style::default().fg(DashboardColors::HIGHLIGHT);
        let limit = if view.display_limit == 0 {
            "all".to_string()
        } else {
            view.display_limit.to_string()
        };

        Line::from(vec![
            Span::styled("[w]orkflow: ", label),
            Span::styled(Self::value(&view.criteria.workflow), value),
            Span::styled("  [n]ode: ", label),
            Span::styled(Self::value(&view.criteria.node), value),
            Span::styled("  [s]everity: ", label),
            Span::styled(Self::value(&view.criteria.severity), value),
            Span::styled("  [l]imit: ", label),
            Span::styled(limit, value),
        ])
    }

    pub fn render(view: &DashboardView, frame: &mut Frame, area: Rect) {
        frame.render_widget(Paragraph::new(Self::line(view)), area);
    }
}
