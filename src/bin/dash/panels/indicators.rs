//! Indicators panel - Totals, workflow count, busiest workflows
//!
//! Four boxes side by side:
//! - Total errors
//! - Distinct workflows
//! - Top workflows with counts
//! - Severity breakdown

use crate::colors::DashboardColors;
use crate::widgets::SeverityBadge;
use flowwatch_core::Indicators;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Indicators panel widget
pub struct IndicatorsPanel;

impl IndicatorsPanel {
    /// Lines for the top-workflows box
    fn top_lines(indicators: &Indicators) -> Vec<Line<'static>> {
        if indicators.top_workflows.is_empty() {
            return vec![Line::from(Span::styled(
                "-",
                Style::default().fg(DashboardColors::SECONDARY),
            ))];
        }

        indicators
            .top_workflows
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                Line::from(vec![
                    Span::styled(
                        format!("{}. ", i + 1),
                        Style::default().fg(DashboardColors::SECONDARY),
                    ),
                    Span::styled(entry.workflow.clone(), Style::default().fg(DashboardColors::TEXT)),
                    Span::styled(
                        format!(" ({})", entry.count),
                        Style::default().fg(DashboardColors::SECONDARY),
                    ),
                ])
            })
            .collect()
    }

    fn severity_lines(indicators: &Indicators) -> Vec<Line<'static>> {
        if indicators.by_severity.is_empty() {
            return vec![Line::from(Span::styled(
                "-",
                Style::default().fg(DashboardColors::SECONDARY),
            ))];
        }

        indicators
            .by_severity
            .iter()
            .map(|entry| {
                Line::from(vec![
                    SeverityBadge::new(entry.severity.clone(), entry.severity.as_str().to_uppercase())
                        .show_icon(false)
                        .render(),
                    Span::raw(format!(" {}", entry.count)),
                ])
            })
            .collect()
    }

    fn big_number(value: usize, stale: bool) -> Paragraph<'static> {
        let color = if stale {
            DashboardColors::WARNING
        } else {
            DashboardColors::HIGHLIGHT
        };
        Paragraph::new(Line::from(Span::styled(
            value.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
    }

    fn boxed(title: &str) -> Block<'_> {
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(DashboardColors::BORDER))
    }

    /// Render the indicators panel
    pub fn render(indicators: &Indicators, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(18),
                Constraint::Percentage(18),
                Constraint::Percentage(36),
                Constraint::Percentage(28),
            ])
            .split(area);

        let total_title = if indicators.stale {
            "Total errors (stale)"
        } else {
            "Total errors"
        };
        frame.render_widget(
            Self::big_number(indicators.total, indicators.stale).block(Self::boxed(total_title)),
            chunks[0],
        );
        frame.render_widget(
            Self::big_number(indicators.distinct_workflows, indicators.stale)
                .block(Self::boxed("Workflows")),
            chunks[1],
        );
        frame.render_widget(
            Paragraph::new(Self::top_lines(indicators)).block(Self::boxed("Top workflows")),
            chunks[2],
        );
        frame.render_widget(
            Paragraph::new(Self::severity_lines(indicators)).block(Self::boxed("By severity")),
            chunks[3],
        );
    }
}
