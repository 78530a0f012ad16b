//! Error list panel - One card per error, newest feed order
//!
//! Shows a status line instead of cards when nothing is loaded, the feed
//! failed, or no record matches the filters.

use crate::colors::DashboardColors;
use crate::widgets::SeverityBadge;
use flowwatch_core::dashboard::FormattedRecord;
use flowwatch_core::ListView;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Error list panel widget
pub struct ErrorListPanel;

impl ErrorListPanel {
    /// Lines making up one card
    fn card_lines(card: &FormattedRecord) -> Vec<Line<'static>> {
        let mut first = vec![
            SeverityBadge::new(card.severity.clone(), card.severity_label.clone()).render(),
            Span::raw(" "),
            Span::styled(
                card.workflow.clone(),
                Style::default()
                    .fg(DashboardColors::TEXT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" › ", Style::default().fg(DashboardColors::SECONDARY)),
            Span::styled(card.node.clone(), Style::default().fg(DashboardColors::HIGHLIGHT)),
        ];
        if let Some(last) = &card.last_execution_node {
            first.push(Span::styled(
                format!(" (Last node: {})", last),
                Style::default().fg(DashboardColors::SECONDARY),
            ));
        }
        first.push(Span::styled(
            format!("  {}  ", card.timestamp),
            Style::default().fg(DashboardColors::SECONDARY),
        ));
        first.push(Span::styled(
            card.relative_time.clone(),
            Style::default().fg(DashboardColors::HEADER),
        ));

        let mut lines = vec![
            Line::from(first),
            Line::from(Span::raw(format!("  {}", card.error_message))),
            Line::from(Span::styled(
                format!(
                    "  Type: {} | Execution ID: {} | Execution Mode: {}",
                    card.error_type, card.execution_id, card.execution_mode
                ),
                Style::default().fg(DashboardColors::SECONDARY),
            )),
            Line::from(Span::styled(
                format!("  Stack trace: {}", card.stack_summary),
                Style::default().fg(DashboardColors::SECONDARY),
            )),
        ];

        if let Some(fix) = &card.suggested_fix {
            lines.push(Line::from(Span::styled(
                format!("  Suggestion: {}", fix),
                Style::default().fg(DashboardColors::FIX),
            )));
        }

        lines.push(Line::default());
        lines
    }

    fn status_color(list: &ListView) -> Color {
        match list {
            ListView::Failed { .. } => DashboardColors::ERROR,
            ListView::Empty => DashboardColors::WARNING,
            _ => DashboardColors::IDLE,
        }
    }

    /// Render the list panel
    pub fn render(list: &ListView, selected: usize, frame: &mut Frame, area: Rect) {
        let title = match list {
            ListView::Cards { matched, shown, .. } if shown < matched => {
                format!("Errors ({} of {})", shown, matched)
            }
            ListView::Cards { shown, .. } => format!("Errors ({})", shown),
            _ => "Errors".to_string(),
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(DashboardColors::BORDER));

        if let Some(message) = list.status_message() {
            let paragraph = Paragraph::new(Text::from(Span::styled(
                message,
                Style::default()
                    .fg(Self::status_color(list))
                    .add_modifier(Modifier::ITALIC),
            )))
            .wrap(Wrap { trim: true })
            .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let items: Vec<ListItem> = list
            .cards()
            .iter()
            .map(|card| ListItem::new(Text::from(Self::card_lines(card))))
            .collect();

        let widget = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("▌");

        let mut state = ListState::default().with_selected(Some(selected));
        frame.render_stateful_widget(widget, area, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowwatch_core::SeverityLevel;

    fn card() -> FormattedRecord {
        FormattedRecord {
            id: "1".to_string(),
            workflow: "Billing".to_string(),
            node: "HTTP Request".to_string(),
            last_execution_node: None,
            timestamp: "22/07/2025, 14:19".to_string(),
            relative_time: "10 min ago".to_string(),
            severity_label: "CRITICAL".to_string(),
            severity: SeverityLevel::Critical,
            error_message: "timeout".to_string(),
            error_type: "-".to_string(),
            execution_id: "-".to_string(),
            execution_mode: "-".to_string(),
            stack_summary: "-".to_string(),
            suggested_fix: None,
        }
    }

    #[test]
    fn test_card_lines_without_optional_rows() {
        let lines = ErrorListPanel::card_lines(&card());
        // header, message, metadata, stack, spacer
        assert_eq!(lines.len(), 5);
        assert!(lines[0].to_string().contains("Billing › HTTP Request"));
        assert!(!lines[0].to_string().contains("Last node"));
    }

    #[test]
    fn test_card_lines_with_optional_rows() {
        let mut card = card();
        card.last_execution_node = Some("Set".to_string());
        card.suggested_fix = Some("Raise the timeout".to_string());

        let lines = ErrorListPanel::card_lines(&card);
        assert_eq!(lines.len(), 6);
        assert!(lines[0].to_string().contains("(Last node: Set)"));
        assert_eq!(lines[4].to_string(), "  Suggestion: Raise the timeout");
    }
}
