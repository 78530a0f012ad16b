//! Detail dialog - Full record contents over the list
//!
//! Unlike the cards, nothing is truncated here: full stack trace, suggested
//! fix and the raw error payload.

use crate::colors::DashboardColors;
use crossterm::event::KeyCode;
use flowwatch_core::dashboard::RecordDetail;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Modal showing one record in full
pub struct DetailDialog {
    detail: RecordDetail,
    scroll: u16,
}

impl DetailDialog {
    pub fn new(detail: RecordDetail) -> Self {
        Self { detail, scroll: 0 }
    }

    pub fn record_id(&self) -> &str {
        &self.detail.card.id
    }

    /// Handle keyboard input; returns true when the dialog should close
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => return true,
            KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::Home => self.scroll = 0,
            _ => {}
        }
        false
    }

    fn field(label: &str, value: &str) -> Line<'static> {
        Line::from(vec![
            Span::styled(
                format!("{}: ", label),
                Style::default()
                    .fg(DashboardColors::HEADER)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(value.to_string()),
        ])
    }

    fn section(label: &str, body: &str) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::default(),
            Line::from(Span::styled(
                format!("{}:", label),
                Style::default()
                    .fg(DashboardColors::HEADER)
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        lines.extend(body.lines().map(|line| Line::from(format!("  {}", line))));
        lines
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let card = &self.detail.card;
        let mut lines = vec![
            Self::field("ID", &card.id),
            Self::field("Workflow", &card.workflow),
            Self::field("Node", &card.node),
            Self::field(
                "Last node",
                card.last_execution_node.as_deref().unwrap_or("-"),
            ),
            Self::field("Severity", &card.severity_label),
            Self::field(
                "When",
                &format!(
                    "{} ({}, raw {})",
                    card.timestamp, card.relative_time, self.detail.raw_timestamp
                ),
            ),
            Self::field("Type", &card.error_type),
            Self::field("Execution ID", &card.execution_id),
            Self::field("Execution Mode", &card.execution_mode),
            Line::default(),
            Line::from(card.error_message.clone()),
        ];

        lines.extend(Self::section("Stack trace", &self.detail.stack_trace));
        lines.extend(Self::section("Suggestion", &self.detail.suggested_fix));
        lines.extend(Self::section("Error data", &self.detail.full_error_data));
        lines
    }

    /// Render the dialog centered in `area`
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let width = area.width.saturating_sub(8).min(120);
        let height = area.height.saturating_sub(4);
        let dialog_area = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };

        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(format!(
                "Error {} | Esc to close, ↑/↓ to scroll",
                self.detail.card.id
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(DashboardColors::severity(&self.detail.card.severity)));

        let paragraph = Paragraph::new(Text::from(self.lines()))
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0));

        frame.render_widget(paragraph, dialog_area);
    }
}
