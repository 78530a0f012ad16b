//! Plain-text renderer, used by one-shot mode

use super::Renderer;
use crate::dashboard::format::relative_time;
use crate::dashboard::{DashboardView, FormattedRecord, Indicators, ListView};
use crate::error::Result;
use std::io::Write;

pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn header(&mut self, view: &DashboardView) -> Result<()> {
        let updated = view
            .last_loaded_at
            .map(|ts| relative_time(ts, view.generated_at))
            .unwrap_or_else(|| "never".to_string());
        writeln!(self.out, "Workflow errors (updated {})", updated)?;
        Ok(())
    }

    fn indicators(&mut self, indicators: &Indicators) -> Result<()> {
        let top = if indicators.top_workflows.is_empty() {
            "-".to_string()
        } else {
            indicators
                .top_workflows
                .iter()
                .map(|w| format!("{} ({})", w.workflow, w.count))
                .collect::<Vec<_>>()
                .join(", ")
        };

        write!(
            self.out,
            "Total errors: {} | Workflows: {} | Top workflows: {}",
            indicators.total, indicators.distinct_workflows, top
        )?;
        if indicators.stale {
            write!(self.out, " (stale)")?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn filters(&mut self, view: &DashboardView) -> Result<()> {
        let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "all".to_string());
        writeln!(
            self.out,
            "Filters: workflow={} node={} severity={}",
            show(&view.criteria.workflow),
            show(&view.criteria.node),
            show(&view.criteria.severity),
        )?;
        Ok(())
    }

    fn card(&mut self, card: &FormattedRecord) -> Result<()> {
        write!(self.out, "[{}] {} / {}", card.severity_label, card.workflow, card.node)?;
        if let Some(last) = &card.last_execution_node {
            write!(self.out, " (Last node: {})", last)?;
        }
        writeln!(self.out, "  {}  {}", card.timestamp, card.relative_time)?;
        writeln!(self.out, "    {}", card.error_message)?;
        writeln!(
            self.out,
            "    Type: {} | Execution ID: {} | Execution Mode: {}",
            card.error_type, card.execution_id, card.execution_mode
        )?;
        writeln!(self.out, "    Stack trace: {}", card.stack_summary)?;
        if let Some(fix) = &card.suggested_fix {
            writeln!(self.out, "    Suggestion: {}", fix)?;
        }
        Ok(())
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, view: &DashboardView) -> Result<()> {
        self.header(view)?;
        self.indicators(&view.indicators)?;
        self.filters(view)?;
        writeln!(self.out)?;

        match &view.list {
            ListView::Cards {
                cards,
                matched,
                shown,
            } => {
                for card in cards {
                    self.card(card)?;
                }
                if shown < matched {
                    writeln!(self.out, "({} of {} errors shown)", shown, matched)?;
                }
            }
            other => {
                if let Some(message) = other.status_message() {
                    writeln!(self.out, "{}", message)?;
                }
            }
        }

        self.out.flush()?;
        Ok(())
    }
}
