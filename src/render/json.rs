//! JSON renderer: the view model as one JSON document

use super::Renderer;
use crate::dashboard::DashboardView;
use crate::error::Result;
use std::io::Write;

pub struct JsonRenderer<W: Write> {
    out: W,
    pretty: bool,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, pretty: true }
    }

    /// Emit single-line JSON instead
    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, view: &DashboardView) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.out, view)?;
        } else {
            serde_json::to_writer(&mut self.out, view)?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
