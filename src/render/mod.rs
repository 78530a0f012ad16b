//! Renderers consuming [`DashboardView`]
//!
//! The pipeline never renders anything itself. Plain-text and JSON renderers
//! live here; the terminal UI lives in the `flowwatch-dash` binary.

pub mod json;
pub mod text;

pub use json::JsonRenderer;
pub use text::TextRenderer;

use crate::dashboard::DashboardView;
use crate::error::Result;

/// Something that can display a view model
pub trait Renderer {
    fn render(&mut self, view: &DashboardView) -> Result<()>;
}
