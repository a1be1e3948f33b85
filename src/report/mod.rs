//! Markdown rendering of scan results.

pub mod document;
pub mod labels;
pub mod sections;

pub use document::{ReportBuilder, DEFAULT_TITLE};
pub use labels::Labels;
pub use sections::render_inventory;
