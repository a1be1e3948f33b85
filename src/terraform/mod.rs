mod extractor;
mod model;
mod rules;
mod scanner;
mod value;

pub use extractor::ResourceExtractor;
pub use model::{BlockType, Category, ResourceInventory, ResourceKind, ResourceStats, Tally};
pub use scanner::{ScanError, ScanReport, ScannedFile, SkippedFile, WorkspaceScanner};
pub use value::{extract_value, is_interpolated, DEFAULT_WINDOW};
