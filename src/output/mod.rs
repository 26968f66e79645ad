//! Output formatters for check results

mod compact;
mod json;
mod text;

pub use compact::CompactFormatter;
pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::annotation::Annotation;
use crate::report::CheckRun;

/// Output formatter trait
pub trait OutputFormatter: Send + Sync {
    /// Format the entire check run
    fn format(&self, run: &CheckRun) -> String;

    /// Format a single annotation
    fn format_annotation(&self, annotation: &Annotation) -> String;
}
