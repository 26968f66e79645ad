//! Compact output formatter
//!
//! One line per annotation, minimal output for scripting and editors.

use super::OutputFormatter;
use crate::annotation::Annotation;
use crate::report::CheckRun;

/// Compact one-line-per-annotation formatter
pub struct CompactFormatter {
    /// Show severity prefix
    pub show_severity: bool,
    /// Show rule subtype
    pub show_subtype: bool,
}

impl CompactFormatter {
    /// Create a new compact formatter
    pub fn new() -> Self {
        Self {
            show_severity: true,
            show_subtype: true,
        }
    }

    /// Hide severity prefix
    pub fn without_severity(mut self) -> Self {
        self.show_severity = false;
        self
    }

    /// Hide rule subtype
    pub fn without_subtype(mut self) -> Self {
        self.show_subtype = false;
        self
    }
}

impl Default for CompactFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for CompactFormatter {
    fn format(&self, run: &CheckRun) -> String {
        let mut output = String::new();

        for ann in &run.annotations {
            output.push_str(&run.source.name);
            output.push(':');
            output.push_str(&self.format_annotation(ann));
            output.push('\n');
        }

        output
    }

    fn format_annotation(&self, ann: &Annotation) -> String {
        let mut parts = Vec::new();

        parts.push(format!("{}:{}", ann.line, ann.column));

        if self.show_severity {
            parts.push(ann.severity.to_string());
        }

        if self.show_subtype {
            parts.push(ann.subtype.clone());
        }

        parts.push(format!("{} -> {}", ann.matched_text, ann.proposed_text));

        parts.join(": ")
    }
}
