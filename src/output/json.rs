//! JSON output formatter

use super::OutputFormatter;
use crate::annotation::Annotation;
use crate::report::{CheckRun, Statistics};
use serde::Serialize;

/// JSON formatter for machine-readable output
#[derive(Default)]
pub struct JsonFormatter {
    /// Pretty print with indentation
    pub pretty: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable pretty printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    source: JsonSource<'a>,
    annotations: Vec<JsonAnnotation<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    statistics: Option<&'a Statistics>,
    duration_ms: u128,
}

#[derive(Serialize)]
struct JsonSource<'a> {
    name: &'a str,
    char_count: usize,
}

#[derive(Serialize)]
struct JsonAnnotation<'a> {
    category: String,
    subtype: &'a str,
    severity: String,
    start: usize,
    end: usize,
    line: usize,
    column: usize,
    matched_text: &'a str,
    proposed_text: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'a str,
}

impl<'a> JsonAnnotation<'a> {
    fn from(ann: &'a Annotation) -> Self {
        Self {
            category: ann.category.to_string(),
            subtype: &ann.subtype,
            severity: ann.severity.to_string(),
            start: ann.span.start,
            end: ann.span.end,
            line: ann.line,
            column: ann.column,
            matched_text: &ann.matched_text,
            proposed_text: &ann.proposed_text,
            description: &ann.description,
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, run: &CheckRun) -> String {
        let output = JsonOutput {
            source: JsonSource {
                name: &run.source.name,
                char_count: run.source.char_count,
            },
            annotations: run.annotations.iter().map(JsonAnnotation::from).collect(),
            statistics: run.statistics.as_ref(),
            duration_ms: run.duration.as_millis(),
        };

        if self.pretty {
            serde_json::to_string_pretty(&output).unwrap_or_default()
        } else {
            serde_json::to_string(&output).unwrap_or_default()
        }
    }

    fn format_annotation(&self, annotation: &Annotation) -> String {
        let json_ann = JsonAnnotation::from(annotation);
        if self.pretty {
            serde_json::to_string_pretty(&json_ann).unwrap_or_default()
        } else {
            serde_json::to_string(&json_ann).unwrap_or_default()
        }
    }
}
