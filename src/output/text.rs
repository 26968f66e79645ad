//! Human-readable text output formatter

use super::OutputFormatter;
use crate::annotation::{Annotation, Severity};
use crate::report::CheckRun;
use colored::*;

/// Text formatter with optional color support
pub struct TextFormatter {
    /// Enable colored output
    pub colored: bool,

    /// Show rule descriptions
    pub show_descriptions: bool,

    /// Show the statistics block
    pub show_stats: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self {
            colored: true,
            show_descriptions: true,
            show_stats: false,
        }
    }
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable colors
    pub fn without_color(mut self) -> Self {
        self.colored = false;
        self
    }

    /// Append the statistics block
    pub fn with_stats(mut self) -> Self {
        self.show_stats = true;
        self
    }

    fn severity_str(&self, severity: Severity) -> ColoredString {
        let s = format!("{}", severity);
        if !self.colored {
            return s.normal();
        }
        match severity {
            Severity::High => s.red().bold(),
            Severity::Medium => s.yellow().bold(),
            Severity::Low => s.blue(),
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, run: &CheckRun) -> String {
        let mut output = String::new();

        if self.colored {
            output.push_str(&format!("{}\n", run.source.name.underline()));
        } else {
            output.push_str(&format!("{}\n", run.source.name));
        }

        if run.annotations.is_empty() {
            output.push_str("No issues found\n");
            return output;
        }

        for ann in &run.annotations {
            output.push_str(&self.format_annotation(ann));
            output.push('\n');
        }

        // Summary line
        let mut counts = Vec::new();
        for severity in [Severity::High, Severity::Medium, Severity::Low] {
            let n = run.count_at(severity);
            if n > 0 {
                let s = format!("{} {}", n, severity);
                counts.push(if self.colored {
                    match severity {
                        Severity::High => s.red().to_string(),
                        Severity::Medium => s.yellow().to_string(),
                        Severity::Low => s.blue().to_string(),
                    }
                } else {
                    s
                });
            }
        }
        output.push_str(&format!(
            "\n{} issues: {}\n",
            run.annotations.len(),
            counts.join(", ")
        ));

        if self.show_stats {
            if let Some(stats) = &run.statistics {
                output.push_str(&format!(
                    "Quality score: {:.1}/100 ({:.2} issues per 1000 chars)\n",
                    stats.score, stats.density
                ));
                for (category, n) in &stats.by_category {
                    output.push_str(&format!("  {}: {}\n", category, n));
                }
            }
        }

        output.push_str(&format!(
            "Finished in {:.2}s\n",
            run.duration.as_secs_f64()
        ));

        output
    }

    fn format_annotation(&self, ann: &Annotation) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}:{}: {}[{}]: {} -> {}\n",
            ann.line,
            ann.column,
            self.severity_str(ann.severity),
            if self.colored {
                ann.subtype.cyan().to_string()
            } else {
                ann.subtype.clone()
            },
            ann.matched_text,
            if self.colored {
                ann.proposed_text.green().to_string()
            } else {
                ann.proposed_text.clone()
            }
        ));

        if self.show_descriptions && !ann.description.is_empty() {
            output.push_str(&format!(
                "   {} {}\n",
                if self.colored {
                    "=".blue().to_string()
                } else {
                    "=".to_string()
                },
                ann.description
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{Category, Span};
    use crate::report::{aggregate, SourceInfo};
    use std::time::Duration;

    fn sample_run() -> CheckRun {
        let ann = Annotation::new(
            Category::Lexical,
            "particle_wa",
            Span::new(1, 2),
            "わ",
            Severity::High,
        )
        .with_proposal("は")
        .with_description("助詞の誤表記");
        aggregate(
            SourceInfo {
                name: "test.txt".to_string(),
                char_count: 7,
            },
            "私わ学生です。",
            vec![vec![ann]],
            Duration::from_millis(5),
        )
    }

    #[test]
    fn test_format_annotation() {
        let formatter = TextFormatter::new().without_color();
        let run = sample_run();
        let output = formatter.format_annotation(&run.annotations[0]);
        assert!(output.contains("1:2"));
        assert!(output.contains("high"));
        assert!(output.contains("particle_wa"));
        assert!(output.contains("わ -> は"));
        assert!(output.contains("助詞の誤表記"));
    }

    #[test]
    fn test_format_run() {
        let formatter = TextFormatter::new().without_color();
        let output = formatter.format(&sample_run());
        assert!(output.contains("test.txt"));
        assert!(output.contains("1 issues: 1 high"));
    }

    #[test]
    fn test_format_clean_run() {
        let formatter = TextFormatter::new().without_color();
        let run = aggregate(
            SourceInfo {
                name: "clean.txt".to_string(),
                char_count: 10,
            },
            "今日は晴れです。",
            vec![],
            Duration::ZERO,
        );
        let output = formatter.format(&run);
        assert!(output.contains("No issues found"));
        assert!(!output.contains("Quality score"));
    }

    #[test]
    fn test_stats_block() {
        let formatter = TextFormatter::new().without_color().with_stats();
        let output = formatter.format(&sample_run());
        assert!(output.contains("Quality score:"));
        assert!(output.contains("lexical: 1"));
    }
}
