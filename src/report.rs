//! Aggregation, statistics and quality scoring
//!
//! Merges per-family annotation lists into one check run: concatenate in
//! family order, stable-sort by span start, resolve positions, then derive
//! counts and the severity-weighted quality score.

use crate::annotation::{Annotation, Severity};
use crate::checker::sort_by_span;
use crate::position::PositionResolver;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Source metadata carried through a check run
#[derive(Debug, Clone, Serialize)]
pub struct SourceInfo {
    /// Source identity (file name or label)
    pub name: String,
    /// Character count of the document
    pub char_count: usize,
}

/// Derived statistics for a non-empty check run
#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    /// Total number of annotations
    pub total: usize,
    /// Counts by checker family
    pub by_category: BTreeMap<String, usize>,
    /// Counts by severity
    pub by_severity: BTreeMap<String, usize>,
    /// Counts by rule subtype
    pub by_subtype: BTreeMap<String, usize>,
    /// Annotations per 1,000 characters (rounded to 2 decimals)
    pub density: f64,
    /// Quality score, 0-100 (rounded to 1 decimal)
    pub score: f64,
}

/// Result of checking one document against the enabled families
#[derive(Debug)]
pub struct CheckRun {
    /// Source metadata
    pub source: SourceInfo,
    /// Annotations ordered by document position
    pub annotations: Vec<Annotation>,
    /// None when no annotations were found (the explicit "no issues" state)
    pub statistics: Option<Statistics>,
    /// Processing duration
    pub duration: Duration,
}

impl CheckRun {
    /// Check if any annotations were produced
    pub fn has_findings(&self) -> bool {
        !self.annotations.is_empty()
    }

    /// Count annotations at a given severity
    pub fn count_at(&self, severity: Severity) -> usize {
        self.annotations
            .iter()
            .filter(|a| a.severity == severity)
            .count()
    }

    /// Get exit code (0 = clean or low only, 1 = medium findings, 2 = high)
    pub fn exit_code(&self) -> i32 {
        if self.count_at(Severity::High) > 0 {
            2
        } else if self.count_at(Severity::Medium) > 0 {
            1
        } else {
            0
        }
    }
}

/// Merge family annotation lists into a finished check run
pub fn aggregate(
    source: SourceInfo,
    text: &str,
    lists: Vec<Vec<Annotation>>,
    duration: Duration,
) -> CheckRun {
    let mut annotations: Vec<Annotation> = lists.into_iter().flatten().collect();
    sort_by_span(&mut annotations);
    PositionResolver::new(text).locate_all(&mut annotations);

    let statistics = compute_statistics(&annotations, source.char_count);

    CheckRun {
        source,
        annotations,
        statistics,
        duration,
    }
}

/// Compute counts, density and quality score; None for an empty run
pub fn compute_statistics(annotations: &[Annotation], char_count: usize) -> Option<Statistics> {
    if annotations.is_empty() {
        return None;
    }

    let mut by_category: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_severity: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_subtype: BTreeMap<String, usize> = BTreeMap::new();

    for ann in annotations {
        *by_category.entry(ann.category.to_string()).or_default() += 1;
        *by_severity.entry(ann.severity.to_string()).or_default() += 1;
        *by_subtype.entry(ann.subtype.clone()).or_default() += 1;
    }

    let total = annotations.len();
    let total_weight: u32 = annotations.iter().map(|a| a.severity.weight()).sum();

    // Errors per 1,000 characters; denominator floored at 1
    let density = total as f64 / (char_count as f64 / 1000.0).max(1.0);
    let penalty = (f64::from(total_weight) * 2.0 + density * 10.0).min(100.0);
    let score = (100.0 - penalty).max(0.0);

    Some(Statistics {
        total,
        by_category,
        by_severity,
        by_subtype,
        density: (density * 100.0).round() / 100.0,
        score: (score * 10.0).round() / 10.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{Category, Span};

    fn ann(subtype: &str, start: usize, severity: Severity) -> Annotation {
        Annotation::new(
            Category::Lexical,
            subtype,
            Span::new(start, start + 1),
            "x",
            severity,
        )
    }

    #[test]
    fn test_score_example() {
        // 2,000 chars, one annotation per severity:
        // weight 6, density 1.5, penalty 12 + 15 = 27, score 73.0
        let annotations = vec![
            ann("a", 0, Severity::High),
            ann("b", 1, Severity::Medium),
            ann("c", 2, Severity::Low),
        ];
        let stats = compute_statistics(&annotations, 2000).unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.density, 1.5);
        assert_eq!(stats.score, 73.0);
    }

    #[test]
    fn test_small_document_density_floor() {
        // 100 chars: denominator floors at 1, density = count
        let annotations = vec![ann("a", 0, Severity::Low)];
        let stats = compute_statistics(&annotations, 100).unwrap();
        assert_eq!(stats.density, 1.0);
        assert_eq!(stats.score, 88.0);
    }

    #[test]
    fn test_score_is_bounded() {
        let annotations: Vec<_> = (0..200).map(|i| ann("a", i, Severity::High)).collect();
        let stats = compute_statistics(&annotations, 100).unwrap();
        assert_eq!(stats.score, 0.0);
    }

    #[test]
    fn test_empty_run_has_no_statistics() {
        assert!(compute_statistics(&[], 5000).is_none());
    }

    #[test]
    fn test_counts() {
        let annotations = vec![
            ann("a", 0, Severity::High),
            ann("a", 1, Severity::High),
            ann("b", 2, Severity::Low),
        ];
        let stats = compute_statistics(&annotations, 10).unwrap();
        assert_eq!(stats.by_severity.get("high"), Some(&2));
        assert_eq!(stats.by_severity.get("low"), Some(&1));
        assert_eq!(stats.by_subtype.get("a"), Some(&2));
        assert_eq!(stats.by_category.get("lexical"), Some(&3));
    }

    #[test]
    fn test_aggregate_sorts_and_locates() {
        let source = SourceInfo {
            name: "test.txt".to_string(),
            char_count: 7,
        };
        let lists = vec![
            vec![ann("late", 4, Severity::Low)],
            vec![ann("early", 0, Severity::Low)],
        ];
        let run = aggregate(source, "ab\ncdef", lists, Duration::ZERO);
        assert_eq!(run.annotations[0].subtype, "early");
        assert_eq!(run.annotations[1].subtype, "late");
        assert_eq!((run.annotations[1].line, run.annotations[1].column), (2, 2));
        assert!(run.has_findings());
    }

    #[test]
    fn test_exit_codes() {
        let source = SourceInfo {
            name: "t".into(),
            char_count: 1,
        };
        let clean = aggregate(source.clone(), "x", vec![], Duration::ZERO);
        assert_eq!(clean.exit_code(), 0);
        assert!(clean.statistics.is_none());

        let medium = aggregate(
            source.clone(),
            "x",
            vec![vec![ann("a", 0, Severity::Medium)]],
            Duration::ZERO,
        );
        assert_eq!(medium.exit_code(), 1);

        let high = aggregate(
            source,
            "x",
            vec![vec![ann("a", 0, Severity::High)]],
            Duration::ZERO,
        );
        assert_eq!(high.exit_code(), 2);
    }
}
