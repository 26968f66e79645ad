//! Checker family trait and shared rule application

use crate::annotation::{Annotation, Category, Severity, Span};
use crate::matcher;
use crate::rule::RuleSet;

/// A checker family: runs its sub-checks over a document
///
/// Implementations are read-only with respect to the input text and their
/// injected rule set, so families can run concurrently; the final order is
/// established by the aggregation sort, not by execution order.
pub trait Checker: Send + Sync {
    /// Family category tag
    fn category(&self) -> Category;

    /// Human-readable family name
    fn name(&self) -> &'static str;

    /// Run every sub-check in the family's fixed order and return the
    /// concatenated results sorted by span start (ties keep sub-check order)
    fn check_all(&self, text: &str) -> Vec<Annotation>;
}

/// Stable sort by span start; insertion order breaks ties
pub(crate) fn sort_by_span(annotations: &mut [Annotation]) {
    annotations.sort_by_key(|a| a.span.start);
}

/// Apply every rule of one group to the text
///
/// `fallback` supplies generic per-subtype advice when a rule carries no
/// static or computed proposal, so no annotation goes out without an
/// actionable message.
pub(crate) fn apply_group(
    rules: &RuleSet,
    group: &str,
    category: Category,
    default_severity: Severity,
    text: &str,
    fallback: &dyn Fn(&str) -> &'static str,
) -> Vec<Annotation> {
    let mut annotations = Vec::new();

    for rule in rules.group(group) {
        for m in matcher::find_matches(&rule.regex, text) {
            let proposed = rule
                .proposal(&m.text)
                .unwrap_or_else(|| fallback(&rule.subtype).to_string());
            annotations.push(
                Annotation::new(
                    category,
                    &rule.subtype,
                    Span::new(m.start, m.end),
                    &m.text,
                    rule.severity().unwrap_or(default_severity),
                )
                .with_proposal(&proposed)
                .with_description(rule.description()),
            );
        }
    }

    annotations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_is_stable() {
        let mk = |subtype: &str, start: usize| {
            Annotation::new(
                Category::Lexical,
                subtype,
                Span::new(start, start + 1),
                "x",
                Severity::Low,
            )
        };
        let mut anns = vec![mk("b", 5), mk("a", 2), mk("c", 5)];
        sort_by_span(&mut anns);
        let order: Vec<_> = anns.iter().map(|a| a.subtype.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_apply_group_defaults_and_fallback() {
        let set = RuleSet::from_yaml(
            r#"
rules:
  g:
    no_suggestion:
      pattern: 'ダメ'
      description: "説明"
"#,
        )
        .unwrap();

        let anns = apply_group(
            &set,
            "g",
            Category::Expression,
            Severity::Medium,
            "これはダメです",
            &|_| "表現を見直す",
        );

        assert_eq!(anns.len(), 1);
        assert_eq!(anns[0].severity, Severity::Medium);
        assert_eq!(anns[0].proposed_text, "表現を見直す");
        assert_eq!(anns[0].description, "説明");
    }

    #[test]
    fn test_apply_group_rule_severity_wins() {
        let set = RuleSet::from_yaml(
            r#"
rules:
  g:
    strict:
      pattern: 'x'
      suggestion: "y"
      severity: high
"#,
        )
        .unwrap();

        let anns = apply_group(
            &set,
            "g",
            Category::Expression,
            Severity::Low,
            "x",
            &|_| "",
        );
        assert_eq!(anns[0].severity, Severity::High);
    }
}
