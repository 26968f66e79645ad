//! Expression/style checker family
//!
//! Sub-checks in fixed priority order: discriminatory wording, honorific
//! misuse, inappropriate abbreviations/colloquialisms, redundant phrasing,
//! formality mixing, numeral notation mixing, general word choice. Each
//! sub-check reads a fixed dotted group path in the rule set.

use crate::annotation::{Annotation, Category, Severity};
use crate::checker::{self, Checker};
use crate::rule::RuleSet;
use std::sync::Arc;

const DISCRIMINATORY: &str = "inappropriate_expressions.discriminatory";
const HONORIFICS: &str = "inappropriate_expressions.honorifics";
const ABBREVIATIONS: &str = "inappropriate_expressions.abbreviations";
const REDUNDANT: &str = "inappropriate_expressions.redundant";
const FORMALITY_MIXING: &str = "style_inconsistency.formality_mixing";
const NUMBER_NOTATION: &str = "style_inconsistency.number_notation";
const WORD_CHOICE: &str = "word_choice";

/// Detects wording and style issues
pub struct ExpressionChecker {
    rules: Arc<RuleSet>,
}

impl ExpressionChecker {
    /// Create a checker over an already-loaded rule set
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    /// Discriminatory or exclusionary wording
    pub fn check_discriminatory(&self, text: &str) -> Vec<Annotation> {
        self.run_group(DISCRIMINATORY, Severity::Medium, text)
    }

    /// Honorific misuse (double keigo, excessive humble forms)
    pub fn check_honorifics(&self, text: &str) -> Vec<Annotation> {
        self.run_group(HONORIFICS, Severity::Medium, text)
    }

    /// Casual abbreviations and colloquialisms
    pub fn check_abbreviations(&self, text: &str) -> Vec<Annotation> {
        self.run_group(ABBREVIATIONS, Severity::Medium, text)
    }

    /// Redundant phrasing (tautologies)
    pub fn check_redundant(&self, text: &str) -> Vec<Annotation> {
        self.run_group(REDUNDANT, Severity::Low, text)
    }

    /// Mixed formality register (だ/である next to です/ます)
    pub fn check_formality_mixing(&self, text: &str) -> Vec<Annotation> {
        self.run_group(FORMALITY_MIXING, Severity::Medium, text)
    }

    /// Mixed full-width and half-width numerals
    pub fn check_number_notation(&self, text: &str) -> Vec<Annotation> {
        self.run_group(NUMBER_NOTATION, Severity::Low, text)
    }

    /// General word-choice issues (ら抜き and similar)
    pub fn check_word_choice(&self, text: &str) -> Vec<Annotation> {
        self.run_group(WORD_CHOICE, Severity::Medium, text)
    }

    fn run_group(&self, group: &str, default: Severity, text: &str) -> Vec<Annotation> {
        checker::apply_group(
            &self.rules,
            group,
            Category::Expression,
            default,
            text,
            &fallback,
        )
    }
}

/// Generic advice when a rule carries no suggestion
fn fallback(_subtype: &str) -> &'static str {
    "表現を見直す"
}

impl Checker for ExpressionChecker {
    fn category(&self) -> Category {
        Category::Expression
    }

    fn name(&self) -> &'static str {
        "expression"
    }

    fn check_all(&self, text: &str) -> Vec<Annotation> {
        let mut annotations = self.check_discriminatory(text);
        annotations.extend(self.check_honorifics(text));
        annotations.extend(self.check_abbreviations(text));
        annotations.extend(self.check_redundant(text));
        annotations.extend(self.check_formality_mixing(text));
        annotations.extend(self.check_number_notation(text));
        annotations.extend(self.check_word_choice(text));
        checker::sort_by_span(&mut annotations);
        annotations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> ExpressionChecker {
        let rules = RuleSet::from_yaml(include_str!("../../rules/expression.yaml")).unwrap();
        ExpressionChecker::new(Arc::new(rules))
    }

    #[test]
    fn test_abbreviation() {
        let anns = checker().check_abbreviations("スマホで調べました。");
        assert_eq!(anns.len(), 1);
        assert_eq!(anns[0].matched_text, "スマホ");
        assert_eq!(anns[0].proposed_text, "スマートフォン");
        assert_eq!(anns[0].severity, Severity::Medium);
    }

    #[test]
    fn test_redundant_defaults_to_low() {
        let anns = checker().check_redundant("まず最初に説明します。");
        assert_eq!(anns.len(), 1);
        assert_eq!(anns[0].subtype, "mazu_saisho");
        assert_eq!(anns[0].severity, Severity::Low);
    }

    #[test]
    fn test_discriminatory_rule_severity_override() {
        let anns = checker().check_discriminatory("外人の友人がいます。");
        assert_eq!(anns.len(), 1);
        assert_eq!(anns[0].severity, Severity::High);
        assert_eq!(anns[0].proposed_text, "外国人");
    }

    #[test]
    fn test_formality_mixing() {
        let anns = checker().check_formality_mixing("これは重要だ。次に進みます。");
        assert_eq!(anns.len(), 1);
        assert_eq!(anns[0].subtype, "da_then_desu_masu");
    }

    #[test]
    fn test_number_notation_mixing() {
        let anns = checker().check_number_notation("売上は1２3万円です。");
        assert!(!anns.is_empty());
        assert_eq!(anns[0].severity, Severity::Low);
    }

    #[test]
    fn test_ra_nuki() {
        let anns = checker().check_word_choice("明日は早く来れると思います。");
        assert_eq!(anns.len(), 1);
        assert_eq!(anns[0].subtype, "ra_nuki");
    }

    #[test]
    fn test_check_all_sorted() {
        let anns = checker().check_all("スマホはまず最初に確認する。外人という語は避ける。");
        assert!(anns.len() >= 3);
        assert!(anns.windows(2).all(|w| w[0].span.start <= w[1].span.start));
    }

    #[test]
    fn test_overlapping_rules_both_reported() {
        // Two rules may flag the same region; neither is dropped
        let rules = RuleSet::from_yaml(
            r#"
rules:
  word_choice:
    whole:
      pattern: 'とゆうこと'
      suggestion: "ということ"
    part:
      pattern: 'とゆう'
      suggestion: "という"
"#,
        )
        .unwrap();
        let c = ExpressionChecker::new(Arc::new(rules));
        let anns = c.check_word_choice("それはいいとゆうことだ");
        assert_eq!(anns.len(), 2);
    }
}
