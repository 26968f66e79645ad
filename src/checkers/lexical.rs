//! Lexical (typo) checker family
//!
//! Four sub-checks in fixed priority order: kana confusion, kanji conversion
//! errors, typing slips, okurigana errors. Kana/kanji issues default to high
//! severity, typing/okurigana to medium; individual rules may override.

use crate::annotation::{Annotation, Category, Severity};
use crate::checker::{self, Checker};
use crate::rule::RuleSet;
use std::sync::Arc;

/// Group paths in the lexical rule set
const KANA_CONFUSION: &str = "kana_confusion";
const KANJI_CONVERSION: &str = "kanji_conversion";
const TYPING: &str = "typing";
const OKURIGANA: &str = "okurigana";

/// Detects typos: kana confusion, conversion errors, typing slips, okurigana
pub struct LexicalChecker {
    rules: Arc<RuleSet>,
}

impl LexicalChecker {
    /// Create a checker over an already-loaded rule set
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    /// Hiragana/katakana confusion (e.g. particle は written as わ)
    pub fn check_kana_confusion(&self, text: &str) -> Vec<Annotation> {
        self.run_group(KANA_CONFUSION, Severity::High, text)
    }

    /// Wrong kanji picked during conversion (e.g. 暑いお茶 for 熱いお茶)
    pub fn check_kanji_conversion(&self, text: &str) -> Vec<Annotation> {
        self.run_group(KANJI_CONVERSION, Severity::High, text)
    }

    /// Typing slips, including the computed collapse of repeated characters
    pub fn check_typing(&self, text: &str) -> Vec<Annotation> {
        self.run_group(TYPING, Severity::Medium, text)
    }

    /// Okurigana (verb ending) errors (e.g. 行なう for 行う)
    pub fn check_okurigana(&self, text: &str) -> Vec<Annotation> {
        self.run_group(OKURIGANA, Severity::Medium, text)
    }

    fn run_group(&self, group: &str, default: Severity, text: &str) -> Vec<Annotation> {
        checker::apply_group(
            &self.rules,
            group,
            Category::Lexical,
            default,
            text,
            &fallback,
        )
    }
}

/// Generic advice when a rule carries no correction
fn fallback(_subtype: &str) -> &'static str {
    "表記を見直す"
}

impl Checker for LexicalChecker {
    fn category(&self) -> Category {
        Category::Lexical
    }

    fn name(&self) -> &'static str {
        "lexical"
    }

    fn check_all(&self, text: &str) -> Vec<Annotation> {
        let mut annotations = self.check_kana_confusion(text);
        annotations.extend(self.check_kanji_conversion(text));
        annotations.extend(self.check_typing(text));
        annotations.extend(self.check_okurigana(text));
        checker::sort_by_span(&mut annotations);
        annotations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn checker() -> LexicalChecker {
        let rules = RuleSet::from_yaml(include_str!("../../rules/lexical.yaml")).unwrap();
        LexicalChecker::new(Arc::new(rules))
    }

    #[test]
    fn test_particle_wa_confusion() {
        let anns = checker().check_kana_confusion("私わ学生です。");
        assert_eq!(anns.len(), 1);
        assert_eq!(anns[0].matched_text, "わ");
        assert_eq!(anns[0].proposed_text, "は");
        assert_eq!(anns[0].severity, Severity::High);
        assert_eq!((anns[0].span.start, anns[0].span.end), (1, 2));
    }

    #[test]
    fn test_wa_inside_word_is_not_flagged() {
        assert!(checker().check_kana_confusion("私わかりません").is_empty());
    }

    #[test]
    fn test_duplicate_chars_collapse() {
        let anns = checker().check_typing("あああ");
        assert_eq!(anns.len(), 1);
        assert_eq!(anns[0].subtype, "duplicate_chars");
        assert_eq!(anns[0].matched_text, "あああ");
        assert_eq!(anns[0].proposed_text, "あ");
        assert_eq!(anns[0].severity, Severity::Medium);
    }

    #[test]
    fn test_okurigana() {
        let anns = checker().check_okurigana("会議を行なう");
        assert_eq!(anns.len(), 1);
        assert_eq!(anns[0].matched_text, "行なう");
        assert_eq!(anns[0].proposed_text, "行う");
    }

    #[test]
    fn test_check_all_is_sorted_and_idempotent() {
        let c = checker();
        let text = "会議を行なう。私わ学生です。すごくいいい。";
        let first = c.check_all(text);
        assert!(first.len() >= 3);
        assert!(first.windows(2).all(|w| w[0].span.start <= w[1].span.start));

        let second = c.check_all(text);
        assert_eq!(
            format!("{:?}", first),
            format!("{:?}", second),
            "repeat runs must be identical"
        );
    }

    #[test]
    fn test_span_invariants() {
        let c = checker();
        let text = "私わ学生です。話を効くのが好きで、毎日ああああと言う。";
        let char_count = text.chars().count();
        for ann in c.check_all(text) {
            assert!(ann.span.start < ann.span.end);
            assert!(ann.span.end <= char_count);
            let slice: String = text
                .chars()
                .skip(ann.span.start)
                .take(ann.span.end - ann.span.start)
                .collect();
            assert_eq!(slice, ann.matched_text);
        }
    }

    #[test]
    fn test_empty_rule_set_yields_nothing() {
        let c = LexicalChecker::new(Arc::new(RuleSet::default()));
        assert!(c.check_all("私わ学生です。").is_empty());
    }
}
