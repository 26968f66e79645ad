//! Contextual/structural checker family
//!
//! Sub-checks in fixed priority order: pronoun reference, tense consistency,
//! logical flow, coherence, paragraph structure, punctuation, readability.
//! These are shallow pattern heuristics, not linguistic analysis; downstream
//! reports depend on their exact (sometimes imprecise) verdicts, so they are
//! reproduced as documented rather than made semantically smarter.

use crate::annotation::{Annotation, Category, Severity};
use crate::checker::{self, Checker};
use crate::matcher;
use crate::rule::RuleSet;
use fancy_regex::Regex;
use std::sync::{Arc, OnceLock};

const PRONOUN_REFERENCE: &str = "context_consistency.pronoun_reference";
const TENSE_CONSISTENCY: &str = "context_consistency.tense_consistency";
const LOGICAL_FLOW: &str = "context_consistency.logical_flow";
const COHERENCE: &str = "context_consistency.coherence";
const PARAGRAPH_STRUCTURE: &str = "structure_issues.paragraph_structure";
const PUNCTUATION: &str = "structure_issues.punctuation";
const READABILITY: &str = "readability.complexity";

/// 2+-character runs of CJK ideographs, used as a cheap noun proxy
fn noun_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("[一-龯]{2,}").expect("static pattern"))
}

/// Detects contextual, logical and structural issues
pub struct ContextChecker {
    rules: Arc<RuleSet>,
}

impl ContextChecker {
    /// Create a checker over an already-loaded rule set
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    /// Demonstrative pronouns with an ambiguous referent
    ///
    /// Candidate pronouns come from the rule patterns; each match is kept only
    /// when the ambiguity heuristic fires.
    pub fn check_pronoun_reference(&self, text: &str) -> Vec<Annotation> {
        let mut annotations = Vec::new();

        for rule in self.rules.group(PRONOUN_REFERENCE) {
            for m in matcher::find_matches(&rule.regex, text) {
                if !is_reference_ambiguous(text, m.start) {
                    continue;
                }
                let proposed = rule
                    .proposal(&m.text)
                    .unwrap_or_else(|| fallback(&rule.subtype).to_string());
                annotations.push(
                    Annotation::new(
                        Category::Contextual,
                        &rule.subtype,
                        crate::annotation::Span::new(m.start, m.end),
                        &m.text,
                        rule.severity().unwrap_or(Severity::Medium),
                    )
                    .with_proposal(&proposed)
                    .with_description(rule.description()),
                );
            }
        }

        annotations
    }

    /// Past-time markers combined with present-tense predicates
    pub fn check_tense_consistency(&self, text: &str) -> Vec<Annotation> {
        self.run_group(TENSE_CONSISTENCY, Severity::Medium, text)
    }

    /// Conclusions without preceding justification, direct contradictions
    pub fn check_logical_flow(&self, text: &str) -> Vec<Annotation> {
        self.run_group(LOGICAL_FLOW, Severity::High, text)
    }

    /// Abrupt topic shifts and repeated content
    pub fn check_coherence(&self, text: &str) -> Vec<Annotation> {
        self.run_group(COHERENCE, Severity::Low, text)
    }

    /// Overlong sentences, under-length paragraphs
    pub fn check_paragraph_structure(&self, text: &str) -> Vec<Annotation> {
        self.run_group(PARAGRAPH_STRUCTURE, Severity::Medium, text)
    }

    /// Missing or excessive terminal punctuation
    pub fn check_punctuation(&self, text: &str) -> Vec<Annotation> {
        self.run_group(PUNCTUATION, Severity::Medium, text)
    }

    /// Kanji/kana balance, katakana overuse
    pub fn check_readability(&self, text: &str) -> Vec<Annotation> {
        self.run_group(READABILITY, Severity::Low, text)
    }

    fn run_group(&self, group: &str, default: Severity, text: &str) -> Vec<Annotation> {
        checker::apply_group(
            &self.rules,
            group,
            Category::Contextual,
            default,
            text,
            &fallback,
        )
    }
}

/// Ambiguity heuristic for a pronoun at character offset `start`
///
/// Split the preceding text on sentence-terminal punctuation; with fewer than
/// two segments the referent is treated as clear. Otherwise count 2+-character
/// CJK-ideograph runs in the immediately preceding sentence: more than one run
/// means the referent is ambiguous. Deliberately approximate - this is a cheap
/// proxy, not coreference resolution.
fn is_reference_ambiguous(text: &str, start: usize) -> bool {
    let prefix: String = text.chars().take(start).collect();
    let sentences: Vec<&str> = prefix.split(['。', '！', '？']).collect();
    if sentences.len() < 2 {
        return false;
    }

    let previous = sentences[sentences.len() - 2];
    let nouns = matcher::find_matches(noun_run(), previous);
    nouns.len() > 1
}

/// Generic advice by subtype when a rule carries no suggestion
fn fallback(subtype: &str) -> &'static str {
    match subtype {
        "ambiguous_demonstrative" => "指示対象を明確にする",
        "past_marker_with_present" => "時制を統一する",
        "conclusion_without_reason" => "結論の前に根拠を明記する",
        "contradiction" => "矛盾する内容を確認し、整合性を取る",
        "topic_shift" => "話題転換をより自然にする",
        "repetitive_content" => "重複する内容を削除または統合する",
        "long_sentence" => "文を短く分割する",
        "short_paragraph" => "段落を統合するか、内容を追加する",
        "missing_period" => "文末に句点を追加する",
        "excessive_punctuation" => "過度な句点・感嘆符を削除する",
        "difficult_kanji" => "漢字とひらがなのバランスを調整する",
        "katakana_overuse" => "カタカナの使用を控えめにする",
        _ => "文脈の整合性を確認する",
    }
}

impl Checker for ContextChecker {
    fn category(&self) -> Category {
        Category::Contextual
    }

    fn name(&self) -> &'static str {
        "context"
    }

    fn check_all(&self, text: &str) -> Vec<Annotation> {
        let mut annotations = self.check_pronoun_reference(text);
        annotations.extend(self.check_tense_consistency(text));
        annotations.extend(self.check_logical_flow(text));
        annotations.extend(self.check_coherence(text));
        annotations.extend(self.check_paragraph_structure(text));
        annotations.extend(self.check_punctuation(text));
        annotations.extend(self.check_readability(text));
        checker::sort_by_span(&mut annotations);
        annotations
    }
}
