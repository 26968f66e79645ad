//! Annotation types for proofreading results

use serde::{Deserialize, Serialize};

/// Severity level for annotations
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Minor issue - stylistic nitpick
    Low,
    /// Likely issue - should be reviewed
    #[default]
    Medium,
    /// Definite problem
    High,
}

impl Severity {
    /// Scoring weight used by the quality score formula
    pub fn weight(self) -> u32 {
        match self {
            Severity::High => 3,
            Severity::Medium => 2,
            Severity::Low => 1,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" | "info" | "minor" => Ok(Severity::Low),
            "medium" | "warning" | "warn" => Ok(Severity::Medium),
            "high" | "error" | "err" => Ok(Severity::High),
            _ => Err(()),
        }
    }
}

/// Checker family that produced an annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Typos: kana confusion, kanji conversion, typing slips, okurigana
    Lexical,
    /// Wording and style issues
    Expression,
    /// Contextual and structural issues
    Contextual,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Lexical => write!(f, "lexical"),
            Category::Expression => write!(f, "expression"),
            Category::Contextual => write!(f, "contextual"),
        }
    }
}

/// Half-open character-offset range into the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Start offset (0-based, inclusive)
    pub start: usize,
    /// End offset (0-based, exclusive)
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// One flagged span of text with a proposed fix or suggestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Annotation {
    /// Checker family
    pub category: Category,
    /// Rule id within the family
    pub subtype: String,
    /// Character offsets into the source text
    pub span: Span,
    /// The flagged text, exactly as it appears in the source
    pub matched_text: String,
    /// Proposed correction or suggestion
    pub proposed_text: String,
    /// What the rule detects
    pub description: String,
    /// Severity level
    pub severity: Severity,
    /// Line number (1-based, 0 until resolved)
    pub line: usize,
    /// Column number (1-based, 0 until resolved)
    pub column: usize,
}

impl Annotation {
    /// Create a new annotation without position information
    pub fn new(
        category: Category,
        subtype: &str,
        span: Span,
        matched_text: &str,
        severity: Severity,
    ) -> Self {
        Self {
            category,
            subtype: subtype.to_string(),
            span,
            matched_text: matched_text.to_string(),
            proposed_text: String::new(),
            description: String::new(),
            severity,
            line: 0,
            column: 0,
        }
    }

    /// Set the proposed correction or suggestion
    pub fn with_proposal(mut self, proposed: &str) -> Self {
        self.proposed_text = proposed.to_string();
        self
    }

    /// Set the rule description
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Attach 1-based line and column coordinates
    pub fn locate(&mut self, line: usize, column: usize) {
        self.line = line;
        self.column = column;
    }

    /// Check if this is a high-severity finding
    pub fn is_high(&self) -> bool {
        self.severity == Severity::High
    }
}
