//! Kosei - Rule-driven proofreading engine for Japanese text
//!
//! A fast, modular proofreading linter. Three checker families scan a
//! document against declarative YAML rule packs and emit positioned
//! annotations with proposed corrections:
//!
//! - `lexical`: typos (kana confusion, kanji conversion, typing slips,
//!   okurigana)
//! - `expression`: wording and style (inappropriate expressions, register
//!   mixing, word choice)
//! - `context`: contextual and structural heuristics (references, logic,
//!   coherence, readability)
//!
//! # Architecture
//!
//! ```text
//! CLI/API -> Engine -> Checker families -> RuleSet + Matcher
//!                   -> Aggregation (sort, positions, statistics)
//! ```
//!
//! The engine loads one rule set per family, runs the enabled families
//! (concurrently by default), merges their annotations in document order and
//! derives statistics including a severity-weighted quality score. All spans
//! are character offsets, never bytes.

pub mod annotation;
pub mod checker;
pub mod checkers;
pub mod config;
pub mod engine;
pub mod matcher;
pub mod output;
pub mod position;
pub mod report;
pub mod rule;
pub mod source;
pub mod suggest;

// Re-export main types
pub use annotation::{Annotation, Category, Severity, Span};
pub use checker::Checker;
pub use checkers::{ContextChecker, ExpressionChecker, LexicalChecker};
pub use config::{ColorMode, ConfigError, EngineConfig, OutputFormat};
pub use engine::{CheckError, CheckSelection, Engine};
pub use output::{CompactFormatter, JsonFormatter, OutputFormatter, TextFormatter};
pub use position::PositionResolver;
pub use report::{CheckRun, SourceInfo, Statistics};
pub use rule::{Rule, RuleSet};
pub use source::SourceText;
