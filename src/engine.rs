//! Check engine: runs the enabled checker families over a document and
//! aggregates their annotations into one report.

use crate::checker::Checker;
use crate::checkers::{ContextChecker, ExpressionChecker, LexicalChecker};
use crate::config::{ConfigError, EngineConfig};
use crate::report::{self, CheckRun, SourceInfo};
use crate::rule::RuleSet;
use crate::source::SourceText;
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

/// Errors that can occur while running checks
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Invalid check selection: {0}")]
    Validation(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Which checker families to run
#[derive(Debug, Clone, Copy)]
pub struct CheckSelection {
    pub lexical: bool,
    pub expression: bool,
    pub context: bool,
}

impl CheckSelection {
    /// Selection from configuration
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            lexical: config.checks.lexical,
            expression: config.checks.expression,
            context: config.checks.context,
        }
    }

    fn is_empty(&self) -> bool {
        !(self.lexical || self.expression || self.context)
    }
}

/// Runs checker families and aggregates results
pub struct Engine {
    config: EngineConfig,
    lexical: Arc<RuleSet>,
    expression: Arc<RuleSet>,
    context: Arc<RuleSet>,
}

impl Engine {
    /// Create an engine over three loaded family rule sets
    pub fn new(
        config: EngineConfig,
        lexical: Arc<RuleSet>,
        expression: Arc<RuleSet>,
        context: Arc<RuleSet>,
    ) -> Self {
        Self {
            config,
            lexical,
            expression,
            context,
        }
    }

    /// Check a document with the configured family selection
    pub fn check(&self, source: &SourceText) -> Result<CheckRun, CheckError> {
        self.check_with(source, CheckSelection::from_config(&self.config))
    }

    /// Check a document with an explicit family selection
    ///
    /// Families run concurrently when configured; the aggregation sort makes
    /// the output independent of execution order.
    pub fn check_with(
        &self,
        source: &SourceText,
        selection: CheckSelection,
    ) -> Result<CheckRun, CheckError> {
        if selection.is_empty() {
            return Err(CheckError::Validation(
                "no checker families enabled".to_string(),
            ));
        }

        let start = Instant::now();
        let mut checkers: Vec<Box<dyn Checker>> = Vec::new();
        if selection.lexical {
            checkers.push(Box::new(LexicalChecker::new(Arc::clone(&self.lexical))));
        }
        if selection.expression {
            checkers.push(Box::new(ExpressionChecker::new(Arc::clone(
                &self.expression,
            ))));
        }
        if selection.context {
            checkers.push(Box::new(ContextChecker::new(Arc::clone(&self.context))));
        }

        log::debug!(
            "checking '{}' ({} chars) with {} families",
            source.name,
            source.char_count,
            checkers.len()
        );

        let text = source.content.as_str();
        let mut lists = if self.config.parallel && checkers.len() > 1 {
            let threads = if self.config.jobs == 0 {
                num_cpus::get()
            } else {
                self.config.jobs
            };
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads.min(checkers.len()))
                .build()?;
            pool.install(|| {
                checkers
                    .par_iter()
                    .map(|checker| checker.check_all(text))
                    .collect::<Vec<_>>()
            })
        } else {
            checkers
                .iter()
                .map(|checker| checker.check_all(text))
                .collect()
        };

        for list in &mut lists {
            self.apply_overrides(list);
        }

        let info = SourceInfo {
            name: source.name.clone(),
            char_count: source.char_count,
        };
        Ok(report::aggregate(info, text, lists, start.elapsed()))
    }

    /// Drop disabled subtypes, rewrite overridden severities, and apply the
    /// minimum-severity floor. Runs before aggregation so statistics reflect
    /// what is actually reported.
    fn apply_overrides(&self, annotations: &mut Vec<crate::annotation::Annotation>) {
        annotations.retain(|a| self.config.is_rule_enabled(&a.subtype));
        for ann in annotations.iter_mut() {
            if let Some(severity) = self.config.severity_override(&ann.subtype) {
                ann.severity = severity;
            }
        }
        if let Some(floor) = self.config.output.min_severity {
            annotations.retain(|a| a.severity >= floor);
        }
    }
}
