//! Computed correction registry
//!
//! Most rules carry a static correction or suggestion string. A few need the
//! replacement computed from the matched text itself; those rules carry a
//! `derive` capability flag that dispatches here.

use serde::{Deserialize, Serialize};

/// Kinds of computed corrections a rule can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Derivation {
    /// Collapse a run of 3+ identical kana/Latin characters to one occurrence
    CollapseRun,
}

/// Derive the correction for a matched text
pub fn derive(kind: Derivation, matched: &str) -> String {
    match kind {
        Derivation::CollapseRun => collapse_run(matched),
    }
}

/// Characters eligible for run collapsing (hiragana, katakana, Latin letters)
fn is_collapsible(c: char) -> bool {
    ('あ'..='ん').contains(&c) || ('ア'..='ン').contains(&c) || c.is_ascii_alphabetic()
}

fn collapse_run(matched: &str) -> String {
    let mut out = String::with_capacity(matched.len());
    let mut chars = matched.chars().peekable();

    while let Some(c) = chars.next() {
        let mut run = 1;
        while chars.peek() == Some(&c) {
            chars.next();
            run += 1;
        }
        if run >= 3 && is_collapsible(c) {
            out.push(c);
        } else {
            for _ in 0..run {
                out.push(c);
            }
        }
    }

    out
}
