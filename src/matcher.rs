//! Pattern match engine
//!
//! Runs one compiled pattern over the document text and yields raw
//! occurrences with character offsets. Matching is stateless and re-entrant;
//! no deduplication happens here - overlapping matches from distinct rules
//! are all reported, and any merge policy belongs to the aggregation layer.

use fancy_regex::Regex;

/// One raw pattern occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    /// Start character offset (0-based, inclusive)
    pub start: usize,
    /// End character offset (0-based, exclusive)
    pub end: usize,
    /// The matched text
    pub text: String,
}

/// Find all occurrences of a pattern, with character offsets
///
/// The regex engine reports byte offsets; they are converted incrementally
/// since matches arrive in ascending order. A runtime match error (e.g.
/// backtrack limit) aborts only this pattern's scan.
pub fn find_matches(regex: &Regex, text: &str) -> Vec<RuleMatch> {
    let mut out = Vec::new();
    let mut byte_pos = 0usize;
    let mut char_pos = 0usize;

    for m in regex.find_iter(text) {
        let m = match m {
            Ok(m) => m,
            Err(e) => {
                log::warn!("pattern '{}' failed during matching: {}", regex.as_str(), e);
                break;
            }
        };

        char_pos += text[byte_pos..m.start()].chars().count();
        byte_pos = m.start();
        let start = char_pos;

        char_pos += text[byte_pos..m.end()].chars().count();
        byte_pos = m.end();

        out.push(RuleMatch {
            start,
            end: char_pos,
            text: m.as_str().to_string(),
        });
    }

    out
}
