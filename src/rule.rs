//! Rule definition and rule set store
//!
//! Rules live in YAML (or JSON) documents with a fixed two-level schema:
//! a dotted group path (e.g. `inappropriate_expressions.discriminatory`)
//! mapping subtype ids to rule bodies. One rule set is loaded per checker
//! family; it is immutable after load and safely shared across check runs.

use crate::annotation::Severity;
use crate::config::ConfigError;
use crate::suggest::{self, Derivation};
use fancy_regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Rule body as it appears in a rule file
#[derive(Debug, Clone, Deserialize)]
pub struct RuleSpec {
    /// Regex pattern (backreferences and lookaround supported)
    pub pattern: String,

    /// Static correction text (lexical rules)
    #[serde(default)]
    pub correction: Option<String>,

    /// Static suggestion text (expression/context rules)
    #[serde(default)]
    pub suggestion: Option<String>,

    /// Per-rule severity override; sub-check default applies when absent
    #[serde(default)]
    pub severity: Option<Severity>,

    /// What the rule detects
    #[serde(default)]
    pub description: String,

    /// Example texts that trigger the rule
    #[serde(default)]
    pub examples: Vec<String>,

    /// Computed-correction capability flag
    #[serde(default)]
    pub derive: Option<Derivation>,
}

/// Rule file format
#[derive(Debug, Deserialize)]
pub struct RuleFile {
    /// File format version
    #[serde(default)]
    pub version: Option<String>,

    /// Checker family this file belongs to
    #[serde(default)]
    pub family: Option<String>,

    /// Group path -> subtype -> rule body
    pub rules: BTreeMap<String, BTreeMap<String, RuleSpec>>,
}

/// A loaded rule with its compiled pattern
#[derive(Debug)]
pub struct Rule {
    /// Subtype id (unique within the family)
    pub subtype: String,
    /// Compiled pattern
    pub regex: Regex,
    spec: RuleSpec,
}

impl Rule {
    /// Per-rule severity, if the rule overrides the sub-check default
    pub fn severity(&self) -> Option<Severity> {
        self.spec.severity
    }

    /// Rule description
    pub fn description(&self) -> &str {
        &self.spec.description
    }

    /// Proposed replacement for a matched text
    ///
    /// Static correction/suggestion when present; computed via the derivation
    /// registry when the rule carries a `derive` flag. None means the caller
    /// should fall back to the family's generic advice for this subtype.
    pub fn proposal(&self, matched: &str) -> Option<String> {
        if let Some(kind) = self.spec.derive {
            return Some(suggest::derive(kind, matched));
        }
        self.spec
            .correction
            .clone()
            .or_else(|| self.spec.suggestion.clone())
    }
}

/// An immutable set of rules for one checker family
#[derive(Debug, Default)]
pub struct RuleSet {
    groups: BTreeMap<String, Vec<Rule>>,
}

impl RuleSet {
    /// Load a rule set from a YAML or JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let file: RuleFile = match ext {
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            _ => {
                return Err(ConfigError::Invalid(format!(
                    "Unknown rule file format: {}",
                    ext
                )))
            }
        };

        Ok(Self::from_file(file))
    }

    /// Parse a rule set from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let file: RuleFile = serde_yaml::from_str(content)?;
        Ok(Self::from_file(file))
    }

    /// Compile a parsed rule file into a rule set
    ///
    /// A rule whose pattern fails to compile is skipped with a warning so one
    /// defective rule cannot abort the rest of its family.
    pub fn from_file(file: RuleFile) -> Self {
        let mut groups: BTreeMap<String, Vec<Rule>> = BTreeMap::new();

        for (group, rules) in file.rules {
            let mut compiled = Vec::with_capacity(rules.len());
            for (subtype, spec) in rules {
                match Regex::new(&spec.pattern) {
                    Ok(regex) => compiled.push(Rule {
                        subtype,
                        regex,
                        spec,
                    }),
                    Err(e) => {
                        log::warn!("skipping rule '{}' with invalid pattern: {}", subtype, e);
                    }
                }
            }
            groups.insert(group, compiled);
        }

        Self { groups }
    }

    /// Rules of a group, empty when the group is absent
    pub fn group(&self, path: &str) -> &[Rule] {
        self.groups.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate all (group, rule) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.groups
            .iter()
            .flat_map(|(group, rules)| rules.iter().map(move |r| (group.as_str(), r)))
    }

    /// Total number of rules
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
version: "1.0"
family: lexical
rules:
  kana_confusion:
    particle_wa:
      pattern: '(?<=私)わ'
      correction: "は"
      severity: high
      description: "助詞の誤表記"
  typing:
    duplicate_chars:
      pattern: '([あ-ん])\1{2,}'
      derive: collapse-run
"#;

    #[test]
    fn test_from_yaml() {
        let set = RuleSet::from_yaml(SAMPLE).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.group("kana_confusion").len(), 1);
        assert_eq!(set.group("typing").len(), 1);
        assert!(set.group("missing").is_empty());
    }

    #[test]
    fn test_rule_fields() {
        let set = RuleSet::from_yaml(SAMPLE).unwrap();
        let rule = &set.group("kana_confusion")[0];
        assert_eq!(rule.subtype, "particle_wa");
        assert_eq!(rule.severity(), Some(Severity::High));
        assert_eq!(rule.description(), "助詞の誤表記");
        assert_eq!(rule.proposal("わ"), Some("は".to_string()));
    }

    #[test]
    fn test_derived_proposal() {
        let set = RuleSet::from_yaml(SAMPLE).unwrap();
        let rule = &set.group("typing")[0];
        assert_eq!(rule.proposal("あああ"), Some("あ".to_string()));
    }

    #[test]
    fn test_invalid_pattern_is_skipped() {
        let yaml = r#"
rules:
  g:
    bad:
      pattern: '([unclosed'
    good:
      pattern: 'ok'
      suggestion: "fine"
"#;
        let set = RuleSet::from_yaml(yaml).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.group("g")[0].subtype, "good");
    }

    #[test]
    fn test_malformed_document_fails() {
        assert!(RuleSet::from_yaml("rules: [not, a, mapping]").is_err());
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;
        let mut f = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        f.write_all(SAMPLE.as_bytes()).unwrap();
        let set = RuleSet::load(f.path()).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_missing_suggestion_yields_none() {
        let yaml = r#"
rules:
  g:
    bare:
      pattern: 'x'
"#;
        let set = RuleSet::from_yaml(yaml).unwrap();
        assert_eq!(set.group("g")[0].proposal("x"), None);
    }
}
