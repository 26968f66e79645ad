//! Input document carrier

use crate::config::ConfigError;
use std::path::Path;

/// A document to check, with its precomputed size metrics
///
/// Sizes are in characters, not bytes; every span and density figure
/// downstream is character-based.
#[derive(Debug, Clone)]
pub struct SourceText {
    /// Display name (file path or label such as `<stdin>`)
    pub name: String,
    /// Full document text
    pub content: String,
    /// Number of characters
    pub char_count: usize,
    /// Number of lines (a trailing newline does not add a line)
    pub line_count: usize,
}

impl SourceText {
    /// Wrap an in-memory document
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        let char_count = content.chars().count();
        let line_count = content.lines().count();
        Self {
            name: name.into(),
            content,
            char_count,
            line_count,
        }
    }

    /// Read a document from disk
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::new(path.display().to_string(), content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_counts_are_characters() {
        let source = SourceText::new("t", "私は\n学生です。");
        assert_eq!(source.char_count, 8);
        assert_eq!(source.line_count, 2);
    }

    #[test]
    fn test_trailing_newline() {
        let source = SourceText::new("t", "一行\n");
        assert_eq!(source.line_count, 1);
    }

    #[test]
    fn test_empty() {
        let source = SourceText::new("t", "");
        assert_eq!(source.char_count, 0);
        assert_eq!(source.line_count, 0);
    }

    #[test]
    fn test_from_path() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all("私わ学生です。".as_bytes()).unwrap();
        let source = SourceText::from_path(f.path()).unwrap();
        assert_eq!(source.char_count, 7);
        assert_eq!(source.content, "私わ学生です。");
    }

    #[test]
    fn test_missing_file() {
        assert!(SourceText::from_path(Path::new("/no/such/file.txt")).is_err());
    }
}
