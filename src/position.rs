//! Character offset to line/column resolution
//!
//! Matching runs over the full document text, but reports need human-readable
//! coordinates. Resolution is applied post-hoc to every annotation.

use crate::annotation::Annotation;

/// Resolves character offsets to 1-based (line, column) coordinates
#[derive(Debug)]
pub struct PositionResolver {
    /// Character offsets of every newline in the text
    newlines: Vec<usize>,
}

impl PositionResolver {
    /// Index the newlines of a document
    pub fn new(text: &str) -> Self {
        let newlines = text
            .chars()
            .enumerate()
            .filter(|(_, c)| *c == '\n')
            .map(|(i, _)| i)
            .collect();
        Self { newlines }
    }

    /// Resolve a character offset to 1-based (line, column)
    ///
    /// Line is 1 plus the number of newlines strictly before `offset`; column
    /// counts characters since the last newline, starting at 1.
    pub fn resolve(&self, offset: usize) -> (usize, usize) {
        let preceding = self.newlines.partition_point(|&n| n < offset);
        let line = preceding + 1;
        let column = if preceding == 0 {
            offset + 1
        } else {
            offset - (self.newlines[preceding - 1] + 1) + 1
        };
        (line, column)
    }

    /// Resolve every annotation's start offset in place
    pub fn locate_all(&self, annotations: &mut [Annotation]) {
        for ann in annotations {
            let (line, column) = self.resolve(ann.span.start);
            ann.locate(line, column);
        }
    }
}
