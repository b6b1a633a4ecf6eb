use super::block::{DiffBlock, ParseError};

/// A complete parsed diff: one block per file segment, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diff {
    pub diffs: Vec<DiffBlock>,
}

impl Diff {
    /// Parse complete diff text into per-file blocks.
    ///
    /// A line starting with `diff --git` opens a new file segment, closing
    /// any segment already open; the final open segment is closed
    /// unconditionally at end of input, even when it holds nothing beyond
    /// its header line. Lines before the first marker are ignored.
    ///
    /// # Errors
    ///
    /// The first segment with a malformed `diff --git` header aborts the
    /// whole parse; no partial result is returned.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut diffs = Vec::new();
        let mut current_segment = String::new();

        for line in text.lines() {
            if line.starts_with("diff --git") {
                if !current_segment.is_empty() {
                    diffs.push(DiffBlock::parse(&current_segment)?);
                    current_segment.clear();
                }
                current_segment.push_str(line);
                current_segment.push('\n');
            } else if !current_segment.is_empty() {
                current_segment.push_str(line);
                current_segment.push('\n');
            }
        }

        // Don't forget the last segment
        if !current_segment.is_empty() {
            diffs.push(DiffBlock::parse(&current_segment)?);
        }

        Ok(Diff { diffs })
    }

    pub fn len(&self) -> usize {
        self.diffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diffs.is_empty()
    }

    /// Iterate over blocks in file-segment order
    pub fn iter(&self) -> std::slice::Iter<'_, DiffBlock> {
        self.diffs.iter()
    }
}

impl<'a> IntoIterator for &'a Diff {
    type Item = &'a DiffBlock;
    type IntoIter = std::slice::Iter<'a, DiffBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.diffs.iter()
    }
}

impl std::fmt::Display for Diff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for block in &self.diffs {
            write!(f, "{}", block)?;
        }
        Ok(())
    }
}
