use std::fmt;

/// A single hunk from one file's diff.
///
/// Line numbers are 1-based. An omitted `,<count>` in the hunk header means
/// the range covers exactly one line, so counts default to 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeBlock {
    /// Hunk body (context, added, and removed lines with their prefix
    /// characters), newline-joined. Excludes the `@@ ... @@` header and the
    /// `---`/`+++` file-header lines.
    pub content: String,
    /// Start line in the old file version
    pub original_line_start: u32,
    /// Number of lines covered in the old file version
    pub original_line_count: u32,
    /// Start line in the new file version
    pub modified_line_start: u32,
    /// Number of lines covered in the new file version
    pub modified_line_count: u32,
}

/// An in-progress hunk: the four header ranges plus the accumulation buffer
/// for body lines. Closed out via [`ChangeBuilder::finish`] when the next
/// hunk header appears or the file segment ends.
#[derive(Debug)]
pub(crate) struct ChangeBuilder {
    original_line_start: u32,
    original_line_count: u32,
    modified_line_start: u32,
    modified_line_count: u32,
    lines: Vec<String>,
}

impl ChangeBuilder {
    /// Parse a hunk header of the form
    /// `@@ -<oldStart>[,<oldCount>] +<newStart>[,<newCount>] @@`.
    ///
    /// Returns `None` for lines that do not match the grammar, so callers
    /// can skip them without aborting the segment.
    pub(crate) fn from_header(line: &str) -> Option<Self> {
        let header = line.strip_prefix("@@ ")?;
        let end_idx = header.find(" @@")?;
        let range_part = &header[..end_idx];

        let (old_part, new_part) = range_part.split_once(' ')?;
        let (original_line_start, original_line_count) =
            parse_range(old_part.strip_prefix('-')?)?;
        let (modified_line_start, modified_line_count) =
            parse_range(new_part.strip_prefix('+')?)?;

        Some(Self {
            original_line_start,
            original_line_count,
            modified_line_start,
            modified_line_count,
            lines: Vec::new(),
        })
    }

    /// Append one body line (terminator already stripped)
    pub(crate) fn push_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    /// Close out the hunk, joining the accumulated body into its content
    pub(crate) fn finish(self) -> ChangeBlock {
        ChangeBlock {
            content: self.lines.join("\n"),
            original_line_start: self.original_line_start,
            original_line_count: self.original_line_count,
            modified_line_start: self.modified_line_start,
            modified_line_count: self.modified_line_count,
        }
    }
}

/// Parse a range like "1,2" or "5". An omitted count means exactly one line
/// per unified-diff grammar.
fn parse_range(range: &str) -> Option<(u32, u32)> {
    match range.split_once(',') {
        Some((start, count)) => Some((start.parse().ok()?, count.parse().ok()?)),
        None => Some((range.parse().ok()?, 1)),
    }
}

impl fmt::Display for ChangeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Git's own convention: a count of 1 is omitted from the header
        let old_part = match self.original_line_count {
            1 => format!("-{}", self.original_line_start),
            n => format!("-{},{}", self.original_line_start, n),
        };
        let new_part = match self.modified_line_count {
            1 => format!("+{}", self.modified_line_start),
            n => format!("+{},{}", self.modified_line_start, n),
        };

        writeln!(f, "@@ {} {} @@", old_part, new_part)?;
        if !self.content.is_empty() {
            writeln!(f, "{}", self.content)?;
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn parse_header_with_counts() {
        let builder = ChangeBuilder::from_header("@@ -1,2 +1,3 @@").unwrap();
        let change = builder.finish();
        assert_eq!(change.original_line_start, 1);
        assert_eq!(change.original_line_count, 2);
        assert_eq!(change.modified_line_start, 1);
        assert_eq!(change.modified_line_count, 3);
    }

    #[test]
    fn parse_header_defaults_omitted_counts_to_one() {
        let builder = ChangeBuilder::from_header("@@ -5 +5,3 @@").unwrap();
        let change = builder.finish();
        assert_eq!(change.original_line_start, 5);
        assert_eq!(change.original_line_count, 1);
        assert_eq!(change.modified_line_start, 5);
        assert_eq!(change.modified_line_count, 3);
    }

    #[test]
    fn parse_header_both_counts_omitted() {
        let builder = ChangeBuilder::from_header("@@ -136 +137 @@").unwrap();
        let change = builder.finish();
        assert_eq!(change.original_line_count, 1);
        assert_eq!(change.modified_line_count, 1);
    }

    #[test]
    fn parse_header_with_trailing_context() {
        // Git appends the enclosing function/section after the closing @@
        let builder = ChangeBuilder::from_header("@@ -10,2 +10,3 @@ fn main() {").unwrap();
        let change = builder.finish();
        assert_eq!(change.original_line_start, 10);
        assert_eq!(change.modified_line_start, 10);
    }

    #[test]
    fn parse_header_zero_counts() {
        let builder = ChangeBuilder::from_header("@@ -136,0 +137 @@").unwrap();
        let change = builder.finish();
        assert_eq!(change.original_line_start, 136);
        assert_eq!(change.original_line_count, 0);
        assert_eq!(change.modified_line_start, 137);
    }

    #[test]
    fn parse_header_rejects_missing_prefix() {
        assert!(ChangeBuilder::from_header("-1,2 +1,3 @@").is_none());
    }

    #[test]
    fn parse_header_rejects_missing_terminator() {
        assert!(ChangeBuilder::from_header("@@ -1,2 +1,3").is_none());
    }

    #[test]
    fn parse_header_rejects_non_numeric_range() {
        assert!(ChangeBuilder::from_header("@@ -a,2 +1,3 @@").is_none());
        assert!(ChangeBuilder::from_header("@@ -1,b +1,3 @@").is_none());
    }

    #[test]
    fn parse_header_rejects_extra_range_tokens() {
        assert!(ChangeBuilder::from_header("@@ -1 +1 +2 @@").is_none());
    }

    #[test]
    fn parse_header_rejects_swapped_markers() {
        assert!(ChangeBuilder::from_header("@@ +1,2 -1,3 @@").is_none());
    }

    #[test]
    fn finish_joins_accumulated_lines() {
        let mut builder = ChangeBuilder::from_header("@@ -1,2 +1,3 @@").unwrap();
        builder.push_line(" context");
        builder.push_line("-old");
        builder.push_line("+new1");
        builder.push_line("+new2");
        let change = builder.finish();
        assert_eq!(change.content, " context\n-old\n+new1\n+new2");
    }

    #[test]
    fn finish_with_empty_buffer_yields_empty_content() {
        let change = ChangeBuilder::from_header("@@ -1 +1 @@").unwrap().finish();
        assert_eq!(change.content, "");
    }

    #[test]
    fn render_hunk_with_counts() {
        let change = ChangeBlock {
            content: " context\n-old\n+new1\n+new2".to_string(),
            original_line_start: 1,
            original_line_count: 2,
            modified_line_start: 1,
            modified_line_count: 3,
        };
        assert_eq!(
            change.to_string(),
            "@@ -1,2 +1,3 @@\n context\n-old\n+new1\n+new2\n"
        );
    }

    #[test]
    fn render_omits_count_of_one() {
        let change = ChangeBlock {
            content: "-old\n+new".to_string(),
            original_line_start: 10,
            original_line_count: 1,
            modified_line_start: 10,
            modified_line_count: 1,
        };
        assert_eq!(change.to_string(), "@@ -10 +10 @@\n-old\n+new\n");
    }
}
