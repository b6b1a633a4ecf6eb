use super::hunk::{ChangeBlock, ChangeBuilder};
use error_set::error_set;
use std::fmt;

error_set! {
    /// Structural errors from a file segment's header lines.
    ///
    /// Only the `diff --git` header is structural: a malformed path pair
    /// aborts the whole parse. Metadata lines (`index`, mode headers, hunk
    /// headers) degrade gracefully instead, leaving fields unset.
    ParseError := {
        #[display("Malformed 'diff --git' header: {line}")]
        MalformedHeader { line: String },
    }
}

/// Kind of change a file segment describes, from the `... file mode` header
/// line. Segments without such a line are plain modifications.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ChangeKind {
    /// File added (`new file mode ...`)
    New,
    /// File removed (`deleted file mode ...`)
    Deleted,
    /// Content change with no mode header
    #[default]
    Modified,
    /// Unrecognized leading token of a mode header line, kept verbatim
    Other(String),
}

impl ChangeKind {
    fn from_token(token: &str) -> Self {
        match token {
            "new" => ChangeKind::New,
            "deleted" => ChangeKind::Deleted,
            _ => ChangeKind::Other(token.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ChangeKind::New => "new",
            ChangeKind::Deleted => "deleted",
            ChangeKind::Modified => "modified",
            ChangeKind::Other(token) => token,
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One file's change record within a diff.
///
/// Metadata parsed from malformed `index` or mode lines stays `None`; path
/// information is always present (construction fails otherwise).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffBlock {
    /// Path in the old file version, without the `a/` marker
    pub old_filepath: String,
    /// Last path segment of `old_filepath`
    pub old_filename: String,
    /// Path in the new file version, without the `b/` marker
    pub new_filepath: String,
    /// Last path segment of `new_filepath`
    pub new_filename: String,
    pub kind: ChangeKind,
    /// File permission/type mode, e.g. 100644
    pub file_mode: Option<u32>,
    /// Abbreviated object hash before the change, from the `index` line
    pub source_hash: Option<String>,
    /// Abbreviated object hash after the change, from the `index` line
    pub target_hash: Option<String>,
    /// Hunks in order of appearance; empty for segments with no content
    /// change (pure renames, mode changes)
    pub changes: Vec<ChangeBlock>,
}

impl DiffBlock {
    /// Parse one file segment: a `diff --git` line plus everything up to
    /// the next one (or end of input).
    ///
    /// Header rules are applied to each line in input order, and later
    /// rules may read fields set by earlier lines of the same segment
    /// (the new/deleted mode fallback depends on `kind` already being set).
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MalformedHeader`] if the `diff --git` path
    /// pair does not split into exactly two tokens, or if the segment has
    /// no `diff --git` line at all.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut paths: Option<(String, String)> = None;
        let mut kind = ChangeKind::default();
        let mut file_mode = None;
        let mut source_hash = None;
        let mut target_hash = None;
        let mut changes = Vec::new();
        let mut current: Option<ChangeBuilder> = None;

        for line in text.lines() {
            if let Some(rest) = line.strip_prefix("diff --git ") {
                paths = Some(parse_path_pair(rest).ok_or_else(|| {
                    ParseError::MalformedHeader {
                        line: line.to_string(),
                    }
                })?);
            }

            if line.contains("file mode")
                && let Some(token) = line.split_whitespace().next()
            {
                kind = ChangeKind::from_token(token);
            }

            if let Some(rest) = line.strip_prefix("index ") {
                let mut tokens = rest.split_whitespace();
                if let Some(hashes) = tokens.next()
                    && let Some((source, target)) = hashes.split_once("..")
                {
                    source_hash = Some(source.to_string());
                    target_hash = Some(target.to_string());
                }
                // Modified files append the mode as a trailing token
                if file_mode.is_none()
                    && let Some(mode) = tokens.next().and_then(|t| t.parse().ok())
                {
                    file_mode = Some(mode);
                }
            }

            // New/deleted mode headers carry the mode as their last token
            if matches!(kind, ChangeKind::New | ChangeKind::Deleted)
                && file_mode.is_none()
                && let Some(mode) = line.split_whitespace().last().and_then(|t| t.parse().ok())
            {
                file_mode = Some(mode);
            }

            if let Some(next) = ChangeBuilder::from_header(line) {
                if let Some(done) = current.take() {
                    changes.push(done.finish());
                }
                current = Some(next);
            } else if is_content_line(line)
                && let Some(builder) = current.as_mut()
            {
                builder.push_line(line);
            }
        }

        // Segment end closes the in-progress hunk
        if let Some(done) = current.take() {
            changes.push(done.finish());
        }

        let (old_filepath, new_filepath) = paths.ok_or_else(|| ParseError::MalformedHeader {
            line: text.lines().next().unwrap_or_default().to_string(),
        })?;

        Ok(DiffBlock {
            old_filename: last_segment(&old_filepath).to_string(),
            new_filename: last_segment(&new_filepath).to_string(),
            old_filepath,
            new_filepath,
            kind,
            file_mode,
            source_hash,
            target_hash,
            changes,
        })
    }
}

/// Split the remainder of a `diff --git` line into its old and new paths.
///
/// The header has the form `a/<old> b/<new>`; the sides are separated by
/// the literal ` b/` marker, which must occur exactly once. The `a/`/`b/`
/// markers are stripped, leaving POSIX-style relative paths.
fn parse_path_pair(rest: &str) -> Option<(String, String)> {
    let parts: Vec<&str> = rest.trim().split(" b/").collect();
    if parts.len() != 2 {
        return None;
    }

    let old = parts[0].strip_prefix("a/")?;
    Some((old.to_string(), parts[1].to_string()))
}

/// Last `/`-separated segment of a path
fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Hunk body lines start with `+`, `-`, or a space. The `---`/`+++`
/// file-header lines share those prefixes and are excluded.
fn is_content_line(line: &str) -> bool {
    (line.starts_with('+') || line.starts_with('-') || line.starts_with(' '))
        && !line.starts_with("+++")
        && !line.starts_with("---")
}

impl fmt::Display for DiffBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "diff --git a/{} b/{}",
            self.old_filepath, self.new_filepath
        )?;
        writeln!(f, "--- a/{}", self.old_filepath)?;
        writeln!(f, "+++ b/{}", self.new_filepath)?;

        for change in &self.changes {
            write!(f, "{}", change)?;
        }

        Ok(())
    }
}
