//! Parser for git-style unified diff text.
//!
//! Turns the output of `git diff` (or a file containing it) into a
//! structured [`Diff`]: one [`DiffBlock`] per file segment, each holding the
//! old/new paths, the hash transition from the `index` line, the change
//! kind, the file mode, and an ordered list of [`ChangeBlock`] hunks with
//! their line ranges and literal body text.
//!
//! # Examples
//!
//! ```
//! let text = "diff --git a/foo.txt b/foo.txt\n\
//!             index abc123..def456 100644\n\
//!             --- a/foo.txt\n\
//!             +++ b/foo.txt\n\
//!             @@ -1,2 +1,3 @@\n \
//!             context\n\
//!             -old\n\
//!             +new1\n\
//!             +new2\n";
//!
//! let diff = diff_parser::parse(text).unwrap();
//! assert_eq!(diff.len(), 1);
//!
//! let block = &diff.diffs[0];
//! assert_eq!(block.new_filename, "foo.txt");
//! assert_eq!(block.source_hash.as_deref(), Some("abc123"));
//! assert_eq!(block.changes[0].content, " context\n-old\n+new1\n+new2");
//! ```

use error_set::error_set;
use std::path::Path;

mod diff;

pub use diff::{ChangeBlock, ChangeKind, Diff, DiffBlock, ParseError, format_diff};

error_set! {
    /// Top-level error for diff parsing operations
    DiffParserError := {
        #[display("No diff file found at {path}")]
        NotFound { path: String },
        #[display("Failed to read {path}: {message}")]
        ReadFailed { path: String, message: String },
        ParseError(ParseError),
    }
}

/// Parse unified diff text, or a file containing it, into a [`Diff`].
///
/// Input starting with the literal marker `diff --git` is treated as inline
/// diff text; anything else is treated as a file-system path whose content
/// is read and parsed.
///
/// # Errors
///
/// - [`DiffParserError::NotFound`] if `source` is not inline diff text and
///   no file exists at that path
/// - [`DiffParserError::ReadFailed`] if the file exists but cannot be read
/// - [`DiffParserError::ParseError`] if a `diff --git` header is malformed;
///   the whole parse aborts, no partial result is returned
pub fn parse(source: &str) -> Result<Diff, DiffParserError> {
    if source.starts_with("diff --git") {
        return Ok(Diff::parse(source)?);
    }

    let path = Path::new(source);
    if !path.exists() {
        return Err(DiffParserError::NotFound {
            path: source.to_string(),
        });
    }

    let text = std::fs::read_to_string(path).map_err(|e| DiffParserError::ReadFailed {
        path: source.to_string(),
        message: e.to_string(),
    })?;

    Ok(Diff::parse(&text)?)
}
