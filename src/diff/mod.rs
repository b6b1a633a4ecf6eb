pub mod block;
pub mod full;
pub mod hunk;

pub use block::{ChangeKind, DiffBlock, ParseError};
pub use full::Diff;
pub use hunk::ChangeBlock;

/// Format a parsed diff for user display: one summary line per file block,
/// one range line per hunk
pub fn format_diff(diff: &Diff) -> String {
    let mut result = String::new();

    for block in &diff.diffs {
        result.push_str(&format!(
            "{} -> {} ({}) -> {}\n",
            block.source_hash.as_deref().unwrap_or("-"),
            block.new_filepath,
            block.kind,
            block.target_hash.as_deref().unwrap_or("-"),
        ));

        for change in &block.changes {
            result.push_str(&format!(
                "  @@ -{},{} +{},{}\n",
                change.original_line_start,
                change.original_line_count,
                change.modified_line_start,
                change.modified_line_count,
            ));
        }

        result.push('\n');
    }

    // Remove trailing newline if present
    if result.ends_with("\n\n") {
        result.pop();
    }

    result
}
