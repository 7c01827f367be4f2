// Wed Feb 11 2026 - Alex

use std::fs;
use std::io;
use std::path::Path;

/// Rewrite every access-control keyword in `header` to `public:` so that
/// private and protected fields become measurable via `offsetof`. The
/// rewrite is destructive to the shared worktree and must stay idempotent:
/// a header that is already fully public passes through untouched, which is
/// what makes cached worktree reuse safe.
///
/// Returns true when the file was modified.
pub fn neutralize_access(header: &Path) -> io::Result<bool> {
    let source = fs::read_to_string(header)?;
    let rewritten = source
        .replace("protected:", "public:")
        .replace("private:", "public:");

    if rewritten == source {
        return Ok(false);
    }

    fs::write(header, rewritten)?;
    Ok(true)
}
