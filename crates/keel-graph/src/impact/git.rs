//! Files changed between a base revision and `HEAD`.

use std::path::Path;

use git2::{Delta, Repository};
use keel_core::errors::ChangeSetError;
use tracing::debug;

/// Repository-relative paths (forward slashes) that differ between the tree of
/// `base_ref` and the tree of `HEAD`. Renames report both sides. Sorted.
pub fn changed_files(repo_root: &Path, base_ref: &str) -> Result<Vec<String>, ChangeSetError> {
    let repo = Repository::discover(repo_root).map_err(git_error)?;

    let base_tree = repo
        .revparse_single(base_ref)
        .and_then(|object| object.peel_to_tree())
        .map_err(|e| ChangeSetError::UnknownRevision {
            revision: base_ref.to_string(),
            message: e.message().to_string(),
        })?;
    let head_tree = repo
        .head()
        .and_then(|head| head.peel_to_tree())
        .map_err(git_error)?;

    let diff = repo
        .diff_tree_to_tree(Some(&base_tree), Some(&head_tree), None)
        .map_err(git_error)?;

    let mut files = Vec::new();
    for delta in diff.deltas() {
        let sides = match delta.status() {
            Delta::Added => vec![delta.new_file()],
            Delta::Deleted => vec![delta.old_file()],
            _ => vec![delta.old_file(), delta.new_file()],
        };
        for side in sides {
            if let Some(path) = side.path() {
                files.push(path.to_string_lossy().replace('\\', "/"));
            }
        }
    }
    files.sort();
    files.dedup();

    debug!(base_ref, count = files.len(), "collected changed files");
    Ok(files)
}

fn git_error(e: git2::Error) -> ChangeSetError {
    ChangeSetError::Git {
        message: e.message().to_string(),
    }
}
