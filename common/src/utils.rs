use std::path::{Path, PathBuf};

/// Searches all ancestor directories of the current working directory and of
/// the current executable (including themselves) for an entry whose name
/// starts with `name`. If found, returns `<dir>/<name>`.
///
/// Matching by prefix lets callers pass a file stem and leave the extension
/// (thus the format) open.
pub fn search_current_ancestor_dirs_for(name: &str) -> Option<PathBuf> {
    [std::env::current_dir(), std::env::current_exe()]
        .iter()
        .filter_map(|p| p.as_ref().ok())
        .flat_map(|p| p.ancestors())
        .find(|p| dir_has_entry_starting_with(p, name))
        .map(|p| p.join(name))
}

fn dir_has_entry_starting_with(dir: &Path, prefix: &str) -> bool {
    dir.read_dir().is_ok_and(|entries| {
        entries
            .filter_map(|e| e.ok())
            .any(|e| e.file_name().to_str().is_some_and(|n| n.starts_with(prefix)))
    })
}
