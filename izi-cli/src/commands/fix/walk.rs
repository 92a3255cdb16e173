use std::path::Path;

use walkdir::{DirEntry, WalkDir};

/// Extensions of compiled binaries that are never rewritten.
const BINARY_EXTENSIONS: &[&str] = &["exe"];

/// Regular files under `root` that `fix` should rewrite.
///
/// Hidden directories below `root` are not entered at all. Entries come in
/// file-name order so the output is stable across runs. Errors are yielded
/// in place so the caller can report them and keep going.
pub fn project_files(root: &Path) -> impl Iterator<Item = Result<DirEntry, walkdir::Error>> {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_hidden_dir(entry))
        .filter(|entry| match entry {
            Ok(entry) => entry.file_type().is_file() && !is_binary(entry.path()),
            Err(_) => true,
        })
}

/// A directory, other than the walk root, whose name starts with `.`.
pub fn is_hidden_dir(entry: &DirEntry) -> bool {
    // The root is always walked, so running inside e.g. `~/.projects/app`
    // still upgrades the project.
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry.file_name().to_string_lossy().starts_with('.')
}

pub fn is_binary(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| BINARY_EXTENSIONS.iter().any(|b| ext == *b))
}
