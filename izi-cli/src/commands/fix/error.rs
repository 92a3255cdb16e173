use std::io;
use std::path::{Path, PathBuf};

/// Errors raised while upgrading a project tree.
///
/// `WorkingDir` and the rule compilation variants are fatal for a run; the
/// file-level variants are reported and the walk moves on.
pub enum FixError {
    /// The current working directory could not be resolved.
    WorkingDir(io::Error),
    /// A regex rule failed to compile.
    Pattern(regex::Error),
    /// The literal rule table could not be compiled.
    Literal(aho_corasick::BuildError),
    /// A directory entry could not be visited.
    Walk(walkdir::Error),
    /// The file could not be read. Its content is untouched.
    Read { path: PathBuf, source: io::Error },
    /// The file could not be opened for truncation. Its content is untouched.
    Truncate { path: PathBuf, source: io::Error },
    /// The file was truncated but the new content could not be written.
    /// The file is left empty.
    Write { path: PathBuf, source: io::Error },
}

impl FixError {
    /// Path of the file the error relates to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            FixError::Read { path, .. }
            | FixError::Truncate { path, .. }
            | FixError::Write { path, .. } => Some(path),
            FixError::Walk(err) => err.path(),
            FixError::WorkingDir(_) | FixError::Pattern(_) | FixError::Literal(_) => None,
        }
    }
}

impl std::fmt::Display for FixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FixError::WorkingDir(err) => {
                write!(f, "Error while getting the current working directory: {err}")
            }
            FixError::Pattern(err) => write!(f, "Invalid rewrite pattern: {err}"),
            FixError::Literal(err) => write!(f, "Invalid literal rule table: {err}"),
            FixError::Walk(err) => write!(f, "Could not visit entry: {err}"),
            FixError::Read { path, source } => {
                write!(f, "Could not read {}: {source}", path.display())
            }
            FixError::Truncate { path, source } => {
                write!(f, "Could not truncate {}: {source}", path.display())
            }
            FixError::Write { path, source } => {
                write!(f, "Could not write {} (file left empty): {source}", path.display())
            }
        }
    }
}

impl std::fmt::Debug for FixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Display>::fmt(self, f)
    }
}

impl std::error::Error for FixError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FixError::WorkingDir(err) => Some(err),
            FixError::Pattern(err) => Some(err),
            FixError::Literal(err) => Some(err),
            FixError::Walk(err) => Some(err),
            FixError::Read { source, .. }
            | FixError::Truncate { source, .. }
            | FixError::Write { source, .. } => Some(source),
        }
    }
}

impl From<regex::Error> for FixError {
    fn from(err: regex::Error) -> Self {
        FixError::Pattern(err)
    }
}

impl From<aho_corasick::BuildError> for FixError {
    fn from(err: aho_corasick::BuildError) -> Self {
        FixError::Literal(err)
    }
}

impl From<walkdir::Error> for FixError {
    fn from(err: walkdir::Error) -> Self {
        FixError::Walk(err)
    }
}
