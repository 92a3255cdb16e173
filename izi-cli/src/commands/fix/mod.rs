use colored::Colorize;
use std::path::{Path, PathBuf};

pub mod engine;
pub mod error;
pub mod imports;
pub mod rules;
pub mod walk;

pub use engine::Rewriter;
pub use error::FixError;
pub use rules::RuleSet;

/// Outcome of a `fix` run over a tree.
#[derive(Debug, Default)]
pub struct FixReport {
    /// Files rewritten successfully, in visit order.
    pub fixed: Vec<PathBuf>,
    /// Per-file failures. None of them stopped the walk.
    pub failed: Vec<FixError>,
}

/// Upgrade the application in the current directory to the IZIGo 1.6 API.
///
/// Walks the working directory, rewrites every file with
/// [`RuleSet::upgrade`] and prints one line per file. Only a missing working
/// directory or an invalid rule set aborts the run; per-file errors are
/// logged and counted.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Upgrading the application...");

    let dir = std::env::current_dir().map_err(FixError::WorkingDir)?;
    let rewriter = Rewriter::upgrade()?;
    let report = fix_tree(&dir, &rewriter);

    if !report.failed.is_empty() {
        println!(
            "{}",
            format!("{} file(s) could not be fixed", report.failed.len())
                .yellow()
                .bold()
        );
    }
    println!("{} {}", "✓".green(), "Upgrade done!".green().bold());

    Ok(())
}

/// Rewrite every project file under `root` with `rewriter`.
pub fn fix_tree(root: &Path, rewriter: &Rewriter) -> FixReport {
    let mut report = FixReport::default();

    for entry in walk::project_files(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let err = FixError::from(err);
                tracing::error!("Could not fix file: {err}");
                report.failed.push(err);
                continue;
            }
        };

        let path = entry.path();
        let result = rewriter.fix_file(path);
        println!("\t{}\t{}", "fix".green().bold(), path.display());

        match result {
            Ok(()) => report.fixed.push(path.to_path_buf()),
            Err(err) => {
                tracing::error!("Could not fix file: {err}");
                report.failed.push(err);
            }
        }
    }

    report
}
