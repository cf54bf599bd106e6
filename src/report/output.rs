use crate::config::{Config, Destination};
use crate::error::{CommitLogError, Result};
use console::style;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::aggregate::Summary;

/// Replace the report file, creating its parent directory if needed.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    let io_err = |source| CommitLogError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, content).map_err(io_err)
}

/// Returns the file path written to, or `None` for stdout.
pub fn emit(destination: &Destination, content: &str) -> Result<Option<PathBuf>> {
    match destination {
        Destination::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(|source| CommitLogError::Write {
                    path: PathBuf::from("<stdout>"),
                    source,
                })?;
            Ok(None)
        }
        Destination::File(path) => {
            if let Err(e) = write_file(path, content) {
                eprintln!("{} {}", style("[ERROR]").red().bold(), style(&e).red());
                eprintln!("{}", style("Printing the report to stdout instead").yellow());
                print!("{content}");
                return Err(e);
            }
            Ok(Some(path.clone()))
        }
    }
}

pub fn print_summary(config: &Config, summary: &Summary, path: &Path) {
    println!(" - Loaded for {}", style(config.slug()).blue());
    println!(" - Found {} commits", style(summary.commit_count).green());
    println!(" - Found {} contributors", style(summary.contributors.len()).green());
    println!(
        " - Found {} merged pull requests",
        style(summary.merged_pull_requests).green()
    );
    println!(
        "{} Commit log has been saved to {}",
        style("[SUCCESS]").green().bold(),
        path.display()
    );
}
