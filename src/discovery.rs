//! Finding the files under the input root that should be converted.
//!
//! Only files whose last extension is on a fixed allow-list are considered. Candidates are
//! returned sorted by their path relative to the input root so that runs are reproducible
//! regardless of the order the filesystem hands entries back in.

use crate::job::ConversionJob;
use anyhow::{anyhow, Result};
use ignore::WalkBuilder;
use log::{debug, warn};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Extensions (without the leading dot) of the files that get converted
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    "py", "js", "html", "css", "md", "java", "c", "cpp", "sh", "txt",
];

/// Extension given to every output file
pub const OUTPUT_EXTENSION: &str = "pdf";

pub fn is_allowed(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// A single file to convert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTask {
    /// The file as found under the input root
    pub source: PathBuf,
    /// `source` with the input root stripped off
    pub relative: PathBuf,
}

impl FileTask {
    pub fn new<P: Into<PathBuf>>(input_root: &Path, source: P) -> Result<FileTask> {
        let source: PathBuf = source.into();
        let relative = source
            .strip_prefix(input_root)
            .map_err(|_| {
                anyhow!(
                    "{} isn't inside input directory {}",
                    source.display(),
                    input_root.display()
                )
            })?
            .to_path_buf();
        Ok(FileTask { source, relative })
    }

    /// The mirrored location of this file under `output_root`
    pub fn destination(&self, output_root: &Path) -> PathBuf {
        output_root.join(self.relative.with_extension(OUTPUT_EXTENSION))
    }

    /// What is known about the file's language, which is just its extension
    pub fn language_hint(&self) -> &str {
        self.relative
            .extension()
            .and_then(OsStr::to_str)
            .unwrap_or("text")
    }
}

/// Walk the job's input root and collect every file that should be converted.
///
/// Entries that can't be read while walking are logged and skipped.
pub fn discover(job: &ConversionJob) -> Vec<FileTask> {
    let root = job.input_root();
    let walker = WalkBuilder::new(root)
        .standard_filters(job.respect_ignore_files())
        .require_git(false)
        .build();

    let mut tasks: Vec<FileTask> = Vec::default();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Failed to walk {}: {e}", root.display());
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() || !is_allowed(path) {
            continue;
        }

        let task = match FileTask::new(root, entry.path()) {
            Ok(task) => task,
            Err(e) => {
                warn!("{e:#}");
                continue;
            }
        };

        if job.excludes().iter().any(|g| g.is_match(&task.relative)) {
            debug!("excluding {}", task.relative.display());
            continue;
        }

        tasks.push(task);
    }

    tasks.sort_by(|a, b| a.relative.cmp(&b.relative));
    tasks
}
