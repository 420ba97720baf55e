use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("cannot use report directory {path:?}: {reason}")]
    ReportDir { path: PathBuf, reason: String },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Creates `dir` (and parents) when absent. An existing non-directory is an error.
pub fn ensure_report_dir(dir: &Path) -> Result<(), PersistError> {
    let dir_error = |reason: String| PersistError::ReportDir {
        path: dir.to_path_buf(),
        reason,
    };
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(dir_error("not a directory".into())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|e| dir_error(e.to_string()))
        }
        Err(err) => Err(dir_error(err.to_string())),
    }
}

/// File name for a saved assembled report, e.g. `report-20260115T093000Z.adoc`.
///
/// Characters other than ASCII alphanumerics and `-` in `stamp` become `_`.
pub fn report_filename(stamp: &str) -> String {
    let stamp: String = stamp
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    format!("report-{stamp}.adoc")
}

/// Saves assembled reports under one directory.
///
/// A report is staged in a temp file next to its target and renamed into
/// place, so readers never see a half-written `.adoc`.
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `contents` to `{dir}/{filename}`, replacing any earlier file of that name.
    pub fn save(&self, filename: &str, contents: &str) -> Result<PathBuf, PersistError> {
        ensure_report_dir(&self.dir)?;

        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(contents.as_bytes())?;
        staged.as_file_mut().sync_all()?;

        let target = self.dir.join(filename);
        staged.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}
