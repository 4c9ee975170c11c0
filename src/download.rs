use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// What the save-copy action works with: the source document, the suggested
/// file name (absent means the action is not offered at all), and the
/// directory copies land in.
#[derive(Debug, Clone)]
pub struct DownloadSpec {
    pub source: PathBuf,
    pub file_name: Option<String>,
    pub directory: PathBuf,
}

impl DownloadSpec {
    pub fn new(source: PathBuf, file_name: Option<String>, directory: Option<PathBuf>) -> Self {
        Self {
            source,
            file_name,
            directory: resolve_directory(directory),
        }
    }

    pub fn is_offered(&self) -> bool {
        self.file_name.is_some()
    }
}

/// Config override first, then `$HOME/Downloads` when it exists, then the
/// working directory.
pub fn resolve_directory(configured: Option<PathBuf>) -> PathBuf {
    if let Some(directory) = configured {
        return directory;
    }

    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        let downloads = PathBuf::from(home).join("Downloads");
        if downloads.is_dir() {
            return downloads;
        }
    }

    PathBuf::from(".")
}

/// Copies the source document into `directory` under the suggested name.
/// Callers treat this as fire-and-forget; reachability of the source is not
/// validated beforehand.
pub fn save_copy(source: &Path, file_name: &str, directory: &Path) -> AppResult<PathBuf> {
    if file_name.is_empty() {
        return Err(AppError::invalid_argument("save name must not be empty"));
    }

    let target = directory.join(file_name);
    fs::copy(source, &target).map_err(|err| {
        AppError::io_with_context(err, format!("failed to save copy to {}", target.display()))
    })?;
    Ok(target)
}
