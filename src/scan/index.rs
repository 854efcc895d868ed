use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::Serialize;

use super::{ScanConfig, ScanError};

/// One instrument run: a directory of scan files
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RawFile {
    /// Directory holding the run's scan files
    pub path: PathBuf,
    /// Sample identifier, the directory name relative to the index root
    pub name: String,
    /// Number of scan files found beneath `path` at discovery time
    pub scan_files: usize,
}

/// The raw files found beneath a root directory, sorted by path
#[derive(Debug, Clone)]
pub struct RawFileIndex {
    root: PathBuf,
    raw_files: Vec<RawFile>,
}

impl RawFileIndex {
    /// Discover raw files under `root` using the default [`ScanConfig`].
    pub fn discover<P: AsRef<Path>>(root: P) -> Result<Self, ScanError> {
        Self::discover_with(root, &ScanConfig::default())
    }

    /// Discover raw files under `root`.
    ///
    /// A raw file is an immediate sub-directory of `root` with at least one
    /// scan file anywhere beneath it. Fails with [`ScanError::NotFound`] if
    /// `root` is missing or is not a directory.
    pub fn discover_with<P: AsRef<Path>>(root: P, config: &ScanConfig) -> Result<Self, ScanError> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(ScanError::NotFound(root.to_path_buf()));
        }

        let mut raw_files = Vec::new();
        let mut stray_scan_files = 0usize;

        for entry in sorted_entries(root)? {
            let (path, is_dir) = entry;
            if is_dir {
                let scan_files = scan_files_under(&path, config)?;
                if scan_files.is_empty() {
                    debug!("Skipping {} (no .{} files)", path.display(), config.extension);
                    continue;
                }
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                raw_files.push(RawFile {
                    path,
                    name,
                    scan_files: scan_files.len(),
                });
            } else if config.is_scan_file(&path) {
                stray_scan_files += 1;
            }
        }

        if stray_scan_files > 0 {
            warn!(
                "Ignoring {} scan file(s) directly under {}; scan files must live in a raw-file sub-directory",
                stray_scan_files,
                root.display()
            );
        }

        raw_files.sort();
        info!("Discovered {} raw files under {}", raw_files.len(), root.display());

        Ok(Self {
            root: root.to_path_buf(),
            raw_files,
        })
    }

    /// Build an index from already-known raw files. The list is sorted by path.
    pub fn from_raw_files<P: AsRef<Path>>(root: P, mut raw_files: Vec<RawFile>) -> Self {
        raw_files.sort();
        raw_files.dedup_by(|a, b| a.path == b.path);
        Self {
            root: root.as_ref().to_path_buf(),
            raw_files,
        }
    }

    /// The directory the index was built from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Raw files in visitation order.
    pub fn raw_files(&self) -> &[RawFile] {
        &self.raw_files
    }

    /// Number of raw files.
    pub fn len(&self) -> usize {
        self.raw_files.len()
    }

    /// True when no raw file was discovered.
    pub fn is_empty(&self) -> bool {
        self.raw_files.is_empty()
    }
}

/// Directory entries of `dir` sorted by path, tagged with whether each is a directory.
///
/// Symbolic links to directories are not followed.
fn sorted_entries(dir: &Path) -> Result<Vec<(PathBuf, bool)>, ScanError> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| ScanError::io(dir, e))? {
        let entry = entry.map_err(|e| ScanError::io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| ScanError::io(entry.path(), e))?;
        entries.push((entry.path(), file_type.is_dir()));
    }
    entries.sort();
    Ok(entries)
}

/// All scan files beneath `dir`, recursively, sorted by full path.
pub(crate) fn scan_files_under(dir: &Path, config: &ScanConfig) -> Result<Vec<PathBuf>, ScanError> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        for (path, is_dir) in sorted_entries(&current)? {
            if is_dir {
                pending.push(path);
            } else if config.is_scan_file(&path) && path.is_file() {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}
