use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use super::{LoadedScans, ScanLoader};

type Slot = Arc<OnceLock<Arc<LoadedScans>>>;

/// Per-run cache of loaded raw files, keyed by raw-file directory
///
/// Entries are read-only once populated. Concurrent requests for the same
/// directory wait on a single load instead of reading the files twice.
#[derive(Debug, Default)]
pub struct ScanCache {
    loader: ScanLoader,
    entries: Mutex<HashMap<PathBuf, Slot>>,
    loads: AtomicUsize,
}

impl ScanCache {
    /// Create an empty cache that loads through `loader`.
    pub fn new(loader: ScanLoader) -> Self {
        Self {
            loader,
            entries: Mutex::new(HashMap::new()),
            loads: AtomicUsize::new(0),
        }
    }

    /// The loader used on cache misses.
    pub fn loader(&self) -> &ScanLoader {
        &self.loader
    }

    /// Records of `raw_file_dir`, loading them on first use.
    pub fn get_or_load(&self, raw_file_dir: &Path) -> Arc<LoadedScans> {
        let slot = {
            let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
            Arc::clone(entries.entry(raw_file_dir.to_path_buf()).or_default())
        };

        // The map lock is released here; only callers for this key wait below.
        let loaded = slot.get_or_init(|| {
            self.loads.fetch_add(1, Ordering::Relaxed);
            Arc::new(self.loader.load_partial(raw_file_dir))
        });
        Arc::clone(loaded)
    }

    /// Number of raw files actually read from disk.
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    /// Number of cached raw files.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|p| p.into_inner()).len()
    }

    /// True when nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached raw file.
    pub fn clear(&self) {
        self.entries.lock().unwrap_or_else(|p| p.into_inner()).clear();
    }
}
