use anyhow::{Context, Result};
use ifishmass::scan::{RawFileIndex, ScanConfig};
use std::path::PathBuf;

/// List the raw files under `root`
pub fn run(root: PathBuf, extension: &str) -> Result<()> {
    let config = ScanConfig::default().with_extension(extension);
    let index = RawFileIndex::discover_with(&root, &config)
        .with_context(|| format!("Failed to index {}", root.display()))?;

    println!("Raw files under {}", root.display());
    println!("========================");
    for raw_file in index.raw_files() {
        println!("  {:<40} {:>6} scan files", raw_file.name, raw_file.scan_files);
    }
    println!();
    println!(
        "{} raw files, {} scan files",
        index.len(),
        index.raw_files().iter().map(|r| r.scan_files).sum::<usize>()
    );
    Ok(())
}
