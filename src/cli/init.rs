use anyhow::{bail, Context, Result};
use log::info;
use std::path::PathBuf;

/// Starter configuration written by `ifishmass init`
pub const DEMO_CONFIG: &str = r#"# iFishMass configuration

[input]
# One sub-directory per raw file, each holding one CSV file per scan
data_folder = "scans"
scan_extension = "csv"

[output]
directory = "reports"

[search]
ppm = 10.0
masses = [
    881.39739, 1761.78747, 587.93404, 441.20236,
    1189.48879, 1190.49607, 595.75169, 397.50357, 298.37951,
    1296.68481, 648.84607, 432.89982, 324.92669,
]

# Group totals are written only when all three groups are set
[groups]
internal_standard = [1296.68481, 648.84607, 432.89982, 324.92669]
modified_peptides = [881.39739, 1761.78747, 587.93404, 441.20236]
unmodified_peptides = [1189.48879, 1190.49607, 595.75169, 397.50357, 298.37951]

[run]
# threads = 4
"#;

/// Write [`DEMO_CONFIG`] to `path`
pub fn run(path: PathBuf, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    std::fs::write(&path, DEMO_CONFIG)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    info!("Wrote starter config to {}", path.display());
    println!("Created {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::config::Config;
    use crate::cli::Overrides;

    #[test]
    fn test_demo_config_is_valid() {
        let config = Config::from_str(DEMO_CONFIG).unwrap();
        assert_eq!(config.search.masses.len(), 13);
        assert_eq!(config.groups.internal_standard.len(), 4);

        let pipeline = config.into_pipeline(Overrides::default()).unwrap();
        assert_eq!(pipeline.tolerance, 10.0);
        assert_eq!(pipeline.threads, None);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ifishmass.toml");

        run(path.clone(), false).unwrap();
        assert!(run(path.clone(), false).is_err());

        std::fs::write(&path, "edited").unwrap();
        run(path.clone(), true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEMO_CONFIG);
    }
}
