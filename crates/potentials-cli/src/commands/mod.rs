pub mod build;
pub mod generate;
pub mod info;

use crate::error::{CliError, Result};
use potentials::PotentialModel;
use potentials::core::models::status::Status;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

/// Loads a record, warning when it is no longer the active implementation.
pub(crate) fn load_model(path: &Path) -> Result<PotentialModel> {
    info!("Loading potential record from {:?}", path);
    let model = PotentialModel::from_path(path).map_err(|source| CliError::Record {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        "Loaded '{}' with pair_style '{}' and symbols {:?}.",
        model.id(),
        model.pair_style(),
        model.symbols()
    );

    match model.status() {
        Status::Active => {}
        Status::Superseded => warn!(
            "Potential '{}' has been superseded by a newer implementation.",
            model.id()
        ),
        Status::Retracted => warn!(
            "Potential '{}' has been retracted and should not be used for new work.",
            model.id()
        ),
    }
    Ok(model)
}

/// Writes text to a file, or to standard output when no path is given.
pub(crate) fn emit(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)?;
            info!("Wrote output to {:?}", path);
            println!("✓ Output written to: {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn load_model_wraps_document_errors_with_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        match load_model(&path) {
            Err(CliError::Record { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected a record error, got {:?}", other),
        }
    }

    #[test]
    fn load_model_rejects_unsupported_extensions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("record.yaml");
        fs::write(&path, "id: x").unwrap();
        assert!(matches!(load_model(&path), Err(CliError::Record { .. })));
    }

    #[test]
    fn emit_writes_text_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.in");
        emit(Some(&path), "pair_style eam\n").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "pair_style eam\n");
    }
}
