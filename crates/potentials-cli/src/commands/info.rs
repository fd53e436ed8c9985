use crate::cli::InfoArgs;
use crate::commands::{emit, load_model};
use crate::error::Result;
use tracing::info;

pub fn run(args: InfoArgs) -> Result<()> {
    let model = load_model(&args.record)?;

    info!("Summarising '{}'.", model.id());
    let mut summary = serde_json::to_string_pretty(&model.metadata()).map_err(anyhow::Error::from)?;
    summary.push('\n');

    emit(args.output.as_deref(), &summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn info_writes_metadata_as_json() {
        let dir = tempdir().unwrap();
        let record = dir.path().join("potential_LAMMPS.json");
        fs::write(
            &record,
            r#"{"potential-LAMMPS": {
                "key": "k-1", "id": "EAM--Cu", "units": "metal", "atom_style": "atomic",
                "status": "retracted",
                "potential": {"key": "p-1", "id": "Cu-potential", "doi": "10.1/x"},
                "atom": {"element": "Cu"},
                "pair_style": {"type": "eam"},
                "pair_coeff": {"interaction": {"symbol": ["Cu", "Cu"]}, "term": {"file": "Cu.eam"}}
            }}"#,
        )
        .unwrap();
        let output = dir.path().join("info.json");

        run(InfoArgs {
            record,
            output: Some(output.clone()),
        })
        .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(value["id"], "EAM--Cu");
        assert_eq!(value["potential_id"], "Cu-potential");
        assert_eq!(value["status"], "retracted");
        assert_eq!(value["symbols"], serde_json::json!(["Cu"]));
        assert_eq!(value["dois"], serde_json::json!(["10.1/x"]));
        assert_eq!(value["masses"][0], 63.546);
    }
}
