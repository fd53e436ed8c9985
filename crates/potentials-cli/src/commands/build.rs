use crate::cli::BuildArgs;
use crate::config::PartialRecipe;
use crate::error::{CliError, Result};
use potentials::core::document;
use tracing::info;

pub fn run(args: BuildArgs) -> Result<()> {
    let recipe = PartialRecipe::from_file(&args.recipe)?;
    info!("Merging recipe from file and CLI arguments...");
    let builder = recipe.merge_with_cli(&args.set_values)?;

    let model = builder.build()?;
    info!(
        "Built '{}' with {} atom type(s) and {} pair_coeff rule(s).",
        model.id(),
        model.atoms().len(),
        model.pair_coeff_rules().len()
    );

    document::write_path(&model.to_document(), &args.output).map_err(|source| {
        CliError::Record {
            path: args.output.clone(),
            source,
        }
    })?;

    println!(
        "✓ Potential record '{}' written to: {}",
        model.id(),
        args.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use potentials::PotentialModel;
    use std::fs;
    use tempfile::tempdir;

    const RECIPE: &str = r#"
id = "Tersoff--Si-C"
pair-style = "tersoff"

[atoms]
elements = ["Si", "C"]

[pair-coeff]
scheme = "param-file"
file = "SiC.tersoff"
"#;

    #[test]
    fn build_writes_readable_xml_record() {
        let dir = tempdir().unwrap();
        let recipe = dir.path().join("recipe.toml");
        fs::write(&recipe, RECIPE).unwrap();
        let output = dir.path().join("potential_LAMMPS.xml");

        run(BuildArgs {
            recipe,
            output: output.clone(),
            set_values: vec!["units=real".to_string()],
        })
        .unwrap();

        let model = PotentialModel::from_path(&output).unwrap();
        assert_eq!(model.id(), "Tersoff--Si-C");
        assert_eq!(model.units(), "real");
        assert_eq!(model.symbols(), vec!["Si", "C"]);
    }

    #[test]
    fn build_reports_incomplete_recipes() {
        let dir = tempdir().unwrap();
        let recipe = dir.path().join("recipe.toml");
        fs::write(&recipe, "pair-style = \"eam\"\n").unwrap();

        let result = run(BuildArgs {
            recipe,
            output: dir.path().join("out.json"),
            set_values: Vec::new(),
        });
        assert!(matches!(result, Err(CliError::Potential(_))));
    }

    #[test]
    fn build_rejects_unknown_output_extension() {
        let dir = tempdir().unwrap();
        let recipe = dir.path().join("recipe.toml");
        fs::write(&recipe, RECIPE).unwrap();

        let result = run(BuildArgs {
            recipe,
            output: dir.path().join("out.yaml"),
            set_values: Vec::new(),
        });
        assert!(matches!(result, Err(CliError::Record { .. })));
    }
}
