use crate::cli::{DataInfoArgs, GeneratorArgs, RestartInfoArgs};
use crate::commands::{emit, load_model};
use crate::error::{CliError, Result};
use potentials::{CommandGenerator, PotentialModel, SymbolRequest};
use tracing::{debug, info};

fn generator<'a>(model: &'a PotentialModel, args: &GeneratorArgs) -> CommandGenerator<'a> {
    let mut generator = CommandGenerator::new(model).with_comments(args.comments);
    if let Some(pot_dir) = &args.pot_dir {
        generator = generator.with_pot_dir(pot_dir);
    }
    if let Some(units) = &args.units {
        generator = generator.with_units(units);
    }
    if let Some(atom_style) = &args.atom_style {
        generator = generator.with_atom_style(atom_style);
    }
    generator
}

fn symbol_request(args: &GeneratorArgs) -> SymbolRequest {
    if args.symbols.is_empty() {
        return SymbolRequest::all();
    }
    SymbolRequest::new(
        args.symbols
            .iter()
            .map(|s| match s.trim() {
                "" => None,
                s if s.eq_ignore_ascii_case("null") => None,
                s => Some(s.to_string()),
            })
            .collect(),
    )
}

fn mass_overrides(args: &GeneratorArgs) -> Result<Option<Vec<Option<f64>>>> {
    if args.masses.is_empty() {
        return Ok(None);
    }
    args.masses
        .iter()
        .map(|m| match m.trim() {
            "" | "-" => Ok(None),
            m => m
                .parse::<f64>()
                .map(Some)
                .map_err(|_| CliError::Argument(format!("Invalid mass value: '{}'", m))),
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

pub fn run_pair_info(args: GeneratorArgs) -> Result<()> {
    let model = load_model(&args.record)?;
    let masses = mass_overrides(&args)?;

    info!("Generating pair commands for '{}'.", model.id());
    let commands = generator(&model, &args).pair_info(symbol_request(&args), masses.as_deref())?;
    debug!("Generated {} command line(s).", commands.lines().count());

    emit(args.output.as_deref(), &commands)
}

pub fn run_data_info(args: DataInfoArgs) -> Result<()> {
    let model = load_model(&args.generator.record)?;
    let masses = mass_overrides(&args.generator)?;
    let pbc: [bool; 3] = args.pbc.as_slice().try_into().map_err(|_| {
        CliError::Argument(format!(
            "--pbc expects exactly three values, found {}",
            args.pbc.len()
        ))
    })?;

    info!(
        "Generating data-file preamble for '{}' reading {:?}.",
        model.id(),
        &args.data_file
    );
    let script = generator(&model, &args.generator).pair_data_info(
        &args.data_file,
        pbc,
        symbol_request(&args.generator),
        masses.as_deref(),
    )?;

    emit(args.generator.output.as_deref(), &script)
}

pub fn run_restart_info(args: RestartInfoArgs) -> Result<()> {
    let model = load_model(&args.generator.record)?;
    let masses = mass_overrides(&args.generator)?;

    info!(
        "Generating restart preamble for '{}' reading {:?}.",
        model.id(),
        &args.restart_file
    );
    let script = generator(&model, &args.generator).pair_restart_info(
        &args.restart_file,
        symbol_request(&args.generator),
        masses.as_deref(),
    )?;

    emit(args.generator.output.as_deref(), &script)
}
