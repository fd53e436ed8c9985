use crate::error::{CliError, Result};
use potentials::core::models::artifact::Artifact;
use potentials::core::models::term::{CoeffRule, Term};
use potentials::core::utils::number::Numeric;
use potentials::{CoeffScheme, PairInteraction, PotentialBuilder};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
enum PartialTerm {
    Option(String),
    Parameter(Numeric),
    File(String),
    Symbols(bool),
    SymbolsList(bool),
}

impl From<PartialTerm> for Term {
    fn from(p: PartialTerm) -> Self {
        match p {
            PartialTerm::Option(value) => Term::Option(value),
            PartialTerm::Parameter(value) => Term::Parameter(value),
            PartialTerm::File(value) => Term::File(value),
            PartialTerm::Symbols(flag) => Term::Symbols(flag),
            PartialTerm::SymbolsList(flag) => Term::SymbolsList(flag),
        }
    }
}

fn terms(partial: Vec<PartialTerm>) -> Vec<Term> {
    partial.into_iter().map(Into::into).collect()
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialRule {
    #[serde(default)]
    interaction: Vec<String>,
    #[serde(default)]
    symbols_group: bool,
    #[serde(default)]
    terms: Vec<PartialTerm>,
}

impl From<PartialRule> for CoeffRule {
    fn from(p: PartialRule) -> Self {
        CoeffRule {
            interaction: p.interaction,
            terms: terms(p.terms),
            symbols_group: p.symbols_group,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialInteraction {
    symbols: Option<Vec<String>>,
    terms: Vec<PartialTerm>,
}

impl TryFrom<PartialInteraction> for PairInteraction {
    type Error = CliError;

    fn try_from(p: PartialInteraction) -> Result<Self> {
        match p.symbols.as_deref() {
            None => Ok(PairInteraction::universal(terms(p.terms))),
            Some([first, second]) => Ok(PairInteraction::new(first, second, terms(p.terms))),
            Some(other) => Err(CliError::Config(format!(
                "A pair interaction needs exactly two symbols, found {}.",
                other.len()
            ))),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case", tag = "scheme")]
enum PartialCoeffScheme {
    Explicit {
        #[serde(default)]
        rules: Vec<PartialRule>,
    },
    ParamFile {
        file: String,
    },
    LibParam {
        libfile: String,
        paramfile: Option<String>,
    },
    PerElementFiles {
        files: Vec<String>,
    },
    Pairs {
        interactions: Vec<PartialInteraction>,
    },
}

impl TryFrom<PartialCoeffScheme> for CoeffScheme {
    type Error = CliError;

    fn try_from(p: PartialCoeffScheme) -> Result<Self> {
        Ok(match p {
            PartialCoeffScheme::Explicit { rules } => {
                CoeffScheme::Explicit(rules.into_iter().map(Into::into).collect())
            }
            PartialCoeffScheme::ParamFile { file } => CoeffScheme::ParamFile { file },
            PartialCoeffScheme::LibParam { libfile, paramfile } => {
                CoeffScheme::LibParam { libfile, paramfile }
            }
            PartialCoeffScheme::PerElementFiles { files } => CoeffScheme::PerElementFiles { files },
            PartialCoeffScheme::Pairs { interactions } => CoeffScheme::Pairs {
                interactions: interactions
                    .into_iter()
                    .map(PairInteraction::try_from)
                    .collect::<Result<_>>()?,
            },
        })
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialAtoms {
    symbols: Option<Vec<String>>,
    elements: Option<Vec<String>>,
    masses: Option<Vec<f64>>,
    charges: Option<Vec<f64>>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialArtifact {
    url: Option<String>,
    label: Option<String>,
    filename: Option<String>,
}

impl From<PartialArtifact> for Artifact {
    fn from(p: PartialArtifact) -> Self {
        Artifact {
            url: p.url,
            label: p.label,
            filename: p.filename,
        }
    }
}

/// A potential recipe as written in a TOML file.
///
/// Every field is optional at this stage; required values are enforced when
/// the recipe is turned into a model.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PartialRecipe {
    id: Option<String>,
    key: Option<String>,
    potential_id: Option<String>,
    potential_key: Option<String>,
    dois: Option<Vec<String>>,
    comments: Option<String>,
    units: Option<String>,
    atom_style: Option<String>,
    pair_style: Option<String>,
    pair_style_terms: Option<Vec<PartialTerm>>,
    allsymbols: Option<bool>,
    status: Option<String>,
    atoms: Option<PartialAtoms>,
    pair_coeff: Option<PartialCoeffScheme>,
    commands: Option<Vec<Vec<PartialTerm>>>,
    artifacts: Option<Vec<PartialArtifact>>,
}

impl PartialRecipe {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading recipe from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Applies `--set KEY=VALUE` overrides and converts the recipe into a
    /// configured builder.
    pub fn merge_with_cli(mut self, set_values: &[String]) -> Result<PotentialBuilder> {
        self.apply_set_values(set_values)?;

        let mut builder = PotentialBuilder::new()
            .key(self.key)
            .potential_key(self.potential_key);

        if let Some(id) = self.id {
            builder = builder.id(id);
        }
        if let Some(potential_id) = self.potential_id {
            builder = builder.potential_id(potential_id);
        }
        if let Some(dois) = self.dois {
            builder = builder.dois(dois);
        }
        if let Some(comments) = self.comments {
            builder = builder.comments(comments);
        }
        if let Some(units) = self.units {
            builder = builder.units(units);
        }
        if let Some(atom_style) = self.atom_style {
            builder = builder.atom_style(atom_style);
        }
        if let Some(pair_style) = self.pair_style {
            builder = builder.pair_style(pair_style);
        }
        if let Some(pair_style_terms) = self.pair_style_terms {
            builder = builder.pair_style_terms(terms(pair_style_terms));
        }
        if let Some(allsymbols) = self.allsymbols {
            builder = builder.allsymbols(allsymbols);
        }
        if let Some(status) = self.status {
            builder = builder.status_str(&status)?;
        }

        let atoms = self.atoms.unwrap_or_default();
        if let Some(symbols) = atoms.symbols {
            builder = builder.symbols(symbols);
        }
        if let Some(elements) = atoms.elements {
            builder = builder.elements(elements);
        }
        if let Some(masses) = atoms.masses {
            builder = builder.masses(masses);
        }
        if let Some(charges) = atoms.charges {
            builder = builder.charges(charges);
        }

        if let Some(scheme) = self.pair_coeff {
            builder = builder.scheme(scheme.try_into()?);
        }
        for command in self.commands.unwrap_or_default() {
            builder = builder.command(terms(command));
        }
        for artifact in self.artifacts.unwrap_or_default() {
            builder = builder.artifact(artifact.into());
        }

        Ok(builder)
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let value = value_str.to_string();

            match key {
                "id" => self.id = Some(value),
                "key" => self.key = Some(value),
                "potential-id" => self.potential_id = Some(value),
                "potential-key" => self.potential_key = Some(value),
                "comments" => self.comments = Some(value),
                "units" => self.units = Some(value),
                "atom-style" => self.atom_style = Some(value),
                "pair-style" => self.pair_style = Some(value),
                "status" => self.status = Some(value),
                "allsymbols" => {
                    self.allsymbols = Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!(
                            "Invalid boolean value for {}: {}",
                            key, value_str
                        ))
                    })?);
                }
                "atoms.symbols" => {
                    self.atoms.get_or_insert_with(Default::default).symbols = Some(list(value_str));
                }
                "atoms.elements" => {
                    self.atoms.get_or_insert_with(Default::default).elements = Some(list(value_str));
                }
                "atoms.masses" => {
                    let masses = list(value_str)
                        .iter()
                        .map(|m| m.parse::<f64>())
                        .collect::<std::result::Result<Vec<_>, _>>()
                        .map_err(|_| {
                            CliError::Config(format!(
                                "Invalid float list for {}: {}",
                                key, value_str
                            ))
                        })?;
                    self.atoms.get_or_insert_with(Default::default).masses = Some(masses);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
