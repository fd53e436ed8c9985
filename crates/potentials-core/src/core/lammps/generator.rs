use crate::core::error::PotentialError;
use crate::core::models::potential::{PotentialModel, SymbolRequest};
use crate::core::models::term::{CoeffRule, Term};
use crate::core::utils::number::format_float;
use std::path::{Path, PathBuf};

const KIM_STYLE: &str = "kim";
const EAM_STYLE: &str = "eam";

/// Renders LAMMPS input commands for one potential.
///
/// The generator borrows an immutable [`PotentialModel`] and holds the
/// per-call context that is not part of the record: the directory holding the
/// potential's parameter files, whether informational `print` lines are
/// emitted, and optional units/atom_style overrides. Every call works on its
/// own copy of the requested symbol list, so one generator may be shared
/// freely.
#[derive(Debug, Clone)]
pub struct CommandGenerator<'a> {
    model: &'a PotentialModel,
    pot_dir: PathBuf,
    comments: bool,
    units: Option<String>,
    atom_style: Option<String>,
}

/// The symbol lists a rendered line is resolved against.
struct Scope<'s> {
    system: &'s [&'s str],
    coeff: &'s [&'s str],
}

impl<'a> CommandGenerator<'a> {
    pub fn new(model: &'a PotentialModel) -> Self {
        Self {
            model,
            pot_dir: PathBuf::new(),
            comments: false,
            units: None,
            atom_style: None,
        }
    }

    /// Sets the directory that `file` terms are resolved against. The
    /// default is the empty path, leaving file names relative to LAMMPS's
    /// working directory.
    pub fn with_pot_dir(mut self, pot_dir: impl Into<PathBuf>) -> Self {
        self.pot_dir = pot_dir.into();
        self
    }

    /// Enables `print` lines carrying the potential's comments, DOIs and
    /// artifact URLs ahead of the commands.
    pub fn with_comments(mut self, enabled: bool) -> Self {
        self.comments = enabled;
        self
    }

    /// Overrides the model's units for `kim_init` and data-file scripts.
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    /// Overrides the model's atom_style for data-file scripts.
    pub fn with_atom_style(mut self, atom_style: impl Into<String>) -> Self {
        self.atom_style = Some(atom_style.into());
        self
    }

    pub fn model(&self) -> &'a PotentialModel {
        self.model
    }

    pub fn pot_dir(&self) -> &Path {
        &self.pot_dir
    }

    pub(crate) fn units(&self) -> &str {
        self.units.as_deref().unwrap_or(self.model.units())
    }

    pub(crate) fn atom_style(&self) -> &str {
        self.atom_style.as_deref().unwrap_or(self.model.atom_style())
    }

    /// Generates the command lines that define the potential for a system.
    ///
    /// # Arguments
    ///
    /// * `symbols` - Atom-model symbol of each atom type of the system, in
    ///   type order. [`SymbolRequest::all`] uses every model symbol.
    /// * `masses` - Optional per-type mass overrides, aligned with `symbols`
    ///   as requested. `None` entries keep the model's mass; types appended
    ///   because the model requires all of its symbols always keep it.
    ///
    /// # Return
    ///
    /// The commands, one per line, each line terminated by a newline.
    ///
    /// # Errors
    ///
    /// Returns [`PotentialError::LengthMismatch`] if `masses` does not match
    /// the request, [`PotentialError::IncompleteInput`] for null symbols,
    /// [`PotentialError::UnknownSymbol`] for symbols the model lacks, and
    /// [`PotentialError::InvalidRule`] for pair_coeff rules that cannot be
    /// applied. No output is produced on error.
    pub fn pair_info(
        &self,
        symbols: impl Into<SymbolRequest>,
        masses: Option<&[Option<f64>]>,
    ) -> Result<String, PotentialError> {
        let request = symbols.into();
        let requested = request.count().unwrap_or(self.model.atoms().len());
        if let Some(masses) = masses {
            if masses.len() != requested {
                return Err(PotentialError::LengthMismatch {
                    what: "masses",
                    expected: requested,
                    found: masses.len(),
                });
            }
        }

        let normalized = self.model.normalize_symbols(request)?;
        let system: Vec<&str> = normalized.iter().map(String::as_str).collect();
        let resolved = self.resolve_masses(&system, masses.unwrap_or_default())?;

        let mut lines = self.comment_lines();
        if self.model.pair_style() == KIM_STYLE {
            lines.push(format!("kim_init {} {}", self.model.id(), self.units()));
            lines.push(format!("kim_interactions {}", system[..requested].join(" ")));
            lines.extend(mass_lines(&resolved));
            lines.push(String::new());
        } else {
            lines.extend(mass_lines(&resolved));
            lines.push(String::new());
            lines.extend(self.pair_lines(&system)?);
        }

        let mut info = lines.join("\n");
        info.push('\n');
        Ok(info)
    }

    fn resolve_masses(&self, system: &[&str], overrides: &[Option<f64>]) -> Result<Vec<f64>, PotentialError> {
        system
            .iter()
            .enumerate()
            .map(|(i, symbol)| match overrides.get(i).copied().flatten() {
                Some(mass) => Ok(mass),
                None => self.model.atom(symbol).map(|atom| atom.mass),
            })
            .collect()
    }

    fn pair_lines(&self, system: &[&str]) -> Result<Vec<String>, PotentialError> {
        let model_symbols = self.model.symbols();
        let mut lines = vec![format!(
            "pair_style {}{}",
            self.model.pair_style(),
            self.render_terms(self.model.pair_style_terms(), &[], &[])
        )];

        for rule in self.model.pair_coeff_rules() {
            if rule.is_wildcard() {
                let scope = Scope { system, coeff: &model_symbols };
                lines.push(format!("pair_coeff * *{}", self.render_scoped(&rule.terms, &scope)));
            } else if rule.is_many_body() {
                let group: Vec<&str> = rule.interaction.iter().map(String::as_str).collect();
                let scope = Scope { system, coeff: &group };
                lines.push(format!("pair_coeff * *{}", self.render_scoped(&rule.terms, &scope)));
            } else {
                lines.extend(self.pairwise_lines(rule, system)?);
            }
        }

        for command in self.model.extra_commands() {
            lines.push(
                self.render_terms(command, system, &model_symbols)
                    .trim()
                    .to_string(),
            );
        }
        Ok(lines)
    }

    fn pairwise_lines(&self, rule: &CoeffRule, system: &[&str]) -> Result<Vec<String>, PotentialError> {
        let [first, second] = rule.interaction.as_slice() else {
            return Err(PotentialError::InvalidRule(format!(
                "pair interactions need exactly two symbols, found {}",
                rule.interaction.len()
            )));
        };
        let (first, second) = (first.as_str(), second.as_str());
        let pair = [first, second];
        let terms = self.render_terms(&rule.terms, system, &pair);
        let mut lines = Vec::new();

        if self.model.pair_style() == EAM_STYLE {
            if first != second {
                return Err(PotentialError::InvalidRule(format!(
                    "only self-interactions allowed for eam, found {first}-{second}"
                )));
            }
            for (i, symbol) in system.iter().enumerate() {
                if *symbol == first {
                    lines.push(format!("pair_coeff {0} {0}{terms}", i + 1));
                }
            }
            return Ok(lines);
        }

        for i in 0..system.len() {
            for j in i..system.len() {
                let forward = system[i] == first && system[j] == second;
                let reverse = system[i] == second && system[j] == first;
                if forward || reverse {
                    lines.push(format!("pair_coeff {} {}{terms}", i + 1, j + 1));
                }
            }
        }
        Ok(lines)
    }

    /// Renders a sequence of terms, each preceded by a space.
    ///
    /// `system` lists the symbols of the simulated atom types in type order;
    /// `coeff` lists the symbols the line applies to. `symbols` terms emit
    /// every system symbol (or `NULL` where the line does not apply) and
    /// `symbolsList` terms emit the applicable symbols present in the system.
    pub fn render_terms(&self, terms: &[Term], system: &[&str], coeff: &[&str]) -> String {
        self.render_scoped(terms, &Scope { system, coeff })
    }

    fn render_scoped(&self, terms: &[Term], scope: &Scope<'_>) -> String {
        let mut line = String::new();
        for term in terms {
            match term {
                Term::Option(value) => {
                    line.push(' ');
                    line.push_str(value);
                }
                Term::Parameter(value) => {
                    line.push(' ');
                    line.push_str(&value.to_string());
                }
                Term::File(file) => {
                    line.push(' ');
                    line.push_str(&self.pot_dir.join(file).to_string_lossy());
                }
                Term::SymbolsList(true) => {
                    for symbol in scope.coeff.iter().filter(|s| scope.system.contains(*s)) {
                        line.push(' ');
                        line.push_str(symbol);
                    }
                }
                Term::Symbols(true) => {
                    for symbol in scope.system {
                        line.push(' ');
                        line.push_str(if scope.coeff.contains(symbol) { *symbol } else { "NULL" });
                    }
                }
                Term::Symbols(false) | Term::SymbolsList(false) => {}
            }
        }
        line
    }

    fn comment_lines(&self) -> Vec<String> {
        if !self.comments {
            return Vec::new();
        }
        let model = self.model;
        let mut lines: Vec<String> = model
            .comments()
            .lines()
            .filter(|line| !line.is_empty())
            .map(|line| format!("print \"{line}\""))
            .collect();

        if !model.potential_dois().is_empty() {
            lines.push("print \"Publication(s) related to the potential:\"".to_string());
            for doi in model.potential_dois() {
                lines.push(format!("print \"https://doi.org/{doi}\""));
            }
        }

        let urls: Vec<&str> = model.artifacts().iter().filter_map(|a| a.url.as_deref()).collect();
        if !urls.is_empty() {
            lines.push("print \"Parameter file(s) can be downloaded at:\"".to_string());
            for url in urls {
                lines.push(format!("print \"{url}\""));
            }
        }
        lines
    }

    /// The informational `print` commands, regardless of whether they are
    /// enabled for [`pair_info`](Self::pair_info).
    pub fn print_comments(&self) -> String {
        let lines = Self { comments: true, ..self.clone() }.comment_lines();
        lines.iter().map(|line| format!("{line}\n")).collect()
    }
}

fn mass_lines(masses: &[f64]) -> impl Iterator<Item = String> + '_ {
    masses
        .iter()
        .enumerate()
        .map(|(i, mass)| format!("mass {} {}", i + 1, format_float(*mass)))
}
