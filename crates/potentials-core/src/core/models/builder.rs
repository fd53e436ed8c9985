use super::artifact::Artifact;
use super::atom::Atom;
use super::potential::{PotentialModel, check_unique_symbols};
use super::status::Status;
use super::term::{CoeffRule, Term};
use crate::core::document::node::Node;
use crate::core::error::PotentialError;
use std::str::FromStr;
use uuid::Uuid;

/// One explicitly listed pair interaction for [`CoeffScheme::Pairs`].
#[derive(Debug, Clone, PartialEq)]
pub struct PairInteraction {
    /// The unordered symbol pair; `None` applies the terms to all pairs.
    pub symbols: Option<(String, String)>,
    pub terms: Vec<Term>,
}

impl PairInteraction {
    pub fn new(first: &str, second: &str, terms: Vec<Term>) -> Self {
        Self {
            symbols: Some((first.to_string(), second.to_string())),
            terms,
        }
    }

    pub fn universal(terms: Vec<Term>) -> Self {
        Self {
            symbols: None,
            terms,
        }
    }
}

/// How the builder derives the pair_coeff rules of a model.
#[derive(Debug, Clone, PartialEq)]
pub enum CoeffScheme {
    /// Rules given verbatim.
    Explicit(Vec<CoeffRule>),
    /// `pair_coeff * * <file> <symbols>`, used by most many-body styles.
    ParamFile { file: String },
    /// `pair_coeff * * <libfile> <all symbols> <paramfile|NULL> <symbols>`,
    /// used by MEAM-like styles.
    LibParam {
        libfile: String,
        paramfile: Option<String>,
    },
    /// One self-interaction rule per symbol, each with its own file, as used
    /// by the classic `eam` style.
    PerElementFiles { files: Vec<String> },
    /// Coefficients listed for every unordered symbol pair, as used by true
    /// pair styles.
    Pairs { interactions: Vec<PairInteraction> },
}

impl Default for CoeffScheme {
    fn default() -> Self {
        CoeffScheme::Explicit(Vec::new())
    }
}

impl CoeffScheme {
    fn rules(&self, symbols: &[&str]) -> Result<Vec<CoeffRule>, PotentialError> {
        match self {
            CoeffScheme::Explicit(rules) => Ok(rules.clone()),
            CoeffScheme::ParamFile { file } => Ok(vec![CoeffRule::wildcard(vec![
                Term::File(file.clone()),
                Term::Symbols(true),
            ])]),
            CoeffScheme::LibParam { libfile, paramfile } => Ok(vec![CoeffRule::wildcard(vec![
                Term::File(libfile.clone()),
                Term::Option(symbols.join(" ")),
                match paramfile {
                    Some(paramfile) => Term::File(paramfile.clone()),
                    None => Term::Option("NULL".to_string()),
                },
                Term::Symbols(true),
            ])]),
            CoeffScheme::PerElementFiles { files } => {
                if files.len() != symbols.len() {
                    return Err(PotentialError::LengthMismatch {
                        what: "per-element files",
                        expected: symbols.len(),
                        found: files.len(),
                    });
                }
                Ok(symbols
                    .iter()
                    .zip(files)
                    .map(|(symbol, file)| CoeffRule::pair(symbol, symbol, vec![Term::File(file.clone())]))
                    .collect())
            }
            CoeffScheme::Pairs { interactions } => pair_rules(interactions, symbols),
        }
    }
}

fn pair_rules(interactions: &[PairInteraction], symbols: &[&str]) -> Result<Vec<CoeffRule>, PotentialError> {
    if let Some(empty) = interactions.iter().find(|i| i.terms.is_empty()) {
        let which = match &empty.symbols {
            Some((a, b)) => format!("{a}-{b}"),
            None => "universal".to_string(),
        };
        return Err(PotentialError::IncompleteModel(format!(
            "no terms given for the {which} interaction"
        )));
    }

    if let [single] = interactions {
        if single.symbols.is_none() {
            return Ok(vec![CoeffRule::wildcard(single.terms.clone())]);
        }
    }

    let mut unique: Vec<(String, String, &[Term])> = Vec::new();
    for interaction in interactions {
        let Some((first, second)) = &interaction.symbols else {
            return Err(PotentialError::IncompleteModel(
                "symbols must be given when several interactions are listed".to_string(),
            ));
        };
        for symbol in [first, second] {
            if !symbols.contains(&symbol.as_str()) {
                return Err(PotentialError::UnknownSymbol(symbol.clone()));
            }
        }
        let (first, second) = if first <= second {
            (first.clone(), second.clone())
        } else {
            (second.clone(), first.clone())
        };
        unique.retain(|(a, b, _)| !(*a == first && *b == second));
        unique.push((first, second, interaction.terms.as_slice()));
    }

    let n = symbols.len();
    let expected = n * (n + 1) / 2;
    if unique.len() != expected {
        return Err(PotentialError::IncompleteModel(format!(
            "not all pair interactions set: expected {expected}, found {}",
            unique.len()
        )));
    }

    Ok(unique
        .into_iter()
        .map(|(first, second, terms)| CoeffRule::pair(&first, &second, terms.to_vec()))
        .collect())
}

/// Assembles a [`PotentialModel`] field by field.
///
/// Setters consume and return the builder so calls can be chained; setters
/// that validate their input return a `Result`. Both keys start out as fresh
/// UUID v4 strings. [`build`](Self::build) borrows the builder, validates
/// everything from scratch and can be called any number of times.
///
/// ```ignore
/// let model = PotentialBuilder::new()
///     .id("2009--Example--Cu--LAMMPS--ipr1")
///     .pair_style("eam")
///     .elements(["Cu"])
///     .scheme(CoeffScheme::PerElementFiles { files: vec!["Cu_u3.eam".into()] })
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct PotentialBuilder {
    id: Option<String>,
    key: String,
    potential_id: Option<String>,
    potential_key: String,
    potential_dois: Vec<String>,
    comments: String,
    units: String,
    atom_style: String,
    pair_style: Option<String>,
    pair_style_terms: Vec<Term>,
    allsymbols: bool,
    status: Status,
    symbols: Option<Vec<String>>,
    elements: Option<Vec<String>>,
    masses: Option<Vec<f64>>,
    charges: Option<Vec<f64>>,
    scheme: CoeffScheme,
    extra_commands: Vec<Vec<Term>>,
    artifacts: Vec<Artifact>,
}

impl Default for PotentialBuilder {
    fn default() -> Self {
        Self {
            id: None,
            key: new_key(),
            potential_id: None,
            potential_key: new_key(),
            potential_dois: Vec::new(),
            comments: String::new(),
            units: "metal".to_string(),
            atom_style: "atomic".to_string(),
            pair_style: None,
            pair_style_terms: Vec::new(),
            allsymbols: false,
            status: Status::default(),
            symbols: None,
            elements: None,
            masses: None,
            charges: None,
            scheme: CoeffScheme::default(),
            extra_commands: Vec::new(),
            artifacts: Vec::new(),
        }
    }
}

fn new_key() -> String {
    Uuid::new_v4().to_string()
}

fn strings<S: AsRef<str>>(values: impl IntoIterator<Item = S>) -> Vec<String> {
    values.into_iter().map(|v| v.as_ref().to_string()).collect()
}

impl PotentialBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the implementation key, or draws a new UUID v4 for `None`.
    pub fn key(mut self, key: Option<String>) -> Self {
        self.key = key.unwrap_or_else(new_key);
        self
    }

    pub fn potential_id(mut self, id: impl Into<String>) -> Self {
        self.potential_id = Some(id.into());
        self
    }

    /// Sets the potential key, or draws a new UUID v4 for `None`.
    pub fn potential_key(mut self, key: Option<String>) -> Self {
        self.potential_key = key.unwrap_or_else(new_key);
        self
    }

    pub fn dois<S: AsRef<str>>(mut self, dois: impl IntoIterator<Item = S>) -> Self {
        self.potential_dois = strings(dois);
        self
    }

    pub fn comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }

    pub fn units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    pub fn atom_style(mut self, atom_style: impl Into<String>) -> Self {
        self.atom_style = atom_style.into();
        self
    }

    pub fn pair_style(mut self, pair_style: impl Into<String>) -> Self {
        self.pair_style = Some(pair_style.into());
        self
    }

    /// Sets the extra pair_style terms. Plain numbers become parameters and
    /// plain text becomes options.
    pub fn pair_style_terms<T: Into<Term>>(mut self, terms: impl IntoIterator<Item = T>) -> Self {
        self.pair_style_terms = terms.into_iter().map(Into::into).collect();
        self
    }

    pub fn allsymbols(mut self, allsymbols: bool) -> Self {
        self.allsymbols = allsymbols;
        self
    }

    /// Sets `allsymbols` from text, accepting `"true"`/`"false"` in any case.
    pub fn allsymbols_str(self, value: &str) -> Result<Self, PotentialError> {
        let flag = Node::from(value).as_flag("allsymbols")?;
        Ok(self.allsymbols(flag))
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn status_str(self, value: &str) -> Result<Self, PotentialError> {
        let status = Status::from_str(value)?;
        Ok(self.status(status))
    }

    pub fn symbols<S: AsRef<str>>(mut self, symbols: impl IntoIterator<Item = S>) -> Self {
        self.symbols = Some(strings(symbols));
        self
    }

    pub fn elements<S: AsRef<str>>(mut self, elements: impl IntoIterator<Item = S>) -> Self {
        self.elements = Some(strings(elements));
        self
    }

    pub fn masses(mut self, masses: impl IntoIterator<Item = f64>) -> Self {
        self.masses = Some(masses.into_iter().collect());
        self
    }

    pub fn charges(mut self, charges: impl IntoIterator<Item = f64>) -> Self {
        self.charges = Some(charges.into_iter().collect());
        self
    }

    pub fn scheme(mut self, scheme: CoeffScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Adds one extra command line made of the given terms.
    pub fn command<T: Into<Term>>(mut self, terms: impl IntoIterator<Item = T>) -> Self {
        self.extra_commands.push(terms.into_iter().map(Into::into).collect());
        self
    }

    pub fn artifact(mut self, artifact: Artifact) -> Self {
        self.artifacts.push(artifact);
        self
    }

    /// Validates the accumulated fields and assembles a model.
    ///
    /// The builder is left untouched, so repeated calls return equal,
    /// independently owned models.
    ///
    /// # Errors
    ///
    /// Returns [`PotentialError::IncompleteModel`] if the id or pair style is
    /// unset, if neither symbols nor elements are set, or if masses are unset
    /// while elements are. Returns [`PotentialError::LengthMismatch`] if the
    /// per-atom arrays disagree in length, and propagates atom, symbol and
    /// scheme errors.
    pub fn build(&self) -> Result<PotentialModel, PotentialError> {
        let id = self
            .id
            .clone()
            .ok_or_else(|| PotentialError::IncompleteModel("id must be set".to_string()))?;
        let pair_style = self
            .pair_style
            .clone()
            .ok_or_else(|| PotentialError::IncompleteModel("pair_style must be set".to_string()))?;
        if self.symbols.is_none() && self.elements.is_none() {
            return Err(PotentialError::IncompleteModel(
                "symbols or elements must be set".to_string(),
            ));
        }
        if self.elements.is_none() && self.masses.is_none() {
            return Err(PotentialError::IncompleteModel(
                "masses must be set when elements are not".to_string(),
            ));
        }

        let atoms = self.assemble_atoms()?;
        check_unique_symbols(&atoms)?;
        let symbols: Vec<&str> = atoms.iter().map(|a| a.symbol.as_str()).collect();
        let pair_coeff_rules = self.scheme.rules(&symbols)?;

        Ok(PotentialModel {
            id,
            key: self.key.clone(),
            potential_id: self.potential_id.clone(),
            potential_key: Some(self.potential_key.clone()),
            potential_dois: self.potential_dois.clone(),
            comments: self.comments.clone(),
            units: self.units.clone(),
            atom_style: self.atom_style.clone(),
            pair_style,
            allsymbols: self.allsymbols,
            status: self.status,
            atoms,
            pair_style_terms: self.pair_style_terms.clone(),
            pair_coeff_rules,
            extra_commands: self.extra_commands.clone(),
            artifacts: self.artifacts.clone(),
        })
    }

    /// Builds the model and renders it as a record document.
    pub fn build_document(&self) -> Result<Node, PotentialError> {
        Ok(self.build()?.to_document())
    }

    fn assemble_atoms(&self) -> Result<Vec<Atom>, PotentialError> {
        let reference = match (&self.symbols, &self.elements) {
            (Some(symbols), _) => symbols.len(),
            (None, Some(elements)) => elements.len(),
            (None, None) => 0,
        };
        let check = |what: &'static str, len: Option<usize>| match len {
            Some(found) if found != reference => Err(PotentialError::LengthMismatch {
                what,
                expected: reference,
                found,
            }),
            _ => Ok(()),
        };
        check("elements", self.elements.as_ref().map(Vec::len))?;
        check("masses", self.masses.as_ref().map(Vec::len))?;
        check("charges", self.charges.as_ref().map(Vec::len))?;

        (0..reference)
            .map(|i| {
                Atom::resolve(
                    i,
                    self.elements.as_ref().map(|e| e[i].clone()),
                    self.symbols.as_ref().map(|s| s[i].clone()),
                    self.masses.as_ref().map(|m| m[i]),
                    self.charges.as_ref().map(|c| c[i]),
                )
            })
            .collect()
    }
}
