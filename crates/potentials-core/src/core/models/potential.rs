use super::artifact::Artifact;
use super::atom::Atom;
use super::status::Status;
use super::term::{CoeffRule, Term};
use crate::core::document::node::{Branch, Node};
use crate::core::document::traits::DocumentError;
use crate::core::document::{self, Format};
use crate::core::error::PotentialError;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// The document tag holding a LAMMPS implementation record.
pub const MODEL_ROOT: &str = "potential-LAMMPS";

/// A caller's choice of atom-model symbols for a simulated system.
///
/// Either every model symbol in model order ([`SymbolRequest::all`]) or an
/// explicit ordered list. Entries of an explicit list may be null; such a
/// request is rejected when it is normalised.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SymbolRequest(Option<Vec<Option<String>>>);

impl SymbolRequest {
    pub fn all() -> Self {
        Self(None)
    }

    pub fn new(symbols: Vec<Option<String>>) -> Self {
        Self(Some(symbols))
    }

    pub fn is_all(&self) -> bool {
        self.0.is_none()
    }

    /// Number of requested entries, or `None` for an all-symbols request.
    pub fn count(&self) -> Option<usize> {
        self.0.as_ref().map(Vec::len)
    }

    pub(crate) fn entries(self, model: &PotentialModel) -> Vec<Option<String>> {
        match self.0 {
            Some(entries) => entries,
            None => model.atoms.iter().map(|a| Some(a.symbol.clone())).collect(),
        }
    }
}

impl From<&str> for SymbolRequest {
    fn from(symbol: &str) -> Self {
        Self::new(vec![Some(symbol.to_string())])
    }
}

impl From<String> for SymbolRequest {
    fn from(symbol: String) -> Self {
        Self::new(vec![Some(symbol)])
    }
}

impl From<&[&str]> for SymbolRequest {
    fn from(symbols: &[&str]) -> Self {
        Self::new(symbols.iter().map(|s| Some(s.to_string())).collect())
    }
}

impl<const N: usize> From<[&str; N]> for SymbolRequest {
    fn from(symbols: [&str; N]) -> Self {
        Self::from(&symbols[..])
    }
}

impl From<Vec<&str>> for SymbolRequest {
    fn from(symbols: Vec<&str>) -> Self {
        Self::from(symbols.as_slice())
    }
}

impl From<&[String]> for SymbolRequest {
    fn from(symbols: &[String]) -> Self {
        Self::new(symbols.iter().cloned().map(Some).collect())
    }
}

impl From<Vec<String>> for SymbolRequest {
    fn from(symbols: Vec<String>) -> Self {
        Self::new(symbols.into_iter().map(Some).collect())
    }
}

impl From<Vec<Option<String>>> for SymbolRequest {
    fn from(symbols: Vec<Option<String>>) -> Self {
        Self::new(symbols)
    }
}

impl From<Vec<Option<&str>>> for SymbolRequest {
    fn from(symbols: Vec<Option<&str>>) -> Self {
        Self::new(
            symbols
                .into_iter()
                .map(|s| s.map(str::to_string))
                .collect(),
        )
    }
}

/// A flat summary of a model, suitable for tabulation or JSON output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metadata {
    pub id: String,
    pub key: String,
    pub potential_id: Option<String>,
    pub potential_key: Option<String>,
    pub units: String,
    pub atom_style: String,
    pub allsymbols: bool,
    pub pair_style: String,
    pub status: Status,
    pub symbols: Vec<String>,
    pub elements: Vec<String>,
    pub masses: Vec<f64>,
    pub charges: Vec<f64>,
    pub dois: Vec<String>,
    pub artifacts: Vec<Artifact>,
}

/// A validated LAMMPS implementation of an interatomic potential.
///
/// Instances are immutable once constructed, either by [`PotentialModel::parse`]
/// from a record document or by the
/// [`PotentialBuilder`](super::builder::PotentialBuilder). Atom order defines
/// the default LAMMPS atom-type numbering.
#[derive(Debug, Clone, PartialEq)]
pub struct PotentialModel {
    pub(crate) id: String,
    pub(crate) key: String,
    pub(crate) potential_id: Option<String>,
    pub(crate) potential_key: Option<String>,
    pub(crate) potential_dois: Vec<String>,
    pub(crate) comments: String,
    pub(crate) units: String,
    pub(crate) atom_style: String,
    pub(crate) pair_style: String,
    pub(crate) allsymbols: bool,
    pub(crate) status: Status,
    pub(crate) atoms: Vec<Atom>,
    pub(crate) pair_style_terms: Vec<Term>,
    pub(crate) pair_coeff_rules: Vec<CoeffRule>,
    pub(crate) extra_commands: Vec<Vec<Term>>,
    pub(crate) artifacts: Vec<Artifact>,
}

impl PotentialModel {
    /// Extracts and validates a model from a record document.
    ///
    /// The `potential-LAMMPS` branch may be the document root's child or sit
    /// anywhere below it.
    ///
    /// # Arguments
    ///
    /// * `document` - The parsed record document.
    ///
    /// # Errors
    ///
    /// Returns [`PotentialError::Schema`] when a required field is absent,
    /// [`PotentialError::MissingField`] for underspecified atoms, and
    /// [`PotentialError::InvalidValue`] for flags, statuses, numbers or
    /// duplicate symbols that cannot be accepted.
    pub fn parse(document: &Node) -> Result<Self, PotentialError> {
        let pot = document
            .as_branch()
            .and_then(|root| root.find_branch(MODEL_ROOT))
            .ok_or_else(|| PotentialError::Schema(MODEL_ROOT.to_string()))?;
        let path = |field: &str| format!("{MODEL_ROOT}.{field}");

        let (potential_id, potential_key, potential_dois) =
            match pot.get("potential").and_then(Node::as_branch) {
                Some(potential) => (
                    potential.get_text("id"),
                    potential.get_text("key"),
                    potential
                        .as_list("doi")
                        .filter_map(|doi| doi.as_text().map(Cow::into_owned))
                        .collect(),
                ),
                None => (None, None, Vec::new()),
            };

        let pair_style = pot.require_branch("pair_style", &path("pair_style"))?;

        let allsymbols = match pot.get("allsymbols") {
            Some(node) if !node.is_null() => node.as_flag("allsymbols")?,
            _ => false,
        };
        let status = match pot.get_text("status") {
            Some(text) => Status::from_str(&text)?,
            None => Status::default(),
        };

        let atoms = pot
            .as_list("atom")
            .enumerate()
            .map(|(index, node)| match node.as_branch() {
                Some(atom) => Atom::from_branch(index, atom),
                None => Err(PotentialError::Schema(path("atom"))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        check_unique_symbols(&atoms)?;

        let pair_coeff_rules = pot
            .as_list("pair_coeff")
            .map(|node| match node.as_branch() {
                Some(rule) => CoeffRule::from_branch(rule),
                None => Err(PotentialError::Schema(path("pair_coeff"))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let extra_commands = pot
            .as_list("command")
            .map(|node| match node.as_branch() {
                Some(command) => Term::parse_list(command, "term"),
                None => Err(PotentialError::Schema(path("command"))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let artifacts = pot
            .as_list("artifact")
            .filter_map(Node::as_branch)
            .map(Artifact::from_branch)
            .collect();

        Ok(Self {
            id: pot.require_text("id", &path("id"))?,
            key: pot.require_text("key", &path("key"))?,
            potential_id,
            potential_key,
            potential_dois,
            comments: pot.get_text("comments").unwrap_or_default(),
            units: pot.require_text("units", &path("units"))?,
            atom_style: pot.require_text("atom_style", &path("atom_style"))?,
            pair_style: pair_style.require_text("type", &path("pair_style.type"))?,
            allsymbols,
            status,
            atoms,
            pair_style_terms: Term::parse_list(pair_style, "term")?,
            pair_coeff_rules,
            extra_commands,
            artifacts,
        })
    }

    /// Parses a model from serialised document text.
    pub fn parse_str(content: &str, format: Format) -> Result<Self, DocumentError> {
        let document = format.read_from_str(content)?;
        Ok(Self::parse(&document)?)
    }

    /// Loads a model from a `.json` or `.xml` record file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let document = document::read_path(path)?;
        Ok(Self::parse(&document)?)
    }

    /// Renders the model back into a record document.
    ///
    /// Parsing the result yields a model equal to `self`.
    pub fn to_document(&self) -> Node {
        let mut pot = Branch::new();
        pot.insert("key", self.key.as_str())
            .insert("id", self.id.as_str());

        if self.potential_id.is_some() || self.potential_key.is_some() || !self.potential_dois.is_empty() {
            let mut potential = Branch::new();
            if let Some(key) = &self.potential_key {
                potential.insert("key", key.as_str());
            }
            if let Some(id) = &self.potential_id {
                potential.insert("id", id.as_str());
            }
            for doi in &self.potential_dois {
                potential.append("doi", doi.as_str());
            }
            pot.insert("potential", potential);
        }
        if !self.comments.is_empty() {
            pot.insert("comments", self.comments.as_str());
        }
        for artifact in &self.artifacts {
            pot.append("artifact", artifact.to_branch());
        }

        pot.insert("units", self.units.as_str())
            .insert("atom_style", self.atom_style.as_str())
            .insert("allsymbols", self.allsymbols)
            .insert("status", self.status.as_str());
        for atom in &self.atoms {
            pot.append("atom", atom.to_branch());
        }

        let mut pair_style = Branch::new();
        pair_style.insert("type", self.pair_style.as_str());
        for term in &self.pair_style_terms {
            pair_style.append("term", term.to_branch());
        }
        pot.insert("pair_style", pair_style);

        for rule in &self.pair_coeff_rules {
            pot.append("pair_coeff", rule.to_branch());
        }
        for command in &self.extra_commands {
            let mut line = Branch::new();
            for term in command {
                line.append("term", term.to_branch());
            }
            pot.append("command", line);
        }

        let mut root = Branch::new();
        root.insert(MODEL_ROOT, pot);
        Node::Branch(root)
    }

    /// Turns a symbol request into the ordered symbol list used for a system.
    ///
    /// When the model requires all of its symbols, the missing ones are
    /// appended in model order after the requested ones. The model itself is
    /// never modified.
    ///
    /// # Errors
    ///
    /// Returns [`PotentialError::IncompleteInput`] if any entry is null.
    pub fn normalize_symbols(
        &self,
        requested: impl Into<SymbolRequest>,
    ) -> Result<Vec<String>, PotentialError> {
        let mut symbols = requested
            .into()
            .entries(self)
            .into_iter()
            .enumerate()
            .map(|(index, entry)| entry.ok_or(PotentialError::IncompleteInput(index)))
            .collect::<Result<Vec<_>, _>>()?;

        if self.allsymbols {
            for atom in &self.atoms {
                if !symbols.contains(&atom.symbol) {
                    symbols.push(atom.symbol.clone());
                }
            }
        }
        Ok(symbols)
    }

    /// Masses of the given symbols, in request order after normalisation.
    pub fn masses(&self, symbols: impl Into<SymbolRequest>) -> Result<Vec<f64>, PotentialError> {
        self.lookup(symbols.into(), |atom| atom.mass)
    }

    pub fn elements(&self, symbols: impl Into<SymbolRequest>) -> Result<Vec<String>, PotentialError> {
        self.lookup(symbols.into(), |atom| atom.element.clone())
    }

    pub fn charges(&self, symbols: impl Into<SymbolRequest>) -> Result<Vec<f64>, PotentialError> {
        self.lookup(symbols.into(), |atom| atom.charge)
    }

    fn lookup<T>(&self, request: SymbolRequest, field: impl Fn(&Atom) -> T) -> Result<Vec<T>, PotentialError> {
        if request.is_all() {
            return Ok(self.atoms.iter().map(field).collect());
        }
        self.normalize_symbols(request)?
            .iter()
            .map(|symbol| self.atom(symbol).map(&field))
            .collect()
    }

    /// Returns the first atom carrying `symbol`.
    pub fn atom(&self, symbol: &str) -> Result<&Atom, PotentialError> {
        self.atoms
            .iter()
            .find(|atom| atom.symbol == symbol)
            .ok_or_else(|| PotentialError::UnknownSymbol(symbol.to_string()))
    }

    /// Atom-model symbols in model order.
    pub fn symbols(&self) -> Vec<&str> {
        self.atoms.iter().map(|atom| atom.symbol.as_str()).collect()
    }

    pub fn metadata(&self) -> Metadata {
        Metadata {
            id: self.id.clone(),
            key: self.key.clone(),
            potential_id: self.potential_id.clone(),
            potential_key: self.potential_key.clone(),
            units: self.units.clone(),
            atom_style: self.atom_style.clone(),
            allsymbols: self.allsymbols,
            pair_style: self.pair_style.clone(),
            status: self.status,
            symbols: self.atoms.iter().map(|a| a.symbol.clone()).collect(),
            elements: self.atoms.iter().map(|a| a.element.clone()).collect(),
            masses: self.atoms.iter().map(|a| a.mass).collect(),
            charges: self.atoms.iter().map(|a| a.charge).collect(),
            dois: self.potential_dois.clone(),
            artifacts: self.artifacts.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn potential_id(&self) -> Option<&str> {
        self.potential_id.as_deref()
    }

    pub fn potential_key(&self) -> Option<&str> {
        self.potential_key.as_deref()
    }

    pub fn potential_dois(&self) -> &[String] {
        &self.potential_dois
    }

    pub fn comments(&self) -> &str {
        &self.comments
    }

    pub fn units(&self) -> &str {
        &self.units
    }

    pub fn atom_style(&self) -> &str {
        &self.atom_style
    }

    pub fn pair_style(&self) -> &str {
        &self.pair_style
    }

    pub fn allsymbols(&self) -> bool {
        self.allsymbols
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn pair_style_terms(&self) -> &[Term] {
        &self.pair_style_terms
    }

    pub fn pair_coeff_rules(&self) -> &[CoeffRule] {
        &self.pair_coeff_rules
    }

    pub fn extra_commands(&self) -> &[Vec<Term>] {
        &self.extra_commands
    }

    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }
}

impl fmt::Display for PotentialModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

pub(crate) fn check_unique_symbols(atoms: &[Atom]) -> Result<(), PotentialError> {
    let mut seen = HashSet::new();
    for atom in atoms {
        if !seen.insert(atom.symbol.as_str()) {
            return Err(PotentialError::InvalidValue {
                field: "atom.symbol".to_string(),
                value: format!("{} (duplicate)", atom.symbol),
            });
        }
    }
    Ok(())
}
