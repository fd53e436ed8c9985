use crate::core::document::node::{Branch, Node};
use crate::core::error::PotentialError;
use crate::core::utils::number::Numeric;
use serde::Serialize;
use std::borrow::Cow;

/// A single token of a pair_style, pair_coeff or extra command line.
///
/// Terms are rendered in order, each preceded by a space. `Symbols` and
/// `SymbolsList` expand to atom-model symbols depending on the system being
/// simulated; a `false` flag renders nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Term {
    /// A literal keyword.
    Option(String),
    /// A numeric parameter, rendered as an integer or a float as written.
    Parameter(Numeric),
    /// A parameter file, relative to the artifact directory.
    File(String),
    /// System symbols in system order, `NULL` where the rule does not apply.
    Symbols(bool),
    /// Rule symbols that are present in the system, in rule order.
    SymbolsList(bool),
}

impl Term {
    /// The document tag of the term.
    pub fn tag(&self) -> &'static str {
        match self {
            Term::Option(_) => "option",
            Term::Parameter(_) => "parameter",
            Term::File(_) => "file",
            Term::Symbols(_) => "symbols",
            Term::SymbolsList(_) => "symbolsList",
        }
    }

    fn from_entry(tag: &str, node: &Node) -> Result<Self, PotentialError> {
        let text = |field: &str| -> Result<String, PotentialError> {
            node.as_text()
                .map(Cow::into_owned)
                .ok_or_else(|| PotentialError::invalid_value(field, "<non-scalar>"))
        };
        match tag {
            "option" => Ok(Term::Option(text("term.option")?)),
            "parameter" => node.as_numeric().map(Term::Parameter).ok_or_else(|| {
                PotentialError::invalid_value(
                    "term.parameter",
                    node.as_text().unwrap_or(Cow::Borrowed("<non-scalar>")),
                )
            }),
            "file" => Ok(Term::File(text("term.file")?)),
            "symbols" => Ok(Term::Symbols(node.as_flag("term.symbols")?)),
            "symbolsList" => Ok(Term::SymbolsList(node.as_flag("term.symbolsList")?)),
            other => Err(PotentialError::invalid_value("term", other)),
        }
    }

    /// Reads every term listed under `key` in a branch.
    ///
    /// A term entry normally holds one tagged value; entries holding several
    /// contribute them in document order.
    pub(crate) fn parse_list(parent: &Branch, key: &str) -> Result<Vec<Self>, PotentialError> {
        let mut terms = Vec::new();
        for entry in parent.as_list(key) {
            let Some(branch) = entry.as_branch() else {
                return Err(PotentialError::Schema(key.to_string()));
            };
            for (tag, node) in branch.iter() {
                terms.push(Self::from_entry(tag, node)?);
            }
        }
        Ok(terms)
    }

    pub(crate) fn to_branch(&self) -> Branch {
        let node = match self {
            Term::Option(value) | Term::File(value) => Node::from(value.as_str()),
            Term::Parameter(value) => Node::Number(*value),
            Term::Symbols(flag) | Term::SymbolsList(flag) => Node::Bool(*flag),
        };
        let mut branch = Branch::new();
        branch.insert(self.tag(), node);
        branch
    }
}

impl From<f64> for Term {
    fn from(value: f64) -> Self {
        Term::Parameter(Numeric::Float(value))
    }
}

impl From<i64> for Term {
    fn from(value: i64) -> Self {
        Term::Parameter(Numeric::Integer(value))
    }
}

impl From<Numeric> for Term {
    fn from(value: Numeric) -> Self {
        Term::Parameter(value)
    }
}

impl From<&str> for Term {
    fn from(value: &str) -> Self {
        Term::Option(value.to_string())
    }
}

impl From<String> for Term {
    fn from(value: String) -> Self {
        Term::Option(value)
    }
}

/// A declarative pair_coeff line.
///
/// The interaction selects which atom-model symbols the line applies to:
/// empty (or `* *`) for every type, a symbol group for many-body styles, or a
/// single unordered pair.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CoeffRule {
    pub interaction: Vec<String>,
    pub terms: Vec<Term>,
    /// Set when the rule carries a `symbols` group marker of its own.
    pub symbols_group: bool,
}

impl CoeffRule {
    /// A rule applying to all atom types.
    pub fn wildcard(terms: Vec<Term>) -> Self {
        Self {
            interaction: Vec::new(),
            terms,
            symbols_group: false,
        }
    }

    /// A rule applying to one unordered symbol pair.
    pub fn pair(first: &str, second: &str, terms: Vec<Term>) -> Self {
        Self {
            interaction: vec![first.to_string(), second.to_string()],
            terms,
            symbols_group: false,
        }
    }

    /// A many-body rule over a named symbol group.
    pub fn group(symbols: &[&str], terms: Vec<Term>) -> Self {
        Self {
            interaction: symbols.iter().map(|s| s.to_string()).collect(),
            terms,
            symbols_group: true,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        self.interaction.is_empty() || self.interaction == ["*", "*"]
    }

    pub fn is_many_body(&self) -> bool {
        self.symbols_group || self.terms.iter().any(|t| matches!(t, Term::Symbols(_)))
    }

    pub(crate) fn from_branch(branch: &Branch) -> Result<Self, PotentialError> {
        let interaction = match branch.get("interaction").and_then(Node::as_branch) {
            Some(interaction) => interaction
                .as_list("symbol")
                .map(|node| {
                    node.as_text()
                        .map(Cow::into_owned)
                        .ok_or_else(|| PotentialError::Schema("pair_coeff.interaction.symbol".into()))
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        Ok(Self {
            interaction,
            terms: Term::parse_list(branch, "term")?,
            symbols_group: branch.contains_key("symbols"),
        })
    }

    pub(crate) fn to_branch(&self) -> Branch {
        let mut branch = Branch::new();
        if !self.interaction.is_empty() {
            let mut interaction = Branch::new();
            for symbol in &self.interaction {
                interaction.append("symbol", symbol.as_str());
            }
            branch.insert("interaction", interaction);
        }
        if self.symbols_group {
            branch.insert("symbols", true);
        }
        for term in &self.terms {
            branch.append("term", term.to_branch());
        }
        branch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document::json::JsonFormat;
    use crate::core::document::traits::DocumentFormat;

    fn rule_from_json(text: &str) -> Result<CoeffRule, PotentialError> {
        let node = JsonFormat::read_from_str(text).unwrap();
        CoeffRule::from_branch(node.as_branch().unwrap())
    }

    #[test]
    fn wildcard_detection_covers_absent_and_star_interactions() {
        assert!(CoeffRule::wildcard(vec![]).is_wildcard());
        assert!(CoeffRule::pair("*", "*", vec![]).is_wildcard());
        assert!(!CoeffRule::pair("Fe", "Ni", vec![]).is_wildcard());
    }

    #[test]
    fn many_body_detection_uses_symbols_terms_and_group_marker() {
        assert!(CoeffRule::pair("Fe", "Ni", vec![Term::Symbols(false)]).is_many_body());
        assert!(CoeffRule::group(&["Si", "C", "O"], vec![]).is_many_body());
        assert!(!CoeffRule::pair("Fe", "Ni", vec![Term::SymbolsList(true)]).is_many_body());
    }

    #[test]
    fn from_branch_reads_interaction_terms_and_flags() {
        let rule = rule_from_json(
            r#"{"interaction": {"symbol": ["Fe", "Ni"]},
                "term": [{"parameter": 0.5}, {"option": "cut"}, {"parameter": "2.5"},
                         {"file": "FeNi.tersoff"}, {"symbolsList": "True"}]}"#,
        )
        .unwrap();
        assert_eq!(rule.interaction, vec!["Fe", "Ni"]);
        assert_eq!(
            rule.terms,
            vec![
                Term::from(0.5),
                Term::Option("cut".into()),
                Term::from(2.5),
                Term::File("FeNi.tersoff".into()),
                Term::SymbolsList(true),
            ]
        );
        assert!(!rule.symbols_group);
    }

    #[test]
    fn integer_parameters_stay_integers_from_json_and_text() {
        let rule = rule_from_json(r#"{"term": [{"parameter": 10000}, {"parameter": "8"}, {"parameter": 1.0}]}"#)
            .unwrap();
        assert_eq!(
            rule.terms,
            vec![
                Term::Parameter(Numeric::Integer(10000)),
                Term::Parameter(Numeric::Integer(8)),
                Term::Parameter(Numeric::Float(1.0)),
            ]
        );
    }

    #[test]
    fn from_branch_treats_interaction_without_symbols_as_wildcard() {
        let rule = rule_from_json(r#"{"interaction": {}, "term": {"option": "x"}}"#).unwrap();
        assert!(rule.is_wildcard());
        assert_eq!(rule.terms, vec![Term::Option("x".into())]);
    }

    #[test]
    fn from_branch_detects_symbols_group_marker() {
        let rule = rule_from_json(
            r#"{"interaction": {"symbol": ["Si", "C", "O"]}, "symbols": "True", "term": []}"#,
        )
        .unwrap();
        assert!(rule.symbols_group);
        assert!(rule.is_many_body());
    }

    #[test]
    fn from_branch_rejects_unknown_term_tags_and_bad_flags() {
        assert!(matches!(
            rule_from_json(r#"{"term": {"colour": "red"}}"#),
            Err(PotentialError::InvalidValue { field, .. }) if field == "term"
        ));
        assert!(matches!(
            rule_from_json(r#"{"term": {"symbols": "maybe"}}"#),
            Err(PotentialError::InvalidValue { field, .. }) if field == "term.symbols"
        ));
    }

    #[test]
    fn to_branch_then_from_branch_restores_rule() {
        let rule = CoeffRule::group(
            &["Si", "C"],
            vec![
                Term::File("SiC.tersoff".into()),
                Term::Symbols(true),
                Term::from(3.0),
                Term::from(12_i64),
            ],
        );
        assert_eq!(CoeffRule::from_branch(&rule.to_branch()).unwrap(), rule);
    }

    #[test]
    fn plain_values_convert_to_parameters_and_options() {
        assert_eq!(Term::from(1.5), Term::Parameter(Numeric::Float(1.5)));
        assert_eq!(Term::from(8_i64), Term::Parameter(Numeric::Integer(8)));
        assert_eq!(Term::from("shift"), Term::Option("shift".into()));
    }
}
