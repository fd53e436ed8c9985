use crate::core::document::node::Branch;
use crate::core::error::PotentialError;
use crate::core::utils::periodic::atomic_mass;
use serde::Serialize;

/// One atom-model particle type of a potential.
///
/// The symbol is the label LAMMPS sees and is unique within a potential; the
/// element ties it to a chemical species. Several symbols may share an element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Atom {
    /// Chemical element (e.g. "Fe"), or the symbol itself for pseudo-species.
    pub element: String,
    /// Atom-model symbol used in pair_coeff rules.
    pub symbol: String,
    /// Particle mass in atomic mass units.
    pub mass: f64,
    /// Fixed charge, zero when the record lists none.
    pub charge: f64,
}

impl Atom {
    pub fn new(element: &str, symbol: &str, mass: f64) -> Self {
        Self {
            element: element.to_string(),
            symbol: symbol.to_string(),
            mass,
            charge: 0.0,
        }
    }

    /// Completes a partially specified atom entry.
    ///
    /// An entry needs either an element, or a symbol together with a mass.
    /// Missing symbols default to the element, missing elements to the symbol,
    /// and missing masses to the element's standard atomic weight.
    ///
    /// # Arguments
    ///
    /// * `index` - Position of the entry, reported in errors.
    ///
    /// # Errors
    ///
    /// Returns [`PotentialError::MissingField`] if the entry cannot be completed.
    pub fn resolve(
        index: usize,
        element: Option<String>,
        symbol: Option<String>,
        mass: Option<f64>,
        charge: Option<f64>,
    ) -> Result<Self, PotentialError> {
        let element = match element {
            Some(element) => element,
            None => {
                if mass.is_none() {
                    return Err(PotentialError::MissingField {
                        index,
                        reason: "mass is required when element is not listed".to_string(),
                    });
                }
                match &symbol {
                    Some(symbol) => symbol.clone(),
                    None => {
                        return Err(PotentialError::MissingField {
                            index,
                            reason: "symbol is required when element is not listed".to_string(),
                        });
                    }
                }
            }
        };
        let symbol = symbol.unwrap_or_else(|| element.clone());
        let mass = match mass {
            Some(mass) => mass,
            None => atomic_mass(&element).ok_or_else(|| PotentialError::MissingField {
                index,
                reason: format!("no standard mass is tabulated for element '{element}'"),
            })?,
        };

        Ok(Self {
            element,
            symbol,
            mass,
            charge: charge.unwrap_or(0.0),
        })
    }

    pub(crate) fn from_branch(index: usize, branch: &Branch) -> Result<Self, PotentialError> {
        Self::resolve(
            index,
            branch.get_text("element"),
            branch.get_text("symbol"),
            branch.get_number("mass", "atom.mass")?,
            branch.get_number("charge", "atom.charge")?,
        )
    }

    pub(crate) fn to_branch(&self) -> Branch {
        let mut branch = Branch::new();
        branch
            .insert("element", self.element.as_str())
            .insert("symbol", self.symbol.as_str())
            .insert("mass", self.mass);
        if self.charge != 0.0 {
            branch.insert("charge", self.charge);
        }
        branch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_fills_symbol_and_mass_from_element() {
        let atom = Atom::resolve(0, Some("Fe".into()), None, None, None).unwrap();
        assert_eq!(atom.symbol, "Fe");
        assert_eq!(atom.mass, 55.845);
        assert_eq!(atom.charge, 0.0);
    }

    #[test]
    fn resolve_uses_symbol_as_element_when_mass_is_given() {
        let atom = Atom::resolve(1, None, Some("Xx".into()), Some(12.5), Some(-1.0)).unwrap();
        assert_eq!(atom.element, "Xx");
        assert_eq!(atom.mass, 12.5);
        assert_eq!(atom.charge, -1.0);
    }

    #[test]
    fn resolve_fails_without_element_and_mass() {
        let result = Atom::resolve(3, None, Some("Fe".into()), None, None);
        assert!(matches!(result, Err(PotentialError::MissingField { index: 3, .. })));
    }

    #[test]
    fn resolve_fails_without_element_and_symbol() {
        let result = Atom::resolve(0, None, None, Some(1.0), None);
        assert!(matches!(
            result,
            Err(PotentialError::MissingField { reason, .. }) if reason.contains("symbol")
        ));
    }

    #[test]
    fn resolve_fails_for_untabulated_element_without_mass() {
        let result = Atom::resolve(0, Some("Qq".into()), Some("Q".into()), None, None);
        assert!(matches!(result, Err(PotentialError::MissingField { .. })));
    }

    #[test]
    fn from_branch_rejects_non_numeric_mass() {
        let mut branch = Branch::new();
        branch.insert("element", "Cu").insert("mass", "heavy");
        assert!(matches!(
            Atom::from_branch(0, &branch),
            Err(PotentialError::InvalidValue { field, .. }) if field == "atom.mass"
        ));
    }

    #[test]
    fn to_branch_then_from_branch_restores_atom() {
        let mut atom = Atom::new("O", "O2-", 15.999);
        atom.charge = -2.0;
        let restored = Atom::from_branch(0, &atom.to_branch()).unwrap();
        assert_eq!(restored, atom);
    }
}
