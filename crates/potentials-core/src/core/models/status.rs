use crate::core::error::PotentialError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Publication status of a LAMMPS implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Active,
    /// Replaced by a newer implementation of the same potential.
    Superseded,
    /// Withdrawn; kept only for reproducibility.
    Retracted,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Superseded => "superseded",
            Status::Retracted => "retracted",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = PotentialError;

    /// Parses a status name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Status::Active),
            "superseded" => Ok(Status::Superseded),
            "retracted" => Ok(Status::Retracted),
            _ => Err(PotentialError::invalid_value("status", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_parses_known_statuses_case_insensitively() {
        assert_eq!(Status::from_str("active"), Ok(Status::Active));
        assert_eq!(Status::from_str("Superseded"), Ok(Status::Superseded));
        assert_eq!(Status::from_str(" RETRACTED "), Ok(Status::Retracted));
    }

    #[test]
    fn from_str_rejects_unknown_status() {
        assert!(matches!(
            Status::from_str("draft"),
            Err(PotentialError::InvalidValue { field, value }) if field == "status" && value == "draft"
        ));
    }

    #[test]
    fn display_matches_document_spelling() {
        assert_eq!(Status::default().to_string(), "active");
        assert_eq!(Status::Retracted.to_string(), "retracted");
    }
}
