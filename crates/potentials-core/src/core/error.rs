use thiserror::Error;

/// Errors raised while validating potential records and generating LAMMPS commands.
///
/// Every variant is a terminal failure of a pure computation: nothing here is
/// transient, so callers never need to retry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PotentialError {
    /// A required field of the document is absent.
    #[error("Malformed document: missing required field '{0}'")]
    Schema(String),

    /// An atom entry does not carry enough information to derive its identity.
    #[error("Atom entry {index} is underspecified: {reason}")]
    MissingField { index: usize, reason: String },

    /// A field is present but its value cannot be interpreted.
    #[error("Invalid value '{value}' for field '{field}'")]
    InvalidValue { field: String, value: String },

    /// A caller-supplied symbol list contains a null entry.
    #[error("Symbols list incomplete: found null value at position {0}")]
    IncompleteInput(usize),

    /// Two positionally aligned sequences disagree in length.
    #[error("Length mismatch for {what}: expected {expected}, found {found}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// A pair_coeff rule cannot be rendered for the model's pair style.
    #[error("Invalid pair_coeff rule: {0}")]
    InvalidRule(String),

    /// The builder lacks a field required to assemble a model.
    #[error("Incomplete model: {0}")]
    IncompleteModel(String),

    /// A requested symbol is not one of the model's atom-model symbols.
    #[error("Unknown atom-model symbol '{0}'")]
    UnknownSymbol(String),
}

impl PotentialError {
    pub(crate) fn invalid_value(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
        }
    }
}
