use super::node::Node;
use crate::core::error::PotentialError;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("Malformed document: {0}")]
    Malformed(String),
    #[error("Unsupported document format for '{0}': expected a .json or .xml file")]
    UnsupportedFormat(String),
    #[error(transparent)]
    Potential(#[from] PotentialError),
}

/// Defines the interface for reading and writing record document serialisations.
///
/// Implementors translate between a concrete text format and the [`Node`]
/// tree; validation of the tree's content happens elsewhere.
pub trait DocumentFormat {
    /// Reads a document tree from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not well-formed for the format or
    /// the reader fails.
    fn read_from(reader: &mut impl BufRead) -> Result<Node, DocumentError>;

    /// Writes a document tree to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree cannot be represented in the format or
    /// writing fails.
    fn write_to(document: &Node, writer: &mut impl Write) -> Result<(), DocumentError>;

    /// Reads a document tree from a file path.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Node, DocumentError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes a document tree to a file path, creating or truncating the file.
    fn write_to_path<P: AsRef<Path>>(document: &Node, path: P) -> Result<(), DocumentError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(document, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Reads a document tree from an in-memory string.
    fn read_from_str(content: &str) -> Result<Node, DocumentError> {
        let mut reader = content.as_bytes();
        Self::read_from(&mut reader)
    }

    /// Renders a document tree to a string.
    fn write_to_string(document: &Node) -> Result<String, DocumentError> {
        let mut buffer = Vec::new();
        Self::write_to(document, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| DocumentError::Malformed(e.to_string()))
    }
}
