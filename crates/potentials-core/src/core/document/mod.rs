//! # Document Module
//!
//! Hierarchical record documents and their serialisations.
//!
//! Potential records arrive as JSON or XML. Both are read into the same
//! [`node::Node`] tree, which offers the typed accessors the model parser
//! relies on (`get`, `require`, `as_list`, `finds`).
//!
//! - [`node`] - The tagged tree and its accessors
//! - [`traits`] - The [`traits::DocumentFormat`] interface and [`traits::DocumentError`]
//! - [`json`] - JSON serialisation
//! - [`xml`] - XML serialisation

pub mod json;
pub mod node;
pub mod traits;
pub mod xml;

use json::JsonFormat;
use node::Node;
use std::io::{BufRead, Write};
use std::path::Path;
use traits::{DocumentError, DocumentFormat};
use xml::XmlFormat;

/// The serialisations a record document can be stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Json,
    Xml,
}

impl Format {
    /// Selects the format from a file extension (`.json` or `.xml`, any case).
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(Format::Json),
            Some("xml") => Ok(Format::Xml),
            _ => Err(DocumentError::UnsupportedFormat(
                path.display().to_string(),
            )),
        }
    }

    pub fn read_from(self, reader: &mut impl BufRead) -> Result<Node, DocumentError> {
        match self {
            Format::Json => JsonFormat::read_from(reader),
            Format::Xml => XmlFormat::read_from(reader),
        }
    }

    pub fn write_to(self, document: &Node, writer: &mut impl Write) -> Result<(), DocumentError> {
        match self {
            Format::Json => JsonFormat::write_to(document, writer),
            Format::Xml => XmlFormat::write_to(document, writer),
        }
    }

    pub fn read_from_str(self, content: &str) -> Result<Node, DocumentError> {
        match self {
            Format::Json => JsonFormat::read_from_str(content),
            Format::Xml => XmlFormat::read_from_str(content),
        }
    }

    pub fn write_to_string(self, document: &Node) -> Result<String, DocumentError> {
        match self {
            Format::Json => JsonFormat::write_to_string(document),
            Format::Xml => XmlFormat::write_to_string(document),
        }
    }
}

/// Reads a document, choosing the format from the file extension.
pub fn read_path(path: impl AsRef<Path>) -> Result<Node, DocumentError> {
    let path = path.as_ref();
    match Format::from_path(path)? {
        Format::Json => JsonFormat::read_from_path(path),
        Format::Xml => XmlFormat::read_from_path(path),
    }
}

/// Writes a document, choosing the format from the file extension.
pub fn write_path(document: &Node, path: impl AsRef<Path>) -> Result<(), DocumentError> {
    let path = path.as_ref();
    match Format::from_path(path)? {
        Format::Json => JsonFormat::write_to_path(document, path),
        Format::Xml => XmlFormat::write_to_path(document, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use node::Branch;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn from_path_selects_format_by_extension() {
        assert_eq!(Format::from_path(Path::new("a/b.json")).unwrap(), Format::Json);
        assert_eq!(Format::from_path(Path::new("record.XML")).unwrap(), Format::Xml);
        assert!(matches!(
            Format::from_path(&PathBuf::from("record.bib")),
            Err(DocumentError::UnsupportedFormat(_))
        ));
        assert!(Format::from_path(Path::new("noextension")).is_err());
    }

    #[test]
    fn write_path_and_read_path_agree_across_formats() {
        let dir = tempdir().unwrap();
        let mut inner = Branch::new();
        inner.insert("id", "pot").insert("units", "metal");
        let mut root = Branch::new();
        root.insert("potential-LAMMPS", inner);
        let document = Node::Branch(root);

        for name in ["record.json", "record.xml"] {
            let path = dir.path().join(name);
            write_path(&document, &path).unwrap();
            assert_eq!(read_path(&path).unwrap(), document);
        }
    }
}
