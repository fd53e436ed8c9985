use super::node::Node;
use super::traits::{DocumentError, DocumentFormat};
use std::io::{BufRead, Write};

pub struct JsonFormat;

impl DocumentFormat for JsonFormat {
    fn read_from(reader: &mut impl BufRead) -> Result<Node, DocumentError> {
        Ok(serde_json::from_reader(reader)?)
    }

    fn write_to(document: &Node, writer: &mut impl Write) -> Result<(), DocumentError> {
        serde_json::to_writer_pretty(&mut *writer, document)?;
        writeln!(writer)?;
        Ok(())
    }
}
