use super::node::{Branch, Node};
use super::traits::{DocumentError, DocumentFormat};
use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::{BufRead, Write};

/// XML serialisation of record documents.
///
/// Elements with child elements become branches, repeated sibling tags become
/// lists, leaf text becomes a text scalar and empty elements become null.
/// Attributes carry no record data and are ignored.
pub struct XmlFormat;

struct Frame {
    name: String,
    branch: Branch,
    text: String,
    has_children: bool,
}

impl Frame {
    fn new(name: String) -> Self {
        Self {
            name,
            branch: Branch::new(),
            text: String::new(),
            has_children: false,
        }
    }

    fn into_node(self) -> (String, Node) {
        let node = if self.has_children {
            Node::Branch(self.branch)
        } else if self.text.is_empty() {
            Node::Null
        } else {
            Node::Text(self.text)
        };
        (self.name, node)
    }

    fn adopt(&mut self, name: String, node: Node) {
        self.branch.append(name, node);
        self.has_children = true;
    }
}

impl DocumentFormat for XmlFormat {
    fn read_from(reader: &mut impl BufRead) -> Result<Node, DocumentError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;

        let mut xml = Reader::from_str(&content);
        xml.trim_text(true);

        let mut stack = vec![Frame::new(String::new())];
        loop {
            match xml.read_event()? {
                Event::Start(e) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    stack.push(Frame::new(name));
                }
                Event::Empty(e) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    if let Some(parent) = stack.last_mut() {
                        parent.adopt(name, Node::Null);
                    }
                }
                Event::Text(e) => {
                    let text = e.unescape()?;
                    if let Some(frame) = stack.last_mut() {
                        frame.text.push_str(&text);
                    }
                }
                Event::CData(e) => {
                    let raw = e.into_inner();
                    if let Some(frame) = stack.last_mut() {
                        frame.text.push_str(&String::from_utf8_lossy(&raw));
                    }
                }
                Event::End(_) => {
                    if stack.len() < 2 {
                        return Err(DocumentError::Malformed(
                            "unexpected closing tag".to_string(),
                        ));
                    }
                    if let Some(frame) = stack.pop() {
                        let (name, node) = frame.into_node();
                        if let Some(parent) = stack.last_mut() {
                            parent.adopt(name, node);
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        match stack.pop() {
            Some(root) if stack.is_empty() => Ok(Node::Branch(root.branch)),
            _ => Err(DocumentError::Malformed(
                "unexpected end of XML document".to_string(),
            )),
        }
    }

    fn write_to(document: &Node, writer: &mut impl Write) -> Result<(), DocumentError> {
        let root = match document {
            Node::Branch(root) if root.len() == 1 => root,
            _ => {
                return Err(DocumentError::Malformed(
                    "XML documents need exactly one root element".to_string(),
                ));
            }
        };

        let mut xml = Writer::new_with_indent(&mut *writer, b' ', 2);
        xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        for (tag, node) in root.iter() {
            write_element(&mut xml, tag, node)?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

fn write_element<W: Write>(xml: &mut Writer<W>, tag: &str, node: &Node) -> Result<(), DocumentError> {
    match node {
        Node::List(items) => {
            for item in items {
                write_element(xml, tag, item)?;
            }
        }
        Node::Null => {
            xml.write_event(Event::Empty(BytesStart::new(tag)))?;
        }
        Node::Branch(branch) => {
            xml.write_event(Event::Start(BytesStart::new(tag)))?;
            for (child_tag, child) in branch.iter() {
                write_element(xml, child_tag, child)?;
            }
            xml.write_event(Event::End(BytesEnd::new(tag)))?;
        }
        scalar => {
            let text = scalar.as_text().unwrap_or_default();
            xml.write_event(Event::Start(BytesStart::new(tag)))?;
            xml.write_event(Event::Text(BytesText::new(&text)))?;
            xml.write_event(Event::End(BytesEnd::new(tag)))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    const RECORD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<potential-LAMMPS>
  <key>a1b2</key>
  <id>2009--Example--Fe-Ni</id>
  <atom><element>Fe</element></atom>
  <atom><element>Ni</element><mass>58.7</mass></atom>
  <pair_style><type>eam/alloy</type></pair_style>
  <pair_coeff>
    <term><file>FeNi.eam.alloy</file></term>
    <term><symbols>true</symbols></term>
  </pair_coeff>
  <comments><![CDATA[Fe & Ni]]></comments>
  <allsymbols/>
</potential-LAMMPS>
"#;

    fn potential(node: &Node) -> &Branch {
        node.as_branch()
            .and_then(|b| b.find_branch("potential-LAMMPS"))
            .unwrap()
    }

    #[test]
    fn read_from_str_builds_branches_lists_and_scalars() {
        let node = XmlFormat::read_from_str(RECORD).unwrap();
        let pot = potential(&node);

        assert_eq!(pot.get_text("id").as_deref(), Some("2009--Example--Fe-Ni"));
        assert_eq!(pot.as_list("atom").count(), 2);
        let ni = pot.as_list("atom").nth(1).and_then(Node::as_branch).unwrap();
        assert_eq!(ni.get("mass").and_then(Node::as_f64), Some(58.7));
        assert_eq!(
            pot.require_branch("pair_style", "pair_style")
                .unwrap()
                .get_text("type")
                .as_deref(),
            Some("eam/alloy")
        );
    }

    #[test]
    fn empty_elements_and_cdata_are_read() {
        let node = XmlFormat::read_from_str(RECORD).unwrap();
        let pot = potential(&node);
        assert_eq!(pot.get("allsymbols"), Some(&Node::Null));
        assert_eq!(
            pot.get("comments").and_then(Node::as_text),
            Some(Cow::Borrowed("Fe & Ni"))
        );
    }

    #[test]
    fn mismatched_tags_fail() {
        let result = XmlFormat::read_from_str("<a><b></a>");
        assert!(result.is_err());
    }

    #[test]
    fn truncated_document_fails() {
        let result = XmlFormat::read_from_str("<a><b>text</b>");
        assert!(matches!(result, Err(DocumentError::Malformed(_))));
    }

    #[test]
    fn write_then_read_restores_text_content() {
        let node = XmlFormat::read_from_str(RECORD).unwrap();
        let rendered = XmlFormat::write_to_string(&node).unwrap();
        assert!(rendered.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(rendered.contains("Fe &amp; Ni"));

        let restored = XmlFormat::read_from_str(&rendered).unwrap();
        assert_eq!(restored, node);
    }

    #[test]
    fn write_to_rejects_documents_without_single_root() {
        let mut root = Branch::new();
        root.insert("a", "1").insert("b", "2");
        let result = XmlFormat::write_to_string(&Node::Branch(root));
        assert!(matches!(result, Err(DocumentError::Malformed(_))));
    }
}
