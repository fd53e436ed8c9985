use crate::core::error::PotentialError;
use crate::core::utils::number::Numeric;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::borrow::Cow;
use std::fmt;

/// A value in a hierarchical record document.
///
/// Both serialisations (JSON and XML) are read into this tree. Branches keep
/// their keys in document order, and any field may hold either a single entry
/// or a list of entries; the accessors on [`Branch`] hide that difference.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Number(Numeric),
    Text(String),
    List(Vec<Node>),
    Branch(Branch),
}

/// An ordered set of tagged child nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Branch {
    entries: Vec<(String, Node)>,
}

impl Node {
    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    pub fn as_branch(&self) -> Option<&Branch> {
        match self {
            Node::Branch(branch) => Some(branch),
            _ => None,
        }
    }

    /// Returns the scalar content of the node as text.
    ///
    /// Numbers keep their integer or float spelling; branches, lists and
    /// nulls have no text form.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Node::Text(text) => Some(Cow::Borrowed(text.as_str())),
            Node::Number(value) => Some(Cow::Owned(value.to_string())),
            Node::Bool(flag) => Some(Cow::Borrowed(if *flag { "true" } else { "false" })),
            _ => None,
        }
    }

    /// Returns the node as a float, parsing text content when necessary.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_numeric().map(|value| value.as_f64())
    }

    /// Returns the node as a [`Numeric`], parsing text content when necessary.
    pub fn as_numeric(&self) -> Option<Numeric> {
        match self {
            Node::Number(value) => Some(*value),
            Node::Text(text) => Numeric::parse(text),
            _ => None,
        }
    }

    /// Interprets the node as a boolean flag.
    ///
    /// Accepts a native boolean or the case-insensitive text `"true"` /
    /// `"false"`. `field` names the flag in the error.
    pub fn as_flag(&self, field: &str) -> Result<bool, PotentialError> {
        match self {
            Node::Bool(flag) => Ok(*flag),
            Node::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(PotentialError::invalid_value(field, text.as_str())),
            },
            other => Err(PotentialError::invalid_value(
                field,
                other.as_text().unwrap_or(Cow::Borrowed("<non-scalar>")),
            )),
        }
    }

    /// Interprets the node as a number, parsing text content when necessary.
    /// `field` names the value in the error.
    pub fn as_number(&self, field: &str) -> Result<f64, PotentialError> {
        self.as_f64().ok_or_else(|| {
            PotentialError::invalid_value(
                field,
                self.as_text().unwrap_or(Cow::Borrowed("<non-scalar>")),
            )
        })
    }

    /// Views the node as a list: lists yield their items, null yields nothing,
    /// and any other node is a single-entry list.
    pub fn iter_as_list(&self) -> Box<dyn Iterator<Item = &Node> + '_> {
        match self {
            Node::List(items) => Box::new(items.iter()),
            Node::Null => Box::new(std::iter::empty()),
            other => Box::new(std::iter::once(other)),
        }
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Text(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Text(value)
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Number(Numeric::Float(value))
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Number(Numeric::Integer(value))
    }
}

impl From<Numeric> for Node {
    fn from(value: Numeric) -> Self {
        Node::Number(value)
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Bool(value)
    }
}

impl From<Branch> for Node {
    fn from(value: Branch) -> Self {
        Node::Branch(value)
    }
}

impl Branch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the first direct child with the given tag.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns the text of a direct child, or `default` when it is absent or null.
    pub fn get_text_or<'a>(&'a self, key: &str, default: &'a str) -> Cow<'a, str> {
        self.get(key)
            .and_then(Node::as_text)
            .unwrap_or(Cow::Borrowed(default))
    }

    /// Returns the text of a direct child if present and non-null.
    pub fn get_text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(Node::as_text).map(Cow::into_owned)
    }

    /// Returns the numeric value of a direct child, or `None` when it is absent
    /// or null.
    pub fn get_number(&self, key: &str, field: &str) -> Result<Option<f64>, PotentialError> {
        match self.get(key) {
            Some(node) if !node.is_null() => node.as_number(field).map(Some),
            _ => Ok(None),
        }
    }

    /// Returns a direct child that must exist.
    ///
    /// `path` is the dotted location reported in the schema error.
    pub fn require(&self, key: &str, path: &str) -> Result<&Node, PotentialError> {
        match self.get(key) {
            Some(node) if !node.is_null() => Ok(node),
            _ => Err(PotentialError::Schema(path.to_string())),
        }
    }

    pub fn require_text(&self, key: &str, path: &str) -> Result<String, PotentialError> {
        self.require(key, path)?
            .as_text()
            .map(Cow::into_owned)
            .ok_or_else(|| PotentialError::Schema(path.to_string()))
    }

    pub fn require_branch(&self, key: &str, path: &str) -> Result<&Branch, PotentialError> {
        self.require(key, path)?
            .as_branch()
            .ok_or_else(|| PotentialError::Schema(path.to_string()))
    }

    /// Iterates a direct child as a list (see [`Node::iter_as_list`]); an
    /// absent child yields nothing.
    pub fn as_list<'a>(&'a self, key: &str) -> Box<dyn Iterator<Item = &'a Node> + 'a> {
        match self.get(key) {
            Some(node) => node.iter_as_list(),
            None => Box::new(std::iter::empty()),
        }
    }

    /// Collects every node tagged `key` anywhere below this branch, depth first.
    pub fn finds<'a>(&'a self, key: &str) -> Vec<&'a Node> {
        let mut found = Vec::new();
        self.collect_tagged(key, &mut found);
        found
    }

    /// Returns the first branch tagged `key`, searching this branch and then
    /// its descendants depth first.
    pub fn find_branch(&self, key: &str) -> Option<&Branch> {
        self.finds(key).into_iter().find_map(Node::as_branch)
    }

    fn collect_tagged<'a>(&'a self, key: &str, found: &mut Vec<&'a Node>) {
        for (tag, node) in &self.entries {
            if tag == key {
                for item in node.iter_as_list() {
                    found.push(item);
                }
            }
            collect_in_node(node, key, found);
        }
    }

    /// Sets a child, replacing any existing entry with the same tag.
    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<Node>) -> &mut Self {
        let key = key.into();
        let node = node.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = node,
            None => self.entries.push((key, node)),
        }
        self
    }

    /// Adds a child; a repeated tag turns the existing entry into a list.
    pub fn append(&mut self, key: impl Into<String>, node: impl Into<Node>) -> &mut Self {
        let key = key.into();
        let node = node.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, Node::List(items))) => items.push(node),
            Some((_, existing)) => {
                let first = std::mem::replace(existing, Node::Null);
                *existing = Node::List(vec![first, node]);
            }
            None => self.entries.push((key, node)),
        }
        self
    }
}

fn collect_in_node<'a>(node: &'a Node, key: &str, found: &mut Vec<&'a Node>) {
    match node {
        Node::Branch(branch) => branch.collect_tagged(key, found),
        Node::List(items) => {
            for item in items {
                collect_in_node(item, key, found);
            }
        }
        _ => {}
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Null => serializer.serialize_unit(),
            Node::Bool(flag) => serializer.serialize_bool(*flag),
            Node::Number(value) => value.serialize(serializer),
            Node::Text(text) => serializer.serialize_str(text),
            Node::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Node::Branch(branch) => branch.serialize(serializer),
        }
    }
}

impl Serialize for Branch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a record document value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Node, D::Error> {
        Node::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Node, E> {
        Ok(Node::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Node, E> {
        Ok(Node::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Node, E> {
        Ok(match i64::try_from(v) {
            Ok(v) => Node::from(v),
            Err(_) => Node::from(v as f64),
        })
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Node, E> {
        Ok(Node::from(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Node, E> {
        Ok(Node::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Node, E> {
        Ok(Node::Text(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Node, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Node::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Node, A::Error> {
        let mut branch = Branch::new();
        while let Some((key, value)) = map.next_entry::<String, Node>()? {
            branch.entries.push((key, value));
        }
        Ok(Node::Branch(branch))
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NodeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Branch {
        let mut atom_fe = Branch::new();
        atom_fe.insert("symbol", "Fe");
        let mut atom_ni = Branch::new();
        atom_ni.insert("symbol", "Ni").insert("mass", 58.7);

        let mut root = Branch::new();
        root.insert("id", "pot-1")
            .append("atom", atom_fe)
            .append("atom", atom_ni)
            .insert("allsymbols", "True");
        root
    }

    #[test]
    fn append_turns_repeated_tags_into_list() {
        let root = sample();
        assert!(matches!(root.get("atom"), Some(Node::List(items)) if items.len() == 2));
        assert_eq!(root.as_list("atom").count(), 2);
    }

    #[test]
    fn as_list_wraps_single_entries_and_skips_absent_ones() {
        let root = sample();
        assert_eq!(root.as_list("id").count(), 1);
        assert_eq!(root.as_list("command").count(), 0);
    }

    #[test]
    fn insert_replaces_existing_entry_in_place() {
        let mut root = sample();
        root.insert("id", "pot-2");
        assert_eq!(root.get_text("id").as_deref(), Some("pot-2"));
        assert_eq!(root.iter().next().map(|(k, _)| k), Some("id"));
    }

    #[test]
    fn require_reports_dotted_path_for_missing_or_null_fields() {
        let mut root = sample();
        root.insert("units", Node::Null);
        assert_eq!(
            root.require("units", "potential-LAMMPS.units"),
            Err(PotentialError::Schema("potential-LAMMPS.units".into()))
        );
        assert!(root.require("id", "id").is_ok());
    }

    #[test]
    fn get_text_or_falls_back_to_default() {
        let root = sample();
        assert_eq!(root.get_text_or("status", "active"), "active");
        assert_eq!(root.get_text_or("id", "x"), "pot-1");
    }

    #[test]
    fn finds_searches_all_descendants() {
        let root = sample();
        let symbols: Vec<_> = root
            .finds("symbol")
            .into_iter()
            .filter_map(|n| n.as_text().map(Cow::into_owned))
            .collect();
        assert_eq!(symbols, vec!["Fe", "Ni"]);
    }

    #[test]
    fn as_flag_accepts_booleans_and_case_insensitive_text() {
        assert_eq!(Node::Bool(true).as_flag("f"), Ok(true));
        assert_eq!(Node::from("True").as_flag("f"), Ok(true));
        assert_eq!(Node::from("FALSE").as_flag("f"), Ok(false));
        assert!(matches!(
            Node::from("yes").as_flag("allsymbols"),
            Err(PotentialError::InvalidValue { field, .. }) if field == "allsymbols"
        ));
        assert!(Node::from(1.0).as_flag("f").is_err());
    }

    #[test]
    fn numbers_render_as_text_keeping_integer_spelling() {
        assert_eq!(Node::from(1.0).as_text().as_deref(), Some("1.0"));
        assert_eq!(Node::from(10000_i64).as_text().as_deref(), Some("10000"));
        assert_eq!(Node::from("8").as_numeric(), Some(Numeric::Integer(8)));
        assert_eq!(Node::from("2.5").as_f64(), Some(2.5));
        assert_eq!(Node::from("abc").as_f64(), None);
    }

    #[test]
    fn get_number_parses_text_and_rejects_garbage() {
        let mut atom = Branch::new();
        atom.insert("mass", "58.7").insert("charge", "x").insert("symbol", Node::Null);
        assert_eq!(atom.get_number("mass", "atom.mass"), Ok(Some(58.7)));
        assert_eq!(atom.get_number("symbol", "atom.symbol"), Ok(None));
        assert_eq!(atom.get_number("absent", "atom.absent"), Ok(None));
        assert!(matches!(
            atom.get_number("charge", "atom.charge"),
            Err(PotentialError::InvalidValue { field, value }) if field == "atom.charge" && value == "x"
        ));
    }

    #[test]
    fn json_round_trip_preserves_key_order() {
        let text = r#"{"b": 1, "a": [true, null, "x"], "c": {"z": 2.5, "y": "t", "w": 3.0}}"#;
        let node: Node = serde_json::from_str(text).unwrap();
        let branch = node.as_branch().unwrap();
        let keys: Vec<_> = branch.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);

        let back = serde_json::to_string(&node).unwrap();
        assert_eq!(back, r#"{"b":1,"a":[true,null,"x"],"c":{"z":2.5,"y":"t","w":3.0}}"#);
    }
}
