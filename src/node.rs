//! Node records
//!
//! A `Node` holds the token-level attributes of one word in a dependency
//! tree. Its structural links (head, dependents, semantic arcs) are kept on
//! the record too, but only `Tree` may change them.

use crate::field::Field;
use crate::semantic::DepArc;
use crate::text::{self, SHAPE_MAX_REPEAT};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Arena handle of a node inside its `Tree`
pub type NodeId = usize;

/// Tag value stored in every string field of the root sentinel
pub const ROOT_TAG: &str = "@#r$%";

/// Placeholder for an absent value in the text encoding
pub const BLANK: &str = "_";

/// Separator between feature pairs
pub const FEATS_DELIM: char = '|';

/// Separator between a feature key and its value
pub const FEATS_KEY_VALUE: char = '=';

/// Ordered feature map (key=value|key=value)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Features(BTreeMap<String, String>);

impl Features {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Insert a pair, returning the previous value for `key`
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for Features {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str(BLANK);
        }

        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{FEATS_DELIM}")?;
            }
            write!(f, "{key}{FEATS_KEY_VALUE}{value}")?;
        }
        Ok(())
    }
}

impl FromStr for Features {
    type Err = std::convert::Infallible;

    /// Pairs without `=` are ignored; `_` is the empty map.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut feats = Features::new();

        if s == BLANK {
            return Ok(feats);
        }

        for pair in s.split(FEATS_DELIM) {
            if let Some((key, value)) = pair.split_once(FEATS_KEY_VALUE) {
                feats.insert(key, value);
            }
        }

        Ok(feats)
    }
}

/// A word in a dependency tree
#[derive(Debug, Clone)]
pub struct Node {
    // token id; changed only through Tree::set_token_id
    pub(crate) id: usize,
    form: Option<String>,
    form_lowercase: Option<String>,
    form_simplified: Option<String>,
    form_simplified_lowercase: Option<String>,
    form_undigitized: Option<String>,
    pub lemma: Option<String>,
    pub pos: Option<String>,
    pub nament: Option<String>,
    pub feats: Features,
    pub start_offset: usize,
    pub end_offset: usize,

    // lexica, filled in by external resources
    pub gazetteers: Option<BTreeSet<String>>,
    pub ambiguity_classes: Option<Vec<String>>,
    pub word_clusters: Option<BTreeSet<String>>,
    pub embedding: Option<Vec<f32>>,
    pub stop_word: bool,

    // structure, owned by Tree
    pub(crate) head: Option<NodeId>,
    pub(crate) deprel: Option<String>,
    pub(crate) dependents: Vec<NodeId>,
    pub(crate) dependent_index: usize,
    pub(crate) semantic_heads: Vec<DepArc>,
    pub(crate) secondary_heads: Vec<DepArc>,
}

impl Node {
    /// Create a new node with the given attributes
    pub fn new(id: usize, form: &str, lemma: &str, pos: &str) -> Self {
        let mut node = Self::empty(id);
        node.set_form(Some(form));
        node.lemma = Some(lemma.to_string());
        node.pos = Some(pos.to_string());
        node
    }

    /// A node with only an id; every tag is absent
    pub fn empty(id: usize) -> Self {
        Self {
            id,
            form: None,
            form_lowercase: None,
            form_simplified: None,
            form_simplified_lowercase: None,
            form_undigitized: None,
            lemma: None,
            pos: None,
            nament: None,
            feats: Features::new(),
            start_offset: 0,
            end_offset: 0,
            gazetteers: None,
            ambiguity_classes: None,
            word_clusters: None,
            embedding: None,
            stop_word: false,
            head: None,
            deprel: None,
            dependents: Vec::new(),
            dependent_index: 0,
            semantic_heads: Vec::new(),
            secondary_heads: Vec::new(),
        }
    }

    /// The root sentinel: id 0, every tag set to [`ROOT_TAG`]
    pub fn root() -> Self {
        let mut node = Self::empty(0);
        node.set_form(Some(ROOT_TAG));
        node.lemma = Some(ROOT_TAG.to_string());
        node.pos = Some(ROOT_TAG.to_string());
        node.nament = Some(ROOT_TAG.to_string());
        node
    }

    pub fn with_nament(mut self, tag: &str) -> Self {
        self.nament = Some(tag.to_string());
        self
    }

    pub fn with_feats(mut self, feats: Features) -> Self {
        self.feats = feats;
        self
    }

    /// Token id of this node
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn is_root(&self) -> bool {
        self.id == 0 && self.pos.as_deref() == Some(ROOT_TAG)
    }

    /// Set the surface form and recompute every derived form
    pub fn set_form(&mut self, form: Option<&str>) {
        self.form = form.map(str::to_string);
        self.form_lowercase = form.map(text::to_lowercase);
        self.form_simplified = form.map(text::to_simplified_form);
        self.form_undigitized = form.map(text::to_undigitized_form);
        self.form_simplified_lowercase = self.form_simplified.as_deref().map(text::to_lowercase);
    }

    pub fn form(&self) -> Option<&str> {
        self.form.as_deref()
    }

    pub fn form_lowercase(&self) -> Option<&str> {
        self.form_lowercase.as_deref()
    }

    pub fn form_simplified(&self) -> Option<&str> {
        self.form_simplified.as_deref()
    }

    pub fn form_simplified_lowercase(&self) -> Option<&str> {
        self.form_simplified_lowercase.as_deref()
    }

    pub fn form_undigitized(&self) -> Option<&str> {
        self.form_undigitized.as_deref()
    }

    pub fn word_shape(&self) -> Option<String> {
        self.form_simplified
            .as_deref()
            .map(|s| text::word_shape(s, SHAPE_MAX_REPEAT))
    }

    pub fn word_shape_lowercase(&self) -> Option<String> {
        self.form_simplified_lowercase
            .as_deref()
            .map(|s| text::word_shape(s, SHAPE_MAX_REPEAT))
    }

    /// Dependency label toward the head, if any
    pub fn deprel(&self) -> Option<&str> {
        self.deprel.as_deref()
    }

    pub fn feat(&self, key: &str) -> Option<&str> {
        self.feats.get(key)
    }

    pub fn ambiguity_class(&self, index: usize) -> Option<&str> {
        self.ambiguity_classes
            .as_ref()
            .and_then(|classes| classes.get(index))
            .map(String::as_str)
    }

    /// Ambiguity classes joined with `_`, absent when there are none
    pub fn ambiguity_classes_value(&self) -> Option<String> {
        self.ambiguity_classes
            .as_ref()
            .and_then(|classes| join_values(classes.iter()))
    }

    /// Gazetteer names joined with `_`, absent when there are none
    pub fn gazetteers_value(&self) -> Option<String> {
        self.gazetteers
            .as_ref()
            .and_then(|set| join_values(set.iter()))
    }

    pub fn add_gazetteer(&mut self, gazetteer: &str) {
        self.gazetteers
            .get_or_insert_with(BTreeSet::new)
            .insert(gazetteer.to_string());
    }

    pub fn has_word_clusters(&self) -> bool {
        self.word_clusters.is_some()
    }

    pub fn has_embedding(&self) -> bool {
        self.embedding.is_some()
    }

    pub fn is_form(&self, form: &str) -> bool {
        self.form.as_deref() == Some(form)
    }

    pub fn is_simplified_form(&self, form: &str) -> bool {
        self.form_simplified.as_deref() == Some(form)
    }

    pub fn is_lemma(&self, lemma: &str) -> bool {
        self.lemma.as_deref() == Some(lemma)
    }

    pub fn is_pos(&self, tag: &str) -> bool {
        self.pos.as_deref() == Some(tag)
    }

    pub fn is_pos_match(&self, pattern: &regex::Regex) -> bool {
        self.pos.as_deref().is_some_and(|pos| pattern.is_match(pos))
    }

    pub fn is_nament(&self, tag: &str) -> bool {
        self.nament.as_deref() == Some(tag)
    }

    /// Project one attribute of this node. `Field::Distance` has no value.
    pub fn value(&self, field: Field) -> Option<String> {
        let borrowed = match field {
            Field::WordForm => self.form(),
            Field::WordFormLowercase => self.form_lowercase(),
            Field::WordFormSimplified => self.form_simplified(),
            Field::WordFormSimplifiedLowercase => self.form_simplified_lowercase(),
            Field::WordFormUndigitized => self.form_undigitized(),
            Field::Lemma => self.lemma.as_deref(),
            Field::PosTag => self.pos.as_deref(),
            Field::NamentTag => self.nament.as_deref(),
            Field::DependencyLabel => self.deprel(),
            Field::WordShape => return self.word_shape(),
            Field::WordShapeLowercase => return self.word_shape_lowercase(),
            Field::AmbiguityClasses => return self.ambiguity_classes_value(),
            Field::NamedEntityGazetteers => return self.gazetteers_value(),
            Field::Distance => None,
        };
        borrowed.map(str::to_string)
    }
}

fn join_values<'a>(values: impl Iterator<Item = &'a String>) -> Option<String> {
    let joined = values.map(String::as_str).collect::<Vec<_>>().join("_");
    if joined.is_empty() { None } else { Some(joined) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_forms() {
        let node = Node::new(1, "Dogs-1999", "dog", "NNS");
        assert_eq!(node.form(), Some("Dogs-1999"));
        assert_eq!(node.form_lowercase(), Some("dogs-1999"));
        assert_eq!(node.form_undigitized(), Some("Dogs-0"));
        assert_eq!(node.form_simplified(), Some("Dogs-0"));
        assert_eq!(node.form_simplified_lowercase(), Some("dogs-0"));
        assert_eq!(node.word_shape().as_deref(), Some("Aaa-1"));
        assert_eq!(node.word_shape_lowercase().as_deref(), Some("aa-1"));
    }

    #[test]
    fn test_root_sentinel() {
        let root = Node::root();
        assert!(root.is_root());
        assert_eq!(root.id, 0);
        assert_eq!(root.form(), Some(ROOT_TAG));
        assert_eq!(root.value(Field::NamentTag).as_deref(), Some(ROOT_TAG));
        assert!(!Node::new(0, "x", "x", "NN").is_root());
    }

    #[test]
    fn test_value_projection() {
        let mut node = Node::new(3, "Atlanta", "atlanta", "NNP").with_nament("GPE");
        node.add_gazetteer("city");
        node.add_gazetteer("capital");
        node.ambiguity_classes = Some(vec!["NNP".to_string(), "NN".to_string()]);

        assert_eq!(node.value(Field::Lemma).as_deref(), Some("atlanta"));
        assert_eq!(node.value(Field::NamentTag).as_deref(), Some("GPE"));
        assert_eq!(node.value(Field::NamedEntityGazetteers).as_deref(), Some("capital_city"));
        assert_eq!(node.value(Field::AmbiguityClasses).as_deref(), Some("NNP_NN"));
        assert_eq!(node.ambiguity_class(1), Some("NN"));
        assert_eq!(node.ambiguity_class(2), None);
        assert_eq!(node.value(Field::DependencyLabel), None);
        assert_eq!(node.value(Field::Distance), None);
    }

    #[test]
    fn test_features() {
        let feats: Features = "Number=Plur|Case=Nom|junk".parse().unwrap();
        assert_eq!(feats.len(), 2);
        assert_eq!(feats.get("Case"), Some("Nom"));
        assert_eq!(feats.to_string(), "Case=Nom|Number=Plur");

        let empty: Features = BLANK.parse().unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.to_string(), BLANK);
    }
}
