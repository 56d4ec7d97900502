//! Node attribute projections and dependent directions
//!
//! `Field` selects which attribute of a node the path, valency and
//! sub-categorization queries read. `Direction` selects the side of a node's
//! dependents those queries consider.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Selectable node attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    WordForm,
    WordFormLowercase,
    WordFormSimplified,
    WordFormSimplifiedLowercase,
    WordFormUndigitized,
    WordShape,
    WordShapeLowercase,
    Lemma,
    PosTag,
    NamentTag,
    DependencyLabel,
    AmbiguityClasses,
    NamedEntityGazetteers,
    /// Hop count pseudo-attribute; only meaningful to path encoding
    Distance,
}

impl Field {
    pub const ALL: [Field; 14] = [
        Field::WordForm,
        Field::WordFormLowercase,
        Field::WordFormSimplified,
        Field::WordFormSimplifiedLowercase,
        Field::WordFormUndigitized,
        Field::WordShape,
        Field::WordShapeLowercase,
        Field::Lemma,
        Field::PosTag,
        Field::NamentTag,
        Field::DependencyLabel,
        Field::AmbiguityClasses,
        Field::NamedEntityGazetteers,
        Field::Distance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::WordForm => "word_form",
            Field::WordFormLowercase => "word_form_lowercase",
            Field::WordFormSimplified => "word_form_simplified",
            Field::WordFormSimplifiedLowercase => "word_form_simplified_lowercase",
            Field::WordFormUndigitized => "word_form_undigitized",
            Field::WordShape => "word_shape",
            Field::WordShapeLowercase => "word_shape_lowercase",
            Field::Lemma => "lemma",
            Field::PosTag => "pos_tag",
            Field::NamentTag => "nament_tag",
            Field::DependencyLabel => "dependency_label",
            Field::AmbiguityClasses => "ambiguity_classes",
            Field::NamedEntityGazetteers => "named_entity_gazetteers",
            Field::Distance => "distance",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownName {
                kind: "field",
                name: s.to_string(),
            })
    }
}

/// Side of a node's dependents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
    All,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::All => "all",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" | "l" => Ok(Direction::Left),
            "right" | "r" => Ok(Direction::Right),
            "all" | "a" => Ok(Direction::All),
            _ => Err(UnknownName {
                kind: "direction",
                name: s.to_string(),
            }),
        }
    }
}

/// A field or direction name that does not exist
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {name}")]
pub struct UnknownName {
    pub kind: &'static str,
    pub name: String,
}
