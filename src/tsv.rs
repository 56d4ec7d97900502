//! Tab-separated node encoding
//!
//! One node per line, one sentence per blank-line separated block:
//!
//! ```text
//! id  form  lemma  pos  feats  head  deprel  semantic_arcs  nament
//! ```
//!
//! Absent values are written as `_`. Feats are `key=value|key=value`;
//! semantic arcs are `head_id:label` joined with `;`, sorted by head id.
//! Column positions for reading are configurable through [`TsvConfig`].

use crate::node::{BLANK, Features, Node, NodeId};
use crate::semantic::{ARC_DELIM, ArcDisplay, DepArc, LABEL_DELIM};
use crate::tree::Tree;
use flate2::read::MultiGzDecoder;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Lines, Read};
use std::path::Path;

/// Error while reading tab-separated trees
#[derive(Debug, thiserror::Error)]
pub enum TsvError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl TsvError {
    fn parse(line: usize, message: impl Into<String>) -> Self {
        TsvError::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Column index of each node field; `None` means the column is absent
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TsvConfig {
    pub id: Option<usize>,
    pub form: Option<usize>,
    pub lemma: Option<usize>,
    pub pos: Option<usize>,
    pub feats: Option<usize>,
    pub head: Option<usize>,
    pub deprel: Option<usize>,
    pub sheads: Option<usize>,
    pub nament: Option<usize>,
}

impl Default for TsvConfig {
    /// The layout written by [`Tree::to_line`]
    fn default() -> Self {
        Self {
            id: Some(0),
            form: Some(1),
            lemma: Some(2),
            pos: Some(3),
            feats: Some(4),
            head: Some(5),
            deprel: Some(6),
            sheads: Some(7),
            nament: Some(8),
        }
    }
}

impl TsvConfig {
    /// Fewest columns a line must have
    fn min_columns(&self) -> usize {
        [
            self.id,
            self.form,
            self.lemma,
            self.pos,
            self.feats,
            self.head,
            self.deprel,
            self.sheads,
            self.nament,
        ]
        .into_iter()
        .flatten()
        .max()
        .map_or(0, |max| max + 1)
    }
}

// ========== writing ==========

impl Tree {
    /// Encode one node as a tab-separated line (without newline)
    pub fn to_line(&self, id: NodeId) -> String {
        let node = self.node(id);
        let (head, deprel) = match self.head(id) {
            Some(head) => (
                self.token_id(head).to_string(),
                or_blank(node.deprel()).to_string(),
            ),
            None => (BLANK.to_string(), BLANK.to_string()),
        };

        [
            node.id.to_string(),
            or_blank(node.form()).to_string(),
            or_blank(node.lemma.as_deref()).to_string(),
            or_blank(node.pos.as_deref()).to_string(),
            node.feats.to_string(),
            head,
            deprel,
            self.semantic_heads_string(id),
            or_blank(node.nament.as_deref()).to_string(),
        ]
        .join("\t")
    }

    /// Every node except the root sentinel, one line each, followed by the
    /// blank line that ends a sentence
    pub fn to_tsv(&self) -> String {
        let mut out = String::new();
        for (id, node) in self.iter() {
            if node.is_root() {
                continue;
            }
            out.push_str(&self.to_line(id));
            out.push('\n');
        }
        out.push('\n');
        out
    }

    fn semantic_heads_string(&self, id: NodeId) -> String {
        let mut arcs: Vec<_> = self
            .semantic_heads(id)
            .iter()
            .map(|arc| ArcDisplay {
                token_id: self.token_id(arc.node),
                arc,
            })
            .collect();

        if arcs.is_empty() {
            return BLANK.to_string();
        }

        arcs.sort_by(|a, b| (a.token_id, &a.arc.label).cmp(&(b.token_id, &b.arc.label)));
        arcs.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(ARC_DELIM)
    }
}

fn or_blank(s: Option<&str>) -> &str {
    s.unwrap_or(BLANK)
}

// ========== reading ==========

/// Reader that iterates over sentences
pub struct TsvReader<R: BufRead> {
    lines: Lines<R>,
    line_num: usize,
    config: TsvConfig,
}

impl TsvReader<BufReader<Box<dyn Read>>> {
    /// Create a reader from a file path; `.gz` files are decompressed
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let file = File::open(path)?;
        let inner: Box<dyn Read> = if path.extension().is_some_and(|ext| ext == "gz") {
            Box::new(MultiGzDecoder::new(file))
        } else {
            Box::new(file)
        };
        Ok(Self::from_reader(BufReader::new(inner)))
    }
}

impl TsvReader<Cursor<String>> {
    /// Create a reader from a string
    pub fn from_str(text: &str) -> Self {
        Self::from_reader(Cursor::new(text.to_string()))
    }
}

impl<R: BufRead> TsvReader<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_num: 0,
            config: TsvConfig::default(),
        }
    }

    pub fn with_config(mut self, config: TsvConfig) -> Self {
        self.config = config;
        self
    }

    /// Iterate over well-formed trees only, logging and skipping the rest
    pub fn lenient(self) -> impl Iterator<Item = Tree> {
        self.filter_map(|result| match result {
            Ok(tree) => Some(tree),
            Err(e) => {
                tracing::warn!("skipping sentence: {e}");
                None
            }
        })
    }
}

impl<R: BufRead> Iterator for TsvReader<R> {
    type Item = Result<Tree, TsvError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut tree_lines = Vec::new();

        // Read lines until we hit a blank line (sentence boundary) or EOF
        loop {
            self.line_num += 1;
            match self.lines.next() {
                None => {
                    if tree_lines.is_empty() {
                        return None;
                    }
                    break;
                }
                Some(Err(e)) => return Some(Err(TsvError::Io(e))),
                Some(Ok(line)) => {
                    let line = line.trim_end_matches(['\r', '\n']);

                    if line.trim().is_empty() {
                        if !tree_lines.is_empty() {
                            break;
                        }
                        continue;
                    }

                    if line.starts_with('#') {
                        continue;
                    }

                    tree_lines.push((self.line_num, line.to_string()));
                }
            }
        }

        let result = parse_tree(&tree_lines, &self.config);
        if let Ok(tree) = &result {
            tracing::debug!(nodes = tree.len(), line = self.line_num, "read sentence");
        }
        Some(result)
    }
}

/// A node line before heads and arcs are resolved
struct PendingNode<'a> {
    line_num: usize,
    node: NodeId,
    head: Option<&'a str>,
    deprel: Option<&'a str>,
    sheads: Option<&'a str>,
}

/// Parse accumulated lines into a Tree
fn parse_tree(lines: &[(usize, String)], config: &TsvConfig) -> Result<Tree, TsvError> {
    let mut tree = Tree::new();
    let mut by_token_id: FxHashMap<usize, NodeId> = FxHashMap::default();
    by_token_id.insert(0, 0);
    let mut pending = Vec::with_capacity(lines.len());
    let min_columns = config.min_columns();

    for (i, (line_num, line)) in lines.iter().enumerate() {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < min_columns {
            return Err(TsvError::parse(
                *line_num,
                format!("Expected {min_columns} fields, found {}", fields.len()),
            ));
        }

        let column = |index: Option<usize>| index.map(|c| fields[c]).filter(|s| *s != BLANK);

        let token_id = match column(config.id) {
            Some(s) => parse_token_id(s, *line_num)?,
            None => i + 1,
        };

        let mut node = Node::empty(token_id);
        node.set_form(column(config.form));
        node.lemma = column(config.lemma).map(str::to_string);
        node.pos = column(config.pos).map(str::to_string);
        node.nament = column(config.nament).map(str::to_string);
        if let Some(feats) = column(config.feats) {
            node.feats = feats.parse::<Features>().unwrap_or_default();
        }

        let id = tree.add_node(node);
        if by_token_id.insert(token_id, id).is_some() {
            return Err(TsvError::parse(*line_num, format!("Duplicate ID: {token_id}")));
        }

        pending.push(PendingNode {
            line_num: *line_num,
            node: id,
            head: column(config.head),
            deprel: column(config.deprel),
            sheads: column(config.sheads),
        });
    }

    // Set up head-dependent relationships once every node exists
    for p in &pending {
        let resolve = |s: &str| -> Result<NodeId, TsvError> {
            let token_id = parse_token_id(s, p.line_num)?;
            by_token_id
                .get(&token_id)
                .copied()
                .ok_or_else(|| TsvError::parse(p.line_num, format!("Unknown node ID: {token_id}")))
        };

        match p.head {
            Some(head) => tree.set_head(p.node, Some(resolve(head)?), p.deprel),
            None => tree.set_label(p.node, p.deprel),
        }

        if let Some(sheads) = p.sheads {
            for arc in sheads.split(ARC_DELIM) {
                let (head, label) = arc.split_once(LABEL_DELIM).ok_or_else(|| {
                    TsvError::parse(p.line_num, format!("Invalid semantic arc: {arc}"))
                })?;
                tree.add_semantic_arc(p.node, DepArc::new(resolve(head)?, label));
            }
        }
    }

    Ok(tree)
}

fn parse_token_id(s: &str, line_num: usize) -> Result<usize, TsvError> {
    s.parse()
        .map_err(|_| TsvError::parse(line_num, format!("Invalid ID: {s}")))
}
