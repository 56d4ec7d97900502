//! Semantic role arcs
//!
//! Each node keeps an ordered list of labeled arcs to its semantic heads
//! (predicates it is an argument of) and a second list of secondary heads.
//! These lists are independent of the primary tree and of each other: they
//! may contain cycles, duplicates, and arcs the primary tree does not have.

use crate::label::LabelFilter;
use crate::node::NodeId;
use crate::tree::Tree;
use std::fmt;

/// Separator between arcs in the text encoding
pub const ARC_DELIM: &str = ";";

/// Separator between an arc's node id and its label in the text encoding
pub const LABEL_DELIM: &str = ":";

/// A labeled arc to another node
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DepArc {
    pub node: NodeId,
    pub label: String,
}

impl DepArc {
    pub fn new(node: NodeId, label: &str) -> Self {
        Self {
            node,
            label: label.to_string(),
        }
    }

    pub fn is_node(&self, node: NodeId) -> bool {
        self.node == node
    }

    pub fn is_label(&self, filter: LabelFilter<'_>) -> bool {
        filter.matches(Some(self.label.as_str()))
    }
}

/// Arc rendered with the token id of its node, for the text encoding
pub(crate) struct ArcDisplay<'a> {
    pub token_id: usize,
    pub arc: &'a DepArc,
}

impl fmt::Display for ArcDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{LABEL_DELIM}{}", self.token_id, self.arc.label)
    }
}

impl Tree {
    // ========== semantic heads ==========

    pub fn semantic_heads(&self, id: NodeId) -> &[DepArc] {
        &self.nodes[id].semantic_heads
    }

    /// Semantic arcs of `id` with exactly this label
    pub fn semantic_heads_by_label(&self, id: NodeId, label: &str) -> Vec<DepArc> {
        self.semantic_heads(id)
            .iter()
            .filter(|arc| arc.label == label)
            .cloned()
            .collect()
    }

    /// First arc from `id` to `head`
    pub fn semantic_arc(&self, id: NodeId, head: NodeId) -> Option<&DepArc> {
        self.semantic_heads(id).iter().find(|arc| arc.is_node(head))
    }

    /// First arc from `id` to `head` whose label passes `filter`
    pub fn semantic_arc_with(&self, id: NodeId, head: NodeId, filter: LabelFilter<'_>) -> Option<&DepArc> {
        self.semantic_heads(id)
            .iter()
            .find(|arc| arc.is_node(head) && arc.is_label(filter))
    }

    /// Label of the first arc from `id` to `head`
    pub fn semantic_label(&self, id: NodeId, head: NodeId) -> Option<&str> {
        self.semantic_arc(id, head).map(|arc| arc.label.as_str())
    }

    /// Head of the first arc whose label passes `filter`
    pub fn first_semantic_head(&self, id: NodeId, filter: LabelFilter<'_>) -> Option<NodeId> {
        self.semantic_heads(id)
            .iter()
            .find(|arc| arc.is_label(filter))
            .map(|arc| arc.node)
    }

    pub fn add_semantic_head(&mut self, id: NodeId, head: NodeId, label: &str) {
        self.add_semantic_arc(id, DepArc::new(head, label));
    }

    pub fn add_semantic_arc(&mut self, id: NodeId, arc: DepArc) {
        self.nodes[id].semantic_heads.push(arc);
    }

    pub fn add_semantic_heads(&mut self, id: NodeId, arcs: impl IntoIterator<Item = DepArc>) {
        self.nodes[id].semantic_heads.extend(arcs);
    }

    /// Replace the semantic arcs of `id`, returning the old ones
    pub fn set_semantic_heads(&mut self, id: NodeId, arcs: Vec<DepArc>) -> Vec<DepArc> {
        std::mem::replace(&mut self.nodes[id].semantic_heads, arcs)
    }

    /// Remove the first arc to `head`. Returns whether one was removed.
    pub fn remove_semantic_head(&mut self, id: NodeId, head: NodeId) -> bool {
        let arcs = &mut self.nodes[id].semantic_heads;
        match arcs.iter().position(|arc| arc.is_node(head)) {
            Some(index) => {
                arcs.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove the first arc equal to `arc`. Returns whether one was removed.
    pub fn remove_semantic_arc(&mut self, id: NodeId, arc: &DepArc) -> bool {
        let arcs = &mut self.nodes[id].semantic_heads;
        match arcs.iter().position(|a| a == arc) {
            Some(index) => {
                arcs.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every arc equal to any of `remove`
    pub fn remove_semantic_arcs(&mut self, id: NodeId, remove: &[DepArc]) {
        self.nodes[id].semantic_heads.retain(|arc| !remove.contains(arc));
    }

    /// Remove every arc with exactly this label
    pub fn remove_semantic_heads_by_label(&mut self, id: NodeId, label: &str) {
        self.nodes[id].semantic_heads.retain(|arc| arc.label != label);
    }

    /// Remove all semantic arcs of `id`, returning them
    pub fn clear_semantic_heads(&mut self, id: NodeId) -> Vec<DepArc> {
        std::mem::take(&mut self.nodes[id].semantic_heads)
    }

    /// Is `id` an argument of `head`?
    pub fn is_argument_of(&self, id: NodeId, head: NodeId) -> bool {
        self.semantic_arc(id, head).is_some()
    }

    /// Is `id` an argument of anything under a label passing `filter`?
    pub fn is_argument_of_label(&self, id: NodeId, filter: LabelFilter<'_>) -> bool {
        self.first_semantic_head(id, filter).is_some()
    }

    /// Is `id` an argument of `head` under a label passing `filter`?
    pub fn is_argument_of_with(&self, id: NodeId, head: NodeId, filter: LabelFilter<'_>) -> bool {
        self.semantic_arc_with(id, head, filter).is_some()
    }

    // ========== secondary heads ==========

    pub fn secondary_heads(&self, id: NodeId) -> &[DepArc] {
        &self.nodes[id].secondary_heads
    }

    pub fn set_secondary_heads(&mut self, id: NodeId, arcs: Vec<DepArc>) -> Vec<DepArc> {
        std::mem::replace(&mut self.nodes[id].secondary_heads, arcs)
    }

    pub fn add_secondary_head(&mut self, id: NodeId, head: NodeId, label: &str) {
        self.nodes[id].secondary_heads.push(DepArc::new(head, label));
    }
}
