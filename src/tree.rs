//! Dependency tree arena
//!
//! Nodes live in a `Vec` and refer to each other by `NodeId`. Every node has
//! at most one head; each head keeps its dependents sorted by token id and
//! every dependent caches its position in that list. `set_head` is the only
//! way the head/dependent relation changes, so both sides stay in sync.
//!
//! The primary tree must be acyclic. This is not checked; walks up the head
//! chain stop after visiting every node once, so a cycle gives a truncated
//! answer rather than a hang.

use crate::label::LabelFilter;
use crate::node::{Node, NodeId};
use std::cmp::Ordering;

/// Previous head and label of a node, as returned by `clear_dependencies`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadArc {
    pub head: Option<NodeId>,
    pub label: Option<String>,
}

/// A dependency tree (sentence)
#[derive(Debug, Clone)]
pub struct Tree {
    pub(crate) nodes: Vec<Node>,
}

impl Tree {
    /// Create a tree holding only the root sentinel (at `NodeId` 0)
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::root()],
        }
    }

    /// Create a tree without a root sentinel
    pub fn empty() -> Self {
        Self { nodes: Vec::new() }
    }

    /// The root sentinel, if this tree was created with one
    pub fn root(&self) -> Option<NodeId> {
        self.nodes.first().filter(|node| node.is_root()).map(|_| 0)
    }

    /// Add a node to the tree. Its head and dependents are reset.
    pub fn add_node(&mut self, mut node: Node) -> NodeId {
        node.head = None;
        node.deprel = None;
        node.dependents.clear();
        node.dependent_index = 0;
        let id = self.nodes.len();
        self.nodes.push(node);
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get a node by handle
    ///
    /// # Panics
    /// If `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Get a mutable reference to a node's attributes
    ///
    /// # Panics
    /// If `id` does not belong to this tree.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        0..self.nodes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate()
    }

    /// Handle of the node with the given token id
    pub fn find_by_token_id(&self, token_id: usize) -> Option<NodeId> {
        match self.nodes.get(token_id) {
            Some(node) if node.id == token_id => Some(token_id),
            _ => self.nodes.iter().position(|node| node.id == token_id),
        }
    }

    /// Token id of a node
    #[inline]
    pub fn token_id(&self, id: NodeId) -> usize {
        self.nodes[id].id
    }

    /// Order two nodes by token id
    #[inline]
    pub fn cmp_nodes(&self, a: NodeId, b: NodeId) -> Ordering {
        self.nodes[a].id.cmp(&self.nodes[b].id)
    }

    /// Change the token id of a node, moving it to its new sorted position
    /// among its head's dependents
    pub fn set_token_id(&mut self, id: NodeId, token_id: usize) {
        let head = self.nodes[id].head;
        if let Some(head) = head {
            self.remove_dependent(head, id);
        }
        self.nodes[id].id = token_id;
        if let Some(head) = head {
            self.insert_dependent(head, id);
            self.reindex_dependents(head);
        }
    }

    /// Sort handles by token id
    pub fn sort_by_token_id(&self, ids: &mut [NodeId]) {
        ids.sort_by(|&a, &b| self.cmp_nodes(a, b));
    }

    // ========== dependent registry ==========

    /// Position at which a node with `token_id` would be inserted among
    /// `owner`'s dependents (after any dependent with an equal id)
    pub(crate) fn insert_position(&self, owner: NodeId, token_id: usize) -> usize {
        self.nodes[owner]
            .dependents
            .partition_point(|&d| self.nodes[d].id <= token_id)
    }

    fn insert_dependent(&mut self, owner: NodeId, dep: NodeId) -> usize {
        let index = self.insert_position(owner, self.nodes[dep].id);
        self.nodes[owner].dependents.insert(index, dep);
        index
    }

    fn remove_dependent(&mut self, owner: NodeId, dep: NodeId) -> bool {
        let deps = &mut self.nodes[owner].dependents;
        match deps.iter().position(|&d| d == dep) {
            Some(index) => {
                deps.remove(index);
                true
            }
            None => false,
        }
    }

    fn reindex_dependents(&mut self, owner: NodeId) {
        let deps = std::mem::take(&mut self.nodes[owner].dependents);
        for (i, &dep) in deps.iter().enumerate() {
            self.nodes[dep].dependent_index = i;
        }
        self.nodes[owner].dependents = deps;
    }

    /// Dependents of a node, sorted by token id
    pub fn dependents(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].dependents
    }

    /// The `index`-th dependent of a node
    ///
    /// # Panics
    /// If `index >= self.dependent_count(id)`.
    pub fn dependent(&self, id: NodeId, index: usize) -> NodeId {
        self.nodes[id].dependents[index]
    }

    pub fn get_dependent(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.nodes[id].dependents.get(index).copied()
    }

    pub fn dependent_count(&self, id: NodeId) -> usize {
        self.nodes[id].dependents.len()
    }

    /// Position of `dep` among `id`'s dependents, if it is one
    pub fn dependent_index_of(&self, id: NodeId, dep: NodeId) -> Option<usize> {
        self.nodes[id].dependents.iter().position(|&d| d == dep)
    }

    /// Cached position of a node among its head's dependents
    pub fn dependent_index(&self, id: NodeId) -> usize {
        self.nodes[id].dependent_index
    }

    // ========== head links ==========

    /// Attach `id` to `head` with `label`, detaching it from its previous
    /// head. `None` leaves the node headless.
    pub fn set_head(&mut self, id: NodeId, head: Option<NodeId>, label: Option<&str>) {
        self.set_head_only(id, head);
        self.set_label(id, label);
    }

    /// Like `set_head`, but leaves the dependency label untouched
    pub fn set_head_only(&mut self, id: NodeId, head: Option<NodeId>) {
        if let Some(old) = self.nodes[id].head {
            self.remove_dependent(old, id);
            self.reindex_dependents(old);
        }

        if let Some(new) = head {
            let index = self.insert_dependent(new, id);
            self.reindex_dependents(new);
            tracing::trace!(node = id, head = new, index, "set head");
        }

        self.nodes[id].head = head;
    }

    pub fn set_label(&mut self, id: NodeId, label: Option<&str>) {
        self.nodes[id].deprel = label.map(str::to_string);
    }

    /// Make `dep` a dependent of `head` with `label`
    pub fn add_dependent(&mut self, head: NodeId, dep: NodeId, label: Option<&str>) {
        self.set_head(dep, Some(head), label);
    }

    /// Clear the head, label and dependent list of a node, returning its
    /// previous head and label.
    ///
    /// The node leaves its old head's dependent list. Its former dependents
    /// become headless (their labels and own subtrees are kept).
    pub fn clear_dependencies(&mut self, id: NodeId) -> HeadArc {
        if let Some(old) = self.nodes[id].head {
            self.remove_dependent(old, id);
            self.reindex_dependents(old);
        }

        let node = &mut self.nodes[id];
        let arc = HeadArc {
            head: node.head.take(),
            label: node.deprel.take(),
        };
        for dep in std::mem::take(&mut node.dependents) {
            self.nodes[dep].head = None;
            self.nodes[dep].dependent_index = 0;
        }
        arc
    }

    // ========== head queries ==========

    pub fn head(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].head
    }

    pub fn has_head(&self, id: NodeId) -> bool {
        self.nodes[id].head.is_some()
    }

    pub fn grand_head(&self, id: NodeId) -> Option<NodeId> {
        self.head(id).and_then(|head| self.head(head))
    }

    pub fn deprel(&self, id: NodeId) -> Option<&str> {
        self.nodes[id].deprel()
    }

    pub fn is_deprel(&self, id: NodeId, label: &str) -> bool {
        self.deprel(id) == Some(label)
    }

    pub fn is_deprel_any(&self, id: NodeId, labels: &[&str]) -> bool {
        labels.iter().any(|&label| self.is_deprel(id, label))
    }

    pub fn deprel_matches(&self, id: NodeId, filter: LabelFilter<'_>) -> bool {
        filter.matches(self.deprel(id))
    }

    /// Is `id` a dependent of `head`?
    pub fn is_dependent_of(&self, id: NodeId, head: NodeId) -> bool {
        self.nodes[id].head == Some(head)
    }

    /// Is `id` a dependent of `head` attached with `label`?
    pub fn is_dependent_of_with(&self, id: NodeId, head: NodeId, label: &str) -> bool {
        self.is_dependent_of(id, head) && self.is_deprel(id, label)
    }

    /// Does `id` have `dep` among its dependents?
    pub fn contains_dependent(&self, id: NodeId, dep: NodeId) -> bool {
        self.nodes[id].dependents.contains(&dep)
    }

    /// Is `ancestor` reachable from `id` by following heads?
    pub fn is_descendant_of(&self, id: NodeId, ancestor: NodeId) -> bool {
        self.head_chain(id).any(|head| head == ancestor)
    }

    /// Do `a` and `b` share a head?
    pub fn is_sibling_of(&self, a: NodeId, b: NodeId) -> bool {
        match self.head(a) {
            Some(head) => self.is_dependent_of(b, head),
            None => false,
        }
    }

    /// Heads of `id`, nearest first. Stops after `len()` steps.
    pub fn head_chain(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.head(id), move |&node| self.head(node)).take(self.nodes.len())
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}
