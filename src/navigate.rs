//! Read-only navigation over the primary tree
//!
//! Nearest/outermost dependents and siblings with displacement, label
//! filtered lookup, left/right partitions, descendants, subtree collection,
//! valency and sub-categorization. Every "no such neighbor" case is `None`.

use crate::field::{Direction, Field};
use crate::label::LabelFilter;
use crate::node::NodeId;
use crate::tree::Tree;
use rustc_hash::FxHashSet;
use std::collections::BTreeSet;

const LEFT_MARK: char = '<';
const RIGHT_MARK: char = '>';

impl Tree {
    // ========== displacement ==========

    /// The `order`-th nearest dependent to the left of `id` (0 = nearest)
    pub fn left_nearest_dependent(&self, id: NodeId, order: usize) -> Option<NodeId> {
        let index = self.insert_position(id, self.token_id(id));
        let index = index.checked_sub(order.checked_add(1)?)?;
        Some(self.dependent(id, index))
    }

    /// The `order`-th nearest dependent to the right of `id` (0 = nearest)
    pub fn right_nearest_dependent(&self, id: NodeId, order: usize) -> Option<NodeId> {
        let index = self.insert_position(id, self.token_id(id)).checked_add(order)?;
        self.get_dependent(id, index)
    }

    /// The `order`-th leftmost dependent (0 = leftmost); it must lie left of `id`
    pub fn leftmost_dependent(&self, id: NodeId, order: usize) -> Option<NodeId> {
        self.get_dependent(id, order)
            .filter(|&dep| self.token_id(dep) < self.token_id(id))
    }

    /// The `order`-th rightmost dependent (0 = rightmost); it must lie right of `id`
    pub fn rightmost_dependent(&self, id: NodeId, order: usize) -> Option<NodeId> {
        let index = self.dependent_count(id).checked_sub(order.checked_add(1)?)?;
        Some(self.dependent(id, index)).filter(|&dep| self.token_id(dep) > self.token_id(id))
    }

    /// The `order`-th nearest sibling to the left (0 = nearest)
    pub fn left_nearest_sibling(&self, id: NodeId, order: usize) -> Option<NodeId> {
        let head = self.head(id)?;
        let index = self.dependent_index(id).checked_sub(order.checked_add(1)?)?;
        Some(self.dependent(head, index))
    }

    /// The `order`-th nearest sibling to the right (0 = nearest)
    pub fn right_nearest_sibling(&self, id: NodeId, order: usize) -> Option<NodeId> {
        let head = self.head(id)?;
        let index = self.dependent_index(id).checked_add(order)?.checked_add(1)?;
        self.get_dependent(head, index)
    }

    /// Nearest left sibling whose label passes `filter`
    pub fn left_nearest_sibling_by(&self, id: NodeId, filter: LabelFilter<'_>) -> Option<NodeId> {
        let head = self.head(id)?;
        self.dependents(head)[..self.dependent_index(id)]
            .iter()
            .rev()
            .copied()
            .find(|&sib| self.deprel_matches(sib, filter))
    }

    /// Nearest right sibling whose label passes `filter`
    pub fn right_nearest_sibling_by(&self, id: NodeId, filter: LabelFilter<'_>) -> Option<NodeId> {
        let head = self.head(id)?;
        self.dependents(head)
            .iter()
            .skip(self.dependent_index(id) + 1)
            .copied()
            .find(|&sib| self.deprel_matches(sib, filter))
    }

    // ========== label-filtered lookup ==========

    /// First dependent (in id order) whose label passes `filter`
    pub fn first_dependent_by(&self, id: NodeId, filter: LabelFilter<'_>) -> Option<NodeId> {
        self.dependents(id)
            .iter()
            .copied()
            .find(|&dep| self.deprel_matches(dep, filter))
    }

    /// First dependent (in id order) satisfying an arbitrary predicate
    pub fn first_dependent_where<F>(&self, id: NodeId, mut predicate: F) -> Option<NodeId>
    where
        F: FnMut(&Tree, NodeId) -> bool,
    {
        self.dependents(id)
            .iter()
            .copied()
            .find(|&dep| predicate(self, dep))
    }

    pub fn contains_dependent_by(&self, id: NodeId, filter: LabelFilter<'_>) -> bool {
        self.first_dependent_by(id, filter).is_some()
    }

    /// All dependents whose label passes `filter`, in id order
    pub fn dependents_by(&self, id: NodeId, filter: LabelFilter<'_>) -> Vec<NodeId> {
        self.dependents(id)
            .iter()
            .copied()
            .filter(|&dep| self.deprel_matches(dep, filter))
            .collect()
    }

    /// Dependents left of `id`, in id order
    pub fn left_dependents(&self, id: NodeId) -> Vec<NodeId> {
        self.left_part(id).to_vec()
    }

    pub fn left_dependents_by(&self, id: NodeId, filter: LabelFilter<'_>) -> Vec<NodeId> {
        self.left_part(id)
            .iter()
            .copied()
            .filter(|&dep| self.deprel_matches(dep, filter))
            .collect()
    }

    /// Dependents right of `id`, in id order
    pub fn right_dependents(&self, id: NodeId) -> Vec<NodeId> {
        self.right_part(id).to_vec()
    }

    pub fn right_dependents_by(&self, id: NodeId, filter: LabelFilter<'_>) -> Vec<NodeId> {
        self.right_part(id)
            .iter()
            .copied()
            .filter(|&dep| self.deprel_matches(dep, filter))
            .collect()
    }

    fn left_part(&self, id: NodeId) -> &[NodeId] {
        let pivot = self.token_id(id);
        let deps = self.dependents(id);
        &deps[..deps.partition_point(|&d| self.token_id(d) < pivot)]
    }

    fn right_part(&self, id: NodeId) -> &[NodeId] {
        let pivot = self.token_id(id);
        let deps = self.dependents(id);
        &deps[deps.partition_point(|&d| self.token_id(d) <= pivot)..]
    }

    // ========== descendants ==========

    /// Dependents of dependents, grouped by dependent
    pub fn grand_dependents(&self, id: NodeId) -> Vec<NodeId> {
        self.dependents(id)
            .iter()
            .flat_map(|&dep| self.dependents(dep).iter().copied())
            .collect()
    }

    /// Descendants at most `height` levels down; each level's dependents are
    /// listed before their own descendants. `height <= 0` gives nothing.
    /// Recursion depth is bounded by `height`.
    pub fn descendants(&self, id: NodeId, height: i32) -> Vec<NodeId> {
        let mut list = Vec::new();
        if height > 0 {
            self.descendants_aux(id, &mut list, height - 1);
        }
        list
    }

    fn descendants_aux(&self, id: NodeId, list: &mut Vec<NodeId>, height: i32) {
        let deps = self.dependents(id);
        list.extend_from_slice(deps);

        if height > 0 {
            for &dep in deps {
                self.descendants_aux(dep, list, height - 1);
            }
        }
    }

    /// First descendant in pre-order with the given POS tag
    pub fn any_descendant_with_pos(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = self.dependents(id).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            if self.node(node).is_pos(tag) {
                return Some(node);
            }
            stack.extend(self.dependents(node).iter().rev());
        }
        None
    }

    // ========== subtrees ==========

    /// Every node of the subtree rooted at `id` (inclusive), sorted by id
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut list = Vec::new();
        self.collect_subtree(id, &mut |node| list.push(node));
        self.sort_by_token_id(&mut list);
        list
    }

    /// Every node of the subtree rooted at `id` (inclusive)
    pub fn subtree_set(&self, id: NodeId) -> FxHashSet<NodeId> {
        let mut set = FxHashSet::default();
        self.collect_subtree(id, &mut |node| {
            set.insert(node);
        });
        set
    }

    /// Token ids of the subtree rooted at `id` (inclusive)
    pub fn subtree_ids(&self, id: NodeId) -> BTreeSet<usize> {
        let mut set = BTreeSet::new();
        self.collect_subtree(id, &mut |node| {
            set.insert(self.token_id(node));
        });
        set
    }

    /// Token ids of the subtree rooted at `id` (inclusive), ascending
    pub fn subtree_ids_sorted(&self, id: NodeId) -> Vec<usize> {
        self.subtree_ids(id).into_iter().collect()
    }

    /// Pre-order walk over an explicit stack
    fn collect_subtree(&self, id: NodeId, visit: &mut dyn FnMut(NodeId)) {
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            visit(node);
            stack.extend(self.dependents(node).iter().rev());
        }
    }

    // ========== valency ==========

    /// `""`, `"<"` or `"<<"`: no, one, or several left dependents
    pub fn left_valency(&self, id: NodeId) -> String {
        let mut valency = String::new();
        if self.leftmost_dependent(id, 0).is_some() {
            valency.push(LEFT_MARK);
            if self.leftmost_dependent(id, 1).is_some() {
                valency.push(LEFT_MARK);
            }
        }
        valency
    }

    /// `""`, `">"` or `">>"`: no, one, or several right dependents
    pub fn right_valency(&self, id: NodeId) -> String {
        let mut valency = String::new();
        if self.rightmost_dependent(id, 0).is_some() {
            valency.push(RIGHT_MARK);
            if self.rightmost_dependent(id, 1).is_some() {
                valency.push(RIGHT_MARK);
            }
        }
        valency
    }

    /// Valency on one side, or `left-right` for `Direction::All`
    pub fn valency(&self, id: NodeId, direction: Direction) -> String {
        match direction {
            Direction::Left => self.left_valency(id),
            Direction::Right => self.right_valency(id),
            Direction::All => format!("{}-{}", self.left_valency(id), self.right_valency(id)),
        }
    }

    /// Projected values of all dependents (those that have one)
    pub fn dependent_values(&self, id: NodeId, field: Field) -> FxHashSet<String> {
        self.dependents(id)
            .iter()
            .filter_map(|&dep| self.value(dep, field))
            .collect()
    }

    // ========== sub-categorization ==========

    /// `<v` for each left dependent in id order; `None` if there are none
    pub fn left_subcategorization(&self, id: NodeId, field: Field) -> Option<String> {
        let mut subcat = String::new();
        for &dep in self.left_part(id) {
            subcat.push(LEFT_MARK);
            subcat.push_str(&self.value(dep, field).unwrap_or_default());
        }
        (!subcat.is_empty()).then_some(subcat)
    }

    /// `>v` for each right dependent, outermost first; `None` if there are none
    pub fn right_subcategorization(&self, id: NodeId, field: Field) -> Option<String> {
        let mut subcat = String::new();
        for &dep in self.right_part(id).iter().rev() {
            subcat.push(RIGHT_MARK);
            subcat.push_str(&self.value(dep, field).unwrap_or_default());
        }
        (!subcat.is_empty()).then_some(subcat)
    }

    pub fn subcategorization(&self, id: NodeId, direction: Direction, field: Field) -> Option<String> {
        match direction {
            Direction::Left => self.left_subcategorization(id, field),
            Direction::Right => self.right_subcategorization(id, field),
            Direction::All => match (
                self.left_subcategorization(id, field),
                self.right_subcategorization(id, field),
            ) {
                (Some(left), Some(right)) => Some(left + &right),
                (left, right) => left.or(right),
            },
        }
    }

    /// Project `field` of a node; the dependency label comes from the tree
    pub fn value(&self, id: NodeId, field: Field) -> Option<String> {
        self.node(id).value(field)
    }
}
