//! Ancestors, lowest common ancestors, tree paths and argument candidates

use crate::field::Field;
use crate::node::NodeId;
use crate::tree::Tree;
use rustc_hash::FxHashSet;

/// Delimiter for the half of a path that climbs from the first node
pub const UP_DELIM: &str = "^";

/// Delimiter for the half of a path that reaches the second node
pub const DOWN_DELIM: &str = "|";

impl Tree {
    /// Every node above `id` on its head chain (exclusive)
    pub fn ancestors(&self, id: NodeId) -> FxHashSet<NodeId> {
        self.head_chain(id).collect()
    }

    /// Lowest node that has both `a` and `b` in its subtree
    ///
    /// Collects `a` and its ancestors, then climbs from `b` until it meets
    /// one of them. `None` when the two nodes are not connected.
    pub fn lowest_common_ancestor(&self, a: NodeId, b: NodeId) -> Option<NodeId> {
        let mut set = self.ancestors(a);
        set.insert(a);

        std::iter::once(b)
            .chain(self.head_chain(b))
            .find(|node| set.contains(node))
    }

    /// Path between `a` and `b` through their lowest common ancestor
    ///
    /// Steps climbing from `a` are marked `^`, steps from `b` are marked `|`,
    /// each followed by the node's `field` value. Nodes without a value are
    /// skipped and counted; for `Field::Distance` each half ends with that
    /// count instead. The ancestor's own value closes `a`'s half (or the only
    /// half, when one node is the ancestor) unless `field` is the dependency
    /// label.
    pub fn path(&self, a: NodeId, b: NodeId, field: Field) -> Option<String> {
        let lca = self.lowest_common_ancestor(a, b)?;
        self.path_with_lca(a, b, lca, field)
    }

    /// `path` with a caller-supplied common ancestor
    pub fn path_with_lca(&self, a: NodeId, b: NodeId, lca: NodeId, field: Field) -> Option<String> {
        if a == lca {
            return self.path_half(lca, b, field, DOWN_DELIM, true);
        }

        if b == lca {
            return self.path_half(lca, a, field, UP_DELIM, true);
        }

        let up = self.path_half(lca, a, field, UP_DELIM, true);
        let down = self.path_half(lca, b, field, DOWN_DELIM, false);

        match (up, down) {
            (Some(up), Some(down)) => Some(up + &down),
            (up, down) => up.or(down),
        }
    }

    fn path_half(
        &self,
        top: NodeId,
        bottom: NodeId,
        field: Field,
        delim: &str,
        include_top: bool,
    ) -> Option<String> {
        let mut path = String::new();
        let mut skipped = 0;

        let steps = std::iter::once(bottom)
            .chain(self.head_chain(bottom))
            .take_while(|&node| node != top);

        for node in steps {
            match self.value(node, field) {
                Some(value) => {
                    path.push_str(delim);
                    path.push_str(&value);
                }
                None => skipped += 1,
            }
        }

        if field == Field::Distance {
            path.push_str(delim);
            path.push_str(&skipped.to_string());
        } else if field != Field::DependencyLabel && include_top {
            path.push_str(delim);
            path.push_str(&self.value(top, field).unwrap_or_default());
        }

        (!path.is_empty()).then_some(path)
    }

    /// Candidate arguments of the predicate `pred`, each paired with its
    /// lowest common ancestor with `pred`
    ///
    /// First the descendants of `pred`, level by level down to `max_depth`
    /// levels (paired with `pred`). Then up to `max_height` ancestors, each
    /// paired with itself and followed by its other dependents (paired with
    /// that ancestor). The climb stops before an ancestor without a head.
    pub fn argument_candidates(
        &self,
        pred: NodeId,
        max_depth: usize,
        max_height: usize,
    ) -> Vec<(NodeId, NodeId)> {
        let mut list: Vec<(NodeId, NodeId)> =
            self.dependents(pred).iter().map(|&dep| (dep, pred)).collect();

        let mut begin = 0;
        for _ in 1..max_depth {
            let end = list.len();
            if begin == end {
                break;
            }

            for i in begin..end {
                let parent = list[i].0;
                list.extend(self.dependents(parent).iter().map(|&dep| (dep, pred)));
            }
            begin = end;
        }

        let mut prev = pred;
        for lca in self.head_chain(pred).take(max_height) {
            if !self.has_head(lca) {
                break;
            }

            list.push((lca, lca));
            list.extend(
                self.dependents(lca)
                    .iter()
                    .filter(|&&dep| dep != prev)
                    .map(|&dep| (dep, lca)),
            );
            prev = lca;
        }

        list
    }
}
