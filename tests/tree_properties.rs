//! Property tests for the head/dependent invariants and tree queries

use deptree::{DepArc, Field, Node, NodeId, Tree, TsvReader};
use proptest::prelude::*;

const MAX_NODES: usize = 12;

/// A tree with `n` words plus the root and no links
fn words(n: usize) -> Tree {
    let mut tree = Tree::new();
    for i in 1..=n {
        let form = format!("w{i}");
        tree.add_node(Node::new(i, &form, &form, "NN"));
    }
    tree
}

/// Attach each word to a random earlier node, so the result is acyclic
fn random_tree(heads: &[usize]) -> Tree {
    let mut tree = words(heads.len());
    for (i, &h) in heads.iter().enumerate() {
        let id = i + 1;
        tree.set_head(id, Some(h % id), Some("dep"));
    }
    tree
}

fn heads_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(any::<usize>(), 1..MAX_NODES)
}

#[derive(Debug, Clone)]
enum Edit {
    SetHead(usize, Option<usize>),
    Clear(usize),
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        4 => (0..=MAX_NODES, prop::option::of(0..=MAX_NODES)).prop_map(|(n, h)| Edit::SetHead(n, h)),
        1 => (0..=MAX_NODES).prop_map(Edit::Clear),
    ]
}

fn assert_registry_consistent(tree: &Tree) {
    for id in tree.node_ids() {
        let deps = tree.dependents(id);
        for (rank, &dep) in deps.iter().enumerate() {
            assert_eq!(tree.head(dep), Some(id), "dependent {dep} of {id} has another head");
            assert_eq!(tree.dependent_index(dep), rank);
            if rank > 0 {
                assert!(tree.token_id(deps[rank - 1]) < tree.token_id(dep));
            }
        }
        if let Some(head) = tree.head(id) {
            let count = tree.dependents(head).iter().filter(|&&d| d == id).count();
            assert_eq!(count, 1, "node {id} listed {count} times under {head}");
        }
    }
}

proptest! {
    #[test]
    fn registry_stays_sorted_under_edits(edits in prop::collection::vec(edit_strategy(), 0..60)) {
        let mut tree = words(MAX_NODES);
        for edit in edits {
            match edit {
                Edit::SetHead(n, h) => tree.set_head(n, h, Some("dep")),
                Edit::Clear(n) => {
                    tree.clear_dependencies(n);
                }
            }
            assert_registry_consistent(&tree);
        }
    }

    #[test]
    fn nearest_dependents_match_definition(heads in heads_strategy(), pick in any::<usize>()) {
        let tree = random_tree(&heads);
        let id = pick % tree.len();
        let me = tree.token_id(id);

        let left = tree
            .dependents(id)
            .iter()
            .copied()
            .filter(|&d| tree.token_id(d) < me)
            .max_by_key(|&d| tree.token_id(d));
        let right = tree
            .dependents(id)
            .iter()
            .copied()
            .filter(|&d| tree.token_id(d) > me)
            .min_by_key(|&d| tree.token_id(d));

        prop_assert_eq!(tree.left_nearest_dependent(id, 0), left);
        prop_assert_eq!(tree.right_nearest_dependent(id, 0), right);
    }

    #[test]
    fn lca_is_symmetric(heads in heads_strategy(), a in any::<usize>(), b in any::<usize>()) {
        let tree = random_tree(&heads);
        let a = a % tree.len();
        let b = b % tree.len();

        let lca = tree.lowest_common_ancestor(a, b);
        prop_assert_eq!(lca, tree.lowest_common_ancestor(b, a));
        // every node hangs off the root
        let lca = lca.unwrap();
        prop_assert!(lca == a || tree.is_descendant_of(a, lca));
        prop_assert!(lca == b || tree.is_descendant_of(b, lca));
    }

    #[test]
    fn subtree_views_agree(heads in heads_strategy(), pick in any::<usize>()) {
        let tree = random_tree(&heads);
        let id = pick % tree.len();

        let list = tree.subtree(id);
        prop_assert_eq!(list.len(), tree.subtree_set(id).len());
        prop_assert_eq!(list.len(), tree.subtree_ids(id).len());
        let ids: Vec<usize> = list.iter().map(|&n| tree.token_id(n)).collect();
        prop_assert_eq!(ids, tree.subtree_ids_sorted(id));
    }

    #[test]
    fn distance_path_counts_hops(heads in heads_strategy(), a in any::<usize>(), b in any::<usize>()) {
        let tree = random_tree(&heads);
        let a = a % tree.len();
        let b = b % tree.len();
        prop_assume!(a != b);

        let lca = tree.lowest_common_ancestor(a, b).unwrap();
        let hops = |from: NodeId| {
            std::iter::once(from).chain(tree.head_chain(from)).take_while(|&n| n != lca).count()
        };
        let expected = if a == lca {
            format!("|{}", hops(b))
        } else if b == lca {
            format!("^{}", hops(a))
        } else {
            format!("^{}|{}", hops(a), hops(b))
        };
        prop_assert_eq!(tree.path(a, b, Field::Distance), Some(expected));
    }

    #[test]
    fn line_round_trip(heads in heads_strategy(), arcs in prop::collection::vec((any::<usize>(), any::<usize>()), 0..8)) {
        let mut tree = random_tree(&heads);
        for (from, to) in arcs {
            // the root sentinel is not written out, so it carries no arcs
            let from = 1 + from % (tree.len() - 1);
            let to = to % tree.len();
            tree.add_semantic_arc(from, DepArc::new(to, "ARG1"));
        }

        let read = TsvReader::from_str(&tree.to_tsv()).next().unwrap().unwrap();
        for id in tree.node_ids() {
            prop_assert_eq!(read.to_line(id), tree.to_line(id));
            prop_assert_eq!(read.head(id), tree.head(id));
        }
    }
}

#[test]
fn scenario_root_a_bc() {
    // root(0) -> A(1) -> B(2), C(3)
    let mut tree = words(3);
    tree.set_head(1, Some(0), Some("root"));
    tree.set_head(2, Some(1), Some("dep"));
    tree.set_head(3, Some(1), Some("dep"));

    assert_eq!(tree.leftmost_dependent(1, 0), None);
    assert_eq!(tree.rightmost_dependent(1, 0), Some(3));
    assert_eq!(tree.lowest_common_ancestor(2, 3), Some(1));
    assert_eq!(tree.right_valency(1), ">>");
}

#[test]
fn scenario_semantic_arcs() {
    let mut tree = words(3);
    let (x, y, z) = (1, 2, 3);
    tree.add_semantic_head(z, x, "ARG0");
    tree.add_semantic_head(z, y, "ARG1");

    assert_eq!(tree.first_semantic_head(z, "ARG1".into()), Some(y));

    assert!(tree.remove_semantic_head(z, x));
    assert_eq!(tree.semantic_heads(z), &[DepArc::new(y, "ARG1")]);

    tree.add_semantic_head(z, x, "ARG0");
    let backup = tree.clear_semantic_heads(z);
    assert!(tree.semantic_heads(z).is_empty());
    assert_eq!(backup.len(), 2);
}
