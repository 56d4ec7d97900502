use divan::{Bencher, black_box};
use deptree::{Field, Node, Tree, TsvReader};

fn main() {
    divan::main();
}

/// A right-branching chain with a flat fan of dependents under every link
fn build_tree(len: usize) -> Tree {
    let mut tree = Tree::new();
    for i in 1..=len {
        let form = format!("w{i}");
        tree.add_node(Node::new(i, &form, &form, "NN"));
    }
    for i in 1..=len {
        let head = if i % 4 == 1 { i - 1 } else { i - i % 4 + 1 };
        tree.set_head(i, Some(head.min(i - 1)), Some("dep"));
    }
    tree
}

#[divan::bench(args = [16, 64, 256])]
fn attach_all(bencher: Bencher, len: usize) {
    bencher.bench_local(|| black_box(build_tree(black_box(len))));
}

#[divan::bench(args = [16, 64, 256])]
fn lca_all_pairs(bencher: Bencher, len: usize) {
    let tree = build_tree(len);
    bencher.bench_local(|| {
        for a in tree.node_ids() {
            black_box(tree.lowest_common_ancestor(a, len - a));
        }
    });
}

#[divan::bench(args = [16, 64, 256])]
fn path_to_last(bencher: Bencher, len: usize) {
    let tree = build_tree(len);
    bencher.bench_local(|| {
        for a in tree.node_ids() {
            black_box(tree.path(a, len, Field::PosTag));
        }
    });
}

#[divan::bench(args = [64, 256])]
fn read_tsv(bencher: Bencher, len: usize) {
    let text = build_tree(len).to_tsv().repeat(20);
    bencher.bench_local(|| {
        for result in TsvReader::from_str(black_box(&text)) {
            black_box(result.unwrap());
        }
    });
}
