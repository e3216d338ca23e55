//! Round-trip property: decomposing a tree's own serialization through its
//! recognizer and permutation reproduces the labels exactly, for every shape
//! and label assignment (delimiter-free labels).

use arbor_tree::Tree;

use crate::{serialize, OrderPermutation, Recognizer};

fn assert_round_trip(tree: &Tree) {
    let text = serialize(tree).unwrap();
    let rec = Recognizer::compile(tree).unwrap();
    let order = OrderPermutation::compute(tree).unwrap();

    let captures = rec
        .captures(&text)
        .expect("a tree's own serialization must match its recognizer");
    assert_eq!(captures.len(), tree.len());
    assert!(order.is_bijection());

    let mut recovered = vec![String::new(); tree.len()];
    for (linear, capture) in captures.iter().enumerate() {
        recovered[order.internal(linear)] = capture.to_string();
    }
    for node in 0..tree.len() {
        assert_eq!(recovered[node], tree.label(node), "label of node {node}");
    }
}

#[test]
fn test_round_trip_single_node() {
    assert_round_trip(&Tree::with_root("a"));
}

#[test]
fn test_round_trip_empty_tree() {
    assert_round_trip(&Tree::empty());
}

#[test]
fn test_round_trip_empty_labels() {
    let mut tree = Tree::new();
    tree.sprout(0).unwrap();
    tree.sprout(0).unwrap();
    assert_round_trip(&tree);
}

#[test]
fn test_round_trip_interleaved_growth() {
    // Internal order diverges from textual order here.
    let mut tree = Tree::with_root("root");
    tree.sprout(0).unwrap();
    tree.sprout(0).unwrap();
    tree.sprout(1).unwrap();
    tree.sprout(3).unwrap();
    for node in 1..tree.len() {
        tree.set_label(node, format!("node {node}")).unwrap();
    }
    assert_round_trip(&tree);
}

#[test]
fn test_round_trip_awkward_labels() {
    let mut tree = Tree::with_root("  spaces  ");
    let a = tree.sprout(0).unwrap();
    let b = tree.sprout(0).unwrap();
    tree.set_label(a, "line\nbreak").unwrap();
    tree.set_label(b, "ünïcödé ☂").unwrap();
    assert_round_trip(&tree);
}

#[test]
fn test_round_trip_after_removal() {
    let mut tree = Tree::with_root("r");
    let a = tree.sprout(0).unwrap();
    tree.sprout(a).unwrap();
    tree.sprout(0).unwrap();
    tree.remove(a).unwrap();
    tree.set_label(1, "survivor").unwrap();
    assert_round_trip(&tree);
}

#[test]
fn test_round_trip_deep_chain() {
    let mut tree = Tree::with_root("0");
    let mut tip = 0;
    for depth in 1..=24 {
        tip = tree.sprout(tip).unwrap();
        tree.set_label(tip, depth.to_string()).unwrap();
    }
    assert_round_trip(&tree);
}

#[test]
fn test_round_trip_wide_fanout() {
    let mut tree = Tree::with_root("hub");
    for i in 0..16 {
        let n = tree.sprout(0).unwrap();
        tree.set_label(n, format!("spoke-{i}")).unwrap();
    }
    assert_round_trip(&tree);
}
