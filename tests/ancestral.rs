use pango_infer::ancestral::{AncestralReconstruction, FitchReconstructor, ReconstructionOptions};
use pango_infer::encoding::State::{Absent, Present};
use pango_infer::encoding::FeatureVector;
use pango_infer::newick::parse_newick;
use std::collections::HashMap;

fn solver() -> FitchReconstructor {
    FitchReconstructor::new(ReconstructionOptions::default())
}

fn vectors(pairs: &[(&str, FeatureVector)]) -> HashMap<String, FeatureVector> {
    pairs.iter().map(|(n, v)| (n.to_string(), v.clone())).collect()
}

fn node_index(tree: &pango_infer::Tree, name: &str) -> usize {
    tree.nodes
        .iter()
        .position(|n| n.name == name)
        .unwrap_or_else(|| panic!("no node named {name}"))
}

#[test]
fn observed_tips_keep_their_states() {
    let tree = parse_newick("((A,B)AB,C)R;").expect("parses");
    let tips = vectors(&[
        ("A", vec![Present]),
        ("B", vec![Present]),
        ("C", vec![Absent]),
    ]);
    let out = solver().reconstruct(&tree, &tips, 1).expect("reconstructs");
    assert_eq!(out[node_index(&tree, "A")], vec![Present]);
    assert_eq!(out[node_index(&tree, "C")], vec![Absent]);
}

#[test]
fn internal_states_follow_parsimony() {
    let tree = parse_newick("((A,B)AB,C)R;").expect("parses");
    let tips = vectors(&[
        ("A", vec![Present]),
        ("B", vec![Present]),
        ("C", vec![Absent]),
    ]);
    let out = solver().reconstruct(&tree, &tips, 1).expect("reconstructs");
    // Both children of AB agree; the root is ambiguous and resolves to
    // Absent.
    assert_eq!(out[node_index(&tree, "AB")], vec![Present]);
    assert_eq!(out[node_index(&tree, "R")], vec![Absent]);
}

/// Tips with no vector are missing data: they take their state from the
/// surrounding tree, never a zero fill.
#[test]
fn missing_tips_are_imputed_from_context() {
    let tree = parse_newick("((A,B)AB,(C,D)CD)R;").expect("parses");
    let tips = vectors(&[
        ("A", vec![Present]),
        ("C", vec![Present]),
        ("D", vec![Present]),
    ]);
    let out = solver().reconstruct(&tree, &tips, 1).expect("reconstructs");
    assert_eq!(out[node_index(&tree, "B")], vec![Present], "B imputed from neighborhood");
    assert_eq!(out[node_index(&tree, "R")], vec![Present]);
}

#[test]
fn all_missing_column_resolves_to_absent() {
    let tree = parse_newick("((A,B)AB,C)R;").expect("parses");
    let out = solver()
        .reconstruct(&tree, &HashMap::new(), 2)
        .expect("reconstructs");
    for vector in &out {
        assert_eq!(vector, &vec![Absent, Absent]);
    }
}

#[test]
fn sites_are_independent() {
    let tree = parse_newick("((A,B)AB,C)R;").expect("parses");
    let tips = vectors(&[
        ("A", vec![Present, Absent]),
        ("B", vec![Present, Absent]),
        ("C", vec![Present, Present]),
    ]);
    let out = solver().reconstruct(&tree, &tips, 2).expect("reconstructs");
    assert_eq!(out[node_index(&tree, "AB")], vec![Present, Absent]);
    assert_eq!(out[node_index(&tree, "R")], vec![Present, Absent]);
}

#[test]
fn width_mismatch_is_an_error() {
    let tree = parse_newick("(A,B);").expect("parses");
    let tips = vectors(&[("A", vec![Present])]);
    assert!(solver().reconstruct(&tree, &tips, 3).is_err());
}

#[test]
fn tip_echo_when_not_reconstructing_tip_states() {
    let tree = parse_newick("((A,B)AB,C)R;").expect("parses");
    let tips = vectors(&[
        ("A", vec![Present]),
        ("B", vec![Absent]),
        ("C", vec![Absent]),
    ]);
    let options = ReconstructionOptions { reconstruct_tip_states: false, ..Default::default() };
    let out = FitchReconstructor::new(options)
        .reconstruct(&tree, &tips, 1)
        .expect("reconstructs");
    assert_eq!(out[node_index(&tree, "A")], vec![Present]);
    assert_eq!(out[node_index(&tree, "B")], vec![Absent]);
}
