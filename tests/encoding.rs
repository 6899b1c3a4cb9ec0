use pango_infer::encoding::{choose_label, CharacterIndex, State, FALLBACK_LINEAGE};
use pango_infer::lineage::hierarchy;

#[test]
fn hierarchy_expands_all_prefixes() {
    assert_eq!(
        hierarchy("A.B.C.D.E"),
        vec!["A", "A.B", "A.B.C", "A.B.C.D", "A.B.C.D.E"]
    );
}

#[test]
fn hierarchy_single_component() {
    assert_eq!(hierarchy("B"), vec!["B"]);
}

/// Every hierarchy is non-empty, ends with the name itself, and is sorted
/// by increasing length.
#[test]
fn hierarchy_shape_laws() {
    for name in ["B", "B.1", "B.1.1.529", "XBB.1.5"] {
        let chain = hierarchy(name);
        assert!(!chain.is_empty(), "{name}: empty hierarchy");
        assert_eq!(chain.last().map(String::as_str), Some(name), "{name}: last element");
        for pair in chain.windows(2) {
            assert!(pair[0].len() < pair[1].len(), "{name}: not increasing");
        }
    }
}

#[test]
fn index_positions_are_sorted_characters() {
    let index = CharacterIndex::from_lineages(["B.1.3", "B.1.4", "B.1.5"]);
    let characters: Vec<&str> = (0..index.len()).map(|i| index.character(i)).collect();
    assert_eq!(characters, vec!["B", "B.1", "B.1.3", "B.1.4", "B.1.5"]);
}

#[test]
fn encode_marks_exactly_the_hierarchy() {
    let index = CharacterIndex::from_lineages(["B.1.3", "B.1.4", "B.1.5"]);
    let vector = index.encode("B.1.3");
    assert_eq!(
        vector,
        vec![
            State::Present, // B
            State::Present, // B.1
            State::Present, // B.1.3
            State::Absent,  // B.1.4
            State::Absent,  // B.1.5
        ]
    );
}

/// Round-trip law on the non-inferred path: decode(encode(n)) == hierarchy(n).
#[test]
fn decode_encode_round_trips_to_hierarchy() {
    let lineages = ["B", "B.1", "B.1.1.529", "B.1.617.2", "A.2.5"];
    let index = CharacterIndex::from_lineages(lineages);
    for name in lineages {
        assert_eq!(index.decode(&index.encode(name)), hierarchy(name), "{name}");
    }
}

/// Decode returns characters in position order, which is sorted-character
/// order, not the order states happen to be set.
#[test]
fn decode_follows_position_order() {
    let index = CharacterIndex::from_lineages(["B.1.3", "B.1.4", "B.1.5"]);
    // Positions: [B, B.1, B.1.3, B.1.4, B.1.5]; present at 0, 1, 4.
    let vector = vec![
        State::Present,
        State::Present,
        State::Absent,
        State::Absent,
        State::Present,
    ];
    assert_eq!(index.decode(&vector), vec!["B", "B.1", "B.1.5"]);
}

#[test]
fn choose_label_takes_most_specific() {
    let list = vec!["B".to_string(), "B.1".to_string(), "B.1.3".to_string()];
    assert_eq!(choose_label(&list), "B.1.3");
}

#[test]
fn choose_label_falls_back_on_empty() {
    assert_eq!(choose_label(&[]), FALLBACK_LINEAGE);
    assert_eq!(choose_label(&[]), "B");
}

/// A non-chain set of present characters is not validated; the final
/// entry still wins.
#[test]
fn choose_label_trusts_order_on_inconsistent_chains() {
    let list = vec!["A".to_string(), "B.1.3".to_string()];
    assert_eq!(choose_label(&list), "B.1.3");
}
