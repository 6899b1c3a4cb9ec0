/// Expand a dotted Pango lineage name into its full ancestor chain,
/// shortest to longest, the name itself included.
///
/// `hierarchy("A.B.C.D.E")` returns
/// `["A", "A.B", "A.B.C", "A.B.C.D", "A.B.C.D.E"]`; a single-component
/// name returns a one-element list.
pub fn hierarchy(lineage: &str) -> Vec<String> {
    let parts: Vec<&str> = lineage.split('.').collect();
    (1..=parts.len()).map(|i| parts[..i].join(".")).collect()
}
