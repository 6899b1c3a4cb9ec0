use crate::lineage::hierarchy;
use crate::types::{HashMap, HashMapExt};
use std::collections::BTreeSet;

/// Label used when a reconstructed vector carries no lineage at all.
pub const FALLBACK_LINEAGE: &str = "B";

/// Per-position membership state of a feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Absent,
    Present,
}

/// Fixed-width membership vector, one slot per character of a
/// [`CharacterIndex`]. Slot `i` is `Present` iff the taxon's lineage
/// hierarchy contains the character at position `i`.
pub type FeatureVector = Vec<State>;

/// Frozen bijection between hierarchy characters and vector positions.
///
/// Built exactly once per run from the finalized taxon set; encoding or
/// decoding against a recomputed index would silently shift the meaning
/// of every existing vector, so the index is immutable and shared by the
/// encoder and the decoder.
pub struct CharacterIndex {
    characters: Vec<String>,
    positions: HashMap<String, usize>,
}

impl CharacterIndex {
    /// Collect every hierarchy prefix of every lineage, sorted, and fix
    /// the position mapping from the sorted order.
    pub fn from_lineages<'a, I>(lineages: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut set = BTreeSet::new();
        for lineage in lineages {
            set.extend(hierarchy(lineage));
        }
        let characters: Vec<String> = set.into_iter().collect();
        let mut positions = HashMap::with_capacity(characters.len());
        for (pos, character) in characters.iter().enumerate() {
            positions.insert(character.clone(), pos);
        }
        Self { characters, positions }
    }

    /// Vector width (number of distinct characters).
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Character at vector position `pos`.
    pub fn character(&self, pos: usize) -> &str {
        &self.characters[pos]
    }

    /// Encode a lineage as a feature vector: all slots `Absent` except
    /// those named by the lineage's hierarchy. Hierarchy prefixes not in
    /// the index are ignored; they cannot occur when the index was built
    /// from the same taxon set.
    pub fn encode(&self, lineage: &str) -> FeatureVector {
        let mut vector = vec![State::Absent; self.characters.len()];
        for character in hierarchy(lineage) {
            if let Some(&pos) = self.positions.get(&character) {
                vector[pos] = State::Present;
            }
        }
        vector
    }

    /// Decode a vector back to the lineages marked `Present`, in position
    /// order. Characters sort lexicographically and a prefix sorts before
    /// its extensions, so parents always precede children in the result.
    pub fn decode(&self, vector: &[State]) -> Vec<String> {
        vector
            .iter()
            .enumerate()
            .filter(|(_, &state)| state == State::Present)
            .map(|(pos, _)| self.characters[pos].clone())
            .collect()
    }
}

/// Pick the single best label from a decoded lineage list: the last
/// (most specific) entry, or [`FALLBACK_LINEAGE`] when the list is empty.
///
/// When reconstruction yields a set of present characters that is not a
/// clean parent chain, the list is not validated; the final entry wins.
/// This is deliberate, long-standing behavior that downstream consumers
/// rely on.
pub fn choose_label(lineages: &[String]) -> String {
    match lineages.last() {
        Some(label) => label.clone(),
        None => FALLBACK_LINEAGE.to_string(),
    }
}
