use crate::encoding::{FeatureVector, State};
use crate::newick::Tree;
use anyhow::{anyhow, Result};
use std::collections::HashMap;

/// Options shared by ancestral reconstruction backends.
#[derive(Debug, Clone, Copy)]
pub struct ReconstructionOptions {
    /// Marginal (per-node posterior) vs joint reconstruction. Backends
    /// without the distinction may ignore it.
    pub marginal: bool,
    /// When false, tips that supplied a vector echo it back verbatim;
    /// when true they pass through reconstruction like every other node.
    /// Tips with no input vector are always imputed.
    pub reconstruct_tip_states: bool,
}

impl Default for ReconstructionOptions {
    fn default() -> Self {
        Self { marginal: false, reconstruct_tip_states: true }
    }
}

/// Boundary to the ancestral-state solver: given the tree topology and
/// per-tip feature vectors (tips absent from the map are fully missing
/// data, not all-absent), produce one reconstructed vector per tree node,
/// indexed like `tree.nodes`.
pub trait AncestralReconstruction {
    fn reconstruct(
        &self,
        tree: &Tree,
        tip_vectors: &HashMap<String, FeatureVector>,
        width: usize,
    ) -> Result<Vec<FeatureVector>>;
}

/// Per-site Fitch parsimony over the two-state membership alphabet.
///
/// Missing tips start with the full state set, so large numbers of
/// undesignated tips are imputed from their neighborhood rather than
/// dragged to all-absent. Parsimony has no marginal/joint distinction;
/// `options.marginal` is accepted and ignored.
pub struct FitchReconstructor {
    pub options: ReconstructionOptions,
}

// State sets as bitmasks over {Absent, Present}.
const SET_ABSENT: u8 = 0b01;
const SET_PRESENT: u8 = 0b10;
const SET_BOTH: u8 = 0b11;

impl FitchReconstructor {
    pub fn new(options: ReconstructionOptions) -> Self {
        Self { options }
    }

    fn reconstruct_site(
        &self,
        tree: &Tree,
        postorder: &[usize],
        preorder: &[usize],
        tip_states: &[Option<State>],
        out: &mut [State],
    ) {
        let mut sets = vec![0u8; tree.nodes.len()];

        // Upward pass: leaves seed their observed state (or the full set
        // when missing); internal nodes take the intersection of their
        // children, falling back to the union when it is empty.
        for &idx in postorder {
            if tree.is_leaf(idx) {
                sets[idx] = match tip_states[idx] {
                    Some(State::Absent) => SET_ABSENT,
                    Some(State::Present) => SET_PRESENT,
                    None => SET_BOTH,
                };
            } else {
                let mut intersection = SET_BOTH;
                let mut union = 0u8;
                for &child in &tree.nodes[idx].children {
                    intersection &= sets[child];
                    union |= sets[child];
                }
                sets[idx] = if intersection != 0 { intersection } else { union };
            }
        }

        // Downward pass: keep the parent's state when the local set allows
        // it; ties at the root resolve to Absent so an uninformative
        // column decodes to no lineage.
        for &idx in preorder {
            let inherited = tree.nodes[idx].parent.map(|p| out[p]);
            out[idx] = pick_state(sets[idx], inherited);
        }

        if !self.options.reconstruct_tip_states {
            for (idx, state) in tip_states.iter().enumerate() {
                if let Some(observed) = state {
                    out[idx] = *observed;
                }
            }
        }
    }
}

impl AncestralReconstruction for FitchReconstructor {
    fn reconstruct(
        &self,
        tree: &Tree,
        tip_vectors: &HashMap<String, FeatureVector>,
        width: usize,
    ) -> Result<Vec<FeatureVector>> {
        // Input vectors keyed by node index; width mismatches are a
        // programming error upstream and fail loudly.
        let mut by_node: Vec<Option<&FeatureVector>> = vec![None; tree.nodes.len()];
        for (idx, node) in tree.nodes.iter().enumerate() {
            if tree.is_leaf(idx) {
                if let Some(vector) = tip_vectors.get(&node.name) {
                    if vector.len() != width {
                        return Err(anyhow!(
                            "tip {}: vector width {} != character count {width}",
                            node.name,
                            vector.len()
                        ));
                    }
                    by_node[idx] = Some(vector);
                }
            }
        }

        let postorder = tree.postorder();
        let preorder = tree.preorder();
        let mut vectors = vec![vec![State::Absent; width]; tree.nodes.len()];
        let mut tip_states = vec![None; tree.nodes.len()];
        let mut site = vec![State::Absent; tree.nodes.len()];

        for s in 0..width {
            for (idx, input) in by_node.iter().enumerate() {
                tip_states[idx] = input.map(|v| v[s]);
            }
            self.reconstruct_site(tree, &postorder, &preorder, &tip_states, &mut site);
            for (idx, &state) in site.iter().enumerate() {
                vectors[idx][s] = state;
            }
        }
        Ok(vectors)
    }
}

fn pick_state(set: u8, inherited: Option<State>) -> State {
    match set {
        SET_ABSENT => State::Absent,
        SET_PRESENT => State::Present,
        _ => match inherited {
            Some(state) => state,
            None => State::Absent,
        },
    }
}
