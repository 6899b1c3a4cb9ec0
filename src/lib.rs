//! pango-infer: assign Pango lineages to every node of a phylogenetic tree
//! and propagate recombinant clade labels.
//!
//! # Library usage
//!
//! ```no_run
//! use pango_infer::{Aliasor, FitchReconstructor, ReconstructionOptions};
//! use pango_infer::designations::Designation;
//! use pango_infer::pipeline::{infer, Summary};
//!
//! // let aliasor = Aliasor::from_path(alias_json_path)?;
//! // let mut tree = pango_infer::newick::parse_newick_file(tree_path)?;
//! // let taxa: Vec<Designation> = /* designation CSV + synthetic strains */;
//! //
//! // let solver = FitchReconstructor::new(ReconstructionOptions::default());
//! // let mut summary = Summary::default();
//! // let nodes = infer(&mut tree, taxa, &aliasor, "21L", &solver, &mut summary)?;
//! ```

pub(crate) mod types;

pub mod aliasor;
pub mod ancestral;
pub mod clades;
pub mod cli;
pub mod designations;
pub mod encoding;
pub mod lineage;
pub mod newick;
pub mod outgroup;
pub mod pipeline;

// Flat re-exports for the most commonly used public types.
pub use aliasor::Aliasor;
pub use ancestral::{AncestralReconstruction, FitchReconstructor, ReconstructionOptions};
pub use encoding::{choose_label, CharacterIndex, FeatureVector, State, FALLBACK_LINEAGE};
pub use lineage::hierarchy;
pub use newick::{parse_newick, Tree};
pub use outgroup::OutgroupFilter;
