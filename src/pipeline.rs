use crate::aliasor::Aliasor;
use crate::ancestral::AncestralReconstruction;
use crate::cli::InferArgs;
use crate::designations::{self, Designation};
use crate::encoding::{choose_label, CharacterIndex, FeatureVector};
use crate::newick::{self, Tree};
use crate::outgroup::OutgroupFilter;
use crate::types::{HashMap as AHashMap, HashMapExt, HashSet as AHashSet};
use anyhow::{Context, Result};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::Path;

// Aliases the partiallyAliased output field may stay compressed under.
const PARTIAL_ALIAS_ACCEPTED: &[&str] = &["BA"];

#[derive(Debug, Default)]
pub struct Summary {
    pub designated: u64,
    pub tips_with_lineage: u64,
    pub lineages: u64,
    pub characters: u64,
    pub nodes: u64,
    pub blanked: u64,
}

/// Final labels for one tree node, projected into the output JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeLabels {
    pub lineage: String,
    pub partially_aliased: String,
}

/// Run the lineage-inference pipeline end to end: load inputs, infer a
/// label per node, write the node JSON.
pub fn run(args: &InferArgs, solver: &dyn AncestralReconstruction) -> Result<Summary> {
    let aliasor = Aliasor::from_path(&args.alias)?;
    let mut taxa = designations::load_designations(&args.designations)?;
    if let Some(path) = &args.synthetic {
        taxa.extend(designations::load_synthetic(path)?);
    }
    let mut tree = newick::parse_newick_file(&args.tree)?;

    let mut summary = Summary { designated: taxa.len() as u64, ..Summary::default() };
    let nodes = infer(&mut tree, taxa, &aliasor, &args.build_name, solver, &mut summary)?;
    write_node_json(&args.output, &nodes, &args.field_name)?;
    Ok(summary)
}

/// In-memory core of the pipeline: designations in, per-node labels out.
///
/// Unnamed internal nodes are given synthetic names first so every node
/// can key the result. The character index is built once from the
/// finalized taxon set (tips of this tree only, synthetic entries
/// included) and then shared by encode and decode; vectors must never be
/// interpreted against a different index.
pub fn infer(
    tree: &mut Tree,
    taxa: Vec<Designation>,
    aliasor: &Aliasor,
    build_name: &str,
    solver: &dyn AncestralReconstruction,
    summary: &mut Summary,
) -> Result<BTreeMap<String, NodeLabels>> {
    newick::name_unnamed_internals(tree);

    // Keep only designations naming a tree tip; later entries win on
    // duplicate strain ids.
    let tips: AHashSet<&str> = tree.tip_names().into_iter().collect();
    let mut lineage_by_strain: AHashMap<String, String> = AHashMap::new();
    for taxon in taxa {
        if tips.contains(taxon.strain.as_str()) {
            lineage_by_strain.insert(taxon.strain, taxon.lineage);
        }
    }
    summary.tips_with_lineage = lineage_by_strain.len() as u64;

    let unaliased: AHashMap<String, String> = lineage_by_strain
        .into_iter()
        .map(|(strain, lineage)| (strain, aliasor.uncompress(&lineage)))
        .collect();

    let distinct: BTreeSet<&str> = unaliased.values().map(String::as_str).collect();
    summary.lineages = distinct.len() as u64;
    tracing::info!(lineages = distinct.len(), "lineages present in tree tips");

    let index = CharacterIndex::from_lineages(distinct);
    summary.characters = index.len() as u64;

    let tip_vectors: HashMap<String, FeatureVector> = unaliased
        .iter()
        .map(|(strain, lineage)| (strain.clone(), index.encode(lineage)))
        .collect();

    let vectors = solver.reconstruct(tree, &tip_vectors, index.len())?;

    let filter = OutgroupFilter::for_build(build_name);
    let mut nodes = BTreeMap::new();
    for (idx, node) in tree.nodes.iter().enumerate() {
        let reconstructed = choose_label(&index.decode(&vectors[idx]));
        let lineage = aliasor.compress(&reconstructed)?;
        let partially_aliased = aliasor.partial_compress(&reconstructed, PARTIAL_ALIAS_ACCEPTED);

        let kept = filter.apply(aliasor, &lineage);
        if kept.is_empty() && !lineage.is_empty() {
            summary.blanked += 1;
        }
        nodes.insert(
            node.name.clone(),
            NodeLabels {
                lineage: kept,
                partially_aliased: filter.apply(aliasor, &partially_aliased),
            },
        );
    }
    summary.nodes = nodes.len() as u64;
    Ok(nodes)
}

/// Write `{"nodes": {<node>: {<field_name>: ..., "partiallyAliased": ...}}}`
/// as 2-space-indented JSON.
pub fn write_node_json(
    path: &Path,
    nodes: &BTreeMap<String, NodeLabels>,
    field_name: &str,
) -> Result<()> {
    let mut node_map = serde_json::Map::new();
    for (name, labels) in nodes {
        let mut record = serde_json::Map::new();
        record.insert(
            field_name.to_string(),
            serde_json::Value::String(labels.lineage.clone()),
        );
        record.insert(
            "partiallyAliased".to_string(),
            serde_json::Value::String(labels.partially_aliased.clone()),
        );
        node_map.insert(name.clone(), serde_json::Value::Object(record));
    }
    let doc = serde_json::json!({ "nodes": node_map });

    let file = File::create(path)
        .with_context(|| format!("failed to create output {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &doc)?;
    writeln!(writer)?;
    Ok(())
}
