use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write as _};
use std::path::Path;

/// Field consulted in the lineage map for recombinant ancestry.
pub const LINEAGE_LOOKUP_FIELD: &str = "Nextclade_pango";
/// Prefix marking recombinant node ids and lineage names.
pub const RECOMBINANT_PREFIX: &str = "X";
/// Label written into `clade_membership` for recombinant nodes.
pub const RECOMBINANT_LABEL: &str = "recombinant";

/// An augur-style node JSON: `{"nodes": {<id>: {...}}}`. Unknown
/// per-node fields are preserved verbatim across a read/write cycle.
#[derive(Debug, Serialize, Deserialize)]
pub struct NodeFile {
    pub nodes: BTreeMap<String, NodeAnnotations>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct NodeAnnotations {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clade_membership: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl NodeFile {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open node JSON {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("malformed node JSON {}", path.display()))
    }

    /// Write as 2-space-indented JSON.
    pub fn write(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("failed to create output {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        Ok(())
    }

    // Lineage recorded for `node`, empty when the node or the field is
    // missing. Absence is not an error: most internal nodes of the clade
    // file simply never got a lineage.
    fn lineage_of(&self, node: &str) -> &str {
        self.nodes
            .get(node)
            .and_then(|annotations| annotations.extra.get(LINEAGE_LOOKUP_FIELD))
            .and_then(|value| value.as_str())
            .unwrap_or("")
    }
}

/// Set `clade_membership` to `"recombinant"` for every clade node whose id
/// starts with `X` or whose lineage in `lineages` starts with `X`. All
/// other annotations pass through untouched. Returns the number of nodes
/// overwritten; re-running on the output is a no-op beyond re-writing the
/// same label.
pub fn overwrite_recombinants(clades: &mut NodeFile, lineages: &NodeFile) -> u64 {
    let mut overwritten = 0;
    for (node, annotations) in clades.nodes.iter_mut() {
        if node.starts_with(RECOMBINANT_PREFIX)
            || lineages.lineage_of(node).starts_with(RECOMBINANT_PREFIX)
        {
            annotations.clade_membership = Some(RECOMBINANT_LABEL.to_string());
            overwritten += 1;
        }
    }
    overwritten
}
