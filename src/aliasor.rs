use crate::types::{HashMap, HashMapExt};
use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Expands and compresses Pango alias names against an alias key table.
///
/// The table maps alias -> fully qualified prefix (e.g. `"BA"` ->
/// `"B.1.1.529"`). Top-level lineages carry an empty value and recombinant
/// `X*` aliases carry a list of parents; both map to themselves and are
/// never expanded.
pub struct Aliasor {
    alias_map: HashMap<String, String>,
    realias_map: HashMap<String, String>,
}

impl Aliasor {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open alias table {}", path.display()))?;
        let table: HashMap<String, serde_json::Value> = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("malformed alias table {}", path.display()))?;
        Self::from_table(table)
    }

    /// Build from alias-table JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let table: HashMap<String, serde_json::Value> =
            serde_json::from_str(text).context("malformed alias table")?;
        Self::from_table(table)
    }

    fn from_table(table: HashMap<String, serde_json::Value>) -> Result<Self> {
        let mut alias_map = HashMap::with_capacity(table.len());
        let mut realias_map = HashMap::with_capacity(table.len());
        for (alias, value) in table {
            match value {
                serde_json::Value::String(full) if !full.is_empty() => {
                    realias_map.insert(full.clone(), alias.clone());
                    alias_map.insert(alias, full);
                }
                // Top-level lineages ("") and recombinants (parent list)
                // keep their own name.
                serde_json::Value::String(_) | serde_json::Value::Array(_) => {
                    alias_map.insert(alias.clone(), alias);
                }
                other => {
                    return Err(anyhow!(
                        "alias {alias}: expected string or list, got {other}"
                    ));
                }
            }
        }
        Ok(Self { alias_map, realias_map })
    }

    /// Expand the aliased head of `name` to its fully qualified form.
    /// Names whose head is not in the table pass through unchanged.
    pub fn uncompress(&self, name: &str) -> String {
        let (head, rest) = match name.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (name, None),
        };
        let Some(full) = self.alias_map.get(head) else {
            return name.to_string();
        };
        match rest {
            Some(rest) => format!("{full}.{rest}"),
            None => full.clone(),
        }
    }

    /// Compress a fully qualified name down to its deepest alias.
    ///
    /// Pango names carry at most three numeric levels below an alias, so
    /// with `levels` dots the first `3 * ((levels - 1) / 3) + 1` components
    /// must be covered by an alias. Errors if the table has no alias for
    /// that prefix.
    pub fn compress(&self, name: &str) -> Result<String> {
        let parts: Vec<&str> = name.split('.').collect();
        let indirections = Self::indirections(parts.len());
        if indirections == 0 {
            return Ok(name.to_string());
        }
        let cut = 3 * indirections + 1;
        let prefix = parts[..cut].join(".");
        let alias = self
            .realias_map
            .get(&prefix)
            .ok_or_else(|| anyhow!("no alias covers prefix {prefix} of {name}"))?;
        Ok(format!("{}.{}", alias, parts[cut..].join(".")))
    }

    /// Compress using only aliases from `accepted`, deepest level first.
    /// Returns the name unchanged when no accepted alias applies.
    pub fn partial_compress(&self, name: &str, accepted: &[&str]) -> String {
        let parts: Vec<&str> = name.split('.').collect();
        for level in (1..=Self::indirections(parts.len())).rev() {
            let cut = 3 * level + 1;
            let prefix = parts[..cut].join(".");
            if let Some(alias) = self.realias_map.get(&prefix) {
                if accepted.contains(&alias.as_str()) {
                    return format!("{}.{}", alias, parts[cut..].join("."));
                }
            }
        }
        name.to_string()
    }

    // Number of alias indirections needed for a name with `components`
    // dotted components.
    fn indirections(components: usize) -> usize {
        let levels = components.saturating_sub(1);
        if levels == 0 {
            0
        } else {
            (levels - 1) / 3
        }
    }
}
