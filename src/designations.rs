use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// A designated taxon: strain id plus its raw (possibly aliased) lineage.
#[derive(Debug, Clone)]
pub struct Designation {
    pub strain: String,
    pub lineage: String,
}

/// Load the designation table: a headered CSV whose first column is the
/// strain id and whose `lineage` column (located by header name) is the
/// raw lineage label.
pub fn load_designations(path: &Path) -> Result<Vec<Designation>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open designations {}", path.display()))?;
    let headers = reader.headers()?.clone();
    let lineage_col = headers
        .iter()
        .position(|h| h == "lineage")
        .ok_or_else(|| anyhow!("designations {}: no 'lineage' column", path.display()))?;

    let mut designations = Vec::new();
    for result in reader.records() {
        let record = result?;
        let strain = record
            .get(0)
            .ok_or_else(|| anyhow!("designations {}: empty record", path.display()))?;
        let lineage = record
            .get(lineage_col)
            .ok_or_else(|| anyhow!("designations {}: short record for {strain}", path.display()))?;
        designations.push(Designation {
            strain: strain.to_string(),
            lineage: lineage.to_string(),
        });
    }
    Ok(designations)
}

/// Load the synthetic strain list: plain text, one lineage per line. Each
/// line yields a placeholder taxon named after its own lineage, so the
/// corresponding tree tip carries the lineage as its label.
pub fn load_synthetic(path: &Path) -> Result<Vec<Designation>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open synthetic strains {}", path.display()))?;
    let mut designations = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        let lineage = line.trim();
        if lineage.is_empty() {
            continue;
        }
        designations.push(Designation {
            strain: lineage.to_string(),
            lineage: lineage.to_string(),
        });
    }
    Ok(designations)
}
