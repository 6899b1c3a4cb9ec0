use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "internal-pango",
    about = "Infer a Pango lineage for every node of a phylogenetic tree",
    version
)]
pub struct InferArgs {
    /// Lineage designation table (CSV: strain id in column 0, `lineage` column)
    #[arg(long = "designations", value_name = "CSV")]
    pub designations: PathBuf,

    /// Synthetic placeholder strains, one lineage per line
    #[arg(long = "synthetic", value_name = "TXT")]
    pub synthetic: Option<PathBuf>,

    /// Input tree (Newick)
    #[arg(long = "tree", value_name = "NWK")]
    pub tree: PathBuf,

    /// Pango alias key table (JSON)
    #[arg(long = "alias", value_name = "JSON")]
    pub alias: PathBuf,

    /// Build name; "21L" and "22F" restrict output to their outgroup region
    #[arg(long = "build-name")]
    pub build_name: String,

    /// Output node JSON path
    #[arg(long = "output", value_name = "JSON")]
    pub output: PathBuf,

    /// Name of the inferred-lineage field in the output
    #[arg(long = "field-name", default_value = "inferred_lineage")]
    pub field_name: String,

    /// Set logging level to WARN
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

#[derive(Parser, Debug)]
#[command(
    name = "overwrite-recombinant-clades",
    about = "Overwrite clade membership with \"recombinant\" for recombinant nodes",
    version
)]
pub struct OverwriteArgs {
    /// Clade node JSON to rewrite
    #[arg(long = "clades", value_name = "JSON")]
    pub clades: PathBuf,

    /// Node JSON with inferred lineages (the internal-pango output)
    #[arg(long = "internal-pango", value_name = "JSON")]
    pub internal_pango: PathBuf,

    /// Output clade JSON path
    #[arg(long = "output", value_name = "JSON")]
    pub output: PathBuf,

    /// Set logging level to WARN
    #[arg(short = 'q', long)]
    pub quiet: bool,
}
