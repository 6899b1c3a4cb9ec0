use anyhow::Result;
use clap::Parser;
use mimalloc::MiMalloc;
use pango_infer::clades::{self, NodeFile};
use pango_infer::cli::OverwriteArgs;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> Result<()> {
    let args = OverwriteArgs::parse();

    // Initialize tracing subscriber
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if args.quiet {
            EnvFilter::new("warn")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut clade_file = NodeFile::from_path(&args.clades)?;
    let lineage_file = NodeFile::from_path(&args.internal_pango)?;
    let overwritten = clades::overwrite_recombinants(&mut clade_file, &lineage_file);
    clade_file.write(&args.output)?;
    tracing::info!(
        nodes = clade_file.nodes.len(),
        overwritten,
        "overwrite-recombinant-clades: complete"
    );
    Ok(())
}
