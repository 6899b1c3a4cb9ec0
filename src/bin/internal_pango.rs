use anyhow::Result;
use clap::Parser;
use mimalloc::MiMalloc;
use pango_infer::cli::InferArgs;
use pango_infer::{pipeline, FitchReconstructor, ReconstructionOptions};
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> Result<()> {
    let args = InferArgs::parse();

    // Initialize tracing subscriber
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if args.quiet {
            EnvFilter::new("warn")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let solver = FitchReconstructor::new(ReconstructionOptions::default());
    let summary = pipeline::run(&args, &solver)?;
    tracing::info!(
        designated = summary.designated,
        tips_with_lineage = summary.tips_with_lineage,
        lineages = summary.lineages,
        characters = summary.characters,
        nodes = summary.nodes,
        blanked = summary.blanked,
        "internal-pango: inference complete"
    );
    Ok(())
}
