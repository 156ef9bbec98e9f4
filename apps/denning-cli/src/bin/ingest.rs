use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use denning_ingest::Ingestor;
use denning_vector::VectorDb;

#[derive(Parser)]
#[command(name = "denning-ingest")]
#[command(about = "Fetch a legislation page and add its text to the vector database", long_about = None)]
#[command(version)]
struct Cli {
    /// Page to ingest, e.g. https://www.legislation.gov.uk/ukpga/1968/60
    url: String,

    /// Configuration file (default: config.toml layered with config.<RUST_ENV>.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    denning_cli::init_tracing();

    let settings = denning_cli::load_settings(cli.config.as_deref()).context("loading configuration")?;
    info!("Initializing database for ingestion...");
    let store = VectorDb::from_settings(&settings).context("opening the vector database")?.with_progress(true);
    let ingestor = Ingestor::from_settings(&settings, Box::new(store))?;

    let report = ingestor.ingest_url(&cli.url).with_context(|| format!("ingesting {}", cli.url))?;
    let total = ingestor.store().count()?;
    println!(
        "Ingested {} chunks from {} ({} .. {}); collection now holds {} entries",
        report.chunks,
        report.source,
        report.ids.first().map(String::as_str).unwrap_or("-"),
        report.ids.last().map(String::as_str).unwrap_or("-"),
        total
    );
    Ok(())
}
