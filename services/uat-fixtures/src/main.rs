//! UAT Fixtures - freeze decoded dump978 frames into C test data
//!
//! Replays recorded decoder output, captures up to `--capacity` frames per
//! message kind and writes `<basename>.c` / `<basename>.h` for the decoder's
//! unit test suite.

use anyhow::{Context, Result};
use clap::Parser;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use uat_fixtures::emit::render;
use uat_fixtures::{Config, Pipeline, RunOutcome};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("uat_fixtures=info")),
        )
        .with_target(false)
        .init();

    let config = Config::parse();

    info!("===========================================");
    info!("   UAT Fixtures - dump978 test data");
    info!("===========================================");

    info!("Configuration:");
    info!("  Input: {}", config.input.display());
    info!("  Output directory: {}", config.output_dir.display());
    info!("  Basename: {}", config.basename);
    info!("  Capacity: {} per message kind", config.capacity);

    let reader: Box<dyn AsyncBufRead + Unpin> = match config.input_path() {
        Some(path) => {
            let file = File::open(path)
                .await
                .with_context(|| format!("Failed to open input {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => {
            info!("Reading decoder output from stdin, press Ctrl+C to stop early");
            Box::new(BufReader::new(tokio::io::stdin()))
        }
    };

    let mut pipeline = Pipeline::new(config.capacity);
    let outcome = pipeline
        .run(reader, tokio::signal::ctrl_c())
        .await
        .context("Failed to read decoder output")?;

    if outcome == RunOutcome::Cancelled {
        warn!("Capture interrupted, writing what was captured so far");
    }
    info!("[Capture] {}", pipeline.stats());

    let store = pipeline.into_store();
    let artifact = render(&store, &config.basename).context("Failed to render fixtures")?;
    let (source, header) = artifact
        .write_to(&config.output_dir)
        .await
        .context("Failed to write fixtures")?;

    info!("===========================================");
    info!("  Generated:");
    info!("    {}", source.display());
    info!("    {}", header.display());
    info!("  Downlink fixtures: {}", store.downlink.len());
    info!("  Uplink fixtures: {}", store.uplink.len());
    info!("===========================================");
    info!(
        "Include {}.h in the test suite and compile {}.c alongside it.",
        config.basename, config.basename
    );
    info!("Use uat_test_hex_to_bytes() to turn frame_data_hex back into raw bytes.");

    Ok(())
}
