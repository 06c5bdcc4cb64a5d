// Headless one-shot mode
//
// `soundsense FILE` analyzes a single file without the TUI and prints the
// results to stdout. Uses the same client and the same result wording as the
// interactive session.

use crate::client::AnalysisClient;
use crate::config::Config;
use crate::session::{COMPLETED_MESSAGE, PROCESSING_MESSAGE};
use anyhow::{ensure, Context, Result};
use std::path::Path;
use std::time::Duration;

/// Analyze one file and print transcript and speaker count
pub async fn run(config: &Config, path: &Path) -> Result<()> {
    ensure!(path.is_file(), "Not a file: {}", path.display());

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("File has no valid name")?
        .to_string();

    let client = AnalysisClient::new(
        &config.service_base_url,
        Duration::from_secs(config.request_timeout_secs),
    )?;

    println!("{}", PROCESSING_MESSAGE);
    let result = client.analyze(path, &file_name).await?;

    println!("{}", COMPLETED_MESSAGE);
    println!("Transcript: {}", result.transcript);
    println!("Estimated number of speakers: {}", result.num_speakers);
    if let Some(duration) = result.duration {
        println!("Audio duration: {:.1}s", duration);
    }

    Ok(())
}
