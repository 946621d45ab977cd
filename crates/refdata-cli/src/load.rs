//! # load-csv Subcommand
//!
//! Uploads a CSV file to the backend's load job, replacing every element of
//! the named structure.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use refdata_client::RefDataClient;

/// Arguments for the `refdata load-csv` subcommand.
#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Exact name of the target structure.
    pub structure_name: String,
    /// CSV file whose first row holds the field names.
    pub file: PathBuf,
}

pub async fn run_load<W: Write>(args: &LoadArgs, client: &RefDataClient, out: &mut W) -> Result<u8> {
    let body = std::fs::read(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    tracing::debug!(file = %args.file.display(), bytes = body.len(), "uploading CSV");

    let summary = client
        .jobs()
        .load_csv(&args.structure_name, body)
        .await
        .map_err(|e| {
            let detail = e.detail();
            anyhow::Error::new(e).context(detail.unwrap_or_else(|| "CSV load failed".to_string()))
        })?;

    writeln!(
        out,
        "Loaded {} elements into '{}' ({}), replacing {}.",
        summary.inserted_count, args.structure_name, summary.structure_id, summary.deleted_count
    )?;
    Ok(0)
}
