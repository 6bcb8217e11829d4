//! Per-URL outcome model and the end-of-run JSON writer.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Data extracted from a single comment page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedData {
    pub content: String,
    /// `datetime` attribute of the comment's timestamp element, if present.
    pub datetime: Option<String>,
    pub source_url: String,
}

/// Why a URL produced no data. Failures are recorded per kind so tests and
/// logs can tell a dead page from a layout change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScrapeFailure {
    #[error("navigation failed: {0}")]
    Navigation(String),
    #[error("content container did not appear within {0:?}")]
    ContentTimeout(Duration),
    #[error("failed to read comment from page: {0}")]
    Extraction(String),
    #[error("no anchor elements found for the capture region")]
    NoAnchors,
    #[error("screenshot capture failed: {0}")]
    Screenshot(String),
}

/// Outcome of scraping one URL.
pub type ScrapeOutcome = std::result::Result<ExtractedData, ScrapeFailure>;

/// One entry of the output file: `{ "id": N, "data": {...} | null }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeRecord {
    pub id: u32,
    pub data: Option<ExtractedData>,
}

/// Fold per-URL outcomes into the ordered record list.
///
/// Ids continue the numbering of the previous run: record ids form the
/// contiguous range `offset+1 ..= offset+N` for N outcomes, failures
/// included.
#[must_use]
pub fn to_records(outcomes: Vec<ScrapeOutcome>, offset: u32) -> Vec<ScrapeRecord> {
    outcomes
        .into_iter()
        .enumerate()
        .map(|(index, outcome)| ScrapeRecord {
            id: offset + 1 + index as u32,
            data: outcome.ok(),
        })
        .collect()
}

/// Write the full record list as pretty-printed JSON.
///
/// Called exactly once, after the loop; there is no incremental
/// checkpointing.
pub async fn write_results(path: &Path, records: &[ScrapeRecord]) -> Result<()> {
    let json = serde_json::to_vec_pretty(records).context("Failed to serialize results")?;
    tokio::fs::write(path, &json)
        .await
        .with_context(|| format!("Failed to write results to {}", path.display()))?;
    info!(path = %path.display(), records = records.len(), "Results written");
    Ok(())
}
