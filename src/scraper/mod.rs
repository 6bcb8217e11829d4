//! Sequential scraping pipeline: one browser, one page, one URL at a time.

pub mod browser;
pub mod capture;
pub mod navigator;

pub use browser::BrowserSession;

use chromiumoxide::page::Page;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::results::{self, ScrapeFailure, ScrapeOutcome, ScrapeRecord};

/// Visit every URL in order and fold the outcomes into the record list.
///
/// No failure aborts the loop; each URL yields exactly one record, so the
/// output always has one entry per input URL with ids contiguous from
/// `id_offset + 1`.
pub async fn scrape_all(session: &BrowserSession, urls: &[&str], config: &Config) -> Vec<ScrapeRecord> {
    let mut outcomes: Vec<ScrapeOutcome> = Vec::with_capacity(urls.len());

    for (index, &url) in urls.iter().enumerate() {
        let id = config.id_offset + 1 + index as u32;
        let outcome = scrape_one(session.page(), url, id, config).await;

        match &outcome {
            Ok(data) => info!(url, id, datetime = ?data.datetime, "Comment archived"),
            Err(ScrapeFailure::Navigation(e)) => error!(url, id, error = %e, "Navigation failed"),
            Err(e) => warn!(url, id, error = %e, "Extraction failed"),
        }

        outcomes.push(outcome);

        // Pace navigations so the site sees a gap between page loads.
        if index + 1 < urls.len() && !config.iteration_delay.is_zero() {
            tokio::time::sleep(config.iteration_delay).await;
        }
    }

    results::to_records(outcomes, config.id_offset)
}

async fn scrape_one(page: &Page, url: &str, id: u32, config: &Config) -> ScrapeOutcome {
    navigator::navigate(page, url, config.nav_timeout).await?;
    navigator::prepare_page(page).await;
    capture::extract_and_capture(page, url, id, config).await
}
