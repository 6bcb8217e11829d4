//! Page navigation and pre-capture cleanup.
//!
//! Navigation is bounded by a timeout and maps any error to a
//! [`ScrapeFailure::Navigation`]; the caller records a null result and moves
//! on. Overlay dismissal and spacer injection are best-effort: an absent
//! overlay is a no-op, and a failed click only gets a debug log.

use std::time::Duration;

use chromiumoxide::error::CdpError;
use chromiumoxide::page::Page;
use tracing::debug;

use crate::constants::{
    AD_CLOSE_BUTTON, APP_PROMPT_BUTTON, APP_PROMPT_LABEL, COOKIE_BUTTON, COOKIE_BUTTON_LABEL,
    SPACER_SCRIPT,
};
use crate::results::ScrapeFailure;

/// Navigate the shared page to `url`, bounded by `timeout`.
pub async fn navigate(page: &Page, url: &str, timeout: Duration) -> Result<(), ScrapeFailure> {
    let nav = async {
        page.goto(url).await?;
        page.wait_for_navigation().await?;
        Ok::<(), CdpError>(())
    };

    match tokio::time::timeout(timeout, nav).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(ScrapeFailure::Navigation(e.to_string())),
        Err(_) => Err(ScrapeFailure::Navigation(format!(
            "timed out after {timeout:?}"
        ))),
    }
}

/// Dismiss known overlays and pad the page bottom, all best-effort.
pub async fn prepare_page(page: &Page) {
    dismiss_overlay(page, COOKIE_BUTTON, Some(COOKIE_BUTTON_LABEL), "cookie consent").await;
    dismiss_overlay(page, APP_PROMPT_BUTTON, Some(APP_PROMPT_LABEL), "app promotion").await;
    dismiss_overlay(page, AD_CLOSE_BUTTON, None, "ad banner").await;
    inject_spacer(page).await;
}

/// Click the first visible element matching `selector` (and, when given,
/// whose text contains `label`). Absence is a no-op.
async fn dismiss_overlay(page: &Page, selector: &str, label: Option<&str>, what: &str) {
    let Ok(candidates) = page.find_elements(selector).await else {
        return;
    };

    for element in candidates {
        if let Some(want) = label {
            match element.inner_text().await {
                Ok(Some(text)) if text.contains(want) => {}
                _ => continue,
            }
        }

        match element.click().await {
            Ok(_) => {
                debug!(overlay = what, "Overlay dismissed");
                return;
            }
            Err(e) => debug!(overlay = what, error = %e, "Overlay click failed"),
        }
    }
}

/// Append the transparent spacer that keeps lazy-loaded ads below the fold
/// from shifting the comment region.
async fn inject_spacer(page: &Page) {
    match page.evaluate(SPACER_SCRIPT).await {
        Ok(_) => debug!("Spacer injected"),
        Err(e) => debug!(error = %e, "Failed to inject spacer"),
    }
}
