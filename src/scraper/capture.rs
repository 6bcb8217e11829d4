//! Comment extraction and cropped screenshot capture.
//!
//! Waits for the page's content container, reads the comment text and
//! timestamp, measures the sticky headers, unions the anchor bounding boxes
//! into a capture rectangle, scrolls it below the headers, and saves a JPEG
//! crop as `<id>.jpg` in the image directory.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use base64::Engine as _;
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, CaptureScreenshotParams, Viewport,
};
use chromiumoxide::page::Page;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::constants::{
    ANCHOR_SELECTORS, COMMENT_TIMESTAMP, CONTENT_BLOCK, READY_CONTAINER, STICKY_HEADER_PRIMARY,
    STICKY_HEADER_TABS,
};
use crate::region::{self, BoundingBox};
use crate::results::{ExtractedData, ScrapeFailure};

/// How often element waits re-poll the page.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Extract the comment and capture its cropped screenshot.
///
/// Every failure is mapped to a [`ScrapeFailure`] kind; the caller records a
/// null result and continues with the next URL.
pub async fn extract_and_capture(
    page: &Page,
    url: &str,
    id: u32,
    config: &Config,
) -> Result<ExtractedData, ScrapeFailure> {
    if !wait_for_selector(page, READY_CONTAINER, config.ready_timeout).await {
        return Err(ScrapeFailure::ContentTimeout(config.ready_timeout));
    }

    let (content, datetime) = read_comment(page)
        .await
        .map_err(|e| ScrapeFailure::Extraction(format!("{e:#}")))?;

    let header_height = sticky_header_height(page)
        .await
        .map_err(|e| ScrapeFailure::Extraction(format!("{e:#}")))?;

    let mut boxes = Vec::with_capacity(ANCHOR_SELECTORS.len());
    for selector in ANCHOR_SELECTORS {
        if let Some(b) = wait_for_anchor_box(page, selector, config.anchor_timeout).await {
            boxes.push(b);
        } else {
            debug!(selector, "Anchor element not found");
        }
    }

    let Some(bounds) = region::union_box(&boxes) else {
        warn!(url, "No anchor elements found, skipping screenshot");
        return Err(ScrapeFailure::NoAnchors);
    };

    debug!(
        anchors = boxes.len(),
        x = bounds.x,
        y = bounds.y,
        width = bounds.width,
        height = bounds.height,
        header_height,
        "Capture region computed"
    );

    let target = region::scroll_target(&bounds, header_height);
    page.evaluate(format!("window.scrollTo(0, {target})"))
        .await
        .map_err(|e| ScrapeFailure::Screenshot(e.to_string()))?;

    tokio::fs::create_dir_all(&config.image_dir)
        .await
        .map_err(|e| ScrapeFailure::Screenshot(e.to_string()))?;
    let output_path = config.image_dir.join(format!("{id}.jpg"));

    let clip = region::clip_region(&bounds, header_height);
    save_cropped_jpeg(page, &clip, &output_path, config.screenshot_timeout)
        .await
        .map_err(|e| ScrapeFailure::Screenshot(format!("{e:#}")))?;

    info!(path = %output_path.display(), "Screenshot saved");

    Ok(ExtractedData {
        content,
        datetime,
        source_url: url.to_string(),
    })
}

/// Poll for a selector until it appears or the timeout elapses.
async fn wait_for_selector(page: &Page, selector: &str, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        if page.find_element(selector).await.is_ok() {
            return true;
        }
        if Instant::now() >= deadline {
            warn!(selector, "Element did not appear within {timeout:?}");
            return false;
        }
        sleep(POLL_INTERVAL).await;
    }
}

/// Read the comment body text and the comment's own timestamp.
///
/// The page carries two timestamp elements; the second is the comment's
/// (the first belongs to the thread). Content emptiness is not validated.
async fn read_comment(page: &Page) -> Result<(String, Option<String>)> {
    let content_element = page
        .find_element(CONTENT_BLOCK)
        .await
        .context("Content block not found")?;
    let content = content_element
        .inner_text()
        .await
        .context("Failed to read content text")?
        .unwrap_or_default();

    let timestamps = page
        .find_elements(COMMENT_TIMESTAMP)
        .await
        .unwrap_or_default();
    let datetime = match timestamps.get(1) {
        Some(element) => element
            .attribute("datetime")
            .await
            .context("Failed to read datetime attribute")?,
        None => None,
    };

    Ok((content, datetime))
}

/// Combined height of the sticky header elements, 0 for each absent one.
/// This is the vertical offset the capture must stay below.
async fn sticky_header_height(page: &Page) -> Result<f64> {
    let primary = serde_json::to_string(STICKY_HEADER_PRIMARY)?;
    let tabs = serde_json::to_string(STICKY_HEADER_TABS)?;
    let script = format!(
        r"(() => {{
            const measure = (sel) => {{
                const el = document.querySelector(sel);
                return el ? el.getBoundingClientRect().height : 0;
            }};
            return measure({primary}) + measure({tabs});
        }})()"
    );

    let result = page
        .evaluate(script)
        .await
        .context("Failed to measure sticky headers")?;
    Ok(result
        .value()
        .and_then(serde_json::Value::as_f64)
        .unwrap_or(0.0))
}

/// Poll for an anchor's page-coordinate bounding box until the element
/// appears or the timeout elapses. Absence is tolerated.
async fn wait_for_anchor_box(
    page: &Page,
    selector: &str,
    timeout: Duration,
) -> Option<BoundingBox> {
    let deadline = Instant::now() + timeout;
    loop {
        match query_box(page, selector).await {
            Ok(Some(b)) => return Some(b),
            Ok(None) => {}
            Err(e) => debug!(selector, error = %e, "Bounding box query failed"),
        }
        if Instant::now() >= deadline {
            return None;
        }
        sleep(POLL_INTERVAL).await;
    }
}

/// Bounding box of the first element matching `selector`, in page
/// coordinates (client rect plus scroll offsets), or `None` if absent.
async fn query_box(page: &Page, selector: &str) -> Result<Option<BoundingBox>> {
    let sel = serde_json::to_string(selector)?;
    let script = format!(
        r"(() => {{
            const el = document.querySelector({sel});
            if (!el) return null;
            const r = el.getBoundingClientRect();
            return {{
                x: r.x + window.scrollX,
                y: r.y + window.scrollY,
                width: r.width,
                height: r.height,
            }};
        }})()"
    );

    let result = page.evaluate(script).await?;
    match result.value() {
        Some(v) if !v.is_null() => Ok(Some(serde_json::from_value(v.clone())?)),
        _ => Ok(None),
    }
}

/// Capture a JPEG clipped to `clip` and write it to `path`.
async fn save_cropped_jpeg(
    page: &Page,
    clip: &BoundingBox,
    path: &Path,
    timeout: Duration,
) -> Result<()> {
    let params = CaptureScreenshotParams::builder()
        .format(CaptureScreenshotFormat::Jpeg)
        .clip(Viewport {
            x: clip.x,
            y: clip.y,
            width: clip.width,
            height: clip.height,
            scale: 1.0,
        })
        .build();

    let response = tokio::time::timeout(timeout, page.execute(params))
        .await
        .context("Screenshot timed out")?
        .context("Screenshot capture failed")?;

    let encoded: &str = response.result.data.as_ref();
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded.as_bytes())
        .context("Failed to decode screenshot payload")?;

    tokio::fs::write(path, &bytes)
        .await
        .with_context(|| format!("Failed to write screenshot to {}", path.display()))?;

    Ok(())
}
