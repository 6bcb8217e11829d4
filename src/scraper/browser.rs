//! Headless browser lifecycle.
//!
//! One browser, one page, reused for every URL in the run. The viewport is
//! fixed once, before any navigation, and the browser is closed in the
//! cleanup path whether or not the run succeeded.

use anyhow::{Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::page::Page;
use futures_util::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::config::Config;

/// Floor for the measured viewport height. A fresh page reports a scroll
/// height near zero, which would make the viewport unusable.
const MIN_VIEWPORT_HEIGHT: u32 = 800;

/// A launched browser with its single reusable page.
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
}

impl BrowserSession {
    /// Launch the browser and open the page used for the whole run.
    ///
    /// This is the only fatal failure point of the program: without a
    /// browser there is nothing to do.
    pub async fn launch(config: &Config) -> Result<Self> {
        info!("Launching headless browser");

        let mut config_builder = BrowserConfig::builder()
            .window_size(config.viewport_width, MIN_VIEWPORT_HEIGHT)
            .request_timeout(config.nav_timeout)
            .no_sandbox()
            .disable_default_args()
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-software-rasterizer")
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-background-networking")
            .arg("--disable-extensions")
            .arg("--disable-sync")
            .arg("--disable-translate")
            .arg("--mute-audio")
            .arg("--hide-scrollbars");

        if let Some(ref chrome_path) = config.chrome_path {
            config_builder = config_builder.chrome_executable(chrome_path);
        }

        let browser_config = config_builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build browser config: {e}"))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .context("Failed to launch browser")?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler error: {e}");
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .context("Failed to open page")?;

        fix_viewport(&page, config.viewport_width).await?;

        info!("Headless browser ready");

        Ok(Self {
            browser,
            page,
            handler_task,
        })
    }

    /// The single page shared by every navigation of the run.
    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Shutdown the browser gracefully.
    pub async fn shutdown(mut self) {
        if let Err(e) = self.browser.close().await {
            error!("Failed to close browser: {e}");
        } else {
            info!("Browser shutdown complete");
        }
        self.handler_task.abort();
    }
}

/// Fix the viewport once from the page's current content height.
///
/// Later pages are not re-measured; every navigation of the run renders into
/// this one viewport.
async fn fix_viewport(page: &Page, width: u32) -> Result<()> {
    let measured = page
        .evaluate("document.body.scrollHeight")
        .await
        .context("Failed to measure page height")?
        .value()
        .and_then(serde_json::Value::as_f64)
        .unwrap_or(0.0);

    let height = (measured as u32).max(MIN_VIEWPORT_HEIGHT);

    let params = SetDeviceMetricsOverrideParams::builder()
        .width(i64::from(width))
        .height(i64::from(height))
        .device_scale_factor(1.0)
        .mobile(false)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build viewport params: {e}"))?;

    page.execute(params)
        .await
        .context("Failed to set viewport")?;

    debug!(width, height, "Viewport fixed for the run");
    Ok(())
}
