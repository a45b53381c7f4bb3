use crate::actions::BrowserActions;
use crate::error::{BrowserError, Result};
use crate::fingerprint::FingerprintConfig;
use crate::lock::ProfileLock;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::{
    SetGeolocationOverrideParams, SetLocaleOverrideParams, SetTimezoneOverrideParams,
};
use chromiumoxide::cdp::browser_protocol::network::{Cookie, Headers, SetExtraHttpHeadersParams};
use chromiumoxide::page::Page;
use futures_util::stream::StreamExt;
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Poll interval for `wait_for_selector`.
const SELECTOR_POLL_MS: u64 = 250;

/// Launch-time parameters for one browsing session.
///
/// Geolocation, timezone, locale, and the session directory come from
/// the selected country profile; the rest from application config.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Persistent profile directory (cookies, local storage, cache)
    pub session_dir: PathBuf,
    /// Run without a visible window
    pub headless: bool,
    /// Geolocation override: latitude
    pub latitude: f64,
    /// Geolocation override: longitude
    pub longitude: f64,
    /// Geolocation override: accuracy radius in meters
    pub accuracy: f64,
    /// IANA timezone identifier
    pub timezone: String,
    /// BCP 47 locale tag
    pub locale: String,
    /// Accept-Language header sent with every request
    pub accept_language: String,
    /// Browser window size
    pub window_width: u32,
    /// Browser window size
    pub window_height: u32,
}

/// Browser automation engine bound to one persistent profile directory.
///
/// Owns the Chromium process, a single working tab, and the profile
/// lock. At most one live engine exists per session directory.
pub struct BrowserEngine {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    fingerprint: FingerprintConfig,
    _lock: ProfileLock,
}

impl BrowserEngine {
    /// Launch Chromium against a persistent profile directory.
    ///
    /// Acquires the single-writer profile lock first; a concurrent run
    /// against the same directory fails with `ProfileLocked` before any
    /// browser process is spawned.
    pub async fn launch(options: LaunchOptions) -> Result<Self> {
        let lock = ProfileLock::acquire(&options.session_dir)?;
        let fingerprint =
            FingerprintConfig::with_viewport(options.window_width, options.window_height);

        let mut builder = BrowserConfig::builder()
            .user_data_dir(&options.session_dir)
            .window_size(fingerprint.viewport_width, fingerprint.viewport_height)
            .no_sandbox()
            .arg("--disable-blink-features=AutomationControlled");

        if !options.headless {
            builder = builder.with_head();
        }

        let config = builder
            .build()
            .map_err(BrowserError::ChromiumError)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        // Drive the CDP event loop for the lifetime of the browser
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        let engine = Self {
            browser,
            page,
            handler_task,
            fingerprint,
            _lock: lock,
        };
        engine.apply_overrides(&options).await?;

        debug!(
            session_dir = %options.session_dir.display(),
            timezone = %options.timezone,
            locale = %options.locale,
            "browser engine launched"
        );

        Ok(engine)
    }

    /// Apply per-country CDP overrides to the working tab.
    async fn apply_overrides(&self, options: &LaunchOptions) -> Result<()> {
        self.page
            .set_user_agent(self.fingerprint.user_agent.as_str())
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        let geo = SetGeolocationOverrideParams {
            latitude: Some(options.latitude),
            longitude: Some(options.longitude),
            accuracy: Some(options.accuracy),
        };
        self.page
            .execute(geo)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        self.page
            .execute(SetTimezoneOverrideParams::new(options.timezone.clone()))
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        self.page
            .execute(SetLocaleOverrideParams {
                locale: Some(options.locale.clone()),
            })
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        let headers = Headers::new(serde_json::json!({
            "Accept-Language": options.accept_language,
        }));
        self.page
            .execute(SetExtraHttpHeadersParams::new(headers))
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        Ok(())
    }

    /// Snapshot of all cookies in the browsing context.
    pub async fn cookies(&self) -> Result<Vec<Cookie>> {
        self.page
            .get_cookies()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))
    }

    /// The launch fingerprint in effect.
    pub fn fingerprint(&self) -> &FingerprintConfig {
        &self.fingerprint
    }

    /// Shut the browser down gracefully and release the profile lock.
    pub async fn close(mut self) -> Result<()> {
        if let Err(e) = self.browser.close().await {
            warn!("Browser close failed: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Browser wait failed: {}", e);
        }
        self.handler_task.abort();
        Ok(())
    }
}

#[async_trait::async_trait]
impl BrowserActions for BrowserEngine {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| BrowserError::NavigationError(format!("{url}: {e}")))?;
        self.page
            .wait_for_navigation()
            .await
            .map_err(|e| BrowserError::NavigationError(format!("{url}: {e}")))?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        self.page
            .url()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?
            .ok_or_else(|| BrowserError::NavigationError("page has no URL".to_string()))
    }

    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<()> {
        let deadline = tokio::time::Instant::now() + Duration::from_millis(timeout_ms);

        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(BrowserError::Timeout(format!(
                    "selector '{selector}' not found within {timeout_ms}ms"
                )));
            }
            tokio::time::sleep(Duration::from_millis(SELECTOR_POLL_MS)).await;
        }
    }

    async fn element_exists(&self, selector: &str) -> Result<bool> {
        Ok(self.page.find_element(selector).await.is_ok())
    }

    async fn fill_field(&self, selector: &str, value: &str) -> Result<()> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| BrowserError::SelectorNotFound(selector.to_string()))?;
        element
            .click()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        element
            .type_str(value)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| BrowserError::SelectorNotFound(selector.to_string()))?;
        element
            .click()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        Ok(())
    }

    async fn click_if_present(&self, selector: &str) -> Result<bool> {
        match self.page.find_element(selector).await {
            Ok(element) => {
                element
                    .click()
                    .await
                    .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
                Ok(true)
            }
            Err(_) => Ok(false),
        }
    }

    async fn extract_text(&self, selector: &str) -> Result<String> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| BrowserError::SelectorNotFound(selector.to_string()))?;
        let text = element
            .inner_text()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        Ok(text.unwrap_or_default().trim().to_string())
    }

    async fn extract_text_optional(&self, selector: &str) -> Result<Option<String>> {
        match self.page.find_element(selector).await {
            Ok(element) => {
                let text = element
                    .inner_text()
                    .await
                    .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
                Ok(text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()))
            }
            Err(_) => Ok(None),
        }
    }

    async fn collect_attrs(&self, selector: &str, attr: &str) -> Result<Vec<String>> {
        let elements = self
            .page
            .find_elements(selector)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        let mut values = Vec::with_capacity(elements.len());
        for element in elements {
            if let Ok(Some(value)) = element.attribute(attr).await {
                values.push(value);
            }
        }
        Ok(values)
    }

    async fn scroll_to_bottom(&self) -> Result<()> {
        self.page
            .evaluate("window.scrollTo(0, document.body.scrollHeight)")
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        Ok(())
    }
}
