use crate::error::Result;

/// Capability surface the pipeline drives a page through.
///
/// Components receive this by reference for the duration of one call and
/// must not retain it. The engine implements it against a live Chromium
/// tab; tests implement it with scripted fakes.
#[async_trait::async_trait]
pub trait BrowserActions: Send + Sync {
    /// Navigate to a URL and wait for the load to settle
    async fn navigate(&self, url: &str) -> Result<()>;

    /// URL of the page currently displayed
    async fn current_url(&self) -> Result<String>;

    /// Wait for a selector to appear
    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<()>;

    /// Whether at least one element matches the selector right now
    async fn element_exists(&self, selector: &str) -> Result<bool>;

    /// Fill a form field by selector
    async fn fill_field(&self, selector: &str, value: &str) -> Result<()>;

    /// Click an element by selector
    async fn click(&self, selector: &str) -> Result<()>;

    /// Click an element if it is present; returns whether a click happened
    async fn click_if_present(&self, selector: &str) -> Result<bool>;

    /// Extract text from an element, failing if the selector matches nothing
    async fn extract_text(&self, selector: &str) -> Result<String>;

    /// Extract text from an element, `None` if the selector matches nothing
    async fn extract_text_optional(&self, selector: &str) -> Result<Option<String>>;

    /// Collect an attribute from every element matching the selector
    async fn collect_attrs(&self, selector: &str, attr: &str) -> Result<Vec<String>>;

    /// Scroll to the bottom of the page to trigger lazy loading
    async fn scroll_to_bottom(&self) -> Result<()>;
}
