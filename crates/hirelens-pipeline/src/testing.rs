//! Scripted [`BrowserActions`] fake for driving the pipeline in tests.
//!
//! Behavior is configured up front with builder methods; every call is
//! appended to an action log so tests can assert on what the pipeline
//! actually did (or did not do).

use hirelens_browser::{BrowserActions, BrowserError};
use std::collections::HashMap;
use std::sync::Mutex;

type Result<T> = std::result::Result<T, BrowserError>;

/// Scripted fake page: returns canned answers and records every action.
#[derive(Default)]
pub struct ScriptedActions {
    log: Mutex<Vec<String>>,
    /// Per-selector sequences of `element_exists` answers; the last
    /// value repeats once the sequence is exhausted.
    exists: Mutex<HashMap<String, Vec<bool>>>,
    /// Per-selector text for `extract_text` / `extract_text_optional`.
    texts: HashMap<String, String>,
    /// Successive `collect_attrs` batches; the last batch repeats.
    link_batches: Mutex<Vec<Vec<String>>>,
    /// URLs whose navigation fails.
    nav_failures: Vec<String>,
    current_url: String,
}

impl ScriptedActions {
    pub fn new() -> Self {
        Self {
            current_url: "https://www.linkedin.com/feed/".to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_exists(self, selector: &str, answers: Vec<bool>) -> Self {
        self.exists
            .lock()
            .expect("exists lock")
            .insert(selector.to_string(), answers);
        self
    }

    #[must_use]
    pub fn with_text(mut self, selector: &str, text: &str) -> Self {
        self.texts.insert(selector.to_string(), text.to_string());
        self
    }

    #[must_use]
    pub fn with_link_batches(self, batches: Vec<Vec<String>>) -> Self {
        *self.link_batches.lock().expect("batches lock") = batches;
        self
    }

    #[must_use]
    pub fn with_nav_failure(mut self, url: &str) -> Self {
        self.nav_failures.push(url.to_string());
        self
    }

    #[must_use]
    pub fn with_current_url(mut self, url: &str) -> Self {
        self.current_url = url.to_string();
        self
    }

    fn record(&self, entry: String) {
        self.log.lock().expect("log lock").push(entry);
    }

    /// Whether any logged action contains `needle`.
    pub fn log_contains(&self, needle: &str) -> bool {
        self.log
            .lock()
            .expect("log lock")
            .iter()
            .any(|entry| entry.contains(needle))
    }

    /// Number of logged actions containing `needle`.
    pub fn count_log(&self, needle: &str) -> usize {
        self.log
            .lock()
            .expect("log lock")
            .iter()
            .filter(|entry| entry.contains(needle))
            .count()
    }

    fn next_exists(&self, selector: &str) -> bool {
        let mut exists = self.exists.lock().expect("exists lock");
        match exists.get_mut(selector) {
            Some(answers) if answers.len() > 1 => answers.remove(0),
            Some(answers) => answers.first().copied().unwrap_or(false),
            None => false,
        }
    }
}

#[async_trait::async_trait]
impl BrowserActions for ScriptedActions {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.record(format!("navigate:{url}"));
        if self.nav_failures.iter().any(|f| url.contains(f.as_str())) {
            return Err(BrowserError::NavigationError(format!(
                "{url}: connection refused"
            )));
        }
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.current_url.clone())
    }

    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<()> {
        self.record(format!("wait:{selector}"));
        if self.next_exists(selector) {
            Ok(())
        } else {
            Err(BrowserError::Timeout(format!(
                "selector '{selector}' not found within {timeout_ms}ms"
            )))
        }
    }

    async fn element_exists(&self, selector: &str) -> Result<bool> {
        Ok(self.next_exists(selector))
    }

    async fn fill_field(&self, selector: &str, value: &str) -> Result<()> {
        self.record(format!("fill:{selector}={value}"));
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.record(format!("click:{selector}"));
        Ok(())
    }

    async fn click_if_present(&self, selector: &str) -> Result<bool> {
        self.record(format!("click_if_present:{selector}"));
        Ok(self.next_exists(selector))
    }

    async fn extract_text(&self, selector: &str) -> Result<String> {
        self.texts
            .get(selector)
            .cloned()
            .ok_or_else(|| BrowserError::SelectorNotFound(selector.to_string()))
    }

    async fn extract_text_optional(&self, selector: &str) -> Result<Option<String>> {
        Ok(self.texts.get(selector).cloned())
    }

    async fn collect_attrs(&self, selector: &str, attr: &str) -> Result<Vec<String>> {
        self.record(format!("collect:{selector}@{attr}"));
        let mut batches = self.link_batches.lock().expect("batches lock");
        if batches.len() > 1 {
            Ok(batches.remove(0))
        } else {
            Ok(batches.first().cloned().unwrap_or_default())
        }
    }

    async fn scroll_to_bottom(&self) -> Result<()> {
        self.record("scroll".to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_exists_sequence_repeats_last() {
        let actions = ScriptedActions::new().with_exists(".feed", vec![false, true]);
        assert!(!actions.element_exists(".feed").await.unwrap());
        assert!(actions.element_exists(".feed").await.unwrap());
        assert!(actions.element_exists(".feed").await.unwrap());
    }

    #[tokio::test]
    async fn test_unconfigured_selector_is_absent() {
        let actions = ScriptedActions::new();
        assert!(!actions.element_exists(".missing").await.unwrap());
        assert!(actions.extract_text(".missing").await.is_err());
        assert!(actions
            .extract_text_optional(".missing")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_log_records_actions() {
        let actions = ScriptedActions::new();
        actions.navigate("https://example.com").await.unwrap();
        actions.scroll_to_bottom().await.unwrap();
        assert!(actions.log_contains("navigate:https://example.com"));
        assert_eq!(actions.count_log("scroll"), 1);
    }
}
