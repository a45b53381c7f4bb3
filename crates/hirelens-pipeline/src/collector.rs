//! Search collector: gather candidate post URLs from a keyword search.
//!
//! Drives the search surface, scrolling to trigger lazy loading, and
//! accumulates a deduplicated, order-preserving sequence of canonical
//! post URLs up to the configured cap. A stagnation guard stops the
//! loop after repeated no-progress passes so a dead-end page state can
//! never spin forever.

use crate::error::{PipelineError, Result};
use hirelens_browser::BrowserActions;
use hirelens_core::{CountryProfile, SearchQuery};
use std::collections::HashSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use url::Url;

/// Consecutive passes discovering nothing new before the loop stops.
pub const MAX_STAGNANT_PASSES: u32 = 2;

/// Anchors that link to an individual post.
const POST_LINK_SELECTOR: &str = r#"a[href*="/feed/update/"], a[href*="/posts/"]"#;

/// Ordered, deduplicated set of candidate post URLs.
///
/// Insertion order is discovery order; the first occurrence of a
/// canonical URL wins.
#[derive(Debug, Default)]
pub struct CandidateSet {
    urls: Vec<String>,
    seen: HashSet<String>,
}

impl CandidateSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a canonical URL; returns false if it was already present.
    pub fn insert(&mut self, url: String) -> bool {
        if self.seen.contains(&url) {
            return false;
        }
        self.seen.insert(url.clone());
        self.urls.push(url);
        true
    }

    /// Number of candidate URLs collected.
    #[must_use]
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Iterate candidates in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }

    /// Consume the set, yielding candidates in discovery order.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.urls
    }
}

/// Canonicalize a discovered href to a stable absolute post URL.
///
/// Resolves relative hrefs against the base, strips query parameters
/// (tracking) and fragments, and rejects links that are not post links.
#[must_use]
pub fn canonicalize(base: &Url, href: &str) -> Option<String> {
    let mut url = base.join(href).ok()?;
    url.set_query(None);
    url.set_fragment(None);

    let path = url.path();
    if path.contains("/feed/update/") || path.contains("/posts/") {
        Some(url.to_string())
    } else {
        None
    }
}

/// Collects candidate post URLs for one country profile.
pub struct SearchCollector<'a> {
    profile: &'a CountryProfile,
}

impl<'a> SearchCollector<'a> {
    /// Create a collector bound to a country profile.
    #[must_use]
    pub fn new(profile: &'a CountryProfile) -> Self {
        Self { profile }
    }

    /// Run the search and accumulate candidates.
    ///
    /// Terminates when the cap is reached, the stagnation guard trips,
    /// or the run is cancelled. A search that legitimately yields zero
    /// posts returns an empty set, not an error.
    pub async fn collect(
        &self,
        actions: &dyn BrowserActions,
        query: &SearchQuery,
        cancel: &CancellationToken,
    ) -> Result<CandidateSet> {
        let search_url = self.profile.search_url(query.query());
        info!("Searching for '{}' (cap {})", query.query(), query.max_results());
        actions.navigate(&search_url).await?;

        let base = Url::parse(&self.profile.base_url())
            .map_err(|e| PipelineError::PreconditionFailed(format!("invalid base URL: {e}")))?;

        let mut candidates = CandidateSet::new();
        let mut stagnant_passes = 0u32;

        loop {
            let hrefs = actions.collect_attrs(POST_LINK_SELECTOR, "href").await?;
            let mut discovered = 0usize;

            for href in hrefs {
                if candidates.len() >= query.max_results() {
                    break;
                }
                if let Some(canonical) = canonicalize(&base, &href) {
                    if candidates.insert(canonical) {
                        discovered += 1;
                    }
                }
            }

            debug!(
                pass_new = discovered,
                total = candidates.len(),
                "collection pass finished"
            );

            if candidates.len() >= query.max_results() {
                break;
            }

            if discovered == 0 {
                stagnant_passes += 1;
                if stagnant_passes >= MAX_STAGNANT_PASSES {
                    debug!("No new posts after {stagnant_passes} passes, stopping");
                    break;
                }
            } else {
                stagnant_passes = 0;
            }

            actions.scroll_to_bottom().await?;

            tokio::select! {
                () = cancel.cancelled() => return Err(PipelineError::Interrupted),
                () = tokio::time::sleep(query.delay()) => {}
            }
        }

        info!("Collected {} candidate post URLs", candidates.len());
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedActions;
    use hirelens_core::CountryProfile;
    use std::time::Duration;

    fn profile() -> CountryProfile {
        CountryProfile::lookup("india").expect("india profile")
    }

    fn query(max: usize) -> SearchQuery {
        SearchQuery::new("backend developer hiring", max, Duration::ZERO).expect("valid query")
    }

    fn post(n: u32) -> String {
        format!("/feed/update/urn:li:activity:{n}/")
    }

    #[tokio::test]
    async fn test_cap_and_dedup() {
        let actions = ScriptedActions::new().with_link_batches(vec![
            vec![post(1), post(2), post(1)],
            vec![post(2), post(3), post(4), post(5)],
        ]);

        let profile = profile();
        let collector = SearchCollector::new(&profile);
        let set = collector
            .collect(&actions, &query(4), &CancellationToken::new())
            .await
            .expect("collect");

        let urls = set.into_vec();
        assert_eq!(urls.len(), 4);
        // No duplicates
        let unique: HashSet<_> = urls.iter().collect();
        assert_eq!(unique.len(), urls.len());
        // Discovery order preserved, first-seen wins
        assert!(urls[0].ends_with("urn:li:activity:1/"));
        assert!(urls[1].ends_with("urn:li:activity:2/"));
    }

    #[tokio::test]
    async fn test_fewer_results_than_cap_terminates_cleanly() {
        let actions = ScriptedActions::new().with_link_batches(vec![
            vec![post(1), post(2)],
            vec![post(1), post(2)],
            vec![post(1), post(2)],
        ]);

        let profile = profile();
        let collector = SearchCollector::new(&profile);
        let set = collector
            .collect(&actions, &query(50), &CancellationToken::new())
            .await
            .expect("collect");

        assert_eq!(set.len(), 2);
    }

    #[tokio::test]
    async fn test_stagnation_guard_stops_after_two_empty_passes() {
        // Endless passes that never discover anything new
        let actions = ScriptedActions::new().with_link_batches(vec![vec![post(1)]]);

        let profile = profile();
        let collector = SearchCollector::new(&profile);
        let set = collector
            .collect(&actions, &query(50), &CancellationToken::new())
            .await
            .expect("collect");

        assert_eq!(set.len(), 1);
        // First pass found one; then exactly MAX_STAGNANT_PASSES empty
        // passes ran before the loop stopped.
        assert_eq!(actions.count_log("scroll"), MAX_STAGNANT_PASSES as usize);
    }

    #[tokio::test]
    async fn test_zero_results_is_ok_not_error() {
        let actions = ScriptedActions::new().with_link_batches(vec![vec![]]);

        let profile = profile();
        let collector = SearchCollector::new(&profile);
        let set = collector
            .collect(&actions, &query(10), &CancellationToken::new())
            .await
            .expect("empty search is not an error");

        assert!(set.is_empty());
    }

    #[tokio::test]
    async fn test_non_post_links_are_rejected() {
        let actions = ScriptedActions::new().with_link_batches(vec![vec![
            "/in/some-profile/".to_string(),
            "/company/acme/".to_string(),
            post(9),
        ]]);

        let profile = profile();
        let collector = SearchCollector::new(&profile);
        let set = collector
            .collect(&actions, &query(10), &CancellationToken::new())
            .await
            .expect("collect");

        assert_eq!(set.len(), 1);
        assert!(set.iter().next().expect("one url").contains("urn:li:activity:9"));
    }

    #[test]
    fn test_canonicalize_strips_tracking() {
        let base = Url::parse("https://in.linkedin.com").expect("base url");
        let canonical = canonicalize(
            &base,
            "/feed/update/urn:li:activity:42/?utm_source=share&rcm=xyz#comments",
        )
        .expect("post link");

        assert_eq!(
            canonical,
            "https://in.linkedin.com/feed/update/urn:li:activity:42/"
        );
    }

    #[test]
    fn test_canonicalize_absolute_and_relative_agree() {
        let base = Url::parse("https://www.linkedin.com").expect("base url");
        let relative = canonicalize(&base, "/posts/jane_hiring-activity-7");
        let absolute = canonicalize(&base, "https://www.linkedin.com/posts/jane_hiring-activity-7");
        assert_eq!(relative, absolute);
    }

    #[test]
    fn test_canonicalize_rejects_garbage() {
        let base = Url::parse("https://www.linkedin.com").expect("base url");
        assert!(canonicalize(&base, "/jobs/view/12345/").is_none());
        assert!(canonicalize(&base, "https://[bad").is_none());
    }
}
