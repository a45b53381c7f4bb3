//! Post extractor: read structured content from a single post page.
//!
//! Extraction is resilient by contract: a post that fails to load
//! (removed, access-restricted, network error, or timed out) yields an
//! `Unavailable` record instead of an error, so one dead post never
//! aborts the batch.

use hirelens_browser::{BrowserActions, BrowserError};
use hirelens_core::{Engagement, ExtractionStatus, PostRecord};
use std::time::Duration;
use tracing::{debug, warn};

/// Primary content region that must render before reading fields.
const CONTENT_SELECTOR: &str = ".feed-shared-update-v2, .update-components-actor";

const AUTHOR_NAME_SELECTOR: &str = ".update-components-actor__title";
const AUTHOR_HEADLINE_SELECTOR: &str = ".update-components-actor__description";
const TEXT_SELECTOR: &str = ".update-components-text, .feed-shared-update-v2__description";
const TIMESTAMP_SELECTOR: &str = ".update-components-actor__sub-description";
const REACTIONS_SELECTOR: &str = ".social-details-social-counts__reactions-count";
const COMMENTS_SELECTOR: &str = ".social-details-social-counts__comments";

/// Truncation control expanded before reading the full text.
const SEE_MORE_SELECTOR: &str =
    "button.feed-shared-inline-show-more-text__see-more-less-toggle";

/// How long to wait for the content region to render.
const CONTENT_WAIT_MS: u64 = 10_000;

/// Extracts one post record per candidate URL.
pub struct PostExtractor {
    navigation_timeout: Duration,
}

impl PostExtractor {
    /// Create an extractor with a per-URL navigation timeout.
    #[must_use]
    pub fn new(navigation_timeout: Duration) -> Self {
        Self { navigation_timeout }
    }

    /// Extract the post at `url`.
    ///
    /// Never fails: load errors and timeouts produce a record tagged
    /// `Unavailable` with the reason.
    pub async fn extract(&self, actions: &dyn BrowserActions, url: &str) -> PostRecord {
        match tokio::time::timeout(self.navigation_timeout, self.try_extract(actions, url)).await {
            Ok(Ok(record)) => record,
            Ok(Err(e)) => {
                warn!("Post unavailable: {} ({})", url, e);
                PostRecord::unavailable(url, e.to_string())
            }
            Err(_) => {
                warn!("Navigation timeout for {}", url);
                PostRecord::unavailable(url, "navigation timeout")
            }
        }
    }

    async fn try_extract(
        &self,
        actions: &dyn BrowserActions,
        url: &str,
    ) -> Result<PostRecord, BrowserError> {
        actions.navigate(url).await?;
        actions
            .wait_for_selector(CONTENT_SELECTOR, CONTENT_WAIT_MS)
            .await?;

        // Expand truncated text before reading it; absence is fine.
        if actions.click_if_present(SEE_MORE_SELECTOR).await? {
            debug!("Expanded truncated post text");
        }

        let text = actions.extract_text(TEXT_SELECTOR).await?;
        let author_name = actions.extract_text_optional(AUTHOR_NAME_SELECTOR).await?;
        let author_headline = actions
            .extract_text_optional(AUTHOR_HEADLINE_SELECTOR)
            .await?;
        let timestamp = actions.extract_text_optional(TIMESTAMP_SELECTOR).await?;

        // Engagement counts are opportunistic; missing elements are not errors.
        let reactions = actions
            .extract_text_optional(REACTIONS_SELECTOR)
            .await?
            .as_deref()
            .and_then(parse_count);
        let comments = actions
            .extract_text_optional(COMMENTS_SELECTOR)
            .await?
            .as_deref()
            .and_then(parse_count);

        Ok(PostRecord {
            url: url.to_string(),
            author_name,
            author_headline,
            text,
            timestamp,
            engagement: Engagement {
                reactions,
                comments,
            },
            status: ExtractionStatus::Extracted,
        })
    }
}

/// Parse a rendered engagement count ("1,234", "1.2K", "3M", "87 comments").
#[must_use]
pub fn parse_count(raw: &str) -> Option<u64> {
    let token = raw
        .split_whitespace()
        .find(|t| t.chars().next().is_some_and(|c| c.is_ascii_digit()))?;
    let token = token.replace(',', "");

    let (digits, multiplier) = match token.chars().last()? {
        'k' | 'K' => (&token[..token.len() - 1], 1_000.0),
        'm' | 'M' => (&token[..token.len() - 1], 1_000_000.0),
        _ => (token.as_str(), 1.0),
    };

    let value: f64 = digits.parse().ok()?;
    if value < 0.0 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Some((value * multiplier) as u64)
}
