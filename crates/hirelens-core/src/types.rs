//! Shared types used across the HireLens pipeline.
//!
//! This module defines the data carried between pipeline stages: search
//! parameters going in, extracted post records and classification
//! results coming out.

use crate::country::CountryProfile;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Login credentials for one country profile.
///
/// Supplied by the caller (normally from the environment); never
/// persisted by the pipeline.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Login email
    pub email: String,
    /// Login password
    pub password: String,
}

impl Credentials {
    /// Read credentials for a country profile from the environment.
    ///
    /// # Errors
    /// Returns `PreconditionFailed` naming every missing variable. This
    /// check runs before any browsing begins.
    pub fn from_env(profile: &CountryProfile) -> Result<Self, CoreError> {
        let email = std::env::var(&profile.email_env).ok().filter(|v| !v.is_empty());
        let password = std::env::var(&profile.password_env).ok().filter(|v| !v.is_empty());

        match (email, password) {
            (Some(email), Some(password)) => Ok(Self { email, password }),
            (email, password) => {
                let mut missing = Vec::new();
                if email.is_none() {
                    missing.push(profile.email_env.as_str());
                }
                if password.is_none() {
                    missing.push(profile.password_env.as_str());
                }
                Err(CoreError::PreconditionFailed(format!(
                    "missing credentials for {}: set {}",
                    profile.name,
                    missing.join(" and ")
                )))
            }
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A validated search request: query string, result cap, and the floor
/// delay between successive page interactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    query: String,
    max_results: usize,
    delay: Duration,
}

impl SearchQuery {
    /// Create a validated search query.
    ///
    /// # Errors
    /// Returns `Validation` if the query is empty or `max_results` is zero.
    pub fn new(
        query: impl Into<String>,
        max_results: usize,
        delay: Duration,
    ) -> Result<Self, CoreError> {
        let query = query.into();
        if query.trim().is_empty() {
            return Err(CoreError::Validation(
                "search query cannot be empty".to_string(),
            ));
        }
        if max_results == 0 {
            return Err(CoreError::Validation(
                "max_results must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            query,
            max_results,
            delay,
        })
    }

    /// The query string.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Maximum number of candidate posts to collect.
    #[must_use]
    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Floor delay between successive page interactions.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Whether a post's content could be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionStatus {
    /// Content was read from the rendered page
    Extracted,
    /// The post failed to load (removed, restricted, or timed out)
    Unavailable {
        /// Short reason for the failure
        reason: String,
    },
}

/// Engagement counts as rendered on the post, when present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    /// Reaction count, if rendered
    pub reactions: Option<u64>,
    /// Comment count, if rendered
    pub comments: Option<u64>,
}

/// Structured content extracted from a single post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRecord {
    /// Canonical source URL of the post
    pub url: String,
    /// Author display name, if rendered
    pub author_name: Option<String>,
    /// Author headline/title, if rendered
    pub author_headline: Option<String>,
    /// Full post text (empty for unavailable posts)
    pub text: String,
    /// Timestamp exactly as displayed (e.g., "2d"), if rendered
    pub timestamp: Option<String>,
    /// Engagement counts, when rendered
    pub engagement: Engagement,
    /// Whether the content was actually readable
    pub status: ExtractionStatus,
}

impl PostRecord {
    /// Create a record for a post that could not be loaded.
    #[must_use]
    pub fn unavailable(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            author_name: None,
            author_headline: None,
            text: String::new(),
            timestamp: None,
            engagement: Engagement::default(),
            status: ExtractionStatus::Unavailable {
                reason: reason.into(),
            },
        }
    }

    /// Whether this record is tagged unavailable.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self.status, ExtractionStatus::Unavailable { .. })
    }
}

/// A post record tagged with the hiring decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// The record that was classified
    pub record: PostRecord,
    /// Whether the post is a hiring announcement
    pub hiring: bool,
    /// Phrases that matched, retained for auditability
    pub matched: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_validation() {
        assert!(SearchQuery::new("", 10, Duration::from_secs(1)).is_err());
        assert!(SearchQuery::new("   ", 10, Duration::from_secs(1)).is_err());
        assert!(SearchQuery::new("hiring", 0, Duration::from_secs(1)).is_err());

        let query = SearchQuery::new("hiring", 10, Duration::ZERO).expect("valid query");
        assert_eq!(query.query(), "hiring");
        assert_eq!(query.max_results(), 10);
        assert_eq!(query.delay(), Duration::ZERO);
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials {
            email: "user@example.com".to_string(),
            password: "hunter2".to_string(),
        };
        let debug = format!("{creds:?}");
        assert!(debug.contains("user@example.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_credentials_from_env_missing() {
        let profile = crate::CountryProfile {
            key: "test".to_string(),
            name: "Test".to_string(),
            geolocation: crate::Geolocation {
                latitude: 0.0,
                longitude: 0.0,
                accuracy: 100.0,
            },
            timezone: "UTC".to_string(),
            locale: "en-US".to_string(),
            subdomain: "www".to_string(),
            session_dir: "session_test".to_string(),
            email_env: "HIRELENS_TEST_EMAIL_UNSET".to_string(),
            password_env: "HIRELENS_TEST_PASSWORD_UNSET".to_string(),
        };

        let err = Credentials::from_env(&profile).expect_err("missing credentials");
        let msg = err.to_string();
        assert!(msg.contains("HIRELENS_TEST_EMAIL_UNSET"));
        assert!(msg.contains("HIRELENS_TEST_PASSWORD_UNSET"));
    }

    #[test]
    fn test_unavailable_record() {
        let record = PostRecord::unavailable("https://example.com/post/1", "navigation timeout");
        assert!(record.is_unavailable());
        assert!(record.text.is_empty());
        assert_eq!(
            record.status,
            ExtractionStatus::Unavailable {
                reason: "navigation timeout".to_string()
            }
        );
    }

    #[test]
    fn test_post_record_serializes() {
        let record = PostRecord {
            url: "https://example.com/post/1".to_string(),
            author_name: Some("Jane Doe".to_string()),
            author_headline: Some("Recruiter".to_string()),
            text: "We are hiring".to_string(),
            timestamp: Some("2d".to_string()),
            engagement: Engagement {
                reactions: Some(12),
                comments: None,
            },
            status: ExtractionStatus::Extracted,
        };

        let json = serde_json::to_string(&record).expect("serialize record");
        assert!(json.contains("Jane Doe"));
        assert!(json.contains("\"reactions\":12"));
    }
}
