//! Per-country browsing profiles.
//!
//! A [`CountryProfile`] bundles everything that differs between target
//! countries: geolocation, timezone, locale, the network subdomain to
//! search on, the session storage directory, and the names of the
//! environment variables holding that country's credentials.
//!
//! One profile is selected at startup and passed explicitly through the
//! pipeline; profiles are immutable and never merge.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// Geographic position reported to the browser for a country profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geolocation {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Accuracy radius in meters
    pub accuracy: f64,
}

/// Immutable configuration for one target country.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryProfile {
    /// Short lookup key (e.g., "india", "usa")
    pub key: String,
    /// Human-readable display name
    pub name: String,
    /// Geolocation override applied to the browsing context
    pub geolocation: Geolocation,
    /// IANA timezone identifier (e.g., "Asia/Kolkata")
    pub timezone: String,
    /// BCP 47 locale tag (e.g., "en-IN")
    pub locale: String,
    /// Network subdomain to browse (e.g., "in" or "www")
    pub subdomain: String,
    /// Directory name for this country's persistent browser session
    pub session_dir: String,
    /// Environment variable holding the login email
    pub email_env: String,
    /// Environment variable holding the login password
    pub password_env: String,
}

impl CountryProfile {
    /// All built-in country profiles.
    #[must_use]
    pub fn builtin() -> Vec<Self> {
        vec![
            Self {
                key: "india".to_string(),
                name: "India".to_string(),
                geolocation: Geolocation {
                    latitude: 20.5937,
                    longitude: 78.9629,
                    accuracy: 100.0,
                },
                timezone: "Asia/Kolkata".to_string(),
                locale: "en-IN".to_string(),
                subdomain: "in".to_string(),
                session_dir: "browser_session_india".to_string(),
                email_env: "HIRELENS_EMAIL".to_string(),
                password_env: "HIRELENS_PASSWORD".to_string(),
            },
            Self {
                key: "usa".to_string(),
                name: "United States".to_string(),
                geolocation: Geolocation {
                    latitude: 37.7749,
                    longitude: -122.4194,
                    accuracy: 100.0,
                },
                timezone: "America/Los_Angeles".to_string(),
                locale: "en-US".to_string(),
                subdomain: "www".to_string(),
                session_dir: "browser_session_usa".to_string(),
                email_env: "HIRELENS_EMAIL_USA".to_string(),
                password_env: "HIRELENS_PASSWORD_USA".to_string(),
            },
        ]
    }

    /// Look up a built-in profile by key.
    ///
    /// # Errors
    /// Returns `PreconditionFailed` naming the available keys when the
    /// key is unknown.
    pub fn lookup(key: &str) -> Result<Self> {
        let profiles = Self::builtin();
        profiles
            .iter()
            .find(|p| p.key == key)
            .cloned()
            .ok_or_else(|| {
                let known: Vec<&str> = profiles.iter().map(|p| p.key.as_str()).collect();
                CoreError::PreconditionFailed(format!(
                    "unknown country '{key}', available: {}",
                    known.join(", ")
                ))
            })
    }

    /// Validate the profile for completeness.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("key", &self.key),
            ("name", &self.name),
            ("timezone", &self.timezone),
            ("locale", &self.locale),
            ("subdomain", &self.subdomain),
            ("session_dir", &self.session_dir),
            ("email_env", &self.email_env),
            ("password_env", &self.password_env),
        ] {
            if value.is_empty() {
                return Err(CoreError::Validation(format!(
                    "country profile field '{field}' cannot be empty"
                )));
            }
        }

        if self.geolocation.accuracy <= 0.0 {
            return Err(CoreError::Validation(format!(
                "geolocation accuracy must be positive, got {}",
                self.geolocation.accuracy
            )));
        }

        if !(-90.0..=90.0).contains(&self.geolocation.latitude)
            || !(-180.0..=180.0).contains(&self.geolocation.longitude)
        {
            return Err(CoreError::Validation(
                "geolocation coordinates out of range".to_string(),
            ));
        }

        Ok(())
    }

    /// Base URL of the network for this country's subdomain.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("https://{}.linkedin.com", self.subdomain)
    }

    /// Feed URL used to probe authentication state.
    #[must_use]
    pub fn feed_url(&self) -> String {
        format!("{}/feed/", self.base_url())
    }

    /// Content search URL for a query, newest posts first.
    #[must_use]
    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search/results/content/?keywords={}&sortBy=%22date_posted%22",
            self.base_url(),
            urlencoding::encode(query)
        )
    }
}
