//! HireLens Core - Foundation crate for the HireLens scraper.
//!
//! This crate provides shared types, error handling, configuration
//! management, and the country profile table that all other HireLens
//! crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`country`] - Immutable per-country browsing profiles
//! - [`types`] - Pipeline data types (`PostRecord`, `ClassificationResult`, ...)
//!
//! # Example
//!
//! ```rust
//! use hirelens_core::{AppConfig, CountryProfile};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! let profile = CountryProfile::lookup("india")?;
//! assert_eq!(profile.subdomain, "in");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod country;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, BrowserConfig, ClassifierConfig, SearchConfig};
pub use country::{CountryProfile, Geolocation};
pub use error::{ConfigError, ConfigResult, CoreError, Result};
pub use types::{
    ClassificationResult, Credentials, Engagement, ExtractionStatus, PostRecord, SearchQuery,
};
