//! Browser automation engine for JavaScript-heavy sites.
//!
//! Provides headless browser control with a persistent per-country
//! profile directory, launch fingerprinting, and a capability trait
//! the pipeline drives the page through.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod actions;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod lock;
pub mod session;

pub use actions::BrowserActions;
pub use engine::{BrowserEngine, LaunchOptions};
pub use error::{BrowserError, Result};
pub use fingerprint::FingerprintConfig;
pub use lock::ProfileLock;
pub use session::{SessionMarker, SessionStore};
