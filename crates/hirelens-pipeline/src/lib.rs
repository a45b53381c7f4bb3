//! HireLens Pipeline - Post discovery and hiring classification.
//!
//! This crate provides the core run pipeline: authenticating a browsing
//! session, collecting a deduplicated set of candidate post URLs from a
//! keyword search, extracting structured content per post, classifying
//! hiring announcements, and persisting the session on every exit path.
//!
//! All stages drive the page through the [`hirelens_browser::BrowserActions`]
//! capability trait, so the whole pipeline is testable against scripted
//! fakes without a browser.
//!
//! # Example
//!
//! ```rust,ignore
//! use hirelens_pipeline::PipelineRunner;
//!
//! let runner = PipelineRunner::new(&profile, &credentials, &config);
//! let outcome = runner.run(&engine, &persister, &query).await?;
//! for result in outcome.hiring {
//!     println!("{}", result.record.url);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod auth;
pub mod classifier;
pub mod collector;
pub mod error;
pub mod extractor;
pub mod runner;
#[allow(missing_docs)]
pub mod testing;

// Re-export commonly used types
pub use auth::ensure_authenticated;
pub use classifier::{HiringClassifier, KeywordMatcher, SubstringMatcher};
pub use collector::{CandidateSet, SearchCollector};
pub use error::{PipelineError, Result};
pub use extractor::PostExtractor;
pub use runner::{PipelineRunner, RunOutcome, SessionPersister};
