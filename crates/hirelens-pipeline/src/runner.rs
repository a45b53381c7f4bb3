//! Sequential run driver for the discovery pipeline.
//!
//! One page handle is used serially: session controller, then search
//! collector, then post extractor one post at a time. There is no
//! parallel fan-out across posts; concurrent tabs sharing one profile
//! risk inconsistent state and amplify anti-automation detection.
//!
//! The session is persisted on every exit path, including fatal errors
//! and user interrupts.

use crate::auth::ensure_authenticated;
use crate::classifier::HiringClassifier;
use crate::collector::SearchCollector;
use crate::error::{PipelineError, Result};
use crate::extractor::PostExtractor;
use hirelens_browser::BrowserActions;
use hirelens_core::{AppConfig, ClassificationResult, CountryProfile, Credentials, SearchQuery};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Flushes session state at the end of a run. Best-effort by contract;
/// implementations must not fail the run.
#[async_trait::async_trait]
pub trait SessionPersister: Send + Sync {
    /// Persist whatever session state exists.
    async fn persist(&self);
}

/// What a run produced.
#[derive(Debug)]
pub struct RunOutcome {
    /// Hiring-positive classification results, in discovery order
    pub hiring: Vec<ClassificationResult>,
    /// Number of candidate URLs collected
    pub candidates: usize,
    /// Number of posts actually visited
    pub extracted: usize,
    /// Whether the run was cut short by a user interrupt
    pub interrupted: bool,
}

/// Drives one full run against an authenticated page.
pub struct PipelineRunner<'a> {
    profile: &'a CountryProfile,
    credentials: &'a Credentials,
    classifier: HiringClassifier,
    extractor: PostExtractor,
    cancel: CancellationToken,
}

impl<'a> PipelineRunner<'a> {
    /// Build a runner from configuration.
    #[must_use]
    pub fn new(
        profile: &'a CountryProfile,
        credentials: &'a Credentials,
        config: &AppConfig,
    ) -> Self {
        Self {
            profile,
            credentials,
            classifier: HiringClassifier::from_config(&config.classifier),
            extractor: PostExtractor::new(Duration::from_secs(
                config.browser.navigation_timeout_secs,
            )),
            cancel: CancellationToken::new(),
        }
    }

    /// Use an externally-owned cancellation token (Ctrl-C wiring).
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Execute the pipeline. The persister runs on every exit path,
    /// fatal errors and interrupts included.
    pub async fn run(
        &self,
        actions: &dyn BrowserActions,
        persister: &dyn SessionPersister,
        query: &SearchQuery,
    ) -> Result<RunOutcome> {
        let result = self.run_inner(actions, query).await;
        persister.persist().await;
        result
    }

    async fn run_inner(
        &self,
        actions: &dyn BrowserActions,
        query: &SearchQuery,
    ) -> Result<RunOutcome> {
        // Checked again here so the pipeline itself upholds the
        // contract regardless of the caller: no browsing without
        // credentials.
        if self.credentials.email.is_empty() || self.credentials.password.is_empty() {
            return Err(PipelineError::PreconditionFailed(format!(
                "missing credentials for {}",
                self.profile.name
            )));
        }

        ensure_authenticated(actions, self.profile, self.credentials).await?;

        let collector = SearchCollector::new(self.profile);
        let candidates = match collector.collect(actions, query, &self.cancel).await {
            Ok(set) => set,
            Err(PipelineError::Interrupted) => {
                warn!("Interrupted during collection");
                return Ok(RunOutcome {
                    hiring: Vec::new(),
                    candidates: 0,
                    extracted: 0,
                    interrupted: true,
                });
            }
            Err(e) => return Err(e),
        };

        let total = candidates.len();
        let mut hiring = Vec::new();
        let mut extracted = 0usize;
        let mut interrupted = false;

        for (index, url) in candidates.iter().enumerate() {
            if self.cancel.is_cancelled() {
                interrupted = true;
                break;
            }

            let record = self.extractor.extract(actions, url).await;
            extracted += 1;

            let result = self.classifier.classify(record);
            if result.hiring {
                info!(
                    url = %result.record.url,
                    matched = ?result.matched,
                    "hiring post found"
                );
                hiring.push(result);
            }

            // Floor delay between posts, interruptible
            if index + 1 < total {
                tokio::select! {
                    () = self.cancel.cancelled() => {
                        interrupted = true;
                        break;
                    }
                    () = tokio::time::sleep(query.delay()) => {}
                }
            }
        }

        if interrupted {
            warn!(
                "Interrupted after {extracted}/{total} posts, keeping partial results"
            );
        } else {
            info!(
                "Run complete: {} hiring posts out of {extracted} extracted",
                hiring.len()
            );
        }

        Ok(RunOutcome {
            hiring,
            candidates: total,
            extracted,
            interrupted,
        })
    }
}
