//! Pipeline error taxonomy.
//!
//! Session-level failures are fatal for the run; per-post failures are
//! recovered locally by the extractor (`Unavailable` records) and never
//! surface here.

use hirelens_browser::BrowserError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A precondition was not met; no browsing has been attempted.
    #[error("precondition failed: {0}")]
    PreconditionFailed(String),

    /// Credentials were rejected by the network. Terminal; repeated
    /// failed logins risk an account lock, so there is no retry.
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The network demanded a secondary verification challenge. Terminal;
    /// the run must be resumed manually after the challenge is solved.
    #[error("verification challenge required: {0}")]
    AuthChallengeRequired(String),

    /// The profile directory is held by another live run.
    #[error("profile directory already in use: {}", .0.display())]
    ResourceLocked(PathBuf),

    /// The run was interrupted by the user.
    #[error("interrupted")]
    Interrupted,

    /// Browser automation failed at session level.
    #[error("browser error: {0}")]
    Browser(BrowserError),
}

impl PipelineError {
    /// Short name of the stage or condition, for run reporting.
    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            Self::PreconditionFailed(_) => "precondition",
            Self::AuthFailed(_) | Self::AuthChallengeRequired(_) => "authentication",
            Self::ResourceLocked(_) => "profile-lock",
            Self::Interrupted => "interrupt",
            Self::Browser(_) => "browser",
        }
    }
}

impl From<BrowserError> for PipelineError {
    fn from(err: BrowserError) -> Self {
        match err {
            BrowserError::ProfileLocked(path) => Self::ResourceLocked(path),
            other => Self::Browser(other),
        }
    }
}

/// Result type alias using `PipelineError`.
pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_lock_maps_to_resource_locked() {
        let err: PipelineError =
            BrowserError::ProfileLocked(PathBuf::from("/tmp/session_usa")).into();
        assert!(matches!(err, PipelineError::ResourceLocked(_)));
        assert_eq!(err.stage(), "profile-lock");
    }

    #[test]
    fn test_other_browser_errors_pass_through() {
        let err: PipelineError =
            BrowserError::Timeout("selector '.feed' not found within 5000ms".to_string()).into();
        assert!(matches!(err, PipelineError::Browser(_)));
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(
            PipelineError::AuthFailed("bad password".to_string()).stage(),
            "authentication"
        );
        assert_eq!(PipelineError::Interrupted.stage(), "interrupt");
    }
}
