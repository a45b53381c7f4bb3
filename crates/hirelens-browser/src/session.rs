//! Session persistence for a profile directory.
//!
//! Chromium already persists cookies and local storage inside the
//! profile directory; the store additionally dumps a cookie snapshot
//! and a marker file so a later run can tell when the session was last
//! saved without launching a browser. Persistence is best-effort: a
//! failure is logged and never fails the run.

use crate::engine::BrowserEngine;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const COOKIES_FILE: &str = "cookies.json";
const MARKER_FILE: &str = "session.json";

/// Metadata about the last persisted session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMarker {
    /// When the session was last flushed
    pub saved_at: DateTime<Utc>,
    /// Number of cookies in the snapshot
    pub cookie_count: usize,
}

/// Writes session artifacts into a profile's session directory.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Create a store for a session directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory this store writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Flush the engine's session state to disk, best-effort.
    ///
    /// Failures are logged at warn level and swallowed; a run must
    /// never abort because persistence failed.
    pub async fn persist(&self, engine: &BrowserEngine) {
        match self.try_persist(engine).await {
            Ok(marker) => {
                debug!(
                    cookies = marker.cookie_count,
                    dir = %self.dir.display(),
                    "session persisted"
                );
            }
            Err(e) => {
                warn!("Failed to persist session to {}: {}", self.dir.display(), e);
            }
        }
    }

    async fn try_persist(&self, engine: &BrowserEngine) -> Result<SessionMarker> {
        let cookies = engine.cookies().await?;
        fs::create_dir_all(&self.dir)?;

        let cookies_json = serde_json::to_vec_pretty(&cookies)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(self.dir.join(COOKIES_FILE), cookies_json)?;

        let marker = SessionMarker {
            saved_at: Utc::now(),
            cookie_count: cookies.len(),
        };
        let marker_json = serde_json::to_vec_pretty(&marker)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(self.dir.join(MARKER_FILE), marker_json)?;

        Ok(marker)
    }

    /// Read back the marker from a previous run, if any.
    pub fn load_marker(&self) -> Option<SessionMarker> {
        let contents = fs::read_to_string(self.dir.join(MARKER_FILE)).ok()?;
        serde_json::from_str(&contents).ok()
    }
}
