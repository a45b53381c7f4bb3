//! Single-writer lock for a persistent profile directory.
//!
//! Chromium corrupts a profile when two instances share it, so exactly
//! one live engine may hold a session directory. A second run against
//! the same directory fails fast with `ProfileLocked` instead of
//! retrying.

use crate::error::{BrowserError, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const LOCK_FILE_NAME: &str = "hirelens.lock";

/// Guard holding exclusive access to a profile directory.
///
/// The lock file is created exclusively on acquire and removed on drop.
/// A lock left behind by a dead process is reclaimed.
#[derive(Debug)]
pub struct ProfileLock {
    path: PathBuf,
}

impl ProfileLock {
    /// Acquire the lock for a session directory, creating the directory
    /// if needed.
    ///
    /// # Errors
    /// Returns `ProfileLocked` if another live process holds the lock.
    pub fn acquire(session_dir: &Path) -> Result<Self> {
        fs::create_dir_all(session_dir)?;
        let path = session_dir.join(LOCK_FILE_NAME);

        match Self::try_create(&path) {
            Ok(lock) => Ok(lock),
            Err(BrowserError::ProfileLocked(_)) if Self::is_stale(&path) => {
                warn!("Reclaiming stale profile lock at {}", path.display());
                fs::remove_file(&path)?;
                Self::try_create(&path)
            }
            Err(e) => Err(e),
        }
    }

    fn try_create(path: &Path) -> Result<Self> {
        match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(mut file) => {
                write!(file, "{}", std::process::id())?;
                debug!("Acquired profile lock at {}", path.display());
                Ok(Self {
                    path: path.to_path_buf(),
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(BrowserError::ProfileLocked(
                    path.parent().unwrap_or(path).to_path_buf(),
                ))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// A lock is stale when its owning process is gone or its contents
    /// are unreadable.
    fn is_stale(path: &Path) -> bool {
        let Ok(contents) = fs::read_to_string(path) else {
            return true;
        };
        let Ok(pid) = contents.trim().parse::<u32>() else {
            return true;
        };

        #[cfg(target_os = "linux")]
        {
            !Path::new(&format!("/proc/{pid}")).exists()
        }
        #[cfg(not(target_os = "linux"))]
        {
            // No cheap liveness check off Linux; err on the safe side.
            let _ = pid;
            false
        }
    }
}

impl Drop for ProfileLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!("Failed to remove profile lock {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_acquire_and_release() {
        let tmp = TempDir::new().expect("create temp dir");
        let lock_path = tmp.path().join(LOCK_FILE_NAME);

        {
            let _lock = ProfileLock::acquire(tmp.path()).expect("acquire lock");
            assert!(lock_path.exists());
        }

        // Released on drop
        assert!(!lock_path.exists());
    }

    #[test]
    fn test_second_acquire_fails_fast() {
        let tmp = TempDir::new().expect("create temp dir");

        let _held = ProfileLock::acquire(tmp.path()).expect("acquire lock");
        let second = ProfileLock::acquire(tmp.path());

        assert!(matches!(second, Err(BrowserError::ProfileLocked(_))));
    }

    #[test]
    fn test_stale_lock_is_reclaimed() {
        let tmp = TempDir::new().expect("create temp dir");
        let lock_path = tmp.path().join(LOCK_FILE_NAME);

        // Garbage contents count as stale
        fs::write(&lock_path, "not-a-pid").expect("write stale lock");

        let lock = ProfileLock::acquire(tmp.path());
        assert!(lock.is_ok());
    }

    #[test]
    fn test_acquire_creates_missing_directory() {
        let tmp = TempDir::new().expect("create temp dir");
        let nested = tmp.path().join("session_test");

        let _lock = ProfileLock::acquire(&nested).expect("acquire lock");
        assert!(nested.exists());
    }
}
