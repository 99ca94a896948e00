// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The prefs document as `kyanite.json` in a config directory.

use directories::ProjectDirs;
use kyanite_app_core::config::{ConfigError, PrefsStore};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the prefs document.
pub const PREFS_FILE: &str = "kyanite.json";

/// Keeps the prefs document in one directory.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct FsPrefsStore {
    path: PathBuf,
}

impl FsPrefsStore {
    /// Store in the platform config directory (e.g. `~/.config/kyanite`).
    pub fn user() -> Result<Self, ConfigError> {
        let proj = ProjectDirs::from("dev", "rubynaxela", "Kyanite")
            .ok_or_else(|| ConfigError::Unavailable("no home directory".into()))?;
        Ok(Self::in_dir(proj.config_dir()))
    }

    /// Store in `dir`; the directory is created on first write.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(PREFS_FILE),
        }
    }

    /// Full path of the prefs document.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PrefsStore for FsPrefsStore {
    fn read(&self) -> Result<Option<Vec<u8>>, ConfigError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no prefs document");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, data: &[u8]) -> Result<(), ConfigError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, data)?;
        fs::rename(&staging, &self.path)?;
        debug!(path = %self.path.display(), bytes = data.len(), "prefs saved");
        Ok(())
    }
}
