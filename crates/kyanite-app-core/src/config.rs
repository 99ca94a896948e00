// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The prefs document and the service that reads and writes it.
//!
//! All tools share one JSON document:
//!
//! ```json
//! { "version": 1, "collision": { "algorithm": "edges", "circle_point_count": 30 } }
//! ```
//!
//! Each section is decoded on its own. A section that is malformed or fails
//! validation falls back to its defaults and is reported as a
//! [`PrefsIssue`]; the rest of the document still applies. Sections this
//! build does not know about are carried through untouched on save.

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::prefs::{CollisionPrefs, KyanitePrefs};

/// Document layout written by this build.
pub const PREFS_VERSION: u64 = 1;

/// Where the prefs document lives.
pub trait PrefsStore {
    /// The raw document, or `None` if none was saved yet.
    fn read(&self) -> Result<Option<Vec<u8>>, ConfigError>;
    /// Replaces the raw document.
    fn write(&self, data: &[u8]) -> Result<(), ConfigError>;
}

/// Failure to read or write the prefs document as a whole.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error while reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON encoding or decoding of the whole document failed.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// The document is JSON but not an object.
    #[error("prefs document is not a JSON object: {0}")]
    Malformed(String),
    /// The document was written by a newer layout.
    #[error("prefs version {found} is newer than supported version {}", PREFS_VERSION)]
    UnsupportedVersion {
        /// Version found in the document.
        found: u64,
    },
    /// The store could not be located or opened.
    #[error("prefs store unavailable: {0}")]
    Unavailable(String),
}

/// A section that was replaced by its defaults while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefsIssue {
    /// Section name.
    pub section: &'static str,
    /// What was wrong with it.
    pub reason: String,
}

impl fmt::Display for PrefsIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.section, self.reason)
    }
}

/// Prefs plus any sections that fell back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedPrefs {
    /// Effective preferences.
    pub prefs: KyanitePrefs,
    /// Sections that were ignored.
    pub issues: Vec<PrefsIssue>,
}

/// Reads and writes [`KyanitePrefs`] through a [`PrefsStore`].
#[derive(Debug)]
pub struct PrefsService<S> {
    store: S,
}

impl<S: PrefsStore> PrefsService<S> {
    /// Wraps a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the inner store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads every section, substituting defaults for broken ones.
    ///
    /// A missing or empty document yields all defaults with no issues.
    pub fn load(&self) -> Result<LoadedPrefs, ConfigError> {
        let Some(doc) = self.read_document()? else {
            return Ok(LoadedPrefs::default());
        };
        let mut issues = Vec::new();
        let collision = decode_collision(doc.get(CollisionPrefs::SECTION), &mut issues);
        debug!(issues = issues.len(), "prefs loaded");
        Ok(LoadedPrefs {
            prefs: KyanitePrefs { collision },
            issues,
        })
    }

    /// Writes every section, keeping sections owned by other tools.
    pub fn save(&self, prefs: &KyanitePrefs) -> Result<(), ConfigError> {
        let mut doc = self.read_document()?.unwrap_or_default();
        doc.insert("version".into(), Value::from(PREFS_VERSION));
        doc.insert(
            CollisionPrefs::SECTION.into(),
            serde_json::to_value(&prefs.collision)?,
        );
        let data = serde_json::to_vec_pretty(&Value::Object(doc))?;
        self.store.write(&data)
    }

    fn read_document(&self) -> Result<Option<Map<String, Value>>, ConfigError> {
        let Some(bytes) = self.store.read()? else {
            return Ok(None);
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        let doc = match serde_json::from_slice::<Value>(&bytes)? {
            Value::Object(doc) => doc,
            other => return Err(ConfigError::Malformed(format!("found {other}"))),
        };
        let version = doc.get("version").and_then(Value::as_u64).unwrap_or(PREFS_VERSION);
        if version > PREFS_VERSION {
            return Err(ConfigError::UnsupportedVersion { found: version });
        }
        Ok(Some(doc))
    }
}

fn decode_collision(raw: Option<&Value>, issues: &mut Vec<PrefsIssue>) -> CollisionPrefs {
    let Some(raw) = raw else {
        return CollisionPrefs::default();
    };
    let mut fail = |reason: String| {
        issues.push(PrefsIssue {
            section: CollisionPrefs::SECTION,
            reason,
        });
        CollisionPrefs::default()
    };
    match serde_json::from_value::<CollisionPrefs>(raw.clone()) {
        Ok(prefs) => match prefs.validate() {
            Ok(()) => prefs,
            Err(reason) => fail(reason),
        },
        Err(e) => fail(e.to_string()),
    }
}
