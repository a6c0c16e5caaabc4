//! Client session: the state that bridges one page to the next.
//!
//! Controllers receive the [`Session`] explicitly. The portal CLI persists it
//! between invocations through [`SessionStore`], which wraps the JSON in a
//! SHA-256 checksummed envelope:
//!
//! 1. A checksum is computed over the serialized session on save
//! 2. The checksum is verified on load
//! 3. Corrupted or edited files load as an empty session

use anyhow::Context;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

use crate::models::ScoreResult;

/// State carried across page navigations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Identifier returned by registration.
    pub user_id: Option<String>,
    /// The most recent score calculation, kept for the result page.
    pub score_result: Option<ScoreResult>,
}

impl Session {
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn set_user_id(&mut self, id: impl Into<String>) {
        self.user_id = Some(id.into());
    }

    pub fn score_result(&self) -> Option<&ScoreResult> {
        self.score_result.as_ref()
    }

    pub fn store_score_result(&mut self, result: ScoreResult) {
        self.score_result = Some(result);
    }
}

/// Serialized session plus the checksum it was saved with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEnvelope {
    /// The session as a JSON string.
    pub data: String,
    /// SHA-256 of `data`, hex encoded.
    pub checksum: String,
}

impl SessionEnvelope {
    /// Seals `data` with a freshly computed checksum.
    pub fn new(data: String) -> Self {
        let checksum = Self::compute_checksum(&data);
        Self { data, checksum }
    }

    fn compute_checksum(data: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data.as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn is_valid(&self) -> bool {
        Self::compute_checksum(&self.data) == self.checksum
    }

    /// Parses an envelope and returns its data if the checksum holds.
    pub fn open(serialized: &str) -> Option<String> {
        let envelope: SessionEnvelope = serde_json::from_str(serialized).ok()?;

        if envelope.is_valid() {
            Some(envelope.data)
        } else {
            tracing::warn!(
                "Session checksum mismatch. Expected: {}, Data length: {}",
                envelope.checksum,
                envelope.data.len()
            );
            None
        }
    }
}

/// File-backed persistence for [`Session`].
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the saved session.
    ///
    /// A missing, unreadable, corrupt or tampered file yields an empty session.
    pub fn load(&self) -> Session {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No session file at {}", self.path.display());
                return Session::default();
            }
            Err(e) => {
                tracing::warn!("Failed to read session {}: {}", self.path.display(), e);
                return Session::default();
            }
        };

        let Some(data) = SessionEnvelope::open(&raw) else {
            tracing::warn!("Discarding invalid session file {}", self.path.display());
            return Session::default();
        };

        match serde_json::from_str(&data) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Session payload did not parse: {}", e);
                Session::default()
            }
        }
    }

    pub fn save(&self, session: &Session) -> anyhow::Result<()> {
        let data = serde_json::to_string(session).context("Failed to serialize session")?;
        let envelope = serde_json::to_string_pretty(&SessionEnvelope::new(data))
            .context("Failed to serialize session envelope")?;

        std::fs::write(&self.path, envelope)
            .with_context(|| format!("Failed to write session {}", self.path.display()))?;
        tracing::debug!("Session saved to {}", self.path.display());
        Ok(())
    }

    /// Removes the session file. A file that does not exist is not an error.
    pub fn clear(&self) -> anyhow::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to remove session {}", self.path.display())),
        }
    }
}
