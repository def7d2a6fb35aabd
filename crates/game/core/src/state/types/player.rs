//! Player records.
//!
//! A player is created on first contact from the messaging platform and is
//! never deleted by the engine. Display metadata follows whatever the platform
//! last reported.

use std::fmt;

use crate::state::types::{ExternalId, PlayerId, Timestamp};

/// Identity details reported by the messaging platform on each contact.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExternalIdentity {
    pub external_id: ExternalId,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl ExternalIdentity {
    pub fn new(external_id: ExternalId) -> Self {
        Self {
            external_id,
            ..Self::default()
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_names(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = Some(first.into());
        self.last_name = Some(last.into());
        self
    }
}

/// A third-party streaming account linked to a player.
///
/// Tokens are opaque; `Debug` never prints them.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkedIdentity {
    pub username: String,
    pub account_id: String,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub connected: bool,
}

impl fmt::Debug for LinkedIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedIdentity")
            .field("username", &self.username)
            .field("account_id", &self.account_id)
            .field("access_token", &"<redacted>")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "<redacted>"),
            )
            .field("connected", &self.connected)
            .finish()
    }
}

/// Registered player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: PlayerId,
    pub external_id: ExternalId,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub linked: Option<LinkedIdentity>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Player {
    pub fn new(id: PlayerId, identity: ExternalIdentity, now: Timestamp) -> Self {
        Self {
            id,
            external_id: identity.external_id,
            username: identity.username,
            first_name: identity.first_name,
            last_name: identity.last_name,
            linked: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies metadata from a repeat contact.
    ///
    /// Only fields the platform actually reported overwrite stored ones; a
    /// missing field never clears a known value. Returns whether anything
    /// changed.
    pub fn refresh_metadata(&mut self, identity: &ExternalIdentity, now: Timestamp) -> bool {
        let mut changed = false;
        for (stored, reported) in [
            (&mut self.username, &identity.username),
            (&mut self.first_name, &identity.first_name),
            (&mut self.last_name, &identity.last_name),
        ] {
            if let Some(value) = reported {
                if stored.as_ref() != Some(value) {
                    *stored = Some(value.clone());
                    changed = true;
                }
            }
        }
        if changed {
            self.updated_at = now;
        }
        changed
    }

    /// Name to show in listings.
    pub fn display_name(&self) -> String {
        self.username
            .clone()
            .or_else(|| self.first_name.clone())
            .unwrap_or_else(|| format!("user {}", self.external_id))
    }

    pub fn link(&mut self, identity: LinkedIdentity, now: Timestamp) {
        self.linked = Some(identity);
        self.updated_at = now;
    }

    /// Drops the linked account. Returns whether one was linked.
    pub fn unlink(&mut self, now: Timestamp) -> bool {
        let had_link = self.linked.take().is_some();
        if had_link {
            self.updated_at = now;
        }
        had_link
    }

    pub fn is_linked(&self) -> bool {
        self.linked.as_ref().is_some_and(|linked| linked.connected)
    }
}
