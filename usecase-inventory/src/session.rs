//! Demo-mode sign-in.
//!
//! Any non-blank email and password pair is accepted. The resulting session
//! gates nothing; it only carries the display identity for the front-end.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{InventoryError, Result};

/// A signed-in demo user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub email: String,
    pub signed_in_at: DateTime<Utc>,
}

/// Accepts any non-blank credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoAuthenticator;

impl DemoAuthenticator {
    pub fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        if email.trim().is_empty() || password.is_empty() {
            tracing::debug!("Rejected sign-in with blank credentials");
            return Err(InventoryError::MissingCredentials);
        }

        tracing::info!(email = %email.trim(), "Signed in (demo mode)");
        Ok(Session {
            email: email.trim().to_string(),
            signed_in_at: Utc::now(),
        })
    }
}
