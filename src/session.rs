//! Explicit session context for the authenticated staff member.
//!
//! A [`Session`] is created with the SDK, filled in on login and emptied on
//! logout. The HTTP layer reads the bearer token from it on every request.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

use crate::error::{DashboardError, Result};
use crate::models::{Role, User};

#[derive(Debug, Deserialize)]
struct TokenClaims {
    #[serde(rename = "_id")]
    id: String,
    role: String,
}

/// Authentication state: the raw token and the user it identifies.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
}

impl Session {
    /// An anonymous session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a session from a JWT issued by the auth endpoint.
    ///
    /// Only the payload is decoded (`_id` and `role` claims); the signature
    /// is the server's concern.
    pub fn from_token(token: &str) -> Result<Self> {
        let user = decode_user(token)?;
        Ok(Self {
            token: Some(token.to_string()),
            user: Some(user),
        })
    }

    /// Store the user and token after a successful login.
    pub fn login(&mut self, user: User, token: impl Into<String>) {
        tracing::info!(user = %user.id, role = %user.role, "session started");
        self.user = Some(user);
        self.token = Some(token.into());
    }

    /// Clear the token and user.
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!(user = %user.id, "session ended");
        }
        self.token = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// `Authorization` header value, when a token is present.
    pub fn bearer(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {t}"))
    }
}

fn decode_user(token: &str) -> Result<User> {
    let payload = token
        .split('.')
        .nth(1)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| DashboardError::Unauthorized("Malformed token".into()))?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| DashboardError::Unauthorized(format!("Token payload is not base64: {e}")))?;

    let claims: TokenClaims = serde_json::from_slice(&bytes)
        .map_err(|e| DashboardError::Unauthorized(format!("Token payload is invalid: {e}")))?;

    let role: Role = claims.role.parse()?;
    Ok(User::new(claims.id, role))
}
