//! Capability traits for the external collaborators the browser depends on.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::BlogRecord;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("upstream request failed: {0}")]
    Transport(String),
    #[error("upstream responded with status {status}")]
    Status { status: u16 },
    #[error("upstream payload could not be decoded: {0}")]
    Decode(String),
    #[error("upstream request timed out")]
    Timeout,
}

impl SourceError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Whatever the caller presented that lets upstream services recognise them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionCredentials {
    pub cookie: Option<String>,
}

impl SessionCredentials {
    pub fn from_cookie(cookie: Option<&str>) -> Self {
        Self {
            cookie: cookie
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string),
        }
    }
}

/// Only presence matters for gating; the identity is kept for logs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub user_name: Option<String>,
    pub user_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Loading,
    Authenticated(Session),
    Unauthenticated,
}

/// Supplies the complete blog collection. No filtering happens upstream.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_records(
        &self,
        credentials: &SessionCredentials,
    ) -> Result<Vec<BlogRecord>, SourceError>;
}

/// Resolves the caller's session. Failures to reach the provider surface as
/// [`SessionStatus::Loading`], never as an error.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn session(&self, credentials: &SessionCredentials) -> SessionStatus;
}
