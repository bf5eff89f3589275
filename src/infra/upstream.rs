//! HTTP adapters for the external blog API and session endpoint.

use std::time::Duration;

use async_trait::async_trait;
use blogdesk_api_types::{BlogRecordPayload, SessionPayload};
use reqwest::{
    Client, StatusCode, Url,
    header::{ACCEPT, COOKIE},
};
use tracing::{debug, warn};

use crate::{
    application::sources::{
        RecordSource, Session, SessionCredentials, SessionProvider, SessionStatus, SourceError,
    },
    domain::entities::BlogRecord,
};

use super::error::InfraError;

pub fn user_agent() -> &'static str {
    concat!("blogdesk/", env!("CARGO_PKG_VERSION"))
}

/// Shared client for both upstreams; `timeout` bounds every request.
pub fn build_client(timeout: Duration) -> Result<Client, InfraError> {
    Client::builder()
        .user_agent(user_agent())
        .timeout(timeout)
        .build()
        .map_err(|err| InfraError::upstream(format!("failed to build http client: {err}")))
}

fn join_endpoint(base: &Url, endpoint: &str) -> Result<Url, InfraError> {
    base.join(endpoint)
        .map_err(|err| InfraError::configuration(format!("invalid endpoint `{endpoint}`: {err}")))
}

fn classify(err: reqwest::Error) -> SourceError {
    if err.is_timeout() {
        SourceError::Timeout
    } else {
        SourceError::transport(err)
    }
}

fn with_cookie(
    request: reqwest::RequestBuilder,
    credentials: &SessionCredentials,
) -> reqwest::RequestBuilder {
    match credentials.cookie.as_deref() {
        Some(cookie) => request.header(COOKIE, cookie),
        None => request,
    }
}

/// Reads the whole blog collection with one `GET`.
#[derive(Clone)]
pub struct HttpRecordSource {
    client: Client,
    url: Url,
}

impl HttpRecordSource {
    pub fn new(client: Client, base: &Url, endpoint: &str) -> Result<Self, InfraError> {
        Ok(Self {
            client,
            url: join_endpoint(base, endpoint)?,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl RecordSource for HttpRecordSource {
    async fn fetch_records(
        &self,
        credentials: &SessionCredentials,
    ) -> Result<Vec<BlogRecord>, SourceError> {
        let request = self
            .client
            .get(self.url.clone())
            .header(ACCEPT, "application/json");
        let response = with_cookie(request, credentials)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(classify)?;
        let items: Vec<serde_json::Value> =
            serde_json::from_slice(&bytes).map_err(SourceError::decode)?;
        let total = items.len();

        // A malformed element is dropped on its own; the rest still list.
        let records: Vec<BlogRecord> = items
            .into_iter()
            .enumerate()
            .filter_map(
                |(index, item)| match serde_json::from_value::<BlogRecordPayload>(item) {
                    Ok(payload) => Some(BlogRecord::from(payload)),
                    Err(err) => {
                        warn!(
                            target = "blogdesk::upstream::records",
                            url = %self.url,
                            index,
                            error = %err,
                            "skipping undecodable blog record"
                        );
                        None
                    }
                },
            )
            .collect();

        debug!(
            target = "blogdesk::upstream::records",
            url = %self.url,
            count = records.len(),
            skipped = total - records.len(),
            "fetched blog collection"
        );

        Ok(records)
    }
}

/// Asks the session endpoint who the caller is, forwarding their cookies.
#[derive(Clone)]
pub struct HttpSessionProvider {
    client: Client,
    url: Url,
}

impl HttpSessionProvider {
    pub fn new(client: Client, base: &Url, endpoint: &str) -> Result<Self, InfraError> {
        Ok(Self {
            client,
            url: join_endpoint(base, endpoint)?,
        })
    }

    async fn lookup(&self, credentials: &SessionCredentials) -> Result<SessionStatus, SourceError> {
        let request = self
            .client
            .get(self.url.clone())
            .header(ACCEPT, "application/json");
        let response = with_cookie(request, credentials)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Ok(SessionStatus::Unauthenticated);
        }
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(classify)?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(SessionStatus::Unauthenticated);
        }

        let payload: Option<SessionPayload> =
            serde_json::from_slice(&bytes).map_err(SourceError::decode)?;

        Ok(match payload.and_then(|payload| payload.user) {
            Some(user) => SessionStatus::Authenticated(Session {
                user_name: user.name,
                user_email: user.email,
            }),
            None => SessionStatus::Unauthenticated,
        })
    }
}

#[async_trait]
impl SessionProvider for HttpSessionProvider {
    async fn session(&self, credentials: &SessionCredentials) -> SessionStatus {
        match self.lookup(credentials).await {
            Ok(status) => status,
            Err(err) => {
                warn!(
                    target = "blogdesk::upstream::session",
                    url = %self.url,
                    error = %err,
                    "session lookup unresolved"
                );
                SessionStatus::Loading
            }
        }
    }
}
