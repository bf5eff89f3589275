//! Session-gated published-blog listing.

use std::{sync::Arc, time::Instant};

use metrics::{counter, histogram};
use tracing::{debug, warn};

use crate::application::{
    browser::{BrowserState, BrowserView, PageSize},
    sources::{
        RecordSource, Session, SessionCredentials, SessionProvider, SessionStatus, SourceError,
    },
};

pub const FETCH_TOTAL: &str = "blogdesk_source_fetch_total";
pub const FETCH_FAILURES_TOTAL: &str = "blogdesk_source_fetch_failures_total";
pub const FETCH_MS: &str = "blogdesk_source_fetch_ms";
pub const LOGIN_REDIRECT_TOTAL: &str = "blogdesk_login_redirect_total";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionGate {
    /// The provider has not answered yet; render a placeholder and nothing else.
    Loading,
    /// No session: leave for the login route.
    Redirect(String),
    Granted(Session),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogListing {
    pub state: BrowserState,
    pub view: BrowserView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelOutcome {
    Loading(BlogListing),
    Redirect(String),
    Ready(BlogListing),
}

#[derive(Clone)]
pub struct AdminBlogService {
    records: Arc<dyn RecordSource>,
    sessions: Arc<dyn SessionProvider>,
    page_size: PageSize,
    login_path: String,
}

impl AdminBlogService {
    pub fn new(
        records: Arc<dyn RecordSource>,
        sessions: Arc<dyn SessionProvider>,
        page_size: PageSize,
        login_path: impl Into<String>,
    ) -> Self {
        Self {
            records,
            sessions,
            page_size,
            login_path: login_path.into(),
        }
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn restore_state(
        &self,
        search: Option<&str>,
        previous_search: Option<&str>,
        page: Option<usize>,
    ) -> BrowserState {
        BrowserState::restore(self.page_size, search, previous_search, page)
    }

    pub async fn gate(&self, credentials: &SessionCredentials) -> SessionGate {
        match self.sessions.session(credentials).await {
            SessionStatus::Loading => SessionGate::Loading,
            SessionStatus::Unauthenticated => {
                counter!(LOGIN_REDIRECT_TOTAL).increment(1);
                debug!(
                    target = "blogdesk::blogs::session",
                    login_path = %self.login_path,
                    "no session, redirecting to login"
                );
                SessionGate::Redirect(self.login_path.clone())
            }
            SessionStatus::Authenticated(session) => {
                debug!(
                    target = "blogdesk::blogs::session",
                    user_email = session.user_email.as_deref().unwrap_or(""),
                    "session granted"
                );
                SessionGate::Granted(session)
            }
        }
    }

    /// Fetch the full collection. A failed fetch is indistinguishable from an
    /// empty one to the reader; it is only logged.
    pub async fn listing(
        &self,
        state: BrowserState,
        credentials: &SessionCredentials,
    ) -> BlogListing {
        let started = Instant::now();
        counter!(FETCH_TOTAL).increment(1);
        let records = match self.records.fetch_records(credentials).await {
            Ok(records) => records,
            Err(err) => {
                counter!(FETCH_FAILURES_TOTAL).increment(1);
                warn!(
                    target = "blogdesk::blogs::source",
                    error = %err,
                    "record fetch failed, rendering empty listing"
                );
                Vec::new()
            }
        };
        histogram!(FETCH_MS).record(started.elapsed().as_secs_f64() * 1000.0);

        let view = state.derive(&records);
        BlogListing { state, view }
    }

    /// Gate, then list. Nothing is fetched unless a session is present.
    pub async fn panel(
        &self,
        state: BrowserState,
        credentials: &SessionCredentials,
    ) -> PanelOutcome {
        match self.gate(credentials).await {
            SessionGate::Loading => PanelOutcome::Loading(BlogListing {
                view: state.loading_view(),
                state,
            }),
            SessionGate::Redirect(path) => PanelOutcome::Redirect(path),
            SessionGate::Granted(_) => PanelOutcome::Ready(self.listing(state, credentials).await),
        }
    }

    /// Reachability check for the record source.
    pub async fn source_health(&self) -> Result<usize, SourceError> {
        self.records
            .fetch_records(&SessionCredentials::default())
            .await
            .map(|records| records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::domain::{entities::BlogRecord, types::BlogStatus};

    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
        records: Vec<BlogRecord>,
        fail: bool,
    }

    #[async_trait]
    impl RecordSource for CountingSource {
        async fn fetch_records(
            &self,
            _credentials: &SessionCredentials,
        ) -> Result<Vec<BlogRecord>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(SourceError::Status { status: 500 })
            } else {
                Ok(self.records.clone())
            }
        }
    }

    struct FixedSessions(SessionStatus);

    #[async_trait]
    impl SessionProvider for FixedSessions {
        async fn session(&self, _credentials: &SessionCredentials) -> SessionStatus {
            self.0.clone()
        }
    }

    fn service(source: Arc<CountingSource>, status: SessionStatus) -> AdminBlogService {
        AdminBlogService::new(
            source,
            Arc::new(FixedSessions(status)),
            PageSize::default(),
            "/login",
        )
    }

    fn records() -> Vec<BlogRecord> {
        ["A", "B", "C", "D", "E"]
            .iter()
            .map(|title| BlogRecord {
                id: format!("id-{title}"),
                title: (*title).to_string(),
                slug: title.to_lowercase(),
                status: BlogStatus::Publish,
            })
            .collect()
    }

    #[tokio::test]
    async fn unauthenticated_redirects_once_without_fetching() {
        let source = Arc::new(CountingSource::default());
        let service = service(source.clone(), SessionStatus::Unauthenticated);
        let state = service.restore_state(None, None, None);

        let outcome = service.panel(state, &SessionCredentials::default()).await;

        assert_eq!(outcome, PanelOutcome::Redirect("/login".to_string()));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn loading_session_performs_no_other_work() {
        let source = Arc::new(CountingSource::default());
        let service = service(source.clone(), SessionStatus::Loading);
        let state = service.restore_state(Some("a"), None, Some(2));

        match service.panel(state, &SessionCredentials::default()).await {
            PanelOutcome::Loading(listing) => {
                assert!(listing.view.loading);
                assert!(listing.view.rows.is_empty());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn authenticated_lists_requested_page() {
        let source = Arc::new(CountingSource {
            records: records(),
            ..Default::default()
        });
        let service = service(
            source.clone(),
            SessionStatus::Authenticated(Session::default()),
        );
        let state = service.restore_state(None, None, Some(2));

        match service.panel(state, &SessionCredentials::default()).await {
            PanelOutcome::Ready(listing) => {
                assert_eq!(listing.view.rows.len(), 1);
                assert_eq!(listing.view.rows[0].record.title, "E");
                assert_eq!(listing.view.page_numbers, [1, 2]);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_fetch_collapses_to_empty_listing() {
        let source = Arc::new(CountingSource {
            fail: true,
            ..Default::default()
        });
        let service = service(
            source.clone(),
            SessionStatus::Authenticated(Session::default()),
        );
        let state = service.restore_state(None, None, None);

        let listing = service.listing(state, &SessionCredentials::default()).await;
        assert!(!listing.view.loading);
        assert!(listing.view.rows.is_empty());
        assert!(!listing.view.shows_pagination());
        assert!(service.source_health().await.is_err());
    }
}
