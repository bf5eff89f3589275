use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use blogdesk::application::{
    admin::blogs::{
        AdminBlogService, FETCH_FAILURES_TOTAL, FETCH_MS, FETCH_TOTAL, LOGIN_REDIRECT_TOTAL,
        PanelOutcome,
    },
    browser::PageSize,
    sources::{
        RecordSource, Session, SessionCredentials, SessionProvider, SessionStatus, SourceError,
    },
};
use blogdesk::domain::entities::BlogRecord;
use metrics_util::debugging::DebuggingRecorder;

struct BrokenSource;

#[async_trait]
impl RecordSource for BrokenSource {
    async fn fetch_records(
        &self,
        _credentials: &SessionCredentials,
    ) -> Result<Vec<BlogRecord>, SourceError> {
        Err(SourceError::Status { status: 502 })
    }
}

struct FixedSessions(SessionStatus);

#[async_trait]
impl SessionProvider for FixedSessions {
    async fn session(&self, _credentials: &SessionCredentials) -> SessionStatus {
        self.0.clone()
    }
}

fn service(status: SessionStatus) -> AdminBlogService {
    AdminBlogService::new(
        Arc::new(BrokenSource),
        Arc::new(FixedSessions(status)),
        PageSize::default(),
        "/login",
    )
}

#[tokio::test]
async fn browser_paths_emit_expected_metric_keys() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    recorder
        .install()
        .expect("debug metrics recorder should install in this test process");

    let credentials = SessionCredentials::default();

    let signed_in = service(SessionStatus::Authenticated(Session::default()));
    let state = signed_in.restore_state(None, None, None);
    assert!(matches!(
        signed_in.panel(state, &credentials).await,
        PanelOutcome::Ready(_)
    ));

    let anonymous = service(SessionStatus::Unauthenticated);
    let state = anonymous.restore_state(None, None, None);
    assert!(matches!(
        anonymous.panel(state, &credentials).await,
        PanelOutcome::Redirect(_)
    ));

    let names: HashSet<String> = snapshotter
        .snapshot()
        .into_vec()
        .into_iter()
        .map(|(composite_key, _, _, _)| composite_key.key().name().to_string())
        .collect();

    for expected in [FETCH_TOTAL, FETCH_FAILURES_TOTAL, FETCH_MS, LOGIN_REDIRECT_TOTAL] {
        assert!(names.contains(expected), "missing metric {expected}");
    }
}
