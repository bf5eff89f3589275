use std::sync::Once;

use metrics::{Unit, describe_counter, describe_histogram};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::application::admin::blogs::{
    FETCH_FAILURES_TOTAL, FETCH_MS, FETCH_TOTAL, LOGIN_REDIRECT_TOTAL,
};
use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Install a global tracing subscriber using the provided logging settings.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
        LogFormat::Compact => fmt::layer().compact().with_target(true).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}

fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            FETCH_TOTAL,
            Unit::Count,
            "Total number of blog collection fetches."
        );
        describe_counter!(
            FETCH_FAILURES_TOTAL,
            Unit::Count,
            "Blog collection fetches that failed and rendered as empty."
        );
        describe_histogram!(
            FETCH_MS,
            Unit::Milliseconds,
            "Blog collection fetch latency in milliseconds."
        );
        describe_counter!(
            LOGIN_REDIRECT_TOTAL,
            Unit::Count,
            "Requests sent to the login route for lack of a session."
        );
    });
}
