use std::{process, sync::Arc, time::Duration};

use blogdesk::{
    application::{
        admin::{blogs::AdminBlogService, chrome::AdminChromeService},
        error::AppError,
    },
    config,
    infra::{
        error::InfraError,
        http::{self, AdminState},
        telemetry,
        upstream::{HttpRecordSource, HttpSessionProvider, build_client},
    },
};
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let admin_state = build_admin_state(&settings)?;
    serve_http(&settings, admin_state).await
}

fn build_admin_state(settings: &config::Settings) -> Result<AdminState, AppError> {
    let data_source = &settings.data_source;
    let records = HttpRecordSource::new(
        build_client(data_source.timeout)?,
        &data_source.base_url,
        &data_source.endpoint,
    )?;

    let session = &settings.session.upstream;
    let sessions = HttpSessionProvider::new(
        build_client(session.timeout)?,
        &session.base_url,
        &session.endpoint,
    )?;

    info!(
        records_url = %records.url(),
        login_path = %settings.session.login_path,
        page_size = settings.blogs.page_size.get(),
        "blog browser configured"
    );

    let blogs = AdminBlogService::new(
        Arc::new(records),
        Arc::new(sessions),
        settings.blogs.page_size,
        settings.session.login_path.clone(),
    );
    let chrome = AdminChromeService::new(settings.blogs.brand_title.clone());

    Ok(AdminState::new(
        chrome,
        blogs,
        settings.blogs.flows_base_url.as_deref(),
    ))
}

async fn serve_http(settings: &config::Settings, admin_state: AdminState) -> Result<(), AppError> {
    let router = http::build_admin_router(admin_state);

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;
    info!(addr = %settings.server.addr, "listening");

    let server =
        axum::serve(listener, router.into_make_service()).with_graceful_shutdown(shutdown_signal());
    let grace = settings.server.graceful_shutdown;

    tokio::select! {
        result = server => {
            result.map_err(|err| AppError::unexpected(format!("server error: {err}")))?;
        }
        _ = shutdown_deadline(grace) => {
            warn!(
                grace_seconds = grace.as_secs(),
                "graceful shutdown timed out, dropping open connections"
            );
        }
    }

    Ok(())
}

async fn shutdown_deadline(grace: Duration) {
    shutdown_signal().await;
    tokio::time::sleep(grace).await;
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
