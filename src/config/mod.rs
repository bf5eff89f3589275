//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use clap::{Args, Parser, Subcommand, builder::BoolishValueParser};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

use crate::application::browser::{DEFAULT_PAGE_SIZE, PageSize};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "blogdesk";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_GRACEFUL_SHUTDOWN_SECS: u64 = 30;
const DEFAULT_UPSTREAM_BASE_URL: &str = "http://127.0.0.1:3000";
const DEFAULT_DATA_SOURCE_ENDPOINT: &str = "/api/blogApi";
const DEFAULT_SESSION_ENDPOINT: &str = "/api/auth/session";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LOGIN_PATH: &str = "/login";
const DEFAULT_BRAND_TITLE: &str = "Blog Admin";

/// Command-line arguments for the blogdesk binary.
#[derive(Debug, Parser)]
#[command(
    name = "blogdesk",
    version,
    about = "Admin listing of published blog records"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "BLOGDESK_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the admin HTTP service.
    Serve(Box<ServeArgs>),
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub overrides: ServeOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeOverrides {
    /// Override the listener host.
    #[arg(long = "server-host", value_name = "HOST")]
    pub server_host: Option<String>,

    /// Override the listener port.
    #[arg(long = "server-port", value_name = "PORT")]
    pub server_port: Option<u16>,

    /// Override the graceful shutdown timeout.
    #[arg(long = "server-graceful-shutdown-seconds", value_name = "SECONDS")]
    pub server_graceful_shutdown_seconds: Option<u64>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    /// Override the base URL of the blog API.
    #[arg(long = "data-source-url", value_name = "URL")]
    pub data_source_url: Option<String>,

    /// Override the base URL of the session endpoint.
    #[arg(long = "session-url", value_name = "URL")]
    pub session_url: Option<String>,

    /// Override the path unauthenticated visitors are sent to.
    #[arg(long = "login-path", value_name = "PATH")]
    pub login_path: Option<String>,

    /// Override the number of rows per page.
    #[arg(long = "page-size", value_name = "COUNT")]
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub data_source: UpstreamSettings,
    pub session: SessionSettings,
    pub blogs: BlogSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub addr: SocketAddr,
    pub graceful_shutdown: Duration,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

/// An HTTP collaborator: where it lives and how long to wait for it.
#[derive(Debug, Clone)]
pub struct UpstreamSettings {
    pub base_url: Url,
    pub endpoint: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub upstream: UpstreamSettings,
    pub login_path: String,
}

#[derive(Debug, Clone)]
pub struct BlogSettings {
    pub page_size: PageSize,
    pub brand_title: String,
    pub flows_base_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix("BLOGDESK").separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;

    match cli.command.as_ref() {
        Some(Command::Serve(args)) => raw.apply_serve_overrides(&args.overrides),
        None => raw.apply_serve_overrides(&ServeOverrides::default()),
    }

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    server: RawServerSettings,
    logging: RawLoggingSettings,
    data_source: RawUpstreamSettings,
    session: RawSessionSettings,
    blogs: RawBlogSettings,
}

impl RawSettings {
    fn apply_serve_overrides(&mut self, overrides: &ServeOverrides) {
        if let Some(host) = overrides.server_host.as_ref() {
            self.server.host = Some(host.clone());
        }
        if let Some(port) = overrides.server_port {
            self.server.port = Some(port);
        }
        if let Some(seconds) = overrides.server_graceful_shutdown_seconds {
            self.server.graceful_shutdown_seconds = Some(seconds);
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
        if let Some(url) = overrides.data_source_url.as_ref() {
            self.data_source.base_url = Some(url.clone());
        }
        if let Some(url) = overrides.session_url.as_ref() {
            self.session.base_url = Some(url.clone());
        }
        if let Some(path) = overrides.login_path.as_ref() {
            self.session.login_path = Some(path.clone());
        }
        if let Some(size) = overrides.page_size {
            self.blogs.page_size = Some(size);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            server,
            logging,
            data_source,
            session,
            blogs,
        } = raw;

        let server = build_server_settings(server)?;
        let logging = build_logging_settings(logging)?;
        let data_source = build_upstream_settings(
            data_source,
            DEFAULT_DATA_SOURCE_ENDPOINT,
            UpstreamKeys {
                base_url: "data_source.base_url",
                endpoint: "data_source.endpoint",
                timeout: "data_source.timeout_seconds",
            },
        )?;
        let session = build_session_settings(session)?;
        let blogs = build_blog_settings(blogs)?;

        Ok(Self {
            server,
            logging,
            data_source,
            session,
            blogs,
        })
    }
}

fn build_server_settings(server: RawServerSettings) -> Result<ServerSettings, LoadError> {
    let host = server.host.unwrap_or_else(|| DEFAULT_HOST.to_string());

    let port = server.port.unwrap_or(DEFAULT_PORT);
    if port == 0 {
        return Err(LoadError::invalid(
            "server.port",
            "port must be greater than zero",
        ));
    }

    let addr = parse_socket_addr(&host, port)
        .map_err(|reason| LoadError::invalid("server.addr", reason))?;

    let graceful_secs = server
        .graceful_shutdown_seconds
        .unwrap_or(DEFAULT_GRACEFUL_SHUTDOWN_SECS);
    if graceful_secs == 0 {
        return Err(LoadError::invalid(
            "server.graceful_shutdown_seconds",
            "must be greater than zero",
        ));
    }

    Ok(ServerSettings {
        addr,
        graceful_shutdown: Duration::from_secs(graceful_secs),
    })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

struct UpstreamKeys {
    base_url: &'static str,
    endpoint: &'static str,
    timeout: &'static str,
}

fn build_upstream_settings(
    raw: RawUpstreamSettings,
    default_endpoint: &str,
    keys: UpstreamKeys,
) -> Result<UpstreamSettings, LoadError> {
    let base = non_blank(raw.base_url).unwrap_or_else(|| DEFAULT_UPSTREAM_BASE_URL.to_string());
    let base_url = Url::parse(&base)
        .map_err(|err| LoadError::invalid(keys.base_url, format!("invalid url `{base}`: {err}")))?;
    if !matches!(base_url.scheme(), "http" | "https") {
        return Err(LoadError::invalid(
            keys.base_url,
            "scheme must be http or https",
        ));
    }

    let endpoint = non_blank(raw.endpoint).unwrap_or_else(|| default_endpoint.to_string());
    if !endpoint.starts_with('/') {
        return Err(LoadError::invalid(keys.endpoint, "must start with `/`"));
    }

    let timeout_secs = raw
        .timeout_seconds
        .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(LoadError::invalid(keys.timeout, "must be greater than zero"));
    }

    Ok(UpstreamSettings {
        base_url,
        endpoint,
        timeout: Duration::from_secs(timeout_secs),
    })
}

fn build_session_settings(session: RawSessionSettings) -> Result<SessionSettings, LoadError> {
    let RawSessionSettings {
        base_url,
        endpoint,
        timeout_seconds,
        login_path,
    } = session;

    let upstream = build_upstream_settings(
        RawUpstreamSettings {
            base_url,
            endpoint,
            timeout_seconds,
        },
        DEFAULT_SESSION_ENDPOINT,
        UpstreamKeys {
            base_url: "session.base_url",
            endpoint: "session.endpoint",
            timeout: "session.timeout_seconds",
        },
    )?;

    let login_path = non_blank(login_path).unwrap_or_else(|| DEFAULT_LOGIN_PATH.to_string());
    if !login_path.starts_with('/') && Url::parse(&login_path).is_err() {
        return Err(LoadError::invalid(
            "session.login_path",
            "must be an absolute path or url",
        ));
    }

    Ok(SessionSettings {
        upstream,
        login_path,
    })
}

fn build_blog_settings(blogs: RawBlogSettings) -> Result<BlogSettings, LoadError> {
    let page_size = PageSize::new(blogs.page_size.unwrap_or(DEFAULT_PAGE_SIZE))
        .map_err(|err| LoadError::invalid("blogs.page_size", err.to_string()))?;

    let brand_title =
        non_blank(blogs.brand_title).unwrap_or_else(|| DEFAULT_BRAND_TITLE.to_string());

    let flows_base_url = match non_blank(blogs.flows_base_url) {
        Some(value) => {
            Url::parse(&value).map_err(|err| {
                LoadError::invalid("blogs.flows_base_url", format!("invalid url: {err}"))
            })?;
            Some(value)
        }
        None => None,
    };

    Ok(BlogSettings {
        page_size,
        brand_title,
        flows_base_url,
    })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawServerSettings {
    host: Option<String>,
    port: Option<u16>,
    graceful_shutdown_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawUpstreamSettings {
    base_url: Option<String>,
    endpoint: Option<String>,
    timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSessionSettings {
    base_url: Option<String>,
    endpoint: Option<String>,
    timeout_seconds: Option<u64>,
    login_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawBlogSettings {
    page_size: Option<usize>,
    brand_title: Option<String>,
    flows_base_url: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

fn parse_socket_addr(host: &str, port: u16) -> Result<SocketAddr, String> {
    let candidate = format!("{host}:{port}");
    candidate
        .parse()
        .map_err(|err| format!("invalid address `{candidate}`: {err}"))
}

pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}
