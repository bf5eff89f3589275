use askama::Error as AskamaError;
use axum::http::{HeaderMap, header::COOKIE};
use datastar::prelude::ElementPatchMode;

use crate::{
    application::{error::HttpError, sources::SessionCredentials, stream::StreamBuilder},
    presentation::views::TemplateRenderError,
};

/// Page numbers arrive as text; anything that is not a number is ignored.
pub(super) fn parse_page_opt(value: Option<&str>) -> Option<usize> {
    value.and_then(|v| v.trim().parse::<usize>().ok())
}

/// Cookies are forwarded as-is to both upstreams.
pub(super) fn request_credentials(headers: &HeaderMap) -> SessionCredentials {
    let cookie = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect::<Vec<_>>()
        .join("; ");
    SessionCredentials::from_cookie(Some(cookie.as_str()))
}

pub(super) fn datastar_replace(selector: &str, html: String) -> StreamBuilder {
    let mut stream = StreamBuilder::new();
    stream.push_patch(html, selector, ElementPatchMode::Replace);
    stream
}

pub(super) fn template_render_http_error(
    source: &'static str,
    message: &'static str,
    err: AskamaError,
) -> HttpError {
    HttpError::from(TemplateRenderError::new(source, message, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn page_parsing_is_lenient() {
        assert_eq!(parse_page_opt(Some("2")), Some(2));
        assert_eq!(parse_page_opt(Some(" 3 ")), Some(3));
        assert_eq!(parse_page_opt(Some("two")), None);
        assert_eq!(parse_page_opt(Some("-1")), None);
        assert_eq!(parse_page_opt(None), None);
    }

    #[test]
    fn cookie_headers_are_joined() {
        let mut headers = HeaderMap::new();
        assert_eq!(request_credentials(&headers).cookie, None);

        headers.append(COOKIE, HeaderValue::from_static("a=1"));
        headers.append(COOKIE, HeaderValue::from_static("b=2"));
        assert_eq!(request_credentials(&headers).cookie.as_deref(), Some("a=1; b=2"));
    }
}
