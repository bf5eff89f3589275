use axum::{
    extract::{Form, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    application::{
        admin::blogs::{BlogListing, PanelOutcome, SessionGate},
        stream::StreamBuilder,
    },
    infra::http::admin::{
        AdminState,
        selectors::BLOGS_PANEL,
        shared::{datastar_replace, parse_page_opt, request_credentials},
    },
    presentation::{admin::views as admin_views, views::render_template_response},
};

use super::{
    forms::{AdminBlogPanelForm, AdminBlogPanelQuery, AdminBlogQuery, PageStep},
    panel::{
        LOADING_MESSAGE, LOADING_REFRESH_SECONDS, LOADING_RETRY_MS, build_blog_list_view,
        history_path, render_blog_panel_html,
    },
};

pub(crate) async fn admin_blogs(
    State(state): State<AdminState>,
    Query(query): Query<AdminBlogQuery>,
    headers: HeaderMap,
) -> Response {
    let search = query.search.as_deref();
    let browser = state.blogs.restore_state(
        search,
        search,
        parse_page_opt(query.page.as_deref()),
    );
    let credentials = request_credentials(&headers);
    let chrome = state.chrome.load("/blogs");

    match state.blogs.gate(&credentials).await {
        SessionGate::Loading => {
            let view = admin_views::AdminLayout::new(
                chrome,
                admin_views::AdminLoadingView {
                    message: LOADING_MESSAGE.to_string(),
                    refresh_seconds: LOADING_REFRESH_SECONDS,
                },
            );
            render_template_response(admin_views::AdminLoadingTemplate { view }, StatusCode::OK)
        }
        SessionGate::Redirect(path) => Redirect::to(&path).into_response(),
        SessionGate::Granted(_) => {
            // Records arrive through the panel request fired on init.
            let listing = BlogListing {
                view: browser.loading_view(),
                state: browser,
            };
            let content = build_blog_list_view(&listing, &state.flows_base_url, None);
            let view = admin_views::AdminLayout::new(chrome, content);
            render_template_response(admin_views::AdminBlogsTemplate { view }, StatusCode::OK)
        }
    }
}

pub(crate) async fn admin_blogs_panel(
    State(state): State<AdminState>,
    Query(query): Query<AdminBlogPanelQuery>,
    headers: HeaderMap,
    Form(form): Form<AdminBlogPanelForm>,
) -> Response {
    let mut browser = state.blogs.restore_state(
        form.search.as_deref(),
        form.previous_search.as_deref(),
        parse_page_opt(form.page.as_deref()),
    );
    if let Some(page) = parse_page_opt(query.page.as_deref()) {
        browser.paginate(page);
    }
    match PageStep::parse(query.step.as_deref()) {
        Some(PageStep::Previous) => browser.previous(),
        Some(PageStep::Next) => browser.next(),
        None => {}
    }

    let credentials = request_credentials(&headers);

    match state.blogs.panel(browser, &credentials).await {
        PanelOutcome::Redirect(path) => {
            let mut stream = StreamBuilder::new();
            stream.push_navigation(&path);
            stream.into_response()
        }
        PanelOutcome::Loading(listing) => {
            let content =
                build_blog_list_view(&listing, &state.flows_base_url, Some(LOADING_RETRY_MS));
            match render_blog_panel_html(&content, "infra::http::admin_blogs_panel") {
                Ok(html) => datastar_replace(BLOGS_PANEL, html).into_response(),
                Err(err) => err.into_response(),
            }
        }
        PanelOutcome::Ready(listing) => {
            let content = build_blog_list_view(&listing, &state.flows_base_url, None);
            match render_blog_panel_html(&content, "infra::http::admin_blogs_panel") {
                Ok(html) => {
                    let mut stream = datastar_replace(BLOGS_PANEL, html);
                    stream.push_history(&history_path(&listing.state));
                    stream.into_response()
                }
                Err(err) => err.into_response(),
            }
        }
    }
}
