use askama::Template;
use url::{Url, form_urlencoded::Serializer};

use crate::{
    application::{admin::blogs::BlogListing, browser::BrowserState, error::HttpError},
    infra::http::admin::shared::template_render_http_error,
    presentation::admin::views as admin_views,
};

use super::forms::PageStep;

pub(super) const SEARCH_FORM_ID: &str = "blog-search";
const PANEL_PATH: &str = "/blogs/panel";

/// Delay before a loading panel asks again.
pub(super) const LOADING_RETRY_MS: u64 = 1500;
/// Meta refresh interval of the full-page placeholder.
pub(super) const LOADING_REFRESH_SECONDS: u64 = 2;
pub(super) const LOADING_MESSAGE: &str = "Loading...";

/// Every interaction posts the search form, which also carries the hidden
/// `previous_search` and `page` fields.
fn panel_action(query: Option<String>) -> String {
    let path = match query {
        Some(query) => format!("{PANEL_PATH}?{query}"),
        None => PANEL_PATH.to_string(),
    };
    format!("@post('{path}', {{contentType: 'form', selector: '#{SEARCH_FORM_ID}'}})")
}

fn page_action(page: usize) -> String {
    panel_action(Some(format!("page={page}")))
}

fn step_action(step: PageStep) -> String {
    panel_action(Some(format!("step={}", step.as_str())))
}

/// `{prefix}/blogs/{flow}/{id}` with `id` percent-encoded as one path segment.
fn flow_href(flows_base_url: &str, flow: &str, id: &str) -> String {
    let path = match Url::parse("http://localhost/") {
        Ok(mut url) => {
            if let Ok(mut segments) = url.path_segments_mut() {
                segments.clear().extend(["blogs", flow, id]);
            }
            url.path().to_string()
        }
        Err(_) => format!("/blogs/{flow}/{id}"),
    };
    format!("{flows_base_url}{path}")
}

pub(super) fn build_blog_list_view(
    listing: &BlogListing,
    flows_base_url: &str,
    refresh_delay_ms: Option<u64>,
) -> admin_views::AdminBlogListView {
    let BlogListing { state, view } = listing;

    let rows = view
        .rows
        .iter()
        .map(|row| {
            let record = &row.record;
            admin_views::AdminBlogRowView {
                position: row.position,
                id: record.id.clone(),
                title: record.title.clone(),
                slug: record.slug.clone(),
                edit_href: flow_href(flows_base_url, "edit", &record.id),
                delete_href: flow_href(flows_base_url, "delete", &record.id),
            }
        })
        .collect();

    let pagination = (!view.loading && view.shows_pagination()).then(|| {
        admin_views::AdminBlogPaginationView {
            previous_action: step_action(PageStep::Previous),
            previous_disabled: view.previous_disabled,
            next_action: step_action(PageStep::Next),
            next_disabled: view.next_disabled,
            pages: view
                .page_numbers
                .iter()
                .map(|&number| admin_views::AdminBlogPageButtonView {
                    number,
                    action: page_action(number),
                    is_active: number == view.current_page,
                })
                .collect(),
        }
    });

    let refresh_action = view.loading.then(|| panel_action(None));
    let refresh_delay_ms = refresh_action.as_ref().and(refresh_delay_ms);

    admin_views::AdminBlogListView {
        heading: "All Published".to_string(),
        heading_accent: "Blogs".to_string(),
        subheading: "Super User Panel".to_string(),
        breadcrumb_label: "Blogs".to_string(),
        search_form_id: SEARCH_FORM_ID.to_string(),
        search_label: "Search Blogs:".to_string(),
        search_placeholder: "search by title...".to_string(),
        search_query: state.search_query().to_string(),
        search_action: panel_action(None),
        current_page: state.current_page(),
        loading: view.loading,
        loading_message: LOADING_MESSAGE.to_string(),
        empty_message: "No Data Found".to_string(),
        refresh_action,
        refresh_delay_ms,
        rows,
        pagination,
    }
}

pub(super) fn render_blog_panel_html(
    content: &admin_views::AdminBlogListView,
    template_source: &'static str,
) -> Result<String, HttpError> {
    let template = admin_views::AdminBlogsPanelTemplate { content };

    template.render().map_err(|err| {
        template_render_http_error(template_source, "Template rendering failed", err)
    })
}

/// Address that reopens the page on the same view state.
pub(super) fn history_path(state: &BrowserState) -> String {
    let mut serializer = Serializer::new(String::new());
    if !state.search_query().is_empty() {
        serializer.append_pair("search", state.search_query());
    }
    serializer.append_pair("page", &state.current_page().to_string());
    format!("/blogs?{}", serializer.finish())
}
