use askama::Template;

use super::AdminLayout;

#[derive(Clone)]
pub struct AdminBlogRowView {
    pub position: usize,
    pub id: String,
    pub title: String,
    pub slug: String,
    pub edit_href: String,
    pub delete_href: String,
}

#[derive(Clone)]
pub struct AdminBlogPageButtonView {
    pub number: usize,
    pub action: String,
    pub is_active: bool,
}

#[derive(Clone)]
pub struct AdminBlogPaginationView {
    pub previous_action: String,
    pub previous_disabled: bool,
    pub next_action: String,
    pub next_disabled: bool,
    pub pages: Vec<AdminBlogPageButtonView>,
}

#[derive(Clone)]
pub struct AdminBlogListView {
    pub heading: String,
    pub heading_accent: String,
    pub subheading: String,
    pub breadcrumb_label: String,
    pub search_form_id: String,
    pub search_label: String,
    pub search_placeholder: String,
    pub search_query: String,
    /// Datastar action fired by the search box.
    pub search_action: String,
    pub current_page: usize,
    pub loading: bool,
    pub loading_message: String,
    pub empty_message: String,
    /// Action that fills a loading panel; `None` once rows are resolved.
    pub refresh_action: Option<String>,
    pub refresh_delay_ms: Option<u64>,
    pub rows: Vec<AdminBlogRowView>,
    pub pagination: Option<AdminBlogPaginationView>,
}

impl AdminBlogListView {
    pub fn has_rows(&self) -> bool {
        !self.rows.is_empty()
    }
}

#[derive(Clone)]
pub struct AdminLoadingView {
    pub message: String,
    pub refresh_seconds: u64,
}

#[derive(Template)]
#[template(path = "admin/blogs.html")]
pub struct AdminBlogsTemplate {
    pub view: AdminLayout<AdminBlogListView>,
}

#[derive(Template)]
#[template(path = "admin/blogs_panel.html")]
pub struct AdminBlogsPanelTemplate<'a> {
    pub content: &'a AdminBlogListView,
}

#[derive(Template)]
#[template(path = "admin/loading.html")]
pub struct AdminLoadingTemplate {
    pub view: AdminLayout<AdminLoadingView>,
}
