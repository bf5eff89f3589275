use std::sync::Arc;

use crate::application::admin::{blogs::AdminBlogService, chrome::AdminChromeService};

#[derive(Clone)]
pub struct AdminState {
    pub chrome: Arc<AdminChromeService>,
    pub blogs: Arc<AdminBlogService>,
    /// Prefix for the edit and delete links; empty keeps them on this host.
    pub flows_base_url: Arc<str>,
}

impl AdminState {
    pub fn new(
        chrome: AdminChromeService,
        blogs: AdminBlogService,
        flows_base_url: Option<&str>,
    ) -> Self {
        Self {
            chrome: Arc::new(chrome),
            blogs: Arc::new(blogs),
            flows_base_url: Arc::from(flows_base_url.unwrap_or("").trim_end_matches('/')),
        }
    }
}
