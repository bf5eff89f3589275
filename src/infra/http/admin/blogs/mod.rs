mod forms;
mod handlers;
mod panel;

pub(super) use handlers::{admin_blogs, admin_blogs_panel};
