//! Shared CSS selectors used by admin Datastar responses.

pub const BLOGS_PANEL: &str = "[data-admin-panel=\"blogs\"]";
