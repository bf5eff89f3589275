use serde::Deserialize;

/// Query string of the full page.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct AdminBlogQuery {
    pub(super) search: Option<String>,
    pub(super) page: Option<String>,
}

/// View state posted by the search form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct AdminBlogPanelForm {
    pub(super) search: Option<String>,
    pub(super) previous_search: Option<String>,
    pub(super) page: Option<String>,
}

/// Navigation requested by a pagination button, carried in the query string
/// so it can override the page held by the form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct AdminBlogPanelQuery {
    pub(super) page: Option<String>,
    pub(super) step: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum PageStep {
    Previous,
    Next,
}

impl PageStep {
    pub(super) fn parse(value: Option<&str>) -> Option<Self> {
        match value.map(str::trim) {
            Some("previous") | Some("prev") => Some(Self::Previous),
            Some("next") => Some(Self::Next),
            _ => None,
        }
    }

    pub(super) fn as_str(self) -> &'static str {
        match self {
            Self::Previous => "previous",
            Self::Next => "next",
        }
    }
}
