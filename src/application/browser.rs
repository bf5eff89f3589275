//! Published-items browser: the view state a reader drives and the listing
//! derived from it.
//!
//! Everything here is pure. Callers rebuild a [`BrowserView`] from the latest
//! record snapshot after every interaction; no derived value is cached.

use std::num::NonZeroUsize;

use crate::domain::{entities::BlogRecord, error::DomainError};

pub const DEFAULT_PAGE_SIZE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    pub fn new(value: usize) -> Result<Self, DomainError> {
        NonZeroUsize::new(value)
            .map(Self)
            .ok_or_else(|| DomainError::validation("page size must be greater than zero"))
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN))
    }
}

/// Search text and 1-based page index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserState {
    search_query: String,
    current_page: usize,
    page_size: PageSize,
}

impl BrowserState {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            search_query: String::new(),
            current_page: 1,
            page_size,
        }
    }

    /// Rebuild the state a page carried between requests, then replay the
    /// interaction: `search` is what the box holds now, `previous_search` is
    /// what it held when `page` was chosen.
    pub fn restore(
        page_size: PageSize,
        search: Option<&str>,
        previous_search: Option<&str>,
        page: Option<usize>,
    ) -> Self {
        let previous = previous_search.or(search).unwrap_or_default();
        let mut state = Self {
            search_query: previous.to_string(),
            current_page: page.unwrap_or(1),
            page_size,
        };
        state.set_search_query(search.unwrap_or_default());
        state
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Replace the search text. A different query always lands on page 1.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query != self.search_query {
            self.search_query = query;
            self.current_page = 1;
        }
    }

    /// Jump to `page`. Not clamped: the rendered controls never offer an
    /// out-of-range page, and a stale one simply yields an empty window.
    pub fn paginate(&mut self, page: usize) {
        self.current_page = page;
    }

    pub fn previous(&mut self) {
        self.paginate(self.current_page.saturating_sub(1));
    }

    pub fn next(&mut self) {
        self.paginate(self.current_page.saturating_add(1));
    }

    pub fn derive(&self, records: &[BlogRecord]) -> BrowserView {
        let published = published_set(records, &self.search_query);
        let size = self.page_size.get();
        let total_pages = total_pages(published.len(), size);
        let (first_index, window) = page_window(&published, self.current_page, size);

        let rows = window
            .iter()
            .enumerate()
            .map(|(offset, record)| BrowserRow {
                position: first_index + offset + 1,
                record: (*record).clone(),
            })
            .collect();

        BrowserView {
            loading: false,
            rows,
            published_count: published.len(),
            current_page: self.current_page,
            total_pages,
            page_numbers: (1..=total_pages).collect(),
            previous_disabled: self.current_page == 1,
            next_disabled: self.current_page == total_pages,
        }
    }

    /// The view shown before the record fetch resolves: nothing published yet.
    pub fn loading_view(&self) -> BrowserView {
        BrowserView {
            loading: true,
            ..self.derive(&[])
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserRow {
    /// 1-based position across the whole published set.
    pub position: usize,
    pub record: BlogRecord,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserView {
    pub loading: bool,
    pub rows: Vec<BrowserRow>,
    pub published_count: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub page_numbers: Vec<usize>,
    pub previous_disabled: bool,
    pub next_disabled: bool,
}

impl BrowserView {
    pub fn shows_pagination(&self) -> bool {
        self.published_count > 0
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Records with status `publish` whose title contains `query`, ignoring case.
pub fn published_set<'a>(records: &'a [BlogRecord], query: &str) -> Vec<&'a BlogRecord> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| record.status.is_published() && record.title_contains(&needle))
        .collect()
}

pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size)
}

/// Slice out page `page` (1-based) and return the index of its first item.
/// Page 0 and pages past the end produce an empty window.
pub fn page_window<T>(items: &[T], page: usize, page_size: usize) -> (usize, &[T]) {
    let Some(zero_based) = page.checked_sub(1) else {
        return (0, &[]);
    };
    let start = zero_based.saturating_mul(page_size);
    if start >= items.len() {
        return (start, &[]);
    }
    let end = start.saturating_add(page_size).min(items.len());
    (start, &items[start..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::BlogStatus;

    fn record(id: &str, title: &str, status: BlogStatus) -> BlogRecord {
        BlogRecord {
            id: id.to_string(),
            title: title.to_string(),
            slug: title.to_lowercase().replace(' ', "-"),
            status,
        }
    }

    fn published(titles: &[&str]) -> Vec<BlogRecord> {
        titles
            .iter()
            .enumerate()
            .map(|(index, title)| record(&index.to_string(), title, BlogStatus::Publish))
            .collect()
    }

    fn titles(view: &BrowserView) -> Vec<&str> {
        view.rows
            .iter()
            .map(|row| row.record.title.as_str())
            .collect()
    }

    #[test]
    fn five_items_split_into_two_pages() {
        let records = published(&["A", "B", "C", "D", "E"]);
        let mut state = BrowserState::new(PageSize::default());

        let first = state.derive(&records);
        assert_eq!(titles(&first), ["A", "B", "C", "D"]);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.page_numbers, [1, 2]);
        assert!(first.previous_disabled);
        assert!(!first.next_disabled);

        state.next();
        let second = state.derive(&records);
        assert_eq!(titles(&second), ["E"]);
        assert_eq!(second.rows[0].position, 5);
        assert!(!second.previous_disabled);
        assert!(second.next_disabled);
    }

    #[test]
    fn drafts_never_appear() {
        let records = vec![
            record("1", "Draft notes", BlogStatus::Draft),
            record("2", "Shipped notes", BlogStatus::Publish),
            record("3", "Odd notes", BlogStatus::Unknown),
        ];
        let mut state = BrowserState::new(PageSize::default());
        for query in ["", "notes", "draft", "DRAFT NOTES"] {
            state.set_search_query(query);
            let view = state.derive(&records);
            assert!(
                view.rows
                    .iter()
                    .all(|row| row.record.status == BlogStatus::Publish),
                "query {query:?} leaked a non-published record"
            );
        }
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let records = published(&["Rust Ownership", "Async rust", "Go channels"]);
        let mut state = BrowserState::new(PageSize::default());
        state.set_search_query("RUST");
        assert_eq!(
            titles(&state.derive(&records)),
            ["Rust Ownership", "Async rust"]
        );
    }

    #[test]
    fn unmatched_query_hides_pagination() {
        let records = published(&["A", "B"]);
        let mut state = BrowserState::new(PageSize::default());
        state.set_search_query("zz");
        let view = state.derive(&records);
        assert!(view.is_empty());
        assert_eq!(view.total_pages, 0);
        assert!(view.page_numbers.is_empty());
        assert!(!view.shows_pagination());
    }

    #[test]
    fn changing_search_resets_page() {
        let records = published(&["A", "B", "C", "D", "E", "F", "G", "H", "I"]);
        let mut state = BrowserState::new(PageSize::default());
        state.paginate(3);
        assert_eq!(titles(&state.derive(&records)), ["I"]);

        state.set_search_query("a");
        assert_eq!(state.current_page(), 1);

        state.paginate(2);
        state.set_search_query("a");
        assert_eq!(state.current_page(), 2, "same query is not a change");
    }

    #[test]
    fn restore_applies_reset_only_when_query_moved() {
        let size = PageSize::default();
        let kept = BrowserState::restore(size, Some("rust"), Some("rust"), Some(3));
        assert_eq!(kept.current_page(), 3);

        let moved = BrowserState::restore(size, Some("rusty"), Some("rust"), Some(3));
        assert_eq!(moved.current_page(), 1);
        assert_eq!(moved.search_query(), "rusty");

        let fresh = BrowserState::restore(size, None, None, None);
        assert_eq!(fresh, BrowserState::new(size));

        let linked = BrowserState::restore(size, Some("go"), None, Some(2));
        assert_eq!(linked.current_page(), 2);
    }

    #[test]
    fn stale_page_is_not_clamped() {
        let records = published(&["A", "B"]);
        let mut state = BrowserState::new(PageSize::default());
        state.paginate(4);
        let view = state.derive(&records);
        assert_eq!(view.current_page, 4);
        assert!(view.is_empty());
        assert!(view.shows_pagination());
        assert!(!view.next_disabled);
    }

    #[test]
    fn page_zero_is_an_empty_window() {
        let items = [1, 2, 3];
        assert_eq!(page_window(&items, 0, 2), (0, &[][..]));
        assert_eq!(page_window(&items, 2, 2), (2, &[3][..]));
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 4), 0);
        assert_eq!(total_pages(4, 4), 1);
        assert_eq!(total_pages(5, 4), 2);
        assert_eq!(total_pages(9, 3), 3);
    }

    #[test]
    fn page_size_rejects_zero() {
        assert!(PageSize::new(0).is_err());
        assert_eq!(PageSize::new(7).expect("size").get(), 7);
        assert_eq!(PageSize::default().get(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn loading_view_has_no_rows_or_controls() {
        let state = BrowserState::new(PageSize::default());
        let view = state.loading_view();
        assert!(view.loading);
        assert!(view.is_empty());
        assert!(!view.shows_pagination());
    }

    #[test]
    fn displayed_set_matches_definition_for_every_page() {
        let mut records = Vec::new();
        for index in 0..23 {
            let status = if index % 3 == 0 {
                BlogStatus::Draft
            } else {
                BlogStatus::Publish
            };
            let title = if index % 2 == 0 {
                format!("Rust {index}")
            } else {
                format!("Other {index}")
            };
            records.push(record(&index.to_string(), &title, status));
        }

        for query in ["", "rust", "OTHER", "1", "zz"] {
            let expected: Vec<&str> = records
                .iter()
                .filter(|r| {
                    r.status == BlogStatus::Publish
                        && r.title.to_lowercase().contains(&query.to_lowercase())
                })
                .map(|r| r.title.as_str())
                .collect();

            let mut state = BrowserState::new(PageSize::new(4).expect("size"));
            state.set_search_query(query);
            let pages = state.derive(&records).total_pages;
            assert_eq!(pages, expected.len().div_ceil(4));

            let mut seen = Vec::new();
            for page in 1..=pages {
                state.paginate(page);
                let view = state.derive(&records);
                assert_eq!(view.page_numbers.len(), pages);
                assert_eq!(view.previous_disabled, page == 1);
                assert_eq!(view.next_disabled, page == pages);
                seen.extend(view.rows.iter().map(|row| row.record.title.clone()));
            }
            assert_eq!(seen, expected);
        }
    }
}
