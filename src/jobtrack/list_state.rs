//! The search/filter/sort/page state a list client keeps between renders.
//!
//! The view engine never clamps pages, so this type carries the caller's side
//! of that contract:
//!
//! - any change to search, filters or sort resets to page 1;
//! - after a structural change (a delete, an import) the page is clamped to
//!   `min(page, max(1, total_pages))`.

use crate::model::{Application, JobType, Status};
use crate::view::{self, DerivedView, SortKey, ViewQuery};
use std::num::NonZeroUsize;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListState {
    query: ViewQuery,
}

impl ListState {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            query: ViewQuery {
                page_size,
                ..ViewQuery::default()
            },
        }
    }

    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.query.page
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.query.search = term.into();
        self.query.page = 1;
    }

    pub fn set_job_type(&mut self, job_type: Option<JobType>) {
        self.query.job_type = job_type;
        self.query.page = 1;
    }

    pub fn set_status(&mut self, status: Option<Status>) {
        self.query.status = status;
        self.query.page = 1;
    }

    /// Selecting the active key again turns sorting off.
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.query.sort = if self.query.sort == Some(key) {
            None
        } else {
            Some(key)
        };
        self.query.page = 1;
    }

    pub fn clear_sort(&mut self) {
        self.query.sort = None;
        self.query.page = 1;
    }

    pub fn set_page_size(&mut self, page_size: NonZeroUsize) {
        self.query.page_size = page_size;
        self.query.page = 1;
    }

    /// Moves to `page` if it exists for the current result.
    ///
    /// Returns `false` and stays put otherwise.
    pub fn go_to_page(&mut self, page: usize, total_pages: usize) -> bool {
        if page >= 1 && page <= total_pages {
            self.query.page = page;
            true
        } else {
            false
        }
    }

    pub fn next_page(&mut self, total_pages: usize) -> bool {
        self.go_to_page(self.query.page + 1, total_pages)
    }

    pub fn prev_page(&mut self, total_pages: usize) -> bool {
        match self.query.page.checked_sub(1) {
            Some(page) => self.go_to_page(page, total_pages),
            None => false,
        }
    }

    /// Pulls the page back into range after the result shrank.
    pub fn clamp(&mut self, total_pages: usize) {
        self.query.page = self.query.page.min(total_pages.max(1)).max(1);
    }

    /// Derives the current page, clamping first if the page went stale.
    pub fn render(&mut self, records: &[Application]) -> DerivedView {
        let view = view::derive(records, &self.query);
        if self.query.page > view.total_pages.max(1) {
            self.clamp(view.total_pages);
            return view::derive(records, &self.query);
        }
        view
    }
}
