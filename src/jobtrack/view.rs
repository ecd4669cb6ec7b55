//! # Derived Views
//!
//! Turns a snapshot plus the current search/filter/sort/page state into the
//! exact rows to display. Everything here is a pure function of its inputs.
//!
//! The stages always run in this order:
//!
//! 1. search (company or title, case-insensitive substring)
//! 2. job type filter
//! 3. status filter
//! 4. sort (stable; no key keeps insertion order)
//! 5. paginate (1-based pages)
//!
//! Search and the two filters commute with each other, but all three must
//! run before the sort, and the sort before pagination.
//!
//! The engine does not clamp the page. A page outside `1..=total_pages`
//! simply yields no rows; keeping the page in range is the caller's job
//! (see [`crate::list_state::ListState`]).

use crate::model::{Application, JobType, Status};
use std::cmp::Ordering;
use std::num::NonZeroUsize;
use std::str::FromStr;

pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(5) {
    Some(size) => size,
    None => unreachable!(),
};

/// Number of applications shown on the dashboard's "recent" list.
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Company name, A to Z, ignoring case.
    Company,
    /// Applied date, newest first.
    AppliedDate,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "company" => Ok(SortKey::Company),
            "date" | "applied-date" | "applied" => Ok(SortKey::AppliedDate),
            other => Err(format!("Unknown sort key: {}", other)),
        }
    }
}

/// Inputs of a derivation. `None` filters mean "All".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewQuery {
    pub search: String,
    pub job_type: Option<JobType>,
    pub status: Option<Status>,
    pub sort: Option<SortKey>,
    pub page: usize,
    pub page_size: NonZeroUsize,
}

impl Default for ViewQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            job_type: None,
            status: None,
            sort: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of a derived view plus the counts needed to render pagination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedView {
    pub rows: Vec<Application>,
    pub total_count: usize,
    pub total_pages: usize,
    pub page: usize,
    pub page_size: NonZeroUsize,
}

impl DerivedView {
    /// Zero-based position of the page's first row within the full result.
    pub fn start_index(&self) -> usize {
        self.page.saturating_sub(1) * self.page_size.get()
    }

    /// The "Showing X to Y of Z" bounds, or `None` when the page is empty.
    pub fn showing(&self) -> Option<(usize, usize, usize)> {
        if self.rows.is_empty() {
            return None;
        }
        let start = self.start_index();
        let end = (start + self.page_size.get()).min(self.total_count);
        Some((start + 1, end, self.total_count))
    }
}

pub fn matches_search(application: &Application, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    let fields = application.fields();
    fields.company_name.to_lowercase().contains(&term)
        || fields.job_title.to_lowercase().contains(&term)
}

pub fn search<'a>(rows: Vec<&'a Application>, term: &str) -> Vec<&'a Application> {
    if term.is_empty() {
        return rows;
    }
    rows.into_iter()
        .filter(|a| matches_search(a, term))
        .collect()
}

pub fn filter_job_type<'a>(
    rows: Vec<&'a Application>,
    job_type: Option<JobType>,
) -> Vec<&'a Application> {
    match job_type {
        None => rows,
        Some(wanted) => rows
            .into_iter()
            .filter(|a| a.fields().job_type == wanted)
            .collect(),
    }
}

pub fn filter_status<'a>(
    rows: Vec<&'a Application>,
    status: Option<Status>,
) -> Vec<&'a Application> {
    match status {
        None => rows,
        Some(wanted) => rows
            .into_iter()
            .filter(|a| a.fields().status == wanted)
            .collect(),
    }
}

fn compare(a: &Application, b: &Application, key: SortKey) -> Ordering {
    match key {
        SortKey::Company => a
            .fields()
            .company_name
            .to_lowercase()
            .cmp(&b.fields().company_name.to_lowercase()),
        SortKey::AppliedDate => b.fields().applied_date.cmp(&a.fields().applied_date),
    }
}

/// Stable sort: rows that compare equal keep their incoming relative order.
pub fn sort_rows(rows: &mut [&Application], key: SortKey) {
    rows.sort_by(|a, b| compare(a, b, key));
}

/// `ceil(count / page_size)`, which is 0 for an empty result.
pub fn total_pages(count: usize, page_size: NonZeroUsize) -> usize {
    count.div_ceil(page_size.get())
}

/// Rows of 1-based `page`; empty when the page is out of range.
pub fn paginate<'a>(
    rows: &[&'a Application],
    page: usize,
    page_size: NonZeroUsize,
) -> Vec<&'a Application> {
    let Some(offset) = page.checked_sub(1) else {
        return Vec::new();
    };
    rows.iter()
        .skip(offset.saturating_mul(page_size.get()))
        .take(page_size.get())
        .copied()
        .collect()
}

/// Search and filters, without sorting or paging.
pub fn filtered<'a>(records: &'a [Application], query: &ViewQuery) -> Vec<&'a Application> {
    let rows: Vec<&Application> = records.iter().collect();
    let rows = search(rows, &query.search);
    let rows = filter_job_type(rows, query.job_type);
    filter_status(rows, query.status)
}

/// Runs the whole pipeline.
pub fn derive(records: &[Application], query: &ViewQuery) -> DerivedView {
    let mut rows = filtered(records, query);
    if let Some(key) = query.sort {
        sort_rows(&mut rows, key);
    }

    let total_count = rows.len();
    DerivedView {
        rows: paginate(&rows, query.page, query.page_size)
            .into_iter()
            .cloned()
            .collect(),
        total_count,
        total_pages: total_pages(total_count, query.page_size),
        page: query.page,
        page_size: query.page_size,
    }
}

/// The `limit` most recently applied applications, newest first.
pub fn most_recent(records: &[Application], limit: usize) -> Vec<Application> {
    let mut rows: Vec<&Application> = records.iter().collect();
    sort_rows(&mut rows, SortKey::AppliedDate);
    rows.into_iter().take(limit).cloned().collect()
}

/// Distinct job types across the unfiltered records, in first-seen order.
pub fn distinct_job_types(records: &[Application]) -> Vec<JobType> {
    let mut seen = Vec::new();
    for record in records {
        let job_type = record.fields().job_type;
        if !seen.contains(&job_type) {
            seen.push(job_type);
        }
    }
    seen
}

/// Distinct statuses across the unfiltered records, in first-seen order.
pub fn distinct_statuses(records: &[Application]) -> Vec<Status> {
    let mut seen = Vec::new();
    for record in records {
        let status = record.fields().status;
        if !seen.contains(&status) {
            seen.push(status);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::StoreFixture;

    fn names(rows: &[Application]) -> Vec<&str> {
        rows.iter()
            .map(|a| a.fields().company_name.as_str())
            .collect()
    }

    fn query() -> ViewQuery {
        ViewQuery::default()
    }

    #[test]
    fn empty_query_returns_first_page_in_insertion_order() {
        let fixture = StoreFixture::new().with_applications(7);
        let view = derive(&fixture.store.list(), &query());
        assert_eq!(
            names(&view.rows),
            vec!["Company 1", "Company 2", "Company 3", "Company 4", "Company 5"]
        );
        assert_eq!(view.total_count, 7);
        assert_eq!(view.total_pages, 2);
    }

    #[test]
    fn search_matches_company_or_title_ignoring_case() {
        let fixture = StoreFixture::new()
            .with_application("Acme Corp", "Engineer", "2024-01-01")
            .with_application("Globex", "ACME liaison", "2024-01-02")
            .with_application("Initech", "Analyst", "2024-01-03");
        let view = derive(
            &fixture.store.list(),
            &ViewQuery {
                search: "acme".into(),
                ..query()
            },
        );
        assert_eq!(names(&view.rows), vec!["Acme Corp", "Globex"]);
    }

    #[test]
    fn filters_and_search_combine() {
        let fixture = StoreFixture::new()
            .with_classified("Acme", JobType::FullTime, Status::Applied, "2024-01-01")
            .with_classified("Acme Labs", JobType::Internship, Status::Applied, "2024-01-02")
            .with_classified("Acme Cloud", JobType::Internship, Status::Rejected, "2024-01-03")
            .with_classified("Other", JobType::Internship, Status::Applied, "2024-01-04");
        let q = ViewQuery {
            search: "acme".into(),
            job_type: Some(JobType::Internship),
            status: Some(Status::Applied),
            ..query()
        };
        let view = derive(&fixture.store.list(), &q);
        assert_eq!(names(&view.rows), vec!["Acme Labs"]);
    }

    #[test]
    fn filtering_twice_changes_nothing() {
        let fixture = StoreFixture::new()
            .with_classified("Acme", JobType::Contract, Status::Applied, "2024-01-01")
            .with_classified("Beta", JobType::Contract, Status::Selected, "2024-01-02")
            .with_classified("Acme 2", JobType::PartTime, Status::Applied, "2024-01-03");
        let snapshot = fixture.store.list();
        let q = ViewQuery {
            search: "a".into(),
            job_type: Some(JobType::Contract),
            ..query()
        };

        let once: Vec<Application> = filtered(&snapshot, &q).into_iter().cloned().collect();
        let twice: Vec<Application> = filtered(&once, &q).into_iter().cloned().collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn company_sort_ignores_case() {
        let fixture = StoreFixture::new()
            .with_application("Beta", "X", "2024-01-01")
            .with_application("alpha", "X", "2024-01-01")
            .with_application("Acme", "X", "2024-01-01");
        let view = derive(
            &fixture.store.list(),
            &ViewQuery {
                sort: Some(SortKey::Company),
                ..query()
            },
        );
        assert_eq!(names(&view.rows), vec!["Acme", "alpha", "Beta"]);
    }

    #[test]
    fn company_sort_is_stable_for_case_variants() {
        let fixture = StoreFixture::new()
            .with_application("acme", "first", "2024-01-01")
            .with_application("Acme", "second", "2024-01-01")
            .with_application("ACME", "third", "2024-01-01");
        let view = derive(
            &fixture.store.list(),
            &ViewQuery {
                sort: Some(SortKey::Company),
                ..query()
            },
        );
        assert_eq!(names(&view.rows), vec!["acme", "Acme", "ACME"]);
    }

    #[test]
    fn date_sort_is_newest_first_and_stable() {
        let fixture = StoreFixture::new()
            .with_application("Old", "X", "2023-05-01")
            .with_application("TieA", "X", "2024-02-01")
            .with_application("New", "X", "2024-06-01")
            .with_application("TieB", "X", "2024-02-01");
        let view = derive(
            &fixture.store.list(),
            &ViewQuery {
                sort: Some(SortKey::AppliedDate),
                ..query()
            },
        );
        assert_eq!(names(&view.rows), vec!["New", "TieA", "TieB", "Old"]);
    }

    #[test]
    fn twelve_rows_make_three_pages() {
        let fixture = StoreFixture::new().with_applications(12);
        let snapshot = fixture.store.list();
        let view = derive(
            &snapshot,
            &ViewQuery {
                page: 3,
                ..query()
            },
        );
        assert_eq!(view.total_pages, 3);
        assert_eq!(names(&view.rows), vec!["Company 11", "Company 12"]);
        assert_eq!(view.showing(), Some((11, 12, 12)));
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let fixture = StoreFixture::new().with_applications(3);
        let view = derive(
            &fixture.store.list(),
            &ViewQuery {
                search: "nothing matches".into(),
                ..query()
            },
        );
        assert_eq!(view.total_count, 0);
        assert_eq!(view.total_pages, 0);
        assert!(view.rows.is_empty());
        assert_eq!(view.showing(), None);
    }

    #[test]
    fn out_of_range_pages_are_empty_not_clamped() {
        let fixture = StoreFixture::new().with_applications(6);
        let snapshot = fixture.store.list();
        for page in [0, 3, usize::MAX] {
            let view = derive(&snapshot, &ViewQuery { page, ..query() });
            assert!(view.rows.is_empty(), "page {page}");
            assert_eq!(view.page, page);
            assert_eq!(view.total_pages, 2);
        }
    }

    #[test]
    fn sort_applies_before_pagination() {
        let fixture = StoreFixture::new()
            .with_application("F", "X", "2024-01-01")
            .with_application("E", "X", "2024-01-01")
            .with_application("D", "X", "2024-01-01")
            .with_application("C", "X", "2024-01-01")
            .with_application("B", "X", "2024-01-01")
            .with_application("A", "X", "2024-01-01");
        let view = derive(
            &fixture.store.list(),
            &ViewQuery {
                sort: Some(SortKey::Company),
                page: 2,
                ..query()
            },
        );
        assert_eq!(names(&view.rows), vec!["F"]);
    }

    #[test]
    fn distinct_options_come_from_unfiltered_records_in_first_seen_order() {
        let fixture = StoreFixture::new()
            .with_classified("A", JobType::Contract, Status::Rejected, "2024-01-01")
            .with_classified("B", JobType::FullTime, Status::Applied, "2024-01-01")
            .with_classified("C", JobType::Contract, Status::Rejected, "2024-01-01");
        let snapshot = fixture.store.list();
        assert_eq!(
            distinct_job_types(&snapshot),
            vec![JobType::Contract, JobType::FullTime]
        );
        assert_eq!(
            distinct_statuses(&snapshot),
            vec![Status::Rejected, Status::Applied]
        );
    }

    #[test]
    fn most_recent_reuses_date_order() {
        let fixture = StoreFixture::new().with_applications(8);
        let recent = most_recent(&fixture.store.list(), RECENT_LIMIT);
        assert_eq!(
            names(&recent),
            vec!["Company 8", "Company 7", "Company 6", "Company 5", "Company 4"]
        );
    }

    #[test]
    fn sort_key_parses_aliases() {
        assert_eq!("Company".parse::<SortKey>().unwrap(), SortKey::Company);
        assert_eq!("date".parse::<SortKey>().unwrap(), SortKey::AppliedDate);
        assert!("salary".parse::<SortKey>().is_err());
    }
}
