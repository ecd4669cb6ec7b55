use crate::commands::{CmdMessage, CmdResult, Listing};
use crate::index::index_rows;
use crate::list_state::ListState;
use crate::store::ApplicationStore;
use crate::view::{distinct_job_types, distinct_statuses};

/// Builds the listing for the current page of `state`.
pub fn listing(store: &ApplicationStore, state: &mut ListState) -> Listing {
    let snapshot = store.list();
    let view = state.render(&snapshot);
    let query = state.query();

    Listing {
        rows: index_rows(&view),
        page: view.page,
        total_pages: view.total_pages,
        total_count: view.total_count,
        showing: view.showing(),
        search: query.search.clone(),
        job_type: query.job_type,
        status: query.status,
        sort: query.sort,
        job_type_options: distinct_job_types(&snapshot),
        status_options: distinct_statuses(&snapshot),
    }
}

pub fn run(store: &ApplicationStore, state: &mut ListState) -> CmdResult {
    let listing = listing(store, state);
    let mut result = CmdResult::default();
    if listing.rows.is_empty() {
        let hint = if store.is_empty() {
            "No applications yet. Start by adding your first job application!"
        } else {
            "No applications found. Try adjusting your search or filters."
        };
        result.add_message(CmdMessage::info(hint));
    }
    result.with_listing(listing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{JobType, Status};
    use crate::store::fixtures::StoreFixture;
    use crate::view::SortKey;

    #[test]
    fn lists_first_page_with_options() {
        let fixture = StoreFixture::new()
            .with_classified("A", JobType::Contract, Status::Applied, "2024-01-01")
            .with_classified("B", JobType::FullTime, Status::Selected, "2024-01-02");
        let mut state = ListState::default();

        let result = run(&fixture.store, &mut state);
        let listing = result.listing.unwrap();
        assert_eq!(listing.rows.len(), 2);
        assert_eq!(listing.showing, Some((1, 2, 2)));
        assert_eq!(
            listing.job_type_options,
            vec![JobType::Contract, JobType::FullTime]
        );
        assert_eq!(
            listing.status_options,
            vec![Status::Applied, Status::Selected]
        );
        assert!(result.messages.is_empty());
    }

    #[test]
    fn reports_criteria_back() {
        let fixture = StoreFixture::new().with_applications(3);
        let mut state = ListState::default();
        state.set_search("company 2");
        state.toggle_sort(SortKey::AppliedDate);

        let listing = run(&fixture.store, &mut state).listing.unwrap();
        assert_eq!(listing.search, "company 2");
        assert_eq!(listing.sort, Some(SortKey::AppliedDate));
        assert_eq!(listing.total_count, 1);
    }

    #[test]
    fn empty_store_and_empty_filter_give_different_hints() {
        let mut state = ListState::default();
        let empty = ApplicationStore::new();
        let result = run(&empty, &mut state);
        assert!(result.messages[0].content.starts_with("No applications yet"));

        let fixture = StoreFixture::new().with_applications(2);
        state.set_search("zzz");
        let result = run(&fixture.store, &mut state);
        assert!(result.messages[0].content.starts_with("No applications found"));
        assert_eq!(result.listing.unwrap().total_pages, 0);
    }
}
