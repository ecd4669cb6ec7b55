use crate::commands::{describe, CmdMessage, CmdResult};
use crate::list_state::ListState;
use crate::model::ApplicationId;
use crate::store::ApplicationStore;
use crate::view;

/// Deletes `id` and pulls the list page back into range.
///
/// Deleting an id that is already gone changes nothing.
pub fn run(store: &mut ApplicationStore, state: &mut ListState, id: ApplicationId) -> CmdResult {
    let mut result = CmdResult::default();

    match store.delete(id) {
        Some(removed) => {
            tracing::info!(%id, "application deleted");
            result.add_message(CmdMessage::success(format!(
                "Application deleted: {}",
                describe(&removed)
            )));
            result.affected.push(removed);
        }
        None => {
            result.add_message(CmdMessage::info("Application was already deleted"));
        }
    }

    clamp_page(store, state);
    result
}

/// Re-clamps the list page against the store's current contents.
pub fn clamp_page(store: &ApplicationStore, state: &mut ListState) {
    let snapshot = store.list();
    let query = state.query();
    let total_pages = view::total_pages(view::filtered(&snapshot, query).len(), query.page_size);
    let before = state.page();
    state.clamp(total_pages);
    if state.page() != before {
        tracing::debug!(from = before, to = state.page(), "page clamped");
    }
}
