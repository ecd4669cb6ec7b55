use crate::commands::{CmdMessage, CmdResult, DraftView};
use crate::error::Result;
use crate::model::{ApplicationId, Field};
use crate::session::{CommitOutcome, EditSession};
use crate::store::ApplicationStore;

fn draft_view(session: &EditSession) -> Option<DraftView> {
    match (session.editing_id(), session.draft()) {
        (Some(id), Some(form)) => Some(DraftView {
            id,
            form: form.clone(),
        }),
        _ => None,
    }
}

fn not_editing() -> CmdResult {
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::warning("No edit in progress"));
    result
}

pub fn start(
    store: &ApplicationStore,
    session: &mut EditSession,
    id: ApplicationId,
) -> Result<CmdResult> {
    let discarded = session.editing_id().filter(|open| *open != id);
    session.start(store, id)?;

    let mut result = CmdResult::default();
    if discarded.is_some() {
        result.add_message(CmdMessage::warning("Discarded unsaved changes to the previous edit"));
    }
    result.add_message(CmdMessage::info("Editing application"));
    Ok(match draft_view(session) {
        Some(draft) => result.with_draft(draft),
        None => result,
    })
}

pub fn set_field(session: &mut EditSession, field: Field, value: &str) -> CmdResult {
    if !session.set_field(field, value) {
        return not_editing();
    }
    match draft_view(session) {
        Some(draft) => CmdResult::default().with_draft(draft),
        None => not_editing(),
    }
}

pub fn show(session: &EditSession) -> CmdResult {
    match draft_view(session) {
        Some(draft) => CmdResult::default().with_draft(draft),
        None => not_editing(),
    }
}

/// Commits the open draft. Field errors keep the edit open.
pub fn save(store: &mut ApplicationStore, session: &mut EditSession) -> CmdResult {
    let mut result = CmdResult::default();
    match session.commit(store) {
        Ok(CommitOutcome::Saved(id)) => {
            tracing::info!(%id, "edit committed");
            result.add_message(CmdMessage::success("Application updated"));
            if let Some(application) = store.get(id) {
                result.affected.push(application.clone());
            }
        }
        Ok(CommitOutcome::Vanished(id)) => {
            tracing::warn!(%id, "edit committed after the application was deleted");
            result.add_message(CmdMessage::warning(
                "Application was deleted while being edited; nothing saved",
            ));
        }
        Ok(CommitOutcome::NotEditing) => return not_editing(),
        Err(errors) => {
            result.add_message(CmdMessage::error(format!(
                "Not saved: {} field(s) invalid",
                errors.len()
            )));
            result = result.with_field_errors(errors);
            if let Some(draft) = draft_view(session) {
                result = result.with_draft(draft);
            }
        }
    }
    result
}

pub fn cancel(session: &mut EditSession) -> CmdResult {
    match session.cancel() {
        Some(_) => {
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::info("Edit cancelled"));
            result
        }
        None => not_editing(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::StoreFixture;

    #[test]
    fn start_returns_draft() {
        let fixture = StoreFixture::new().with_application("Acme", "Engineer", "2024-01-05");
        let id = fixture.ids()[0];
        let mut session = EditSession::new();

        let result = start(&fixture.store, &mut session, id).unwrap();
        let draft = result.draft.unwrap();
        assert_eq!(draft.id, id);
        assert_eq!(draft.form.job_title, "Engineer");
    }

    #[test]
    fn switching_edits_warns_about_discarded_draft() {
        let fixture = StoreFixture::new().with_applications(2);
        let ids = fixture.ids();
        let mut session = EditSession::new();

        start(&fixture.store, &mut session, ids[0]).unwrap();
        let result = start(&fixture.store, &mut session, ids[1]).unwrap();
        assert!(result.messages[0].content.starts_with("Discarded"));
    }

    #[test]
    fn save_with_errors_keeps_draft_visible() {
        let mut fixture = StoreFixture::new().with_applications(1);
        let id = fixture.ids()[0];
        let mut session = EditSession::new();

        start(&fixture.store, &mut session, id).unwrap();
        set_field(&mut session, Field::CompanyName, "");
        let result = save(&mut fixture.store, &mut session);

        assert!(result.has_errors());
        assert!(result.field_errors.contains(Field::CompanyName));
        assert_eq!(result.draft.unwrap().form.company_name, "");
        assert_eq!(
            fixture.store.get(id).unwrap().fields().company_name,
            "Company 1"
        );
    }

    #[test]
    fn save_applies_draft() {
        crate::logging::init_for_tests();
        let mut fixture = StoreFixture::new().with_applications(1);
        let id = fixture.ids()[0];
        let mut session = EditSession::new();

        start(&fixture.store, &mut session, id).unwrap();
        set_field(&mut session, Field::Location, "Lisbon");
        let result = save(&mut fixture.store, &mut session);

        assert!(!result.has_errors());
        assert_eq!(result.affected[0].fields().location, "Lisbon");
        assert!(!session.is_editing());
    }

    #[test]
    fn operations_without_edit_warn() {
        let mut fixture = StoreFixture::new().with_applications(1);
        let mut session = EditSession::new();
        for result in [
            set_field(&mut session, Field::Notes, "x"),
            save(&mut fixture.store, &mut session),
            cancel(&mut session),
            show(&session),
        ] {
            assert_eq!(result.messages[0].content, "No edit in progress");
        }
    }
}
