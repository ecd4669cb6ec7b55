//! # Inline Edit Session
//!
//! At most one application is being edited at a time:
//!
//! ```text
//! Idle ──start(id)──▶ Editing(id, draft) ──commit (valid)──▶ Idle
//!                          │    ▲
//!                          │    └── commit (invalid): errors returned, still editing
//!                          └──────── cancel ──────────────▶ Idle
//! ```
//!
//! The draft is a copy of the application's fields taken when editing starts.
//! Later store changes are not reflected into it, and changes to the draft only
//! reach the store through a successful [`EditSession::commit`]. Starting a new
//! edit while one is open discards the old draft first; drafts are never merged.

use crate::error::{JobtrackError, Result};
use crate::model::{ApplicationForm, ApplicationId, Field};
use crate::store::ApplicationStore;
use crate::validation::FieldErrors;

#[derive(Debug, Clone, PartialEq, Eq)]
struct OpenEdit {
    id: ApplicationId,
    draft: ApplicationForm,
}

/// What a commit did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The draft replaced the application's fields.
    Saved(ApplicationId),
    /// The application was deleted while the draft was open; nothing changed.
    Vanished(ApplicationId),
    /// There was no open edit.
    NotEditing,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSession {
    current: Option<OpenEdit>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a draft for `id`, discarding any draft already open.
    pub fn start(&mut self, store: &ApplicationStore, id: ApplicationId) -> Result<&mut ApplicationForm> {
        if let Some(previous) = self.cancel() {
            tracing::debug!(%previous, "discarded open draft before starting a new edit");
        }
        let application = store
            .get(id)
            .ok_or(JobtrackError::ApplicationNotFound(id))?;

        let edit = self.current.insert(OpenEdit {
            id,
            draft: ApplicationForm::from(application.fields()),
        });
        Ok(&mut edit.draft)
    }

    pub fn is_editing(&self) -> bool {
        self.current.is_some()
    }

    pub fn editing_id(&self) -> Option<ApplicationId> {
        self.current.as_ref().map(|edit| edit.id)
    }

    pub fn draft(&self) -> Option<&ApplicationForm> {
        self.current.as_ref().map(|edit| &edit.draft)
    }

    pub fn draft_mut(&mut self) -> Option<&mut ApplicationForm> {
        self.current.as_mut().map(|edit| &mut edit.draft)
    }

    /// Sets one draft field. Returns `false` when no edit is open.
    pub fn set_field(&mut self, field: Field, value: &str) -> bool {
        match self.draft_mut() {
            Some(draft) => {
                draft.set_field(field, value);
                true
            }
            None => false,
        }
    }

    /// Validates the draft and writes it back through the store.
    ///
    /// On validation failure the session stays open and the store is untouched.
    pub fn commit(
        &mut self,
        store: &mut ApplicationStore,
    ) -> std::result::Result<CommitOutcome, FieldErrors> {
        let Some(edit) = self.current.as_ref() else {
            return Ok(CommitOutcome::NotEditing);
        };

        let fields = edit.draft.to_fields()?;
        let id = edit.id;
        self.current = None;

        if store.update(id, fields) {
            Ok(CommitOutcome::Saved(id))
        } else {
            Ok(CommitOutcome::Vanished(id))
        }
    }

    /// Drops the draft, returning the id that was being edited.
    pub fn cancel(&mut self) -> Option<ApplicationId> {
        self.current.take().map(|edit| edit.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;
    use crate::store::fixtures::StoreFixture;

    #[test]
    fn start_copies_current_fields() {
        let fixture = StoreFixture::new().with_application("Acme", "Engineer", "2024-03-01");
        let id = fixture.ids()[0];
        let mut session = EditSession::new();

        let draft = session.start(&fixture.store, id).unwrap();
        assert_eq!(draft.company_name, "Acme");
        assert_eq!(draft.applied_date, "2024-03-01");
        assert_eq!(session.editing_id(), Some(id));
    }

    #[test]
    fn cancel_leaves_record_untouched_after_draft_edits() {
        let fixture = StoreFixture::new().with_application("Acme", "Engineer", "2024-03-01");
        let id = fixture.ids()[0];
        let before = fixture.store.get(id).cloned();
        let mut session = EditSession::new();

        session.start(&fixture.store, id).unwrap();
        session.set_field(Field::CompanyName, "Hacked");
        session.set_field(Field::Status, "Rejected");
        assert_eq!(session.cancel(), Some(id));

        assert_eq!(fixture.store.get(id).cloned(), before);
        assert!(!session.is_editing());
    }

    #[test]
    fn commit_saves_valid_draft() {
        let mut fixture = StoreFixture::new().with_applications(3);
        let id = fixture.ids()[1];
        let mut session = EditSession::new();

        session.start(&fixture.store, id).unwrap();
        session.set_field(Field::Status, "interview scheduled");
        session.set_field(Field::Notes, "Second round on Friday");

        let outcome = session.commit(&mut fixture.store).unwrap();
        assert_eq!(outcome, CommitOutcome::Saved(id));
        assert!(!session.is_editing());

        let saved = fixture.store.get(id).unwrap();
        assert_eq!(saved.fields().status, Status::InterviewScheduled);
        assert_eq!(saved.fields().notes, "Second round on Friday");
        assert_eq!(fixture.ids()[1], id);
    }

    #[test]
    fn invalid_commit_keeps_editing_and_store_unchanged() {
        let mut fixture = StoreFixture::new().with_application("Acme", "Engineer", "2024-03-01");
        let id = fixture.ids()[0];
        let before = fixture.store.list();
        let mut session = EditSession::new();

        session.start(&fixture.store, id).unwrap();
        session.set_field(Field::JobTitle, "  ");
        session.set_field(Field::AppliedDate, "");

        let errors = session.commit(&mut fixture.store).unwrap_err();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec![Field::JobTitle, Field::AppliedDate]
        );
        assert!(session.is_editing());
        assert_eq!(fixture.store.list(), before);
    }

    #[test]
    fn starting_again_discards_previous_draft() {
        crate::logging::init_for_tests();
        let fixture = StoreFixture::new().with_applications(2);
        let ids = fixture.ids();
        let mut session = EditSession::new();

        session.start(&fixture.store, ids[0]).unwrap();
        session.set_field(Field::CompanyName, "Unsaved");
        session.start(&fixture.store, ids[1]).unwrap();

        assert_eq!(session.editing_id(), Some(ids[1]));
        assert_eq!(session.draft().unwrap().company_name, "Company 2");

        session.start(&fixture.store, ids[0]).unwrap();
        assert_eq!(session.draft().unwrap().company_name, "Company 1");
    }

    #[test]
    fn start_on_missing_id_fails_and_stays_idle() {
        let mut fixture = StoreFixture::new().with_applications(2);
        let ids = fixture.ids();
        fixture.store.delete(ids[0]);
        let mut session = EditSession::new();
        session.start(&fixture.store, ids[1]).unwrap();

        let err = session.start(&fixture.store, ids[0]).unwrap_err();
        assert!(matches!(err, JobtrackError::ApplicationNotFound(id) if id == ids[0]));
        assert!(!session.is_editing());
    }

    #[test]
    fn commit_after_delete_is_reported_as_vanished() {
        crate::logging::init_for_tests();
        let mut fixture = StoreFixture::new().with_applications(2);
        let id = fixture.ids()[0];
        let mut session = EditSession::new();

        session.start(&fixture.store, id).unwrap();
        fixture.store.delete(id);
        assert_eq!(
            session.draft().unwrap().company_name,
            "Company 1",
            "draft is not touched by the delete"
        );

        let outcome = session.commit(&mut fixture.store).unwrap();
        assert_eq!(outcome, CommitOutcome::Vanished(id));
        assert_eq!(fixture.store.len(), 1);
        assert!(fixture.store.get(id).is_none());
    }

    #[test]
    fn idle_operations_are_harmless() {
        let mut fixture = StoreFixture::new().with_applications(1);
        let mut session = EditSession::new();
        assert!(!session.set_field(Field::Notes, "x"));
        assert_eq!(session.cancel(), None);
        assert_eq!(
            session.commit(&mut fixture.store).unwrap(),
            CommitOutcome::NotEditing
        );
    }
}
