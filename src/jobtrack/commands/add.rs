use crate::commands::{describe, CmdMessage, CmdResult};
use crate::model::ApplicationForm;
use crate::store::ApplicationStore;

/// Validates `form` and appends it to the store.
///
/// Validation failures come back in `field_errors`; the store is left untouched.
pub fn run(store: &mut ApplicationStore, form: &ApplicationForm) -> CmdResult {
    match form.to_fields() {
        Ok(fields) => {
            let application = store.add(fields);
            tracing::info!(id = %application.id(), "application added");
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::success(format!(
                "Application added: {}",
                describe(&application)
            )));
            result.with_affected(vec![application])
        }
        Err(errors) => {
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::error(format!(
                "Application not added: {} field(s) invalid",
                errors.len()
            )));
            result.with_field_errors(errors)
        }
    }
}
