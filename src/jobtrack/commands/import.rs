use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ApplicationForm;
use crate::store::ApplicationStore;
use std::fs;
use std::path::Path;

/// Imports a JSON array of application forms from `path`.
///
/// Entries are validated like any other form; valid ones are appended in file
/// order. Entries that fail to decode or validate are skipped with a warning;
/// only a file that is not a JSON array fails the import. Ids in the file (as
/// written by export) are ignored and fresh ones assigned.
pub fn run(store: &mut ApplicationStore, path: &Path) -> Result<CmdResult> {
    let content = fs::read_to_string(path)?;
    let mut result = import_json(store, &content)?;
    result.add_message(CmdMessage::info(format!("Imported from {}", path.display())));
    Ok(result)
}

pub fn import_json(store: &mut ApplicationStore, json: &str) -> Result<CmdResult> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(json)?;
    let mut result = CmdResult::default();

    for (position, entry) in entries.into_iter().enumerate() {
        let fields = serde_json::from_value::<ApplicationForm>(entry)
            .map_err(|e| e.to_string())
            .and_then(|form| form.to_fields().map_err(|errors| errors.to_string()));
        match fields {
            Ok(fields) => result.affected.push(store.add(fields)),
            Err(reason) => {
                tracing::warn!(entry = position + 1, %reason, "import entry skipped");
                result.add_message(CmdMessage::warning(format!(
                    "Skipped entry {}: {}",
                    position + 1,
                    reason
                )));
            }
        }
    }

    result.add_message(CmdMessage::success(format!(
        "Total imported: {}",
        result.affected.len()
    )));
    Ok(result)
}
