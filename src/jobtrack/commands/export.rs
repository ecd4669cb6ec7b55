use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::ApplicationStore;
use std::fs;
use std::path::Path;

/// Serializes the current snapshot, in insertion order, as pretty JSON.
///
/// With a `path` the JSON is written there; otherwise it is returned in
/// `exported` for the caller to print.
pub fn run(store: &ApplicationStore, path: Option<&Path>) -> Result<CmdResult> {
    let snapshot = store.list();
    let json = serde_json::to_string_pretty(&*snapshot)?;

    let mut result = CmdResult::default();
    match path {
        Some(path) => {
            fs::write(path, &json)?;
            result.add_message(CmdMessage::success(format!(
                "Exported {} application(s) to {}",
                snapshot.len(),
                path.display()
            )));
        }
        None => result = result.with_exported(json),
    }
    Ok(result)
}
