use crate::commands::{CmdMessage, CmdResult};
use crate::config::TrackerConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

/// Shows or changes configuration stored under `config_dir`.
///
/// A rejected value is reported as an error message and nothing is written.
pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = TrackerConfig::load(config_dir)?;

    let message = match action {
        ConfigAction::ShowAll => return Ok(CmdResult::default().with_config(config)),
        ConfigAction::ShowKey(key) => match config.get(&key) {
            Some(current) => CmdMessage::info(format!("{} = {}", key, current)),
            None => CmdMessage::error(format!("Unknown config key: {}", key)),
        },
        ConfigAction::Set(key, value) => match config.set(&key, &value) {
            Err(rejected) => CmdMessage::error(rejected.to_string()),
            Ok(()) => {
                config.save(config_dir)?;
                tracing::info!(%key, "config updated");
                let stored = config.get(&key).unwrap_or(value);
                let mut result = CmdResult::default().with_config(config);
                result.add_message(CmdMessage::success(format!("{} set to {}", key, stored)));
                return Ok(result);
            }
        },
    };

    let mut result = CmdResult::default();
    result.add_message(message);
    Ok(result)
}
