//! Pre-flight validation of a push request.
//!
//! Runs once, before any command is handled. Violations are aggregated so
//! the caller learns about every broken command at once instead of one per
//! run.

use crate::command_map::CommandMap;
use crate::error::ManifestError;
use crate::types::{PushCommand, PushRequest};

/// Validates the whole request: it must carry at least one command, and
/// every command must pass [`invalid_commands`]'s checks.
pub fn validate(req: &PushRequest) -> Result<(), ManifestError> {
    if req.push.is_empty() {
        return Err(ManifestError::EmptyRequest);
    }

    let invalid = invalid_commands(&req.push);
    if invalid.is_empty() {
        Ok(())
    } else {
        Err(ManifestError::InvalidCommands(invalid))
    }
}

/// Returns the names of commands missing a required setting, in document
/// order.
///
/// Required: non-empty `basedir`, `src` and `host`, and at least one target
/// database. There is nowhere to push without a `dbs` entry, so an absent
/// or empty list is flagged too.
pub fn invalid_commands(commands: &CommandMap) -> Vec<String> {
    commands
        .iter()
        .filter(|(_, cmd)| !has_required_settings(cmd))
        .map(|(name, _)| name.to_string())
        .collect()
}

fn has_required_settings(cmd: &PushCommand) -> bool {
    !cmd.basedir.as_os_str().is_empty()
        && !cmd.src.as_os_str().is_empty()
        && !cmd.host.is_empty()
        && !cmd.dbs.is_empty()
}
