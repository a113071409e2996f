//! Attachment stage: normalize the directive and delegate loading.

use std::path::Path;

use couchpush_manifest::PushCommand;
use tracing::debug;

use crate::error::PushError;
use crate::loader::{AppLoader, Application};

/// Loads the command's attachments into the application.
///
/// A command without an `att` directive is a no-op. Otherwise the directive
/// is normalized to ordered root/prefix pairs and the loader is invoked
/// once per pair, in order; the first failure aborts the stage.
pub fn load_attachments(
    name: &str,
    cmd: &PushCommand,
    app: &mut dyn Application,
    loader: &dyn AppLoader,
) -> Result<(), PushError> {
    let Some(spec) = &cmd.att else {
        debug!(command = name, "no attachment directive");
        return Ok(());
    };

    let entries = spec.normalize().map_err(|source| PushError::Attachment {
        command: name.to_string(),
        source: source.into(),
    })?;

    for entry in &entries {
        debug!(command = name, root = %entry.root, prefix = ?entry.prefix, "loading attachments");
        loader
            .load_attachments(app, Path::new(&entry.root), entry.prefix.as_deref())
            .map_err(|source| PushError::Attachment {
                command: name.to_string(),
                source: source.into(),
            })?;
    }
    Ok(())
}
