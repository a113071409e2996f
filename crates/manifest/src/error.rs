//! Manifest error types.

/// Errors produced while validating or normalizing a push manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error(
        "manifest must contain attribute 'push' - a dictionary of ddoc commands with at least one command"
    )]
    EmptyRequest,

    #[error("not all settings found: {}", .0.join(", "))]
    InvalidCommands(Vec<String>),

    #[error("document attachments are expected to be an array (bad prefix for root '{root}')")]
    AttachmentValue { root: String },
}
