//! Push engine error types.

use std::path::PathBuf;

use couchpush_manifest::ManifestError;

use crate::libs::LibSection;
use crate::loader::LoaderError;

/// Errors produced during an orchestration run.
///
/// All of them are terminal: the run stops at the first one, and no
/// retry, rollback or partial-success reporting happens. Host URLs carried
/// by these errors are already credential-masked.
#[derive(Debug, thiserror::Error)]
pub enum PushError {
    /// Malformed request or failed pre-flight validation. Nothing was
    /// attempted.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// The application module could not be loaded or built.
    #[error("[{command}] failed to load application module from {}: {source}", path.display())]
    ModuleLoad {
        command: String,
        path: PathBuf,
        /// External package identifier from the request, when one was given.
        package: Option<String>,
        #[source]
        source: LoaderError,
    },

    /// Malformed attachment directive or attachment loader failure.
    #[error("[{command}] failed to load attachments: {source}")]
    Attachment {
        command: String,
        #[source]
        source: AttachmentError,
    },

    /// The onloaded hook failed to load or raised when invoked.
    #[error("[{command}] onloaded hook at {} failed: {source}", path.display())]
    Hook {
        command: String,
        path: PathBuf,
        #[source]
        source: LoaderError,
    },

    /// A library directory failed to load during a merge. Directories
    /// already merged stay merged.
    #[error(
        "[{command}] failed to merge {section} from {} (directories: {dirs:?}): {source}",
        failed_on.display()
    )]
    LibraryMerge {
        command: String,
        section: LibSection,
        dirs: Vec<PathBuf>,
        failed_on: PathBuf,
        #[source]
        source: LoaderError,
    },

    /// A remote push failed. `target` is the credential-masked target URL.
    #[error("[{command}] push to {target} failed: {source}")]
    TargetPush {
        command: String,
        target: String,
        #[source]
        source: LoaderError,
    },
}

/// Cause of an attachment stage failure.
#[derive(Debug, thiserror::Error)]
pub enum AttachmentError {
    #[error(transparent)]
    Spec(#[from] ManifestError),

    #[error(transparent)]
    Loader(#[from] LoaderError),
}
