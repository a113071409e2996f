//! Application loader and application capability traits.
//!
//! `AppLoader` is implemented by the host program to bridge the push engine
//! to whatever actually reads modules and files from disk and builds
//! applications. Using traits keeps the engine decoupled from the loader
//! and the transport, and testable with mocks.

use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use couchpush_manifest::PushCommand;

/// Boxed future used at the capability seams.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Message-carrying error surfaced at the capability seams.
///
/// Loader and application implementations construct these; the engine wraps
/// them with command context before they reach the caller.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct LoaderError {
    message: String,
}

impl LoaderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for LoaderError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// A constructed document application.
pub trait Application: Send {
    /// The mutable document tree. The engine merges library files into its
    /// `lib` and `views.lib` slots.
    fn doc_mut(&mut self) -> &mut serde_json::Value;

    /// Pushes the application to one fully qualified target URL. Resolves
    /// exactly once per call, success or failure.
    fn push(&mut self, target_url: &str) -> BoxFuture<'_, Result<(), LoaderError>>;
}

/// The external loader/builder bundle.
pub trait AppLoader: Send + Sync {
    /// Loads the module at `module_path` and builds an application from it.
    /// Asynchronous, one outcome, no retry.
    fn create_app(
        &self,
        module_path: &Path,
    ) -> BoxFuture<'_, Result<Box<dyn Application>, LoaderError>>;

    /// Loads the attachments under `root` into the application, optionally
    /// under a document prefix.
    fn load_attachments(
        &self,
        app: &mut dyn Application,
        root: &Path,
        prefix: Option<&str>,
    ) -> Result<(), LoaderError>;

    /// Loads every file under `dir` into a name → content mapping.
    fn load_files(
        &self,
        dir: &Path,
    ) -> Result<serde_json::Map<String, serde_json::Value>, LoaderError>;

    /// Loads the hook module at `path`.
    fn load_hook(&self, path: &Path) -> Result<Box<dyn OnloadedHook>, LoaderError>;
}

/// Post-load hook invoked once per command, after the application is built
/// and attachments are loaded. Only success or failure is consulted.
pub trait OnloadedHook {
    fn call(
        &self,
        app: &mut dyn Application,
        cmd: &PushCommand,
        loader: &dyn AppLoader,
    ) -> Result<(), LoaderError>;
}
