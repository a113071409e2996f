//! Sequential document-application push engine.
//!
//! This crate implements the **business logic** for pushing design-document
//! applications described by a [`couchpush_manifest::PushRequest`] to their
//! remote targets. It is a library crate with no filesystem or transport
//! dependencies — the host program provides an [`AppLoader`] implementation
//! that bridges to the actual module loader and HTTP client.
//!
//! # Pipeline, per command
//!
//! 1. **Build** — load the application module and construct the application
//! 2. **Attachments** — load each normalized attachment root
//! 3. **Hook** — run the optional `onloaded` hook
//! 4. **Lib merge** — fold `lib` directories into `doc.lib`, then
//!    `viewsLib` directories into `doc.views.lib`
//! 5. **Push** — push to each target database, one at a time
//!
//! Everything is strictly sequential and fail-fast: the first error at any
//! level (command, stage, target) ends the run and becomes its result.

pub mod attachments;
pub mod error;
pub mod hook;
pub mod libs;
pub mod loader;
pub mod push;

// Re-export primary types for convenience.
pub use error::{AttachmentError, PushError};
pub use libs::LibSection;
pub use loader::{AppLoader, Application, BoxFuture, LoaderError, OnloadedHook};
pub use push::push_all;
