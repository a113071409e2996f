//! Declarative push manifest: the input model for the push orchestrator.
//!
//! A manifest is a JSON document mapping command names to push commands.
//! Each command names a source application directory, optional attachment
//! and library augmentations, and an ordered list of target databases on a
//! remote host. This crate owns parsing, pre-flight validation, attachment
//! directive normalization, and credential masking; it knows nothing about
//! loading or pushing.

mod attachment;
mod command_map;
mod error;
mod masking;
mod types;
mod validate;

pub use attachment::{Attachment, AttachmentItem, AttachmentSpec};
pub use command_map::CommandMap;
pub use error::ManifestError;
pub use masking::mask_credentials;
pub use types::{PushCommand, PushRequest};
pub use validate::{invalid_commands, validate};
