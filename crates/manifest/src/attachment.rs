//! Attachment directive shapes and normalization.
//!
//! A command's `att` field accepts three document shapes: a bare path
//! string, an array of entries, or a `{path: prefix}` mapping. The shape is
//! resolved once at parse time into a tagged variant; [`AttachmentSpec::normalize`]
//! flattens any of them into an ordered list of [`Attachment`] pairs.

use serde::{Deserialize, Serialize};

use crate::error::ManifestError;

/// One normalized attachment source: a root directory and an optional
/// prefix under which its files land in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub root: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

/// Element of an array-shaped directive: either a bare path or an explicit
/// root/prefix entry. Shapes are preserved as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttachmentItem {
    Path(String),
    Entry(Attachment),
}

/// Attachment directive as written in the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttachmentSpec {
    /// `"att": "/path"`
    Single(String),
    /// `"att": ["/a", {"root": "/b", "prefix": "p"}]`
    List(Vec<AttachmentItem>),
    /// `"att": {"/a": "p1", "/b": "p2"}` — key order is preserved.
    Mapping(serde_json::Map<String, serde_json::Value>),
}

impl AttachmentSpec {
    /// Flattens the directive into an ordered list of root/prefix pairs.
    ///
    /// Mapping values must be strings (the prefix) or null (no prefix);
    /// anything else fails.
    pub fn normalize(&self) -> Result<Vec<Attachment>, ManifestError> {
        match self {
            AttachmentSpec::Single(root) => Ok(vec![Attachment {
                root: root.clone(),
                prefix: None,
            }]),
            AttachmentSpec::List(items) => Ok(items
                .iter()
                .map(|item| match item {
                    AttachmentItem::Path(root) => Attachment {
                        root: root.clone(),
                        prefix: None,
                    },
                    AttachmentItem::Entry(entry) => entry.clone(),
                })
                .collect()),
            AttachmentSpec::Mapping(mapping) => mapping
                .iter()
                .map(|(root, prefix)| {
                    let prefix = match prefix {
                        serde_json::Value::String(p) => Some(p.clone()),
                        serde_json::Value::Null => None,
                        _ => {
                            return Err(ManifestError::AttachmentValue {
                                root: root.clone(),
                            });
                        }
                    };
                    Ok(Attachment {
                        root: root.clone(),
                        prefix,
                    })
                })
                .collect(),
        }
    }
}
