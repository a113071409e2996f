use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::attachment::AttachmentSpec;
use crate::command_map::CommandMap;

/// Top-level push request: named commands plus optional context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PushRequest {
    /// Named push commands, handled in document order.
    #[serde(default)]
    pub push: CommandMap,

    /// External package identifier, attached to module-load failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
}

/// One named push command: a source application, its augmentations, and
/// its target databases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushCommand {
    /// Base directory every relative path in this command resolves against.
    pub basedir: PathBuf,

    /// Application source directory, relative to `basedir`.
    pub src: PathBuf,

    /// Target host URL, `scheme://[user[:pass]@]host[:port]/`. Database
    /// names from `dbs` are appended to it per push.
    pub host: String,

    /// Target database names, pushed strictly in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dbs: Vec<String>,

    /// Attachment directive, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub att: Option<AttachmentSpec>,

    /// Post-load hook module path, relative to `basedir`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onloaded: Option<PathBuf>,

    /// Library directories merged into `doc.lib`, relative to `basedir/src`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lib: Option<Vec<PathBuf>>,

    /// Library directories merged into `doc.views.lib`, relative to
    /// `basedir/src`.
    #[serde(
        rename = "viewsLib",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub views_lib: Option<Vec<PathBuf>>,
}

impl PushCommand {
    /// Path of the application module for the named command:
    /// `basedir/src/<name>`.
    ///
    /// The loader receives a fully composed path; nothing here depends on
    /// the process working directory.
    pub fn module_path(&self, name: &str) -> PathBuf {
        self.basedir.join(&self.src).join(name)
    }

    /// Path of the onloaded hook module: `basedir/<onloaded>`.
    pub fn hook_path(&self) -> Option<PathBuf> {
        self.onloaded.as_ref().map(|h| self.basedir.join(h))
    }

    /// Path of a library directory: `basedir/src/<dir>`.
    pub fn lib_dir_path(&self, dir: &Path) -> PathBuf {
        self.basedir.join(&self.src).join(dir)
    }
}
