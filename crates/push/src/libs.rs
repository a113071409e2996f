//! Library merge stages: fold directory contents into the document tree.

use std::fmt;
use std::path::PathBuf;

use couchpush_manifest::PushCommand;
use tracing::{debug, info};

use crate::error::PushError;
use crate::loader::{AppLoader, Application, LoaderError};

/// Document section a library merge targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibSection {
    /// `doc.lib`
    DocLib,
    /// `doc.views.lib`
    ViewsLib,
}

impl LibSection {
    pub fn as_str(self) -> &'static str {
        match self {
            LibSection::DocLib => "doc.lib",
            LibSection::ViewsLib => "views.lib",
        }
    }
}

impl fmt::Display for LibSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Merges the command's `lib` directories into `doc.lib`.
pub fn merge_doc_lib(
    name: &str,
    cmd: &PushCommand,
    app: &mut dyn Application,
    loader: &dyn AppLoader,
) -> Result<(), PushError> {
    let Some(dirs) = &cmd.lib else {
        debug!(command = name, "has no 'lib' directive");
        return Ok(());
    };
    merge_section(name, cmd, dirs, app, loader, LibSection::DocLib)
}

/// Merges the command's `viewsLib` directories into `doc.views.lib`.
pub fn merge_views_lib(
    name: &str,
    cmd: &PushCommand,
    app: &mut dyn Application,
    loader: &dyn AppLoader,
) -> Result<(), PushError> {
    let Some(dirs) = &cmd.views_lib else {
        debug!(command = name, "has no 'viewsLib' directive");
        return Ok(());
    };
    merge_section(name, cmd, dirs, app, loader, LibSection::ViewsLib)
}

/// Loads each directory in order and folds its files into the section's
/// mapping. Same-key entries are overwritten, so the last directory wins.
/// A failing directory aborts the remaining ones; directories already
/// merged stay merged.
fn merge_section(
    name: &str,
    cmd: &PushCommand,
    dirs: &[PathBuf],
    app: &mut dyn Application,
    loader: &dyn AppLoader,
    section: LibSection,
) -> Result<(), PushError> {
    let target = section_slot(app.doc_mut(), section).map_err(|source| merge_error(
        name, section, dirs, PathBuf::new(), source,
    ))?;

    for dir in dirs {
        let abs = cmd.lib_dir_path(dir);
        debug!(command = name, section = %section, dir = %abs.display(), "loading library directory");

        let files = loader
            .load_files(&abs)
            .map_err(|source| merge_error(name, section, dirs, dir.clone(), source))?;
        target.extend(files);
    }

    info!(
        command = name,
        section = %section,
        keys = ?target.keys().collect::<Vec<_>>(),
        "library directories merged"
    );
    Ok(())
}

fn merge_error(
    name: &str,
    section: LibSection,
    dirs: &[PathBuf],
    failed_on: PathBuf,
    source: LoaderError,
) -> PushError {
    PushError::LibraryMerge {
        command: name.to_string(),
        section,
        dirs: dirs.to_vec(),
        failed_on,
        source,
    }
}

/// Returns the section's mapping inside the document, creating it (and the
/// intervening `views` object) when absent.
fn section_slot(
    doc: &mut serde_json::Value,
    section: LibSection,
) -> Result<&mut serde_json::Map<String, serde_json::Value>, LoaderError> {
    let root = doc
        .as_object_mut()
        .ok_or_else(|| LoaderError::new("application document is not an object"))?;

    let parent = match section {
        LibSection::DocLib => root,
        LibSection::ViewsLib => root
            .entry("views")
            .or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()))
            .as_object_mut()
            .ok_or_else(|| LoaderError::new("document 'views' is not an object"))?,
    };

    parent
        .entry("lib")
        .or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()))
        .as_object_mut()
        .ok_or_else(|| LoaderError::new(format!("document '{}' is not an object", section)))
}
