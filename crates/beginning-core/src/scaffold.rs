//! Scaffold engine: turn a template type plus [`Values`] into a project tree.
//!
//! Generation runs in two phases:
//!
//! 1. [`plan`] walks the template type and renders every entry path. Marker
//!    stripping, the dotfile rewrite, and the duplicate-destination check happen
//!    here, so a bad path never creates the destination.
//! 2. [`ScaffoldPlan::apply`] creates the destination and materialises entries in
//!    walk order, rendering template contents as it goes.
//!
//! A failure during `apply` stops immediately and leaves whatever was already
//! written in place. There is no rollback; the caller owns cleanup of the
//! partially populated destination.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Error, Result, TemplateError};
use crate::render::Renderer;
use crate::repository::{TemplateSource, DOTFILE_NAME, DOTFILE_TEMPLATE, MARKER_SUFFIX};
use crate::values::Values;

/// What to do for one planned entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CreateDir,
    /// Render the template source and write the result.
    Render { source: Vec<u8>, executable: bool },
    /// Copy bytes verbatim.
    Copy { contents: Vec<u8>, executable: bool },
}

/// A template entry with its resolved destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEntry {
    /// Entry path as it appears in the template tree.
    pub template: String,
    /// `/`-separated destination relative to the generated root.
    pub destination: String,
    pub action: Action,
}

/// Resolved entries of one template type, ready to be written.
#[derive(Debug, Clone)]
pub struct ScaffoldPlan {
    template_type: String,
    values: Values,
    entries: Vec<PlannedEntry>,
}

/// Result of a successful scaffold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTree {
    /// Absolute path of the generated root.
    pub root: PathBuf,
    /// Every created node in creation order.
    pub created: Vec<PathBuf>,
}

/// Destination basename for a template file.
///
/// `x.y.tmpl` becomes `x.y`, except [`DOTFILE_TEMPLATE`] which becomes
/// [`DOTFILE_NAME`].
pub fn destination_file_name(file_name: &str) -> &str {
    if file_name == DOTFILE_TEMPLATE {
        return DOTFILE_NAME;
    }
    file_name.strip_suffix(MARKER_SUFFIX).unwrap_or(file_name)
}

/// Resolve every entry of `template_type` without touching the filesystem.
pub fn plan(source: &dyn TemplateSource, template_type: &str, values: &Values) -> Result<ScaffoldPlan> {
    let entries = source.walk(template_type)?;
    let mut renderer = Renderer::new(values);

    let mut planned = Vec::with_capacity(entries.len());
    let mut claimed: HashMap<String, String> = HashMap::new();

    for entry in entries {
        let rendered = renderer.render_path(&entry.path)?;

        let destination = if entry.is_template() {
            let (parent, name) = match rendered.rsplit_once('/') {
                Some((parent, name)) => (Some(parent), name),
                None => (None, rendered.as_str()),
            };
            let name = destination_file_name(name);
            if name.is_empty() {
                return Err(TemplateError::InvalidPath {
                    template: entry.path,
                    rendered,
                }
                .into());
            }
            match parent {
                Some(parent) => format!("{parent}/{name}"),
                None => name.to_string(),
            }
        } else {
            rendered
        };

        if let Some(first) = claimed.get(&destination) {
            return Err(TemplateError::DuplicateDestination {
                first: first.clone(),
                second: entry.path,
                destination,
            }
            .into());
        }
        claimed.insert(destination.clone(), entry.path.clone());

        let action = if entry.is_dir() {
            Action::CreateDir
        } else if entry.is_template() {
            Action::Render {
                source: entry.contents,
                executable: entry.executable,
            }
        } else {
            Action::Copy {
                contents: entry.contents,
                executable: entry.executable,
            }
        };

        tracing::debug!(template = %entry.path, %destination, "Planned entry");
        planned.push(PlannedEntry {
            template: entry.path,
            destination,
            action,
        });
    }

    Ok(ScaffoldPlan {
        template_type: template_type.to_string(),
        values: values.clone(),
        entries: planned,
    })
}

/// Plan and apply in one step.
pub fn scaffold(
    source: &dyn TemplateSource,
    template_type: &str,
    values: &Values,
    destination: &Path,
) -> Result<GeneratedTree> {
    plan(source, template_type, values)?.apply(destination)
}

impl ScaffoldPlan {
    pub fn template_type(&self) -> &str {
        &self.template_type
    }

    pub fn entries(&self) -> &[PlannedEntry] {
        &self.entries
    }

    /// Materialise the plan under `destination`.
    ///
    /// `destination` must not exist or must be an empty directory.
    pub fn apply(&self, destination: &Path) -> Result<GeneratedTree> {
        let root = prepare_destination(destination)?;
        tracing::info!(
            template_type = %self.template_type,
            root = %root.display(),
            entries = self.entries.len(),
            "Scaffolding project"
        );

        let mut created = Vec::with_capacity(self.entries.len());
        if let Err(e) = self.write_entries(&root, &mut created) {
            tracing::warn!(
                root = %root.display(),
                created = created.len(),
                "Scaffold aborted, destination is partially populated"
            );
            return Err(e);
        }

        Ok(GeneratedTree { root, created })
    }

    fn write_entries(&self, root: &Path, created: &mut Vec<PathBuf>) -> Result<()> {
        let mut renderer = Renderer::new(&self.values);

        for entry in &self.entries {
            let target = entry
                .destination
                .split('/')
                .fold(root.to_path_buf(), |path, segment| path.join(segment));

            match &entry.action {
                Action::CreateDir => {
                    std::fs::create_dir_all(&target).map_err(|e| Error::io(&target, e))?;
                }
                Action::Render { source, executable } => {
                    let content = renderer.render_content(&entry.template, source)?;
                    write_file(&target, content.as_bytes(), *executable)?;
                }
                Action::Copy {
                    contents,
                    executable,
                } => {
                    write_file(&target, contents, *executable)?;
                }
            }

            tracing::debug!(path = %target.display(), "Created");
            created.push(target);
        }
        Ok(())
    }
}

/// Create the destination root and return its absolute path.
fn prepare_destination(destination: &Path) -> Result<PathBuf> {
    if destination.exists() {
        if !destination.is_dir() {
            return Err(Error::DestinationNotEmpty {
                path: destination.to_path_buf(),
            });
        }
        let mut contents =
            std::fs::read_dir(destination).map_err(|e| Error::io(destination, e))?;
        if contents.next().is_some() {
            return Err(Error::DestinationNotEmpty {
                path: destination.to_path_buf(),
            });
        }
    } else {
        std::fs::create_dir_all(destination).map_err(|e| Error::io(destination, e))?;
    }

    std::fs::canonicalize(destination).map_err(|e| Error::io(destination, e))
}

/// Write through a temporary file in the same directory so a failure never
/// leaves a partially written target.
fn write_file(target: &Path, contents: &[u8], executable: bool) -> Result<()> {
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    tmp.write_all(contents)
        .map_err(|e| Error::io(tmp.path(), e))?;
    set_mode(tmp.path(), executable)?;
    tmp.persist(target).map_err(|e| Error::io(target, e.error))?;
    Ok(())
}

#[cfg(unix)]
fn set_mode(path: &Path, executable: bool) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = if executable { 0o755 } else { 0o644 };
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .map_err(|e| Error::io(path, e))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _executable: bool) -> Result<()> {
    Ok(())
}
