//! Template repository: named template trees and their entries.
//!
//! A repository root holds one first-level directory per template type. Any path
//! segment below a type may contain placeholders; files ending in
//! [`MARKER_SUFFIX`] have their contents rendered, everything else is copied
//! verbatim.
//!
//! Two sources implement [`TemplateSource`]:
//! - [`DirectorySource`] reads a repository from disk
//! - [`EmbeddedSource`] serves a static table compiled into the binary
//!
//! Both yield entries in the same deterministic lexical pre-order, so a
//! directory always precedes its children.

mod directory;
mod embedded;

use std::collections::BTreeSet;

pub use directory::DirectorySource;
pub use embedded::{EmbeddedFile, EmbeddedSource};

use crate::error::{Error, Result};

/// Filename suffix marking a file whose contents are a template.
pub const MARKER_SUFFIX: &str = ".tmpl";

/// Template basename that produces a dotfile.
///
/// Hidden files cannot be shipped in a template tree reliably, so the template
/// carries a visible name and is rewritten to [`DOTFILE_NAME`].
pub const DOTFILE_TEMPLATE: &str = "dot.gitignore.tmpl";

/// Destination name for [`DOTFILE_TEMPLATE`].
pub const DOTFILE_NAME: &str = ".gitignore";

/// Whether an entry is a directory or a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// One node of a template tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    /// `/`-separated path relative to the template type root, not yet rendered.
    pub path: String,
    pub kind: EntryKind,
    /// File bytes. Always empty for directories.
    pub contents: Vec<u8>,
    /// Whether the file should be written with execute permission.
    pub executable: bool,
}

impl TemplateEntry {
    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Directory,
            contents: Vec::new(),
            executable: false,
        }
    }

    pub fn file(path: impl Into<String>, contents: impl Into<Vec<u8>>, executable: bool) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
            contents: contents.into(),
            executable,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Final path segment, still unrendered.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Whether this is a file whose contents must be rendered.
    pub fn is_template(&self) -> bool {
        self.kind == EntryKind::File && self.file_name().ends_with(MARKER_SUFFIX)
    }
}

/// A read-only store of named template trees.
pub trait TemplateSource: std::fmt::Debug {
    /// Names of every template type in the repository.
    fn list_types(&self) -> Result<BTreeSet<String>>;

    /// Every entry of `type_name`, directories before their children, siblings
    /// in lexical order.
    ///
    /// Fails with [`Error::TypeNotFound`] when the type does not exist.
    fn walk(&self, type_name: &str) -> Result<Vec<TemplateEntry>>;

    /// Whether `type_name` exists in this repository.
    fn has_type(&self, type_name: &str) -> Result<bool> {
        Ok(self.list_types()?.contains(type_name))
    }
}

/// Build the error for an unknown type, listing the valid ones.
pub(crate) fn type_not_found(source: &dyn TemplateSource, name: &str) -> Error {
    let available = source
        .list_types()
        .map(|types| types.into_iter().collect())
        .unwrap_or_default();
    Error::TypeNotFound {
        name: name.to_string(),
        available,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_file_name() {
        let entry = TemplateEntry::file("cmd/{{ repo_name }}/main.go.tmpl", "", false);
        assert_eq!(entry.file_name(), "main.go.tmpl");
        assert_eq!(TemplateEntry::directory("cmd").file_name(), "cmd");
    }

    #[test]
    fn test_is_template() {
        assert!(TemplateEntry::file("go.mod.tmpl", "", false).is_template());
        assert!(TemplateEntry::file("dot.gitignore.tmpl", "", false).is_template());
        assert!(!TemplateEntry::file("Makefile", "", false).is_template());
        assert!(!TemplateEntry::file("tmpl", "", false).is_template());
        assert!(!TemplateEntry::directory("fixtures.tmpl").is_template());
    }
}
