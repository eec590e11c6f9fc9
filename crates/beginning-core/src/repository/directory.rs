//! On-disk template repository.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use super::{type_not_found, TemplateEntry, TemplateSource};
use crate::error::{Error, Result};

/// Template repository rooted at a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Open a repository. The root must be an existing directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(Error::io(
                &root,
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "template repository is not a directory",
                ),
            ));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateSource for DirectorySource {
    fn list_types(&self) -> Result<BTreeSet<String>> {
        let entries = std::fs::read_dir(&self.root).map_err(|e| Error::io(&self.root, e))?;

        let mut types = BTreeSet::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(&self.root, e))?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            match entry.file_name().to_str() {
                Some(name) if !name.starts_with('.') => {
                    types.insert(name.to_string());
                }
                Some(_) => {}
                None => tracing::debug!(?path, "Skipping template type with non UTF-8 name"),
            }
        }
        Ok(types)
    }

    fn walk(&self, type_name: &str) -> Result<Vec<TemplateEntry>> {
        if !self.has_type(type_name)? {
            return Err(type_not_found(self, type_name));
        }

        let type_root = self.root.join(type_name);
        let mut entries = Vec::new();

        for item in WalkDir::new(&type_root)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let item = item.map_err(|e| {
                let path = e.path().unwrap_or(&type_root).to_path_buf();
                Error::io(path, e.into())
            })?;

            let relative = relative_template_path(&type_root, item.path())?;

            if item.file_type().is_dir() {
                entries.push(TemplateEntry::directory(relative));
                continue;
            }

            let contents = std::fs::read(item.path()).map_err(|e| Error::io(item.path(), e))?;
            let executable = is_executable(item.path())?;
            entries.push(TemplateEntry::file(relative, contents, executable));
        }

        tracing::debug!(template_type = type_name, entries = entries.len(), "Walked template type");
        Ok(entries)
    }
}

/// `path` relative to `base`, joined with `/` regardless of platform.
fn relative_template_path(base: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(base).map_err(|_| {
        Error::io(
            path,
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "entry is outside its template type",
            ),
        )
    })?;

    let mut segments = Vec::new();
    for component in relative.components() {
        if let Component::Normal(segment) = component {
            let segment = segment.to_str().ok_or_else(|| {
                Error::io(
                    path,
                    std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        "template path is not valid UTF-8",
                    ),
                )
            })?;
            segments.push(segment);
        }
    }
    Ok(segments.join("/"))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> Result<bool> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = std::fs::metadata(path).map_err(|e| Error::io(path, e))?;
    Ok(metadata.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(_path: &Path) -> Result<bool> {
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::EntryKind;
    use std::fs;

    fn setup_repository() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let service = dir.path().join("service");
        fs::create_dir_all(service.join("cmd/{{ repo_name }}")).unwrap();
        fs::create_dir_all(service.join("internal")).unwrap();
        fs::write(service.join("go.mod.tmpl"), "module {{ module_name }}\n").unwrap();
        fs::write(service.join("Makefile"), "build:\n\tgo build ./...\n").unwrap();
        fs::write(service.join("cmd/{{ repo_name }}/main.go.tmpl"), "package main\n").unwrap();

        fs::create_dir_all(dir.path().join("library")).unwrap();
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join("README.md"), "not a type").unwrap();
        dir
    }

    #[test]
    fn test_list_types_skips_files_and_hidden_dirs() {
        let dir = setup_repository();
        let source = DirectorySource::open(dir.path()).unwrap();
        let types: Vec<_> = source.list_types().unwrap().into_iter().collect();
        assert_eq!(types, vec!["library", "service"]);
    }

    #[test]
    fn test_walk_is_lexical_pre_order() {
        let dir = setup_repository();
        let source = DirectorySource::open(dir.path()).unwrap();
        let entries = source.walk("service").unwrap();

        let paths: Vec<_> = entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "Makefile",
                "cmd",
                "cmd/{{ repo_name }}",
                "cmd/{{ repo_name }}/main.go.tmpl",
                "go.mod.tmpl",
                "internal",
            ]
        );
        assert_eq!(entries[1].kind, EntryKind::Directory);
        assert_eq!(entries[4].contents, b"module {{ module_name }}\n");
    }

    #[test]
    fn test_walk_unknown_type() {
        let dir = setup_repository();
        let source = DirectorySource::open(dir.path()).unwrap();
        match source.walk("cli") {
            Err(Error::TypeNotFound { name, available }) => {
                assert_eq!(name, "cli");
                assert_eq!(available, vec!["library", "service"]);
            }
            other => panic!("expected TypeNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_walk_rejects_nested_type_name() {
        let dir = setup_repository();
        let source = DirectorySource::open(dir.path()).unwrap();
        assert!(matches!(
            source.walk("service/cmd"),
            Err(Error::TypeNotFound { .. })
        ));
    }

    #[test]
    fn test_open_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        assert!(DirectorySource::open(dir.path().join("nope")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_reports_executable_bit() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("service/bin");
        fs::create_dir_all(&bin).unwrap();
        fs::write(bin.join("wire.sh"), "#!/bin/sh\n").unwrap();
        fs::set_permissions(bin.join("wire.sh"), fs::Permissions::from_mode(0o755)).unwrap();
        fs::write(bin.join("notes.txt"), "").unwrap();

        let source = DirectorySource::open(dir.path()).unwrap();
        let entries = source.walk("service").unwrap();
        let notes = entries.iter().find(|e| e.path == "bin/notes.txt").unwrap();
        let wire = entries.iter().find(|e| e.path == "bin/wire.sh").unwrap();
        assert!(!notes.executable);
        assert!(wire.executable);
    }
}
