//! Template repository compiled into the binary.

use std::collections::{BTreeMap, BTreeSet};

use super::{type_not_found, TemplateEntry, TemplateSource};
use crate::error::Result;

/// One file of an embedded repository. `path` starts with the template type.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedFile {
    pub path: &'static str,
    pub contents: &'static [u8],
    pub executable: bool,
}

impl EmbeddedFile {
    pub const fn new(path: &'static str, contents: &'static [u8]) -> Self {
        Self {
            path,
            contents,
            executable: false,
        }
    }

    pub const fn executable(path: &'static str, contents: &'static [u8]) -> Self {
        Self {
            path,
            contents,
            executable: true,
        }
    }
}

macro_rules! bundled {
    ($path:literal) => {
        EmbeddedFile::new(
            $path,
            include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/template/", $path)),
        )
    };
    ($path:literal, executable) => {
        EmbeddedFile::executable(
            $path,
            include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/template/", $path)),
        )
    };
}

/// Templates shipped with the tool.
static BUNDLED: &[EmbeddedFile] = &[
    bundled!("library/README.md.tmpl"),
    bundled!("library/dot.gitignore.tmpl"),
    bundled!("library/go.mod.tmpl"),
    bundled!("library/{{repo_name}}.go.tmpl"),
    bundled!("library/{{repo_name}}_test.go.tmpl"),
    bundled!("service/Makefile"),
    bundled!("service/README.md.tmpl"),
    bundled!("service/bin/swagger.sh", executable),
    bundled!("service/bin/wire.sh", executable),
    bundled!("service/cmd/{{repo_name}}/main.go.tmpl"),
    bundled!("service/dot.gitignore.tmpl"),
    bundled!("service/go.mod.tmpl"),
    bundled!("service/internal/config/config.go"),
    bundled!("service/internal/config/database.go"),
    bundled!("service/internal/config/server.go"),
    bundled!("service/internal/domain/errors.go"),
    bundled!("service/internal/entrypoints/httpd/controller/health_controller.go"),
    bundled!("service/internal/entrypoints/httpd/schema/health_schema.go"),
    bundled!("service/internal/entrypoints/httpd/schema/ready_schema.go"),
    bundled!("service/internal/middleware/logger.go"),
];

/// Template repository backed by a static file table.
///
/// Only files are stored; directories are derived from their paths, so an
/// embedded tree cannot contain an empty directory.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedSource {
    files: &'static [EmbeddedFile],
}

impl EmbeddedSource {
    pub const fn new(files: &'static [EmbeddedFile]) -> Self {
        Self { files }
    }

    /// The `library` and `service` templates bundled with the tool.
    pub fn bundled() -> Self {
        Self::new(BUNDLED)
    }
}

impl TemplateSource for EmbeddedSource {
    fn list_types(&self) -> Result<BTreeSet<String>> {
        Ok(self
            .files
            .iter()
            .filter_map(|file| file.path.split_once('/'))
            .map(|(type_name, _)| type_name.to_string())
            .collect())
    }

    fn walk(&self, type_name: &str) -> Result<Vec<TemplateEntry>> {
        // Keyed by path components so the map iterates in lexical pre-order.
        let mut tree: BTreeMap<Vec<&str>, Option<&EmbeddedFile>> = BTreeMap::new();

        for file in self.files {
            let Some(relative) = file
                .path
                .split_once('/')
                .filter(|(owner, _)| *owner == type_name)
                .map(|(_, rest)| rest)
            else {
                continue;
            };

            let segments: Vec<&str> = relative.split('/').collect();
            for depth in 1..segments.len() {
                tree.entry(segments[..depth].to_vec()).or_insert(None);
            }
            tree.insert(segments, Some(file));
        }

        if tree.is_empty() {
            return Err(type_not_found(self, type_name));
        }

        Ok(tree
            .into_iter()
            .map(|(segments, file)| {
                let path = segments.join("/");
                match file {
                    Some(file) => TemplateEntry::file(path, file.contents, file.executable),
                    None => TemplateEntry::directory(path),
                }
            })
            .collect())
    }
}
