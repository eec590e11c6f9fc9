//! `beginning init`: write a starter values file.

use std::collections::BTreeMap;
use std::path::Path;

use askama::Template;
use beginning_core::ResolverSettings;

use super::parse_params;
use crate::error::{CtlError, CtlResult};
use crate::output;

/// Every field holds an already encoded YAML scalar, so the template can paste
/// it after `key: ` verbatim.
#[derive(Template, Debug)]
#[template(path = "init-values.yml", escape = "none")]
struct InitValuesTemplate {
    module_name: String,
    repo_name: String,
    go_version: String,
    extras: Vec<(String, String)>,
}

impl InitValuesTemplate {
    /// Placeholders derived from the directory the file is written into, plus
    /// any `--param` extras.
    fn new(dir: &Path, extras: &BTreeMap<String, String>) -> CtlResult<Self> {
        let repo_name = dir
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .unwrap_or("my-service");

        Ok(Self {
            module_name: yaml_scalar(&format!("github.com/your-org/{repo_name}"))?,
            repo_name: yaml_scalar(repo_name)?,
            go_version: yaml_scalar(&ResolverSettings::default().default_version)?,
            extras: extras
                .iter()
                .map(|(key, value)| Ok((yaml_scalar(key)?, yaml_scalar(value)?)))
                .collect::<CtlResult<_>>()?,
        })
    }
}

/// Encode a string as a single-line YAML scalar that reads back as the same
/// string (quoted when it would otherwise parse as a number, bool or null).
fn yaml_scalar(value: &str) -> CtlResult<String> {
    let encoded = serde_yaml::to_string(value)?;
    Ok(encoded.trim_end_matches('\n').to_string())
}

pub(crate) fn handle_init_command(path: &Path, params: &[String]) -> CtlResult<()> {
    if path.exists() {
        return Err(CtlError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => std::env::current_dir().map_err(|e| CtlError::Write {
            path: path.to_path_buf(),
            source: e,
        })?,
    };
    let parent = std::fs::canonicalize(&parent).unwrap_or(parent);

    let content = InitValuesTemplate::new(&parent, &parse_params(params)?)?.render()?;
    std::fs::write(path, content).map_err(|e| CtlError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;

    output::success(format!("Created {}", path.display()));
    output::blank();
    output::hint("Next steps:");
    output::plain(format!("  edit {}                  # set ModuleName and RepoName", path.display()));
    output::plain("  beginning list                     # browse template types");
    output::plain(format!("  beginning create -v {}", path.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use beginning_core::{values, RawValues};

    fn render(dir: &str, extras: &[(&str, &str)]) -> RawValues {
        let extras = extras
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let content = InitValuesTemplate::new(Path::new(dir), &extras)
            .unwrap()
            .render()
            .unwrap();
        serde_yaml::from_str(&content).unwrap()
    }

    #[test]
    fn test_rendered_values_file_is_valid() {
        let raw = render("/work/orders", &[]);
        assert_eq!(raw.module_name.as_deref(), Some("github.com/your-org/orders"));
        assert_eq!(raw.repo_name.as_deref(), Some("orders"));
        assert_eq!(raw.go_version.as_deref(), Some("1.24"));
        assert!(raw.extra.is_empty());
        assert!(values::validate(raw, &ResolverSettings::default()).is_ok());
    }

    #[test]
    fn test_extras_are_rendered() {
        let raw = render("/work/orders", &[("owner", "payments"), ("port", "8080")]);
        assert_eq!(raw.extra["owner"], serde_yaml::Value::from("payments"));
        assert_eq!(raw.extra["port"], serde_yaml::Value::from("8080"));
        assert_eq!(raw.repo_name.as_deref(), Some("orders"));
    }

    #[test]
    fn test_quotes_and_backslashes_round_trip() {
        let raw = render(
            "/work/it's \"quoted\"",
            &[("note", "say \"hi\""), ("win", "C:\\go"), ("odd: key", "#not a comment")],
        );
        assert_eq!(raw.repo_name.as_deref(), Some("it's \"quoted\""));
        assert_eq!(raw.extra["note"], serde_yaml::Value::from("say \"hi\""));
        assert_eq!(raw.extra["win"], serde_yaml::Value::from("C:\\go"));
        assert_eq!(raw.extra["odd: key"], serde_yaml::Value::from("#not a comment"));
    }

    #[test]
    fn test_init_writes_loadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("values.yaml");
        let params = vec!["note=say \"hi\"".to_string(), "win=C:\\go".to_string()];

        handle_init_command(&path, &params).unwrap();

        let raw = values::load(&path).unwrap();
        assert_eq!(raw.extra["note"], serde_yaml::Value::from("say \"hi\""));
        assert_eq!(raw.extra["win"], serde_yaml::Value::from("C:\\go"));
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("values.yaml");
        std::fs::write(&path, "RepoName: keep\n").unwrap();

        let err = handle_init_command(&path, &[]).unwrap_err();
        assert!(matches!(err, CtlError::AlreadyExists { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "RepoName: keep\n");
    }
}

