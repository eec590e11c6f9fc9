//! Command handlers for the `beginning` CLI.
//!
//! Each module handles one subcommand, delegating to `beginning-core` for the
//! actual work.

pub(crate) mod create;
pub(crate) mod info;
pub(crate) mod init;
pub(crate) mod list;

pub(crate) use create::handle_create_command;
pub(crate) use info::handle_info_command;
pub(crate) use init::handle_init_command;
pub(crate) use list::handle_list_command;

use std::collections::BTreeMap;
use std::path::PathBuf;

use beginning_core::{DirectorySource, EmbeddedSource, TemplateSource};

use crate::cli_config::{expand_path, CliConfig};
use crate::error::{CtlError, CtlResult};

/// Pick the template source: `--templates` > `template-dir` preference > bundled.
pub(crate) fn template_source(
    flag: Option<PathBuf>,
    cli_config: &CliConfig,
) -> CtlResult<Box<dyn TemplateSource>> {
    let dir = flag.or_else(|| cli_config.template_dir.as_deref().map(expand_path));
    match dir {
        Some(dir) => {
            tracing::debug!(path = %dir.display(), "Using on-disk template repository");
            Ok(Box::new(DirectorySource::open(dir)?))
        }
        None => Ok(Box::new(EmbeddedSource::bundled())),
    }
}

/// Human-readable name of the active source.
pub(crate) fn describe_source(flag: Option<&PathBuf>, cli_config: &CliConfig) -> String {
    match flag {
        Some(dir) => dir.display().to_string(),
        None => match &cli_config.template_dir {
            Some(dir) => expand_path(dir).display().to_string(),
            None => "bundled".to_string(),
        },
    }
}

/// Parse `--param key=value` pairs. Later pairs win on duplicate keys.
pub(crate) fn parse_params(params: &[String]) -> CtlResult<BTreeMap<String, String>> {
    let mut map = BTreeMap::new();
    for param in params {
        let (key, value) = param
            .split_once('=')
            .filter(|(key, _)| !key.trim().is_empty())
            .ok_or_else(|| CtlError::InvalidParam {
                param: param.clone(),
            })?;
        map.insert(key.trim().to_string(), value.to_string());
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_params() {
        let params = vec!["owner=payments".to_string(), "port=8080".to_string()];
        let map = parse_params(&params).unwrap();
        assert_eq!(map["owner"], "payments");
        assert_eq!(map["port"], "8080");
    }

    #[test]
    fn test_parse_params_keeps_equals_in_value() {
        let map = parse_params(&["dsn=user=app".to_string()]).unwrap();
        assert_eq!(map["dsn"], "user=app");
    }

    #[test]
    fn test_parse_params_rejects_missing_key_or_separator() {
        assert!(matches!(
            parse_params(&["owner".to_string()]),
            Err(CtlError::InvalidParam { .. })
        ));
        assert!(parse_params(&["=value".to_string()]).is_err());
    }

    #[test]
    fn test_describe_source() {
        let config = CliConfig {
            template_dir: Some("/srv/templates".to_string()),
            ..Default::default()
        };
        let flag = PathBuf::from("./mine");
        assert_eq!(describe_source(Some(&flag), &config), "./mine");
        assert_eq!(describe_source(None, &config), "/srv/templates");
        assert_eq!(describe_source(None, &CliConfig::default()), "bundled");
    }
}
