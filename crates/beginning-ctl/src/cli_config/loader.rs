//! Config file discovery and loading for `.beginning.toml`.
//!
//! Checks two locations in precedence order:
//! 1. `./.beginning.toml` (project-local)
//! 2. `~/.config/beginning.toml` (user-global)

use std::path::PathBuf;

use super::CliConfig;

const CONFIG_FILENAME: &str = ".beginning.toml";
const GLOBAL_CONFIG_DIR: &str = ".config";
const GLOBAL_CONFIG_FILENAME: &str = "beginning.toml";

/// Load CLI config from the first discovered location, or return defaults.
pub(crate) fn load_cli_config() -> CliConfig {
    if let Some(path) = find_config_file() {
        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    tracing::debug!(?path, "Loaded CLI config");
                    return config;
                }
                Err(e) => {
                    tracing::warn!(?path, error = %e, "Failed to parse CLI config, using defaults");
                }
            },
            Err(e) => {
                tracing::warn!(?path, error = %e, "Failed to read CLI config, using defaults");
            }
        }
    }
    CliConfig::default()
}

fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILENAME);
    if local.is_file() {
        return Some(local);
    }

    if let Some(home) = home_dir() {
        let global = home.join(GLOBAL_CONFIG_DIR).join(GLOBAL_CONFIG_FILENAME);
        if global.is_file() {
            return Some(global);
        }
    }

    None
}

/// Resolve a leading `~/` to the home directory.
pub(crate) fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_path_tilde() {
        let expanded = expand_path("~/templates/go");
        assert!(expanded.to_str().unwrap().ends_with("templates/go"));
        assert!(!expanded.to_str().unwrap().starts_with('~'));
    }

    #[test]
    fn test_expand_path_absolute() {
        assert_eq!(expand_path("/srv/templates"), PathBuf::from("/srv/templates"));
    }

    #[test]
    fn test_expand_path_relative() {
        assert_eq!(expand_path("./templates"), PathBuf::from("./templates"));
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert!(config.template_dir.is_none());
        assert!(config.default_type.is_none());
        assert!(!config.skip_hooks);
    }

    #[test]
    fn test_parse_config_toml() {
        let toml_str = r#"
template-dir = "~/templates/go"
values-file = "team-values.yaml"
default-type = "library"
output-dir = "./projects"
skip-hooks = true
"#;
        let config: CliConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.template_dir.as_deref(), Some("~/templates/go"));
        assert_eq!(config.values_file.as_deref(), Some("team-values.yaml"));
        assert_eq!(config.default_type.as_deref(), Some("library"));
        assert_eq!(config.output_dir.as_deref(), Some("./projects"));
        assert!(config.skip_hooks);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: CliConfig = toml::from_str("default-type = \"service\"\n").unwrap();
        assert_eq!(config.default_type.as_deref(), Some("service"));
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let config: CliConfig = toml::from_str("plugin-paths = [\"./x\"]\n").unwrap();
        assert_eq!(config, CliConfig::default());
    }
}
