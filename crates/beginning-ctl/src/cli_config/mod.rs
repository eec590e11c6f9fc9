//! CLI preferences.
//!
//! Separate from the values file: this controls how the tool behaves (which
//! template source, where output goes), not what gets rendered.

pub(crate) mod loader;

pub(crate) use loader::{expand_path, load_cli_config};

use serde::Deserialize;

/// Contents of `.beginning.toml`. Every field is optional; command-line flags
/// take precedence over anything set here.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct CliConfig {
    /// On-disk template repository used instead of the bundled templates.
    pub template_dir: Option<String>,

    /// Values file read by `create` when `-v` is not given.
    pub values_file: Option<String>,

    /// Template type used by `create` when `-t` is not given.
    pub default_type: Option<String>,

    /// Parent directory for generated projects when `-o` is not given.
    pub output_dir: Option<String>,

    /// Never run post-generation hooks.
    #[serde(default)]
    pub skip_hooks: bool,
}
