//! Errors surfaced by the command handlers.

use std::path::PathBuf;

use beginning_core::{ConfigError, Error as CoreError, HookError};

#[derive(Debug, thiserror::Error)]
pub(crate) enum CtlError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("{source}")]
    Hook {
        root: PathBuf,
        #[source]
        source: HookError,
    },

    #[error("invalid parameter format: '{param}'. Expected key=value")]
    InvalidParam { param: String },

    #[error("{} already exists", .path.display())]
    AlreadyExists { path: PathBuf },

    #[error("failed to encode value as YAML: {0}")]
    Encode(#[from] serde_yaml::Error),

    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub(crate) type CtlResult<T> = Result<T, CtlError>;

impl From<ConfigError> for CtlError {
    fn from(e: ConfigError) -> Self {
        Self::Core(e.into())
    }
}

impl CtlError {
    /// Follow-up suggestions printed after the error line.
    pub(crate) fn hints(&self) -> Vec<String> {
        match self {
            Self::Core(CoreError::Config(ConfigError::MissingField { field })) => {
                let flag = match *field {
                    "module_name" => "-m <module>",
                    "repo_name" => "-r <repo>",
                    _ => return Vec::new(),
                };
                vec![format!(
                    "Pass {flag} or set it in the values file (see 'beginning init')."
                )]
            }
            Self::Core(CoreError::TypeNotFound { .. }) => {
                vec!["Use 'beginning list' to see available template types.".to_string()]
            }
            Self::Core(CoreError::DestinationNotEmpty { .. }) => {
                vec!["Choose another directory with -o, or remove the existing one.".to_string()]
            }
            Self::Hook { root, .. } => vec![format!(
                "The generated files were kept in {}. Fix the hook and re-run it by hand, or use --skip-hooks.",
                root.display()
            )],
            Self::AlreadyExists { .. } => {
                vec!["Remove it first if you want to reinitialize.".to_string()]
            }
            _ => Vec::new(),
        }
    }
}
