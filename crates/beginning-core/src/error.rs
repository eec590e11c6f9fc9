//! # Scaffolding Error Types
//!
//! One `thiserror` enum per concern (values, rendering, hooks) plus the crate-level
//! [`Error`] that every public operation returns.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Result type for scaffolding operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while resolving and validating [`Values`](crate::Values).
///
/// Always raised before the filesystem is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required value '{field}'")]
    MissingField { field: &'static str },

    #[error("invalid version '{value}': {reason}")]
    InvalidVersion { value: String, reason: String },

    #[error("version {value} is below the minimum supported version {minimum}")]
    VersionTooLow { value: String, minimum: String },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// Errors raised while rendering template paths or contents.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to render '{template}': {detail}")]
    Render {
        template: String,
        detail: String,
        #[source]
        source: tera::Error,
    },

    #[error("'{template}' rendered to unusable path '{rendered}'")]
    InvalidPath { template: String, rendered: String },

    #[error("'{template}' is marked as a template but is not valid UTF-8")]
    NotUtf8 { template: String },

    #[error("'{first}' and '{second}' both resolve to '{destination}'")]
    DuplicateDestination {
        first: String,
        second: String,
        destination: String,
    },
}

impl TemplateError {
    /// Wrap a Tera failure, flattening its source chain into the message.
    ///
    /// Tera's top-level error only names the template; the useful part (which
    /// variable was missing, where the syntax broke) lives further down the chain.
    pub(crate) fn render(template: impl Into<String>, source: tera::Error) -> Self {
        let mut detail = source.to_string();
        let mut cause = std::error::Error::source(&source);
        while let Some(inner) = cause {
            detail.push_str(": ");
            detail.push_str(&inner.to_string());
            cause = inner.source();
        }
        Self::Render {
            template: template.into(),
            detail,
            source,
        }
    }
}

/// Errors raised by the post-generation hook sequence.
#[derive(Debug, Error)]
pub enum HookError {
    #[error("hook '{hook}' could not be started: {source}")]
    Spawn {
        hook: String,
        source: std::io::Error,
    },

    #[error("hook '{hook}' failed with {status}")]
    Failed { hook: String, status: ExitStatus },

    #[error("cannot switch working directory to {path}: {source}")]
    WorkingDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl HookError {
    /// Name of the hook that failed, when the failure belongs to one.
    pub fn hook_name(&self) -> Option<&str> {
        match self {
            Self::Spawn { hook, .. } | Self::Failed { hook, .. } => Some(hook),
            Self::WorkingDirectory { .. } => None,
        }
    }
}

/// Crate-level error returned by every public operation.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    #[error("hook execution error: {0}")]
    Hook(#[from] HookError),

    #[error("template type '{name}' not found (available: {})", .available.join(", "))]
    TypeNotFound { name: String, available: Vec<String> },

    #[error("destination {} already exists and is not empty", .path.display())]
    DestinationNotEmpty { path: PathBuf },

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    /// Build an I/O error that remembers the path it happened at.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_includes_cause() {
        let mut tera = tera::Tera::default();
        tera.add_raw_template("t", "{{ missing }}").unwrap();
        let err = tera.render("t", &tera::Context::new()).unwrap_err();

        let wrapped = TemplateError::render("go.mod.tmpl", err);
        let msg = wrapped.to_string();
        assert!(msg.contains("go.mod.tmpl"));
        assert!(msg.contains("missing"), "message was: {msg}");
    }

    #[test]
    fn test_type_not_found_lists_available() {
        let err = Error::TypeNotFound {
            name: "cli".to_string(),
            available: vec!["library".to_string(), "service".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "template type 'cli' not found (available: library, service)"
        );
    }

    #[test]
    fn test_hook_name() {
        let err = HookError::Spawn {
            hook: "wire".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "bash"),
        };
        assert_eq!(err.hook_name(), Some("wire"));
    }
}
