//! Values resolution: load a `values.yaml`, layer explicit parameters on top,
//! apply defaults, and validate.
//!
//! Precedence is explicit parameters > values file > built-in defaults. Everything
//! here runs before the scaffold engine touches the filesystem, so a bad value
//! never leaves a half-created destination behind.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use tera::Context;

use crate::error::ConfigError;

const MODULE_NAME_KEYS: &[&str] = &["ModuleName", "module_name", "module-name", "module"];
const REPO_NAME_KEYS: &[&str] = &["RepoName", "repo_name", "repo-name", "repo"];
const GO_VERSION_KEYS: &[&str] = &["GoVersion", "go_version", "go-version"];

/// Unvalidated values, as read from a values file or supplied on the command line.
///
/// The named fields keep the scalar's source text, so an unquoted
/// `GoVersion: 1.30` stays `"1.30"` instead of going through a float.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawValues {
    /// Module identifier (e.g., `github.com/acme/payments`).
    pub module_name: Option<String>,

    /// Repository / project name.
    pub repo_name: Option<String>,

    /// Target Go version.
    pub go_version: Option<String>,

    /// Any other keys, passed through to templates untouched.
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl<'de> Deserialize<'de> for RawValues {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RawValuesVisitor)
    }
}

struct RawValuesVisitor;

impl<'de> Visitor<'de> for RawValuesVisitor {
    type Value = RawValues;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping of template values")
    }

    fn visit_map<A>(self, mut map: A) -> Result<RawValues, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut raw = RawValues::default();
        while let Some(key) = map.next_key::<String>()? {
            // `Option<String>` asks the YAML deserializer for the scalar text
            // rather than a resolved number or bool.
            let slot = if MODULE_NAME_KEYS.contains(&key.as_str()) {
                &mut raw.module_name
            } else if REPO_NAME_KEYS.contains(&key.as_str()) {
                &mut raw.repo_name
            } else if GO_VERSION_KEYS.contains(&key.as_str()) {
                &mut raw.go_version
            } else {
                let value = map.next_value::<serde_yaml::Value>()?;
                raw.extra.insert(key, value);
                continue;
            };
            *slot = map.next_value::<Option<String>>()?;
        }
        Ok(raw)
    }
}

impl RawValues {
    /// Layer `explicit` over `self`. Every field set in `explicit` wins.
    pub fn merge(mut self, explicit: RawValues) -> RawValues {
        if explicit.module_name.is_some() {
            self.module_name = explicit.module_name;
        }
        if explicit.repo_name.is_some() {
            self.repo_name = explicit.repo_name;
        }
        if explicit.go_version.is_some() {
            self.go_version = explicit.go_version;
        }
        self.extra.extend(explicit.extra);
        self
    }
}

/// Load values from a YAML file.
///
/// A missing file is not an error; it yields empty values so that everything can
/// come from explicit parameters instead.
pub fn load(path: &Path) -> Result<RawValues, ConfigError> {
    if !path.exists() {
        tracing::debug!(?path, "No values file, starting from empty values");
        return Ok(RawValues::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    // An empty document deserializes to unit, not to a mapping.
    if contents.trim().is_empty() {
        return Ok(RawValues::default());
    }

    let values = serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(?path, "Loaded values file");
    Ok(values)
}

/// A `major.minor` Go version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct GoVersion {
    pub major: u32,
    pub minor: u32,
}

impl GoVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Parse the leading `major.minor` of a dotted version string.
    ///
    /// Components may carry a non-numeric suffix (`1.24rc1`, `1.24.1-rc`), but each of
    /// the first two must start with a digit.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidVersion {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = value.trim().split('.');
        let major = parts
            .next()
            .and_then(leading_number)
            .ok_or_else(|| invalid("major version is not a number"))?;
        let minor = parts
            .next()
            .and_then(leading_number)
            .ok_or_else(|| invalid("minor version is not a number"))?;

        Ok(Self { major, minor })
    }
}

impl fmt::Display for GoVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

fn leading_number(component: &str) -> Option<u32> {
    let end = component
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(component.len());
    component[..end].parse().ok()
}

/// Defaults and limits applied during validation.
#[derive(Debug, Clone)]
pub struct ResolverSettings {
    /// Oldest Go version the templates support.
    pub minimum_version: GoVersion,
    /// Version used when none is supplied.
    pub default_version: String,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            minimum_version: GoVersion::new(1, 24),
            default_version: "1.24".to_string(),
        }
    }
}

/// Validated values, read-only for the rest of the run.
#[derive(Debug, Clone, PartialEq)]
pub struct Values {
    module_name: String,
    repo_name: String,
    go_version: String,
    extra: BTreeMap<String, serde_yaml::Value>,
}

impl Values {
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn repo_name(&self) -> &str {
        &self.repo_name
    }

    pub fn go_version(&self) -> &str {
        &self.go_version
    }

    pub fn extra(&self) -> &BTreeMap<String, serde_yaml::Value> {
        &self.extra
    }

    /// Build the Tera context shared by path and content rendering.
    ///
    /// Extra keys are inserted first so they can never shadow the named values.
    pub fn template_context(&self) -> Context {
        let mut context = Context::new();
        for (key, value) in &self.extra {
            context.insert(key.as_str(), value);
        }
        context.insert("module_name", &self.module_name);
        context.insert("repo_name", &self.repo_name);
        context.insert("go_version", &self.go_version);
        context
    }
}

/// Check required fields, apply defaults, and validate the Go version.
pub fn validate(raw: RawValues, settings: &ResolverSettings) -> Result<Values, ConfigError> {
    let module_name = required(raw.module_name, "module_name")?;
    let repo_name = required(raw.repo_name, "repo_name")?;

    let go_version = match raw.go_version.filter(|v| !v.trim().is_empty()) {
        Some(v) => v.trim().to_string(),
        None => {
            tracing::info!(version = %settings.default_version, "Using default Go version");
            settings.default_version.clone()
        }
    };

    let parsed = GoVersion::parse(&go_version)?;
    if parsed < settings.minimum_version {
        return Err(ConfigError::VersionTooLow {
            value: go_version,
            minimum: settings.minimum_version.to_string(),
        });
    }

    Ok(Values {
        module_name,
        repo_name,
        go_version,
        extra: raw.extra,
    })
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ConfigError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingField { field })
}
