//! Template-driven project scaffolding.
//!
//! Generation is strictly sequential:
//!
//! 1. [`values`] resolves and validates the parameter set
//! 2. [`scaffold`] walks a template type from a [`TemplateSource`] and writes the
//!    project tree, rendering paths and marked file contents with Tera
//! 3. [`hooks`] runs the post-generation commands whose trigger files exist
//!
//! ```no_run
//! use std::path::Path;
//! use beginning_core::{scaffold, values, EmbeddedSource, HookRunner, RawValues, ResolverSettings};
//!
//! # fn main() -> beginning_core::Result<()> {
//! let raw = values::load(Path::new("values.yaml"))?.merge(RawValues {
//!     repo_name: Some("payments".to_string()),
//!     ..Default::default()
//! });
//! let values = values::validate(raw, &ResolverSettings::default())?;
//!
//! let tree = scaffold::scaffold(&EmbeddedSource::bundled(), "service", &values, Path::new("payments"))?;
//! HookRunner::standard().run(&tree.root)?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod hooks;
pub mod render;
pub mod repository;
pub mod scaffold;
pub mod values;

pub use error::{ConfigError, Error, HookError, Result, TemplateError};
pub use hooks::{HookReport, HookRunner, HookSpec};
pub use repository::{
    DirectorySource, EmbeddedFile, EmbeddedSource, EntryKind, TemplateEntry, TemplateSource,
};
pub use scaffold::{GeneratedTree, ScaffoldPlan};
pub use values::{GoVersion, RawValues, ResolverSettings, Values};
